use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::{info, warn};
use minifb::{Key, Scale, Window, WindowOptions};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use stopwatch_core::{Button, Config, ElapsedTime, Stopwatch};

mod render;

#[cfg(test)]
mod test;

#[derive(Parser)]
#[command(about = "A tick-accurate four digit stopwatch simulator.")]
struct Args {
    #[arg(short, long, help = "Path to a TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(short = 'x', long, help = "Display scale factor")]
    #[arg(value_enum, default_value_t)]
    scale: DisplayScale,

    #[arg(long, value_name = "MS", help = "Run headless: start, simulate MS milliseconds, print the reading")]
    run_for: Option<u64>,
}

// Copy of minifb::Scale such that it implements clap::ValueEnum.
#[derive(clap::ValueEnum, Clone, Default, Debug)]
enum DisplayScale {
    X1,
    #[default]
    X2,
    X4,
    X8,
}

const FRAME_TIME: Duration = Duration::from_micros(16_600);

// Most simulated time a single frame may catch up on. A longer stall drops the backlog.
const MAX_CATCH_UP_MS: u128 = 100;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            ensure!(path.exists(), "config path provided does not exist");
            Config::from_file(path)
                .with_context(|| format!("failed loading config {}", path.display()))?
        }
        None => Config::default(),
    };
    info!(
        "source {} Hz, debounce {} ticks, refresh counter {} bits",
        config.source_hz, config.debounce_ticks, config.refresh_bits
    );

    let stopwatch = Stopwatch::new(config).context("invalid configuration")?;

    if let Some(ms) = args.run_for {
        let reading = run_headless(stopwatch, ms);
        println!("{}", reading);
        return Ok(());
    }

    run_window(stopwatch, args.scale)
}

// Presses start, lets the stopwatch run for `ms` of simulated time, and returns the reading.
fn run_headless(mut stopwatch: Stopwatch, ms: u64) -> ElapsedTime {
    let config = *stopwatch.config();
    // Synchroniser delay plus debounce window, then two slow ticks for the edge to land.
    let settle = u64::from(config.debounce_ticks) + 2 + 4 * u64::from(config.half_period());

    stopwatch.button_down(Button::Start);
    stopwatch.run(settle);
    stopwatch.button_up(Button::Start);

    let ticks = stopwatch.ticks_for_millis(ms);
    stopwatch.run(ticks);
    info!("simulated {} ticks, state {:?}", settle + ticks, stopwatch.state());
    stopwatch.elapsed()
}

fn run_window(mut stopwatch: Stopwatch, scale: DisplayScale) -> Result<()> {
    let opts = WindowOptions {
        scale: match scale {
            DisplayScale::X1 => Scale::X1,
            DisplayScale::X2 => Scale::X2,
            DisplayScale::X4 => Scale::X4,
            DisplayScale::X8 => Scale::X8,
        },
        ..Default::default()
    };

    let mut window = Window::new("stopwatch", render::WIDTH, render::HEIGHT, opts)
        .context("failed to create window")?;
    window.limit_update_rate(Some(FRAME_TIME));

    let keys = [
        (Key::Enter, Button::Start),
        (Key::Space, Button::Stop),
        (Key::Up, Button::Increment),
        (Key::Backspace, Button::Clear),
    ];

    let source_hz = u128::from(stopwatch.config().source_hz);
    let mut buffer = vec![0; render::WIDTH * render::HEIGHT];
    let mut persistence = render::Persistence::default();
    let mut last_title = String::new();
    let start = Instant::now();
    let mut ticks_run: u128 = 0;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        for (input, button) in keys.iter() {
            stopwatch.set_button(*button, window.is_key_down(*input));
        }
        stopwatch.set_reset(window.is_key_down(Key::R));

        // Keep simulated time in step with wall time.
        let due = start.elapsed().as_micros() * source_hz / 1_000_000;
        for _ in 0..ticks_this_frame(due, &mut ticks_run, source_hz) {
            persistence.latch(stopwatch.tick());
        }

        let state = stopwatch.inspect();
        let title = format!("stopwatch - {:?} [{}]", state.fsm, state.button_label());
        if title != last_title {
            window.set_title(&title);
            last_title = title;
        }

        render::draw(&mut buffer, &persistence);
        window
            .update_with_buffer(&buffer, render::WIDTH, render::HEIGHT)
            .context("failed to update display")?;
    }

    info!("closed at {}", stopwatch.elapsed());
    Ok(())
}

// Ticks to simulate so that `ticks_run` reaches `due`, capped at MAX_CATCH_UP_MS.
fn ticks_this_frame(due: u128, ticks_run: &mut u128, source_hz: u128) -> u128 {
    let limit = source_hz * MAX_CATCH_UP_MS / 1_000;
    if due > *ticks_run + limit {
        warn!("dropping {} ticks after a stalled frame", due - *ticks_run - limit);
        *ticks_run = due - limit;
    }
    let n = due.saturating_sub(*ticks_run);
    *ticks_run += n;
    n
}
