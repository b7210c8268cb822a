use super::{run_headless, ticks_this_frame};
use stopwatch_core::{Config, Stopwatch};

#[test]
fn headless_reading_tracks_simulated_time() {
    let config = Config {
        source_hz: 20_000,
        debounce_ticks: 50,
        refresh_bits: 8,
    };
    let reading = run_headless(Stopwatch::new(config).unwrap(), 750);
    let ms = reading.millis();
    assert!((750..=753).contains(&ms), "read {}", reading);
}

#[test]
fn headless_default_config() {
    let reading = run_headless(Stopwatch::new(Config::default()).unwrap(), 100);
    assert_eq!(reading.digit(3), Some(0));
    assert_eq!(reading.digit(2), Some(1));
}

#[test]
fn frame_catch_up_is_bounded() {
    let source_hz = 1_000_000;
    let mut ticks_run = 0;

    // Normal frame: run everything that is due.
    assert_eq!(ticks_this_frame(16_600, &mut ticks_run, source_hz), 16_600);
    assert_eq!(ticks_this_frame(16_600, &mut ticks_run, source_hz), 0);

    // A ten second stall only simulates 100 ms.
    let due = 10_016_600;
    assert_eq!(ticks_this_frame(due, &mut ticks_run, source_hz), 100_000);
    assert_eq!(ticks_run, due);
}
