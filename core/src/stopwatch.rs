use crate::{
    config::{Config, ConfigError, TICK_HZ},
    counter::{DecimalCounter, ElapsedTime},
    debounce::Debouncer,
    display::{DisplayFrame, DisplayMux},
    divider::TickDivider,
    fsm::{Edges, ElapsedTimeFsm, FsmState},
};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Stop,
    Increment,
    Clear,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Start, Button::Stop, Button::Increment, Button::Clear];
}

// Holds rising edges produced on the fast tick until the next slow tick takes them.
#[derive(Default)]
struct EdgeLatch {
    pending: Edges,
}

impl EdgeLatch {
    fn capture(&mut self, button: Button) {
        match button {
            Button::Start => self.pending.start = true,
            Button::Stop => self.pending.stop = true,
            Button::Increment => self.pending.increment = true,
            Button::Clear => self.pending.clear = true,
        }
    }

    fn take(&mut self) -> Edges {
        std::mem::take(&mut self.pending)
    }
}

pub struct Stopwatch {
    config: Config,
    divider: TickDivider,
    buttons: [Debouncer; 4],
    raw: [bool; 4],
    latch: EdgeLatch,
    fsm: ElapsedTimeFsm,
    counter: DecimalCounter,
    display: DisplayMux,
    reset: bool,
    frame: DisplayFrame,
}

impl Stopwatch {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            divider: TickDivider::from_rates(config.source_hz, TICK_HZ),
            buttons: std::array::from_fn(|_| Debouncer::new(config.debounce_ticks)),
            raw: [false; 4],
            latch: EdgeLatch::default(),
            fsm: ElapsedTimeFsm::new(),
            counter: DecimalCounter::new(),
            display: DisplayMux::new(config.refresh_bits),
            reset: false,
            frame: DisplayFrame::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn button_down(&mut self, button: Button) {
        self.raw[button as usize] = true;
    }

    pub fn button_up(&mut self, button: Button) {
        self.raw[button as usize] = false;
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.raw[button as usize] = pressed;
    }

    // Reset is level sensitive and takes effect immediately, independent of the tick.
    pub fn set_reset(&mut self, level: bool) {
        if level && !self.reset {
            info!("reset asserted");
        } else if !level && self.reset {
            info!("reset released");
        }
        self.reset = level;
        if level {
            self.reset_all();
        }
    }

    fn reset_all(&mut self) {
        self.divider.reset();
        for b in self.buttons.iter_mut() {
            b.reset();
        }
        self.latch = EdgeLatch::default();
        self.fsm.reset();
        self.counter.reset();
        self.display.reset();
        self.frame = self.display.frame(self.counter.packed());
    }

    // Advances one fast source tick and returns the display lines driven during it.
    //
    // Every component sees the values its inputs held at the end of the previous
    // tick: the counter uses the control lines from before the FSM steps, the FSM
    // uses edges latched on earlier ticks, and the display shows the counter value
    // from before this tick.
    pub fn tick(&mut self) -> DisplayFrame {
        if self.reset {
            return self.frame;
        }

        let control = self.fsm.outputs();
        let packed = self.counter.packed();

        if self.divider.tick() {
            let edges = self.latch.take();
            if edges.clear {
                info!("clear at {}", self.counter.time());
            }
            self.counter.tick(control, edges.clear);
            self.fsm.tick(edges);
        }

        for (button, (deb, &raw)) in Button::ALL
            .into_iter()
            .zip(self.buttons.iter_mut().zip(self.raw.iter()))
        {
            if deb.tick(raw).rising {
                self.latch.capture(button);
            }
        }

        self.frame = self.display.tick(packed);
        self.frame
    }

    // Runs `ticks` fast ticks and returns the last frame.
    pub fn run(&mut self, ticks: u64) -> DisplayFrame {
        for _ in 0..ticks {
            self.tick();
        }
        self.frame
    }

    // Number of fast ticks in `ms` milliseconds of simulated time.
    pub fn ticks_for_millis(&self, ms: u64) -> u64 {
        u64::from(self.config.source_hz) * ms / 1_000
    }

    pub fn frame(&self) -> DisplayFrame {
        self.frame
    }

    pub fn elapsed(&self) -> ElapsedTime {
        self.counter.time()
    }

    pub fn state(&self) -> FsmState {
        self.fsm.state()
    }

    #[cfg(feature = "inspect")]
    pub fn inspect(&self) -> crate::inspect::StopwatchState {
        crate::inspect::StopwatchState {
            fsm: self.fsm.state(),
            digits: self.counter.time().digits(),
            slow_level: self.divider.level(),
            buttons: std::array::from_fn(|i| self.buttons[i].level()),
            refresh: self.display.refresh_counter(),
            reset: self.reset,
        }
    }
}
