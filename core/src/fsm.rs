use log::debug;

// Control state of the stopwatch. Encoded as a 2-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FsmState {
    #[default]
    Idle = 0b00,
    Counting = 0b01,
    ManualIncrement = 0b10,
}

impl FsmState {
    pub fn bits(self) -> u8 {
        self as u8
    }

    // The unused encoding falls back to Idle.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b01 => FsmState::Counting,
            0b10 => FsmState::ManualIncrement,
            _ => FsmState::Idle,
        }
    }
}

// Debounced rising edges seen on a single slow tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub start: bool,
    pub stop: bool,
    pub increment: bool,
    pub clear: bool,
}

// Control lines driven into the decimal counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Control {
    pub advance: bool,
    pub manual_advance: bool,
}

#[derive(Default)]
pub struct ElapsedTimeFsm {
    state: FsmState,
}

impl ElapsedTimeFsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.state = FsmState::Idle;
    }

    pub fn state(&self) -> FsmState {
        self.state
    }

    // Outputs are a pure function of the current state.
    pub fn outputs(&self) -> Control {
        match self.state {
            FsmState::Idle => Control::default(),
            FsmState::Counting => Control {
                advance: true,
                manual_advance: false,
            },
            FsmState::ManualIncrement => Control {
                advance: false,
                manual_advance: true,
            },
        }
    }

    // Evaluated once per slow tick.
    pub fn tick(&mut self, edges: Edges) {
        let next = if edges.clear {
            FsmState::Idle
        } else {
            match self.state {
                FsmState::Idle if edges.start => FsmState::Counting,
                FsmState::Idle if edges.increment => FsmState::ManualIncrement,
                FsmState::Idle => FsmState::Idle,
                FsmState::Counting if edges.stop => FsmState::Idle,
                // Manual increments are ignored while running.
                FsmState::Counting => FsmState::Counting,
                FsmState::ManualIncrement => FsmState::Idle,
            }
        };

        if next != self.state {
            debug!("fsm {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}
