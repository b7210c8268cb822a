// Read-only snapshot of stopwatch internals for debugging front ends.

use crate::fsm::FsmState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopwatchState {
    pub fsm: FsmState,
    // d0..d3, least significant first.
    pub digits: [u8; 4],
    pub slow_level: bool,
    // Debounced levels in Start, Stop, Increment, Clear order.
    pub buttons: [bool; 4],
    pub refresh: u32,
    pub reset: bool,
}

impl StopwatchState {
    // Short label of the accepted button levels, e.g. "S--C".
    pub fn button_label(&self) -> String {
        self.buttons
            .iter()
            .zip(['S', 'P', 'I', 'C'])
            .map(|(&held, c)| if held { c } else { '-' })
            .collect()
    }
}
