use crate::fsm::Control;
use log::trace;
use std::fmt;

// Four BCD digits, d0 least significant. Reads as seconds.milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElapsedTime {
    digits: [u8; 4],
}

impl ElapsedTime {
    pub fn digits(&self) -> [u8; 4] {
        self.digits
    }

    pub fn digit(&self, index: usize) -> Option<u8> {
        self.digits.get(index).copied()
    }

    // Packed d3,d2,d1,d0, most significant nibble first.
    pub fn packed(&self) -> u16 {
        self.digits
            .iter()
            .rev()
            .fold(0, |acc, &d| (acc << 4) | u16::from(d))
    }

    // Inverse of `packed`. Returns None if any nibble is not a decimal digit.
    pub fn from_packed(packed: u16) -> Option<Self> {
        let mut digits = [0; 4];
        for (i, d) in digits.iter_mut().enumerate() {
            *d = ((packed >> (4 * i)) & 0xF) as u8;
            if *d > 9 {
                return None;
            }
        }
        Some(Self { digits })
    }

    pub fn millis(&self) -> u16 {
        self.digits
            .iter()
            .rev()
            .fold(0, |acc, &d| acc * 10 + u16::from(d))
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d0, d1, d2, d3] = self.digits;
        write!(f, "{}.{}{}{}", d3, d2, d1, d0)
    }
}

// Four-digit decimal odometer advanced on the slow tick.
#[derive(Default)]
pub struct DecimalCounter {
    time: ElapsedTime,
}

impl DecimalCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.time = ElapsedTime::default();
    }

    pub fn time(&self) -> ElapsedTime {
        self.time
    }

    pub fn packed(&self) -> u16 {
        self.time.packed()
    }

    // Clear overrides both advance lines. The carry into each digit is computed
    // from the values before this tick, so every digit that rolls over does so
    // in the same tick.
    pub fn tick(&mut self, control: Control, clear: bool) {
        if clear {
            self.reset();
            return;
        }

        let mut carry = control.advance || control.manual_advance;
        for d in self.time.digits.iter_mut() {
            if !carry {
                break;
            }
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
            }
        }

        if carry {
            trace!("counter rolled over 9.999 -> 0.000");
        }
    }
}
