pub mod config;
pub mod counter;
pub mod debounce;
pub mod display;
pub mod divider;
pub mod fsm;
#[cfg(feature = "inspect")]
pub mod inspect;
pub mod stopwatch;

mod bit;

pub use config::{Config, ConfigError, TICK_HZ};
pub use counter::ElapsedTime;
pub use display::{DisplayFrame, Segment};
pub use fsm::FsmState;
pub use stopwatch::{Button, Stopwatch};
