use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

// Logical tick rate driving the control FSM and the decimal counter.
// One slow tick is one millisecond of elapsed time.
pub const TICK_HZ: u32 = 1_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("source tick rate must be non-zero")]
    ZeroSourceRate,
    #[error("source tick rate {source_hz} Hz is too slow to derive a {} Hz tick", TICK_HZ)]
    RatioTooSmall { source_hz: u32 },
    #[error("source tick rate {source_hz} Hz is not a multiple of {} Hz", 2 * TICK_HZ)]
    InexactRatio { source_hz: u32 },
    #[error("debounce window must be at least one tick")]
    ZeroDebounceWindow,
    #[error("refresh counter width of {0} bits is outside 2..=32")]
    RefreshBits(u8),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // Rate of the fast source tick, in Hz.
    pub source_hz: u32,
    // Number of fast ticks a synchronised button level must hold before it is accepted.
    pub debounce_ticks: u32,
    // Width of the free-running display refresh counter. The top two bits select the digit.
    pub refresh_bits: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_hz: 1_000_000,
            debounce_ticks: 10_000,
            refresh_bits: 12,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_hz == 0 {
            return Err(ConfigError::ZeroSourceRate);
        }
        if self.half_period() == 0 {
            return Err(ConfigError::RatioTooSmall { source_hz: self.source_hz });
        }
        if self.source_hz % (2 * TICK_HZ) != 0 {
            return Err(ConfigError::InexactRatio { source_hz: self.source_hz });
        }
        if self.debounce_ticks == 0 {
            return Err(ConfigError::ZeroDebounceWindow);
        }
        if !(2..=32).contains(&self.refresh_bits) {
            return Err(ConfigError::RefreshBits(self.refresh_bits));
        }
        Ok(())
    }

    // Source ticks between two toggles of the slow tick level.
    pub fn half_period(&self) -> u32 {
        self.source_hz / TICK_HZ / 2
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.half_period(), 500);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml("source_hz = 100_000_000").unwrap();
        assert_eq!(config.source_hz, 100_000_000);
        assert_eq!(config.half_period(), 50_000);
        assert_eq!(config.debounce_ticks, Config::default().debounce_ticks);
        assert_eq!(config.refresh_bits, Config::default().refresh_bits);
    }

    #[test]
    fn rejects_bad_ratios() {
        let slow = Config { source_hz: 1_000, ..Config::default() };
        assert!(matches!(slow.validate(), Err(ConfigError::RatioTooSmall { .. })));

        let inexact = Config { source_hz: 3_000, ..Config::default() };
        assert!(matches!(inexact.validate(), Err(ConfigError::InexactRatio { .. })));

        let zero = Config { source_hz: 0, ..Config::default() };
        assert!(matches!(zero.validate(), Err(ConfigError::ZeroSourceRate)));
    }

    #[test]
    fn rejects_zero_debounce_and_bad_refresh() {
        let debounce = Config { debounce_ticks: 0, ..Config::default() };
        assert!(matches!(debounce.validate(), Err(ConfigError::ZeroDebounceWindow)));

        let refresh = Config { refresh_bits: 1, ..Config::default() };
        assert!(matches!(refresh.validate(), Err(ConfigError::RefreshBits(1))));
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../stopwatch.toml");
        assert_eq!(Config::from_file(path).unwrap(), Config::default());
    }

    #[test]
    fn missing_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/no-such-stopwatch.toml");
        assert!(matches!(Config::from_file(path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn misspelled_key_is_rejected() {
        assert!(matches!(
            Config::from_toml("debounce_tick = 5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn malformed_toml() {
        assert!(matches!(
            Config::from_toml("source_hz = \"fast\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
