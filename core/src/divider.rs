// Derives the slow logical tick from the fast source tick.
// The counter advances every source tick; after `half_period` source ticks it
// wraps to zero and the output level is inverted, producing a symmetric square
// wave at source_hz / (2 * half_period).
pub struct TickDivider {
    half_period: u32,
    n: u32,
    level: bool,
}

impl TickDivider {
    pub fn new(half_period: u32) -> Self {
        Self {
            half_period,
            n: 0,
            level: false,
        }
    }

    // A ratio that does not divide evenly is truncated.
    pub fn from_rates(source_hz: u32, target_hz: u32) -> Self {
        Self::new(source_hz / target_hz / 2)
    }

    pub fn reset(&mut self) {
        self.n = 0;
        self.level = false;
    }

    // Advances one source tick. Returns true when the output level rises,
    // which is the clock edge of the slow domain.
    pub fn tick(&mut self) -> bool {
        if self.n + 1 >= self.half_period {
            self.n = 0;
            self.level = !self.level;
            self.level
        } else {
            self.n += 1;
            false
        }
    }

    pub fn level(&self) -> bool {
        self.level
    }

    pub fn half_period(&self) -> u32 {
        self.half_period
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn toggles_every_half_period() {
        let mut d = TickDivider::new(3);
        let levels: Vec<bool> = (0..12)
            .map(|_| {
                d.tick();
                d.level()
            })
            .collect();
        assert_eq!(
            levels,
            [false, false, true, true, true, false, false, false, true, true, true, false]
        );
    }

    #[test]
    fn one_rising_edge_per_period() {
        let mut d = TickDivider::from_rates(1_000_000, 1_000);
        assert_eq!(d.half_period(), 500);

        // One second of source ticks yields exactly 1000 slow ticks.
        let edges = (0..1_000_000).filter(|_| d.tick()).count();
        assert_eq!(edges, 1_000);
    }

    #[test]
    fn truncates_inexact_ratio() {
        let d = TickDivider::from_rates(4_500, 1_000);
        assert_eq!(d.half_period(), 2);
    }

    #[test]
    fn reset_clears_counter_and_level() {
        let mut d = TickDivider::new(2);
        d.tick();
        d.tick();
        d.tick();
        assert!(d.level());
        d.reset();
        assert!(!d.level());
        assert!(!d.tick());
        assert!(d.tick());
    }
}
