// Button conditioning for the fast tick domain.
//
// A raw level passes through two synchroniser flops before it is looked at.
// The synchronised sample must then differ from the accepted level for
// `window` consecutive ticks before it is adopted; any tick where it agrees
// with the accepted level again restarts the count. A false -> true change of
// the accepted level produces a rising edge pulse for exactly one tick.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Debounced {
    pub level: bool,
    pub rising: bool,
}

pub struct Debouncer {
    window: u32,
    sync: [bool; 2],
    stable: bool,
    prev_stable: bool,
    count: u32,
}

impl Debouncer {
    pub fn new(window: u32) -> Self {
        Self {
            window,
            sync: [false; 2],
            stable: false,
            prev_stable: false,
            count: 0,
        }
    }

    pub fn reset(&mut self) {
        self.sync = [false; 2];
        self.stable = false;
        self.prev_stable = false;
        self.count = 0;
    }

    // Samples the raw level once and returns the conditioned output for this tick.
    pub fn tick(&mut self, raw: bool) -> Debounced {
        let synced = self.sync[1];
        self.sync = [raw, self.sync[0]];

        self.prev_stable = self.stable;
        if synced == self.stable {
            self.count = 0;
        } else {
            self.count += 1;
            if self.count >= self.window {
                self.stable = synced;
                self.count = 0;
            }
        }

        self.output()
    }

    pub fn output(&self) -> Debounced {
        Debounced {
            level: self.stable,
            rising: self.stable && !self.prev_stable,
        }
    }

    pub fn level(&self) -> bool {
        self.stable
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(deb: &mut Debouncer, raw: bool, ticks: usize) -> Vec<Debounced> {
        (0..ticks).map(|_| deb.tick(raw)).collect()
    }

    #[test]
    fn accepts_level_after_window() {
        let mut deb = Debouncer::new(4);
        let out = run(&mut deb, true, 10);

        // Two ticks of synchroniser delay, then four ticks at the new level.
        let first = out.iter().position(|o| o.level).unwrap();
        assert_eq!(first, 5);
        assert!(out[first].rising);
        assert!(out[first + 1..].iter().all(|o| o.level && !o.rising));
    }

    #[test]
    fn held_input_pulses_once() {
        let mut deb = Debouncer::new(3);
        let pulses = run(&mut deb, true, 1000).iter().filter(|o| o.rising).count();
        assert_eq!(pulses, 1);
    }

    #[test]
    fn fast_oscillation_is_rejected() {
        let mut deb = Debouncer::new(5);
        for i in 0..2000 {
            // High for 4 ticks, low for 4 ticks; always shorter than the window.
            let out = deb.tick((i / 4) % 2 == 0);
            assert!(!out.level);
            assert!(!out.rising);
        }
    }

    #[test]
    fn release_produces_no_rising_pulse() {
        let mut deb = Debouncer::new(2);
        run(&mut deb, true, 10);
        let out = run(&mut deb, false, 10);
        assert!(out.iter().all(|o| !o.rising));
        assert!(!out.last().unwrap().level);

        // A second press pulses again.
        let again = run(&mut deb, true, 10).iter().filter(|o| o.rising).count();
        assert_eq!(again, 1);
    }

    #[test]
    fn glitch_restarts_count() {
        let mut deb = Debouncer::new(4);
        // Three ticks of disagreement are not enough; the glitch restarts the window.
        let mut raw = vec![true; 3];
        raw.push(false);
        raw.extend([true; 3]);
        let out: Vec<Debounced> = raw.iter().map(|&r| deb.tick(r)).collect();
        assert!(out.iter().all(|o| !o.level));

        // The last sample after the glitch has counted once; three more complete the window.
        let out = run(&mut deb, true, 4);
        assert!(!out[1].level);
        assert!(out[2].level && out[2].rising);
    }

    #[test]
    fn reset_returns_to_released() {
        let mut deb = Debouncer::new(1);
        run(&mut deb, true, 5);
        assert!(deb.level());
        deb.reset();
        assert!(!deb.level());
        assert_eq!(deb.output(), Debounced::default());
    }
}
