//! Two-speed refresh scheduler.
//!
//! One external `tick()` call at a fixed nominal rate drives both refresh
//! cadences. The fast cycle fires every `fast_period` ticks; each fast
//! firing advances the slow counter, and the slow cycle fires every
//! `slow_period` fast cycles. The slow cadence is therefore coupled to the
//! fast one: a stall in the fast cycle proportionally delays the modem
//! refresh as well. That coupling is deliberate.

/// Which cycles fired on a given tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fired {
    pub fast: bool,
    pub slow: bool,
}

/// Coupled fast/slow tick counters.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    fast_period: u32,
    slow_period: u32,
    fast_counter: u32,
    slow_counter: u32,
}

impl RefreshScheduler {
    /// Creates a scheduler firing the fast cycle every `fast_period` ticks
    /// and the slow cycle every `slow_period` fast cycles. Zero periods are
    /// clamped to 1.
    pub fn new(fast_period: u32, slow_period: u32) -> Self {
        Self {
            fast_period: fast_period.max(1),
            slow_period: slow_period.max(1),
            fast_counter: 0,
            slow_counter: 0,
        }
    }

    /// Advances both counters by one tick and reports which cycles are due.
    /// A counter that fires is reset to zero on the same tick.
    pub fn tick(&mut self) -> Fired {
        let mut fired = Fired::default();

        self.fast_counter += 1;
        if self.fast_counter >= self.fast_period {
            self.fast_counter = 0;
            self.slow_counter += 1;
            fired.fast = true;
        }

        if self.slow_counter >= self.slow_period {
            self.slow_counter = 0;
            fired.slow = true;
        }

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_fires_every_period() {
        let mut sched = RefreshScheduler::new(200, 30);
        let mut fast_ticks = Vec::new();
        for tick in 1..=600 {
            if sched.tick().fast {
                fast_ticks.push(tick);
            }
        }
        assert_eq!(fast_ticks, vec![200, 400, 600]);
    }

    #[test]
    fn test_slow_fires_after_slow_period_fast_cycles() {
        let mut sched = RefreshScheduler::new(200, 30);
        let mut slow_ticks = Vec::new();
        for tick in 1..=12_000 {
            if sched.tick().slow {
                slow_ticks.push(tick);
            }
        }
        // 30 fast cycles of 200 ticks each
        assert_eq!(slow_ticks, vec![6_000, 12_000]);
    }

    #[test]
    fn test_slow_fires_on_same_tick_as_fast() {
        let mut sched = RefreshScheduler::new(2, 3);
        for tick in 1..=6 {
            let fired = sched.tick();
            if tick == 6 {
                assert!(fired.fast && fired.slow);
            } else {
                assert!(!fired.slow);
            }
        }
    }

    #[test]
    fn test_counters_reset_after_firing() {
        let mut sched = RefreshScheduler::new(2, 2);
        assert_eq!(sched.tick(), Fired { fast: false, slow: false });
        assert_eq!(sched.tick(), Fired { fast: true, slow: false });
        assert_eq!(sched.tick(), Fired { fast: false, slow: false });
        // second fast cycle completes, slow fires with it
        assert_eq!(sched.tick(), Fired { fast: true, slow: true });
        // the pattern repeats identically after the reset
        assert_eq!(sched.tick(), Fired { fast: false, slow: false });
        assert_eq!(sched.tick(), Fired { fast: true, slow: false });
    }

    #[test]
    fn test_zero_periods_clamped() {
        let mut sched = RefreshScheduler::new(0, 0);
        let fired = sched.tick();
        assert!(fired.fast && fired.slow);
    }
}
