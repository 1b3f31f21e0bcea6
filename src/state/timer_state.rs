//! Timer state structure and progress clock

use std::time::{Duration, Instant};

/// Animations reach their finished look when this share of the total
/// duration has elapsed, leaving the final stretch of the countdown to show
/// the completed state.
pub const COMPLETION_SCALE: f64 = 0.9;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Countdown state advanced once per second by the host
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    total: Duration,
    remaining: Duration,
    paused: bool,
    done: bool,
    last_tick_at: Option<Instant>,
}

impl TimerState {
    /// Create a running timer with the full duration remaining
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
            paused: false,
            done: total.is_zero(),
            last_tick_at: None,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance the countdown by one second. Returns `true` on the tick that
    /// finishes the timer.
    pub fn tick_second(&mut self, now: Instant) -> bool {
        if self.done {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(ONE_SECOND);
        self.last_tick_at = Some(now);
        if self.remaining.is_zero() {
            self.done = true;
            return true;
        }
        false
    }

    /// Flip the pause flag. Sub-second interpolation restarts from the next tick.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.last_tick_at = None;
        self.paused
    }

    /// Completion fraction in `[0, 1]`, interpolated between whole-second
    /// ticks using the wall clock
    pub fn fraction(&self, now: Instant) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        if self.done {
            return 1.0;
        }

        let mut elapsed = self.total - self.remaining;
        if !self.paused {
            if let Some(at) = self.last_tick_at {
                // Never run ahead of the next whole-second tick
                elapsed += now.saturating_duration_since(at).min(ONE_SECOND);
            }
        }
        let elapsed = elapsed.min(self.total);

        let frac = elapsed.as_secs_f64() / (self.total.as_secs_f64() * COMPLETION_SCALE);
        frac.min(1.0)
    }

    /// Share of the total still on the clock, used to pick the timer color
    pub fn remaining_fraction(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        self.remaining.as_secs_f64() / self.total.as_secs_f64()
    }

    /// Whole hours, minutes and seconds left
    pub fn hms(&self) -> (u64, u64, u64) {
        let secs = self.remaining.as_secs();
        (secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn starts_at_zero_and_finishes_at_one() {
        let start = Instant::now();
        let mut timer = TimerState::new(secs(3));
        assert_eq!(timer.fraction(start), 0.0);

        assert!(!timer.tick_second(start + secs(1)));
        assert!(!timer.tick_second(start + secs(2)));
        assert!(timer.tick_second(start + secs(3)));
        assert!(timer.is_done());
        assert_eq!(timer.remaining(), Duration::ZERO);
        assert_eq!(timer.fraction(start + secs(10)), 1.0);
    }

    #[test]
    fn done_is_terminal() {
        let now = Instant::now();
        let mut timer = TimerState::new(secs(1));
        assert!(timer.tick_second(now));
        assert!(!timer.tick_second(now));
        assert_eq!(timer.remaining(), Duration::ZERO);
    }

    #[test]
    fn zero_duration_never_divides() {
        let now = Instant::now();
        let mut timer = TimerState::new(Duration::ZERO);
        timer.tick_second(now);
        assert_eq!(timer.fraction(now + secs(5)), 0.0);
        assert_eq!(timer.remaining_fraction(), 0.0);
    }

    #[test]
    fn finishes_early_by_ten_percent() {
        let start = Instant::now();
        let mut timer = TimerState::new(secs(10));
        let mut at = start;
        for _ in 0..9 {
            at += secs(1);
            timer.tick_second(at);
        }
        assert_eq!(timer.remaining(), secs(1));
        assert_eq!(timer.fraction(at), 1.0);
    }

    #[test]
    fn interpolates_between_ticks() {
        let start = Instant::now();
        let mut timer = TimerState::new(secs(100));
        timer.tick_second(start);
        let base = timer.fraction(start);
        let later = timer.fraction(start + Duration::from_millis(500));
        assert!(later > base);
        // capped at one second of interpolation
        assert_eq!(
            timer.fraction(start + secs(1)),
            timer.fraction(start + secs(30))
        );
    }

    #[test]
    fn pause_freezes_interpolation() {
        let start = Instant::now();
        let mut timer = TimerState::new(secs(100));
        timer.tick_second(start);
        assert!(timer.toggle_pause());
        let paused = timer.fraction(start + Duration::from_millis(100));
        assert_eq!(paused, timer.fraction(start + Duration::from_millis(900)));
        assert!(!timer.toggle_pause());
    }

    #[test]
    fn hms_split() {
        let timer = TimerState::new(secs(3 * 3600 + 25 * 60 + 7));
        assert_eq!(timer.hms(), (3, 25, 7));
    }

    proptest! {
        #[test]
        fn fraction_is_monotonic(total in 1u64..200, offsets in proptest::collection::vec(0u64..1000, 1..50)) {
            let start = Instant::now();
            let mut timer = TimerState::new(secs(total));
            let mut last = timer.fraction(start);
            let mut tick_at = start;
            for offset in offsets {
                let probe = tick_at + Duration::from_millis(offset);
                let f = timer.fraction(probe);
                prop_assert!(f >= last);
                last = f;
                tick_at += secs(1);
                timer.tick_second(tick_at);
                let f = timer.fraction(tick_at);
                prop_assert!(f >= last);
                last = f;
                if timer.is_done() {
                    prop_assert_eq!(f, 1.0);
                }
            }
        }
    }
}
