use std::time::Duration;

/// Longest stretch of wall-clock time credited in one update. Anything
/// beyond (a stalled window, a debugger pause) is dropped rather than
/// replayed as a burst of cycles.
const MAX_ELAPSED: Duration = Duration::from_millis(250);

/// Converts elapsed wall-clock time into instruction steps and timer ticks,
/// each at its own fixed rate.
pub struct Clock {
    step_period: Duration,
    tick_period: Duration,
    step_acc: Duration,
    tick_acc: Duration,
}
impl Clock {
    /// Both rates must be non-zero.
    pub fn new(ips: u32, timer_hz: u32) -> Self {
        Clock {
            step_period: Duration::from_secs(1) / ips,
            tick_period: Duration::from_secs(1) / timer_hz,
            step_acc: Duration::ZERO,
            tick_acc: Duration::ZERO,
        }
    }
    /// Returns how many steps and timer ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> (u32, u32) {
        let elapsed = elapsed.min(MAX_ELAPSED);
        self.step_acc += elapsed;
        self.tick_acc += elapsed;
        (
            drain(&mut self.step_acc, self.step_period),
            drain(&mut self.tick_acc, self.tick_period),
        )
    }
    pub fn reset(&mut self) {
        self.step_acc = Duration::ZERO;
        self.tick_acc = Duration::ZERO;
    }
}

fn drain(acc: &mut Duration, period: Duration) -> u32 {
    let mut count = 0;
    while *acc >= period {
        *acc -= period;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn independent_rates() {
        let mut clock = Clock::new(700, 60);
        assert_eq!(clock.advance(Duration::from_millis(100)), (70, 6));
    }
    #[test]
    fn remainder_carries_over() {
        let mut clock = Clock::new(1000, 60);
        assert_eq!(clock.advance(Duration::from_micros(1500)), (1, 0));
        assert_eq!(clock.advance(Duration::from_micros(500)), (1, 0));
        assert_eq!(clock.advance(Duration::from_millis(15)), (15, 1));
    }
    #[test]
    fn long_stalls_are_capped() {
        let mut clock = Clock::new(700, 60);
        assert_eq!(clock.advance(Duration::from_secs(10)), (175, 15));
    }
    #[test]
    fn reset_drops_pending_time() {
        let mut clock = Clock::new(1000, 60);
        clock.advance(Duration::from_micros(900));
        clock.reset();
        assert_eq!(clock.advance(Duration::from_micros(900)), (0, 0));
    }
}
