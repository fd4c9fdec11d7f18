//! Frame clock for Burst FX
//! Fixed-period tick driver with an explicit {Idle, Running} state machine.
//! The clock runs only while the pool holds particles: `explode` starts it,
//! pool-empty stops it, and nothing else can.

use std::time::{Duration, Instant};
use tracing::debug;

/// Longest wall-clock gap converted into ticks in one frame. Anything beyond
/// this (a stalled compositor, a suspended laptop) is dropped so the clock
/// does not try to catch up with a tick avalanche.
const MAX_FRAME_GAP: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClockState {
    Idle,
    Running,
}

pub struct SimulationClock {
    state: ClockState,
    period: Duration,
    accumulator: Duration,
    last: Option<Instant>,
}

impl SimulationClock {
    pub fn new(period: Duration) -> Self {
        Self {
            state: ClockState::Idle,
            period,
            accumulator: Duration::ZERO,
            last: None,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Transition to Running. Idempotent; an already-running clock keeps its
    /// accumulated time so overlapping bursts do not reset the cadence.
    pub fn start(&mut self, now: Instant) {
        if self.state == ClockState::Idle {
            self.state = ClockState::Running;
            self.accumulator = Duration::ZERO;
            self.last = Some(now);
            debug!("clock started");
        }
    }

    /// Transition to Idle. Called exactly when the pool drains.
    pub fn stop(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Idle;
            self.accumulator = Duration::ZERO;
            self.last = None;
            debug!("clock stopped");
        }
    }

    /// Convert elapsed wall time into whole ticks. Returns 0 while idle.
    pub fn advance(&mut self, now: Instant) -> u32 {
        if self.state == ClockState::Idle {
            return 0;
        }
        let last = self.last.unwrap_or(now);
        let elapsed = now.saturating_duration_since(last).min(MAX_FRAME_GAP);
        self.last = Some(now);
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_16ms() -> SimulationClock {
        SimulationClock::new(Duration::from_millis(16))
    }

    #[test]
    fn test_idle_clock_produces_no_ticks() {
        let mut clock = clock_16ms();
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.advance(Instant::now()), 0);
    }

    #[test]
    fn test_whole_ticks_at_fixed_period() {
        let mut clock = clock_16ms();
        let t0 = Instant::now();
        clock.start(t0);
        // 50 ms elapsed = 3 whole 16 ms ticks, 2 ms carried over.
        assert_eq!(clock.advance(t0 + Duration::from_millis(50)), 3);
        // Another 14 ms completes the fourth tick.
        assert_eq!(clock.advance(t0 + Duration::from_millis(64)), 1);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut clock = clock_16ms();
        let t0 = Instant::now();
        clock.start(t0);
        clock.advance(t0 + Duration::from_millis(10));
        // Second start while running must not reset the accumulator.
        clock.start(t0 + Duration::from_millis(10));
        assert_eq!(clock.advance(t0 + Duration::from_millis(20)), 1);
    }

    #[test]
    fn test_stop_returns_to_idle() {
        let mut clock = clock_16ms();
        let t0 = Instant::now();
        clock.start(t0);
        assert!(clock.is_running());
        clock.stop();
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.advance(t0 + Duration::from_secs(1)), 0);

        // Restart after idle begins a fresh cadence.
        let t1 = t0 + Duration::from_secs(2);
        clock.start(t1);
        assert_eq!(clock.advance(t1 + Duration::from_millis(16)), 1);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = clock_16ms();
        let t0 = Instant::now();
        clock.start(t0);
        let ticks = clock.advance(t0 + Duration::from_secs(30));
        assert!(ticks <= (MAX_FRAME_GAP.as_millis() / 16) as u32);
        assert!(ticks > 0);
    }
}
