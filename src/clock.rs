use std::time::{Duration, Instant};

/// Periodic tick source on a single caller-driven timeline.
///
/// The clock never sleeps; the event loop asks it whether a tick is due by
/// passing the current `Instant`. That keeps every transition serialized with
/// input handling and makes the timing deterministic under test.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    period: Duration,
    state: ClockState,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum ClockState {
    Stopped,
    Running { next_due: Instant },
    Suspended { remaining: Duration },
}

impl SimulationClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            period: Duration::ZERO,
            state: ClockState::Stopped,
        }
    }

    /// Starts ticking every `period`; ignored while already running or
    /// suspended.
    pub fn start(&mut self, period: Duration, now: Instant) {
        if self.state != ClockState::Stopped {
            return;
        }

        self.period = period;
        self.state = ClockState::Running {
            next_due: now + period,
        };
    }

    /// Halts ticking and drops any suspended deadline.
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Restarts at a new period. The next tick fires one full `period`
    /// after `now`.
    pub fn reschedule(&mut self, period: Duration, now: Instant) {
        self.stop();
        self.start(period, now);
    }

    /// Stops producing ticks but remembers how far the current period had
    /// progressed.
    pub fn suspend(&mut self, now: Instant) {
        if let ClockState::Running { next_due } = self.state {
            self.state = ClockState::Suspended {
                remaining: next_due.saturating_duration_since(now),
            };
        }
    }

    /// Continues from where `suspend` left off.
    pub fn resume(&mut self, now: Instant) {
        if let ClockState::Suspended { remaining } = self.state {
            self.state = ClockState::Running {
                next_due: now + remaining,
            };
        }
    }

    /// Returns true when a tick is due and arms the next one.
    ///
    /// At most one tick fires per call; a late caller does not get a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let ClockState::Running { next_due } = self.state else {
            return false;
        };

        if now < next_due {
            return false;
        }

        self.state = ClockState::Running {
            next_due: now + self.period,
        };
        true
    }

    /// Time left before the next tick, or `None` when no tick is scheduled.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        match self.state {
            ClockState::Running { next_due } => Some(next_due.saturating_duration_since(now)),
            ClockState::Stopped | ClockState::Suspended { .. } => None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        matches!(self.state, ClockState::Suspended { .. })
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}
