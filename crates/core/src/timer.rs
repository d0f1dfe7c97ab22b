//! Lock timer - a polled one-shot deadline on the session clock
//!
//! Armed when a piece comes to rest, cancelled by interrupts, and polled by
//! the tick. A fired timer stays disarmed until armed again. Suspending keeps
//! the remaining time so a pause does not eat into the delay.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Idle,
    Armed { deadline_ms: u64 },
    Suspended { remaining_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockTimer {
    state: TimerState,
}

impl LockTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    /// Arm (or re-arm) to fire `duration_ms` after `now_ms`
    pub fn arm(&mut self, now_ms: u64, duration_ms: u32) {
        self.state = TimerState::Armed {
            deadline_ms: now_ms.saturating_add(duration_ms as u64),
        };
    }

    pub fn cancel(&mut self) {
        self.state = TimerState::Idle;
    }

    /// Armed or suspended with time left
    pub fn is_armed(&self) -> bool {
        !matches!(self.state, TimerState::Idle)
    }

    /// Returns true exactly once when the deadline has passed
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.state {
            TimerState::Armed { deadline_ms } if now_ms >= deadline_ms => {
                self.state = TimerState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Freeze the remaining time
    pub fn suspend(&mut self, now_ms: u64) {
        if let TimerState::Armed { deadline_ms } = self.state {
            self.state = TimerState::Suspended {
                remaining_ms: deadline_ms.saturating_sub(now_ms),
            };
        }
    }

    /// Continue a suspended timer from `now_ms`
    pub fn resume(&mut self, now_ms: u64) {
        if let TimerState::Suspended { remaining_ms } = self.state {
            self.state = TimerState::Armed {
                deadline_ms: now_ms.saturating_add(remaining_ms),
            };
        }
    }

    /// Time left before firing, if armed or suspended
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        match self.state {
            TimerState::Idle => None,
            TimerState::Armed { deadline_ms } => Some(deadline_ms.saturating_sub(now_ms)),
            TimerState::Suspended { remaining_ms } => Some(remaining_ms),
        }
    }
}

impl Default for LockTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_at_deadline() {
        let mut timer = LockTimer::new();
        timer.arm(1000, 200);
        assert!(!timer.poll(1199));
        assert!(timer.poll(1200));
        assert!(!timer.poll(1300));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_rearm_pushes_deadline() {
        let mut timer = LockTimer::new();
        timer.arm(0, 200);
        timer.arm(150, 200);
        assert!(!timer.poll(200));
        assert!(timer.poll(350));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut timer = LockTimer::new();
        timer.arm(0, 200);
        timer.cancel();
        assert!(!timer.poll(500));
    }

    #[test]
    fn test_suspend_keeps_remaining_time() {
        let mut timer = LockTimer::new();
        timer.arm(0, 200);
        timer.suspend(150);
        assert!(!timer.poll(10_000));
        assert_eq!(timer.remaining_ms(10_000), Some(50));

        timer.resume(10_000);
        assert!(!timer.poll(10_049));
        assert!(timer.poll(10_050));
    }
}
