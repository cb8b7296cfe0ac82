//! Phase scheduler: virtual clock with one owned phase timer
//!
//! Arming a timer replaces the previous one, so a phase exit can never
//! leave a stale timer behind.

/// The single active timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer<P> {
    pub phase: P,
    pub started_at: u64,
    pub deadline: u64,
}

#[derive(Debug, Clone)]
pub struct PhaseScheduler<P> {
    now: u64,
    timer: Option<PhaseTimer<P>>,
}

impl<P: Copy + PartialEq> Default for PhaseScheduler<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + PartialEq> PhaseScheduler<P> {
    pub fn new() -> Self {
        Self {
            now: 0,
            timer: None,
        }
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move the clock forward; never backwards
    pub fn advance_to(&mut self, t: u64) {
        self.now = self.now.max(t);
    }

    /// Arm the timer for `phase`, starting now
    pub fn arm(&mut self, phase: P, duration_ms: u64) -> u64 {
        let deadline = self.now + duration_ms;
        self.timer = Some(PhaseTimer {
            phase,
            started_at: self.now,
            deadline,
        });
        deadline
    }

    pub fn cancel(&mut self) {
        self.timer = None;
    }

    pub fn timer(&self) -> Option<PhaseTimer<P>> {
        self.timer
    }

    pub fn deadline(&self) -> Option<u64> {
        self.timer.map(|t| t.deadline)
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        self.timer.map(|t| t.deadline.saturating_sub(self.now))
    }

    /// Take the timer if it has expired for `phase`
    pub fn take_expired(&mut self, phase: P) -> bool {
        match self.timer {
            Some(t) if t.phase == phase && self.now >= t.deadline => {
                self.timer = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearm_from_expiry_instant() {
        let mut scheduler: PhaseScheduler<u8> = PhaseScheduler::new();
        scheduler.arm(1, 15_000);
        scheduler.advance_to(15_000);
        assert!(scheduler.take_expired(1));
        assert_eq!(scheduler.arm(2, 3_000), 18_000);
        assert_eq!(scheduler.remaining_ms(), Some(3_000));
    }

    #[test]
    fn test_wrong_phase_does_not_expire() {
        let mut scheduler: PhaseScheduler<u8> = PhaseScheduler::new();
        scheduler.arm(1, 100);
        scheduler.advance_to(500);
        assert!(!scheduler.take_expired(2));
        scheduler.cancel();
        assert!(!scheduler.take_expired(1));
        assert_eq!(scheduler.deadline(), None);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut scheduler: PhaseScheduler<u8> = PhaseScheduler::new();
        scheduler.advance_to(100);
        scheduler.advance_to(50);
        assert_eq!(scheduler.now(), 100);
    }
}
