//! Inactivity Monitor: warn, then evict a human who never confirms
//!
//! Deadline-based: the monitor stores absolute instants on the room clock
//! and reports a signal when `poll` reaches them. It owns no timers.

use xs_stage::secs;

/// Signal produced by [`InactivityMonitor::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InactivitySignal {
    Warning { seconds_remaining: u32 },
    Kick,
}

#[derive(Debug, Clone, Default)]
pub struct InactivityMonitor {
    warn_at: Option<u64>,
    kick_at: Option<u64>,
    warned: bool,
    kicked: bool,
}

impl InactivityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm for a betting window opening at `now`
    pub fn arm(&mut self, now: u64, window_ms: u64, warning_at_ms: u64) {
        self.kick_at = Some(now + window_ms);
        self.warn_at = (warning_at_ms < window_ms).then_some(now + warning_at_ms);
        self.warned = false;
    }

    /// Clear both deadlines (confirmation, phase exit)
    pub fn disarm(&mut self) {
        self.warn_at = None;
        self.kick_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.kick_at.is_some()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.warn_at, self.kick_at) {
            (Some(w), Some(k)) => Some(w.min(k)),
            (w, k) => w.or(k),
        }
    }

    /// Report at most one due signal
    pub fn poll(&mut self, now: u64) -> Option<InactivitySignal> {
        if let (Some(warn_at), Some(kick_at)) = (self.warn_at, self.kick_at) {
            if now >= warn_at && now < kick_at {
                self.warn_at = None;
                self.warned = true;
                return Some(InactivitySignal::Warning {
                    seconds_remaining: secs(kick_at - warn_at),
                });
            }
        }

        match self.kick_at {
            Some(kick_at) if now >= kick_at && !self.kicked => {
                self.kicked = true;
                self.disarm();
                Some(InactivitySignal::Kick)
            }
            _ => None,
        }
    }

    /// Seconds left before the kick while a warning is showing
    pub fn warning_seconds(&self, now: u64) -> Option<u32> {
        match self.kick_at {
            Some(kick_at) if self.warned => Some(secs(kick_at.saturating_sub(now))),
            _ => None,
        }
    }

    pub fn has_been_kicked(&self) -> bool {
        self.kicked
    }
}
