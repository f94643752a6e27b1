use std::time::{Duration, Instant};

/// The one deferred transition in a match: end of the serve pause.
///
/// The epoch of the match is captured when the timer is scheduled and
/// returned when it fires; the state machine compares it with the live
/// epoch, so a timer that outlives a reset cannot revive the old rally.
#[derive(Debug, Default)]
pub struct ServeTimer {
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    epoch: u64,
    due: Instant,
}

impl ServeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any earlier pending entry
    pub fn schedule(&mut self, epoch: u64, due: Instant) {
        self.pending = Some(Pending { epoch, due });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Push the due time back, e.g. by the time the match spent paused
    pub fn postpone(&mut self, by: Duration) {
        if let Some(pending) = self.pending.as_mut() {
            pending.due += by;
        }
    }

    /// Pop the captured epoch once `now` has reached the due time
    pub fn take_due(&mut self, now: Instant) -> Option<u64> {
        match self.pending {
            Some(pending) if now >= pending.due => {
                self.pending = None;
                Some(pending.epoch)
            }
            _ => None,
        }
    }
}
