use std::time::{Duration, Instant};

/// Play-time accounting for one episode, driven by instants the caller
/// supplies. Paused spans are cut out; once frozen the reading never moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayClock {
    origin: Instant,
    paused_at: Option<Instant>,
    frozen: Option<Duration>,
}

impl PlayClock {
    pub fn start(now: Instant) -> Self {
        Self {
            origin: now,
            paused_at: None,
            frozen: None,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        if let Some(frozen) = self.frozen {
            return frozen;
        }
        let until = self.paused_at.unwrap_or(now);
        until.saturating_duration_since(self.origin)
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn pause(&mut self, now: Instant) {
        if !self.is_paused() && !self.is_frozen() {
            self.paused_at = Some(now);
        }
    }

    /// Shifts the origin forward by the paused span.
    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.origin += now.saturating_duration_since(paused_at);
        }
    }

    pub fn freeze(&mut self, at: Duration) {
        self.frozen = Some(at);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }
}
