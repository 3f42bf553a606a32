use std::time::{Duration, Instant};

/// Elapsed-time accounting for the audio thread: time accumulated
/// across pauses plus the stretch since the last unpause.
#[derive(Debug, Default)]
pub(super) struct TransportClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl TransportClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting. Idempotent while already running.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Freeze the elapsed value at its current reading.
    pub fn stop(&mut self) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += started.elapsed();
        }
    }

    /// Reposition the clock, preserving whether it is running.
    pub fn set(&mut self, position: Duration) {
        self.accumulated = position;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}
