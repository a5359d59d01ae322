use serde::{Deserialize, Serialize};

/// Domain events raised by an aggregate during one write.
///
/// Only names are kept; the backend logs them after a successful save.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventStore {
    pending: Vec<String>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: impl Into<String>) {
        self.pending.push(event.into());
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}
