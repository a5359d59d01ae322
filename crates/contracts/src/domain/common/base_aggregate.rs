use super::{EntityMetadata, EventStore};
use serde::{Deserialize, Serialize};

/// Fields shared by every catalogue aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    pub id: Id,
    /// Business code (e.g. "CAT-drinks", "TBL-07")
    pub code: String,
    /// Display name
    pub description: String,
    pub comment: Option<String>,
    pub metadata: EntityMetadata,
    #[serde(default)]
    pub events: EventStore,
}

impl<Id> BaseAggregate<Id> {
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
            events: EventStore::new(),
        }
    }

    /// Restores an aggregate loaded from the database
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            comment,
            metadata,
            events: EventStore::new(),
        }
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
