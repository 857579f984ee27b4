use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::documents::GeneratedDocuments;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created, or cleared by new input; nothing to download.
    Empty,
    /// The last generation succeeded.
    Ready,
}

/// Per-caller record holding the output of the most recent successful generation.
///
/// Lifecycle: created empty → populated once a generation succeeds → cleared
/// when new input is submitted → dropped on delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub status: SessionStatus,
    pub documents: Option<GeneratedDocuments>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            status: SessionStatus::Empty,
            documents: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn populate(&mut self, documents: GeneratedDocuments) {
        self.documents = Some(documents);
        self.status = SessionStatus::Ready;
        self.updated_at = Utc::now();
    }

    pub fn clear(&mut self) {
        self.documents = None;
        self.status = SessionStatus::Empty;
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
