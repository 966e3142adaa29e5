use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-text note attached to the books as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub text: String,
}
