use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ident;

/// Placeholder name for topics saved without one.
pub const UNNAMED_TOPIC: &str = "Untitled Topic";

/// A user-defined label for grouping related questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Topic unique ID.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A partial topic, as supplied to `save_topic`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicSpec {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<TopicSpec> for Topic {
    fn from(spec: TopicSpec) -> Self {
        Self {
            id: spec.id.unwrap_or_else(ident::new_id),
            name: spec.name.unwrap_or_else(|| UNNAMED_TOPIC.to_string()),
            description: spec.description.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}
