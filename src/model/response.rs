use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name recorded for respondents who do not give one.
pub const ANONYMOUS_RESPONDENT: &str = "Anonymous";

/// Optional details about who submitted a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One respondent's full submission to a question group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Response unique ID.
    pub id: String,
    /// Answer text keyed by question ID. Multiple-choice answers hold the
    /// selected option's literal text.
    #[serde(default)]
    pub answers: HashMap<String, String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_info: Option<RespondentInfo>,
}

impl Response {
    /// The non-empty answer for the given question, if any.
    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers
            .get(question_id)
            .map(String::as_str)
            .filter(|answer| !answer.is_empty())
    }
}
