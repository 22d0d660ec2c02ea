use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ident;

/// The kind of answer a question collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    /// Free text.
    #[serde(rename = "text")]
    Text,
    /// One of a fixed list of options.
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
}

impl Default for QuestionType {
    fn default() -> Self {
        Self::Text
    }
}

/// Whether a question is currently presented to answerers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Active,
    Inactive,
}

impl Default for QuestionStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Moderation state of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Approved,
    Pending,
    Rejected,
}

impl Default for ModerationStatus {
    fn default() -> Self {
        Self::Approved
    }
}

/// A single question within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Question unique ID (within its group).
    pub id: String,
    /// Answer kind.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Question text shown to answerers.
    pub prompt: String,
    /// Possible answers, in presentation order. Unused for text questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Weak reference to a topic in the same group; may dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    pub status: QuestionStatus,
    pub moderation_status: ModerationStatus,
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Whether this question is eligible for presentation to an answerer.
    pub fn is_presentable(&self) -> bool {
        self.status == QuestionStatus::Active && self.moderation_status == ModerationStatus::Approved
    }

    /// Apply a partial update, leaving `id` and `created_at` untouched.
    pub fn apply(&mut self, update: QuestionUpdate) {
        if let Some(question_type) = update.question_type {
            self.question_type = question_type;
        }
        if let Some(prompt) = update.prompt {
            self.prompt = prompt;
        }
        if let Some(options) = update.options {
            self.options = options;
        }
        if let Some(topic_id) = update.topic_id {
            self.topic_id = Some(topic_id);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(moderation_status) = update.moderation_status {
            self.moderation_status = moderation_status;
        }
    }
}

/// A partial question, as supplied when adding to a group.
///
/// Missing fields are filled with the defaults of [`From<QuestionSpec>`]:
/// generated ID, text type, active, approved, created now.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionSpec {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,
    pub prompt: String,
    pub options: Vec<String>,
    pub topic_id: Option<String>,
    pub status: Option<QuestionStatus>,
    pub moderation_status: Option<ModerationStatus>,
}

impl From<QuestionSpec> for Question {
    fn from(spec: QuestionSpec) -> Self {
        Self {
            id: spec.id.unwrap_or_else(ident::new_id),
            question_type: spec.question_type.unwrap_or_default(),
            prompt: spec.prompt,
            options: spec.options,
            topic_id: spec.topic_id,
            status: spec.status.unwrap_or_default(),
            moderation_status: spec.moderation_status.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}

/// A partial update to an existing question.
///
/// `id` and `created_at` are immutable once set, so this type simply has no
/// such fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionUpdate {
    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,
    pub prompt: Option<String>,
    pub options: Option<Vec<String>>,
    pub topic_id: Option<String>,
    pub status: Option<QuestionStatus>,
    pub moderation_status: Option<ModerationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_defaults() {
        let question: Question = QuestionSpec {
            prompt: "What should we discuss next?".to_string(),
            ..QuestionSpec::default()
        }
        .into();

        assert!(!question.id.is_empty());
        assert_eq!(question.question_type, QuestionType::Text);
        assert!(question.options.is_empty());
        assert_eq!(question.status, QuestionStatus::Active);
        assert_eq!(question.moderation_status, ModerationStatus::Approved);
        assert!(question.is_presentable());
    }

    #[test]
    fn presentation_requires_active_and_approved() {
        let mut question: Question = QuestionSpec::default().into();
        question.status = QuestionStatus::Inactive;
        assert!(!question.is_presentable());

        question.status = QuestionStatus::Active;
        question.moderation_status = ModerationStatus::Pending;
        assert!(!question.is_presentable());
    }

    #[test]
    fn apply_leaves_identity_untouched() {
        let mut question: Question = QuestionSpec {
            prompt: "Original".to_string(),
            ..QuestionSpec::default()
        }
        .into();
        let id = question.id.clone();
        let created_at = question.created_at;

        question.apply(QuestionUpdate {
            prompt: Some("Updated".to_string()),
            status: Some(QuestionStatus::Inactive),
            ..QuestionUpdate::default()
        });

        assert_eq!(question.prompt, "Updated");
        assert_eq!(question.status, QuestionStatus::Inactive);
        assert_eq!(question.id, id);
        assert_eq!(question.created_at, created_at);
    }

    #[test]
    fn wire_names_match_portal_format() {
        let question: Question = QuestionSpec {
            question_type: Some(QuestionType::MultipleChoice),
            topic_id: Some("t1".to_string()),
            ..QuestionSpec::default()
        }
        .into();
        let value = serde_json::to_value(&question).unwrap();

        assert_eq!(value["type"], "multiple-choice");
        assert_eq!(value["moderationStatus"], "approved");
        assert_eq!(value["topicId"], "t1");
    }
}
