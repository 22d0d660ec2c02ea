use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ident;
use super::question::{Question, QuestionSpec, QuestionType};
use super::response::{RespondentInfo, Response, ANONYMOUS_RESPONDENT};
use super::topic::Topic;

/// Per-group behaviour flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSettings {
    pub allow_anonymous: bool,
    pub moderation_enabled: bool,
    pub allow_question_submission: bool,
}

impl Default for GroupSettings {
    /// The permissive defaults substituted for missing settings.
    fn default() -> Self {
        Self {
            allow_anonymous: true,
            moderation_enabled: false,
            allow_question_submission: false,
        }
    }
}

/// A questionnaire: questions plus their collected responses and topics.
///
/// Every group handed out by the store has all collection and settings
/// fields present, even when the persisted record was partial. Callers never
/// need to null-check them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionGroup {
    /// Group unique ID.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Opaque access token for the admin view.
    pub admin_url: String,
    /// Opaque access token for the answerer view.
    pub answerer_url: String,
    /// Opaque access token for the projection view.
    pub projection_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Questions in presentation order.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Responses in submission order.
    #[serde(default)]
    pub responses: Vec<Response>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub settings: GroupSettings,
}

impl QuestionGroup {
    /// Look up a question by ID.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Resolve a topic reference lazily. Dangling IDs resolve to `None`;
    /// deleting a topic never cascades into the questions referencing it.
    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    /// All questions labelled with the given topic, in presentation order.
    pub fn questions_for_topic(&self, topic_id: &str) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.topic_id.as_deref() == Some(topic_id))
            .collect()
    }

    /// The fixed sample group seeded on first access, so the portal is
    /// never empty.
    pub fn sample() -> Self {
        let now = Utc::now();
        let topic = Topic {
            id: "topic-general".to_string(),
            name: "General".to_string(),
            description: "General community feedback".to_string(),
            created_at: now,
        };
        let satisfaction = Question {
            topic_id: Some(topic.id.clone()),
            ..Question::from(QuestionSpec {
                id: Some("q-satisfaction".to_string()),
                question_type: Some(QuestionType::MultipleChoice),
                prompt: "How satisfied are you with our community events?".to_string(),
                options: vec![
                    "Very satisfied".to_string(),
                    "Satisfied".to_string(),
                    "Neutral".to_string(),
                    "Dissatisfied".to_string(),
                ],
                ..QuestionSpec::default()
            })
        };
        let improvements = Question::from(QuestionSpec {
            id: Some("q-improvements".to_string()),
            prompt: "What would you like to see improved?".to_string(),
            ..QuestionSpec::default()
        });

        let sample_answers = [
            ("Very satisfied", "More evening activities would be great."),
            ("Satisfied", "Better communication about upcoming events."),
            ("Neutral", ""),
        ];
        let responses = sample_answers
            .iter()
            .map(|(choice, comment)| {
                let mut answers = HashMap::new();
                answers.insert(satisfaction.id.clone(), choice.to_string());
                if !comment.is_empty() {
                    answers.insert(improvements.id.clone(), comment.to_string());
                }
                Response {
                    id: ident::new_id(),
                    answers,
                    submitted_at: now,
                    respondent_info: Some(RespondentInfo {
                        name: Some(ANONYMOUS_RESPONDENT.to_string()),
                        email: None,
                    }),
                }
            })
            .collect();

        Self {
            id: "sample-group".to_string(),
            title: "Community Feedback".to_string(),
            description: "Tell us how we are doing.".to_string(),
            admin_url: ident::new_access_token(),
            answerer_url: ident::new_access_token(),
            projection_url: ident::new_access_token(),
            created_at: now,
            updated_at: now,
            questions: vec![satisfaction, improvements],
            responses,
            topics: vec![topic],
            settings: GroupSettings::default(),
        }
    }
}

/// A partial group, as supplied to `save_group` for creation or update.
///
/// Missing identity fields (ID, access tokens, creation time) are generated
/// at save; `From<QuestionGroup>` carries them over so the
/// load-modify-save flow preserves them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupSpec {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub admin_url: Option<String>,
    pub answerer_url: Option<String>,
    pub projection_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub questions: Vec<Question>,
    pub responses: Vec<Response>,
    pub topics: Vec<Topic>,
    pub settings: Option<GroupSettings>,
}

impl GroupSpec {
    /// Fill in every missing field and stamp `updated_at`, producing the
    /// normalized form that gets persisted.
    pub(crate) fn into_group(self) -> QuestionGroup {
        let now = Utc::now();
        QuestionGroup {
            id: self.id.unwrap_or_else(ident::new_id),
            title: self.title,
            description: self.description,
            admin_url: self.admin_url.unwrap_or_else(ident::new_access_token),
            answerer_url: self.answerer_url.unwrap_or_else(ident::new_access_token),
            projection_url: self.projection_url.unwrap_or_else(ident::new_access_token),
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
            questions: self.questions,
            responses: self.responses,
            topics: self.topics,
            settings: self.settings.unwrap_or_default(),
        }
    }
}

impl From<QuestionGroup> for GroupSpec {
    fn from(group: QuestionGroup) -> Self {
        Self {
            id: Some(group.id),
            title: group.title,
            description: group.description,
            admin_url: Some(group.admin_url),
            answerer_url: Some(group.answerer_url),
            projection_url: Some(group.projection_url),
            created_at: Some(group.created_at),
            questions: group.questions,
            responses: group.responses,
            topics: group.topics,
            settings: Some(group.settings),
        }
    }
}
