//! Repair of malformed persisted records.
//!
//! Persisted blobs come from an environment key-value primitive the store
//! does not control, so every read runs each record through an explicit
//! normalizer that defaults each field individually. A record missing only
//! `topics` still comes back correct for every other field, and no caller
//! ever observes a missing collection or settings flag.

use chrono::{DateTime, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::group::{GroupSettings, QuestionGroup};
use super::ident;
use super::question::Question;
use super::response::{RespondentInfo, Response};
use super::topic::{Topic, UNNAMED_TOPIC};

/// Parse a persisted blob of question groups.
///
/// Returns `None` only when the top-level payload fails to parse as a JSON
/// array; individual malformed records are repaired (or skipped when they
/// are not even objects), never propagated as errors.
pub fn parse_groups(blob: &str) -> Option<Vec<QuestionGroup>> {
    let records: Vec<Value> = serde_json::from_str(blob).ok()?;
    Some(normalize_records(&records, normalize_group, "question group"))
}

/// Parse a persisted blob of topics. Same contract as [`parse_groups`].
pub fn parse_topics(blob: &str) -> Option<Vec<Topic>> {
    let records: Vec<Value> = serde_json::from_str(blob).ok()?;
    Some(normalize_records(&records, normalize_topic, "topic"))
}

fn normalize_records<T>(
    records: &[Value],
    normalize: impl Fn(&Map<String, Value>) -> T,
    kind: &str,
) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| match record.as_object() {
            Some(obj) => Some(normalize(obj)),
            None => {
                warn!("Discarding persisted {kind} record that is not an object");
                None
            }
        })
        .collect()
}

/// Normalize one persisted question group record.
pub fn normalize_group(obj: &Map<String, Value>) -> QuestionGroup {
    let now = Utc::now();
    QuestionGroup {
        id: string_field(obj, "id").unwrap_or_else(ident::new_id),
        title: string_field(obj, "title").unwrap_or_default(),
        description: string_field(obj, "description").unwrap_or_default(),
        admin_url: string_field(obj, "adminUrl").unwrap_or_else(ident::new_access_token),
        answerer_url: string_field(obj, "answererUrl").unwrap_or_else(ident::new_access_token),
        projection_url: string_field(obj, "projectionUrl").unwrap_or_else(ident::new_access_token),
        created_at: datetime_field(obj, "createdAt").unwrap_or(now),
        updated_at: datetime_field(obj, "updatedAt").unwrap_or(now),
        questions: entry_seq(obj, "questions", normalize_question),
        responses: entry_seq(obj, "responses", normalize_response),
        topics: entry_seq(obj, "topics", normalize_topic),
        settings: normalize_settings(obj.get("settings")),
    }
}

/// Normalize one persisted question record.
pub fn normalize_question(obj: &Map<String, Value>) -> Question {
    Question {
        id: string_field(obj, "id").unwrap_or_else(ident::new_id),
        question_type: typed_field(obj, "type").unwrap_or_default(),
        prompt: string_field(obj, "prompt").unwrap_or_default(),
        options: string_seq(obj, "options"),
        topic_id: string_field(obj, "topicId"),
        status: typed_field(obj, "status").unwrap_or_default(),
        moderation_status: typed_field(obj, "moderationStatus").unwrap_or_default(),
        created_at: datetime_field(obj, "createdAt").unwrap_or_else(Utc::now),
    }
}

/// Normalize one persisted response record.
pub fn normalize_response(obj: &Map<String, Value>) -> Response {
    let answers = obj
        .get("answers")
        .and_then(Value::as_object)
        .map(|answers| {
            answers
                .iter()
                .filter_map(|(question_id, answer)| {
                    answer
                        .as_str()
                        .map(|text| (question_id.clone(), text.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();
    let respondent_info = obj
        .get("respondentInfo")
        .and_then(Value::as_object)
        .map(|info| RespondentInfo {
            name: string_field(info, "name"),
            email: string_field(info, "email"),
        });

    Response {
        id: string_field(obj, "id").unwrap_or_else(ident::new_id),
        answers,
        submitted_at: datetime_field(obj, "submittedAt").unwrap_or_else(Utc::now),
        respondent_info,
    }
}

/// Normalize one persisted topic record.
pub fn normalize_topic(obj: &Map<String, Value>) -> Topic {
    Topic {
        id: string_field(obj, "id").unwrap_or_else(ident::new_id),
        name: string_field(obj, "name").unwrap_or_else(|| UNNAMED_TOPIC.to_string()),
        description: string_field(obj, "description").unwrap_or_default(),
        created_at: datetime_field(obj, "createdAt").unwrap_or_else(Utc::now),
    }
}

/// Normalize a settings record, defaulting each flag individually.
pub fn normalize_settings(value: Option<&Value>) -> GroupSettings {
    let defaults = GroupSettings::default();
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return defaults,
    };
    GroupSettings {
        allow_anonymous: bool_field(obj, "allowAnonymous").unwrap_or(defaults.allow_anonymous),
        moderation_enabled: bool_field(obj, "moderationEnabled")
            .unwrap_or(defaults.moderation_enabled),
        allow_question_submission: bool_field(obj, "allowQuestionSubmission")
            .unwrap_or(defaults.allow_question_submission),
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

fn datetime_field(obj: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    obj.get(key)
        .and_then(Value::as_str)
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|stamp| stamp.with_timezone(&Utc))
}

/// Parse a field through its serde representation, e.g. enum wire names.
fn typed_field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    obj.get(key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
}

fn entry_seq<T>(
    obj: &Map<String, Value>,
    key: &str,
    normalize: impl Fn(&Map<String, Value>) -> T,
) -> Vec<T> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.as_object().map(&normalize))
                .collect()
        })
        .unwrap_or_default()
}

fn string_seq(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
