//! The single source of truth for questionnaire data.
//!
//! All operations are total over malformed input: they either no-op and
//! report absence (`None`/`false`/empty) or silently repair the persisted
//! shape and proceed. Storage faults are caught at every boundary and
//! degrade to safe defaults; nothing in here panics or returns an error to
//! the caller.
//!
//! Mutations are read-modify-write against one blob per entity class, with
//! no locking or conflict detection: the store is designed for a single
//! active writer, and concurrent writers lose updates last-write-wins.

use std::collections::HashMap;

use chrono::Utc;
use log::{debug, warn};

use crate::error::Result;
use crate::model::{
    ident, normalize, GroupSpec, Question, QuestionGroup, QuestionSpec, QuestionUpdate,
    RespondentInfo, Response, Topic, TopicSpec, ANONYMOUS_RESPONDENT,
};
use crate::storage::KeyValueStore;

/// Keys of the two persisted blobs.
#[derive(Debug, Clone)]
pub struct StoreKeys {
    pub groups: String,
    pub topics: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            groups: "pollboard.groups".to_string(),
            topics: "pollboard.topics".to_string(),
        }
    }
}

/// The questionnaire store, backed by an injected key-value primitive.
pub struct QuestionStore<S> {
    storage: S,
    keys: StoreKeys,
}

impl<S: KeyValueStore> QuestionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, StoreKeys::default())
    }

    pub fn with_keys(storage: S, keys: StoreKeys) -> Self {
        Self { storage, keys }
    }

    /// All question groups, normalized.
    ///
    /// On first access with nothing persisted (or an unparseable blob), the
    /// sample group is seeded so the portal is never empty.
    pub fn list_groups(&self) -> Vec<QuestionGroup> {
        match self.load_groups() {
            Ok(groups) => groups,
            Err(err) => {
                warn!("Storage unavailable listing question groups: {err}");
                Vec::new()
            }
        }
    }

    /// The group with the given ID, normalized, or `None`.
    pub fn get_group(&self, group_id: &str) -> Option<QuestionGroup> {
        match self.load_groups() {
            Ok(groups) => groups.into_iter().find(|group| group.id == group_id),
            Err(err) => {
                warn!("Storage unavailable reading question group {group_id}: {err}");
                None
            }
        }
    }

    /// Upsert a group by ID, filling in every missing field and stamping
    /// `updated_at`. Returns the normalized form that was persisted (or, if
    /// storage is unavailable, would have been).
    pub fn save_group(&self, spec: GroupSpec) -> QuestionGroup {
        let group = spec.into_group();
        match self.load_groups() {
            Ok(mut groups) => {
                match groups.iter().position(|existing| existing.id == group.id) {
                    Some(index) => groups[index] = group.clone(),
                    None => groups.push(group.clone()),
                }
                self.persist_groups(&groups);
            }
            Err(err) => {
                warn!("Storage unavailable saving question group {}: {err}", group.id);
            }
        }
        group
    }

    /// Record one respondent's submission to a group.
    ///
    /// This is the one operation that crosses the network boundary from the
    /// answerer's side, hence the async signature; the store itself stays
    /// synchronous. Returns `None` if no group matches.
    pub async fn submit_response(
        &self,
        group_id: &str,
        answers: HashMap<String, String>,
        respondent_info: Option<RespondentInfo>,
    ) -> Option<Response> {
        let mut info = respondent_info.unwrap_or_default();
        if info.name.is_none() {
            info.name = Some(ANONYMOUS_RESPONDENT.to_string());
        }
        let response = Response {
            id: ident::new_id(),
            answers,
            submitted_at: Utc::now(),
            respondent_info: Some(info),
        };

        let recorded = response.clone();
        self.mutate_group(group_id, move |group| {
            group.responses.push(recorded);
            Some(())
        })
        .map(|()| response)
    }

    /// Append a question to a group, filling in spec defaults.
    /// Returns `None` if no group matches.
    pub fn add_question(&self, group_id: &str, spec: QuestionSpec) -> Option<Question> {
        self.mutate_group(group_id, |group| {
            let question = Question::from(spec);
            group.questions.push(question.clone());
            Some(question)
        })
    }

    /// Apply a partial update to a question. `id` and `created_at` are
    /// immutable. Returns `None` if the group or question is absent.
    pub fn update_question(
        &self,
        group_id: &str,
        question_id: &str,
        update: QuestionUpdate,
    ) -> Option<Question> {
        self.mutate_group(group_id, |group| {
            let question = group
                .questions
                .iter_mut()
                .find(|question| question.id == question_id)?;
            question.apply(update);
            Some(question.clone())
        })
    }

    /// Remove a question by ID. Returns whether a removal occurred.
    pub fn delete_question(&self, group_id: &str, question_id: &str) -> bool {
        self.mutate_group(group_id, |group| {
            let before = group.questions.len();
            group.questions.retain(|question| question.id != question_id);
            (group.questions.len() < before).then_some(())
        })
        .is_some()
    }

    /// All topics, normalized. Independent of group persistence.
    pub fn list_topics(&self) -> Vec<Topic> {
        match self.load_topics() {
            Ok(topics) => topics,
            Err(err) => {
                warn!("Storage unavailable listing topics: {err}");
                Vec::new()
            }
        }
    }

    /// Upsert a topic by ID, filling in spec defaults and stamping
    /// `created_at`.
    pub fn save_topic(&self, spec: TopicSpec) -> Topic {
        let topic = Topic::from(spec);
        match self.load_topics() {
            Ok(mut topics) => {
                match topics.iter().position(|existing| existing.id == topic.id) {
                    Some(index) => topics[index] = topic.clone(),
                    None => topics.push(topic.clone()),
                }
                self.persist_topics(&topics);
            }
            Err(err) => {
                warn!("Storage unavailable saving topic {}: {err}", topic.id);
            }
        }
        topic
    }

    /// Remove a topic by ID. Questions referencing it keep their dangling
    /// `topic_id`; references resolve lazily at render time.
    pub fn delete_topic(&self, topic_id: &str) -> bool {
        let mut topics = match self.load_topics() {
            Ok(topics) => topics,
            Err(err) => {
                warn!("Storage unavailable deleting topic {topic_id}: {err}");
                return false;
            }
        };
        let before = topics.len();
        topics.retain(|topic| topic.id != topic_id);
        if topics.len() == before {
            return false;
        }
        self.persist_topics(&topics);
        true
    }

    /// Load and mutate one group, re-stamping `updated_at` and persisting
    /// iff the mutation applied.
    fn mutate_group<T>(
        &self,
        group_id: &str,
        op: impl FnOnce(&mut QuestionGroup) -> Option<T>,
    ) -> Option<T> {
        let mut groups = match self.load_groups() {
            Ok(groups) => groups,
            Err(err) => {
                warn!("Storage unavailable updating question group {group_id}: {err}");
                return None;
            }
        };
        let group = groups.iter_mut().find(|group| group.id == group_id)?;
        let outcome = op(group)?;
        group.updated_at = Utc::now();
        self.persist_groups(&groups);
        Some(outcome)
    }

    fn load_groups(&self) -> Result<Vec<QuestionGroup>> {
        let blob = match self.storage.get(&self.keys.groups)? {
            Some(blob) => blob,
            None => return Ok(self.seed_groups()),
        };
        match normalize::parse_groups(&blob) {
            Some(groups) => Ok(groups),
            None => {
                warn!("Question group blob failed to parse; reseeding sample data");
                Ok(self.seed_groups())
            }
        }
    }

    fn seed_groups(&self) -> Vec<QuestionGroup> {
        debug!("No question groups persisted; seeding the sample group");
        let groups = vec![QuestionGroup::sample()];
        self.persist_groups(&groups);
        groups
    }

    fn load_topics(&self) -> Result<Vec<Topic>> {
        let blob = match self.storage.get(&self.keys.topics)? {
            Some(blob) => blob,
            None => return Ok(Vec::new()),
        };
        match normalize::parse_topics(&blob) {
            Some(topics) => Ok(topics),
            None => {
                warn!("Topic blob failed to parse; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Serialize and write back a blob; a write failure only costs
    /// durability of this mutation, never correctness of the return value.
    fn persist_groups(&self, groups: &[QuestionGroup]) {
        self.persist(&self.keys.groups, groups);
    }

    fn persist_topics(&self, topics: &[Topic]) {
        self.persist(&self.keys.topics, topics);
    }

    fn persist<T: serde::Serialize>(&self, key: &str, records: &[T]) {
        if let Err(err) = self.try_persist(key, records) {
            warn!("Failed to persist {key}: {err}");
        }
    }

    fn try_persist<T: serde::Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let blob = serde_json::to_string(records)?;
        self.storage.set(key, &blob)
    }
}
