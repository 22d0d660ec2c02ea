//! Questionnaire data layer for the community portal.
//!
//! [`QuestionStore`] owns the persisted question groups and topics, repairing
//! malformed persisted data on every read and write so callers always see
//! well-formed entities. The [`analytics`] module derives display statistics
//! from a group and its responses without touching persistence.

pub mod analytics;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;

pub use analytics::OptionCount;
pub use model::{
    GroupSettings, GroupSpec, ModerationStatus, Question, QuestionGroup, QuestionSpec,
    QuestionStatus, QuestionType, QuestionUpdate, RespondentInfo, Response, Topic, TopicSpec,
    ANONYMOUS_RESPONDENT,
};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{QuestionStore, StoreKeys};
