mod group;
mod question;
mod response;
mod topic;

pub(crate) mod ident;
pub(crate) mod normalize;

pub use group::{GroupSettings, GroupSpec, QuestionGroup};
pub use question::{
    ModerationStatus, Question, QuestionSpec, QuestionStatus, QuestionType, QuestionUpdate,
};
pub use response::{RespondentInfo, Response, ANONYMOUS_RESPONDENT};
pub use topic::{Topic, TopicSpec};
