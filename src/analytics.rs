//! Display-ready statistics derived from a question group and its
//! responses.
//!
//! Everything here is pure: no persistence access, no mutation. Inputs are
//! tolerated in any state the store can hand out, including groups with
//! empty collections.

use serde::{Deserialize, Serialize};

use crate::model::QuestionGroup;

/// How many responses selected one option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCount {
    pub label: String,
    pub count: usize,
}

/// Response distribution for a multiple-choice question, in option order.
///
/// Every configured option appears, zero-initialized, so a never-chosen
/// option still shows up with count 0. Answers that match no known option
/// are ignored. Unknown question IDs and questions without options yield an
/// empty distribution.
pub fn distribution_for(group: &QuestionGroup, question_id: &str) -> Vec<OptionCount> {
    let question = match group.question(question_id) {
        Some(question) => question,
        None => return Vec::new(),
    };

    let mut distribution: Vec<OptionCount> = question
        .options
        .iter()
        .map(|option| OptionCount {
            label: option.clone(),
            count: 0,
        })
        .collect();
    for response in &group.responses {
        if let Some(answer) = response.answer(question_id) {
            if let Some(entry) = distribution.iter_mut().find(|entry| entry.label == answer) {
                entry.count += 1;
            }
        }
    }
    distribution
}

/// How many responses gave a non-empty answer to the given question.
///
/// The "N responses" summary for text questions, but valid for any type.
pub fn text_response_count(group: &QuestionGroup, question_id: &str) -> usize {
    group
        .responses
        .iter()
        .filter(|response| response.answer(question_id).is_some())
        .count()
}

/// Percentage (0 to 100, rounded) of all response-question answer slots
/// that were filled in. Zero when there are no questions or no responses.
pub fn completion_rate(group: &QuestionGroup) -> u32 {
    let questions = group.questions.len();
    let responses = group.responses.len();
    if questions == 0 || responses == 0 {
        return 0;
    }

    let answered: usize = group
        .responses
        .iter()
        .map(|response| response.answers.len())
        .sum();
    let slots = questions * responses;
    // Answer maps can hold keys for since-deleted questions; cap at 100.
    (((answered as f64 / slots as f64) * 100.0).round() as u32).min(100)
}

/// The first `limit` non-empty answers to the given question, in submission
/// order.
pub fn sample_text_responses(
    group: &QuestionGroup,
    question_id: &str,
    limit: usize,
) -> Vec<String> {
    group
        .responses
        .iter()
        .filter_map(|response| response.answer(question_id))
        .take(limit)
        .map(str::to_string)
        .collect()
}
