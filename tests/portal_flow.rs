//! End-to-end flow: build a questionnaire through the store, collect
//! responses, and derive the projection-view statistics.

use std::collections::HashMap;

use pollboard::{
    analytics, GroupSpec, MemoryStore, QuestionSpec, QuestionStore, QuestionType, QuestionUpdate,
    RespondentInfo, TopicSpec,
};

fn init_logging() {
    // These tests exercise the repair/degradation paths, so enable logging.
    log4rs_test_utils::test_logging::init_logging_once_for(["pollboard"], None, None);
}

fn answers(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(question, answer)| (question.to_string(), answer.to_string()))
        .collect()
}

#[tokio::test]
async fn questionnaire_lifecycle() {
    init_logging();
    let store = QuestionStore::new(MemoryStore::new());

    // Create a fresh group alongside the seeded sample.
    let group = store.save_group(GroupSpec {
        title: "Annual General Meeting".to_string(),
        description: "Help us plan this year's AGM.".to_string(),
        ..GroupSpec::default()
    });
    assert_eq!(store.list_groups().len(), 2);

    let topic = store.save_topic(TopicSpec {
        name: Some("Logistics".to_string()),
        ..TopicSpec::default()
    });

    let venue = store
        .add_question(
            &group.id,
            QuestionSpec {
                question_type: Some(QuestionType::MultipleChoice),
                prompt: "Which venue do you prefer?".to_string(),
                options: vec!["Town hall".to_string(), "Community centre".to_string()],
                topic_id: Some(topic.id.clone()),
                ..QuestionSpec::default()
            },
        )
        .unwrap();
    let feedback = store
        .add_question(
            &group.id,
            QuestionSpec {
                prompt: "Anything else we should know?".to_string(),
                ..QuestionSpec::default()
            },
        )
        .unwrap();

    // Three submissions, one of them partial.
    for entries in [
        vec![
            (venue.id.as_str(), "Town hall"),
            (feedback.id.as_str(), "Please arrange parking."),
        ],
        vec![
            (venue.id.as_str(), "Town hall"),
            (feedback.id.as_str(), "Start earlier this year."),
        ],
        vec![(venue.id.as_str(), "Community centre")],
    ] {
        let submitted = store
            .submit_response(
                &group.id,
                answers(&entries),
                Some(RespondentInfo {
                    name: None,
                    email: Some("member@example.org".to_string()),
                }),
            )
            .await;
        assert!(submitted.is_some());
    }

    let group = store.get_group(&group.id).unwrap();
    assert_eq!(group.responses.len(), 3);

    let distribution = analytics::distribution_for(&group, &venue.id);
    assert_eq!(distribution[0].label, "Town hall");
    assert_eq!(distribution[0].count, 2);
    assert_eq!(distribution[1].count, 1);

    assert_eq!(analytics::text_response_count(&group, &feedback.id), 2);
    assert_eq!(
        analytics::sample_text_responses(&group, &feedback.id, 1),
        vec!["Please arrange parking.".to_string()]
    );
    // 5 answered slots across 3 responses x 2 questions.
    assert_eq!(analytics::completion_rate(&group), 83);

    // Retire the free-text question and confirm the projection view copes.
    store
        .update_question(
            &group.id,
            &feedback.id,
            QuestionUpdate {
                prompt: Some("Closed".to_string()),
                ..QuestionUpdate::default()
            },
        )
        .unwrap();
    assert!(store.delete_question(&group.id, &feedback.id));

    let group = store.get_group(&group.id).unwrap();
    assert_eq!(group.questions.len(), 1);
    assert!(analytics::distribution_for(&group, &feedback.id).is_empty());
    assert_eq!(analytics::completion_rate(&group), 100);
}

#[tokio::test]
async fn sample_group_supports_the_projection_view_out_of_the_box() {
    init_logging();
    let store = QuestionStore::new(MemoryStore::new());

    let group = store.get_group("sample-group").unwrap();
    let distribution = analytics::distribution_for(&group, "q-satisfaction");
    assert_eq!(distribution.len(), 4);
    let total: usize = distribution.iter().map(|entry| entry.count).sum();
    assert_eq!(total, 3);

    assert!(analytics::text_response_count(&group, "q-improvements") > 0);
    assert!(analytics::completion_rate(&group) > 0);
}
