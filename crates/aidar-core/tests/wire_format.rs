use aidar_core::models::answer::{Answer, Responses};
use aidar_core::models::assignment::{Assignment, AssignmentStatus};
use aidar_core::models::question::{Field, FieldType, Question};
use aidar_core::models::survey::Survey;
use aidar_core::record::RecordKind;
use aidar_core::store_keys;
use serde_json::json;
use uuid::Uuid;

#[test]
fn question_serializes_flat_with_field_type_tag() {
    let question = Question {
        question_id: "3-survey-1729000000000".to_string(),
        question_text: "Favourite colour?".to_string(),
        field: Field::Radio {
            required: true,
            options: vec!["Red".to_string(), "Blue".to_string()],
        },
    };

    let value = serde_json::to_value(&question).unwrap();
    assert_eq!(
        value,
        json!({
            "questionId": "3-survey-1729000000000",
            "questionText": "Favourite colour?",
            "fieldType": "radio",
            "required": true,
            "options": ["Red", "Blue"],
        })
    );
}

#[test]
fn legacy_text_block_with_required_flag_still_parses() {
    let question: Question = serde_json::from_value(json!({
        "questionId": "1-survey-1",
        "questionText": "<p>Welcome</p>",
        "fieldType": "text",
        "required": false,
    }))
    .unwrap();

    assert_eq!(question.field_type(), FieldType::Text);
    assert!(!question.required());
    assert!(question.options().is_none());
}

#[test]
fn missing_options_default_to_empty() {
    let question: Question = serde_json::from_value(json!({
        "questionId": "4-survey-1",
        "questionText": "Symptoms",
        "fieldType": "checkbox",
    }))
    .unwrap();

    assert_eq!(question.options(), Some(&[][..]));
    assert!(!question.required());
}

#[test]
fn survey_owner_is_stored_as_physician_id() {
    let owner = Uuid::new_v4();
    let survey = Survey {
        id: None,
        owner_id: owner,
        title: "Intake".to_string(),
        questions: vec![],
        created_at: None,
        modified_at: None,
    };

    let value = serde_json::to_value(&survey).unwrap();
    assert_eq!(value["physicianId"], json!(owner.to_string()));
    assert!(value.get("id").is_none());
    assert!(value.get("createdAt").is_none());
}

#[test]
fn answers_deserialize_by_shape() {
    let responses: Responses = serde_json::from_value(json!({
        "a": "Jane",
        "b": ["Cough", "Fever"],
        "c": 4,
    }))
    .unwrap();

    assert_eq!(responses["a"], Answer::Text("Jane".to_string()));
    assert_eq!(
        responses["b"],
        Answer::Choices(vec!["Cough".to_string(), "Fever".to_string()])
    );
    assert_eq!(responses["c"], Answer::Rating(4));
    assert!(Answer::Rating(0).is_blank());

    let negative: Answer = serde_json::from_value(json!(-1)).unwrap();
    assert_eq!(negative, Answer::Rating(-1));
    assert!(!negative.is_blank());
    assert!(Answer::Text("  ".to_string()).is_blank());
}

#[test]
fn assignment_defaults_to_pending_without_responses() {
    let assignment: Assignment = serde_json::from_value(json!({
        "physicianId": Uuid::new_v4(),
        "surveyId": Uuid::new_v4(),
        "patientId": Uuid::new_v4(),
        "assignedAt": "2024-10-20T12:00:00Z",
    }))
    .unwrap();

    assert_eq!(assignment.status, AssignmentStatus::Pending);
    assert!(assignment.responses.is_empty());
    assert!(assignment.completed_at.is_none());
    assert!(!assignment.is_completed());
}

#[test]
fn record_keys_parse_back_to_kind_and_id() {
    let id = Uuid::new_v4();
    let key = store_keys::record(RecordKind::Assignment, id);
    assert_eq!(key, format!("assignments/{id}.json"));

    let (kind, parsed) = store_keys::parse(&key).unwrap();
    assert_eq!(kind, RecordKind::Assignment);
    assert_eq!(parsed, id);

    assert!(store_keys::parse("assignments/readme.txt").is_err());
    assert!(store_keys::parse("widgets/whatever.json").is_err());
}
