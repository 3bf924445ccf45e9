use aidar_builder::engine::{
    add_question, create_draft, edit_question, remove_question, rename, reorder_question,
};
use aidar_builder::error::BuilderError;
use aidar_builder::{validate, EditOutcome, QuestionPatch, SurveyProblem};
use aidar_core::models::question::{Field, FieldType, Question};
use aidar_core::models::survey::{Survey, UNTITLED_SURVEY};
use uuid::Uuid;

fn at(ms: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_millisecond(ms).unwrap()
}

fn question(id: &str, text: &str, field: Field) -> Question {
    Question {
        question_id: id.to_string(),
        question_text: text.to_string(),
        field,
    }
}

fn survey_with(questions: Vec<Question>) -> Survey {
    let mut survey = create_draft(Uuid::new_v4());
    survey.questions = questions;
    survey
}

fn radio(options: &[&str]) -> Field {
    Field::Radio {
        required: false,
        options: options.iter().map(|o| o.to_string()).collect(),
    }
}

#[test]
fn draft_starts_untitled_and_empty() {
    let owner = Uuid::new_v4();
    let draft = create_draft(owner);
    assert_eq!(draft.title, UNTITLED_SURVEY);
    assert_eq!(draft.owner_id, owner);
    assert!(draft.id.is_none());
    assert!(draft.questions.is_empty());
    assert!(draft.created_at.is_none());
}

#[test]
fn new_choice_questions_start_with_two_blank_options() {
    let draft = create_draft(Uuid::new_v4());
    let survey = add_question(&draft, FieldType::Checkbox, 0, at(1_000)).unwrap();
    let q = &survey.questions[0];

    assert_eq!(q.question_id, "4-survey-1000");
    assert_eq!(q.question_text, "Question");
    assert_eq!(q.options(), Some(&[String::new(), String::new()][..]));
    assert!(!q.required());
    assert!(draft.questions.is_empty(), "input survey is untouched");
}

#[test]
fn question_ids_do_not_collide_within_the_same_millisecond() {
    let mut survey = create_draft(Uuid::new_v4());
    for _ in 0..3 {
        survey = add_question(&survey, FieldType::Input, 0, at(5)).unwrap();
    }
    let mut ids: Vec<_> = survey.questions.iter().map(|q| q.question_id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn insertion_position_must_be_within_bounds() {
    let survey = add_question(&create_draft(Uuid::new_v4()), FieldType::Text, 0, at(1)).unwrap();

    let appended = add_question(&survey, FieldType::Rating, 1, at(2)).unwrap();
    assert_eq!(appended.questions[1].field_type(), FieldType::Rating);
    assert_eq!(appended.questions[1].question_text, "How would you rate us?");

    let err = add_question(&survey, FieldType::Rating, 2, at(2)).unwrap_err();
    assert!(matches!(err, BuilderError::InvalidPosition { index: 2, max: 1 }));
}

#[test]
fn removing_an_unknown_question_is_not_found() {
    let survey = survey_with(vec![question("a", "A?", Field::Input { required: false })]);
    let err = remove_question(&survey, "missing").unwrap_err();
    assert!(matches!(err, BuilderError::QuestionNotFound(ref id) if id == "missing"));

    let emptied = remove_question(&survey, "a").unwrap();
    assert!(emptied.questions.is_empty());
}

#[test]
fn reorder_moves_one_question() {
    let survey = survey_with(vec![
        question("a", "A", Field::Text),
        question("b", "B", Field::Text),
        question("c", "C", Field::Text),
    ]);

    let moved = reorder_question(&survey, 0, 2).unwrap();
    let order: Vec<_> = moved.questions.iter().map(|q| q.question_id.as_str()).collect();
    assert_eq!(order, ["b", "c", "a"]);

    assert!(reorder_question(&survey, 3, 0).is_err());
    assert!(reorder_question(&survey, 0, 3).is_err());
}

#[test]
fn edit_merges_partial_fields() {
    let survey = survey_with(vec![question("r", "Pick", radio(&["", ""]))]);
    let patch = QuestionPatch {
        required: Some(true),
        options: Some(vec!["Yes".into(), "No".into()]),
        ..QuestionPatch::default()
    };

    let EditOutcome::Changed(edited) = edit_question(&survey, "r", &patch).unwrap() else {
        panic!("expected a change");
    };
    let q = &edited.questions[0];
    assert_eq!(q.question_text, "Pick");
    assert!(q.required());
    assert_eq!(q.options().unwrap(), ["Yes", "No"]);
}

#[test]
fn identical_patch_after_add_is_a_no_op() {
    let survey = add_question(&create_draft(Uuid::new_v4()), FieldType::Radio, 0, at(9)).unwrap();
    let q = &survey.questions[0];
    let patch = QuestionPatch {
        question_text: Some(q.question_text.clone()),
        required: Some(q.required()),
        options: q.options().map(<[String]>::to_vec),
    };

    assert_eq!(
        edit_question(&survey, &q.question_id, &patch).unwrap(),
        EditOutcome::Unchanged
    );
}

#[test]
fn edit_rejects_fields_the_type_does_not_have() {
    let survey = survey_with(vec![
        question("t", "Intro", Field::Text),
        question("i", "Name?", Field::Input { required: false }),
    ]);

    let required = QuestionPatch {
        required: Some(true),
        ..QuestionPatch::default()
    };
    assert!(matches!(
        edit_question(&survey, "t", &required),
        Err(BuilderError::RequiredNotSupported { field_type: FieldType::Text })
    ));

    let options = QuestionPatch {
        options: Some(vec!["a".into()]),
        ..QuestionPatch::default()
    };
    assert!(matches!(
        edit_question(&survey, "i", &options),
        Err(BuilderError::OptionsNotSupported { field_type: FieldType::Input })
    ));
}

#[test]
fn rename_rejects_blank_titles() {
    let draft = create_draft(Uuid::new_v4());
    assert_eq!(rename(&draft, "Intake").unwrap().title, "Intake");
    assert!(matches!(rename(&draft, "   "), Err(BuilderError::EmptyTitle)));
}

#[test]
fn empty_survey_fails_validation() {
    let draft = create_draft(Uuid::new_v4());
    assert_eq!(validate(&draft), Err(SurveyProblem::Empty));
    assert_eq!(SurveyProblem::Empty.to_string(), "Survey cannot be empty!");
}

#[test]
fn well_formed_survey_passes_validation() {
    let survey = survey_with(vec![
        question("t", "Welcome", Field::Text),
        question("i", "Name?", Field::Input { required: true }),
        question("r", "Sex", radio(&["F", "M"])),
        question(
            "c",
            "Symptoms",
            Field::Checkbox {
                required: true,
                options: vec!["cough".into(), "Cough".into()],
            },
        ),
        question("s", "Rate us", Field::Rating { required: false }),
    ]);
    assert_eq!(validate(&survey), Ok(()));
}

#[test]
fn each_rule_reports_its_message() {
    let blank_text = survey_with(vec![question("i", "  ", Field::Input { required: false })]);
    assert_eq!(validate(&blank_text), Err(SurveyProblem::BlankQuestionText));

    let empty_option = survey_with(vec![question("r", "Pick", radio(&["a", ""]))]);
    assert_eq!(validate(&empty_option), Err(SurveyProblem::EmptyOption));

    let no_options = survey_with(vec![question("r", "Pick", radio(&[]))]);
    assert_eq!(validate(&no_options), Err(SurveyProblem::EmptyOption));

    let duplicate = survey_with(vec![question("r", "Pick", radio(&["a", "a"]))]);
    assert_eq!(validate(&duplicate), Err(SurveyProblem::DuplicateOption));
    assert_eq!(
        SurveyProblem::DuplicateOption.to_string(),
        "Multiple choice questions must not have duplicate options!"
    );
}

#[test]
fn last_violation_across_questions_wins() {
    let dup_then_blank = survey_with(vec![
        question("r", "Pick", radio(&["a", "a"])),
        question("i", "", Field::Input { required: false }),
    ]);
    assert_eq!(validate(&dup_then_blank), Err(SurveyProblem::BlankQuestionText));

    let blank_then_dup = survey_with(vec![
        question("i", "", Field::Input { required: false }),
        question("r", "Pick", radio(&["a", "a"])),
    ]);
    assert_eq!(validate(&blank_then_dup), Err(SurveyProblem::DuplicateOption));

    let empty_then_dup = survey_with(vec![
        question("r1", "Pick", radio(&["", "b"])),
        question("r2", "Pick", radio(&["a", "a"])),
    ]);
    assert_eq!(validate(&empty_then_dup), Err(SurveyProblem::DuplicateOption));
}

#[test]
fn option_problems_outrank_blank_text_within_one_question() {
    let survey = survey_with(vec![question("r", "", radio(&["", "b"]))]);
    assert_eq!(validate(&survey), Err(SurveyProblem::EmptyOption));
}

#[tokio::test]
async fn bulk_save_writes_nothing_when_one_survey_is_invalid() {
    use aidar_builder::engine::save_all;
    use aidar_storage::{Filter, MemoryStore, Store};

    let store = MemoryStore::in_memory();
    let good = survey_with(vec![question("2-survey-1", "Name?", Field::Input { required: true })]);
    let empty = survey_with(vec![]);

    let err = save_all(&store, vec![good.clone(), empty], at(1_000))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BuilderError::ValidationFailed(ref message) if message == "Survey cannot be empty!"
    ));
    assert!(store.list::<Survey>(Filter::new()).await.unwrap().is_empty());

    let saved = save_all(&store, vec![good.clone(), good], at(2_000)).await.unwrap();
    assert_eq!(saved.len(), 2);
    for survey in &saved {
        assert!(survey.id.is_some());
        assert_eq!(survey.created_at, Some(at(2_000)));
        assert_eq!(survey.modified_at, Some(at(2_000)));
    }
}
