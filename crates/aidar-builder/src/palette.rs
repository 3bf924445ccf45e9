use aidar_core::models::question::{Field, FieldType, Question};
use aidar_core::models::survey::Survey;
use aidar_forms::describe;

/// Blank options a new choice question starts with.
pub const DEFAULT_OPTION_COUNT: usize = 2;

fn default_text(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Text => "Your text goes here",
        FieldType::Rating => "How would you rate us?",
        FieldType::Input | FieldType::Radio | FieldType::Checkbox => "Question",
    }
}

fn default_field(field_type: FieldType) -> Field {
    let options = if describe(field_type).has_options {
        vec![String::new(); DEFAULT_OPTION_COUNT]
    } else {
        Vec::new()
    };

    match field_type {
        FieldType::Text => Field::Text,
        FieldType::Input => Field::Input { required: false },
        FieldType::Radio => Field::Radio {
            required: false,
            options,
        },
        FieldType::Checkbox => Field::Checkbox {
            required: false,
            options,
        },
        FieldType::Rating => Field::Rating { required: false },
    }
}

/// Id of the form `<slot>-survey-<millis>`, bumped past any id already in
/// the survey so rapid inserts never collide.
pub fn next_question_id(survey: &Survey, field_type: FieldType, now: jiff::Timestamp) -> String {
    let slot = field_type.palette_slot();
    let mut millis = now.as_millisecond();
    loop {
        let id = format!("{slot}-survey-{millis}");
        if survey.question(&id).is_none() {
            return id;
        }
        millis += 1;
    }
}

/// A new question with the palette defaults for its type.
pub fn new_question(survey: &Survey, field_type: FieldType, now: jiff::Timestamp) -> Question {
    Question {
        question_id: next_question_id(survey, field_type, now),
        question_text: default_text(field_type).to_string(),
        field: default_field(field_type),
    }
}
