use aidar_core::models::answer::Answer;
use aidar_core::models::question::FieldType;
use serde::Serialize;
use ts_rs::TS;

/// The value shape a field type accepts as an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerShape {
    /// Static content; nothing to answer.
    None,
    /// A single string.
    Text,
    /// An ordered set of option strings.
    Choices,
    /// An integer from 1 to 5.
    Rating,
}

impl AnswerShape {
    pub fn accepts(self, answer: &Answer) -> bool {
        matches!(
            (self, answer),
            (AnswerShape::Text, Answer::Text(_))
                | (AnswerShape::Choices, Answer::Choices(_))
                | (AnswerShape::Rating, Answer::Rating(_))
        )
    }
}

/// Where a `required` flag is enforced when a survey is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Enforcement {
    /// The field has no `required` flag.
    None,
    /// Left to the form renderer's native required-field handling.
    Presentation,
    /// Checked by [`crate::validate_responses`].
    Validator,
}

/// Static description of one field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub field_type: FieldType,
    /// Palette label shown in the builder.
    pub label: &'static str,
    pub has_options: bool,
    pub answer_shape: AnswerShape,
    pub participates_in_required: bool,
    pub enforcement: Enforcement,
}

impl FieldDescriptor {
    pub fn has_answer(&self) -> bool {
        self.answer_shape != AnswerShape::None
    }
}

pub fn describe(field_type: FieldType) -> FieldDescriptor {
    match field_type {
        FieldType::Text => FieldDescriptor {
            field_type,
            label: "Text Box",
            has_options: false,
            answer_shape: AnswerShape::None,
            participates_in_required: false,
            enforcement: Enforcement::None,
        },
        FieldType::Input => FieldDescriptor {
            field_type,
            label: "Input Field",
            has_options: false,
            answer_shape: AnswerShape::Text,
            participates_in_required: true,
            enforcement: Enforcement::Presentation,
        },
        FieldType::Radio => FieldDescriptor {
            field_type,
            label: "Radio Buttons",
            has_options: true,
            answer_shape: AnswerShape::Text,
            participates_in_required: true,
            enforcement: Enforcement::Presentation,
        },
        FieldType::Checkbox => FieldDescriptor {
            field_type,
            label: "Checkboxes",
            has_options: true,
            answer_shape: AnswerShape::Choices,
            participates_in_required: true,
            enforcement: Enforcement::Validator,
        },
        FieldType::Rating => FieldDescriptor {
            field_type,
            label: "Rating Scales",
            has_options: false,
            answer_shape: AnswerShape::Rating,
            participates_in_required: true,
            enforcement: Enforcement::Validator,
        },
    }
}

/// The builder palette, in display order. Fixed; not reorderable.
pub fn palette() -> Vec<FieldDescriptor> {
    FieldType::ALL.into_iter().map(describe).collect()
}
