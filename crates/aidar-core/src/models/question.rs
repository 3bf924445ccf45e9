use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The closed set of question field types offered by the builder palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FieldType {
    /// Static rich-text block; has no answer.
    Text,
    /// Short free-text answer.
    Input,
    /// Single choice among options.
    Radio,
    /// Any number of choices among options.
    Checkbox,
    /// One to five stars.
    Rating,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::Text,
        FieldType::Input,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Rating,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Input => "input",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Rating => "rating",
        }
    }

    /// Palette position of the field type, used as the `questionId` prefix.
    pub fn palette_slot(self) -> u8 {
        match self {
            FieldType::Text => 1,
            FieldType::Input => 2,
            FieldType::Radio => 3,
            FieldType::Checkbox => 4,
            FieldType::Rating => 5,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-type payload of a question. Serialized inline with the question and
/// tagged by `fieldType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "fieldType", rename_all = "lowercase")]
#[ts(export)]
pub enum Field {
    Text,
    Input {
        #[serde(default)]
        required: bool,
    },
    Radio {
        #[serde(default)]
        required: bool,
        #[serde(default)]
        options: Vec<String>,
    },
    Checkbox {
        #[serde(default)]
        required: bool,
        #[serde(default)]
        options: Vec<String>,
    },
    Rating {
        #[serde(default)]
        required: bool,
    },
}

impl Field {
    pub fn field_type(&self) -> FieldType {
        match self {
            Field::Text => FieldType::Text,
            Field::Input { .. } => FieldType::Input,
            Field::Radio { .. } => FieldType::Radio,
            Field::Checkbox { .. } => FieldType::Checkbox,
            Field::Rating { .. } => FieldType::Rating,
        }
    }
}

/// One field definition within a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub question_id: String,
    pub question_text: String,
    #[serde(flatten)]
    pub field: Field,
}

impl Question {
    pub fn field_type(&self) -> FieldType {
        self.field.field_type()
    }

    /// Whether an answer is required. Always false for static text blocks.
    pub fn required(&self) -> bool {
        match &self.field {
            Field::Text => false,
            Field::Input { required }
            | Field::Radio { required, .. }
            | Field::Checkbox { required, .. }
            | Field::Rating { required } => *required,
        }
    }

    /// Choice options, present only for radio and checkbox questions.
    pub fn options(&self) -> Option<&[String]> {
        match &self.field {
            Field::Radio { options, .. } | Field::Checkbox { options, .. } => Some(options),
            _ => None,
        }
    }
}
