use std::collections::HashSet;
use std::fmt;

use aidar_core::models::survey::Survey;

/// Reasons a survey may not be saved, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyProblem {
    Empty,
    BlankQuestionText,
    EmptyOption,
    DuplicateOption,
}

impl SurveyProblem {
    pub fn message(self) -> &'static str {
        match self {
            SurveyProblem::Empty => "Survey cannot be empty!",
            SurveyProblem::BlankQuestionText => "Text field cannot be empty!",
            SurveyProblem::EmptyOption => "Multiple choice questions must have a valid option!",
            SurveyProblem::DuplicateOption => {
                "Multiple choice questions must not have duplicate options!"
            }
        }
    }
}

impl fmt::Display for SurveyProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Check a survey before it is persisted.
///
/// An empty survey fails immediately. Otherwise every question is visited in
/// order and each rule it breaks overwrites the previous finding, so the
/// reported problem is the last one found: a later question's problem wins
/// over an earlier one, and within a question the option checks win over
/// the text check. A choice question needs at least one option, and
/// duplicates are only looked for when no option is empty.
pub fn validate(survey: &Survey) -> Result<(), SurveyProblem> {
    if survey.questions.is_empty() {
        return Err(SurveyProblem::Empty);
    }

    let mut found = None;
    for question in &survey.questions {
        if question.question_text.trim().is_empty() {
            found = Some(SurveyProblem::BlankQuestionText);
        }

        if let Some(options) = question.options() {
            if options.is_empty() || options.iter().any(String::is_empty) {
                found = Some(SurveyProblem::EmptyOption);
            } else {
                let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
                if distinct.len() != options.len() {
                    found = Some(SurveyProblem::DuplicateOption);
                }
            }
        }
    }

    match found {
        Some(problem) => Err(problem),
        None => Ok(()),
    }
}
