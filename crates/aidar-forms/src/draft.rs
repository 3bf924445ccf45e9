use aidar_core::models::answer::{Answer, Responses};
use aidar_core::models::question::Question;

use crate::error::FormError;
use crate::validation::{validate_responses, RequiredPolicy, ResponseErrors};

/// In-progress answers for one survey fill.
///
/// Lives only on the filling side; nothing here is persisted until the
/// assignment is submitted. A view-only draft rejects every edit.
#[derive(Debug, Clone, Default)]
pub struct ResponseDraft {
    responses: Responses,
    errors: ResponseErrors,
    view_only: bool,
}

impl ResponseDraft {
    pub fn new(initial: Responses) -> Self {
        Self {
            responses: initial,
            ..Self::default()
        }
    }

    pub fn view_only(initial: Responses) -> Self {
        Self {
            responses: initial,
            view_only: true,
            ..Self::default()
        }
    }

    pub fn is_view_only(&self) -> bool {
        self.view_only
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    pub fn into_responses(self) -> Responses {
        self.responses
    }

    pub fn errors(&self) -> &ResponseErrors {
        &self.errors
    }

    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.responses.get(question_id)
    }

    pub fn set_answer(&mut self, question_id: &str, answer: Answer) -> Result<(), FormError> {
        if self.view_only {
            return Err(FormError::ViewOnly);
        }
        self.responses.insert(question_id.to_string(), answer);
        Ok(())
    }

    /// Check or uncheck one checkbox option. Selection order is kept and an
    /// option is never listed twice.
    pub fn toggle_option(
        &mut self,
        question_id: &str,
        option: &str,
        checked: bool,
    ) -> Result<(), FormError> {
        if self.view_only {
            return Err(FormError::ViewOnly);
        }
        let entry = self
            .responses
            .entry(question_id.to_string())
            .or_insert_with(|| Answer::Choices(Vec::new()));
        if !matches!(entry, Answer::Choices(_)) {
            *entry = Answer::Choices(Vec::new());
        }
        if let Answer::Choices(chosen) = entry {
            let present = chosen.iter().any(|c| c == option);
            if checked && !present {
                chosen.push(option.to_string());
            } else if !checked {
                chosen.retain(|c| c != option);
            }
        }
        Ok(())
    }

    /// Drop every unsaved answer and error.
    pub fn reset(&mut self) {
        self.responses.clear();
        self.errors = ResponseErrors::default();
    }

    /// Validate the current answers, keeping the errors for display.
    pub fn validate(
        &mut self,
        questions: &[Question],
        policy: RequiredPolicy,
    ) -> Result<(), FormError> {
        self.errors = validate_responses(questions, &self.responses, policy);
        if self.errors.is_valid() {
            Ok(())
        } else {
            Err(FormError::Validation(self.errors.clone()))
        }
    }
}
