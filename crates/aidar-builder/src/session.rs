use std::collections::HashMap;
use std::sync::Arc;

use aidar_core::models::question::FieldType;
use aidar_core::models::survey::Survey;
use aidar_storage::Store;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;
use uuid::Uuid;

use crate::engine::{self, EditOutcome, QuestionPatch};
use crate::error::BuilderError;
use crate::events::{SurveyEvent, SurveyEvents};

/// Issued when an edit starts (a keystroke, an option change) and redeemed
/// when its value is ready. Tickets are ordered, so an edit that resolves
/// late never overwrites a field a newer edit already set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTicket {
    question_id: String,
    seq: u64,
}

impl EditTicket {
    pub fn question_id(&self) -> &str {
        &self.question_id
    }
}

/// Sequence of the last applied edit of each question field.
#[derive(Debug, Clone, Copy, Default)]
struct AppliedSeq {
    question_text: u64,
    required: u64,
    options: u64,
}

impl AppliedSeq {
    /// The part of `patch` that `seq` is still allowed to write.
    fn fresh(&self, seq: u64, patch: &QuestionPatch) -> QuestionPatch {
        QuestionPatch {
            question_text: patch
                .question_text
                .clone()
                .filter(|_| seq > self.question_text),
            required: patch.required.filter(|_| seq > self.required),
            options: patch.options.clone().filter(|_| seq > self.options),
        }
    }

    fn record(&mut self, seq: u64, applied: &QuestionPatch) {
        if applied.question_text.is_some() {
            self.question_text = seq;
        }
        if applied.required.is_some() {
            self.required = seq;
        }
        if applied.options.is_some() {
            self.options = seq;
        }
    }
}

/// One physician's builder view of one survey.
pub struct BuilderSession<S> {
    store: Arc<S>,
    events: SurveyEvents,
    inbox: Receiver<SurveyEvent>,
    owner_id: Uuid,
    survey: Survey,
    issued: u64,
    applied: HashMap<String, AppliedSeq>,
}

impl<S: Store> BuilderSession<S> {
    /// Start on a fresh draft.
    pub fn new(store: Arc<S>, events: SurveyEvents, owner_id: Uuid) -> Self {
        let inbox = events.subscribe();
        Self {
            store,
            events,
            inbox,
            owner_id,
            survey: engine::create_draft(owner_id),
            issued: 0,
            applied: HashMap::new(),
        }
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    /// Patients can only be assigned once the survey has been saved.
    pub fn can_assign(&self) -> bool {
        self.survey.id.is_some()
    }

    /// Discard the current survey and start a new draft.
    pub fn reset(&mut self) {
        self.survey = engine::create_draft(self.owner_id);
        self.applied.clear();
    }

    /// Replace the current survey with a stored one.
    pub async fn load(&mut self, survey_id: Uuid) -> Result<(), BuilderError> {
        let survey: Survey = self.store.get(survey_id).await?;
        self.survey = survey;
        self.applied.clear();
        tracing::debug!(%survey_id, "survey loaded into builder");
        Ok(())
    }

    pub fn rename(&mut self, title: &str) -> Result<(), BuilderError> {
        self.survey = engine::rename(&self.survey, title)?;
        Ok(())
    }

    /// Insert a new question and return its id.
    pub fn add_question(
        &mut self,
        field_type: FieldType,
        at: usize,
    ) -> Result<String, BuilderError> {
        let next = engine::add_question(&self.survey, field_type, at, jiff::Timestamp::now())?;
        let question_id = next.questions[at].question_id.clone();
        self.survey = next;
        Ok(question_id)
    }

    pub fn remove_question(&mut self, question_id: &str) -> Result<(), BuilderError> {
        self.survey = engine::remove_question(&self.survey, question_id)?;
        self.applied.remove(question_id);
        Ok(())
    }

    pub fn reorder_question(&mut self, from: usize, to: usize) -> Result<(), BuilderError> {
        self.survey = engine::reorder_question(&self.survey, from, to)?;
        Ok(())
    }

    pub fn begin_edit(&mut self, question_id: &str) -> EditTicket {
        self.issued += 1;
        EditTicket {
            question_id: question_id.to_string(),
            seq: self.issued,
        }
    }

    /// Apply the fields of an edit that no newer edit of the same question
    /// has set yet. Returns whether the survey changed.
    pub fn apply_edit(
        &mut self,
        ticket: EditTicket,
        patch: &QuestionPatch,
    ) -> Result<bool, BuilderError> {
        let last = self
            .applied
            .get(&ticket.question_id)
            .copied()
            .unwrap_or_default();
        let fresh = last.fresh(ticket.seq, patch);
        if fresh.is_empty() {
            if !patch.is_empty() {
                tracing::debug!(
                    question_id = %ticket.question_id,
                    seq = ticket.seq,
                    "stale edit dropped"
                );
            }
            return Ok(false);
        }

        let outcome = engine::edit_question(&self.survey, &ticket.question_id, &fresh)?;
        self.applied
            .entry(ticket.question_id)
            .or_default()
            .record(ticket.seq, &fresh);
        match outcome {
            EditOutcome::Changed(next) => {
                self.survey = next;
                Ok(true)
            }
            EditOutcome::Unchanged => Ok(false),
        }
    }

    /// Edit immediately.
    pub fn edit_question(
        &mut self,
        question_id: &str,
        patch: &QuestionPatch,
    ) -> Result<bool, BuilderError> {
        let ticket = self.begin_edit(question_id);
        self.apply_edit(ticket, patch)
    }

    /// Validate and persist. The session keeps its previous state when either
    /// step fails.
    pub async fn save(&mut self) -> Result<Uuid, BuilderError> {
        let saved =
            engine::save(self.store.as_ref(), &self.survey, jiff::Timestamp::now()).await?;
        let id = saved.id.ok_or(BuilderError::MissingId)?;
        self.survey = saved;
        self.events.publish(SurveyEvent::Saved(id));
        Ok(id)
    }

    /// Drain pending notifications. Returns true when the open survey was
    /// deleted elsewhere and the session reset to a new draft.
    pub fn sync_events(&mut self) -> bool {
        let mut reset = false;
        loop {
            match self.inbox.try_recv() {
                Ok(SurveyEvent::Deleted(id)) if self.survey.id == Some(id) => {
                    tracing::info!(survey_id = %id, "open survey was deleted, starting a new draft");
                    self.reset();
                    reset = true;
                }
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "builder missed survey events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        reset
    }
}
