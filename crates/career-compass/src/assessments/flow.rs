use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::catalog::{self, Question};
use super::domain::{
    completed_ordinals, AnswerSheet, AssessmentOrdinal, AssessmentRecord, NewAssessment,
};
use crate::gateway::{AssessmentGateway, GatewayError};
use crate::session::{IdentityProvider, SessionContext, UserId};

/// Where the user currently is in the three-assessment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "ordinal", rename_all = "snake_case")]
pub enum FlowStage {
    InProgress(AssessmentOrdinal),
    Complete,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Stored; the flow moved on to `next`.
    Advanced {
        record: AssessmentRecord,
        next: AssessmentOrdinal,
    },
    /// Stored the final assessment. Emitted once per flow.
    Completed { record: AssessmentRecord },
}

impl SubmitOutcome {
    pub fn record(&self) -> &AssessmentRecord {
        match self {
            SubmitOutcome::Advanced { record, .. } | SubmitOutcome::Completed { record } => record,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("no user is signed in")]
    NotAttached,
    #[error("all assessments are already complete")]
    AlreadyComplete,
    #[error("'{option}' is not an option for question {question_number}")]
    UnknownOption {
        question_number: usize,
        option: String,
    },
    #[error(
        "assessment {ordinal} needs {required} answers before it can be submitted ({answered} answered)"
    )]
    Incomplete {
        ordinal: AssessmentOrdinal,
        answered: usize,
        required: usize,
    },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Drives one user through the fixed assessment sequence.
///
/// Questions are answered in a linear order per ordinal; nothing is skippable or shuffled.
/// Local state only changes after the gateway accepts a write, so a failed submit can be
/// retried by calling [`AssessmentFlow::submit`] again.
pub struct AssessmentFlow<G: ?Sized> {
    gateway: Arc<G>,
    session: SessionContext,
    stage: FlowStage,
    current_question: usize,
    answers: AnswerSheet,
    completed: BTreeSet<AssessmentOrdinal>,
}

impl<G> AssessmentFlow<G>
where
    G: AssessmentGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>, session: SessionContext) -> Self {
        Self {
            gateway,
            session,
            stage: FlowStage::InProgress(AssessmentOrdinal::FieldDiscovery),
            current_question: 0,
            answers: AnswerSheet::new(),
            completed: BTreeSet::new(),
        }
    }

    /// Load completed assessments for the attached user and position the flow on the lowest
    /// incomplete ordinal. A failed read is treated as "nothing completed yet".
    pub async fn initialize(&mut self) -> Result<FlowStage, FlowError> {
        let identity = self.session.current_user().ok_or(FlowError::NotAttached)?;

        let completed = match self.fetch_completed(&identity.user_id).await {
            Ok(completed) => completed,
            Err(err) => {
                warn!(user_id = %identity.user_id, error = %err, "could not load completed assessments");
                BTreeSet::new()
            }
        };

        self.answers.clear();
        self.current_question = 0;
        self.stage = match AssessmentOrdinal::first_incomplete(&completed) {
            Some(ordinal) => FlowStage::InProgress(ordinal),
            None => FlowStage::Complete,
        };
        self.completed = completed;

        info!(user_id = %identity.user_id, stage = ?self.stage, completed = self.completed.len(), "assessment flow initialized");
        Ok(self.stage)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    pub fn current_ordinal(&self) -> Option<AssessmentOrdinal> {
        match self.stage {
            FlowStage::InProgress(ordinal) => Some(ordinal),
            FlowStage::Complete => None,
        }
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn completed(&self) -> &BTreeSet<AssessmentOrdinal> {
        &self.completed
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        self.current_ordinal()
            .and_then(|ordinal| catalog::questions(ordinal).get(self.current_question))
    }

    fn question_count(&self) -> usize {
        self.current_ordinal().map(catalog::question_count).unwrap_or(0)
    }

    pub fn select_answer(&mut self, option: &str) -> Result<(), FlowError> {
        let question = self.current_question().ok_or(FlowError::AlreadyComplete)?;
        if !question.has_option(option) {
            return Err(FlowError::UnknownOption {
                question_number: self.current_question + 1,
                option: option.to_string(),
            });
        }

        self.answers
            .insert(self.current_question, option.to_string());
        Ok(())
    }

    /// Move to the next question. Returns `false` when already on the last one.
    pub fn advance(&mut self) -> bool {
        if self.current_question + 1 >= self.question_count() {
            return false;
        }
        self.current_question += 1;
        true
    }

    /// Move to the previous question. Returns `false` when already on the first one.
    pub fn retreat(&mut self) -> bool {
        if self.current_question == 0 {
            return false;
        }
        self.current_question -= 1;
        true
    }

    pub fn can_submit(&self) -> bool {
        match self.current_ordinal() {
            Some(ordinal) => self.answers.len() >= catalog::question_count(ordinal),
            None => false,
        }
    }

    /// Fraction of the current assessment reached, counting the question on screen.
    pub fn progress(&self) -> f32 {
        let total = self.question_count();
        if total == 0 {
            return 1.0;
        }
        (self.current_question + 1) as f32 / total as f32
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, FlowError> {
        let ordinal = self.current_ordinal().ok_or(FlowError::AlreadyComplete)?;
        let required = catalog::question_count(ordinal);
        if self.answers.len() < required {
            return Err(FlowError::Incomplete {
                ordinal,
                answered: self.answers.len(),
                required,
            });
        }

        let identity = self.session.current_user().ok_or(FlowError::NotAttached)?;
        let record = self
            .gateway
            .insert_assessment(NewAssessment {
                user_id: identity.user_id.clone(),
                ordinal,
                answers: self.answers.clone(),
            })
            .await
            .map_err(|err| {
                warn!(user_id = %identity.user_id, %ordinal, error = %err, "assessment submission rejected");
                FlowError::Gateway(err)
            })?;

        info!(user_id = %identity.user_id, %ordinal, record_id = %record.id.0, "assessment submitted");
        self.answers.clear();
        self.current_question = 0;
        self.completed.insert(ordinal);

        match ordinal.next() {
            Some(next) => {
                self.stage = FlowStage::InProgress(next);
                self.refresh_completed(&identity.user_id, ordinal).await;
                Ok(SubmitOutcome::Advanced { record, next })
            }
            None => {
                self.stage = FlowStage::Complete;
                info!(user_id = %identity.user_id, "assessment flow completed");
                Ok(SubmitOutcome::Completed { record })
            }
        }
    }

    async fn fetch_completed(
        &self,
        user_id: &UserId,
    ) -> Result<BTreeSet<AssessmentOrdinal>, GatewayError> {
        let records = self.gateway.assessments_for(user_id).await?;
        Ok(completed_ordinals(&records))
    }

    // A failed refresh keeps what is known locally, including the ordinal just stored.
    async fn refresh_completed(&mut self, user_id: &UserId, submitted: AssessmentOrdinal) {
        match self.fetch_completed(user_id).await {
            Ok(mut fetched) => {
                fetched.insert(submitted);
                self.completed = fetched;
            }
            Err(err) => {
                warn!(%user_id, error = %err, "could not refresh completed assessments");
            }
        }
    }

    pub fn view(&self) -> FlowView {
        let question = self.current_question();
        let question_count = self.question_count();
        let selected = self.answers.get(&self.current_question).cloned();

        FlowView {
            stage: self.stage,
            title: self.current_ordinal().map(AssessmentOrdinal::title),
            question_number: question.map(|_| self.current_question + 1),
            question_count,
            prompt: question.map(|question| question.prompt),
            options: question.map(|question| question.options.to_vec()).unwrap_or_default(),
            current_answered: selected.is_some(),
            selected,
            answered: self.answers.len(),
            progress: self.progress(),
            can_retreat: question.is_some() && self.current_question > 0,
            can_advance: question.is_some() && self.current_question + 1 < question_count,
            can_submit: self.can_submit(),
            assessments: AssessmentOrdinal::ALL
                .into_iter()
                .map(|ordinal| AssessmentStatusView {
                    ordinal,
                    title: ordinal.title(),
                    description: ordinal.description(),
                    question_count: catalog::question_count(ordinal),
                    completed: self.completed.contains(&ordinal),
                    current: self.current_ordinal() == Some(ordinal),
                })
                .collect(),
        }
    }
}

/// Snapshot of the flow for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct FlowView {
    pub stage: FlowStage,
    pub title: Option<&'static str>,
    pub question_number: Option<usize>,
    pub question_count: usize,
    pub prompt: Option<&'static str>,
    pub options: Vec<&'static str>,
    pub selected: Option<String>,
    pub current_answered: bool,
    pub answered: usize,
    pub progress: f32,
    pub can_retreat: bool,
    pub can_advance: bool,
    pub can_submit: bool,
    pub assessments: Vec<AssessmentStatusView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub ordinal: AssessmentOrdinal,
    pub title: &'static str,
    pub description: &'static str,
    pub question_count: usize,
    pub completed: bool,
    pub current: bool,
}
