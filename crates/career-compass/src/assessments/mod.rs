//! The three-step assessment sequence: static question catalog, stored records, and the
//! controller that walks a user through it.

pub mod catalog;
pub mod domain;
pub mod flow;

#[cfg(test)]
mod tests;

pub use catalog::{AssessmentSummary, Question};
pub use domain::{
    completed_ordinals, AnswerSheet, AssessmentId, AssessmentOrdinal, AssessmentRecord,
    NewAssessment,
};
pub use flow::{AssessmentFlow, AssessmentStatusView, FlowError, FlowStage, FlowView, SubmitOutcome};
