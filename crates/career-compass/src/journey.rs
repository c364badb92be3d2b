//! Home-screen summary: what the student should do next and what they have done so far.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::assessments::{completed_ordinals, AssessmentOrdinal, AssessmentRecord};
use crate::profile::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "ordinal", rename_all = "snake_case")]
pub enum NextStep {
    CompleteProfile,
    TakeAssessment(AssessmentOrdinal),
    ExploreColleges,
}

impl NextStep {
    pub fn determine(has_profile: bool, completed: &BTreeSet<AssessmentOrdinal>) -> Self {
        if !has_profile {
            return NextStep::CompleteProfile;
        }
        match AssessmentOrdinal::first_incomplete(completed) {
            Some(ordinal) => NextStep::TakeAssessment(ordinal),
            None => NextStep::ExploreColleges,
        }
    }

    pub fn label(self) -> String {
        match self {
            NextStep::CompleteProfile => "Complete your profile".to_string(),
            NextStep::TakeAssessment(ordinal) => format!("Take the {}", ordinal.title()),
            NextStep::ExploreColleges => "Explore recommended colleges".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentHistoryEntry {
    pub ordinal: AssessmentOrdinal,
    pub title: &'static str,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyOverview {
    pub email: Option<String>,
    pub has_profile: bool,
    pub next_step: NextStep,
    pub next_step_label: String,
    pub completed: Vec<AssessmentOrdinal>,
    pub history: Vec<AssessmentHistoryEntry>,
}

impl JourneyOverview {
    pub fn build(
        email: Option<String>,
        profile: Option<&UserProfile>,
        records: &[AssessmentRecord],
    ) -> Self {
        let completed = completed_ordinals(records);
        let next_step = NextStep::determine(profile.is_some(), &completed);

        let mut history: Vec<AssessmentHistoryEntry> = records
            .iter()
            .map(|record| AssessmentHistoryEntry {
                ordinal: record.ordinal,
                title: record.ordinal.title(),
                completed_at: record.created_at,
            })
            .collect();
        history.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

        Self {
            email,
            has_profile: profile.is_some(),
            next_step,
            next_step_label: next_step.label(),
            completed: completed.into_iter().collect(),
            history,
        }
    }
}
