use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::UserId;

/// Position of an assessment within the fixed three-step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AssessmentOrdinal {
    FieldDiscovery,
    Specialization,
    FinalDecision,
}

impl AssessmentOrdinal {
    pub const ALL: [AssessmentOrdinal; 3] = [
        AssessmentOrdinal::FieldDiscovery,
        AssessmentOrdinal::Specialization,
        AssessmentOrdinal::FinalDecision,
    ];

    pub fn number(self) -> u8 {
        match self {
            AssessmentOrdinal::FieldDiscovery => 1,
            AssessmentOrdinal::Specialization => 2,
            AssessmentOrdinal::FinalDecision => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(AssessmentOrdinal::FieldDiscovery),
            2 => Some(AssessmentOrdinal::Specialization),
            3 => Some(AssessmentOrdinal::FinalDecision),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// Lowest ordinal that has not been completed yet.
    pub fn first_incomplete(completed: &BTreeSet<AssessmentOrdinal>) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ordinal| !completed.contains(ordinal))
    }

    pub fn title(self) -> &'static str {
        match self {
            AssessmentOrdinal::FieldDiscovery => "Field Discovery Assessment",
            AssessmentOrdinal::Specialization => "Specialization Assessment",
            AssessmentOrdinal::FinalDecision => "Final Decision Assessment",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AssessmentOrdinal::FieldDiscovery => {
                "Discover your ideal field of study (15 questions)"
            }
            AssessmentOrdinal::Specialization => "Find your perfect specialization (20 questions)",
            AssessmentOrdinal::FinalDecision => {
                "Make your final decision with confidence (15 questions)"
            }
        }
    }
}

impl fmt::Display for AssessmentOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl From<AssessmentOrdinal> for u8 {
    fn from(value: AssessmentOrdinal) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for AssessmentOrdinal {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or_else(|| format!("assessment ordinal must be 1-3, got {value}"))
    }
}

/// Selected option text keyed by zero-based question index.
pub type AnswerSheet = BTreeMap<usize, String>;

/// Identifier assigned by the gateway when an assessment is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Payload written once per completed assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssessment {
    pub user_id: UserId,
    pub ordinal: AssessmentOrdinal,
    pub answers: AnswerSheet,
}

/// Stored assessment attempt. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub user_id: UserId,
    pub ordinal: AssessmentOrdinal,
    pub answers: AnswerSheet,
    pub created_at: DateTime<Utc>,
}

/// Distinct ordinals present in a user's records. Duplicate records for one ordinal collapse.
pub fn completed_ordinals(records: &[AssessmentRecord]) -> BTreeSet<AssessmentOrdinal> {
    records.iter().map(|record| record.ordinal).collect()
}
