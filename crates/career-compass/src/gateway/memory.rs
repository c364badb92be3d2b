use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{AssessmentGateway, CollegeGateway, GatewayError, ProfileGateway};
use crate::assessments::{AssessmentId, AssessmentRecord, NewAssessment};
use crate::colleges::College;
use crate::profile::UserProfile;
use crate::session::UserId;

/// Process-local gateway used by the CLI demo, the default server, and tests.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    assessments: Mutex<Vec<AssessmentRecord>>,
    colleges: Mutex<Vec<College>>,
    sequence: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryGateway {
    pub fn with_colleges(colleges: Vec<College>) -> Self {
        Self {
            colleges: Mutex::new(colleges),
            ..Self::default()
        }
    }

    pub fn assessment_count(&self) -> usize {
        lock(&self.assessments).len()
    }

    fn next_assessment_id(&self) -> AssessmentId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        AssessmentId(format!("asmt-{id:06}"))
    }
}

#[async_trait]
impl ProfileGateway for InMemoryGateway {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, GatewayError> {
        Ok(lock(&self.profiles).get(user_id).cloned())
    }

    async fn upsert_profile(&self, profile: UserProfile) -> Result<UserProfile, GatewayError> {
        lock(&self.profiles).insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }
}

#[async_trait]
impl AssessmentGateway for InMemoryGateway {
    async fn assessments_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AssessmentRecord>, GatewayError> {
        Ok(lock(&self.assessments)
            .iter()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, GatewayError> {
        let record = AssessmentRecord {
            id: self.next_assessment_id(),
            user_id: assessment.user_id,
            ordinal: assessment.ordinal,
            answers: assessment.answers,
            created_at: Utc::now(),
        };
        lock(&self.assessments).push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl CollegeGateway for InMemoryGateway {
    async fn colleges_by_rating(&self) -> Result<Vec<College>, GatewayError> {
        let mut colleges = lock(&self.colleges).clone();
        colleges.sort_by(|a, b| match (a.rating, b.rating) {
            (Some(left), Some(right)) => right.total_cmp(&left),
            (Some(_), None) => CmpOrdering::Less,
            (None, Some(_)) => CmpOrdering::Greater,
            (None, None) => CmpOrdering::Equal,
        });
        Ok(colleges)
    }
}
