//! Contract for the remote data service holding profiles, assessments, and colleges.
//!
//! The backend is a black box exposing collection-style reads and writes. Each trait mirrors
//! one collection so the flow controller and recommender can be exercised against narrow
//! doubles; [`Gateway`] is the union the HTTP service needs.

pub mod memory;

use async_trait::async_trait;

use crate::assessments::{AssessmentRecord, NewAssessment};
use crate::colleges::College;
use crate::profile::UserProfile;
use crate::session::UserId;

pub use memory::InMemoryGateway;

#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// At most one profile per user.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, GatewayError>;

    /// Insert or replace the profile keyed by `profile.user_id`.
    async fn upsert_profile(&self, profile: UserProfile) -> Result<UserProfile, GatewayError>;
}

#[async_trait]
pub trait AssessmentGateway: Send + Sync {
    async fn assessments_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<AssessmentRecord>, GatewayError>;

    /// Plain insert; no uniqueness on (user, ordinal).
    async fn insert_assessment(
        &self,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, GatewayError>;
}

#[async_trait]
pub trait CollegeGateway: Send + Sync {
    /// Every college, highest rating first.
    async fn colleges_by_rating(&self) -> Result<Vec<College>, GatewayError>;
}

pub trait Gateway: ProfileGateway + AssessmentGateway + CollegeGateway {}

impl<T> Gateway for T where T: ProfileGateway + AssessmentGateway + CollegeGateway {}

/// Failure reported by the remote service. The message is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Rejected(String),
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}
