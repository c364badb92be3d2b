use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::domain::{College, CollegeId, CollegeType};
use super::ranking;
use crate::gateway::{CollegeGateway, ProfileGateway};
use crate::session::{IdentityProvider, SessionContext};

const FEATURED_COURSES: usize = 3;

/// Everything the ranking step needs, fetched once and re-ranked per search.
#[derive(Debug, Clone, Default)]
pub struct RecommendationInputs {
    pub colleges: Vec<College>,
    pub preferred_city: Option<String>,
}

impl RecommendationInputs {
    pub fn cards(&self, search: Option<&str>) -> Vec<CollegeCard> {
        let preferred_city = self.preferred_city.as_deref();
        ranking::recommend(&self.colleges, search, preferred_city)
            .into_iter()
            .map(|college| CollegeCard::from_college(college, preferred_city))
            .collect()
    }

    pub fn find(&self, id: &CollegeId) -> Option<&College> {
        self.colleges.iter().find(|college| &college.id == id)
    }
}

/// Display projection of a ranked college.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollegeCard {
    pub id: CollegeId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub college_type: CollegeType,
    pub type_label: &'static str,
    pub rating: Option<f64>,
    pub rating_label: Option<String>,
    pub fees_range: Option<String>,
    pub featured_courses: Vec<String>,
    pub website: Option<String>,
    pub in_preferred_city: bool,
}

impl CollegeCard {
    pub fn from_college(college: &College, preferred_city: Option<&str>) -> Self {
        let college_type = college.college_type();
        Self {
            id: college.id.clone(),
            name: college.name.clone(),
            city: college.city.clone(),
            state: college.state.clone(),
            college_type,
            type_label: college_type.label(),
            rating: college.rating,
            rating_label: college.rating.map(|rating| format!("{rating:.1}")),
            fees_range: college.fees_range.clone(),
            featured_courses: college
                .courses
                .iter()
                .flatten()
                .take(FEATURED_COURSES)
                .cloned()
                .collect(),
            website: college.website.clone(),
            in_preferred_city: ranking::in_preferred_city(college, preferred_city),
        }
    }
}

/// Acknowledgement shown when a student marks interest in a college.
pub fn interest_notice(college: &College) -> String {
    format!(
        "You've shown interest in {}. Admission tracking will be available soon.",
        college.name
    )
}

/// Loads colleges and the attached user's preferred city.
pub struct CollegeRecommender<G: ?Sized> {
    gateway: Arc<G>,
    session: SessionContext,
}

impl<G> CollegeRecommender<G>
where
    G: ProfileGateway + CollegeGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>, session: SessionContext) -> Self {
        Self { gateway, session }
    }

    /// Read failures degrade to an empty college set or no preferred city.
    pub async fn load(&self) -> RecommendationInputs {
        let colleges = match self.gateway.colleges_by_rating().await {
            Ok(colleges) => colleges,
            Err(err) => {
                warn!(error = %err, "failed to fetch colleges");
                Vec::new()
            }
        };

        let preferred_city = match self.session.current_user() {
            Some(identity) => match self.gateway.fetch_profile(&identity.user_id).await {
                Ok(profile) => profile
                    .as_ref()
                    .and_then(|profile| profile.preferred_city())
                    .map(str::to_string),
                Err(err) => {
                    warn!(user_id = %identity.user_id, error = %err, "failed to fetch profile for ranking");
                    None
                }
            },
            None => None,
        };

        RecommendationInputs {
            colleges,
            preferred_city,
        }
    }

    pub async fn recommend(&self, search: Option<&str>) -> Vec<CollegeCard> {
        self.load().await.cards(search)
    }
}
