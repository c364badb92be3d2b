use std::collections::HashMap;
use std::sync::{Arc, PoisonError};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::assessments::{
    AssessmentFlow, AssessmentRecord, FlowError, FlowStage, FlowView, SubmitOutcome,
};
use crate::colleges::{interest_notice, CollegeCard, CollegeId, CollegeRecommender};
use crate::gateway::{Gateway, GatewayError};
use crate::journey::JourneyOverview;
use crate::profile::{ProfileError, ProfileForm, UserProfile};
use crate::session::{Identity, SessionContext, UserId};

/// One user's flow. Empty until the first flow request, and again after eviction.
type FlowSlot<G> = Arc<Mutex<Option<AssessmentFlow<G>>>>;

/// Facade the HTTP router and CLI drive: profile, journey, one assessment flow per user, and
/// college recommendations, all backed by a single gateway.
///
/// The slot map is only locked to look up or insert a user's slot. Gateway calls made by a
/// flow run under that user's slot lock, so one user's slow write never blocks another user.
pub struct GuidanceService<G> {
    gateway: Arc<G>,
    flows: std::sync::Mutex<HashMap<UserId, FlowSlot<G>>>,
}

impl<G> GuidanceService<G>
where
    G: Gateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            flows: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Users with an in-progress flow held in memory.
    pub fn active_flows(&self) -> usize {
        self.flows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    async fn stored_profile(&self, identity: &Identity) -> Option<UserProfile> {
        match self.gateway.fetch_profile(&identity.user_id).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(user_id = %identity.user_id, error = %err, "failed to fetch profile");
                None
            }
        }
    }

    async fn stored_assessments(&self, identity: &Identity) -> Vec<AssessmentRecord> {
        match self.gateway.assessments_for(&identity.user_id).await {
            Ok(records) => records,
            Err(err) => {
                warn!(user_id = %identity.user_id, error = %err, "failed to fetch assessments");
                Vec::new()
            }
        }
    }

    pub async fn profile_form(&self, identity: &Identity) -> ProfileForm {
        let profile = self.stored_profile(identity).await;
        ProfileForm::prefill(profile.as_ref(), identity)
    }

    pub async fn save_profile(
        &self,
        identity: &Identity,
        form: ProfileForm,
    ) -> Result<UserProfile, GuidanceError> {
        let profile = form.into_profile(identity.user_id.clone())?;
        let stored = self.gateway.upsert_profile(profile).await?;
        info!(user_id = %identity.user_id, "profile saved");
        Ok(stored)
    }

    pub async fn journey(&self, identity: &Identity) -> JourneyOverview {
        let profile = self.stored_profile(identity).await;
        let records = self.stored_assessments(identity).await;
        JourneyOverview::build(identity.email.clone(), profile.as_ref(), &records)
    }

    fn slot(&self, user_id: &UserId) -> FlowSlot<G> {
        self.flows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id.clone())
            .or_default()
            .clone()
    }

    /// Drop the user's slot unless it has already been replaced.
    fn evict(&self, user_id: &UserId, slot: &FlowSlot<G>) {
        let mut flows = self.flows.lock().unwrap_or_else(PoisonError::into_inner);
        if flows
            .get(user_id)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
        {
            flows.remove(user_id);
        }
    }

    /// Assessments stay locked until the user has saved a profile.
    async fn start_flow(&self, identity: &Identity) -> Result<AssessmentFlow<G>, GuidanceError> {
        if self.gateway.fetch_profile(&identity.user_id).await?.is_none() {
            return Err(GuidanceError::ProfileRequired);
        }
        let session = SessionContext::attached(identity.clone());
        let mut flow = AssessmentFlow::new(self.gateway.clone(), session);
        flow.initialize().await?;
        Ok(flow)
    }

    async fn ready_flow<'s>(
        &self,
        slot: &'s mut Option<AssessmentFlow<G>>,
        identity: &Identity,
    ) -> Result<&'s mut AssessmentFlow<G>, GuidanceError> {
        let flow = match slot.take() {
            Some(flow) => flow,
            None => self.start_flow(identity).await?,
        };
        Ok(slot.insert(flow))
    }

    /// Empty and completed flows leave the map; a later request re-derives them from the gateway.
    fn settle(
        &self,
        identity: &Identity,
        slot: &FlowSlot<G>,
        flow: &mut Option<AssessmentFlow<G>>,
    ) {
        let finished = flow
            .as_ref()
            .map_or(true, |flow| flow.stage() == FlowStage::Complete);
        if finished {
            if flow.take().is_some() {
                debug!(user_id = %identity.user_id, "completed assessment flow released");
            }
            self.evict(&identity.user_id, slot);
        }
    }

    async fn with_flow<T>(
        &self,
        identity: &Identity,
        op: impl FnOnce(&mut AssessmentFlow<G>) -> Result<T, FlowError>,
    ) -> Result<T, GuidanceError> {
        let slot = self.slot(&identity.user_id);
        let mut flow = slot.lock().await;
        let result = match self.ready_flow(&mut flow, identity).await {
            Ok(ready) => op(ready).map_err(GuidanceError::from),
            Err(err) => Err(err),
        };
        self.settle(identity, &slot, &mut flow);
        result
    }

    pub async fn flow_view(&self, identity: &Identity) -> Result<FlowView, GuidanceError> {
        self.with_flow(identity, |flow| Ok(flow.view())).await
    }

    pub async fn select_answer(
        &self,
        identity: &Identity,
        option: &str,
    ) -> Result<FlowView, GuidanceError> {
        self.with_flow(identity, |flow| {
            flow.select_answer(option)?;
            Ok(flow.view())
        })
        .await
    }

    pub async fn advance(&self, identity: &Identity) -> Result<FlowView, GuidanceError> {
        self.with_flow(identity, |flow| {
            flow.advance();
            Ok(flow.view())
        })
        .await
    }

    pub async fn retreat(&self, identity: &Identity) -> Result<FlowView, GuidanceError> {
        self.with_flow(identity, |flow| {
            flow.retreat();
            Ok(flow.view())
        })
        .await
    }

    pub async fn submit(
        &self,
        identity: &Identity,
    ) -> Result<(SubmitOutcome, FlowView), GuidanceError> {
        let slot = self.slot(&identity.user_id);
        let mut flow = slot.lock().await;
        let result = match self.ready_flow(&mut flow, identity).await {
            Ok(ready) => match ready.submit().await {
                Ok(outcome) => Ok((outcome, ready.view())),
                Err(err) => Err(err.into()),
            },
            Err(err) => Err(err),
        };
        self.settle(identity, &slot, &mut flow);
        result
    }

    pub async fn recommendations(
        &self,
        identity: &Identity,
        search: Option<&str>,
    ) -> Vec<CollegeCard> {
        let session = SessionContext::attached(identity.clone());
        CollegeRecommender::new(self.gateway.clone(), session)
            .recommend(search)
            .await
    }

    pub async fn register_interest(
        &self,
        identity: &Identity,
        college_id: &CollegeId,
    ) -> Result<String, GuidanceError> {
        let session = SessionContext::attached(identity.clone());
        let inputs = CollegeRecommender::new(self.gateway.clone(), session)
            .load()
            .await;
        let college = inputs
            .find(college_id)
            .ok_or_else(|| GuidanceError::CollegeNotFound(college_id.0.clone()))?;

        info!(user_id = %identity.user_id, college_id = %college_id.0, "college interest registered");
        Ok(interest_notice(college))
    }

    /// Discard the user's in-progress answers. Returns whether a flow was held for them.
    pub async fn sign_out(&self, identity: &Identity) -> bool {
        let slot = self
            .flows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&identity.user_id);
        let discarded = match slot {
            Some(slot) => slot.lock().await.take().is_some(),
            None => false,
        };
        info!(user_id = %identity.user_id, discarded, "signed out");
        discarded
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GuidanceError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("complete your profile before taking assessments")]
    ProfileRequired,
    #[error("college '{0}' not found")]
    CollegeNotFound(String),
}
