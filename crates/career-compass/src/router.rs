use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::assessments::{catalog, FlowError};
use crate::colleges::CollegeId;
use crate::gateway::Gateway;
use crate::profile::ProfileForm;
use crate::service::{GuidanceError, GuidanceService};
use crate::session::Identity;

/// Router exposing the guidance operations for the identity carried on each request.
pub fn guidance_router<G>(service: Arc<GuidanceService<G>>) -> Router
where
    G: Gateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/profile",
            get(profile_handler::<G>).put(save_profile_handler::<G>),
        )
        .route("/api/v1/journey", get(journey_handler::<G>))
        .route("/api/v1/assessments/catalog", get(catalog_handler))
        .route("/api/v1/assessments/flow", get(flow_handler::<G>))
        .route("/api/v1/assessments/flow/answer", post(answer_handler::<G>))
        .route("/api/v1/assessments/flow/next", post(next_handler::<G>))
        .route(
            "/api/v1/assessments/flow/previous",
            post(previous_handler::<G>),
        )
        .route("/api/v1/assessments/flow/submit", post(submit_handler::<G>))
        .route("/api/v1/colleges", get(colleges_handler::<G>))
        .route(
            "/api/v1/colleges/:college_id/interest",
            post(interest_handler::<G>),
        )
        .route("/api/v1/session", delete(sign_out_handler::<G>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub option: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CollegeSearch {
    #[serde(default)]
    pub search: Option<String>,
}

impl GuidanceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GuidanceError::Flow(FlowError::NotAttached) => StatusCode::UNAUTHORIZED,
            GuidanceError::Flow(FlowError::AlreadyComplete)
            | GuidanceError::Flow(FlowError::Incomplete { .. })
            | GuidanceError::ProfileRequired => StatusCode::CONFLICT,
            GuidanceError::Flow(FlowError::UnknownOption { .. }) | GuidanceError::Profile(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            GuidanceError::Flow(FlowError::Gateway(_)) | GuidanceError::Gateway(_) => {
                StatusCode::BAD_GATEWAY
            }
            GuidanceError::CollegeNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for GuidanceError {
    fn into_response(self) -> Response {
        let payload = json!({
            "error": self.to_string(),
        });
        (self.status_code(), Json(payload)).into_response()
    }
}

pub(crate) async fn profile_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
) -> Response
where
    G: Gateway + 'static,
{
    let form = service.profile_form(&identity).await;
    (StatusCode::OK, Json(form)).into_response()
}

pub(crate) async fn save_profile_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
    Json(form): Json<ProfileForm>,
) -> Response
where
    G: Gateway + 'static,
{
    match service.save_profile(&identity, form).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn journey_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
) -> Response
where
    G: Gateway + 'static,
{
    let overview = service.journey(&identity).await;
    (StatusCode::OK, Json(overview)).into_response()
}

async fn catalog_handler() -> Response {
    (StatusCode::OK, Json(catalog::summaries())).into_response()
}

pub(crate) async fn flow_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
) -> Response
where
    G: Gateway + 'static,
{
    match service.flow_view(&identity).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn answer_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
    Json(request): Json<AnswerRequest>,
) -> Response
where
    G: Gateway + 'static,
{
    match service.select_answer(&identity, &request.option).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn next_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
) -> Response
where
    G: Gateway + 'static,
{
    match service.advance(&identity).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn previous_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
) -> Response
where
    G: Gateway + 'static,
{
    match service.retreat(&identity).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn submit_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
) -> Response
where
    G: Gateway + 'static,
{
    match service.submit(&identity).await {
        Ok((outcome, view)) => {
            let payload = json!({
                "submission": outcome,
                "flow": view,
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn colleges_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
    Query(query): Query<CollegeSearch>,
) -> Response
where
    G: Gateway + 'static,
{
    let cards = service
        .recommendations(&identity, query.search.as_deref())
        .await;
    (StatusCode::OK, Json(cards)).into_response()
}

pub(crate) async fn interest_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
    Path(college_id): Path<String>,
) -> Response
where
    G: Gateway + 'static,
{
    let college_id = CollegeId(college_id);
    match service.register_interest(&identity, &college_id).await {
        Ok(notice) => {
            let payload = json!({
                "college_id": college_id.0,
                "message": notice,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn sign_out_handler<G>(
    State(service): State<Arc<GuidanceService<G>>>,
    identity: Identity,
) -> Response
where
    G: Gateway + 'static,
{
    let discarded_flow = service.sign_out(&identity).await;
    let payload = json!({
        "user_id": identity.user_id.0,
        "signed_out": true,
        "discarded_flow": discarded_flow,
    });
    (StatusCode::OK, Json(payload)).into_response()
}
