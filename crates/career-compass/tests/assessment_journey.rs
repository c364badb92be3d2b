//! End-to-end walk through the guidance router: profile, journey, and all three assessments
//! driven over HTTP against the in-memory gateway.

mod common {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use career_compass::gateway::InMemoryGateway;
    use career_compass::{guidance_router, GuidanceService};

    pub(super) const USER: &str = "stu-007";

    pub(super) fn router() -> (Router, Arc<InMemoryGateway>) {
        let gateway = Arc::new(InMemoryGateway::default());
        let service = Arc::new(GuidanceService::new(gateway.clone()));
        (guidance_router(service), gateway)
    }

    pub(super) async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-user-id", USER)
            .header("x-user-email", "meera@example.com");
        let body = match body {
            Some(payload) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&payload).expect("serializable payload"))
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).expect("request builds"))
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body readable");
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, payload)
    }

    pub(super) async fn save_profile(router: &Router) {
        let (status, _) = send(
            router,
            Method::PUT,
            "/api/v1/profile",
            Some(serde_json::json!({ "full_name": "Meera Iyer", "preferred_city": "Chennai" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Answer every question of the current assessment with its first option.
    pub(super) async fn answer_current_assessment(router: &Router) -> Value {
        let (_, mut view) = send(router, Method::GET, "/api/v1/assessments/flow", None).await;
        loop {
            let option = view["options"][0]
                .as_str()
                .expect("question has options")
                .to_string();
            let (status, answered) = send(
                router,
                Method::POST,
                "/api/v1/assessments/flow/answer",
                Some(serde_json::json!({ "option": option })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            if !answered["can_advance"].as_bool().unwrap_or(false) {
                return answered;
            }
            let (_, next) = send(router, Method::POST, "/api/v1/assessments/flow/next", None).await;
            view = next;
        }
    }
}

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn requests_without_identity_are_rejected() {
    let (router, _) = router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/journey")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_form_prefills_identity_email_and_validates_marks() {
    let (router, _) = router();

    let (status, form) = send(&router, Method::GET, "/api/v1/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["email"], "meera@example.com");
    assert_eq!(form["tenth_marks"], "");

    let (status, error) = send(
        &router,
        Method::PUT,
        "/api/v1/profile",
        Some(json!({ "full_name": "Meera Iyer", "tenth_marks": "104" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error["error"]
        .as_str()
        .expect("error message")
        .contains("tenth_marks"));

    let (status, saved) = send(
        &router,
        Method::PUT,
        "/api/v1/profile",
        Some(json!({
            "full_name": "Meera Iyer",
            "email": "meera@example.com",
            "preferred_city": " Pune ",
            "tenth_marks": "92.5",
            "twelfth_marks": ""
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["preferred_city"], "Pune");
    assert_eq!(saved["tenth_marks"], 92.5);
    assert!(saved["twelfth_marks"].is_null());
}

#[tokio::test]
async fn completes_all_three_assessments_in_order() {
    let (router, gateway) = router();

    send(
        &router,
        Method::PUT,
        "/api/v1/profile",
        Some(json!({ "full_name": "Meera Iyer", "preferred_city": "Pune" })),
    )
    .await;

    let (_, journey) = send(&router, Method::GET, "/api/v1/journey", None).await;
    assert_eq!(journey["next_step"], json!({ "step": "take_assessment", "ordinal": 1 }));

    let (status, refused) =
        send(&router, Method::POST, "/api/v1/assessments/flow/submit", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(refused["error"].is_string());

    for (ordinal, expected_outcome) in [(1, "advanced"), (2, "advanced"), (3, "completed")] {
        let view = answer_current_assessment(&router).await;
        assert_eq!(view["stage"], json!({ "state": "in_progress", "ordinal": ordinal }));
        assert_eq!(view["can_submit"], true);

        let (status, submitted) =
            send(&router, Method::POST, "/api/v1/assessments/flow/submit", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(submitted["submission"]["outcome"], expected_outcome);
        assert_eq!(submitted["submission"]["record"]["ordinal"], ordinal);
        assert_eq!(submitted["flow"]["answered"], 0);
    }

    assert_eq!(gateway.assessment_count(), 3);

    let (_, view) = send(&router, Method::GET, "/api/v1/assessments/flow", None).await;
    assert_eq!(view["stage"], json!({ "state": "complete" }));
    assert!(view["prompt"].is_null());

    let (status, _) = send(&router, Method::POST, "/api/v1/assessments/flow/submit", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(gateway.assessment_count(), 3);

    let (_, journey) = send(&router, Method::GET, "/api/v1/journey", None).await;
    assert_eq!(journey["next_step"], json!({ "step": "explore_colleges" }));
    assert_eq!(journey["completed"], json!([1, 2, 3]));
    assert_eq!(journey["history"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn navigation_stays_within_question_bounds() {
    let (router, _) = router();
    save_profile(&router).await;

    let (status, view) = send(&router, Method::POST, "/api/v1/assessments/flow/previous", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["question_number"], 1);
    assert_eq!(view["can_retreat"], false);

    let (_, view) = send(&router, Method::POST, "/api/v1/assessments/flow/next", None).await;
    assert_eq!(view["question_number"], 2);
    assert_eq!(view["current_answered"], false);

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/v1/assessments/flow/answer",
        Some(json!({ "option": "Underwater basket weaving" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn sign_out_discards_in_progress_answers() {
    let (router, _) = router();
    save_profile(&router).await;

    let (_, view) = send(&router, Method::GET, "/api/v1/assessments/flow", None).await;
    let option = view["options"][0].as_str().expect("option").to_string();
    let (_, view) = send(
        &router,
        Method::POST,
        "/api/v1/assessments/flow/answer",
        Some(json!({ "option": option })),
    )
    .await;
    assert_eq!(view["answered"], 1);

    let (status, signed_out) = send(&router, Method::DELETE, "/api/v1/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(signed_out["discarded_flow"], true);

    let (_, view) = send(&router, Method::GET, "/api/v1/assessments/flow", None).await;
    assert_eq!(view["answered"], 0);
    assert_eq!(view["question_number"], 1);
}

#[tokio::test]
async fn assessments_stay_locked_until_a_profile_is_saved() {
    let (router, gateway) = router();

    for (method, uri) in [
        (Method::GET, "/api/v1/assessments/flow"),
        (Method::POST, "/api/v1/assessments/flow/next"),
        (Method::POST, "/api/v1/assessments/flow/submit"),
    ] {
        let (status, body) = send(&router, method, uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT, "{uri}");
        assert!(body["error"].is_string());
    }
    assert_eq!(gateway.assessment_count(), 0);

    save_profile(&router).await;
    let (status, view) = send(&router, Method::GET, "/api/v1/assessments/flow", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["question_number"], 1);
}
