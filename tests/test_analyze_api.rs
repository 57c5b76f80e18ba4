//! End-to-end tests over the HTTP router, no live LLM.
//!
//! The engine runs without a provider (or with the echo dummy), so every
//! request exercises the deterministic path and the assembler's defaulting.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use solace::content::ContentLibrary;
use solace::engine::Engine;
use solace::llm::LlmProvider;
use solace::llm::providers::dummy::DummyProvider;
use solace::server::{AppState, build_router};

fn router(provider: Option<LlmProvider>) -> axum::Router {
    let engine = Engine::new(provider, ContentLibrary::standard());
    build_router(AppState {
        service_name: Arc::from("solace-test"),
        engine: Arc::new(engine),
    })
}

async fn post_analyze(router: axum::Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn analyze_sad_for_five_days() {
    let (status, body) = post_analyze(
        router(None),
        json!({ "primaryFeeling": "sad", "daysFeeling": 5 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ruleId"], "sadness_multiple_days");
    assert_eq!(body["level"], "high");
    assert_eq!(body["source"], "fallback");
    assert!(!body["reassurance"].as_str().unwrap().is_empty());
    assert!(!body["microSteps"].as_array().unwrap().is_empty());
    assert!(!body["breathing"].as_array().unwrap().is_empty());
    assert!(body["multimedia"]["resources"].as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn analyze_happy_submission() {
    let (status, body) = post_analyze(router(None), json!({ "primaryFeeling": "happy" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ruleId"], "happy_celebration");
    assert_eq!(body["level"], "positive");
}

#[tokio::test]
async fn analyze_self_harm_includes_hotline() {
    let (status, body) = post_analyze(router(None), json!({ "primaryFeeling": "self_harm" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ruleId"], "self_harm");
    assert_eq!(body["level"], "critical");

    let resources = body["multimedia"]["resources"].as_array().unwrap();
    assert!(
        resources
            .iter()
            .any(|r| r["url"].as_str().unwrap().contains("988lifeline")),
        "crisis response must link a hotline"
    );
}

#[tokio::test]
async fn help_keyword_outranks_other_signals() {
    let (status, body) = post_analyze(
        router(None),
        json!({ "primaryFeeling": "anxious", "details": "please help me" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ruleId"], "help_request");
    assert_eq!(body["level"], "critical");
}

#[tokio::test]
async fn missing_primary_feeling_is_rejected() {
    let (status, body) = post_analyze(router(None), json!({ "details": "just tired" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "primaryFeeling is required");
}

#[tokio::test]
async fn empty_primary_feeling_is_rejected() {
    let (status, _) = post_analyze(router(None), json!({ "primaryFeeling": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn identical_submissions_get_identical_responses() {
    let body = json!({ "primaryFeeling": "down", "daysFeeling": 1, "details": "grey day" });
    let (_, first) = post_analyze(router(None), body.clone()).await;
    let (_, second) = post_analyze(router(None), body).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn echo_provider_falls_back_to_deterministic_path() {
    let (status, body) = post_analyze(
        router(Some(LlmProvider::Dummy(DummyProvider))),
        json!({ "primaryFeeling": "sleep", "details": "can't sleep before exams" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ruleId"], "sleep_trouble");
    assert_eq!(body["source"], "fallback");
    // sleep bundle ships its own breathing guide
    assert_eq!(body["breathing"][0]["title"], "Progressive Relaxation");
}

#[tokio::test]
async fn health_reports_provider_state() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = router(None).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "solace-test");
    assert_eq!(body["externalClassifier"], "disabled");
}
