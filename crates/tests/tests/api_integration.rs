use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use itinera_agents::GeneratorSettings;
use itinera_api::{build_app, ApiSettings};
use serde_json::json;
use tower::ServiceExt;

const API_KEY: &str = "test-itinera-key";

fn settings() -> ApiSettings {
    ApiSettings {
        bind: "127.0.0.1:0".to_string(),
        api_key: API_KEY.to_string(),
        allowed_origins: vec!["http://localhost:5500".to_string()],
        rate_limit_window: Duration::from_secs(60),
        rate_limit_max: 100,
        generator: GeneratorSettings::default().without_delay(),
    }
}

fn app() -> Router {
    build_app(settings()).expect("app should build")
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-api-key", API_KEY)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = body_json(response).await;
    assert_eq!(parsed["status"], "ok");
    assert!(parsed["metrics"]["requests_total"].is_number());
}

#[tokio::test]
async fn itinerary_requires_api_key() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/itinerary")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "destination": "도쿄", "days": 3, "budget": "100-200만원" }).to_string(),
        ))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn itinerary_returns_structured_payload() {
    let response = app()
        .oneshot(post_json(
            "/v1/itinerary",
            json!({
                "destination": "Tokyo",
                "party_size": 2,
                "gender": "female",
                "age_bracket": "30s",
                "days": 3,
                "budget": "1-2M",
                "styles": ["couple"],
                "locale": "en"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let parsed = body_json(response).await;
    assert_eq!(parsed["status"], "ready");
    assert_eq!(parsed["itinerary"]["profile"]["country"], "Japan");

    let days = parsed["itinerary"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["kind"], "arrival");
    assert_eq!(days[1]["entries"][2]["description"], "romantic spot visit");
    assert_eq!(days[2]["kind"], "departure");

    let tips = &parsed["itinerary"]["tips"];
    assert_eq!(tips["general"].as_array().unwrap().len(), 3);
    assert_eq!(tips["budget"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn invalid_request_is_unprocessable() {
    let response = app()
        .oneshot(post_json(
            "/v1/itinerary",
            json!({ "destination": "  ", "days": 3, "budget": "1-2M", "locale": "en" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let parsed = body_json(response).await;
    assert_eq!(parsed["error"], "invalid_request");
    assert_eq!(parsed["notice"]["retry_label"], "Try again");
}

#[tokio::test]
async fn non_numeric_days_map_to_error_notice() {
    let app = app();
    let form = json!({ "destination": "도쿄", "days": "three", "budget": "100-200만원" });

    let response = app
        .clone()
        .oneshot(post_json("/v1/itinerary", form.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let parsed = body_json(response).await;
    assert_eq!(parsed["error"], "invalid_request");
    assert!(parsed["message"].as_str().unwrap().contains("days"));
    assert_eq!(parsed["notice"]["retry_label"], "다시 시도");

    let response = app
        .clone()
        .oneshot(post_json("/v1/itinerary/html", form))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("error-message"));

    let health = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let parsed = body_json(health).await;
    assert_eq!(parsed["metrics"]["rejected_total"], 2);
}

#[tokio::test]
async fn numeric_text_days_are_accepted() {
    let response = app()
        .oneshot(post_json(
            "/v1/itinerary",
            json!({
                "destination": "도쿄",
                "days": "3",
                "party_size": "2",
                "budget": "100-200만원"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = body_json(response).await;
    assert_eq!(parsed["itinerary"]["days"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn html_fragment_matches_form_markup() {
    let response = app()
        .oneshot(post_json(
            "/v1/itinerary/html",
            json!({ "destination": "파리", "days": 2, "budget": "200만원 이상", "party_size": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("파리 2일 맞춤 여행 코스"));
    assert_eq!(html.matches("class=\"day-plan\"").count(), 2);
    assert!(html.contains("에펠탑"));
}

#[tokio::test]
async fn html_error_block_for_rejected_form() {
    let response = app()
        .oneshot(post_json(
            "/v1/itinerary/html",
            json!({ "destination": "부산", "days": 0, "budget": "100만원 미만" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("error-message"));
    assert!(html.contains("다시 시도"));
}

#[tokio::test]
async fn resolve_reports_fallback_for_unknown_destination() {
    let request = Request::builder()
        .uri("/v1/destinations/resolve?destination=Wakanda&locale=en")
        .header("x-api-key", API_KEY)
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["group"], "fallback");
    assert_eq!(parsed["profile"]["country"], "Wakanda");
}

#[tokio::test]
async fn tips_for_unknown_budget_use_middle_tier() {
    let request = Request::builder()
        .uri("/v1/tips?budget=lottery&locale=en")
        .header("x-api-key", API_KEY)
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(
        parsed["budget"][0],
        "Mix mid-range hotels with popular local restaurants"
    );
}

#[tokio::test]
async fn rate_limit_rejects_burst() {
    let mut limited = settings();
    limited.rate_limit_max = 1;
    let app = build_app(limited).expect("app should build");

    let request = || {
        Request::builder()
            .uri("/v1/tips?budget=1-2M")
            .header("x-api-key", API_KEY)
            .header("x-forwarded-for", "203.0.113.9")
            .body(Body::empty())
            .unwrap()
    };

    let first = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.oneshot(request()).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(second.headers().contains_key(header::RETRY_AFTER));
}
