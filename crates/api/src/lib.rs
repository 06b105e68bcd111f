mod rate_limit;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Query, State};
use axum::http::{header, HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use itinera_agents::{GenerationOutcome, GeneratorSettings, ItineraryAgent, TokioPacer};
use itinera_core::{
    group_for, render_error_html, render_html, validate_request, BudgetTier, DestinationGroup,
    DestinationProfile, ErrorNotice, Locale, TravelRequest,
};
use itinera_observability::AppMetrics;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use crate::rate_limit::IpRateLimiter;

const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub bind: String,
    pub api_key: String,
    pub allowed_origins: Vec<String>,
    pub rate_limit_window: Duration,
    pub rate_limit_max: usize,
    pub generator: GeneratorSettings,
}

impl ApiSettings {
    pub fn from_env() -> Self {
        Self {
            bind: env::var("ITINERA_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            api_key: env::var("ITINERA_API_KEY").unwrap_or_else(|_| "dev-itinera-key".to_string()),
            allowed_origins: parse_allowed_origins(env::var("ITINERA_ALLOWED_ORIGINS").ok()),
            rate_limit_window: Duration::from_secs(
                env::var("ITINERA_RATE_LIMIT_WINDOW_SECONDS")
                    .ok()
                    .and_then(|value| value.parse::<u64>().ok())
                    .unwrap_or(60),
            ),
            rate_limit_max: env::var("ITINERA_RATE_LIMIT_MAX")
                .ok()
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(60),
            generator: GeneratorSettings::from_env(),
        }
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<ItineraryAgent<TokioPacer>>,
    pub metrics: Arc<AppMetrics>,
    pub api_key: String,
    pub limiter: IpRateLimiter,
    pub allowed_origins: Arc<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: itinera_observability::MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct ResolveQuery {
    destination: String,
    locale: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    group: DestinationGroup,
    profile: DestinationProfile,
}

#[derive(Debug, Deserialize)]
struct TipsQuery {
    budget: Option<String>,
    locale: Option<String>,
}

pub fn build_app(settings: ApiSettings) -> Result<Router> {
    ensure!(!settings.api_key.trim().is_empty(), "ITINERA_API_KEY must not be empty");
    ensure!(settings.rate_limit_max > 0, "ITINERA_RATE_LIMIT_MAX must be positive");

    let metrics = AppMetrics::shared();
    let agent = Arc::new(ItineraryAgent::new(
        TokioPacer,
        settings.generator.clone(),
        metrics.clone(),
    ));

    let state = ApiState {
        agent,
        metrics,
        api_key: settings.api_key,
        limiter: IpRateLimiter::new(settings.rate_limit_window, settings.rate_limit_max),
        allowed_origins: Arc::new(settings.allowed_origins),
    };

    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/itinerary", post(itinerary_json))
        .route("/v1/itinerary/html", post(itinerary_html))
        .route("/v1/destinations/resolve", get(resolve_destination))
        .route("/v1/tips", get(tips))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn itinerary_json(
    State(state): State<ApiState>,
    payload: Result<Json<TravelRequest>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return reject_json(&state, rejection.body_text(), Locale::default());
        }
    };
    if let Err(error) = validate_request(&input, &state.agent.settings().limits) {
        return reject_json(&state, error.to_string(), input.locale);
    }

    let outcome = state.agent.generate(input).await;
    let status = match outcome {
        GenerationOutcome::Ready { .. } => StatusCode::OK,
        GenerationOutcome::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(outcome)).into_response()
}

async fn itinerary_html(
    State(state): State<ApiState>,
    payload: Result<Json<TravelRequest>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return reject_html(&state, rejection.body_text(), Locale::default());
        }
    };
    if let Err(error) = validate_request(&input, &state.agent.settings().limits) {
        return reject_html(&state, error.to_string(), input.locale);
    }

    match state.agent.generate(input).await {
        GenerationOutcome::Ready { itinerary, .. } => {
            (StatusCode::OK, Html(render_html(&itinerary))).into_response()
        }
        GenerationOutcome::Failed { notice, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render_error_html(&notice)),
        )
            .into_response(),
    }
}

fn reject_json(state: &ApiState, message: String, locale: Locale) -> Response {
    state.metrics.record_rejection();
    warn!(error = %message, "rejected itinerary request");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({
            "error": "invalid_request",
            "message": message,
            "notice": ErrorNotice::for_locale(locale),
        })),
    )
        .into_response()
}

fn reject_html(state: &ApiState, message: String, locale: Locale) -> Response {
    state.metrics.record_rejection();
    warn!(error = %message, "rejected itinerary form");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render_error_html(&ErrorNotice::for_locale(locale))),
    )
        .into_response()
}

async fn resolve_destination(
    State(state): State<ApiState>,
    Query(query): Query<ResolveQuery>,
) -> impl IntoResponse {
    let locale = Locale::from_optional_str(query.locale.as_deref());
    let profile = state.agent.resolve_destination(&query.destination, locale);
    (
        StatusCode::OK,
        Json(ResolveResponse {
            group: group_for(&query.destination),
            profile,
        }),
    )
}

async fn tips(State(state): State<ApiState>, Query(query): Query<TipsQuery>) -> impl IntoResponse {
    let locale = Locale::from_optional_str(query.locale.as_deref());
    let budget = query.budget.as_deref().and_then(BudgetTier::parse);
    (StatusCode::OK, Json(state.agent.sample_tips(budget, locale)))
}

async fn api_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let header_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if header_key != state.api_key {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "unauthorized",
                "message": "missing or invalid x-api-key"
            })),
        )
            .into_response();
    }

    next.run(request).await
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let ip = request_ip(&request);
    if let Err(wait) = state.limiter.check(&ip) {
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "rate_limited",
                "message": "rate limit exceeded for this IP"
            })),
        )
            .into_response();
        if let Ok(value) = HeaderValue::from_str(&wait.as_secs().max(1).to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    next.run(request).await
}

fn is_public_endpoint(path: &str) -> bool {
    matches!(path, "/health")
}

fn request_ip(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .split(',')
                .next()
                .unwrap_or("unknown")
                .trim()
                .to_string()
        })
        .unwrap_or_else(|| "local".to_string())
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-api-key")])
}

fn parse_allowed_origins(raw: Option<String>) -> Vec<String> {
    let default_origins = [
        "http://localhost:5500",
        "http://127.0.0.1:5500",
        "http://localhost:3000",
        "http://127.0.0.1:3000",
    ];

    raw.map(|value| {
        value
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect::<Vec<_>>()
    })
    .unwrap_or_else(|| {
        default_origins
            .iter()
            .map(|value| value.to_string())
            .collect()
    })
}
