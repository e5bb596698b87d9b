use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use urania::{BirthRequest, ChartAssembler, ChartError, ChartResult};

const SERVICE_NAME: &str = "swiss-ephemeris";
const EPHEMERIS_NAME: &str = "Swiss Ephemeris";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    assembler: Arc<ChartAssembler>,
}

impl AppState {
    pub fn new(assembler: ChartAssembler) -> Self {
        Self {
            assembler: Arc::new(assembler),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartResponse {
    success: bool,
    chart_data: ChartResult,
    calculated_at: String,
    ephemeris: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/calculate", post(calculate_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    let body = HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}

async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<BirthRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let assembler = Arc::clone(&state.assembler);
    let outcome = tokio::task::spawn_blocking(move || assembler.calculate(&request)).await;

    match outcome {
        Ok(Ok(chart)) => {
            let body = ChartResponse {
                success: true,
                chart_data: chart,
                calculated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                ephemeris: EPHEMERIS_NAME,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(Err(err @ ChartError::Input(_))) => {
            log::debug!("Rejected chart request: {}", err);
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        Ok(Err(err)) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        Err(join_err) => {
            log::error!("Chart task did not complete: {}", join_err);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Chart calculation aborted".to_string(),
            )
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
