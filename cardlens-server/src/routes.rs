//! HTTP surface: the multipart upload endpoint and health check.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use cardlens_extract::Pipeline;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

/// Uploads larger than this are rejected outright.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/parse-statement", post(parse_statement))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(AppState { pipeline })
}

async fn health_check() -> &'static str {
    "OK"
}

/// `POST /api/parse-statement`: multipart body with a required `pdf` file
/// field and an optional `password` text field.
async fn parse_statement(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut pdf: Option<Vec<u8>> = None;
    let mut password: Option<String> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                match name.as_str() {
                    "pdf" => match field.bytes().await {
                        Ok(bytes) => pdf = Some(bytes.to_vec()),
                        Err(e) => {
                            warn!("failed to read pdf field: {e}");
                            return error_response(StatusCode::BAD_REQUEST, "No file uploaded.");
                        }
                    },
                    "password" => {
                        password = field.text().await.ok().filter(|p| !p.is_empty());
                    }
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("malformed multipart body: {e}");
                return error_response(StatusCode::BAD_REQUEST, "No file uploaded.");
            }
        }
    }

    let Some(pdf) = pdf.filter(|b| !b.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "No file uploaded.");
    };

    info!(bytes = pdf.len(), "processing uploaded statement");
    match state.pipeline.process(&pdf, password.as_deref()).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) if err.is_password_required() => {
            info!("statement is password-protected; asking the client for a password");
            error_response(StatusCode::BAD_REQUEST, "password_required")
        }
        Err(err) => {
            // Operators get the detail; callers get the generic shape.
            error!("failed to process statement: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process PDF.")
        }
    }
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}
