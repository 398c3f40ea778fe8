//! HTTP server.
//!
//! Exposes the three scoring operations as JSON endpoints over a shared,
//! read-only corpus.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/classify` | Classify a customer's emails and report accuracy |
//! | `POST` | `/sentiment` | Label corpus emails with a prompt version |
//! | `POST` | `/retrieve` | Rank knowledge-base articles and answer a query |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "query is required" } }
//! ```
//!
//! Error codes: `bad_request` (400) for missing or malformed fields,
//! `internal` (500) for anything else. Internal details are logged and
//! never returned.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::classify::{classify_customer, ClassifyRequest, ClassifyResponse};
use crate::config::Config;
use crate::corpus::Corpus;
use crate::error::TriageError;
use crate::retrieve::{retrieve, RetrieveRequest, RetrieveResponse};
use crate::sentiment::{analyze_sentiment, SentimentRequest, SentimentResponse};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    corpus: Arc<Corpus>,
}

impl AppState {
    pub fn new(config: Config, corpus: Corpus) -> Self {
        Self {
            config: Arc::new(config),
            corpus: Arc::new(corpus),
        }
    }
}

/// Build the router with all routes and the CORS layer.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/classify", post(handle_classify))
        .route("/sentiment", post(handle_sentiment))
        .route("/retrieve", post(handle_retrieve))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server.
///
/// Binds to `[server].bind` and serves until the process is terminated.
pub async fn run_server(config: Config, corpus: Corpus) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(AppState::new(config, corpus));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "server listening");
    println!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (`"bad_request"` or `"internal"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn internal_error() -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: "internal error while scoring request".to_string(),
    }
}

impl From<TriageError> for AppError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::Validation(message) => {
                tracing::warn!(%message, "rejected request");
                bad_request(message)
            }
            TriageError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                internal_error()
            }
        }
    }
}

/// Decode a JSON body into a request type, mapping every failure to 400.
fn parse_body<T: DeserializeOwned>(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|rejection| bad_request(rejection.body_text()))?;
    let req = serde_json::from_value(value).map_err(TriageError::from)?;
    Ok(req)
}

/// Run a scoring closure on the blocking pool; it fans out over rayon.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, TriageError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TriageError::Internal(e.to_string()))?;
    Ok(result?)
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /classify ============

async fn handle_classify(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let req: ClassifyRequest = parse_body(body)?;
    let corpus = state.corpus.clone();

    let resp = run_blocking(move || classify_customer(&corpus, &req)).await?;
    tracing::debug!(
        customer_id = %resp.customer_id,
        total = resp.total_emails,
        accuracy = resp.accuracy,
        "classified"
    );
    Ok(Json(resp))
}

// ============ POST /sentiment ============

async fn handle_sentiment(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SentimentResponse>, AppError> {
    let req: SentimentRequest = parse_body(body)?;
    let corpus = state.corpus.clone();
    let default_num = state.config.sentiment.default_num_emails;

    let resp = run_blocking(move || analyze_sentiment(&corpus, &req, default_num)).await?;
    tracing::debug!(
        prompt_version = %resp.prompt_version,
        total = resp.total_emails,
        "labeled"
    );
    Ok(Json(resp))
}

// ============ POST /retrieve ============

async fn handle_retrieve(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<RetrieveResponse>, AppError> {
    let req: RetrieveRequest = parse_body(body)?;
    let corpus = state.corpus.clone();
    let params = state.config.retrieval.rank_params();

    let resp = run_blocking(move || retrieve(&corpus, &params, &req)).await?;
    tracing::debug!(
        confidence = resp.confidence,
        retrieved = resp.retrieved_articles.len(),
        "retrieved"
    );
    Ok(Json(resp))
}
