use crate::config::Config;
use crate::errors::AppError;
use crate::models::{CreateProspectResponse, InboundProspect};
use crate::netsuite_client::{NetSuiteClient, SubmitOutcome};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Largest prospect body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the NetSuite REST record API.
    pub netsuite: NetSuiteClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let netsuite = NetSuiteClient::new(&config)?;
        Ok(Self { config, netsuite })
    }
}

/// GET /
///
/// Liveness probe. Only reachable once startup validation passed.
pub async fn root() -> &'static str {
    "Prospect API is running"
}

/// Health check endpoint.
///
/// Returns the service status, name and version.
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/create-prospect
///
/// Validates the prospect, maps it to a NetSuite customer and creates it.
///
/// The submission runs on its own task, so a caller hanging up does not
/// abort a customer creation that is already under way.
///
/// # Returns
///
/// * `200` - `{status: "success"}`, also when NetSuite failed unless
///   `propagate_remote_failures` is set.
/// * `400` - Body missing, not JSON, not an object, or mistyped.
/// * `502` - NetSuite failed and `propagate_remote_failures` is set.
/// * `500` - Any local failure.
pub async fn create_prospect(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateProspectResponse>), AppError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!("Unreadable prospect body: {}", rejection.body_text());
        AppError::invalid_payload()
    })?;

    tracing::info!("POST /api/create-prospect");

    let prospect = InboundProspect::from_value(body)?;

    let task_state = Arc::clone(&state);
    let outcome = tokio::spawn(async move { task_state.netsuite.submit(&prospect).await })
        .await
        .map_err(|e| AppError::InternalError(format!("Prospect submission task failed: {}", e)))??;

    match outcome {
        SubmitOutcome::Failed(err) if state.config.propagate_remote_failures => {
            return Err(AppError::RemoteFailure(err));
        }
        // `submit` has already logged a failure at error level
        SubmitOutcome::Created(_) | SubmitOutcome::Failed(_) => {}
    }

    Ok((StatusCode::OK, Json(CreateProspectResponse::success())))
}

/// Routes that talk to NetSuite; `main` puts the rate limiter on these only.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/create-prospect", post(create_prospect))
}

/// Assembles the full application around `api`.
pub fn app(state: Arc<AppState>, api: Router<Arc<AppState>>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        // Panics in any handler become the opaque 500 body
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::InternalError(format!("Handler panicked: {}", detail)).into_response()
}
