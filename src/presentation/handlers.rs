// HTTP request handlers
use crate::application::error::ApiError;
use crate::domain::forecast::{ForecastResult, PredictionQuery, QueryError};
use crate::domain::import::ImportResult;
use crate::domain::observation::{ObservationRecord, RecordFilter, RecordId};
use crate::infrastructure::session_store::Session;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Error body returned to the shell: `{"message": ...}`
#[derive(Debug)]
pub struct HandlerError {
    status: StatusCode,
    message: String,
}

impl HandlerError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ApiError> for HandlerError {
    fn from(err: ApiError) -> Self {
        let status = match &err {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Server { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Network => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self::new(status, err.to_string())
    }
}

impl From<QueryError> for HandlerError {
    fn from(err: QueryError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl From<JsonRejection> for HandlerError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

type HandlerResult<T> = Result<Json<T>, HandlerError>;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub authenticated: bool,
    pub issued_at: Option<DateTime<Utc>>,
}

impl From<Option<Session>> for SessionView {
    fn from(session: Option<Session>) -> Self {
        Self {
            authenticated: session.is_some(),
            issued_at: session.map(|s| s.issued_at),
        }
    }
}

#[derive(Deserialize)]
pub struct PredictionParams {
    pub region: Option<String>,
    pub period: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> HandlerResult<SessionView> {
    let Json(request) = request?;
    if request.token.trim().is_empty() {
        return Err(HandlerError::new(StatusCode::BAD_REQUEST, "token must not be blank"));
    }

    let session = state.session.login(&request.token).await.map_err(|e| {
        tracing::error!("Login failed: {:#}", e);
        HandlerError::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to store session")
    })?;
    Ok(Json(SessionView::from(Some(session))))
}

pub async fn logout(State(state): State<Arc<AppState>>) -> HandlerResult<SessionView> {
    state.session.logout().await.map_err(|e| {
        tracing::error!("Logout failed: {:#}", e);
        HandlerError::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to clear session")
    })?;
    Ok(Json(SessionView::from(None)))
}

pub async fn session_status(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(SessionView::from(state.session.current()))
}

pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RecordFilter>,
) -> HandlerResult<Value> {
    Ok(Json(state.record_service.fetch(&filter).await?))
}

pub async fn create_record(
    State(state): State<Arc<AppState>>,
    record: Result<Json<ObservationRecord>, JsonRejection>,
) -> HandlerResult<Value> {
    let Json(record) = record?;
    Ok(Json(state.record_service.create(&record).await?))
}

pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    record: Result<Json<ObservationRecord>, JsonRejection>,
) -> HandlerResult<Value> {
    let Json(record) = record?;
    Ok(Json(state.record_service.update(&RecordId::new(id), &record).await?))
}

pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HandlerResult<Value> {
    Ok(Json(state.record_service.delete(&RecordId::new(id)).await?))
}

/// Bulk import; the body must be a non-empty JSON array of records.
/// Anything else, unparseable bodies included, is a validation error.
pub async fn import_records(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<ImportResult> {
    let records = payload
        .ok()
        .and_then(|Json(payload)| ObservationRecord::sequence_from_payload(payload))
        .ok_or_else(|| {
            tracing::warn!("Import rejected: payload is not a non-empty JSON array");
            ApiError::empty_import()
        })?;

    Ok(Json(state.import_service.import(&records).await?))
}

pub async fn get_prediction(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictionParams>,
) -> HandlerResult<ForecastResult> {
    let query = PredictionQuery::parse(params.region.as_deref(), params.period.as_deref())?;
    Ok(Json(state.prediction_service.predict(query).await))
}
