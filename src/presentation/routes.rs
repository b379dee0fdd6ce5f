// Router for the loopback bridge
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_record, delete_record, get_prediction, health_check, import_records, list_records,
    login, logout, session_status, update_record,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/session", get(session_status).post(login).delete(logout))
        .route("/records", get(list_records).post(create_record))
        .route("/records/import", post(import_records))
        .route("/records/:id", put(update_record).delete(delete_record))
        .route("/prediction", get(get_prediction))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
