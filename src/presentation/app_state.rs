// Application state for HTTP handlers
use crate::application::import_service::ImportService;
use crate::application::prediction_service::PredictionService;
use crate::application::record_service::RecordService;
use crate::infrastructure::session_store::SessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub record_service: RecordService,
    pub import_service: ImportService,
    pub prediction_service: PredictionService,
    pub session: Arc<SessionStore>,
}
