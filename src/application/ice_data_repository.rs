// Repository trait for the backend ice-data collection
use crate::application::error::ApiError;
use crate::domain::observation::{ObservationRecord, RecordFilter, RecordId};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait IceDataRepository: Send + Sync {
    /// `GET /ice-data` with query parameters
    async fn fetch(&self, filter: &RecordFilter) -> Result<Value, ApiError>;

    /// `POST /ice-data` with one record
    async fn create(&self, record: &ObservationRecord) -> Result<Value, ApiError>;

    /// `PUT /ice-data/{id}` with a partial or complete record
    async fn update(&self, id: &RecordId, record: &ObservationRecord) -> Result<Value, ApiError>;

    /// `DELETE /ice-data/{id}`
    async fn delete(&self, id: &RecordId) -> Result<Value, ApiError>;

    /// `POST /ice-data/batch` with one chunk; returns the records the backend echoed
    async fn import_batch(&self, chunk: &[ObservationRecord]) -> Result<Vec<ObservationRecord>, ApiError>;
}
