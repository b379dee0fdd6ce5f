// Record service - Pass-through CRUD over the ice-data collection
use crate::application::error::ApiError;
use crate::application::ice_data_repository::IceDataRepository;
use crate::domain::observation::{ObservationRecord, RecordFilter, RecordId};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct RecordService {
    repository: Arc<dyn IceDataRepository>,
}

impl RecordService {
    pub fn new(repository: Arc<dyn IceDataRepository>) -> Self {
        Self { repository }
    }

    pub async fn fetch(&self, filter: &RecordFilter) -> Result<Value, ApiError> {
        tracing::debug!("Fetching records with filter {:?}", filter);
        let body = self.repository.fetch(filter).await.inspect_err(|e| {
            tracing::error!("Fetching records failed: {}", e);
        })?;
        tracing::debug!("Fetched records: {}", body);
        Ok(body)
    }

    pub async fn create(&self, record: &ObservationRecord) -> Result<Value, ApiError> {
        tracing::debug!("Creating record {}", record.as_value());
        let body = self.repository.create(record).await.inspect_err(|e| {
            tracing::error!("Creating record failed: {}", e);
        })?;
        tracing::debug!("Created record: {}", body);
        Ok(body)
    }

    pub async fn update(&self, id: &RecordId, record: &ObservationRecord) -> Result<Value, ApiError> {
        tracing::debug!("Updating record {} with {}", id, record.as_value());
        let body = self.repository.update(id, record).await.inspect_err(|e| {
            tracing::error!("Updating record {} failed: {}", id, e);
        })?;
        tracing::debug!("Updated record {}: {}", id, body);
        Ok(body)
    }

    pub async fn delete(&self, id: &RecordId) -> Result<Value, ApiError> {
        tracing::debug!("Deleting record {}", id);
        let body = self.repository.delete(id).await.inspect_err(|e| {
            tracing::error!("Deleting record {} failed: {}", id, e);
        })?;
        tracing::debug!("Deleted record {}: {}", id, body);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fake_repository::FakeRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_operations_return_body_verbatim() {
        let repo = Arc::new(FakeRepository::default());
        let service = RecordService::new(repo.clone());
        let record = ObservationRecord::new(json!({"region": "B", "density": 0.91}));
        let id = RecordId::new("42");

        let mut filter = RecordFilter::new();
        filter.insert("region".to_string(), "B".to_string());

        let fetched = service.fetch(&filter).await.unwrap();
        assert_eq!(fetched, json!({"data": [], "filter": {"region": "B"}}));

        let created = service.create(&record).await.unwrap();
        assert_eq!(created["record"], json!({"region": "B", "density": 0.91}));

        let updated = service.update(&id, &record).await.unwrap();
        assert_eq!(updated["id"], json!("42"));

        let deleted = service.delete(&id).await.unwrap();
        assert_eq!(deleted, json!({"deleted": "42"}));

        let calls = repo.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![
            "fetch {\"region\": \"B\"}".to_string(),
            "create".to_string(),
            "update 42".to_string(),
            "delete 42".to_string(),
        ]);
    }

    #[tokio::test]
    async fn test_errors_pass_through_unchanged() {
        let err = ApiError::Server { status: 404, message: "record not found".to_string() };
        let service = RecordService::new(Arc::new(FakeRepository::failing(err.clone())));

        assert_eq!(service.delete(&RecordId::new("9")).await, Err(err.clone()));
        assert_eq!(service.fetch(&RecordFilter::new()).await, Err(err));
    }
}
