// In-memory repository double for service tests
use crate::application::error::ApiError;
use crate::application::ice_data_repository::IceDataRepository;
use crate::domain::observation::{ObservationRecord, RecordFilter, RecordId};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

/// Records every batch it receives and fails the batch at `fail_at` (0-based)
#[derive(Default)]
pub struct FakeRepository {
    pub batches: Mutex<Vec<Vec<ObservationRecord>>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_at: Option<(usize, ApiError)>,
    pub fail_all: Option<ApiError>,
    /// Echo each record back as `{"batch": <index>, "record": <record>}` instead of verbatim
    pub tag_results: bool,
    /// Acknowledge chunks without returning any records
    pub silent_results: bool,
}

impl FakeRepository {
    pub fn failing_at(index: usize, error: ApiError) -> Self {
        Self {
            fail_at: Some((index, error)),
            ..Default::default()
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            fail_all: Some(error),
            ..Default::default()
        }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }

    fn record_call(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_all {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IceDataRepository for FakeRepository {
    async fn fetch(&self, filter: &RecordFilter) -> Result<Value, ApiError> {
        self.record_call(format!("fetch {:?}", filter))?;
        Ok(json!({"data": [], "filter": filter}))
    }

    async fn create(&self, record: &ObservationRecord) -> Result<Value, ApiError> {
        self.record_call("create".to_string())?;
        Ok(json!({"id": "new", "record": record}))
    }

    async fn update(&self, id: &RecordId, record: &ObservationRecord) -> Result<Value, ApiError> {
        self.record_call(format!("update {}", id))?;
        Ok(json!({"id": id, "record": record}))
    }

    async fn delete(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.record_call(format!("delete {}", id))?;
        Ok(json!({"deleted": id}))
    }

    async fn import_batch(&self, chunk: &[ObservationRecord]) -> Result<Vec<ObservationRecord>, ApiError> {
        let index = {
            let mut batches = self.batches.lock().unwrap();
            batches.push(chunk.to_vec());
            batches.len() - 1
        };

        if let Some((fail_index, err)) = &self.fail_at {
            if *fail_index == index {
                return Err(err.clone());
            }
        }

        if self.silent_results {
            Ok(Vec::new())
        } else if self.tag_results {
            Ok(chunk
                .iter()
                .map(|r| ObservationRecord::new(json!({"batch": index, "record": r})))
                .collect())
        } else {
            Ok(chunk.to_vec())
        }
    }
}
