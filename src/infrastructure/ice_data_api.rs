// Backend ice-data collection over the HTTP transport
use crate::application::error::ApiError;
use crate::application::ice_data_repository::IceDataRepository;
use crate::domain::observation::{ObservationRecord, RecordFilter, RecordId};
use crate::infrastructure::http_client::TransportClient;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

const COLLECTION_PATH: &str = "/ice-data";

#[derive(Serialize)]
struct BatchBody<'a> {
    data: &'a [ObservationRecord],
}

#[derive(Clone)]
pub struct HttpIceDataRepository {
    transport: TransportClient,
}

impl HttpIceDataRepository {
    pub fn new(transport: TransportClient) -> Self {
        Self { transport }
    }

    fn record_path(id: &RecordId) -> String {
        format!("{}/{}", COLLECTION_PATH, urlencoding::encode(id.as_str()))
    }
}

#[async_trait]
impl IceDataRepository for HttpIceDataRepository {
    async fn fetch(&self, filter: &RecordFilter) -> Result<Value, ApiError> {
        self.transport.get(COLLECTION_PATH, filter).await
    }

    async fn create(&self, record: &ObservationRecord) -> Result<Value, ApiError> {
        self.transport.post(COLLECTION_PATH, record).await
    }

    async fn update(&self, id: &RecordId, record: &ObservationRecord) -> Result<Value, ApiError> {
        self.transport.put(&Self::record_path(id), record).await
    }

    async fn delete(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.transport.delete(&Self::record_path(id)).await
    }

    async fn import_batch(&self, chunk: &[ObservationRecord]) -> Result<Vec<ObservationRecord>, ApiError> {
        let path = format!("{}/batch", COLLECTION_PATH);
        let body = self.transport.post(&path, &BatchBody { data: chunk }).await?;
        Ok(ObservationRecord::sequence_from_body(body))
    }
}
