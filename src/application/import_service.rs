// Import service - Sequential chunked delivery of observation records
use crate::application::error::ApiError;
use crate::application::ice_data_repository::IceDataRepository;
use crate::domain::import::{partition, ImportResult};
use crate::domain::observation::ObservationRecord;
use std::num::NonZeroUsize;
use std::sync::Arc;

#[derive(Clone)]
pub struct ImportService {
    repository: Arc<dyn IceDataRepository>,
    chunk_size: NonZeroUsize,
}

impl ImportService {
    pub fn new(repository: Arc<dyn IceDataRepository>, chunk_size: NonZeroUsize) -> Self {
        Self {
            repository,
            chunk_size,
        }
    }

    /// Import `records` in chunks of at most `chunk_size`.
    ///
    /// Chunks are sent one at a time, in order. The first failing chunk aborts
    /// the import and its error is returned unchanged; chunks acknowledged
    /// before it stay committed on the backend (at-least-once on resubmission).
    pub async fn import(&self, records: &[ObservationRecord]) -> Result<ImportResult, ApiError> {
        if records.is_empty() {
            tracing::warn!("Import rejected: no records supplied");
            return Err(ApiError::empty_import());
        }

        let chunks = partition(records, self.chunk_size);
        let total = chunks.len();
        tracing::info!(
            "Importing {} records in {} chunk(s) of up to {}",
            records.len(),
            total,
            self.chunk_size
        );

        let mut results = Vec::with_capacity(records.len());
        let mut committed = 0;
        for (index, chunk) in chunks.into_iter().enumerate() {
            tracing::debug!("Dispatching chunk {}/{} ({} records)", index + 1, total, chunk.len());

            match self.repository.import_batch(chunk).await {
                Ok(mut returned) => {
                    committed += chunk.len();
                    results.append(&mut returned);
                }
                Err(e) => {
                    tracing::error!(
                        "Import aborted at chunk {}/{}: {} ({} records already committed)",
                        index + 1,
                        total,
                        e,
                        committed
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!("Import complete: {} records returned", results.len());
        Ok(ImportResult::success(results))
    }
}
