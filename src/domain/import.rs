// Batch import domain model
use super::observation::ObservationRecord;
use serde::Serialize;
use std::num::NonZeroUsize;

/// Maximum number of records carried by a single batch request
pub const DEFAULT_CHUNK_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResult {
    pub status: ImportStatus,
    pub data: Vec<ObservationRecord>,
}

impl ImportResult {
    pub fn success(data: Vec<ObservationRecord>) -> Self {
        Self {
            status: ImportStatus::Success,
            data,
        }
    }
}

/// Split records into consecutive chunks of at most `chunk_size` elements.
///
/// Concatenating the returned slices in order yields `records` exactly.
pub fn partition(records: &[ObservationRecord], chunk_size: NonZeroUsize) -> Vec<&[ObservationRecord]> {
    records.chunks(chunk_size.get()).collect()
}
