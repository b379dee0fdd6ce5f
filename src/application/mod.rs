// Application layer - Use cases over the repository seam
pub mod error;
pub mod ice_data_repository;
pub mod import_service;
pub mod prediction_service;
pub mod record_service;
pub mod session;

#[cfg(test)]
pub mod fake_repository;
