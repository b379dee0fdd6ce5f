// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_client;
pub mod ice_data_api;
pub mod session_store;

#[cfg(test)]
pub mod test_backend;
