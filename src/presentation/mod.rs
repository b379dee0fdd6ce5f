// Presentation layer - Loopback bridge for the desktop shell
pub mod app_state;
pub mod handlers;
pub mod routes;
