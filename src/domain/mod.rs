// Domain layer - Pure models and rules, no I/O
pub mod forecast;
pub mod import;
pub mod observation;
