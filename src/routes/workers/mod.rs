pub mod worker_handlers;
pub mod worker_models;
