pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod openapi;
pub mod query;
pub mod repo;
pub mod routes;
pub mod seed;

// Re-export commonly used items for tests / external users
pub use config::AppConfig;
pub use routes::AppState;
