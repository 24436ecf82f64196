pub mod assistant;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod roles;
pub mod scoring;
pub mod telemetry;
