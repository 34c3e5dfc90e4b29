//! HTTP API handlers for the EDF metadata service

pub mod health;
pub mod recordings;

pub use health::health_routes;
pub use recordings::recording_routes;
