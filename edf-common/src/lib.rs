//! # EDF Common Library
//!
//! Shared code for the EDF metadata service:
//! - Domain model (recordings, channels, patient identity, metrics)
//! - Configuration loading and source directory resolution
//! - Common error types

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
