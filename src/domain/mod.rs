//! Domain types used throughout the client.
//!
//! This module defines:
//!
//! - form fields and raw form text (`Field`, `FormInput`)
//! - the `/predict` wire contract (`ClassificationRequest`, `ClassificationResult`)
//! - the outcome categories (`Category`)
//! - auxiliary backend payloads (`HealthStatus`, `PerformanceMetrics`)

pub mod types;

pub use types::*;
