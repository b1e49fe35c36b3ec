//! Backend access.

pub mod api;

pub use api::{ApiClient, interpret_response};
