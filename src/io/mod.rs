//! Input/output helpers.
//!
//! - prediction record export (`export`)

pub mod export;

pub use export::*;
