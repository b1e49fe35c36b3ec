//! `exo-classify` library crate.
//!
//! The binary (`exo`) is a thin wrapper around this library so that:
//!
//! - form handling, submission and rendering are testable without a terminal
//! - the TUI and the one-shot CLI commands share one controller and renderer

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod form;
pub mod io;
pub mod logging;
pub mod report;
pub mod tui;
