//! Result rendering and terminal text output.
//!
//! `view` turns a classification result into display data (shared by the
//! TUI and the CLI); `format` turns display data into plain text.

pub mod format;
pub mod view;

pub use format::{format_health, format_metrics, format_result_view};
pub use view::{ProbabilityEntry, ResultView, render};
