//! Logging and progress utilities shared across pipeline stages.

pub mod logging;
pub mod progress;

pub use logging::{log_skip, log_stage, log_stage_done};
pub use progress::{create_row_progress_bar, finish_progress_bar};
