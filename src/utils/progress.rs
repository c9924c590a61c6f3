//! Progress reporting for long-running passes, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for the per-row inference progress bar
pub const DEFAULT_ROW_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Create a progress bar tracking row-level work
///
/// # Arguments
/// * `length` - Total number of rows
/// * `description` - Optional description to display as the initial message
#[must_use]
pub fn create_row_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    if let Ok(style) = ProgressStyle::default_bar().template(DEFAULT_ROW_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Finish a progress bar with a completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
