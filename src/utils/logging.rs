//! Log vocabulary shared by the pipeline's read and write stages.

use std::path::Path;
use std::time::Duration;

/// Log the start of a stage touching a file or directory
pub fn log_stage(stage: &str, path: &Path) {
    log::info!("{} {}", stage, path.display());
}

/// Log a finished stage with the number of items it handled
pub fn log_stage_done(
    stage: &str,
    path: &Path,
    count: usize,
    unit: &str,
    elapsed: Option<Duration>,
) {
    log::info!("{}", stage_done_message(stage, path, count, unit, elapsed));
}

fn stage_done_message(
    stage: &str,
    path: &Path,
    count: usize,
    unit: &str,
    elapsed: Option<Duration>,
) -> String {
    match elapsed {
        Some(duration) => format!(
            "{stage} finished: {count} {unit} at {} in {duration:?}",
            path.display()
        ),
        None => format!("{stage} finished: {count} {unit} at {}", path.display()),
    }
}

/// Log a recoverable condition the pipeline works around
pub fn log_skip(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
