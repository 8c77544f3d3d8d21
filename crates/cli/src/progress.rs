//! Progress indicators
//!
//! Provides progress bars for long-running operations.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a progress bar for file processing
///
/// Returns a hidden bar when `quiet` is set, so callers can tick it
/// unconditionally.
pub fn file_progress(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar and remove it from the terminal
pub fn finish_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}
