//! Progress reporting.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner that counts filtered sentences on standard error.
pub fn sentence_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner} [{elapsed_precise}] {pos} sentences {msg}")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
