//! Progress bar utilities.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for one download.
///
/// A zero total means the size is unknown; the bar then degrades to a
/// spinner counting transferred bytes.
pub fn create_download_bar(total: u64, name: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let (bar, template) = if total > 0 {
        (
            ProgressBar::new(total),
            "{msg} {spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        )
    } else {
        (
            ProgressBar::new_spinner(),
            "{msg} {spinner:.green} {bytes} ({bytes_per_sec})",
        )
    };

    // Templates are literals; a bad one only loses styling.
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar.set_message(name.to_string());
    bar
}
