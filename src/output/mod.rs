//! Output module for console output and progress.
//!
//! Provides:
//! - Colored status lines
//! - Progress bars
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_failure, print_info, print_progress,
    print_skip, print_success, print_warning,
};
pub use progress::create_download_bar;
pub use stats::{print_run_stats, print_subtitle_stats};
