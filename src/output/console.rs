//! Console output utilities.
//!
//! Status lines share one marker convention: `..` in progress, `OK` done,
//! `!!` failed, `--` skipped.

use console::style;

/// Print an in-progress status line.
pub fn print_progress(message: &str) {
    println!("{} {}", style("..").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a failure status line.
pub fn print_failure(message: &str) {
    println!("{} {}", style("!!").red().bold(), message);
}

/// Print a skipped-item status line.
pub fn print_skip(message: &str) {
    println!("{} {}", style("--").dim(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner(title: &str) {
    let rule = "═".repeat(title.chars().count() + 4);
    println!("{}", style(format!("╔{}╗", rule)).cyan());
    println!("{}", style(format!("║  {}  ║", title)).cyan());
    println!("{}", style(format!("╚{}╝", rule)).cyan());
}

/// Print the run configuration summary.
pub fn print_config_summary(entries: &[(&str, String)]) {
    println!();
    println!("{}", style("Configuration:").bold());
    for (label, value) in entries {
        println!("  {}: {}", label, value);
    }
    println!();
}
