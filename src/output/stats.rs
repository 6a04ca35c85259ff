//! Statistics reporting.

use console::style;
use indicatif::HumanBytes;

use crate::download::RunStats;
use crate::subtitles::SubtitleStats;

/// Print the summary of a downloader run.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Download Summary:").bold());
    println!("  Links found: {}", stats.discovered);
    if stats.unsupported > 0 {
        println!("  Ignored:     {} (not plain file links)", stats.unsupported);
    }
    println!("  Processed:   {}", stats.processed());
    println!("  Downloaded:  {}", style(stats.downloaded).green());
    println!("  Retried:     {}", stats.retried);
    if stats.failed > 0 {
        println!("  Failed:      {}", style(stats.failed).red());
    }
    println!("  Written:     {}", HumanBytes(stats.bytes_written));
    println!("{}", style("═".repeat(50)).dim());
}

/// Print the summary of a subtitle run.
pub fn print_subtitle_stats(stats: &SubtitleStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Subtitle Summary:").bold());
    println!("  Videos:    {}", stats.videos);
    println!("  Skipped:   {} (subtitle already present)", stats.skipped);
    println!("  Saved:     {}", style(stats.saved).green());
    println!("  Not found: {}", style(stats.not_found).yellow());
    if stats.errors > 0 {
        println!("  Errors:    {}", style(stats.errors).red());
    }
    println!("{}", style("═".repeat(50)).dim());
}
