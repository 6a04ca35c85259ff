//! subtitle-fetcher - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use archive_tools::{
    cli::SubtitleArgs,
    config::{validate_subtitles, Config},
    error::{exit_codes, Result},
    output::{print_error, print_info, print_progress, print_subtitle_stats},
    subtitles::{fetch_subtitles, find_video_files, OpenSubtitles, SUPPORTED_LANGUAGES},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if std::env::args_os().len() == 1 {
        print_languages();
        return ExitCode::from(exit_codes::USAGE as u8);
    }

    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn print_languages() {
    println!("Available languages:");
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:<6} {}", code, name);
    }
}

async fn run() -> Result<()> {
    let args = SubtitleArgs::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    let (mut config, _) = Config::load_or_default(&args.config)?;
    args.merge_into_config(&mut config);

    let language = validate_subtitles(&config.subtitles, &args.lang)?;
    let provider = OpenSubtitles::new(&config.subtitles)?;

    print_progress("Searching for video files...");
    let videos = find_video_files(&args.folder, &config.subtitles.video_extensions);

    if videos.is_empty() {
        print_info("No video files found in the specified folder.");
        return Ok(());
    }

    print_progress(&format!(
        "Downloading {} subtitles for {} video(s)...",
        language.name(),
        videos.len()
    ));
    let stats = fetch_subtitles(&provider, &videos, &language, &config.subtitles).await;

    print_subtitle_stats(&stats);
    Ok(())
}
