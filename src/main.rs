//! ia-downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use archive_tools::{
    api::Credentials,
    cli::DownloaderArgs,
    config::{validate_downloader, Config},
    download::run_pipeline,
    error::{exit_codes, Result},
    fs::ensure_dir,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_stats,
        print_warning,
    },
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = DownloaderArgs::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner("archive.org bulk downloader");

    // Load configuration
    let (mut config, loaded) = Config::load_or_default(&args.config)?;
    if !loaded {
        tracing::debug!(
            "Configuration file not found: {}, using defaults",
            args.config.display()
        );
    }

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_downloader(
        &config.archive,
        &args.username,
        &args.password,
        &args.page_id,
        args.ext.as_deref(),
    )?;

    let dest_dir = config.archive.output_directory();
    ensure_dir(&dest_dir)?;

    print_config_summary(&[
        ("Item", args.page_id.clone()),
        ("Filter", args.ext.clone().unwrap_or_else(|| "(none)".to_string())),
        ("Directory", dest_dir.display().to_string()),
    ]);

    let credentials = Credentials::new(args.username.as_str(), args.password.as_str());
    let stats = run_pipeline(
        &config.archive,
        &credentials,
        &args.page_id,
        args.ext.as_deref(),
        &dest_dir,
    )
    .await?;

    print_run_stats(&stats);

    if stats.failed > 0 {
        print_warning(&format!(
            "{} file(s) could not be downloaded after retrying",
            stats.failed
        ));
    } else if stats.downloaded > 0 {
        print_info("All files downloaded");
    }

    Ok(())
}
