//! Command-line front end for the upload flow.

use anyhow::Result;
use clap::Parser;
use ghup_core::{UploadRequest, Uploader, format_file_size, render_markdown};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ghup")]
#[command(about = "Upload files to GitHub's CDN-backed asset store")]
#[command(version)]
struct Cli {
    /// File to upload
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Target repository (owner/repo, HTTPS URL, or SSH reference)
    #[arg(short = 'r', long = "repo", visible_alias = "repository", env = "GHUP_REPOSITORY")]
    repo: Option<String>,

    /// Print a markdown image embed for the uploaded asset
    #[arg(short, long)]
    markdown: bool,

    /// Alt text for the markdown embed (defaults to the file name)
    #[arg(short, long)]
    alt: Option<String>,

    /// Validate and report without uploading
    #[arg(short = 'd', long = "dry", visible_alias = "dry-mode")]
    dry: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Absent file/repo become empty values so the library reports them as
    // MissingArgument and the process exits 1, not clap's usage exit 2.
    let request = UploadRequest {
        file_path: cli.file.unwrap_or_default(),
        repository: cli.repo.unwrap_or_default(),
        dry_run: cli.dry,
        verbose: cli.verbose,
    };

    let result = Uploader::new().upload(&request).await?;

    if result.dry_run {
        println!(
            "Dry run: {} ({}) would be uploaded to {}",
            result.file_name,
            format_file_size(result.file_size),
            result.repository
        );
    } else {
        println!(
            "Uploaded {} ({}) to {}",
            result.file_name,
            format_file_size(result.file_size),
            result.repository
        );
    }
    println!("{}", result.url);

    if cli.markdown {
        println!("{}", render_markdown(&result, cli.alt.as_deref()));
    }
    Ok(())
}
