//! md-image-tools - tidy image attachments of a markdown document tree.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use md_image_tools::config::DEFAULT_ASSET_FOLDER;
use md_image_tools::{AttachmentTidier, Mode, TidyConfig};
use tracing_subscriber::EnvFilter;

/// A small tool for dealing with duplicate and orphaned image attachments.
///
/// It might be useful for markdown projects that keep images in attachment folders.
#[derive(Parser)]
#[command(name = "md-image-tools")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// The root directory storing your documents (absolute path)
    #[arg(long, value_name = "PATH")]
    target_root: PathBuf,

    /// The name of the attachment folder
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ASSET_FOLDER)]
    target_folder: String,

    /// update_location: move images to the location the markdown documents expect.
    /// list_useless: list unreferenced images.
    /// delete_useless: delete unreferenced images.
    #[arg(long, value_enum, default_value_t = Mode::ListUseless)]
    mode: Mode,

    /// Only recognise `![alt](target)` references, ignoring `![[target]]` embeds
    #[arg(long)]
    inline_only: bool,

    /// Keep attachment folders that become empty after a move or delete
    #[arg(long)]
    keep_empty_dirs: bool,

    /// Report what update_location or delete_useless would do without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Emit debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = TidyConfig::new(&cli.target_root)
        .and_then(|config| config.with_asset_folder_name(cli.target_folder))
        .context("invalid arguments")?
        .with_wiki_links(!cli.inline_only)
        .with_prune_empty_asset_dirs(!cli.keep_empty_dirs)
        .with_dry_run(cli.dry_run);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    AttachmentTidier::new(&config)
        .run(cli.mode, &mut out)
        .with_context(|| format!("{} failed under {}", cli.mode, config.target_root().display()))?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
