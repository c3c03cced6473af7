use std::fs;
use std::io::Write;

use tracing::info;

use super::prune_if_empty;
use crate::config::TidyConfig;
use crate::error::{TidyError, TidyResult};
use crate::models::{Action, CollectedPaths, ReconcileReport};

/// Permanently delete every unreferenced attachment.
///
/// There is no confirmation and no undo. A file that vanished since the scan is a fatal
/// error, and the remaining files in the batch are left alone.
pub fn delete_useless<W: Write>(
    config: &TidyConfig,
    collected: &CollectedPaths,
    out: &mut W,
    report: &mut ReconcileReport,
) -> TidyResult<()> {
    let unreferenced = collected.unreferenced_assets();

    for path in &unreferenced {
        if config.dry_run() {
            writeln!(out, "would delete unreferenced image attachment: {}", path.display())?;
        } else {
            fs::remove_file(path).map_err(|source| TidyError::Delete {
                path: path.to_path_buf(),
                source,
            })?;
            writeln!(out, "delete unreferenced image attachment: {}", path.display())?;
            info!(path = %path.display(), "deleted unreferenced attachment");
        }
        report.actions.push(Action::Deleted(path.to_path_buf()));

        if let Some(dir) = path.parent() {
            prune_if_empty(config, dir, out, report)?;
        }
    }

    writeln!(
        out,
        "{} {} unreferenced image attachments",
        if config.dry_run() { "would delete" } else { "deleted" },
        unreferenced.len()
    )?;
    info!(count = unreferenced.len(), dry_run = config.dry_run(), "delete pass finished");

    Ok(())
}
