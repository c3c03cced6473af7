//! Apply one of the reconciliation modes to a collected pair of path sets.
//!
//! Each mode writes human-readable lines to the supplied output as it goes, so a fatal error
//! part-way through a batch still leaves a record of the actions already taken.

mod delete;
mod list;
mod relocate;

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::config::{Mode, TidyConfig};
use crate::error::{TidyError, TidyResult};
use crate::models::{Action, CollectedPaths, ReconcileReport};

pub use delete::delete_useless;
pub use list::list_useless;
pub use relocate::update_location;

/// Run `mode` over the collected paths, writing the report lines to `out`.
pub fn reconcile<W: Write>(
    config: &TidyConfig,
    collected: &CollectedPaths,
    mode: Mode,
    out: &mut W,
) -> TidyResult<ReconcileReport> {
    let mut report = ReconcileReport::new(mode, config.dry_run(), collected);

    match mode {
        Mode::ListUseless => list_useless(collected, out, &mut report)?,
        Mode::DeleteUseless => delete_useless(config, collected, out, &mut report)?,
        Mode::UpdateLocation => update_location(config, collected, out, &mut report)?,
    }

    out.flush()?;
    Ok(report)
}

/// Remove an attachment folder once a move or delete has left it empty.
fn prune_if_empty<W: Write>(
    config: &TidyConfig,
    dir: &Path,
    out: &mut W,
    report: &mut ReconcileReport,
) -> TidyResult<()> {
    if !config.prune_empty_asset_dirs()
        || config.dry_run()
        || !config.is_asset_dir(dir)
        || dir == config.target_root()
    {
        return Ok(());
    }

    let prune_error = |source| TidyError::PruneDir {
        path: dir.to_path_buf(),
        source,
    };

    let is_empty = fs::read_dir(dir).map_err(prune_error)?.next().is_none();
    if !is_empty {
        return Ok(());
    }

    fs::remove_dir(dir).map_err(prune_error)?;
    writeln!(out, "delete empty folder {}", dir.display())?;
    info!(path = %dir.display(), "removed empty attachment folder");
    report.actions.push(Action::PrunedDir(dir.to_path_buf()));

    Ok(())
}
