use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use same_file::is_same_file;
use tracing::{debug, info};

use super::prune_if_empty;
use crate::config::TidyConfig;
use crate::error::{TidyError, TidyResult};
use crate::models::{Action, CollectedPaths, ReconcileReport};

/// Move attachments to the locations documents expect them at.
///
/// For every unresolved reference the first attachment with the same file name is moved
/// into place. Unreferenced attachments are preferred over ones another document still
/// uses, then the lowest path wins. A moved attachment is not offered again. Existing
/// destinations are never overwritten.
pub fn update_location<W: Write>(
    config: &TidyConfig,
    collected: &CollectedPaths,
    out: &mut W,
    report: &mut ReconcileReport,
) -> TidyResult<()> {
    let mut candidates = CandidateIndex::build(collected);
    let dry_run = config.dry_run();
    let verb = if dry_run { "would move" } else { "move" };
    // folders a dry run would have created, so each is reported once
    let mut planned_dirs = BTreeSet::new();

    for expected in collected.unresolved_references() {
        let Some(name) = expected.file_name() else {
            continue;
        };

        let Some(source) = candidates.first(name).map(Path::to_path_buf) else {
            writeln!(
                out,
                "no attachment named {} for {}",
                name.to_string_lossy(),
                expected.display()
            )?;
            debug!(reference = %expected.display(), "no candidate attachment");
            report.actions.push(Action::NotFound(expected.to_path_buf()));
            continue;
        };

        if fs::symlink_metadata(expected).is_ok() {
            if is_same_file(&source, expected).unwrap_or(false) {
                writeln!(
                    out,
                    "skip {}: already reachable as {}",
                    source.display(),
                    expected.display()
                )?;
                report.actions.push(Action::SameFile {
                    from: source,
                    to: expected.to_path_buf(),
                });
            } else {
                writeln!(
                    out,
                    "skip {}: {} already exists",
                    source.display(),
                    expected.display()
                )?;
                report.actions.push(Action::SkippedExisting {
                    from: source,
                    to: expected.to_path_buf(),
                });
            }
            continue;
        }

        if let Some(target_dir) = expected.parent() {
            if dry_run {
                if !target_dir.exists() && planned_dirs.insert(target_dir.to_path_buf()) {
                    writeln!(out, "would create folder {}", target_dir.display())?;
                }
            } else if !target_dir.exists() {
                fs::create_dir_all(target_dir).map_err(|source| TidyError::CreateDir {
                    path: target_dir.to_path_buf(),
                    source,
                })?;
                writeln!(out, "create folder {}", target_dir.display())?;
            }
        }

        if !dry_run {
            move_file(&source, expected).map_err(|err| TidyError::Move {
                from: source.clone(),
                to: expected.to_path_buf(),
                source: err,
            })?;
        }
        writeln!(out, "{verb} {} to {}", source.display(), expected.display())?;
        info!(
            from = %source.display(),
            to = %expected.display(),
            dry_run,
            "relocated attachment"
        );

        candidates.consume_first(name);
        report.actions.push(Action::Moved {
            from: source.clone(),
            to: expected.to_path_buf(),
        });

        if let Some(source_dir) = source.parent() {
            prune_if_empty(config, source_dir, out, report)?;
        }
    }

    let moved = report.moved().len();
    let missing = report.not_found().len();
    writeln!(
        out,
        "{} {moved} image attachments, {missing} references without a matching attachment",
        if dry_run { "would move" } else { "moved" },
    )?;

    Ok(())
}

/// Attachments grouped by file name, in the order they should be offered.
struct CandidateIndex {
    by_name: BTreeMap<OsString, Vec<PathBuf>>,
}

impl CandidateIndex {
    fn build(collected: &CollectedPaths) -> Self {
        let mut by_name: BTreeMap<OsString, Vec<PathBuf>> = BTreeMap::new();
        for asset in collected.assets.iter() {
            if let Some(name) = asset.file_name() {
                by_name
                    .entry(name.to_os_string())
                    .or_default()
                    .push(asset.to_path_buf());
            }
        }

        // stable sort keeps path order within each group
        for paths in by_name.values_mut() {
            paths.sort_by_key(|path| collected.references.contains(path));
        }

        Self { by_name }
    }

    fn first(&self, name: &OsStr) -> Option<&Path> {
        self.by_name
            .get(name)
            .and_then(|paths| paths.first())
            .map(PathBuf::as_path)
    }

    fn consume_first(&mut self, name: &OsStr) {
        if let Some(paths) = self.by_name.get_mut(name) {
            if !paths.is_empty() {
                paths.remove(0);
            }
        }
    }
}

fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(err) => Err(err),
    }
}
