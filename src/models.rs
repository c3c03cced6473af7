//! Data structures produced while collecting and reconciling attachments.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::path::{Path, PathBuf};

use crate::config::Mode;
use crate::references::normalize_path;

/// Ordered set of absolute, lexically normalised file paths.
///
/// Every insertion is normalised, so two entries compare equal exactly when they name the
/// same location. Iteration is sorted, which keeps reports stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
  paths: BTreeSet<PathBuf>,
}

impl PathSet {
  /// Create an empty set.
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a path, returning `false` when an equal path was already present.
  pub fn insert(&mut self, path: impl AsRef<Path>) -> bool {
    self.paths.insert(normalize_path(path.as_ref()))
  }

  /// Whether the set holds the given path once normalised.
  pub fn contains(&self, path: impl AsRef<Path>) -> bool {
    self.paths.contains(&normalize_path(path.as_ref()))
  }

  /// Number of distinct paths.
  pub fn len(&self) -> usize {
    self.paths.len()
  }

  /// Whether the set is empty.
  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }

  /// Iterate over the paths in sorted order.
  pub fn iter(&self) -> impl Iterator<Item = &Path> {
    self.paths.iter().map(PathBuf::as_path)
  }

  /// Paths present in `self` but not in `other`, in sorted order.
  pub fn difference<'a>(&'a self, other: &'a PathSet) -> impl Iterator<Item = &'a Path> {
    self.paths.difference(&other.paths).map(PathBuf::as_path)
  }
}

impl<P: AsRef<Path>> FromIterator<P> for PathSet {
  fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
    let mut set = PathSet::new();
    for path in iter {
      set.insert(path);
    }
    set
  }
}

impl<'a> IntoIterator for &'a PathSet {
  type Item = &'a PathBuf;
  type IntoIter = btree_set::Iter<'a, PathBuf>;

  fn into_iter(self) -> Self::IntoIter {
    self.paths.iter()
  }
}

/// Output of a single collection pass over the document tree.
#[derive(Debug, Clone, Default)]
pub struct CollectedPaths {
  /// Files found directly inside attachment folders.
  pub assets: PathSet,
  /// Image paths referenced from markdown documents.
  pub references: PathSet,
  /// Number of markdown documents that were scanned.
  pub documents_scanned: usize,
}

impl CollectedPaths {
  /// Attachments that no document references.
  pub fn unreferenced_assets(&self) -> Vec<&Path> {
    self.assets.difference(&self.references).collect()
  }

  /// References pointing at a location where no attachment was found.
  pub fn unresolved_references(&self) -> Vec<&Path> {
    self.references.difference(&self.assets).collect()
  }
}

/// A single outcome recorded while reconciling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  /// An unreferenced attachment was reported.
  Listed(PathBuf),
  /// An unreferenced attachment was deleted (or would be, in a dry run).
  Deleted(PathBuf),
  /// An attachment was moved to the location a document expects.
  Moved {
    /// Previous location.
    from: PathBuf,
    /// New location.
    to: PathBuf,
  },
  /// The expected location already holds a file, so nothing was moved.
  SkippedExisting {
    /// Attachment that would have been moved.
    from: PathBuf,
    /// Occupied destination.
    to: PathBuf,
  },
  /// Source and destination turned out to be the same file.
  SameFile {
    /// Attachment location.
    from: PathBuf,
    /// Expected location naming the same file.
    to: PathBuf,
  },
  /// No attachment shares the file name of an unresolved reference.
  NotFound(PathBuf),
  /// An attachment folder left empty by a move or delete was removed.
  PrunedDir(PathBuf),
}

/// Summary of a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
  /// Mode the run was executed in.
  pub mode: Mode,
  /// Whether filesystem changes were suppressed.
  pub dry_run: bool,
  /// Number of attachments found in attachment folders.
  pub asset_count: usize,
  /// Number of distinct image references found in documents.
  pub reference_count: usize,
  /// Actions in the order they happened.
  pub actions: Vec<Action>,
}

impl ReconcileReport {
  pub(crate) fn new(mode: Mode, dry_run: bool, collected: &CollectedPaths) -> Self {
    Self {
      mode,
      dry_run,
      asset_count: collected.assets.len(),
      reference_count: collected.references.len(),
      actions: Vec::new(),
    }
  }

  /// Attachments reported as unreferenced by `list_useless`.
  pub fn listed(&self) -> Vec<&Path> {
    self
      .actions
      .iter()
      .filter_map(|action| match action {
        Action::Listed(path) => Some(path.as_path()),
        _ => None,
      })
      .collect()
  }

  /// Attachments removed by `delete_useless`.
  pub fn deleted(&self) -> Vec<&Path> {
    self
      .actions
      .iter()
      .filter_map(|action| match action {
        Action::Deleted(path) => Some(path.as_path()),
        _ => None,
      })
      .collect()
  }

  /// `(from, to)` pairs moved by `update_location`.
  pub fn moved(&self) -> Vec<(&Path, &Path)> {
    self
      .actions
      .iter()
      .filter_map(|action| match action {
        Action::Moved { from, to } => Some((from.as_path(), to.as_path())),
        _ => None,
      })
      .collect()
  }

  /// Unresolved references that had no candidate attachment.
  pub fn not_found(&self) -> Vec<&Path> {
    self
      .actions
      .iter()
      .filter_map(|action| match action {
        Action::NotFound(path) => Some(path.as_path()),
        _ => None,
      })
      .collect()
  }

  /// Attachment folders removed after becoming empty.
  pub fn pruned_dirs(&self) -> Vec<&Path> {
    self
      .actions
      .iter()
      .filter_map(|action| match action {
        Action::PrunedDir(path) => Some(path.as_path()),
        _ => None,
      })
      .collect()
  }
}
