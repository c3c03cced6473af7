//! Run configuration: where to look, what counts as an attachment folder, and how to act.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{TidyError, TidyResult};
use crate::references::normalize_path;

/// Attachment folder name used when none is configured.
pub const DEFAULT_ASSET_FOLDER: &str = "assets";

/// File name suffix identifying markdown documents. Matched case-sensitively.
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Reconciliation mode selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Move attachments to the location documents expect them at.
    #[value(name = "update_location")]
    UpdateLocation,
    /// List attachments no document references.
    #[default]
    #[value(name = "list_useless")]
    ListUseless,
    /// Delete attachments no document references.
    #[value(name = "delete_useless")]
    DeleteUseless,
}

impl Mode {
    /// Command line spelling of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::UpdateLocation => "update_location",
            Mode::ListUseless => "list_useless",
            Mode::DeleteUseless => "delete_useless",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable options shared by the collector and the reconciler.
#[derive(Debug, Clone)]
pub struct TidyConfig {
    target_root: PathBuf,
    asset_folder_name: String,
    wiki_links: bool,
    prune_empty_asset_dirs: bool,
    dry_run: bool,
}

impl TidyConfig {
    /// Build a configuration rooted at `target_root` with default options.
    ///
    /// The root must be an absolute path to an existing directory.
    pub fn new(target_root: impl Into<PathBuf>) -> TidyResult<Self> {
        let target_root = target_root.into();
        if !target_root.is_absolute() {
            return Err(TidyError::RootNotAbsolute(target_root));
        }
        let target_root = normalize_path(&target_root);
        if !target_root.is_dir() {
            return Err(TidyError::RootNotDirectory(target_root));
        }

        Ok(Self {
            target_root,
            asset_folder_name: DEFAULT_ASSET_FOLDER.to_string(),
            wiki_links: true,
            prune_empty_asset_dirs: true,
            dry_run: false,
        })
    }

    /// Use a different attachment folder name. The name must be a single path segment.
    pub fn with_asset_folder_name(mut self, name: impl Into<String>) -> TidyResult<Self> {
        let name = name.into();
        let is_single_segment = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.chars().any(std::path::is_separator);
        if !is_single_segment {
            return Err(TidyError::InvalidFolderName(name));
        }
        self.asset_folder_name = name;
        Ok(self)
    }

    /// Toggle recognition of `![[target]]` embeds.
    pub fn with_wiki_links(mut self, enabled: bool) -> Self {
        self.wiki_links = enabled;
        self
    }

    /// Toggle removal of attachment folders emptied by a move or delete.
    pub fn with_prune_empty_asset_dirs(mut self, enabled: bool) -> Self {
        self.prune_empty_asset_dirs = enabled;
        self
    }

    /// Report mutating actions without performing them.
    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Normalised absolute root of the document tree.
    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Base name identifying attachment folders.
    pub fn asset_folder_name(&self) -> &str {
        &self.asset_folder_name
    }

    /// Whether wiki-style embeds are recognised.
    pub fn wiki_links(&self) -> bool {
        self.wiki_links
    }

    /// Whether emptied attachment folders are removed.
    pub fn prune_empty_asset_dirs(&self) -> bool {
        self.prune_empty_asset_dirs
    }

    /// Whether mutating modes only report.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Whether `dir` is an attachment folder, judged by its base name alone.
    pub fn is_asset_dir(&self, dir: &Path) -> bool {
        dir.file_name()
            .is_some_and(|name| name == self.asset_folder_name.as_str())
    }
}
