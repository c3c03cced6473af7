//! Directory scanning: harvest attachment files and the image references that point at them.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::config::{MARKDOWN_SUFFIX, TidyConfig};
use crate::error::{TidyError, TidyResult};
use crate::models::{CollectedPaths, PathSet};
use crate::references::{extract_image_references, resolve_reference};

/// Walk the configured tree once, collecting attachment paths and referenced image paths.
///
/// Every directory is classified by its own base name: files directly inside an attachment
/// folder are assets, and `.md` files anywhere else are scanned for image references.
/// Directory symlinks are not followed and only regular files count as attachments, but a
/// symlinked `.md` document is scanned. Any unreadable directory or document aborts the walk.
pub fn collect(config: &TidyConfig) -> TidyResult<CollectedPaths> {
    let root = config.target_root();
    let mut collected = CollectedPaths::default();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| TidyError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        let path = entry.path();
        let Some(parent) = path.parent() else {
            continue;
        };

        if config.is_asset_dir(parent) {
            // only regular files count as attachments
            if entry.file_type().is_file() {
                trace!(path = %path.display(), "attachment");
                collected.assets.insert(path);
            }
        } else if is_markdown_file(path) && is_document_file(&entry) {
            scan_document(path, config.wiki_links(), &mut collected.references)?;
            collected.documents_scanned += 1;
        }
    }

    debug!(
        root = %root.display(),
        assets = collected.assets.len(),
        references = collected.references.len(),
        documents = collected.documents_scanned,
        "collection finished"
    );

    Ok(collected)
}

/// Scan one markdown document line by line, adding resolved image paths to `references`.
pub fn scan_document(path: &Path, wiki_links: bool, references: &mut PathSet) -> TidyResult<()> {
    let read_error = |source| TidyError::ReadDocument {
        path: path.to_path_buf(),
        source,
    };

    let document_dir = path.parent().unwrap_or(Path::new(""));
    let file = File::open(path).map_err(read_error)?;

    for line in BufReader::new(file).lines() {
        let line = line.map_err(read_error)?;
        for reference in extract_image_references(&line, wiki_links) {
            let resolved = resolve_reference(document_dir, &reference.target);
            trace!(
                document = %path.display(),
                syntax = ?reference.syntax,
                target = %resolved.display(),
                "image reference"
            );
            references.insert(resolved);
        }
    }

    Ok(())
}

/// Regular files, or symlinks that resolve to one. References in a linked document are
/// resolved against the link's own directory.
fn is_document_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file()
        || (file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file()))
}

fn is_markdown_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(MARKDOWN_SUFFIX.as_bytes()))
}
