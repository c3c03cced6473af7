//! Run orchestrator: one collection pass followed by the selected reconciliation mode.

use std::io::Write;

use tracing::info;

use crate::collector::collect;
use crate::config::{Mode, TidyConfig};
use crate::error::TidyResult;
use crate::models::ReconcileReport;
use crate::reconcile::reconcile;

/// High-level helper tying the collector and the reconciler together.
pub struct AttachmentTidier<'a> {
    config: &'a TidyConfig,
}

impl<'a> AttachmentTidier<'a> {
    /// Create a tidier for the provided configuration.
    pub fn new(config: &'a TidyConfig) -> Self {
        Self { config }
    }

    /// Scan the tree, then apply `mode`, writing the human-readable report to `out`.
    pub fn run<W: Write>(&self, mode: Mode, out: &mut W) -> TidyResult<ReconcileReport> {
        info!(
            root = %self.config.target_root().display(),
            folder = self.config.asset_folder_name(),
            %mode,
            dry_run = self.config.dry_run(),
            "starting run"
        );

        let collected = collect(self.config)?;
        let report = reconcile(self.config, &collected, mode, out)?;

        info!(
            assets = report.asset_count,
            references = report.reference_count,
            actions = report.actions.len(),
            "run finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn run(config: &TidyConfig, mode: Mode) -> (ReconcileReport, String) {
        let mut out = Vec::new();
        let report = AttachmentTidier::new(config).run(mode, &mut out).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn referenced_attachment_is_not_listed() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("note.md"), "Some text\n![x](assets/pic.jpg)\n");
        write_file(&root.join("assets/pic.jpg"), "jpg");

        let config = TidyConfig::new(root).unwrap();
        let (report, text) = run(&config, Mode::ListUseless);

        assert!(report.listed().is_empty());
        assert_eq!((report.asset_count, report.reference_count), (1, 1));
        assert!(text.contains("number of image attachments in folders: 1"));
        assert!(text.contains("number of image references in documents: 1"));
    }

    #[test]
    fn removing_the_reference_lists_the_attachment() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("note.md"), "![x](assets/pic.jpg)\n");
        write_file(&root.join("assets/pic.jpg"), "jpg");
        write_file(&root.join("note.md"), "reference removed\n");

        let config = TidyConfig::new(root).unwrap();
        let (report, _) = run(&config, Mode::ListUseless);

        let listed = report.listed();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].ends_with("assets/pic.jpg"));
    }

    #[test]
    fn listing_is_repeatable_and_read_only() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("assets/orphan.png"), "png");
        write_file(&root.join("day/assets/lonely.gif"), "gif");

        let config = TidyConfig::new(root).unwrap();
        let (_, first) = run(&config, Mode::ListUseless);
        let (_, second) = run(&config, Mode::ListUseless);

        assert_eq!(first, second);
        assert!(root.join("assets/orphan.png").exists());
        assert!(root.join("day/assets/lonely.gif").exists());
    }

    #[test]
    fn delete_then_list_reports_nothing() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("note.md"), "![[assets/keep.png]]\n");
        write_file(&root.join("assets/keep.png"), "png");
        write_file(&root.join("assets/Pasted image.png"), "png");

        let config = TidyConfig::new(root).unwrap();
        let (deleted, _) = run(&config, Mode::DeleteUseless);
        assert_eq!(deleted.deleted().len(), 1);

        let (listed, _) = run(&config, Mode::ListUseless);
        assert!(listed.listed().is_empty());
        assert!(root.join("assets/keep.png").exists());
    }

    #[test]
    fn percent_encoded_references_match_attachments() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("note.md"), "![shot](assets/Pasted%20image.png)\n");
        write_file(&root.join("assets/Pasted image.png"), "png");

        let config = TidyConfig::new(root).unwrap();
        let (report, _) = run(&config, Mode::ListUseless);

        assert!(report.listed().is_empty());
    }

    #[test]
    fn relocation_resolves_the_reference() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("noteA/assets/img.png"), "png");
        write_file(&root.join("noteA/keep.txt"), "");
        write_file(&root.join("noteB/b.md"), "![moved](assets/img.png)\n");

        let config = TidyConfig::new(root).unwrap();
        let (report, _) = run(&config, Mode::UpdateLocation);
        assert_eq!(report.moved().len(), 1);

        let (listed, _) = run(&config, Mode::ListUseless);
        assert!(listed.listed().is_empty());
        assert_eq!((listed.asset_count, listed.reference_count), (1, 1));
    }
}
