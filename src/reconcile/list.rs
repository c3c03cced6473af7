use std::io::Write;

use crate::error::TidyResult;
use crate::models::{Action, CollectedPaths, ReconcileReport};

/// Print every unreferenced attachment followed by the two summary counts.
///
/// Read-only: the filesystem is never touched.
pub fn list_useless<W: Write>(
    collected: &CollectedPaths,
    out: &mut W,
    report: &mut ReconcileReport,
) -> TidyResult<()> {
    writeln!(out, "unreferenced image attachments:")?;
    for path in collected.unreferenced_assets() {
        writeln!(out, "{}", path.display())?;
        report.actions.push(Action::Listed(path.to_path_buf()));
    }

    writeln!(
        out,
        "number of image attachments in folders: {}",
        collected.assets.len()
    )?;
    writeln!(
        out,
        "number of image references in documents: {}",
        collected.references.len()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use std::path::Path;

    fn collected() -> CollectedPaths {
        CollectedPaths {
            assets: ["/n/assets/b.png", "/n/assets/a.png", "/n/assets/used.png"]
                .into_iter()
                .collect(),
            references: ["/n/assets/used.png"].into_iter().collect(),
            documents_scanned: 1,
        }
    }

    #[test]
    fn prints_sorted_unreferenced_paths_and_counts() {
        let collected = collected();
        let mut report = ReconcileReport::new(Mode::ListUseless, false, &collected);
        let mut out = Vec::new();

        list_useless(&collected, &mut out, &mut report).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "unreferenced image attachments:\n\
             /n/assets/a.png\n\
             /n/assets/b.png\n\
             number of image attachments in folders: 3\n\
             number of image references in documents: 1\n"
        );
        assert_eq!(report.listed(), vec![
            Path::new("/n/assets/a.png"),
            Path::new("/n/assets/b.png")
        ]);
    }
}
