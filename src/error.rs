//! Error types shared by the collector and the reconciler.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type TidyResult<T> = Result<T, TidyError>;

/// Fatal failures raised while collecting or reconciling attachments.
///
/// A reference without a matching attachment is not an error; it is reported as
/// [`crate::models::Action::NotFound`] instead.
#[derive(Debug, Error)]
pub enum TidyError {
    /// The target root was given as a relative path.
    #[error("target root must be an absolute path, got {0}")]
    RootNotAbsolute(PathBuf),

    /// The target root does not exist or is not a directory.
    #[error("target root {0} is not a directory")]
    RootNotDirectory(PathBuf),

    /// The attachment folder name is empty or spans more than one path segment.
    #[error("invalid attachment folder name {0:?}")]
    InvalidFolderName(String),

    /// The directory walk could not enter or list a directory.
    #[error("failed to walk {}", path.display())]
    Walk {
        /// Path the walker was visiting.
        path: PathBuf,
        /// Underlying walker error.
        #[source]
        source: walkdir::Error,
    },

    /// A markdown document could not be opened or decoded.
    #[error("failed to read markdown document {}", path.display())]
    ReadDocument {
        /// Document that failed.
        path: PathBuf,
        /// Source I/O error.
        #[source]
        source: io::Error,
    },

    /// A destination directory could not be created.
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Source I/O error.
        #[source]
        source: io::Error,
    },

    /// An attachment could not be moved to its expected location.
    #[error("failed to move {} to {}", from.display(), to.display())]
    Move {
        /// Current location of the attachment.
        from: PathBuf,
        /// Location the document expects.
        to: PathBuf,
        /// Source I/O error.
        #[source]
        source: io::Error,
    },

    /// An unreferenced attachment could not be deleted.
    #[error("failed to delete {}", path.display())]
    Delete {
        /// Attachment that could not be deleted.
        path: PathBuf,
        /// Source I/O error.
        #[source]
        source: io::Error,
    },

    /// An emptied attachment folder could not be inspected or removed.
    #[error("failed to remove empty folder {}", path.display())]
    PruneDir {
        /// Folder that could not be removed.
        path: PathBuf,
        /// Source I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the report to the output stream failed.
    #[error("failed to write report output")]
    Output(#[from] io::Error),
}
