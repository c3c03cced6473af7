//! Helpers for turning markdown image references into comparable filesystem paths.
//!
//! The responsibilities are split so that filtering targets, matching the two image
//! syntaxes on a single line, and resolving a target against its document can each be
//! tested on their own. The collector stitches them together while scanning documents.

mod filters;
mod patterns;
mod resolve;

pub use filters::{IMAGE_EXTENSIONS, is_remote_reference};
pub use patterns::{ImageReference, ReferenceSyntax, extract_image_references};
pub use resolve::{decode_target, normalize_path, resolve_reference};
