#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod references;
pub mod tidier;

pub use collector::collect;
pub use config::{Mode, TidyConfig};
pub use error::{TidyError, TidyResult};
pub use models::{Action, CollectedPaths, PathSet, ReconcileReport};
pub use reconcile::reconcile;
pub use tidier::AttachmentTidier;
