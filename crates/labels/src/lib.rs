//! Core label reconciliation for WHATWG-style repositories.
//!
//! This crate provides:
//! - The label record model shared by the file store, the upstream feed,
//!   and the remote label store
//! - Linting of a label set against GitHub's constraints
//! - Merging of the upstream W3C horizontal labels into the local set
//! - Markdown documentation rendering for the label set
//! - The sequential sync engine that converges a remote label store
//!   toward the local set

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod docs;
pub mod lint;
pub mod merge;
pub mod model;
pub mod store;
pub mod sync;

pub use docs::render_docs;
pub use lint::lint;
pub use merge::{merge_upstream, MergeError};
pub use model::{strip_markdown_links, Label};
pub use store::{load_labels, save_labels};
pub use sync::{sync_labels, LabelAuthority, OpStatus, SyncFailure, SyncReport, DEFAULT_LABELS};
