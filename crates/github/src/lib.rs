//! GitHub-facing collaborators for the label tool:
//! - The per-repository label authority (REST label API)
//! - The upstream W3C horizontal-label feed
//! - Workstream discovery for the sync-everything mode

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod feed;

pub use client::GitHubAuthority;
pub use feed::{discover_repositories, fetch_labels, W3C_LABELS_URL, WORKSTREAMS_DB_URL};
