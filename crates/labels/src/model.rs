//! Label records and the Markdown conventions applied to them.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum description length GitHub accepts for a label.
pub const MAX_DESCRIPTION_LEN: usize = 100;

// Greedy on purpose: the stripped form must match what the upstream
// tooling has always produced for these descriptions.
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+)\]\(.+\)").expect("markdown link pattern is valid"));

/// A label record, mastered either locally or by the upstream W3C feed.
///
/// The structural fields are optional because records are linted after
/// deserialization; a missing field is a reportable violation, not a
/// parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Unique, case-sensitive key; used verbatim as the remote identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human-readable description; may contain Markdown links locally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Lower-case hex color, without the leading `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Provenance flag: present and `true` when the record is backed by
    /// the upstream W3C feed. Present-but-false is a lint violation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w3c: Option<bool>,

    /// Present and `true` to drop the `is:open` filter from the record's
    /// documentation search URL. Present-but-false is a lint violation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_exclude_is_open: Option<bool>,
}

impl Label {
    /// Create a locally-mastered record with the three structural fields.
    #[must_use]
    pub fn new(name: &str, description: &str, color: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            color: Some(color.to_string()),
            w3c: None,
            url_exclude_is_open: None,
        }
    }

    /// The ephemeral copy of this record sent to a remote label store:
    /// the documentation-only `url_exclude_is_open` flag is dropped and
    /// Markdown links are stripped from the description.
    #[must_use]
    pub fn sanitized_for_remote(&self) -> Label {
        Label {
            description: self.description.as_deref().map(strip_markdown_links),
            url_exclude_is_open: None,
            ..self.clone()
        }
    }
}

/// Replace every Markdown link `[text](url)` with its text.
///
/// Single substitution pass, not recursive; nested or overlapping
/// brackets are out of scope and keep the greedy behavior of the
/// pattern.
#[must_use]
pub fn strip_markdown_links(input: &str) -> String {
    MARKDOWN_LINK.replace_all(input, "$1").into_owned()
}
