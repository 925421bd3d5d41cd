//! Merging the upstream W3C label feed into the local label set.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::model::Label;

/// Fatal inconsistency between the local set and the upstream feed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// A local record claims W3C provenance the feed no longer grants.
    /// Whether to demote or delete such a record is a human decision, so
    /// the merge refuses to proceed.
    #[error("label \"{name}\" claims W3C provenance but is no longer in the upstream feed")]
    UpstreamWithdrawn { name: String },
}

/// Merge `upstream` into `local`, returning the updated set.
///
/// Local records found upstream adopt the upstream description and color
/// (color lower-cased) and are marked `w3c`. Upstream records with no
/// local counterpart are appended, in feed order. Local records without
/// the `w3c` flag are never altered.
///
/// Fails with [`MergeError::UpstreamWithdrawn`] if a local `w3c` record
/// has disappeared from the feed; the caller must not persist anything
/// in that case.
pub fn merge_upstream(mut local: Vec<Label>, upstream: &[Label]) -> Result<Vec<Label>, MergeError> {
    let by_name: HashMap<&str, &Label> = upstream
        .iter()
        .filter_map(|label| label.name.as_deref().map(|name| (name, label)))
        .collect();
    let mut consumed: HashSet<String> = HashSet::new();

    for record in &mut local {
        let Some(name) = record.name.clone() else {
            // Lint reports the missing name; nothing to match against.
            continue;
        };
        match by_name.get(name.as_str()) {
            Some(upstream_record) if !consumed.contains(&name) => {
                record.description = upstream_record.description.clone();
                record.color = upstream_record.color.as_ref().map(|c| c.to_lowercase());
                record.w3c = Some(true);
                consumed.insert(name);
            }
            _ if record.w3c.is_some() => return Err(MergeError::UpstreamWithdrawn { name }),
            _ => {}
        }
    }

    for upstream_record in upstream {
        let Some(name) = upstream_record.name.as_deref() else {
            continue;
        };
        if consumed.contains(name) {
            continue;
        }
        debug!(label = name, "adopting new upstream label");
        local.push(Label {
            name: upstream_record.name.clone(),
            description: upstream_record.description.clone(),
            color: upstream_record.color.as_ref().map(|c| c.to_lowercase()),
            w3c: Some(true),
            url_exclude_is_open: None,
        });
    }

    Ok(local)
}
