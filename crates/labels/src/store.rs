//! Loading and saving the persisted label set.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::model::Label;

/// Load the label set from a JSON file.
pub fn load_labels(path: &Path) -> Result<Vec<Label>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read labels file {}", path.display()))?;
    let labels: Vec<Label> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse labels file {}", path.display()))?;
    debug!(count = labels.len(), path = %path.display(), "loaded labels");
    Ok(labels)
}

/// Sort the label set by name and write it back as pretty-printed JSON
/// with a trailing newline.
pub fn save_labels(path: &Path, labels: &mut [Label]) -> Result<()> {
    labels.sort_by(|a, b| a.name.cmp(&b.name));
    let mut content = serde_json::to_string_pretty(&labels).context("failed to serialize labels")?;
    content.push('\n');
    std::fs::write(path, content)
        .with_context(|| format!("failed to write labels file {}", path.display()))?;
    debug!(count = labels.len(), path = %path.display(), "saved labels");
    Ok(())
}
