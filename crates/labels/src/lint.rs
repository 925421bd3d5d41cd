//! Structural and content checks for a label set.

use crate::model::{strip_markdown_links, Label, MAX_DESCRIPTION_LEN};

/// Check a label set against the rules GitHub and the documentation
/// generator rely on.
///
/// Returns one message per offending record; the checks run in a fixed
/// order and the first failing check wins for that record. Purely
/// diagnostic: the caller decides whether violations block anything.
#[must_use]
pub fn lint(labels: &[Label]) -> Vec<String> {
    labels.iter().filter_map(lint_label).collect()
}

fn lint_label(label: &Label) -> Option<String> {
    let Some(name) = label.name.as_deref() else {
        return Some("A label needs a name".to_string());
    };
    let Some(description) = label.description.as_deref() else {
        return Some(format!("A label ({name}) needs a description"));
    };
    if strip_markdown_links(description).chars().count() > MAX_DESCRIPTION_LEN {
        return Some(format!(
            "GitHub will likely complain about the length of your label ({name})'s description."
        ));
    }
    if label.color.is_none() {
        return Some(format!("A label ({name}) needs a color"));
    }
    if label.url_exclude_is_open.is_some_and(|flag| !flag) {
        return Some(format!(
            "A label ({name})'s url_exclude_is_open needs to be set to true if present."
        ));
    }
    if label.w3c.is_some_and(|flag| !flag) {
        return Some(format!(
            "A label ({name})'s w3c needs to be set to true if present."
        ));
    }
    None
}
