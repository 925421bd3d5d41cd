//! Markdown documentation rendering for the label set.

use std::fmt::Write;

use crate::model::Label;

const HEADER: &str = "<!-- Please do not edit this file directly. It is generated by labelctl. -->

# GitHub Labels

These are labels used by all [WHATWG standards](https://spec.whatwg.org/):

";

const W3C_SECTION: &str = "The following [W3C horizontal labels](https://w3c.github.io/issue-metadata.html#horizontal-reviews) can also be used:\n\n";

/// Render the LABELS.md document: locally-mastered labels first, then
/// the W3C horizontal labels, each as a search-link bullet.
#[must_use]
pub fn render_docs(labels: &[Label]) -> String {
    let mut output = String::from(HEADER);
    for label in labels.iter().filter(|l| l.w3c.is_none()) {
        format_label(&mut output, label);
    }
    output.push('\n');
    output.push_str(W3C_SECTION);
    for label in labels.iter().filter(|l| l.w3c.is_some()) {
        format_label(&mut output, label);
    }
    output
}

fn format_label(output: &mut String, label: &Label) {
    let (Some(name), Some(description)) = (label.name.as_deref(), label.description.as_deref())
    else {
        // Lint reports the hole; an unnamed record has no useful entry.
        return;
    };
    let mut url = format!(
        "https://github.com/search?q=org%3Awhatwg+label%3A%22{}%22",
        quote_plus(name)
    );
    if label.url_exclude_is_open.is_none() {
        url.push_str("+is%3Aopen");
    }
    let _ = writeln!(output, "* [{name}]({url}): {description}");
}

// Form-style percent encoding: spaces become `+`, as GitHub's search
// query parser expects.
fn quote_plus(input: &str) -> String {
    urlencoding::encode(input).replace("%20", "+")
}
