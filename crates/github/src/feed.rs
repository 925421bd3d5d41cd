//! Upstream label feed and workstream discovery.

use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use labels::Label;

/// Canonical URL of the W3C horizontal-review label feed.
pub const W3C_LABELS_URL: &str = "https://w3c.github.io/hr-labels.json";

/// Workstream database enumerating every WHATWG standard.
pub const WORKSTREAMS_DB_URL: &str = "https://github.com/whatwg/sg/raw/main/db.json";

/// Fetch a label feed and parse it into records.
pub async fn fetch_labels(url: &str) -> Result<Vec<Label>> {
    let feed: Vec<Label> = get_json(url).await?;
    debug!(count = feed.len(), url, "fetched upstream labels");
    Ok(feed)
}

#[derive(Debug, Deserialize)]
struct Database {
    workstreams: Vec<Workstream>,
}

#[derive(Debug, Deserialize)]
struct Workstream {
    #[serde(default)]
    standards: Vec<Standard>,
}

#[derive(Debug, Deserialize)]
struct Standard {
    href: String,
}

/// Fetch the workstream database and list the repository shortname of
/// every standard, in document order, deduplicated.
pub async fn discover_repositories(url: &str) -> Result<Vec<String>> {
    let database: Database = get_json(url).await?;
    let mut seen = HashSet::new();
    let mut shortnames = Vec::new();
    for workstream in &database.workstreams {
        for standard in &workstream.standards {
            if let Some(shortname) = shortname_from_href(&standard.href) {
                if seen.insert(shortname.clone()) {
                    shortnames.push(shortname);
                }
            }
        }
    }
    debug!(count = shortnames.len(), "discovered repositories");
    Ok(shortnames)
}

// A standard lives at https://<shortname>.spec.whatwg.org/…; its
// repository carries the same shortname.
fn shortname_from_href(href: &str) -> Option<String> {
    let rest = href
        .strip_prefix("https://")
        .or_else(|| href.strip_prefix("http://"))?;
    let host = rest.split('/').next()?;
    let (shortname, domain) = host.split_once('.')?;
    (domain == "spec.whatwg.org").then(|| shortname.to_string())
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let response = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?;
    response
        .json()
        .await
        .with_context(|| format!("failed to parse JSON from {url}"))
}
