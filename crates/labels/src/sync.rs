//! Convergence of a remote label store toward the local label set.

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::lint::lint;
use crate::model::Label;

/// Default platform labels deleted at the start of every sync run,
/// whether or not the repository still has them.
pub const DEFAULT_LABELS: [&str; 7] = [
    "bug",
    "duplicate",
    "enhancement",
    "help wanted",
    "invalid",
    "question",
    "wontfix",
];

/// Outcome classification for a single remote label operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    /// 200: the operation succeeded.
    Ok,
    /// 201: the label was created.
    Created,
    /// 404: no label by that name. Expected outcome, not an error; it
    /// triggers the create fallback during updates.
    NotFound,
    /// Anything else.
    Other(u16),
}

impl OpStatus {
    /// Classify an HTTP status code.
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => Self::Ok,
            201 => Self::Created,
            404 => Self::NotFound,
            other => Self::Other(other),
        }
    }

    /// The underlying HTTP status code.
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NotFound => 404,
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for OpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A per-repository remote label store.
///
/// `Err` means the transport itself failed and the run cannot continue;
/// every HTTP-visible outcome is reported through [`OpStatus`] so the
/// sync engine can branch on it.
#[async_trait]
pub trait LabelAuthority {
    /// Fetch every label currently in the store.
    async fn list(&self) -> Result<Vec<Label>>;

    /// Delete a label by name.
    async fn delete(&self, name: &str) -> Result<OpStatus>;

    /// Create a new label.
    async fn create(&self, label: &Label) -> Result<OpStatus>;

    /// Update the label called `name` with the fields of `label`.
    async fn update(&self, name: &str, label: &Label) -> Result<OpStatus>;
}

/// The remote operation a [`SyncFailure`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Delete,
    Update,
    Create,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Delete => "Deleting",
            Self::Update => "Updating",
            Self::Create => "Adding",
        })
    }
}

/// A non-fatal remote failure, reported and skipped over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub operation: Operation,
    pub label: String,
    pub status: OpStatus,
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} label: {}; status {}", self.operation, self.label, self.status)
    }
}

/// What a sync run did: lint diagnostics, how many labels ended up in
/// sync, and every non-fatal failure along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub lint: Vec<String>,
    pub synced: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.lint.is_empty() && self.failures.is_empty()
    }
}

/// Converge `authority` toward `labels`.
///
/// Strictly sequential: one remote call at a time, each outcome observed
/// before the next call is issued. Per-label failures accumulate in the
/// report and never abort the run; only transport errors do. Beyond
/// [`DEFAULT_LABELS`], no remote label absent from the local set is ever
/// deleted, so re-running after a partial failure is always safe.
pub async fn sync_labels<A>(authority: &A, labels: &[Label]) -> Result<SyncReport>
where
    A: LabelAuthority + ?Sized,
{
    let mut report = SyncReport::default();

    for name in DEFAULT_LABELS {
        match authority.delete(name).await? {
            // Already absent is as good as deleted.
            OpStatus::Ok | OpStatus::NotFound => debug!(label = name, "default label removed"),
            status => report_failure(&mut report, Operation::Delete, name, status),
        }
    }

    // Diagnostic only: known-bad records still get their update attempt.
    report.lint = lint(labels);
    for message in &report.lint {
        warn!(%message, "lint violation");
    }

    for label in labels {
        let Some(name) = label.name.as_deref() else {
            // Reported by lint; there is no remote identifier to address.
            continue;
        };
        let payload = label.sanitized_for_remote();
        match authority.update(name, &payload).await? {
            OpStatus::Ok => report.synced += 1,
            OpStatus::NotFound => match authority.create(&payload).await? {
                OpStatus::Created => report.synced += 1,
                status => report_failure(&mut report, Operation::Create, name, status),
            },
            status => report_failure(&mut report, Operation::Update, name, status),
        }
    }

    info!(
        synced = report.synced,
        failures = report.failures.len(),
        "label sync finished"
    );
    Ok(report)
}

fn report_failure(report: &mut SyncReport, operation: Operation, label: &str, status: OpStatus) {
    let failure = SyncFailure {
        operation,
        label: label.to_string(),
        status,
    };
    warn!(%failure, "remote operation failed");
    report.failures.push(failure);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Delete(String),
        Create(String),
        Update(String),
    }

    /// In-memory authority double with scripted per-label outcomes.
    #[derive(Default)]
    struct ScriptedAuthority {
        calls: Mutex<Vec<Call>>,
        payloads: Mutex<Vec<Label>>,
        delete_statuses: HashMap<String, OpStatus>,
        update_statuses: HashMap<String, OpStatus>,
        create_statuses: HashMap<String, OpStatus>,
    }

    impl ScriptedAuthority {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn script_delete(mut self, name: &str, status: OpStatus) -> Self {
            self.delete_statuses.insert(name.to_string(), status);
            self
        }

        fn script_update(mut self, name: &str, status: OpStatus) -> Self {
            self.update_statuses.insert(name.to_string(), status);
            self
        }

        fn script_create(mut self, name: &str, status: OpStatus) -> Self {
            self.create_statuses.insert(name.to_string(), status);
            self
        }
    }

    #[async_trait]
    impl LabelAuthority for ScriptedAuthority {
        async fn list(&self) -> Result<Vec<Label>> {
            Ok(Vec::new())
        }

        async fn delete(&self, name: &str) -> Result<OpStatus> {
            self.calls.lock().unwrap().push(Call::Delete(name.to_string()));
            Ok(*self
                .delete_statuses
                .get(name)
                .unwrap_or(&OpStatus::NotFound))
        }

        async fn create(&self, label: &Label) -> Result<OpStatus> {
            let name = label.name.clone().unwrap_or_default();
            self.calls.lock().unwrap().push(Call::Create(name.clone()));
            self.payloads.lock().unwrap().push(label.clone());
            Ok(*self.create_statuses.get(&name).unwrap_or(&OpStatus::Created))
        }

        async fn update(&self, name: &str, label: &Label) -> Result<OpStatus> {
            self.calls.lock().unwrap().push(Call::Update(name.to_string()));
            self.payloads.lock().unwrap().push(label.clone());
            Ok(*self.update_statuses.get(name).unwrap_or(&OpStatus::Ok))
        }
    }

    #[tokio::test]
    async fn default_labels_are_deleted_first() {
        let authority = ScriptedAuthority::default();
        let report = sync_labels(&authority, &[]).await.unwrap();

        let deletes: Vec<_> = authority
            .calls()
            .into_iter()
            .take_while(|call| matches!(call, Call::Delete(_)))
            .collect();
        assert_eq!(deletes.len(), DEFAULT_LABELS.len());
        assert!(deletes.contains(&Call::Delete("bug".to_string())));
        // NotFound deletions are fine.
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn unexpected_delete_status_is_reported_but_not_fatal() {
        let authority =
            ScriptedAuthority::default().script_delete("wontfix", OpStatus::Other(403));
        let labels = vec![Label::new("a11y", "Accessibility review", "ffaa00")];

        let report = sync_labels(&authority, &labels).await.unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            report.failures[0].to_string(),
            "Deleting label: wontfix; status 403"
        );
        // The update loop still ran.
        assert_eq!(report.synced, 1);
    }

    #[tokio::test]
    async fn update_not_found_falls_back_to_create_exactly_once() {
        let authority = ScriptedAuthority::default()
            .script_update("new-label", OpStatus::NotFound)
            .script_create("new-label", OpStatus::Other(422));
        let labels = vec![Label::new("new-label", "Fresh", "aaaaaa")];

        let report = sync_labels(&authority, &labels).await.unwrap();

        let creates = authority
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::Create(_)))
            .count();
        assert_eq!(creates, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            report.failures[0].to_string(),
            "Adding label: new-label; status 422"
        );
    }

    #[tokio::test]
    async fn successful_create_fallback_counts_as_synced() {
        let authority =
            ScriptedAuthority::default().script_update("new-label", OpStatus::NotFound);
        let labels = vec![Label::new("new-label", "Fresh", "aaaaaa")];

        let report = sync_labels(&authority, &labels).await.unwrap();
        assert_eq!(report.synced, 1);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn failures_are_isolated_per_label() {
        let authority = ScriptedAuthority::default().script_update("broken", OpStatus::Other(500));
        let labels = vec![
            Label::new("broken", "Server hates this one", "111111"),
            Label::new("fine", "No trouble at all", "222222"),
        ];

        let report = sync_labels(&authority, &labels).await.unwrap();

        assert_eq!(report.synced, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].label, "broken");
    }

    #[tokio::test]
    async fn payloads_are_sanitized_but_keep_provenance() {
        let mut label = Label::new("a11y", "[Accessibility](https://x/) review", "ffaa00");
        label.w3c = Some(true);
        label.url_exclude_is_open = Some(true);
        let authority = ScriptedAuthority::default();

        sync_labels(&authority, &[label]).await.unwrap();

        let payloads = authority.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].description.as_deref(), Some("Accessibility review"));
        assert_eq!(payloads[0].url_exclude_is_open, None);
        assert_eq!(payloads[0].w3c, Some(true));
    }

    #[tokio::test]
    async fn lint_violations_do_not_block_the_run() {
        let mut missing_color = Label::new("colorless", "No color", "");
        missing_color.color = None;
        let labels = vec![missing_color, Label::new("fine", "All good", "00ff00")];
        let authority = ScriptedAuthority::default();

        let report = sync_labels(&authority, &labels).await.unwrap();

        assert_eq!(report.lint, vec!["A label (colorless) needs a color"]);
        // Both records were still pushed remotely.
        assert_eq!(report.synced, 2);
    }
}
