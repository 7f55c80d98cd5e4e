//! Change proposals: staged grid mutations awaiting user review
//!
//! A proposal wraps canonicalized candidate rows together with the labels
//! shown before and after commit and the action that commit performs.
//!
//! ```text
//! Pending ──accept──▶ Committed      (commit callback fires exactly once)
//!    │
//!    └────reject────▶ Rejected       (callback never fires)
//! ```
//!
//! While the supplier is still streaming (`ProposalSupply::InProgress`) the
//! candidate can be replaced by newer deliveries, but it cannot be accepted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::grid::{Grid, Rectangularity, Row};
use crate::canonical::canonicalize_rows;

/// Supplier-chosen identifier for a proposal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(pub String);

impl ProposalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ProposalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What committing a proposal does to the grid store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitAction {
    /// New rows become the whole grid
    Replace,
    /// New rows are added after the existing ones
    Append,
}

impl CommitAction {
    /// Apply the committed rows to `grid`, producing the next snapshot.
    /// The title is always preserved.
    pub fn apply(self, grid: &Grid, rows: Vec<Row>, policy: Rectangularity) -> Grid {
        match self {
            CommitAction::Replace => grid.with_rows(rows, policy),
            CommitAction::Append => grid.with_appended(rows, policy),
        }
    }
}

/// Delivery status reported by the proposal supplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalSupply {
    #[default]
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    Pending,
    Committed,
    Rejected,
}

/// Text shown next to the preview before and after commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalLabels {
    pub pre_commit: String,
    pub post_commit: String,
}

impl ProposalLabels {
    pub fn new(pre_commit: impl Into<String>, post_commit: impl Into<String>) -> Self {
        Self {
            pre_commit: pre_commit.into(),
            post_commit: post_commit.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeProposal {
    id: ProposalId,
    action: CommitAction,
    candidate_rows: Vec<Row>,
    proposed_title: Option<String>,
    labels: ProposalLabels,
    supply: ProposalSupply,
    status: ProposalStatus,
}

impl ChangeProposal {
    pub fn new(
        id: ProposalId,
        action: CommitAction,
        raw_rows: &Value,
        proposed_title: Option<String>,
        supply: ProposalSupply,
        labels: ProposalLabels,
    ) -> Self {
        Self {
            id,
            action,
            candidate_rows: canonicalize_rows(raw_rows),
            proposed_title,
            labels,
            supply,
            status: ProposalStatus::Pending,
        }
    }

    pub fn id(&self) -> &ProposalId {
        &self.id
    }

    pub fn action(&self) -> CommitAction {
        self.action
    }

    pub fn candidate_rows(&self) -> &[Row] {
        &self.candidate_rows
    }

    pub fn proposed_title(&self) -> Option<&str> {
        self.proposed_title.as_deref()
    }

    pub fn supply(&self) -> ProposalSupply {
        self.supply
    }

    pub fn status(&self) -> ProposalStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == ProposalStatus::Pending
    }

    /// Label for the current status
    pub fn label(&self) -> &str {
        match self.status {
            ProposalStatus::Committed => &self.labels.post_commit,
            ProposalStatus::Pending | ProposalStatus::Rejected => &self.labels.pre_commit,
        }
    }

    /// Whether the accept control is enabled
    pub fn can_accept(&self) -> bool {
        self.status == ProposalStatus::Pending && self.supply == ProposalSupply::Complete
    }

    /// Replace the candidate with a newer delivery. Ignored once the
    /// proposal is no longer pending.
    pub fn update_candidate(
        &mut self,
        raw_rows: &Value,
        proposed_title: Option<String>,
        supply: ProposalSupply,
    ) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.candidate_rows = canonicalize_rows(raw_rows);
        if proposed_title.is_some() {
            self.proposed_title = proposed_title;
        }
        // Supply follows the latest delivery so re-streamed rows disable accept
        self.supply = supply;
        true
    }

    /// Accept the proposal, invoking `commit` with the candidate rows.
    ///
    /// `commit` runs at most once over the proposal's lifetime; later calls
    /// (duplicate UI events) return `false` without invoking it.
    pub fn accept_with<F>(&mut self, commit: F) -> bool
    where
        F: FnOnce(CommitAction, Vec<Row>),
    {
        if !self.can_accept() {
            return false;
        }
        self.status = ProposalStatus::Committed;
        commit(self.action, self.candidate_rows.clone());
        true
    }

    /// Discard the proposal without committing
    pub fn reject(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = ProposalStatus::Rejected;
        true
    }
}

/// All proposals received so far, in arrival order
#[derive(Debug, Clone, Default)]
pub struct Proposals {
    items: Vec<ChangeProposal>,
}

impl Proposals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ProposalId) -> Option<&ChangeProposal> {
        self.items.iter().find(|p| &p.id == id)
    }

    pub fn get_mut(&mut self, id: &ProposalId) -> Option<&mut ChangeProposal> {
        self.items.iter_mut().find(|p| &p.id == id)
    }

    pub fn insert(&mut self, proposal: ChangeProposal) {
        self.items.push(proposal);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Proposals that should still be rendered (rejected ones are dropped)
    pub fn visible(&self) -> impl Iterator<Item = &ChangeProposal> {
        self.items
            .iter()
            .filter(|p| p.status != ProposalStatus::Rejected)
    }

    pub fn pending(&self) -> impl Iterator<Item = &ChangeProposal> {
        self.items.iter().filter(|p| p.is_pending())
    }

    /// Most recent proposal that can currently be accepted
    pub fn latest_acceptable(&self) -> Option<&ChangeProposal> {
        self.items.iter().rev().find(|p| p.can_accept())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn proposal(supply: ProposalSupply) -> ChangeProposal {
        ChangeProposal::new(
            ProposalId::new("p1"),
            CommitAction::Replace,
            &json!([{"cells": [{"value": "a"}]}, {"cells": [{"value": "b"}, {"value": "c"}]}]),
            Some("Budget".to_string()),
            supply,
            ProposalLabels::new("Replace contents", "Changes committed"),
        )
    }

    #[test]
    fn test_candidate_is_canonical() {
        let p = proposal(ProposalSupply::Complete);
        assert_eq!(p.candidate_rows().len(), 2);
        assert!(p.candidate_rows().iter().all(|r| r.len() == 2));
        assert_eq!(p.proposed_title(), Some("Budget"));
    }

    #[test]
    fn test_accept_fires_once() {
        let mut p = proposal(ProposalSupply::Complete);
        let mut calls = 0;

        assert!(p.accept_with(|_, _| calls += 1));
        assert!(!p.accept_with(|_, _| calls += 1));

        assert_eq!(calls, 1);
        assert_eq!(p.status(), ProposalStatus::Committed);
        assert_eq!(p.label(), "Changes committed");
        assert!(!p.can_accept());
    }

    #[test]
    fn test_accept_passes_action_and_rows() {
        let mut p = proposal(ProposalSupply::Complete);
        let mut seen = None;
        p.accept_with(|action, rows| seen = Some((action, rows)));
        let (action, rows) = seen.expect("commit should fire");
        assert_eq!(action, CommitAction::Replace);
        assert_eq!(rows, p.candidate_rows());
    }

    #[test]
    fn test_in_progress_cannot_be_accepted() {
        let mut p = proposal(ProposalSupply::InProgress);
        assert_eq!(p.label(), "Replace contents");
        assert!(!p.accept_with(|_, _| panic!("must not commit partial data")));

        p.update_candidate(&json!([["x"]]), None, ProposalSupply::Complete);
        assert!(p.can_accept());
        assert_eq!(p.proposed_title(), Some("Budget"));
    }

    #[test]
    fn test_restream_after_complete_disables_accept() {
        let mut p = proposal(ProposalSupply::Complete);
        p.update_candidate(&json!([["par"]]), None, ProposalSupply::InProgress);
        assert_eq!(p.supply(), ProposalSupply::InProgress);
        assert!(!p.can_accept());
        assert!(!p.accept_with(|_, _| panic!("must not commit partial data")));
    }

    #[test]
    fn test_reject_prevents_commit() {
        let mut p = proposal(ProposalSupply::Complete);
        assert!(p.reject());
        assert!(!p.reject());
        assert!(!p.accept_with(|_, _| panic!("rejected proposal committed")));
        assert!(!p.update_candidate(&json!([["x"]]), None, ProposalSupply::Complete));
    }

    #[test]
    fn test_committed_ignores_late_deliveries() {
        let mut p = proposal(ProposalSupply::Complete);
        p.accept_with(|_, _| {});
        assert!(!p.update_candidate(&json!([["late"]]), None, ProposalSupply::Complete));
        assert_eq!(p.candidate_rows()[0][0].value, "a");
    }

    #[test]
    fn test_proposals_visible_skips_rejected() {
        let mut all = Proposals::new();
        all.insert(proposal(ProposalSupply::Complete));
        let mut second = proposal(ProposalSupply::Complete);
        second.id = ProposalId::new("p2");
        all.insert(second);

        all.get_mut(&ProposalId::new("p1")).unwrap().reject();
        let visible: Vec<_> = all.visible().map(|p| p.id().0.as_str()).collect();
        assert_eq!(visible, vec!["p2"]);
        assert_eq!(all.latest_acceptable().map(|p| p.id().0.as_str()), Some("p2"));
    }
}
