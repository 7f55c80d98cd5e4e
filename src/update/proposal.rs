//! Proposal update functions
//!
//! Handles ProposalMsg deliveries from the assistant and the user's
//! accept/reject decisions.

use crate::commands::Cmd;
use crate::messages::ProposalMsg;
use crate::model::{AppModel, ChangeProposal};

use super::grid::install_grid;

/// Handle proposal messages
pub fn update_proposal(model: &mut AppModel, msg: ProposalMsg) -> Option<Cmd> {
    match msg {
        ProposalMsg::Received {
            id,
            action,
            rows,
            title,
            status,
        } => {
            if let Some(existing) = model.proposals.get_mut(&id) {
                if existing.action() != action {
                    tracing::warn!(
                        "Ignoring delivery for proposal {}: action {:?} != {:?}",
                        id,
                        action,
                        existing.action()
                    );
                    return None;
                }
                if !existing.update_candidate(&rows, title, status) {
                    tracing::debug!("Ignoring delivery for settled proposal {}", id);
                    return None;
                }
                return Some(Cmd::Redraw);
            }

            let labels = model.config.labels_for(action);
            let proposal = ChangeProposal::new(id, action, &rows, title, status, labels);
            tracing::debug!(
                id = %proposal.id(),
                rows = proposal.candidate_rows().len(),
                "proposal staged"
            );
            model.proposals.insert(proposal);
            Some(Cmd::Redraw)
        }

        ProposalMsg::Accept { id } => {
            let policy = model.config.rectangularity;
            let Some(proposal) = model.proposals.get_mut(&id) else {
                tracing::warn!("Accept for unknown proposal {}", id);
                return None;
            };

            let mut next = None;
            let grid = &model.grid;
            proposal.accept_with(|action, rows| next = Some(action.apply(grid, rows, policy)));

            let Some(next) = next else {
                tracing::debug!("Proposal {} not acceptable, accept ignored", id);
                return None;
            };
            tracing::info!(
                "Committed proposal {} ({} rows)",
                id,
                next.row_count()
            );
            Some(install_grid(model, next))
        }

        ProposalMsg::Reject { id } => {
            let proposal = model.proposals.get_mut(&id)?;
            if proposal.reject() {
                tracing::debug!("Rejected proposal {}", id);
                Some(Cmd::Redraw)
            } else {
                None
            }
        }
    }
}
