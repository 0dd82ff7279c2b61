//! Derived per-article action permissions.
//!
//! Computed fresh from an explicit `(role, article)` pair on every render;
//! never stored, never read from ambient session state. These gate UI
//! affordances only; the server re-checks every action.

use serde::Serialize;

use crate::approval::ApprovalStatus;
use crate::article::Article;
use crate::roles::UserRole;

/// Which approval actions are currently legal for a role on an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePermissions {
    pub can_approve: bool,
    pub can_reject: bool,
    pub can_release: bool,
    pub can_reset: bool,
}

impl ArticlePermissions {
    /// Compute permissions for a role against an article's current state.
    pub fn compute(role: UserRole, article: &Article) -> Self {
        Self::for_status(role, article.approval_status, article.rejected)
    }

    /// Compute permissions from the raw `(role, status, rejected)` triple.
    ///
    /// Approve and reject share one rule: the article must be awaiting a
    /// gate the role owns (or the role overrides), and must not carry the
    /// rejected flag. Release requires the fully approved state plus an
    /// override role; reset requires a rejection plus an override role.
    pub fn for_status(role: UserRole, status: ApprovalStatus, rejected: bool) -> Self {
        let gate_actionable = match status.gate() {
            Some(gate) => role.can_approve_gate(gate) && !rejected,
            None => false,
        };

        Self {
            can_approve: gate_actionable,
            can_reject: gate_actionable,
            can_release: status.is_ready_for_release() && role.can_release(),
            can_reset: (rejected || status == ApprovalStatus::Rejected) && role.can_reset(),
        }
    }

    /// True iff no action is currently legal.
    pub fn is_empty(&self) -> bool {
        !(self.can_approve || self.can_reject || self.can_release || self.can_reset)
    }
}
