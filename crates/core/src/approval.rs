//! Article approval workflow: gates, statuses, and transitions.
//!
//! Cybersecurity articles pass through a fixed 7-gate review sequence
//! (marketing → branding → voc → soc_l1 → soc_l3 → compliance → ciso).
//! An article starts at `pending_marketing` and either walks every gate
//! forward to `approved` (and eventually `released`), or drops out as
//! `rejected`. Gates are passed strictly in order; no client action can
//! move a status backward.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Approval Gate
// ---------------------------------------------------------------------------

/// A named checkpoint in the approval sequence.
///
/// Each gate is owned by exactly one reviewer role (see
/// [`UserRole::target_gate`](crate::roles::UserRole::target_gate)), with
/// `admin` / `super_admin` able to act on any gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalGate {
    Marketing,
    Branding,
    Voc,
    SocL1,
    SocL3,
    Compliance,
    Ciso,
}

/// The sequential order of approval gates.
pub const GATE_ORDER: [ApprovalGate; 7] = [
    ApprovalGate::Marketing,
    ApprovalGate::Branding,
    ApprovalGate::Voc,
    ApprovalGate::SocL1,
    ApprovalGate::SocL3,
    ApprovalGate::Compliance,
    ApprovalGate::Ciso,
];

impl ApprovalGate {
    /// Return the gate name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marketing => "marketing",
            Self::Branding => "branding",
            Self::Voc => "voc",
            Self::SocL1 => "soc_l1",
            Self::SocL3 => "soc_l3",
            Self::Compliance => "compliance",
            Self::Ciso => "ciso",
        }
    }

    /// Parse a gate name. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "marketing" => Some(Self::Marketing),
            "branding" => Some(Self::Branding),
            "voc" => Some(Self::Voc),
            "soc_l1" => Some(Self::SocL1),
            "soc_l3" => Some(Self::SocL3),
            "compliance" => Some(Self::Compliance),
            "ciso" => Some(Self::Ciso),
            _ => None,
        }
    }

    /// Zero-based position of this gate in [`GATE_ORDER`].
    pub fn position(&self) -> usize {
        GATE_ORDER
            .iter()
            .position(|g| g == self)
            .unwrap_or(GATE_ORDER.len())
    }
}

impl std::fmt::Display for ApprovalGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Approval Status
// ---------------------------------------------------------------------------

/// The article's current position in the gate sequence, or a terminal
/// outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    PendingMarketing,
    PendingBranding,
    PendingVoc,
    PendingSocL1,
    PendingSocL3,
    PendingCompliance,
    PendingCiso,
    Approved,
    Rejected,
    Released,
}

impl ApprovalStatus {
    /// Return the status token as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingMarketing => "pending_marketing",
            Self::PendingBranding => "pending_branding",
            Self::PendingVoc => "pending_voc",
            Self::PendingSocL1 => "pending_soc_l1",
            Self::PendingSocL3 => "pending_soc_l3",
            Self::PendingCompliance => "pending_compliance",
            Self::PendingCiso => "pending_ciso",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Released => "released",
        }
    }

    /// Parse a status token. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending_marketing" => Some(Self::PendingMarketing),
            "pending_branding" => Some(Self::PendingBranding),
            "pending_voc" => Some(Self::PendingVoc),
            "pending_soc_l1" => Some(Self::PendingSocL1),
            "pending_soc_l3" => Some(Self::PendingSocL3),
            "pending_compliance" => Some(Self::PendingCompliance),
            "pending_ciso" => Some(Self::PendingCiso),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "released" => Some(Self::Released),
            _ => None,
        }
    }

    /// The gate currently awaiting action, or `None` for `approved`,
    /// `rejected`, and `released`.
    pub fn gate(&self) -> Option<ApprovalGate> {
        match self {
            Self::PendingMarketing => Some(ApprovalGate::Marketing),
            Self::PendingBranding => Some(ApprovalGate::Branding),
            Self::PendingVoc => Some(ApprovalGate::Voc),
            Self::PendingSocL1 => Some(ApprovalGate::SocL1),
            Self::PendingSocL3 => Some(ApprovalGate::SocL3),
            Self::PendingCompliance => Some(ApprovalGate::Compliance),
            Self::PendingCiso => Some(ApprovalGate::Ciso),
            Self::Approved | Self::Rejected | Self::Released => None,
        }
    }

    /// True while the article is awaiting any gate.
    pub fn is_pending(&self) -> bool {
        self.gate().is_some()
    }

    /// True iff every gate has been passed but the article has not yet
    /// been released.
    pub fn is_ready_for_release(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// True for the two end states no client action can leave.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released | Self::Rejected)
    }

    /// The status that results from approving the current gate.
    ///
    /// Passing the final (`ciso`) gate yields [`ApprovalStatus::Approved`].
    /// Approving from a non-pending status is an error.
    pub fn next_on_approve(&self) -> Result<ApprovalStatus, CoreError> {
        match self {
            Self::PendingMarketing => Ok(Self::PendingBranding),
            Self::PendingBranding => Ok(Self::PendingVoc),
            Self::PendingVoc => Ok(Self::PendingSocL1),
            Self::PendingSocL1 => Ok(Self::PendingSocL3),
            Self::PendingSocL3 => Ok(Self::PendingCompliance),
            Self::PendingCompliance => Ok(Self::PendingCiso),
            Self::PendingCiso => Ok(Self::Approved),
            Self::Approved | Self::Rejected | Self::Released => {
                Err(CoreError::Validation(format!(
                    "cannot approve from status: {}",
                    self.as_str()
                )))
            }
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a status transition is one the workflow permits.
///
/// - Rejection is allowed from any pending status.
/// - Reset (back to `pending_marketing`) is allowed only from `rejected`.
/// - Release is allowed only from `approved`.
/// - Otherwise only the single forward step of [`ApprovalStatus::next_on_approve`].
pub fn transition_valid(from: ApprovalStatus, to: ApprovalStatus) -> bool {
    if to == ApprovalStatus::Rejected {
        return from.is_pending();
    }

    if to == ApprovalStatus::PendingMarketing {
        return from == ApprovalStatus::Rejected;
    }

    if to == ApprovalStatus::Released {
        return from == ApprovalStatus::Approved;
    }

    match from.next_on_approve() {
        Ok(next) => to == next,
        Err(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Approval Progress
// ---------------------------------------------------------------------------

/// Derived progress through the gate sequence.
///
/// Always recomputed from the article's status (and, when available, its
/// approval history); never stored as independent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalProgress {
    pub completed_gates: Vec<ApprovalGate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_gate: Option<ApprovalGate>,
    pub pending_gates: Vec<ApprovalGate>,
    pub total_gates: usize,
    pub completed_count: usize,
}

impl ApprovalProgress {
    /// Build progress from the status plus the set of gates with a recorded
    /// approval event.
    ///
    /// Walks [`GATE_ORDER`]: recorded gates are completed, the first
    /// unrecorded gate is current while the status is still pending, and
    /// the remainder are pending. A rejected article has no current gate.
    pub fn build(status: ApprovalStatus, completed: &[ApprovalGate]) -> Self {
        let mut completed_gates = Vec::new();
        let mut pending_gates = Vec::new();
        let mut current_gate = None;

        for gate in GATE_ORDER {
            if completed.contains(&gate) {
                completed_gates.push(gate);
            } else if current_gate.is_none() && status.is_pending() {
                current_gate = Some(gate);
            } else {
                pending_gates.push(gate);
            }
        }

        let completed_count = completed_gates.len();
        Self {
            completed_gates,
            current_gate,
            pending_gates,
            total_gates: GATE_ORDER.len(),
            completed_count,
        }
    }

    /// Build progress from the status alone.
    ///
    /// Without the approval history the completed set is inferred from the
    /// status: every gate before the awaiting one for pending statuses, all
    /// gates for `approved`/`released`, and none for `rejected` (the history
    /// is the only record of how far a rejected article got).
    pub fn from_status(status: ApprovalStatus) -> Self {
        let completed: Vec<ApprovalGate> = match status.gate() {
            Some(gate) => GATE_ORDER[..gate.position()].to_vec(),
            None => match status {
                ApprovalStatus::Approved | ApprovalStatus::Released => GATE_ORDER.to_vec(),
                _ => Vec::new(),
            },
        };
        Self::build(status, &completed)
    }

    /// Fraction of gates passed, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total_gates == 0 {
            return 0.0;
        }
        self.completed_count as f64 / self.total_gates as f64
    }
}
