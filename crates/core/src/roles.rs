//! User roles and their approval authority.
//!
//! Roles arrive with the authenticated session and are immutable for its
//! duration. Each reviewer role owns exactly one gate; `admin` and
//! `super_admin` override every gate and are the only roles that may
//! release or reset an article. The mapping here mirrors the server's
//! authorization policy and gates UI affordances only; the server remains
//! the enforcement point.

use serde::{Deserialize, Serialize};

use crate::approval::ApprovalGate;

/// Role tag attached to the authenticated user. Wire values are exact and
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
    Analyst,
    Viewer,
    Marketing,
    Branding,
    Designer,
    VocExpert,
    #[serde(rename = "soc_level_1")]
    SocLevel1,
    #[serde(rename = "soc_level_3")]
    SocLevel3,
    ComplianceSme,
    Ciso,
    SuperAdmin,
}

/// All valid role tags.
pub const ALL_ROLES: [UserRole; 13] = [
    UserRole::User,
    UserRole::Admin,
    UserRole::Analyst,
    UserRole::Viewer,
    UserRole::Marketing,
    UserRole::Branding,
    UserRole::Designer,
    UserRole::VocExpert,
    UserRole::SocLevel1,
    UserRole::SocLevel3,
    UserRole::ComplianceSme,
    UserRole::Ciso,
    UserRole::SuperAdmin,
];

impl UserRole {
    /// Return the role tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Analyst => "analyst",
            Self::Viewer => "viewer",
            Self::Marketing => "marketing",
            Self::Branding => "branding",
            Self::Designer => "designer",
            Self::VocExpert => "voc_expert",
            Self::SocLevel1 => "soc_level_1",
            Self::SocLevel3 => "soc_level_3",
            Self::ComplianceSme => "compliance_sme",
            Self::Ciso => "ciso",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Parse a role tag. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        ALL_ROLES.into_iter().find(|r| r.as_str() == s)
    }

    /// True for the roles that bypass gate ownership entirely.
    pub fn is_override(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// The single gate this role is authorized to approve or reject.
    ///
    /// `None` for roles with no reviewing duties and for the override
    /// roles, which act on whatever gate is current instead of owning one.
    /// `designer` shares the branding gate with `branding`.
    pub fn target_gate(&self) -> Option<ApprovalGate> {
        match self {
            Self::Marketing => Some(ApprovalGate::Marketing),
            Self::Branding | Self::Designer => Some(ApprovalGate::Branding),
            Self::VocExpert => Some(ApprovalGate::Voc),
            Self::SocLevel1 => Some(ApprovalGate::SocL1),
            Self::SocLevel3 => Some(ApprovalGate::SocL3),
            Self::ComplianceSme => Some(ApprovalGate::Compliance),
            Self::Ciso => Some(ApprovalGate::Ciso),
            Self::User | Self::Analyst | Self::Viewer | Self::Admin | Self::SuperAdmin => None,
        }
    }

    /// Whether this role may approve (or reject) the given gate.
    pub fn can_approve_gate(&self, gate: ApprovalGate) -> bool {
        self.is_override() || self.target_gate() == Some(gate)
    }

    /// Whether this role may release a fully approved article.
    pub fn can_release(&self) -> bool {
        self.is_override()
    }

    /// Whether this role may reset a rejected article back into the
    /// pipeline.
    pub fn can_reset(&self) -> bool {
        self.is_override()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approval::GATE_ORDER;

    #[test]
    fn role_wire_tags_round_trip() {
        for role in ALL_ROLES {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("root"), None);
    }

    #[test]
    fn soc_level_tags_keep_their_underscores() {
        assert_eq!(UserRole::SocLevel1.as_str(), "soc_level_1");
        assert_eq!(UserRole::SocLevel3.as_str(), "soc_level_3");
        let json = serde_json::to_string(&UserRole::SocLevel1).unwrap();
        assert_eq!(json, "\"soc_level_1\"");
    }

    #[test]
    fn every_gate_has_an_owning_role() {
        for gate in GATE_ORDER {
            assert!(
                ALL_ROLES
                    .into_iter()
                    .any(|r| !r.is_override() && r.target_gate() == Some(gate)),
                "gate {gate} has no owner"
            );
        }
    }

    #[test]
    fn non_owners_cannot_approve_foreign_gates() {
        for role in ALL_ROLES {
            if role.is_override() {
                continue;
            }
            for gate in GATE_ORDER {
                if role.target_gate() != Some(gate) {
                    assert!(
                        !role.can_approve_gate(gate),
                        "{role} should not approve {gate}"
                    );
                }
            }
        }
    }

    #[test]
    fn override_roles_approve_every_gate() {
        for gate in GATE_ORDER {
            assert!(UserRole::Admin.can_approve_gate(gate));
            assert!(UserRole::SuperAdmin.can_approve_gate(gate));
        }
    }

    #[test]
    fn designer_shares_the_branding_gate() {
        assert!(UserRole::Designer.can_approve_gate(ApprovalGate::Branding));
        assert!(UserRole::Branding.can_approve_gate(ApprovalGate::Branding));
        assert!(!UserRole::Designer.can_approve_gate(ApprovalGate::Marketing));
    }

    #[test]
    fn only_override_roles_release_and_reset() {
        for role in ALL_ROLES {
            assert_eq!(role.can_release(), role.is_override());
            assert_eq!(role.can_reset(), role.is_override());
        }
        // ciso in particular: its authority ends at its own gate.
        assert!(!UserRole::Ciso.can_release());
    }

    #[test]
    fn spectator_roles_own_no_gate() {
        assert_eq!(UserRole::User.target_gate(), None);
        assert_eq!(UserRole::Analyst.target_gate(), None);
        assert_eq!(UserRole::Viewer.target_gate(), None);
    }
}
