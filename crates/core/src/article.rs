//! Article wire models.
//!
//! Shapes mirror the backend's JSON DTOs (camelCase keys). Optional fields
//! default rather than fail so one malformed record cannot take a whole
//! list view down.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::approval::{ApprovalGate, ApprovalProgress, ApprovalStatus};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Threat severity attached to an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

impl Severity {
    /// Return the severity token as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Informational => "informational",
        }
    }

    /// Rank used by the server's `severity_desc` ordering (1 = most severe).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Low => 4,
            Self::Informational => 5,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// A cybersecurity article as returned by the list and detail endpoints.
///
/// The approval fields are a cache of server state: after any successful
/// mutation the caller replaces them with what the server confirmed, never
/// advancing them locally first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cves: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vendors: Vec<String>,
    pub approval_status: ApprovalStatus,
    #[serde(default)]
    pub rejected: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_progress: Option<ApprovalProgress>,
}

impl Article {
    /// Progress through the gate sequence, derived on demand when the
    /// server response omitted it.
    pub fn progress(&self) -> ApprovalProgress {
        self.approval_progress
            .clone()
            .unwrap_or_else(|| ApprovalProgress::from_status(self.approval_status))
    }

    /// The slim snapshot of this article's approval state.
    pub fn snapshot(&self) -> ArticleStatus {
        ArticleStatus {
            id: self.id,
            approval_status: self.approval_status,
            rejected: self.rejected,
            approval_progress: self.approval_progress.clone(),
        }
    }
}

/// The slim article snapshot returned by approval action responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStatus {
    pub id: Uuid,
    pub approval_status: ApprovalStatus,
    #[serde(default)]
    pub rejected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_progress: Option<ApprovalProgress>,
}

// ---------------------------------------------------------------------------
// Approval history
// ---------------------------------------------------------------------------

/// A single approval event in an article's history feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleApproval {
    pub id: Uuid,
    pub article_id: Uuid,
    pub gate: ApprovalGate,
    pub approved_by: Uuid,
    /// Feed timestamps come from heterogeneous sources; an unparseable one
    /// degrades to `None` instead of failing the whole feed.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_email: Option<String>,
}

/// Deserialize an RFC 3339 timestamp, mapping missing, null, or malformed
/// values to `None`.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }))
}
