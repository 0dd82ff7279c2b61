//! Integration tests for the API client.
//!
//! Verifies response-envelope decoding against captured backend shapes and
//! the client-side permission gate that refuses illegal approval actions
//! before any network traffic.

use assert_matches::assert_matches;
use uuid::Uuid;

use aci_client::{ApiClient, ClientConfig, ClientError};
use aci_core::approval::ApprovalStatus;
use aci_core::article::{Article, ArticleStatus};
use aci_core::roles::UserRole;

fn snapshot(status: ApprovalStatus, rejected: bool) -> ArticleStatus {
    ArticleStatus {
        id: Uuid::new_v4(),
        approval_status: status,
        rejected,
        approval_progress: None,
    }
}

/// A client pointed at a TEST-NET address nothing listens on. Tests that
/// expect the permission gate to fire never reach the socket; if one did,
/// the request error would fail the assertion anyway.
fn unreachable_client() -> ApiClient {
    ApiClient::with_client(reqwest::Client::new(), "http://192.0.2.1:1")
}

// ---------------------------------------------------------------------------
// Permission gate: illegal actions never hit the network
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approve_refuses_wrong_role_before_network() {
    let client = unreachable_client();
    let article = snapshot(ApprovalStatus::PendingMarketing, false);

    let result = client.approve(UserRole::SocLevel1, &article, None).await;
    assert_matches!(result, Err(ClientError::Forbidden(_)));
}

#[tokio::test]
async fn approve_refuses_rejected_article_for_every_role() {
    let client = unreachable_client();
    let article = snapshot(ApprovalStatus::PendingMarketing, true);

    let result = client.approve(UserRole::Admin, &article, None).await;
    assert_matches!(result, Err(ClientError::Forbidden(_)));
}

#[tokio::test]
async fn reject_refuses_terminal_status() {
    let client = unreachable_client();
    let article = snapshot(ApprovalStatus::Released, false);

    let result = client.reject(UserRole::Admin, &article, "duplicate coverage").await;
    assert_matches!(result, Err(ClientError::Forbidden(_)));
}

#[tokio::test]
async fn release_requires_override_role() {
    let client = unreachable_client();
    let article = snapshot(ApprovalStatus::Approved, false);

    let result = client.release(UserRole::Ciso, &article).await;
    assert_matches!(result, Err(ClientError::Forbidden(_)));
}

#[tokio::test]
async fn release_requires_approved_status() {
    let client = unreachable_client();
    let article = snapshot(ApprovalStatus::PendingCiso, false);

    let result = client.release(UserRole::Admin, &article).await;
    assert_matches!(result, Err(ClientError::Forbidden(_)));
}

#[tokio::test]
async fn reset_requires_override_role_and_rejection() {
    let client = unreachable_client();

    let result = client
        .reset(UserRole::Marketing, &snapshot(ApprovalStatus::Rejected, true))
        .await;
    assert_matches!(result, Err(ClientError::Forbidden(_)));

    let result = client
        .reset(UserRole::Admin, &snapshot(ApprovalStatus::PendingVoc, false))
        .await;
    assert_matches!(result, Err(ClientError::Forbidden(_)));
}

#[tokio::test]
async fn reject_reason_length_is_validated_locally() {
    let client = unreachable_client();
    let article = snapshot(ApprovalStatus::PendingMarketing, false);

    let result = client.reject(UserRole::Marketing, &article, "too short").await;
    assert_matches!(result, Err(ClientError::Validation(_)));
}

#[tokio::test]
async fn approve_notes_length_is_validated_locally() {
    let client = unreachable_client();
    let article = snapshot(ApprovalStatus::PendingMarketing, false);
    let oversized = "x".repeat(1_001);

    let result = client
        .approve(UserRole::Marketing, &article, Some(&oversized))
        .await;
    assert_matches!(result, Err(ClientError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Envelope decoding
// ---------------------------------------------------------------------------

#[test]
fn page_envelope_decodes_backend_shape() {
    let json = serde_json::json!({
        "data": [{
            "id": "5f0f6f58-6f54-4b5a-9a3e-b5a3f6b9c2d1",
            "title": "Phishing kit resurfaces",
            "slug": "phishing-kit-resurfaces",
            "approvalStatus": "pending_branding",
            "createdAt": "2024-02-01T08:00:00Z"
        }],
        "pagination": {
            "page": 1,
            "pageSize": 20,
            "totalItems": 41,
            "totalPages": 3
        }
    });

    let page: aci_client::Page<Article> = serde_json::from_value(json).unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].approval_status, ApprovalStatus::PendingBranding);
    assert_eq!(page.pagination.total_pages, 3);
}

#[test]
fn action_envelope_decodes_server_confirmed_status() {
    let json = serde_json::json!({
        "success": true,
        "message": "Article approved successfully",
        "article": {
            "id": "5f0f6f58-6f54-4b5a-9a3e-b5a3f6b9c2d1",
            "approvalStatus": "pending_voc",
            "rejected": false
        }
    });

    let action: aci_client::ActionResponse = serde_json::from_value(json).unwrap();
    assert!(action.success);
    assert_eq!(action.article.approval_status, ApprovalStatus::PendingVoc);
}

#[test]
fn config_defaults_are_local_development_values() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.request_timeout_secs, 30);
}
