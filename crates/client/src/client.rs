//! REST client for the dashboard API.
//!
//! All endpoints live under `/api/v1`. List fetches carry the query string
//! produced by [`ArticleFilters::to_query`]; approval actions POST to
//! per-article endpoints and return the updated article snapshot. Failures
//! never mutate caller state: a non-2xx response surfaces as
//! [`ClientError::Api`] (or [`ClientError::NotFound`]) and the caller keeps
//! whatever it was displaying. No retries are attempted.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use aci_core::article::{Article, ArticleApproval, ArticleStatus};
use aci_core::filters::ArticleFilters;
use aci_core::permissions::ArticlePermissions;
use aci_core::roles::UserRole;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::response::{ActionResponse, DataEnvelope, Page};

/// Maximum length of the optional approval note.
pub const MAX_APPROVE_NOTES_LEN: usize = 1_000;

/// Bounds on the mandatory rejection reason.
pub const MIN_REJECT_REASON_LEN: usize = 10;
pub const MAX_REJECT_REASON_LEN: usize = 2_000;

#[derive(Debug, Serialize)]
struct ApproveRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct RejectRequest<'a> {
    reason: &'a str,
}

/// HTTP client for the dashboard API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration, applying the request timeout.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn list_url(&self, path: &str, filters: &ArticleFilters) -> String {
        let query = filters.to_query();
        if query.is_empty() {
            self.endpoint(path)
        } else {
            format!("{}?{}", self.endpoint(path), query)
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Fetch one page of articles matching the filters.
    ///
    /// `GET /api/v1/articles`. The query cache keys on the full
    /// filter+page tuple, so a stale in-flight page can never overwrite a
    /// newer one.
    pub async fn list_articles(&self, filters: &ArticleFilters) -> ClientResult<Page<Article>> {
        let response = self.http.get(self.list_url("/articles", filters)).send().await?;
        Self::parse_json(response).await
    }

    /// Fetch one page of the caller's approval queue.
    ///
    /// `GET /api/v1/approvals/queue`.
    pub async fn approval_queue(&self, filters: &ArticleFilters) -> ClientResult<Page<Article>> {
        let response = self
            .http
            .get(self.list_url("/approvals/queue", filters))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Fetch a single article. A 404 maps to [`ClientError::NotFound`].
    ///
    /// `GET /api/v1/articles/{id}`.
    pub async fn get_article(&self, id: Uuid) -> ClientResult<Article> {
        let response = self
            .http
            .get(self.endpoint(&format!("/articles/{id}")))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                entity: "Article",
                id,
            });
        }
        let envelope: DataEnvelope<Article> = Self::parse_json(response).await?;
        Ok(envelope.data)
    }

    /// Fetch the approval history feed for an article.
    ///
    /// `GET /api/v1/articles/{id}/approval-history`.
    pub async fn approval_history(&self, id: Uuid) -> ClientResult<Vec<ArticleApproval>> {
        let response = self
            .http
            .get(self.endpoint(&format!("/articles/{id}/approval-history")))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                entity: "Article",
                id,
            });
        }
        let envelope: DataEnvelope<Vec<ArticleApproval>> = Self::parse_json(response).await?;
        Ok(envelope.data)
    }

    // -----------------------------------------------------------------------
    // Approval actions
    // -----------------------------------------------------------------------

    /// Approve the article at its current gate.
    ///
    /// `POST /api/v1/articles/{id}/approve` with an optional note. The
    /// permission check runs first: an illegal action returns
    /// [`ClientError::Forbidden`] without issuing a request.
    pub async fn approve(
        &self,
        role: UserRole,
        article: &ArticleStatus,
        notes: Option<&str>,
    ) -> ClientResult<ActionResponse> {
        let permissions =
            ArticlePermissions::for_status(role, article.approval_status, article.rejected);
        if !permissions.can_approve {
            return Err(self.refuse(role, article, "approve"));
        }
        if let Some(notes) = notes {
            if notes.len() > MAX_APPROVE_NOTES_LEN {
                return Err(ClientError::Validation(format!(
                    "notes cannot exceed {MAX_APPROVE_NOTES_LEN} characters"
                )));
            }
        }

        let response = self
            .http
            .post(self.endpoint(&format!("/articles/{}/approve", article.id)))
            .json(&ApproveRequest { notes })
            .send()
            .await?;
        let action = self.parse_action(response, article.id).await?;

        tracing::info!(
            article_id = %article.id,
            role = role.as_str(),
            status = action.article.approval_status.as_str(),
            "Article approved"
        );
        Ok(action)
    }

    /// Reject the article at its current gate with a mandatory reason.
    ///
    /// `POST /api/v1/articles/{id}/reject`.
    pub async fn reject(
        &self,
        role: UserRole,
        article: &ArticleStatus,
        reason: &str,
    ) -> ClientResult<ActionResponse> {
        let permissions =
            ArticlePermissions::for_status(role, article.approval_status, article.rejected);
        if !permissions.can_reject {
            return Err(self.refuse(role, article, "reject"));
        }
        if reason.len() < MIN_REJECT_REASON_LEN || reason.len() > MAX_REJECT_REASON_LEN {
            return Err(ClientError::Validation(format!(
                "rejection reason must be {MIN_REJECT_REASON_LEN}-{MAX_REJECT_REASON_LEN} characters"
            )));
        }

        let response = self
            .http
            .post(self.endpoint(&format!("/articles/{}/reject", article.id)))
            .json(&RejectRequest { reason })
            .send()
            .await?;
        let action = self.parse_action(response, article.id).await?;

        tracing::info!(
            article_id = %article.id,
            role = role.as_str(),
            "Article rejected"
        );
        Ok(action)
    }

    /// Release a fully approved article.
    ///
    /// `POST /api/v1/articles/{id}/release`.
    pub async fn release(
        &self,
        role: UserRole,
        article: &ArticleStatus,
    ) -> ClientResult<ActionResponse> {
        let permissions =
            ArticlePermissions::for_status(role, article.approval_status, article.rejected);
        if !permissions.can_release {
            return Err(self.refuse(role, article, "release"));
        }

        let response = self
            .http
            .post(self.endpoint(&format!("/articles/{}/release", article.id)))
            .send()
            .await?;
        let action = self.parse_action(response, article.id).await?;

        tracing::info!(
            article_id = %article.id,
            role = role.as_str(),
            "Article released"
        );
        Ok(action)
    }

    /// Reset a rejected article back to the start of the pipeline.
    ///
    /// `POST /api/v1/articles/{id}/reset`.
    pub async fn reset(
        &self,
        role: UserRole,
        article: &ArticleStatus,
    ) -> ClientResult<ActionResponse> {
        let permissions =
            ArticlePermissions::for_status(role, article.approval_status, article.rejected);
        if !permissions.can_reset {
            return Err(self.refuse(role, article, "reset"));
        }

        let response = self
            .http
            .post(self.endpoint(&format!("/articles/{}/reset", article.id)))
            .send()
            .await?;
        let action = self.parse_action(response, article.id).await?;

        tracing::info!(
            article_id = %article.id,
            role = role.as_str(),
            "Article reset to start of pipeline"
        );
        Ok(action)
    }

    // -----------------------------------------------------------------------
    // Response handling
    // -----------------------------------------------------------------------

    fn refuse(&self, role: UserRole, article: &ArticleStatus, action: &str) -> ClientError {
        tracing::warn!(
            article_id = %article.id,
            role = role.as_str(),
            status = article.approval_status.as_str(),
            action,
            "Refusing illegal approval action before network call"
        );
        ClientError::Forbidden(format!(
            "role {role} cannot {action} an article in status {}",
            article.approval_status
        ))
    }

    async fn parse_action(
        &self,
        response: reqwest::Response,
        article_id: Uuid,
    ) -> ClientResult<ActionResponse> {
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                entity: "Article",
                id: article_id,
            });
        }
        Self::parse_json(response).await
    }

    /// Decode a 2xx response as JSON, or classify a non-2xx response into
    /// [`ClientError::Api`] with the server's error message when one is
    /// present in the body.
    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            })
        }
    }
}

/// Pull the human-readable message out of an error body, falling back to
/// the raw body when it is not the expected JSON shape.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let client =
            ApiClient::with_client(reqwest::Client::new(), "http://localhost:8080/");
        assert_eq!(
            client.endpoint("/articles"),
            "http://localhost:8080/api/v1/articles"
        );
    }

    #[test]
    fn list_url_appends_filter_query() {
        let client = ApiClient::with_client(reqwest::Client::new(), "http://localhost:8080");
        let filters = ArticleFilters {
            severity: Some(vec!["critical".to_string()]),
            page: 2,
            ..Default::default()
        };
        assert_eq!(
            client.list_url("/articles", &filters),
            "http://localhost:8080/api/v1/articles?severity=critical&page=2"
        );
    }

    #[test]
    fn list_url_omits_question_mark_when_unfiltered() {
        let client = ApiClient::with_client(reqwest::Client::new(), "http://localhost:8080");
        let filters = ArticleFilters::default();
        assert_eq!(
            client.list_url("/articles", &filters),
            "http://localhost:8080/api/v1/articles"
        );
    }

    #[test]
    fn error_message_extraction_prefers_json_fields() {
        assert_eq!(
            extract_error_message(r#"{"error":"Invalid approval gate"}"#),
            "Invalid approval gate"
        );
        assert_eq!(
            extract_error_message(r#"{"message":"nope"}"#),
            "nope"
        );
        assert_eq!(extract_error_message("plain text"), "plain text");
    }
}
