//! Sources for the directory's read-only requests.

pub mod http;
pub mod sqlite;

pub use http::HttpApi;
pub use sqlite::SqliteApi;

use async_trait::async_trait;
use org_directory_core::directory::Endpoint;
use org_directory_core::{ChoiceMap, FetchError, OrgId, OrganizationDetail, ScoreDetail};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{path} answered with status {status}")]
    Status { status: u16, path: String },
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("organization {0} not found")]
    NotFound(OrgId),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<ApiError> for FetchError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Http(e) if e.is_decode() => Self::Decode(e.to_string()),
            ApiError::Status { status, .. } => Self::Status(status),
            ApiError::NotFound(id) => Self::NotFound(id),
            ApiError::Json(e) => Self::Decode(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Everything the directory reads after start-up.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// The serialized organization list the directory page embeds, if any.
    async fn organization_payload(&self) -> Result<Option<String>, ApiError>;
    async fn funding_round_choices(&self) -> Result<ChoiceMap, ApiError>;
    async fn rto_policy_choices(&self) -> Result<ChoiceMap, ApiError>;
    async fn organization_detail(&self, id: OrgId) -> Result<OrganizationDetail, ApiError>;
    async fn organization_scores(&self, id: OrgId) -> Result<Vec<ScoreDetail>, ApiError>;
}

/// A completed request, ready to be fed back into the directory.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    FundingRoundChoices(Result<ChoiceMap, FetchError>),
    RtoPolicyChoices(Result<ChoiceMap, FetchError>),
    OrganizationDetail(OrgId, Result<OrganizationDetail, FetchError>),
    OrganizationScores(OrgId, Result<Vec<ScoreDetail>, FetchError>),
}

pub async fn perform(api: &dyn DirectoryApi, endpoint: Endpoint) -> ApiEvent {
    match endpoint {
        Endpoint::FundingRoundChoices => {
            ApiEvent::FundingRoundChoices(api.funding_round_choices().await.map_err(Into::into))
        }
        Endpoint::RtoPolicyChoices => {
            ApiEvent::RtoPolicyChoices(api.rto_policy_choices().await.map_err(Into::into))
        }
        Endpoint::OrganizationDetail(id) => ApiEvent::OrganizationDetail(
            id,
            api.organization_detail(id).await.map_err(Into::into),
        ),
        Endpoint::OrganizationScores(id) => ApiEvent::OrganizationScores(
            id,
            api.organization_scores(id).await.map_err(Into::into),
        ),
    }
}
