use async_trait::async_trait;
use org_directory_core::{
    ChoiceMap, FundingRound, OrgId, Organization, OrganizationDetail, RtoPolicy, ScoreDetail,
};
use sqlx::SqlitePool;

use super::{ApiError, DirectoryApi};
use crate::db::queries;

/// Serves the directory from the local database.
#[derive(Debug, Clone)]
pub struct SqliteApi {
    pool: SqlitePool,
}

impl SqliteApi {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryApi for SqliteApi {
    async fn organization_payload(&self) -> Result<Option<String>, ApiError> {
        let organizations: Vec<Organization> = queries::list_organizations(&self.pool)
            .await?
            .into_iter()
            .map(Organization::from)
            .collect();

        Ok(Some(serde_json::to_string(&organizations)?))
    }

    async fn funding_round_choices(&self) -> Result<ChoiceMap, ApiError> {
        Ok(FundingRound::choices())
    }

    async fn rto_policy_choices(&self) -> Result<ChoiceMap, ApiError> {
        Ok(RtoPolicy::choices())
    }

    async fn organization_detail(&self, id: OrgId) -> Result<OrganizationDetail, ApiError> {
        queries::get_organization_detail(&self.pool, id)
            .await?
            .map(OrganizationDetail::from)
            .ok_or(ApiError::NotFound(id))
    }

    async fn organization_scores(&self, id: OrgId) -> Result<Vec<ScoreDetail>, ApiError> {
        if !queries::organization_exists(&self.pool, id).await? {
            return Err(ApiError::NotFound(id));
        }

        Ok(queries::get_organization_scores(&self.pool, id)
            .await?
            .into_iter()
            .map(ScoreDetail::from)
            .collect())
    }
}
