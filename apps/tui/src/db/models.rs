use org_directory_core::{Organization, OrganizationDetail, ScoreDetail};
use sqlx::FromRow;

/// A ranked directory row
#[derive(Debug, FromRow, Clone)]
pub struct OrganizationRecord {
    pub id: i64,
    pub name: String,
    pub ranking: i64,
    pub avg_score: f64,
    pub funding_round: String,
    pub rto_policy: String,
    pub profile_completeness: f64,
    pub accelerated_vesting: bool, // SQLite stores booleans as integers
}

impl From<OrganizationRecord> for Organization {
    fn from(record: OrganizationRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            ranking: record.ranking,
            avg_score: record.avg_score,
            funding_round: record.funding_round,
            rto_policy: record.rto_policy,
            profile_completeness: record.profile_completeness,
            accelerated_vesting: record.accelerated_vesting,
            url: None,
            org_type: None,
            gives_ratings: None,
            public: None,
            avg_scores: None,
        }
    }
}

/// The fields the detail endpoint returns
#[derive(Debug, FromRow, Clone)]
pub struct OrganizationDetailRecord {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub org_type: String,
    pub url: String,
    pub gives_ratings: bool,
    pub public: bool,
    pub accelerated_vesting: bool,
    pub funding_round: String,
    pub rto_policy: String,
}

impl From<OrganizationDetailRecord> for OrganizationDetail {
    fn from(record: OrganizationDetailRecord) -> Self {
        Self {
            id: Some(record.id),
            name: Some(record.name),
            org_type: Some(record.org_type),
            url: Some(record.url),
            gives_ratings: Some(record.gives_ratings),
            public: Some(record.public),
            accelerated_vesting: Some(record.accelerated_vesting),
            funding_round: Some(record.funding_round),
            rto_policy: Some(record.rto_policy),
            avg_scores: None,
        }
    }
}

#[derive(Debug, FromRow, Clone)]
pub struct ScoreRecord {
    pub type_name: String,
    pub avg_score: f64,
}

impl From<ScoreRecord> for ScoreDetail {
    fn from(record: ScoreRecord) -> Self {
        Self {
            type_name: record.type_name,
            avg_score: record.avg_score,
        }
    }
}

/// Parameters for creating a new organization
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: String,
    pub org_type: String,
    pub url: String,
    pub gives_ratings: bool,
    pub public: bool,
    pub funding_round: String,
    pub rto_policy: String,
    pub accelerated_vesting: bool,
    pub profile_completeness: f64,
}
