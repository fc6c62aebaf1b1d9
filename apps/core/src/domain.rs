use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type OrgId = i64;

/// Lookup table from a single-letter code to its display label.
pub type ChoiceMap = BTreeMap<String, String>;

/// A named sub-score shown in the detail popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    #[serde(rename = "type__name")]
    pub type_name: String,
    pub avg_score: f64,
}

/// An organization row as embedded in the page payload.
///
/// The optional fields are only present once the detail endpoint has been
/// queried (or when the server chose to embed them up front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrgId,
    pub name: String,
    pub ranking: i64,
    pub avg_score: f64,
    pub funding_round: String,
    pub rto_policy: String,
    pub profile_completeness: f64,
    pub accelerated_vesting: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub org_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gives_ratings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_scores: Option<Vec<ScoreDetail>>,
}

impl Organization {
    /// `url` and `type` together mean the detail endpoint has already been merged.
    pub const fn has_detail(&self) -> bool {
        self.url.is_some() && self.org_type.is_some()
    }

    /// Scores that can be shown without a request.
    pub fn known_scores(&self) -> Option<&[ScoreDetail]> {
        self.avg_scores
            .as_deref()
            .filter(|scores| !scores.is_empty())
    }

    pub fn matches_search(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
    }

    /// Copies every field present in `detail` onto this record.
    pub fn merge_detail(&mut self, detail: OrganizationDetail) {
        if let Some(name) = detail.name {
            self.name = name;
        }
        if let Some(funding_round) = detail.funding_round {
            self.funding_round = funding_round;
        }
        if let Some(rto_policy) = detail.rto_policy {
            self.rto_policy = rto_policy;
        }
        if let Some(accelerated_vesting) = detail.accelerated_vesting {
            self.accelerated_vesting = accelerated_vesting;
        }
        if detail.url.is_some() {
            self.url = detail.url;
        }
        if detail.org_type.is_some() {
            self.org_type = detail.org_type;
        }
        if detail.gives_ratings.is_some() {
            self.gives_ratings = detail.gives_ratings;
        }
        if detail.public.is_some() {
            self.public = detail.public;
        }
        if detail.avg_scores.is_some() {
            self.avg_scores = detail.avg_scores;
        }
    }
}

/// Partial organization returned by `GET /api/organizations/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationDetail {
    #[serde(default)]
    pub id: Option<OrgId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub org_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub gives_ratings: Option<bool>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub accelerated_vesting: Option<bool>,
    #[serde(default)]
    pub funding_round: Option<String>,
    #[serde(default)]
    pub rto_policy: Option<String>,
    #[serde(default)]
    pub avg_scores: Option<Vec<ScoreDetail>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingRound {
    Seed,
    SeriesA,
    SeriesB,
    SeriesC,
    SeriesD,
    SeriesE,
    SeriesF,
    SeriesGOrLater,
    OtherPrivate,
    Public,
}

impl FundingRound {
    pub const ALL: [Self; 10] = [
        Self::Seed,
        Self::SeriesA,
        Self::SeriesB,
        Self::SeriesC,
        Self::SeriesD,
        Self::SeriesE,
        Self::SeriesF,
        Self::SeriesGOrLater,
        Self::OtherPrivate,
        Self::Public,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seed => "S",
            Self::SeriesA => "A",
            Self::SeriesB => "B",
            Self::SeriesC => "C",
            Self::SeriesD => "D",
            Self::SeriesE => "E",
            Self::SeriesF => "F",
            Self::SeriesGOrLater => "X",
            Self::OtherPrivate => "O",
            Self::Public => "P",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|round| round.as_str() == value.trim())
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Seed => "Seed",
            Self::SeriesA => "Series A",
            Self::SeriesB => "Series B",
            Self::SeriesC => "Series C",
            Self::SeriesD => "Series D",
            Self::SeriesE => "Series E",
            Self::SeriesF => "Series F",
            Self::SeriesGOrLater => "Series G or Later",
            Self::OtherPrivate => "Other Private",
            Self::Public => "Public",
        }
    }

    pub fn choices() -> ChoiceMap {
        Self::ALL
            .into_iter()
            .map(|round| (round.as_str().to_string(), round.label().to_string()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtoPolicy {
    Remote,
    Hybrid,
    InOffice,
}

impl RtoPolicy {
    pub const ALL: [Self; 3] = [Self::Remote, Self::Hybrid, Self::InOffice];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "R",
            Self::Hybrid => "H",
            Self::InOffice => "O",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|policy| policy.as_str() == value.trim())
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::InOffice => "In-Office",
        }
    }

    pub fn choices() -> ChoiceMap {
        Self::ALL
            .into_iter()
            .map(|policy| (policy.as_str().to_string(), policy.label().to_string()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationType {
    Company,
    NonProfit,
}

impl OrganizationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "C",
            Self::NonProfit => "N",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "C" => Some(Self::Company),
            "N" => Some(Self::NonProfit),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Company => "Company (for profit)",
            Self::NonProfit => "Non-Profit Organization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Organization {
        Organization {
            id: 7,
            name: "Acme".to_string(),
            ranking: 3,
            avg_score: 4.1,
            funding_round: "S".to_string(),
            rto_policy: "R".to_string(),
            profile_completeness: 60.0,
            accelerated_vesting: false,
            url: None,
            org_type: None,
            gives_ratings: None,
            public: None,
            avg_scores: None,
        }
    }

    #[test]
    fn payload_without_detail_fields_deserializes() {
        let json = r#"{"id":1,"name":"Org 1","ranking":1,"avg_score":4.5,
            "funding_round":"S","rto_policy":"R","profile_completeness":80,
            "accelerated_vesting":true}"#;
        let org: Organization = serde_json::from_str(json).unwrap();

        assert_eq!(org.id, 1);
        assert!(org.url.is_none());
        assert!(!org.has_detail());
    }

    #[test]
    fn detail_needs_both_url_and_type() {
        let mut org = sample();
        org.url = Some("https://acme.test".to_string());
        assert!(!org.has_detail());

        org.org_type = Some("C".to_string());
        assert!(org.has_detail());
    }

    #[test]
    fn merge_only_overwrites_present_fields() {
        let mut org = sample();
        let detail: OrganizationDetail = serde_json::from_str(
            r#"{"id":7,"type":"N","url":"https://acme.test","gives_ratings":true,"public":false}"#,
        )
        .unwrap();

        org.merge_detail(detail);

        assert_eq!(org.name, "Acme");
        assert_eq!(org.funding_round, "S");
        assert_eq!(org.org_type.as_deref(), Some("N"));
        assert_eq!(org.gives_ratings, Some(true));
        assert_eq!(org.public, Some(false));
        assert!(org.has_detail());
    }

    #[test]
    fn empty_score_list_counts_as_unknown() {
        let mut org = sample();
        org.avg_scores = Some(Vec::new());
        assert!(org.known_scores().is_none());
    }

    #[test]
    fn labels_resolve_from_codes() {
        assert_eq!(FundingRound::parse("X").map(FundingRound::label), Some("Series G or Later"));
        assert_eq!(RtoPolicy::parse("O").map(RtoPolicy::label), Some("In-Office"));
        assert_eq!(
            OrganizationType::parse("C").map(OrganizationType::label),
            Some("Company (for profit)")
        );
        assert!(FundingRound::parse("Z").is_none());
        assert_eq!(FundingRound::choices().len(), 10);
        assert_eq!(RtoPolicy::choices().get("H").map(String::as_str), Some("Hybrid"));
    }
}
