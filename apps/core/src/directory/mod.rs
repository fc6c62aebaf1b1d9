//! The directory controller: the organization list, its filtered and
//! paginated view, lookup tables and the current selection.

pub mod filter;
pub mod pagination;
pub mod state;

pub use filter::Filters;
pub use pagination::{PageSize, DEFAULT_PAGE_SIZE};
pub use state::{DirectoryState, DirectoryView, PageButton, RowView};

use crate::domain::OrgId;
use std::fmt;

/// A read-only request the front-end performs on the controller's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    FundingRoundChoices,
    RtoPolicyChoices,
    OrganizationDetail(OrgId),
    OrganizationScores(OrgId),
}

impl Endpoint {
    pub fn path(self) -> String {
        match self {
            Self::FundingRoundChoices => "/api/funding-round-choices/".to_string(),
            Self::RtoPolicyChoices => "/api/rto-policy-choices/".to_string(),
            Self::OrganizationDetail(id) => format!("/api/organizations/{id}/"),
            Self::OrganizationScores(id) => format!("/api/organizations/{id}/scores/"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::Endpoint;

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::FundingRoundChoices.path(), "/api/funding-round-choices/");
        assert_eq!(Endpoint::RtoPolicyChoices.path(), "/api/rto-policy-choices/");
        assert_eq!(Endpoint::OrganizationDetail(12).path(), "/api/organizations/12/");
        assert_eq!(
            Endpoint::OrganizationScores(12).path(),
            "/api/organizations/12/scores/"
        );
    }
}
