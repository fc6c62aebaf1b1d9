use crate::domain::Organization;

/// The two filter dimensions the directory exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub accelerated_vesting_only: bool,
    pub search_term: String,
}

impl Filters {
    /// Indices of the organizations that pass every active filter, in list order.
    pub fn apply(&self, organizations: &[Organization]) -> Vec<usize> {
        let needle = self.search_term.to_lowercase();

        organizations
            .iter()
            .enumerate()
            .filter(|(_, org)| !self.accelerated_vesting_only || org.accelerated_vesting)
            .filter(|(_, org)| needle.is_empty() || org.matches_search(&needle))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(id: i64, name: &str, accelerated_vesting: bool) -> Organization {
        Organization {
            id,
            name: name.to_string(),
            ranking: id,
            avg_score: 3.0,
            funding_round: "A".to_string(),
            rto_policy: "H".to_string(),
            profile_completeness: 50.0,
            accelerated_vesting,
            url: None,
            org_type: None,
            gives_ratings: None,
            public: None,
            avg_scores: None,
        }
    }

    fn fixture() -> Vec<Organization> {
        vec![
            org(1, "Northwind Traders", true),
            org(2, "Contoso", false),
            org(3, "northwind labs", false),
            org(4, "Fabrikam", true),
            org(5, "NORTHWIND HOLDINGS", true),
        ]
    }

    #[test]
    fn no_filters_keeps_everything() {
        let orgs = fixture();
        assert_eq!(Filters::default().apply(&orgs), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn search_is_case_insensitive_and_order_preserving() {
        let orgs = fixture();
        let filters = Filters {
            accelerated_vesting_only: false,
            search_term: "NorthWind".to_string(),
        };
        assert_eq!(filters.apply(&orgs), vec![0, 2, 4]);
    }

    #[test]
    fn vesting_and_search_intersect() {
        let orgs = fixture();
        let filters = Filters {
            accelerated_vesting_only: true,
            search_term: "northwind".to_string(),
        };
        assert_eq!(filters.apply(&orgs), vec![0, 4]);
    }

    #[test]
    fn vesting_alone_keeps_flagged_rows() {
        let orgs = fixture();
        let filters = Filters {
            accelerated_vesting_only: true,
            search_term: String::new(),
        };
        assert_eq!(filters.apply(&orgs), vec![0, 3, 4]);
    }

    #[test]
    fn search_matches_every_substring_of_every_name() {
        let orgs = fixture();
        for candidate in &orgs {
            let lower = candidate.name.to_lowercase();
            for start in 0..lower.len() {
                for end in start + 1..=lower.len() {
                    if !lower.is_char_boundary(start) || !lower.is_char_boundary(end) {
                        continue;
                    }
                    let term = &lower[start..end];
                    let filters = Filters {
                        accelerated_vesting_only: false,
                        search_term: term.to_uppercase(),
                    };
                    let expected: Vec<usize> = orgs
                        .iter()
                        .enumerate()
                        .filter(|(_, o)| o.name.to_lowercase().contains(term))
                        .map(|(i, _)| i)
                        .collect();
                    assert_eq!(filters.apply(&orgs), expected, "term {term:?}");
                }
            }
        }
    }
}
