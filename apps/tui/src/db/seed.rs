use sqlx::SqlitePool;
use tracing::info;

use crate::db::models::NewOrganization;
use crate::db::queries::{count_organizations, ensure_score_type, insert_organization, insert_score};

const SCORE_TYPES: [&str; 4] = ["Compensation", "Culture", "Growth", "Work-Life Balance"];

struct DemoOrganization {
    name: &'static str,
    org_type: &'static str,
    funding_round: &'static str,
    rto_policy: &'static str,
    accelerated_vesting: bool,
    gives_ratings: bool,
    profile_completeness: f64,
    scores: [f64; 4],
}

#[rustfmt::skip]
const DEMO_ORGANIZATIONS: [DemoOrganization; 8] = [
    DemoOrganization { name: "Acme Robotics", org_type: "C", funding_round: "B", rto_policy: "H", accelerated_vesting: true, gives_ratings: true, profile_completeness: 92.0, scores: [4.2, 4.6, 4.1, 3.9] },
    DemoOrganization { name: "Bluefin Analytics", org_type: "C", funding_round: "S", rto_policy: "R", accelerated_vesting: false, gives_ratings: false, profile_completeness: 64.0, scores: [3.1, 4.0, 4.4, 4.8] },
    DemoOrganization { name: "Cedar Health", org_type: "N", funding_round: "O", rto_policy: "O", accelerated_vesting: false, gives_ratings: true, profile_completeness: 78.5, scores: [2.9, 4.3, 3.2, 4.5] },
    DemoOrganization { name: "Delta Logistics", org_type: "C", funding_round: "P", rto_policy: "O", accelerated_vesting: false, gives_ratings: true, profile_completeness: 100.0, scores: [3.8, 2.7, 3.1, 2.4] },
    DemoOrganization { name: "Ember Games", org_type: "C", funding_round: "A", rto_policy: "R", accelerated_vesting: true, gives_ratings: false, profile_completeness: 55.0, scores: [3.5, 4.1, 3.9, 3.0] },
    DemoOrganization { name: "Fjord Security", org_type: "C", funding_round: "C", rto_policy: "H", accelerated_vesting: true, gives_ratings: true, profile_completeness: 87.25, scores: [4.7, 3.9, 4.2, 4.0] },
    DemoOrganization { name: "Granite Foundation", org_type: "N", funding_round: "O", rto_policy: "H", accelerated_vesting: false, gives_ratings: false, profile_completeness: 40.0, scores: [2.5, 4.8, 2.9, 4.9] },
    DemoOrganization { name: "Helix Biotech", org_type: "C", funding_round: "X", rto_policy: "O", accelerated_vesting: false, gives_ratings: true, profile_completeness: 71.0, scores: [4.4, 3.3, 4.6, 3.1] },
];

/// Fills an empty database with demo organizations and scores.
/// Returns the number of organizations inserted.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    let existing = count_organizations(pool).await?;
    if existing > 0 {
        info!("Database already holds {existing} organizations, skipping seed");
        return Ok(0);
    }

    let mut type_ids = Vec::with_capacity(SCORE_TYPES.len());
    for name in SCORE_TYPES {
        type_ids.push(ensure_score_type(pool, name).await?);
    }

    for demo in &DEMO_ORGANIZATIONS {
        let slug = demo.name.to_lowercase().replace(' ', "-");
        let id = insert_organization(
            pool,
            &NewOrganization {
                name: demo.name.to_string(),
                org_type: demo.org_type.to_string(),
                url: format!("https://{slug}.example.com"),
                gives_ratings: demo.gives_ratings,
                public: demo.funding_round == "P",
                funding_round: demo.funding_round.to_string(),
                rto_policy: demo.rto_policy.to_string(),
                accelerated_vesting: demo.accelerated_vesting,
                profile_completeness: demo.profile_completeness,
            },
        )
        .await?;

        for (type_id, score) in type_ids.iter().zip(demo.scores) {
            insert_score(pool, id, *type_id, score).await?;
        }
    }

    info!("Seeded {} organizations", DEMO_ORGANIZATIONS.len());
    Ok(DEMO_ORGANIZATIONS.len())
}
