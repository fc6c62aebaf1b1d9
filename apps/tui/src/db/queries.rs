use sqlx::{query, query_as, query_scalar, SqlitePool};

use crate::db::models::{NewOrganization, OrganizationDetailRecord, OrganizationRecord, ScoreRecord};

/// Active organizations ranked by their average score, best first.
/// Organizations without scores rank last with an average of 0.
pub async fn list_organizations(pool: &SqlitePool) -> Result<Vec<OrganizationRecord>, sqlx::Error> {
    query_as::<_, OrganizationRecord>(
        "SELECT o.id, o.name,
                ROW_NUMBER() OVER (ORDER BY COALESCE(AVG(s.score), 0.0) DESC, o.name) AS ranking,
                CAST(COALESCE(AVG(s.score), 0.0) AS REAL) AS avg_score,
                o.funding_round, o.rto_policy,
                CAST(o.profile_completeness AS REAL) AS profile_completeness,
                o.accelerated_vesting
         FROM organization o
         LEFT JOIN score s ON s.organization_id = o.id
         WHERE o.status = 1
         GROUP BY o.id
         ORDER BY ranking",
    )
    .fetch_all(pool)
    .await
}

pub async fn get_organization_detail(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<OrganizationDetailRecord>, sqlx::Error> {
    query_as::<_, OrganizationDetailRecord>(
        "SELECT id, name, type, url, gives_ratings, public, accelerated_vesting, \
         funding_round, rto_policy \
         FROM organization WHERE id = ? AND status = 1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn organization_exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    query_scalar("SELECT EXISTS(SELECT 1 FROM organization WHERE id = ? AND status = 1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Average score per score type, ordered by type name
pub async fn get_organization_scores(
    pool: &SqlitePool,
    id: i64,
) -> Result<Vec<ScoreRecord>, sqlx::Error> {
    query_as::<_, ScoreRecord>(
        "SELECT t.name AS type_name, CAST(AVG(s.score) AS REAL) AS avg_score
         FROM score s
         JOIN score_type t ON t.id = s.type_id
         WHERE s.organization_id = ?
         GROUP BY t.id
         ORDER BY t.name",
    )
    .bind(id)
    .fetch_all(pool)
    .await
}

pub async fn count_organizations(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM organization WHERE status = 1")
        .fetch_one(pool)
        .await
}

/// Inserts an organization and returns its id
pub async fn insert_organization(
    pool: &SqlitePool,
    params: &NewOrganization,
) -> Result<i64, sqlx::Error> {
    let result = query(
        "INSERT INTO organization \
         (name, type, url, gives_ratings, public, funding_round, rto_policy, \
          accelerated_vesting, profile_completeness) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&params.name)
    .bind(&params.org_type)
    .bind(&params.url)
    .bind(params.gives_ratings)
    .bind(params.public)
    .bind(&params.funding_round)
    .bind(&params.rto_policy)
    .bind(params.accelerated_vesting)
    .bind(params.profile_completeness)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Returns the id of the named score type, creating it if needed
pub async fn ensure_score_type(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    query("INSERT OR IGNORE INTO score_type (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    query_scalar("SELECT id FROM score_type WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn insert_score(
    pool: &SqlitePool,
    organization_id: i64,
    type_id: i64,
    score: f64,
) -> Result<(), sqlx::Error> {
    query("INSERT INTO score (organization_id, type_id, score) VALUES (?, ?, ?)")
        .bind(organization_id)
        .bind(type_id)
        .bind(score)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    fn new_org(name: &str, vesting: bool) -> NewOrganization {
        NewOrganization {
            name: name.to_string(),
            org_type: "C".to_string(),
            url: format!("https://{}.example", name.to_lowercase()),
            gives_ratings: true,
            public: false,
            funding_round: "S".to_string(),
            rto_policy: "R".to_string(),
            accelerated_vesting: vesting,
            profile_completeness: 80.0,
        }
    }

    async fn set_organization_status(pool: &SqlitePool, id: i64, status: i64) {
        query("UPDATE organization SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await
            .unwrap();
    }

    async fn seeded() -> (SqlitePool, i64, i64, i64) {
        let pool = memory_pool().await;
        let alpha = insert_organization(&pool, &new_org("Alpha", true)).await.unwrap();
        let beta = insert_organization(&pool, &new_org("Beta", false)).await.unwrap();
        let gamma = insert_organization(&pool, &new_org("Gamma", false)).await.unwrap();

        let culture = ensure_score_type(&pool, "Culture").await.unwrap();
        let pay = ensure_score_type(&pool, "Compensation").await.unwrap();
        insert_score(&pool, alpha, culture, 3.0).await.unwrap();
        insert_score(&pool, alpha, pay, 4.0).await.unwrap();
        insert_score(&pool, beta, culture, 5.0).await.unwrap();
        insert_score(&pool, beta, culture, 4.0).await.unwrap();

        (pool, alpha, beta, gamma)
    }

    #[tokio::test]
    async fn lists_organizations_ranked_by_average_score() {
        let (pool, alpha, beta, gamma) = seeded().await;
        let rows = list_organizations(&pool).await.unwrap();

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, [beta, alpha, gamma]);
        let rankings: Vec<i64> = rows.iter().map(|row| row.ranking).collect();
        assert_eq!(rankings, [1, 2, 3]);
        assert!((rows[0].avg_score - 4.5).abs() < f64::EPSILON);
        assert!((rows[1].avg_score - 3.5).abs() < f64::EPSILON);
        assert!(rows[2].avg_score.abs() < f64::EPSILON);
        assert!(rows[1].accelerated_vesting);
        assert!((rows[0].profile_completeness - 80.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn inactive_organizations_are_hidden() {
        let (pool, alpha, _, _) = seeded().await;
        set_organization_status(&pool, alpha, 0).await;

        assert_eq!(count_organizations(&pool).await.unwrap(), 2);
        assert!(get_organization_detail(&pool, alpha).await.unwrap().is_none());
        assert!(!organization_exists(&pool, alpha).await.unwrap());
    }

    #[tokio::test]
    async fn fetches_organization_detail() {
        let (pool, alpha, _, _) = seeded().await;
        let detail = get_organization_detail(&pool, alpha).await.unwrap().unwrap();

        assert_eq!(detail.name, "Alpha");
        assert_eq!(detail.org_type, "C");
        assert_eq!(detail.url, "https://alpha.example");
        assert!(detail.gives_ratings);
        assert!(!detail.public);
        assert!(get_organization_detail(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn averages_scores_per_type() {
        let (pool, alpha, beta, gamma) = seeded().await;

        let alpha_scores = get_organization_scores(&pool, alpha).await.unwrap();
        let names: Vec<&str> = alpha_scores.iter().map(|s| s.type_name.as_str()).collect();
        assert_eq!(names, ["Compensation", "Culture"]);

        let beta_scores = get_organization_scores(&pool, beta).await.unwrap();
        assert_eq!(beta_scores.len(), 1);
        assert!((beta_scores[0].avg_score - 4.5).abs() < f64::EPSILON);

        assert!(get_organization_scores(&pool, gamma).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn score_types_are_reused() {
        let pool = memory_pool().await;
        let first = ensure_score_type(&pool, "Culture").await.unwrap();
        let second = ensure_score_type(&pool, "Culture").await.unwrap();
        assert_eq!(first, second);
    }
}
