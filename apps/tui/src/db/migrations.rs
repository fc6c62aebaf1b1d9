use color_eyre::eyre::eyre;
use color_eyre::Result;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use tracing::{debug, error, info};

/// Creates the organization, score type and score tables if they don't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // `status` 1 marks an active organization; anything else is hidden
    query(
        "CREATE TABLE IF NOT EXISTS organization (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            type TEXT NOT NULL DEFAULT 'C',
            url TEXT NOT NULL DEFAULT '',
            gives_ratings BOOLEAN NOT NULL DEFAULT FALSE,
            public BOOLEAN NOT NULL DEFAULT TRUE,
            funding_round TEXT NOT NULL DEFAULT 'P',
            rto_policy TEXT NOT NULL DEFAULT 'H',
            accelerated_vesting BOOLEAN NOT NULL DEFAULT FALSE,
            profile_completeness REAL NOT NULL DEFAULT 0,
            status INTEGER NOT NULL DEFAULT 1
        )",
    )
    .execute(pool)
    .await?;

    query(
        "CREATE TABLE IF NOT EXISTS score_type (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
    )
    .execute(pool)
    .await?;

    query(
        "CREATE TABLE IF NOT EXISTS score (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            organization_id INTEGER NOT NULL REFERENCES organization(id) ON DELETE CASCADE,
            type_id INTEGER NOT NULL REFERENCES score_type(id) ON DELETE CASCADE,
            score REAL NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    query("CREATE INDEX IF NOT EXISTS score_organization_idx ON score (organization_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Opens (and creates, if needed) the database at `database_url`
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Initializing database with URL: {database_url}");

    let db_path = extract_db_path_from_url(database_url).map_err(|e| {
        error!("Error extracting database path: {e}");
        eyre!("Invalid database URL format: {e}")
    })?;
    debug!("Extracted database path: {db_path}");

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {}", parent.display());
            std::fs::create_dir_all(parent)
                .map_err(|e| eyre!("Failed to create database directory: {e}"))?;
        }
    }

    let db_exists = Sqlite::database_exists(database_url)
        .await
        .map_err(|e| eyre!("Error checking database: {e}"))?;

    if !db_exists {
        info!("Database does not exist, creating it now");
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| eyre!("Failed to create SQLite database: {e}"))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA foreign_keys = ON;").await?;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            eyre!("Failed to connect to SQLite database: {e}")
        })?;

    setup_database(&pool)
        .await
        .map_err(|e| eyre!("Failed to set up database schema: {e}"))?;

    info!("Database initialization completed successfully");
    Ok(pool)
}

fn extract_db_path_from_url(url: &str) -> Result<String, color_eyre::eyre::Error> {
    let Some(path_part) = url.strip_prefix("sqlite://") else {
        return Err(eyre!("Not a valid SQLite URL: {url}"));
    };

    if cfg!(windows) {
        // sqlite:///C:/path or sqlite://C:/path
        if let Some(drive_idx) = path_part.find(':') {
            if drive_idx > 0 {
                return Ok(path_part
                    .strip_prefix('/')
                    .unwrap_or(path_part)
                    .to_string());
            }
        }
    }

    if path_part.starts_with('/') {
        return Ok(format!("/{}", path_part.trim_start_matches('/')));
    }

    Ok(path_part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_paths_from_sqlite_urls() {
        assert_eq!(
            extract_db_path_from_url("sqlite:///tmp/orgs.db").unwrap(),
            "/tmp/orgs.db"
        );
        assert_eq!(
            extract_db_path_from_url("sqlite://orgs.db").unwrap(),
            "orgs.db"
        );
        assert!(extract_db_path_from_url("postgres://orgs").is_err());
    }

    #[tokio::test]
    async fn schema_setup_is_idempotent() {
        let pool = crate::db::memory_pool().await;
        setup_database(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, ["organization", "score", "score_type"]);
    }
}
