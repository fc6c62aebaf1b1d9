use color_eyre::Result;
use org_directory_tui::config::database_url;
use org_directory_tui::db::{create_database_pool, queries, seed_demo_data};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Honours DATABASE_NAME from .env like the main binary
    dotenv::dotenv().ok();
    let database_url = database_url()?;
    println!("Seeding {database_url}...");

    let pool = create_database_pool(&database_url).await?;
    let inserted = seed_demo_data(&pool).await?;
    let total = queries::count_organizations(&pool).await?;

    if inserted == 0 {
        println!("Database already populated ({total} organizations)");
    } else {
        println!("Inserted {inserted} organizations");
    }

    for record in queries::list_organizations(&pool).await? {
        println!(
            "{:>3}. {} ({:.2})",
            record.ranking, record.name, record.avg_score
        );
    }

    Ok(())
}
