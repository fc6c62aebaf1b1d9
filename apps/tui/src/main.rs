use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use org_directory_core::bootstrap::bootstrap;
use org_directory_tui::api::{DirectoryApi, HttpApi, SqliteApi};
use org_directory_tui::app::{App, TerminalLocation};
use org_directory_tui::cli::CliArgs;
use org_directory_tui::config::{AppConfig, DataSource};
use org_directory_tui::db::create_database_pool;
use org_directory_tui::{event, logging, terminal};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = AppConfig::from_env()?;
    logging::init(&config.log_file, config.debug)?;
    config.warn_rejected();
    info!(source = ?config.source, url = %config.start_url, "starting organization directory");

    let api = connect(&config).await?;
    let payload = load_payload(&config, api.as_ref()).await?;

    // Nothing embedded means nothing to mount
    let Some(organizations) = bootstrap(payload.as_deref(), true) else {
        warn!("No organization data to display");
        eprintln!("No organization data to display; see {}", config.log_file.display());
        return Ok(());
    };

    let location = TerminalLocation::new(config.start_url.clone());
    let mut app = App::new(organizations, config.page_size, location, api);

    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup_terminal_state(true, true);

    result
}

async fn connect(config: &AppConfig) -> Result<Arc<dyn DirectoryApi>> {
    match &config.source {
        DataSource::Http { base_url } => Ok(Arc::new(
            HttpApi::new(base_url.clone(), config.start_url.clone())
                .map_err(|e| eyre!("Failed to build HTTP client: {e}"))?,
        )),
        DataSource::Sqlite { database_url } => {
            let pool = create_database_pool(database_url).await?;
            Ok(Arc::new(SqliteApi::new(pool)))
        }
    }
}

/// The organization list: a `--payload` file wins over the source's own data.
async fn load_payload(config: &AppConfig, api: &dyn DirectoryApi) -> Result<Option<String>> {
    if let Some(path) = &config.payload_path {
        let payload = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read {}: {e}", path.display()))?;
        return Ok(Some(payload));
    }

    api.organization_payload()
        .await
        .map_err(|e| eyre!("Failed to load the organization list: {e}"))
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
