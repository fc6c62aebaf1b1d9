use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "org-directory", version, about = "Organization directory")]
pub struct CliArgs {
    /// Print the current page and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless page as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Read the organization list from a JSON file instead of the directory page
    #[arg(long, value_name = "FILE")]
    pub payload: Option<String>,

    /// Base URL of the directory API
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Address to open, e.g. "/?page=2"; relative to the API URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Serve lookups, details and scores from the local database
    #[arg(long)]
    pub offline: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Rows per page
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(payload) = &self.payload {
            std::env::set_var("DIRECTORY_PAYLOAD", payload);
        }
        if let Some(api_url) = &self.api_url {
            std::env::set_var("DIRECTORY_API_URL", api_url);
        }
        if let Some(url) = &self.url {
            std::env::set_var("DIRECTORY_START_URL", url);
        }
        if self.offline {
            std::env::set_var("DIRECTORY_OFFLINE", "1");
        }
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(size) = self.page_size {
            std::env::set_var("DIRECTORY_PAGE_SIZE", size.to_string());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
