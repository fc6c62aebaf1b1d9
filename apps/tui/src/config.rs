use color_eyre::eyre::eyre;
use dotenv::dotenv;
use org_directory_core::directory::PageSize;
use reqwest::Url;
use std::env;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:8000/";
const DEFAULT_DATABASE_NAME: &str = "organizations.db";
const DEFAULT_LOG_FILE: &str = "org-directory.log";

/// Where lookup tables, details and scores come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http { base_url: Url },
    Sqlite { database_url: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: DataSource,
    /// JSON file holding the organization list; replaces the embedded page data.
    pub payload_path: Option<PathBuf>,
    pub page_size: PageSize,
    /// Address the directory is opened at; its `page` parameter picks the first page.
    pub start_url: Url,
    pub log_file: PathBuf,
    pub debug: bool,
    /// `DIRECTORY_PAGE_SIZE` value that was replaced by the default.
    pub rejected_page_size: Option<String>,
}

impl AppConfig {
    /// Resolves the configuration from `.env` and the process environment.
    pub fn from_env() -> color_eyre::eyre::Result<Self> {
        // Load environment variables from .env file
        dotenv().ok();

        let api_url =
            env::var("DIRECTORY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let base_url = parse_url(&api_url)?;

        let start_url = match env::var("DIRECTORY_START_URL") {
            Ok(raw) => base_url
                .join(&raw)
                .map_err(|e| eyre!("Invalid start URL {raw}: {e}"))?,
            Err(_) => base_url.clone(),
        };

        let source = if flag_set("DIRECTORY_OFFLINE") {
            DataSource::Sqlite {
                database_url: database_url()?,
            }
        } else {
            DataSource::Http { base_url }
        };

        let (page_size, rejected_page_size) =
            match parse_page_size(env::var("DIRECTORY_PAGE_SIZE").ok().as_deref()) {
                Ok(size) => (size, None),
                Err(raw) => (PageSize::default(), Some(raw)),
            };

        Ok(Self {
            source,
            payload_path: env::var("DIRECTORY_PAYLOAD").ok().map(PathBuf::from),
            page_size,
            start_url,
            log_file: env::var("DIRECTORY_LOG_FILE")
                .map_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
            debug: flag_set("DEBUG"),
            rejected_page_size,
        })
    }

    /// Logs settings that fell back to defaults. Call once logging is up.
    pub fn warn_rejected(&self) {
        if let Some(raw) = &self.rejected_page_size {
            tracing::warn!("Ignoring invalid DIRECTORY_PAGE_SIZE {raw:?}, using the default");
        }
    }
}

fn parse_url(raw: &str) -> color_eyre::eyre::Result<Url> {
    Url::parse(raw).map_err(|e| eyre!("Invalid API URL {raw}: {e}"))
}

fn flag_set(name: &str) -> bool {
    env::var(name).is_ok_and(|value| is_truthy(&value))
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes")
}

/// Unset means the default size; a value that is not a positive integer
/// comes back as the error.
fn parse_page_size(raw: Option<&str>) -> Result<PageSize, String> {
    let Some(raw) = raw else {
        return Ok(PageSize::default());
    };

    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(PageSize::try_from_usize)
        .ok_or_else(|| raw.to_string())
}

/// Builds the SQLx URL for the offline database, relative to the current directory.
pub fn database_url() -> color_eyre::eyre::Result<String> {
    let base_dir: PathBuf = env::current_dir()?;
    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());
    let database_path = base_dir.join(&db_name);

    if let Some(parent) = database_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;

    // SQLx wants three slashes for absolute paths and two for relative ones
    let clean_path = path_str.trim_start_matches('/');
    if database_path.is_absolute() {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[test]
    fn flags_accept_common_spellings() {
        assert!(is_truthy("true"));
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn invalid_page_sizes_are_handed_back() {
        assert_eq!(parse_page_size(None), Ok(PageSize::default()));
        assert_eq!(
            parse_page_size(Some(" 25 ")),
            Ok(PageSize::try_from_usize(25).unwrap())
        );
        assert_eq!(parse_page_size(Some("0")), Err("0".to_string()));
        assert_eq!(parse_page_size(Some("lots")), Err("lots".to_string()));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_page_size_is_logged_after_startup() {
        let config = AppConfig {
            source: DataSource::Http {
                base_url: parse_url(DEFAULT_API_URL).unwrap(),
            },
            payload_path: None,
            page_size: PageSize::default(),
            start_url: parse_url(DEFAULT_API_URL).unwrap(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
            rejected_page_size: parse_page_size(Some("0")).err(),
        };

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || config.warn_rejected());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Ignoring invalid DIRECTORY_PAGE_SIZE \"0\""));
    }

    #[test]
    fn relative_paths_join_against_the_api_origin() {
        let base = parse_url("http://localhost:8000/").unwrap();
        let start = base.join("/?page=3").unwrap();
        assert_eq!(start.as_str(), "http://localhost:8000/?page=3");
        assert!(parse_url("not a url").is_err());
    }
}
