use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const KEYWORD_PLACEHOLDER: &str = "{keyword}";

pub const DEFAULT_SEARCH_URL: &str = "https://www.amazon.com.br/s?k={keyword}";
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
pub const DEFAULT_ACCEPT_ENCODING: &str = "gzip, deflate, br, zstd";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Headers sent with every outbound search request so the request looks like
/// it came from a regular browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserHeaders {
    pub accept: String,
    pub accept_encoding: String,
    pub accept_language: String,
    pub user_agent: String,
}

impl Default for BrowserHeaders {
    fn default() -> Self {
        BrowserHeaders {
            accept: DEFAULT_ACCEPT.to_string(),
            accept_encoding: DEFAULT_ACCEPT_ENCODING.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Search URL with a `{keyword}` placeholder.
    pub search_url: String,
    pub headers: BrowserHeaders,
    /// `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            headers: BrowserHeaders::default(),
            timeout: None,
        }
    }
}

impl Config {
    /// Build the configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        let defaults = Config::default();

        let port = match env::var("SHELFSCAN_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("SHELFSCAN_PORT is not a valid port: {raw}"))?,
            Err(_) => defaults.port,
        };

        let timeout = match env::var("SHELFSCAN_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse::<u64>().with_context(|| {
                format!("SHELFSCAN_TIMEOUT_SECS is not a whole number of seconds: {raw}")
            })?)),
            Err(_) => None,
        };

        let config = Config {
            host: get_env_or_default("SHELFSCAN_HOST", &defaults.host),
            port,
            search_url: get_env_or_default("SHELFSCAN_SEARCH_URL", DEFAULT_SEARCH_URL),
            headers: BrowserHeaders {
                accept: get_env_or_default("SHELFSCAN_ACCEPT", DEFAULT_ACCEPT),
                accept_encoding: get_env_or_default(
                    "SHELFSCAN_ACCEPT_ENCODING",
                    DEFAULT_ACCEPT_ENCODING,
                ),
                accept_language: get_env_or_default(
                    "SHELFSCAN_ACCEPT_LANGUAGE",
                    DEFAULT_ACCEPT_LANGUAGE,
                ),
                user_agent: get_env_or_default("SHELFSCAN_USER_AGENT", DEFAULT_USER_AGENT),
            },
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.search_url.contains(KEYWORD_PLACEHOLDER) {
            bail!(
                "search url template must contain {KEYWORD_PLACEHOLDER}: {}",
                self.search_url
            );
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
