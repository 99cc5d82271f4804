use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use board_client::normalize_base_url;
use board_core::DEFAULT_PAGE_SIZE;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_SESSION_DIR: &str = ".board_session";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub page_size: u32,
    pub session_dir: PathBuf,
    pub http_timeout_secs: u64,
    pub redirect_delay: Duration,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Читает настройки через `lookup`, чтобы тесты не трогали окружение процесса.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = normalize_base_url(
            non_blank(lookup("BOARD_API_URL")).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        );
        let page_size = parse_positive(&lookup, "BOARD_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let session_dir = non_blank(lookup("BOARD_SESSION_DIR"))
            .unwrap_or_else(|| DEFAULT_SESSION_DIR.to_string())
            .into();
        let http_timeout_secs =
            parse_positive(&lookup, "BOARD_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        let redirect_delay_ms: u64 = non_blank(lookup("BOARD_REDIRECT_DELAY_MS"))
            .unwrap_or_else(|| DEFAULT_REDIRECT_DELAY_MS.to_string())
            .parse()
            .context("Failed to parse BOARD_REDIRECT_DELAY_MS, expecting integer")?;
        let log_level = non_blank(lookup("LOG_LEVEL"))
            .or_else(|| non_blank(lookup("RUST_LOG")))
            .unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            api_url,
            page_size,
            session_dir,
            http_timeout_secs,
            redirect_delay: Duration::from_millis(redirect_delay_ms),
            log_level,
        })
    }

    /// Флаги командной строки перекрывают окружение.
    pub fn with_overrides(mut self, server: Option<String>, page_size: Option<u32>) -> Self {
        if let Some(server) = non_blank(server) {
            self.api_url = normalize_base_url(server);
        }
        if let Some(page_size) = page_size {
            self.page_size = page_size;
        }
        self
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_positive<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialEq + Default + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = non_blank(lookup(key))
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
