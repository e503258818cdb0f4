use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "LatiMed";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 60;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Default `RUST_LOG`-style filter when the env var is absent.
pub fn default_log_filter() -> &'static str {
    "info,latimed=debug"
}

/// Get the application data directory
/// ~/LatiMed/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("LatiMed")
}

/// Default location of the formulary file.
pub fn default_formulary_path() -> PathBuf {
    app_data_dir().join("formulary.json")
}

/// Errors from assembling runtime settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("LATIMED_GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("Invalid LATIMED_GEMINI_TIMEOUT_SECS value: {0:?}")]
    InvalidTimeout(String),
    #[error("Invalid LATIMED_BIND_ADDR value: {0:?}")]
    InvalidBindAddr(String),
}

/// Connection settings for the generative-AI collaborator.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// Runtime settings, assembled from `LATIMED_*` environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub gemini: GeminiSettings,
    pub formulary_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            std::env::var("LATIMED_GEMINI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        let gemini = GeminiSettings {
            base_url: env_or("LATIMED_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            api_key,
            model: env_or("LATIMED_GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            timeout_secs: match std::env::var("LATIMED_GEMINI_TIMEOUT_SECS") {
                Ok(raw) => parse_timeout(&raw)?,
                Err(_) => DEFAULT_GEMINI_TIMEOUT_SECS,
            },
        };

        let formulary_path = std::env::var("LATIMED_FORMULARY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_formulary_path());

        let bind_addr = parse_bind_addr(&env_or("LATIMED_BIND_ADDR", DEFAULT_BIND_ADDR))?;

        Ok(Self {
            gemini,
            formulary_path,
            bind_addr,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))
}

fn parse_bind_addr(raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidBindAddr(raw.to_string()))
}
