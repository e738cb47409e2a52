use std::collections::HashMap;
use std::env;

use secrecy::SecretString;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ROOM_ID: &str = "demo-room";
pub const DEFAULT_PARTICIPANTS: &str = "participant1,participant2";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// LiveKit server used when running on Render.
pub const PLATFORM_WS_URL: &str = "wss://livekit-server-ydpb.onrender.com";
/// Local LiveKit dev server.
pub const FALLBACK_WS_URL: &str = "ws://localhost:7880";

#[derive(Debug)]
pub struct Config {
    pub api_key: String,
    pub api_secret: SecretString,
    pub ws_url: String,
    pub ws_url_source: WsUrlSource,
    pub port: u16,
    pub room_id: String,
    pub allowed_participants: Vec<String>,
    pub database_url: Option<String>,
    pub static_dir: String,
    pub log_filter: String,
}

/// Where the advertised media server endpoint came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WsUrlSource {
    Override,
    Platform,
    Fallback,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Environment variable {0} must not be empty")]
    EmptyEnvVar(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let api_key = required(vars, "LIVEKIT_API_KEY")?;
        let api_secret = SecretString::from(required(vars, "LIVEKIT_API_SECRET")?);

        let (ws_url, ws_url_source) = resolve_ws_url(vars);

        let port = match vars.get("PORT").filter(|p| !p.is_empty()) {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let room_id = vars
            .get("ROOM_ID")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ROOM_ID.to_string());
        if room_id.is_empty() {
            return Err(ConfigError::EmptyEnvVar("ROOM_ID".to_string()));
        }

        let allowed_participants = parse_list(
            vars.get("ALLOWED_PARTICIPANTS")
                .map(String::as_str)
                .unwrap_or(DEFAULT_PARTICIPANTS),
        );

        let database_url = vars.get("DATABASE_URL").filter(|u| !u.is_empty()).cloned();

        let static_dir = vars
            .get("STATIC_DIR")
            .filter(|d| !d.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        let log_filter = vars
            .get("RUST_LOG")
            .filter(|f| !f.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            api_key,
            api_secret,
            ws_url,
            ws_url_source,
            port,
            room_id,
            allowed_participants,
            database_url,
            static_dir,
            log_filter,
        })
    }
}

/// Picks the media server endpoint handed to clients.
///
/// Precedence: `LIVEKIT_WS_URL`, then the hosted server when running on
/// Render, then the local dev server.
pub fn resolve_ws_url(vars: &HashMap<String, String>) -> (String, WsUrlSource) {
    if let Some(url) = vars.get("LIVEKIT_WS_URL").filter(|u| !u.is_empty()) {
        return (url.clone(), WsUrlSource::Override);
    }
    let on_platform = ["RENDER", "RENDER_EXTERNAL_HOSTNAME"]
        .iter()
        .any(|name| vars.get(*name).is_some_and(|v| !v.is_empty()));
    if on_platform {
        return (PLATFORM_WS_URL.to_string(), WsUrlSource::Platform);
    }
    (FALLBACK_WS_URL.to_string(), WsUrlSource::Fallback)
}

fn required(vars: &HashMap<String, String>, name: &str) -> Result<String, ConfigError> {
    let value = vars
        .get(name)
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;
    if value.is_empty() {
        return Err(ConfigError::EmptyEnvVar(name.to_string()));
    }
    Ok(value.clone())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
