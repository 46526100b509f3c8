// File: src/config.rs
use crate::core::comments::CommentTimings;
use crate::gateway::FeedRequest;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub const ENV_API_URL: &str = "SLANGFEED_API_URL";
pub const ENV_TARGET_LANGUAGE: &str = "SLANGFEED_TARGET_LANGUAGE";
pub const ENV_TIMEOUT_MS: &str = "SLANGFEED_TIMEOUT_MS";

/// Client configuration. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub target_language: String,
    pub request_timeout_ms: u64,
    pub swipe_threshold: f32,
    pub tooltip_grace_ms: u64,
    pub success_banner_ms: u64,
    pub error_banner_ms: u64,
    pub refresh_found_banner_ms: u64,
    pub refresh_empty_banner_ms: u64,
    pub refresh_error_banner_ms: u64,
    pub typewriter_char_ms: u64,
    pub suggested_slang_count: usize,
    pub feed: FeedRequest,
    /// Directory for the persisted vocabulary. In-memory when unset.
    pub session_dir: Option<PathBuf>,
    /// Extra dictionary merged over the built-in one.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3001".to_string(),
            target_language: "English".to_string(),
            request_timeout_ms: 30_000,
            swipe_threshold: 50.0,
            tooltip_grace_ms: 150,
            success_banner_ms: 8_000,
            error_banner_ms: 5_000,
            refresh_found_banner_ms: 8_000,
            refresh_empty_banner_ms: 3_000,
            refresh_error_banner_ms: 5_000,
            typewriter_char_ms: 30,
            suggested_slang_count: 3,
            feed: FeedRequest::default(),
            session_dir: None,
            lexicon_path: None,
        }
    }
}

impl AppConfig {
    /// File (if given and readable) first, then environment overrides.
    pub fn load(path: Option<&Path>) -> Self {
        let mut config = match path {
            Some(path) => load_file_config(path),
            None => Self::default(),
        };
        config.apply_env();
        config.feed = config.feed.normalized();
        config
    }

    pub fn apply_env(&mut self) {
        if let Some(url) = var(ENV_API_URL) {
            info!("{ENV_API_URL} set, using {url}");
            self.api_base_url = url;
        }
        if let Some(language) = var(ENV_TARGET_LANGUAGE) {
            self.target_language = language;
        }
        if let Some(timeout) = try_parse(ENV_TIMEOUT_MS) {
            self.request_timeout_ms = timeout;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn comment_timings(&self) -> CommentTimings {
        CommentTimings {
            success_banner_ms: self.success_banner_ms,
            error_banner_ms: self.error_banner_ms,
            typewriter_char_ms: self.typewriter_char_ms,
        }
    }
}

pub fn load_file_config(path: &Path) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
            warn!("Invalid config {}: {e}, using defaults", path.display());
            AppConfig::default()
        }),
        Err(e) => {
            warn!("Config {} not readable: {e}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_parse<T: FromStr>(key: &str) -> Option<T>
where
    T::Err: Display,
{
    let raw = var(key)?;
    raw.parse()
        .map_err(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, ignoring");
        })
        .ok()
}
