//! Environment-driven configuration for the agent binary.
//!
//! All settings come from the process environment (with `.env` support in
//! `main`). Configuration problems surface here, before the core is
//! constructed; they are never a runtime `handle_intent` outcome.

use std::collections::HashSet;

use chrono::Duration;
use thiserror::Error;

use crate::kernel::core::AdmissionPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_COOLDOWN_SECS: u64 = 20;
const DEFAULT_DUPLICATE_WINDOW_SECS: u64 = 180;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more mandatory variables were absent or blank.
    #[error("missing mandatory Slack configuration: {0}")]
    Missing(String),

    /// A variable was present but unparseable.
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Everything the gateway needs, loaded once at boot.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bot token for Web API calls (`SLACK_BOT_TOKEN`).
    pub bot_token: String,
    /// Secret for inbound request signature checks (`SLACK_SIGNING_SECRET`).
    pub signing_secret: String,
    /// Allow-listed workspace ids; empty means accept any workspace.
    pub trusted_workspace_ids: HashSet<String>,
    /// Channel for the startup heartbeat, if any (`VOLITION_HOME_CHANNEL`).
    pub home_channel: Option<String>,
    /// Listen address for the HTTP gateway (`VOLITION_BIND_ADDR`).
    pub bind_addr: String,
    /// Per-user cooldown in seconds (`VOLITION_COOLDOWN_SECS`).
    pub cooldown_secs: u64,
    /// Duplicate suppression window in seconds
    /// (`VOLITION_DUPLICATE_WINDOW_SECS`).
    pub duplicate_window_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `SLACK_BOT_TOKEN`, `SLACK_SIGNING_SECRET`. Every missing
    /// key is reported in a single error so the operator fixes them in one
    /// pass.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let bot_token = require_env("SLACK_BOT_TOKEN", &mut missing);
        let signing_secret = require_env("SLACK_SIGNING_SECRET", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing.join(", ")));
        }

        let trusted_workspace_ids = std::env::var("TRUSTED_WORKSPACE_IDS")
            .map(|raw| parse_workspace_ids(&raw))
            .unwrap_or_default();

        let home_channel = std::env::var("VOLITION_HOME_CHANNEL")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let bind_addr = std::env::var("VOLITION_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let cooldown_secs = env_u64("VOLITION_COOLDOWN_SECS", DEFAULT_COOLDOWN_SECS)?;
        let duplicate_window_secs =
            env_u64("VOLITION_DUPLICATE_WINDOW_SECS", DEFAULT_DUPLICATE_WINDOW_SECS)?;

        Ok(Self {
            bot_token,
            signing_secret,
            trusted_workspace_ids,
            home_channel,
            bind_addr,
            cooldown_secs,
            duplicate_window_secs,
        })
    }

    /// The admission policy this configuration describes.
    pub fn admission_policy(&self) -> AdmissionPolicy {
        AdmissionPolicy {
            duplicate_window: Duration::seconds(self.duplicate_window_secs as i64),
            cooldown: Duration::seconds(self.cooldown_secs as i64),
            trusted_workspaces: self.trusted_workspace_ids.clone(),
        }
    }
}

/// Parse a comma-separated workspace id list, dropping blanks.
pub fn parse_workspace_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn require_env(key: &'static str, missing: &mut Vec<&'static str>) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            missing.push(key);
            String::new()
        }
    }
}

fn env_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
            key,
            message: format!("{e}"),
        }),
        Err(_) => Ok(default),
    }
}
