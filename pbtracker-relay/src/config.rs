use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Listen port when neither flag, env, nor config file says otherwise
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub claude: ClaudeSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaudeSection {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Deadline for the single outbound call; the only cancellation
    /// mechanism the relay has
    pub timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl Default for ClaudeSection {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-20241022".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerSection::default(),
            claude: ClaudeSection::default(),
        }
    }
}

/// Load the TOML config. An explicit path must exist; without one, a
/// `relay.toml` next to the binary is used when present, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let fallback = Path::new("relay.toml");
            if !fallback.exists() {
                return Ok(Config::default());
            }
            fallback.to_path_buf()
        }
    };
    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

/// The provider key is only ever read from the environment, never from a
/// config file on disk. Missing key fails startup.
pub fn api_key_from_env() -> Result<String> {
    std::env::var("CLAUDE_API_KEY").context("CLAUDE_API_KEY environment variable is required")
}

/// Optional PORT override, the usual hosting-platform contract
pub fn port_from_env() -> Option<u16> {
    std::env::var("PORT").ok()?.parse().ok()
}
