use crate::error::{Error, Result};
use crate::types::*;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Raw TOML configuration structure
/// This matches the config.toml file structure exactly
#[derive(Debug, Default, Deserialize, Serialize)]
struct RawConfig {
    #[serde(default)]
    wakatime: RawWakatime,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawWakatime {
    // Optional in the file: WAKATIME_API_KEY may supply it instead
    #[serde(skip_serializing_if = "Option::is_none")]
    api_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relay: Option<String>,
    #[serde(default)]
    direct: bool,
}

/// Location of the global config file: `~/.portfolio-kit/config.toml`
pub fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| Error::Environment("Could not determine home directory".to_string()))?;
    Ok(PathBuf::from(home).join(".portfolio-kit").join("config.toml"))
}

/// Load the stats config from a file, letting `WAKATIME_API_KEY` override the token.
///
/// A missing file is not an error as long as the environment supplies a token.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<StatsConfig> {
    let path = path.as_ref();
    let content = if path.exists() {
        Some(fs::read_to_string(path)?)
    } else {
        None
    };
    let env_token = std::env::var(TOKEN_ENV_VAR).ok();
    resolve_config(content.as_deref(), env_token.as_deref())
}

/// Settings exactly as saved, before any token requirement or defaults apply
#[derive(Debug, Clone, Default)]
pub struct SavedSettings {
    pub token: Option<SecretString>,
    pub api_base: Option<String>,
    pub relay: Option<String>,
    pub direct: bool,
}

impl SavedSettings {
    /// Relay requests will use: `None` in direct mode, else the saved or default relay
    pub fn effective_relay(&self) -> Option<&str> {
        if self.direct {
            None
        } else {
            Some(self.relay.as_deref().unwrap_or(DEFAULT_RELAY))
        }
    }
}

/// Read the saved settings. A missing file is `Ok(None)`; anything unreadable is an error.
pub fn read_settings<P: AsRef<Path>>(path: P) -> Result<Option<SavedSettings>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    read_settings_str(&content).map(Some)
}

/// Parse saved settings from a string. The token may be absent.
pub fn read_settings_str(content: &str) -> Result<SavedSettings> {
    let raw: RawConfig = toml::from_str(content)?;
    let wakatime = raw.wakatime;
    Ok(SavedSettings {
        token: wakatime
            .api_token
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from),
        api_base: wakatime.api_base,
        relay: wakatime.relay,
        direct: wakatime.direct,
    })
}

/// Parse config.toml from a string (useful for testing)
pub fn parse_config_str(content: &str) -> Result<StatsConfig> {
    resolve_config(Some(content), None)
}

/// Combine optional file contents with an optional environment token.
///
/// A non-blank `env_token` wins over `api_token` from the file.
pub fn resolve_config(content: Option<&str>, env_token: Option<&str>) -> Result<StatsConfig> {
    let raw: RawConfig = match content {
        Some(content) => toml::from_str(content)?,
        None => RawConfig::default(),
    };
    let wakatime = raw.wakatime;

    let token = env_token
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .or(wakatime.api_token)
        .ok_or_else(|| {
            Error::MissingCredential(format!(
                "no api_token in config and {} is not set. Run 'portfolio-kit configure'",
                TOKEN_ENV_VAR
            ))
        })?;

    let relay = if wakatime.direct {
        None
    } else {
        Some(wakatime.relay.as_deref().unwrap_or(DEFAULT_RELAY))
    };

    build_config(&token, wakatime.api_base.as_deref(), relay)
}

/// Validate individual settings into a config. `relay = None` means direct mode.
pub fn build_config(token: &str, api_base: Option<&str>, relay: Option<&str>) -> Result<StatsConfig> {
    let token = validate_token(token)?;

    let api_base = match api_base {
        Some(base) => validate_api_base(base)?,
        None => DEFAULT_API_BASE.to_string(),
    };

    let relay = relay.map(normalize_relay).transpose()?;

    Ok(StatsConfig {
        token: SecretString::from(token),
        api_base,
        relay,
    })
}

/// Write the config back out in the same schema `load_config` reads
pub fn save_config<P: AsRef<Path>>(path: P, config: &StatsConfig) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let raw = RawConfig {
        wakatime: RawWakatime {
            api_token: Some(config.token.expose_secret().to_string()),
            api_base: Some(config.api_base.clone()),
            relay: config.relay.clone(),
            direct: config.is_direct(),
        },
    };
    let contents = toml::to_string_pretty(&raw)?;
    fs::write(path, contents)?;
    Ok(())
}

fn validate_token(token: &str) -> Result<String> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::MissingCredential("api_token is empty".to_string()));
    }
    Ok(token.to_string())
}

/// The API base is a bare host plus path; `https://` is prepended when building URLs.
fn validate_api_base(base: &str) -> Result<String> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(Error::ConfigParse("Empty api_base".to_string()));
    }
    if base.contains("://") {
        return Err(Error::ConfigParse(format!(
            "api_base must not include a scheme: '{}'. Use e.g. '{}'",
            base, DEFAULT_API_BASE
        )));
    }
    Ok(base.to_string())
}

/// Relay prefixes are absolute http(s) URLs ending in exactly one `/`.
fn normalize_relay(relay: &str) -> Result<String> {
    let relay = relay.trim();
    let parsed = url::Url::parse(relay)
        .map_err(|e| Error::ConfigParse(format!("Invalid relay URL '{}': {}", relay, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::ConfigParse(format!(
            "Relay must be an http or https URL: '{}'",
            relay
        )));
    }

    Ok(format!("{}/", relay.trim_end_matches('/')))
}
