// src/config/app.rs
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Deserialize;

use super::defaults::*;
use crate::aliases::MasterSecret;
use crate::consts::{DEFAULT_CONFIG_FILE, ENV_CONFIG_PATH, ENV_MASTER_SECRET};
use crate::error::CoreError;

type Result<T> = std::result::Result<T, CoreError>;

pub struct Config {
    pub keys: Keys,
    pub tokens: Tokens,
    pub source: ConfigSource,
}

pub struct Keys {
    pub master_secret: MasterSecret,
    pub key_version: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tokens {
    /// Maximum token age accepted on decrypt; `None` accepts any age
    pub max_age_secs: Option<u64>,
}

/// Where the master secret came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Environment,
    File(PathBuf),
    Inline,
}

/// On-disk shape. Every field is optional so env can fill the gaps.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    keys: FileKeys,
    #[serde(default = "default_tokens")]
    tokens: Tokens,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileKeys {
    master_secret: Option<String>,
    key_version: Option<u8>,
}

impl fmt::Debug for FileKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileKeys")
            .field("master_secret", &self.master_secret.as_ref().map(|_| "[REDACTED]"))
            .field("key_version", &self.key_version)
            .finish()
    }
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("master_secret", &"[REDACTED]")
            .field("key_version", &self.key_version)
            .finish()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("keys", &self.keys)
            .field("tokens", &self.tokens)
            .field("source", &self.source)
            .finish()
    }
}

impl Config {
    /// Config with only a master secret; everything else defaulted
    pub fn from_secret(master_secret: impl Into<Vec<u8>>) -> Result<Self> {
        Self::assemble(
            FileConfig::default(),
            ConfigSource::Inline,
            Some((master_secret.into(), ConfigSource::Inline)),
        )
    }

    /// Parse a TOML document. The document must carry `keys.master_secret`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file = parse_toml(content)?;
        Self::assemble(file, ConfigSource::Inline, None)
    }

    /// Resolve config from a variable lookup (normally `std::env::var`).
    ///
    /// `$APIKEY_VAULT_CONFIG` names a file that must exist; otherwise
    /// `apikey-vault.toml` is read if present. `$APIKEY_VAULT_MASTER_SECRET`
    /// overrides the file's secret.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (path, required) = match non_empty(lookup(ENV_CONFIG_PATH)) {
            Some(path) => (PathBuf::from(path), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let file = read_file(&path, required)?;
        let env_secret = non_empty(lookup(ENV_MASTER_SECRET))
            .map(|secret| (secret.into_bytes(), ConfigSource::Environment));

        let config = Self::assemble(
            file.unwrap_or_default(),
            ConfigSource::File(path),
            env_secret,
        )?;

        #[cfg(feature = "logging")]
        tracing::info!(
            source = ?config.source,
            key_version = config.keys.key_version,
            max_age_secs = ?config.tokens.max_age_secs,
            "apikey-vault config resolved"
        );

        Ok(config)
    }

    /// Token TTL as a `Duration`, if one is configured
    pub fn max_age(&self) -> Option<Duration> {
        self.tokens.max_age_secs.map(Duration::from_secs)
    }

    fn assemble(
        file: FileConfig,
        file_source: ConfigSource,
        override_secret: Option<(Vec<u8>, ConfigSource)>,
    ) -> Result<Self> {
        let key_version = file.keys.key_version.unwrap_or_else(default_key_version);

        // Env beats file
        let (secret, source) = match (override_secret, non_empty(file.keys.master_secret)) {
            (Some(overridden), _) => overridden,
            (None, Some(secret)) => (secret.into_bytes(), file_source),
            (None, None) => {
                return Err(CoreError::Configuration(format!(
                    "no master secret configured: set {ENV_MASTER_SECRET} or keys.master_secret"
                )))
            }
        };

        if secret.iter().all(u8::is_ascii_whitespace) {
            return Err(CoreError::Configuration(
                "master secret is empty".to_string(),
            ));
        }

        Ok(Self {
            keys: Keys {
                master_secret: MasterSecret::new(secret),
                key_version,
            },
            tokens: file.tokens,
            source,
        })
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load config once from the process environment.
///
/// A failed load is not cached; the caller is expected to abort startup.
pub fn load() -> Result<&'static Config> {
    CONFIG.get_or_try_init(|| Config::from_lookup(|name| std::env::var(name).ok()))
}

fn read_file(path: &Path, required: bool) -> Result<Option<FileConfig>> {
    if !path.exists() {
        if required {
            return Err(CoreError::Configuration(format!(
                "config file {} not found",
                path.display()
            )));
        }
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        CoreError::Configuration(format!("failed to read {}: {e}", path.display()))
    })?;
    parse_toml(&content).map(Some)
}

fn parse_toml(content: &str) -> Result<FileConfig> {
    toml::from_str(content)
        .map_err(|e| CoreError::Configuration(format!("invalid TOML config: {}", e.message())))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
