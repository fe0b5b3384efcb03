//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys split on `__`, e.g. `APP_EMBED__BACKEND=hash`). Every setting
//! has a default, so a missing file still yields a usable [`Settings`].

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    /// Load with `config.toml` and the env overlay resolved against `dir`.
    pub fn load_from(dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub embed: EmbedSettings,
    pub wiki: WikiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub default_top_k: usize,
    pub snippet_chars: usize,
    pub embed_batch_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self { Self { default_top_k: 5, snippet_chars: 200, embed_batch_size: 32 } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedBackend {
    /// all-MiniLM-L6-v2 through candle.
    Minilm,
    /// Deterministic feature hashing, no model files needed.
    Hash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedSettings {
    pub backend: EmbedBackend,
    pub model_dir: Option<String>,
    pub dim: usize,
    pub max_len: usize,
    /// Entries kept by the in-memory embedding cache; 0 disables it.
    pub cache_capacity: usize,
}

impl Default for EmbedSettings {
    fn default() -> Self { Self { backend: EmbedBackend::Minilm, model_dir: None, dim: 384, max_len: 256, cache_capacity: 4096 } }
}

impl EmbedSettings {
    pub fn resolved_model_dir(&self, base: &Path) -> Option<PathBuf> {
        self.model_dir.as_deref().map(|p| resolve_with_base(base, p))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiSettings {
    pub base_url: Option<String>,
    pub space_key: Option<String>,
    pub limit: usize,
}

impl Default for WikiSettings {
    fn default() -> Self { Self { base_url: None, space_key: None, limit: 100 } }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("search.default_top_k", self.search.default_top_k),
            ("search.embed_batch_size", self.search.embed_batch_size),
            ("embed.dim", self.embed.dim),
            ("embed.max_len", self.embed.max_len),
        ];
        for (key, value) in checks {
            if value == 0 { return Err(Error::InvalidConfig(format!("{} must be greater than zero", key))); }
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
