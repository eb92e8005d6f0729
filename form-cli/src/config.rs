use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use form_dns::{Client, DEFAULT_API_URL};
use serde::{de::DeserializeOwned, Serialize, Deserialize};

use crate::args::ParsedArgs;

pub const GLOBAL_CONFIG_FILE: &str = "config.json";
pub const AUTH_CONFIG_FILE: &str = "auth.json";
pub const LOCAL_CONFIG_FILE: &str = "form.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    pub api: Option<String>,
    pub current_team: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    pub scope: Option<String>,
}

/// Command line values that take precedence over the config files
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub token: Option<String>,
    pub scope: Option<String>,
    pub local_config: Option<PathBuf>,
    pub global_config: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn from_flags(flags: &ParsedArgs) -> Self {
        Self {
            token: flags.string("--token").map(str::to_string),
            scope: flags.string("--scope").map(str::to_string),
            local_config: flags.string("--local-config").map(PathBuf::from),
            global_config: flags.string("--global-config").map(PathBuf::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub scope: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            scope: None,
        }
    }
}

impl Config {
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let global_dir = overrides.global_config.clone().unwrap_or_else(default_global_dir);
        log::debug!("Reading global config from {}", global_dir.display());

        let global: GlobalConfig = read_optional(&global_dir.join(GLOBAL_CONFIG_FILE))?;
        let auth: AuthConfig = read_optional(&global_dir.join(AUTH_CONFIG_FILE))?;

        let local: LocalConfig = match &overrides.local_config {
            Some(path) => {
                if !path.exists() {
                    return Err(anyhow!("Couldn't find a project configuration file at {}", path.display()));
                }
                read_optional(path)?
            }
            None => read_optional(Path::new(LOCAL_CONFIG_FILE))?,
        };

        Ok(Self {
            api_url: global.api.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: overrides.token.clone().or(auth.token),
            scope: overrides.scope.clone().or(local.scope).or(global.current_team),
        })
    }

    pub fn client(&self) -> Client {
        Client::new(self.api_url.clone())
            .with_token(self.token.clone())
            .with_team(self.scope.clone())
    }
}

pub fn default_global_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".formation")
}

fn read_optional<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let bytes = std::fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Invalid JSON in {}", path.display()))
}
