//! Run configuration
//!
//! Everything a run needs from its environment is resolved once, up front,
//! into a [`Config`] value:
//! - the access token (`OWNCLOUD_ACCESS_TOKEN`, else `owncloud_config.json`)
//! - the WebDAV base URL (`OWNCLOUD_BASE_URL`, else the config file, else the default)
//! - the run mode (`CI=true` selects CI mode)

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};

pub const CONFIG_FILE: &str = "owncloud_config.json";
pub const TOKEN_ENV: &str = "OWNCLOUD_ACCESS_TOKEN";
pub const BASE_URL_ENV: &str = "OWNCLOUD_BASE_URL";
pub const CI_ENV: &str = "CI";
pub const DEFAULT_BASE_URL: &str = "https://oc.embl.de/public.php/webdav";

/// Which comparison points the change set is computed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Pushed branch in CI: compare `origin/<branch>...HEAD`
    Ci,
    /// Developer checkout: unpushed commits, staged, unstaged and untracked files
    Local,
}

impl RunMode {
    pub fn label(&self) -> &'static str {
        match self {
            RunMode::Ci => "ci",
            RunMode::Local => "local",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub access_token: String,
    pub base_url: String,
    pub mode: RunMode,
}

impl Config {
    /// Resolve the configuration from the process environment
    pub fn load(config_path: &Path) -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok(), config_path)
    }

    /// Resolve the configuration from an arbitrary variable lookup.
    ///
    /// The config file is only read when the token is not in the environment.
    pub fn resolve<F>(env: F, config_path: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|value| !value.is_empty());

        let mode = if env(CI_ENV).as_deref() == Some("true") {
            RunMode::Ci
        } else {
            RunMode::Local
        };

        let (access_token, file_base_url) = match lookup(TOKEN_ENV) {
            Some(token) => (token, None),
            None => {
                if !config_path.exists() {
                    return Err(SyncError::Configuration(format!(
                        "No access token found. Set {} environment variable or create {} with 'access_token' field.",
                        TOKEN_ENV,
                        config_path.display()
                    )));
                }
                let file = read_config_file(config_path)?;
                let token = file
                    .access_token
                    .filter(|token| !token.is_empty())
                    .ok_or_else(|| {
                        SyncError::Configuration(format!(
                            "{} has no 'access_token' field",
                            config_path.display()
                        ))
                    })?;
                (token, file.base_url)
            }
        };

        let base_url = lookup(BASE_URL_ENV)
            .or(file_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Config {
            access_token,
            base_url,
            mode,
        })
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        SyncError::Configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SyncError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_token_from_environment_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"access_token": "from-file"}"#).unwrap();

        let config = Config::resolve(env_from(&[(TOKEN_ENV, "from-env")]), &path).unwrap();
        assert_eq!(config.access_token, "from-env");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.mode, RunMode::Local);
    }

    #[test]
    fn test_token_from_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{"access_token": "from-file", "base_url": "https://dav.example.org/webdav"}"#,
        )
        .unwrap();

        let config = Config::resolve(env_from(&[(TOKEN_ENV, "")]), &path).unwrap();
        assert_eq!(config.access_token, "from-file");
        assert_eq!(config.base_url, "https://dav.example.org/webdav");
    }

    #[test]
    fn test_base_url_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{"access_token": "t", "base_url": "https://file.example.org"}"#,
        )
        .unwrap();

        let config =
            Config::resolve(env_from(&[(BASE_URL_ENV, "https://env.example.org")]), &path).unwrap();
        assert_eq!(config.base_url, "https://env.example.org");
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let err = Config::resolve(env_from(&[]), &path).unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    #[test]
    fn test_config_file_without_token_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"base_url": "https://dav.example.org"}"#).unwrap();

        let err = Config::resolve(env_from(&[]), &path).unwrap_err();
        assert!(err.to_string().contains("access_token"));
    }

    #[test]
    fn test_unparsable_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "access_token = nope").unwrap();

        let err = Config::resolve(env_from(&[]), &path).unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    #[test]
    fn test_ci_mode_detection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let ci = Config::resolve(env_from(&[(TOKEN_ENV, "t"), (CI_ENV, "true")]), &path).unwrap();
        assert_eq!(ci.mode, RunMode::Ci);

        let local = Config::resolve(env_from(&[(TOKEN_ENV, "t"), (CI_ENV, "1")]), &path).unwrap();
        assert_eq!(local.mode, RunMode::Local);
    }
}
