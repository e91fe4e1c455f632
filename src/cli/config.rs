use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use rbac_console::constants::{DEFAULT_IDENTITY_TIMEOUT_SECS, DEFAULT_PROFILE};
use serde::{Deserialize, Serialize};
use tokio::fs::{create_dir_all, read_to_string, write};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(skip_serializing, skip_deserializing)]
    pub config_path: PathBuf,

    #[serde(rename = "current-profile")]
    pub current_profile: String,

    /// How long to wait for the identity endpoint, e.g. "10s" or "1m 30s".
    #[serde(rename = "identity-timeout", skip_serializing_if = "Option::is_none")]
    pub identity_timeout: Option<String>,

    #[serde(rename = "profile", default)]
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    #[serde(rename = "api-url")]
    pub api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Route the user was sent away from before logging in.
    #[serde(rename = "return-to", skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
}

impl Profile {
    pub fn new(name: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_url: api_url.into(),
            token: None,
            return_to: None,
        }
    }
}

impl Config {
    pub fn get_profile(&self, name: &str) -> Result<Profile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| anyhow!("Profile {} not found", name))
    }

    pub fn get_current_profile(&self) -> Result<Profile> {
        self.get_profile(&self.current_profile)
    }

    pub fn profile_mut(&mut self, name: &str) -> Result<&mut Profile> {
        self.profiles
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| anyhow!("Profile {} not found", name))
    }

    /// Adds the profile or replaces its api url, keeping any stored token.
    pub fn upsert_profile(&mut self, name: &str, api_url: &str) {
        match self.profiles.iter_mut().find(|p| p.name == name) {
            Some(profile) => {
                if profile.api_url != api_url {
                    profile.api_url = api_url.to_string();
                    profile.token = None;
                }
            }
            None => self.profiles.push(Profile::new(name, api_url)),
        }
    }

    pub fn identity_timeout(&self) -> Result<Duration> {
        match &self.identity_timeout {
            Some(timeout) => humantime::parse_duration(timeout)
                .with_context(|| format!("Invalid identity-timeout '{}' in config", timeout)),
            None => Ok(Duration::from_secs(DEFAULT_IDENTITY_TIMEOUT_SECS)),
        }
    }

    /// The profile to act on: an explicit override, else the current one.
    pub fn resolve_profile_name(&self, requested: Option<&str>) -> Result<String> {
        if self.profiles.is_empty() && requested.is_none() {
            bail!(
                "No profiles found in config. Please make sure you have configured your CLI with `rbac login`"
            );
        }

        let name = requested.unwrap_or(&self.current_profile);
        Ok(self.get_profile(name)?.name)
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("RBAC_CONFIG") {
            PathBuf::from(path)
        } else {
            let Some(project_dirs) = directories::ProjectDirs::from("dev", "rbac", "rbac") else {
                bail!("Failed to get config dir");
            };

            let config_dir = project_dirs.config_dir();
            if !config_dir.exists() {
                create_dir_all(config_dir).await?;
            };

            config_dir.join("config.toml")
        };

        Self::load_from(config_path).await
    }

    pub async fn load_from(config_path: PathBuf) -> Result<Self> {
        if !config_path.exists() {
            let config = Self {
                config_path,
                current_profile: DEFAULT_PROFILE.to_string(),
                identity_timeout: None,
                profiles: vec![],
            };

            config.save().await?;

            Ok(config)
        } else {
            let config_str = read_to_string(&config_path).await?;
            let mut config: Self = toml::from_str(&config_str)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            config.config_path = config_path;

            Ok(config)
        }
    }

    pub async fn save(&self) -> Result<()> {
        let config_str = toml::to_string_pretty(&self)?;
        write(&self.config_path, config_str).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_config_is_created() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("config.toml");

        let config = Config::load_from(path.clone())
            .await
            .expect("failed to load config");

        assert!(path.exists());
        assert_eq!(config.current_profile, DEFAULT_PROFILE);
        assert!(config.profiles.is_empty());
        assert_eq!(
            config.identity_timeout().expect("timeout"),
            Duration::from_secs(DEFAULT_IDENTITY_TIMEOUT_SECS)
        );
    }

    #[tokio::test]
    async fn test_config_round_trip() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("config.toml");

        let mut config = Config::load_from(path.clone()).await.expect("load");
        config.upsert_profile("default", "http://localhost:8000");
        config.profile_mut("default").expect("profile").token = Some("a.b.c".to_string());
        config.identity_timeout = Some("1m 30s".to_string());
        config.save().await.expect("save");

        let raw = std::fs::read_to_string(&path).expect("read");
        assert!(raw.contains("current-profile = \"default\""));
        assert!(raw.contains("api-url = \"http://localhost:8000\""));
        assert!(!raw.contains("return-to"));

        let loaded = Config::load_from(path).await.expect("reload");
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.identity_timeout().expect("timeout"),
            Duration::from_secs(90)
        );
    }

    #[test]
    fn test_upsert_profile_drops_token_when_url_changes() {
        let mut config = Config {
            config_path: PathBuf::new(),
            current_profile: "default".to_string(),
            identity_timeout: None,
            profiles: vec![],
        };

        config.upsert_profile("default", "http://a");
        config.profile_mut("default").expect("profile").token = Some("t".to_string());

        config.upsert_profile("default", "http://a");
        assert_eq!(config.get_profile("default").expect("profile").token.as_deref(), Some("t"));

        config.upsert_profile("default", "http://b");
        let profile = config.get_profile("default").expect("profile");
        assert_eq!(profile.api_url, "http://b");
        assert_eq!(profile.token, None);
    }

    #[test]
    fn test_resolve_profile_name() {
        let mut config = Config {
            config_path: PathBuf::new(),
            current_profile: "default".to_string(),
            identity_timeout: Some("soon".to_string()),
            profiles: vec![],
        };

        assert!(config.resolve_profile_name(None).is_err());
        assert!(config.identity_timeout().is_err());

        config.upsert_profile("default", "http://a");
        config.upsert_profile("staging", "http://b");
        assert_eq!(config.resolve_profile_name(None).expect("name"), "default");
        assert_eq!(
            config.resolve_profile_name(Some("staging")).expect("name"),
            "staging"
        );
        assert!(config.resolve_profile_name(Some("prod")).is_err());
    }
}
