/*
[INPUT]:  YAML/TOML/JSON credential file and OVH_* environment variables
[OUTPUT]: Parsed CLI configuration and a ready OVH client
[POS]:    Configuration layer - credentials and endpoint setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use ovh_api_adapter::{ClientConfig, Credentials, Endpoint, OvhClient};
use serde::{Deserialize, Serialize};

/// Prefix of the environment variables overriding the file, e.g. `OVH_CONSUMER_KEY`
const ENV_PREFIX: &str = "OVH";

/// Credentials and endpoint used by the CLI
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    /// API endpoint name, e.g. "ovh-eu"
    #[serde(default)]
    pub endpoint: Endpoint,
    /// Endpoint version; latest when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_version: Option<String>,
    /// Explicit base URL (version included), overrides `endpoint`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Application key issued when the application was registered
    #[serde(default)]
    pub application_key: String,
    /// Application secret issued with the key
    #[serde(default)]
    pub application_secret: String,
    /// Consumer key from the credential handshake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_key: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            endpoint_version: None,
            base_url: None,
            application_key: String::new(),
            application_secret: String::new(),
            consumer_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `<config dir>/ovh-api/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ovh-api").join("config.yaml"))
}

impl CliConfig {
    /// Load the file (required when given explicitly) then apply `OVH_*` overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                if let Some(default_path) = default_config_path() {
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            }
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")
    }

    /// Load a single file, without environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path).required(true))
            .build()
            .with_context(|| format!("read {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("parse {}", path.display()))
    }

    /// Record `consumer_key` in the file at `path`.
    ///
    /// An existing file keeps its other settings; a missing one is created
    /// from `loaded`, the configuration the key was requested with.
    pub fn store_consumer_key(path: &Path, loaded: &CliConfig, consumer_key: &str) -> Result<()> {
        let mut stored = if path.exists() {
            Self::from_file(path)?
        } else {
            loaded.clone()
        };
        stored.consumer_key = Some(consumer_key.to_string());
        stored.save(path)
    }

    /// Write as YAML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(self).context("failed to serialize config to YAML")?;
        std::fs::write(path, yaml)
            .with_context(|| format!("failed to write config to {}", path.display()))
    }

    pub fn credentials(&self) -> Credentials {
        let credentials = Credentials::new(&self.application_key, &self.application_secret);
        match &self.consumer_key {
            Some(consumer_key) => credentials.with_consumer_key(consumer_key),
            None => credentials,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            endpoint_version: self.endpoint_version.clone(),
            ..ClientConfig::default()
        }
    }

    pub fn build_client(&self) -> Result<OvhClient> {
        let client = match &self.base_url {
            Some(base_url) => {
                OvhClient::with_base_url(base_url, self.credentials(), self.client_config())
            }
            None => OvhClient::with_config(self.endpoint, self.credentials(), self.client_config()),
        };
        client.context("create OVH client")
    }
}
