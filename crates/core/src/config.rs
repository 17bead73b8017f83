//! Client configuration via `cellgate.toml`
//!
//! A [`ClientConfig`] names the coordination quorum and the ports the store
//! client needs. It is fixed once a connection manager is built; to change
//! settings, edit the file and construct a new manager.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Config file name conventionally used for cellgate settings.
pub const CONFIG_FILE_NAME: &str = "cellgate.toml";

/// Property key for the coordination quorum member list.
pub const QUORUM_PROPERTY: &str = "hbase.zookeeper.quorum";
/// Property key for the coordination service client port.
pub const CLIENT_PORT_PROPERTY: &str = "hbase.zookeeper.property.clientPort";
/// Property key for the administrative (master) port.
pub const MASTER_PORT_PROPERTY: &str = "hbase.master.port";

/// Default coordination service client port.
pub const DEFAULT_CLIENT_PORT: u16 = 2181;
/// Default administrative port.
pub const DEFAULT_MASTER_PORT: u16 = 60000;

/// Connection parameters for the column-family store.
///
/// # Example
///
/// ```toml
/// quorum = ["zk01", "zk02", "zk03"]
/// client_port = 2181
/// master_port = 60000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Coordination quorum members (host names)
    #[serde(default = "default_quorum")]
    pub quorum: Vec<String>,
    /// Coordination service client port
    #[serde(default = "default_client_port")]
    pub client_port: u16,
    /// Administrative (master) port
    #[serde(default = "default_master_port")]
    pub master_port: u16,
}

fn default_quorum() -> Vec<String> {
    vec!["localhost".to_string()]
}

fn default_client_port() -> u16 {
    DEFAULT_CLIENT_PORT
}

fn default_master_port() -> u16 {
    DEFAULT_MASTER_PORT
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            quorum: default_quorum(),
            client_port: DEFAULT_CLIENT_PORT,
            master_port: DEFAULT_MASTER_PORT,
        }
    }
}

impl ClientConfig {
    /// Build a config for the given quorum with default ports.
    pub fn with_quorum<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            quorum: members.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Check that the quorum is non-empty, member names are not blank and
    /// ports are non-zero.
    ///
    /// # Errors
    ///
    /// Returns `Config` naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.quorum.is_empty() {
            return Err(Error::config("quorum must list at least one member"));
        }
        if let Some(pos) = self.quorum.iter().position(|m| m.trim().is_empty()) {
            return Err(Error::config(format!("quorum member {} is blank", pos)));
        }
        if self.client_port == 0 {
            return Err(Error::config("client_port must be non-zero"));
        }
        if self.master_port == 0 {
            return Err(Error::config("master_port must be non-zero"));
        }
        Ok(())
    }

    /// Quorum as the comma-separated list the store client expects.
    pub fn quorum_string(&self) -> String {
        self.quorum.join(",")
    }

    /// Render as the store client's property map.
    pub fn to_properties(&self) -> BTreeMap<String, String> {
        let mut props = BTreeMap::new();
        props.insert(QUORUM_PROPERTY.to_string(), self.quorum_string());
        props.insert(CLIENT_PORT_PROPERTY.to_string(), self.client_port.to_string());
        props.insert(MASTER_PORT_PROPERTY.to_string(), self.master_port.to_string());
        props
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# cellgate client configuration
#
# Coordination quorum members. The store client contacts these to locate
# the cluster.
quorum = ["localhost"]

# Coordination service client port (default: 2181)
client_port = 2181

# Administrative (master) port (default: 60000)
master_port = 60000
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text does not parse or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { reason } => {
                Error::config(format!("{} ({})", reason, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
