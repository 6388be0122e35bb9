//! Configuration: optional YAML file, overridden by CLI flags
//!
//! ```yaml
//! network:
//!   window: 10
//!   max_edges: 200
//!   top_neighbors: 5
//! server:
//!   host: 127.0.0.1
//!   port: 5006
//! render:
//!   height: 1080
//!   background: "#222222"
//! ```

use crate::cooccurrence::DEFAULT_WINDOW;
use crate::graph::{GraphOptions, DEFAULT_MAX_EDGES, DEFAULT_TOP_NEIGHBORS};
use crate::render::SvgRenderer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Extraction and graph limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Trailing sentences per co-occurrence window
    pub window: usize,
    /// Edges kept after ranking
    pub max_edges: usize,
    /// Neighbors listed per node label
    pub top_neighbors: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            max_edges: DEFAULT_MAX_EDGES,
            top_neighbors: DEFAULT_TOP_NEIGHBORS,
        }
    }
}

impl NetworkConfig {
    pub fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            max_edges: self.max_edges,
            top_neighbors: self.top_neighbors,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 {
            return Err(ConfigError::Invalid("network.window must be at least 1".into()));
        }
        if self.max_edges == 0 {
            return Err(ConfigError::Invalid("network.max_edges must be at least 1".into()));
        }
        if self.top_neighbors == 0 {
            return Err(ConfigError::Invalid("network.top_neighbors must be at least 1".into()));
        }
        Ok(())
    }
}

/// Dashboard HTTP listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5006,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub server: ServerConfig,
    pub render: SvgRenderer,
}

impl Config {
    /// Parse YAML; an empty document yields the defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Load `explicit` if given, else the default config file if it exists,
    /// else the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_path(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.network.validate()?;
        self.render
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("render: {}", e)))
    }
}

/// `<config_dir>/character-network/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("character-network").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.network.window, 10);
        assert_eq!(config.network.max_edges, 200);
        assert_eq!(config.network.top_neighbors, 5);
        assert_eq!(config.server.addr(), "127.0.0.1:5006");
        assert_eq!(config.render.height, 1080);
        assert_eq!(config.render.frame_height(), "1080px");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml_str("network:\n  window: 4\nserver:\n  port: 8080\n").unwrap();
        assert_eq!(config.network.window, 4);
        assert_eq!(config.network.max_edges, 200);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = Config::from_yaml_str("network:\n  window: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let mut network = NetworkConfig::default();
        network.max_edges = 0;
        assert!(network.validate().is_err());

        let mut network = NetworkConfig::default();
        network.top_neighbors = 0;
        assert!(network.validate().is_err());
    }

    #[test]
    fn unsafe_render_style_is_rejected() {
        let err = Config::from_yaml_str("render:\n  font_color: \"white;}</style><script>\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("font_color")));

        let err = Config::from_yaml_str("render:\n  width: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            Config::from_yaml_str("network: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "render:\n  background: \"#000000\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.render.background, "#000000");
        assert_eq!(config.render.font_color, "white");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/character-network.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
