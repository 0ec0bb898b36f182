use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use targets::ResolverConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationsConfig {
    /// `host:port[/path]` specs resolved after any given on the command line
    #[serde(default)]
    pub destinations: Vec<String>,

    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log directory for file-based logging; logs go to stderr when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    #[serde(default = "default_log_file")]
    pub log_file: String,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_file() -> String {
    "destinations.log".to_string()
}

fn default_prefix() -> String {
    "Destinations: [".to_string()
}

fn default_separator() -> String {
    ", ".to_string()
}

fn default_suffix() -> String {
    "]\n".to_string()
}

impl Default for DestinationsConfig {
    fn default() -> Self {
        Self {
            destinations: Vec::new(),
            resolver: ResolverConfig::default(),
            log_level: default_log_level(),
            log_dir: None,
            log_file: default_log_file(),
            prefix: default_prefix(),
            separator: default_separator(),
            suffix: default_suffix(),
        }
    }
}

impl DestinationsConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: DestinationsConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
