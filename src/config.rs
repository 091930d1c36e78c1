use serde::Deserialize;
use std::path::Path;

use crate::error::{AppError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/cluster-dashboard/config.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_cluster_name")]
    pub cluster_name: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    /// Use the pod's service account. When false the client is inferred from
    /// the local kubeconfig or environment instead.
    #[serde(default = "default_in_cluster")]
    pub in_cluster: bool,
}

fn default_cluster_name() -> String {
    "kubernetes".to_string()
}

fn default_listen_port() -> u16 {
    8000
}

fn default_in_cluster() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cluster_name: default_cluster_name(),
            listen_port: default_listen_port(),
            in_cluster: default_in_cluster(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("reading config {}: {}", path.display(), e)))?;
        Self::parse(&data)
    }

    /// Loads the file at `path`, falling back to defaults only when the
    /// implicit default path is absent.
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn parse(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(data).map_err(|e| AppError::Config(format!("parsing config: {}", e)))
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.cluster_name, "kubernetes");
        assert_eq!(cfg.listen_port, 8000);
        assert!(cfg.in_cluster);
    }

    #[test]
    fn partial_document_keeps_remaining_defaults() {
        let cfg = Config::parse("cluster_name: prod-eu\nin_cluster: false\n").unwrap();
        assert_eq!(cfg.cluster_name, "prod-eu");
        assert!(!cfg.in_cluster);
        assert_eq!(cfg.listen_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn malformed_document_is_config_error() {
        let err = Config::parse("listen_port: [nope").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn missing_default_path_falls_back() {
        let path = Path::new("/nonexistent/cluster-dashboard/config.yaml");
        let cfg = Config::load_or_default(path, false).unwrap();
        assert_eq!(cfg.listen_port, 8000);
        assert!(Config::load_or_default(path, true).is_err());
    }
}
