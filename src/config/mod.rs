//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Pagination and request defaults for the REST layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Rows per page when the client does not send `rows`
    pub default_rows: usize,

    /// Upper bound on rows per page regardless of what the client asks for
    pub max_rows: usize,

    /// Name of the page parameter used in pagination links
    pub page_name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_rows: 15,
            max_rows: 100,
            page_name: "page".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.default_rows, 15);
        assert_eq!(config.max_rows, 100);
        assert_eq!(config.page_name, "page");
    }

    #[test]
    fn test_from_yaml_str() {
        let config = ApiConfig::from_yaml_str("default_rows: 25\nmax_rows: 50\n").unwrap();
        assert_eq!(config.default_rows, 25);
        assert_eq!(config.max_rows, 50);
        // Unspecified keys keep their defaults
        assert_eq!(config.page_name, "page");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(ApiConfig::from_yaml_str("default_rows: [not a number").is_err());
    }
}
