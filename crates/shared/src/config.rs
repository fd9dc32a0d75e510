//! Configuration types for Haven

use serde::{Deserialize, Serialize};

/// Application configuration (haven.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HavenConfig {
    /// Display name of the shelter
    #[serde(default = "default_shelter_name")]
    pub shelter_name: String,

    /// Default page size for paged listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// How many days ahead the vaccination-due report looks
    #[serde(default = "default_vaccination_horizon_days")]
    pub vaccination_horizon_days: u32,
}

fn default_shelter_name() -> String {
    "Haven Animal Shelter".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_vaccination_horizon_days() -> u32 {
    30
}

impl Default for HavenConfig {
    fn default() -> Self {
        Self {
            shelter_name: default_shelter_name(),
            page_size: default_page_size(),
            vaccination_horizon_days: default_vaccination_horizon_days(),
        }
    }
}

impl HavenConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load from a file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_parse() {
        let json = r#"{
            "shelterName": "Riverside Shelter",
            "pageSize": 25
        }"#;

        let config: HavenConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.shelter_name, "Riverside Shelter");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.vaccination_horizon_days, 30);
    }

    #[test]
    fn test_config_defaults() {
        let config: HavenConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.shelter_name, "Haven Animal Shelter");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"shelterName": "From File", "pageSize": 5}}"#).unwrap();

        let config = HavenConfig::from_file(file.path()).unwrap();
        assert_eq!(config.shelter_name, "From File");
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            HavenConfig::load_or_default(std::path::Path::new("/nonexistent/haven.json")).unwrap();
        assert_eq!(config.page_size, 10);
    }
}
