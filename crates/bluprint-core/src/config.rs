//! Engine configuration.
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `BLUPRINT_MAX_PARTS` | Largest build the engine will evaluate (default: 500) |
//! | `BLUPRINT_DEDUPE_AGGREGATE_RULES` | Run each aggregate rule kind once per build (default: true) |

use crate::catalog::PartType;
use crate::errors::{BluprintError, BluprintResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_max_parts() -> usize {
    500
}

fn default_dedupe_aggregate_rules() -> bool {
    true
}

fn default_required_part_types() -> Vec<PartType> {
    vec![PartType::Cpu, PartType::Motherboard]
}

/// Evaluation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Builds with more distinct parts than this are rejected.
    #[serde(default = "default_max_parts")]
    pub max_parts: usize,

    /// When several active rules share an aggregate kind, evaluate the kind
    /// once. Disabling this runs every rule instance.
    #[serde(default = "default_dedupe_aggregate_rules")]
    pub dedupe_aggregate_rules: bool,

    /// Categories every build must contain.
    #[serde(default = "default_required_part_types")]
    pub required_part_types: Vec<PartType>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_parts: default_max_parts(),
            dedupe_aggregate_rules: default_dedupe_aggregate_rules(),
            required_part_types: default_required_part_types(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by environment variables. Values that fail to
    /// parse fall back to the default.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load from a YAML file, then apply environment overrides.
    pub fn from_file(path: &Path) -> BluprintResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BluprintError::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let config = Self::from_yaml(&content)?.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> BluprintResult<Self> {
        let config: EngineConfig =
            serde_yaml::from_str(content).map_err(|e| BluprintError::Config {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(max_parts) = std::env::var("BLUPRINT_MAX_PARTS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            self.max_parts = max_parts;
        }
        if let Ok(v) = std::env::var("BLUPRINT_DEDUPE_AGGREGATE_RULES") {
            self.dedupe_aggregate_rules = v == "1" || v.eq_ignore_ascii_case("true");
        }
        self
    }

    pub fn validate(&self) -> BluprintResult<()> {
        if self.max_parts == 0 {
            return Err(BluprintError::Config {
                message: "max_parts must be > 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_max_parts(mut self, max_parts: usize) -> Self {
        self.max_parts = max_parts;
        self
    }

    pub fn with_dedupe_aggregate_rules(mut self, dedupe: bool) -> Self {
        self.dedupe_aggregate_rules = dedupe;
        self
    }

    pub fn with_required_part_types(mut self, part_types: Vec<PartType>) -> Self {
        self.required_part_types = part_types;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_parts, 500);
        assert!(config.dedupe_aggregate_rules);
        assert_eq!(
            config.required_part_types,
            vec![PartType::Cpu, PartType::Motherboard]
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml("max_parts: 40\n").unwrap();
        assert_eq!(config.max_parts, 40);
        assert!(config.dedupe_aggregate_rules);
        assert_eq!(config.required_part_types.len(), 2);
    }

    #[test]
    fn test_required_types_from_yaml() {
        let yaml = "required_part_types: [CPU, Motherboard, PSU]\ndedupe_aggregate_rules: false\n";
        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.required_part_types[2], PartType::Psu);
        assert!(!config.dedupe_aggregate_rules);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = EngineConfig::from_yaml("max_parts: 0\n").unwrap_err();
        assert!(matches!(err, BluprintError::Config { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(EngineConfig::from_yaml("max_part: 10\n").is_err());
    }

    #[test]
    #[serial]
    fn test_from_file() {
        std::env::remove_var("BLUPRINT_MAX_PARTS");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bluprint.yaml");
        std::fs::write(&path, "max_parts: 12\n").unwrap();
        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.max_parts, 12);

        let missing = EngineConfig::from_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(missing.to_string().contains("failed to read"));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("BLUPRINT_MAX_PARTS", "25");
        std::env::set_var("BLUPRINT_DEDUPE_AGGREGATE_RULES", "false");
        let config = EngineConfig::from_env();
        std::env::remove_var("BLUPRINT_MAX_PARTS");
        std::env::remove_var("BLUPRINT_DEDUPE_AGGREGATE_RULES");

        assert_eq!(config.max_parts, 25);
        assert!(!config.dedupe_aggregate_rules);
    }

    #[test]
    #[serial]
    fn test_unparseable_env_falls_back() {
        std::env::set_var("BLUPRINT_MAX_PARTS", "many");
        let config = EngineConfig::from_env();
        std::env::remove_var("BLUPRINT_MAX_PARTS");

        assert_eq!(config.max_parts, 500);
    }
}
