//! Catalog access seams and an in-memory catalog.
//!
//! The engine never queries storage itself. Callers hand it something that
//! can resolve part ids ([`PartLookup`]) and the active rules
//! ([`RuleSource`]); a database-backed service implements these over its
//! own queries, tools and tests use [`Catalog`].

use super::{Part, PartId};
use crate::errors::{BluprintError, BluprintResult};
use crate::rules::CompatibilityRule;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Outcome of resolving a set of part ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    pub found: Vec<Part>,
    pub missing: Vec<PartId>,
}

/// Resolves part ids to part records.
pub trait PartLookup {
    fn resolve(&self, ids: &[PartId]) -> Resolved;
}

/// Lists the currently active compatibility rules.
pub trait RuleSource {
    fn active_rules(&self) -> Vec<CompatibilityRule>;
}

impl PartLookup for HashMap<PartId, Part> {
    fn resolve(&self, ids: &[PartId]) -> Resolved {
        let mut resolved = Resolved::default();
        for id in ids {
            match self.get(id) {
                Some(part) => resolved.found.push(part.clone()),
                None => resolved.missing.push(*id),
            }
        }
        resolved
    }
}

/// An in-memory catalog of parts and rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    parts: Vec<Part>,
    #[serde(default)]
    rules: Vec<CompatibilityRule>,
    #[serde(skip)]
    index: HashMap<PartId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate part or rule ids.
    pub fn new(parts: Vec<Part>, rules: Vec<CompatibilityRule>) -> BluprintResult<Self> {
        let mut catalog = Self {
            parts,
            rules,
            index: HashMap::new(),
        };
        catalog.reindex()?;
        Ok(catalog)
    }

    /// Load a catalog document (YAML or JSON) with `parts` and `rules` lists.
    pub fn from_file(path: &Path) -> BluprintResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BluprintError::Catalog {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let catalog = Self::from_yaml(&content)?;
        info!(
            path = %path.display(),
            parts = catalog.parts.len(),
            rules = catalog.rules.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog document. JSON is accepted as a YAML subset.
    pub fn from_yaml(content: &str) -> BluprintResult<Self> {
        let mut catalog: Catalog =
            serde_yaml::from_str(content).map_err(|e| BluprintError::Catalog {
                message: e.to_string(),
            })?;
        catalog.reindex()?;
        Ok(catalog)
    }

    fn reindex(&mut self) -> BluprintResult<()> {
        self.index.clear();
        for (position, part) in self.parts.iter().enumerate() {
            if self.index.insert(part.id, position).is_some() {
                return Err(BluprintError::DuplicatePartId { id: part.id });
            }
        }
        let mut rule_ids = HashSet::new();
        for rule in &self.rules {
            if !rule_ids.insert(rule.id) {
                return Err(BluprintError::DuplicateRuleId { id: rule.id });
            }
        }
        Ok(())
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.index.get(&id).map(|&i| &self.parts[i])
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn rules(&self) -> &[CompatibilityRule] {
        &self.rules
    }
}

impl PartLookup for Catalog {
    fn resolve(&self, ids: &[PartId]) -> Resolved {
        let mut resolved = Resolved::default();
        for &id in ids {
            match self.part(id) {
                Some(part) => resolved.found.push(part.clone()),
                None => resolved.missing.push(id),
            }
        }
        resolved
    }
}

impl RuleSource for Catalog {
    fn active_rules(&self) -> Vec<CompatibilityRule> {
        self.rules.iter().filter(|r| r.is_active).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PartType;

    const CATALOG: &str = r#"
parts:
  - id: 1
    name: Ryzen 5 5600X
    part_type: CPU
    manufacturer: AMD
    price: 199.99
    specifications:
      socket: AM4
      power_consumption: 65
  - id: 2
    name: B550 Tomahawk
    part_type: Motherboard
    specifications:
      socket: AM4
      form_factor: ATX
rules:
  - id: 1
    part_type_1: CPU
    part_type_2: Motherboard
    rule_type: socket_match
  - id: 2
    part_type_1: PSU
    part_type_2: PSU
    rule_type: power_requirement
    is_active: false
"#;

    #[test]
    fn test_load_yaml_catalog() {
        let catalog = Catalog::from_yaml(CATALOG).unwrap();
        assert_eq!(catalog.parts().len(), 2);
        assert_eq!(catalog.part(2).unwrap().part_type, PartType::Motherboard);
        assert_eq!(catalog.part(1).unwrap().manufacturer.as_deref(), Some("AMD"));
        assert!(catalog.part(3).is_none());
    }

    #[test]
    fn test_active_rules_only() {
        let catalog = Catalog::from_yaml(CATALOG).unwrap();
        let active = catalog.active_rules();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, 1);
        assert_eq!(catalog.rules().len(), 2);
    }

    #[test]
    fn test_resolve_reports_missing() {
        let catalog = Catalog::from_yaml(CATALOG).unwrap();
        let resolved = catalog.resolve(&[2, 40, 1, 41]);
        let found: Vec<_> = resolved.found.iter().map(|p| p.id).collect();
        assert_eq!(found, vec![2, 1]);
        assert_eq!(resolved.missing, vec![40, 41]);
    }

    #[test]
    fn test_json_catalog() {
        let json = r#"{"parts": [{"id": 9, "name": "RM650", "part_type": "PSU",
                        "specifications": {"wattage": 650}}]}"#;
        let catalog = Catalog::from_yaml(json).unwrap();
        assert_eq!(catalog.part(9).unwrap().normalized().wattage, Some(650.0));
        assert!(catalog.rules().is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let parts = vec![Part::new(1, "A", "CPU"), Part::new(1, "B", "GPU")];
        let err = Catalog::new(parts, vec![]).unwrap_err();
        assert!(matches!(err, BluprintError::DuplicatePartId { id: 1 }));

        let rules = vec![
            CompatibilityRule::new(5, "CPU", "Motherboard", "socket_match"),
            CompatibilityRule::new(5, "Case", "Motherboard", "form_factor"),
        ];
        let err = Catalog::new(vec![], rules).unwrap_err();
        assert!(matches!(err, BluprintError::DuplicateRuleId { id: 5 }));
    }

    #[test]
    fn test_hashmap_lookup() {
        let mut parts = HashMap::new();
        parts.insert(1, Part::new(1, "A", "CPU"));
        let resolved = parts.resolve(&[1, 2]);
        assert_eq!(resolved.found.len(), 1);
        assert_eq!(resolved.missing, vec![2]);
    }
}
