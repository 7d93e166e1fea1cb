//! Catalog records: parts and their categories.
//!
//! The catalog owns these records; the engine only borrows them for the
//! length of one evaluation.

pub mod store;

pub use store::{Catalog, PartLookup, Resolved, RuleSource};

use crate::specs::{NormalizedSpecs, SpecMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a part.
pub type PartId = i64;

/// Part category.
///
/// The set is open-ended: labels outside the known list are kept as
/// [`PartType::Custom`] and still group and match by exact label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartType {
    Cpu,
    Gpu,
    Ram,
    Motherboard,
    Storage,
    Psu,
    Case,
    Cooler,
    Network,
    Other,
    Custom(String),
}

impl PartType {
    pub const KNOWN: [PartType; 10] = [
        PartType::Cpu,
        PartType::Gpu,
        PartType::Ram,
        PartType::Motherboard,
        PartType::Storage,
        PartType::Psu,
        PartType::Case,
        PartType::Cooler,
        PartType::Network,
        PartType::Other,
    ];

    /// Resolve a category label. Known labels match case-insensitively.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        Self::KNOWN
            .into_iter()
            .find(|known| known.label().eq_ignore_ascii_case(label))
            .unwrap_or_else(|| PartType::Custom(label.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            PartType::Cpu => "CPU",
            PartType::Gpu => "GPU",
            PartType::Ram => "RAM",
            PartType::Motherboard => "Motherboard",
            PartType::Storage => "Storage",
            PartType::Psu => "PSU",
            PartType::Case => "Case",
            PartType::Cooler => "Cooler",
            PartType::Network => "Network",
            PartType::Other => "Other",
            PartType::Custom(label) => label,
        }
    }
}

impl From<String> for PartType {
    fn from(label: String) -> Self {
        PartType::parse(&label)
    }
}

impl From<&str> for PartType {
    fn from(label: &str) -> Self {
        PartType::parse(label)
    }
}

impl From<PartType> for String {
    fn from(part_type: PartType) -> Self {
        part_type.label().to_string()
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalog part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub part_type: PartType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub specifications: SpecMap,
}

impl Part {
    pub fn new(id: PartId, name: impl Into<String>, part_type: impl Into<PartType>) -> Self {
        Self {
            id,
            name: name.into(),
            part_type: part_type.into(),
            manufacturer: None,
            price: None,
            specifications: SpecMap::new(),
        }
    }

    pub fn with_spec(
        mut self,
        key: impl Into<String>,
        value: impl Into<crate::specs::SpecValue>,
    ) -> Self {
        self.specifications.insert(key, value);
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn normalized(&self) -> NormalizedSpecs {
        NormalizedSpecs::from_specs(&self.specifications)
    }
}
