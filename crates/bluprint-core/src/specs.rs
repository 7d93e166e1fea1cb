//! Specification values and the normalization layer on top of them.
//!
//! Part specifications are open-schema: keys differ per category and values
//! may be numbers, strings, booleans or arrays. Rule evaluators never read
//! raw values; they go through the typed accessors here, which apply the
//! trimming, case folding and numeric coercion rules in one place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const SOCKET: &str = "socket";
pub const FORM_FACTOR: &str = "form_factor";
pub const INTERFACE: &str = "interface";
pub const WATTAGE: &str = "wattage";
pub const POWER_CONSUMPTION: &str = "power_consumption";

/// A single specification value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<SpecValue>),
}

impl SpecValue {
    /// Trimmed, non-empty string content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SpecValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }

    /// Finite numeric content, coercing numeric strings.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            SpecValue::Number(n) => *n,
            SpecValue::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl From<&str> for SpecValue {
    fn from(s: &str) -> Self {
        SpecValue::Text(s.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(s: String) -> Self {
        SpecValue::Text(s)
    }
}

impl From<f64> for SpecValue {
    fn from(n: f64) -> Self {
        SpecValue::Number(n)
    }
}

impl From<i64> for SpecValue {
    fn from(n: i64) -> Self {
        SpecValue::Number(n as f64)
    }
}

impl From<bool> for SpecValue {
    fn from(b: bool) -> Self {
        SpecValue::Bool(b)
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecValue::Null => f.write_str("null"),
            SpecValue::Bool(b) => write!(f, "{b}"),
            SpecValue::Number(n) => write!(f, "{n}"),
            SpecValue::Text(s) => f.write_str(s),
            SpecValue::List(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

/// String-keyed specification map.
///
/// Used for part specifications and for rule parameters alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecMap(BTreeMap<String, SpecValue>);

impl SpecMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<SpecValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SpecValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&SpecValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SpecValue)> {
        self.0.iter()
    }

    /// Trimmed string value; empty or non-string counts as missing.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SpecValue::as_text)
    }

    /// Numeric value; anything that fails coercion counts as missing.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(SpecValue::as_number)
    }

    /// A value under `key` that is present but not a string, such as an
    /// unquoted `socket: 1151` in YAML. `text` treats these as missing.
    pub fn non_text(&self, key: &str) -> Option<&SpecValue> {
        self.get(key)
            .filter(|v| !matches!(v, SpecValue::Text(_) | SpecValue::Null))
    }

    /// Canonicalized `form_factor`.
    pub fn form_factor(&self) -> Option<FormFactor> {
        self.text(FORM_FACTOR).map(FormFactor::parse)
    }
}

impl FromIterator<(String, SpecValue)> for SpecMap {
    fn from_iter<T: IntoIterator<Item = (String, SpecValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Form factors
// ─────────────────────────────────────────────────────────────────────────────

/// Board/case form factor after alias resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormFactor {
    Atx,
    MicroAtx,
    Itx,
    /// Anything outside the alias table, kept verbatim.
    Unrecognized(String),
}

const MICRO_ATX_ALIASES: &[&str] = &["MATX", "MICRO-ATX", "MICRO ATX", "MICROATX"];

impl FormFactor {
    /// Resolve a raw form-factor string. Input is trimmed; never fails.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let folded = raw.to_uppercase();
        if MICRO_ATX_ALIASES.contains(&folded.as_str()) {
            return FormFactor::MicroAtx;
        }
        match folded.as_str() {
            "ATX" => FormFactor::Atx,
            "ITX" => FormFactor::Itx,
            _ => FormFactor::Unrecognized(raw.to_string()),
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, FormFactor::Unrecognized(_))
    }

    /// Motherboard form factors a case of this size can hold, largest first.
    /// Empty for unrecognized case sizes.
    pub fn accepts(&self) -> &'static [FormFactor] {
        const ATX: &[FormFactor] = &[FormFactor::Atx, FormFactor::MicroAtx, FormFactor::Itx];
        const MATX: &[FormFactor] = &[FormFactor::MicroAtx, FormFactor::Itx];
        const ITX: &[FormFactor] = &[FormFactor::Itx];
        match self {
            FormFactor::Atx => ATX,
            FormFactor::MicroAtx => MATX,
            FormFactor::Itx => ITX,
            FormFactor::Unrecognized(_) => &[],
        }
    }

    pub fn fits_in(&self, case: &FormFactor) -> bool {
        case.accepts().contains(self)
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormFactor::Atx => write!(f, "ATX"),
            FormFactor::MicroAtx => write!(f, "mATX"),
            FormFactor::Itx => write!(f, "ITX"),
            FormFactor::Unrecognized(raw) => write!(f, "{raw}"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-part normalized view
// ─────────────────────────────────────────────────────────────────────────────

/// The specs rule evaluators consume, extracted once per part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSpecs {
    pub socket: Option<String>,
    pub form_factor: Option<FormFactor>,
    pub interface: Option<String>,
    pub wattage: Option<f64>,
    pub power_consumption: Option<f64>,
}

impl NormalizedSpecs {
    pub fn from_specs(specs: &SpecMap) -> Self {
        Self {
            socket: specs.text(SOCKET).map(str::to_string),
            form_factor: specs.form_factor(),
            interface: specs.text(INTERFACE).map(str::to_string),
            wattage: specs.number(WATTAGE),
            power_consumption: specs.number(POWER_CONSUMPTION),
        }
    }
}
