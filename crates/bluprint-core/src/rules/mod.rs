//! Compatibility rules.
//!
//! # Rule Model
//!
//! ```text
//! CompatibilityRule (catalog record)          Rule (compiled, closed set)
//! ┌──────────────────────────────┐            ┌──────────────────────────────┐
//! │ part_type_1 / part_type_2    │  compile   │ SocketMatch      ─┐          │
//! │ rule_type: "socket_match"    │ ─────────▶ │ FormFactor        ├ PairCheck│
//! │ rule_data: { ... }           │            │ InterfaceMatch   ─┘          │
//! │ is_active                    │            │ PowerRequirement ── BuildCheck│
//! └──────────────────────────────┘            │ Unsupported (skipped)        │
//!                                             └──────────────────────────────┘
//! ```
//!
//! Pairwise checks run once per concrete part pair drawn from the rule's two
//! categories. Build checks ignore the categories and run against the whole
//! build.

mod form_factor;
mod interface;
mod power;
mod socket;

pub use form_factor::FormFactorFit;
pub use interface::InterfaceMatch;
pub use power::PowerBudget;
pub use socket::SocketMatch;

use crate::build::{BuildParts, PartView};
use crate::catalog::PartType;
use crate::specs::{SpecMap, SpecValue};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type RuleId = i64;

/// Rule kind tag as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleKind {
    SocketMatch,
    FormFactor,
    InterfaceMatch,
    PowerRequirement,
    /// A tag this engine does not implement; evaluates as compatible.
    Unsupported(String),
}

/// Where a rule kind is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    Pairwise,
    Aggregate,
}

impl RuleKind {
    pub fn tag(&self) -> &str {
        match self {
            RuleKind::SocketMatch => "socket_match",
            RuleKind::FormFactor => "form_factor",
            RuleKind::InterfaceMatch => "interface_match",
            RuleKind::PowerRequirement => "power_requirement",
            RuleKind::Unsupported(tag) => tag,
        }
    }

    pub fn scope(&self) -> RuleScope {
        match self {
            RuleKind::PowerRequirement => RuleScope::Aggregate,
            RuleKind::SocketMatch
            | RuleKind::FormFactor
            | RuleKind::InterfaceMatch
            | RuleKind::Unsupported(_) => RuleScope::Pairwise,
        }
    }
}

impl From<String> for RuleKind {
    fn from(tag: String) -> Self {
        match tag.trim() {
            "socket_match" => RuleKind::SocketMatch,
            "form_factor" => RuleKind::FormFactor,
            "interface_match" => RuleKind::InterfaceMatch,
            "power_requirement" => RuleKind::PowerRequirement,
            other => RuleKind::Unsupported(other.to_string()),
        }
    }
}

impl From<&str> for RuleKind {
    fn from(tag: &str) -> Self {
        RuleKind::from(tag.to_string())
    }
}

impl From<RuleKind> for String {
    fn from(kind: RuleKind) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn default_active() -> bool {
    true
}

/// A compatibility rule record as the catalog stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub id: RuleId,
    pub part_type_1: PartType,
    pub part_type_2: PartType,
    pub rule_type: RuleKind,
    #[serde(default)]
    pub rule_data: SpecMap,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CompatibilityRule {
    pub fn new(
        id: RuleId,
        part_type_1: impl Into<PartType>,
        part_type_2: impl Into<PartType>,
        rule_type: impl Into<RuleKind>,
    ) -> Self {
        Self {
            id,
            part_type_1: part_type_1.into(),
            part_type_2: part_type_2.into(),
            rule_type: rule_type.into(),
            rule_data: SpecMap::new(),
            is_active: true,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<SpecValue>) -> Self {
        self.rule_data.insert(key, value);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// True when the rule's two categories match the pair in either order.
    pub fn applies_to(&self, a: &PartType, b: &PartType) -> bool {
        (self.part_type_1 == *a && self.part_type_2 == *b)
            || (self.part_type_1 == *b && self.part_type_2 == *a)
    }

    pub fn compile(&self) -> Rule {
        match &self.rule_type {
            RuleKind::SocketMatch => Rule::SocketMatch(SocketMatch),
            RuleKind::FormFactor => Rule::FormFactor(FormFactorFit),
            RuleKind::InterfaceMatch => {
                Rule::InterfaceMatch(InterfaceMatch::from_params(&self.rule_data))
            }
            RuleKind::PowerRequirement => Rule::PowerRequirement(PowerBudget),
            RuleKind::Unsupported(tag) => Rule::Unsupported { tag: tag.clone() },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Evaluation
// ─────────────────────────────────────────────────────────────────────────────

/// Result of evaluating one rule against one pair (or one build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub compatible: bool,
    pub reason: Option<String>,
    pub warning: Option<String>,
}

impl RuleOutcome {
    pub fn pass() -> Self {
        Self {
            compatible: true,
            reason: None,
            warning: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            compatible: false,
            reason: Some(reason.into()),
            warning: None,
        }
    }

    pub fn warn(warning: impl Into<String>) -> Self {
        Self::pass().with_warning(warning)
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}

/// A rule evaluated on two concrete parts.
pub trait PairCheck {
    fn evaluate(&self, a: &PartView<'_>, b: &PartView<'_>) -> RuleOutcome;
}

/// A rule evaluated once against the whole build.
pub trait BuildCheck {
    fn evaluate(&self, build: &BuildParts<'_>) -> RuleOutcome;
}

/// A compiled rule: one variant per supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    SocketMatch(SocketMatch),
    FormFactor(FormFactorFit),
    InterfaceMatch(InterfaceMatch),
    PowerRequirement(PowerBudget),
    Unsupported { tag: String },
}

impl Rule {
    pub fn as_pair_check(&self) -> Option<&dyn PairCheck> {
        match self {
            Rule::SocketMatch(check) => Some(check),
            Rule::FormFactor(check) => Some(check),
            Rule::InterfaceMatch(check) => Some(check),
            Rule::PowerRequirement(_) | Rule::Unsupported { .. } => None,
        }
    }

    pub fn as_build_check(&self) -> Option<&dyn BuildCheck> {
        match self {
            Rule::PowerRequirement(check) => Some(check),
            Rule::SocketMatch(_)
            | Rule::FormFactor(_)
            | Rule::InterfaceMatch(_)
            | Rule::Unsupported { .. } => None,
        }
    }
}
