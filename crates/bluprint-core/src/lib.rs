//! Hardware compatibility engine for PC builds.
//!
//! Given a set of catalog parts and a list of compatibility rules, the engine
//! decides whether the parts can be assembled into a working build:
//!
//! - socket agreement between CPU and motherboard (`socket_match`)
//! - motherboard fit inside the case (`form_factor`)
//! - required interface presence (`interface_match`)
//! - PSU capacity against total draw (`power_requirement`)
//! - presence of the categories every build needs
//!
//! Evaluation is pure: no I/O happens between receiving parts and rules and
//! returning a [`Verdict`].
//!
//! # Quick Start
//!
//! ```
//! use bluprint_core::{BuildEvaluator, Catalog, CompatibilityRule, Part};
//!
//! # fn example() -> bluprint_core::BluprintResult<()> {
//! let catalog = Catalog::new(
//!     vec![
//!         Part::new(1, "Ryzen 5 5600X", "CPU").with_spec("socket", "AM4"),
//!         Part::new(2, "B550 Tomahawk", "Motherboard").with_spec("socket", "AM4"),
//!     ],
//!     vec![CompatibilityRule::new(1, "CPU", "Motherboard", "socket_match")],
//! )?;
//!
//! let verdict = BuildEvaluator::default().evaluate(&[1, 2], &catalog, catalog.rules())?;
//! assert!(verdict.is_compatible);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `BLUPRINT_MAX_PARTS` | Largest build the engine will evaluate (default: 500) |
//! | `BLUPRINT_DEDUPE_AGGREGATE_RULES` | Run each aggregate rule kind once per build (default: true) |

pub mod build;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;
pub mod rules;
pub mod specs;
pub mod validation;

pub use build::{BuildParts, PartView};
pub use catalog::{Catalog, Part, PartId, PartLookup, PartType, Resolved, RuleSource};
pub use config::EngineConfig;
pub use engine::{BuildEvaluator, PairVerdict, Verdict};
pub use errors::{BluprintError, BluprintResult};
pub use rules::{
    BuildCheck, CompatibilityRule, PairCheck, Rule, RuleId, RuleKind, RuleOutcome, RuleScope,
};
pub use specs::{FormFactor, NormalizedSpecs, SpecMap, SpecValue};
pub use validation::{recommended_spec_keys, validate_part, validate_specifications};
