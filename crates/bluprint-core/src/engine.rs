//! Build evaluation: drives the rule evaluators across a whole build.
//!
//! # Dispatch
//!
//! ```text
//!   part ids ──▶ dedupe ──▶ limit check ──▶ PartLookup::resolve
//!                                               │ missing ids → error
//!                                               ▼
//!                                   BuildParts (normalized once,
//!                                     grouped by category)
//!                                               │
//!          for each active rule, in order:     │
//!            aggregate → BuildCheck once per kind
//!            pairwise  → PairCheck per (type_1 × type_2) pair, self-pairs skipped
//!                                               │
//!                                               ▼
//!                          required part types ──▶ Verdict
//! ```

use crate::build::{BuildParts, PartView};
use crate::catalog::{Part, PartId, PartLookup};
use crate::config::EngineConfig;
use crate::errors::{BluprintError, BluprintResult};
use crate::rules::{CompatibilityRule, Rule, RuleKind, RuleOutcome};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Compatibility verdict for a whole build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_compatible: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl Verdict {
    /// A verdict with nothing to report.
    pub fn compatible() -> Self {
        Self {
            is_compatible: true,
            issues: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn from_findings(findings: Findings) -> Self {
        Self {
            is_compatible: findings.issues.is_empty(),
            issues: findings.issues,
            warnings: findings.warnings,
        }
    }
}

/// Compatibility verdict for two parts checked in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairVerdict {
    pub is_compatible: bool,
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Default)]
struct Findings {
    issues: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn record(&mut self, outcome: RuleOutcome) {
        if !outcome.compatible {
            if let Some(reason) = outcome.reason {
                self.issues.push(reason);
            }
        }
        if let Some(warning) = outcome.warning {
            self.warnings.push(warning);
        }
    }
}

/// Evaluates builds and part pairs against compatibility rules.
///
/// Holds configuration only; every call is independent, so one evaluator can
/// be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct BuildEvaluator {
    config: EngineConfig,
}

impl BuildEvaluator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate the build made of `part_ids`.
    ///
    /// Ids are treated as a set. Unknown ids and over-limit builds are errors;
    /// every compatibility problem is reported inside the verdict.
    pub fn evaluate<L>(
        &self,
        part_ids: &[PartId],
        parts: &L,
        rules: &[CompatibilityRule],
    ) -> BluprintResult<Verdict>
    where
        L: PartLookup + ?Sized,
    {
        let ids = distinct(part_ids);
        if ids.is_empty() {
            return Ok(Verdict::compatible());
        }
        if ids.len() > self.config.max_parts {
            warn!(
                count = ids.len(),
                limit = self.config.max_parts,
                "rejecting oversized build"
            );
            return Err(BluprintError::TooManyParts {
                count: ids.len(),
                limit: self.config.max_parts,
            });
        }

        let mut resolved = parts.resolve(&ids);
        if !resolved.missing.is_empty() {
            let mut missing = resolved.missing;
            missing.sort_unstable();
            missing.dedup();
            return Err(BluprintError::PartsNotFound { ids: missing });
        }

        let position: HashMap<PartId, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        resolved
            .found
            .sort_by_key(|part| position.get(&part.id).copied().unwrap_or(usize::MAX));

        Ok(self.evaluate_parts(&resolved.found, rules))
    }

    /// Evaluate already-resolved parts.
    pub fn evaluate_parts(&self, parts: &[Part], rules: &[CompatibilityRule]) -> Verdict {
        if parts.is_empty() {
            return Verdict::compatible();
        }
        let build = BuildParts::new(parts);
        self.evaluate_build(&build, rules)
    }

    /// Evaluate a grouped build.
    pub fn evaluate_build(&self, build: &BuildParts<'_>, rules: &[CompatibilityRule]) -> Verdict {
        debug!(parts = build.len(), rules = rules.len(), "evaluating build");

        let mut findings = Findings::default();
        let mut aggregates_run: HashSet<&RuleKind> = HashSet::new();

        for record in rules.iter().filter(|r| r.is_active) {
            let rule = record.compile();

            if let Some(check) = rule.as_build_check() {
                if self.config.dedupe_aggregate_rules && !aggregates_run.insert(&record.rule_type)
                {
                    debug!(rule_id = record.id, kind = %record.rule_type, "aggregate kind already evaluated");
                    continue;
                }
                findings.record(check.evaluate(build));
                continue;
            }

            let Some(check) = rule.as_pair_check() else {
                warn!(rule_id = record.id, kind = %record.rule_type, "skipping unsupported rule kind");
                continue;
            };

            if !build.has_type(&record.part_type_1) && !build.has_type(&record.part_type_2) {
                debug!(rule_id = record.id, "rule categories absent from build");
                continue;
            }
            if matches!(&rule, Rule::InterfaceMatch(m) if m.required_interface.is_none()) {
                debug!(rule_id = record.id, "interface_match rule has no required_interface");
            }

            for a in build.of_type(&record.part_type_1) {
                for b in build.of_type(&record.part_type_2) {
                    if a.id() == b.id() {
                        continue;
                    }
                    findings.record(check.evaluate(a, b));
                }
            }
        }

        for required in &self.config.required_part_types {
            if !build.has_type(required) {
                findings
                    .issues
                    .push(format!("Missing required part type: {required}"));
            }
        }

        Verdict::from_findings(findings)
    }

    /// Check two parts against the pairwise rules whose categories match them.
    ///
    /// Returns at the first incompatibility. Aggregate rules need the whole
    /// build and are ignored here.
    pub fn evaluate_pair(&self, a: &Part, b: &Part, rules: &[CompatibilityRule]) -> PairVerdict {
        let mut verdict = PairVerdict {
            is_compatible: true,
            reason: None,
            warnings: Vec::new(),
        };
        if a.id == b.id {
            return verdict;
        }

        let view_a = PartView::new(a);
        let view_b = PartView::new(b);

        for record in rules
            .iter()
            .filter(|r| r.is_active && r.applies_to(&a.part_type, &b.part_type))
        {
            let rule = record.compile();
            let Some(check) = rule.as_pair_check() else {
                continue;
            };

            let (first, second) =
                if record.part_type_1 == a.part_type && record.part_type_2 == b.part_type {
                    (&view_a, &view_b)
                } else {
                    (&view_b, &view_a)
                };

            let outcome = check.evaluate(first, second);
            if let Some(warning) = outcome.warning {
                verdict.warnings.push(warning);
            }
            if !outcome.compatible {
                verdict.is_compatible = false;
                verdict.reason = outcome.reason;
                return verdict;
            }
        }
        verdict
    }
}

/// Order-preserving dedupe.
fn distinct(ids: &[PartId]) -> Vec<PartId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
