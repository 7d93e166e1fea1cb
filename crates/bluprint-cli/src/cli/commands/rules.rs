use bluprint_core::{CompatibilityRule, RuleSource};
use std::fmt::Write as _;

use super::common::{emit, load_catalog};
use crate::cli::args::RulesArgs;
use crate::exit_codes;

pub fn run(args: RulesArgs) -> anyhow::Result<i32> {
    let catalog = load_catalog(&args.catalog.catalog)?;
    let rules = if args.all {
        catalog.rules().to_vec()
    } else {
        catalog.active_rules()
    };
    emit(args.catalog.format, &rules, |rules| render(rules))?;
    Ok(exit_codes::COMPATIBLE)
}

fn render(rules: &[CompatibilityRule]) -> String {
    let mut out = String::new();
    for rule in rules {
        let _ = write!(
            out,
            "#{} {} {} ↔ {} [{:?}]",
            rule.id,
            rule.rule_type,
            rule.part_type_1,
            rule.part_type_2,
            rule.rule_type.scope()
        );
        if !rule.rule_data.is_empty() {
            let params: Vec<String> = rule
                .rule_data
                .iter()
                .map(|(k, v)| format!("{k}={}", serde_json::to_string(v).unwrap_or_default()))
                .collect();
            let _ = write!(out, " {}", params.join(" "));
        }
        if !rule.is_active {
            out.push_str(" (inactive)");
        }
        out.push('\n');
    }
    out
}
