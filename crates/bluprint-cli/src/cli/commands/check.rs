use bluprint_core::{RuleSource, Verdict};
use std::fmt::Write as _;

use super::common::{emit, evaluator, load_catalog};
use crate::cli::args::CheckArgs;
use crate::exit_codes;

pub fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let catalog = load_catalog(&args.catalog.catalog)?;
    let evaluator = evaluator(&args.engine)?;

    let rules = catalog.active_rules();
    let verdict = evaluator.evaluate(&args.ids, &catalog, &rules)?;

    emit(args.catalog.format, &verdict, render)?;
    Ok(if verdict.is_compatible {
        exit_codes::COMPATIBLE
    } else {
        exit_codes::INCOMPATIBLE
    })
}

fn render(verdict: &Verdict) -> String {
    let mut out = String::new();
    if verdict.is_compatible {
        out.push_str("compatible\n");
    } else {
        let count = verdict.issues.len();
        let _ = writeln!(
            out,
            "incompatible ({count} issue{})",
            if count != 1 { "s" } else { "" }
        );
    }
    for issue in &verdict.issues {
        let _ = writeln!(out, "  ✖ {issue}");
    }
    for warning in &verdict.warnings {
        let _ = writeln!(out, "  ⚠ {warning}");
    }
    out
}
