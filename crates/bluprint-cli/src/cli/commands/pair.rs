use anyhow::Context;
use bluprint_core::{BluprintError, PairVerdict, RuleSource};
use std::fmt::Write as _;

use super::common::{emit, evaluator, load_catalog};
use crate::cli::args::PairArgs;
use crate::exit_codes;

pub fn run(args: PairArgs) -> anyhow::Result<i32> {
    let catalog = load_catalog(&args.catalog.catalog)?;
    let evaluator = evaluator(&args.engine)?;

    let mut missing: Vec<_> = [args.first, args.second]
        .into_iter()
        .filter(|id| catalog.part(*id).is_none())
        .collect();
    missing.sort_unstable();
    missing.dedup();
    let (Some(first), Some(second)) = (catalog.part(args.first), catalog.part(args.second)) else {
        return Err(BluprintError::PartsNotFound { ids: missing }).context("resolving pair");
    };

    let verdict = evaluator.evaluate_pair(first, second, &catalog.active_rules());
    emit(args.catalog.format, &verdict, render)?;
    Ok(if verdict.is_compatible {
        exit_codes::COMPATIBLE
    } else {
        exit_codes::INCOMPATIBLE
    })
}

fn render(verdict: &PairVerdict) -> String {
    let mut out = String::new();
    match (&verdict.reason, verdict.is_compatible) {
        (_, true) => out.push_str("compatible\n"),
        (Some(reason), false) => {
            let _ = writeln!(out, "incompatible: {reason}");
        }
        (None, false) => out.push_str("incompatible\n"),
    }
    for warning in &verdict.warnings {
        let _ = writeln!(out, "  ⚠ {warning}");
    }
    out
}
