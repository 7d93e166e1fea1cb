use bluprint_core::{recommended_spec_keys, validate_part, BluprintError, Part, PartId, PartType};
use serde::Serialize;
use std::fmt::Write as _;

use super::common::{emit, load_catalog};
use crate::cli::args::ValidateArgs;
use crate::exit_codes;

#[derive(Debug, Serialize)]
struct PartReport {
    id: PartId,
    name: String,
    part_type: PartType,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Schema keys the part does not declare.
    missing_keys: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ValidateReport {
    valid: usize,
    invalid: usize,
    parts: Vec<PartReport>,
}

pub fn run(args: ValidateArgs) -> anyhow::Result<i32> {
    let catalog = load_catalog(&args.catalog.catalog)?;

    let parts: Vec<PartReport> = catalog.parts().iter().map(check_part).collect();
    let invalid = parts.iter().filter(|p| !p.valid).count();
    let report = ValidateReport {
        valid: parts.len() - invalid,
        invalid,
        parts,
    };

    emit(args.catalog.format, &report, render)?;
    Ok(if invalid == 0 {
        exit_codes::COMPATIBLE
    } else {
        exit_codes::INCOMPATIBLE
    })
}

fn check_part(part: &Part) -> PartReport {
    let error = match validate_part(part) {
        Ok(()) => None,
        Err(
            BluprintError::SpecValidation { message, .. }
            | BluprintError::PartValidation { message, .. },
        ) => Some(message),
        Err(other) => Some(other.to_string()),
    };
    let missing_keys = recommended_spec_keys(&part.part_type)
        .into_iter()
        .filter(|key| part.specifications.get(key).is_none())
        .collect();
    PartReport {
        id: part.id,
        name: part.name.clone(),
        part_type: part.part_type.clone(),
        valid: error.is_none(),
        error,
        missing_keys,
    }
}

fn render(report: &ValidateReport) -> String {
    let mut out = String::new();
    for part in report.parts.iter().filter(|p| !p.valid) {
        let _ = writeln!(
            out,
            "✖ #{} {} ({}): {}",
            part.id,
            part.name,
            part.part_type,
            part.error.as_deref().unwrap_or_default()
        );
    }
    let _ = writeln!(out, "{} valid, {} invalid", report.valid, report.invalid);
    out
}
