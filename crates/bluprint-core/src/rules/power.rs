use super::{BuildCheck, RuleOutcome};
use crate::build::{BuildParts, PartView};
use crate::catalog::PartType;

/// The strongest PSU must cover the summed draw of every other part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerBudget;

impl BuildCheck for PowerBudget {
    fn evaluate(&self, build: &BuildParts<'_>) -> RuleOutcome {
        let psus: Vec<&PartView<'_>> = build.of_type(&PartType::Psu).collect();
        if psus.is_empty() {
            return RuleOutcome::fail("No power supply (PSU) in build");
        }

        // Strictly greater, so the first PSU wins ties.
        let mut available: Option<f64> = None;
        for psu in &psus {
            if let Some(wattage) = psu.specs.wattage {
                match available {
                    Some(best) if best >= wattage => {}
                    _ => available = Some(wattage),
                }
            }
        }

        let Some(available) = available else {
            let names: Vec<&str> = psus.iter().map(|psu| psu.name()).collect();
            return RuleOutcome::fail(format!(
                "PSU wattage information missing for {}",
                names.join(", ")
            ));
        };

        let mut required = 0.0;
        let mut unknown = Vec::new();
        for part in build.iter().filter(|p| *p.part_type() != PartType::Psu) {
            match part.specs.power_consumption {
                Some(draw) => required += draw,
                None => unknown.push(part.name()),
            }
        }
        let required = round2(required);

        let mut outcome = if required > available {
            RuleOutcome::fail(format!(
                "Power requirement ({required}W) exceeds PSU capacity ({available}W)"
            ))
        } else {
            RuleOutcome::pass()
        };

        if !unknown.is_empty() {
            outcome = outcome.with_warning(format!(
                "Power consumption data missing for: {}",
                unknown.join(", ")
            ));
        }
        outcome
    }
}

fn round2(watts: f64) -> f64 {
    (watts * 100.0).round() / 100.0
}
