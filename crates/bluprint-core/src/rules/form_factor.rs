use super::{PairCheck, RuleOutcome};
use crate::build::PartView;
use crate::catalog::PartType;

/// A motherboard must fit the case it is paired with.
///
/// Only Case/Motherboard pairs are checked; roles are resolved by category,
/// so argument order does not matter. Any other pair passes silently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormFactorFit;

impl PairCheck for FormFactorFit {
    fn evaluate(&self, a: &PartView<'_>, b: &PartView<'_>) -> RuleOutcome {
        let (case, board) = match (a.part_type(), b.part_type()) {
            (PartType::Case, PartType::Motherboard) => (a, b),
            (PartType::Motherboard, PartType::Case) => (b, a),
            _ => return RuleOutcome::pass(),
        };

        let (case_ff, board_ff) = match (&case.specs.form_factor, &board.specs.form_factor) {
            (Some(case_ff), Some(board_ff)) => (case_ff, board_ff),
            (None, None) => {
                return RuleOutcome::fail(format!(
                    "Form factor information missing for both {} and {}",
                    case.name(),
                    board.name()
                ))
            }
            (None, Some(_)) => {
                return RuleOutcome::fail(format!(
                    "Form factor information missing for {}",
                    case.name()
                ))
            }
            (Some(_), None) => {
                return RuleOutcome::fail(format!(
                    "Form factor information missing for {}",
                    board.name()
                ))
            }
        };

        if !case_ff.is_canonical() {
            return RuleOutcome::warn(format!(
                "{} has unrecognized form factor '{case_ff}'; fit with {} was not checked",
                case.name(),
                board.name()
            ));
        }

        if board_ff.fits_in(case_ff) {
            return RuleOutcome::pass();
        }

        let supported: Vec<String> = case_ff.accepts().iter().map(ToString::to_string).collect();
        RuleOutcome::fail(format!(
            "{} (form factor: {board_ff}) does not fit {} (form factor: {case_ff}, supports: {})",
            board.name(),
            case.name(),
            supported.join(", ")
        ))
    }
}
