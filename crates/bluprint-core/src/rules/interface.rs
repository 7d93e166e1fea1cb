use super::{PairCheck, RuleOutcome};
use crate::build::PartView;
use crate::specs::SpecMap;

pub const REQUIRED_INTERFACE: &str = "required_interface";

/// At least one of the two parts must expose the rule's `required_interface`.
///
/// A rule without that parameter checks nothing and always passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceMatch {
    pub required_interface: Option<String>,
}

impl InterfaceMatch {
    pub fn from_params(params: &SpecMap) -> Self {
        Self {
            required_interface: params.text(REQUIRED_INTERFACE).map(str::to_string),
        }
    }
}

impl PairCheck for InterfaceMatch {
    fn evaluate(&self, a: &PartView<'_>, b: &PartView<'_>) -> RuleOutcome {
        let Some(required) = self.required_interface.as_deref() else {
            return RuleOutcome::pass();
        };

        let exposes = |part: &PartView<'_>| part.specs.interface.as_deref() == Some(required);
        if exposes(a) || exposes(b) {
            RuleOutcome::pass()
        } else {
            RuleOutcome::fail(format!("Interface mismatch: {required} required"))
        }
    }
}
