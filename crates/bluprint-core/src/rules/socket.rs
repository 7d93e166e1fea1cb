use super::{PairCheck, RuleOutcome};
use crate::build::PartView;
use crate::specs::SOCKET;

/// Both parts must declare the same `socket`.
///
/// Missing socket data is a hard failure: a wrong socket means the CPU
/// physically does not seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SocketMatch;

impl PairCheck for SocketMatch {
    fn evaluate(&self, a: &PartView<'_>, b: &PartView<'_>) -> RuleOutcome {
        let outcome = compare(a, b);
        match mistyped_sockets(&[a, b]) {
            Some(warning) => outcome.with_warning(warning),
            None => outcome,
        }
    }
}

fn compare(a: &PartView<'_>, b: &PartView<'_>) -> RuleOutcome {
    match (a.specs.socket.as_deref(), b.specs.socket.as_deref()) {
        (Some(socket_a), Some(socket_b)) if socket_a == socket_b => RuleOutcome::pass(),
        (Some(socket_a), Some(socket_b)) => RuleOutcome::fail(format!(
            "{} (socket: {socket_a}) is incompatible with {} (socket: {socket_b})",
            a.name(),
            b.name()
        )),
        (None, None) => RuleOutcome::fail(format!(
            "Socket information missing for both {} and {}",
            a.name(),
            b.name()
        )),
        (None, Some(_)) => {
            RuleOutcome::fail(format!("Socket information missing for {}", a.name()))
        }
        (Some(_), None) => {
            RuleOutcome::fail(format!("Socket information missing for {}", b.name()))
        }
    }
}

/// Sockets given as non-strings count as missing; name them so the catalog
/// entry can be quoted.
fn mistyped_sockets(parts: &[&PartView<'_>]) -> Option<String> {
    let found: Vec<String> = parts
        .iter()
        .filter_map(|p| {
            p.part
                .specifications
                .non_text(SOCKET)
                .map(|v| format!("{} ({v})", p.name()))
        })
        .collect();
    (!found.is_empty()).then(|| {
        format!(
            "Socket value is not a string for {}; quote it in the catalog",
            found.join(", ")
        )
    })
}
