//! Human-readable rendering of normalized events and calls.

use abilens_core::normalized::{NormalizedArg, NormalizedCall, NormalizedEvent};

fn args(args: &[NormalizedArg]) -> String {
    args.iter()
        .map(|a| format!("{}: {}", a.name, a.ty))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Transfer(from: string, to: string, value: integer)`
pub fn event(e: &NormalizedEvent) -> String {
    format!("{}({})", e.name, args(&e.args))
}

/// `0xa9059cbb  transfer(to: string, value: integer)`
pub fn call(c: &NormalizedCall) -> String {
    format!("{}  {}({})", c.selector, c.name, args(&c.args))
}
