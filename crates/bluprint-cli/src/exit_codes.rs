//! Process exit codes. Scripts rely on these; treat them as a public contract.
//!
//! Engine errors carry their own code via `BluprintError::exit_code`, which
//! adds 3 for unreadable or invalid catalog and config files.

pub const COMPATIBLE: i32 = 0;
pub const INCOMPATIBLE: i32 = 1; // Verdict has issues, or validation found invalid parts
pub const ERROR: i32 = 2; // Unknown ids, oversized build, bad arguments
