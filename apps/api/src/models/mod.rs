// Plain input records consumed by the matching and studio engines.
// Every wire field is optional; malformed values coerce to safe defaults.

pub mod job;
pub mod lenient;
pub mod profile;
pub mod studio;
