//! Relative-delta resolution engine.
//!
//! ## How the parts work together
//!
//! ```text
//! Lexicon (compiled patterns + deltas)
//!         │
//! text ───┼──▶ Resolver::parse                      (resolver.rs)
//!         │      second → minute → hour → week
//!         │      → weekday → day → month → year
//!         │        each: scan ─▶ delta ─▶ AnchorDate (anchor.rs)
//!         │        each: push Step                  (trace.rs)
//!         v
//!   NaiveDateTime (+ RunTrace for verbose runs)
//! ```
//!
//! Every component operation is a silent no-op when the text has no phrase
//! for it, so a partial match still yields a best-effort timestamp.
//!
//! ## Responsibilities by module
//!
//! - `anchor.rs`: the anchor date and the calendar arithmetic (`apply_delta`
//!   for fixed durations, `shift_months` / `shift_years` for the rest).
//! - `resolver.rs`: one operation per component plus the fixed-order `parse`.
//! - `trace.rs`: per-step records and run timing.
//!
//! ## Not a round trip
//!
//! Feeding a formatted result back in is not a fixed point: the engine reads
//! relative phrases only, so an absolute timestamp string resolves to the
//! anchor itself.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=reltime=debug` to see every applied step and every
//! recognized literal without a mapped delta.

#[path = "engine/anchor.rs"]
mod anchor;
#[path = "engine/resolver.rs"]
mod resolver;
#[path = "engine/trace.rs"]
mod trace;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use anchor::{AnchorDate, Delta};
pub use resolver::Resolver;
pub use trace::{RunTrace, Step};
