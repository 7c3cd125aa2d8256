//! Shared data types for the setver workspace.
//!
//! # Design constraints
//! - `Variables` mirrors the on-disk layout of `variables.toml`; parsing is
//!   strict about the required fields so a half-filled file fails early.
//! - Rules are immutable once built; the engine never mutates them.

pub mod rule;
pub mod vars;

pub use rule::{Replacement, Rule, RuleOutcome, RuleStatus};
pub use vars::{OpenapiSection, Variables, VersionSection};
