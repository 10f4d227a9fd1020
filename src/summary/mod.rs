//! Derivation of rendering-oriented data from raw findings.
//!
//! The pipeline runs once per flush:
//!
//! 1. [`normalize`] resolves each finding's metadata and compact trace.
//! 2. [`group_by_vulnerability`] and [`group_by_module`] partition the
//!    summaries in first-seen order.
//! 3. [`classify`] splits vulnerability groups into called and
//!    informational sections.
//! 4. [`counters`] derives the totals for the closing sentence.

mod classify;
mod counters;
mod group;
mod normalize;

pub use classify::{classify, Sections};
pub use counters::{counters, SummaryCounters};
pub use group::{group_by_module, group_by_vulnerability, is_called};
pub use normalize::{
    assumed_package_name, compact_trace, normalize, platforms, pos_to_string, semver_to_go_tag,
    symbol, FindingSummary, ModuleVersions,
};
