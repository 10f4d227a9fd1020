use super::{is_called, FindingSummary};

/// Vulnerability groups split by reachability, each in first-seen order.
#[derive(Debug, Default)]
pub struct Sections<'a> {
    /// Groups with at least one call trace, shown in the main section.
    pub called: Vec<Vec<&'a FindingSummary>>,
    /// Groups that are only imported, shown in the informational section.
    pub informational: Vec<Vec<&'a FindingSummary>>,
}

pub fn classify(groups: Vec<Vec<&FindingSummary>>) -> Sections<'_> {
    let (called, informational) = groups.into_iter().partition(|group| is_called(group));
    Sections {
        called,
        informational,
    }
}
