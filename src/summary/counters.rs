use std::collections::HashSet;

use super::FindingSummary;
use crate::model::STD_MODULE_PATH;

/// Totals for the closing sentence of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounters {
    pub vulnerabilities_called: usize,
    /// Distinct called modules, not counting the standard library.
    pub modules_called: usize,
    pub stdlib_called: bool,
}

pub fn counters(findings: &[FindingSummary]) -> SummaryCounters {
    let mut vulns = HashSet::new();
    let mut modules = HashSet::new();
    for finding in findings.iter().filter(|f| f.is_called()) {
        vulns.insert(finding.osv.id.as_str());
        modules.insert(finding.vulnerable_frame().module.as_str());
    }
    let stdlib_called = modules.remove(STD_MODULE_PATH);
    SummaryCounters {
        vulnerabilities_called: vulns.len(),
        modules_called: modules.len(),
        stdlib_called,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entry, Finding, Frame};
    use std::rc::Rc;

    fn summary(osv: &str, module: &str, called: bool) -> FindingSummary {
        FindingSummary {
            finding: Finding {
                osv: osv.to_string(),
                fixed_version: None,
                trace: vec![Frame::new(module)],
            },
            osv: Rc::new(Entry::placeholder(osv)),
            compact: if called { "x".to_string() } else { String::new() },
        }
    }

    #[test]
    fn test_counters_empty() {
        assert_eq!(counters(&[]), SummaryCounters::default());
    }

    #[test]
    fn test_counters_ignores_imported_only() {
        let findings = vec![
            summary("A", "example.com/a", true),
            summary("A", "example.com/b", true),
            summary("B", "example.com/c", false),
            summary("C", STD_MODULE_PATH, true),
        ];
        assert_eq!(
            counters(&findings),
            SummaryCounters {
                vulnerabilities_called: 2,
                modules_called: 2,
                stdlib_called: true,
            }
        );
    }

    #[test]
    fn test_counters_stdlib_only() {
        let findings = vec![summary("A", STD_MODULE_PATH, true)];
        let c = counters(&findings);
        assert_eq!(c.vulnerabilities_called, 1);
        assert_eq!(c.modules_called, 0);
        assert!(c.stdlib_called);
    }
}
