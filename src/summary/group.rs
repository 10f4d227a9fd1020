use std::collections::HashMap;
use std::hash::Hash;

use super::FindingSummary;

/// Groups summaries by vulnerability id, in first-seen order.
pub fn group_by_vulnerability(findings: &[FindingSummary]) -> Vec<Vec<&FindingSummary>> {
    group_first_seen(findings.iter(), |f| f.osv.id.as_str())
}

/// Groups summaries of one vulnerability by affected module, in first-seen order.
pub fn group_by_module<'a>(findings: &[&'a FindingSummary]) -> Vec<Vec<&'a FindingSummary>> {
    group_first_seen(findings.iter().copied(), |f| {
        f.vulnerable_frame().module.as_str()
    })
}

/// A group is called when any of its findings has a call trace.
pub fn is_called(findings: &[&FindingSummary]) -> bool {
    findings.iter().any(|f| f.is_called())
}

fn group_first_seen<T, K, I, F>(items: I, key: F) -> Vec<Vec<T>>
where
    T: Copy,
    K: Eq + Hash,
    I: IntoIterator<Item = T>,
    F: Fn(T) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<T>> = Vec::new();
    for item in items {
        let slot = *slots.entry(key(item)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(item);
    }
    groups
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
            compact: if called { "a calls b".to_string() } else { String::new() },
        }
    }

    fn ids(groups: &[Vec<&FindingSummary>]) -> Vec<Vec<String>> {
        groups
            .iter()
            .map(|g| {
                g.iter()
                    .map(|f| format!("{}:{}", f.osv.id, f.vulnerable_frame().module))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_group_by_vulnerability_first_seen_order() {
        let findings = vec![
            summary("B", "m1", false),
            summary("A", "m1", false),
            summary("B", "m2", false),
            summary("C", "m1", false),
            summary("A", "m3", false),
        ];
        let groups = group_by_vulnerability(&findings);
        assert_eq!(
            ids(&groups),
            vec![
                vec!["B:m1", "B:m2"],
                vec!["A:m1", "A:m3"],
                vec!["C:m1"],
            ]
        );
    }

    #[test]
    fn test_group_by_module_first_seen_order() {
        let findings = vec![
            summary("A", "z.com/mod", false),
            summary("A", "a.com/mod", false),
            summary("A", "z.com/mod", true),
        ];
        let refs: Vec<&FindingSummary> = findings.iter().collect();
        let groups = group_by_module(&refs);
        assert_eq!(
            ids(&groups),
            vec![vec!["A:z.com/mod", "A:z.com/mod"], vec!["A:a.com/mod"]]
        );
    }

    #[test]
    fn test_is_called() {
        let findings = vec![summary("A", "m", false), summary("A", "m", true)];
        let refs: Vec<&FindingSummary> = findings.iter().collect();
        assert!(is_called(&refs));
        assert!(!is_called(&refs[..1]));
        assert!(!is_called(&[]));
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_vulnerability(&[]).is_empty());
    }
}
