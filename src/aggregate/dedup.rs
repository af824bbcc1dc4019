use std::collections::HashSet;

use crate::checker::Finding;

/// Drops every finding whose `(offset, length, message)` was already seen
///
/// Single pass, first occurrence wins, relative order preserved. Returns the
/// kept findings and the number removed.
pub fn dedup_findings(findings: Vec<Finding>) -> (Vec<Finding>, usize) {
    let total = findings.len();
    let mut seen: HashSet<(usize, usize, String)> = HashSet::with_capacity(total);
    let mut kept = Vec::with_capacity(total);

    for finding in findings {
        let (offset, length, message) = finding.dedup_key();
        if seen.insert((offset, length, message.to_string())) {
            kept.push(finding);
        }
    }

    let removed = total - kept.len();
    (kept, removed)
}
