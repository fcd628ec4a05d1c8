use crate::advisor::model::{ExpandedFinding, ResourceStatus};
use serde::Serialize;

/// High/medium/low tallies derived from flagged-resource statuses.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct UrgencyCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl UrgencyCounts {
    pub fn total(self) -> usize {
        self.high + self.medium + self.low
    }
}

/// `error` counts as high urgency, `warning` as medium, `ok` as low.
/// Pure; callers run it separately over the inbox and over each
/// breakpoint's grid since those answer different questions.
pub fn count_by_status<'a, I>(items: I) -> UrgencyCounts
where
    I: IntoIterator<Item = &'a ExpandedFinding>,
{
    let mut counts = UrgencyCounts::default();
    for item in items {
        match item.resource.status {
            ResourceStatus::Error => counts.high += 1,
            ResourceStatus::Warning => counts.medium += 1,
            ResourceStatus::Ok => counts.low += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::expand::expand_flagged_resources;
    use crate::advisor::parser::parse_findings_document;
    use crate::catalog::CheckCatalog;

    #[test]
    fn test_counts_map_statuses() {
        let doc = r#"[{
            "TrustedAdvisorCheckId": "a",
            "TrustedAdvisorCheckName": "X",
            "FlaggedResources": [
                {"status": "error", "region": "", "resourceId": "1"},
                {"status": "error", "region": "", "resourceId": "2"},
                {"status": "warning", "region": "", "resourceId": "3"}
            ]
        }]"#;
        let findings = parse_findings_document(doc).unwrap();
        let expanded = expand_flagged_resources(&findings, &CheckCatalog::builtin());
        let counts = count_by_status(expanded.items.iter());
        assert_eq!(counts, UrgencyCounts { high: 2, medium: 1, low: 0 });
        assert_eq!(counts.total(), expanded.items.len());
    }

    #[test]
    fn test_empty_collection_counts_zero() {
        let counts = count_by_status(std::iter::empty::<&crate::advisor::model::ExpandedFinding>());
        assert_eq!(counts.total(), 0);
    }
}
