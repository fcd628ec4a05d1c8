use crate::advisor::model::{ExpandedFinding, RawFinding};
use crate::catalog::CheckCatalog;
use std::collections::BTreeSet;

/// Result of expanding a findings document into per-resource rows.
#[derive(Debug, Clone)]
pub struct ExpandedDocument {
    pub items: Vec<ExpandedFinding>,
    pub check_count: usize,
    /// Check ids the catalog could not resolve, sorted and deduped. Not an
    /// error: their resources fall back to a raw metadata join.
    pub unknown_check_ids: Vec<String>,
}

/// Expand each finding into one row per flagged resource, in document order.
///
/// `i` is assigned from the position in the flattened output, so it is global
/// across findings. A finding with no flagged resources contributes nothing.
pub fn expand_flagged_resources(
    findings: &[RawFinding],
    catalog: &CheckCatalog,
) -> ExpandedDocument {
    let mut items = Vec::new();
    let mut unknown = BTreeSet::new();

    for finding in findings {
        for resource in &finding.flagged_resources {
            let resource_label = match &resource.metadata {
                Some(values) => match catalog.metadata_columns(&finding.check_id) {
                    Some(columns) => zip_metadata(columns, values),
                    None => {
                        unknown.insert(finding.check_id.clone());
                        values.join(", ")
                    }
                },
                None => String::new(),
            };

            items.push(ExpandedFinding {
                i: items.len().to_string(),
                check_id: finding.check_id.clone(),
                check_name: finding.check_name.clone(),
                check_description: finding.check_description.clone(),
                pillar_id: finding.pillar_id.clone(),
                question_id: finding.question_id.clone(),
                best_practice_id: finding.best_practice_id.clone(),
                best_practice_title: finding.best_practice_title.clone(),
                best_practice_description: finding.best_practice_description.clone(),
                business_risk: finding.business_risk.clone(),
                resource_label,
                unique_id: format!("{}_{}", finding.check_id, resource.resource_id),
                resource: resource.clone(),
            });
        }
    }

    ExpandedDocument {
        check_count: findings.len(),
        unknown_check_ids: unknown.into_iter().collect(),
        items,
    }
}

// Columns and values zip to the shorter of the two; a count mismatch is a
// known ambiguity in the feed, not an error.
fn zip_metadata(columns: &[String], values: &[String]) -> String {
    columns
        .iter()
        .zip(values.iter())
        .map(|(column, value)| format!("{}: {}", column, value))
        .collect::<Vec<_>>()
        .join(", ")
}
