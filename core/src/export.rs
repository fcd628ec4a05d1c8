use crate::advisor::model::ExpandedFinding;
use crate::advisor::sanitize::strip_description_markup;
use crate::error::CoreResult;

/// Column order for the risk-data CSV download: one column per denormalized
/// scalar field of an expanded finding.
const CSV_HEADER: [&str; 14] = [
    "i",
    "TrustedAdvisorCheckId",
    "TrustedAdvisorCheckName",
    "TrustedAdvisorCheckDesc",
    "WAPillarId",
    "WAQuestionId",
    "WABestPracticeId",
    "WABestPracticeTitle",
    "WABestPracticeDesc",
    "WABestPracticeRisk",
    "resourceId",
    "uniqueId",
    "resultStatus",
    "region",
];

/// Render the full collection as CSV, one row per expanded finding.
///
/// Commas inside field values become semicolons so rows never need quoting;
/// check descriptions are stripped of markup and folded onto one line.
pub fn render_risks_csv(items: &[ExpandedFinding]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for item in items {
        let description = strip_description_markup(&item.check_description).replace('\n', " ");
        wtr.write_record(&[
            csv_field(&item.i),
            csv_field(&item.check_id),
            csv_field(&item.check_name),
            csv_field(&description),
            csv_field(&item.pillar_id),
            csv_field(&item.question_id),
            csv_field(&item.best_practice_id),
            csv_field(&item.best_practice_title),
            csv_field(&item.best_practice_description),
            csv_field(&item.business_risk),
            csv_field(&item.resource_label),
            csv_field(&item.unique_id),
            item.resource.status.as_str().to_string(),
            csv_field(&item.resource.region),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}

fn csv_field(value: &str) -> String {
    value.replace(',', ";")
}

/// Render the full collection as pretty-printed JSON (the clipboard payload).
pub fn render_risks_json(items: &[ExpandedFinding]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Download file name for a CSV export, stamped with the given RFC3339 UTC
/// timestamp (colons swapped out for filesystem friendliness).
pub fn csv_export_file_name(ts_utc: &str) -> String {
    format!("risk_data_{}_UTC.csv", ts_utc.replace(':', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_has_no_colons() {
        let name = csv_export_file_name("2026-08-01T12:30:00Z");
        assert_eq!(name, "risk_data_2026-08-01T12-30-00Z_UTC.csv");
    }

    #[test]
    fn csv_field_swaps_commas() {
        assert_eq!(csv_field("a, b"), "a; b");
        assert_eq!(csv_field("plain"), "plain");
    }
}
