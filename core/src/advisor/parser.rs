use crate::advisor::model::{FlaggedResource, RawFinding, ResourceStatus};
use crate::error::{CoreError, CoreResult};
use serde_json::Value;

/// Parse a findings document: a JSON array of advisory-check results.
///
/// Validation is all-or-nothing. Any shape failure returns
/// `MalformedDocument` and the caller's collection stays untouched.
pub fn parse_findings_document(text: &str) -> CoreResult<Vec<RawFinding>> {
    let raw: Value = serde_json::from_str(text)
        .map_err(|e| CoreError::MalformedDocument(format!("failed to parse document: {}", e)))?;

    let entries = raw.as_array().ok_or_else(|| {
        CoreError::MalformedDocument("document root must be an array of findings".to_string())
    })?;

    let mut findings = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        findings.push(parse_finding(idx, entry)?);
    }
    Ok(findings)
}

fn parse_finding(idx: usize, entry: &Value) -> CoreResult<RawFinding> {
    let check_id = required_str(entry, "TrustedAdvisorCheckId", idx)?;
    let check_name = required_str(entry, "TrustedAdvisorCheckName", idx)?;

    let flagged = entry
        .get("FlaggedResources")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            CoreError::MalformedDocument(format!(
                "missing FlaggedResources array for finding {}",
                idx
            ))
        })?;

    let mut flagged_resources = Vec::with_capacity(flagged.len());
    for (ridx, resource) in flagged.iter().enumerate() {
        flagged_resources.push(parse_flagged_resource(idx, ridx, resource)?);
    }

    Ok(RawFinding {
        check_id,
        check_name,
        check_description: optional_str(entry, "TrustedAdvisorCheckDesc"),
        pillar_id: optional_str(entry, "WAPillarId"),
        question_id: optional_str(entry, "WAQuestionId"),
        best_practice_id: optional_str(entry, "WABestPracticeId"),
        best_practice_title: optional_str(entry, "WABestPracticeTitle"),
        best_practice_description: optional_str(entry, "WABestPracticeDesc"),
        business_risk: optional_str(entry, "WABestPracticeRisk"),
        flagged_resources,
    })
}

fn parse_flagged_resource(idx: usize, ridx: usize, resource: &Value) -> CoreResult<FlaggedResource> {
    let status_raw = resource
        .get("status")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            CoreError::MalformedDocument(format!(
                "missing status for resource {} of finding {}",
                ridx, idx
            ))
        })?;
    let status = ResourceStatus::parse(status_raw).ok_or_else(|| {
        CoreError::MalformedDocument(format!(
            "unknown status {:?} for resource {} of finding {}",
            status_raw, ridx, idx
        ))
    })?;

    let metadata = match resource.get("metadata") {
        None | Some(Value::Null) => None,
        Some(Value::Array(values)) => Some(values.iter().map(metadata_value_text).collect()),
        Some(_) => {
            return Err(CoreError::MalformedDocument(format!(
                "metadata must be an array for resource {} of finding {}",
                ridx, idx
            )))
        }
    };

    Ok(FlaggedResource {
        status,
        region: optional_str(resource, "region"),
        resource_id: optional_str(resource, "resourceId"),
        metadata,
    })
}

// Metadata arrays mix strings with nulls and numbers; everything becomes text
// since the values only ever feed display labels.
fn metadata_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn required_str(entry: &Value, key: &str, idx: usize) -> CoreResult<String> {
    entry
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| CoreError::MalformedDocument(format!("missing {} for finding {}", key, idx)))
}

fn optional_str(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> &'static str {
        r#"[
            {
                "TrustedAdvisorCheckId": "Z4AUBRNSmz",
                "TrustedAdvisorCheckName": "Unassociated Elastic IP Addresses",
                "TrustedAdvisorCheckDesc": "Checks for Elastic IPs that are not associated.",
                "WAPillarId": "costOptimization",
                "WAQuestionId": "COST6",
                "WABestPracticeId": "cost_decommissioning_resources_implement_process",
                "WABestPracticeTitle": "Decommission resources",
                "WABestPracticeDesc": "Release unused addresses.",
                "WABestPracticeRisk": "Medium",
                "FlaggedResources": [
                    {
                        "status": "warning",
                        "region": "us-east-1",
                        "resourceId": "eip-1234",
                        "metadata": ["us-east-1", "52.20.10.1"]
                    }
                ]
            }
        ]"#
    }

    #[test]
    fn test_parse_valid_document() {
        let findings = parse_findings_document(sample_document()).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].check_id, "Z4AUBRNSmz");
        assert_eq!(findings[0].flagged_resources.len(), 1);
        assert_eq!(findings[0].flagged_resources[0].status, ResourceStatus::Warning);
    }

    #[test]
    fn test_invalid_json() {
        assert!(parse_findings_document("{ not json").is_err());
    }

    #[test]
    fn test_root_must_be_array() {
        assert!(parse_findings_document(r#"{"checks": []}"#).is_err());
    }

    #[test]
    fn test_missing_check_id() {
        let doc = r#"[{"TrustedAdvisorCheckName": "X", "FlaggedResources": []}]"#;
        let err = parse_findings_document(doc).unwrap_err();
        assert!(err.to_string().contains("TrustedAdvisorCheckId"));
    }

    #[test]
    fn test_missing_flagged_resources() {
        let doc = r#"[{"TrustedAdvisorCheckId": "a", "TrustedAdvisorCheckName": "X"}]"#;
        assert!(parse_findings_document(doc).is_err());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let doc = r#"[{
            "TrustedAdvisorCheckId": "a",
            "TrustedAdvisorCheckName": "X",
            "FlaggedResources": [{"status": "critical", "region": "", "resourceId": "r"}]
        }]"#;
        let err = parse_findings_document(doc).unwrap_err();
        assert!(err.to_string().contains("critical"));
    }

    #[test]
    fn test_metadata_values_stringified() {
        let doc = r#"[{
            "TrustedAdvisorCheckId": "a",
            "TrustedAdvisorCheckName": "X",
            "FlaggedResources": [{"status": "ok", "metadata": ["vol-1", 30, null]}]
        }]"#;
        let findings = parse_findings_document(doc).unwrap();
        let metadata = findings[0].flagged_resources[0].metadata.as_ref().unwrap();
        assert_eq!(metadata, &["vol-1", "30", ""]);
    }

    #[test]
    fn test_empty_flagged_resources_allowed() {
        let doc = r#"[{"TrustedAdvisorCheckId": "a", "TrustedAdvisorCheckName": "X", "FlaggedResources": []}]"#;
        let findings = parse_findings_document(doc).unwrap();
        assert!(findings[0].flagged_resources.is_empty());
    }
}
