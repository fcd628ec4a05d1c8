use crate::error::{CoreError, CoreResult};
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered metadata column names per advisory check.
///
/// A flagged resource's `metadata` array carries positional values whose
/// meaning is defined by the check that produced it; this table supplies the
/// column names. Checks missing from the table fall back to a raw join of the
/// values (see `advisor::expand`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckCatalog {
    columns: BTreeMap<String, Vec<String>>,
}

impl CheckCatalog {
    /// Built-in table covering the checks the bundled sample exercises.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        // Low Utilization Amazon EC2 Instances
        catalog.insert(
            "Qch7DwouX1",
            &[
                "Region/AZ",
                "Instance ID",
                "Instance Name",
                "Instance Type",
                "Estimated Monthly Savings",
                "14-Day Average CPU Utilization",
                "14-Day Average Network I/O",
                "Number of Days Low Utilization",
            ],
        );
        // Underutilized Amazon EBS Volumes
        catalog.insert(
            "DAvU99Dc4C",
            &[
                "Region",
                "Volume ID",
                "Volume Name",
                "Volume Type",
                "Volume Size",
                "Monthly Storage Cost",
                "Snapshot ID",
                "Snapshot Name",
                "Snapshot Age",
            ],
        );
        // Unassociated Elastic IP Addresses
        catalog.insert("Z4AUBRNSmz", &["Region", "IP Address"]);
        // Amazon EBS Snapshots
        catalog.insert(
            "H7IgTzjTYb",
            &[
                "Region",
                "Volume ID",
                "Snapshot ID",
                "Description",
                "Snapshot Age",
                "Volume Attachment",
                "Status",
                "Reason",
            ],
        );
        // Exposed Access Keys
        catalog.insert(
            "12Fnkpl8Y5",
            &[
                "Access Key ID",
                "User Name (IAM or Root)",
                "Fraud Type",
                "Case ID",
                "Time Updated",
                "Location",
                "Deadline",
                "Usage (USD per Day)",
            ],
        );
        // Security Groups - Specific Ports Unrestricted
        catalog.insert(
            "eW7HH0l7J9",
            &[
                "Region",
                "Security Group Name",
                "Security Group ID",
                "Protocol",
                "Port",
                "Status",
                "IP Range",
            ],
        );
        catalog
    }

    /// Loads a check reference document: `{"checks": [{"id": ..., "metadata": [...]}]}`.
    /// Entries without a metadata array are skipped; they describe checks whose
    /// flagged resources carry no positional values.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let raw: Value = serde_json::from_str(text)
            .map_err(|e| CoreError::InvalidInput(format!("failed to parse check catalog: {}", e)))?;
        let checks = raw
            .get("checks")
            .and_then(|v| v.as_array())
            .ok_or_else(|| CoreError::InvalidInput("missing checks array".to_string()))?;

        let mut catalog = Self::default();
        for (idx, check) in checks.iter().enumerate() {
            let id = check
                .get("id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| CoreError::InvalidInput(format!("missing check id at index {}", idx)))?;
            let Some(metadata) = check.get("metadata").and_then(|v| v.as_array()) else {
                continue;
            };
            let columns = metadata
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<String>>>()
                .ok_or_else(|| {
                    CoreError::InvalidInput(format!(
                        "metadata columns for check {} must be strings",
                        id
                    ))
                })?;
            catalog.columns.insert(id.to_string(), columns);
        }
        Ok(catalog)
    }

    pub fn metadata_columns(&self, check_id: &str) -> Option<&[String]> {
        self.columns.get(check_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn insert(&mut self, check_id: &str, columns: &[&str]) {
        self.columns
            .insert(check_id.to_string(), columns.iter().map(|c| c.to_string()).collect());
    }
}
