use serde::{Deserialize, Serialize};

/// Result status reported for one flagged resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Ok,
    Warning,
    Error,
}

impl ResourceStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ok" => Some(Self::Ok),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// One resource instance flagged by an advisory check. Metadata values are
/// positional; their meaning comes from the check catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlaggedResource {
    pub status: ResourceStatus,
    pub region: String,
    #[serde(rename = "resourceId")]
    pub resource_id: String,
    pub metadata: Option<Vec<String>>,
}

/// One advisory-check result as ingested, before expansion.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RawFinding {
    #[serde(rename = "TrustedAdvisorCheckId")]
    pub check_id: String,
    #[serde(rename = "TrustedAdvisorCheckName")]
    pub check_name: String,
    #[serde(rename = "TrustedAdvisorCheckDesc")]
    pub check_description: String,
    #[serde(rename = "WAPillarId")]
    pub pillar_id: String,
    #[serde(rename = "WAQuestionId")]
    pub question_id: String,
    #[serde(rename = "WABestPracticeId")]
    pub best_practice_id: String,
    #[serde(rename = "WABestPracticeTitle")]
    pub best_practice_title: String,
    #[serde(rename = "WABestPracticeDesc")]
    pub best_practice_description: String,
    #[serde(rename = "WABestPracticeRisk")]
    pub business_risk: String,
    #[serde(rename = "FlaggedResources")]
    pub flagged_resources: Vec<FlaggedResource>,
}

/// One flagged resource paired with its parent finding's denormalized fields;
/// the atomic unit the board manages. Serializes under the ingestion wire
/// names so JSON export round-trips the original vocabulary.
///
/// `i` is the stringified zero-based index into the expanded collection and
/// stays stable for the lifetime of one ingested document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExpandedFinding {
    pub i: String,
    #[serde(rename = "TrustedAdvisorCheckId")]
    pub check_id: String,
    #[serde(rename = "TrustedAdvisorCheckName")]
    pub check_name: String,
    #[serde(rename = "TrustedAdvisorCheckDesc")]
    pub check_description: String,
    #[serde(rename = "WAPillarId")]
    pub pillar_id: String,
    #[serde(rename = "WAQuestionId")]
    pub question_id: String,
    #[serde(rename = "WABestPracticeId")]
    pub best_practice_id: String,
    #[serde(rename = "WABestPracticeTitle")]
    pub best_practice_title: String,
    #[serde(rename = "WABestPracticeDesc")]
    pub best_practice_description: String,
    #[serde(rename = "WABestPracticeRisk")]
    pub business_risk: String,
    /// Human-readable label built by zipping catalog columns with metadata
    /// values, or the raw joined values for checks the catalog misses.
    #[serde(rename = "resourceId")]
    pub resource_label: String,
    /// `<check id>_<flagged resource id>`. Not deduplicated across the
    /// expansion; downstream maps keyed by it keep the last writer.
    #[serde(rename = "uniqueId")]
    pub unique_id: String,
    #[serde(rename = "FlaggedResources")]
    pub resource: FlaggedResource,
}
