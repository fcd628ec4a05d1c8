use crate::error::{CoreError, CoreResult};
use crate::fingerprint::to_canonical_bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    System,
    User,
}

/// One diagnostic event in the board's append-only log.
///
/// `session_id` identifies the host session, `document_id` the ingested
/// document the event concerns (or `NO_DOCUMENT_ID` before any ingestion).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardEvent {
    pub ts_utc: String, // RFC3339 UTC string
    pub event_type: String,
    pub session_id: String,
    pub document_id: String,
    pub actor: Actor,
    pub details: serde_json::Value,
    pub prev_event_hash: String, // hex 64
    pub event_hash: String,      // hex 64
}

pub const ZERO_HASH_64: &str = "0000000000000000000000000000000000000000000000000000000000000000";
pub const NO_DOCUMENT_ID: &str = "d_none";

pub fn now_rfc3339_utc() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap()
}

// event_hash = SHA-256 over the canonical bytes of the full envelope with
// event_hash forced to ZERO_HASH_64 during hashing; prev_event_hash links
// each event to its predecessor.
pub fn compute_event_hash(event: &BoardEvent) -> CoreResult<String> {
    let mut e = event.clone();
    e.event_hash = ZERO_HASH_64.to_string();
    let bytes = to_canonical_bytes(&e)?;
    let mut h = Sha256::new();
    h.update(bytes);
    Ok(hex::encode(h.finalize()))
}

pub fn finalize_event(mut event: BoardEvent) -> CoreResult<BoardEvent> {
    if event.prev_event_hash.len() != 64
        || !event.prev_event_hash.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(CoreError::InvalidInput(
            "prev_event_hash must be 64 hex chars".to_string(),
        ));
    }
    validate_event_taxonomy(&event)?;
    let eh = compute_event_hash(&event)?;
    event.event_hash = eh;
    Ok(event)
}

fn validate_event_taxonomy(event: &BoardEvent) -> CoreResult<()> {
    let allowed = [
        "DOCUMENT_INGEST_STARTED",
        "DOCUMENT_INGESTED",
        "DOCUMENT_REJECTED",
        "FILE_READ_FAILED",
        "CATALOG_LOADED",
        "ITEM_PLACED",
        "ITEM_TAKEN",
        "BREAKPOINT_SWITCHED",
        "BOARD_RESET",
        "EXPORT_RENDERED",
    ];
    if !allowed.contains(&event.event_type.as_str()) {
        return Err(CoreError::InvalidInput(format!(
            "unknown event_type {}",
            event.event_type
        )));
    }
    let required = required_detail_keys(&event.event_type);
    for k in required {
        if event.details.get(k).is_none() {
            return Err(CoreError::InvalidInput(format!(
                "event {} missing details.{}",
                event.event_type, k
            )));
        }
    }
    Ok(())
}

fn required_detail_keys(event_type: &str) -> &'static [&'static str] {
    match event_type {
        "DOCUMENT_INGEST_STARTED" => &["source_type", "source_ref"],
        "DOCUMENT_INGESTED" => &[
            "document_sha256",
            "check_count",
            "expanded_count",
            "unknown_check_ids",
        ],
        "DOCUMENT_REJECTED" => &["reason"],
        "FILE_READ_FAILED" => &["path", "error"],
        "CATALOG_LOADED" => &["check_count", "source_ref"],
        "ITEM_PLACED" => &["item_id", "breakpoint", "x", "y"],
        "ITEM_TAKEN" => &["item_id", "breakpoint"],
        "BREAKPOINT_SWITCHED" => &["from_breakpoint", "to_breakpoint", "seeded"],
        "EXPORT_RENDERED" => &["format", "row_count"],
        _ => &[],
    }
}
