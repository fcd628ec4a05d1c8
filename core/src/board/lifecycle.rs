use crate::audit::event::{Actor, BoardEvent, NO_DOCUMENT_ID};
use crate::audit::log::AuditLog;
use crate::board::layout::GridPos;
use crate::board::reconciler::IngestSummary;
use crate::error::CoreResult;

// Emit helpers for the board's diagnostic events. Hosts call these around
// reconciler operations; the reconciler itself stays pure.

pub fn emit_ingest_started(
    audit: &mut AuditLog,
    session_id: &str,
    document_id: &str,
    source_type: &str,
    source_ref: &str,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(BoardEvent {
        ts_utc: ts_utc.to_string(),
        event_type: "DOCUMENT_INGEST_STARTED".to_string(),
        session_id: session_id.to_string(),
        document_id: document_id.to_string(),
        actor: Actor::User,
        details: serde_json::json!({
            "source_type": source_type,
            "source_ref": source_ref
        }),
        prev_event_hash: String::new(),
        event_hash: String::new(),
    })?;
    Ok(())
}

pub fn emit_document_ingested(
    audit: &mut AuditLog,
    session_id: &str,
    document_id: &str,
    document_sha256: &str,
    summary: &IngestSummary,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(BoardEvent {
        ts_utc: ts_utc.to_string(),
        event_type: "DOCUMENT_INGESTED".to_string(),
        session_id: session_id.to_string(),
        document_id: document_id.to_string(),
        actor: Actor::System,
        details: serde_json::json!({
            "document_sha256": document_sha256,
            "check_count": summary.check_count,
            "expanded_count": summary.expanded_count,
            "unknown_check_ids": summary.unknown_check_ids
        }),
        prev_event_hash: String::new(),
        event_hash: String::new(),
    })?;
    Ok(())
}

pub fn emit_document_rejected(
    audit: &mut AuditLog,
    session_id: &str,
    document_id: &str,
    reason: &str,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(BoardEvent {
        ts_utc: ts_utc.to_string(),
        event_type: "DOCUMENT_REJECTED".to_string(),
        session_id: session_id.to_string(),
        document_id: document_id.to_string(),
        actor: Actor::System,
        details: serde_json::json!({ "reason": reason }),
        prev_event_hash: String::new(),
        event_hash: String::new(),
    })?;
    Ok(())
}

pub fn emit_file_read_failed(
    audit: &mut AuditLog,
    session_id: &str,
    path: &str,
    error: &str,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(BoardEvent {
        ts_utc: ts_utc.to_string(),
        event_type: "FILE_READ_FAILED".to_string(),
        session_id: session_id.to_string(),
        document_id: NO_DOCUMENT_ID.to_string(),
        actor: Actor::System,
        details: serde_json::json!({ "path": path, "error": error }),
        prev_event_hash: String::new(),
        event_hash: String::new(),
    })?;
    Ok(())
}

pub fn emit_item_placed(
    audit: &mut AuditLog,
    session_id: &str,
    document_id: &str,
    item_id: &str,
    breakpoint: &str,
    pos: GridPos,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(BoardEvent {
        ts_utc: ts_utc.to_string(),
        event_type: "ITEM_PLACED".to_string(),
        session_id: session_id.to_string(),
        document_id: document_id.to_string(),
        actor: Actor::User,
        details: serde_json::json!({
            "item_id": item_id,
            "breakpoint": breakpoint,
            "x": pos.x,
            "y": pos.y
        }),
        prev_event_hash: String::new(),
        event_hash: String::new(),
    })?;
    Ok(())
}

pub fn emit_item_taken(
    audit: &mut AuditLog,
    session_id: &str,
    document_id: &str,
    item_id: &str,
    breakpoint: &str,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(BoardEvent {
        ts_utc: ts_utc.to_string(),
        event_type: "ITEM_TAKEN".to_string(),
        session_id: session_id.to_string(),
        document_id: document_id.to_string(),
        actor: Actor::User,
        details: serde_json::json!({ "item_id": item_id, "breakpoint": breakpoint }),
        prev_event_hash: String::new(),
        event_hash: String::new(),
    })?;
    Ok(())
}

pub fn emit_breakpoint_switched(
    audit: &mut AuditLog,
    session_id: &str,
    document_id: &str,
    from_breakpoint: &str,
    to_breakpoint: &str,
    seeded: bool,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(BoardEvent {
        ts_utc: ts_utc.to_string(),
        event_type: "BREAKPOINT_SWITCHED".to_string(),
        session_id: session_id.to_string(),
        document_id: document_id.to_string(),
        actor: Actor::User,
        details: serde_json::json!({
            "from_breakpoint": from_breakpoint,
            "to_breakpoint": to_breakpoint,
            "seeded": seeded
        }),
        prev_event_hash: String::new(),
        event_hash: String::new(),
    })?;
    Ok(())
}

pub fn emit_board_reset(
    audit: &mut AuditLog,
    session_id: &str,
    document_id: &str,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(BoardEvent {
        ts_utc: ts_utc.to_string(),
        event_type: "BOARD_RESET".to_string(),
        session_id: session_id.to_string(),
        document_id: document_id.to_string(),
        actor: Actor::User,
        details: serde_json::json!({}),
        prev_event_hash: String::new(),
        event_hash: String::new(),
    })?;
    Ok(())
}

pub fn emit_export_rendered(
    audit: &mut AuditLog,
    session_id: &str,
    document_id: &str,
    format: &str,
    row_count: usize,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(BoardEvent {
        ts_utc: ts_utc.to_string(),
        event_type: "EXPORT_RENDERED".to_string(),
        session_id: session_id.to_string(),
        document_id: document_id.to_string(),
        actor: Actor::User,
        details: serde_json::json!({ "format": format, "row_count": row_count }),
        prev_event_hash: String::new(),
        event_hash: String::new(),
    })?;
    Ok(())
}
