#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use riskboard_core::advisor::sample_document;
use riskboard_core::advisor::sanitize::strip_description_markup;
use riskboard_core::audit::event::{now_rfc3339_utc, NO_DOCUMENT_ID};
use riskboard_core::audit::log::AuditLog;
use riskboard_core::board::layout::{BoardItem, GridPos};
use riskboard_core::board::lifecycle::{
    emit_board_reset, emit_breakpoint_switched, emit_document_ingested, emit_document_rejected,
    emit_export_rendered, emit_file_read_failed, emit_ingest_started, emit_item_placed,
    emit_item_taken,
};
use riskboard_core::board::reconciler::Board;
use riskboard_core::board::urgency::UrgencyCounts;
use riskboard_core::catalog::CheckCatalog;
use riskboard_core::export::{csv_export_file_name, render_risks_csv, render_risks_json};
use riskboard_core::fingerprint::{document_id_from_bytes, session_id_ulid, sha256_hex};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

// All board access goes through this one lock so every operation is atomic
// with respect to partition reads.
struct BoardShell {
    board: Board,
    catalog: CheckCatalog,
    audit: AuditLog,
    session_id: String,
    document_id: String,
}

type SharedShell = Mutex<BoardShell>;

#[derive(Debug, Serialize)]
struct UiIngestSummary {
    document_id: String,
    check_count: usize,
    expanded_count: usize,
    unknown_check_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct UiBoardSnapshot {
    current_breakpoint: String,
    unplaced: Vec<BoardItem>,
    placed: Vec<BoardItem>,
    unplaced_counts: UrgencyCounts,
    placed_counts: UrgencyCounts,
    finding_count: usize,
}

#[derive(Debug, Serialize)]
struct UiExport {
    file_name: String,
    content: String,
}

#[tauri::command]
fn load_sample_document(state: tauri::State<SharedShell>) -> Result<UiIngestSummary, String> {
    let mut shell = lock(&state)?;
    ingest_text(&mut shell, sample_document(), "sample", "bundled sample")
}

#[tauri::command]
fn ingest_document_text(
    text: String,
    state: tauri::State<SharedShell>,
) -> Result<UiIngestSummary, String> {
    let mut shell = lock(&state)?;
    ingest_text(&mut shell, &text, "text", "pasted document")
}

#[tauri::command]
fn ingest_document_file(
    path: String,
    state: tauri::State<SharedShell>,
) -> Result<UiIngestSummary, String> {
    let mut shell = lock(&state)?;
    // Single-shot read to completion; a failed read is logged and leaves the
    // board untouched.
    match std::fs::read_to_string(&path) {
        Ok(text) => ingest_text(&mut shell, &text, "file", &path),
        Err(err) => {
            let shell = &mut *shell;
            let err = riskboard_core::error::CoreError::FileRead(err.to_string());
            let ts = now_rfc3339_utc();
            emit_file_read_failed(&mut shell.audit, &shell.session_id, &path, &err.to_string(), &ts)
                .map_err(|e| e.to_string())?;
            Err(err.to_string())
        }
    }
}

#[tauri::command]
fn place_item(
    item_id: String,
    breakpoint: String,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    state: tauri::State<SharedShell>,
) -> Result<bool, String> {
    let mut shell = lock(&state)?;
    let shell = &mut *shell;
    let pos = GridPos { x, y, w, h };
    let moved = shell.board.place(&item_id, &breakpoint, pos);
    if moved {
        let ts = now_rfc3339_utc();
        emit_item_placed(
            &mut shell.audit,
            &shell.session_id,
            &shell.document_id,
            &item_id,
            &breakpoint,
            pos,
            &ts,
        )
        .map_err(|e| e.to_string())?;
    }
    Ok(moved)
}

#[tauri::command]
fn take_item(
    item_id: String,
    breakpoint: String,
    state: tauri::State<SharedShell>,
) -> Result<bool, String> {
    let mut shell = lock(&state)?;
    let shell = &mut *shell;
    let moved = shell.board.take(&item_id, &breakpoint);
    if moved {
        let ts = now_rfc3339_utc();
        emit_item_taken(
            &mut shell.audit,
            &shell.session_id,
            &shell.document_id,
            &item_id,
            &breakpoint,
            &ts,
        )
        .map_err(|e| e.to_string())?;
    }
    Ok(moved)
}

#[tauri::command]
fn switch_breakpoint(breakpoint: String, state: tauri::State<SharedShell>) -> Result<(), String> {
    let mut shell = lock(&state)?;
    let shell = &mut *shell;
    let from = shell.board.current_breakpoint().to_string();
    let seeded = !shell.board.breakpoints().any(|bp| bp == breakpoint);
    shell.board.switch_breakpoint(&breakpoint);
    let ts = now_rfc3339_utc();
    emit_breakpoint_switched(
        &mut shell.audit,
        &shell.session_id,
        &shell.document_id,
        &from,
        &breakpoint,
        seeded,
        &ts,
    )
    .map_err(|e| e.to_string())
}

#[tauri::command]
fn reset_board(state: tauri::State<SharedShell>) -> Result<(), String> {
    let mut shell = lock(&state)?;
    let shell = &mut *shell;
    shell.board.reset();
    let ts = now_rfc3339_utc();
    emit_board_reset(&mut shell.audit, &shell.session_id, &shell.document_id, &ts)
        .map_err(|e| e.to_string())?;
    shell.document_id = NO_DOCUMENT_ID.to_string();
    Ok(())
}

#[tauri::command]
fn board_snapshot(state: tauri::State<SharedShell>) -> Result<UiBoardSnapshot, String> {
    let shell = lock(&state)?;
    let bp = shell.board.current_breakpoint();
    Ok(UiBoardSnapshot {
        current_breakpoint: bp.to_string(),
        unplaced: shell.board.unplaced(bp).to_vec(),
        placed: shell.board.placed(bp).to_vec(),
        unplaced_counts: shell.board.unplaced_counts(bp),
        placed_counts: shell.board.placed_counts(bp),
        finding_count: shell.board.findings().len(),
    })
}

#[tauri::command]
fn export_risks_csv_file(state: tauri::State<SharedShell>) -> Result<UiExport, String> {
    let mut shell = lock(&state)?;
    let shell = &mut *shell;
    let content = render_risks_csv(shell.board.findings()).map_err(|e| e.to_string())?;
    let ts = now_rfc3339_utc();
    emit_export_rendered(
        &mut shell.audit,
        &shell.session_id,
        &shell.document_id,
        "csv",
        shell.board.findings().len(),
        &ts,
    )
    .map_err(|e| e.to_string())?;
    Ok(UiExport {
        file_name: csv_export_file_name(&ts),
        content,
    })
}

#[tauri::command]
fn export_risks_json_text(state: tauri::State<SharedShell>) -> Result<String, String> {
    let mut shell = lock(&state)?;
    let shell = &mut *shell;
    let content = render_risks_json(shell.board.findings()).map_err(|e| e.to_string())?;
    let ts = now_rfc3339_utc();
    emit_export_rendered(
        &mut shell.audit,
        &shell.session_id,
        &shell.document_id,
        "json",
        shell.board.findings().len(),
        &ts,
    )
    .map_err(|e| e.to_string())?;
    Ok(content)
}

#[tauri::command]
fn check_description_text(text: String) -> String {
    strip_description_markup(&text)
}

fn ingest_text(
    shell: &mut BoardShell,
    text: &str,
    source_type: &str,
    source_ref: &str,
) -> Result<UiIngestSummary, String> {
    let shell = &mut *shell;
    let ts = now_rfc3339_utc();
    let document_id = document_id_from_bytes(text.as_bytes());
    emit_ingest_started(
        &mut shell.audit,
        &shell.session_id,
        &document_id,
        source_type,
        source_ref,
        &ts,
    )
    .map_err(|e| e.to_string())?;

    match shell.board.ingest_text(text, &shell.catalog) {
        Ok(summary) => {
            shell.document_id = document_id.clone();
            emit_document_ingested(
                &mut shell.audit,
                &shell.session_id,
                &document_id,
                &sha256_hex(text.as_bytes()),
                &summary,
                &ts,
            )
            .map_err(|e| e.to_string())?;
            Ok(UiIngestSummary {
                document_id,
                check_count: summary.check_count,
                expanded_count: summary.expanded_count,
                unknown_check_ids: summary.unknown_check_ids,
            })
        }
        Err(err) => {
            emit_document_rejected(
                &mut shell.audit,
                &shell.session_id,
                &document_id,
                &err.to_string(),
                &ts,
            )
            .map_err(|e| e.to_string())?;
            Err(err.to_string())
        }
    }
}

fn lock<'a>(state: &'a tauri::State<SharedShell>) -> Result<MutexGuard<'a, BoardShell>, String> {
    state.inner().lock().map_err(|_| "board state lock poisoned".to_string())
}

fn make_runtime_dir() -> std::path::PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("riskboard_{}", ts))
}

fn main() {
    let runtime_dir = make_runtime_dir();
    let audit = AuditLog::open_or_create(runtime_dir.join("board_audit.ndjson"))
        .expect("error while opening the board audit log");
    let shell = BoardShell {
        board: Board::new(),
        catalog: CheckCatalog::builtin(),
        audit,
        session_id: session_id_ulid(),
        document_id: NO_DOCUMENT_ID.to_string(),
    };

    tauri::Builder::default()
        .manage(Mutex::new(shell))
        .invoke_handler(tauri::generate_handler![
            load_sample_document,
            ingest_document_text,
            ingest_document_file,
            place_item,
            take_item,
            switch_breakpoint,
            reset_board,
            board_snapshot,
            export_risks_csv_file,
            export_risks_json_text,
            check_description_text
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
