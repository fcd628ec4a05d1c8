use riskboard_core::advisor::sample_document;
use riskboard_core::audit::event::{compute_event_hash, BoardEvent, ZERO_HASH_64};
use riskboard_core::audit::log::AuditLog;
use riskboard_core::board::layout::GridPos;
use riskboard_core::board::lifecycle::{emit_document_ingested, emit_item_placed, emit_item_taken};
use riskboard_core::board::reconciler::Board;
use riskboard_core::catalog::CheckCatalog;
use riskboard_core::export::render_risks_csv;
use riskboard_core::fingerprint::{document_id_from_bytes, session_id_ulid, sha256_hex};
use std::collections::BTreeSet;

// board_runner drives the reconciler end-to-end against the bundled sample
// document and prints stable check IDs with PASS/FAIL. It exits non-zero on
// any failure.
fn main() {
    let mut failed = 0usize;
    let catalog = CheckCatalog::builtin();
    let mut board = Board::new();

    let summary = match board.ingest_text(sample_document(), &catalog) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("sample document rejected: {}", e);
            std::process::exit(1);
        }
    };

    check(
        &mut failed,
        "INGEST.ALL_UNPLACED_V1",
        board.unplaced("lg").len() == summary.expanded_count && board.placed("lg").is_empty(),
        &format!("{} findings start in the inbox", summary.expanded_count),
    );

    // Exercise moves across three breakpoints.
    board.place("0", "lg", GridPos { x: 0, y: 0, w: 2, h: 2 });
    board.place("2", "lg", GridPos { x: 6, y: 3, w: 2, h: 2 });
    board.switch_breakpoint("md");
    board.take("0", "md");
    board.switch_breakpoint("sm");
    board.place("1", "sm", GridPos { x: 2, y: 5, w: 2, h: 2 });
    check(
        &mut failed,
        "PARTITION.DISJOINT_COVER_V1",
        partitions_cover(&board),
        "placed and unplaced stay a disjoint cover per breakpoint",
    );

    let seeded = board.placed("md").iter().any(|item| item.id() == "2");
    let independent = board.placed("lg").iter().any(|item| item.id() == "0");
    check(
        &mut failed,
        "BREAKPOINT.SEED_INDEPENDENT_V1",
        seeded && independent,
        "first use copies the active breakpoint; later moves stay local",
    );

    let before = board.placed("sm").iter().find(|item| item.id() == "1").cloned();
    board.take("1", "sm");
    board.place("1", "sm", GridPos { x: 2, y: 5, w: 2, h: 2 });
    let after = board.placed("sm").iter().find(|item| item.id() == "1").cloned();
    check(
        &mut failed,
        "IDENTIFIER.STABLE_V1",
        before.is_some() && before == after,
        "take then place restores an identical descriptor",
    );

    // Identical inputs must yield an identical collection on a second board.
    let mut board2 = Board::new();
    let _ = board2.ingest_text(sample_document(), &catalog);
    check(
        &mut failed,
        "INGEST.DETERMINISTIC_V1",
        board.findings() == board2.findings(),
        "re-ingesting the sample yields a structurally identical collection",
    );

    let unplaced = board.unplaced_counts("sm");
    let placed = board.placed_counts("sm");
    check(
        &mut failed,
        "URGENCY.COUNTS_SUM_V1",
        unplaced.total() + placed.total() == board.findings().len(),
        "urgency counts over both partitions sum to the collection size",
    );

    match render_risks_csv(board.findings()) {
        Ok(csv) => {
            let rows = csv.lines().count();
            check(
                &mut failed,
                "EXPORT.CSV_COMMA_SAFE_V1",
                rows == board.findings().len() + 1 && !csv.contains('"'),
                "one unquoted row per finding plus a header",
            );
        }
        Err(e) => check(&mut failed, "EXPORT.CSV_COMMA_SAFE_V1", false, &e.to_string()),
    }

    check(
        &mut failed,
        "AUDIT.HASH_CHAIN_V1",
        audit_chain_verifies(&summary),
        "logged events chain from the zero hash",
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn partitions_cover(board: &Board) -> bool {
    let all: BTreeSet<&str> = board.findings().iter().map(|f| f.i.as_str()).collect();
    board.breakpoints().all(|bp| {
        let placed: BTreeSet<&str> = board.placed(bp).iter().map(|item| item.id()).collect();
        let unplaced: BTreeSet<&str> = board.unplaced(bp).iter().map(|item| item.id()).collect();
        placed.is_disjoint(&unplaced)
            && placed.union(&unplaced).copied().collect::<BTreeSet<_>>() == all
    })
}

fn audit_chain_verifies(summary: &riskboard_core::board::reconciler::IngestSummary) -> bool {
    let Ok(dir) = tempfile::tempdir() else {
        return false;
    };
    let path = dir.path().join("board_audit.ndjson");
    let session = session_id_ulid();
    let document_id = document_id_from_bytes(sample_document().as_bytes());
    let ts = "2026-08-01T00:00:00Z";

    let mut audit = match AuditLog::open_or_create(&path) {
        Ok(audit) => audit,
        Err(_) => return false,
    };
    let document_sha = sha256_hex(sample_document().as_bytes());
    if emit_document_ingested(&mut audit, &session, &document_id, &document_sha, summary, ts)
        .is_err()
    {
        return false;
    }
    let pos = GridPos { x: 0, y: 0, w: 2, h: 2 };
    if emit_item_placed(&mut audit, &session, &document_id, "0", "lg", pos, ts).is_err() {
        return false;
    }
    if emit_item_taken(&mut audit, &session, &document_id, "0", "lg", ts).is_err() {
        return false;
    }

    let Ok(contents) = std::fs::read_to_string(&path) else {
        return false;
    };
    let mut prev = ZERO_HASH_64.to_string();
    for line in contents.lines() {
        let Ok(event) = serde_json::from_str::<BoardEvent>(line) else {
            return false;
        };
        if event.prev_event_hash != prev {
            return false;
        }
        match compute_event_hash(&event) {
            Ok(hash) if hash == event.event_hash => prev = event.event_hash,
            _ => return false,
        }
    }
    true
}

fn check(failed: &mut usize, check_id: &str, ok: bool, message: &str) {
    println!(
        "CHECK {} {} {}",
        check_id,
        if ok { "PASS" } else { "FAIL" },
        message
    );
    if !ok {
        *failed += 1;
    }
}
