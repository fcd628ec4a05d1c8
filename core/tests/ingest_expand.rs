use riskboard_core::advisor::sample_document;
use riskboard_core::board::reconciler::Board;
use riskboard_core::catalog::CheckCatalog;

#[test]
fn unknown_check_expands_with_raw_metadata_join() {
    let catalog = CheckCatalog::builtin();
    let mut board = Board::new();
    let summary = board
        .ingest_text(
            r#"[{
                "TrustedAdvisorCheckId": "XXXXXXXXXX",
                "TrustedAdvisorCheckName": "Mystery Check",
                "FlaggedResources": [
                    {"status": "error", "region": "us-east-1", "resourceId": "vol-123", "metadata": ["vol-123"]}
                ]
            }]"#,
            &catalog,
        )
        .unwrap();

    assert_eq!(summary.expanded_count, 1);
    assert_eq!(summary.unknown_check_ids, ["XXXXXXXXXX"]);

    let finding = &board.findings()[0];
    assert_eq!(finding.i, "0");
    assert_eq!(finding.resource_label, "vol-123");
    assert_eq!(finding.unique_id, "XXXXXXXXXX_vol-123");
}

#[test]
fn reingesting_same_document_is_idempotent() {
    let catalog = CheckCatalog::builtin();
    let mut board = Board::new();

    let first = board.ingest_text(sample_document(), &catalog).unwrap();
    let first_items = board.findings().to_vec();
    board.place("0", "lg", riskboard_core::board::layout::DEFAULT_SLOT);

    let second = board.ingest_text(sample_document(), &catalog).unwrap();
    assert_eq!(first, second);
    assert_eq!(board.findings(), first_items.as_slice());
    // Partitions reset to fully unplaced both times.
    assert_eq!(board.unplaced("lg").len(), second.expanded_count);
    assert!(board.placed("lg").is_empty());
}

#[test]
fn malformed_document_leaves_prior_state_untouched() {
    let catalog = CheckCatalog::builtin();
    let mut board = Board::new();
    board.ingest_text(sample_document(), &catalog).unwrap();
    board.place("1", "lg", riskboard_core::board::layout::DEFAULT_SLOT);
    let findings_before = board.findings().to_vec();

    let result = board.ingest_text(r#"{"not": "an array"}"#, &catalog);
    assert!(result.is_err());

    assert_eq!(board.findings(), findings_before.as_slice());
    assert_eq!(board.placed("lg").len(), 1);
    assert_eq!(board.unplaced("lg").len(), findings_before.len() - 1);
}

#[test]
fn finding_without_resources_contributes_nothing() {
    let catalog = CheckCatalog::builtin();
    let mut board = Board::new();
    let summary = board
        .ingest_text(
            r#"[
                {"TrustedAdvisorCheckId": "a", "TrustedAdvisorCheckName": "Empty", "FlaggedResources": []},
                {"TrustedAdvisorCheckId": "b", "TrustedAdvisorCheckName": "One", "FlaggedResources": [
                    {"status": "ok", "region": "us-east-1", "resourceId": "r-1"}
                ]}
            ]"#,
            &catalog,
        )
        .unwrap();
    assert_eq!(summary.check_count, 2);
    assert_eq!(summary.expanded_count, 1);
    assert_eq!(board.findings()[0].unique_id, "b_r-1");
}

#[test]
fn sample_document_ingests_cleanly() {
    let catalog = CheckCatalog::builtin();
    let mut board = Board::new();
    let summary = board.ingest_text(sample_document(), &catalog).unwrap();
    assert_eq!(summary.check_count, 4);
    assert_eq!(summary.expanded_count, 5);
    // Every check in the sample is covered by the built-in catalog.
    assert!(summary.unknown_check_ids.is_empty());
    let labels: Vec<&str> = board
        .findings()
        .iter()
        .map(|f| f.resource_label.as_str())
        .collect();
    assert!(labels[0].starts_with("Region: us-east-1, Security Group Name: web-tier"));
}
