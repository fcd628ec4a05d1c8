use riskboard_core::board::layout::GridPos;
use riskboard_core::board::reconciler::Board;
use riskboard_core::catalog::CheckCatalog;
use std::collections::BTreeSet;

fn four_item_board() -> Board {
    let catalog = CheckCatalog::builtin();
    let mut board = Board::new();
    board
        .ingest_text(
            r#"[
                {
                    "TrustedAdvisorCheckId": "a",
                    "TrustedAdvisorCheckName": "First",
                    "FlaggedResources": [
                        {"status": "error", "region": "us-east-1", "resourceId": "r-0"},
                        {"status": "warning", "region": "us-east-1", "resourceId": "r-1"}
                    ]
                },
                {
                    "TrustedAdvisorCheckId": "b",
                    "TrustedAdvisorCheckName": "Second",
                    "FlaggedResources": [
                        {"status": "error", "region": "eu-west-1", "resourceId": "r-2"},
                        {"status": "ok", "region": "eu-west-1", "resourceId": "r-3"}
                    ]
                }
            ]"#,
            &catalog,
        )
        .unwrap();
    board
}

// Partitions must stay a disjoint cover of the collection for every visited
// breakpoint.
fn assert_partitions_cover(board: &Board) {
    let all: BTreeSet<&str> = board.findings().iter().map(|f| f.i.as_str()).collect();
    let breakpoints: Vec<String> = board.breakpoints().map(str::to_string).collect();
    for bp in breakpoints {
        let placed: BTreeSet<&str> = board.placed(&bp).iter().map(|i| i.id()).collect();
        let unplaced: BTreeSet<&str> = board.unplaced(&bp).iter().map(|i| i.id()).collect();
        assert!(
            placed.is_disjoint(&unplaced),
            "partitions overlap at breakpoint {}",
            bp
        );
        let union: BTreeSet<&str> = placed.union(&unplaced).copied().collect();
        assert_eq!(union, all, "partitions do not cover collection at {}", bp);
    }
}

#[test]
fn partitions_cover_collection_through_moves() {
    let mut board = four_item_board();
    assert_partitions_cover(&board);

    board.place("0", "lg", GridPos { x: 0, y: 0, w: 2, h: 2 });
    board.place("3", "lg", GridPos { x: 8, y: 4, w: 2, h: 2 });
    assert_partitions_cover(&board);

    board.switch_breakpoint("md");
    board.take("0", "md");
    assert_partitions_cover(&board);

    board.switch_breakpoint("sm");
    board.place("1", "sm", GridPos { x: 2, y: 2, w: 2, h: 2 });
    assert_partitions_cover(&board);
}

#[test]
fn take_then_place_restores_identical_item() {
    let mut board = four_item_board();
    let pos = GridPos { x: 4, y: 1, w: 3, h: 2 };
    board.place("2", "lg", pos);
    let before = board.placed("lg")[0].clone();

    assert!(board.take("2", "lg"));
    assert!(board.place("2", "lg", pos));
    let after = &board.placed("lg")[0];

    assert_eq!(&before, after);
    assert_eq!(after.card.i, "2");
    assert_eq!(after.card.unique_id, "b_r-2");
}

#[test]
fn new_breakpoint_seeds_from_active_one() {
    let mut board = four_item_board();
    let pos = GridPos { x: 1, y: 1, w: 2, h: 2 };
    board.place("2", "lg", pos);

    board.switch_breakpoint("md");
    assert_eq!(board.current_breakpoint(), "md");
    let placed_md = board.placed("md");
    assert_eq!(placed_md.len(), 1);
    assert_eq!(placed_md[0].id(), "2");
    assert_eq!(placed_md[0].pos, pos);

    // Taking from md must not disturb lg.
    assert!(board.take("2", "md"));
    assert!(board.placed("md").is_empty());
    assert_eq!(board.placed("lg").len(), 1);
    assert_eq!(board.placed("lg")[0].id(), "2");
}

#[test]
fn revisited_breakpoint_keeps_its_own_state() {
    let mut board = four_item_board();
    board.place("0", "lg", GridPos { x: 0, y: 0, w: 2, h: 2 });
    board.switch_breakpoint("md");
    board.take("0", "md");
    board.switch_breakpoint("lg");
    // lg state was established before md diverged; no re-seeding happens.
    assert_eq!(board.placed("lg").len(), 1);
    board.switch_breakpoint("md");
    assert!(board.placed("md").is_empty());
}

#[test]
fn unvisited_breakpoint_reads_as_empty() {
    let board = four_item_board();
    assert!(board.placed("xxs").is_empty());
    assert!(board.unplaced("xxs").is_empty());
}

#[test]
fn urgency_counts_split_by_partition() {
    let mut board = four_item_board();
    board.place("0", "lg", GridPos { x: 0, y: 0, w: 2, h: 2 });
    board.place("1", "lg", GridPos { x: 2, y: 0, w: 2, h: 2 });

    let placed = board.placed_counts("lg");
    assert_eq!((placed.high, placed.medium, placed.low), (1, 1, 0));
    let unplaced = board.unplaced_counts("lg");
    assert_eq!((unplaced.high, unplaced.medium, unplaced.low), (1, 0, 1));
    assert_eq!(placed.total() + unplaced.total(), board.findings().len());
}
