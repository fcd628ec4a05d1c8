use crate::advisor::expand::{expand_flagged_resources, ExpandedDocument};
use crate::advisor::model::{ExpandedFinding, RawFinding};
use crate::advisor::parser::parse_findings_document;
use crate::board::layout::{BoardItem, GridPos};
use crate::board::urgency::{count_by_status, UrgencyCounts};
use crate::catalog::CheckCatalog;
use crate::error::CoreResult;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_BREAKPOINT: &str = "lg";

/// Summary of one successful ingestion.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IngestSummary {
    pub check_count: usize,
    pub expanded_count: usize,
    pub unknown_check_ids: Vec<String>,
}

/// Owns the canonical findings collection and the per-breakpoint placed /
/// unplaced partitions.
///
/// Every finding belongs to exactly one partition per visited breakpoint.
/// The board is single-threaded; hosts with more than one thread wrap the
/// whole board in one lock so moves stay atomic with partition reads.
#[derive(Debug)]
pub struct Board {
    findings: Vec<ExpandedFinding>,
    current_breakpoint: String,
    placed: BTreeMap<String, Vec<BoardItem>>,
    unplaced: BTreeMap<String, Vec<BoardItem>>,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self {
            findings: Vec::new(),
            current_breakpoint: DEFAULT_BREAKPOINT.to_string(),
            placed: BTreeMap::new(),
            unplaced: BTreeMap::new(),
        };
        board.seed_breakpoint(DEFAULT_BREAKPOINT);
        board
    }

    /// Parse and ingest a findings document. Parsing and expansion finish
    /// before any state is touched, so a malformed document leaves the prior
    /// collection and partitions queryable.
    pub fn ingest_text(&mut self, text: &str, catalog: &CheckCatalog) -> CoreResult<IngestSummary> {
        let findings = parse_findings_document(text)?;
        Ok(self.ingest(&findings, catalog))
    }

    /// Replace the whole collection with the expansion of `findings`.
    ///
    /// All items start unplaced at the current breakpoint; state for every
    /// other breakpoint is discarded. Ingestion never merges documents.
    pub fn ingest(&mut self, findings: &[RawFinding], catalog: &CheckCatalog) -> IngestSummary {
        let ExpandedDocument {
            items,
            check_count,
            unknown_check_ids,
        } = expand_flagged_resources(findings, catalog);

        let summary = IngestSummary {
            check_count,
            expanded_count: items.len(),
            unknown_check_ids,
        };

        self.findings = items;
        self.placed.clear();
        self.unplaced.clear();
        self.placed
            .insert(self.current_breakpoint.clone(), Vec::new());
        self.unplaced.insert(
            self.current_breakpoint.clone(),
            self.findings.iter().cloned().map(BoardItem::unplaced).collect(),
        );
        summary
    }

    /// Move an unplaced card onto the grid of `breakpoint`, stamping a fresh
    /// copy of its finding payload. Returns false (and changes nothing)
    /// unless the card is currently unplaced at that breakpoint.
    pub fn place(&mut self, item_id: &str, breakpoint: &str, pos: GridPos) -> bool {
        let Some(inbox) = self.unplaced.get_mut(breakpoint) else {
            return false;
        };
        let Some(slot) = inbox.iter().position(|item| item.id() == item_id) else {
            return false;
        };
        let mut item = inbox.remove(slot);
        // The inbox copy may predate an earlier placement round-trip; the
        // grid descriptor always reflects the collection at placement time.
        if let Some(finding) = self.findings.iter().find(|f| f.i == item_id) {
            item.card = finding.clone();
        }
        item.pos = pos;
        self.placed
            .entry(breakpoint.to_string())
            .or_default()
            .push(item);
        true
    }

    /// Move a placed card back to the inbox of `breakpoint`, keeping the
    /// payload and geometry captured at placement time. Returns false if the
    /// card is not placed there.
    pub fn take(&mut self, item_id: &str, breakpoint: &str) -> bool {
        let Some(grid) = self.placed.get_mut(breakpoint) else {
            return false;
        };
        let Some(slot) = grid.iter().position(|item| item.id() == item_id) else {
            return false;
        };
        let item = grid.remove(slot);
        self.unplaced
            .entry(breakpoint.to_string())
            .or_default()
            .push(item);
        true
    }

    /// Make `breakpoint` active. First use seeds both of its partitions from
    /// the breakpoint that was active, carrying membership and geometry over
    /// verbatim; item geometry is never recomputed per breakpoint.
    pub fn switch_breakpoint(&mut self, breakpoint: &str) {
        if !self.placed.contains_key(breakpoint) {
            let grid_seed = self
                .placed
                .get(&self.current_breakpoint)
                .cloned()
                .unwrap_or_default();
            let inbox_seed = self
                .unplaced
                .get(&self.current_breakpoint)
                .cloned()
                .unwrap_or_default();
            self.placed.insert(breakpoint.to_string(), grid_seed);
            self.unplaced.insert(breakpoint.to_string(), inbox_seed);
        }
        self.current_breakpoint = breakpoint.to_string();
    }

    /// Clear the collection and every breakpoint's partitions. The active
    /// breakpoint label survives a reset.
    pub fn reset(&mut self) {
        self.findings.clear();
        self.placed.clear();
        self.unplaced.clear();
        let current = self.current_breakpoint.clone();
        self.seed_breakpoint(&current);
    }

    pub fn findings(&self) -> &[ExpandedFinding] {
        &self.findings
    }

    pub fn current_breakpoint(&self) -> &str {
        &self.current_breakpoint
    }

    /// Breakpoints that have been visited (and therefore hold state).
    pub fn breakpoints(&self) -> impl Iterator<Item = &str> {
        self.placed.keys().map(String::as_str)
    }

    pub fn placed(&self, breakpoint: &str) -> &[BoardItem] {
        self.placed.get(breakpoint).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn unplaced(&self, breakpoint: &str) -> &[BoardItem] {
        self.unplaced
            .get(breakpoint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn placed_counts(&self, breakpoint: &str) -> UrgencyCounts {
        count_by_status(self.placed(breakpoint).iter().map(|item| &item.card))
    }

    pub fn unplaced_counts(&self, breakpoint: &str) -> UrgencyCounts {
        count_by_status(self.unplaced(breakpoint).iter().map(|item| &item.card))
    }

    fn seed_breakpoint(&mut self, breakpoint: &str) {
        self.placed.insert(breakpoint.to_string(), Vec::new());
        self.unplaced.insert(breakpoint.to_string(), Vec::new());
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::layout::DEFAULT_SLOT;

    fn two_item_board() -> (Board, CheckCatalog) {
        let catalog = CheckCatalog::builtin();
        let mut board = Board::new();
        board
            .ingest_text(
                r#"[{
                    "TrustedAdvisorCheckId": "a",
                    "TrustedAdvisorCheckName": "X",
                    "FlaggedResources": [
                        {"status": "error", "region": "us-east-1", "resourceId": "r-0"},
                        {"status": "warning", "region": "us-east-1", "resourceId": "r-1"}
                    ]
                }]"#,
                &catalog,
            )
            .unwrap();
        (board, catalog)
    }

    #[test]
    fn ingest_starts_fully_unplaced() {
        let (board, _) = two_item_board();
        assert_eq!(board.unplaced("lg").len(), 2);
        assert!(board.placed("lg").is_empty());
        assert_eq!(board.unplaced("lg")[0].pos, DEFAULT_SLOT);
    }

    #[test]
    fn place_then_take_round_trips() {
        let (mut board, _) = two_item_board();
        let pos = GridPos { x: 0, y: 0, w: 3, h: 2 };
        assert!(board.place("1", "lg", pos));
        assert_eq!(board.placed("lg").len(), 1);
        assert_eq!(board.placed("lg")[0].pos, pos);
        assert!(board.take("1", "lg"));
        assert_eq!(board.unplaced("lg").len(), 2);
        assert!(board.placed("lg").is_empty());
    }

    #[test]
    fn moves_are_noops_for_wrong_partition() {
        let (mut board, _) = two_item_board();
        assert!(!board.take("0", "lg"));
        assert!(board.place("0", "lg", DEFAULT_SLOT));
        assert!(!board.place("0", "lg", DEFAULT_SLOT));
        assert!(!board.place("0", "md", DEFAULT_SLOT));
    }

    #[test]
    fn reset_keeps_active_breakpoint() {
        let (mut board, _) = two_item_board();
        board.switch_breakpoint("md");
        board.reset();
        assert_eq!(board.current_breakpoint(), "md");
        assert!(board.findings().is_empty());
        assert!(board.unplaced("md").is_empty());
        assert!(board.placed("lg").is_empty());
    }
}
