//! Page/line structure for interactive editing and fixed-layout export.
//!
//! Edit mode: pages are managed by hand and never split automatically. Any
//! page index that does not exist yet is materialized as an empty page before
//! the operation runs. Materialization stops at [`MAX_PAGES`] pages and
//! [`MAX_LINES_PER_PAGE`] lines; larger indices land on the last slot.
//!
//! Export mode: manual page boundaries are ignored. All lines are flattened
//! in page-then-row order and re-chunked into pages of a fixed capacity.

use serde::{Deserialize, Serialize};

use super::number;
use super::types::{Invoice, LineField, LineItem, Page};

/// Highest page count an out-of-range page index can grow the invoice to.
pub const MAX_PAGES: usize = 1_000;

/// Highest line count an out-of-range line index can grow a page to.
pub const MAX_LINES_PER_PAGE: usize = 1_000;

/// Slot an index refers to in a list of `len` entries: itself when it exists
/// or fits under `limit`, otherwise the last slot allowed.
fn materialized_index(index: usize, len: usize, limit: usize) -> usize {
    index.min(limit.max(len).saturating_sub(1))
}

impl Invoice {
    /// Append a blank line to `page`.
    pub fn with_line_added(&self, page: usize) -> Invoice {
        let mut next = self.clone();
        next.page_mut(page).items.push(LineItem::default());
        next
    }

    /// Set one field of a line. Quantity and rate pass through
    /// [`number::normalize`]; descriptions are stored verbatim.
    ///
    /// A line index past the end of the page is materialized with blank
    /// lines, up to [`MAX_LINES_PER_PAGE`].
    pub fn with_line_edited(&self, page: usize, line: usize, field: LineField, raw: &str) -> Invoice {
        let mut next = self.clone();
        let items = &mut next.page_mut(page).items;
        let line = materialized_index(line, items.len(), MAX_LINES_PER_PAGE);
        if line >= items.len() {
            items.resize_with(line + 1, LineItem::default);
        }
        let item = &mut items[line];
        match field {
            LineField::Description => item.description = raw.to_string(),
            LineField::Quantity => item.quantity = number::normalize(raw).display,
            LineField::Rate => item.rate = number::normalize(raw).display,
        }
        next
    }

    /// Remove a line from `page`. Out-of-range lines are ignored.
    pub fn with_line_removed(&self, page: usize, line: usize) -> Invoice {
        let mut next = self.clone();
        let items = &mut next.page_mut(page).items;
        if line < items.len() {
            items.remove(line);
        }
        next
    }

    /// Append an empty page.
    pub fn with_page_added(&self) -> Invoice {
        let mut next = self.clone();
        next.pages.push(Page::default());
        next
    }

    /// Remove `page`. The invoice always keeps at least one page, so removing
    /// the only page leaves a single empty one. Out-of-range is ignored.
    pub fn with_page_removed(&self, page: usize) -> Invoice {
        let mut next = self.clone();
        if page < next.pages.len() {
            next.pages.remove(page);
        }
        if next.pages.is_empty() {
            next.pages.push(Page::default());
        }
        next
    }

    fn page_mut(&mut self, index: usize) -> &mut Page {
        let slot = materialized_index(index, self.pages.len(), MAX_PAGES);
        if slot >= self.pages.len() {
            tracing::debug!(
                index,
                slot,
                existing = self.pages.len(),
                "materializing empty pages"
            );
            self.pages.resize_with(slot + 1, Page::default);
        }
        &mut self.pages[slot]
    }
}

/// One page of the fixed-size export layout.
///
/// Every export page shows the table header row and its chunk of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPage {
    /// 1-based page number.
    pub number: usize,
    pub items: Vec<LineItem>,
    /// Only the first page shows the document header (parties, dates, logo).
    pub renders_header: bool,
    /// Only the last page shows the totals and footer section.
    pub renders_totals: bool,
}

/// Chunk lines into pages of `capacity`.
///
/// Always returns `max(1, ceil(len / capacity))` pages; a capacity of zero is
/// treated as one. Concatenating the chunks reproduces `items` exactly.
pub fn chunk_for_export(items: &[LineItem], capacity: usize) -> Vec<ExportPage> {
    let capacity = capacity.max(1);
    let mut chunks: Vec<&[LineItem]> = items.chunks(capacity).collect();
    if chunks.is_empty() {
        chunks.push(&[]);
    }

    let last = chunks.len() - 1;
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| ExportPage {
            number: i + 1,
            items: chunk.to_vec(),
            renders_header: i == 0,
            renders_totals: i == last,
        })
        .collect()
}

/// Export layout of an invoice, ignoring its manual page boundaries.
pub fn export_pages(invoice: &Invoice, capacity: usize) -> Vec<ExportPage> {
    let flat: Vec<LineItem> = invoice.line_items().cloned().collect();
    chunk_for_export(&flat, capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<LineItem> {
        (0..n)
            .map(|i| LineItem::new(format!("item {i}"), "1", "1"))
            .collect()
    }

    #[test]
    fn edit_quantity_normalizes() {
        let inv = Invoice::blank().with_line_edited(0, 0, LineField::Quantity, "2.50");
        assert_eq!(inv.pages[0].items[0].quantity, "2,5");
    }

    #[test]
    fn edit_quantity_mid_edit_preserved() {
        let inv = Invoice::blank().with_line_edited(0, 0, LineField::Quantity, "12.");
        assert_eq!(inv.pages[0].items[0].quantity, "12.");
    }

    #[test]
    fn edit_description_verbatim() {
        let inv = Invoice::blank().with_line_edited(0, 0, LineField::Description, " 12.0 Stunden ");
        assert_eq!(inv.pages[0].items[0].description, " 12.0 Stunden ");
    }

    #[test]
    fn edit_materializes_page_and_line() {
        let inv = Invoice::blank().with_line_edited(2, 1, LineField::Rate, "5");
        assert_eq!(inv.pages.len(), 3);
        assert!(inv.pages[1].items.is_empty());
        assert_eq!(inv.pages[2].items.len(), 2);
        assert_eq!(inv.pages[2].items[1].rate, "5");
    }

    #[test]
    fn huge_line_index_is_capped() {
        let inv = Invoice::blank().with_line_edited(0, usize::MAX, LineField::Description, "x");
        assert_eq!(inv.pages[0].items.len(), MAX_LINES_PER_PAGE);
        assert_eq!(inv.pages[0].items[MAX_LINES_PER_PAGE - 1].description, "x");

        let again = inv.with_line_edited(0, usize::MAX, LineField::Description, "y");
        assert_eq!(again.pages[0].items.len(), MAX_LINES_PER_PAGE);
        assert_eq!(again.pages[0].items[MAX_LINES_PER_PAGE - 1].description, "y");
    }

    #[test]
    fn huge_page_index_is_capped() {
        let inv = Invoice::blank().with_line_added(usize::MAX);
        assert_eq!(inv.pages.len(), MAX_PAGES);
        assert_eq!(inv.pages[MAX_PAGES - 1].items.len(), 1);

        let again = inv.with_line_added(usize::MAX);
        assert_eq!(again.pages.len(), MAX_PAGES);
        assert_eq!(again.pages[MAX_PAGES - 1].items.len(), 2);
    }

    #[test]
    fn past_cap_targets_existing_last_page() {
        let inv = Invoice {
            pages: vec![Page::default(); MAX_PAGES + 5],
            ..Invoice::blank()
        };
        let next = inv.with_line_added(MAX_PAGES + 10);
        assert_eq!(next.pages.len(), MAX_PAGES + 5);
        assert_eq!(next.pages[MAX_PAGES + 4].items.len(), 1);
    }

    #[test]
    fn edits_leave_previous_snapshot_untouched() {
        let before = Invoice::blank();
        let after = before.with_line_added(0);
        assert_eq!(before.line_count(), 1);
        assert_eq!(after.line_count(), 2);
    }

    #[test]
    fn remove_line_out_of_range_is_noop() {
        let inv = Invoice::blank();
        assert_eq!(inv.with_line_removed(0, 5).pages, inv.pages);
    }

    #[test]
    fn remove_line_on_missing_page_materializes() {
        let inv = Invoice::blank().with_line_removed(1, 0);
        assert_eq!(inv.pages.len(), 2);
        assert_eq!(inv.line_count(), 1);
    }

    #[test]
    fn remove_last_page_keeps_one() {
        let inv = Invoice::blank().with_page_removed(0);
        assert_eq!(inv.pages, vec![Page::default()]);
    }

    #[test]
    fn add_page_appends_empty() {
        let inv = Invoice::blank().with_page_added();
        assert_eq!(inv.pages.len(), 2);
        assert!(inv.pages[1].items.is_empty());
    }

    #[test]
    fn export_chunk_counts() {
        assert_eq!(chunk_for_export(&lines(0), 20).len(), 1);
        assert_eq!(chunk_for_export(&lines(1), 20).len(), 1);
        assert_eq!(chunk_for_export(&lines(20), 20).len(), 1);
        assert_eq!(chunk_for_export(&lines(21), 20).len(), 2);
        assert_eq!(chunk_for_export(&lines(45), 20).len(), 3);
    }

    #[test]
    fn export_header_and_totals_flags() {
        let pages = chunk_for_export(&lines(45), 20);
        assert!(pages[0].renders_header && !pages[0].renders_totals);
        assert!(!pages[1].renders_header && !pages[1].renders_totals);
        assert!(!pages[2].renders_header && pages[2].renders_totals);
        assert_eq!(pages[2].items.len(), 5);
        assert_eq!(pages[2].number, 3);
    }

    #[test]
    fn single_export_page_has_header_and_totals() {
        let pages = chunk_for_export(&[], 20);
        assert!(pages[0].items.is_empty());
        assert!(pages[0].renders_header);
        assert!(pages[0].renders_totals);
    }

    #[test]
    fn zero_capacity_treated_as_one() {
        assert_eq!(chunk_for_export(&lines(3), 0).len(), 3);
    }

    #[test]
    fn export_ignores_manual_pages() {
        let inv = Invoice {
            pages: vec![
                Page::new(lines(3)),
                Page::default(),
                Page::new(lines(2)),
            ],
            ..Invoice::blank()
        };
        let pages = export_pages(&inv, 4);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].items.len(), 4);
        assert_eq!(pages[1].items.len(), 1);
        assert_eq!(pages[0].items[3].description, "item 0");
    }
}
