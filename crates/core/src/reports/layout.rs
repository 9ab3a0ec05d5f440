//! Page geometry and table pagination.

use std::ops::Range;

/// Fixed page geometry in whole points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    /// Page width.
    pub width: i32,
    /// Page height.
    pub height: i32,
    /// Margin on every side; also where content resumes on a new page.
    pub margin: i32,
    /// Lowest y a table row may reach.
    pub table_bottom: i32,
    /// Height of every table row, header included.
    pub row_height: i32,
    /// Inset of cell text from the cell's top-left corner.
    pub cell_padding: i32,
    /// Distance of the signature block from the bottom edge.
    pub footer_offset: i32,
}

impl PageGeometry {
    /// US Letter, 612 x 792.
    #[must_use]
    pub const fn letter() -> Self {
        Self {
            width: 612,
            height: 792,
            margin: 50,
            table_bottom: 700,
            row_height: 20,
            cell_padding: 5,
            footer_offset: 100,
        }
    }

    /// Body rows that fit below a table starting at `top`, header excluded.
    ///
    /// `floor((table_bottom - top) / row_height) - 1`, never negative.
    #[must_use]
    pub fn rows_per_page(&self, top: i32) -> usize {
        if self.row_height <= 0 {
            return 0;
        }
        let slots = (self.table_bottom - top).div_euclid(self.row_height) - 1;
        usize::try_from(slots).unwrap_or(0)
    }

    /// Top of the signature block.
    #[must_use]
    pub const fn footer_top(&self) -> i32 {
        self.height - self.footer_offset
    }

    /// Usable width between the margins.
    #[must_use]
    pub const fn content_width(&self) -> i32 {
        self.width - 2 * self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

/// Line advance for a font size: 1.156 em, truncated to whole points.
#[must_use]
pub fn line_height(size: u16) -> i32 {
    i32::from(size) * 1156 / 1000
}

/// Cursor state for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayoutState {
    /// Vertical cursor.
    pub cursor_y: i32,
    /// One-based page number.
    pub page_number: usize,
    /// Body rows still to draw.
    pub rows_remaining: usize,
}

impl PageLayoutState {
    /// Starts at the top margin of page one.
    #[must_use]
    pub const fn new(geometry: &PageGeometry) -> Self {
        Self {
            cursor_y: geometry.margin,
            page_number: 1,
            rows_remaining: 0,
        }
    }

    /// Moves the cursor down.
    pub fn advance(&mut self, by: i32) {
        self.cursor_y += by;
    }

    /// Moves to the top of the next page.
    pub fn next_page(&mut self, geometry: &PageGeometry) {
        self.page_number += 1;
        self.cursor_y = geometry.margin;
    }
}

/// One page's share of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage {
    /// Whether this slice starts a new page.
    pub new_page: bool,
    /// Top of the header row.
    pub top: i32,
    /// Body rows drawn on this page.
    pub rows: Range<usize>,
}

impl TablePage {
    /// Y just below the last row of this slice.
    #[must_use]
    pub fn bottom(&self, geometry: &PageGeometry) -> i32 {
        let drawn = i32::try_from(self.rows.len() + 1).unwrap_or(i32::MAX);
        self.top + drawn.saturating_mul(geometry.row_height)
    }
}

/// Splits `row_count` rows into per-page slices for a table starting at `top`.
///
/// Capacity is recomputed on every page from where the table starts there.
/// If the first page cannot fit the header and one row the table moves to a
/// fresh page, and a page whose table starts at the top margin always takes
/// at least one row. A table with no rows still yields one slice for its
/// header.
#[must_use]
pub fn paginate(geometry: &PageGeometry, top: i32, row_count: usize) -> Vec<TablePage> {
    let mut slices = Vec::new();
    let mut top = top;
    let mut new_page = false;
    let mut next = 0;

    loop {
        let mut capacity = geometry.rows_per_page(top);
        if capacity == 0 && !new_page && top > geometry.margin {
            top = geometry.margin;
            new_page = true;
            capacity = geometry.rows_per_page(top);
        }
        if new_page || top <= geometry.margin {
            capacity = capacity.max(1);
        }

        let end = (next + capacity).min(row_count);
        slices.push(TablePage {
            new_page,
            top,
            rows: next..end,
        });
        next = end;

        if next >= row_count {
            return slices;
        }
        top = geometry.margin;
        new_page = true;
    }
}
