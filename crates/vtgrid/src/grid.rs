//! The cell grid: cursor, tab stops, scroll region, and the editing
//! primitives the executor drives.

use crate::cell::{Cell, Row};
use crate::style::Pen;

/// 0-based cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

/// Erase-in-line extent (CSI K).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineErase {
    /// Cursor to end of line.
    ToEnd,
    /// Start of line through the cursor.
    ToStart,
    /// The whole line.
    All,
}

/// Erase-in-display extent (CSI J, modes 0-2; mode 3 additionally
/// clears scrollback at the terminal level).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayErase {
    /// Cursor to end of display.
    Below,
    /// Start of display through the cursor.
    Above,
    /// Everything.
    All,
}

/// Horizontal tab stops, one flag per column.
#[derive(Debug, Clone)]
pub struct TabStops {
    stops: Vec<bool>,
}

impl TabStops {
    #[must_use]
    pub fn new(cols: usize) -> Self {
        let mut tabs = Self { stops: Vec::new() };
        tabs.reset(cols);
        tabs
    }

    /// Default stops: every 8th column.
    pub fn reset(&mut self, cols: usize) {
        self.stops = (0..cols).map(|col| col % 8 == 0).collect();
    }

    /// Next stop strictly after `x`.
    #[must_use]
    pub fn next(&self, x: usize) -> Option<usize> {
        self.stops
            .iter()
            .enumerate()
            .skip(x + 1)
            .find_map(|(col, &stop)| stop.then_some(col))
    }

    /// Previous stop strictly before `x`.
    #[must_use]
    pub fn prev(&self, x: usize) -> Option<usize> {
        self.stops
            .iter()
            .enumerate()
            .take(x)
            .rev()
            .find_map(|(col, &stop)| stop.then_some(col))
    }

    pub fn set(&mut self, x: usize) {
        if let Some(stop) = self.stops.get_mut(x) {
            *stop = true;
        }
    }

    pub fn clear(&mut self, x: usize) {
        if let Some(stop) = self.stops.get_mut(x) {
            *stop = false;
        }
    }

    pub fn clear_all(&mut self) {
        self.stops.fill(false);
    }
}

/// One screen buffer.
///
/// Owns its rows, the cursor, the wrap-pending latch, tab stops, and
/// the scroll region. Origin and autowrap mode flags live here because
/// nearly every motion primitive consults them; the executor keeps the
/// flags of both buffers in step.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: usize,
    rows: usize,
    lines: Vec<Row>,
    pub cursor: Cursor,
    wrap_pending: bool,
    tabs: TabStops,
    scroll_top: usize,
    scroll_bottom: usize,
    pub origin_mode: bool,
    pub autowrap: bool,
}

impl Grid {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            lines: (0..rows).map(|_| Row::new(cols)).collect(),
            cursor: Cursor::default(),
            wrap_pending: false,
            tabs: TabStops::new(cols),
            scroll_top: 0,
            scroll_bottom: rows.saturating_sub(1),
            origin_mode: false,
            autowrap: true,
        }
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn line(&self, y: usize) -> Option<&Row> {
        self.lines.get(y)
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.lines.get(y).and_then(|row| row.get(x))
    }

    #[must_use]
    pub fn wrap_pending(&self) -> bool {
        self.wrap_pending
    }

    /// Reinstate a saved wrap-pending latch (cursor restore only).
    pub fn set_wrap_pending(&mut self, pending: bool) {
        self.wrap_pending = pending;
    }

    /// Inclusive (top, bottom) scroll region.
    #[must_use]
    pub fn scroll_region(&self) -> (usize, usize) {
        (self.scroll_top, self.scroll_bottom)
    }

    /// True when the scroll region spans the whole buffer, which is the
    /// precondition for scrolled-off rows entering scrollback.
    #[must_use]
    pub fn full_region(&self) -> bool {
        self.scroll_top == 0 && self.scroll_bottom == self.rows - 1
    }

    #[must_use]
    pub fn rows_iter(&self) -> std::slice::Iter<'_, Row> {
        self.lines.iter()
    }

    // === writing ===

    /// Write one translated scalar at the cursor with autowrap
    /// semantics. Returns a row evicted by a wrap-triggered full-screen
    /// scroll, if any.
    pub fn put(&mut self, ch: char, pen: &Pen) -> Option<Row> {
        let mut evicted = None;
        if self.wrap_pending && self.autowrap {
            self.wrap_pending = false;
            self.cursor.x = 0;
            evicted = self.advance_line(pen);
        }
        let (x, y) = (self.cursor.x, self.cursor.y);
        if let Some(cell) = self.lines[y].get_mut(x) {
            *cell = Cell::written(ch, pen);
        }
        if x + 1 < self.cols {
            self.cursor.x = x + 1;
        } else if self.autowrap {
            self.wrap_pending = true;
        }
        evicted
    }

    // === cursor motion ===

    /// LF/IND: step down one line, scrolling the region when the cursor
    /// sits on its bottom. Returns an evicted row for full-screen
    /// scrolls.
    pub fn advance_line(&mut self, pen: &Pen) -> Option<Row> {
        self.wrap_pending = false;
        if self.cursor.y == self.scroll_bottom {
            self.scroll_up(1, pen).pop()
        } else {
            if self.cursor.y + 1 < self.rows {
                self.cursor.y += 1;
            }
            None
        }
    }

    /// RI: step up one line, scrolling down when the cursor sits on the
    /// region top.
    pub fn reverse_line(&mut self, pen: &Pen) {
        self.wrap_pending = false;
        if self.cursor.y == self.scroll_top {
            self.scroll_down(1, pen);
        } else if self.cursor.y > 0 {
            self.cursor.y -= 1;
        }
    }

    pub fn carriage_return(&mut self) {
        self.cursor.x = 0;
        self.wrap_pending = false;
    }

    pub fn backspace(&mut self) {
        self.cursor.x = self.cursor.x.saturating_sub(1);
        self.wrap_pending = false;
    }

    /// HT: next tab stop, or the last column.
    pub fn tab_forward(&mut self) {
        self.cursor.x = self.tabs.next(self.cursor.x).unwrap_or(self.cols - 1);
        self.wrap_pending = false;
    }

    /// CBT: previous tab stop, or column 0.
    pub fn tab_backward(&mut self) {
        self.cursor.x = self.tabs.prev(self.cursor.x).unwrap_or(0);
        self.wrap_pending = false;
    }

    pub fn cursor_up(&mut self, n: usize) {
        let floor = if self.origin_mode { self.scroll_top } else { 0 };
        self.cursor.y = self.cursor.y.saturating_sub(n).max(floor);
        self.wrap_pending = false;
    }

    pub fn cursor_down(&mut self, n: usize) {
        let ceil = if self.origin_mode {
            self.scroll_bottom
        } else {
            self.rows - 1
        };
        self.cursor.y = (self.cursor.y + n).min(ceil);
        self.wrap_pending = false;
    }

    pub fn cursor_left(&mut self, n: usize) {
        self.cursor.x = self.cursor.x.saturating_sub(n);
        self.wrap_pending = false;
    }

    pub fn cursor_right(&mut self, n: usize) {
        self.cursor.x = (self.cursor.x + n).min(self.cols - 1);
        self.wrap_pending = false;
    }

    /// CUP/HVP with 1-based coordinates; the row resolves through
    /// origin mode.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.max(1) - 1;
        let col = col.max(1) - 1;
        self.cursor.y = if self.origin_mode {
            (self.scroll_top + row).min(self.scroll_bottom)
        } else {
            row.min(self.rows - 1)
        };
        self.cursor.x = col.min(self.cols - 1);
        self.wrap_pending = false;
    }

    /// CHA/HPA with a 1-based column.
    pub fn set_cursor_col(&mut self, col: usize) {
        self.cursor.x = (col.max(1) - 1).min(self.cols - 1);
        self.wrap_pending = false;
    }

    /// VPA with a 1-based row, resolved through origin mode; the column
    /// stays.
    pub fn set_cursor_row(&mut self, row: usize) {
        let row = row.max(1) - 1;
        self.cursor.y = if self.origin_mode {
            (self.scroll_top + row).min(self.scroll_bottom)
        } else {
            row.min(self.rows - 1)
        };
        self.wrap_pending = false;
    }

    // === erasing ===

    pub fn erase_in_line(&mut self, erase: LineErase, selective: bool, pen: &Pen) {
        let blank = Cell::blank(pen);
        let (x, y) = (self.cursor.x, self.cursor.y);
        let range = match erase {
            LineErase::ToEnd => x..self.cols,
            LineErase::ToStart => 0..x + 1,
            LineErase::All => 0..self.cols,
        };
        self.lines[y].fill(range, &blank, selective);
    }

    pub fn erase_in_display(
        &mut self,
        erase: DisplayErase,
        selective: bool,
        pen: &Pen,
    ) {
        let blank = Cell::blank(pen);
        let y = self.cursor.y;
        match erase {
            DisplayErase::Below => {
                self.erase_in_line(LineErase::ToEnd, selective, pen);
                for row in &mut self.lines[y + 1..] {
                    row.fill(0..self.cols, &blank, selective);
                }
            }
            DisplayErase::Above => {
                for row in &mut self.lines[..y] {
                    row.fill(0..self.cols, &blank, selective);
                }
                self.erase_in_line(LineErase::ToStart, selective, pen);
            }
            DisplayErase::All => {
                for row in &mut self.lines {
                    row.fill(0..self.cols, &blank, selective);
                }
            }
        }
    }

    /// ECH: blank `n` cells from the cursor; the cursor stays put.
    pub fn erase_chars(&mut self, n: usize, pen: &Pen) {
        let blank = Cell::blank(pen);
        let (x, y) = (self.cursor.x, self.cursor.y);
        let end = (x + n.max(1)).min(self.cols);
        self.lines[y].fill(x..end, &blank, false);
    }

    // === intra-row shifting ===

    pub fn insert_chars(&mut self, n: usize, pen: &Pen) {
        let blank = Cell::blank(pen);
        let (x, y) = (self.cursor.x, self.cursor.y);
        self.lines[y].insert_cells(x, n.max(1), &blank);
    }

    pub fn delete_chars(&mut self, n: usize, pen: &Pen) {
        let blank = Cell::blank(pen);
        let (x, y) = (self.cursor.x, self.cursor.y);
        self.lines[y].delete_cells(x, n.max(1), &blank);
    }

    // === line shifting and scrolling ===

    /// IL: shift lines from the cursor to the region bottom down by
    /// `n`, blanking the exposed rows. No-op outside the scroll region.
    pub fn insert_lines(&mut self, n: usize, pen: &Pen) {
        let y = self.cursor.y;
        if y < self.scroll_top || y > self.scroll_bottom {
            return;
        }
        let span = self.scroll_bottom - y + 1;
        let n = n.max(1).min(span);
        let blank = Cell::blank_protected(pen);
        self.lines[y..=self.scroll_bottom].rotate_right(n);
        for row in &mut self.lines[y..y + n] {
            *row = Row::filled(self.cols, &blank);
        }
        self.cursor.x = 0;
        self.wrap_pending = false;
    }

    /// DL: shift lines below the cursor up by `n` within the region.
    /// No-op outside the scroll region.
    pub fn delete_lines(&mut self, n: usize, pen: &Pen) {
        let y = self.cursor.y;
        if y < self.scroll_top || y > self.scroll_bottom {
            return;
        }
        let span = self.scroll_bottom - y + 1;
        let n = n.max(1).min(span);
        let blank = Cell::blank_protected(pen);
        self.lines[y..=self.scroll_bottom].rotate_left(n);
        for row in &mut self.lines[self.scroll_bottom + 1 - n..=self.scroll_bottom] {
            *row = Row::filled(self.cols, &blank);
        }
        self.cursor.x = 0;
        self.wrap_pending = false;
    }

    /// SU: scroll the region up `n` lines. The rows scrolled off the
    /// top are returned **only** when the region spans the full buffer;
    /// the caller owns the decision to retain them (primary screen) or
    /// drop them (alternate).
    pub fn scroll_up(&mut self, n: usize, pen: &Pen) -> Vec<Row> {
        let span = self.scroll_bottom - self.scroll_top + 1;
        let n = n.max(1).min(span);
        let blank = Cell::blank(pen);
        let evict = self.full_region();
        let mut evicted = Vec::new();
        if evict {
            evicted.extend(self.lines[self.scroll_top..self.scroll_top + n].iter().cloned());
        }
        self.lines[self.scroll_top..=self.scroll_bottom].rotate_left(n);
        for row in &mut self.lines[self.scroll_bottom + 1 - n..=self.scroll_bottom] {
            *row = Row::filled(self.cols, &blank);
        }
        evicted
    }

    /// SD: scroll the region down `n` lines, blanking at the top.
    pub fn scroll_down(&mut self, n: usize, pen: &Pen) {
        let span = self.scroll_bottom - self.scroll_top + 1;
        let n = n.max(1).min(span);
        let blank = Cell::blank(pen);
        self.lines[self.scroll_top..=self.scroll_bottom].rotate_right(n);
        for row in &mut self.lines[self.scroll_top..self.scroll_top + n] {
            *row = Row::filled(self.cols, &blank);
        }
    }

    /// DECSTBM. Rejects regions that do not satisfy top < bottom after
    /// 1-based → 0-based conversion; on acceptance the cursor homes to
    /// the region top.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = top.max(1) - 1;
        let bottom = bottom.max(1).min(self.rows) - 1;
        if top >= bottom {
            tracing::debug!(top, bottom, "rejecting degenerate scroll region");
            return;
        }
        self.scroll_top = top;
        self.scroll_bottom = bottom;
        self.cursor = Cursor { x: 0, y: top };
        self.wrap_pending = false;
    }

    // === tab stops ===

    pub fn set_tab_stop(&mut self) {
        self.tabs.set(self.cursor.x);
    }

    pub fn clear_tab_stop(&mut self) {
        self.tabs.clear(self.cursor.x);
    }

    pub fn clear_all_tab_stops(&mut self) {
        self.tabs.clear_all();
    }

    // === whole-buffer operations ===

    /// Blank every cell with the power-on default. Used for alternate
    /// screen entry/exit clears.
    pub fn clear_all(&mut self) {
        for row in &mut self.lines {
            *row = Row::new(self.cols);
        }
    }

    /// DECALN: fill the screen with `E`, reset the scroll region, home
    /// the cursor.
    pub fn alignment_fill(&mut self) {
        let cell = Cell {
            ch: 'E',
            ..Cell::default()
        };
        for row in &mut self.lines {
            *row = Row::filled(self.cols, &cell);
        }
        self.scroll_top = 0;
        self.scroll_bottom = self.rows - 1;
        self.cursor = Cursor::default();
        self.wrap_pending = false;
    }

    /// Apply new dimensions. Returns the rows dropped off the top when
    /// shrinking vertically, oldest first, for the caller to retain if
    /// this is the primary screen.
    pub fn resize(&mut self, cols: usize, rows: usize) -> Vec<Row> {
        let mut dropped = Vec::new();
        if rows < self.rows {
            let excess = self.rows - rows;
            dropped.extend(self.lines.drain(..excess));
        } else {
            for _ in self.rows..rows {
                self.lines.push(Row::new(cols));
            }
        }
        for row in &mut self.lines {
            row.resize(cols, &Cell::default());
        }
        self.cols = cols;
        self.rows = rows;
        self.scroll_top = 0;
        self.scroll_bottom = rows - 1;
        self.tabs.reset(cols);
        self.cursor.x = self.cursor.x.min(cols - 1);
        self.cursor.y = self.cursor.y.saturating_sub(dropped.len()).min(rows - 1);
        self.wrap_pending = false;
        dropped
    }
}
