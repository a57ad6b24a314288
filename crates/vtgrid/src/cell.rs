//! Grid cells and rows.

use std::sync::Arc;

use crate::style::{Pen, Style};

/// One grid position.
///
/// Every addressable cell holds a defined value; a fresh cell is a
/// space with default styling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// The displayed scalar (post charset translation).
    pub ch: char,
    /// Styling snapshot taken when the cell was written.
    pub style: Style,
    /// DECSCA protection: selective erase skips this cell.
    pub protected: bool,
    /// Hyperlink attached via OSC 8, if any.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub link: Option<Arc<str>>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
            protected: false,
            link: None,
        }
    }
}

impl Cell {
    /// The blank written by erase and shift operations: a space keeping
    /// only the pen's background, unprotected, no link.
    #[must_use]
    pub fn blank(pen: &Pen) -> Self {
        Self {
            ch: ' ',
            style: pen.style.background_only(),
            protected: false,
            link: None,
        }
    }

    /// The blank used when IL/DL expose new rows; these inherit the
    /// pen's protection state as well.
    #[must_use]
    pub fn blank_protected(pen: &Pen) -> Self {
        Self {
            protected: pen.protected,
            ..Self::blank(pen)
        }
    }

    /// A written cell carrying the pen's full state.
    #[must_use]
    pub fn written(ch: char, pen: &Pen) -> Self {
        Self {
            ch,
            style: pen.style,
            protected: pen.protected,
            link: pen.link.clone(),
        }
    }
}

/// One grid row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    #[must_use]
    pub fn new(cols: usize) -> Self {
        Self::filled(cols, &Cell::default())
    }

    #[must_use]
    pub fn filled(cols: usize, cell: &Cell) -> Self {
        Self {
            cells: vec![cell.clone(); cols],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn get(&self, x: usize) -> Option<&Cell> {
        self.cells.get(x)
    }

    pub fn get_mut(&mut self, x: usize) -> Option<&mut Cell> {
        self.cells.get_mut(x)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Fill `range` with clones of `cell`, skipping protected cells
    /// when `selective`.
    pub fn fill(
        &mut self,
        range: std::ops::Range<usize>,
        cell: &Cell,
        selective: bool,
    ) {
        let end = range.end.min(self.cells.len());
        for slot in &mut self.cells[range.start.min(end)..end] {
            if selective && slot.protected {
                continue;
            }
            *slot = cell.clone();
        }
    }

    /// Insert `count` clones of `cell` at `x`, shifting the rest right;
    /// cells pushed past the end are dropped.
    pub fn insert_cells(&mut self, x: usize, count: usize, cell: &Cell) {
        let len = self.cells.len();
        if x >= len {
            return;
        }
        let count = count.min(len - x);
        self.cells[x..].rotate_right(count);
        for slot in &mut self.cells[x..x + count] {
            *slot = cell.clone();
        }
    }

    /// Delete `count` cells at `x`, shifting the rest left and filling
    /// the vacated tail with clones of `cell`.
    pub fn delete_cells(&mut self, x: usize, count: usize, cell: &Cell) {
        let len = self.cells.len();
        if x >= len {
            return;
        }
        let count = count.min(len - x);
        self.cells[x..].rotate_left(count);
        for slot in &mut self.cells[len - count..] {
            *slot = cell.clone();
        }
    }

    /// Grow or shrink to `cols`, padding with clones of `cell`.
    pub fn resize(&mut self, cols: usize, cell: &Cell) {
        self.cells.resize(cols, cell.clone());
    }

    /// The row's characters as a string; trailing spaces kept.
    #[must_use]
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
