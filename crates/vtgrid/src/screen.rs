//! Primary/alternate screen pair and the cursor save/restore protocol.

use crate::charset::CharsetState;
use crate::grid::{Cursor, Grid};
use crate::style::Style;

/// Which buffer is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveScreen {
    #[default]
    Primary,
    Alternate,
}

/// Everything DECSC-style saves: position, styling, charset selection,
/// and the motion-mode flags that shape how the position is
/// re-interpreted on restore.
#[derive(Debug, Clone)]
pub struct SavedCursor {
    pub cursor: Cursor,
    pub style: Style,
    pub protected: bool,
    pub origin_mode: bool,
    pub autowrap: bool,
    pub wrap_pending: bool,
    pub charsets: CharsetState,
}

/// Owns both screen buffers and the switching protocol for DEC private
/// modes 47/1047/1048/1049. Lends out the active grid; callers never
/// hold a grid reference across a switch.
#[derive(Debug)]
pub struct Screens {
    primary: Grid,
    alternate: Grid,
    active: ActiveScreen,
    saved: Option<SavedCursor>,
}

impl Screens {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            primary: Grid::new(cols, rows),
            alternate: Grid::new(cols, rows),
            active: ActiveScreen::Primary,
            saved: None,
        }
    }

    #[must_use]
    pub fn active(&self) -> ActiveScreen {
        self.active
    }

    #[must_use]
    pub fn is_alternate(&self) -> bool {
        self.active == ActiveScreen::Alternate
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        match self.active {
            ActiveScreen::Primary => &self.primary,
            ActiveScreen::Alternate => &self.alternate,
        }
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        match self.active {
            ActiveScreen::Primary => &mut self.primary,
            ActiveScreen::Alternate => &mut self.alternate,
        }
    }

    #[must_use]
    pub fn primary(&self) -> &Grid {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut Grid {
        &mut self.primary
    }

    pub fn alternate_mut(&mut self) -> &mut Grid {
        &mut self.alternate
    }

    /// Mode 47 / 1047 set: switch to the alternate buffer.
    pub fn enter_alternate(&mut self, clear: bool) {
        if clear {
            self.alternate.clear_all();
        }
        self.active = ActiveScreen::Alternate;
    }

    /// Mode 47 / 1047 / 1049 reset: back to the primary buffer.
    /// 1047 additionally clears the alternate on the way out.
    pub fn leave_alternate(&mut self, clear: bool) {
        if clear && self.is_alternate() {
            self.alternate.clear_all();
        }
        self.active = ActiveScreen::Primary;
    }

    /// Snapshot cursor state off the active grid.
    pub fn save_cursor(&mut self, style: Style, protected: bool, charsets: &CharsetState) {
        let grid = self.grid();
        let (cursor, origin_mode, autowrap, wrap_pending) =
            (grid.cursor, grid.origin_mode, grid.autowrap, grid.wrap_pending());
        self.saved = Some(SavedCursor {
            cursor,
            style,
            protected,
            origin_mode,
            autowrap,
            wrap_pending,
            charsets: charsets.clone(),
        });
    }

    /// Reinstate the saved state onto the active grid, clamping the
    /// position to the current size. Restoring with no prior save
    /// reinstates the power-on state.
    pub fn restore_cursor(&mut self) -> SavedCursor {
        let saved = self.saved.clone().unwrap_or_else(|| SavedCursor {
            cursor: Cursor::default(),
            style: Style::default(),
            protected: false,
            origin_mode: false,
            autowrap: true,
            wrap_pending: false,
            charsets: CharsetState::default(),
        });
        let grid = self.grid_mut();
        grid.cursor.x = saved.cursor.x.min(grid.cols() - 1);
        grid.cursor.y = saved.cursor.y.min(grid.rows() - 1);
        grid.origin_mode = saved.origin_mode;
        grid.autowrap = saved.autowrap;
        grid.set_wrap_pending(saved.wrap_pending);
        saved
    }

    /// Drop the saved slot (hard reset).
    pub fn forget_saved(&mut self) {
        self.saved = None;
    }

    pub fn resize_both(&mut self, cols: usize, rows: usize) -> Vec<crate::cell::Row> {
        let dropped = self.primary.resize(cols, rows);
        let _ = self.alternate.resize(cols, rows);
        if let Some(saved) = &mut self.saved {
            saved.cursor.x = saved.cursor.x.min(cols - 1);
            saved.cursor.y = saved.cursor.y.min(rows - 1);
        }
        dropped
    }
}
