//! The terminal facade: byte input, event execution, observer delivery.

use std::collections::HashMap;
use std::fmt;

use vtscan::{Csi, Esc, Scanner, VtEvent};

use crate::cell::{Cell, Row};
use crate::charset::{Charset, CharsetState};
use crate::response;
use crate::color::Palette;
use crate::grid::{Cursor, DisplayErase, Grid, LineErase};
use crate::scrollback::Scrollback;
use crate::screen::Screens;
use crate::sgr;
use crate::snapshot::{
    self, CursorView, DecModeAction, QueuedEvent, Snapshot, TerminalObserver,
};
use crate::style::Pen;
use crate::window::{
    CursorStyle, MouseEncoding, MouseTracking, Theme, TitleStackTarget,
    WindowState,
};

/// Hard bound on grid dimensions accepted at construction and resize.
pub const MAX_DIMENSION: usize = 1000;

/// The only fallible surface: dimension validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalError {
    /// Dimensions outside `1..=MAX_DIMENSION`.
    InvalidDimensions { cols: usize, rows: usize },
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalError::InvalidDimensions { cols, rows } => write!(
                f,
                "dimensions {cols}x{rows} outside 1..={MAX_DIMENSION}"
            ),
        }
    }
}

impl std::error::Error for TerminalError {}

/// A headless terminal.
///
/// Construct with a size and scrollback limit, feed program output with
/// [`Terminal::write`], and read back state through [`Terminal::snapshot`]
/// and the query accessors. Not reentrant: the owner serializes calls,
/// and observer callbacks must not call back into `write`.
pub struct Terminal {
    scanner: Scanner,
    screens: Screens,
    scrollback: Scrollback,
    pen: Pen,
    charsets: CharsetState,
    window: WindowState,
    theme: Theme,
    palette: Palette,
    saved_modes: HashMap<u16, bool>,
    queue: Vec<QueuedEvent>,
    dirty: bool,
    trace_chunks: bool,
    /// Last graphic character written, as displayed; REP re-emits it.
    last_graphic: Option<char>,
}

impl Terminal {
    /// Create a terminal of `cols` x `rows` cells retaining at most
    /// `scrollback_limit` scrolled-off rows.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::InvalidDimensions`] when either
    /// dimension is zero or above [`MAX_DIMENSION`].
    pub fn new(
        cols: usize,
        rows: usize,
        scrollback_limit: usize,
    ) -> Result<Self, TerminalError> {
        check_dimensions(cols, rows)?;
        Ok(Self {
            scanner: Scanner::new(),
            screens: Screens::new(cols, rows),
            scrollback: Scrollback::new(scrollback_limit),
            pen: Pen::new(),
            charsets: CharsetState::new(),
            window: WindowState::new(),
            theme: Theme::default(),
            palette: Palette::default(),
            saved_modes: HashMap::new(),
            queue: Vec::new(),
            dirty: false,
            trace_chunks: false,
            last_graphic: None,
        })
    }

    /// Enable the `on_chunk` trace stream.
    pub fn set_chunk_tracing(&mut self, enabled: bool) {
        self.trace_chunks = enabled;
    }

    // === input ===

    /// Process a batch of program output, then deliver queued observer
    /// events and, if visible state changed, one snapshot.
    pub fn write(&mut self, bytes: &[u8], obs: &mut dyn TerminalObserver) {
        let mut scanner = std::mem::take(&mut self.scanner);
        scanner.feed_with(bytes, &mut |ev| self.apply(&ev));
        self.scanner = scanner;
        self.deliver(obs);
    }

    /// [`Terminal::write`] without an observer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.write(bytes, &mut snapshot::NullObserver);
    }

    /// Force-complete partial input: a buffered partial UTF-8 character
    /// prints as U+FFFD and any half-received escape sequence is
    /// dropped.
    pub fn flush_incomplete(&mut self, obs: &mut dyn TerminalObserver) {
        let mut scanner = std::mem::take(&mut self.scanner);
        scanner.flush_with(&mut |ev| self.apply(&ev));
        self.scanner = scanner;
        self.deliver(obs);
    }

    /// Apply a new size per the resize contract: top rows evicted to
    /// scrollback when shrinking (primary screen only), blank rows
    /// appended when growing, rows padded/truncated on width change,
    /// scroll region and tab stops reset, cursor clamped.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::InvalidDimensions`] for out-of-range
    /// dimensions; the terminal is unchanged in that case.
    pub fn resize(
        &mut self,
        cols: usize,
        rows: usize,
        obs: &mut dyn TerminalObserver,
    ) -> Result<(), TerminalError> {
        check_dimensions(cols, rows)?;
        for row in self.screens.resize_both(cols, rows) {
            self.scrollback.push(row);
        }
        self.dirty = true;
        self.deliver(obs);
        Ok(())
    }

    // === owner-facing state ===

    #[must_use]
    pub fn cols(&self) -> usize {
        self.screens.grid().cols()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.screens.grid().rows()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.screens.grid().cursor
    }

    /// The active grid (alternate while the alternate screen is on).
    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.screens.grid()
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.screens.grid().cell(x, y)
    }

    #[must_use]
    pub fn is_alternate(&self) -> bool {
        self.screens.is_alternate()
    }

    #[must_use]
    pub fn window(&self) -> &WindowState {
        &self.window
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Set the default colors reported by OSC 10/11 queries.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Owner-side title set; does not echo a title-change event.
    pub fn set_title(&mut self, title: &str) {
        self.window.title = title.to_string();
        self.dirty = true;
    }

    /// Owner-side icon-name set; does not echo an icon-change event.
    pub fn set_icon_name(&mut self, icon_name: &str) {
        self.window.icon_name = icon_name.to_string();
        self.dirty = true;
    }

    #[must_use]
    pub fn scrollback_len(&self) -> usize {
        self.scrollback.len()
    }

    /// Rows displayed for a viewport whose first row is `top` in the
    /// combined scrollback-then-screen row space. Scrollback rows from
    /// a previous width are padded or truncated to the current width.
    #[must_use]
    pub fn viewport_rows(&self, top: usize, count: usize) -> Vec<Row> {
        let cols = self.cols();
        let grid = self.screens.grid();
        let total = self.scrollback.len() + grid.rows();
        (top..(top + count).min(total))
            .map(|index| {
                if let Some(row) = self.scrollback.get(index) {
                    let mut row = row.clone();
                    row.resize(cols, &Cell::default());
                    row
                } else {
                    grid.line(index - self.scrollback.len())
                        .cloned()
                        .unwrap_or_else(|| Row::new(cols))
                }
            })
            .collect()
    }

    /// Build the observer-facing view of current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let grid = self.screens.grid();
        Snapshot {
            cols: grid.cols(),
            rows: grid.rows(),
            cursor: CursorView {
                x: grid.cursor.x,
                y: grid.cursor.y,
                visible: self.window.cursor_visible,
                style: self.window.cursor_style,
            },
            title: self.window.title.clone(),
            icon_name: self.window.icon_name.clone(),
            style: self.pen.style,
            lines: grid.rows_iter().cloned().collect(),
        }
    }

    fn deliver(&mut self, obs: &mut dyn TerminalObserver) {
        let events = std::mem::take(&mut self.queue);
        snapshot::deliver(obs, events);
        if self.dirty {
            let snap = self.snapshot();
            obs.on_update(&snap);
            self.dirty = false;
        }
    }

    // === event execution ===

    fn apply(&mut self, ev: &VtEvent<'_>) {
        if self.trace_chunks {
            self.queue.push(QueuedEvent::Chunk(format!("{ev:?}")));
        }
        match ev {
            VtEvent::Print(ch) => self.print_char(*ch),
            VtEvent::C0(byte) => self.execute_c0(*byte),
            VtEvent::Esc(esc) => self.execute_esc(esc),
            VtEvent::Csi(csi) => self.execute_csi(csi),
            VtEvent::Osc(osc) => self.execute_osc(osc.payload),
        }
    }

    fn print_char(&mut self, ch: char) {
        // C1 controls arrive as perfectly valid UTF-8; cells only ever
        // hold displayable scalars.
        if ch.is_control() {
            tracing::trace!(?ch, "ignoring non-displayable scalar");
            return;
        }
        let ch = self.charsets.translate(ch);
        self.last_graphic = Some(ch);
        let on_primary = !self.screens.is_alternate();
        let evicted = self.screens.grid_mut().put(ch, &self.pen);
        if on_primary {
            if let Some(row) = evicted {
                self.scrollback.push(row);
            }
        }
        self.dirty = true;
    }

    /// LF/FF/IND: line feed within the scroll region; the column is
    /// never touched here.
    fn line_feed(&mut self) {
        let on_primary = !self.screens.is_alternate();
        let evicted = self.screens.grid_mut().advance_line(&self.pen);
        if on_primary {
            if let Some(row) = evicted {
                self.scrollback.push(row);
            }
        }
        self.dirty = true;
    }

    fn execute_c0(&mut self, byte: u8) {
        match byte {
            0x07 => self.queue.push(QueuedEvent::Bell),
            0x08 => {
                self.screens.grid_mut().backspace();
                self.dirty = true;
            }
            0x09 => {
                self.screens.grid_mut().tab_forward();
                self.dirty = true;
            }
            0x0A | 0x0C => self.line_feed(),
            0x0D => {
                self.screens.grid_mut().carriage_return();
                self.dirty = true;
            }
            // SO/SI switch the live charset slot.
            0x0E => self.charsets.select(1),
            0x0F => self.charsets.select(0),
            other => tracing::trace!(byte = other, "ignoring C0 control"),
        }
    }

    fn execute_esc(&mut self, esc: &Esc<'_>) {
        match (esc.intermediates, esc.final_byte) {
            ([], b'D') => self.line_feed(),
            ([], b'E') => {
                self.screens.grid_mut().carriage_return();
                self.line_feed();
            }
            ([], b'M') => {
                self.screens.grid_mut().reverse_line(&self.pen);
                self.dirty = true;
            }
            ([], b'7') => self.save_cursor(),
            ([], b'8') => self.restore_cursor(),
            ([], b'c') => self.hard_reset(),
            ([], b'H') => self.screens.grid_mut().set_tab_stop(),
            ([], b'=') => self.window.application_keypad = true,
            ([], b'>') => self.window.application_keypad = false,
            ([b'%'], b'G') => self.charsets.utf8_mode = true,
            ([b'%'], b'@') => self.charsets.utf8_mode = false,
            ([b'#'], b'8') => {
                self.screens.grid_mut().alignment_fill();
                self.dirty = true;
            }
            ([slot @ (b'(' | b')' | b'*' | b'+'), rest @ ..], final_byte) => {
                self.designate_charset(*slot, rest, final_byte);
            }
            (intermediates, final_byte) => {
                tracing::debug!(
                    ?intermediates,
                    final_byte,
                    "ignoring unknown ESC sequence"
                );
            }
        }
    }

    fn designate_charset(&mut self, slot: u8, rest: &[u8], final_byte: u8) {
        let index = match slot {
            b'(' => 0,
            b')' => 1,
            b'*' => 2,
            _ => 3,
        };
        let mut designator = String::with_capacity(rest.len() + 1);
        for &b in rest {
            designator.push(b as char);
        }
        designator.push(final_byte as char);
        let charset = designator
            .parse::<Charset>()
            .unwrap_or_else(|_| Charset::Other(designator));
        self.charsets.designate(index, charset);
    }

    fn save_cursor(&mut self) {
        self.screens
            .save_cursor(self.pen.style, self.pen.protected, &self.charsets);
    }

    fn restore_cursor(&mut self) {
        let saved = self.screens.restore_cursor();
        self.pen.style = saved.style;
        self.pen.protected = saved.protected;
        self.charsets = saved.charsets;
        self.set_origin_mode_flag(saved.origin_mode);
        self.set_autowrap_flag(saved.autowrap);
        self.dirty = true;
    }

    /// RIS. Everything observable through the byte stream reverts to
    /// the freshly-constructed state; the owner-configured theme stays.
    fn hard_reset(&mut self) {
        let (cols, rows) = (self.cols(), self.rows());
        self.screens = Screens::new(cols, rows);
        self.scrollback.clear();
        self.pen = Pen::new();
        self.charsets = CharsetState::new();
        self.window = WindowState::new();
        self.palette = Palette::default();
        self.saved_modes.clear();
        self.last_graphic = None;
        self.dirty = true;
    }

    // === CSI ===

    #[allow(clippy::too_many_lines)]
    fn execute_csi(&mut self, csi: &Csi<'_>) {
        let params = csi.params;
        match (csi.private, csi.final_byte) {
            (None, b'A') => {
                self.screens.grid_mut().cursor_up(usize::from(params.get_or(0, 1)));
                self.dirty = true;
            }
            (None, b'B') => {
                self.screens
                    .grid_mut()
                    .cursor_down(usize::from(params.get_or(0, 1)));
                self.dirty = true;
            }
            (None, b'C') => {
                self.screens
                    .grid_mut()
                    .cursor_right(usize::from(params.get_or(0, 1)));
                self.dirty = true;
            }
            (None, b'D') => {
                self.screens
                    .grid_mut()
                    .cursor_left(usize::from(params.get_or(0, 1)));
                self.dirty = true;
            }
            (None, b'E') => {
                let grid = self.screens.grid_mut();
                grid.cursor_down(usize::from(params.get_or(0, 1)));
                grid.carriage_return();
                self.dirty = true;
            }
            (None, b'F') => {
                let grid = self.screens.grid_mut();
                grid.cursor_up(usize::from(params.get_or(0, 1)));
                grid.carriage_return();
                self.dirty = true;
            }
            (None, b'G' | b'`') => {
                self.screens
                    .grid_mut()
                    .set_cursor_col(usize::from(params.get_or(0, 1)));
                self.dirty = true;
            }
            (None, b'd') => {
                self.screens
                    .grid_mut()
                    .set_cursor_row(usize::from(params.get_or(0, 1)));
                self.dirty = true;
            }
            (None, b'b') => {
                if let Some(ch) = self.last_graphic {
                    for _ in 0..params.get_or(0, 1) {
                        self.print_char(ch);
                    }
                }
            }
            (None, b'H' | b'f') => {
                self.screens.grid_mut().set_cursor(
                    usize::from(params.get_or(0, 1)),
                    usize::from(params.get_or(1, 1)),
                );
                self.dirty = true;
            }
            (None, b'I') => {
                for _ in 0..params.get_or(0, 1) {
                    self.screens.grid_mut().tab_forward();
                }
                self.dirty = true;
            }
            (None | Some(b'?'), b'J') => {
                self.erase_display(params.get(0).unwrap_or(0), csi.private.is_some());
            }
            (None | Some(b'?'), b'K') => {
                self.erase_line(params.get(0).unwrap_or(0), csi.private.is_some());
            }
            (None, b'L') => {
                self.screens
                    .grid_mut()
                    .insert_lines(usize::from(params.get_or(0, 1)), &self.pen);
                self.dirty = true;
            }
            (None, b'M') => {
                self.screens
                    .grid_mut()
                    .delete_lines(usize::from(params.get_or(0, 1)), &self.pen);
                self.dirty = true;
            }
            (None, b'P') => {
                self.screens
                    .grid_mut()
                    .delete_chars(usize::from(params.get_or(0, 1)), &self.pen);
                self.dirty = true;
            }
            (None, b'@') => {
                self.screens
                    .grid_mut()
                    .insert_chars(usize::from(params.get_or(0, 1)), &self.pen);
                self.dirty = true;
            }
            (None, b'X') => {
                self.screens
                    .grid_mut()
                    .erase_chars(usize::from(params.get_or(0, 1)), &self.pen);
                self.dirty = true;
            }
            (None, b'Z') => {
                for _ in 0..params.get_or(0, 1) {
                    self.screens.grid_mut().tab_backward();
                }
                self.dirty = true;
            }
            (None, b'S') => {
                let n = usize::from(params.get_or(0, 1));
                let on_primary = !self.screens.is_alternate();
                let evicted = self.screens.grid_mut().scroll_up(n, &self.pen);
                if on_primary {
                    for row in evicted {
                        self.scrollback.push(row);
                    }
                }
                self.dirty = true;
            }
            (None, b'T') => {
                self.screens
                    .grid_mut()
                    .scroll_down(usize::from(params.get_or(0, 1)), &self.pen);
                self.dirty = true;
            }
            (None, b'r') => {
                let rows = self.rows();
                let top = usize::from(params.get_or(0, 1));
                let bottom = match params.get(1) {
                    None | Some(0) => rows,
                    Some(b) => usize::from(b),
                };
                self.screens.grid_mut().set_scroll_region(top, bottom);
                self.dirty = true;
            }
            (None, b's') => self.save_cursor(),
            (None, b'u') => self.restore_cursor(),
            (None, b'c') => {
                if params.get(0).unwrap_or(0) == 0 {
                    self.queue
                        .push(QueuedEvent::Response(response::PRIMARY_DA.to_vec()));
                }
            }
            (Some(b'>'), b'c') => {
                if params.get(0).unwrap_or(0) == 0 {
                    self.queue
                        .push(QueuedEvent::Response(response::SECONDARY_DA.to_vec()));
                }
            }
            (None, b'n') => self.device_status(params.get(0).unwrap_or(0)),
            (Some(b'?'), b'n') => {
                if params.get(0).unwrap_or(0) == 26 {
                    let designator = self.charsets.current().designator().to_string();
                    self.queue.push(QueuedEvent::Response(
                        response::charset_report(&designator),
                    ));
                } else {
                    tracing::debug!(?params, "ignoring unknown DEC DSR");
                }
            }
            (None, b'g') => match params.get(0).unwrap_or(0) {
                0 => self.screens.grid_mut().clear_tab_stop(),
                3 => self.screens.grid_mut().clear_all_tab_stops(),
                other => tracing::debug!(mode = other, "ignoring TBC mode"),
            },
            (None, b't') => self.window_op(csi),
            (None, b'q') if csi.has_intermediate(b' ') => {
                let style = params.get(0).unwrap_or(0).min(6);
                #[allow(clippy::cast_possible_truncation)]
                if let Ok(style) = CursorStyle::try_from(style as u8) {
                    self.window.cursor_style = style;
                    self.dirty = true;
                }
            }
            (None, b'q') if csi.has_intermediate(b'"') => {
                // DECSCA
                match params.get(0).unwrap_or(0) {
                    1 => self.pen.protected = true,
                    0 | 2 => self.pen.protected = false,
                    other => {
                        tracing::debug!(value = other, "ignoring DECSCA value");
                    }
                }
            }
            (None, b'm') => {
                for op in sgr::parse_sgr(params) {
                    sgr::apply(&mut self.pen.style, &op);
                }
            }
            (Some(b'?'), b'h') => self.dec_modes(csi, DecModeAction::Set),
            (Some(b'?'), b'l') => self.dec_modes(csi, DecModeAction::Reset),
            (Some(b'?'), b'p') if csi.has_intermediate(b'$') => {
                // DECRQM
                let mode = csi.params.get(0).unwrap_or(0);
                let state = match self.dec_mode_value(mode) {
                    Some(true) => 1,
                    Some(false) => 2,
                    None => 0,
                };
                self.queue
                    .push(QueuedEvent::Response(response::mode_report(mode, state)));
            }
            (Some(b'?'), b's') => {
                for param in params.iter() {
                    if let Some(value) = self.dec_mode_value(param.value) {
                        self.saved_modes.insert(param.value, value);
                    }
                }
            }
            (Some(b'?'), b'r') => {
                for param in params.iter() {
                    if let Some(&value) = self.saved_modes.get(&param.value) {
                        self.set_dec_mode(param.value, value);
                    }
                }
            }
            (None, b'h' | b'l') => {
                tracing::debug!(?params, "ignoring ANSI mode set/reset");
            }
            (private, final_byte) => {
                tracing::debug!(
                    ?private,
                    final_byte,
                    ?params,
                    "ignoring unknown CSI sequence"
                );
            }
        }
    }

    fn erase_display(&mut self, mode: u16, selective: bool) {
        let erase = match mode {
            0 => DisplayErase::Below,
            1 => DisplayErase::Above,
            2 | 3 => DisplayErase::All,
            other => {
                tracing::debug!(mode = other, "ignoring ED mode");
                return;
            }
        };
        self.screens
            .grid_mut()
            .erase_in_display(erase, selective, &self.pen);
        if mode == 3 {
            self.scrollback.clear();
        }
        self.dirty = true;
    }

    fn erase_line(&mut self, mode: u16, selective: bool) {
        let erase = match mode {
            0 => LineErase::ToEnd,
            1 => LineErase::ToStart,
            2 => LineErase::All,
            other => {
                tracing::debug!(mode = other, "ignoring EL mode");
                return;
            }
        };
        self.screens
            .grid_mut()
            .erase_in_line(erase, selective, &self.pen);
        self.dirty = true;
    }

    fn device_status(&mut self, code: u16) {
        match code {
            5 => self
                .queue
                .push(QueuedEvent::Response(response::DSR_OK.to_vec())),
            6 => {
                let grid = self.screens.grid();
                let (top, _) = grid.scroll_region();
                let row = if grid.origin_mode {
                    grid.cursor.y.saturating_sub(top) + 1
                } else {
                    grid.cursor.y + 1
                };
                self.queue.push(QueuedEvent::Response(
                    response::cursor_position(row, grid.cursor.x + 1),
                ));
            }
            other => tracing::debug!(code = other, "ignoring DSR code"),
        }
    }

    fn window_op(&mut self, csi: &Csi<'_>) {
        let params = csi.params;
        match params.get(0).unwrap_or(0) {
            18 => {
                self.queue.push(QueuedEvent::Response(response::size_report(
                    self.rows(),
                    self.cols(),
                )));
            }
            22 => match TitleStackTarget::from(params.get(1).unwrap_or(0)) {
                TitleStackTarget::Both => {
                    self.window.push_icon();
                    self.window.push_title();
                }
                TitleStackTarget::IconName => self.window.push_icon(),
                TitleStackTarget::WindowTitle => self.window.push_title(),
                TitleStackTarget::Other(_) => {}
            },
            23 => match TitleStackTarget::from(params.get(1).unwrap_or(0)) {
                TitleStackTarget::Both => {
                    self.pop_icon();
                    self.pop_title();
                }
                TitleStackTarget::IconName => self.pop_icon(),
                TitleStackTarget::WindowTitle => self.pop_title(),
                TitleStackTarget::Other(_) => {}
            },
            // Anything else (move, iconify, raise, ...) is deliberately
            // unsupported.
            _ => {}
        }
    }

    fn pop_title(&mut self) {
        if let Some(title) = self.window.pop_title() {
            let title = title.to_string();
            self.queue.push(QueuedEvent::Title(title));
            self.dirty = true;
        }
    }

    fn pop_icon(&mut self) {
        if let Some(icon) = self.window.pop_icon() {
            let icon = icon.to_string();
            self.queue.push(QueuedEvent::Icon(icon));
            self.dirty = true;
        }
    }

    // === DEC private modes ===

    fn dec_modes(&mut self, csi: &Csi<'_>, action: DecModeAction) {
        let modes: Vec<u16> = csi.params.iter().map(|p| p.value).collect();
        for &mode in &modes {
            self.set_dec_mode(mode, action == DecModeAction::Set);
        }
        self.queue.push(QueuedEvent::DecMode(action, modes));
    }

    fn set_dec_mode(&mut self, mode: u16, enable: bool) {
        match mode {
            1 => self.window.application_cursor_keys = enable,
            6 => {
                self.set_origin_mode_flag(enable);
                self.screens.grid_mut().set_cursor(1, 1);
                self.dirty = true;
            }
            7 => {
                self.set_autowrap_flag(enable);
            }
            9 => {
                self.window.mouse_tracking =
                    if enable { MouseTracking::X10 } else { MouseTracking::Off };
            }
            12 => self.window.cursor_blink = enable,
            25 => {
                self.window.cursor_visible = enable;
                self.dirty = true;
            }
            47 => {
                if enable {
                    self.screens.enter_alternate(false);
                } else {
                    self.screens.leave_alternate(false);
                }
                self.dirty = true;
            }
            1000 => {
                self.window.mouse_tracking = if enable {
                    MouseTracking::Normal
                } else {
                    MouseTracking::Off
                };
            }
            1002 => {
                self.window.mouse_tracking = if enable {
                    MouseTracking::ButtonEvent
                } else {
                    MouseTracking::Off
                };
            }
            1003 => {
                self.window.mouse_tracking = if enable {
                    MouseTracking::AnyEvent
                } else {
                    MouseTracking::Off
                };
            }
            1005 => {
                self.window.mouse_encoding = if enable {
                    MouseEncoding::Utf8
                } else {
                    MouseEncoding::Default
                };
            }
            1006 => {
                self.window.mouse_encoding = if enable {
                    MouseEncoding::Sgr
                } else {
                    MouseEncoding::Default
                };
            }
            1015 => {
                self.window.mouse_encoding = if enable {
                    MouseEncoding::Urxvt
                } else {
                    MouseEncoding::Default
                };
            }
            1047 => {
                if enable {
                    self.screens.enter_alternate(false);
                } else {
                    self.screens.leave_alternate(true);
                }
                self.dirty = true;
            }
            1048 => {
                if enable {
                    self.save_cursor();
                } else {
                    self.restore_cursor();
                }
            }
            1049 => {
                if enable {
                    self.save_cursor();
                    self.screens.enter_alternate(true);
                } else {
                    self.screens.leave_alternate(false);
                    self.restore_cursor();
                }
                self.dirty = true;
            }
            2004 => self.window.bracketed_paste = enable,
            other => {
                tracing::debug!(mode = other, enable, "unrecognized DEC mode");
            }
        }
    }

    fn dec_mode_value(&self, mode: u16) -> Option<bool> {
        let window = &self.window;
        let grid = self.screens.grid();
        Some(match mode {
            1 => window.application_cursor_keys,
            6 => grid.origin_mode,
            7 => grid.autowrap,
            9 => window.mouse_tracking == MouseTracking::X10,
            12 => window.cursor_blink,
            25 => window.cursor_visible,
            47 | 1047 | 1049 => self.screens.is_alternate(),
            1000 => window.mouse_tracking == MouseTracking::Normal,
            1002 => window.mouse_tracking == MouseTracking::ButtonEvent,
            1003 => window.mouse_tracking == MouseTracking::AnyEvent,
            1005 => window.mouse_encoding == MouseEncoding::Utf8,
            1006 => window.mouse_encoding == MouseEncoding::Sgr,
            1015 => window.mouse_encoding == MouseEncoding::Urxvt,
            2004 => window.bracketed_paste,
            _ => return None,
        })
    }

    fn set_origin_mode_flag(&mut self, enable: bool) {
        self.screens.primary_mut().origin_mode = enable;
        self.screens.alternate_mut().origin_mode = enable;
    }

    fn set_autowrap_flag(&mut self, enable: bool) {
        self.screens.primary_mut().autowrap = enable;
        self.screens.alternate_mut().autowrap = enable;
        if !enable {
            self.screens.primary_mut().set_wrap_pending(false);
            self.screens.alternate_mut().set_wrap_pending(false);
        }
    }

    // Used by the OSC module.
    pub(crate) fn queue_event(&mut self, event: QueuedEvent) {
        self.queue.push(event);
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn pen_mut(&mut self) -> &mut Pen {
        &mut self.pen
    }

    pub(crate) fn window_mut(&mut self) -> &mut WindowState {
        &mut self.window
    }

    pub(crate) fn theme_mut(&mut self) -> &mut Theme {
        &mut self.theme
    }

    pub(crate) fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub(crate) fn palette(&self) -> &Palette {
        &self.palette
    }
}

fn check_dimensions(cols: usize, rows: usize) -> Result<(), TerminalError> {
    if cols == 0 || rows == 0 || cols > MAX_DIMENSION || rows > MAX_DIMENSION {
        return Err(TerminalError::InvalidDimensions { cols, rows });
    }
    Ok(())
}
