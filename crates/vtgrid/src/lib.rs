#![warn(clippy::pedantic)]

//! Headless VT100/xterm terminal emulator core.
//!
//! [`Terminal`] consumes the byte stream a PTY-attached program emits
//! and maintains the observable terminal state: a styled cell grid with
//! cursor, scroll regions and tab stops, primary/alternate screens,
//! bounded scrollback, window metadata, and the response byte strings
//! device queries expect. Observers subscribe through
//! [`TerminalObserver`]; everything is synchronous and single-threaded.
//!
//! ```
//! use vtgrid::Terminal;
//!
//! let mut term = Terminal::new(80, 24, 1000).unwrap();
//! term.feed(b"\x1b[1;31mhi\x1b[0m");
//! let snap = term.snapshot();
//! assert_eq!(snap.row_text(0).trim_end(), "hi");
//! assert_eq!(snap.cursor.x, 2);
//! ```

pub use vtscan;

mod cell;
mod charset;
mod color;
mod grid;
mod osc;
mod response;
mod screen;
mod scrollback;
mod sgr;
mod snapshot;
mod style;
mod terminal;
mod window;

pub use crate::cell::{Cell, Row};
pub use crate::charset::{Charset, CharsetState};
pub use crate::color::{Color, NamedColor, Palette, Rgb, parse_color_spec};
pub use crate::grid::{Cursor, DisplayErase, Grid, LineErase, TabStops};
pub use crate::osc::{MAX_CLIPBOARD_BASE64, MAX_CLIPBOARD_BYTES};
pub use crate::screen::ActiveScreen;
pub use crate::scrollback::Scrollback;
pub use crate::sgr::{SgrOp, parse_sgr};
pub use crate::snapshot::{
    ClipboardPayload, CursorView, DecModeAction, NullObserver, Snapshot,
    TerminalObserver,
};
pub use crate::style::{Pen, Style, StyleFlags, UnderlineStyle};
pub use crate::terminal::{MAX_DIMENSION, Terminal, TerminalError};
pub use crate::window::{
    CursorStyle, MouseEncoding, MouseTracking, Theme, TitleStackTarget,
    WindowState,
};
