//! The read-only view published to observers after each batch.

use crate::cell::Row;
use crate::style::Style;
use crate::window::CursorStyle;

/// Cursor as exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CursorView {
    pub x: usize,
    pub y: usize,
    pub visible: bool,
    pub style: CursorStyle,
}

/// A deep-enough clone of the visible terminal state, valid
/// independently of later writes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub cols: usize,
    pub rows: usize,
    pub cursor: CursorView,
    pub title: String,
    pub icon_name: String,
    /// The SGR state the next written cell would receive.
    pub style: Style,
    pub lines: Vec<Row>,
}

impl Snapshot {
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<&crate::cell::Cell> {
        self.lines.get(y).and_then(|row| row.get(x))
    }

    /// Row text, for assertions and quick dumps.
    #[must_use]
    pub fn row_text(&self, y: usize) -> String {
        self.lines.get(y).map(Row::text).unwrap_or_default()
    }
}

/// Whether a DEC private mode report was a set (`h`) or reset (`l`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecModeAction {
    Set,
    Reset,
}

/// Payload of a well-formed OSC 52 clipboard operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    /// The program asked for the clipboard contents (`?` data).
    Query,
    /// Decoded clipboard bytes; empty means clear.
    Data(Vec<u8>),
}

/// Observer callbacks, all optional.
///
/// The terminal invokes these synchronously after a `write` batch has
/// been fully applied, in the order the originating mutations happened.
/// Handlers may read terminal state but must not re-enter `write`.
pub trait TerminalObserver {
    /// Visible state changed during the batch.
    fn on_update(&mut self, snapshot: &Snapshot) {
        let _ = snapshot;
    }

    /// A response byte string destined for the program.
    fn on_response(&mut self, bytes: &[u8]) {
        let _ = bytes;
    }

    /// A DEC private mode set/reset was processed.
    fn on_dec_mode(&mut self, action: DecModeAction, modes: &[u16]) {
        let _ = (action, modes);
    }

    fn on_bell(&mut self) {}

    /// A well-formed OSC 52 within the safety limits.
    fn on_clipboard(&mut self, selection: &str, payload: &ClipboardPayload) {
        let _ = (selection, payload);
    }

    fn on_title_changed(&mut self, title: &str) {
        let _ = title;
    }

    fn on_icon_changed(&mut self, icon_name: &str) {
        let _ = icon_name;
    }

    /// Trace sink describing each parsed event; only fed when chunk
    /// tracing is enabled on the terminal.
    fn on_chunk(&mut self, chunk: &str) {
        let _ = chunk;
    }
}

/// An observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl TerminalObserver for NullObserver {}

/// Deferred observer delivery, queued during a batch and drained once
/// the batch completes so callbacks never see half-applied state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueuedEvent {
    Response(Vec<u8>),
    Bell,
    DecMode(DecModeAction, Vec<u16>),
    Title(String),
    Icon(String),
    Clipboard(String, ClipboardPayload),
    Chunk(String),
}

pub(crate) fn deliver(obs: &mut dyn TerminalObserver, events: Vec<QueuedEvent>) {
    for event in events {
        match event {
            QueuedEvent::Response(bytes) => obs.on_response(&bytes),
            QueuedEvent::Bell => obs.on_bell(),
            QueuedEvent::DecMode(action, modes) => obs.on_dec_mode(action, &modes),
            QueuedEvent::Title(title) => obs.on_title_changed(&title),
            QueuedEvent::Icon(icon) => obs.on_icon_changed(&icon),
            QueuedEvent::Clipboard(selection, payload) => {
                obs.on_clipboard(&selection, &payload);
            }
            QueuedEvent::Chunk(chunk) => obs.on_chunk(&chunk),
        }
    }
}
