//! Window metadata and the mode flags observers care about.

use std::collections::VecDeque;

use crate::color::Rgb;

/// Title/icon stacks cap out like xterm's; pushing past the cap drops
/// the oldest entry.
const MAX_TITLE_STACK: usize = 10;

/// Cursor shape per DECSCUSR (`CSI Ps SP q`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CursorStyle {
    #[default]
    Default = 0,
    BlinkingBlock = 1,
    SteadyBlock = 2,
    BlinkingUnderline = 3,
    SteadyUnderline = 4,
    BlinkingBar = 5,
    SteadyBar = 6,
}

/// Which title-stack slot a `CSI 22/23 ; Ps t` addresses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    num_enum::IntoPrimitive,
    num_enum::FromPrimitive,
)]
#[repr(u16)]
pub enum TitleStackTarget {
    /// Icon name and window title.
    Both = 0,
    /// Icon name only.
    IconName = 1,
    /// Window title only.
    WindowTitle = 2,
    /// Other unsupported value; ignored.
    #[num_enum(catch_all)]
    Other(u16),
}

/// Mouse tracking protocol requested via DEC private modes 9/1000/1002/1003.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseTracking {
    #[default]
    Off,
    /// Mode 9: press only.
    X10,
    /// Mode 1000: press and release.
    Normal,
    /// Mode 1002: presses plus drag motion.
    ButtonEvent,
    /// Mode 1003: all motion.
    AnyEvent,
}

/// Mouse coordinate encoding requested via modes 1005/1006/1015.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseEncoding {
    #[default]
    Default,
    /// Mode 1005.
    Utf8,
    /// Mode 1006.
    Sgr,
    /// Mode 1015.
    Urxvt,
}

/// Default foreground/background used when answering OSC 10/11 queries.
/// Owner-configurable; OSC 10/11 set forms update it too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Rgb::new(255, 255, 255),
            background: Rgb::new(0, 0, 0),
        }
    }
}

/// Window title/icon state plus the recorded mode flags the core does
/// not itself act on (input-side concerns the embedder reads back).
#[derive(Debug, Clone, Default)]
pub struct WindowState {
    pub title: String,
    pub icon_name: String,
    title_stack: VecDeque<String>,
    icon_stack: VecDeque<String>,
    pub cursor_visible: bool,
    pub cursor_style: CursorStyle,
    pub cursor_blink: bool,
    pub application_cursor_keys: bool,
    pub application_keypad: bool,
    pub bracketed_paste: bool,
    pub mouse_tracking: MouseTracking,
    pub mouse_encoding: MouseEncoding,
}

impl WindowState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor_visible: true,
            ..Self::default()
        }
    }

    pub fn push_title(&mut self) {
        if self.title_stack.len() == MAX_TITLE_STACK {
            self.title_stack.pop_front();
        }
        self.title_stack.push_back(self.title.clone());
    }

    /// Pop into the live title; underflow is a no-op. Returns the new
    /// title if one was applied.
    pub fn pop_title(&mut self) -> Option<&str> {
        let title = self.title_stack.pop_back()?;
        self.title = title;
        Some(&self.title)
    }

    pub fn push_icon(&mut self) {
        if self.icon_stack.len() == MAX_TITLE_STACK {
            self.icon_stack.pop_front();
        }
        self.icon_stack.push_back(self.icon_name.clone());
    }

    pub fn pop_icon(&mut self) -> Option<&str> {
        let icon = self.icon_stack.pop_back()?;
        self.icon_name = icon;
        Some(&self.icon_name)
    }

    pub fn clear_stacks(&mut self) {
        self.title_stack.clear();
        self.icon_stack.clear();
    }
}
