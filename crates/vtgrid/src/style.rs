//! SGR styling state and the pen that stamps it onto cells.

use std::sync::Arc;

use crate::color::Color;

bitflags::bitflags! {
    /// Boolean SGR attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u16 {
        const BOLD          = 1 << 0;
        const FAINT         = 1 << 1;
        const ITALIC        = 1 << 2;
        const SLOW_BLINK    = 1 << 3;
        const RAPID_BLINK   = 1 << 4;
        const INVERSE       = 1 << 5;
        const HIDDEN        = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
        const PROPORTIONAL  = 1 << 8;
        const FRAMED        = 1 << 9;
        const ENCIRCLED     = 1 << 10;
        const OVERLINED     = 1 << 11;
        const SUPERSCRIPT   = 1 << 12;
        const SUBSCRIPT     = 1 << 13;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StyleFlags {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.bits())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for StyleFlags {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let bits = u16::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// Underline rendition; `None` means not underlined.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum UnderlineStyle {
    #[default]
    None = 0,
    Single = 1,
    Double = 2,
    Curly = 3,
    Dotted = 4,
    Dashed = 5,
}

/// A complete SGR state, as stamped into each written cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub flags: StyleFlags,
    pub underline: UnderlineStyle,
    pub fg: Color,
    pub bg: Color,
    pub underline_color: Color,
    /// Alternate font index 0-9 (SGR 10-19).
    pub font: u8,
}

impl Style {
    /// A default style carrying only this style's background. This is
    /// what erased and shifted-in blank cells receive.
    #[must_use]
    pub fn background_only(&self) -> Self {
        Self {
            bg: self.bg,
            ..Self::default()
        }
    }
}

/// The "current attributes" the executor writes with.
///
/// Besides the SGR state proper this tracks the DECSCA protection flag
/// and the active OSC 8 hyperlink; both ride along with every written
/// cell but are reset independently of SGR (an SGR reset-all leaves
/// them untouched).
#[derive(Debug, Clone, Default)]
pub struct Pen {
    pub style: Style,
    /// DECSCA: newly written cells are protected from selective erase.
    pub protected: bool,
    /// Active OSC 8 hyperlink; cleared only by an explicit empty OSC 8.
    pub link: Option<Arc<str>>,
}

impl Pen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
