//! Terminal color model and the X11 color-spec forms used by OSC.

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The sixteen ANSI palette names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl NamedColor {
    /// xterm's default RGB value for this name.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0, 0, 0),
            Self::Red => Rgb::new(205, 0, 0),
            Self::Green => Rgb::new(0, 205, 0),
            Self::Yellow => Rgb::new(205, 205, 0),
            Self::Blue => Rgb::new(0, 0, 238),
            Self::Magenta => Rgb::new(205, 0, 205),
            Self::Cyan => Rgb::new(0, 205, 205),
            Self::White => Rgb::new(229, 229, 229),
            Self::BrightBlack => Rgb::new(127, 127, 127),
            Self::BrightRed => Rgb::new(255, 0, 0),
            Self::BrightGreen => Rgb::new(0, 255, 0),
            Self::BrightYellow => Rgb::new(255, 255, 0),
            Self::BrightBlue => Rgb::new(92, 92, 255),
            Self::BrightMagenta => Rgb::new(255, 0, 255),
            Self::BrightCyan => Rgb::new(0, 255, 255),
            Self::BrightWhite => Rgb::new(255, 255, 255),
        }
    }
}

/// A color as carried by SGR state and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// The terminal's configured default for the slot (foreground,
    /// background, or underline) this color occupies.
    #[default]
    Default,
    /// One of the sixteen ANSI names.
    Named(NamedColor),
    /// 256-color palette index.
    Indexed(u8),
    /// Direct 24-bit color.
    Rgb(Rgb),
}

/// The live 256-entry palette, settable via OSC 4.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: [Rgb; 256],
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = [Rgb::default(); 256];
        for (idx, slot) in colors.iter_mut().enumerate() {
            *slot = default_palette_color(idx);
        }
        Self { colors }
    }
}

impl Palette {
    #[must_use]
    pub fn get(&self, index: u8) -> Rgb {
        self.colors[usize::from(index)]
    }

    pub fn set(&mut self, index: u8, color: Rgb) {
        self.colors[usize::from(index)] = color;
    }
}

/// xterm's default value for palette entry `idx`: the sixteen ANSI
/// colors, the 6x6x6 cube, then the 24-step grayscale ramp.
fn default_palette_color(idx: usize) -> Rgb {
    #[allow(clippy::cast_possible_truncation)]
    match idx {
        0..=15 => match NamedColor::try_from(idx as u8) {
            Ok(name) => name.rgb(),
            Err(_) => Rgb::default(),
        },
        16..=231 => {
            let c = idx - 16;
            let level = |v: usize| if v == 0 { 0 } else { (40 * v + 55) as u8 };
            Rgb::new(level(c / 36), level((c / 6) % 6), level(c % 6))
        }
        _ => {
            let gray = (8 + 10 * (idx - 232)) as u8;
            Rgb::new(gray, gray, gray)
        }
    }
}

/// Parse an X11 color specification as used by OSC 4/10/11 payloads.
///
/// Supported forms are `rgb:R/G/B` with 1-4 hex digits per component
/// (scaled per X11 rules) and `#RGB` / `#RRGGBB`. Returns `None` for
/// anything else; named X11 colors are not resolved.
#[must_use]
pub fn parse_color_spec(spec: &str) -> Option<Rgb> {
    if let Some(rest) = spec.strip_prefix("rgb:") {
        let mut parts = rest.split('/');
        let r = scaled_component(parts.next()?)?;
        let g = scaled_component(parts.next()?)?;
        let b = scaled_component(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        return Some(Rgb::new(r, g, b));
    }
    if let Some(hex) = spec.strip_prefix('#') {
        let digits = hex.len();
        if digits != 3 && digits != 6 {
            return None;
        }
        let per = digits / 3;
        let comp = |i: usize| -> Option<u8> {
            let v = u16::from_str_radix(&hex[i * per..(i + 1) * per], 16).ok()?;
            #[allow(clippy::cast_possible_truncation)]
            Some(if per == 1 { (v * 0x11) as u8 } else { v as u8 })
        };
        return Some(Rgb::new(comp(0)?, comp(1)?, comp(2)?));
    }
    None
}

/// Scale a 1-4 hex digit component to 8 bits per the X11 `rgb:` rules
/// (digit repetition up to 16 bits, then the high byte).
fn scaled_component(digits: &str) -> Option<u8> {
    if digits.is_empty() || digits.len() > 4 {
        return None;
    }
    let v = u32::from_str_radix(digits, 16).ok()?;
    let sixteen = match digits.len() {
        1 => v * 0x1111,
        2 => v * 0x0101,
        3 => (v << 4) | (v >> 8),
        _ => v,
    };
    #[allow(clippy::cast_possible_truncation)]
    Some((sixteen >> 8) as u8)
}
