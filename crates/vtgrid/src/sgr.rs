//! SGR (`CSI ... m`) parameter-list parsing.
//!
//! The full parameter list is parsed into an ordered list of attribute
//! deltas first and applied afterwards, so extended-color forms in the
//! middle of a list cannot corrupt neighbouring parameters and the
//! parser stays testable on its own.

use vtscan::{Param, Params};

use crate::color::{Color, NamedColor, Rgb};
use crate::style::{Style, StyleFlags, UnderlineStyle};

/// One attribute delta produced from an SGR parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrOp {
    /// Reset every attribute to its default.
    Reset,
    Set(StyleFlags),
    Clear(StyleFlags),
    /// Underline on/off and its rendition in one; `None` clears.
    Underline(UnderlineStyle),
    Fg(Color),
    Bg(Color),
    UnderlineColor(Color),
    /// Alternate font 0-9.
    Font(u8),
    /// Parameter this implementation does not know. Ignored by the
    /// executor; surrounding deltas still apply.
    Unknown(u16),
}

/// Parse an SGR parameter list into deltas, in document order.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn parse_sgr(params: &Params) -> Vec<SgrOp> {
    let items: Vec<Param> = params.iter().copied().collect();
    let mut ops = Vec::new();
    let mut i = 0;
    while i < items.len() {
        let param = items[i];
        if param.sub {
            // A sub-parameter whose introducer did not consume it;
            // nothing to attach it to.
            tracing::debug!(value = param.value, "stray SGR sub-parameter");
            i += 1;
            continue;
        }
        match param.value {
            0 => ops.push(SgrOp::Reset),
            1 => ops.push(SgrOp::Set(StyleFlags::BOLD)),
            2 => ops.push(SgrOp::Set(StyleFlags::FAINT)),
            3 => ops.push(SgrOp::Set(StyleFlags::ITALIC)),
            4 => {
                if items.get(i + 1).is_some_and(|p| p.sub) {
                    let selector = items[i + 1].value;
                    i += 1;
                    ops.push(SgrOp::Underline(underline_from_selector(selector)));
                } else {
                    ops.push(SgrOp::Underline(UnderlineStyle::Single));
                }
            }
            5 => ops.push(SgrOp::Set(StyleFlags::SLOW_BLINK)),
            6 => ops.push(SgrOp::Set(StyleFlags::RAPID_BLINK)),
            7 => ops.push(SgrOp::Set(StyleFlags::INVERSE)),
            8 => ops.push(SgrOp::Set(StyleFlags::HIDDEN)),
            9 => ops.push(SgrOp::Set(StyleFlags::STRIKETHROUGH)),
            #[allow(clippy::cast_possible_truncation)]
            10..=19 => ops.push(SgrOp::Font((param.value - 10) as u8)),
            21 => ops.push(SgrOp::Underline(UnderlineStyle::Double)),
            22 => ops.push(SgrOp::Clear(StyleFlags::BOLD | StyleFlags::FAINT)),
            23 => ops.push(SgrOp::Clear(StyleFlags::ITALIC)),
            24 => ops.push(SgrOp::Underline(UnderlineStyle::None)),
            25 => ops.push(SgrOp::Clear(
                StyleFlags::SLOW_BLINK | StyleFlags::RAPID_BLINK,
            )),
            26 => ops.push(SgrOp::Set(StyleFlags::PROPORTIONAL)),
            27 => ops.push(SgrOp::Clear(StyleFlags::INVERSE)),
            28 => ops.push(SgrOp::Clear(StyleFlags::HIDDEN)),
            29 => ops.push(SgrOp::Clear(StyleFlags::STRIKETHROUGH)),
            30..=37 => ops.push(SgrOp::Fg(named(param.value - 30))),
            38 => {
                let (color, consumed) = extended_color(&items[i + 1..]);
                i += consumed;
                ops.push(color.map_or(SgrOp::Unknown(38), SgrOp::Fg));
            }
            39 => ops.push(SgrOp::Fg(Color::Default)),
            40..=47 => ops.push(SgrOp::Bg(named(param.value - 40))),
            48 => {
                let (color, consumed) = extended_color(&items[i + 1..]);
                i += consumed;
                ops.push(color.map_or(SgrOp::Unknown(48), SgrOp::Bg));
            }
            49 => ops.push(SgrOp::Bg(Color::Default)),
            50 => ops.push(SgrOp::Clear(StyleFlags::PROPORTIONAL)),
            51 => ops.push(SgrOp::Set(StyleFlags::FRAMED)),
            52 => ops.push(SgrOp::Set(StyleFlags::ENCIRCLED)),
            53 => ops.push(SgrOp::Set(StyleFlags::OVERLINED)),
            54 => ops.push(SgrOp::Clear(
                StyleFlags::FRAMED | StyleFlags::ENCIRCLED,
            )),
            55 => ops.push(SgrOp::Clear(StyleFlags::OVERLINED)),
            58 => {
                let (color, consumed) = extended_color(&items[i + 1..]);
                i += consumed;
                ops.push(color.map_or(SgrOp::Unknown(58), SgrOp::UnderlineColor));
            }
            59 => ops.push(SgrOp::UnderlineColor(Color::Default)),
            73 => {
                ops.push(SgrOp::Clear(StyleFlags::SUBSCRIPT));
                ops.push(SgrOp::Set(StyleFlags::SUPERSCRIPT));
            }
            74 => {
                ops.push(SgrOp::Clear(StyleFlags::SUPERSCRIPT));
                ops.push(SgrOp::Set(StyleFlags::SUBSCRIPT));
            }
            75 => ops.push(SgrOp::Clear(
                StyleFlags::SUPERSCRIPT | StyleFlags::SUBSCRIPT,
            )),
            90..=97 => ops.push(SgrOp::Fg(named(param.value - 90 + 8))),
            100..=107 => ops.push(SgrOp::Bg(named(param.value - 100 + 8))),
            other => ops.push(SgrOp::Unknown(other)),
        }
        i += 1;
    }
    ops
}

/// Apply one delta to a style.
pub fn apply(style: &mut Style, op: &SgrOp) {
    match op {
        SgrOp::Reset => *style = Style::default(),
        SgrOp::Set(flags) => style.flags |= *flags,
        SgrOp::Clear(flags) => style.flags &= !*flags,
        SgrOp::Underline(underline) => style.underline = *underline,
        SgrOp::Fg(color) => style.fg = *color,
        SgrOp::Bg(color) => style.bg = *color,
        SgrOp::UnderlineColor(color) => style.underline_color = *color,
        SgrOp::Font(font) => style.font = *font,
        SgrOp::Unknown(value) => {
            tracing::debug!(value, "ignoring unknown SGR parameter");
        }
    }
}

fn named(offset: u16) -> Color {
    #[allow(clippy::cast_possible_truncation)]
    match NamedColor::try_from(offset as u8) {
        Ok(name) => Color::Named(name),
        Err(_) => Color::Default,
    }
}

fn underline_from_selector(selector: u16) -> UnderlineStyle {
    #[allow(clippy::cast_possible_truncation)]
    UnderlineStyle::try_from((selector.min(5)) as u8)
        .unwrap_or(UnderlineStyle::Single)
}

#[allow(clippy::cast_possible_truncation)]
fn clamp8(value: u16) -> u8 {
    value.min(255) as u8
}

/// Decode the parameters following a 38/48/58 introducer.
///
/// Returns the color (if well-formed) and the number of parameters
/// consumed after the introducer. Handles both the `;`-separated legacy
/// form and the `:`-separated form; in the latter, five sub-parameters
/// after the `2` selector mean the first is a color-space identifier
/// and is skipped.
fn extended_color(rest: &[Param]) -> (Option<Color>, usize) {
    let Some(first) = rest.first() else {
        return (None, 0);
    };

    if first.sub {
        // Colon form: consume the entire run of sub-parameters so a
        // malformed run cannot be re-read as independent parameters.
        let run = rest.iter().take_while(|p| p.sub).count();
        let subs = &rest[..run];
        let color = match subs[0].value {
            5 if run >= 2 => Some(Color::Indexed(clamp8(subs[1].value))),
            2 if run >= 5 => Some(Color::Rgb(Rgb::new(
                clamp8(subs[2].value),
                clamp8(subs[3].value),
                clamp8(subs[4].value),
            ))),
            2 if run == 4 => Some(Color::Rgb(Rgb::new(
                clamp8(subs[1].value),
                clamp8(subs[2].value),
                clamp8(subs[3].value),
            ))),
            _ => None,
        };
        return (color, run);
    }

    match first.value {
        5 => {
            let index = rest.get(1).map_or(0, |p| p.value);
            (Some(Color::Indexed(clamp8(index))), 2.min(rest.len()))
        }
        2 => {
            let comp = |i: usize| clamp8(rest.get(i).map_or(0, |p| p.value));
            (
                Some(Color::Rgb(Rgb::new(comp(1), comp(2), comp(3)))),
                4.min(rest.len()),
            )
        }
        _ => (None, 1),
    }
}
