//! Character-set designation and translation.
//!
//! Slots G0-G3 each hold a designator; the current slot drives
//! translation of printable scalars while UTF-8 mode is off. The only
//! designator with a concrete mapping here is DEC Special Graphics.

/// Character-set designator codes reachable through `ESC ( / ) / * / +`.
///
/// Everything except [`Charset::DecSpecialGraphic`] passes characters
/// through unchanged; national replacement sets are accepted and
/// recorded but not remapped.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum Charset {
    /// US-ASCII.
    #[default]
    #[strum(serialize = "B")]
    Ascii,
    /// British.
    #[strum(serialize = "A")]
    British,
    /// DEC Special Character and Line Drawing Set.
    #[strum(serialize = "0")]
    DecSpecialGraphic,
    /// Dutch.
    #[strum(serialize = "4")]
    Dutch,
    /// Finnish.
    #[strum(serialize = "5")]
    Finnish,
    /// French.
    #[strum(serialize = "R")]
    French,
    /// French Canadian.
    #[strum(serialize = "Q")]
    FrenchCanadian,
    /// German.
    #[strum(serialize = "K")]
    German,
    /// Italian.
    #[strum(serialize = "Y")]
    Italian,
    /// Norwegian/Danish.
    #[strum(serialize = "E")]
    NorwegianDanish,
    /// Spanish.
    #[strum(serialize = "Z")]
    Spanish,
    /// Swedish.
    #[strum(serialize = "H")]
    Swedish,
    /// Swiss.
    #[strum(serialize = "=")]
    Swiss,
    /// DEC Supplemental Graphic.
    #[strum(serialize = "%5")]
    DecSuppGraphic,
    /// Portuguese.
    #[strum(serialize = "%6")]
    Portuguese,
    /// Anything else; recorded verbatim, passes through.
    #[strum(default)]
    Other(String),
}

impl Charset {
    /// The designator string as it appears on the wire and in charset
    /// reports.
    #[must_use]
    pub fn designator(&self) -> &str {
        match self {
            Self::Other(s) => s,
            known => known.into(),
        }
    }

    /// Translate one scalar under this charset.
    #[must_use]
    pub fn translate(&self, ch: char) -> char {
        match self {
            Self::DecSpecialGraphic => dec_special_graphic(ch),
            _ => ch,
        }
    }
}

/// DEC Special Graphics: 0x60-0x7E become box-drawing and technical
/// glyphs. See <https://vt100.net/docs/vt100-ug/table3-9.html>.
fn dec_special_graphic(ch: char) -> char {
    match ch {
        '`' => '◆',
        'a' => '▒',
        'b' => '␉',
        'c' => '␌',
        'd' => '␍',
        'e' => '␊',
        'f' => '°',
        'g' => '±',
        'h' => '␤',
        'i' => '␋',
        'j' => '┘',
        'k' => '┐',
        'l' => '┌',
        'm' => '└',
        'n' => '┼',
        'o' => '⎺',
        'p' => '⎻',
        'q' => '─',
        'r' => '⎼',
        's' => '⎽',
        't' => '├',
        'u' => '┤',
        'v' => '┴',
        'w' => '┬',
        'x' => '│',
        'y' => '≤',
        'z' => '≥',
        '{' => 'π',
        '|' => '≠',
        '}' => '£',
        '~' => '·',
        other => other,
    }
}

/// The G0-G3 slots, the current-slot selector, and the UTF-8 switch.
#[derive(Debug, Clone, Default)]
pub struct CharsetState {
    slots: [Charset; 4],
    current: usize,
    /// `ESC % G` / `ESC % @`. While on, translation is bypassed.
    pub utf8_mode: bool,
}

impl CharsetState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Designate `charset` into slot `index` (0-3).
    pub fn designate(&mut self, index: usize, charset: Charset) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = charset;
        }
    }

    /// Select the slot driving translation (SI selects 0, SO selects 1).
    pub fn select(&mut self, index: usize) {
        if index < self.slots.len() {
            self.current = index;
        }
    }

    #[must_use]
    pub fn current_slot(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> &Charset {
        &self.slots[self.current]
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Charset> {
        self.slots.get(index)
    }

    /// Translate a printable scalar through the current slot.
    #[must_use]
    pub fn translate(&self, ch: char) -> char {
        if self.utf8_mode {
            return ch;
        }
        self.slots[self.current].translate(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_designator_parse() {
        assert_eq!(Charset::from_str("B"), Ok(Charset::Ascii));
        assert_eq!(Charset::from_str("0"), Ok(Charset::DecSpecialGraphic));
        assert_eq!(Charset::from_str("%5"), Ok(Charset::DecSuppGraphic));
        assert_eq!(
            Charset::from_str("!!"),
            Ok(Charset::Other("!!".to_string()))
        );
    }

    #[test]
    fn test_designator_round_trip() {
        assert_eq!(Charset::Ascii.designator(), "B");
        assert_eq!(Charset::DecSpecialGraphic.designator(), "0");
        assert_eq!(Charset::Other("7".into()).designator(), "7");
    }

    #[test]
    fn test_dec_graphics_box_drawing() {
        let charset = Charset::DecSpecialGraphic;
        assert_eq!(charset.translate('q'), '─');
        assert_eq!(charset.translate('x'), '│');
        assert_eq!(charset.translate('l'), '┌');
        assert_eq!(charset.translate('j'), '┘');
        // Below 0x60 passes through.
        assert_eq!(charset.translate('A'), 'A');
    }

    #[test]
    fn test_utf8_mode_bypasses() {
        let mut state = CharsetState::new();
        state.designate(0, Charset::DecSpecialGraphic);
        assert_eq!(state.translate('q'), '─');
        state.utf8_mode = true;
        assert_eq!(state.translate('q'), 'q');
    }

    #[test]
    fn test_slot_selection() {
        let mut state = CharsetState::new();
        state.designate(1, Charset::DecSpecialGraphic);
        assert_eq!(state.translate('q'), 'q');
        state.select(1);
        assert_eq!(state.translate('q'), '─');
        state.select(0);
        assert_eq!(state.translate('q'), 'q');
    }
}
