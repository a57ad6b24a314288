//! The sequence state machine.

use smallvec::SmallVec;

use crate::event::{Csi, Esc, Osc, Params, VtEvent};
use crate::utf8::{REPLACEMENT, Utf8Decoder, Utf8Step};

/// Upper bound on a buffered OSC payload. Payloads past this length are
/// discarded when the terminator arrives. The bound sits above the
/// clipboard (OSC 52) base64 limit so that limit, not this one, governs
/// well-formed clipboard writes.
pub const MAX_OSC_PAYLOAD: usize = 8192;

/// Upper bound on intermediate bytes per sequence. Two is enough for
/// every sequence this scanner can meaningfully hand on (`ESC % G`,
/// `ESC ( % 5`, `CSI SP q`, `CSI " q`, ...).
const MAX_INTERMEDIATES: usize = 2;

const CAN: u8 = 0x18;
const SUB: u8 = 0x1A;
const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;
const DEL: u8 = 0x7F;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum State {
    #[default]
    Ground,
    Esc,
    Csi,
    Osc,
    OscEsc,
}

/// Push scanner for the host-to-terminal byte stream.
///
/// Feed byte chunks with [`Scanner::feed_with`]; each completed unit of
/// input invokes the callback with a [`VtEvent`]. State (in-progress
/// UTF-8 sequences, escape sequences, OSC payloads) carries over between
/// calls. [`Scanner::flush_with`] force-completes whatever is pending.
///
/// C0 controls encountered inside an ESC or CSI sequence are dispatched
/// immediately without aborting the sequence, except CAN and SUB which
/// cancel it.
#[derive(Debug, Default)]
pub struct Scanner {
    state: State,
    utf8: Utf8Decoder,
    params: Params,
    cur_value: u32,
    cur_sub: bool,
    seen_param_byte: bool,
    private: Option<u8>,
    intermediates: SmallVec<[u8; MAX_INTERMEDIATES]>,
    seq_overflow: bool,
    osc: Vec<u8>,
    osc_overflow: bool,
}

impl Scanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a sequence or a partial UTF-8 character is buffered.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state != State::Ground || self.utf8.is_pending()
    }

    /// Feed bytes into the scanner, invoking `cb` for each event.
    pub fn feed_with<F>(&mut self, input: &[u8], cb: &mut F)
    where
        F: for<'a> FnMut(VtEvent<'a>),
    {
        for &byte in input {
            self.step(byte, cb);
        }
    }

    /// Force-complete pending input.
    ///
    /// A buffered partial UTF-8 character becomes U+FFFD; an in-progress
    /// escape sequence is discarded. The scanner returns to ground
    /// state with nothing buffered.
    pub fn flush_with<F>(&mut self, cb: &mut F)
    where
        F: for<'a> FnMut(VtEvent<'a>),
    {
        if let Some(ch) = self.utf8.flush() {
            cb(VtEvent::Print(ch));
        }
        if self.state != State::Ground {
            tracing::trace!(state = ?self.state, "flushing incomplete sequence");
            self.enter_ground();
        }
    }

    fn step<F>(&mut self, byte: u8, cb: &mut F)
    where
        F: for<'a> FnMut(VtEvent<'a>),
    {
        match self.state {
            State::Ground => self.step_ground(byte, cb),
            State::Esc => self.step_esc(byte, cb),
            State::Csi => self.step_csi(byte, cb),
            State::Osc => self.step_osc(byte, cb),
            State::OscEsc => self.step_osc_esc(byte, cb),
        }
    }

    fn step_ground<F>(&mut self, byte: u8, cb: &mut F)
    where
        F: for<'a> FnMut(VtEvent<'a>),
    {
        if byte < 0x20 || byte == DEL {
            // A control interrupting a multi-byte character truncates it.
            if let Some(ch) = self.utf8.flush() {
                cb(VtEvent::Print(ch));
            }
            if byte == ESC {
                self.enter_esc();
            } else if byte == DEL {
                tracing::trace!("ignoring DEL in ground state");
            } else {
                cb(VtEvent::C0(byte));
            }
            return;
        }
        match self.utf8.push(byte) {
            Utf8Step::Pending => {}
            Utf8Step::Char(ch) => cb(VtEvent::Print(ch)),
            Utf8Step::Invalid => cb(VtEvent::Print(REPLACEMENT)),
            Utf8Step::InvalidRetry => {
                cb(VtEvent::Print(REPLACEMENT));
                match self.utf8.push(byte) {
                    Utf8Step::Pending => {}
                    Utf8Step::Char(ch) => cb(VtEvent::Print(ch)),
                    Utf8Step::Invalid | Utf8Step::InvalidRetry => {
                        cb(VtEvent::Print(REPLACEMENT));
                    }
                }
            }
        }
    }

    fn step_esc<F>(&mut self, byte: u8, cb: &mut F)
    where
        F: for<'a> FnMut(VtEvent<'a>),
    {
        match byte {
            b'[' if self.intermediates.is_empty() => self.state = State::Csi,
            b']' if self.intermediates.is_empty() => self.state = State::Osc,
            0x30..=0x7E => {
                if self.seq_overflow {
                    tracing::warn!(final_byte = byte, "dropping oversized ESC sequence");
                } else {
                    cb(VtEvent::Esc(Esc {
                        intermediates: &self.intermediates,
                        final_byte: byte,
                    }));
                }
                self.enter_ground();
            }
            0x20..=0x2F => self.push_intermediate(byte),
            CAN | SUB => {
                tracing::trace!("ESC sequence cancelled");
                self.enter_ground();
            }
            ESC => self.enter_esc(),
            0x00..=0x1F => cb(VtEvent::C0(byte)),
            _ => tracing::trace!(byte, "dropping byte in ESC state"),
        }
    }

    fn step_csi<F>(&mut self, byte: u8, cb: &mut F)
    where
        F: for<'a> FnMut(VtEvent<'a>),
    {
        match byte {
            b'0'..=b'9' => {
                self.cur_value = (self.cur_value * 10 + u32::from(byte - b'0'))
                    .min(u32::from(u16::MAX));
                self.seen_param_byte = true;
            }
            b':' => {
                self.finish_param();
                self.cur_sub = true;
                self.seen_param_byte = true;
            }
            b';' => {
                self.finish_param();
                self.cur_sub = false;
                self.seen_param_byte = true;
            }
            0x3C..=0x3F => {
                if self.private.is_none()
                    && !self.seen_param_byte
                    && self.intermediates.is_empty()
                {
                    self.private = Some(byte);
                } else {
                    tracing::trace!(byte, "dropping stray private marker in CSI");
                }
            }
            0x20..=0x2F => self.push_intermediate(byte),
            0x40..=0x7E => {
                self.finish_param();
                if self.seq_overflow {
                    tracing::warn!(final_byte = byte, "dropping oversized CSI sequence");
                } else {
                    cb(VtEvent::Csi(Csi {
                        private: self.private,
                        params: &self.params,
                        intermediates: &self.intermediates,
                        final_byte: byte,
                    }));
                }
                self.enter_ground();
            }
            CAN | SUB => {
                tracing::trace!("CSI sequence cancelled");
                self.enter_ground();
            }
            ESC => self.enter_esc(),
            0x00..=0x1F => cb(VtEvent::C0(byte)),
            DEL => {}
            _ => tracing::trace!(byte, "dropping byte in CSI state"),
        }
    }

    fn step_osc<F>(&mut self, byte: u8, cb: &mut F)
    where
        F: for<'a> FnMut(VtEvent<'a>),
    {
        match byte {
            BEL => self.complete_osc(cb),
            ESC => self.state = State::OscEsc,
            CAN | SUB => {
                tracing::trace!("OSC sequence cancelled");
                self.enter_ground();
            }
            _ => self.step_osc_byte(byte),
        }
    }

    fn step_osc_esc<F>(&mut self, byte: u8, cb: &mut F)
    where
        F: for<'a> FnMut(VtEvent<'a>),
    {
        match byte {
            b'\\' | BEL => self.complete_osc(cb),
            _ => {
                // Not a terminator after all; resume payload capture and
                // reprocess the byte there.
                self.state = State::Osc;
                self.step(byte, cb);
            }
        }
    }

    fn complete_osc<F>(&mut self, cb: &mut F)
    where
        F: for<'a> FnMut(VtEvent<'a>),
    {
        if self.osc_overflow {
            tracing::warn!(len = MAX_OSC_PAYLOAD, "dropping oversized OSC payload");
        } else {
            cb(VtEvent::Osc(Osc { payload: &self.osc }));
        }
        self.enter_ground();
    }

    fn finish_param(&mut self) {
        #[allow(clippy::cast_possible_truncation)]
        self.params.push(self.cur_value as u16, self.cur_sub);
        self.cur_value = 0;
    }

    fn push_intermediate(&mut self, byte: u8) {
        if self.intermediates.len() < MAX_INTERMEDIATES {
            self.intermediates.push(byte);
        } else {
            tracing::trace!(byte, "intermediate overflow");
            self.seq_overflow = true;
        }
    }

    fn enter_esc(&mut self) {
        self.reset_sequence();
        self.state = State::Esc;
    }

    fn enter_ground(&mut self) {
        self.reset_sequence();
        self.state = State::Ground;
    }

    fn reset_sequence(&mut self) {
        self.params.clear();
        self.cur_value = 0;
        self.cur_sub = false;
        self.seen_param_byte = false;
        self.private = None;
        self.intermediates.clear();
        self.seq_overflow = false;
        self.osc.clear();
        self.osc_overflow = false;
    }
}

impl Scanner {
    fn step_osc_byte(&mut self, byte: u8) {
        match byte {
            0x20..=0xFF => {
                if self.osc.len() < MAX_OSC_PAYLOAD {
                    self.osc.push(byte);
                } else {
                    self.osc_overflow = true;
                }
            }
            _ => tracing::trace!(byte, "dropping control in OSC payload"),
        }
    }
}
