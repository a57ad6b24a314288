#![warn(clippy::pedantic)]

//! Byte-level push scanner for terminal output streams.
//!
//! The scanner consumes the byte stream a PTY-attached program writes to
//! its controlling terminal and emits structured [`VtEvent`]s: printable
//! scalars (decoded incrementally from UTF-8), C0 controls, and completed
//! ESC/CSI/OSC sequences. Sequences split across `feed_with` calls are
//! retained and completed when the remaining bytes arrive.

mod event;
mod scanner;
mod utf8;

pub use crate::event::{Csi, Esc, Osc, Param, Params, VtEvent};
pub use crate::scanner::Scanner;
pub use crate::utf8::{Utf8Decoder, Utf8Step};
