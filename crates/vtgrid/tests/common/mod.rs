//! Shared observer recorder for the integration suites.
#![allow(dead_code)]

use vtgrid::{
    ClipboardPayload, DecModeAction, Snapshot, Terminal, TerminalObserver,
};

/// Records every observer callback for later assertions.
#[derive(Default)]
pub struct Recorder {
    pub updates: usize,
    pub last_snapshot: Option<Snapshot>,
    pub responses: Vec<Vec<u8>>,
    pub dec_modes: Vec<(DecModeAction, Vec<u16>)>,
    pub bells: usize,
    pub clipboard: Vec<(String, ClipboardPayload)>,
    pub titles: Vec<String>,
    pub icons: Vec<String>,
    pub chunks: Vec<String>,
}

impl TerminalObserver for Recorder {
    fn on_update(&mut self, snapshot: &Snapshot) {
        self.updates += 1;
        self.last_snapshot = Some(snapshot.clone());
    }

    fn on_response(&mut self, bytes: &[u8]) {
        self.responses.push(bytes.to_vec());
    }

    fn on_dec_mode(&mut self, action: DecModeAction, modes: &[u16]) {
        self.dec_modes.push((action, modes.to_vec()));
    }

    fn on_bell(&mut self) {
        self.bells += 1;
    }

    fn on_clipboard(&mut self, selection: &str, payload: &ClipboardPayload) {
        self.clipboard.push((selection.to_string(), payload.clone()));
    }

    fn on_title_changed(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn on_icon_changed(&mut self, icon_name: &str) {
        self.icons.push(icon_name.to_string());
    }

    fn on_chunk(&mut self, chunk: &str) {
        self.chunks.push(chunk.to_string());
    }
}

/// An 80x24 terminal with the default scrollback used across tests.
pub fn term() -> Terminal {
    Terminal::new(80, 24, 1000).expect("valid dimensions")
}

pub fn term_sized(cols: usize, rows: usize, scrollback: usize) -> Terminal {
    Terminal::new(cols, rows, scrollback).expect("valid dimensions")
}
