//! Feed stdin through a terminal and dump the resulting screen.
//!
//! ```sh
//! printf 'ls output here\r\n' | cargo run --example dump
//! RUST_LOG=vtgrid=debug cargo run --example dump < capture.bin
//! ```

use std::io::Read;

use vtgrid::{DecModeAction, Snapshot, Terminal, TerminalObserver};

#[derive(Default)]
struct Dump {
    responses: Vec<Vec<u8>>,
    bells: usize,
}

impl TerminalObserver for Dump {
    fn on_update(&mut self, _snapshot: &Snapshot) {}

    fn on_response(&mut self, bytes: &[u8]) {
        self.responses.push(bytes.to_vec());
    }

    fn on_dec_mode(&mut self, action: DecModeAction, modes: &[u16]) {
        eprintln!("dec-mode {action:?}: {modes:?}");
    }

    fn on_bell(&mut self) {
        self.bells += 1;
    }

    fn on_title_changed(&mut self, title: &str) {
        eprintln!("title: {title}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;

    let mut term = Terminal::new(80, 24, 1000)?;
    let mut dump = Dump::default();
    term.write(&input, &mut dump);
    term.flush_incomplete(&mut dump);

    let snap = term.snapshot();
    println!("┌{}┐", "─".repeat(snap.cols));
    for y in 0..snap.rows {
        println!("│{}│", snap.row_text(y));
    }
    println!("└{}┘", "─".repeat(snap.cols));
    println!(
        "cursor at ({}, {}), {} scrollback rows, {} bells",
        snap.cursor.x,
        snap.cursor.y,
        term.scrollback_len(),
        dump.bells
    );
    for response in &dump.responses {
        println!("response: {:?}", String::from_utf8_lossy(response));
    }
    Ok(())
}
