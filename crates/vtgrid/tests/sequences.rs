//! Conformance fixtures: realistic byte streams the way full-screen
//! programs actually emit them, checked against the resulting screen.

mod common;

use common::{Recorder, term, term_sized};
use pretty_assertions::assert_eq;
use vtgrid::{Color, NamedColor, StyleFlags};

fn screen(term: &vtgrid::Terminal) -> Vec<String> {
    let snap = term.snapshot();
    (0..snap.rows)
        .map(|y| snap.row_text(y).trim_end().to_string())
        .collect()
}

#[test]
fn shell_prompt_redraw() {
    // A readline-style redraw: prompt, typed text, then the line is
    // rewritten in place after history navigation.
    let mut term = term_sized(40, 5, 0);
    term.feed(b"$ cargo tets");
    term.feed(b"\r\x1b[K$ cargo test");
    assert_eq!(screen(&term)[0], "$ cargo test");
    assert_eq!(term.cursor().x, 12);
}

#[test]
fn colored_ls_output() {
    let mut term = term_sized(40, 5, 0);
    term.feed(b"\x1b[0m\x1b[01;34msrc\x1b[0m  \x1b[01;32mrun.sh\x1b[0m\r\n");
    assert_eq!(screen(&term)[0], "src  run.sh");
    let dir = term.cell(0, 0).unwrap();
    assert_eq!(dir.style.fg, Color::Named(NamedColor::Blue));
    assert!(dir.style.flags.contains(StyleFlags::BOLD));
    let sep = term.cell(3, 0).unwrap();
    assert_eq!(sep.style.fg, Color::Default);
    let script = term.cell(5, 0).unwrap();
    assert_eq!(script.style.fg, Color::Named(NamedColor::Green));
}

#[test]
fn vim_like_startup_and_quit() {
    let mut term = term_sized(20, 6, 10);
    term.feed(b"before vim\r\n");
    let primary = screen(&term);

    // Enter the alternate screen, draw a buffer with tildes, status
    // line via cursor addressing, then leave.
    term.feed(b"\x1b[?1049h\x1b[?1h\x1b=");
    term.feed(b"\x1b[2J\x1b[H");
    for row in 2..6 {
        term.feed(format!("\x1b[{row};1H~").as_bytes());
    }
    term.feed(b"\x1b[6;1H\x1b[7m-- INSERT --\x1b[0m");
    assert_eq!(screen(&term)[2], "~");
    assert!(
        term.cell(0, 5)
            .unwrap()
            .style
            .flags
            .contains(StyleFlags::INVERSE)
    );
    term.feed(b"\x1b[?1049l\x1b[?1l\x1b>");

    assert_eq!(screen(&term), primary);
    assert!(!term.window().application_cursor_keys);
}

#[test]
fn full_screen_app_with_scroll_region() {
    // A pager keeps a status line pinned by scrolling rows 1..=4 only.
    let mut term = term_sized(10, 5, 50);
    term.feed(b"\x1b[1;4r");
    for i in 0..6 {
        term.feed(format!("\x1b[4;1Hline {i}\n").as_bytes());
    }
    term.feed(b"\x1b[5;1H\x1b[7mSTATUS\x1b[0m\x1b[r");
    let rows = screen(&term);
    // Each write lands on the region's bottom row and the newline
    // scrolls it up, so the last three lines are visible.
    assert_eq!(rows[..4], ["line 3", "line 4", "line 5", ""]);
    assert_eq!(rows[4], "STATUS");
    // Pinned-region scrolling must not leak into scrollback.
    assert_eq!(term.scrollback_len(), 0);
}

#[test]
fn progress_bar_with_carriage_returns() {
    let mut term = term_sized(30, 3, 0);
    for pct in [10, 40, 99, 100] {
        term.feed(format!("\rdownloading {pct:>3}%").as_bytes());
    }
    assert_eq!(screen(&term)[0], "downloading 100%");
    assert_eq!(term.cursor().y, 0);
}

#[test]
fn box_drawing_menu() {
    let mut term = term_sized(8, 4, 0);
    term.feed(b"\x1b(0lqqk\r\nx\x1b(B ok\x1b(0x\r\n\x1b(0mqqj\x1b(B");
    assert_eq!(screen(&term), vec!["┌──┐", "│ ok│", "└──┘", ""]);
}

#[test]
fn decaln_fills_and_homes() {
    let mut term = term_sized(6, 3, 0);
    term.feed(b"\x1b[2;3r\x1b[2;2H\x1b#8");
    let rows = screen(&term);
    assert_eq!(rows, vec!["EEEEEE", "EEEEEE", "EEEEEE"]);
    assert_eq!((term.cursor().x, term.cursor().y), (0, 0));
    assert_eq!(term.grid().scroll_region(), (0, 2));
}

#[test]
fn rep_repeats_last_graphic() {
    let mut term = term_sized(12, 2, 0);
    term.feed(b"a\x1b[3b");
    assert_eq!(screen(&term)[0], "aaaa");
    // REP with nothing printed yet is a no-op.
    let mut fresh = term_sized(12, 2, 0);
    fresh.feed(b"\x1b[5b");
    assert_eq!(screen(&fresh)[0], "");
}

#[test]
fn vpa_hpa_position_independently() {
    let mut term = term_sized(10, 5, 0);
    term.feed(b"\x1b[3;4H\x1b[2dX");
    // VPA moved to row 2 keeping column 4.
    assert_eq!(term.cell(3, 1).unwrap().ch, 'X');
    term.feed(b"\x1b[2`Y");
    assert_eq!(term.cell(1, 1).unwrap().ch, 'Y');
}

#[test]
fn decrqm_reports_mode_states() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b[?2004h\x1b[?2004$p\x1b[?2004l\x1b[?2004$p", &mut rec);
    term.write(b"\x1b[?31337$p", &mut rec);
    assert_eq!(
        rec.responses,
        vec![
            b"\x1b[?2004;1$y".to_vec(),
            b"\x1b[?2004;2$y".to_vec(),
            b"\x1b[?31337;0$y".to_vec(),
        ]
    );
}

#[test]
fn terminal_startup_probe_sequence() {
    // Programs commonly probe DA, DSR, and colors in one burst.
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b[c\x1b[6n\x1b]10;?\x07\x1b]11;?\x07", &mut rec);
    assert_eq!(rec.responses.len(), 4);
    assert_eq!(rec.responses[0], b"\x1b[?1;2c");
    assert_eq!(rec.responses[1], b"\x1b[1;1R");
    assert!(rec.responses[2].starts_with(b"\x1b]10;rgb:"));
    assert!(rec.responses[3].starts_with(b"\x1b]11;rgb:"));
}

#[test]
fn interrupted_sequences_across_chunks() {
    // A paste-sized write split at the worst possible boundaries.
    let mut term = term_sized(20, 4, 0);
    let stream: &[&[u8]] = &[
        b"\x1b", b"[", b"3", b"1", b"m", b"r", b"\xc3", b"\xa9", b"d",
        b"\x1b[", b"0m", b"\x1b]0;ti", b"tle\x07", b"!",
    ];
    for chunk in stream {
        term.feed(chunk);
    }
    assert_eq!(screen(&term)[0], "réd!");
    assert_eq!(term.cell(0, 0).unwrap().style.fg, Color::Named(NamedColor::Red));
    assert_eq!(term.window().title, "title");
}

#[test]
fn cursor_save_restore_with_styles() {
    let mut term = term_sized(20, 4, 0);
    term.feed(b"\x1b[1;31m\x1b7\x1b[0m\x1b[3;3Hplain\x1b8X");
    // ESC 8 restored both position (0,0) and the bold red pen.
    let cell = term.cell(0, 0).unwrap();
    assert_eq!(cell.ch, 'X');
    assert_eq!(cell.style.fg, Color::Named(NamedColor::Red));
    assert!(cell.style.flags.contains(StyleFlags::BOLD));
    assert_eq!(term.cell(2, 2).unwrap().style.fg, Color::Default);
}

#[test]
fn scrollback_survives_alternate_screen_excursion() {
    let mut term = term_sized(8, 2, 100);
    term.feed(b"one\r\ntwo\r\nthree");
    let depth = term.scrollback_len();
    assert!(depth > 0);
    term.feed(b"\x1b[?1049htop output\x1b[?1049l");
    assert_eq!(term.scrollback_len(), depth);
    let rows = term.viewport_rows(0, depth);
    assert_eq!(rows[0].text().trim_end(), "one");
}
