//! End-to-end behavior of the emulator: byte stream in, observable
//! state and responses out.

mod common;

use common::{Recorder, term, term_sized};
use pretty_assertions::assert_eq;
use vtgrid::{
    ClipboardPayload, Color, DecModeAction, NamedColor, Style, UnderlineStyle,
};

#[test]
fn plain_character_lands_at_origin() {
    let mut term = term();
    term.feed(b"A");
    let cell = term.cell(0, 0).unwrap();
    assert_eq!(cell.ch, 'A');
    assert_eq!(cell.style, Style::default());
    assert_eq!((term.cursor().x, term.cursor().y), (1, 0));
}

#[test]
fn crlf_moves_to_next_row() {
    let mut term = term();
    term.feed(b"Hello\r\nWorld");
    let snap = term.snapshot();
    assert_eq!(snap.row_text(0).trim_end(), "Hello");
    assert_eq!(snap.row_text(1).trim_end(), "World");
    assert_eq!((snap.cursor.x, snap.cursor.y), (5, 1));
}

#[test]
fn lf_keeps_the_column() {
    let mut term = term();
    term.feed(b"abc\ndef");
    let snap = term.snapshot();
    assert_eq!(snap.row_text(0).trim_end(), "abc");
    assert_eq!(snap.row_text(1).trim_end(), "   def");
    // FF behaves exactly like LF.
    term.feed(b"\x0cx");
    assert_eq!(term.cursor().y, 2);
}

#[test]
fn sgr_stamps_cells_at_write_time() {
    let mut term = term();
    term.feed(b"\x1b[31mRed\x1b[0mX");
    for x in 0..3 {
        assert_eq!(
            term.cell(x, 0).unwrap().style.fg,
            Color::Named(NamedColor::Red)
        );
    }
    let plain = term.cell(3, 0).unwrap();
    assert_eq!(plain.ch, 'X');
    assert_eq!(plain.style, Style::default());
}

#[test]
fn home_and_clear_blanks_screen() {
    let mut term = term();
    term.feed(b"some output\r\nmore output");
    term.feed(b"\x1b[H\x1b[2J");
    assert_eq!((term.cursor().x, term.cursor().y), (0, 0));
    let snap = term.snapshot();
    for y in 0..snap.rows {
        assert_eq!(snap.row_text(y), " ".repeat(snap.cols));
    }
}

#[test]
fn osc_zero_sets_title_and_icon() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b]0;My Title\x07", &mut rec);
    assert_eq!(term.window().title, "My Title");
    assert_eq!(term.window().icon_name, "My Title");
    assert_eq!(rec.titles, vec!["My Title"]);
    assert_eq!(rec.icons, vec!["My Title"]);
}

#[test]
fn cursor_position_report() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.feed(b"\x1b[10;5H");
    assert_eq!((term.cursor().x, term.cursor().y), (4, 9));
    term.write(b"\x1b[6n", &mut rec);
    assert_eq!(rec.responses, vec![b"\x1b[10;5R".to_vec()]);
}

#[test]
fn clipboard_set_decodes_base64() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b]52;c;SGVsbG8gV29ybGQ=\x07", &mut rec);
    assert_eq!(
        rec.clipboard,
        vec![(
            "c".to_string(),
            ClipboardPayload::Data(b"Hello World".to_vec())
        )]
    );
}

#[test]
fn clipboard_query() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b]52;p;?\x07", &mut rec);
    assert_eq!(
        rec.clipboard,
        vec![("p".to_string(), ClipboardPayload::Query)]
    );
}

#[test]
fn oversized_clipboard_is_dropped() {
    let mut term = term();
    let mut rec = Recorder::default();
    let mut input = b"\x1b]52;c;".to_vec();
    input.extend(std::iter::repeat_n(b'A', 5000));
    input.push(0x07);
    term.write(&input, &mut rec);
    assert!(rec.clipboard.is_empty());
}

#[test]
fn invalid_base64_clipboard_is_dropped() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b]52;c;!!!not base64!!!\x07", &mut rec);
    assert!(rec.clipboard.is_empty());
}

#[test]
fn hyperlinks_attach_until_cleared() {
    let mut term = term();
    term.feed(b"\x1b]8;;https://example.com\x07Hi\x1b]8;;\x07there");
    let linked = term.cell(0, 0).unwrap().link.clone().unwrap();
    assert_eq!(&*linked, "https://example.com");
    assert_eq!(&*term.cell(1, 0).unwrap().link.clone().unwrap(), "https://example.com");
    assert!(term.cell(2, 0).unwrap().link.is_none());
}

#[test]
fn sgr_reset_keeps_hyperlink() {
    let mut term = term();
    term.feed(b"\x1b]8;;https://example.com\x07\x1b[0ma");
    assert!(term.cell(0, 0).unwrap().link.is_some());
}

#[test]
fn alternate_screen_round_trip_preserves_primary() {
    let mut term = term();
    term.feed(b"primary content\x1b[5;10H");
    let before = term.snapshot();
    term.feed(b"\x1b[?1049h");
    assert!(term.is_alternate());
    // The alternate starts cleared.
    assert_eq!(term.cell(0, 0).unwrap().ch, ' ');
    term.feed(b"\x1b[Hfull screen app output\x1b[2;1Hmore");
    term.feed(b"\x1b[?1049l");
    assert!(!term.is_alternate());
    let after = term.snapshot();
    assert_eq!(before.lines, after.lines);
    assert_eq!(before.cursor, after.cursor);
}

#[test]
fn mode_47_keeps_alternate_contents() {
    let mut term = term();
    term.feed(b"\x1b[?47hkept\x1b[?47l\x1b[?47h");
    assert_eq!(term.cell(0, 0).unwrap().ch, 'k');
}

#[test]
fn mode_1047_clears_alternate_on_exit() {
    let mut term = term();
    term.feed(b"\x1b[?1047hgone\x1b[?1047l\x1b[?1047h");
    assert_eq!(term.cell(0, 0).unwrap().ch, ' ');
}

#[test]
fn mode_1048_saves_and_restores_cursor_only() {
    let mut term = term();
    term.feed(b"\x1b[7;3H\x1b[?1048h\x1b[H\x1b[?1048l");
    assert_eq!((term.cursor().x, term.cursor().y), (2, 6));
}

#[test]
fn dec_mode_events_carry_the_mode_list() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b[?25;2004h\x1b[?25l", &mut rec);
    assert_eq!(
        rec.dec_modes,
        vec![
            (DecModeAction::Set, vec![25, 2004]),
            (DecModeAction::Reset, vec![25]),
        ]
    );
    assert!(!term.window().cursor_visible);
    assert!(term.window().bracketed_paste);
}

#[test]
fn device_attribute_responses() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b[c\x1b[>c\x1b[5n", &mut rec);
    assert_eq!(
        rec.responses,
        vec![
            b"\x1b[?1;2c".to_vec(),
            b"\x1b[>0;0;0c".to_vec(),
            b"\x1b[0n".to_vec(),
        ]
    );
}

#[test]
fn size_report() {
    let mut term = term_sized(132, 43, 0);
    let mut rec = Recorder::default();
    term.write(b"\x1b[18t", &mut rec);
    assert_eq!(rec.responses, vec![b"\x1b[8;43;132t".to_vec()]);
}

#[test]
fn charset_report() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b(0\x1b[?26n", &mut rec);
    assert_eq!(rec.responses, vec![b"\x1b[?26;0\x1b\\".to_vec()]);
}

#[test]
fn title_query_reports_current_title() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b]2;session\x07\x1b]21\x07", &mut rec);
    assert_eq!(rec.responses, vec![b"\x1b]Lsession\x1b\\".to_vec()]);
}

#[test]
fn title_stack_push_pop() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b]2;first\x07\x1b[22;2t\x1b]2;second\x07\x1b[23;2t", &mut rec);
    assert_eq!(term.window().title, "first");
    assert_eq!(rec.titles, vec!["first", "second", "first"]);
    // Pop on an empty stack is a no-op.
    term.write(b"\x1b[23;2t", &mut rec);
    assert_eq!(term.window().title, "first");
}

#[test]
fn default_color_queries_follow_theme() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b]11;rgb:28/2c/34\x07\x1b]11;?\x07\x1b]10;?\x07", &mut rec);
    assert_eq!(
        rec.responses,
        vec![
            b"\x1b]11;rgb:2828/2c2c/3434\x07".to_vec(),
            b"\x1b]10;rgb:ffff/ffff/ffff\x07".to_vec(),
        ]
    );
}

#[test]
fn palette_set_and_query() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b]4;17;#ff8000\x07\x1b]4;17;?\x07", &mut rec);
    assert_eq!(
        rec.responses,
        vec![b"\x1b]4;17;rgb:ffff/8080/0000\x07".to_vec()]
    );
}

#[test]
fn bell_fires_observer() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"a\x07b\x07", &mut rec);
    assert_eq!(rec.bells, 2);
}

#[test]
fn wrap_pending_boundary() {
    let mut term = term_sized(4, 3, 0);
    term.feed(b"abcd");
    // Writing the last column latches wrap-pending without moving.
    assert_eq!((term.cursor().x, term.cursor().y), (3, 0));
    assert!(term.grid().wrap_pending());
    // The next printable wraps.
    term.feed(b"e");
    assert_eq!(term.cell(0, 1).unwrap().ch, 'e');
    // CR in between clears the latch instead.
    term.feed(b"fg");
    term.feed(b"h");
    assert!(term.grid().wrap_pending());
    term.feed(b"\r");
    assert!(!term.grid().wrap_pending());
    term.feed(b"z");
    assert_eq!(term.cell(0, 1).unwrap().ch, 'z');
}

#[test]
fn autowrap_off_overwrites_last_column() {
    let mut term = term_sized(4, 2, 0);
    term.feed(b"\x1b[?7labcdef");
    assert_eq!(term.snapshot().row_text(0), "abcf");
    assert_eq!(term.cursor().x, 3);
}

#[test]
fn ech_clamps_to_line_end_and_keeps_cursor() {
    let mut term = term_sized(6, 2, 0);
    term.feed(b"abcdef\x1b[1;4H\x1b[99X");
    assert_eq!(term.snapshot().row_text(0), "abc   ");
    assert_eq!((term.cursor().x, term.cursor().y), (3, 0));
}

#[test]
fn insert_delete_lines_outside_region_are_noops() {
    let mut term = term_sized(4, 6, 0);
    term.feed(b"a\r\nb\r\nc\r\nd\r\ne\r\nf");
    term.feed(b"\x1b[2;4r");
    // Cursor homes to the region; move below it.
    term.feed(b"\x1b[6;1H\x1b[2L\x1b[2M");
    let snap = term.snapshot();
    assert_eq!(
        (0..6).map(|y| snap.row_text(y).trim_end().to_string()).collect::<Vec<_>>(),
        vec!["a", "b", "c", "d", "e", "f"]
    );
}

#[test]
fn scroll_region_contains_line_feeds() {
    let mut term = term_sized(2, 4, 100);
    term.feed(b"a\r\nb\r\nc\r\nd");
    term.feed(b"\x1b[2;3r\x1b[3;1H\r\n\r\n");
    let snap = term.snapshot();
    assert_eq!(snap.row_text(0).trim_end(), "a");
    assert_eq!(snap.row_text(1).trim_end(), "");
    assert_eq!(snap.row_text(3).trim_end(), "d");
    // Region scrolls never reach scrollback.
    assert_eq!(term.scrollback_len(), 0);
}

#[test]
fn decstbm_homes_to_region_top() {
    let mut term = term_sized(10, 10, 0);
    term.feed(b"\x1b[3;7r");
    assert_eq!((term.cursor().x, term.cursor().y), (0, 2));
    // Degenerate regions are rejected and leave everything alone.
    term.feed(b"\x1b[5;5r");
    assert_eq!(term.grid().scroll_region(), (2, 6));
}

#[test]
fn origin_mode_addresses_relative_to_region() {
    let mut term = term_sized(10, 10, 0);
    let mut rec = Recorder::default();
    term.feed(b"\x1b[3;7r\x1b[?6h\x1b[1;1H");
    assert_eq!(term.cursor().y, 2);
    term.write(b"\x1b[6n", &mut rec);
    // CPR is region-relative under origin mode.
    assert_eq!(rec.responses, vec![b"\x1b[1;1R".to_vec()]);
    term.feed(b"\x1b[99;1H");
    assert_eq!(term.cursor().y, 6);
}

#[test]
fn selective_erase_respects_protection() {
    let mut term = term_sized(10, 2, 0);
    term.feed(b"ab\x1b[1\"qCD\x1b[0\"qef");
    // DECSED leaves the protected span.
    term.feed(b"\x1b[1;1H\x1b[?2J");
    assert_eq!(term.snapshot().row_text(0).trim_end(), "  CD");
    // Plain ED erases it.
    term.feed(b"\x1b[2J");
    assert_eq!(term.snapshot().row_text(0).trim_end(), "");
}

#[test]
fn ed3_clears_scrollback() {
    let mut term = term_sized(2, 2, 100);
    term.feed(b"a\r\nb\r\nc\r\nd");
    assert!(term.scrollback_len() > 0);
    term.feed(b"\x1b[3J");
    assert_eq!(term.scrollback_len(), 0);
}

#[test]
fn scrollback_accumulates_and_viewport_reads_back() {
    let mut term = term_sized(3, 2, 10);
    term.feed(b"a\r\nb\r\nc\r\nd");
    assert_eq!(term.scrollback_len(), 2);
    let rows = term.viewport_rows(0, 4);
    let texts: Vec<String> =
        rows.iter().map(|r| r.text().trim_end().to_string()).collect();
    assert_eq!(texts, vec!["a", "b", "c", "d"]);
}

#[test]
fn alternate_screen_never_scrolls_back() {
    let mut term = term_sized(2, 2, 100);
    term.feed(b"\x1b[?1049h");
    for _ in 0..10 {
        term.feed(b"x\r\n");
    }
    assert_eq!(term.scrollback_len(), 0);
    term.feed(b"\x1b[?1049l");
    assert_eq!(term.scrollback_len(), 0);
}

#[test]
fn dec_graphics_translate_box_drawing() {
    let mut term = term();
    term.feed(b"\x1b(0lqk\x1b(Bx");
    let snap = term.snapshot();
    assert_eq!(snap.row_text(0).trim_end(), "┌─┐x");
}

#[test]
fn utf8_mode_bypasses_dec_graphics() {
    let mut term = term();
    term.feed(b"\x1b(0\x1b%Gq\x1b%@q");
    assert_eq!(term.snapshot().row_text(0).trim_end(), "q─");
}

#[test]
fn shift_out_selects_g1() {
    let mut term = term();
    term.feed(b"\x1b)0q\x0eq\x0fq");
    assert_eq!(term.snapshot().row_text(0).trim_end(), "q─q");
}

#[test]
fn multibyte_utf8_and_recovery() {
    let mut term = term();
    term.feed(b"caf\xc3\xa9 \xff ok");
    assert_eq!(term.snapshot().row_text(0).trim_end(), "café \u{FFFD} ok");
}

#[test]
fn split_utf8_across_writes() {
    let mut term = term();
    term.feed(b"\xe4\xb8");
    assert_eq!(term.cursor().x, 0);
    term.feed(b"\x96");
    assert_eq!(term.snapshot().row_text(0).trim_end(), "世");
}

#[test]
fn flush_incomplete_emits_replacement() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\xf0\x9f", &mut rec);
    term.flush_incomplete(&mut rec);
    assert_eq!(term.snapshot().row_text(0).trim_end(), "\u{FFFD}");
}

#[test]
fn cursor_style_and_visibility() {
    let mut term = term();
    term.feed(b"\x1b[4 q\x1b[?25l");
    let snap = term.snapshot();
    assert_eq!(u8::from(snap.cursor.style), 4);
    assert!(!snap.cursor.visible);
}

#[test]
fn xtsave_and_xtrestore_private_modes() {
    let mut term = term();
    term.feed(b"\x1b[?7l\x1b[?7s\x1b[?7h");
    assert!(term.grid().autowrap);
    term.feed(b"\x1b[?7r");
    assert!(!term.grid().autowrap);
}

#[test]
fn underline_styles_reach_cells() {
    let mut term = term();
    term.feed(b"\x1b[4:3mx");
    assert_eq!(term.cell(0, 0).unwrap().style.underline, UnderlineStyle::Curly);
}

#[test]
fn resize_grows_and_shrinks() {
    let mut term = term_sized(4, 4, 10);
    let mut rec = Recorder::default();
    term.feed(b"a\r\nb\r\nc\r\nd");
    term.resize(6, 2, &mut rec).unwrap();
    // The two top rows moved into scrollback.
    assert_eq!(term.scrollback_len(), 2);
    let snap = term.snapshot();
    assert_eq!(snap.cols, 6);
    assert_eq!(snap.row_text(0).trim_end(), "c");
    assert_eq!(snap.row_text(1).trim_end(), "d");
    term.resize(6, 5, &mut rec).unwrap();
    assert_eq!(term.snapshot().row_text(4), " ".repeat(6));
    assert_eq!(term.grid().scroll_region(), (0, 4));
}

#[test]
fn resize_rejects_bad_dimensions() {
    let mut term = term();
    let mut rec = Recorder::default();
    assert!(term.resize(0, 5, &mut rec).is_err());
    assert!(term.resize(5, 2000, &mut rec).is_err());
    assert_eq!(term.cols(), 80);
}

#[test]
fn construction_rejects_bad_dimensions() {
    assert!(vtgrid::Terminal::new(0, 24, 0).is_err());
    assert!(vtgrid::Terminal::new(80, 1001, 0).is_err());
}

#[test]
fn chunk_tracing_describes_events() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.set_chunk_tracing(true);
    term.write(b"a\x1b[31m", &mut rec);
    assert_eq!(rec.chunks.len(), 2);
    assert!(rec.chunks[0].contains("Print"));
    assert!(rec.chunks[1].contains("Csi"));
}

#[test]
fn update_fires_only_on_visible_change() {
    let mut term = term();
    let mut rec = Recorder::default();
    term.write(b"\x1b[5n", &mut rec);
    assert_eq!(rec.updates, 0);
    term.write(b"x", &mut rec);
    assert_eq!(rec.updates, 1);
}
