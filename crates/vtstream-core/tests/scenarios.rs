//! End-to-end byte-stream-to-screen scenarios, driving the parser and
//! screen model together rather than constructing `Command`s by hand.

use vtstream_common::traits::{CommandSource, NullScreenEvents};
use vtstream_common::types::{Color, Position, Size};
use vtstream_core::screen::Screen;
use vtstream_core::selection::{Selection, SelectionMode, SelectionPoint};
use vtstream_parser::CommandBuilder;

fn feed(screen: &mut Screen, builder: &mut CommandBuilder, bytes: &[u8]) {
    let commands = builder.feed(bytes);
    let mut events = NullScreenEvents;
    screen.apply_all(commands, &mut events);
}

#[test]
fn linear_selection_over_a_five_by_five_grid() {
    let mut screen = Screen::new(Size::new(5, 5));
    let mut builder = CommandBuilder::new();
    feed(&mut screen, &mut builder, b"12 45\r\n678 0\r\nA CDE\r\nFGHIJ\r\nKLMNO");

    let sel = Selection::start(SelectionMode::Linear, SelectionPoint::new(1, 1));
    let mut sel = sel;
    sel.extend(SelectionPoint::new(1, 3));
    sel.finish();

    assert_eq!(sel.text(screen.model()), "78 ");
}

#[test]
fn erase_display_clears_visible_cells_but_not_scrollback() {
    let mut screen = Screen::new(Size::new(10, 3));
    let mut builder = CommandBuilder::new();
    feed(&mut screen, &mut builder, b"hello\r\nworld\r\nagain\n\n\n\n");
    let before_scrollback = screen.model().scrollback().len();
    let before_cursor = screen.cursor_position();

    feed(&mut screen, &mut builder, b"\x1b[2J");

    let line = screen.model().active_buffer().line(0).unwrap();
    assert!(line.cells.iter().all(|c| c.base_char() == ' '));
    assert_eq!(screen.cursor_position(), before_cursor);
    assert_eq!(screen.model().scrollback().len(), before_scrollback);
}

#[test]
fn extended_sgr_sets_truecolor_foreground() {
    let mut screen = Screen::new(Size::new(10, 3));
    let mut builder = CommandBuilder::new();
    feed(&mut screen, &mut builder, b"\x1b[38;2;10;20;30mA");

    let cell = screen.model().active_buffer().cell(0, 0);
    assert_eq!(cell.base_char(), 'A');
    assert_eq!(cell.attrs.fg_color, Color::RgbColor(10, 20, 30));
}

#[test]
fn alternate_screen_round_trip_preserves_primary_and_cursor() {
    let mut screen = Screen::new(Size::new(10, 3));
    let mut builder = CommandBuilder::new();
    feed(&mut screen, &mut builder, b"primary text");
    let saved_pos = screen.cursor_position();

    feed(&mut screen, &mut builder, b"\x1b[?1049h\x1b[2JX\x1b[?1049l");

    assert_eq!(screen.cursor_position(), saved_pos);
    let cell = screen.model().active_buffer().cell(0, 0);
    assert_eq!(cell.base_char(), 'p');
}

#[test]
fn autowrap_defers_then_wraps_on_next_print() {
    let mut screen = Screen::new(Size::new(10, 3));
    let mut builder = CommandBuilder::new();
    feed(&mut screen, &mut builder, b"\x1b[3;10H");
    assert_eq!(screen.cursor_position(), Position::new(3, 10));

    feed(&mut screen, &mut builder, b"a");
    assert_eq!(screen.cursor_position(), Position::new(3, 10));

    feed(&mut screen, &mut builder, b"b");
    assert_eq!(screen.cursor_position(), Position::new(1, 2));
    let cell = screen.model().active_buffer().cell(0, 0);
    assert_eq!(cell.base_char(), 'b');
}

#[test]
fn hyperlink_open_and_close_brackets_only_the_cells_between() {
    let mut screen = Screen::new(Size::new(10, 3));
    let mut builder = CommandBuilder::new();
    feed(
        &mut screen,
        &mut builder,
        b"\x1b]8;id=x;https://example.com\x1b\\Hi\x1b]8;;\x1b\\Z",
    );

    let h = screen.model().active_buffer().cell(0, 0);
    let i = screen.model().active_buffer().cell(0, 1);
    let z = screen.model().active_buffer().cell(0, 2);

    let h_link = h.hyperlink.expect("H carries the hyperlink");
    let i_link = i.hyperlink.expect("i carries the hyperlink");
    assert_eq!(h_link.id.as_deref(), Some("x"));
    assert_eq!(h_link.uri, "https://example.com");
    assert!(std::sync::Arc::ptr_eq(&h_link, &i_link));
    assert!(z.hyperlink.is_none());
}
