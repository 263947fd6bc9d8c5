//! Property tests for the quantified invariants that must hold after any
//! sequence of writes, independent of which particular bytes produced them.

use proptest::prelude::*;
use vtstream_common::traits::{CommandSource, NullScreenEvents};
use vtstream_common::types::{Position, Size};
use vtstream_core::screen::Screen;
use vtstream_parser::CommandBuilder;

const COLS: u16 = 12;
const ROWS: u16 = 6;

fn printable_byte() -> impl Strategy<Value = u8> {
    prop_oneof![
        Just(b'\r'),
        Just(b'\n'),
        Just(b'\t'),
        Just(0x08),
        (0x20u8..=0x7eu8),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn grid_lines_stay_exactly_cols_wide(bytes in prop::collection::vec(printable_byte(), 0..200)) {
        let mut screen = Screen::new(Size::new(COLS, ROWS));
        let mut builder = CommandBuilder::new();
        let mut events = NullScreenEvents;
        let commands = builder.feed(&bytes);
        screen.apply_all(commands, &mut events);

        for row in 0..ROWS {
            let line = screen.model().active_buffer().line(row).unwrap();
            prop_assert_eq!(line.cells.len(), COLS as usize);
        }
    }

    #[test]
    fn cursor_stays_within_bounds(bytes in prop::collection::vec(printable_byte(), 0..200)) {
        let mut screen = Screen::new(Size::new(COLS, ROWS));
        let mut builder = CommandBuilder::new();
        let mut events = NullScreenEvents;
        let commands = builder.feed(&bytes);
        screen.apply_all(commands, &mut events);

        let pos = screen.cursor_position();
        prop_assert!(pos.row >= 1 && pos.row <= ROWS as u32);
        prop_assert!(pos.column >= 1 && pos.column <= COLS as u32 + 1);
    }

    #[test]
    fn cell_widths_are_zero_one_or_two_and_continuation_follows_a_base(
        bytes in prop::collection::vec(printable_byte(), 0..200)
    ) {
        let mut screen = Screen::new(Size::new(COLS, ROWS));
        let mut builder = CommandBuilder::new();
        let mut events = NullScreenEvents;
        let commands = builder.feed(&bytes);
        screen.apply_all(commands, &mut events);

        for row in 0..ROWS {
            let line = screen.model().active_buffer().line(row).unwrap();
            for (col, cell) in line.cells.iter().enumerate() {
                prop_assert!(cell.width <= 2);
                if cell.width == 0 {
                    prop_assert!(col > 0);
                    prop_assert!(line.cells[col - 1].width >= 1);
                }
            }
        }
    }

    #[test]
    fn reset_hard_always_returns_to_defaults(bytes in prop::collection::vec(printable_byte(), 0..200)) {
        let mut screen = Screen::new(Size::new(COLS, ROWS));
        let mut builder = CommandBuilder::new();
        let mut events = NullScreenEvents;
        let commands = builder.feed(&bytes);
        screen.apply_all(commands, &mut events);

        let reset_commands = builder.feed(b"\x1bc");
        screen.apply_all(reset_commands, &mut events);

        prop_assert_eq!(screen.cursor_position(), Position::ORIGIN);
        prop_assert!(!screen.model().using_alternate());
        for row in 0..ROWS {
            let line = screen.model().active_buffer().line(row).unwrap();
            prop_assert!(line.cells.iter().all(|c| c.base_char() == ' '));
        }
    }
}
