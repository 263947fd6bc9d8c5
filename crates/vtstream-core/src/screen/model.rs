//! Grid + cursor + mode state and the logic that applies one [`Command`] to
//! it. This is the part of the screen an [`Executor`](super::executor::Executor)
//! drives; it has no opinion about whether commands are applied immediately
//! or buffered for synchronized output.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};
use unicode_width::UnicodeWidthChar;
use vtstream_common::command::{Command, DynamicColorTarget, EraseMode, SgrAttr, StatusRequest};
use vtstream_common::traits::ScreenEvents;
use vtstream_common::types::{
    CellAttributes, Color, HyperlinkRef, Mode, Modes, Position, Size, StyleFlags, UnderlineStyle,
};

use super::buffer::ScreenBuffer;
use super::buffer::Scrollback;
use super::cursor::Cursor;

const DEFAULT_SCROLLBACK_LINES: usize = 10_000;
const DEFAULT_TAB_WIDTH: u16 = 8;

/// Grid, cursor, modes and the handful of host-facing bits of state (window
/// title, active hyperlink, dynamic color overrides) that a `Command` can
/// touch. Owns neither an executor nor host transport — [`super::Screen`]
/// composes those around it.
pub struct ScreenModel {
    primary: ScreenBuffer,
    alternate: ScreenBuffer,
    using_alternate: bool,
    primary_cursor: Cursor,
    alternate_cursor: Cursor,
    saved_primary_cursor: Option<Cursor>,
    saved_alternate_cursor: Option<Cursor>,
    scrollback: Scrollback,
    modes: Modes,
    tab_stops: BTreeSet<u16>,
    size: Size,
    dynamic_colors: HashMap<DynamicColorTarget, String>,
    active_hyperlink: Option<HyperlinkRef>,
    window_title: String,
    icon_name: String,
    /// Lines ever pushed into scrollback; used both to size the history and
    /// as the coordinate space for marks.
    lines_scrolled: u64,
    scroll_viewport: u64,
    marks: BTreeSet<u64>,
}

impl ScreenModel {
    pub fn new(size: Size) -> Self {
        let mut modes = Modes::new();
        modes.set(Mode::AutoWrap, true);
        modes.set(Mode::CursorVisible, true);
        Self {
            primary: ScreenBuffer::new(size),
            alternate: ScreenBuffer::new(size),
            using_alternate: false,
            primary_cursor: Cursor::new(),
            alternate_cursor: Cursor::new(),
            saved_primary_cursor: None,
            saved_alternate_cursor: None,
            scrollback: Scrollback::new(DEFAULT_SCROLLBACK_LINES),
            modes,
            tab_stops: default_tab_stops(size.cols),
            size,
            dynamic_colors: HashMap::new(),
            active_hyperlink: None,
            window_title: String::new(),
            icon_name: String::new(),
            lines_scrolled: 0,
            scroll_viewport: 0,
            marks: BTreeSet::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn modes(&self) -> &Modes {
        &self.modes
    }

    pub fn cursor(&self) -> &Cursor {
        if self.using_alternate {
            &self.alternate_cursor
        } else {
            &self.primary_cursor
        }
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        if self.using_alternate {
            &mut self.alternate_cursor
        } else {
            &mut self.primary_cursor
        }
    }

    pub fn active_buffer(&self) -> &ScreenBuffer {
        if self.using_alternate {
            &self.alternate
        } else {
            &self.primary
        }
    }

    fn active_buffer_mut(&mut self) -> &mut ScreenBuffer {
        if self.using_alternate {
            &mut self.alternate
        } else {
            &mut self.primary
        }
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn scroll_viewport(&self) -> u64 {
        self.scroll_viewport
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    pub fn using_alternate(&self) -> bool {
        self.using_alternate
    }

    pub fn resize(&mut self, new_size: Size) {
        self.primary.resize(new_size);
        self.alternate.resize(new_size);
        self.tab_stops = default_tab_stops(new_size.cols);
        self.size = new_size;
        for cursor in [&mut self.primary_cursor, &mut self.alternate_cursor] {
            let pos = cursor.position();
            cursor.set_position(Position::new(
                pos.row.min(new_size.rows as u32),
                pos.column.min(new_size.cols as u32),
            ));
        }
    }

    /// Applies one command to the model, issuing host callbacks as needed.
    /// This is the sole mutation entrypoint used by both executors.
    pub fn apply_command(&mut self, cmd: Command, events: &mut dyn ScreenEvents) {
        match cmd {
            Command::Print(ch) => self.print(ch),

            Command::CursorUp(n) => self.move_cursor(-n, 0),
            Command::CursorDown(n) => self.move_cursor(n, 0),
            Command::CursorForward(n) => self.move_cursor(0, n),
            Command::CursorBack(n) => self.move_cursor(0, -n),
            Command::CursorNextLine(n) => {
                self.move_cursor(n, 0);
                self.set_column(0);
            }
            Command::CursorPreviousLine(n) => {
                self.move_cursor(-n, 0);
                self.set_column(0);
            }
            Command::CursorToColumn(col) => self.set_column(col - 1),
            Command::CursorToRow(row) => self.set_row(row - 1),
            Command::MoveCursorTo { row, col } => {
                self.set_row(row - 1);
                self.set_column(col - 1);
            }
            Command::CursorForwardTab(n) => {
                for _ in 0..n {
                    self.tab_forward();
                }
            }
            Command::CursorBackwardTab(n) => {
                for _ in 0..n {
                    self.tab_backward();
                }
            }

            Command::LineFeed => self.line_feed(),
            Command::ReverseLineFeed => self.reverse_line_feed(),
            Command::CarriageReturn => self.set_column(0),
            Command::Backspace => {
                let col = self.cursor().position().column;
                if col > 1 {
                    self.set_column(col as i32 - 2);
                }
            }
            Command::HorizontalTab => self.tab_forward(),
            Command::Bell => events.bell(),
            Command::NextLine => {
                self.line_feed();
                self.set_column(0);
            }

            Command::EraseDisplay(mode) => self.erase_display(mode),
            Command::EraseLine(mode) => self.erase_line(mode),
            Command::EraseCharacters(n) => self.erase_characters(n),
            Command::DeleteCharacters(n) => self.delete_characters(n),
            Command::InsertCharacters(n) => self.insert_characters(n),
            Command::DeleteLines(n) => self.delete_lines(n),
            Command::InsertLines(n) => self.insert_lines(n),

            Command::ScrollUp(n) => {
                for _ in 0..n {
                    self.scroll_up();
                }
            }
            Command::ScrollDown(n) => {
                for _ in 0..n {
                    let pen = self.pen();
                    self.active_buffer_mut().scroll_region_down(pen);
                }
            }
            Command::SetTopBottomMargins { top, bottom } => {
                let rows = self.size.rows;
                self.active_buffer_mut().set_top_bottom_margins(
                    (top.max(1) - 1).clamp(0, rows as i32 - 1) as u16,
                    (bottom.max(1) - 1).clamp(0, rows as i32 - 1) as u16,
                );
                self.set_row(0);
                self.set_column(0);
            }
            Command::SetLeftRightMargins { left, right } => {
                let cols = self.size.cols;
                self.active_buffer_mut().set_left_right_margins(
                    (left.max(1) - 1).clamp(0, cols as i32 - 1) as u16,
                    (right.max(1) - 1).clamp(0, cols as i32 - 1) as u16,
                );
            }

            Command::SetTabStop => {
                let col = self.cursor().position().column as u16 - 1;
                self.tab_stops.insert(col);
            }
            Command::ClearTabStop => {
                let col = self.cursor().position().column as u16 - 1;
                self.tab_stops.remove(&col);
            }
            Command::ClearAllTabStops => self.tab_stops.clear(),

            Command::SetGraphicRendition(attrs) => {
                for attr in attrs {
                    self.apply_sgr(attr);
                }
            }

            Command::SetMode(mode, enabled) => self.set_mode(mode, enabled, events),

            Command::SaveCursor => self.save_cursor(),
            Command::RestoreCursor => self.restore_cursor(),

            Command::DesignateCharset(slot, charset) => {
                self.cursor_mut().designate(slot, charset)
            }
            Command::InvokeCharset(slot) => self.cursor_mut().invoke(slot),

            Command::ResetHard => self.reset_hard(),
            Command::SetMark => self.set_mark(),
            Command::FindMarkForward => self.find_mark(1),
            Command::FindMarkBackward => self.find_mark(-1),

            Command::Request(req) => self.handle_request(req, events),

            Command::SetWindowTitle(title) => {
                self.window_title = title.clone();
                events.set_window_title(&title);
            }
            Command::SetIconName(name) => {
                self.icon_name = name.clone();
                events.set_icon_name(&name);
            }
            Command::Hyperlink { id, uri } => {
                self.active_hyperlink = if uri.is_empty() {
                    None
                } else {
                    Some(std::sync::Arc::new(vtstream_common::types::Hyperlink { id, uri }))
                };
            }
            Command::SetDynamicColor(target, spec) => {
                self.dynamic_colors.insert(target, spec.clone());
                events.dynamic_color_set(target, &spec);
            }
            Command::QueryDynamicColor(target) => {
                let spec = self
                    .dynamic_colors
                    .get(&target)
                    .cloned()
                    .or_else(|| events.dynamic_color_get(target));
                if let Some(spec) = spec {
                    events.reply(dynamic_color_report(target, &spec).as_bytes());
                }
            }
            Command::ResetDynamicColor(target) => {
                self.dynamic_colors.remove(&target);
                events.dynamic_color_reset(target);
            }
            Command::CopyToClipboard { selector, data } => {
                events.copy_to_clipboard(selector, &data);
            }
            Command::Notify { title, body } => events.notify(&title, &body),

            // Buffering vs. immediate application of these two is the
            // executor's job; by the time the model sees them there is
            // nothing left to do.
            Command::BeginSynchronizedUpdate | Command::EndSynchronizedUpdate => {}
        }
        events.buffer_changed(self.using_alternate);
    }

    fn pen(&self) -> CellAttributes {
        self.cursor().pen()
    }

    fn clamp_row(&self, row: i32) -> u32 {
        row.clamp(0, self.size.rows as i32 - 1) as u32 + 1
    }

    fn clamp_col(&self, col: i32) -> u32 {
        col.clamp(0, self.size.cols as i32 - 1) as u32 + 1
    }

    fn set_row(&mut self, row0: i32) {
        let row = self.clamp_row(row0);
        let col = self.cursor().position().column;
        self.cursor_mut().set_position(Position::new(row, col));
    }

    fn set_column(&mut self, col0: i32) {
        let col = self.clamp_col(col0);
        let row = self.cursor().position().row;
        self.cursor_mut().set_position(Position::new(row, col));
    }

    fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let pos = self.cursor().position();
        self.set_row(pos.row as i32 - 1 + d_row);
        self.set_column(pos.column as i32 - 1 + d_col);
    }

    fn print(&mut self, ch: char) {
        let ch = self.cursor().active_charset().translate(ch);
        let width = UnicodeWidthChar::width(ch).unwrap_or(1).max(1) as u8;
        let cols = self.size.cols;

        if self.cursor().wrap_pending() {
            self.line_feed();
            self.set_column(0);
            self.cursor_mut().set_wrap_pending(false);
        }

        let pos = self.cursor().position();
        let row0 = (pos.row - 1) as u16;
        let col0 = (pos.column - 1) as u16;
        let pen = self.pen();
        let hyperlink = self.active_hyperlink.clone();

        self.active_buffer_mut().set_cell(
            row0,
            col0,
            vtstream_common::types::Cell::with_char(ch, width, pen, hyperlink.clone()),
        );
        if width == 2 && col0 + 1 < cols {
            self.active_buffer_mut().set_cell(
                row0,
                col0 + 1,
                vtstream_common::types::Cell { cluster: Default::default(), width: 0, attrs: pen, hyperlink },
            );
        }

        let advance = width.max(1) as u32;
        if (col0 as u32) + advance >= cols as u32 {
            if self.modes.is_set(Mode::AutoWrap) {
                self.cursor_mut().set_wrap_pending(true);
            }
        } else {
            self.set_column(col0 as i32 + advance as i32);
        }
    }

    fn line_feed(&mut self) {
        let (_, bottom) = self.active_buffer().top_bottom_margins();
        let row0 = (self.cursor().position().row - 1) as u16;
        if row0 >= bottom {
            self.scroll_up();
        } else {
            self.move_cursor(1, 0);
        }
    }

    fn reverse_line_feed(&mut self) {
        let (top, _) = self.active_buffer().top_bottom_margins();
        let row0 = (self.cursor().position().row - 1) as u16;
        if row0 <= top {
            let pen = self.pen();
            self.active_buffer_mut().scroll_region_down(pen);
        } else {
            self.move_cursor(-1, 0);
        }
    }

    fn scroll_up(&mut self) {
        let pen = self.pen();
        let (top, _) = self.active_buffer().top_bottom_margins();
        if let Some(removed) = self.active_buffer_mut().scroll_region_up(pen) {
            if top == 0 && !self.using_alternate {
                self.lines_scrolled += 1;
                self.scrollback.push(removed);
            }
        }
    }

    fn erase_display(&mut self, mode: EraseMode) {
        let pen = self.pen();
        let size = self.size;
        let row0 = (self.cursor().position().row - 1) as u16;
        let col0 = (self.cursor().position().column - 1) as u16;
        match mode {
            EraseMode::ToEnd => {
                self.erase_line(EraseMode::ToEnd);
                for r in (row0 + 1)..size.rows {
                    self.active_buffer_mut().clear_line(r, pen);
                }
            }
            EraseMode::ToStart => {
                for r in 0..row0 {
                    self.active_buffer_mut().clear_line(r, pen);
                }
                for c in 0..=col0 {
                    self.active_buffer_mut().set_cell(
                        row0,
                        c,
                        vtstream_common::types::Cell::blank_with_pen(pen),
                    );
                }
            }
            EraseMode::All => self.active_buffer_mut().clear(pen),
            EraseMode::AllAndScrollback => {
                self.active_buffer_mut().clear(pen);
                self.scrollback.clear();
            }
        }
    }

    fn erase_line(&mut self, mode: EraseMode) {
        let pen = self.pen();
        let row0 = (self.cursor().position().row - 1) as u16;
        let col0 = (self.cursor().position().column - 1) as u16;
        let cols = self.size.cols;
        match mode {
            EraseMode::ToEnd => {
                for c in col0..cols {
                    self.active_buffer_mut().set_cell(
                        row0,
                        c,
                        vtstream_common::types::Cell::blank_with_pen(pen),
                    );
                }
            }
            EraseMode::ToStart => {
                for c in 0..=col0.min(cols.saturating_sub(1)) {
                    self.active_buffer_mut().set_cell(
                        row0,
                        c,
                        vtstream_common::types::Cell::blank_with_pen(pen),
                    );
                }
            }
            EraseMode::All | EraseMode::AllAndScrollback => {
                self.active_buffer_mut().clear_line(row0, pen);
            }
        }
    }

    fn erase_characters(&mut self, n: i32) {
        let pen = self.pen();
        let row0 = (self.cursor().position().row - 1) as u16;
        let col0 = (self.cursor().position().column - 1) as u16;
        let end = (col0 as i32 + n).min(self.size.cols as i32) as u16;
        for c in col0..end {
            self.active_buffer_mut().set_cell(row0, c, vtstream_common::types::Cell::blank_with_pen(pen));
        }
    }

    fn insert_characters(&mut self, n: i32) {
        let pen = self.pen();
        let row0 = (self.cursor().position().row - 1) as u16;
        let col0 = (self.cursor().position().column - 1) as u16;
        let cols = self.size.cols;
        if let Some(line) = self.active_buffer_mut().line_mut(row0) {
            let n = (n.max(0) as usize).min(line.cells.len());
            for _ in 0..n {
                if (col0 as usize) < line.cells.len() {
                    line.cells.insert(col0 as usize, vtstream_common::types::Cell::blank_with_pen(pen));
                    line.cells.truncate(cols as usize);
                }
            }
        }
    }

    fn delete_characters(&mut self, n: i32) {
        let pen = self.pen();
        let row0 = (self.cursor().position().row - 1) as u16;
        let col0 = (self.cursor().position().column - 1) as u16;
        let cols = self.size.cols;
        if let Some(line) = self.active_buffer_mut().line_mut(row0) {
            let n = (n.max(0) as usize).min(line.cells.len().saturating_sub(col0 as usize));
            for _ in 0..n {
                if (col0 as usize) < line.cells.len() {
                    line.cells.remove(col0 as usize);
                }
            }
            line.cells.resize(cols as usize, vtstream_common::types::Cell::blank_with_pen(pen));
        }
    }

    fn insert_lines(&mut self, n: i32) {
        let pen = self.pen();
        let row0 = (self.cursor().position().row - 1) as u16;
        self.active_buffer_mut().insert_lines(row0, n.max(0) as u16, pen);
    }

    fn delete_lines(&mut self, n: i32) {
        let pen = self.pen();
        let row0 = (self.cursor().position().row - 1) as u16;
        self.active_buffer_mut().delete_lines(row0, n.max(0) as u16, pen);
    }

    fn tab_forward(&mut self) {
        let col = self.cursor().position().column as u16 - 1;
        let next = self.tab_stops.iter().find(|&&s| s > col).copied().unwrap_or(self.size.cols - 1);
        self.set_column(next as i32);
    }

    fn tab_backward(&mut self) {
        let col = self.cursor().position().column as u16 - 1;
        let prev = self.tab_stops.iter().rev().find(|&&s| s < col).copied().unwrap_or(0);
        self.set_column(prev as i32);
    }

    fn apply_sgr(&mut self, attr: SgrAttr) {
        let mut pen = self.pen();
        match attr {
            SgrAttr::Reset => pen = CellAttributes::default(),
            SgrAttr::Bold => pen.flags.insert(StyleFlags::BOLD),
            SgrAttr::Faint => pen.flags.insert(StyleFlags::FAINT),
            SgrAttr::Italic => pen.flags.insert(StyleFlags::ITALIC),
            SgrAttr::Underline(style) => pen.underline_style = style,
            SgrAttr::Blink => pen.flags.insert(StyleFlags::BLINKING),
            SgrAttr::Inverse => pen.flags.insert(StyleFlags::INVERSE),
            SgrAttr::Invisible => pen.flags.insert(StyleFlags::INVISIBLE),
            SgrAttr::CrossedOut => pen.flags.insert(StyleFlags::CROSSED_OUT),
            SgrAttr::Overline => pen.flags.insert(StyleFlags::OVERLINE),
            SgrAttr::Framed => pen.flags.insert(StyleFlags::FRAMED),
            SgrAttr::Encircled => pen.flags.insert(StyleFlags::ENCIRCLED),
            SgrAttr::NoBold => pen.flags.remove(StyleFlags::BOLD),
            SgrAttr::NoFaint => pen.flags.remove(StyleFlags::FAINT),
            SgrAttr::NoItalic => pen.flags.remove(StyleFlags::ITALIC),
            SgrAttr::NoUnderline => pen.underline_style = UnderlineStyle::None,
            SgrAttr::NoBlink => pen.flags.remove(StyleFlags::BLINKING),
            SgrAttr::NoInverse => pen.flags.remove(StyleFlags::INVERSE),
            SgrAttr::NoInvisible => pen.flags.remove(StyleFlags::INVISIBLE),
            SgrAttr::NoCrossedOut => pen.flags.remove(StyleFlags::CROSSED_OUT),
            SgrAttr::NoOverline => pen.flags.remove(StyleFlags::OVERLINE),
            SgrAttr::NoFramed => pen.flags.remove(StyleFlags::FRAMED),
            SgrAttr::NoEncircled => pen.flags.remove(StyleFlags::ENCIRCLED),
            SgrAttr::Foreground(color) => pen.fg_color = color,
            SgrAttr::Background(color) => pen.bg_color = color,
            SgrAttr::UnderlineColor(color) => pen.underline_color = color,
            SgrAttr::DefaultForeground => pen.fg_color = Color::DefaultColor,
            SgrAttr::DefaultBackground => pen.bg_color = Color::DefaultColor,
            SgrAttr::DefaultUnderlineColor => pen.underline_color = Color::DefaultColor,
        }
        self.cursor_mut().set_pen(pen);
    }

    fn set_mode(&mut self, mode: Mode, enabled: bool, events: &mut dyn ScreenEvents) {
        match mode {
            Mode::AlternateScreenBuffer => self.set_alternate_screen(enabled),
            Mode::AlternateScreenBufferSaveCursor => {
                if enabled {
                    self.set_alternate_screen(true);
                } else {
                    self.set_alternate_screen(false);
                }
            }
            other => trace!("mode {:?} recorded without dedicated handling", other),
        }
        self.modes.set(mode, enabled);
        events.buffer_changed(self.using_alternate);
    }

    fn set_alternate_screen(&mut self, enabled: bool) {
        if enabled == self.using_alternate {
            return;
        }
        if enabled {
            self.alternate.clear(CellAttributes::default());
            self.alternate_cursor = Cursor::new();
        }
        self.using_alternate = enabled;
    }

    fn save_cursor(&mut self) {
        let cursor = self.cursor().clone();
        if self.using_alternate {
            self.saved_alternate_cursor = Some(cursor);
        } else {
            self.saved_primary_cursor = Some(cursor);
        }
    }

    fn restore_cursor(&mut self) {
        let saved = if self.using_alternate {
            self.saved_alternate_cursor.clone()
        } else {
            self.saved_primary_cursor.clone()
        };
        if let Some(cursor) = saved {
            if self.using_alternate {
                self.alternate_cursor = cursor;
            } else {
                self.primary_cursor = cursor;
            }
        }
    }

    fn reset_hard(&mut self) {
        let size = self.size;
        self.primary = ScreenBuffer::new(size);
        self.alternate = ScreenBuffer::new(size);
        self.using_alternate = false;
        self.primary_cursor = Cursor::new();
        self.alternate_cursor = Cursor::new();
        self.saved_primary_cursor = None;
        self.saved_alternate_cursor = None;
        self.modes = Modes::new();
        self.modes.set(Mode::AutoWrap, true);
        self.modes.set(Mode::CursorVisible, true);
        self.tab_stops = default_tab_stops(size.cols);
        self.active_hyperlink = None;
        self.window_title.clear();
        self.icon_name.clear();
        debug!("terminal reset to initial state");
    }

    fn set_mark(&mut self) {
        self.marks.insert(self.lines_scrolled.saturating_sub(self.scroll_viewport));
    }

    fn find_mark(&mut self, direction: i32) {
        let current = self.lines_scrolled.saturating_sub(self.scroll_viewport);
        let target = if direction > 0 {
            self.marks.range((current + 1)..).next().copied()
        } else {
            self.marks.range(..current).next_back().copied()
        };
        if let Some(mark) = target {
            self.scroll_viewport = self.lines_scrolled.saturating_sub(mark);
        }
    }

    fn handle_request(&mut self, req: StatusRequest, events: &mut dyn ScreenEvents) {
        use crate::output;
        match req {
            StatusRequest::CursorPositionReport { extended } => {
                let report = output::cursor_position_report(self.cursor().position(), extended);
                events.reply(report.as_bytes());
            }
            StatusRequest::DeviceStatusReport => events.reply(output::device_status_report()),
            StatusRequest::PrimaryDeviceAttributes => {
                events.reply(output::primary_device_attributes())
            }
            StatusRequest::SecondaryDeviceAttributes => {
                events.reply(output::secondary_device_attributes())
            }
        }
    }
}

fn default_tab_stops(cols: u16) -> BTreeSet<u16> {
    (0..cols).step_by(DEFAULT_TAB_WIDTH as usize).collect()
}

fn dynamic_color_report(target: DynamicColorTarget, spec: &str) -> String {
    let osc = match target {
        DynamicColorTarget::Foreground => 10,
        DynamicColorTarget::Background => 11,
        DynamicColorTarget::CursorColor => 12,
        DynamicColorTarget::Palette(_) => 4,
    };
    format!("\x1b]{};{}\x07", osc, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtstream_common::traits::NullScreenEvents;

    fn model(cols: u16, rows: u16) -> ScreenModel {
        ScreenModel::new(Size::new(cols, rows))
    }

    #[test]
    fn print_advances_cursor() {
        let mut m = model(10, 3);
        let mut ev = NullScreenEvents;
        m.apply_command(Command::Print('A'), &mut ev);
        assert_eq!(m.cursor().position(), Position::new(1, 2));
    }

    #[test]
    fn wrap_pending_defers_to_next_print() {
        let mut m = model(3, 3);
        let mut ev = NullScreenEvents;
        m.modes.set(Mode::AutoWrap, true);
        m.apply_command(Command::Print('A'), &mut ev);
        m.apply_command(Command::Print('B'), &mut ev);
        m.apply_command(Command::Print('C'), &mut ev);
        assert_eq!(m.cursor().position(), Position::new(1, 4));
        assert!(m.cursor().wrap_pending());
        m.apply_command(Command::Print('D'), &mut ev);
        assert_eq!(m.cursor().position(), Position::new(2, 2));
    }

    #[test]
    fn line_feed_at_bottom_scrolls_into_history() {
        let mut m = model(5, 2);
        let mut ev = NullScreenEvents;
        m.apply_command(Command::Print('A'), &mut ev);
        m.apply_command(Command::LineFeed, &mut ev);
        m.apply_command(Command::LineFeed, &mut ev);
        assert_eq!(m.scrollback().len(), 1);
    }

    #[test]
    fn alternate_screen_save_restore_cursor() {
        let mut m = model(10, 5);
        let mut ev = NullScreenEvents;
        m.apply_command(Command::MoveCursorTo { row: 3, col: 4 }, &mut ev);
        m.apply_command(Command::SetMode(Mode::AlternateScreenBuffer, true), &mut ev);
        assert_eq!(m.cursor().position(), Position::ORIGIN);
        m.apply_command(Command::SetMode(Mode::AlternateScreenBuffer, false), &mut ev);
        assert_eq!(m.cursor().position(), Position::new(3, 4));
    }

    #[test]
    fn sgr_reset_clears_pen() {
        let mut m = model(10, 5);
        let mut ev = NullScreenEvents;
        m.apply_command(Command::SetGraphicRendition(vec![SgrAttr::Bold]), &mut ev);
        assert!(m.pen().flags.contains(StyleFlags::BOLD));
        m.apply_command(Command::SetGraphicRendition(vec![SgrAttr::Reset]), &mut ev);
        assert!(!m.pen().flags.contains(StyleFlags::BOLD));
    }

    #[test]
    fn cursor_position_report_uses_one_based_coords() {
        struct Capture(Vec<u8>);
        impl ScreenEvents for Capture {
            fn reply(&mut self, bytes: &[u8]) {
                self.0.extend_from_slice(bytes);
            }
        }
        let mut m = model(80, 24);
        let mut ev = Capture(Vec::new());
        m.apply_command(Command::MoveCursorTo { row: 5, col: 5 }, &mut ev);
        m.apply_command(
            Command::Request(StatusRequest::CursorPositionReport { extended: false }),
            &mut ev,
        );
        assert_eq!(ev.0, b"\x1b[5;5R");
    }
}
