//! Text selection over the unified screen + scrollback coordinate space.
//! Row 0 is the top visible screen line; negative rows index backwards into
//! scrollback (`-1` is the line nearest the viewport). This lets a selection
//! span a scroll in either direction without the caller translating indices.

use vtstream_common::types::Cell;

use crate::screen::model::ScreenModel;

/// How a drag selects text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Plain click-drag: anchor to head, cell by cell.
    Linear,
    /// Double-click-drag: snaps both endpoints out to word boundaries.
    Wordwise,
    /// Triple-click-drag: snaps both endpoints to whole lines.
    FullLine,
    /// Alt/option-drag: a column range applied independently to every row
    /// in the span, ignoring line content.
    Rectangular,
}

/// One endpoint of a selection, in the unified row space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionPoint {
    pub row: i64,
    pub col: u16,
}

impl SelectionPoint {
    pub fn new(row: i64, col: u16) -> Self {
        Self { row, col }
    }
}

/// Selection lifecycle: a button-down alone is `Waiting` (it might just be a
/// click, not a drag); the first motion promotes it to `InProgress`; button-up
/// freezes it as `Complete`. A `Complete` selection is still readable
/// (for copy) until a new gesture starts and replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Waiting,
    InProgress,
    Complete,
}

#[derive(Debug, Clone)]
pub struct Selection {
    mode: SelectionMode,
    anchor: SelectionPoint,
    head: SelectionPoint,
    phase: SelectionPhase,
}

impl Selection {
    pub fn start(mode: SelectionMode, point: SelectionPoint) -> Self {
        Self { mode, anchor: point, head: point, phase: SelectionPhase::Waiting }
    }

    pub fn extend(&mut self, point: SelectionPoint) {
        if self.phase == SelectionPhase::Complete {
            return;
        }
        self.phase = SelectionPhase::InProgress;
        self.head = point;
    }

    pub fn finish(&mut self) {
        if self.phase == SelectionPhase::InProgress {
            self.phase = SelectionPhase::Complete;
        }
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.phase == SelectionPhase::Waiting && self.anchor == self.head
    }

    /// Anchor/head ordered so `.0 <= .1` by `(row, col)`.
    fn ordered(&self) -> (SelectionPoint, SelectionPoint) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    /// Extracts the selected text from `model`. Rectangular mode takes a
    /// straight column slice per row; the other three modes concatenate
    /// whole or partial lines, inserting a newline only where the source
    /// line was not soft-wrapped.
    pub fn text(&self, model: &ScreenModel) -> String {
        let view = GridView::new(model);
        let (start, end) = self.ordered();
        match self.mode {
            SelectionMode::Rectangular => self.rectangular_text(&view, start, end),
            SelectionMode::FullLine => {
                let (start, end) = (
                    SelectionPoint::new(start.row, 0),
                    SelectionPoint::new(end.row, view.cols().saturating_sub(1)),
                );
                self.linear_text(&view, start, end, true)
            }
            SelectionMode::Wordwise => {
                let start = extend_to_word_start(&view, start);
                let end = extend_to_word_end(&view, end);
                self.linear_text(&view, start, end, false)
            }
            SelectionMode::Linear => self.linear_text(&view, start, end, false),
        }
    }

    /// `trim_last_row` controls whether the final row's trailing blank
    /// cells are stripped. An explicit column endpoint (plain drag) keeps
    /// whatever's there, including trailing spaces the user dragged over;
    /// a mode that widens the endpoint to the line's end (full-line select)
    /// wants that padding gone.
    fn linear_text(
        &self,
        view: &GridView<'_>,
        start: SelectionPoint,
        end: SelectionPoint,
        trim_last_row: bool,
    ) -> String {
        let mut out = String::new();
        let mut row = start.row;
        while row <= end.row {
            let Some(line) = view.line(row) else {
                row += 1;
                continue;
            };
            let from = if row == start.row { start.col } else { 0 };
            let to = if row == end.row { end.col } else { view.cols().saturating_sub(1) };
            let trim = row != end.row || trim_last_row;
            push_line_span(&mut out, line, from, to, trim);
            if row != end.row && !view.is_wrapped(row + 1) {
                out.push('\n');
            }
            row += 1;
        }
        out
    }

    fn rectangular_text(&self, view: &GridView<'_>, start: SelectionPoint, end: SelectionPoint) -> String {
        let (left, right) = (start.col.min(end.col), start.col.max(end.col));
        let mut out = String::new();
        for row in start.row..=end.row {
            if let Some(line) = view.line(row) {
                push_line_span(&mut out, line, left, right, false);
            }
            if row != end.row {
                out.push('\n');
            }
        }
        out
    }
}

fn push_line_span(out: &mut String, line: &[Cell], from: u16, to: u16, trim_trailing: bool) {
    for cell in line.iter().skip(from as usize).take((to as usize).saturating_sub(from as usize) + 1) {
        if cell.width > 0 {
            out.extend(cell.cluster.iter());
        }
    }
    if trim_trailing {
        while out.ends_with(' ') {
            out.pop();
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Walks `point` left to the start of its word, crossing into the previous
/// row only if that row soft-wrapped into this one.
fn extend_to_word_start(view: &GridView<'_>, point: SelectionPoint) -> SelectionPoint {
    let mut row = point.row;
    let mut col = point.col as i32;
    loop {
        let Some(line) = view.line(row) else { break };
        if col < 0 {
            if view.is_wrapped(row) && view.line(row - 1).is_some() {
                row -= 1;
                col = view.cols() as i32 - 1;
                continue;
            }
            col = 0;
            break;
        }
        let at_boundary = line
            .get(col as usize)
            .map(|c| !is_word_char(c.base_char()))
            .unwrap_or(true);
        if at_boundary {
            col += 1;
            break;
        }
        col -= 1;
    }
    SelectionPoint::new(row, col.max(0) as u16)
}

fn extend_to_word_end(view: &GridView<'_>, point: SelectionPoint) -> SelectionPoint {
    let mut row = point.row;
    let mut col = point.col as i32;
    loop {
        let Some(line) = view.line(row) else { break };
        if col as usize >= line.len() {
            if view.is_wrapped(row + 1) && view.line(row + 1).is_some() {
                row += 1;
                col = 0;
                continue;
            }
            col = line.len() as i32 - 1;
            break;
        }
        let at_boundary = !is_word_char(line[col as usize].base_char());
        if at_boundary {
            col -= 1;
            break;
        }
        col += 1;
    }
    SelectionPoint::new(row, col.max(0) as u16)
}

/// Read-only access to the unified row space backing a selection: rows
/// `0..rows` are the active screen buffer, negative rows index scrollback.
struct GridView<'a> {
    model: &'a ScreenModel,
}

impl<'a> GridView<'a> {
    fn new(model: &'a ScreenModel) -> Self {
        Self { model }
    }

    fn cols(&self) -> u16 {
        self.model.size().cols
    }

    fn line(&self, row: i64) -> Option<&'a [Cell]> {
        if row >= 0 {
            self.model.active_buffer().line(row as u16).map(|l| l.cells.as_slice())
        } else {
            let index = (-row - 1) as usize;
            self.model.scrollback().line(index).map(|l| l.cells.as_slice())
        }
    }

    fn is_wrapped(&self, row: i64) -> bool {
        if row >= 0 {
            self.model.active_buffer().line(row as u16).map(|l| l.wrapped).unwrap_or(false)
        } else {
            let index = (-row - 1) as usize;
            self.model.scrollback().line(index).map(|l| l.wrapped).unwrap_or(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtstream_common::command::Command;
    use vtstream_common::traits::NullScreenEvents;
    use vtstream_common::types::Size;

    fn model_with_text(text: &str) -> ScreenModel {
        let mut m = ScreenModel::new(Size::new(20, 3));
        let mut ev = NullScreenEvents;
        for ch in text.chars() {
            m.apply_command(Command::Print(ch), &mut ev);
        }
        m
    }

    #[test]
    fn linear_selection_extracts_substring() {
        let model = model_with_text("hello world");
        let sel = Selection { mode: SelectionMode::Linear, anchor: SelectionPoint::new(0, 0), head: SelectionPoint::new(0, 4), phase: SelectionPhase::Complete };
        assert_eq!(sel.text(&model), "hello");
    }

    #[test]
    fn wordwise_selection_snaps_to_word_boundaries() {
        let model = model_with_text("hello world");
        let sel = Selection { mode: SelectionMode::Wordwise, anchor: SelectionPoint::new(0, 7), head: SelectionPoint::new(0, 7), phase: SelectionPhase::Complete };
        assert_eq!(sel.text(&model), "world");
    }

    #[test]
    fn rectangular_selection_takes_column_slice_per_row() {
        let mut model = ScreenModel::new(Size::new(10, 2));
        let mut ev = NullScreenEvents;
        for ch in "abcde".chars() {
            model.apply_command(Command::Print(ch), &mut ev);
        }
        model.apply_command(Command::MoveCursorTo { row: 2, col: 1 }, &mut ev);
        for ch in "fghij".chars() {
            model.apply_command(Command::Print(ch), &mut ev);
        }
        let sel = Selection { mode: SelectionMode::Rectangular, anchor: SelectionPoint::new(0, 1), head: SelectionPoint::new(1, 2), phase: SelectionPhase::Complete };
        assert_eq!(sel.text(&model), "bc\ngh");
    }

    #[test]
    fn selection_lifecycle_transitions_through_phases() {
        let mut sel = Selection::start(SelectionMode::Linear, SelectionPoint::new(0, 0));
        assert_eq!(sel.phase(), SelectionPhase::Waiting);
        sel.extend(SelectionPoint::new(0, 3));
        assert_eq!(sel.phase(), SelectionPhase::InProgress);
        sel.finish();
        assert_eq!(sel.phase(), SelectionPhase::Complete);
    }
}
