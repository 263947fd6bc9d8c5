//! The grid: visible screen lines plus the scrollback history that feeds
//! them. Columns are addressed 0-based internally; callers at the `Screen`
//! boundary translate from the 1-based `Position` convention.

use std::collections::VecDeque;

use vtstream_common::types::{Cell, CellAttributes, Size};

/// One row of cells plus whether it soft-wrapped into the next row (the row
/// was filled by autowrap, not by an explicit line feed). Selection and
/// reflow both need this to tell a wrapped paragraph from separate lines.
#[derive(Debug, Clone)]
pub struct Line {
    pub cells: Vec<Cell>,
    pub wrapped: bool,
}

impl Line {
    pub fn blank(cols: u16) -> Self {
        Self { cells: vec![Cell::blank(); cols as usize], wrapped: false }
    }

    pub fn blank_with_pen(cols: u16, attrs: CellAttributes) -> Self {
        Self { cells: vec![Cell::blank_with_pen(attrs); cols as usize], wrapped: false }
    }
}

/// The on-screen grid for one buffer (primary or alternate), with DECSTBM /
/// DECSLRM scroll-region margins tracked alongside it.
pub struct ScreenBuffer {
    lines: Vec<Line>,
    size: Size,
    top_margin: u16,
    bottom_margin: u16,
    left_margin: u16,
    right_margin: u16,
}

impl ScreenBuffer {
    pub fn new(size: Size) -> Self {
        let lines = (0..size.rows).map(|_| Line::blank(size.cols)).collect();
        Self {
            lines,
            size,
            top_margin: 0,
            bottom_margin: size.rows.saturating_sub(1),
            left_margin: 0,
            right_margin: size.cols.saturating_sub(1),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn line(&self, row0: u16) -> Option<&Line> {
        self.lines.get(row0 as usize)
    }

    pub fn line_mut(&mut self, row0: u16) -> Option<&mut Line> {
        self.lines.get_mut(row0 as usize)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn cell(&self, row0: u16, col0: u16) -> Cell {
        self.lines
            .get(row0 as usize)
            .and_then(|l| l.cells.get(col0 as usize))
            .cloned()
            .unwrap_or_else(Cell::blank)
    }

    pub fn set_cell(&mut self, row0: u16, col0: u16, cell: Cell) {
        if let Some(line) = self.lines.get_mut(row0 as usize) {
            if let Some(slot) = line.cells.get_mut(col0 as usize) {
                *slot = cell;
            }
        }
    }

    /// Scrolling/margin region, top/bottom inclusive, 0-based.
    pub fn top_bottom_margins(&self) -> (u16, u16) {
        (self.top_margin, self.bottom_margin)
    }

    pub fn set_top_bottom_margins(&mut self, top: u16, bottom: u16) {
        let bottom = bottom.min(self.size.rows.saturating_sub(1));
        if top < bottom {
            self.top_margin = top;
            self.bottom_margin = bottom;
        } else {
            self.top_margin = 0;
            self.bottom_margin = self.size.rows.saturating_sub(1);
        }
    }

    pub fn left_right_margins(&self) -> (u16, u16) {
        (self.left_margin, self.right_margin)
    }

    pub fn set_left_right_margins(&mut self, left: u16, right: u16) {
        let right = right.min(self.size.cols.saturating_sub(1));
        if left < right {
            self.left_margin = left;
            self.right_margin = right;
        } else {
            self.left_margin = 0;
            self.right_margin = self.size.cols.saturating_sub(1);
        }
    }

    pub fn reset_margins(&mut self) {
        self.top_margin = 0;
        self.bottom_margin = self.size.rows.saturating_sub(1);
        self.left_margin = 0;
        self.right_margin = self.size.cols.saturating_sub(1);
    }

    /// Scrolls the region [top_margin, bottom_margin] up by one line. The
    /// line that falls off the top is returned so the caller can push it
    /// into scrollback (only done when the region spans the whole screen
    /// top, per DEC convention).
    pub fn scroll_region_up(&mut self, pen: CellAttributes) -> Option<Line> {
        let (top, bottom) = (self.top_margin as usize, self.bottom_margin as usize);
        if top > bottom || bottom >= self.lines.len() {
            return None;
        }
        let removed = self.lines.remove(top);
        self.lines.insert(bottom, Line::blank_with_pen(self.size.cols, pen));
        Some(removed)
    }

    pub fn scroll_region_down(&mut self, pen: CellAttributes) {
        let (top, bottom) = (self.top_margin as usize, self.bottom_margin as usize);
        if top > bottom || bottom >= self.lines.len() {
            return;
        }
        self.lines.remove(bottom);
        self.lines.insert(top, Line::blank_with_pen(self.size.cols, pen));
    }

    pub fn clear(&mut self, pen: CellAttributes) {
        for line in &mut self.lines {
            *line = Line::blank_with_pen(self.size.cols, pen);
        }
    }

    pub fn clear_line(&mut self, row0: u16, pen: CellAttributes) {
        if let Some(line) = self.lines.get_mut(row0 as usize) {
            *line = Line::blank_with_pen(self.size.cols, pen);
        }
    }

    pub fn insert_lines(&mut self, at: u16, count: u16, pen: CellAttributes) {
        let (top, bottom) = (self.top_margin as usize, self.bottom_margin as usize);
        let at = (at as usize).clamp(top, bottom + 1);
        for _ in 0..count {
            if at <= bottom && bottom < self.lines.len() {
                self.lines.remove(bottom);
                self.lines.insert(at, Line::blank_with_pen(self.size.cols, pen));
            }
        }
    }

    pub fn delete_lines(&mut self, at: u16, count: u16, pen: CellAttributes) {
        let (top, bottom) = (self.top_margin as usize, self.bottom_margin as usize);
        let at = (at as usize).clamp(top, bottom + 1);
        for _ in 0..count {
            if at <= bottom && at < self.lines.len() {
                self.lines.remove(at);
                self.lines.insert(bottom, Line::blank_with_pen(self.size.cols, pen));
            }
        }
    }

    pub fn resize(&mut self, new_size: Size) {
        for line in &mut self.lines {
            if new_size.cols > self.size.cols {
                line.cells.extend((self.size.cols..new_size.cols).map(|_| Cell::blank()));
            } else if new_size.cols < self.size.cols {
                line.cells.truncate(new_size.cols as usize);
            }
        }
        if new_size.rows > self.size.rows {
            for _ in self.size.rows..new_size.rows {
                self.lines.push(Line::blank(new_size.cols));
            }
        } else if new_size.rows < self.size.rows {
            self.lines.truncate(new_size.rows as usize);
        }
        self.size = new_size;
        self.reset_margins();
    }
}

/// Scrollback history: lines that have scrolled off the top of the primary
/// buffer. Indexed 0 = most recently pushed (closest to the viewport).
pub struct Scrollback {
    lines: VecDeque<Line>,
    max_lines: usize,
}

impl Scrollback {
    pub fn new(max_lines: usize) -> Self {
        Self { lines: VecDeque::with_capacity(max_lines.min(10_000)), max_lines }
    }

    pub fn push(&mut self, line: Line) {
        if self.max_lines == 0 {
            return;
        }
        if self.lines.len() >= self.max_lines {
            self.lines.pop_back();
        }
        self.lines.push_front(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `index` 0 is the line nearest the viewport (most recently scrolled
    /// off).
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_region_up_moves_top_line_out() {
        let mut buf = ScreenBuffer::new(Size::new(4, 3));
        buf.set_cell(0, 0, Cell::with_char('a', 1, CellAttributes::default(), None));
        let removed = buf.scroll_region_up(CellAttributes::default());
        assert_eq!(removed.unwrap().cells[0].base_char(), 'a');
        assert_eq!(buf.cell(2, 0).base_char(), ' ');
    }

    #[test]
    fn margins_reject_inverted_range() {
        let mut buf = ScreenBuffer::new(Size::new(10, 5));
        buf.set_top_bottom_margins(3, 1);
        assert_eq!(buf.top_bottom_margins(), (0, 4));
    }

    #[test]
    fn scrollback_caps_at_max_lines() {
        let mut sb = Scrollback::new(2);
        sb.push(Line::blank(4));
        sb.push(Line::blank(4));
        sb.push(Line::blank(4));
        assert_eq!(sb.len(), 2);
    }

    #[test]
    fn resize_grows_and_shrinks_columns() {
        let mut buf = ScreenBuffer::new(Size::new(4, 2));
        buf.resize(Size::new(6, 2));
        assert_eq!(buf.lines()[0].cells.len(), 6);
        buf.resize(Size::new(2, 2));
        assert_eq!(buf.lines()[0].cells.len(), 2);
    }
}
