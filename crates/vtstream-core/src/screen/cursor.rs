//! Cursor position, pen (active `CellAttributes`), and the charset
//! designation table (G0-G3 slots plus the currently invoked slot).

use vtstream_common::types::{CellAttributes, Charset, CharsetSlot, Position};

/// Everything DECSC/DECRC save and restore: position, pen, charsets, and
/// origin-mode's effect on where row/col 1 sits.
#[derive(Debug, Clone)]
pub struct Cursor {
    position: Position,
    pen: CellAttributes,
    charsets: [Charset; 4],
    invoked: CharsetSlot,
    /// Set after writing into the last column; the next printable character
    /// wraps to the next line first instead of overwriting column `cols`.
    wrap_pending: bool,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            position: Position::ORIGIN,
            pen: CellAttributes::default(),
            charsets: [Charset::Ascii; 4],
            invoked: CharsetSlot::G0,
            wrap_pending: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, pos: Position) {
        self.position = pos;
        self.wrap_pending = false;
    }

    pub fn pen(&self) -> CellAttributes {
        self.pen
    }

    pub fn set_pen(&mut self, pen: CellAttributes) {
        self.pen = pen;
    }

    pub fn designate(&mut self, slot: CharsetSlot, charset: Charset) {
        self.charsets[slot as usize] = charset;
    }

    pub fn invoke(&mut self, slot: CharsetSlot) {
        self.invoked = slot;
    }

    pub fn active_charset(&self) -> Charset {
        self.charsets[self.invoked as usize]
    }

    pub fn wrap_pending(&self) -> bool {
        self.wrap_pending
    }

    pub fn set_wrap_pending(&mut self, pending: bool) {
        self.wrap_pending = pending;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_round_trips_through_slots() {
        let mut cursor = Cursor::new();
        cursor.designate(CharsetSlot::G1, Charset::DecSpecialGraphics);
        cursor.invoke(CharsetSlot::G1);
        assert_eq!(cursor.active_charset(), Charset::DecSpecialGraphics);
        assert_eq!(cursor.active_charset().translate('q'), '─');
    }

    #[test]
    fn set_position_clears_wrap_pending() {
        let mut cursor = Cursor::new();
        cursor.set_wrap_pending(true);
        cursor.set_position(Position::new(2, 2));
        assert!(!cursor.wrap_pending());
    }
}
