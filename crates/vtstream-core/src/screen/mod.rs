//! The screen: grid state (`model`) plus the executor that decides when
//! commands reach it (`executor`), composed behind one API a session drives.

pub mod buffer;
pub mod cursor;
pub mod executor;
pub mod model;

use vtstream_common::command::Command;
use vtstream_common::traits::ScreenEvents;
use vtstream_common::types::{Position, Size, TerminalSnapshot};

pub use buffer::{Line, ScreenBuffer, Scrollback};
pub use cursor::Cursor;
pub use executor::{DirectExecutor, Executor, SynchronizedExecutor};
pub use model::ScreenModel;

/// Top-level screen: a [`ScreenModel`] driven through an [`Executor`].
/// Swapping the executor (direct vs. synchronized) doesn't require the
/// caller to know which one is active; both speak the same `Command`
/// stream in, `ScreenEvents` callbacks out.
pub struct Screen {
    model: ScreenModel,
    executor: Box<dyn Executor>,
}

impl Screen {
    pub fn new(size: Size) -> Self {
        Self { model: ScreenModel::new(size), executor: Box::new(DirectExecutor) }
    }

    /// Builds a screen whose executor buffers drawing commands under
    /// synchronized-output mode (2026) from the start, rather than only
    /// after the host first asserts it mid-stream.
    pub fn with_synchronized_output(size: Size) -> Self {
        Self { model: ScreenModel::new(size), executor: Box::new(SynchronizedExecutor::new()) }
    }

    pub fn apply(&mut self, cmd: Command, events: &mut dyn ScreenEvents) {
        self.executor.apply(&mut self.model, cmd, events);
    }

    pub fn apply_all(&mut self, cmds: Vec<Command>, events: &mut dyn ScreenEvents) {
        for cmd in cmds {
            self.apply(cmd, events);
        }
    }

    pub fn resize(&mut self, size: Size) {
        self.model.resize(size);
    }

    pub fn model(&self) -> &ScreenModel {
        &self.model
    }

    pub fn size(&self) -> Size {
        self.model.size()
    }

    pub fn cursor_position(&self) -> Position {
        self.model.cursor().position()
    }

    pub fn snapshot(&self) -> TerminalSnapshot {
        TerminalSnapshot {
            size: self.model.size(),
            cursor: self.model.cursor().position(),
            cursor_visible: self.model.modes().is_set(vtstream_common::types::Mode::CursorVisible),
            alternate_screen_active: self.model.using_alternate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtstream_common::traits::NullScreenEvents;

    #[test]
    fn screen_resize_preserves_content_within_new_bounds() {
        let mut screen = Screen::new(Size::new(10, 3));
        let mut ev = NullScreenEvents;
        screen.apply(Command::Print('x'), &mut ev);
        screen.resize(Size::new(20, 5));
        assert_eq!(screen.size(), Size::new(20, 5));
    }

    #[test]
    fn snapshot_reflects_alternate_screen_state() {
        let mut screen = Screen::new(Size::new(10, 3));
        let mut ev = NullScreenEvents;
        screen.apply(
            Command::SetMode(vtstream_common::types::Mode::AlternateScreenBuffer, true),
            &mut ev,
        );
        assert!(screen.snapshot().alternate_screen_active);
    }
}
