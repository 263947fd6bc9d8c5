//! How a [`Command`] gets applied to a [`ScreenModel`]: immediately, or
//! buffered behind a synchronized-output window (DEC private mode 2026).

use std::time::{Duration, Instant};

use tracing::trace;
use vtstream_common::command::Command;
use vtstream_common::traits::ScreenEvents;

use super::model::ScreenModel;

/// A terminal's drawing budget between forced synchronized-output flushes.
/// Hosts that never send `BeginSynchronizedUpdate`/`End...` never hit this;
/// it exists so a buggy or hostile stream can't withhold a frame forever.
const SYNC_FLUSH_BUDGET: Duration = Duration::from_millis(100);

/// Applies commands to a [`ScreenModel`]. `DirectExecutor` is the default;
/// `SynchronizedExecutor` wraps it to add synchronized-output buffering.
pub trait Executor: Send + Sync {
    fn apply(&mut self, model: &mut ScreenModel, cmd: Command, events: &mut dyn ScreenEvents);
}

/// Applies every command to the model the moment it arrives.
#[derive(Debug, Default)]
pub struct DirectExecutor;

impl Executor for DirectExecutor {
    fn apply(&mut self, model: &mut ScreenModel, cmd: Command, events: &mut dyn ScreenEvents) {
        model.apply_command(cmd, events);
    }
}

/// Wraps a `DirectExecutor`. While inside a synchronized-update window
/// (mode 2026), commands are queued instead of applied, then flushed in
/// order on `EndSynchronizedUpdate` or once `SYNC_FLUSH_BUDGET` elapses,
/// whichever comes first. There is no background timer: the deadline is
/// just checked against [`Instant::now`] the next time a command arrives,
/// which is also the recovery path for a host that asserts mode 2026 and
/// then never clears it.
pub struct SynchronizedExecutor {
    inner: DirectExecutor,
    pending: Vec<Command>,
    deadline: Option<Instant>,
}

impl SynchronizedExecutor {
    pub fn new() -> Self {
        Self { inner: DirectExecutor, pending: Vec::new(), deadline: None }
    }

    fn buffering(&self) -> bool {
        self.deadline.is_some()
    }

    fn flush(&mut self, model: &mut ScreenModel, events: &mut dyn ScreenEvents) {
        self.deadline = None;
        for cmd in self.pending.drain(..) {
            self.inner.apply(model, cmd, events);
        }
    }

    fn deadline_elapsed(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }
}

impl Default for SynchronizedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for SynchronizedExecutor {
    fn apply(&mut self, model: &mut ScreenModel, cmd: Command, events: &mut dyn ScreenEvents) {
        if self.buffering() && self.deadline_elapsed() {
            trace!("synchronized update exceeded flush budget, forcing flush");
            self.flush(model, events);
        }

        match cmd {
            Command::BeginSynchronizedUpdate => {
                self.deadline = Some(Instant::now() + SYNC_FLUSH_BUDGET);
            }
            Command::EndSynchronizedUpdate => {
                self.flush(model, events);
            }
            other if self.buffering() => {
                self.pending.push(other);
            }
            other => self.inner.apply(model, other, events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtstream_common::traits::NullScreenEvents;
    use vtstream_common::types::{Position, Size};

    #[test]
    fn direct_executor_applies_immediately() {
        let mut model = ScreenModel::new(Size::new(10, 3));
        let mut exec = DirectExecutor;
        let mut ev = NullScreenEvents;
        exec.apply(&mut model, Command::Print('x'), &mut ev);
        assert_eq!(model.cursor().position(), Position::new(1, 2));
    }

    #[test]
    fn synchronized_executor_buffers_until_end_marker() {
        let mut model = ScreenModel::new(Size::new(10, 3));
        let mut exec = SynchronizedExecutor::new();
        let mut ev = NullScreenEvents;
        exec.apply(&mut model, Command::BeginSynchronizedUpdate, &mut ev);
        exec.apply(&mut model, Command::Print('x'), &mut ev);
        assert_eq!(model.cursor().position(), Position::ORIGIN);
        exec.apply(&mut model, Command::EndSynchronizedUpdate, &mut ev);
        assert_eq!(model.cursor().position(), Position::new(1, 2));
    }

    #[test]
    fn synchronized_executor_forces_flush_after_budget() {
        let mut model = ScreenModel::new(Size::new(10, 3));
        let mut exec = SynchronizedExecutor::new();
        let mut ev = NullScreenEvents;
        exec.apply(&mut model, Command::BeginSynchronizedUpdate, &mut ev);
        exec.apply(&mut model, Command::Print('x'), &mut ev);
        exec.deadline = Some(Instant::now() - Duration::from_millis(1));
        exec.apply(&mut model, Command::Print('y'), &mut ev);
        assert_eq!(model.cursor().position(), Position::new(1, 3));
    }
}
