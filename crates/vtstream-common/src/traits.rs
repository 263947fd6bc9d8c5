use crate::command::{ClipboardSelector, Command, DynamicColorTarget};
use crate::error::Result;
use crate::types::Size;
use async_trait::async_trait;

/// Source of normalized commands, driven by raw PTY bytes. Implemented by
/// the parser crate's `CommandBuilder`.
pub trait CommandSource: Send {
    fn feed(&mut self, data: &[u8]) -> Vec<Command>;
}

/// Abstract byte-duplex transport to the host process (a PTY in practice,
/// anything else in tests).
#[async_trait]
pub trait TerminalBackend: Send + Sync {
    async fn write(&mut self, data: &[u8]) -> Result<usize>;
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
    async fn resize(&mut self, size: Size) -> Result<()>;
    async fn is_alive(&self) -> bool;
}

/// Host callbacks invoked synchronously from command application. A no-op
/// implementation is provided for tests that don't care about host effects.
pub trait ScreenEvents: Send {
    fn reply(&mut self, _bytes: &[u8]) {}
    fn bell(&mut self) {}
    fn copy_to_clipboard(&mut self, _selector: ClipboardSelector, _data: &[u8]) {}
    fn notify(&mut self, _title: &str, _body: &str) {}
    fn set_window_title(&mut self, _title: &str) {}
    fn set_icon_name(&mut self, _name: &str) {}
    fn resize_window(&mut self, _cols: u32, _rows: u32, _in_pixels: bool) {}
    fn buffer_changed(&mut self, _alternate: bool) {}
    fn on_closed(&mut self) {}
    fn on_selection_complete(&mut self) {}
    fn dynamic_color_get(&mut self, _target: DynamicColorTarget) -> Option<String> {
        None
    }
    fn dynamic_color_set(&mut self, _target: DynamicColorTarget, _spec: &str) {}
    fn dynamic_color_reset(&mut self, _target: DynamicColorTarget) {}
}

/// A `ScreenEvents` that discards every callback. Useful for headless tests.
#[derive(Debug, Default)]
pub struct NullScreenEvents;

impl ScreenEvents for NullScreenEvents {}
