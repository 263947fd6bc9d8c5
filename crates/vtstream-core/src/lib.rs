pub mod events;
pub mod input;
pub mod output;
pub mod pty;
pub mod screen;
pub mod selection;

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, instrument};

use vtstream_common::command::ClipboardSelector;
use vtstream_common::error::{Result, VtError};
use vtstream_common::traits::{CommandSource, ScreenEvents, TerminalBackend};
use vtstream_common::types::Size;
use vtstream_parser::CommandBuilder;

pub use events::{Event, EventBus, HostCommand};
pub use pty::PtyManager;
pub use screen::Screen;

/// A screen handle shareable between the run loop and a host's renderer.
pub type SharedScreen = Arc<RwLock<Screen>>;

/// Bridges `Screen`'s synchronous host callbacks to the terminal's async
/// event/command channels: replies are re-queued as PTY writes, everything
/// else becomes a broadcast `Event`.
struct TerminalEvents {
    command_tx: tokio::sync::mpsc::Sender<HostCommand>,
    event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl ScreenEvents for TerminalEvents {
    fn reply(&mut self, bytes: &[u8]) {
        if self.command_tx.try_send(HostCommand::Write(bytes.to_vec())).is_err() {
            debug!("dropped a screen reply, command channel full or closed");
        }
    }

    fn bell(&mut self) {
        let _ = self.event_tx.send(Event::Bell);
    }

    fn copy_to_clipboard(&mut self, _selector: ClipboardSelector, data: &[u8]) {
        let _ = self.event_tx.send(Event::ClipboardCopy(data.to_vec()));
    }

    fn notify(&mut self, title: &str, body: &str) {
        let _ = self.event_tx.send(Event::Notification { title: title.to_string(), body: body.to_string() });
    }

    fn set_window_title(&mut self, title: &str) {
        let _ = self.event_tx.send(Event::TitleChanged(title.to_string()));
    }

    fn set_icon_name(&mut self, name: &str) {
        let _ = self.event_tx.send(Event::IconNameChanged(name.to_string()));
    }

    fn buffer_changed(&mut self, _alternate: bool) {
        let _ = self.event_tx.send(Event::StateChanged);
    }

    fn on_closed(&mut self) {
        let _ = self.event_tx.send(Event::Closed);
    }
}

/// Coordinates a PTY, the parser/builder pipeline, and the screen model
/// into a terminal a host can drive over a command/event channel pair.
pub struct Terminal {
    pty: PtyManager,
    screen: Arc<RwLock<Screen>>,
    builder: CommandBuilder,
    event_bus: EventBus,
    size: Size,
}

impl Terminal {
    /// Create a new terminal with the specified size
    #[instrument]
    pub fn new(size: Size) -> Result<Self> {
        info!("Creating new Terminal with size: {:?}", size);
        let pty = PtyManager::spawn_shell(size)?;
        let screen = Arc::new(RwLock::new(Screen::new(size)));
        let builder = CommandBuilder::new();
        let event_bus = EventBus::new();

        info!("Terminal created successfully");
        Ok(Self { pty, screen, builder, event_bus, size })
    }

    /// A read-write handle to the live screen, usable concurrently with the
    /// run loop by a renderer. Readers should prefer short-lived `.read()`
    /// guards; the lock is writer-preferring so the run loop's mutations
    /// aren't starved by a slow renderer.
    pub fn screen(&self) -> SharedScreen {
        Arc::clone(&self.screen)
    }

    /// Get a command sender for external control
    pub fn command_sender(&self) -> tokio::sync::mpsc::Sender<HostCommand> {
        self.event_bus.command_sender()
    }

    /// Get an event receiver for monitoring terminal events
    pub fn event_receiver(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_bus.event_receiver()
    }

    /// Run the terminal event loop
    #[instrument(skip(self))]
    pub async fn run(mut self) -> Result<()> {
        info!("Starting Terminal run loop");
        let mut buffer = vec![0u8; 4096];
        let event_tx = self.event_bus.event_sender();
        let mut events = TerminalEvents {
            command_tx: self.event_bus.command_sender(),
            event_tx: event_tx.clone(),
        };

        let mut command_rx = self.event_bus.take_command_receiver();
        let mut pty_writer = self.pty.clone();
        let resize_screen = Arc::clone(&self.screen);
        let resize_event_tx = event_tx.clone();
        let cmd_processor = tokio::spawn(async move {
            debug!("Command processor started");
            while let Some(cmd) = command_rx.recv().await {
                match cmd {
                    HostCommand::Write(data) => {
                        debug!("Processing write command: {} bytes", data.len());
                        if let Err(e) = pty_writer.write(&data).await {
                            error!("PTY write error: {}", e);
                            break;
                        }
                    }
                    HostCommand::Resize(size) => {
                        debug!("Processing resize command: {:?}", size);
                        if let Err(e) = pty_writer.resize(size).await {
                            error!("PTY resize error: {}", e);
                        }
                        resize_screen.write().resize(size);
                        let _ = resize_event_tx.send(Event::Resized(size));
                    }
                    HostCommand::Close => {
                        info!("Received close command");
                        break;
                    }
                }
            }
            debug!("Command processor exiting");
        });

        if !self.pty.is_alive().await {
            error!("PTY process is not alive before starting read loop!");
            return Err(VtError::Pty("PTY process died immediately".to_string()));
        }

        info!("Starting main read loop");
        loop {
            tokio::select! {
                result = self.pty.read(&mut buffer) => {
                    match result {
                        Ok(0) => {
                            debug!("PTY read returned 0 bytes (no data available)");
                        }
                        Ok(n) => {
                            let data = &buffer[..n];
                            self.process_output(data, &mut events);
                            if self.event_bus.has_event_subscribers() {
                                let _ = event_tx.send(Event::OutputReady(data.to_vec()));
                            }
                        }
                        Err(e) => {
                            error!("PTY read error: {}", e);
                            return Err(e);
                        }
                    }
                }
                _ = tokio::time::sleep(tokio::time::Duration::from_secs(1)) => {
                    if !self.pty.is_alive().await {
                        info!("PTY process ended (detected in alive check)");
                        break;
                    }
                }
            }
        }

        info!("Exiting main read loop");
        events.on_closed();
        let _ = cmd_processor.await;

        info!("Terminal run loop completed");
        Ok(())
    }

    fn process_output(&mut self, data: &[u8], events: &mut TerminalEvents) {
        let commands = self.builder.feed(data);
        let mut screen = self.screen.write();
        screen.apply_all(commands, events);
    }

    /// Get the current terminal size
    pub fn size(&self) -> Size {
        self.size
    }
}
