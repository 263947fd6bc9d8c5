use vtstream_common::types::Size;

/// Control messages a host sends into a running `Terminal`. Distinct from
/// `vtstream_common::command::Command`, which is the VT command algebra the
/// parser produces from PTY output; this is the other direction.
#[derive(Debug, Clone)]
pub enum HostCommand {
    /// Write data to the PTY (keystrokes, pasted text, encoded mouse reports).
    Write(Vec<u8>),

    /// Resize the terminal and the underlying PTY.
    Resize(Size),

    /// Tear down the terminal and its PTY child process.
    Close,
}

/// Events emitted by the terminal for host consumption (rendering, title
/// bars, notifications).
#[derive(Debug, Clone)]
pub enum Event {
    /// New output data was read from the PTY and applied to the screen.
    OutputReady(Vec<u8>),

    /// The screen model changed in a way that may require a redraw.
    StateChanged,

    /// The terminal was resized.
    Resized(Size),

    /// The PTY child process exited and the run loop is stopping.
    Closed,

    /// A host-visible error occurred without being fatal to the loop.
    Error(String),

    /// Terminal bell (BEL or DECSET/DECRST-adjacent notify request).
    Bell,

    /// OSC 0/2 set the window title.
    TitleChanged(String),

    /// OSC 1 set the icon name.
    IconNameChanged(String),

    /// OSC 9/777 desktop notification.
    Notification { title: String, body: String },

    /// OSC 52 copy request, already base64-decoded.
    ClipboardCopy(Vec<u8>),
}
