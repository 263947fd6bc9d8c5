use crate::types::{Charset, CharsetSlot, Color, Mode, UnderlineStyle};

/// Erase extent, shared by ED (display) and EL (line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    ToEnd,
    ToStart,
    All,
    /// ED 3 — also erase scrollback.
    AllAndScrollback,
}

/// A single SGR (Select Graphic Rendition) parameter, already resolved from
/// raw CSI numbers (including the 38/48/58 extended-color sub-forms) into a
/// typed change to the pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrAttr {
    Reset,
    Bold,
    Faint,
    Italic,
    Underline(UnderlineStyle),
    Blink,
    Inverse,
    Invisible,
    CrossedOut,
    Overline,
    Framed,
    Encircled,
    NoBold,
    NoFaint,
    NoItalic,
    NoUnderline,
    NoBlink,
    NoInverse,
    NoInvisible,
    NoCrossedOut,
    NoOverline,
    NoFramed,
    NoEncircled,
    Foreground(Color),
    Background(Color),
    UnderlineColor(Color),
    DefaultForeground,
    DefaultBackground,
    DefaultUnderlineColor,
}

/// Which clipboard selection an OSC 52 request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardSelector {
    Clipboard,
    Primary,
    Secondary,
}

/// A dynamic (OSC 10/11/12/4/110/111/112) color slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicColorTarget {
    Foreground,
    Background,
    CursorColor,
    Palette(u8),
}

/// Device status / attribute request kinds (the argument to CSI `n`/`c`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRequest {
    CursorPositionReport { extended: bool },
    DeviceStatusReport,
    PrimaryDeviceAttributes,
    SecondaryDeviceAttributes,
}

/// The normalized command algebra. Every variant carries the minimal typed
/// payload needed to apply it; numeric fields are `i32`, coordinates 1-based
/// per `Position`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // --- text ---
    Print(char),

    // --- cursor movement ---
    CursorUp(i32),
    CursorDown(i32),
    CursorForward(i32),
    CursorBack(i32),
    CursorNextLine(i32),
    CursorPreviousLine(i32),
    CursorToColumn(i32),
    CursorToRow(i32),
    MoveCursorTo { row: i32, col: i32 },
    CursorForwardTab(i32),
    CursorBackwardTab(i32),

    // --- line/control characters ---
    LineFeed,
    ReverseLineFeed,
    CarriageReturn,
    Backspace,
    HorizontalTab,
    Bell,
    NextLine,

    // --- erasure ---
    EraseDisplay(EraseMode),
    EraseLine(EraseMode),
    EraseCharacters(i32),
    DeleteCharacters(i32),
    InsertCharacters(i32),
    DeleteLines(i32),
    InsertLines(i32),

    // --- scrolling & margins ---
    ScrollUp(i32),
    ScrollDown(i32),
    SetTopBottomMargins { top: i32, bottom: i32 },
    SetLeftRightMargins { left: i32, right: i32 },

    // --- tabs ---
    SetTabStop,
    ClearTabStop,
    ClearAllTabStops,

    // --- SGR ---
    SetGraphicRendition(Vec<SgrAttr>),

    // --- modes ---
    SetMode(Mode, bool),

    // --- cursor save/restore ---
    SaveCursor,
    RestoreCursor,

    // --- charsets ---
    DesignateCharset(CharsetSlot, Charset),
    InvokeCharset(CharsetSlot),

    // --- screen management ---
    ResetHard,
    SetMark,
    FindMarkForward,
    FindMarkBackward,

    // --- host-facing queries/replies ---
    Request(StatusRequest),

    // --- OSC ---
    SetWindowTitle(String),
    SetIconName(String),
    Hyperlink { id: Option<String>, uri: String },
    SetDynamicColor(DynamicColorTarget, String),
    QueryDynamicColor(DynamicColorTarget),
    ResetDynamicColor(DynamicColorTarget),
    CopyToClipboard { selector: ClipboardSelector, data: Vec<u8> },
    Notify { title: String, body: String },

    // --- synchronized output (mode 2026) ---
    BeginSynchronizedUpdate,
    EndSynchronizedUpdate,
}
