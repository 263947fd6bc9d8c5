use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub rows: u16,
    pub cols: u16,
}

impl Size {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { rows, cols }
    }
}

/// Cursor/grid position, 1-based per DEC convention (row 1 is the top line,
/// column 1 is the leftmost). `column` may legally reach `cols + 1`, the
/// wrap-pending position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub column: u32,
}

impl Position {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    pub const ORIGIN: Position = Position { row: 1, column: 1 };
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// A terminal color. `DefaultColor` tracks the host's configured default
/// rather than resolving to a concrete RGB value here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    DefaultColor,
    IndexedColor(u8),
    BrightColor(u8),
    RgbColor(u8, u8, u8),
}

impl Color {
    /// Maps the 0..=15 ANSI/bright index space (as produced by SGR 30-37,
    /// 90-97 after normalization) onto `Color`.
    pub fn from_ansi(index: u8) -> Self {
        if index < 8 {
            Color::IndexedColor(index)
        } else {
            Color::BrightColor(index - 8)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::DefaultColor
    }
}

bitflags! {
    /// Text attribute bitset. Underline *style* is carried separately in
    /// `CellAttributes::underline_style` since it is multi-valued, not boolean.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StyleFlags: u32 {
        const BOLD          = 1 << 0;
        const FAINT         = 1 << 1;
        const ITALIC        = 1 << 2;
        const BLINKING      = 1 << 3;
        const INVERSE       = 1 << 4;
        const INVISIBLE     = 1 << 5;
        const CROSSED_OUT   = 1 << 6;
        const OVERLINE      = 1 << 7;
        const FRAMED        = 1 << 8;
        const ENCIRCLED     = 1 << 9;
        const DOUBLY_UNDERLINED_LEGACY = 1 << 10;
    }
}

/// Underline rendition. `None` means "no underline"; `DoublyUnderlined` is
/// also reachable via the legacy SGR 21 interpretation some terminals use,
/// tracked by `StyleFlags::DOUBLY_UNDERLINED_LEGACY` when the parser can't
/// disambiguate from context (kept as a distinct flag rather than folded
/// into this enum so both forms round-trip through SGR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnderlineStyle {
    #[default]
    None,
    Single,
    Double,
    Curly,
    Dotted,
    Dashed,
}

/// The pen: style + colors applied to newly written cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellAttributes {
    pub flags: StyleFlags,
    pub underline_style: UnderlineStyle,
    pub fg_color: Color,
    pub bg_color: Color,
    pub underline_color: Color,
}

impl Default for CellAttributes {
    fn default() -> Self {
        Self {
            flags: StyleFlags::empty(),
            underline_style: UnderlineStyle::None,
            fg_color: Color::DefaultColor,
            bg_color: Color::DefaultColor,
            underline_color: Color::DefaultColor,
        }
    }
}

/// A hyperlink shared by every cell written while it was active. Identity is
/// by `Arc` pointer equality; dropping the last cell reference drops the
/// link. `id` is the OSC 8 `id=` parameter, used only to let otherwise
/// non-adjacent writes share one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub id: Option<String>,
    pub uri: String,
}

pub type HyperlinkRef = Arc<Hyperlink>;

/// A single grid cell. `cluster` holds the base codepoint plus any combining
/// codepoints; `width` is the display width of the cluster (0 for the
/// continuation cell immediately right of a width-2 base).
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub cluster: smallvec::SmallVec<[char; 2]>,
    pub width: u8,
    pub attrs: CellAttributes,
    pub hyperlink: Option<HyperlinkRef>,
}

impl Cell {
    pub fn blank() -> Self {
        Self {
            cluster: smallvec::smallvec![' '],
            width: 1,
            attrs: CellAttributes::default(),
            hyperlink: None,
        }
    }

    pub fn continuation() -> Self {
        Self {
            cluster: smallvec::SmallVec::new(),
            width: 0,
            attrs: CellAttributes::default(),
            hyperlink: None,
        }
    }

    pub fn with_char(ch: char, width: u8, attrs: CellAttributes, hyperlink: Option<HyperlinkRef>) -> Self {
        Self {
            cluster: smallvec::smallvec![ch],
            width,
            attrs,
            hyperlink,
        }
    }

    /// The base (first) codepoint of the cluster, ' ' for an empty/continuation cell.
    pub fn base_char(&self) -> char {
        self.cluster.first().copied().unwrap_or(' ')
    }

    pub fn blank_with_pen(attrs: CellAttributes) -> Self {
        Self {
            cluster: smallvec::smallvec![' '],
            width: 1,
            attrs,
            hyperlink: None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// G0..G3 character-set designation slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharsetSlot {
    G0,
    G1,
    G2,
    G3,
}

/// Recognized character sets designatable into a charset slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charset {
    Ascii,
    DecSpecialGraphics,
    Uk,
}

impl Charset {
    /// Applies the charset's ASCII-range substitution, if any. Only
    /// `DecSpecialGraphics` (the VT100 line-drawing set) and `Uk` (pound
    /// sign substitution) alter codepoints; `Ascii` is the identity.
    pub fn translate(self, ch: char) -> char {
        match self {
            Charset::Ascii => ch,
            Charset::Uk => {
                if ch == '#' {
                    '£'
                } else {
                    ch
                }
            }
            Charset::DecSpecialGraphics => dec_special_graphics(ch),
        }
    }
}

fn dec_special_graphics(ch: char) -> char {
    match ch {
        '`' => '◆',
        'a' => '▒',
        'b' => '\u{2409}',
        'c' => '\u{240C}',
        'd' => '\u{240D}',
        'e' => '\u{240A}',
        'f' => '°',
        'g' => '±',
        'h' => '\u{2424}',
        'i' => '\u{240B}',
        'j' => '┘',
        'k' => '┐',
        'l' => '┌',
        'm' => '└',
        'n' => '┼',
        'o' => '⎺',
        'p' => '⎻',
        'q' => '─',
        'r' => '⎼',
        's' => '⎽',
        't' => '├',
        'u' => '┤',
        'v' => '┴',
        'w' => '┬',
        'x' => '│',
        'y' => '≤',
        'z' => '≥',
        '{' => 'π',
        '|' => '≠',
        '}' => '£',
        '~' => '·',
        _ => ch,
    }
}

/// DEC private / ANSI mode identifiers recognized by the core. The raw CSI
/// number is kept as the source of truth for modes this core doesn't model
/// semantically (`Unknown`), so DECRQM can still answer them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    AutoWrap,
    Origin,
    CursorVisible,
    BracketedPaste,
    AlternateScreenBuffer,
    AlternateScreenBufferSaveCursor,
    ApplicationKeypad,
    ApplicationCursor,
    LeftRightMargin,
    Insert,
    SendReceive,
    FocusReporting,
    SynchronizedOutput,
    MouseX10,
    MouseNormal,
    MouseButtonEvent,
    MouseAnyEvent,
    MouseSgrTransport,
    MouseUrxvtTransport,
    MouseUtf8Transport,
    ReverseVideo,
    Unknown(u16, bool),
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
    pub struct ModeFlags: u64 {
        const AUTO_WRAP               = 1 << 0;
        const ORIGIN                  = 1 << 1;
        const CURSOR_VISIBLE          = 1 << 2;
        const BRACKETED_PASTE         = 1 << 3;
        const ALTERNATE_SCREEN        = 1 << 4;
        const APPLICATION_KEYPAD      = 1 << 5;
        const APPLICATION_CURSOR      = 1 << 6;
        const LEFT_RIGHT_MARGIN       = 1 << 7;
        const INSERT                  = 1 << 8;
        const SEND_RECEIVE            = 1 << 9;
        const FOCUS_REPORTING         = 1 << 10;
        const SYNCHRONIZED_OUTPUT     = 1 << 11;
        const MOUSE_X10               = 1 << 12;
        const MOUSE_NORMAL            = 1 << 13;
        const MOUSE_BUTTON_EVENT      = 1 << 14;
        const MOUSE_ANY_EVENT         = 1 << 15;
        const MOUSE_SGR_TRANSPORT     = 1 << 16;
        const MOUSE_URXVT_TRANSPORT   = 1 << 17;
        const MOUSE_UTF8_TRANSPORT    = 1 << 18;
        const REVERSE_VIDEO           = 1 << 19;
    }
}

impl ModeFlags {
    pub fn bit_for(mode: Mode) -> Option<ModeFlags> {
        Some(match mode {
            Mode::AutoWrap => ModeFlags::AUTO_WRAP,
            Mode::Origin => ModeFlags::ORIGIN,
            Mode::CursorVisible => ModeFlags::CURSOR_VISIBLE,
            Mode::BracketedPaste => ModeFlags::BRACKETED_PASTE,
            Mode::AlternateScreenBuffer | Mode::AlternateScreenBufferSaveCursor => {
                ModeFlags::ALTERNATE_SCREEN
            }
            Mode::ApplicationKeypad => ModeFlags::APPLICATION_KEYPAD,
            Mode::ApplicationCursor => ModeFlags::APPLICATION_CURSOR,
            Mode::LeftRightMargin => ModeFlags::LEFT_RIGHT_MARGIN,
            Mode::Insert => ModeFlags::INSERT,
            Mode::SendReceive => ModeFlags::SEND_RECEIVE,
            Mode::FocusReporting => ModeFlags::FOCUS_REPORTING,
            Mode::SynchronizedOutput => ModeFlags::SYNCHRONIZED_OUTPUT,
            Mode::MouseX10 => ModeFlags::MOUSE_X10,
            Mode::MouseNormal => ModeFlags::MOUSE_NORMAL,
            Mode::MouseButtonEvent => ModeFlags::MOUSE_BUTTON_EVENT,
            Mode::MouseAnyEvent => ModeFlags::MOUSE_ANY_EVENT,
            Mode::MouseSgrTransport => ModeFlags::MOUSE_SGR_TRANSPORT,
            Mode::MouseUrxvtTransport => ModeFlags::MOUSE_URXVT_TRANSPORT,
            Mode::MouseUtf8Transport => ModeFlags::MOUSE_UTF8_TRANSPORT,
            Mode::ReverseVideo => ModeFlags::REVERSE_VIDEO,
            Mode::Unknown(..) => return None,
        })
    }
}

/// Terminal mode table. Recognized modes live in a `ModeFlags` bitset;
/// unrecognized DEC-private/ANSI numbers are tracked in `unknown` so DECRQM
/// can still report a (non-authoritative) answer for them.
#[derive(Debug, Clone, Default)]
pub struct Modes {
    flags: ModeFlags,
    unknown: std::collections::HashMap<(u16, bool), bool>,
}

impl Modes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, mode: Mode, enabled: bool) {
        match ModeFlags::bit_for(mode) {
            Some(bit) => self.flags.set(bit, enabled),
            None => {
                if let Mode::Unknown(num, private) = mode {
                    self.unknown.insert((num, private), enabled);
                }
            }
        }
    }

    pub fn is_set(&self, mode: Mode) -> bool {
        match ModeFlags::bit_for(mode) {
            Some(bit) => self.flags.contains(bit),
            None => {
                if let Mode::Unknown(num, private) = mode {
                    *self.unknown.get(&(num, private)).unwrap_or(&false)
                } else {
                    false
                }
            }
        }
    }

    pub fn flags(&self) -> ModeFlags {
        self.flags
    }
}

/// A snapshot of terminal state exposed to read-only viewport consumers
/// (renderers). Does not borrow the live screen — a cheap-to-clone copy of
/// the bits a frontend needs to decide whether/what to redraw.
#[derive(Debug, Clone)]
pub struct TerminalSnapshot {
    pub size: Size,
    pub cursor: Position,
    pub cursor_visible: bool,
    pub alternate_screen_active: bool,
}
