//! Input Encoder: turns host-level key/mouse events into the outbound byte
//! sequences a shell expects, honoring whichever cursor/keypad/mouse modes
//! are currently active. Types here are local to this crate — independent
//! of any GUI toolkit — so a host (the demo CLI, or an embedder) translates
//! its own event type into these before calling in.

use bitflags::bitflags;

use vtstream_common::types::{Mode, Modes};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        const SUPER = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Function(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    /// Motion while `_0` is held, `None` for a bare hover move.
    Move(Option<MouseButton>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// 1-based, matching `Position`.
    pub row: u16,
    pub col: u16,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackingLevel {
    X10,
    Normal,
    ButtonEvent,
    AnyEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Default,
    Sgr,
    Urxvt,
}

fn tracking_level(modes: &Modes) -> Option<TrackingLevel> {
    if modes.is_set(Mode::MouseAnyEvent) {
        Some(TrackingLevel::AnyEvent)
    } else if modes.is_set(Mode::MouseButtonEvent) {
        Some(TrackingLevel::ButtonEvent)
    } else if modes.is_set(Mode::MouseNormal) {
        Some(TrackingLevel::Normal)
    } else if modes.is_set(Mode::MouseX10) {
        Some(TrackingLevel::X10)
    } else {
        None
    }
}

fn transport(modes: &Modes) -> Transport {
    if modes.is_set(Mode::MouseSgrTransport) {
        Transport::Sgr
    } else if modes.is_set(Mode::MouseUrxvtTransport) {
        Transport::Urxvt
    } else {
        Transport::Default
    }
}

fn button_code(button: Option<MouseButton>, modifiers: Modifiers, is_motion: bool) -> u8 {
    let mut code = match button {
        Some(MouseButton::Left) => 0,
        Some(MouseButton::Middle) => 1,
        Some(MouseButton::Right) => 2,
        Some(MouseButton::WheelUp) => 64,
        Some(MouseButton::WheelDown) => 65,
        None => 3,
    };
    if modifiers.contains(Modifiers::SHIFT) {
        code += 4;
    }
    if modifiers.contains(Modifiers::ALT) {
        code += 8;
    }
    if modifiers.contains(Modifiers::CTRL) {
        code += 16;
    }
    if is_motion {
        code += 32;
    }
    code
}

/// Encodes host input into the bytes a PTY-attached process expects.
#[derive(Debug, Default)]
pub struct InputEncoder;

impl InputEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode_key(&self, ev: KeyEvent, modes: &Modes) -> Vec<u8> {
        let app_cursor = modes.is_set(Mode::ApplicationCursor);
        match ev.key {
            Key::Char(c) => encode_char(c, ev.modifiers),
            Key::Enter => b"\r".to_vec(),
            Key::Tab => {
                if ev.modifiers.contains(Modifiers::SHIFT) {
                    b"\x1b[Z".to_vec()
                } else {
                    b"\t".to_vec()
                }
            }
            Key::Backspace => vec![0x7f],
            Key::Escape => vec![0x1b],
            Key::Up => arrow(b'A', app_cursor, ev.modifiers),
            Key::Down => arrow(b'B', app_cursor, ev.modifiers),
            Key::Right => arrow(b'C', app_cursor, ev.modifiers),
            Key::Left => arrow(b'D', app_cursor, ev.modifiers),
            Key::Home => ss3_or_csi(b'H', app_cursor, ev.modifiers),
            Key::End => ss3_or_csi(b'F', app_cursor, ev.modifiers),
            Key::PageUp => tilde(5, ev.modifiers),
            Key::PageDown => tilde(6, ev.modifiers),
            Key::Insert => tilde(2, ev.modifiers),
            Key::Delete => tilde(3, ev.modifiers),
            Key::Function(n) => function_key(n, ev.modifiers),
        }
    }

    pub fn encode_mouse(&self, ev: MouseEvent, modes: &Modes) -> Vec<u8> {
        let Some(level) = tracking_level(modes) else { return Vec::new() };

        let is_motion = matches!(ev.kind, MouseEventKind::Move(_));
        if is_motion {
            let held = matches!(ev.kind, MouseEventKind::Move(Some(_)));
            if level == TrackingLevel::X10 || level == TrackingLevel::Normal {
                return Vec::new();
            }
            if level == TrackingLevel::ButtonEvent && !held {
                return Vec::new();
            }
        }
        if level == TrackingLevel::X10 && matches!(ev.kind, MouseEventKind::Release(_)) {
            return Vec::new();
        }

        let button = match ev.kind {
            MouseEventKind::Press(b) => Some(b),
            MouseEventKind::Release(b) => Some(b),
            MouseEventKind::Move(b) => b,
        };
        let is_release = matches!(ev.kind, MouseEventKind::Release(_));
        let code = button_code(button, ev.modifiers, is_motion);

        match transport(modes) {
            Transport::Sgr => {
                let suffix = if is_release { 'm' } else { 'M' };
                format!("\x1b[<{};{};{}{}", code, ev.col, ev.row, suffix).into_bytes()
            }
            Transport::Urxvt => {
                let code = if is_release { button_code(None, ev.modifiers, false) } else { code };
                format!("\x1b[{};{};{}M", code + 32, ev.col, ev.row).into_bytes()
            }
            Transport::Default => {
                let code = if is_release { button_code(None, ev.modifiers, false) } else { code };
                let mut out = vec![0x1b, b'[', b'M', 32 + code];
                out.push(32 + ev.col.min(223) as u8);
                out.push(32 + ev.row.min(223) as u8);
                out
            }
        }
    }

    /// Wraps pasted text in bracketed-paste markers when the mode is on,
    /// otherwise passes it through unescaped.
    pub fn encode_paste(&self, text: &str, modes: &Modes) -> Vec<u8> {
        if modes.is_set(Mode::BracketedPaste) {
            let mut out = b"\x1b[200~".to_vec();
            out.extend_from_slice(text.as_bytes());
            out.extend_from_slice(b"\x1b[201~");
            out
        } else {
            text.as_bytes().to_vec()
        }
    }
}

fn encode_char(c: char, modifiers: Modifiers) -> Vec<u8> {
    let mut buf = [0u8; 4];
    if modifiers.contains(Modifiers::CTRL) && c.is_ascii_alphabetic() {
        let byte = (c.to_ascii_uppercase() as u8) - b'A' + 1;
        return vec![byte];
    }
    let mut out = Vec::new();
    if modifiers.contains(Modifiers::ALT) {
        out.push(0x1b);
    }
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    out
}

fn modifier_param(modifiers: Modifiers) -> Option<u8> {
    if modifiers.is_empty() {
        return None;
    }
    let mut n = 1;
    if modifiers.contains(Modifiers::SHIFT) {
        n += 1;
    }
    if modifiers.contains(Modifiers::ALT) {
        n += 2;
    }
    if modifiers.contains(Modifiers::CTRL) {
        n += 4;
    }
    Some(n)
}

fn arrow(code: u8, app_cursor: bool, modifiers: Modifiers) -> Vec<u8> {
    match modifier_param(modifiers) {
        Some(n) => format!("\x1b[1;{}{}", n, code as char).into_bytes(),
        None if app_cursor => vec![0x1b, b'O', code],
        None => vec![0x1b, b'[', code],
    }
}

fn ss3_or_csi(code: u8, app_cursor: bool, modifiers: Modifiers) -> Vec<u8> {
    arrow(code, app_cursor, modifiers)
}

fn tilde(n: u8, modifiers: Modifiers) -> Vec<u8> {
    match modifier_param(modifiers) {
        Some(m) => format!("\x1b[{};{}~", n, m).into_bytes(),
        None => format!("\x1b[{}~", n).into_bytes(),
    }
}

fn function_key(n: u8, modifiers: Modifiers) -> Vec<u8> {
    if (1..=4).contains(&n) {
        let code = b'P' + (n - 1);
        return match modifier_param(modifiers) {
            Some(m) => format!("\x1b[1;{}{}", m, code as char).into_bytes(),
            None => vec![0x1b, b'O', code],
        };
    }
    let param = match n {
        5 => 15,
        6 => 17,
        7 => 18,
        8 => 19,
        9 => 20,
        10 => 21,
        11 => 23,
        12 => 24,
        _ => return Vec::new(),
    };
    tilde(param, modifiers)
}
