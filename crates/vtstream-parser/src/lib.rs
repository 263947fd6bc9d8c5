//! Byte-level VT parser and command builder.
//!
//! The byte-level state machine itself (Ground/Escape/CsiEntry/… and the
//! UTF-8 sub-DFA) is the published Paul Williams table implemented by the
//! `vte` crate; this module is the [`vte::Perform`] implementation that
//! turns its dispatch callbacks into [`vtstream_common::command::Command`]
//! values, keyed by (category, private marker, intermediate bytes, final
//! byte) exactly as `vte` surfaces them.

use base64::Engine;
use tracing::{trace, warn};
use vte::{Params, Parser as VteStateMachine, Perform};

use vtstream_common::command::{
    ClipboardSelector, Command, DynamicColorTarget, EraseMode, SgrAttr, StatusRequest,
};
use vtstream_common::traits::CommandSource;
use vtstream_common::types::{Charset, CharsetSlot, Color, Mode, UnderlineStyle};

/// Drives the `vte` state machine over a byte buffer and collects the
/// resulting [`Command`]s. Stateless across calls except for the `vte`
/// parser's own in-flight sequence (a CSI/OSC/DCS sequence may legally span
/// two `feed` calls if a PTY read splits it).
pub struct CommandBuilder {
    machine: VteStateMachine,
    performer: Performer,
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self {
            machine: VteStateMachine::new(),
            performer: Performer::default(),
        }
    }
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSource for CommandBuilder {
    fn feed(&mut self, data: &[u8]) -> Vec<Command> {
        self.performer.commands.clear();
        for &byte in data {
            self.machine.advance(&mut self.performer, byte);
        }
        std::mem::take(&mut self.performer.commands)
    }
}

#[derive(Default)]
struct Performer {
    commands: Vec<Command>,
}

impl Performer {
    fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// A movement/repeat count: CSI default-to-zero reads as 1, and 0 is
    /// never a meaningful count for these operations.
    fn count(params: &Params, index: usize) -> i32 {
        raw_group(params, index)
            .and_then(|g| g.first().copied())
            .filter(|&v| v != 0)
            .unwrap_or(1) as i32
    }

    /// A parameter where 0 is a meaningful, distinct value (erase modes,
    /// SGR codes) — defaults to `default` only when the group is absent.
    fn raw(params: &Params, index: usize, default: u16) -> u16 {
        raw_group(params, index).and_then(|g| g.first().copied()).unwrap_or(default)
    }

    fn is_private(intermediates: &[u8]) -> bool {
        intermediates.first() == Some(&b'?')
    }

    fn sgr_params(&self, params: &Params) -> Vec<SgrAttr> {
        let groups: Vec<&[u16]> = params.iter().collect();
        let mut out = Vec::with_capacity(groups.len());
        let mut i = 0;

        // A bare `CSI m` carries zero parameters and means Reset.
        if groups.is_empty() {
            out.push(SgrAttr::Reset);
            return out;
        }

        while i < groups.len() {
            let group = groups[i];
            let code = group.first().copied().unwrap_or(0);
            match code {
                0 => out.push(SgrAttr::Reset),
                1 => out.push(SgrAttr::Bold),
                2 => out.push(SgrAttr::Faint),
                3 => out.push(SgrAttr::Italic),
                4 => {
                    let style = match group.get(1).copied().unwrap_or(1) {
                        0 => UnderlineStyle::None,
                        2 => UnderlineStyle::Double,
                        3 => UnderlineStyle::Curly,
                        4 => UnderlineStyle::Dotted,
                        5 => UnderlineStyle::Dashed,
                        _ => UnderlineStyle::Single,
                    };
                    out.push(SgrAttr::Underline(style));
                }
                5 | 6 => out.push(SgrAttr::Blink),
                7 => out.push(SgrAttr::Inverse),
                8 => out.push(SgrAttr::Invisible),
                9 => out.push(SgrAttr::CrossedOut),
                21 => out.push(SgrAttr::Underline(UnderlineStyle::Double)),
                22 => {
                    out.push(SgrAttr::NoBold);
                    out.push(SgrAttr::NoFaint);
                }
                23 => out.push(SgrAttr::NoItalic),
                24 => out.push(SgrAttr::NoUnderline),
                25 => out.push(SgrAttr::NoBlink),
                27 => out.push(SgrAttr::NoInverse),
                28 => out.push(SgrAttr::NoInvisible),
                29 => out.push(SgrAttr::NoCrossedOut),
                30..=37 => out.push(SgrAttr::Foreground(Color::from_ansi((code - 30) as u8))),
                38 => {
                    if let Some((color, consumed)) = extended_color(&groups, i, group) {
                        out.push(SgrAttr::Foreground(color));
                        i += consumed;
                    } else {
                        warn!("malformed extended foreground SGR at param {}", i);
                    }
                }
                39 => out.push(SgrAttr::DefaultForeground),
                40..=47 => out.push(SgrAttr::Background(Color::from_ansi((code - 40) as u8))),
                48 => {
                    if let Some((color, consumed)) = extended_color(&groups, i, group) {
                        out.push(SgrAttr::Background(color));
                        i += consumed;
                    } else {
                        warn!("malformed extended background SGR at param {}", i);
                    }
                }
                49 => out.push(SgrAttr::DefaultBackground),
                50 => out.push(SgrAttr::NoFramed),
                51 => out.push(SgrAttr::Framed),
                52 => out.push(SgrAttr::Encircled),
                53 => out.push(SgrAttr::Overline),
                54 => {
                    out.push(SgrAttr::NoFramed);
                    out.push(SgrAttr::NoEncircled);
                }
                55 => out.push(SgrAttr::NoOverline),
                58 => {
                    if let Some((color, consumed)) = extended_color(&groups, i, group) {
                        out.push(SgrAttr::UnderlineColor(color));
                        i += consumed;
                    } else {
                        warn!("malformed extended underline-color SGR at param {}", i);
                    }
                }
                59 => out.push(SgrAttr::DefaultUnderlineColor),
                90..=97 => out.push(SgrAttr::Foreground(Color::from_ansi((code - 90 + 8) as u8))),
                100..=107 => {
                    out.push(SgrAttr::Background(Color::from_ansi((code - 100 + 8) as u8)))
                }
                other => trace!("unhandled SGR code: {}", other),
            }
            i += 1;
        }

        out
    }
}

/// Resolves SGR 38/48/58's extended-color payload, accepting both the
/// colon sub-parameter form (`38:2::r:g:b`, all within one group) and the
/// legacy semicolon form (`38;2;r;g;b`, spread across following groups).
/// Returns the color and how many *top-level* groups (including this one)
/// it consumed.
fn extended_color(groups: &[&[u16]], index: usize, this_group: &[u16]) -> Option<(Color, usize)> {
    // Colon sub-parameter form: everything lives in `this_group`.
    if this_group.len() > 1 {
        return match this_group[1] {
            5 if this_group.len() >= 3 => Some((Color::IndexedColor(this_group[2] as u8), 1)),
            // `38:2::r:g:b` — an empty color-space sub-param slot at index 2.
            // Must be checked before the 5-element form below: a 6-element
            // group also satisfies `>= 5` and would otherwise read one slot short.
            2 if this_group.len() >= 6 => Some((
                Color::RgbColor(this_group[3] as u8, this_group[4] as u8, this_group[5] as u8),
                1,
            )),
            2 if this_group.len() >= 5 => Some((
                Color::RgbColor(this_group[2] as u8, this_group[3] as u8, this_group[4] as u8),
                1,
            )),
            _ => None,
        };
    }

    // Legacy semicolon form: the selector and its args are separate groups.
    let selector = *groups.get(index + 1)?.first()?;
    match selector {
        5 => {
            let idx = *groups.get(index + 2)?.first()?;
            Some((Color::IndexedColor(idx as u8), 3))
        }
        2 => {
            let r = *groups.get(index + 2)?.first()?;
            let g = *groups.get(index + 3)?.first()?;
            let b = *groups.get(index + 4)?.first()?;
            Some((Color::RgbColor(r as u8, g as u8, b as u8), 5))
        }
        _ => None,
    }
}

fn raw_group<'p>(params: &'p Params, index: usize) -> Option<&'p [u16]> {
    params.iter().nth(index)
}

fn dec_private_mode(num: u16) -> Mode {
    match num {
        1 => Mode::ApplicationCursor,
        5 => Mode::ReverseVideo,
        6 => Mode::Origin,
        7 => Mode::AutoWrap,
        9 => Mode::MouseX10,
        25 => Mode::CursorVisible,
        47 => Mode::AlternateScreenBuffer,
        69 => Mode::LeftRightMargin,
        1000 => Mode::MouseNormal,
        1002 => Mode::MouseButtonEvent,
        1003 => Mode::MouseAnyEvent,
        1004 => Mode::FocusReporting,
        1005 => Mode::MouseUtf8Transport,
        1006 => Mode::MouseSgrTransport,
        1015 => Mode::MouseUrxvtTransport,
        1047 => Mode::AlternateScreenBuffer,
        1049 => Mode::AlternateScreenBufferSaveCursor,
        2004 => Mode::BracketedPaste,
        2026 => Mode::SynchronizedOutput,
        other => Mode::Unknown(other, true),
    }
}

fn ansi_mode(num: u16) -> Mode {
    match num {
        4 => Mode::Insert,
        12 => Mode::SendReceive,
        other => Mode::Unknown(other, false),
    }
}

impl Perform for Performer {
    fn print(&mut self, c: char) {
        self.push(Command::Print(c));
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            0x00 => {}
            0x07 => self.push(Command::Bell),
            0x08 => self.push(Command::Backspace),
            0x09 => self.push(Command::HorizontalTab),
            // VerticalTab/FormFeed land here like xterm treats them: as a
            // plain line feed, not a screen clear.
            0x0A | 0x0B | 0x0C => self.push(Command::LineFeed),
            0x0D => self.push(Command::CarriageReturn),
            other => trace!("unhandled C0/C1 execute byte: 0x{:02x}", other),
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, action: char) {
        trace!("DCS hook ignored (unsupported): {:?}", action);
    }

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, params: &[&[u8]], _bell_terminated: bool) {
        if params.is_empty() {
            return;
        }
        let Some(osc_num) =
            std::str::from_utf8(params[0]).ok().and_then(|s| s.parse::<u32>().ok())
        else {
            warn!("malformed OSC numeric code");
            return;
        };

        match osc_num {
            0 | 2 => {
                if let Some(title) = params.get(1).and_then(|p| std::str::from_utf8(p).ok()) {
                    self.push(Command::SetWindowTitle(title.to_string()));
                    if osc_num == 0 {
                        self.push(Command::SetIconName(title.to_string()));
                    }
                }
            }
            1 => {
                if let Some(name) = params.get(1).and_then(|p| std::str::from_utf8(p).ok()) {
                    self.push(Command::SetIconName(name.to_string()));
                }
            }
            4 => self.dispatch_palette(params),
            8 => self.dispatch_hyperlink(params),
            9 => {
                if let Some(body) = params.get(1).and_then(|p| std::str::from_utf8(p).ok()) {
                    self.push(Command::Notify { title: String::new(), body: body.to_string() });
                }
            }
            10 | 11 | 12 => self.dispatch_dynamic_color(osc_num, params),
            52 => self.dispatch_clipboard(params),
            104 => self.push(Command::ResetDynamicColor(DynamicColorTarget::Palette(0))),
            110 => self.push(Command::ResetDynamicColor(DynamicColorTarget::Foreground)),
            111 => self.push(Command::ResetDynamicColor(DynamicColorTarget::Background)),
            112 => self.push(Command::ResetDynamicColor(DynamicColorTarget::CursorColor)),
            777 => self.dispatch_notify_777(params),
            other => trace!("unhandled OSC code: {}", other),
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if ignore {
            return;
        }
        let private = Self::is_private(intermediates);

        match action {
            'A' => self.push(Command::CursorUp(Self::count(params, 0))),
            'B' | 'e' => self.push(Command::CursorDown(Self::count(params, 0))),
            'C' | 'a' => self.push(Command::CursorForward(Self::count(params, 0))),
            'D' => self.push(Command::CursorBack(Self::count(params, 0))),
            'E' => self.push(Command::CursorNextLine(Self::count(params, 0))),
            'F' => self.push(Command::CursorPreviousLine(Self::count(params, 0))),
            'G' | '`' => self.push(Command::CursorToColumn(Self::count(params, 0))),
            'd' => self.push(Command::CursorToRow(Self::count(params, 0))),
            'H' | 'f' => self.push(Command::MoveCursorTo {
                row: Self::count(params, 0),
                col: Self::count(params, 1),
            }),
            'I' => self.push(Command::CursorForwardTab(Self::count(params, 0))),
            'Z' => self.push(Command::CursorBackwardTab(Self::count(params, 0))),

            'J' => self.push(Command::EraseDisplay(erase_mode(Self::raw(params, 0, 0)))),
            'K' => self.push(Command::EraseLine(erase_mode(Self::raw(params, 0, 0)))),
            'X' => self.push(Command::EraseCharacters(Self::count(params, 0))),
            '@' => self.push(Command::InsertCharacters(Self::count(params, 0))),
            'P' => self.push(Command::DeleteCharacters(Self::count(params, 0))),
            'L' => self.push(Command::InsertLines(Self::count(params, 0))),
            'M' => self.push(Command::DeleteLines(Self::count(params, 0))),

            'S' => self.push(Command::ScrollUp(Self::count(params, 0))),
            'T' => self.push(Command::ScrollDown(Self::count(params, 0))),

            'm' if private => self.dispatch_sgr_mouse_or_noop(params),
            'm' => {
                let attrs = self.sgr_params(params);
                self.push(Command::SetGraphicRendition(attrs));
            }

            'h' => self.dispatch_mode(params, private, true),
            'l' => self.dispatch_mode(params, private, false),

            's' if !private && params.iter().count() == 2 => {
                let left = Self::count(params, 0);
                let right = Self::count(params, 1);
                self.push(Command::SetLeftRightMargins { left, right });
            }
            's' => self.push(Command::SaveCursor),
            'u' => self.push(Command::RestoreCursor),

            'r' if !private => {
                let top = Self::count(params, 0);
                let bottom =
                    if params.iter().count() >= 2 { Self::count(params, 1) } else { top.max(1) };
                self.push(Command::SetTopBottomMargins { top, bottom });
            }

            'g' => match Self::raw(params, 0, 0) {
                3 => self.push(Command::ClearAllTabStops),
                _ => self.push(Command::ClearTabStop),
            },

            'n' if private => {
                if Self::raw(params, 0, 0) == 6 {
                    self.push(Command::Request(StatusRequest::CursorPositionReport {
                        extended: true,
                    }));
                }
            }
            'n' => match Self::raw(params, 0, 0) {
                5 => self.push(Command::Request(StatusRequest::DeviceStatusReport)),
                6 => self.push(Command::Request(StatusRequest::CursorPositionReport {
                    extended: false,
                })),
                _ => {}
            },

            'c' if intermediates.first() == Some(&b'>') => {
                self.push(Command::Request(StatusRequest::SecondaryDeviceAttributes))
            }
            'c' => self.push(Command::Request(StatusRequest::PrimaryDeviceAttributes)),

            other => trace!("unhandled CSI final byte: {:?}", other),
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, byte: u8) {
        if ignore {
            return;
        }
        if let Some(&marker) = intermediates.first() {
            if let Some(slot) = charset_slot(marker) {
                self.push(Command::DesignateCharset(slot, charset_for(byte)));
                return;
            }
        }
        match byte {
            b'D' => self.push(Command::LineFeed),
            b'E' => self.push(Command::NextLine),
            b'H' => self.push(Command::SetTabStop),
            b'M' => self.push(Command::ReverseLineFeed),
            b'c' => self.push(Command::ResetHard),
            b'7' => self.push(Command::SaveCursor),
            b'8' => self.push(Command::RestoreCursor),
            b'=' => self.push(Command::SetMode(Mode::ApplicationKeypad, true)),
            b'>' => self.push(Command::SetMode(Mode::ApplicationKeypad, false)),
            other => trace!("unhandled ESC final byte: 0x{:02x}", other),
        }
    }
}

impl Performer {
    fn dispatch_mode(&mut self, params: &Params, private: bool, enabled: bool) {
        for group in params.iter() {
            let Some(&num) = group.first() else { continue };
            if private && num == 1048 {
                self.push(if enabled { Command::SaveCursor } else { Command::RestoreCursor });
                continue;
            }
            if private && num == 1049 {
                if enabled {
                    self.push(Command::SaveCursor);
                }
                self.push(Command::SetMode(Mode::AlternateScreenBufferSaveCursor, enabled));
                if !enabled {
                    self.push(Command::RestoreCursor);
                }
                continue;
            }
            let mode = if private { dec_private_mode(num) } else { ansi_mode(num) };
            self.push(Command::SetMode(mode, enabled));
        }
    }

    /// Some terminals send mouse-tracking configuration through private CSI
    /// `m` variants outside the SGR namespace; this core has no use for them
    /// beyond not corrupting the pen, so they're absorbed.
    fn dispatch_sgr_mouse_or_noop(&mut self, _params: &Params) {
        trace!("ignoring private-marker CSI 'm' sequence");
    }

    fn dispatch_palette(&mut self, params: &[&[u8]]) {
        let Some(index_str) = params.get(1).and_then(|p| std::str::from_utf8(p).ok()) else {
            return;
        };
        let Ok(index) = index_str.parse::<u8>() else { return };
        let target = DynamicColorTarget::Palette(index);
        match params.get(2).and_then(|p| std::str::from_utf8(p).ok()) {
            Some("?") => self.push(Command::QueryDynamicColor(target)),
            Some(spec) => self.push(Command::SetDynamicColor(target, spec.to_string())),
            None => {}
        }
    }

    fn dispatch_hyperlink(&mut self, params: &[&[u8]]) {
        if params.len() < 3 {
            return;
        }
        let Ok(uri) = std::str::from_utf8(params[2]) else { return };
        let id = std::str::from_utf8(params[1]).ok().and_then(|param_str| {
            param_str
                .split(':')
                .find(|p| p.starts_with("id="))
                .map(|p| p.trim_start_matches("id=").to_string())
        });
        if uri.is_empty() {
            self.push(Command::Hyperlink { id: None, uri: String::new() });
        } else {
            self.push(Command::Hyperlink { id, uri: uri.to_string() });
        }
    }

    fn dispatch_dynamic_color(&mut self, osc_num: u32, params: &[&[u8]]) {
        let target = match osc_num {
            10 => DynamicColorTarget::Foreground,
            11 => DynamicColorTarget::Background,
            _ => DynamicColorTarget::CursorColor,
        };
        match params.get(1).and_then(|p| std::str::from_utf8(p).ok()) {
            Some("?") => self.push(Command::QueryDynamicColor(target)),
            Some(spec) => self.push(Command::SetDynamicColor(target, spec.to_string())),
            None => {}
        }
    }

    fn dispatch_clipboard(&mut self, params: &[&[u8]]) {
        if params.len() < 3 {
            return;
        }
        let selector = match params[1].first() {
            Some(b'p') => ClipboardSelector::Primary,
            Some(b's') => ClipboardSelector::Secondary,
            _ => ClipboardSelector::Clipboard,
        };
        if params[2] == b"?" {
            trace!("OSC 52 clipboard query unsupported");
            return;
        }
        let Ok(data) = base64::engine::general_purpose::STANDARD.decode(params[2]) else {
            warn!("malformed base64 in OSC 52");
            return;
        };
        self.push(Command::CopyToClipboard { selector, data });
    }

    fn dispatch_notify_777(&mut self, params: &[&[u8]]) {
        if params.len() < 2 || params[1] != b"notify" {
            return;
        }
        let title = params.get(2).and_then(|p| std::str::from_utf8(p).ok()).unwrap_or("");
        let body = params.get(3).and_then(|p| std::str::from_utf8(p).ok()).unwrap_or("");
        self.push(Command::Notify { title: title.to_string(), body: body.to_string() });
    }
}

fn erase_mode(code: u16) -> EraseMode {
    match code {
        1 => EraseMode::ToStart,
        2 => EraseMode::All,
        3 => EraseMode::AllAndScrollback,
        _ => EraseMode::ToEnd,
    }
}

fn charset_slot(marker: u8) -> Option<CharsetSlot> {
    match marker {
        b'(' => Some(CharsetSlot::G0),
        b')' => Some(CharsetSlot::G1),
        b'*' => Some(CharsetSlot::G2),
        b'+' => Some(CharsetSlot::G3),
        _ => None,
    }
}

fn charset_for(byte: u8) -> Charset {
    match byte {
        b'0' => Charset::DecSpecialGraphics,
        b'A' => Charset::Uk,
        _ => Charset::Ascii,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bytes: &[u8]) -> Vec<Command> {
        CommandBuilder::new().feed(bytes)
    }

    #[test]
    fn plain_text_prints_each_char() {
        let cmds = parse(b"Hi");
        assert_eq!(cmds, vec![Command::Print('H'), Command::Print('i')]);
    }

    #[test]
    fn cursor_position_defaults_to_one_one() {
        let cmds = parse(b"\x1b[H");
        assert_eq!(cmds, vec![Command::MoveCursorTo { row: 1, col: 1 }]);
    }

    #[test]
    fn cursor_position_explicit() {
        let cmds = parse(b"\x1b[10;20H");
        assert_eq!(cmds, vec![Command::MoveCursorTo { row: 10, col: 20 }]);
    }

    #[test]
    fn dec_private_cursor_visible() {
        let cmds = parse(b"\x1b[?25h");
        assert_eq!(cmds, vec![Command::SetMode(Mode::CursorVisible, true)]);
        let cmds = parse(b"\x1b[?25l");
        assert_eq!(cmds, vec![Command::SetMode(Mode::CursorVisible, false)]);
    }

    #[test]
    fn sgr_rgb_foreground() {
        let cmds = parse(b"\x1b[38;2;10;20;30m");
        assert_eq!(
            cmds,
            vec![Command::SetGraphicRendition(vec![SgrAttr::Foreground(Color::RgbColor(
                10, 20, 30
            ))])]
        );
    }

    #[test]
    fn sgr_rgb_foreground_colon_subparams() {
        let cmds = parse(b"\x1b[38:2::10:20:30m");
        assert_eq!(
            cmds,
            vec![Command::SetGraphicRendition(vec![SgrAttr::Foreground(Color::RgbColor(
                10, 20, 30
            ))])]
        );
    }

    #[test]
    fn sgr_indexed_256() {
        let cmds = parse(b"\x1b[38;5;123m");
        assert_eq!(
            cmds,
            vec![Command::SetGraphicRendition(vec![SgrAttr::Foreground(Color::IndexedColor(
                123
            ))])]
        );
    }

    #[test]
    fn hyperlink_with_id() {
        let cmds = parse(b"\x1b]8;id=x;https://example.com\x1b\\");
        assert_eq!(
            cmds,
            vec![Command::Hyperlink {
                id: Some("x".to_string()),
                uri: "https://example.com".to_string()
            }]
        );
    }

    #[test]
    fn hyperlink_reset_on_empty_uri() {
        let cmds = parse(b"\x1b]8;;\x1b\\");
        assert_eq!(cmds, vec![Command::Hyperlink { id: None, uri: String::new() }]);
    }

    #[test]
    fn clipboard_base64_roundtrip() {
        let cmds = parse(b"\x1b]52;c;aGVsbG8=\x07");
        assert_eq!(
            cmds,
            vec![Command::CopyToClipboard {
                selector: ClipboardSelector::Clipboard,
                data: b"hello".to_vec()
            }]
        );
    }

    #[test]
    fn erase_display_all() {
        let cmds = parse(b"\x1b[2J");
        assert_eq!(cmds, vec![Command::EraseDisplay(EraseMode::All)]);
    }

    #[test]
    fn malformed_csi_is_absorbed_not_fatal() {
        let cmds = parse(b"\x1b[9999999999999999999999999q");
        assert!(cmds.is_empty());
    }

    #[test]
    fn device_attributes_primary_vs_secondary() {
        let cmds = parse(b"\x1b[c");
        assert_eq!(cmds, vec![Command::Request(StatusRequest::PrimaryDeviceAttributes)]);
        let cmds = parse(b"\x1b[>c");
        assert_eq!(cmds, vec![Command::Request(StatusRequest::SecondaryDeviceAttributes)]);
    }

    #[test]
    fn decxcpr_extended_request() {
        let cmds = parse(b"\x1b[?6n");
        assert_eq!(
            cmds,
            vec![Command::Request(StatusRequest::CursorPositionReport { extended: true })]
        );
    }
}
