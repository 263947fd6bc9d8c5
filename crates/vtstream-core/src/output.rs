//! Byte-exact sequences the core emits back to the host: status replies
//! (CPR, DECXCPR, DA1/DA2), hyperlink markers, and SGR re-encoding with
//! diff-against-last-pen compression.

use vtstream_common::types::{CellAttributes, Color, Position, StyleFlags, UnderlineStyle};

/// Maximum CSI `m` parameters per emitted sequence before it splits into
/// another `ESC [ ... m`.
const MAX_SGR_PARAMS_PER_SEQUENCE: usize = 16;

pub fn cursor_position_report(pos: Position, extended: bool) -> String {
    if extended {
        format!("\x1b[?{};{};0R", pos.row, pos.column)
    } else {
        format!("\x1b[{};{}R", pos.row, pos.column)
    }
}

pub fn device_status_report() -> &'static [u8] {
    b"\x1b[0n"
}

/// VT525-conformant DA1 response.
pub fn primary_device_attributes() -> &'static [u8] {
    b"\x1b[?64;1;2;6;9;15;21;22c"
}

pub fn secondary_device_attributes() -> &'static [u8] {
    b"\x1b[>0;0;0c"
}

/// OSC 8 open marker. Pass `uri = ""` (via [`hyperlink_close`]) to close.
pub fn hyperlink_open(id: Option<&str>, uri: &str) -> String {
    match id {
        Some(id) => format!("\x1b]8;id={};{}\x1b\\", id, uri),
        None => format!("\x1b]8;;{}\x1b\\", uri),
    }
}

pub fn hyperlink_close() -> &'static str {
    "\x1b]8;;\x1b\\"
}

/// Tracks the last pen emitted as SGR so repeated writes with an unchanged
/// pen don't re-emit it. Reset on `resetHard`/RIS so the next write after a
/// reset always re-syncs fully rather than trusting a stale baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SgrEncoder {
    last: CellAttributes,
}

impl SgrEncoder {
    pub fn new() -> Self {
        Self { last: CellAttributes::default() }
    }

    pub fn reset(&mut self) {
        self.last = CellAttributes::default();
    }

    /// Returns the CSI `m` sequence(s) needed to move the remote pen state
    /// from the last-emitted pen to `pen`, or `None` if they already match.
    pub fn diff(&mut self, pen: CellAttributes) -> Option<String> {
        if pen == self.last {
            return None;
        }
        let params = if pen == CellAttributes::default() {
            vec!["0".to_string()]
        } else {
            sgr_params(self.last, pen)
        };
        self.last = pen;
        Some(chunk_params(&params))
    }
}

fn sgr_params(old: CellAttributes, new: CellAttributes) -> Vec<String> {
    let mut params = Vec::new();
    flag_param(&mut params, old, new, StyleFlags::BOLD, "1", "22");
    flag_param(&mut params, old, new, StyleFlags::FAINT, "2", "22");
    flag_param(&mut params, old, new, StyleFlags::ITALIC, "3", "23");
    flag_param(&mut params, old, new, StyleFlags::BLINKING, "5", "25");
    flag_param(&mut params, old, new, StyleFlags::INVERSE, "7", "27");
    flag_param(&mut params, old, new, StyleFlags::INVISIBLE, "8", "28");
    flag_param(&mut params, old, new, StyleFlags::CROSSED_OUT, "9", "29");
    flag_param(&mut params, old, new, StyleFlags::OVERLINE, "53", "55");
    flag_param(&mut params, old, new, StyleFlags::FRAMED, "51", "54");
    flag_param(&mut params, old, new, StyleFlags::ENCIRCLED, "52", "54");

    if old.underline_style != new.underline_style {
        params.push(underline_param(new.underline_style).to_string());
    }
    if old.fg_color != new.fg_color {
        params.extend(color_params(new.fg_color, ColorChannel::Foreground));
    }
    if old.bg_color != new.bg_color {
        params.extend(color_params(new.bg_color, ColorChannel::Background));
    }
    if old.underline_color != new.underline_color {
        params.extend(color_params(new.underline_color, ColorChannel::Underline));
    }
    params
}

fn flag_param(
    params: &mut Vec<String>,
    old: CellAttributes,
    new: CellAttributes,
    flag: StyleFlags,
    on: &str,
    off: &str,
) {
    let was = old.flags.contains(flag);
    let is = new.flags.contains(flag);
    if was != is {
        params.push(if is { on.to_string() } else { off.to_string() });
    }
}

fn underline_param(style: UnderlineStyle) -> &'static str {
    match style {
        UnderlineStyle::None => "24",
        UnderlineStyle::Single => "4",
        UnderlineStyle::Double => "21",
        UnderlineStyle::Curly => "4:3",
        UnderlineStyle::Dotted => "4:4",
        UnderlineStyle::Dashed => "4:5",
    }
}

enum ColorChannel {
    Foreground,
    Background,
    Underline,
}

fn color_params(color: Color, channel: ColorChannel) -> Vec<String> {
    let (base, default, extended) = match channel {
        ColorChannel::Foreground => (30, "39", 38),
        ColorChannel::Background => (40, "49", 48),
        ColorChannel::Underline => (0, "59", 58),
    };
    match color {
        Color::DefaultColor => vec![default.to_string()],
        Color::IndexedColor(i) if matches!(channel, ColorChannel::Underline) => {
            vec![extended.to_string(), "5".to_string(), i.to_string()]
        }
        Color::IndexedColor(i) => vec![(base + i as u32).to_string()],
        Color::BrightColor(i) if matches!(channel, ColorChannel::Underline) => {
            vec![extended.to_string(), "5".to_string(), (8 + i as u32).to_string()]
        }
        Color::BrightColor(i) => vec![(base + 60 + i as u32).to_string()],
        Color::RgbColor(r, g, b) => {
            vec![extended.to_string(), "2".to_string(), r.to_string(), g.to_string(), b.to_string()]
        }
    }
}

fn chunk_params(params: &[String]) -> String {
    let mut out = String::new();
    for chunk in params.chunks(MAX_SGR_PARAMS_PER_SEQUENCE) {
        out.push_str("\x1b[");
        out.push_str(&chunk.join(";"));
        out.push('m');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpr_matches_one_based_non_extended_format() {
        assert_eq!(cursor_position_report(Position::new(5, 10), false), "\x1b[5;10R");
    }

    #[test]
    fn decxcpr_uses_private_prefix_and_trailing_page() {
        assert_eq!(cursor_position_report(Position::new(5, 10), true), "\x1b[?5;10;0R");
    }

    #[test]
    fn sgr_encoder_skips_unchanged_pen() {
        let mut enc = SgrEncoder::new();
        assert!(enc.diff(CellAttributes::default()).is_none());
    }

    #[test]
    fn sgr_encoder_emits_bold_then_reset() {
        let mut enc = SgrEncoder::new();
        let mut pen = CellAttributes::default();
        pen.flags.insert(StyleFlags::BOLD);
        assert_eq!(enc.diff(pen).unwrap(), "\x1b[1m");
        assert_eq!(enc.diff(CellAttributes::default()).unwrap(), "\x1b[0m");
    }

    #[test]
    fn sgr_encoder_emits_truecolor_foreground() {
        let mut enc = SgrEncoder::new();
        let mut pen = CellAttributes::default();
        pen.fg_color = Color::RgbColor(10, 20, 30);
        assert_eq!(enc.diff(pen).unwrap(), "\x1b[38;2;10;20;30m");
    }

    #[test]
    fn sgr_params_split_beyond_sixteen_per_sequence() {
        let params: Vec<String> = (0..20).map(|n| n.to_string()).collect();
        let chunked = chunk_params(&params);
        assert_eq!(chunked.matches("\x1b[").count(), 2);
    }

    #[test]
    fn hyperlink_open_close_round_trip_contains_id_and_uri() {
        let open = hyperlink_open(Some("x"), "https://example.com");
        assert_eq!(open, "\x1b]8;id=x;https://example.com\x1b\\");
        assert_eq!(hyperlink_close(), "\x1b]8;;\x1b\\");
    }
}
