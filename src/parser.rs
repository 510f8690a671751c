//! Decoding of ANSI-styled art files into styled lines.

use crate::color::Color;
use crate::data::{Style, StyledLine, StyledRun};

/// Error type for decoding operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line is not valid UTF-8
    InvalidUtf8 { line: usize },
    /// An escape sequence runs off the end of its line
    UnterminatedEscape { line: usize, column: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidUtf8 { line } => {
                write!(f, "Invalid UTF-8 on line {}", line + 1)
            }
            ParseError::UnterminatedEscape { line, column } => {
                write!(
                    f,
                    "Unterminated escape sequence on line {} at byte {}",
                    line + 1,
                    column
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;

/// Decode a whole `.ans` file into lines.
///
/// Each line starts from the default style; styles do not carry across
/// line breaks. A trailing newline does not produce an extra empty line.
///
/// ## Example
///
/// ```rust
/// use pipe_strip_view::{parse_ansi, Color};
///
/// let lines = parse_ansi(b"\x1b[31mAAA\x1b[34mBBB\x1b[0m\n").unwrap();
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0].runs().len(), 2);
/// assert_eq!(lines[0].runs()[0].style.fg, Some(Color::Indexed(1)));
/// ```
pub fn parse_ansi(data: &[u8]) -> Result<Vec<StyledLine>, ParseError> {
    let mut lines = Vec::new();
    let mut rest = data;
    let mut line_no = 0;

    while !rest.is_empty() {
        let (raw, next) = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, &rest[rest.len()..]),
        };
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let text = std::str::from_utf8(raw).map_err(|_| ParseError::InvalidUtf8 { line: line_no })?;
        lines.push(parse_ansi_line(text, line_no)?);
        rest = next;
        line_no += 1;
    }

    Ok(lines)
}

/// Decode one line of ANSI-styled text.
///
/// `line_no` is only used for error reporting.
pub fn parse_ansi_line(text: &str, line_no: usize) -> Result<StyledLine, ParseError> {
    let bytes = text.as_bytes();
    let mut line = StyledLine::new();
    let mut style = Style::default();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != ESC {
            // ESC is single-byte ASCII, so slicing at it never splits a char.
            let start = i;
            while i < bytes.len() && bytes[i] != ESC {
                i += 1;
            }
            line.push(StyledRun::new(&text[start..i], style));
            continue;
        }

        let start = i;
        let unterminated = ParseError::UnterminatedEscape {
            line: line_no,
            column: start,
        };
        match bytes.get(i + 1) {
            None => return Err(unterminated),
            Some(b'[') => {
                let params_start = i + 2;
                let mut j = params_start;
                while j < bytes.len() && !(0x40..=0x7E).contains(&bytes[j]) {
                    j += 1;
                }
                if j >= bytes.len() {
                    return Err(unterminated);
                }
                if bytes[j] == b'm' {
                    apply_sgr(&mut style, &text[params_start..j]);
                }
                i = j + 1;
            }
            Some(b']') | Some(b'P') | Some(b'^') | Some(b'_') => {
                i = skip_string_terminated(bytes, i + 2).ok_or(unterminated)?;
            }
            Some(_) => {
                // nF sequences carry intermediate bytes before their final byte
                let mut j = i + 1;
                while j < bytes.len() && (0x20..=0x2F).contains(&bytes[j]) {
                    j += 1;
                }
                if j >= bytes.len() {
                    return Err(unterminated);
                }
                // A non-ASCII final byte is the start of a character, not part
                // of the escape; drop the stray ESC and keep the character.
                i = if bytes[j].is_ascii() { j + 1 } else { j };
            }
        }
    }

    Ok(line)
}

/// Skip to the end of an OSC/DCS-style string (BEL or ESC `\`).
fn skip_string_terminated(bytes: &[u8], mut i: usize) -> Option<usize> {
    while i < bytes.len() {
        match bytes[i] {
            BEL => return Some(i + 1),
            ESC if bytes.get(i + 1) == Some(&b'\\') => return Some(i + 2),
            _ => i += 1,
        }
    }
    None
}

/// Apply the parameters of one SGR (`ESC [ ... m`) sequence.
///
/// Unknown parameters are ignored. An empty parameter means 0.
fn apply_sgr(style: &mut Style, params: &str) {
    let codes: Vec<u16> = if params.is_empty() {
        vec![0]
    } else {
        params
            .split([';', ':'])
            .map(|p| {
                if p.is_empty() {
                    0
                } else {
                    // out of range or garbage: matches no code below
                    p.parse().unwrap_or(u16::MAX)
                }
            })
            .collect()
    };

    let mut k = 0;
    while k < codes.len() {
        let code = codes[k];
        match code {
            0 => *style = Style::default(),
            1 => style.bold = true,
            2 => style.dim = true,
            3 => style.italic = true,
            4 => style.underline = true,
            7 => style.reverse = true,
            22 => {
                style.bold = false;
                style.dim = false;
            }
            23 => style.italic = false,
            24 => style.underline = false,
            27 => style.reverse = false,
            30..=37 => style.fg = Some(Color::Indexed((code - 30) as u8)),
            39 => style.fg = None,
            40..=47 => style.bg = Some(Color::Indexed((code - 40) as u8)),
            49 => style.bg = None,
            90..=97 => style.fg = Some(Color::Indexed((code - 90 + 8) as u8)),
            100..=107 => style.bg = Some(Color::Indexed((code - 100 + 8) as u8)),
            38 | 48 => {
                let (color, used) = extended_color(&codes[k + 1..]);
                if let Some(color) = color {
                    if code == 38 {
                        style.fg = Some(color);
                    } else {
                        style.bg = Some(color);
                    }
                }
                k += used;
            }
            _ => {}
        }
        k += 1;
    }
}

/// Parse the tail of a `38;...`/`48;...` sequence.
///
/// Returns the color (if well formed) and how many parameters it consumed.
fn extended_color(rest: &[u16]) -> (Option<Color>, usize) {
    let channel = |v: u16| u8::try_from(v).ok();
    match rest.first() {
        Some(5) => match rest.get(1) {
            Some(&n) => (channel(n).map(Color::Indexed), 2),
            None => (None, 1),
        },
        Some(2) if rest.len() >= 4 => {
            let rgb = channel(rest[1])
                .zip(channel(rest[2]))
                .zip(channel(rest[3]))
                .map(|((r, g), b)| Color::Rgb(r, g, b));
            (rgb, 4)
        }
        Some(_) => (None, rest.len()),
        None => (None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_text_single_run() {
        let line = parse_ansi_line("hello", 0).unwrap();
        assert_eq!(line.runs(), &[StyledRun::new("hello", Style::default())]);
    }

    #[test]
    fn basic_and_bright_colors() {
        let line = parse_ansi_line("\x1b[31;42mA\x1b[91;102mB", 0).unwrap();
        let runs = line.runs();
        assert_eq!(runs[0].style.fg, Some(Color::Indexed(1)));
        assert_eq!(runs[0].style.bg, Some(Color::Indexed(2)));
        assert_eq!(runs[1].style.fg, Some(Color::Indexed(9)));
        assert_eq!(runs[1].style.bg, Some(Color::Indexed(10)));
    }

    #[test]
    fn truecolor_and_256() {
        let line = parse_ansi_line("\x1b[38;2;250;166;173;48;5;208mX", 0).unwrap();
        let style = line.runs()[0].style;
        assert_eq!(style.fg, Some(Color::Rgb(250, 166, 173)));
        assert_eq!(style.bg, Some(Color::Indexed(208)));
    }

    #[test]
    fn reset_and_attributes() {
        let line = parse_ansi_line("\x1b[1;4mA\x1b[22mB\x1b[mC", 0).unwrap();
        let runs = line.runs();
        assert_eq!(runs.len(), 3);
        assert!(runs[0].style.bold && runs[0].style.underline);
        assert!(!runs[1].style.bold && runs[1].style.underline);
        assert_eq!(runs[2].style, Style::default());
    }

    #[test]
    fn redundant_sequences_coalesce() {
        let line = parse_ansi_line("\x1b[31mAA\x1b[31mBB", 0).unwrap();
        assert_eq!(line.runs().len(), 1);
        assert_eq!(line.plain_text(), "AABB");
    }

    #[test]
    fn non_sgr_sequences_are_skipped() {
        let line = parse_ansi_line("\x1b[2KA\x1b]0;title\x07B\x1b(B", 0).unwrap();
        assert_eq!(line.plain_text(), "AB");
    }

    #[test]
    fn styles_reset_per_line() {
        let lines = parse_ansi(b"\x1b[31mA\r\nB\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].runs()[0].style, Style::default());
        assert_eq!(lines[1].plain_text(), "B");
    }

    #[test]
    fn unterminated_escape() {
        let err = parse_ansi(b"ok\nAB\x1b[31").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedEscape { line: 1, column: 2 });
        assert!(parse_ansi_line("\x1b", 0).is_err());
    }

    #[test]
    fn invalid_utf8() {
        let err = parse_ansi(b"fine\n\xff\xfe\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidUtf8 { line: 1 });
        assert_eq!(err.to_string(), "Invalid UTF-8 on line 2");
    }

    #[test]
    fn stray_escape_before_multibyte_char() {
        let line = parse_ansi_line("\x1bé", 0).unwrap();
        assert_eq!(line.plain_text(), "é");

        let line = parse_ansi_line("ok\x1b█\x1b(▌", 0).unwrap();
        assert_eq!(line.plain_text(), "ok█▌");
    }

    #[test]
    fn out_of_range_sgr_is_ignored() {
        let line = parse_ansi_line("\x1b[1;31;70000mX\x1b[4;99999mY", 0).unwrap();
        let runs = line.runs();
        assert!(runs[0].style.bold);
        assert_eq!(runs[0].style.fg, Some(Color::Indexed(1)));
        assert!(runs[1].style.bold && runs[1].style.underline);

        // empty parameters still reset
        let line = parse_ansi_line("\x1b[1mA\x1b[;4mB", 0).unwrap();
        assert!(!line.runs()[1].style.bold);
        assert!(line.runs()[1].style.underline);
    }

    #[test]
    fn block_glyphs_inside_sequences() {
        let line = parse_ansi_line("\x1b[3█1m▌\x1b]0;█\x07▐", 0).unwrap();
        assert_eq!(line.plain_text(), "▌▐");
    }

    fn ansi_soup() -> impl Strategy<Value = String> {
        let alphabet = vec![
            '\x1b', '\x07', '[', ']', '(', '\\', ';', ':', 'm', 'P', '0', '1', '3', '8', '9',
            'a', ' ', 'é', '█', '▌', '▐',
        ];
        prop::collection::vec(prop::sample::select(alphabet), 0..48)
            .prop_map(|chars| chars.into_iter().collect::<String>())
    }

    proptest! {
        #[test]
        fn arbitrary_text_never_panics(text in any::<String>()) {
            let _ = parse_ansi_line(&text, 0);
        }

        #[test]
        fn escape_heavy_text_never_panics(text in ansi_soup()) {
            if let Ok(line) = parse_ansi_line(&text, 0) {
                if !text.contains('\x1b') {
                    prop_assert_eq!(line.plain_text(), text);
                }
            }
        }
    }
}
