//! Colors and the named palette used by the strip artwork.

/// A terminal color as decoded from SGR parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Palette index: 0-15 are the basic/bright colors, 16-255 the extended cube.
    Indexed(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Convert to an RGB triple. Indexed colors use the xterm defaults.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Indexed(i) => indexed_to_rgb(i),
        }
    }

    /// CSS `rgb(r,g,b)` form, handy for debugging output.
    pub fn css(self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("rgb({r},{g},{b})")
    }
}

const BASIC: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

fn indexed_to_rgb(i: u8) -> (u8, u8, u8) {
    match i {
        0..=15 => BASIC[i as usize],
        16..=231 => {
            let n = i - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            (level(n / 36), level((n / 6) % 6), level(n % 6))
        }
        _ => {
            let v = 8 + (i - 232) * 10;
            (v, v, v)
        }
    }
}

/// Named colors of the strip artwork.
pub mod palette {
    use super::Color;

    pub const PEN: Color = Color::Rgb(0x00, 0x00, 0x00);
    pub const WALLPAPER: Color = Color::Rgb(0xfa, 0xa6, 0xad);
    pub const CARPET: Color = Color::Rgb(0x3c, 0x66, 0x02);
    pub const CAT: Color = Color::Rgb(0xfa, 0xa8, 0x17);
    pub const CAT_MOUTH: Color = Color::Rgb(0xfd, 0xff, 0x7a);
    pub const CAT_NOSE: Color = Color::Rgb(0xff, 0xc2, 0xd6);
    pub const SKIN: Color = Color::Rgb(0xfc, 0xe9, 0xbb);
    pub const HAIR: Color = Color::Rgb(0xa9, 0x43, 0x00);
    pub const SHOE: Color = Color::Rgb(0xa9, 0x43, 0x00);
    pub const SHIRT: Color = Color::Rgb(0x7b, 0xff, 0xff);
    pub const CHAIR: Color = Color::Rgb(0x90, 0xa8, 0xfe);
    pub const CHAIR_SHADOW: Color = Color::Rgb(0x5c, 0x8a, 0xed);
    pub const TABLE: Color = Color::Rgb(0xb1, 0x91, 0x87);
    pub const TABLE_SHADOW: Color = Color::Rgb(0x9c, 0x5f, 0x56);
    pub const PAPER: Color = Color::Rgb(0xfd, 0xff, 0xfd);
    pub const SEQUEL_WALLPAPER: Color = Color::Rgb(0x84, 0xfe, 0xb3);
    pub const SEQUEL_CARPET: Color = Color::Rgb(0x14, 0x92, 0xfc);
    pub const SEQUEL_SMOKE: Color = Color::Rgb(0xdd, 0xe6, 0xe4);
    pub const PIPE: Color = Color::Rgb(0x92, 0x3d, 0xfd);

    /// Look up a palette entry by its snake_case name.
    pub fn named(name: &str) -> Option<Color> {
        let color = match name {
            "pen" => PEN,
            "wallpaper" => WALLPAPER,
            "carpet" => CARPET,
            "cat" => CAT,
            "cat_mouth" => CAT_MOUTH,
            "cat_nose" => CAT_NOSE,
            "skin" => SKIN,
            "hair" => HAIR,
            "shoe" => SHOE,
            "shirt" => SHIRT,
            "chair" => CHAIR,
            "chair_shadow" => CHAIR_SHADOW,
            "table" => TABLE,
            "table_shadow" => TABLE_SHADOW,
            "paper" => PAPER,
            "sequel_wallpaper" => SEQUEL_WALLPAPER,
            "sequel_carpet" => SEQUEL_CARPET,
            "sequel_smoke" => SEQUEL_SMOKE,
            "pipe" => PIPE,
            _ => return None,
        };
        Some(color)
    }
}

/// Parse a color string.
///
/// Supports:
/// - Palette names: `pen`, `paper`, `wallpaper`, ... (see [`palette`])
/// - Basic names: black, white, red, green, blue, yellow, cyan, magenta,
///   gray/grey
/// - Hex: `#RGB` (expanded to `#RRGGBB`), `#RRGGBB`
/// - Case-insensitive, trims whitespace
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') {
        parse_hex(s)
    } else {
        parse_named(s)
    }
}

fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color::Rgb(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

fn parse_named(s: &str) -> Option<Color> {
    let lower = s.to_lowercase();
    if let Some(color) = palette::named(&lower) {
        return Some(color);
    }
    match lower.as_str() {
        "black"         => Some(Color::Rgb(0, 0, 0)),
        "white"         => Some(Color::Rgb(255, 255, 255)),
        "red"           => Some(Color::Rgb(255, 0, 0)),
        "green"         => Some(Color::Rgb(0, 128, 0)),
        "blue"          => Some(Color::Rgb(0, 0, 255)),
        "yellow"        => Some(Color::Rgb(255, 255, 0)),
        "cyan"          => Some(Color::Rgb(0, 255, 255)),
        "magenta"       => Some(Color::Rgb(255, 0, 255)),
        "gray" | "grey" => Some(Color::Rgb(128, 128, 128)),
        _               => None,
    }
}
