//! Normalized color values for the ring widget.
//!
//! The widget's five color properties all accept loose, CSS-flavored input
//! (`"#0F0"`, `"#00ff00"`, `"rgb(0, 255, 0)"`, a handful of names) and store
//! one canonical representation. Normalization happens once, on write, so
//! reads are cheap and comparisons are exact.
//!
//! # Basic Usage
//!
//! ```rust
//! use ring_progress::color::Color;
//!
//! let c = Color::from("rgb(0, 69, 142)");
//! assert_eq!(c.name(), "#00458e");
//!
//! // Shorthand hex expands per digit.
//! assert_eq!(Color::from("#0F0"), Color::from("#00ff00"));
//! ```

use std::fmt;

/// An RGBA color with 8-bit channels.
///
/// The canonical string form is lowercase `#rrggbb` (see [`Color::name`]);
/// alpha only matters for gradient stops and is carried separately in the
/// CSS rendering (see the `Display` impl).
///
/// Parsing is permissive by design: any input that cannot be understood
/// degrades to opaque black rather than producing an error. The widget
/// accepts all inputs unconditionally, and an obviously-wrong black fill is
/// easier to spot than a silently dropped property write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Opaque black, the fallback for unparseable input.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Fully transparent white, used for the see-through band of the mask
    /// gradient.
    pub const TRANSPARENT: Color = Color::rgba(255, 255, 255, 0);

    /// Creates an opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a color string, returning `None` when the input is not
    /// understood.
    ///
    /// Accepted forms:
    /// - `#rgb`, `#rrggbb`, `#rrggbbaa` (case-insensitive hex)
    /// - `rgb(r, g, b)` with integer channels 0–255
    /// - `rgba(r, g, b, a)` with a fractional alpha in 0–1
    /// - a small set of basic names (`black`, `white`, `red`, `green`,
    ///   `blue`, `cyan`, `magenta`, `yellow`, `gray`, `grey`,
    ///   `transparent`)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ring_progress::color::Color;
    ///
    /// assert_eq!(Color::parse("#00FFff"), Some(Color::rgb(0, 255, 255)));
    /// assert_eq!(Color::parse("rgb(227, 227, 227)"), Some(Color::rgb(227, 227, 227)));
    /// assert_eq!(Color::parse("not a color"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba")
            .or_else(|| lower.strip_prefix("rgb"))
        {
            return Self::parse_channels(body);
        }
        Self::named(&lower)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let digit = |c: u8| char::from(c).to_digit(16).map(|d| d as u8);
        let bytes = hex.as_bytes();
        match bytes.len() {
            // Shorthand: each digit doubles, so "f" is 0xff.
            3 => {
                let r = digit(bytes[0])?;
                let g = digit(bytes[1])?;
                let b = digit(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 | 8 => {
                let byte = |i: usize| Some(digit(bytes[i])? * 16 + digit(bytes[i + 1])?);
                let r = byte(0)?;
                let g = byte(2)?;
                let b = byte(4)?;
                let a = if bytes.len() == 8 { byte(6)? } else { 255 };
                Some(Self::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    fn parse_channels(body: &str) -> Option<Self> {
        let body = body.trim().strip_prefix('(')?.strip_suffix(')')?;
        let mut parts = body.split(',').map(str::trim);
        let r: u8 = parts.next()?.parse().ok()?;
        let g: u8 = parts.next()?.parse().ok()?;
        let b: u8 = parts.next()?.parse().ok()?;
        let a = match parts.next() {
            Some(raw) => {
                let a: f64 = raw.parse().ok()?;
                if !(0.0..=1.0).contains(&a) {
                    return None;
                }
                (a * 255.0).round() as u8
            }
            None => 255,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self::rgba(r, g, b, a))
    }

    fn named(name: &str) -> Option<Self> {
        Some(match name {
            "black" => Self::rgb(0, 0, 0),
            "white" => Self::rgb(255, 255, 255),
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "cyan" => Self::rgb(0, 255, 255),
            "magenta" => Self::rgb(255, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        })
    }

    /// The canonical `#rrggbb` form, lowercase, alpha ignored.
    ///
    /// This is what the widget's color getters hand back regardless of the
    /// syntax the color was written with.
    pub fn name(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Red channel.
    pub fn red(&self) -> u8 {
        self.r
    }

    /// Green channel.
    pub fn green(&self) -> u8 {
        self.g
    }

    /// Blue channel.
    pub fn blue(&self) -> u8 {
        self.b
    }

    /// Alpha channel, 255 meaning fully opaque.
    pub fn alpha(&self) -> u8 {
        self.a
    }

    /// Whether the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Permissive conversion: unparseable input degrades to opaque black.
impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color::parse(s).unwrap_or(Color::BLACK)
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::from(s.as_str())
    }
}

/// CSS form of the color: `#rrggbb` when opaque, `rgba(r, g, b, a)`
/// otherwise.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.name())
        } else {
            let a = f64::from(self.a) / 255.0;
            let mut text = format!("{:.3}", a);
            while text.ends_with('0') {
                text.pop();
            }
            if text.ends_with('.') {
                text.pop();
            }
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, text)
        }
    }
}
