//! Color value type with hex, RGB, HSL and HSV representations.
//!
//! A [`Color`] stores its sRGB channels together with the hue it was created
//! from. Achromatic colors (gray, black, white) carry no hue information in
//! their channels, so keeping the hue alongside lets a picker move through
//! black and back out again without the hue collapsing to 0.
//!
//! All integer rounding is round-half-up (`floor(x + 0.5)`), which keeps
//! `hex -> HSL -> hex` and `hex -> RGB -> hex` stable.

use std::fmt;
use std::str::FromStr;

use csscolorparser::Color as CssColor;
use palette::Srgb;
use serde::{Deserialize, Serialize};

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Text is not a 6-digit hex color (with or without `#`)
    InvalidHex(String),
    /// Text is not a recognized CSS color
    InvalidCss(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex(s) => write!(f, "Invalid hex color '{}': expected #RRGGBB", s),
            Self::InvalidCss(s) => write!(f, "Invalid color: {}", s),
        }
    }
}

impl std::error::Error for ColorError {}

/// Hue/saturation/lightness triple. Hue in degrees, saturation and lightness
/// in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HslColor {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Hue/saturation/value triple. Hue in degrees, saturation and value in
/// percent. This is the native space of the color field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvColor {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl HsvColor {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// Round half up. Shared by every conversion in the crate.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Wrap a hue into `[0, 360)`. Non-finite hues become 0.
pub fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Clamp a percentage into `[0, 100]`. NaN becomes 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[inline]
fn channel(x: f64) -> u8 {
    let rounded = round_half_up(x);
    if rounded.is_nan() {
        0
    } else {
        rounded.clamp(0.0, 255.0) as u8
    }
}

/// Linear segment of the HSL hue wheel for one channel.
fn hue_segment(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Channels as fractions plus their max, min and spread.
fn unit_channels(rgb: Srgb<u8>) -> ([f64; 3], f64, f64) {
    let r = f64::from(rgb.red) / 255.0;
    let g = f64::from(rgb.green) / 255.0;
    let b = f64::from(rgb.blue) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    ([r, g, b], max, min)
}

/// Hue of an sRGB color in degrees; 0 for achromatic colors.
pub fn hue_of(rgb: Srgb<u8>) -> f64 {
    let ([r, g, b], max, min) = unit_channels(rgb);
    let delta = max - min;
    if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    }
}

/// An immutable color value.
///
/// Equality compares both the channels and the remembered hue; use
/// [`Color::same_rgb`] to compare only what is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    rgb: Srgb<u8>,
    hue: f64,
}

impl Default for Color {
    /// Opaque white, the picker's default selection.
    fn default() -> Self {
        Self::from_rgb(255, 255, 255)
    }
}

impl Color {
    /// Create from 8-bit channels. The hue is derived from the channels.
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_srgb(Srgb::new(red, green, blue))
    }

    /// Create from an 8-bit sRGB value.
    pub fn from_srgb(rgb: Srgb<u8>) -> Self {
        Self {
            rgb,
            hue: hue_of(rgb),
        }
    }

    /// Create from unbounded channel values, rounding and clamping each into
    /// `[0, 255]`.
    pub fn from_rgb_clamped(red: f64, green: f64, blue: f64) -> Self {
        Self::from_rgb(channel(red), channel(green), channel(blue))
    }

    /// Parse a strict 6-digit hex color, with or without a leading `#`.
    ///
    /// Surrounding whitespace is ignored. Shorthand (`#abc`) and alpha
    /// (`#rrggbbaa`) forms are rejected.
    pub fn from_hex(text: &str) -> Result<Self, ColorError> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(text.to_string()));
        }
        let rgb = Srgb::<u8>::from_str(digits).map_err(|_| ColorError::InvalidHex(text.to_string()))?;
        Ok(Self::from_srgb(rgb))
    }

    /// Parse any CSS color (hex, `rgb()`, `hsl()`, named). Alpha is dropped.
    pub fn parse(text: &str) -> Result<Self, ColorError> {
        let css: CssColor = text
            .trim()
            .parse()
            .map_err(|e| ColorError::InvalidCss(format!("'{}': {}", text, e)))?;
        let [r, g, b, _a] = css.to_rgba8();
        Ok(Self::from_rgb(r, g, b))
    }

    /// Create from HSL. Hue wraps modulo 360; saturation and lightness clamp
    /// to `[0, 100]`.
    pub fn from_hsl(hsl: HslColor) -> Self {
        let hue = normalize_hue(hsl.h);
        let s = clamp_percent(hsl.s) / 100.0;
        let l = clamp_percent(hsl.l) / 100.0;

        if s == 0.0 {
            let gray = channel(l * 255.0);
            return Self {
                rgb: Srgb::new(gray, gray, gray),
                hue,
            };
        }

        let h = hue / 360.0;
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self {
            rgb: Srgb::new(
                channel(hue_segment(p, q, h + 1.0 / 3.0) * 255.0),
                channel(hue_segment(p, q, h) * 255.0),
                channel(hue_segment(p, q, h - 1.0 / 3.0) * 255.0),
            ),
            hue,
        }
    }

    /// Create from HSV. Hue wraps modulo 360; saturation and value clamp to
    /// `[0, 100]`.
    pub fn from_hsv(hsv: HsvColor) -> Self {
        let hue = normalize_hue(hsv.h);
        let s = clamp_percent(hsv.s);
        let v = clamp_percent(hsv.v);

        if s == 0.0 {
            let gray = channel(v / 100.0 * 255.0);
            return Self {
                rgb: Srgb::new(gray, gray, gray),
                hue,
            };
        }

        let sector = hue / 60.0;
        let whole = sector.floor();
        let fraction = sector - whole;
        let s = s / 100.0;
        let v = v / 100.0;

        let pp = channel(v * (1.0 - s) * 255.0);
        let qq = channel(v * (1.0 - s * fraction) * 255.0);
        let tt = channel(v * (1.0 - s * (1.0 - fraction)) * 255.0);
        let vv = channel(v * 255.0);

        let (red, green, blue) = match whole as u8 % 6 {
            0 => (vv, tt, pp),
            1 => (qq, vv, pp),
            2 => (pp, vv, tt),
            3 => (pp, qq, vv),
            4 => (tt, pp, vv),
            _ => (vv, pp, qq),
        };

        Self {
            rgb: Srgb::new(red, green, blue),
            hue,
        }
    }

    /// Return a copy that remembers `hue` instead of its current hue.
    ///
    /// Intended for achromatic colors; for chromatic colors the hue should
    /// agree with the channels.
    pub fn with_hue(self, hue: f64) -> Self {
        Self {
            rgb: self.rgb,
            hue: normalize_hue(hue),
        }
    }

    /// The 8-bit sRGB channels.
    pub fn to_rgb(&self) -> Srgb<u8> {
        self.rgb
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            self.rgb.red, self.rgb.green, self.rgb.blue
        )
    }

    /// The remembered hue in degrees, `[0, 360)`.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// HSL with the remembered hue. Saturation and lightness are exact (not
    /// rounded).
    pub fn to_hsl(&self) -> HslColor {
        let (_, max, min) = unit_channels(self.rgb);
        let delta = max - min;
        let l = (max + min) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };
        HslColor {
            h: self.hue,
            s: clamp_percent(s * 100.0),
            l: clamp_percent(l * 100.0),
        }
    }

    /// HSV with the remembered hue. Saturation and value are exact (not
    /// rounded).
    pub fn to_hsv(&self) -> HsvColor {
        let (_, max, min) = unit_channels(self.rgb);
        let s = if max == 0.0 {
            0.0
        } else {
            (max - min) / max
        };
        HsvColor {
            h: self.hue,
            s: clamp_percent(s * 100.0),
            v: clamp_percent(max * 100.0),
        }
    }

    /// Whether the color has no visible hue (gray, black or white).
    pub fn is_achromatic(&self) -> bool {
        self.rgb.red == self.rgb.green && self.rgb.green == self.rgb.blue
    }

    /// Compare visible channels only, ignoring the remembered hue.
    pub fn same_rgb(&self, other: &Color) -> bool {
        self.rgb == other.rgb
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Strict hex first, then any CSS color.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).or_else(|_| Self::parse(s))
    }
}

impl From<Srgb<u8>> for Color {
    fn from(rgb: Srgb<u8>) -> Self {
        Self::from_srgb(rgb)
    }
}

impl From<HslColor> for Color {
    fn from(hsl: HslColor) -> Self {
        Self::from_hsl(hsl)
    }
}

impl From<HsvColor> for Color {
    fn from(hsv: HsvColor) -> Self {
        Self::from_hsv(hsv)
    }
}
