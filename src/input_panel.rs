//! Direct-entry input panel: one hex field, or three RGB / HSL channel fields.
//!
//! Field text is free-form while editing. A field is only applied to the
//! color when it is committed (Enter or blur) and its text validates; a bad
//! channel leaves the color and the other fields' edits alone.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorError, HslColor, round_half_up};

/// Input formats offered by the panel, in cycle order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Hsl,
    Rgb,
}

impl ColorFormat {
    /// All formats in swap-cycle order.
    pub const ALL: [ColorFormat; 3] = [Self::Hex, Self::Hsl, Self::Rgb];

    /// Label shown above the fields.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hex => "HEX",
            Self::Hsl => "HSL",
            Self::Rgb => "RGB",
        }
    }

    /// Accessible names of the individual fields.
    pub fn field_labels(self) -> &'static [&'static str] {
        match self {
            Self::Hex => &["Hex"],
            Self::Hsl => &["Hue", "Saturation", "Lightness"],
            Self::Rgb => &["Red", "Green", "Blue"],
        }
    }

    pub fn field_count(self) -> usize {
        self.field_labels().len()
    }

    /// Inclusive legal range of a channel field.
    pub fn channel_range(self, index: usize) -> Option<(f64, f64)> {
        match (self, index) {
            (Self::Rgb, 0..=2) => Some((0.0, 255.0)),
            (Self::Hsl, 0) => Some((0.0, 360.0)),
            (Self::Hsl, 1..=2) => Some((0.0, 100.0)),
            _ => None,
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hex => "hex",
            Self::Hsl => "hsl",
            Self::Rgb => "rgb",
        })
    }
}

impl FromStr for ColorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "hsl" => Ok(Self::Hsl),
            "rgb" => Ok(Self::Rgb),
            other => Err(format!("Unknown color format '{}' (expected hex, hsl or rgb)", other)),
        }
    }
}

/// The format that follows `current` in HEX → HSL → RGB order, restricted to
/// `allowed`. An empty `allowed` list means every format.
pub fn cycle_format(current: ColorFormat, allowed: &[ColorFormat]) -> ColorFormat {
    let cycle: Vec<ColorFormat> = ColorFormat::ALL
        .into_iter()
        .filter(|f| allowed.is_empty() || allowed.contains(f))
        .collect();
    match cycle.iter().position(|&f| f == current) {
        Some(i) => cycle[(i + 1) % cycle.len()],
        None => cycle.first().copied().unwrap_or(current),
    }
}

/// Shortest text for a channel value, at most two decimals.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

/// Parse and range-check a channel field.
pub fn parse_channel(format: ColorFormat, index: usize, text: &str) -> Option<f64> {
    let (min, max) = format.channel_range(index)?;
    let value: f64 = text.trim().parse().ok()?;
    (value.is_finite() && (min..=max).contains(&value)).then_some(value)
}

/// Field contents, one variant per format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", content = "values", rename_all = "lowercase")]
pub enum PanelFields {
    Hex(String),
    Hsl([String; 3]),
    Rgb([String; 3]),
}

impl PanelFields {
    /// Fields showing `color` in `format`.
    pub fn for_color(format: ColorFormat, color: &Color) -> Self {
        match format {
            ColorFormat::Hex => Self::Hex(color.to_hex()),
            ColorFormat::Hsl => {
                let hsl = color.to_hsl();
                Self::Hsl([
                    format_number(hsl.h),
                    format_number(hsl.s),
                    format_number(hsl.l),
                ])
            }
            ColorFormat::Rgb => {
                let rgb = color.to_rgb();
                Self::Rgb([
                    rgb.red.to_string(),
                    rgb.green.to_string(),
                    rgb.blue.to_string(),
                ])
            }
        }
    }

    pub fn format(&self) -> ColorFormat {
        match self {
            Self::Hex(_) => ColorFormat::Hex,
            Self::Hsl(_) => ColorFormat::Hsl,
            Self::Rgb(_) => ColorFormat::Rgb,
        }
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        match self {
            Self::Hex(s) => (index == 0).then_some(s.as_str()),
            Self::Hsl(v) | Self::Rgb(v) => v.get(index).map(String::as_str),
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        (0..self.format().field_count()).filter_map(|i| self.text(i)).collect()
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        match self {
            Self::Hex(s) => (index == 0).then_some(s),
            Self::Hsl(v) | Self::Rgb(v) => v.get_mut(index),
        }
    }
}

/// Why a field commit was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// No field at this index for the active format
    NoSuchField(usize),
    Hex(ColorError),
    /// Channel text is not a number in the legal range
    Channel { index: usize, text: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchField(i) => write!(f, "No input field {}", i),
            Self::Hex(e) => write!(f, "{}", e),
            Self::Channel { index, text } => {
                write!(f, "Value '{}' out of range for field {}", text, index)
            }
        }
    }
}

/// State of the input panel.
#[derive(Debug, Clone)]
pub struct InputPanel {
    allowed: Vec<ColorFormat>,
    fields: PanelFields,
    dirty: [bool; 3],
}

impl InputPanel {
    /// Create a panel showing `color`. A default format outside `allowed`
    /// falls back to the first allowed format.
    pub fn new(allowed: &[ColorFormat], default_format: ColorFormat, color: &Color) -> Self {
        let mut allowed_in_order: Vec<ColorFormat> = ColorFormat::ALL
            .into_iter()
            .filter(|f| allowed.contains(f))
            .collect();
        if allowed_in_order.is_empty() {
            allowed_in_order = ColorFormat::ALL.to_vec();
        }
        let format = if allowed_in_order.contains(&default_format) {
            default_format
        } else {
            allowed_in_order[0]
        };
        Self {
            allowed: allowed_in_order,
            fields: PanelFields::for_color(format, color),
            dirty: [false; 3],
        }
    }

    pub fn format(&self) -> ColorFormat {
        self.fields.format()
    }

    pub fn allowed_formats(&self) -> &[ColorFormat] {
        &self.allowed
    }

    pub fn fields(&self) -> &PanelFields {
        &self.fields
    }

    /// The swap control is only offered with more than one format.
    pub fn show_swap(&self) -> bool {
        self.allowed.len() > 1
    }

    pub fn is_dirty(&self, index: usize) -> bool {
        self.dirty.get(index).copied().unwrap_or(false)
    }

    /// Switch to the next allowed format. Pending edits are dropped.
    pub fn cycle(&mut self, color: &Color) -> ColorFormat {
        let next = cycle_format(self.format(), &self.allowed);
        self.fields = PanelFields::for_color(next, color);
        self.dirty = [false; 3];
        next
    }

    /// Rewrite every field from `color`, discarding edits.
    pub fn sync(&mut self, color: &Color) {
        self.fields = PanelFields::for_color(self.format(), color);
        self.dirty = [false; 3];
    }

    /// Replace the text of one field. Returns false for a bad index.
    pub fn edit(&mut self, index: usize, text: &str) -> bool {
        match self.fields.text_mut(index) {
            Some(slot) => {
                *slot = text.to_string();
                self.dirty[index] = true;
                true
            }
            None => false,
        }
    }

    /// Validate field `index` and produce the color it describes, merged into
    /// `current`. On success the field shows the accepted value in canonical
    /// form and its edit flag is cleared; other fields are untouched.
    pub fn commit(&mut self, index: usize, current: &Color) -> Result<Color, Rejection> {
        let text = self
            .fields
            .text(index)
            .ok_or(Rejection::NoSuchField(index))?
            .to_string();

        let (color, shown) = match self.format() {
            ColorFormat::Hex => {
                let color = Color::from_hex(&text).map_err(Rejection::Hex)?;
                let color = if color.is_achromatic() {
                    color.with_hue(current.hue())
                } else {
                    color
                };
                (color, color.to_hex())
            }
            format => {
                let value = parse_channel(format, index, &text).ok_or(Rejection::Channel {
                    index,
                    text: text.clone(),
                })?;
                // The accepted value stays as typed; re-deriving it from the
                // 8-bit result would drift
                (merge_channel(format, index, value, current), format_number(value))
            }
        };

        if let Some(slot) = self.fields.text_mut(index) {
            *slot = shown;
        }
        self.dirty[index] = false;
        Ok(color)
    }
}

fn merge_channel(format: ColorFormat, index: usize, value: f64, current: &Color) -> Color {
    match format {
        ColorFormat::Hsl => {
            let mut hsl = current.to_hsl();
            match index {
                0 => hsl.h = value,
                1 => hsl.s = value,
                _ => hsl.l = value,
            }
            Color::from_hsl(HslColor::new(hsl.h, hsl.s, hsl.l))
        }
        _ => {
            let rgb = current.to_rgb();
            let mut channels = [
                f64::from(rgb.red),
                f64::from(rgb.green),
                f64::from(rgb.blue),
            ];
            channels[index.min(2)] = round_half_up(value);
            let color = Color::from_rgb_clamped(channels[0], channels[1], channels[2]);
            if color.is_achromatic() {
                color.with_hue(current.hue())
            } else {
                color
            }
        }
    }
}
