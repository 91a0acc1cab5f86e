//! CLI argument parsing and command handling.

pub use crate::cli_args::{Cli, ConvertTarget, FormatArg, RenderFormat};

use crate::color::Color;
use crate::config::{ConfigOverrides, OutputOverrides, PaletteOverrides, PickerOverrides};
use crate::input_panel::ColorFormat;
use crate::render::{css_hsl, css_hsv, css_rgb};

impl From<FormatArg> for ColorFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Hex => ColorFormat::Hex,
            FormatArg::Hsl => ColorFormat::Hsl,
            FormatArg::Rgb => ColorFormat::Rgb,
        }
    }
}

impl Cli {
    /// Allowed formats given on the command line, if any.
    pub fn allowed_formats(&self) -> Option<Vec<ColorFormat>> {
        (!self.allowed_formats.is_empty())
            .then(|| self.allowed_formats.iter().copied().map(Into::into).collect())
    }

    /// Convert flat CLI args to nested overrides for Figment merging.
    ///
    /// Only fields that are explicitly set on the CLI are serialized (via
    /// `skip_serializing_if`), so TOML file settings survive underneath.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            picker: PickerOverrides {
                selected_color: self.color.clone(),
                default_format: self.format.map(Into::into),
                allowed_formats: self.allowed_formats(),
                set_focus: self.set_focus.then_some(true),
            },
            palette: PaletteOverrides {
                label: self.palette_label.clone(),
                swatches: (!self.swatches.is_empty()).then(|| self.swatches.clone()),
            },
            output: OutputOverrides {
                to: self.to,
                render: self.render,
            },
        }
    }
}

/// Text printed by the converter.
pub fn format_color(color: &Color, target: ConvertTarget) -> String {
    match target {
        ConvertTarget::Hex => color.to_hex(),
        ConvertTarget::Rgb => css_rgb(color),
        ConvertTarget::Hsl => css_hsl(color),
        ConvertTarget::Hsv => css_hsv(color),
        ConvertTarget::All => format!(
            "hex: {}\nrgb: {}\nhsl: {}\nhsv: {}",
            color.to_hex(),
            css_rgb(color),
            css_hsl(color),
            css_hsv(color)
        ),
    }
}
