//! TOML configuration file support for the picker.
//!
//! Settings are layered with figment: built-in defaults, then the TOML file,
//! then whatever was given on the command line.

use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capture::PointerCapture;
use crate::cli::{ConvertTarget, RenderFormat};
use crate::color::Color;
use crate::input_panel::ColorFormat;
use crate::picker::{ColorPicker, PickerOptions};
use crate::swatches::ColorPalette;

/// Reading, writing or resolving a [`PickerConfig`] failed.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    /// A layer held a value of the wrong shape
    Figment(Box<figment::Error>),
    /// A color string no notation accepts
    InvalidColor(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot access config file: {e}"),
            Self::Parse(e) => write!(f, "malformed config file: {e}"),
            Self::Serialize(e) => write!(f, "cannot encode config: {e}"),
            Self::Figment(e) => write!(f, "cannot merge config layers: {e}"),
            Self::InvalidColor(s) => write!(f, "not a color: {s:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Serialize(e) => Some(e),
            Self::Figment(e) => Some(e.as_ref()),
            Self::InvalidColor(_) => None,
        }
    }
}

macro_rules! config_error_from {
    ($($source:ty => $wrap:expr),* $(,)?) => {
        $(impl From<$source> for ConfigError {
            fn from(e: $source) -> Self {
                $wrap(e)
            }
        })*
    };
}

config_error_from! {
    std::io::Error => Self::Io,
    toml::de::Error => Self::Parse,
    toml::ser::Error => Self::Serialize,
    figment::Error => |e| Self::Figment(Box::new(e)),
}

/// Root configuration structure for TOML files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Picker behaviour
    pub picker: PickerSection,
    /// Swatch palette
    pub palette: PaletteSection,
    /// Non-interactive output
    pub output: OutputSection,
}

/// `[picker]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerSection {
    /// Initial color (any CSS color format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    /// Input panel format shown first
    pub default_format: ColorFormat,
    /// Formats the input panel cycles through
    pub allowed_formats: Vec<ColorFormat>,
    /// Focus the color field thumb on start
    pub set_focus: bool,
    /// Show the color field and hue slider
    pub show_builder: bool,
    /// Show the direct-entry fields
    pub show_input_panel: bool,
}

impl Default for PickerSection {
    fn default() -> Self {
        Self {
            selected_color: None,
            default_format: ColorFormat::Hex,
            allowed_formats: ColorFormat::ALL.to_vec(),
            set_focus: false,
            show_builder: true,
            show_input_panel: true,
        }
    }
}

/// `[palette]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSection {
    /// Title shown above the swatches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Swatch colors (any CSS color format)
    pub swatches: Vec<String>,
}

/// `[output]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Representation printed by the converter
    pub to: ConvertTarget,
    /// Print picker state instead of the converted color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderFormat>,
}

/// Sparse overrides merged on top of the file; unset fields are skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub picker: PickerOverrides,
    pub palette: PaletteOverrides,
    pub output: OutputOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PickerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<ColorFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_formats: Option<Vec<ColorFormat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_focus: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PaletteOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swatches: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<ConvertTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderFormat>,
}

impl PickerConfig {
    /// Read one TOML file, without defaults layered underneath.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    /// Write as pretty TOML, replacing `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        Ok(std::fs::write(path, toml::to_string_pretty(self)?)?)
    }

    /// Defaults, then the optional TOML file, then `overrides`.
    ///
    /// A named file that does not exist is an error rather than an empty
    /// layer.
    pub fn layered(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", path.display()),
                )));
            }
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(path));
        }
        let config = figment
            .merge(Serialized::defaults(overrides))
            .extract()?;
        Ok(config)
    }

    /// The configured initial color, if any.
    pub fn selected_color(&self) -> Result<Option<Color>, ConfigError> {
        self.picker
            .selected_color
            .as_deref()
            .map(|s| {
                s.parse::<Color>()
                    .map_err(|e| ConfigError::InvalidColor(e.to_string()))
            })
            .transpose()
    }

    /// Convert to PickerOptions, validating every color.
    pub fn to_picker_options(&self) -> Result<PickerOptions, ConfigError> {
        let palette = if self.palette.swatches.is_empty() {
            None
        } else {
            Some(
                ColorPalette::parse(self.palette.label.clone(), &self.palette.swatches)
                    .map_err(|e| ConfigError::InvalidColor(e.to_string()))?,
            )
        };

        Ok(PickerOptions {
            selected_color: self.selected_color()?,
            allowed_formats: self.picker.allowed_formats.clone(),
            default_format: self.picker.default_format,
            set_focus: self.picker.set_focus,
            show_builder: self.picker.show_builder,
            show_input_panel: self.picker.show_input_panel,
            palette,
        })
    }

    /// Record a picker's current color and input format.
    pub fn update_from_picker<C: PointerCapture>(&mut self, picker: &ColorPicker<C>) {
        self.picker.selected_color = Some(picker.color().to_hex());
        self.picker.default_format = picker.panel().format();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_extract_unchanged() {
        let config = PickerConfig::layered(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, PickerConfig::default());
    }

    #[test]
    fn invalid_swatch_is_reported() {
        let mut config = PickerConfig::default();
        config.palette.swatches = vec!["#ff0000".into(), "blurple".into()];
        assert!(matches!(
            config.to_picker_options(),
            Err(ConfigError::InvalidColor(_))
        ));
    }
}
