//! Command line surface.
//!
//! Kept free of crate-internal imports: `build.rs` includes this file by path
//! to render the man page and completions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Representation printed by the converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvertTarget {
    /// Lowercase #rrggbb
    #[default]
    Hex,
    /// rgb(r, g, b)
    Rgb,
    /// hsl(h, s%, l%)
    Hsl,
    /// hsv(h, s%, v%)
    Hsv,
    /// One line per representation
    All,
}

/// Picker state output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// HTML fragment with inline style properties
    Html,
    /// JSON snapshot of the picker state
    Json,
    /// YAML snapshot of the picker state
    Yaml,
}

/// Input panel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    /// Single #RRGGBB field
    Hex,
    /// Hue, saturation, lightness fields
    Hsl,
    /// Red, green, blue fields
    Rgb,
}

/// HSL color picker: convert colors, render picker state, or pick interactively.
#[derive(Parser, Debug)]
#[command(name = "huepick")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Color in any CSS format (hex, rgb(), hsl(), named)
    #[arg(
        required_unless_present_any = ["interactive", "config", "completions"],
        value_parser = |s: &str| s.parse::<csscolorparser::Color>().map(|_| s.to_string()).map_err(|e| e.to_string())
    )]
    pub color: Option<String>,

    /// Print the color in this representation
    #[arg(short, long, value_enum)]
    pub to: Option<ConvertTarget>,

    /// Print the picker state instead of the converted color
    #[arg(short, long, value_enum)]
    pub render: Option<RenderFormat>,

    /// Launch the interactive terminal picker
    #[arg(short, long)]
    pub interactive: bool,

    /// Initial input panel format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Formats the input panel cycles through (comma separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub allowed_formats: Vec<FormatArg>,

    /// Add a palette swatch (repeatable)
    #[arg(
        long = "swatch",
        value_name = "COLOR",
        value_parser = |s: &str| s.parse::<csscolorparser::Color>().map(|_| s.to_string()).map_err(|e| e.to_string())
    )]
    pub swatches: Vec<String>,

    /// Title shown above the swatches
    #[arg(long, value_name = "TEXT")]
    pub palette_label: Option<String>,

    /// Give the color field keyboard focus on start
    #[arg(long)]
    pub set_focus: bool,

    /// Read settings from a TOML file; flags given here take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the resolved settings (and final TUI color) to a TOML file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Where interactive mode writes its log [default: huepick.log]
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Minimum level recorded in the log file
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Print a completion script for SHELL and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}
