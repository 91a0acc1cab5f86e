//! Headless HSL color picker.
//!
//! The widgets here are plain state machines: the host feeds them pointer,
//! keyboard and text events and reads back the selected [`Color`], inline
//! style values and markup.
//!
//! ```
//! use huepick::{ColorPicker, Key, Part, PickerOptions, PickerStyles};
//!
//! let mut picker = ColorPicker::new(PickerOptions {
//!     selected_color: Some("#ff0000".parse().unwrap()),
//!     ..Default::default()
//! });
//! picker.key_down(Part::Slider, Key::ArrowRight);
//! picker.key_up(Part::Slider, Key::ArrowRight);
//! assert_eq!(PickerStyles::of(&picker).hue, "#ff0400");
//! ```

pub mod capture;
pub mod cli;
mod cli_args;
pub mod color;
pub mod config;
pub mod field;
pub mod input_panel;
pub mod logging;
pub mod picker;
pub mod pointer;
pub mod render;
pub mod slider;
pub mod swatches;
pub mod tui;

pub use capture::{CaptureLog, NoCapture, PointerCapture};
pub use color::{Color, ColorError, HslColor, HsvColor};
pub use field::{ColorField, FieldPosition};
pub use input_panel::{ColorFormat, InputPanel, PanelFields, cycle_format};
pub use picker::{ColorPicker, Focus, Part, PickerOptions};
pub use pointer::{Key, PointerEvent, PointerPosition, Rect, Update};
pub use render::{PickerSnapshot, PickerStyles, render_markup};
pub use slider::HueSlider;
pub use swatches::ColorPalette;
