//! TUI components using tui-realm.

pub mod help;
pub mod picker_view;
pub mod readout;

pub use help::{MAIN_FOOTER_ACTIONS, MARKUP_PREVIEW_FOOTER_ACTIONS, format_footer, render_help};
pub use picker_view::{PickerView, PickerViewState};
pub use readout::{Readout, ReadoutData};

/// Terminal color for a picker color.
pub fn tui_color(color: &crate::color::Color) -> ratatui::style::Color {
    let rgb = color.to_rgb();
    ratatui::style::Color::Rgb(rgb.red, rgb.green, rgb.blue)
}

/// Black or white, whichever reads better on `color`.
pub fn contrast_color(color: &crate::color::Color) -> ratatui::style::Color {
    let rgb = color.to_rgb();
    let luma = 0.299 * f64::from(rgb.red) + 0.587 * f64::from(rgb.green) + 0.114 * f64::from(rgb.blue);
    if luma > 150.0 {
        ratatui::style::Color::Black
    } else {
        ratatui::style::Color::White
    }
}
