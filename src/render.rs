//! Output for a host rendering surface.
//!
//! [`PickerStyles`] holds the inline style values the markup carries,
//! [`Markup`] writes an HTML fragment, and [`PickerSnapshot`] is the whole
//! visible state as a serializable value.

use std::fmt;

use serde::Serialize;

use crate::capture::PointerCapture;
use crate::color::{Color, HslColor, HsvColor};
use crate::input_panel::{ColorFormat, PanelFields, format_number};
use crate::picker::{ColorPicker, Focus};
use crate::slider::{HUE_MAX, thumb_percent};

/// `rgb(r, g, b)`
pub fn css_rgb(color: &Color) -> String {
    let rgb = color.to_rgb();
    format!("rgb({}, {}, {})", rgb.red, rgb.green, rgb.blue)
}

/// `hsl(h, s%, l%)` with up to two decimals.
pub fn css_hsl(color: &Color) -> String {
    let hsl = color.to_hsl();
    format!(
        "hsl({}, {}%, {}%)",
        format_number(hsl.h),
        format_number(hsl.s),
        format_number(hsl.l)
    )
}

/// `hsv(h, s%, v%)` with up to two decimals.
pub fn css_hsv(color: &Color) -> String {
    let hsv = color.to_hsv();
    format!(
        "hsv({}, {}%, {}%)",
        format_number(hsv.h),
        format_number(hsv.s),
        format_number(hsv.v)
    )
}

/// Percentage with the shortest round-trip digits, e.g. `100%`, `0.5571030640668524%`.
pub fn percent(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}%", value)
}

/// Inline style values derived from the picker state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerStyles {
    /// `--hue`: the working hue at full saturation and value
    pub hue: String,
    /// `--selected-color`
    pub selected_color: String,
    /// Dot `--left`, percent
    pub dot_left: f64,
    /// Dot `--top`, percent
    pub dot_top: f64,
    /// Slider thumb `left`, percent
    pub thumb_left: f64,
}

impl PickerStyles {
    pub fn of<C: PointerCapture>(picker: &ColorPicker<C>) -> Self {
        let position = picker.field_position();
        Self {
            hue: picker.hue_color().to_hex(),
            selected_color: picker.color().to_hex(),
            dot_left: position.left(),
            dot_top: position.top(),
            thumb_left: thumb_percent(picker.hsv().h),
        }
    }

    /// Style of the picker root and the color field.
    pub fn field_style(&self) -> String {
        format!("--hue: {}; --selected-color: {}", self.hue, self.selected_color)
    }

    pub fn dot_style(&self) -> String {
        format!("--left: {}; --top: {}", percent(self.dot_left), percent(self.dot_top))
    }

    pub fn thumb_style(&self) -> String {
        format!("left: {}", percent(self.thumb_left))
    }
}

/// Escape text for use inside a double-quoted attribute or element body.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// HTML fragment for a picker. Use via `Display`.
pub struct Markup<'a, C: PointerCapture>(pub &'a ColorPicker<C>);

/// Render the picker as an HTML fragment.
pub fn render_markup<C: PointerCapture>(picker: &ColorPicker<C>) -> String {
    Markup(picker).to_string()
}

fn focus_attr(focused: bool) -> &'static str {
    if focused { " data-focused=\"true\"" } else { "" }
}

impl<C: PointerCapture> Markup<'_, C> {
    fn write_builder(&self, f: &mut fmt::Formatter<'_>, styles: &PickerStyles) -> fmt::Result {
        let picker = self.0;
        let hsv = picker.hsv();
        let focus = picker.focus();

        writeln!(f, "  <div class=\"color-selection-wrapper\">")?;
        writeln!(
            f,
            "    <div class=\"color-field\" style=\"{}\">",
            escape(&styles.field_style())
        )?;
        writeln!(
            f,
            "      <div class=\"color-dot\" tabindex=\"0\" role=\"slider\" aria-label=\"Saturation and value\" aria-valuetext=\"Saturation {}, value {}\" style=\"{}\"{}></div>",
            escape(&percent(hsv.s)),
            escape(&percent(hsv.v)),
            escape(&styles.dot_style()),
            focus_attr(focus == Some(Focus::FieldThumb)),
        )?;
        writeln!(f, "    </div>")?;
        writeln!(
            f,
            "    <div class=\"hue-slider\" style=\"--hue: {}\">",
            escape(&styles.hue)
        )?;
        writeln!(
            f,
            "      <div class=\"slider-thumb\" tabindex=\"0\" role=\"slider\" aria-label=\"Hue\" aria-valuemin=\"0\" aria-valuemax=\"{}\" aria-valuenow=\"{}\" style=\"{}\"{}></div>",
            HUE_MAX,
            escape(&format_number(hsv.h)),
            escape(&styles.thumb_style()),
            focus_attr(focus == Some(Focus::SliderThumb)),
        )?;
        writeln!(f, "    </div>")?;
        writeln!(f, "  </div>")
    }

    fn write_input_panel(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let panel = self.0.panel();
        let format = panel.format();
        let focus = self.0.focus();

        writeln!(f, "  <div class=\"color-input\">")?;
        writeln!(f, "    <div class=\"color-input-wrapper\">")?;
        writeln!(f, "      <div class=\"section-label\">{}</div>", format.label())?;
        if panel.show_swap() {
            writeln!(
                f,
                "      <button type=\"button\" class=\"format-swap\" aria-label=\"Switch format\"{}></button>",
                focus_attr(focus == Some(Focus::FormatSwap)),
            )?;
        }
        writeln!(f, "    </div>")?;
        writeln!(f, "    <div class=\"color-input-fields\">")?;
        let fields = panel.fields();
        for (index, label) in format.field_labels().iter().enumerate() {
            let text = fields.text(index).unwrap_or_default();
            writeln!(
                f,
                "      <div class=\"input-container\"><input type=\"text\" aria-label=\"{}\" value=\"{}\"{}></div>",
                label,
                escape(text),
                focus_attr(focus == Some(Focus::Input(index))),
            )?;
        }
        writeln!(f, "    </div>")?;
        writeln!(f, "  </div>")
    }

    fn write_palette(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(palette) = self.0.palette() else {
            return Ok(());
        };
        let active = palette.active_index(&self.0.color());
        let focus = self.0.focus();

        writeln!(f, "  <div class=\"color-palette-wrapper\">")?;
        if let Some(label) = palette.label() {
            writeln!(f, "    <div class=\"section-label\">{}</div>", escape(label))?;
        }
        writeln!(f, "    <div class=\"color-palette\">")?;
        for (index, color) in palette.colors().iter().enumerate() {
            let hex = color.to_hex();
            let is_active = active == Some(index);
            writeln!(
                f,
                "      <button type=\"button\" class=\"color-swatch{}\" aria-label=\"{}\" aria-pressed=\"{}\" style=\"--swatch-color: {}\"{}></button>",
                if is_active { " is-active" } else { "" },
                hex,
                is_active,
                hex,
                focus_attr(focus == Some(Focus::Swatch(index))),
            )?;
        }
        writeln!(f, "    </div>")?;
        writeln!(f, "  </div>")
    }
}

impl<C: PointerCapture> fmt::Display for Markup<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let picker = self.0;
        let styles = PickerStyles::of(picker);

        writeln!(
            f,
            "<div class=\"color-picker\" style=\"{}\">",
            escape(&styles.field_style())
        )?;
        if picker.show_builder() {
            self.write_builder(f, &styles)?;
        }
        if picker.show_input_panel() {
            self.write_input_panel(f)?;
        }
        self.write_palette(f)?;
        f.write_str("</div>\n")
    }
}

/// Serializable view of everything a host would draw.
#[derive(Debug, Clone, Serialize)]
pub struct PickerSnapshot {
    pub hex: String,
    pub rgb: [u8; 3],
    pub hsl: HslColor,
    /// Working state of the field and slider
    pub hsv: HsvColor,
    pub styles: PickerStyles,
    pub format: ColorFormat,
    pub allowed_formats: Vec<ColorFormat>,
    pub show_swap: bool,
    pub fields: PanelFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette_label: Option<String>,
    pub swatches: Vec<String>,
}

impl PickerSnapshot {
    pub fn of<C: PointerCapture>(picker: &ColorPicker<C>) -> Self {
        let color = picker.color();
        let rgb = color.to_rgb();
        let panel = picker.panel();
        Self {
            hex: color.to_hex(),
            rgb: [rgb.red, rgb.green, rgb.blue],
            hsl: color.to_hsl(),
            hsv: picker.hsv(),
            styles: PickerStyles::of(picker),
            format: panel.format(),
            allowed_formats: panel.allowed_formats().to_vec(),
            show_swap: panel.show_swap(),
            fields: panel.fields().clone(),
            palette_label: picker.palette().and_then(|p| p.label()).map(str::to_string),
            swatches: picker
                .palette()
                .map(|p| p.colors().iter().map(Color::to_hex).collect())
                .unwrap_or_default(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
