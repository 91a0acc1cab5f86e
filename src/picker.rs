//! Color picker container.
//!
//! [`ColorPicker`] owns the selected [`Color`] and an HSV working state for
//! the field and slider. Sub-widgets only report positions; the picker merges
//! them, keeps derived display state in sync and calls the listeners:
//!
//! - `on_change` for every live step of an interaction,
//! - `on_change_complete` exactly once when the interaction ends.
//!
//! Pointer moves and releases are routed to whichever part started the drag,
//! and the host's global listen scope is held for exactly as long as the drag.

use std::fmt;

use tracing::{debug, trace};

use crate::capture::{NoCapture, PointerCapture};
use crate::color::{Color, HsvColor, round_half_up};
use crate::field::{ColorField, FieldPosition};
use crate::input_panel::{ColorFormat, InputPanel};
use crate::pointer::{Key, PointerEvent, Rect, Update};
use crate::slider::HueSlider;
use crate::swatches::ColorPalette;

/// Callback invoked with the current color.
pub type Listener = Box<dyn FnMut(&Color)>;

/// Draggable parts of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Field,
    Slider,
}

/// Focusable elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    FieldThumb,
    SliderThumb,
    Input(usize),
    FormatSwap,
    Swatch(usize),
}

impl From<Part> for Focus {
    fn from(part: Part) -> Self {
        match part {
            Part::Field => Self::FieldThumb,
            Part::Slider => Self::SliderThumb,
        }
    }
}

/// Construction options.
#[derive(Debug, Clone)]
pub struct PickerOptions {
    /// Initial color; white when unset
    pub selected_color: Option<Color>,
    /// Formats the input panel may cycle through; empty means all
    pub allowed_formats: Vec<ColorFormat>,
    pub default_format: ColorFormat,
    /// Give the field thumb keyboard focus on creation
    pub set_focus: bool,
    /// Show the field and hue slider
    pub show_builder: bool,
    pub show_input_panel: bool,
    pub palette: Option<ColorPalette>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            selected_color: None,
            allowed_formats: ColorFormat::ALL.to_vec(),
            default_format: ColorFormat::Hex,
            set_focus: false,
            show_builder: true,
            show_input_panel: true,
            palette: None,
        }
    }
}

/// HSV working state for a color, with saturation and value snapped to whole
/// percents.
pub fn working_hsv(color: &Color) -> HsvColor {
    let hsv = color.to_hsv();
    HsvColor::new(hsv.h, round_half_up(hsv.s), round_half_up(hsv.v))
}

pub struct ColorPicker<C: PointerCapture = NoCapture> {
    color: Color,
    hsv: HsvColor,
    field: ColorField,
    slider: HueSlider,
    panel: InputPanel,
    palette: Option<ColorPalette>,
    show_builder: bool,
    show_input_panel: bool,
    focus: Option<Focus>,
    drag: Option<(Part, i64)>,
    capture: C,
    on_change: Option<Listener>,
    on_change_complete: Option<Listener>,
}

impl<C: PointerCapture> fmt::Debug for ColorPicker<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorPicker")
            .field("color", &self.color)
            .field("hsv", &self.hsv)
            .field("panel", &self.panel)
            .field("focus", &self.focus)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl ColorPicker<NoCapture> {
    pub fn new(options: PickerOptions) -> Self {
        Self::with_capture(options, NoCapture)
    }
}

impl Default for ColorPicker<NoCapture> {
    fn default() -> Self {
        Self::new(PickerOptions::default())
    }
}

impl<C: PointerCapture> ColorPicker<C> {
    pub fn with_capture(options: PickerOptions, capture: C) -> Self {
        let color = options.selected_color.unwrap_or_default();
        Self {
            color,
            hsv: working_hsv(&color),
            field: ColorField::new(),
            slider: HueSlider::new(),
            panel: InputPanel::new(&options.allowed_formats, options.default_format, &color),
            palette: options.palette,
            show_builder: options.show_builder,
            show_input_panel: options.show_input_panel,
            focus: options.set_focus.then_some(Focus::FieldThumb),
            drag: None,
            capture,
            on_change: None,
            on_change_complete: None,
        }
    }

    /// Set the live-update listener.
    pub fn on_change(mut self, listener: impl FnMut(&Color) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    /// Set the commit listener.
    pub fn on_change_complete(mut self, listener: impl FnMut(&Color) + 'static) -> Self {
        self.on_change_complete = Some(Box::new(listener));
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn hsv(&self) -> HsvColor {
        self.hsv
    }

    pub fn field_position(&self) -> FieldPosition {
        FieldPosition::new(self.hsv.s, self.hsv.v)
    }

    /// Fully saturated, full-value color for the working hue.
    pub fn hue_color(&self) -> Color {
        Color::from_hsv(HsvColor::new(self.hsv.h, 100.0, 100.0))
    }

    pub fn panel(&self) -> &InputPanel {
        &self.panel
    }

    pub fn palette(&self) -> Option<&ColorPalette> {
        self.palette.as_ref()
    }

    pub fn show_builder(&self) -> bool {
        self.show_builder
    }

    pub fn show_input_panel(&self) -> bool {
        self.show_input_panel
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<Focus>) {
        self.focus = focus;
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut C {
        &mut self.capture
    }

    /// Part currently being dragged.
    pub fn dragging(&self) -> Option<Part> {
        self.drag.map(|(part, _)| part)
    }

    /// Replace the color from outside, without notifying listeners.
    ///
    /// An echo of the current working color keeps the working state, so a
    /// controlled color at an achromatic extreme does not lose its hue.
    pub fn set_selected_color(&mut self, color: Color) {
        if color.same_rgb(&Color::from_hsv(self.hsv)) {
            self.color = color.with_hue(self.hsv.h);
        } else {
            self.color = color;
            self.hsv = working_hsv(&color);
        }
        self.panel.sync(&self.color);
    }

    /// Start dragging `part` at the pressed position.
    pub fn pointer_down(&mut self, part: Part, event: PointerEvent, rect: Rect) -> Update<Color> {
        self.release_drag();
        self.capture.begin_global_listen(event.pointer_id);
        trace!(pointer = event.pointer_id, ?part, "global listen begin");
        self.drag = Some((part, event.pointer_id));
        self.focus = Some(part.into());

        match part {
            Part::Field => {
                let position = self.field.pointer_down(event, rect).into_value();
                self.apply_field(position);
            }
            Part::Slider => {
                let hue = self.slider.pointer_down(event, rect).into_value();
                self.apply_hue(hue);
            }
        }
        self.notify_live();
        Update::Live(self.color)
    }

    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<Update<Color>> {
        let (part, pointer_id) = self.drag?;
        if pointer_id != event.pointer_id {
            return None;
        }
        match part {
            Part::Field => {
                let position = self.field.pointer_move(event)?.into_value();
                self.apply_field(position);
            }
            Part::Slider => {
                let hue = self.slider.pointer_move(event)?.into_value();
                self.apply_hue(hue);
            }
        }
        self.notify_live();
        Some(Update::Live(self.color))
    }

    /// Finish the drag at the release position.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Option<Update<Color>> {
        let (part, pointer_id) = self.drag?;
        if pointer_id != event.pointer_id {
            return None;
        }
        self.end_listen(pointer_id);

        match part {
            Part::Field => {
                let position = self.field.pointer_up(event)?.into_value();
                self.apply_field(position);
            }
            Part::Slider => {
                let hue = self.slider.pointer_up(event)?.into_value();
                self.apply_hue(hue);
            }
        }
        self.notify_complete();
        Some(Update::Committed(self.color))
    }

    /// Abort the drag, committing the last live position.
    pub fn pointer_cancel(&mut self, pointer_id: i64) -> Option<Update<Color>> {
        let (part, active) = self.drag?;
        if active != pointer_id {
            return None;
        }
        self.end_listen(pointer_id);

        match part {
            Part::Field => {
                let position = self.field.pointer_cancel()?.into_value();
                self.apply_field(position);
            }
            Part::Slider => {
                let hue = self.slider.pointer_cancel()?.into_value();
                self.apply_hue(hue);
            }
        }
        self.notify_complete();
        Some(Update::Committed(self.color))
    }

    /// Key press on a focused thumb.
    pub fn key_down(&mut self, part: Part, key: Key) -> Option<Update<Color>> {
        self.focus = Some(part.into());
        match part {
            Part::Field => {
                let position = self.field.key_down(key, self.field_position())?.into_value();
                self.apply_field(position);
            }
            Part::Slider => {
                let hue = self.slider.key_down(key, self.hsv.h)?.into_value();
                self.apply_hue(hue);
            }
        }
        self.notify_live();
        Some(Update::Live(self.color))
    }

    /// Key release on a focused thumb; commits after a handled press.
    pub fn key_up(&mut self, part: Part, key: Key) -> Option<Update<Color>> {
        match part {
            Part::Field => {
                self.field.key_up(key, self.field_position())?;
            }
            Part::Slider => {
                self.slider.key_up(key, self.hsv.h)?;
            }
        }
        self.notify_complete();
        Some(Update::Committed(self.color))
    }

    /// Text typed into input field `index`. Nothing is applied until commit.
    pub fn input_change(&mut self, index: usize, text: &str) -> bool {
        self.focus = Some(Focus::Input(index));
        self.panel.edit(index, text)
    }

    /// Enter commits the field; other keys are ignored.
    pub fn input_key_down(&mut self, index: usize, key: Key) -> Option<Update<Color>> {
        match key {
            Key::Enter => self.commit_input(index),
            _ => None,
        }
    }

    /// Losing focus commits an edited field.
    pub fn input_blur(&mut self, index: usize) -> Option<Update<Color>> {
        if self.focus == Some(Focus::Input(index)) {
            self.focus = None;
        }
        if !self.panel.is_dirty(index) {
            return None;
        }
        self.commit_input(index)
    }

    /// Advance the input panel to the next allowed format.
    pub fn cycle_format(&mut self) -> ColorFormat {
        let format = self.panel.cycle(&self.color);
        debug!(%format, "input format changed");
        format
    }

    /// Pick a palette swatch. Fires one live and one committed notification.
    pub fn select_swatch(&mut self, index: usize) -> Option<Update<Color>> {
        let color = self.palette.as_ref()?.get(index)?;
        self.focus = Some(Focus::Swatch(index));
        self.color = color;
        self.hsv = working_hsv(&color);
        self.panel.sync(&color);
        self.notify_live();
        self.notify_complete();
        Some(Update::Committed(self.color))
    }

    fn commit_input(&mut self, index: usize) -> Option<Update<Color>> {
        match self.panel.commit(index, &self.color) {
            Ok(color) => {
                self.color = color;
                self.hsv = working_hsv(&color);
                self.notify_live();
                self.notify_complete();
                Some(Update::Committed(self.color))
            }
            Err(rejection) => {
                debug!(%rejection, "input rejected");
                None
            }
        }
    }

    fn apply_field(&mut self, position: FieldPosition) {
        self.hsv.s = position.saturation;
        self.hsv.v = position.value;
        self.color = Color::from_hsv(self.hsv);
        self.panel.sync(&self.color);
    }

    fn apply_hue(&mut self, hue: f64) {
        self.hsv.h = hue;
        self.color = Color::from_hsv(self.hsv);
        self.panel.sync(&self.color);
    }

    fn end_listen(&mut self, pointer_id: i64) {
        self.drag = None;
        self.capture.end_global_listen(pointer_id);
        trace!(pointer = pointer_id, "global listen end");
    }

    /// Close a drag that never saw its release, committing where it was.
    fn release_drag(&mut self) {
        if let Some((_, pointer_id)) = self.drag {
            debug!(pointer = pointer_id, "drag superseded by a new press");
            self.pointer_cancel(pointer_id);
        }
    }

    fn notify_live(&mut self) {
        let color = self.color;
        if let Some(listener) = self.on_change.as_mut() {
            listener(&color);
        }
    }

    fn notify_complete(&mut self) {
        let color = self.color;
        debug!(color = %color, hue = self.hsv.h, "color committed");
        if let Some(listener) = self.on_change_complete.as_mut() {
            listener(&color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HslColor;

    #[test]
    fn echo_keeps_working_hue() {
        let start = Color::from_hsl(HslColor::new(140.0, 60.0, 1.0));
        let mut picker = ColorPicker::new(PickerOptions {
            selected_color: Some(start),
            ..Default::default()
        });
        picker.key_down(Part::Field, Key::ArrowDown);
        picker.key_down(Part::Field, Key::ArrowDown);
        assert_eq!(picker.color().to_hex(), "#000000");

        // host stored only the hex and hands it back
        picker.set_selected_color(Color::from_hex("#000000").unwrap());
        assert_eq!(picker.hsv().h, 140.0);
        assert_eq!(picker.hue_color().to_hex(), "#00ff55");

        picker.set_selected_color(Color::from_hex("#0000ff").unwrap());
        assert_eq!(picker.hsv().h, 240.0);
    }

    #[test]
    fn set_focus_targets_field_thumb() {
        let picker = ColorPicker::new(PickerOptions {
            set_focus: true,
            ..Default::default()
        });
        assert_eq!(picker.focus(), Some(Focus::FieldThumb));
        assert_eq!(ColorPicker::default().focus(), None);
    }
}
