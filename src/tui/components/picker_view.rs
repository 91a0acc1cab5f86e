//! Picker surface Component: saturation/value field, hue slider, input panel
//! and swatches, with mouse dragging on the field and slider.

use crossterm_actions::{InputEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color as TermColor, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::{Key as TermKey, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    props::{AttrValue, Attribute, Props},
};

use crate::color::{Color, HsvColor};
use crate::field::FieldPosition;
use crate::input_panel::ColorFormat;
use crate::picker::{ColorPicker, Focus, Part};
use crate::pointer::{Key, PointerEvent, Rect as PointerRect};
use crate::slider::{hue_from_percent, thumb_percent};
use crate::swatches::ColorPalette;
use crate::tui::activities::{Msg, main::UserEvent};
use crate::tui::components::{contrast_color, tui_color};
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

/// The terminal has a single pointer.
const MOUSE_POINTER: i64 = 1;

/// Height of the hue slider block (borders, track, thumb row).
const SLIDER_HEIGHT: u16 = 4;
/// Height of the input panel block.
const PANEL_HEIGHT: u16 = 3;
/// Height of the swatch block (borders, swatches, focus marker).
const SWATCH_HEIGHT: u16 = 4;
/// Cells per swatch, including the gap.
const SWATCH_WIDTH: u16 = 5;

/// Everything the view needs from the picker, captured at mount time.
#[derive(Debug, Clone)]
pub struct PickerViewState {
    pub color: Color,
    pub hsv: HsvColor,
    pub position: FieldPosition,
    /// Slider thumb offset in percent
    pub thumb: f64,
    pub format: ColorFormat,
    pub texts: Vec<String>,
    pub dirty: Vec<bool>,
    pub show_swap: bool,
    pub show_builder: bool,
    pub show_input_panel: bool,
    pub palette: Option<ColorPalette>,
    pub active_swatch: Option<usize>,
    pub focus: Option<Focus>,
}

impl PickerViewState {
    pub fn of(picker: &ColorPicker) -> Self {
        let panel = picker.panel();
        let color = picker.color();
        let format = panel.format();
        Self {
            color,
            hsv: picker.hsv(),
            position: picker.field_position(),
            thumb: thumb_percent(picker.hsv().h),
            format,
            texts: panel.fields().texts().into_iter().map(str::to_string).collect(),
            dirty: (0..format.field_count()).map(|i| panel.is_dirty(i)).collect(),
            show_swap: panel.show_swap(),
            show_builder: picker.show_builder(),
            show_input_panel: picker.show_input_panel(),
            palette: picker.palette().cloned(),
            active_swatch: picker.palette().and_then(|p| p.active_index(&color)),
            focus: picker.focus(),
        }
    }

    /// Tab order of the focusable elements that are shown.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = Vec::new();
        if self.show_builder {
            order.extend([Focus::FieldThumb, Focus::SliderThumb]);
        }
        if self.show_input_panel {
            order.extend((0..self.texts.len()).map(Focus::Input));
            if self.show_swap {
                order.push(Focus::FormatSwap);
            }
        }
        if let Some(ref palette) = self.palette {
            order.extend((0..palette.len()).map(Focus::Swatch));
        }
        order
    }

    fn text(&self, index: usize) -> &str {
        self.texts.get(index).map(String::as_str).unwrap_or_default()
    }
}

/// Screen areas from the last draw, used for mouse hit testing.
#[derive(Debug, Default)]
struct HitAreas {
    field: Option<Rect>,
    slider: Option<Rect>,
    inputs: Vec<Rect>,
    swap: Option<Rect>,
    swatches: Vec<Rect>,
}

/// Pointer geometry of a terminal area; the last cell maps to 100%.
fn pointer_rect(area: Rect) -> PointerRect {
    PointerRect::new(
        f64::from(area.x),
        f64::from(area.y),
        f64::from(area.width.saturating_sub(1)),
        f64::from(area.height.saturating_sub(1)),
    )
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(TermColor::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TermColor::DarkGray)
    }
}

/// Interactive picker component.
pub struct PickerView {
    props: Props,
    state: PickerViewState,
    areas: HitAreas,
}

impl PickerView {
    pub fn new(state: PickerViewState) -> Self {
        Self {
            props: Props::default(),
            state,
            areas: HitAreas::default(),
        }
    }

    fn has_focus(&self, focus: Focus) -> bool {
        self.state.focus == Some(focus)
    }

    /// Field cell color for pixel column `x` and half-block row `y`.
    fn field_pixel(&self, x: u16, width: u16, y: u16, rows: u16) -> TermColor {
        let saturation = if width > 1 {
            f64::from(x) / f64::from(width - 1) * 100.0
        } else {
            0.0
        };
        let value = if rows > 1 {
            100.0 - f64::from(y) / f64::from(rows - 1) * 100.0
        } else {
            100.0
        };
        tui_color(&Color::from_hsv(HsvColor::new(
            self.state.hsv.h,
            saturation,
            value,
        )))
    }

    fn draw_field(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.has_focus(Focus::FieldThumb);
        let block = Block::default()
            .title(" Saturation / Brightness ")
            .borders(Borders::ALL)
            .border_style(border_style(focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        self.areas.field = Some(inner);

        // Two pixel rows per cell via upper half blocks
        let rows = inner.height * 2;
        let dot_col = (self.state.position.left() / 100.0 * f64::from(inner.width - 1)).round() as u16;
        let dot_row =
            ((self.state.position.top() / 100.0 * f64::from(rows - 1)).round() as u16) / 2;
        let dot_style = Style::default()
            .fg(contrast_color(&self.state.color))
            .bg(tui_color(&self.state.color));

        let lines: Vec<Line> = (0..inner.height)
            .map(|row| {
                let spans: Vec<Span> = (0..inner.width)
                    .map(|col| {
                        if row == dot_row && col == dot_col {
                            let glyph = if focused { "◉" } else { "●" };
                            Span::styled(glyph, dot_style)
                        } else {
                            let upper = self.field_pixel(col, inner.width, row * 2, rows);
                            let lower = self.field_pixel(col, inner.width, row * 2 + 1, rows);
                            Span::styled("▀", Style::default().fg(upper).bg(lower))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_slider(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.has_focus(Focus::SliderThumb);
        let title = format!(" Hue {:.0}° ", self.state.hsv.h);
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        self.areas.slider = Some(inner);

        let width = inner.width;
        let track: Vec<Span> = (0..width)
            .map(|col| {
                let percent = if width > 1 {
                    f64::from(col) / f64::from(width - 1) * 100.0
                } else {
                    0.0
                };
                let swatch = Color::from_hsv(HsvColor::new(hue_from_percent(percent), 100.0, 100.0));
                Span::styled(" ", Style::default().bg(tui_color(&swatch)))
            })
            .collect();

        let thumb_col = (self.state.thumb / 100.0 * f64::from(width - 1)).round() as usize;
        let thumb_style = if focused {
            Style::default()
                .fg(TermColor::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TermColor::Gray)
        };
        let thumb = Line::from(vec![
            Span::raw(" ".repeat(thumb_col)),
            Span::styled("▲", thumb_style),
        ]);

        frame.render_widget(Paragraph::new(vec![Line::from(track), thumb]), inner);
    }

    fn draw_panel(&mut self, frame: &mut Frame, area: Rect) {
        let focused = matches!(
            self.state.focus,
            Some(Focus::Input(_)) | Some(Focus::FormatSwap)
        );
        let block = Block::default()
            .title(format!(" {} ", self.state.format.label()))
            .borders(Borders::ALL)
            .border_style(border_style(focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let labels = self.state.format.field_labels();
        let field_width = match self.state.format {
            ColorFormat::Hex => 8,
            _ => 6,
        };

        let mut spans = Vec::new();
        let mut x = inner.x;
        let mut push = |span: Span<'static>, spans: &mut Vec<Span<'static>>| -> Rect {
            let width = span.width() as u16;
            let rect = Rect::new(x, inner.y, width, 1);
            x = x.saturating_add(width);
            spans.push(span);
            rect
        };

        self.areas.inputs.clear();
        for (index, label) in labels.iter().enumerate() {
            let short = match self.state.format {
                ColorFormat::Hex => (*label).to_string(),
                _ => label.chars().take(1).collect(),
            };
            push(
                Span::styled(format!(" {short} "), Style::default().fg(TermColor::Gray)),
                &mut spans,
            );

            let input_focused = self.has_focus(Focus::Input(index));
            let dirty = self.state.dirty.get(index).copied().unwrap_or(false);
            let cursor = if input_focused { "▏" } else { " " };
            let text = format!("[{:<field_width$}{cursor}]", self.state.text(index));
            let mut style = Style::default();
            if dirty {
                style = style.fg(TermColor::Yellow);
            }
            if input_focused {
                style = style.fg(TermColor::Cyan).add_modifier(Modifier::BOLD);
            }
            let rect = push(Span::styled(text, style), &mut spans);
            self.areas.inputs.push(rect);
        }

        self.areas.swap = None;
        if self.state.show_swap {
            push(Span::raw("  "), &mut spans);
            let style = if self.has_focus(Focus::FormatSwap) {
                Style::default()
                    .fg(TermColor::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let rect = push(Span::styled("[⇄ swap]", style), &mut spans);
            self.areas.swap = Some(rect);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn draw_swatches(&mut self, frame: &mut Frame, area: Rect) {
        let Some(ref palette) = self.state.palette else {
            return;
        };
        let focused = matches!(self.state.focus, Some(Focus::Swatch(_)));
        let title = format!(" {} ", palette.label().unwrap_or("Swatches"));
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut swatches = Vec::new();
        let mut markers = Vec::new();
        self.areas.swatches.clear();
        for (index, color) in palette.colors().iter().enumerate() {
            let x = inner.x.saturating_add(index as u16 * SWATCH_WIDTH);
            self.areas
                .swatches
                .push(Rect::new(x, inner.y, SWATCH_WIDTH - 1, 1));

            let glyph = if self.state.active_swatch == Some(index) {
                " ✓  "
            } else {
                "    "
            };
            swatches.push(Span::styled(
                glyph,
                Style::default().fg(contrast_color(color)).bg(tui_color(color)),
            ));
            swatches.push(Span::raw(" "));

            let marker = if self.state.focus == Some(Focus::Swatch(index)) {
                "▔▔▔▔ "
            } else {
                "     "
            };
            markers.push(Span::styled(marker, Style::default().fg(TermColor::Cyan)));
        }

        let lines = vec![Line::from(swatches), Line::from(markers)];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Focus `delta` steps along the tab order.
    fn focus_step(&self, delta: isize) -> Option<Msg> {
        let order = self.state.focus_order();
        if order.is_empty() {
            return None;
        }
        let len = order.len() as isize;
        let next = match self.state.focus.and_then(|f| order.iter().position(|o| *o == f)) {
            Some(current) => (current as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        Some(Msg::Focus(order[next as usize]))
    }

    fn navigate(&self, key: Key) -> Option<Msg> {
        match self.state.focus {
            Some(Focus::FieldThumb) => Some(Msg::KeyPress(Part::Field, key)),
            Some(Focus::SliderThumb) => Some(Msg::KeyPress(Part::Slider, key)),
            Some(Focus::Swatch(index)) => {
                let count = self.state.palette.as_ref().map_or(0, ColorPalette::len);
                match key {
                    Key::ArrowLeft if index > 0 => Some(Msg::Focus(Focus::Swatch(index - 1))),
                    Key::ArrowRight if index + 1 < count => {
                        Some(Msg::Focus(Focus::Swatch(index + 1)))
                    }
                    _ => None,
                }
            }
            Some(Focus::Input(index)) => match key {
                Key::ArrowLeft if index > 0 => Some(Msg::Focus(Focus::Input(index - 1))),
                Key::ArrowRight if index + 1 < self.state.texts.len() => {
                    Some(Msg::Focus(Focus::Input(index + 1)))
                }
                _ => None,
            },
            Some(Focus::FormatSwap) => None,
            None => self.focus_step(1),
        }
    }

    fn activate(&self) -> Option<Msg> {
        match self.state.focus? {
            Focus::FormatSwap => Some(Msg::CycleFormat),
            Focus::Swatch(index) => Some(Msg::SelectSwatch(index)),
            Focus::Input(index) => Some(Msg::InputSubmit(index)),
            Focus::FieldThumb | Focus::SliderThumb => None,
        }
    }

    /// Raw editing keys while an input field has focus.
    fn edit_input(&self, index: usize, key_event: &KeyEvent) -> Option<Msg> {
        let text = self.state.text(index);
        match key_event.code {
            TermKey::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Msg::InputChanged(index, format!("{text}{c}")))
            }
            TermKey::Backspace => {
                let mut text = text.to_string();
                text.pop();
                Some(Msg::InputChanged(index, text))
            }
            TermKey::Delete => Some(Msg::InputChanged(index, String::new())),
            TermKey::Enter => Some(Msg::InputSubmit(index)),
            TermKey::Esc => Some(Msg::InputRevert),
            _ => None,
        }
    }

    fn on_key(&self, key_event: KeyEvent) -> Option<Msg> {
        if let Some(Focus::Input(index)) = self.state.focus
            && let Some(msg) = self.edit_input(index, &key_event)
        {
            return Some(msg);
        }

        // Home/End are slider-only and not in the dispatcher
        if self.state.focus == Some(Focus::SliderThumb) {
            match key_event.code {
                TermKey::Home => return Some(Msg::KeyPress(Part::Slider, Key::Home)),
                TermKey::End => return Some(Msg::KeyPress(Part::Slider, Key::End)),
                _ => {}
            }
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => self.focus_step(1),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => self.focus_step(-1),

            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.navigate(Key::ArrowUp)
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.navigate(Key::ArrowDown)
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => {
                self.navigate(Key::ArrowLeft)
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => {
                self.navigate(Key::ArrowRight)
            }

            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => self.activate(),

            _ => None,
        }
    }

    fn on_mouse(&self, mouse: MouseEvent) -> Option<Msg> {
        let event = PointerEvent::new(
            MOUSE_POINTER,
            f64::from(mouse.column),
            f64::from(mouse.row),
        );
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.hit(Position::new(mouse.column, mouse.row), event)
            }
            MouseEventKind::Drag(MouseButton::Left) => Some(Msg::PointerMove(event)),
            MouseEventKind::Up(MouseButton::Left) => Some(Msg::PointerUp(event)),
            _ => None,
        }
    }

    /// What a left click at `position` starts.
    fn hit(&self, position: Position, event: PointerEvent) -> Option<Msg> {
        if let Some(field) = self.areas.field.filter(|r| r.contains(position)) {
            return Some(Msg::PointerDown(Part::Field, event, pointer_rect(field)));
        }
        if let Some(slider) = self.areas.slider.filter(|r| r.contains(position)) {
            return Some(Msg::PointerDown(Part::Slider, event, pointer_rect(slider)));
        }
        if let Some(index) = self.areas.inputs.iter().position(|r| r.contains(position)) {
            return Some(Msg::Focus(Focus::Input(index)));
        }
        if self.areas.swap.is_some_and(|r| r.contains(position)) {
            return Some(Msg::CycleFormat);
        }
        self.areas
            .swatches
            .iter()
            .position(|r| r.contains(position))
            .map(Msg::SelectSwatch)
    }
}

impl MockComponent for PickerView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        self.areas = HitAreas::default();

        let mut constraints = Vec::new();
        if self.state.show_builder {
            constraints.push(Constraint::Min(6));
            constraints.push(Constraint::Length(SLIDER_HEIGHT));
        }
        if self.state.show_input_panel {
            constraints.push(Constraint::Length(PANEL_HEIGHT));
        }
        if self.state.palette.is_some() {
            constraints.push(Constraint::Length(SWATCH_HEIGHT));
        }
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut next = 0;
        if self.state.show_builder {
            self.draw_field(frame, rows[next]);
            self.draw_slider(frame, rows[next + 1]);
            next += 2;
        }
        if self.state.show_input_panel {
            self.draw_panel(frame, rows[next]);
            next += 1;
        }
        if self.state.palette.is_some() {
            self.draw_swatches(frame, rows[next]);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.state.color.to_hex()))
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for PickerView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        if !focused {
            return None;
        }

        match ev {
            Event::Keyboard(key_event) => self.on_key(key_event),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            _ => None,
        }
    }
}
