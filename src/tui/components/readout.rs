//! Readout display Component: the selected color in every notation and the
//! recent commits.

use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color as TermColor, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::color::Color;
use crate::picker::Part;
use crate::render::{css_hsl, css_hsv, css_rgb};
use crate::tui::Model;
use crate::tui::activities::{Msg, main::UserEvent};
use crate::tui::components::tui_color;

/// Values shown by the readout.
#[derive(Debug, Clone)]
pub struct ReadoutData {
    pub color: Color,
    pub history: Vec<Color>,
    pub live_updates: usize,
    pub dragging: Option<Part>,
}

impl ReadoutData {
    pub fn of(model: &Model) -> Self {
        Self {
            color: model.picker.color(),
            history: model.history.clone(),
            live_updates: model.live_updates,
            dragging: model.picker.dragging(),
        }
    }

    /// Label/value rows for the selected color.
    pub fn notations(&self) -> [(&'static str, String); 4] {
        [
            ("hex", self.color.to_hex()),
            ("rgb", css_rgb(&self.color)),
            ("hsl", css_hsl(&self.color)),
            ("hsv", css_hsv(&self.color)),
        ]
    }
}

pub struct Readout {
    props: Props,
    data: ReadoutData,
}

impl Readout {
    pub fn new(data: ReadoutData) -> Self {
        Self {
            props: Props::default(),
            data,
        }
    }
}

impl MockComponent for Readout {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Color ").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Swatch
                Constraint::Length(5), // Notations
                Constraint::Length(1), // Interaction state
                Constraint::Min(0),    // History
            ])
            .split(inner);

        let swatch = Paragraph::new("").style(Style::default().bg(tui_color(&self.data.color)));
        frame.render_widget(swatch, rows[0]);

        let label_style = Style::default().fg(TermColor::Gray);
        let mut lines = vec![Line::from("")];
        lines.extend(self.data.notations().into_iter().map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!(" {label:<4}"), label_style),
                Span::raw(value),
            ])
        }));
        frame.render_widget(Paragraph::new(lines), rows[1]);

        let status = match self.data.dragging {
            Some(Part::Field) => format!(" dragging field ({} live)", self.data.live_updates),
            Some(Part::Slider) => format!(" dragging hue ({} live)", self.data.live_updates),
            None if self.data.live_updates > 0 => {
                format!(" {} live, uncommitted", self.data.live_updates)
            }
            None => String::new(),
        };
        frame.render_widget(
            Paragraph::new(status).style(Style::default().add_modifier(Modifier::ITALIC)),
            rows[2],
        );

        let mut history = vec![Line::from(Span::styled(
            " Recent",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        history.extend(self.data.history.iter().rev().map(|color| {
            Line::from(vec![
                Span::raw(" "),
                Span::styled("  ", Style::default().bg(tui_color(color))),
                Span::raw(format!(" {}", color.to_hex())),
            ])
        }));
        frame.render_widget(Paragraph::new(history), rows[3]);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for Readout {
    fn on(&mut self, _ev: Event<UserEvent>) -> Option<Msg> {
        None
    }
}
