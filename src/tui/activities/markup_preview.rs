//! Markup preview: the rendered fragment plus JSON and YAML state dumps,
//! syntax highlighted and scrollable.

use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use crossterm_actions::{NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tuirealm::{
    Application, Component, Event, EventListenerCfg, MockComponent, PollStrategy, State,
    StateValue,
    command::{Cmd, CmdResult, Direction, Position},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::picker::ColorPicker;
use crate::render::{PickerSnapshot, render_markup};
use crate::tui::activities::Msg as MainMsg;
use crate::tui::activity::{Activity, Context, ExitReason, Term};
use crate::tui::components::{MARKUP_PREVIEW_FOOTER_ACTIONS, format_footer};
use crate::tui::highlighting::Highlighter;
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Document,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    Back,
    Step(isize),
    Scrolled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

/// Documents the preview can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewKind {
    #[default]
    Markup,
    Json,
    Yaml,
}

impl PreviewKind {
    const ALL: [PreviewKind; 3] = [Self::Markup, Self::Json, Self::Yaml];

    pub fn tab_label(self) -> &'static str {
        match self {
            Self::Markup => "HTML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// Extension syntect picks the grammar by.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    fn offset(self, by: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let at = Self::ALL.iter().position(|k| *k == self).unwrap_or(0) as isize;
        Self::ALL[(at + by).rem_euclid(len) as usize]
    }

    /// Document text for the picker's current state.
    pub fn source(self, picker: &ColorPicker) -> String {
        let snapshot = PickerSnapshot::of(picker);
        let text = match self {
            Self::Markup => Ok(render_markup(picker)),
            Self::Json => snapshot.to_json().map_err(|e| e.to_string()),
            Self::Yaml => snapshot.to_yaml().map_err(|e| e.to_string()),
        };
        text.unwrap_or_else(|e| format!("serialization failed: {e}"))
    }
}

/// Scroll offset over a fixed number of lines.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Viewport {
    top: usize,
    height: usize,
    total: usize,
}

impl Viewport {
    fn max_top(&self) -> usize {
        self.total.saturating_sub(self.height)
    }

    fn scroll_by(&mut self, delta: isize) {
        self.top = self.top.saturating_add_signed(delta).min(self.max_top());
    }

    fn resize(&mut self, height: usize) {
        self.height = height;
        self.top = self.top.min(self.max_top());
    }
}

/// Highlighted document with a line-number gutter.
pub struct DocumentView {
    props: Props,
    lines: Vec<Line<'static>>,
    view: Viewport,
    background: Color,
    gutter: Color,
}

impl DocumentView {
    pub fn new(lines: Vec<Line<'static>>, background: Color, gutter: Color) -> Self {
        let view = Viewport {
            total: lines.len(),
            height: 20,
            top: 0,
        };
        Self {
            props: Props::default(),
            lines,
            view,
            background,
            gutter,
        }
    }

    fn numbered(&self, from: usize, count: usize) -> Vec<Line<'static>> {
        let width = self.lines.len().to_string().len().max(3);
        let gutter = Style::default().fg(self.gutter).bg(self.background);
        self.lines
            .iter()
            .enumerate()
            .skip(from)
            .take(count)
            .map(|(n, line)| {
                let mut spans = Vec::with_capacity(line.spans.len() + 1);
                spans.push(Span::styled(format!("{:>width$} ", n + 1), gutter));
                spans.extend(line.spans.iter().cloned());
                Line::from(spans)
            })
            .collect()
    }
}

impl MockComponent for DocumentView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let base = Style::default().bg(self.background);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(base.fg(self.gutter))
            .style(base);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.view.resize(usize::from(inner.height));
        let visible = self.numbered(self.view.top, self.view.height);
        frame.render_widget(Paragraph::new(visible).style(base), inner);

        if self.view.total > self.view.height {
            let mut state = ScrollbarState::new(self.view.max_top()).position(self.view.top);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut state,
            );
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.view.top))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        let before = self.view.top;
        let page = self.view.height.max(1) as isize;
        match cmd {
            Cmd::Move(Direction::Up) => self.view.scroll_by(-1),
            Cmd::Move(Direction::Down) => self.view.scroll_by(1),
            Cmd::Scroll(Direction::Up) => self.view.scroll_by(-page),
            Cmd::Scroll(Direction::Down) => self.view.scroll_by(page),
            Cmd::GoTo(Position::Begin) => self.view.top = 0,
            Cmd::GoTo(Position::End) => self.view.top = self.view.max_top(),
            _ => return CmdResult::None,
        }
        if self.view.top == before {
            CmdResult::None
        } else {
            CmdResult::Changed(self.state())
        }
    }
}

impl Component<Msg, UserEvent> for DocumentView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key) = ev else {
            return None;
        };

        let cmd = match key.code {
            Key::Esc => return Some(Msg::Back),
            Key::PageUp => Cmd::Scroll(Direction::Up),
            Key::PageDown => Cmd::Scroll(Direction::Down),
            Key::Home => Cmd::GoTo(Position::Begin),
            Key::End => Cmd::GoTo(Position::End),
            _ => {
                let action = dispatcher().dispatch(&key)?;
                match handle_global_app_events(&action) {
                    Some(MainMsg::Quit) => return Some(Msg::Quit),
                    Some(MainMsg::SwitchToMarkupPreview) => return Some(Msg::Back),
                    Some(_) => return None,
                    None => {}
                }
                match action {
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                        Cmd::Move(Direction::Up)
                    }
                    AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                        Cmd::Move(Direction::Down)
                    }
                    AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => {
                        return Some(Msg::Step(1));
                    }
                    AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => {
                        return Some(Msg::Step(-1));
                    }
                    _ => return None,
                }
            }
        };

        match self.perform(cmd) {
            CmdResult::Changed(_) => Some(Msg::Scrolled),
            _ => None,
        }
    }
}

/// Tab strip naming every document, the current one highlighted.
fn tab_strip(current: PreviewKind) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " Markup Preview ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for kind in PreviewKind::ALL {
        let style = if kind == current {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", kind.tab_label()), style));
    }
    Line::from(spans)
}

#[derive(Default)]
pub struct MarkupPreviewActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
    highlighter: Option<Highlighter>,
    kind: PreviewKind,
    needs_clear: bool,
}

impl MarkupPreviewActivity {
    fn document(&self) -> DocumentView {
        let (background, gutter) = self
            .highlighter
            .as_ref()
            .map(|h| (h.background_color(), h.gutter_color()))
            .unwrap_or((Color::Reset, Color::DarkGray));
        let lines = match (&self.highlighter, &self.context) {
            (Some(highlighter), Some(context)) => highlighter.highlight(
                &self.kind.source(&context.model.picker),
                self.kind.extension(),
            ),
            _ => Vec::new(),
        };
        DocumentView::new(lines, background, gutter)
    }

    /// Move `step` documents along and remount the view.
    fn step(&mut self, step: isize) {
        self.kind = self.kind.offset(step);
        self.needs_clear = true;

        let document = self.document();
        if let Some(app) = self.app.as_mut()
            && let Err(e) = show_document(app, document, true)
        {
            tracing::error!(error = %e, kind = ?self.kind, "failed to remount preview document");
        }
    }
}

/// Mount `document` (replacing any current one) and give it focus.
fn show_document(
    app: &mut Application<Id, Msg, UserEvent>,
    document: DocumentView,
    replace: bool,
) -> Result<()> {
    if replace {
        app.remount(Id::Document, Box::new(document), vec![])?;
    } else {
        app.mount(Id::Document, Box::new(document), vec![])?;
    }
    app.active(&Id::Document)?;
    Ok(())
}

impl Activity for MarkupPreviewActivity {
    fn on_create(&mut self, context: Context) {
        self.highlighter = Some(Highlighter::new(&context.model.picker.color()));
        self.context = Some(context);

        let mut app = Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        );
        if let Err(e) = show_document(&mut app, self.document(), false) {
            tracing::error!(error = %e, "failed to mount preview document");
        }
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Term) -> Result<()> {
        // Documents differ in length; stale cells linger otherwise
        if self.needs_clear {
            terminal.clear()?;
            self.needs_clear = false;
        }

        let kind = self.kind;
        let app = self
            .app
            .as_mut()
            .ok_or_else(|| eyre!("markup preview drawn before creation"))?;

        terminal.draw(|frame| {
            let [title, body, status] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .areas(frame.area());

            frame.render_widget(Paragraph::new(tab_strip(kind)), title);
            app.view(&Id::Document, frame, body);

            let footer = format_footer(
                MARKUP_PREVIEW_FOOTER_ACTIONS,
                &[("page", "PgUp/PgDn"), ("back", "Esc")],
            );
            frame.render_widget(
                Paragraph::new(footer).style(Style::default().add_modifier(Modifier::DIM)),
                status,
            );
        })?;

        let messages = app.tick(PollStrategy::Once).unwrap_or_default();
        for msg in messages {
            match msg {
                Msg::Quit => {
                    self.exit_reason = Some(ExitReason::Quit);
                    break;
                }
                Msg::Back => {
                    self.exit_reason = Some(ExitReason::SwitchToMain);
                    break;
                }
                Msg::Step(step) => self.step(step),
                Msg::Scrolled => {}
            }
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}
