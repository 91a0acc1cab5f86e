//! Main activity - the interactive picker screen.

use std::time::Duration;

use color_eyre::eyre::{OptionExt, Result};
use ratatui::{
    Frame,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{Application, EventListenerCfg, PollStrategy, Update as _};

use crate::color::Color;
use crate::picker::{Focus, Part};
use crate::pointer::{Key, PointerEvent, Rect as PointerRect, Update};
use crate::tui::Model;
use crate::tui::activity::{Activity, Context, ExitReason, Term};
use crate::tui::components::{
    MAIN_FOOTER_ACTIONS, PickerView, PickerViewState, Readout, ReadoutData, format_footer,
    render_help, tui_color,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    /// Field, slider, input panel and swatches
    Picker,
    /// Color values and commit history (read-only)
    Readout,
}

/// Messages from the picker screen's components, applied by the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Application control
    Quit,
    ShowHelp,
    HideHelp,
    Reset,

    // Keyboard focus inside the picker
    Focus(Focus),

    // Thumb interaction
    KeyPress(Part, Key),
    PointerDown(Part, PointerEvent, PointerRect),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),

    // Input panel
    InputChanged(usize, String),
    InputSubmit(usize),
    InputRevert,
    CycleFormat,

    SelectSwatch(usize),

    /// Picker result, chained after an interaction
    Changed(Update<Color>),

    // Activity transition
    SwitchToMarkupPreview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

type App = Application<Id, Msg, UserEvent>;

/// Title, picker beside readout, status line, and the help overlay on top.
fn draw(frame: &mut Frame, app: &mut App, model: &Model) {
    let [title, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let color = model.picker.color();
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" huepick ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("  ", Style::default().bg(tui_color(&color))),
            Span::raw(format!(" {} ", color.to_hex())),
        ])),
        title,
    );

    let [left, right] =
        Layout::horizontal([Constraint::Min(30), Constraint::Length(34)]).areas(body);
    app.view(&Id::Picker, frame, left);
    app.view(&Id::Readout, frame, right);

    let hint = match &model.message {
        Some(message) => message.clone(),
        None => format_footer(MAIN_FOOTER_ACTIONS, &[("adjust", "arrows")]),
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().add_modifier(Modifier::DIM)),
        status,
    );

    if model.show_help {
        render_help(frame);
    }
}

/// Mount fresh picker and readout components built from `model`.
fn mount(app: &mut App, model: &Model) -> Result<()> {
    for id in [Id::Picker, Id::Readout] {
        if app.mounted(&id) {
            app.umount(&id)?;
        }
    }
    app.mount(
        Id::Picker,
        Box::new(PickerView::new(PickerViewState::of(&model.picker))),
        vec![],
    )?;
    app.mount(
        Id::Readout,
        Box::new(Readout::new(ReadoutData::of(model))),
        vec![],
    )?;
    app.active(&Id::Picker)?;
    Ok(())
}

/// The picker screen.
#[derive(Default)]
pub struct MainActivity {
    app: Option<App>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl MainActivity {
    /// Feed component messages through the model. Returns true when the
    /// components need rebuilding from the new state.
    fn apply(&mut self, messages: Vec<Msg>) -> Result<bool> {
        let model = &mut self.context.as_mut().ok_or_eyre("picker screen has no context")?.model;
        let mut dirty = false;

        for msg in messages {
            match msg {
                Msg::Quit => self.exit_reason = Some(ExitReason::Quit),
                Msg::SwitchToMarkupPreview => {
                    self.exit_reason = Some(ExitReason::SwitchToMarkupPreview)
                }
                _ => dirty |= msg != Msg::ShowHelp,
            }
            if self.exit_reason.is_some() {
                break;
            }

            // Changed(..) results chain back into the model
            let mut next = Some(msg);
            while let Some(msg) = next {
                next = model.update(Some(msg));
            }
        }
        Ok(dirty)
    }
}

impl Activity for MainActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        );
        if let Err(e) = mount(&mut app, &context.model) {
            tracing::error!(error = %e, "failed to mount picker screen");
        }
        self.context = Some(context);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Term) -> Result<()> {
        let app = self.app.as_mut().ok_or_eyre("picker screen drawn before creation")?;
        let model = &mut self.context.as_mut().ok_or_eyre("picker screen has no context")?.model;

        terminal.draw(|frame| draw(frame, app, model))?;

        // The overlay swallows every key until dismissed
        if model.show_help {
            if let Event::Key(key) = event::read()?
                && matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
                )
            {
                model.show_help = false;
            }
            return Ok(());
        }

        // Poll timeouts surface as errors; nothing to do for them
        let Ok(messages) = app.tick(PollStrategy::Once) else {
            return Ok(());
        };
        if self.apply(messages)? && self.exit_reason.is_none() {
            if let (Some(app), Some(context)) = (self.app.as_mut(), self.context.as_ref()) {
                if let Err(e) = mount(app, &context.model) {
                    tracing::error!(error = %e, "failed to remount picker screen");
                }
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
