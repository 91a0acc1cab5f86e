//! Interactive terminal picker.
//!
//! Screens are tui-realm applications driven by an [`activity::ActivityManager`];
//! the [`Model`] wrapping the [`ColorPicker`](crate::ColorPicker) is the only
//! state that moves between them. Keys resolve to [`AppAction`]s through one
//! shared dispatcher so footers and the help overlay read the same bindings.

mod activities;
mod activity;
mod components;
mod highlighting;
mod model;

use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::sync::LazyLock;

use color_eyre::eyre::{Result, WrapErr};
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, TuiEvent, TuiRealmDispatcher,
    defaults, keys,
};
use ratatui::{
    Terminal,
    crossterm::execute,
    crossterm::event::{DisableMouseCapture, EnableMouseCapture},
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};
use tracing::{info, warn};

use crate::config::PickerConfig;

pub use highlighting::{Highlighter, SYNTAX_SET};
pub use model::Model;

use activities::Msg;
use activity::{ActivityManager, Context};

/// A key press after dispatch: a stock event or one of the picker's own.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    Tui(TuiEvent),
    /// Open or close the markup preview
    MarkupPreview,
    /// Next input panel format
    CycleFormat,
}

fn build_dispatcher() -> TuiRealmDispatcher<AppAction> {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    let stock = defaults::emacs_defaults();
    for binding in stock.bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    let own = [
        (AppAction::MarkupPreview, 'm', "View markup preview"),
        (AppAction::CycleFormat, 'f', "Format cycle"),
    ];
    for (act, key, description) in own {
        config.bind(
            ActionBinding::builder()
                .action(act)
                .key(keys::char(key))
                .description(description)
                .build(),
        );
    }

    config.compile();
    TuiRealmDispatcher::new(config)
}

pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(build_dispatcher);

pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Message for actions every screen reacts to the same way.
pub fn handle_global_app_events(action: &AppAction) -> Option<Msg> {
    Some(match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Msg::Quit,
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Msg::ShowHelp,
        AppAction::Tui(TuiEvent::App(AppEvent::Refresh)) => Msg::Reset,
        AppAction::MarkupPreview => Msg::SwitchToMarkupPreview,
        AppAction::CycleFormat => Msg::CycleFormat,
        AppAction::Tui(_) => return None,
    })
}

/// Raw mode, alternate screen and mouse capture, undone on drop.
struct Session {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Session {
    fn start() -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout()))?,
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let restored = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen)
            .and_then(|()| disable_raw_mode());
        if let Err(e) = restored {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// Run the interactive picker.
///
/// With `save_path`, the final color and input format are written back to
/// that configuration file on exit.
pub fn run(config: PickerConfig, save_path: Option<PathBuf>) -> Result<()> {
    let model = Model::from_config(config).wrap_err("Invalid picker configuration")?;
    let mut manager = ActivityManager::new(Context { model });

    {
        let mut session = Session::start().wrap_err("Failed to set up the terminal")?;
        manager.run(&mut session.terminal)?;
    }

    let (Some(path), Some(context)) = (save_path, manager.into_context()) else {
        return Ok(());
    };
    let mut config = context.model.config.clone();
    config.update_from_picker(&context.model.picker);
    config
        .save(&path)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "saved picker state");
    eprintln!("Saved configuration to {}", path.display());
    Ok(())
}
