//! Screens and the loop that moves the picker model between them.
//!
//! Every screen owns a tui-realm `Application`. Only the [`Context`] survives
//! a transition: the outgoing screen hands it back in `on_destroy` and the
//! incoming one receives it in `on_create`.

use std::io::Stdout;

use color_eyre::eyre::{OptionExt, Result};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::debug;

use super::Model;
use super::activities::{MainActivity, MarkupPreviewActivity};

pub type Term = Terminal<CrosstermBackend<Stdout>>;

/// State carried across screens.
pub struct Context {
    pub model: Model,
}

/// Why a screen stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
    SwitchToMain,
    SwitchToMarkupPreview,
}

impl ExitReason {
    /// Screen to open next; `None` ends the session.
    fn next(&self) -> Option<Screen> {
        match self {
            Self::Quit => None,
            Self::SwitchToMain => Some(Screen::Main),
            Self::SwitchToMarkupPreview => Some(Screen::MarkupPreview),
        }
    }
}

pub trait Activity {
    fn on_create(&mut self, context: Context);

    /// Draw once and process one poll of input.
    fn on_draw(&mut self, terminal: &mut Term) -> Result<()>;

    fn will_umount(&self) -> Option<&ExitReason>;

    fn on_destroy(&mut self) -> Option<Context>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Main,
    MarkupPreview,
}

impl Screen {
    fn open(self) -> Box<dyn Activity> {
        match self {
            Self::Main => Box::<MainActivity>::default(),
            Self::MarkupPreview => Box::<MarkupPreviewActivity>::default(),
        }
    }
}

pub struct ActivityManager {
    context: Option<Context>,
    screen: Screen,
}

impl ActivityManager {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(context),
            screen: Screen::Main,
        }
    }

    /// Context returned by the last screen, if it gave one back.
    pub fn into_context(self) -> Option<Context> {
        self.context
    }

    /// Run screens until one quits.
    pub fn run(&mut self, terminal: &mut Term) -> Result<()> {
        loop {
            let mut activity = self.screen.open();
            let context = self
                .context
                .take()
                .ok_or_eyre("previous screen kept the picker context")?;
            activity.on_create(context);

            let reason = loop {
                activity.on_draw(terminal)?;
                if let Some(reason) = activity.will_umount() {
                    break reason.clone();
                }
            };
            self.context = activity.on_destroy();

            let Some(next) = reason.next() else {
                return Ok(());
            };
            debug!(from = ?self.screen, to = ?next, "switching screen");
            self.screen = next;
        }
    }
}
