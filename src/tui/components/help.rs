//! Keybinding help: the modal overlay and the one-line footers.

use crossterm_actions::{AppEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

use crate::tui::{AppAction, dispatcher};

const QUIT: AppAction = AppAction::Tui(TuiEvent::App(AppEvent::Quit));
const HELP: AppAction = AppAction::Tui(TuiEvent::App(AppEvent::Help));
const RESET: AppAction = AppAction::Tui(TuiEvent::App(AppEvent::Refresh));
const NEXT: AppAction = AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next));
const PREV: AppAction = AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev));

/// Dispatcher-bound actions, by heading.
const BOUND: &[(&str, &[AppAction])] = &[
    ("General", &[QUIT, HELP, RESET, AppAction::MarkupPreview]),
    ("Focus", &[NEXT, PREV]),
    (
        "Thumbs",
        &[
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)),
        ],
    ),
    ("Input panel", &[AppAction::CycleFormat]),
];

/// Keys the picker view handles itself, as (description, keys).
const UNBOUND: &[(&str, &str)] = &[
    ("Hue to 0 / 359", "Home, End"),
    ("Commit field", "Enter"),
    ("Discard edits", "Esc"),
    ("Delete character", "Backspace"),
    ("Pick swatch", "Enter"),
    ("Drag thumb", "Mouse"),
];

pub const MAIN_FOOTER_ACTIONS: &[AppAction] = &[
    NEXT,
    AppAction::CycleFormat,
    AppAction::MarkupPreview,
    HELP,
    RESET,
    QUIT,
];

pub const MARKUP_PREVIEW_FOOTER_ACTIONS: &[AppAction] = &[NEXT, AppAction::MarkupPreview, HELP, QUIT];

/// A heading and its (description, keys) rows.
type HelpSection = (&'static str, Vec<(String, String)>);

/// Every help row, looked up in the dispatcher so rebinding shows up here.
fn help_sections() -> Vec<HelpSection> {
    let entries = dispatcher().config().help_entries();

    let mut sections: Vec<HelpSection> = BOUND
        .iter()
        .map(|(heading, actions)| {
            let rows = actions
                .iter()
                .filter_map(|action| entries.get(action))
                .map(|entry| {
                    let keys: Vec<String> = entry.keys.iter().map(ToString::to_string).collect();
                    (
                        entry.description.unwrap_or("-").to_string(),
                        keys.join(", "),
                    )
                })
                .collect();
            (*heading, rows)
        })
        .collect();

    sections.push((
        "Picker",
        UNBOUND
            .iter()
            .map(|(desc, keys)| (desc.to_string(), keys.to_string()))
            .collect(),
    ));
    sections
}

/// One-line footer: `word: key` pairs for `actions`, then `extras`.
pub fn format_footer(actions: &[AppAction], extras: &[(&str, &str)]) -> String {
    let entries = dispatcher().config().help_entries();

    let bound = actions.iter().filter_map(|action| {
        let entry = entries.get(action)?;
        let key = entry.keys.first()?;
        let word = entry.description?.split_whitespace().next()?.to_lowercase();
        Some(format!("{word}: {key}"))
    });
    let extra = extras.iter().map(|(word, key)| format!("{word}: {key}"));

    bound.chain(extra).collect::<Vec<_>>().join(" | ")
}

/// `width` x `height` cells centred in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Draw the help overlay on top of the current frame.
pub fn render_help(frame: &mut Frame) {
    let sections = help_sections();

    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let keys = Style::default().fg(Color::Gray);

    let mut rows = Vec::new();
    for (title, entries) in &sections {
        rows.push(Row::new([Cell::from(*title).style(heading), Cell::from("")]));
        rows.extend(entries.iter().map(|(desc, binding)| {
            Row::new([
                Cell::from(format!("  {desc}")),
                Cell::from(binding.clone()).style(keys),
            ])
        }));
        rows.push(Row::new([Cell::from(""), Cell::from("")]));
    }

    // Rows plus borders and the close hint
    let height = rows.len() as u16 + 3;
    let area = centered(frame.area(), 56, height);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keybindings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, hint] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    let table = Table::new(rows, [Constraint::Length(24), Constraint::Min(10)]);
    frame.render_widget(table, body);

    let close = Paragraph::new(Line::styled(
        "Esc, ? or Enter closes",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(close, hint);
}
