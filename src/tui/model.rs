//! Application model for the TUI.

use tracing::debug;

use crate::color::Color;
use crate::config::{ConfigError, PickerConfig};
use crate::picker::{ColorPicker, Focus};
use crate::pointer::{Key, Update};

use super::activities::Msg;

/// Committed colors kept for the readout.
pub const HISTORY_LIMIT: usize = 8;

/// Application model containing all state.
pub struct Model {
    pub picker: ColorPicker,
    /// Settings the picker was built from, written back on save
    pub config: PickerConfig,
    /// Color restored by a reset
    pub initial: Color,

    /// Committed colors, oldest first
    pub history: Vec<Color>,
    /// Live updates since the last commit
    pub live_updates: usize,

    // UI state
    pub show_help: bool,
    pub message: Option<String>,
    pub quit: bool,
}

impl Model {
    /// Build the picker from layered configuration.
    pub fn from_config(config: PickerConfig) -> Result<Self, ConfigError> {
        let options = config.to_picker_options()?;
        let picker = ColorPicker::new(options);
        let initial = picker.color();
        Ok(Self {
            picker,
            config,
            initial,
            history: Vec::new(),
            live_updates: 0,
            show_help: false,
            message: None,
            quit: false,
        })
    }

    /// Move keyboard focus, committing an edited input being left.
    fn move_focus(&mut self, target: Focus) -> Option<Msg> {
        let blurred = match self.picker.focus() {
            Some(Focus::Input(index)) if target != Focus::Input(index) => {
                self.picker.input_blur(index)
            }
            _ => None,
        };
        self.picker.set_focus(Some(target));
        blurred.map(Msg::Changed)
    }

    fn record(&mut self, update: Update<Color>) {
        match update {
            Update::Live(_) => self.live_updates += 1,
            Update::Committed(color) => {
                debug!(color = %color, live = self.live_updates, "interaction committed");
                self.live_updates = 0;
                if self.history.last().is_none_or(|last| !last.same_rgb(&color)) {
                    self.history.push(color);
                }
                if self.history.len() > HISTORY_LIMIT {
                    self.history.remove(0);
                }
                self.message = None;
            }
        }
    }
}

impl tuirealm::Update<Msg> for Model {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;

        match msg {
            Msg::Quit => {
                self.quit = true;
                None
            }
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }
            Msg::HideHelp => {
                self.show_help = false;
                None
            }
            Msg::Reset => {
                self.picker.set_selected_color(self.initial);
                self.message = Some(format!("Reset to {}", self.initial));
                None
            }

            Msg::Focus(focus) => self.move_focus(focus),

            // Terminals report presses only, so each press is a down/up pair
            Msg::KeyPress(part, key) => {
                if let Some(live) = self.picker.key_down(part, key) {
                    self.record(live);
                }
                self.picker.key_up(part, key).map(Msg::Changed)
            }

            Msg::PointerDown(part, event, rect) => {
                Some(Msg::Changed(self.picker.pointer_down(part, event, rect)))
            }
            Msg::PointerMove(event) => self.picker.pointer_move(event).map(Msg::Changed),
            Msg::PointerUp(event) => self.picker.pointer_up(event).map(Msg::Changed),

            Msg::InputChanged(index, text) => {
                self.picker.input_change(index, &text);
                None
            }
            Msg::InputSubmit(index) => match self.picker.input_key_down(index, Key::Enter) {
                Some(update) => Some(Msg::Changed(update)),
                None => {
                    let format = self.picker.panel().format();
                    let label = format.field_labels().get(index).copied().unwrap_or("?");
                    self.message = Some(format!("Invalid {label} value"));
                    None
                }
            },
            Msg::InputRevert => {
                let color = self.picker.color();
                self.picker.set_selected_color(color);
                None
            }

            Msg::CycleFormat => {
                let format = self.picker.cycle_format();
                self.message = Some(format!("Format: {}", format.label()));
                None
            }
            Msg::SelectSwatch(index) => self.picker.select_swatch(index).map(Msg::Changed),

            Msg::Changed(update) => {
                self.record(update);
                None
            }

            // Handled by the activity
            Msg::SwitchToMarkupPreview => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use tuirealm::Update as _;

    use super::*;
    use crate::picker::Part;

    fn model(color: &str) -> Model {
        let mut config = PickerConfig::default();
        config.picker.selected_color = Some(color.to_string());
        config.palette.swatches = vec!["#00ff00".into(), "#0000ff".into()];
        Model::from_config(config).unwrap()
    }

    fn drain(model: &mut Model, msg: Msg) {
        let mut current = Some(msg);
        while let Some(m) = current {
            current = model.update(Some(m));
        }
    }

    #[test]
    fn key_press_records_one_commit() {
        let mut model = model("#ff0000");
        drain(&mut model, Msg::KeyPress(Part::Slider, Key::ArrowRight));
        assert_eq!(model.picker.color().to_hex(), "#ff0400");
        assert_eq!(model.history.len(), 1);
        assert_eq!(model.live_updates, 0);
    }

    #[test]
    fn leaving_an_edited_input_commits_it() {
        let mut model = model("#ff0000");
        drain(&mut model, Msg::Focus(Focus::Input(0)));
        drain(&mut model, Msg::InputChanged(0, "#00ff00".into()));
        drain(&mut model, Msg::Focus(Focus::FieldThumb));
        assert_eq!(model.picker.color().to_hex(), "#00ff00");
        assert_eq!(model.picker.focus(), Some(Focus::FieldThumb));
        assert_eq!(model.history.len(), 1);
    }

    #[test]
    fn rejected_input_sets_message() {
        let mut model = model("#ff0000");
        drain(&mut model, Msg::InputChanged(0, "#zz".into()));
        drain(&mut model, Msg::InputSubmit(0));
        assert_eq!(model.picker.color().to_hex(), "#ff0000");
        assert_eq!(model.message.as_deref(), Some("Invalid Hex value"));
        assert!(model.history.is_empty());
    }

    #[test]
    fn reset_restores_initial_color() {
        let mut model = model("#ff0000");
        drain(&mut model, Msg::SelectSwatch(1));
        assert_eq!(model.picker.color().to_hex(), "#0000ff");
        drain(&mut model, Msg::Reset);
        assert_eq!(model.picker.color().to_hex(), "#ff0000");
    }

    #[test]
    fn history_is_capped() {
        let mut model = model("#ff0000");
        for _ in 0..(HISTORY_LIMIT + 3) {
            drain(&mut model, Msg::KeyPress(Part::Slider, Key::ArrowRight));
        }
        assert_eq!(model.history.len(), HISTORY_LIMIT);
    }
}
