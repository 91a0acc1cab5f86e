//! Fixed palette of selectable colors.

use crate::color::{Color, ColorError};

/// A labelled list of swatches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorPalette {
    label: Option<String>,
    colors: Vec<Color>,
}

impl ColorPalette {
    pub fn new(label: Option<String>, colors: Vec<Color>) -> Self {
        Self { label, colors }
    }

    /// Build a palette from color strings in any accepted syntax.
    pub fn parse<S: AsRef<str>>(label: Option<String>, colors: &[S]) -> Result<Self, ColorError> {
        let colors = colors
            .iter()
            .map(|c| c.as_ref().parse::<Color>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(label, colors))
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Index of the first swatch showing the same channels as `color`.
    pub fn active_index(&self, color: &Color) -> Option<usize> {
        self.colors.iter().position(|c| c.same_rgb(color))
    }
}
