//! Syntax highlighting engine using syntect, with themes derived from the
//! selected color.

use std::str::FromStr;
use std::sync::LazyLock;

use ratatui::style::{Color as TuiColor, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{
    Color as SynColor, FontStyle, ScopeSelectors, StyleModifier, Theme, ThemeItem, ThemeSettings,
};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use syntect_tui::into_span;

use crate::color::{Color, HslColor};

/// Default syntaxes, loaded once.
pub static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Syntax highlighter whose theme is built around one accent color.
pub struct Highlighter {
    theme: Theme,
}

impl Highlighter {
    pub fn new(accent: &Color) -> Self {
        Self {
            theme: build_theme(accent),
        }
    }

    pub fn background_color(&self) -> TuiColor {
        self.theme
            .settings
            .background
            .map_or(TuiColor::Reset, to_tui)
    }

    /// Line numbers and borders.
    pub fn gutter_color(&self) -> TuiColor {
        self.theme
            .settings
            .gutter_foreground
            .map_or(TuiColor::DarkGray, to_tui)
    }

    /// One styled line per source line, grammar chosen by `extension`.
    pub fn highlight(&self, code: &str, extension: &str) -> Vec<Line<'static>> {
        let syntax = SYNTAX_SET
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        // LinesWithEndings keeps the newlines syntect needs to close scopes
        LinesWithEndings::from(code)
            .map(|line| {
                let ranges = highlighter
                    .highlight_line(line, &SYNTAX_SET)
                    .unwrap_or_default();
                ranges
                    .into_iter()
                    .filter_map(|segment| into_span(segment).ok())
                    .filter_map(foreground_only)
                    .collect::<Line<'static>>()
            })
            .collect()
    }
}

fn to_tui(c: SynColor) -> TuiColor {
    TuiColor::Rgb(c.r, c.g, c.b)
}

/// Drop the trailing newline and the span background, which would paint
/// over the view's own background. Empty spans are discarded.
fn foreground_only(span: Span<'_>) -> Option<Span<'static>> {
    let content = span.content.trim_end_matches('\n');
    if content.is_empty() {
        return None;
    }
    let kept = Modifier::BOLD | Modifier::ITALIC | Modifier::UNDERLINED;
    let mut style = Style::new().add_modifier(span.style.add_modifier & kept);
    if let Some(fg) = span.style.fg {
        style = style.fg(fg);
    }
    Some(Span::styled(content.to_string(), style))
}

/// A syntect color at hue `accent + offset` with fixed saturation and
/// lightness.
fn tone(accent: &Color, offset: f64, saturation: f64, lightness: f64) -> SynColor {
    let hue = (accent.hue() + offset).rem_euclid(360.0);
    let rgb = Color::from_hsl(HslColor::new(hue, saturation, lightness)).to_rgb();
    SynColor {
        r: rgb.red,
        g: rgb.green,
        b: rgb.blue,
        a: 255,
    }
}

/// Build a dark syntect Theme around `accent`.
fn build_theme(accent: &Color) -> Theme {
    // Greys take a tint of the accent unless it has no hue to give
    let tint = if accent.is_achromatic() { 0.0 } else { 12.0 };

    let settings = ThemeSettings {
        foreground: Some(tone(accent, 0.0, tint, 85.0)),
        background: Some(tone(accent, 0.0, tint, 10.0)),
        caret: Some(tone(accent, 0.0, tint, 85.0)),
        selection: Some(tone(accent, 0.0, tint, 25.0)),
        line_highlight: Some(tone(accent, 0.0, tint, 15.0)),
        gutter: Some(tone(accent, 0.0, tint, 15.0)),
        gutter_foreground: Some(tone(accent, 0.0, tint, 45.0)),
        ..Default::default()
    };

    Theme {
        name: Some(format!("huepick {}", accent.to_hex())),
        author: None,
        settings,
        scopes: build_scope_rules(accent, tint),
    }
}

/// Scope rules for the markup, JSON and YAML the preview shows.
fn build_scope_rules(accent: &Color, tint: f64) -> Vec<ThemeItem> {
    let vivid = if accent.is_achromatic() { 0.0 } else { 65.0 };

    let rule = |scope: &str, color: SynColor, font_style: Option<FontStyle>| -> ThemeItem {
        ThemeItem {
            scope: ScopeSelectors::from_str(scope).unwrap_or_default(),
            style: StyleModifier {
                foreground: Some(color),
                background: None,
                font_style,
            },
        }
    };

    vec![
        rule(
            "comment, punctuation.definition.comment",
            tone(accent, 0.0, tint, 45.0),
            Some(FontStyle::ITALIC),
        ),
        rule(
            "punctuation, meta.brace, keyword.operator",
            tone(accent, 0.0, tint, 70.0),
            None,
        ),
        // Element names carry the accent itself
        rule(
            "entity.name.tag, punctuation.definition.tag",
            tone(accent, 0.0, vivid, 65.0),
            Some(FontStyle::BOLD),
        ),
        rule(
            "entity.other.attribute-name, support.type.property-name, \
             meta.mapping.key string, entity.name.tag.yaml",
            tone(accent, 40.0, vivid, 72.0),
            None,
        ),
        rule(
            "string, string.quoted, string.unquoted",
            tone(accent, 150.0, vivid, 70.0),
            None,
        ),
        rule(
            "constant, constant.numeric, constant.language, constant.character.entity",
            tone(accent, 210.0, vivid, 72.0),
            None,
        ),
        rule(
            "keyword, storage, invalid.deprecated",
            tone(accent, 300.0, vivid, 70.0),
            None,
        ),
    ]
}
