use huepick::input_panel::{Rejection, format_number, parse_channel};
use huepick::{Color, ColorFormat, InputPanel, PanelFields, cycle_format};

fn red() -> Color {
    Color::from_rgb(255, 0, 0)
}

#[test]
fn test_cycle_visits_every_format_in_order() {
    let all = ColorFormat::ALL;
    assert_eq!(cycle_format(ColorFormat::Hex, &all), ColorFormat::Hsl);
    assert_eq!(cycle_format(ColorFormat::Hsl, &all), ColorFormat::Rgb);
    assert_eq!(cycle_format(ColorFormat::Rgb, &all), ColorFormat::Hex);
    assert_eq!(cycle_format(ColorFormat::Rgb, &[]), ColorFormat::Hex);
}

#[test]
fn test_cycle_skips_disallowed_formats() {
    let allowed = [ColorFormat::Rgb, ColorFormat::Hex];
    assert_eq!(cycle_format(ColorFormat::Hex, &allowed), ColorFormat::Rgb);
    assert_eq!(cycle_format(ColorFormat::Rgb, &allowed), ColorFormat::Hex);
    // A current format outside the list restarts at the first allowed one
    assert_eq!(cycle_format(ColorFormat::Hsl, &allowed), ColorFormat::Hex);
}

#[test]
fn test_panel_with_hex_and_hsl_only() {
    let mut panel = InputPanel::new(&[ColorFormat::Hsl, ColorFormat::Hex], ColorFormat::Hex, &red());
    assert_eq!(panel.allowed_formats(), &[ColorFormat::Hex, ColorFormat::Hsl]);
    assert!(panel.show_swap());
    assert_eq!(panel.cycle(&red()), ColorFormat::Hsl);
    assert_eq!(panel.cycle(&red()), ColorFormat::Hex);
}

#[test]
fn test_single_format_hides_swap() {
    let panel = InputPanel::new(&[ColorFormat::Rgb], ColorFormat::Hex, &red());
    assert!(!panel.show_swap());
    assert_eq!(panel.format(), ColorFormat::Rgb);
    assert_eq!(panel.fields(), &PanelFields::Rgb(["255".into(), "0".into(), "0".into()]));
}

#[test]
fn test_empty_allowed_list_means_all() {
    let panel = InputPanel::new(&[], ColorFormat::Hsl, &red());
    assert_eq!(panel.allowed_formats(), &ColorFormat::ALL);
    assert_eq!(panel.format(), ColorFormat::Hsl);
}

#[test]
fn test_channel_ranges_reject_out_of_bounds() {
    assert_eq!(parse_channel(ColorFormat::Rgb, 0, "-1"), None);
    assert_eq!(parse_channel(ColorFormat::Rgb, 1, "256"), None);
    assert_eq!(parse_channel(ColorFormat::Rgb, 2, "255"), Some(255.0));
    assert_eq!(parse_channel(ColorFormat::Hsl, 0, "5000"), None);
    assert_eq!(parse_channel(ColorFormat::Hsl, 0, "360"), Some(360.0));
    assert_eq!(parse_channel(ColorFormat::Hsl, 1, "101"), None);
    assert_eq!(parse_channel(ColorFormat::Hsl, 2, " 42.5 "), Some(42.5));
    assert_eq!(parse_channel(ColorFormat::Hsl, 2, "NaN"), None);
    assert_eq!(parse_channel(ColorFormat::Hsl, 3, "1"), None);
    assert_eq!(parse_channel(ColorFormat::Hex, 0, "1"), None);
}

#[test]
fn test_rejected_channel_leaves_color_and_other_edits() {
    let mut panel = InputPanel::new(&ColorFormat::ALL, ColorFormat::Rgb, &red());
    panel.edit(0, "12");
    panel.edit(1, "300");

    let rejection = panel.commit(1, &red()).unwrap_err();
    assert_eq!(
        rejection,
        Rejection::Channel {
            index: 1,
            text: "300".to_string()
        }
    );
    assert!(panel.is_dirty(0));
    assert!(panel.is_dirty(1));
    assert_eq!(panel.fields().text(0), Some("12"));

    let color = panel.commit(0, &red()).unwrap();
    assert_eq!(color.to_hex(), "#0c0000");
    assert!(!panel.is_dirty(0));
    assert_eq!(panel.fields().text(1), Some("300"));
}

#[test]
fn test_hsl_commit_normalizes_text() {
    let mut panel = InputPanel::new(&ColorFormat::ALL, ColorFormat::Hsl, &red());
    panel.edit(0, "120.004");
    let color = panel.commit(0, &red()).unwrap();
    assert_eq!(color.to_hex(), "#00ff00");
    assert_eq!(panel.fields().text(0), Some("120"));
}

#[test]
fn test_achromatic_hex_keeps_current_hue() {
    let current = Color::from_rgb(0, 0, 255);
    let mut panel = InputPanel::new(&ColorFormat::ALL, ColorFormat::Hex, &current);
    panel.edit(0, "#808080");
    let color = panel.commit(0, &current).unwrap();
    assert_eq!(color.to_hex(), "#808080");
    assert_eq!(color.hue(), 240.0);
}

#[test]
fn test_bad_index_is_reported() {
    let mut panel = InputPanel::new(&ColorFormat::ALL, ColorFormat::Hex, &red());
    assert!(!panel.edit(1, "x"));
    assert_eq!(panel.commit(1, &red()), Err(Rejection::NoSuchField(1)));
}

#[test]
fn test_sync_discards_edits() {
    let mut panel = InputPanel::new(&ColorFormat::ALL, ColorFormat::Hex, &red());
    panel.edit(0, "#12");
    panel.sync(&Color::from_rgb(0, 0, 255));
    assert!(!panel.is_dirty(0));
    assert_eq!(panel.fields().text(0), Some("#0000ff"));
}

#[test]
fn test_number_formatting() {
    assert_eq!(format_number(11.111111), "11.11");
    assert_eq!(format_number(-0.001), "0");
    assert_eq!(format_number(50.0), "50");
    assert_eq!(format_number(64.705882), "64.71");
}

#[test]
fn test_format_labels() {
    assert_eq!(ColorFormat::Hex.label(), "HEX");
    assert_eq!(ColorFormat::Rgb.field_labels(), &["Red", "Green", "Blue"]);
    assert_eq!("HSL".parse::<ColorFormat>(), Ok(ColorFormat::Hsl));
    assert!("cmyk".parse::<ColorFormat>().is_err());
}
