use approx::assert_relative_eq;
use huepick::color::{Color, ColorError, HslColor, HsvColor, normalize_hue, round_half_up};
use huepick::render::{css_hsl, css_hsv, css_rgb};

#[test]
fn test_hex_roundtrip_through_hsl() {
    for hex in ["#9BA5AF", "#23450b", "#00121D", "#002A44", "#ff6200", "#000000", "#ffffff"] {
        let color = Color::from_hex(hex).unwrap();
        let back = Color::from_hsl(color.to_hsl());
        assert_eq!(back.to_hex(), hex.to_ascii_lowercase(), "HSL round trip of {}", hex);
    }
}

#[test]
fn test_hex_roundtrip_through_rgb() {
    for hex in ["#9ba5af", "#23450b", "#00121d", "#002a44"] {
        let rgb = Color::from_hex(hex).unwrap().to_rgb();
        let back = Color::from_rgb(rgb.red, rgb.green, rgb.blue);
        assert_eq!(back.to_hex(), hex);
    }
}

#[test]
fn test_hex_accepts_missing_hash_and_whitespace() {
    assert_eq!(Color::from_hex("ff6200").unwrap().to_hex(), "#ff6200");
    assert_eq!(Color::from_hex("  #FF6200 ").unwrap().to_hex(), "#ff6200");
}

#[test]
fn test_hex_rejects_short_and_alpha_forms() {
    for bad in ["#A", "#abc", "#ff6200aa", "#gg0000", ""] {
        assert!(
            matches!(Color::from_hex(bad), Err(ColorError::InvalidHex(_))),
            "{:?} should be rejected",
            bad
        );
    }
}

#[test]
fn test_css_parsing_accepts_functions_and_names() {
    assert_eq!(Color::parse("rgb(255, 98, 0)").unwrap().to_hex(), "#ff6200");
    assert_eq!(Color::parse("rebeccapurple").unwrap().to_hex(), "#663399");
    assert_eq!("#abc".parse::<Color>().unwrap().to_hex(), "#aabbcc");
    assert!(matches!(Color::parse("blurple"), Err(ColorError::InvalidCss(_))));
}

#[test]
fn test_hsl_to_rgb_known_values() {
    assert_eq!(Color::from_hsl(HslColor::new(0.0, 100.0, 50.0)).to_hex(), "#ff0000");
    assert_eq!(Color::from_hsl(HslColor::new(42.0, 100.0, 50.0)).to_hex(), "#ffb300");
    assert_eq!(Color::from_hsl(HslColor::new(140.0, 60.0, 1.0)).to_hex(), "#010402");
    assert_eq!(Color::from_hsl(HslColor::new(0.0, 0.0, 50.0)).to_hex(), "#808080");
}

#[test]
fn test_hsv_to_rgb_known_values() {
    assert_eq!(Color::from_hsv(HsvColor::new(0.0, 100.0, 98.0)).to_hex(), "#fa0000");
    assert_eq!(Color::from_hsv(HsvColor::new(0.0, 99.0, 98.0)).to_hex(), "#fa0202");
    assert_eq!(Color::from_hsv(HsvColor::new(140.0, 100.0, 100.0)).to_hex(), "#00ff55");
    assert_eq!(Color::from_hsv(HsvColor::new(2.0, 100.0, 100.0)).to_hex(), "#ff0800");
}

#[test]
fn test_out_of_range_inputs_are_clamped_and_wrapped() {
    let wrapped = Color::from_hsl(HslColor::new(480.0, 100.0, 50.0));
    assert_relative_eq!(wrapped.hue(), 120.0);
    assert_eq!(wrapped.to_hex(), "#00ff00");

    let clamped = Color::from_hsv(HsvColor::new(-30.0, 250.0, -4.0));
    assert_eq!(clamped.to_hex(), "#000000");
    assert_relative_eq!(clamped.hue(), 330.0);

    assert_eq!(normalize_hue(f64::NAN), 0.0);
    assert_eq!(normalize_hue(-1e-18), 0.0);
}

#[test]
fn test_achromatic_colors_remember_hue() {
    let black = Color::from_hsv(HsvColor::new(140.0, 75.0, 0.0));
    assert!(black.is_achromatic());
    assert_relative_eq!(black.hue(), 140.0);
    assert_relative_eq!(black.to_hsv().h, 140.0);
    assert!(black.same_rgb(&Color::from_rgb(0, 0, 0)));
    assert_ne!(black, Color::from_rgb(0, 0, 0));
}

#[test]
fn test_round_half_up() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(2.4999), 2.0);
    assert_eq!(round_half_up(-0.5), 0.0);
}

#[test]
fn test_css_notations() {
    let color = Color::from_hex("#9ba5af").unwrap();
    assert_eq!(css_rgb(&color), "rgb(155, 165, 175)");
    assert_eq!(css_hsl(&color), "hsl(210, 11.11%, 64.71%)");

    let orange = Color::from_hex("#ff6200").unwrap();
    assert_eq!(css_hsv(&orange), "hsv(23.06, 100%, 100%)");
}
