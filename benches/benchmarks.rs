//! Performance benchmarks for the picker.
//!
//! Measures the hot paths:
//! - Color model conversions
//! - Hex and CSS parsing
//! - A full pointer drag through the container
//! - Markup rendering

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use huepick::{
    Color, ColorPicker, HslColor, HsvColor, Part, PickerOptions, PointerEvent, Rect, render_markup,
};

/// 256 test colors spanning the RGB cube.
fn test_colors() -> Vec<Color> {
    (0u8..=255)
        .map(|i: u8| Color::from_rgb(i, i.wrapping_mul(97), i.wrapping_mul(193)))
        .collect()
}

/// Benchmark RGB -> HSL -> RGB for 256 colors.
fn bench_hsl_roundtrip(c: &mut Criterion) {
    let colors = test_colors();

    c.bench_function("hsl_roundtrip_256", |b| {
        b.iter(|| {
            for color in &colors {
                black_box(Color::from_hsl(black_box(color.to_hsl())));
            }
        })
    });
}

/// Benchmark HSV -> RGB across the whole hue range.
fn bench_hsv_to_rgb(c: &mut Criterion) {
    let inputs: Vec<HsvColor> = (0..360)
        .map(|h| HsvColor::new(f64::from(h), 75.0, 60.0))
        .collect();

    c.bench_function("hsv_to_rgb_360", |b| {
        b.iter(|| {
            for hsv in &inputs {
                black_box(Color::from_hsv(*hsv));
            }
        })
    });
}

/// Benchmark strict hex parsing against the CSS fallback.
fn bench_parsing(c: &mut Criterion) {
    let hexes: Vec<String> = test_colors().iter().map(Color::to_hex).collect();

    c.bench_function("parse_hex_256", |b| {
        b.iter(|| {
            for hex in &hexes {
                black_box(Color::from_hex(black_box(hex)).ok());
            }
        })
    });

    c.bench_function("parse_css_hsl", |b| {
        b.iter(|| black_box(Color::parse(black_box("hsl(210, 11%, 65%)")).ok()))
    });
}

/// Benchmark a 100-step drag across the color field.
fn bench_field_drag(c: &mut Criterion) {
    let rect = Rect::new(0.0, 0.0, 240.0, 160.0);
    let start = Color::from_hsl(HslColor::new(200.0, 80.0, 40.0));

    c.bench_function("field_drag_100", |b| {
        b.iter(|| {
            let mut picker = ColorPicker::new(PickerOptions {
                selected_color: Some(start),
                ..Default::default()
            });
            picker.pointer_down(Part::Field, PointerEvent::new(1, 0.0, 0.0), rect);
            for step in 0..100 {
                let t = f64::from(step);
                picker.pointer_move(PointerEvent::new(1, t * 2.4, t * 1.6));
            }
            black_box(picker.pointer_up(PointerEvent::new(1, 240.0, 160.0)))
        })
    });
}

/// Benchmark rendering the HTML fragment.
fn bench_render_markup(c: &mut Criterion) {
    let picker = ColorPicker::new(PickerOptions {
        selected_color: Some(Color::from_rgb(0x1d, 0x4e, 0xd8)),
        ..Default::default()
    });

    c.bench_function("render_markup", |b| b.iter(|| render_markup(black_box(&picker))));
}

criterion_group!(
    benches,
    bench_hsl_roundtrip,
    bench_hsv_to_rgb,
    bench_parsing,
    bench_field_drag,
    bench_render_markup,
);

criterion_main!(benches);
