use std::cell::{Cell, RefCell};
use std::rc::Rc;

use huepick::{
    CaptureLog, Color, ColorFormat, ColorPalette, ColorPicker, Focus, HslColor, Key, Part,
    PickerOptions, PickerStyles, PointerCapture, PointerEvent, Rect, Update,
};

/// Counts of live and committed notifications.
#[derive(Clone, Default)]
struct Counters {
    live: Rc<Cell<usize>>,
    complete: Rc<Cell<usize>>,
    last: Rc<RefCell<Option<Color>>>,
}

fn listen<C: PointerCapture>(picker: ColorPicker<C>, counters: &Counters) -> ColorPicker<C> {
    let live = counters.live.clone();
    let complete = counters.complete.clone();
    let last = counters.last.clone();
    picker
        .on_change(move |_| live.set(live.get() + 1))
        .on_change_complete(move |color| {
            complete.set(complete.get() + 1);
            *last.borrow_mut() = Some(*color);
        })
}

fn picker_at(color: Color) -> (ColorPicker, Counters) {
    let counters = Counters::default();
    let picker = ColorPicker::new(PickerOptions {
        selected_color: Some(color),
        ..Default::default()
    });
    (listen(picker, &counters), counters)
}

fn hsl(h: f64, s: f64, l: f64) -> Color {
    Color::from_hsl(HslColor::new(h, s, l))
}

fn press(picker: &mut ColorPicker, part: Part, key: Key) {
    picker.key_down(part, key);
    picker.key_up(part, key);
}

#[test]
fn test_default_color_is_white() {
    let picker = ColorPicker::default();
    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.selected_color, "#ffffff");
    assert_eq!(styles.dot_left, 0.0);
    assert_eq!(styles.dot_top, 0.0);
    assert_eq!(picker.focus(), None);
}

#[test]
fn test_initial_hsl_sets_hue_and_thumb() {
    let (picker, _) = picker_at(hsl(42.0, 100.0, 50.0));
    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.hue, "#ffb300");
    assert_eq!(styles.thumb_left, 11.699164345403899);
    assert_eq!(styles.dot_left, 100.0);
    assert_eq!(styles.dot_top, 0.0);
}

#[test]
fn test_slider_arrow_keys_step_one_degree() {
    let (mut picker, counters) = picker_at(hsl(0.0, 100.0, 50.0));

    press(&mut picker, Part::Slider, Key::ArrowRight);
    press(&mut picker, Part::Slider, Key::ArrowRight);
    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.thumb_left, 0.5571030640668524);
    assert_eq!(styles.hue, "#ff0800");
    assert_eq!(picker.color().to_hex(), "#ff0800");

    press(&mut picker, Part::Slider, Key::ArrowLeft);
    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.thumb_left, 0.2785515320334262);
    assert_eq!(styles.hue, "#ff0400");

    assert_eq!(counters.live.get(), 3);
    assert_eq!(counters.complete.get(), 3);
    assert_eq!(picker.focus(), Some(Focus::SliderThumb));
}

#[test]
fn test_slider_clamps_at_zero() {
    let (mut picker, counters) = picker_at(hsl(0.0, 100.0, 50.0));

    assert_eq!(picker.key_down(Part::Slider, Key::ArrowLeft), None);
    assert_eq!(counters.live.get(), 0);
    assert_eq!(PickerStyles::of(&picker).thumb_left, 0.0);

    // The absorbed press still ends with a commit on release
    assert!(picker.key_up(Part::Slider, Key::ArrowLeft).is_some());
    assert_eq!(counters.complete.get(), 1);
}

#[test]
fn test_slider_home_and_end() {
    let (mut picker, _) = picker_at(hsl(200.0, 100.0, 50.0));
    press(&mut picker, Part::Slider, Key::End);
    assert_eq!(PickerStyles::of(&picker).thumb_left, 100.0);
    press(&mut picker, Part::Slider, Key::Home);
    assert_eq!(PickerStyles::of(&picker).thumb_left, 0.0);
    assert_eq!(picker.color().to_hex(), "#ff0000");
}

#[test]
fn test_field_keys_report_live_until_release() {
    let (mut picker, counters) = picker_at(hsl(0.0, 100.0, 50.0));

    picker.key_down(Part::Field, Key::ArrowDown);
    picker.key_down(Part::Field, Key::ArrowDown);
    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.dot_top, 2.0);
    assert_eq!(styles.selected_color, "#fa0000");
    assert_eq!(counters.live.get(), 2);
    assert_eq!(counters.complete.get(), 0);

    let up = picker.key_up(Part::Field, Key::ArrowDown);
    assert_eq!(up, Some(Update::Committed(picker.color())));
    assert_eq!(counters.complete.get(), 1);
    assert_eq!(counters.last.borrow().map(|c| c.to_hex()), Some("#fa0000".to_string()));

    press(&mut picker, Part::Field, Key::ArrowLeft);
    assert_eq!(PickerStyles::of(&picker).dot_left, 99.0);
    assert_eq!(picker.color().to_hex(), "#fa0202");

    for _ in 0..3 {
        press(&mut picker, Part::Field, Key::ArrowUp);
    }
    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.dot_top, 0.0);
    assert_eq!(styles.selected_color, "#ff0303");
}

#[test]
fn test_field_keys_through_black_keep_hue() {
    let (mut picker, _) = picker_at(hsl(140.0, 60.0, 1.0));

    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.selected_color, "#010402");
    assert_eq!(styles.hue, "#00ff55");
    assert_eq!(styles.dot_left, 75.0);
    assert_eq!(styles.dot_top, 98.0);

    press(&mut picker, Part::Field, Key::ArrowDown);
    press(&mut picker, Part::Field, Key::ArrowDown);
    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.dot_top, 100.0);
    assert_eq!(styles.dot_left, 75.0);
    assert_eq!(styles.selected_color, "#000000");
    assert_eq!(styles.hue, "#00ff55");

    // Past the edge the press is absorbed
    assert_eq!(picker.key_down(Part::Field, Key::ArrowDown), None);
}

#[test]
fn test_hex_input_commits_only_valid_text() {
    let (mut picker, counters) = picker_at(hsl(0.0, 100.0, 50.0));

    assert!(picker.input_change(0, "#A"));
    assert_eq!(picker.input_key_down(0, Key::Enter), None);
    assert_eq!(counters.complete.get(), 0);
    assert_eq!(picker.color().to_hex(), "#ff0000");
    assert_eq!(picker.panel().fields().text(0), Some("#A"));

    picker.input_change(0, "FF6200");
    assert_eq!(picker.input_key_down(0, Key::Char('x')), None);
    assert_eq!(counters.live.get(), 0);
    let update = picker.input_key_down(0, Key::Enter);
    assert!(update.is_some_and(|u| u.is_committed()));
    assert_eq!(counters.complete.get(), 1);
    assert_eq!(picker.color().to_hex(), "#ff6200");
    assert_eq!(picker.panel().fields().text(0), Some("#ff6200"));
    assert_eq!(PickerStyles::of(&picker).hue, "#ff6200");
}

#[test]
fn test_input_blur_commits_edited_field_once() {
    let (mut picker, counters) = picker_at(hsl(0.0, 100.0, 50.0));

    assert_eq!(picker.input_blur(0), None);
    assert_eq!(counters.complete.get(), 0);

    picker.input_change(0, "#1d4ed8");
    assert_eq!(picker.focus(), Some(Focus::Input(0)));
    assert!(picker.input_blur(0).is_some());
    assert_eq!(picker.focus(), None);
    assert_eq!(picker.color().to_hex(), "#1d4ed8");
    assert_eq!(counters.complete.get(), 1);

    assert_eq!(picker.input_blur(0), None);
    assert_eq!(counters.complete.get(), 1);
}

#[test]
fn test_channel_input_merges_into_color() {
    let mut picker = ColorPicker::new(PickerOptions {
        selected_color: Some(Color::from_rgb(255, 0, 0)),
        default_format: ColorFormat::Rgb,
        ..Default::default()
    });
    picker.input_change(2, "255");
    picker.input_key_down(2, Key::Enter);
    assert_eq!(picker.color().to_hex(), "#ff00ff");

    picker.input_change(1, "256");
    assert_eq!(picker.input_key_down(1, Key::Enter), None);
    assert_eq!(picker.color().to_hex(), "#ff00ff");
    assert_eq!(picker.panel().fields().text(1), Some("256"));
}

fn picker_in(format: ColorFormat, color: Color) -> (ColorPicker, Counters) {
    let counters = Counters::default();
    let picker = ColorPicker::new(PickerOptions {
        selected_color: Some(color),
        default_format: format,
        ..Default::default()
    });
    (listen(picker, &counters), counters)
}

fn field_texts(picker: &ColorPicker) -> Vec<&str> {
    (0..3).filter_map(|i| picker.panel().fields().text(i)).collect()
}

#[test]
fn test_hsl_channels_commit_on_enter() {
    let (mut picker, counters) = picker_in(ColorFormat::Hsl, hsl(0.0, 100.0, 50.0));

    for (index, text) in [(0, "100"), (1, "50"), (2, "50")] {
        assert!(picker.input_change(index, text));
        assert!(picker.input_key_down(index, Key::Enter).is_some());
    }
    assert_eq!(counters.live.get(), 3);
    assert_eq!(counters.complete.get(), 3);
    assert_eq!(*counters.last.borrow(), Some(picker.color()));
    assert_eq!(field_texts(&picker), ["100", "50", "50"]);
}

#[test]
fn test_hsl_out_of_range_channels_do_not_commit() {
    let (mut picker, counters) = picker_in(ColorFormat::Hsl, hsl(0.0, 100.0, 50.0));

    for (index, text) in [(0, "-1"), (1, "101"), (2, "5000")] {
        picker.input_change(index, text);
        assert_eq!(picker.input_key_down(index, Key::Enter), None);
    }
    picker.input_change(0, "120");
    assert_eq!(picker.input_key_down(0, Key::Char(' ')), None);

    assert_eq!(counters.live.get(), 0);
    assert_eq!(counters.complete.get(), 0);
    assert_eq!(picker.color().to_hex(), "#ff0000");
}

#[test]
fn test_hsl_channels_commit_on_blur() {
    let (mut picker, counters) = picker_in(ColorFormat::Hsl, hsl(0.0, 100.0, 50.0));

    for (index, text) in [(0, "200"), (1, "40"), (2, "30")] {
        picker.input_change(index, text);
        assert!(picker.input_blur(index).is_some());
        assert_eq!(picker.input_blur(index), None);
    }
    assert_eq!(counters.live.get(), 3);
    assert_eq!(counters.complete.get(), 3);
    assert_eq!(field_texts(&picker), ["200", "40", "30"]);
}

#[test]
fn test_rgb_channels_commit_on_enter() {
    let (mut picker, counters) = picker_in(ColorFormat::Rgb, Color::from_rgb(255, 0, 0));

    for (index, text) in [(0, "100"), (1, "50"), (2, "50")] {
        picker.input_change(index, text);
        assert!(picker.input_key_down(index, Key::Enter).is_some());
    }
    assert_eq!(counters.complete.get(), 3);
    assert_eq!(picker.color().to_hex(), "#643232");
}

#[test]
fn test_rgb_out_of_range_channels_do_not_commit() {
    let (mut picker, counters) = picker_in(ColorFormat::Rgb, Color::from_rgb(255, 0, 0));

    for (index, text) in [(0, "-1"), (1, "256"), (2, "5000")] {
        picker.input_change(index, text);
        assert_eq!(picker.input_key_down(index, Key::Enter), None);
    }
    picker.input_change(1, "10");
    assert_eq!(picker.input_key_down(1, Key::Char(' ')), None);

    assert_eq!(counters.live.get(), 0);
    assert_eq!(counters.complete.get(), 0);
    assert_eq!(picker.color().to_hex(), "#ff0000");
}

#[test]
fn test_rgb_channels_commit_on_blur() {
    let (mut picker, counters) = picker_in(ColorFormat::Rgb, Color::from_rgb(255, 0, 0));

    for (index, text) in [(0, "100"), (1, "50"), (2, "50")] {
        picker.input_change(index, text);
        assert!(picker.input_blur(index).is_some());
    }
    assert_eq!(picker.input_blur(2), None);
    assert_eq!(counters.live.get(), 3);
    assert_eq!(counters.complete.get(), 3);
    assert_eq!(picker.color().to_hex(), "#643232");
}

#[test]
fn test_committed_saturation_keeps_typed_text() {
    let (mut picker, _) = picker_in(ColorFormat::Hsl, Color::from_hex("#c81e4d").unwrap());
    picker.input_change(1, "50");
    picker.input_key_down(1, Key::Enter);
    assert_eq!(picker.panel().fields().text(1), Some("50"));
}

#[test]
fn test_second_press_commits_the_interrupted_drag() {
    let (mut picker, counters) = picker_at(hsl(0.0, 100.0, 50.0));
    let rect = Rect::new(10.0, 10.0, 200.0, 100.0);

    picker.pointer_down(Part::Field, PointerEvent::new(1, 110.0, 35.0), rect);
    picker.pointer_move(PointerEvent::new(1, 60.0, 60.0));
    let dragged = picker.color();
    assert_eq!(counters.live.get(), 2);
    assert_eq!(counters.complete.get(), 0);

    picker.pointer_down(Part::Slider, PointerEvent::new(2, 10.0, 0.0), rect);
    assert_eq!(counters.complete.get(), 1);
    assert_eq!(*counters.last.borrow(), Some(dragged));
    assert_eq!(picker.dragging(), Some(Part::Slider));

    // The first pointer no longer drives anything
    assert_eq!(picker.pointer_up(PointerEvent::new(1, 60.0, 60.0)), None);
    assert!(picker.pointer_up(PointerEvent::new(2, 10.0, 0.0)).is_some());
    assert_eq!(counters.live.get(), 3);
    assert_eq!(counters.complete.get(), 2);
}

#[test]
fn test_field_drag_holds_global_listen_for_its_duration() {
    let counters = Counters::default();
    let picker = ColorPicker::with_capture(
        PickerOptions {
            selected_color: Some(hsl(0.0, 100.0, 50.0)),
            ..Default::default()
        },
        CaptureLog::new(),
    );
    let mut picker = listen(picker, &counters);
    let rect = Rect::new(10.0, 10.0, 200.0, 100.0);

    let down = picker.pointer_down(Part::Field, PointerEvent::new(3, 110.0, 35.0), rect);
    assert!(!down.is_committed());
    assert!(picker.capture().is_active());
    assert_eq!(picker.dragging(), Some(Part::Field));
    assert_eq!(picker.focus(), Some(Focus::FieldThumb));

    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.dot_left, 50.0);
    assert_eq!(styles.dot_top, 25.0);

    // Other pointers do not disturb the drag
    assert_eq!(picker.pointer_move(PointerEvent::new(4, 0.0, 0.0)), None);

    assert!(picker.pointer_move(PointerEvent::new(3, 500.0, -80.0)).is_some());
    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.dot_left, 100.0);
    assert_eq!(styles.dot_top, 0.0);

    let up = picker.pointer_up(PointerEvent::new(3, 500.0, -80.0));
    assert!(up.is_some_and(|u| u.is_committed()));
    assert!(!picker.capture().is_active());
    assert_eq!(picker.capture().begun(), 1);
    assert_eq!(picker.capture().ended(), 1);
    assert_eq!(picker.dragging(), None);

    assert_eq!(counters.live.get(), 2);
    assert_eq!(counters.complete.get(), 1);

    assert_eq!(picker.pointer_move(PointerEvent::new(3, 20.0, 20.0)), None);
    assert_eq!(counters.live.get(), 2);
}

#[test]
fn test_slider_drag_maps_track_to_hue() {
    let (mut picker, counters) = picker_at(hsl(0.0, 100.0, 50.0));
    let rect = Rect::new(0.0, 0.0, 359.0, 12.0);

    picker.pointer_down(Part::Slider, PointerEvent::new(1, 120.0, 6.0), rect);
    assert_eq!(picker.color().to_hex(), "#00ff00");
    picker.pointer_move(PointerEvent::new(1, 9000.0, 6.0));
    assert_eq!(PickerStyles::of(&picker).thumb_left, 100.0);
    picker.pointer_up(PointerEvent::new(1, 240.0, 6.0));
    assert_eq!(picker.color().to_hex(), "#0000ff");

    assert_eq!(counters.live.get(), 2);
    assert_eq!(counters.complete.get(), 1);
}

#[test]
fn test_pointer_cancel_commits_last_live_position() {
    let mut picker = ColorPicker::with_capture(PickerOptions::default(), CaptureLog::new());
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    picker.pointer_down(Part::Field, PointerEvent::new(9, 40.0, 60.0), rect);
    let last = picker.color();
    assert_eq!(picker.pointer_cancel(8), None);
    assert_eq!(picker.pointer_cancel(9), Some(Update::Committed(last)));
    assert!(!picker.capture().is_active());
}

#[test]
fn test_zero_sized_rect_maps_to_origin() {
    let (mut picker, _) = picker_at(hsl(0.0, 100.0, 50.0));
    picker.pointer_down(Part::Field, PointerEvent::new(1, 50.0, 50.0), Rect::default());
    let styles = PickerStyles::of(&picker);
    assert_eq!(styles.dot_left, 0.0);
    assert_eq!(styles.dot_top, 0.0);
    assert_eq!(picker.color().to_hex(), "#ffffff");
}

#[test]
fn test_swatch_selection_commits_and_syncs() {
    let counters = Counters::default();
    let palette = ColorPalette::parse(None, &["#00ff00", "#1d4ed8"]).unwrap();
    let picker = ColorPicker::new(PickerOptions {
        palette: Some(palette),
        ..Default::default()
    });
    let mut picker = listen(picker, &counters);

    let update = picker.select_swatch(1);
    assert_eq!(update.map(|u| u.into_value().to_hex()), Some("#1d4ed8".to_string()));
    assert_eq!(picker.focus(), Some(Focus::Swatch(1)));
    assert_eq!(picker.panel().fields().text(0), Some("#1d4ed8"));
    assert_eq!(counters.live.get(), 1);
    assert_eq!(counters.complete.get(), 1);

    assert_eq!(picker.select_swatch(2), None);
    assert_eq!(counters.complete.get(), 1);
}

#[test]
fn test_cycle_format_rewrites_fields() {
    let (mut picker, counters) = picker_at(Color::from_rgb(255, 0, 0));
    assert_eq!(picker.cycle_format(), ColorFormat::Hsl);
    assert_eq!(picker.panel().fields().texts(), vec!["0", "100", "50"]);
    assert_eq!(picker.cycle_format(), ColorFormat::Rgb);
    assert_eq!(picker.panel().fields().texts(), vec!["255", "0", "0"]);
    assert_eq!(picker.cycle_format(), ColorFormat::Hex);
    assert_eq!(counters.live.get() + counters.complete.get(), 0);
}

#[test]
fn test_controlled_echo_keeps_hue() {
    let (mut picker, counters) = picker_at(hsl(140.0, 60.0, 1.0));
    press(&mut picker, Part::Field, Key::ArrowDown);
    press(&mut picker, Part::Field, Key::ArrowDown);

    // Host echoes the committed color back in
    let echoed = counters.last.borrow().unwrap_or_default();
    picker.set_selected_color(Color::from_rgb(0, 0, 0));
    assert!(echoed.same_rgb(&picker.color()));
    assert_eq!(PickerStyles::of(&picker).hue, "#00ff55");

    // A different color replaces the working state
    picker.set_selected_color(Color::from_rgb(0, 0, 255));
    assert_eq!(PickerStyles::of(&picker).hue, "#0000ff");
    assert_eq!(counters.complete.get(), 2);
}
