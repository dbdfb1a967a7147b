//! Integration tests for the entry's hint, layout, clipboard and icon behavior.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_entry::prelude::*;

struct Harness {
    entry: Entry,
    clipboard: Arc<MemoryClipboard>,
    services: EntryServices,
}

fn setup() -> Harness {
    setup_with_css("")
}

fn setup_with_css(css: &str) -> Harness {
    init_global_registry();
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let engine = StyleEngine::new();
    if !css.is_empty() {
        engine.add_stylesheet(StyleSheet::from_css(css, StylePriority::Application).unwrap());
    }
    let (services, clipboard) = EntryServices::headless();
    let services = services
        .with_style(Arc::new(engine))
        .with_metrics(Arc::new(FixedTextMetrics::new(100.0, 20.0)));
    for name in ["primary.png", "secondary.png", "other.png"] {
        services
            .textures
            .insert(name, Texture::solid(16, 16, [0x20, 0x40, 0x80, 0xff]).unwrap());
    }
    let entry = Entry::new("", services.clone());
    Harness {
        entry,
        clipboard,
        services,
    }
}

fn chord(letter: Key) -> WidgetEvent {
    WidgetEvent::KeyPress(KeyPressEvent::new(letter, KeyboardModifiers::CTRL, "", false))
}

fn focus_in(entry: &Entry) {
    entry.event(&mut WidgetEvent::FocusIn(FocusInEvent::new(FocusReason::Mouse)));
}

fn focus_out(entry: &Entry) {
    entry.event(&mut WidgetEvent::FocusOut(FocusOutEvent::new(FocusReason::Tab)));
}

fn click(entry: &Entry, x: f32, y: f32) {
    let pos = Point::new(x, y);
    entry.event(&mut WidgetEvent::MousePress(MousePressEvent::new(
        MouseButton::Left,
        pos,
        KeyboardModifiers::NONE,
    )));
    entry.event(&mut WidgetEvent::MouseRelease(MouseReleaseEvent::new(
        MouseButton::Left,
        pos,
        KeyboardModifiers::NONE,
    )));
}

fn counter(signal: &horizon_entry_core::Signal<()>) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&count);
    signal.connect(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    count
}

// =========================================================================
// Hint state machine
// =========================================================================

#[derive(Debug, Clone, Copy)]
enum Op {
    FocusIn,
    FocusOut,
    ClearText,
    SetText,
    SetHint,
    ClearHint,
}

const OPS: [Op; 6] = [
    Op::FocusIn,
    Op::FocusOut,
    Op::ClearText,
    Op::SetText,
    Op::SetHint,
    Op::ClearHint,
];

fn check_invariants(entry: &Entry, expected_text: &str, ops: &[Op]) {
    let node_text = entry.text_node().text();
    let hint = entry.hint_text();

    if entry.is_hint_visible() {
        assert_eq!(entry.text(), "", "{ops:?}");
        assert_eq!(Some(node_text), hint, "{ops:?}");
        assert!(!entry.has_focus(), "{ops:?}");
        assert_eq!(entry.pseudo_class(), Some(PseudoClass::Indeterminate), "{ops:?}");
    } else {
        assert_eq!(entry.text(), node_text, "{ops:?}");
        assert_eq!(entry.text(), expected_text, "{ops:?}");
        let expected_pseudo = entry.has_focus().then_some(PseudoClass::Focus);
        assert_eq!(entry.pseudo_class(), expected_pseudo, "{ops:?}");
    }

    let should_show_hint = hint.is_some() && expected_text.is_empty() && !entry.has_focus();
    assert_eq!(entry.is_hint_visible(), should_show_hint, "{ops:?}");
    assert_eq!(entry.text_node().is_cursor_visible(), entry.has_focus(), "{ops:?}");
}

#[test]
fn hint_invariant_holds_for_all_short_sequences() {
    init_global_registry();
    let (services, _clipboard) = EntryServices::headless();

    let len = OPS.len();
    for index in 0..len.pow(4) {
        let ops: Vec<Op> = (0..4)
            .map(|digit| OPS[(index / len.pow(digit)) % len])
            .collect();

        let entry = Entry::new("", services.clone());
        let mut expected_text = String::new();
        for op in &ops {
            match op {
                Op::FocusIn => focus_in(&entry),
                Op::FocusOut => focus_out(&entry),
                Op::ClearText => {
                    entry.set_text("");
                    expected_text.clear();
                }
                Op::SetText => {
                    entry.set_text("abc");
                    expected_text = "abc".to_string();
                }
                Op::SetHint => entry.set_hint_text(Some("Search")),
                Op::ClearHint => entry.set_hint_text(None),
            }
            check_invariants(&entry, &expected_text, &ops);
        }
    }
}

#[test]
fn hint_shows_until_focus() {
    let Harness { entry, .. } = setup();

    entry.set_hint_text(Some("Search"));
    assert!(entry.is_hint_visible());
    assert_eq!(entry.text_node().text(), "Search");

    entry.set_text("");
    assert!(entry.is_hint_visible());
    assert_eq!(entry.text(), "");

    focus_in(&entry);
    assert!(!entry.is_hint_visible());
    assert_eq!(entry.text_node().text(), "");
    assert!(entry.text_node().is_editable());
    assert_eq!(entry.pseudo_class(), Some(PseudoClass::Focus));
}

#[test]
fn typed_text_survives_focus_loss() {
    let Harness { entry, .. } = setup();
    entry.set_hint_text(Some("Search"));

    focus_in(&entry);
    for c in "rust".chars() {
        assert!(entry.event(&mut WidgetEvent::KeyPress(KeyPressEvent::typed(c))));
    }
    focus_out(&entry);

    assert!(!entry.is_hint_visible());
    assert_eq!(entry.text(), "rust");
    assert_eq!(entry.pseudo_class(), None);
}

// =========================================================================
// Layout
// =========================================================================

#[test]
fn preferred_size_with_icons_and_padding() {
    let Harness { entry, .. } = setup_with_css("Entry { padding: 4px; }");
    entry.set_primary_icon_from_file(Some("primary.png"));
    entry.set_secondary_icon_from_file(Some("secondary.png"));

    assert_eq!(entry.spacing(), 6.0);
    assert_eq!(entry.preferred_width(None).natural, 152.0);
    assert_eq!(entry.preferred_width(None).minimum, 52.0);
    assert_eq!(entry.preferred_height(None).natural, 28.0);
    assert_eq!(entry.preferred_height(None).minimum, 28.0);
}

#[test]
fn icon_taller_than_text_sets_height() {
    let Harness { entry, services, .. } = setup();
    services
        .textures
        .insert("tall.png", Texture::solid(24, 32, [0; 4]).unwrap());
    entry.set_primary_icon_from_file(Some("tall.png"));
    assert_eq!(entry.preferred_height(None).natural, 32.0);
}

#[test]
fn allocation_places_icons_and_text() {
    let Harness { entry, .. } = setup_with_css("Entry { padding: 4px; }");
    entry.set_primary_icon_from_file(Some("primary.png"));
    entry.set_secondary_icon_from_file(Some("secondary.png"));

    entry.allocate(Rect::new(10.0, 10.0, 200.0, 29.0));

    let primary = entry.primary_icon().unwrap().widget_base().geometry();
    let secondary = entry.secondary_icon().unwrap().widget_base().geometry();
    let text = entry.text_node().widget_base().geometry();

    // Vertical centering truncates: (4 + 21 / 2 - 8) = 6.5 -> 6.
    assert_eq!(primary, Rect::new(4.0, 6.0, 16.0, 16.0));
    assert_eq!(secondary, Rect::new(180.0, 6.0, 16.0, 16.0));
    assert_eq!(text, Rect::new(26.0, 4.0, 148.0, 20.0));
    assert!(!entry.widget_base().needs_relayout());
}

#[test]
fn text_shrinks_to_available_height() {
    let Harness { entry, .. } = setup();
    entry.allocate(Rect::new(0.0, 0.0, 120.0, 16.0));

    let text = entry.text_node().widget_base().geometry();
    assert_eq!(text.height(), 16.0);
    assert_eq!(text.origin.y, 0.0);
    assert_eq!(text.width(), 120.0);
}

#[test]
fn negative_space_clamps_to_zero() {
    let Harness { entry, .. } = setup_with_css("Entry { padding: 10px; }");
    entry.set_primary_icon_from_file(Some("primary.png"));
    entry.allocate(Rect::new(0.0, 0.0, 20.0, 10.0));

    let text = entry.text_node().widget_base().geometry();
    assert_eq!(text.width(), 0.0);
    assert_eq!(text.height(), 0.0);
}

// =========================================================================
// Clipboard
// =========================================================================

#[test]
fn copy_and_cut_without_selection_do_nothing() {
    let Harness {
        entry, clipboard, ..
    } = setup();
    entry.set_text("hello");

    let mut copy = chord(Key::C);
    let mut cut = chord(Key::X);
    assert!(entry.event(&mut copy));
    assert!(entry.event(&mut cut));
    assert!(copy.is_accepted());
    assert!(cut.is_accepted());

    assert_eq!(clipboard.access_count(), 0);
    assert_eq!(entry.text(), "hello");
}

#[test]
fn cut_moves_selection_to_clipboard() {
    let Harness {
        entry, clipboard, ..
    } = setup();
    entry.set_text("hello world");
    entry.text_node().set_selection(5, 11);

    assert!(entry.event(&mut chord(Key::X)));
    assert_eq!(clipboard.contents().as_deref(), Some(" world"));
    assert_eq!(entry.text(), "hello");
}

#[test]
fn paste_replaces_selection() {
    let Harness {
        entry,
        clipboard,
        services,
    } = setup();
    clipboard.set_text("xyz").unwrap();
    entry.set_text("12abc34");
    entry.text_node().set_selection(2, 5);
    assert_eq!(entry.text_node().selected_text(), "abc");

    assert!(entry.event(&mut chord(Key::V)));
    // Delivery is deferred to the task queue.
    assert_eq!(entry.text(), "12abc34");

    services.tasks.process_all();
    assert_eq!(entry.text(), "12xyz34");
    assert_eq!(entry.text_node().cursor_position(), 5);
    assert!(!entry.text_node().has_selection());
}

#[test]
fn paste_with_empty_clipboard_is_a_no_op() {
    let Harness {
        entry, services, ..
    } = setup();
    entry.set_text("abc");

    assert!(entry.event(&mut chord(Key::V)));
    services.tasks.process_all();
    assert_eq!(entry.text(), "abc");
}

#[test]
fn paste_over_hint_replaces_it() {
    let Harness {
        entry,
        clipboard,
        services,
    } = setup();
    clipboard.set_text("query").unwrap();
    entry.set_hint_text(Some("Search"));

    entry.event(&mut chord(Key::V));
    services.tasks.process_all();

    assert!(!entry.is_hint_visible());
    assert_eq!(entry.text(), "query");
}

#[test]
fn editing_keys_do_not_touch_hint() {
    let Harness { entry, services, .. } = setup_with_css("Entry:indeterminate { color: gray; }");
    entry.set_hint_text(Some("Search"));
    let changed = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&changed);
    entry.text_changed().connect(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });

    for (key, modifiers) in [
        (Key::Backspace, KeyboardModifiers::NONE),
        (Key::Delete, KeyboardModifiers::NONE),
        (Key::A, KeyboardModifiers::CTRL),
        (Key::Delete, KeyboardModifiers::CTRL),
    ] {
        entry.event(&mut WidgetEvent::KeyPress(KeyPressEvent::new(key, modifiers, "", false)));
    }
    services.tasks.process_all();

    assert!(entry.is_hint_visible());
    assert_eq!(entry.text_node().text(), "Search");
    assert_eq!(entry.text(), "");
    assert_eq!(entry.text_node().color(), Color::GRAY);
    assert_eq!(changed.load(Ordering::SeqCst), 0);

    entry.event(&mut WidgetEvent::KeyPress(KeyPressEvent::typed('x')));
    assert!(!entry.is_hint_visible());
    assert_eq!(entry.text(), "x");
}

#[test]
fn late_paste_after_drop_is_ignored() {
    let Harness {
        entry,
        clipboard,
        services,
    } = setup();
    clipboard.set_text("late").unwrap();

    assert!(entry.event(&mut chord(Key::V)));
    let node = Arc::clone(entry.text_node());
    drop(entry);

    assert_eq!(services.tasks.process_all(), 1);
    assert_eq!(node.text(), "");
}

// =========================================================================
// Icons
// =========================================================================

#[test]
fn icon_clicks_emit_their_own_signal() {
    let Harness { entry, .. } = setup();
    entry.set_primary_icon_from_file(Some("primary.png"));
    entry.set_secondary_icon_from_file(Some("secondary.png"));
    entry.allocate(Rect::new(0.0, 0.0, 200.0, 28.0));

    let primary = counter(entry.primary_icon_clicked());
    let secondary = counter(entry.secondary_icon_clicked());

    click(&entry, 8.0, 14.0);
    assert_eq!(primary.load(Ordering::SeqCst), 1);
    assert_eq!(secondary.load(Ordering::SeqCst), 0);

    click(&entry, 190.0, 14.0);
    assert_eq!(primary.load(Ordering::SeqCst), 1);
    assert_eq!(secondary.load(Ordering::SeqCst), 1);

    click(&entry, 100.0, 14.0);
    assert_eq!(primary.load(Ordering::SeqCst), 1);
    assert_eq!(secondary.load(Ordering::SeqCst), 1);
}

#[test]
fn swapping_icon_detaches_the_old_one() {
    let Harness { entry, .. } = setup();
    let clicks = counter(entry.primary_icon_clicked());

    entry.set_primary_icon_from_file(Some("primary.png"));
    let old = entry.primary_icon().unwrap();
    entry.set_primary_icon_from_file(Some("other.png"));
    let new = entry.primary_icon().unwrap();

    assert!(!Arc::ptr_eq(&old, &new));
    assert_eq!(new.path(), std::path::Path::new("other.png"));
    assert_eq!(old.widget_base().parent(), None);
    assert_eq!(new.widget_base().parent(), Some(entry.object_id()));
    assert!(new.widget_base().is_reactive());

    let icon_children: Vec<_> = entry
        .widget_base()
        .children()
        .into_iter()
        .filter(|id| *id != entry.text_node().object_id())
        .collect();
    assert_eq!(icon_children, vec![new.object_id()]);

    old.clicked.emit(());
    assert_eq!(clicks.load(Ordering::SeqCst), 0);
    new.clicked.emit(());
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn clearing_icon_empties_slot() {
    let Harness { entry, .. } = setup();
    entry.set_secondary_icon_from_file(Some("secondary.png"));
    entry.set_secondary_icon_from_file(None::<&str>);

    assert!(entry.secondary_icon().is_none());
    assert_eq!(entry.widget_base().children(), vec![entry.text_node().object_id()]);
    assert_eq!(entry.preferred_width(None).natural, 100.0);
}

// =========================================================================
// Pointer and focus routing
// =========================================================================

#[test]
fn crossing_the_text_toggles_cursor() {
    let Harness {
        entry, services, ..
    } = setup();
    let text_id = entry.text_node().object_id();

    let mut enter = WidgetEvent::Enter(EnterEvent::new(text_id, Some(entry.object_id())));
    assert!(entry.event(&mut enter));
    assert_eq!(services.cursor.cursor(), CursorShape::IBeam);

    let mut leave = WidgetEvent::Leave(LeaveEvent::new(text_id, Some(entry.object_id())));
    assert!(entry.event(&mut leave));
    assert_eq!(services.cursor.cursor(), CursorShape::Arrow);
}

#[test]
fn crossing_without_related_leaves_cursor() {
    let Harness {
        entry, services, ..
    } = setup();
    let text_id = entry.text_node().object_id();

    let mut enter = WidgetEvent::Enter(EnterEvent::new(text_id, None));
    assert!(entry.event(&mut enter));
    assert!(enter.is_accepted());
    assert_eq!(services.cursor.cursor(), CursorShape::Arrow);

    let mut enter_entry = WidgetEvent::Enter(EnterEvent::new(entry.object_id(), Some(text_id)));
    assert!(entry.event(&mut enter_entry));
    assert_eq!(services.cursor.cursor(), CursorShape::Arrow);
}

#[test]
fn pointer_buttons_are_swallowed() {
    let Harness { entry, .. } = setup();
    let mut press = WidgetEvent::MousePress(MousePressEvent::new(
        MouseButton::Right,
        Point::new(1.0, 1.0),
        KeyboardModifiers::NONE,
    ));
    assert!(entry.event(&mut press));
    assert!(!press.should_propagate());
}

#[test]
fn focus_is_redirected_to_text_node() {
    let Harness { entry, .. } = setup();
    assert_eq!(entry.focus_target(), entry.text_node().object_id());
    assert_ne!(entry.focus_target(), entry.object_id());
}
