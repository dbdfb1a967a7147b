//! Loading stylesheets from disk and resolving through the engine.

use std::io::Write;

use horizon_entry_core::{Color, Object, ObjectId, ObjectRegistry};
use horizon_entry_style::prelude::*;
use horizon_entry_style::selector::StyleNode;
use horizon_entry_style::Error;

struct Marker;

impl Object for Marker {
    fn object_id(&self) -> ObjectId {
        ObjectId::default()
    }
}

#[test]
fn load_stylesheet_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Panel Entry {{ font-family: Cantarell; font-size: 11pt; }}\n\
         Entry:focus {{ selection-background-color: rgba(0, 156, 207, 0.5); }}\n\
         Entry:bogus {{ color: red; }}"
    )
    .unwrap();

    let engine = StyleEngine::new();
    engine
        .load_stylesheet(file.path(), StylePriority::Application)
        .unwrap();
    assert_eq!(engine.rule_count(), 2);

    let id = ObjectRegistry::new().register::<Marker>();
    let ancestors = [StyleNode::of_type("Panel")];
    let mut context = StyleContext::new("Entry").with_pseudo_class(Some(PseudoClass::Focus));
    context.ancestors = &ancestors;

    let computed = engine.compute_style(id, &context, None);
    assert_eq!(computed.font_family, Some(vec!["Cantarell".to_string()]));
    let size = computed.font_size.unwrap();
    assert!((size - 11.0 * 96.0 / 72.0).abs() < 1e-4);
    assert_eq!(
        computed.extra_color("selection-background-color"),
        Some(Color::from_rgba8(0, 156, 207, 128))
    );

    engine.remove_stylesheet_by_path(file.path());
    assert_eq!(engine.stylesheet_count(), 0);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = StyleSheet::from_file(dir.path().join("absent.css"), StylePriority::Theme);
    assert!(matches!(result, Err(Error::Io { .. })));
}
