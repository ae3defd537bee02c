use proptest::prelude::*;
use scribe_editor_core::{DEFAULT_HISTORY_LIMIT, EditorConfig, EditorStore};

fn store_with(contents: &[&str]) -> EditorStore {
    let mut store = EditorStore::default();
    for content in contents {
        store.set_content(*content);
    }
    store
}

#[test]
fn set_content_records_snapshot_and_clears_future() {
    let mut store = store_with(&["a", "b"]);
    assert!(store.undo());
    assert!(!store.history().future().is_empty());

    store.set_content("c");
    assert_eq!(store.content(), "c");
    assert_eq!(store.history().past().last().map(String::as_str), Some("c"));
    assert!(store.history().future().is_empty());
}

#[test]
fn undo_moves_current_content_to_front_of_future() {
    let mut store = store_with(&["a", "b", "c"]);
    assert!(store.undo());
    assert_eq!(store.content(), "c");
    assert_eq!(store.history().past(), ["a", "b"]);
    assert_eq!(store.history().future(), ["c"]);

    assert!(store.undo());
    assert_eq!(store.content(), "b");
    assert_eq!(store.history().past(), ["a"]);
    assert_eq!(store.history().future(), ["c", "c"]);
}

#[test]
fn undo_on_empty_past_is_a_noop() {
    let mut store = EditorStore::default();
    assert!(!store.undo());
    assert_eq!(store.content(), "");
    assert!(store.history().past().is_empty());
    assert!(store.history().future().is_empty());
}

#[test]
fn redo_on_empty_future_is_a_noop() {
    let mut store = store_with(&["a"]);
    let before = store.history().clone();
    assert!(!store.redo());
    assert_eq!(store.content(), "a");
    assert_eq!(store.history(), &before);
}

#[test]
fn save_to_history_snapshots_without_changing_content() {
    let mut store = store_with(&["a"]);
    assert!(store.undo());
    store.save_to_history();
    assert_eq!(store.content(), "a");
    assert_eq!(store.history().past(), ["a"]);
    assert!(store.history().future().is_empty());
}

#[test]
fn past_is_bounded_by_configured_limit() {
    let config = EditorConfig {
        history_limit: 3,
        ..EditorConfig::default()
    };
    let mut store = EditorStore::new(&config);
    for ix in 0..10 {
        store.set_content(ix.to_string());
    }
    assert_eq!(store.history().past(), ["7", "8", "9"]);
}

#[test]
fn formatting_toggles_do_not_touch_history() {
    let mut store = store_with(&["a"]);
    let before = store.history().clone();
    let bold = store.format().bold;

    store.toggle_bold();
    store.toggle_bold();
    store.toggle_bullet_list();
    store.set_font_size("24");

    assert_eq!(store.format().bold, bold);
    assert_eq!(store.history(), &before);
}

proptest! {
    #[test]
    fn past_never_exceeds_limit(contents in prop::collection::vec(".{0,8}", 0..120)) {
        let mut store = EditorStore::default();
        for content in &contents {
            store.set_content(content.clone());
            prop_assert!(store.history().past().len() <= DEFAULT_HISTORY_LIMIT);
            prop_assert_eq!(store.history().past().last(), Some(content));
            prop_assert!(store.history().future().is_empty());
        }
    }

    #[test]
    fn undo_then_redo_restores_content(
        contents in prop::collection::vec("[a-z]{0,6}", 1..60),
        undos in 0usize..10,
    ) {
        let mut store = EditorStore::default();
        for content in &contents {
            store.set_content(content.clone());
        }
        for _ in 0..undos {
            store.undo();
        }
        prop_assume!(store.can_undo());

        let before = store.content().to_string();
        prop_assert!(store.undo());
        prop_assert!(store.redo());
        prop_assert_eq!(store.content(), before.as_str());
    }

    #[test]
    fn bounded_history_with_interleaved_undo(
        ops in prop::collection::vec(prop_oneof![
            "[a-z]{1,4}".prop_map(Some),
            Just(None),
        ], 0..200),
    ) {
        let mut store = EditorStore::default();
        for op in ops {
            match op {
                Some(content) => { store.set_content(content); }
                None => { store.undo(); }
            }
            prop_assert!(store.history().past().len() <= DEFAULT_HISTORY_LIMIT);
        }
    }
}
