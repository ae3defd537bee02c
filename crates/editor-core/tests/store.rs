use std::cell::RefCell;
use std::rc::Rc;

use scribe_editor_core::{
    Alignment, BlockType, EditorConfig, EditorStore, FormattingState, HeadingLevel,
    PersistError, PersistedState, Selection, StateSlot, StoreChange,
};

#[derive(Default)]
struct SharedSlot {
    writes: Rc<RefCell<Vec<PersistedState>>>,
    initial: Option<PersistedState>,
}

impl StateSlot for SharedSlot {
    fn key(&self) -> &str {
        "test-slot"
    }

    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        Ok(self.initial.clone())
    }

    fn store(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        self.writes.borrow_mut().push(state.clone());
        Ok(())
    }
}

fn recorded_changes(store: &mut EditorStore) -> Rc<RefCell<Vec<StoreChange>>> {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    store.subscribe(move |event| sink.borrow_mut().push(event.change));
    changes
}

#[test]
fn defaults_match_a_fresh_document() {
    let store = EditorStore::default();
    let format = store.format();
    assert_eq!(store.content(), "");
    assert_eq!(format.font_size, "16");
    assert_eq!(format.font_family, "Arial");
    assert_eq!(format.text_color, "#000000");
    assert_eq!(format.highlight_color, "#ffffff");
    assert_eq!(format.alignment, Alignment::Left);
    assert_eq!(format.heading_level, HeadingLevel::P);
    assert_eq!(format.block_type, BlockType::P);
    assert_eq!(format.indent_level, 0);
    assert!(!format.bold && !format.italic && !format.underline);
    assert!(!format.bullet_list && !format.numbered_list);
    assert_eq!(store.selection(), None);
}

#[test]
fn toggling_twice_restores_each_flag() {
    let mut store = EditorStore::default();
    let before = store.format().clone();

    store.toggle_bold();
    store.toggle_italic();
    store.toggle_underline();
    store.toggle_bullet_list();
    store.toggle_numbered_list();
    assert!(store.format().bold);
    assert!(store.format().bullet_list && store.format().numbered_list);

    store.toggle_bold();
    store.toggle_italic();
    store.toggle_underline();
    store.toggle_bullet_list();
    store.toggle_numbered_list();
    assert_eq!(store.format(), &before);
    assert!(!store.can_undo());
}

#[test]
fn setters_replace_values() {
    let mut store = EditorStore::default();
    store.set_font_size("24");
    store.set_font_family("Courier New");
    store.set_text_color("#ff0000");
    store.set_highlight_color("#00ff00");
    store.set_alignment(Alignment::Justify);
    store.set_heading_level(HeadingLevel::H3);
    store.set_block_type(BlockType::Blockquote);
    store.set_indent_level(4);

    let expected = FormattingState {
        font_size: "24".into(),
        font_family: "Courier New".into(),
        text_color: "#ff0000".into(),
        highlight_color: "#00ff00".into(),
        alignment: Alignment::Justify,
        heading_level: HeadingLevel::H3,
        block_type: BlockType::Blockquote,
        indent_level: 4,
        ..FormattingState::default()
    };
    assert_eq!(store.format(), &expected);
}

#[test]
fn outdent_stops_at_zero() {
    let mut store = EditorStore::default();
    store.indent();
    store.indent();
    assert_eq!(store.format().indent_level, 2);
    store.outdent();
    store.outdent();
    store.outdent();
    assert_eq!(store.format().indent_level, 0);
}

#[test]
fn observers_see_every_operation_in_order() {
    let mut store = EditorStore::default();
    let changes = recorded_changes(&mut store);

    store.set_content("<p>a</p>");
    store.toggle_bold();
    store.set_selection(Some(Selection::new(0, 1)));
    store.undo();
    store.redo();
    store.save_to_history();

    assert_eq!(
        *changes.borrow(),
        [
            StoreChange::Content,
            StoreChange::Bold,
            StoreChange::Selection,
            StoreChange::Content,
            StoreChange::Content,
            StoreChange::History,
        ]
    );
}

#[test]
fn failed_undo_does_not_notify() {
    let mut store = EditorStore::default();
    let changes = recorded_changes(&mut store);
    assert!(!store.undo());
    assert!(!store.redo());
    assert!(changes.borrow().is_empty());
}

#[test]
fn observer_sees_state_after_the_change() {
    let mut store = EditorStore::default();
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    store.subscribe(move |event| {
        *sink.borrow_mut() = Some((event.content.to_string(), event.format.bold));
    });

    store.set_content("hello");
    assert_eq!(*seen.borrow(), Some(("hello".to_string(), false)));
    store.toggle_bold();
    assert_eq!(*seen.borrow(), Some(("hello".to_string(), true)));
}

#[test]
fn unsubscribed_observers_stop_receiving() {
    let mut store = EditorStore::default();
    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();
    let subscription = store.subscribe(move |_| *sink.borrow_mut() += 1);

    store.toggle_bold();
    assert!(store.unsubscribe(subscription));
    store.toggle_bold();
    assert!(!store.unsubscribe(subscription));

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn only_persisted_fields_write_the_slot() {
    let writes = Rc::new(RefCell::new(Vec::new()));
    let slot = SharedSlot {
        writes: writes.clone(),
        initial: None,
    };
    let mut store = EditorStore::with_slot(&EditorConfig::default(), Box::new(slot));

    store.toggle_bold();
    store.toggle_bullet_list();
    store.indent();
    store.set_selection(Some(Selection::new(1, 2)));
    store.save_to_history();
    assert!(writes.borrow().is_empty());

    store.set_font_size("32");
    store.set_content("<p>kept</p>");
    store.set_alignment(Alignment::Center);

    let writes = writes.borrow();
    assert_eq!(writes.len(), 3);
    let last = writes.last().unwrap();
    assert_eq!(last.content, "<p>kept</p>");
    assert_eq!(last.font_size, "32");
    assert_eq!(last.alignment, Alignment::Center);
}

#[test]
fn slot_state_is_restored_without_history() {
    let mut format = FormattingState::default();
    format.font_family = "Times New Roman".into();
    format.heading_level = HeadingLevel::H1;
    let slot = SharedSlot {
        writes: Rc::default(),
        initial: Some(PersistedState::capture("<h1>saved</h1>", &format)),
    };

    let store = EditorStore::with_slot(&EditorConfig::default(), Box::new(slot));
    assert_eq!(store.content(), "<h1>saved</h1>");
    assert_eq!(store.format().font_family, "Times New Roman");
    assert_eq!(store.format().heading_level, HeadingLevel::H1);
    assert!(!store.format().bold);
    assert!(!store.can_undo() && !store.can_redo());
}

#[test]
fn initial_format_comes_from_config() {
    let config = EditorConfig {
        initial_format: FormattingState {
            font_size: "20".into(),
            ..FormattingState::default()
        },
        ..EditorConfig::default()
    };
    let store = EditorStore::new(&config);
    assert_eq!(store.format().font_size, "20");
}
