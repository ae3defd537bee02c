use crate::config::EditorConfig;
use crate::format::{Alignment, BlockType, FormattingState, HeadingLevel};
use crate::history::ContentHistory;
use crate::persist::{PersistedState, StateSlot};
use crate::selection::Selection;

/// The field an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreChange {
    Content,
    History,
    Selection,
    Bold,
    Italic,
    Underline,
    FontSize,
    FontFamily,
    TextColor,
    HighlightColor,
    Alignment,
    BulletList,
    NumberedList,
    IndentLevel,
    HeadingLevel,
    BlockType,
}

impl StoreChange {
    pub fn is_persisted(self) -> bool {
        matches!(
            self,
            StoreChange::Content
                | StoreChange::FontSize
                | StoreChange::FontFamily
                | StoreChange::TextColor
                | StoreChange::HighlightColor
                | StoreChange::Alignment
                | StoreChange::HeadingLevel
                | StoreChange::BlockType
        )
    }
}

/// Delivered to observers after each operation.
#[derive(Debug, Clone, Copy)]
pub struct StoreEvent<'a> {
    pub change: StoreChange,
    pub content: &'a str,
    pub format: &'a FormattingState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Observer = Box<dyn FnMut(&StoreEvent<'_>)>;

/// Formatting flags, content and the content history, mutated only through
/// the named operations below. Every operation notifies observers
/// synchronously.
pub struct EditorStore {
    content: String,
    selection: Option<Selection>,
    format: FormattingState,
    history: ContentHistory,
    observers: Vec<(Subscription, Observer)>,
    next_subscription: u64,
    slot: Option<Box<dyn StateSlot>>,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditorStore {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            content: String::new(),
            selection: None,
            format: config.initial_format.clone(),
            history: ContentHistory::new(config.history_limit),
            observers: Vec::new(),
            next_subscription: 1,
            slot: None,
        }
    }

    /// Creates a store backed by `slot`, restoring the persisted subset if
    /// the slot holds one. Unreadable slots start from the defaults.
    pub fn with_slot(config: &EditorConfig, slot: Box<dyn StateSlot>) -> Self {
        let mut store = Self::new(config);
        match slot.load() {
            Ok(Some(persisted)) => {
                tracing::debug!(key = slot.key(), "restored persisted editor state");
                store.content = persisted.content.clone();
                persisted.restore_into(&mut store.format);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(key = slot.key(), "ignoring persisted editor state: {err}");
            }
        }
        store.slot = Some(slot);
        store
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn format(&self) -> &FormattingState {
        &self.format
    }

    pub fn history(&self) -> &ContentHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState::capture(&self.content, &self.format)
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent<'_>) + 'static) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((subscription, Box::new(observer)));
        subscription
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.history.record(content.clone());
        self.content = content;
        self.commit(StoreChange::Content);
    }

    /// Snapshots the current content without changing it.
    pub fn save_to_history(&mut self) {
        self.history.record(self.content.clone());
        self.commit(StoreChange::History);
    }

    pub fn undo(&mut self) -> bool {
        let current = self.content.clone();
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        self.content = previous;
        self.commit(StoreChange::Content);
        true
    }

    pub fn redo(&mut self) -> bool {
        let current = self.content.clone();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.content = next;
        self.commit(StoreChange::Content);
        true
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        self.commit(StoreChange::Selection);
    }

    pub fn toggle_bold(&mut self) {
        self.format.bold = !self.format.bold;
        self.commit(StoreChange::Bold);
    }

    pub fn toggle_italic(&mut self) {
        self.format.italic = !self.format.italic;
        self.commit(StoreChange::Italic);
    }

    pub fn toggle_underline(&mut self) {
        self.format.underline = !self.format.underline;
        self.commit(StoreChange::Underline);
    }

    pub fn toggle_bullet_list(&mut self) {
        self.format.bullet_list = !self.format.bullet_list;
        self.commit(StoreChange::BulletList);
    }

    pub fn toggle_numbered_list(&mut self) {
        self.format.numbered_list = !self.format.numbered_list;
        self.commit(StoreChange::NumberedList);
    }

    pub fn set_font_size(&mut self, size: impl Into<String>) {
        self.format.font_size = size.into();
        self.commit(StoreChange::FontSize);
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.format.font_family = family.into();
        self.commit(StoreChange::FontFamily);
    }

    pub fn set_text_color(&mut self, color: impl Into<String>) {
        self.format.text_color = color.into();
        self.commit(StoreChange::TextColor);
    }

    pub fn set_highlight_color(&mut self, color: impl Into<String>) {
        self.format.highlight_color = color.into();
        self.commit(StoreChange::HighlightColor);
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.format.alignment = alignment;
        self.commit(StoreChange::Alignment);
    }

    pub fn set_indent_level(&mut self, level: u32) {
        self.format.indent_level = level;
        self.commit(StoreChange::IndentLevel);
    }

    pub fn indent(&mut self) {
        self.set_indent_level(self.format.indent_level.saturating_add(1));
    }

    pub fn outdent(&mut self) {
        self.set_indent_level(self.format.indent_level.saturating_sub(1));
    }

    pub fn set_heading_level(&mut self, level: HeadingLevel) {
        self.format.heading_level = level;
        self.commit(StoreChange::HeadingLevel);
    }

    pub fn set_block_type(&mut self, block_type: BlockType) {
        self.format.block_type = block_type;
        self.commit(StoreChange::BlockType);
    }

    fn commit(&mut self, change: StoreChange) {
        if change.is_persisted() {
            self.persist();
        }

        let event = StoreEvent {
            change,
            content: &self.content,
            format: &self.format,
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }

    fn persist(&mut self) {
        let Some(slot) = self.slot.as_mut() else {
            return;
        };
        let state = PersistedState::capture(&self.content, &self.format);
        if let Err(err) = slot.store(&state) {
            tracing::warn!(key = slot.key(), "failed to persist editor state: {err}");
        }
    }
}

impl std::fmt::Debug for EditorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorStore")
            .field("content", &self.content)
            .field("selection", &self.selection)
            .field("format", &self.format)
            .field("history", &self.history)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
