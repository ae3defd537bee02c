use crate::candidates::{
    Candidate, CandidateDirectory, FuzzyDirectory, MatchOptions, demo_directory,
};
use crate::config::EditorConfig;
use crate::format::{Alignment, FormattingState};
use crate::host::{EditingHost, FormattingCommand, FormattingCommands};
use crate::mention::{MentionMode, MentionQuery, mention_splice};
use crate::selection::{SelectionCoordinator, SelectionSnapshot, ToolbarState};
use crate::shortcut::{KeyInput, KeyOutcome, Shortcut};
use crate::store::EditorStore;

/// Wires input, shortcuts, selection and mentions to the store and the host.
pub struct Editor {
    store: EditorStore,
    directory: Box<dyn CandidateDirectory>,
    mention: MentionMode,
    selection: SelectionCoordinator,
    applied: Option<FormattingState>,
}

impl Editor {
    pub fn new(store: EditorStore, directory: impl CandidateDirectory + 'static) -> Self {
        Self {
            store,
            directory: Box::new(directory),
            mention: MentionMode::Inactive,
            selection: SelectionCoordinator::new(),
            applied: None,
        }
    }

    /// An editor over the demo directory, configured from `config`.
    pub fn from_config(config: &EditorConfig, store: EditorStore) -> Self {
        let directory: FuzzyDirectory = demo_directory().options(MatchOptions {
            threshold: config.mention_threshold,
            limit: config.mention_limit,
        });
        Self::new(store, directory)
    }

    pub fn store(&self) -> &EditorStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EditorStore {
        &mut self.store
    }

    pub fn mention(&self) -> &MentionMode {
        &self.mention
    }

    pub fn toolbar(&self) -> ToolbarState {
        self.selection.toolbar()
    }

    /// Runs a store operation and pushes whatever formatting it changed to
    /// the host.
    pub fn update_store(
        &mut self,
        host: &mut dyn EditingHost,
        update: impl FnOnce(&mut EditorStore),
    ) {
        update(&mut self.store);
        self.sync_formatting(host);
    }

    pub fn handle_key(&mut self, input: &KeyInput, host: &mut dyn EditingHost) -> KeyOutcome {
        if self.mention.is_active() && !input.modifiers.is_secondary() {
            match input.key.as_str() {
                "up" | "arrowup" => {
                    self.mention.move_highlight(-1);
                    return KeyOutcome::Handled;
                }
                "down" | "arrowdown" => {
                    self.mention.move_highlight(1);
                    return KeyOutcome::Handled;
                }
                "enter" => {
                    if let Some(index) = self.mention.highlighted() {
                        self.select_candidate(index, host);
                    }
                    return KeyOutcome::Handled;
                }
                "escape" => {
                    self.dismiss_mention();
                    return KeyOutcome::Handled;
                }
                _ => {}
            }
        }

        match Shortcut::from_key(input) {
            Some(shortcut) => {
                self.handle_shortcut(shortcut, host);
                KeyOutcome::Handled
            }
            None => KeyOutcome::Ignored,
        }
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut, host: &mut dyn EditingHost) {
        tracing::debug!(?shortcut, "editor shortcut");
        match shortcut {
            Shortcut::ToggleBold => self.update_store(host, EditorStore::toggle_bold),
            Shortcut::ToggleItalic => self.update_store(host, EditorStore::toggle_italic),
            Shortcut::ToggleUnderline => self.update_store(host, EditorStore::toggle_underline),
            Shortcut::Undo => {
                self.undo(host);
            }
            Shortcut::Redo => {
                self.redo(host);
            }
        }
    }

    /// Records the host's content and re-evaluates mention mode.
    pub fn handle_input(&mut self, host: &mut dyn EditingHost) {
        let markup = host.markup();
        self.store.set_content(markup);

        let anchor = host
            .caret_bounds()
            .map(|bounds| bounds.bottom_left())
            .unwrap_or_default();
        let query = match host.caret_node() {
            Some(node) => MentionQuery::extract(node.text(), anchor),
            None => MentionQuery::inactive(),
        };
        self.update_mention(query);
    }

    pub fn handle_selection_change(&mut self, snapshot: &SelectionSnapshot) {
        let reported = self.selection.on_selection_change(snapshot);
        self.store.set_selection(reported);
    }

    /// Selects the `index`th dropdown result. Returns `false` when there is
    /// no such result.
    pub fn select_candidate(&mut self, index: usize, host: &mut dyn EditingHost) -> bool {
        let Some(candidate) = self.mention.results().get(index).cloned() else {
            return false;
        };
        self.insert_mention(&candidate, host);
        true
    }

    /// Replaces the `@query` span in the caret node with `@display_name` and
    /// leaves mention mode.
    pub fn insert_mention(&mut self, candidate: &Candidate, host: &mut dyn EditingHost) {
        if let Some(mut node) = host.caret_node() {
            let caret = node.caret();
            if let Some(splice) = mention_splice(node.text(), caret, &candidate.display_name) {
                splice.apply(node.as_mut());
            }
        }
        tracing::debug!(id = %candidate.id, "inserted mention");
        self.mention.close();

        let markup = host.markup();
        self.store.set_content(markup);
    }

    /// Escape or a click outside the dropdown.
    pub fn dismiss_mention(&mut self) {
        if self.mention.is_active() {
            tracing::debug!("mention dropdown dismissed");
        }
        self.mention.close();
    }

    pub fn undo(&mut self, host: &mut dyn EditingHost) -> bool {
        if !self.store.undo() {
            return false;
        }
        host.set_markup(self.store.content());
        true
    }

    pub fn redo(&mut self, host: &mut dyn EditingHost) -> bool {
        if !self.store.redo() {
            return false;
        }
        host.set_markup(self.store.content());
        true
    }

    /// Applies every formatting field that changed since the last sync. The
    /// first sync applies all of them.
    pub fn sync_formatting<H: FormattingCommands + ?Sized>(&mut self, host: &mut H) {
        let current = self.store.format();
        let commands = formatting_commands(self.applied.as_ref(), current);
        for command in &commands {
            host.apply_formatting_command(command);
        }
        self.applied = Some(current.clone());
    }

    fn update_mention(&mut self, query: MentionQuery) {
        if !query.active {
            self.mention.close();
            return;
        }

        if self.mention.query() == Some(query.query.as_str()) {
            if let MentionMode::Active { anchor, .. } = &mut self.mention {
                *anchor = query.anchor;
            }
            return;
        }

        let results = self.directory.search(&query.query);
        if results.is_empty() {
            self.mention.close();
            return;
        }

        tracing::debug!(query = %query.query, results = results.len(), "mention mode active");
        self.mention = MentionMode::Active {
            query: query.query,
            anchor: query.anchor,
            results,
            highlighted: 0,
        };
    }
}

/// Commands needed to move the host from `previous` to `current`.
pub fn formatting_commands(
    previous: Option<&FormattingState>,
    current: &FormattingState,
) -> Vec<FormattingCommand> {
    let changed = |field: fn(&FormattingState) -> bool| match previous {
        Some(previous) => field(previous) != field(current),
        None => true,
    };
    let differs = |a: Option<&str>, b: &str| a != Some(b);

    let mut commands = Vec::new();

    if changed(|s| s.bold) {
        commands.push(FormattingCommand::Bold(current.bold));
    }
    if changed(|s| s.italic) {
        commands.push(FormattingCommand::Italic(current.italic));
    }
    if changed(|s| s.underline) {
        commands.push(FormattingCommand::Underline(current.underline));
    }
    if previous.map(|p| p.alignment) != Some(current.alignment) {
        for alignment in Alignment::ALL {
            commands.push(FormattingCommand::Justify(
                alignment,
                alignment == current.alignment,
            ));
        }
    }
    if changed(|s| s.bullet_list) {
        commands.push(FormattingCommand::UnorderedList(current.bullet_list));
    }
    if changed(|s| s.numbered_list) {
        commands.push(FormattingCommand::OrderedList(current.numbered_list));
    }
    if previous.map(|p| p.indent_level) != Some(current.indent_level) {
        commands.push(FormattingCommand::Outdent);
        commands.extend((0..current.indent_level).map(|_| FormattingCommand::Indent));
    }
    if differs(previous.map(|p| p.font_size.as_str()), &current.font_size) {
        commands.push(FormattingCommand::FontSize(current.font_size.clone()));
    }
    if differs(previous.map(|p| p.font_family.as_str()), &current.font_family) {
        commands.push(FormattingCommand::FontName(current.font_family.clone()));
    }
    if differs(previous.map(|p| p.text_color.as_str()), &current.text_color) {
        commands.push(FormattingCommand::ForeColor(current.text_color.clone()));
    }
    if differs(
        previous.map(|p| p.highlight_color.as_str()),
        &current.highlight_color,
    ) {
        commands.push(FormattingCommand::HiliteColor(
            current.highlight_color.clone(),
        ));
    }
    if previous.map(|p| p.heading_level) != Some(current.heading_level) {
        commands.push(FormattingCommand::Heading(current.heading_level));
    }
    if previous.map(|p| p.block_type) != Some(current.block_type) {
        commands.push(FormattingCommand::Block(current.block_type));
    }

    commands
}
