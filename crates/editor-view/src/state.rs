use gpui::{
    App, Bounds, Context, Entity, FocusHandle, KeyBinding, KeyDownEvent, MouseButton,
    MouseDownEvent, MouseMoveEvent, Pixels, Window, actions,
};
use scribe_editor_core::{Editor, EditorStore, KeyInput, Modifiers, Shortcut, TextBuffer as _};

use crate::host::BufferHost;

pub(crate) const CONTEXT: &str = "ScribeEditor";

actions!(
    scribe_editor,
    [ToggleBold, ToggleItalic, ToggleUnderline, Undo, Redo]
);

pub(crate) fn init(cx: &mut App) {
    cx.bind_keys([
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-b", ToggleBold, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-b", ToggleBold, Some(CONTEXT)),
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-i", ToggleItalic, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-i", ToggleItalic, Some(CONTEXT)),
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-u", ToggleUnderline, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-u", ToggleUnderline, Some(CONTEXT)),
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-z", Undo, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-z", Undo, Some(CONTEXT)),
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-shift-z", Redo, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-shift-z", Redo, Some(CONTEXT)),
    ]);
}

/// The editor entity: the core [`Editor`] plus the text surface it drives.
pub struct EditorView {
    pub(crate) focus_handle: FocusHandle,
    pub(crate) editor: Editor,
    pub(crate) host: BufferHost,
    /// Root bounds in window coordinates, captured during prepaint.
    pub(crate) bounds: Bounds<Pixels>,
    selecting: bool,
}

impl EditorView {
    pub fn new(mut editor: Editor, _window: &mut Window, cx: &mut Context<Self>) -> Self {
        let focus_handle = cx.focus_handle().tab_stop(true);
        let mut host = BufferHost::new(editor.store().content());
        editor.sync_formatting(&mut host);

        Self {
            focus_handle,
            editor,
            host,
            bounds: Bounds::default(),
            selecting: false,
        }
    }

    pub fn view(editor: Editor, window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(editor, window, cx))
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn host(&self) -> &BufferHost {
        &self.host
    }

    pub fn focus_handle(&self) -> FocusHandle {
        self.focus_handle.clone()
    }

    pub(crate) fn shortcut(&mut self, shortcut: Shortcut, cx: &mut Context<Self>) {
        self.editor.handle_shortcut(shortcut, &mut self.host);
        if matches!(shortcut, Shortcut::Undo | Shortcut::Redo) {
            self.report_selection();
        }
        cx.notify();
    }

    /// Runs a toolbar operation against the store and hands focus back to the
    /// text.
    pub(crate) fn update_format(
        &mut self,
        update: impl FnOnce(&mut EditorStore),
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.editor.update_store(&mut self.host, update);
        window.focus(&self.focus_handle);
        cx.notify();
    }

    pub(crate) fn undo(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.editor.undo(&mut self.host) {
            self.report_selection();
        }
        window.focus(&self.focus_handle);
        cx.notify();
    }

    pub(crate) fn redo(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.editor.redo(&mut self.host) {
            self.report_selection();
        }
        window.focus(&self.focus_handle);
        cx.notify();
    }

    pub(crate) fn select_candidate(
        &mut self,
        index: usize,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.editor.select_candidate(index, &mut self.host) {
            self.report_selection();
        }
        window.focus(&self.focus_handle);
        cx.notify();
    }

    pub(crate) fn dismiss_mention(&mut self, cx: &mut Context<Self>) {
        if self.editor.mention().is_active() {
            self.editor.dismiss_mention();
            cx.notify();
        }
    }

    pub(crate) fn on_key_down(&mut self, event: &KeyDownEvent, cx: &mut Context<Self>) -> bool {
        let keystroke = &event.keystroke;
        let modifiers = Modifiers {
            control: keystroke.modifiers.control,
            platform: keystroke.modifiers.platform,
            shift: keystroke.modifiers.shift,
            alt: keystroke.modifiers.alt,
        };

        let input = KeyInput::new(keystroke.key.as_str(), modifiers);
        if self.editor.handle_key(&input, &mut self.host).is_handled() {
            self.report_selection();
            cx.notify();
            return true;
        }
        if modifiers.is_secondary() {
            return false;
        }

        let shift = modifiers.shift;
        let buffer = self.host.buffer_mut();
        let caret = buffer.caret();
        match keystroke.key.as_str() {
            "backspace" => buffer.backspace(),
            "delete" => buffer.delete(),
            "enter" => buffer.insert("\n"),
            "left" => {
                let target = match (buffer.has_selection(), shift) {
                    (true, false) => buffer.selection().start,
                    _ => buffer.previous_boundary(caret),
                };
                buffer.move_caret_to(target, shift);
                return self.caret_moved(cx);
            }
            "right" => {
                let target = match (buffer.has_selection(), shift) {
                    (true, false) => buffer.selection().end,
                    _ => buffer.next_boundary(caret),
                };
                buffer.move_caret_to(target, shift);
                return self.caret_moved(cx);
            }
            "up" | "down" => {
                let (row, col) = self.host.row_col(caret);
                let target_row = if keystroke.key == "up" {
                    row.checked_sub(1)
                } else {
                    Some(row + 1).filter(|row| *row < self.host.line_count())
                };
                let target = match target_row {
                    Some(row) => {
                        let range = self.host.line_range(row);
                        range.start + col.min(range.len())
                    }
                    None if keystroke.key == "up" => 0,
                    None => self.host.buffer().text().len(),
                };
                self.host.buffer_mut().move_caret_to(target, shift);
                return self.caret_moved(cx);
            }
            "home" => {
                let (row, _) = self.host.row_col(caret);
                let start = self.host.line_range(row).start;
                self.host.buffer_mut().move_caret_to(start, shift);
                return self.caret_moved(cx);
            }
            "end" => {
                let (row, _) = self.host.row_col(caret);
                let end = self.host.line_range(row).end;
                self.host.buffer_mut().move_caret_to(end, shift);
                return self.caret_moved(cx);
            }
            "escape" | "tab" => return false,
            _ => match keystroke.key_char.as_deref() {
                Some(text) if !text.is_empty() => buffer.insert(text),
                _ => return false,
            },
        }

        self.editor.handle_input(&mut self.host);
        self.report_selection();
        cx.notify();
        true
    }

    pub(crate) fn on_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        window.focus(&self.focus_handle);
        self.editor.dismiss_mention();
        if let Some(offset) = self.host.offset_for_position(event.position) {
            self.host
                .buffer_mut()
                .move_caret_to(offset, event.modifiers.shift);
        }
        self.selecting = true;
        self.report_selection();
        cx.notify();
    }

    pub(crate) fn on_mouse_move(&mut self, event: &MouseMoveEvent, cx: &mut Context<Self>) {
        if !self.selecting || event.pressed_button != Some(MouseButton::Left) {
            return;
        }
        if let Some(offset) = self.host.offset_for_position(event.position) {
            self.host.buffer_mut().move_caret_to(offset, true);
            self.report_selection();
            cx.notify();
        }
    }

    pub(crate) fn on_mouse_up(&mut self) {
        self.selecting = false;
    }

    fn caret_moved(&mut self, cx: &mut Context<Self>) -> bool {
        self.report_selection();
        cx.notify();
        true
    }

    fn report_selection(&mut self) {
        let snapshot = self.host.selection_snapshot();
        self.editor.handle_selection_change(&snapshot);
    }
}

impl gpui::Focusable for EditorView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}
