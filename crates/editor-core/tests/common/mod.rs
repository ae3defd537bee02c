#![allow(dead_code)]

use scribe_editor_core::{
    EditingHost, FormattingCommand, FormattingCommands, PlainTextBuffer, Rect, TextBuffer,
};

/// Host double: each line is a text node, markup equals the whole text and
/// commands are logged.
#[derive(Default)]
pub struct RecordingHost {
    pub buffer: PlainTextBuffer,
    pub commands: Vec<FormattingCommand>,
    pub caret_bounds: Option<Rect>,
}

impl RecordingHost {
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: PlainTextBuffer::new(text),
            commands: Vec::new(),
            caret_bounds: Some(Rect::new(10., 20., 1., 16.)),
        }
    }

    pub fn type_text(&mut self, text: &str) {
        self.buffer.insert(text);
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(FormattingCommand::name).collect()
    }
}

impl FormattingCommands for RecordingHost {
    fn apply_formatting_command(&mut self, command: &FormattingCommand) {
        self.commands.push(command.clone());
    }
}

impl EditingHost for RecordingHost {
    fn markup(&self) -> String {
        self.buffer.text().to_string()
    }

    fn set_markup(&mut self, markup: &str) {
        self.buffer.set_text(markup);
    }

    fn caret_node(&mut self) -> Option<Box<dyn TextBuffer + '_>> {
        Some(Box::new(self.buffer.caret_line()))
    }

    fn caret_bounds(&self) -> Option<Rect> {
        self.caret_bounds
    }
}
