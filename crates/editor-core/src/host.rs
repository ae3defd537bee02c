//! Capabilities the editor needs from the surface it is mounted on.

use std::ops::Range;

use crate::format::{Alignment, BlockType, HeadingLevel};
use crate::mention::clamp_to_char_boundary;
use crate::selection::Rect;

/// A native formatting command: a command name plus an optional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattingCommand {
    Bold(bool),
    Italic(bool),
    Underline(bool),
    Justify(Alignment, bool),
    UnorderedList(bool),
    OrderedList(bool),
    Indent,
    Outdent,
    FontSize(String),
    FontName(String),
    ForeColor(String),
    HiliteColor(String),
    Heading(HeadingLevel),
    Block(BlockType),
}

impl FormattingCommand {
    pub fn name(&self) -> &'static str {
        match self {
            FormattingCommand::Bold(_) => "bold",
            FormattingCommand::Italic(_) => "italic",
            FormattingCommand::Underline(_) => "underline",
            FormattingCommand::Justify(Alignment::Left, _) => "justifyLeft",
            FormattingCommand::Justify(Alignment::Center, _) => "justifyCenter",
            FormattingCommand::Justify(Alignment::Right, _) => "justifyRight",
            FormattingCommand::Justify(Alignment::Justify, _) => "justifyFull",
            FormattingCommand::UnorderedList(_) => "insertUnorderedList",
            FormattingCommand::OrderedList(_) => "insertOrderedList",
            FormattingCommand::Indent => "indent",
            FormattingCommand::Outdent => "outdent",
            FormattingCommand::FontSize(_) => "fontSize",
            FormattingCommand::FontName(_) => "fontName",
            FormattingCommand::ForeColor(_) => "foreColor",
            FormattingCommand::HiliteColor(_) => "hiliteColor",
            FormattingCommand::Heading(_) | FormattingCommand::Block(_) => "formatBlock",
        }
    }

    pub fn value(&self) -> Option<String> {
        match self {
            FormattingCommand::Bold(on)
            | FormattingCommand::Italic(on)
            | FormattingCommand::Underline(on)
            | FormattingCommand::Justify(_, on)
            | FormattingCommand::UnorderedList(on)
            | FormattingCommand::OrderedList(on) => Some(on.to_string()),
            FormattingCommand::Indent | FormattingCommand::Outdent => Some("true".to_string()),
            FormattingCommand::FontSize(value)
            | FormattingCommand::FontName(value)
            | FormattingCommand::ForeColor(value)
            | FormattingCommand::HiliteColor(value) => Some(value.clone()),
            FormattingCommand::Heading(level) => Some(level.as_str().to_string()),
            FormattingCommand::Block(block) => Some(block.as_str().to_string()),
        }
    }
}

/// Fire-and-forget access to the host's formatting primitives. Hosts may
/// ignore commands they do not support.
pub trait FormattingCommands {
    fn apply_formatting_command(&mut self, command: &FormattingCommand);
}

/// Text of the node holding the caret, addressed in UTF-8 byte offsets.
pub trait TextBuffer {
    fn text(&self) -> &str;
    fn caret(&self) -> usize;
    fn splice(&mut self, range: Range<usize>, replacement: &str);
    fn set_caret(&mut self, offset: usize);
}

/// In-memory [`TextBuffer`] with an optional selection anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainTextBuffer {
    text: String,
    caret: usize,
    anchor: Option<usize>,
}

impl PlainTextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.len();
        Self {
            text,
            caret,
            anchor: None,
        }
    }

    pub fn with_caret(mut self, caret: usize) -> Self {
        self.set_caret(caret);
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.caret.min(self.text.len());
        self.caret = clamp_to_char_boundary(&self.text, self.caret);
        self.anchor = None;
    }

    /// Selected byte range, ordered. Empty when nothing is selected.
    pub fn selection(&self) -> Range<usize> {
        match self.anchor {
            Some(anchor) if anchor != self.caret => anchor.min(self.caret)..anchor.max(self.caret),
            _ => self.caret..self.caret,
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selection().is_empty()
    }

    /// Moves the caret, extending the selection when `extend` is set.
    pub fn move_caret_to(&mut self, offset: usize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.caret);
        } else {
            self.anchor = None;
        }
        self.caret = clamp_to_char_boundary(&self.text, offset);
    }

    /// The `\n`-delimited line holding the caret, as its own text node.
    pub fn caret_line(&mut self) -> CaretLine<'_> {
        let range = self.line_around(self.caret);
        CaretLine {
            buffer: self,
            range,
        }
    }

    fn line_around(&self, offset: usize) -> Range<usize> {
        let offset = offset.min(self.text.len());
        let start = self.text[..offset].rfind('\n').map_or(0, |ix| ix + 1);
        let end = self.text[offset..]
            .find('\n')
            .map_or(self.text.len(), |ix| offset + ix);
        start..end
    }

    pub fn previous_boundary(&self, offset: usize) -> usize {
        self.text[..offset.min(self.text.len())]
            .char_indices()
            .next_back()
            .map(|(ix, _)| ix)
            .unwrap_or(0)
    }

    pub fn next_boundary(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.text[offset..]
            .chars()
            .next()
            .map(|ch| offset + ch.len_utf8())
            .unwrap_or(self.text.len())
    }

    /// Replaces the selection (or inserts at the caret).
    pub fn insert(&mut self, text: &str) {
        let range = self.selection();
        self.splice(range.clone(), text);
        self.set_caret(range.start + text.len());
    }

    /// Deletes the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        let mut range = self.selection();
        if range.is_empty() {
            range.start = self.previous_boundary(range.start);
        }
        if range.is_empty() {
            return;
        }
        self.splice(range.clone(), "");
        self.set_caret(range.start);
    }

    /// Deletes the selection, or the character after the caret.
    pub fn delete(&mut self) {
        let mut range = self.selection();
        if range.is_empty() {
            range.end = self.next_boundary(range.end);
        }
        if range.is_empty() {
            return;
        }
        self.splice(range.clone(), "");
        self.set_caret(range.start);
    }
}

impl TextBuffer for PlainTextBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        let start = clamp_to_char_boundary(&self.text, range.start);
        let end = clamp_to_char_boundary(&self.text, range.end.max(start));
        self.text.replace_range(start..end, replacement);
        self.anchor = None;

        if self.caret >= end {
            self.caret = self.caret - (end - start) + replacement.len();
        } else if self.caret > start {
            self.caret = start + replacement.len();
        }
    }

    fn set_caret(&mut self, offset: usize) {
        self.anchor = None;
        self.caret = clamp_to_char_boundary(&self.text, offset);
    }
}

/// One line of a [`PlainTextBuffer`]. Offsets are relative to the line
/// start and edits never reach past its end.
pub struct CaretLine<'a> {
    buffer: &'a mut PlainTextBuffer,
    range: Range<usize>,
}

impl CaretLine<'_> {
    fn to_buffer(&self, offset: usize) -> usize {
        self.range.start + offset.min(self.range.len())
    }
}

impl TextBuffer for CaretLine<'_> {
    fn text(&self) -> &str {
        &self.buffer.text[self.range.clone()]
    }

    fn caret(&self) -> usize {
        self.buffer.caret.clamp(self.range.start, self.range.end) - self.range.start
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        let end = self.to_buffer(range.end);
        let start = self.to_buffer(range.start).min(end);
        self.buffer.splice(start..end, replacement);
        self.range.end = self.range.end - (end - start) + replacement.len();
    }

    fn set_caret(&mut self, offset: usize) {
        let offset = self.to_buffer(offset);
        self.buffer.set_caret(offset);
    }
}

/// The surface the editor is mounted on.
pub trait EditingHost: FormattingCommands {
    /// Structured text-with-markup payload of the whole surface.
    fn markup(&self) -> String;
    fn set_markup(&mut self, markup: &str);
    /// The text node holding the caret, if any.
    fn caret_node(&mut self) -> Option<Box<dyn TextBuffer + '_>>;
    /// Caret rectangle in window coordinates.
    fn caret_bounds(&self) -> Option<Rect>;
}
