use std::ops::Range;

use gpui::{Bounds, Pixels, Point, TextLayout, point, px};
use scribe_editor_core::{
    EditingHost, FormattingCommand, FormattingCommands, FormattingState, PlainTextBuffer, Rect,
    SelectionSnapshot, TextBuffer,
};

/// Layout of one rendered line, captured during prepaint.
#[derive(Clone)]
pub(crate) struct LineLayoutCache {
    pub(crate) bounds: Bounds<Pixels>,
    pub(crate) start_offset: usize,
    pub(crate) line_len: usize,
    pub(crate) text_layout: TextLayout,
}

/// A single-block editing surface over a [`PlainTextBuffer`].
///
/// The markup payload is the plain text of the block and each line is its
/// own text node. Formatting commands are folded into `rendered`, which is
/// what the view paints.
pub struct BufferHost {
    buffer: PlainTextBuffer,
    rendered: FormattingState,
    pub(crate) layout_cache: Vec<Option<LineLayoutCache>>,
}

impl BufferHost {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            buffer: PlainTextBuffer::new(text),
            rendered: FormattingState::default(),
            layout_cache: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &PlainTextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PlainTextBuffer {
        &mut self.buffer
    }

    /// Formatting as last applied through commands.
    pub fn rendered(&self) -> &FormattingState {
        &self.rendered
    }

    pub(crate) fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        let text = self.buffer.text();
        text.split('\n').scan(0usize, |start, line| {
            let line_start = *start;
            *start += line.len() + 1;
            Some((line_start, line))
        })
    }

    pub(crate) fn row_col(&self, offset: usize) -> (usize, usize) {
        let text = self.buffer.text();
        let offset = offset.min(text.len());
        let row = text[..offset].matches('\n').count();
        let line_start = text[..offset].rfind('\n').map(|ix| ix + 1).unwrap_or(0);
        (row, offset - line_start)
    }

    pub(crate) fn line_range(&self, row: usize) -> Range<usize> {
        self.lines()
            .nth(row)
            .map(|(start, line)| start..start + line.len())
            .unwrap_or_else(|| {
                let len = self.buffer.text().len();
                len..len
            })
    }

    pub(crate) fn line_count(&self) -> usize {
        self.buffer.text().matches('\n').count() + 1
    }

    pub(crate) fn reset_layout_cache(&mut self) {
        let rows = self.line_count();
        self.layout_cache.clear();
        self.layout_cache.resize_with(rows, || None);
    }

    pub(crate) fn cache_line(&mut self, row: usize, cache: LineLayoutCache) {
        if row >= self.layout_cache.len() {
            self.layout_cache.resize_with(row + 1, || None);
        }
        self.layout_cache[row] = Some(cache);
    }

    pub(crate) fn position_for_offset(&self, offset: usize) -> Option<Point<Pixels>> {
        let (row, col) = self.row_col(offset);
        let cache = self.layout_cache.get(row)?.as_ref()?;
        let col = col.min(cache.line_len);
        cache
            .text_layout
            .position_for_index(col)
            .or_else(|| cache.text_layout.position_for_index(cache.line_len))
    }

    pub(crate) fn caret_rect(&self, offset: usize) -> Option<Bounds<Pixels>> {
        let (row, _) = self.row_col(offset);
        let cache = self.layout_cache.get(row)?.as_ref()?;
        let pos = self.position_for_offset(offset)?;
        let line_height = cache.text_layout.line_height();
        Some(Bounds::from_corners(
            pos,
            point(pos.x + px(1.5), pos.y + line_height),
        ))
    }

    /// Text offset under a window position, if it falls on a cached line.
    pub(crate) fn offset_for_position(&self, position: Point<Pixels>) -> Option<usize> {
        let caches = self.layout_cache.iter().flatten();
        let cache = caches
            .clone()
            .find(|cache| position.y < cache.bounds.bottom())
            .or_else(|| caches.last())?;

        let local = match cache.text_layout.index_for_position(position) {
            Ok(ix) | Err(ix) => ix,
        };
        Some(cache.start_offset + local.min(cache.line_len))
    }

    pub fn selection_snapshot(&self) -> SelectionSnapshot {
        let range = self.buffer.selection();
        let bounds = match (self.caret_rect(range.start), self.caret_rect(range.end)) {
            (Some(start), Some(end)) => Some(to_rect(start).union(&to_rect(end))),
            (Some(only), None) | (None, Some(only)) => Some(to_rect(only)),
            (None, None) => None,
        };
        SelectionSnapshot {
            range: Some(range),
            bounds,
        }
    }
}

impl FormattingCommands for BufferHost {
    fn apply_formatting_command(&mut self, command: &FormattingCommand) {
        tracing::trace!(name = command.name(), value = ?command.value(), "formatting command");
        let rendered = &mut self.rendered;
        match command {
            FormattingCommand::Bold(on) => rendered.bold = *on,
            FormattingCommand::Italic(on) => rendered.italic = *on,
            FormattingCommand::Underline(on) => rendered.underline = *on,
            FormattingCommand::Justify(alignment, true) => rendered.alignment = *alignment,
            FormattingCommand::Justify(_, false) => {}
            FormattingCommand::UnorderedList(on) => rendered.bullet_list = *on,
            FormattingCommand::OrderedList(on) => rendered.numbered_list = *on,
            FormattingCommand::Indent => rendered.indent_level += 1,
            // One block, so outdenting strips its whole indentation.
            FormattingCommand::Outdent => rendered.indent_level = 0,
            FormattingCommand::FontSize(size) => rendered.font_size = size.clone(),
            FormattingCommand::FontName(family) => rendered.font_family = family.clone(),
            FormattingCommand::ForeColor(color) => rendered.text_color = color.clone(),
            FormattingCommand::HiliteColor(color) => rendered.highlight_color = color.clone(),
            FormattingCommand::Heading(level) => rendered.heading_level = *level,
            FormattingCommand::Block(block) => rendered.block_type = *block,
        }
    }
}

impl EditingHost for BufferHost {
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
        self.caret_rect(self.buffer.caret()).map(to_rect)
    }
}

pub(crate) fn to_rect(bounds: Bounds<Pixels>) -> Rect {
    Rect::new(
        f32::from(bounds.origin.x),
        f32::from(bounds.origin.y),
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    )
}
