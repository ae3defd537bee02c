use std::ops::Range;

use gpui::prelude::FluentBuilder as _;
use gpui::{
    AnyElement, Bounds, Context, FontStyle, FontWeight, Hsla, InteractiveElement as _,
    IntoElement, KeyDownEvent, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent,
    ParentElement as _, Pixels, Point, Render, Rgba, SharedString,
    StatefulInteractiveElement as _, Styled as _, StyledText, TextRun, TextStyle, UnderlineStyle,
    Window, canvas, div, point, px, size,
};
use gpui_component::ActiveTheme as _;
use scribe_editor_core::{
    Alignment, BlockType, DEFAULT_HIGHLIGHT_COLOR, FormattingState, HeadingLevel, MentionMode,
    Shortcut, TextBuffer as _,
};

use crate::host::LineLayoutCache;
use crate::mention_list::mention_list;
use crate::state::{
    CONTEXT, EditorView, Redo, ToggleBold, ToggleItalic, ToggleUnderline, Undo,
};
use crate::toolbar::{floating_toolbar, main_toolbar};

const INDENT_WIDTH: f32 = 18.;
const FLOATING_TOOLBAR_OFFSET: f32 = 40.;
const MENTION_LIST_OFFSET: f32 = 20.;

fn monospace_font_family() -> SharedString {
    #[cfg(target_os = "macos")]
    {
        "Menlo".into()
    }
    #[cfg(target_os = "windows")]
    {
        "Consolas".into()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        "monospace".into()
    }
}

fn parse_color(hex: &str) -> Option<Hsla> {
    Rgba::try_from(hex).ok().map(Hsla::from)
}

fn heading_scale(level: HeadingLevel) -> f32 {
    match level {
        HeadingLevel::H1 => 1.8,
        HeadingLevel::H2 => 1.4,
        HeadingLevel::H3 => 1.2,
        HeadingLevel::H4 => 1.1,
        HeadingLevel::H5 => 1.05,
        HeadingLevel::H6 | HeadingLevel::P => 1.0,
    }
}

/// Base run style for the block, before selection highlighting.
fn block_text_style(base: TextStyle, format: &FormattingState) -> TextStyle {
    let mut style = base;
    style.font_family = if format.block_type == BlockType::Pre {
        monospace_font_family()
    } else {
        format.font_family.clone().into()
    };
    if format.bold || format.heading_level != HeadingLevel::P {
        style.font_weight = FontWeight::BOLD;
    }
    if format.italic || format.block_type == BlockType::Blockquote {
        style.font_style = FontStyle::Italic;
    }
    if let Some(color) = parse_color(&format.text_color) {
        style.color = color;
    }
    if format.highlight_color != DEFAULT_HIGHLIGHT_COLOR {
        style.background_color = parse_color(&format.highlight_color);
    }
    if format.underline {
        style.underline = Some(UnderlineStyle {
            thickness: px(1.),
            color: Some(style.color),
            wavy: false,
        });
    }
    style
}

/// Splits a line into runs so the selected part gets the selection
/// background.
fn line_runs(
    style: &TextStyle,
    line_len: usize,
    selected: Option<Range<usize>>,
    selection_color: Hsla,
) -> Vec<TextRun> {
    if line_len == 0 {
        return vec![style.to_run(1)];
    }
    let Some(selected) = selected.filter(|range| !range.is_empty()) else {
        return vec![style.to_run(line_len)];
    };

    let mut runs = Vec::with_capacity(3);
    if selected.start > 0 {
        runs.push(style.to_run(selected.start));
    }
    let mut highlighted = style.clone();
    highlighted.background_color = Some(selection_color);
    runs.push(highlighted.to_run(selected.len()));
    if selected.end < line_len {
        runs.push(style.to_run(line_len - selected.end));
    }
    runs
}

impl EditorView {
    fn render_lines(&mut self, window: &mut Window, cx: &mut Context<Self>) -> Vec<AnyElement> {
        self.host.reset_layout_cache();

        let view = cx.entity();
        let theme = cx.theme();
        let selection_color = theme.selection;
        let caret_color = theme.primary;
        let muted_foreground = theme.muted_foreground;

        let format = self.host.rendered().clone();
        let style = block_text_style(window.text_style(), &format);
        let selection = self.host.buffer().selection();
        let caret = self.host.buffer().caret();
        let show_caret = self.focus_handle.is_focused(window) && selection.is_empty();

        let lines: Vec<(usize, String)> = self
            .host
            .lines()
            .map(|(start, line)| (start, line.to_string()))
            .collect();

        lines
            .into_iter()
            .enumerate()
            .map(|(row, (start, line))| {
                let line_len = line.len();
                let line_range = start..start + line_len;
                let selected = (selection.start < line_range.end
                    && selection.end > line_range.start)
                    .then(|| {
                        selection.start.max(start) - start..selection.end.min(line_range.end) - start
                    });
                let caret_col = (show_caret
                    && (line_range.start..=line_range.end).contains(&caret))
                .then(|| caret - start);

                let runs = line_runs(&style, line_len, selected, selection_color);
                let render_text: SharedString = if line.is_empty() {
                    " ".into()
                } else {
                    line.into()
                };
                let text = StyledText::new(render_text).with_runs(runs);
                let text_layout = text.layout().clone();

                let marker = match (format.numbered_list, format.bullet_list) {
                    (true, _) => Some(SharedString::from(format!("{}.", row + 1))),
                    (false, true) => Some(SharedString::from("•")),
                    (false, false) => None,
                };

                let measure = canvas(
                    {
                        let view = view.clone();
                        move |_, _, cx| {
                            let bounds = text_layout.bounds();
                            let line_height = text_layout.line_height();
                            let caret = caret_col
                                .and_then(|col| text_layout.position_for_index(col))
                                .map(|pos| Bounds::new(pos, size(px(1.5), line_height)));
                            view.update(cx, |this, _| {
                                this.host.cache_line(
                                    row,
                                    LineLayoutCache {
                                        bounds,
                                        start_offset: start,
                                        line_len,
                                        text_layout,
                                    },
                                );
                            });
                            caret
                        }
                    },
                    move |_, caret: Option<Bounds<Pixels>>, window, _| {
                        if let Some(caret) = caret {
                            window.paint_quad(gpui::quad(
                                caret,
                                px(0.),
                                caret_color,
                                gpui::Edges::default(),
                                gpui::transparent_black(),
                                gpui::BorderStyle::default(),
                            ));
                        }
                    },
                )
                .absolute()
                .size_full();

                div()
                    .relative()
                    .flex()
                    .flex_row()
                    .items_start()
                    .gap(px(6.))
                    .w_full()
                    .when_some(marker, |this, marker| {
                        this.child(
                            div()
                                .flex_none()
                                .text_color(muted_foreground)
                                .child(marker),
                        )
                    })
                    .child(
                        div()
                            .relative()
                            .flex()
                            .flex_1()
                            .min_w(px(0.))
                            .map(|this| match format.alignment {
                                Alignment::Left | Alignment::Justify => this.justify_start(),
                                Alignment::Center => this.justify_center(),
                                Alignment::Right => this.justify_end(),
                            })
                            .child(text)
                            .child(measure),
                    )
                    .into_any_element()
            })
            .collect()
    }

    fn render_document(
        &mut self,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> gpui::Div {
        let lines = self.render_lines(window, cx);
        let format = self.host.rendered().clone();
        let theme = cx.theme();

        let base_size = format
            .font_size
            .parse::<f32>()
            .ok()
            .filter(|size| size.is_finite() && *size > 0.)
            .unwrap_or(16.);
        let text_size = px(base_size * heading_scale(format.heading_level));

        let body = div()
            .flex()
            .flex_col()
            .gap(px(2.))
            .w_full()
            .text_size(text_size)
            .children(lines);

        let block = match format.block_type {
            BlockType::Blockquote => div()
                .flex()
                .flex_row()
                .gap(px(12.))
                .px(px(8.))
                .py(px(2.))
                .text_color(theme.muted_foreground)
                .child(div().w(px(3.)).flex_none().bg(theme.border).rounded(px(2.)))
                .child(body.flex_1()),
            BlockType::Pre => div()
                .p(px(8.))
                .bg(theme.muted)
                .rounded(theme.radius)
                .child(body),
            BlockType::P | BlockType::Div => div().child(body),
        };

        block.when(format.indent_level > 0, |this| {
            this.pl(px(INDENT_WIDTH * format.indent_level as f32))
        })
    }
}

impl Render for EditorView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let view = cx.entity();
        let document = self.render_document(window, cx);
        let toolbar = main_toolbar(self, cx);

        let origin = self.bounds.origin;
        let toolbar_state = self.editor.toolbar();
        let floating = toolbar_state.visible.then(|| {
            let anchor = point(
                px(toolbar_state.anchor.x),
                px(toolbar_state.anchor.y - FLOATING_TOOLBAR_OFFSET),
            );
            overlay_at(anchor, origin, true)
                .child(floating_toolbar(self.editor.store().format(), cx))
        });

        let dropdown = match self.editor.mention() {
            MentionMode::Active {
                anchor,
                results,
                highlighted,
                ..
            } => {
                let anchor = point(px(anchor.x), px(anchor.y + MENTION_LIST_OFFSET));
                let list = mention_list(results, *highlighted, cx);
                Some(overlay_at(anchor, origin, false).child(list))
            }
            MentionMode::Inactive => None,
        };

        let theme = cx.theme();

        div()
            .id("scribe-editor")
            .key_context(CONTEXT)
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(|this, _: &ToggleBold, _, cx| {
                this.shortcut(Shortcut::ToggleBold, cx);
            }))
            .on_action(cx.listener(|this, _: &ToggleItalic, _, cx| {
                this.shortcut(Shortcut::ToggleItalic, cx);
            }))
            .on_action(cx.listener(|this, _: &ToggleUnderline, _, cx| {
                this.shortcut(Shortcut::ToggleUnderline, cx);
            }))
            .on_action(cx.listener(|this, _: &Undo, _, cx| {
                this.shortcut(Shortcut::Undo, cx);
            }))
            .on_action(cx.listener(|this, _: &Redo, _, cx| {
                this.shortcut(Shortcut::Redo, cx);
            }))
            .on_key_down(cx.listener(|this, event: &KeyDownEvent, window, cx| {
                if this.on_key_down(event, cx) {
                    window.prevent_default();
                    cx.stop_propagation();
                }
            }))
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, _: &MouseDownEvent, _, cx| this.dismiss_mention(cx)),
            )
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(theme.background)
            .text_color(theme.foreground)
            .child(
                canvas(
                    move |bounds, _, cx| view.update(cx, |this, _| this.bounds = bounds),
                    |_, _, _, _| {},
                )
                .absolute()
                .size_full(),
            )
            .child(toolbar)
            .child(
                div()
                    .id("scribe-editor-text")
                    .flex_1()
                    .w_full()
                    .p(px(16.))
                    .overflow_y_scroll()
                    .cursor_text()
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|this, event: &MouseDownEvent, window, cx| {
                            this.on_mouse_down(event, window, cx);
                            cx.stop_propagation();
                        }),
                    )
                    .on_mouse_move(cx.listener(|this, event: &MouseMoveEvent, _, cx| {
                        this.on_mouse_move(event, cx);
                    }))
                    .on_mouse_up(
                        MouseButton::Left,
                        cx.listener(|this, _: &MouseUpEvent, _, _| this.on_mouse_up()),
                    )
                    .child(document),
            )
            .children(floating)
            .children(dropdown)
    }
}

/// Absolutely positioned overlay at a window-space `anchor`. Centered
/// overlays are centered horizontally on the anchor.
fn overlay_at(anchor: Point<Pixels>, origin: Point<Pixels>, centered: bool) -> gpui::Div {
    div()
        .absolute()
        .left(anchor.x - origin.x)
        .top(anchor.y - origin.y)
        .when(centered, |this| this.w(px(0.)).flex().justify_center())
}
