use std::rc::Rc;

use gpui::InteractiveElement as _;
use gpui::StatefulInteractiveElement as _;
use gpui::prelude::FluentBuilder as _;
use gpui::{
    AnyElement, App, Context, ElementId, Entity, IntoElement, MouseButton, ParentElement as _,
    RenderOnce, SharedString, StyleRefinement, Styled, Window, div, px,
};
use gpui_component::ActiveTheme as _;
use gpui_component::StyledExt as _;
use gpui_component::tooltip::Tooltip;
use scribe_editor_core::{
    Alignment, BlockType, EditorStore, FONT_FAMILIES, FONT_SIZES, FormattingState, HeadingLevel,
};

use crate::state::EditorView;

const TEXT_COLORS: [&str; 4] = ["#000000", "#e03131", "#1971c2", "#2f9e44"];
const HIGHLIGHT_COLORS: [&str; 3] = ["#ffffff", "#ffec99", "#c3fae8"];

type PressHandler = Rc<dyn Fn(&mut EditorView, &mut Window, &mut Context<EditorView>)>;

/// A labelled button that acts on an [`EditorView`].
///
/// Presses fire on mouse down and never take focus, so the caret and
/// selection stay where they were.
#[derive(IntoElement)]
pub struct ToolbarButton {
    id: ElementId,
    label: SharedString,
    tooltip: Option<SharedString>,
    style: StyleRefinement,
    active: bool,
    enabled: bool,
    on_press: Option<(Entity<EditorView>, PressHandler)>,
}

impl ToolbarButton {
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            tooltip: None,
            style: StyleRefinement::default(),
            active: false,
            enabled: true,
            on_press: None,
        }
    }

    /// A button running one store operation.
    pub(crate) fn store_op(
        id: impl Into<ElementId>,
        label: impl Into<SharedString>,
        view: &Entity<EditorView>,
        op: fn(&mut EditorStore),
    ) -> Self {
        Self::new(id, label).on_press(view, move |this, window, cx| {
            this.update_format(op, window, cx);
        })
    }

    pub fn tooltip(mut self, tooltip: impl Into<SharedString>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Marks the format the button controls as currently applied.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn on_press(
        mut self,
        view: &Entity<EditorView>,
        handler: impl Fn(&mut EditorView, &mut Window, &mut Context<EditorView>) + 'static,
    ) -> Self {
        self.on_press = Some((view.clone(), Rc::new(handler)));
        self
    }
}

impl Styled for ToolbarButton {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for ToolbarButton {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();
        let (background, foreground) = match (self.enabled, self.active) {
            (false, _) => (theme.transparent, theme.muted_foreground.opacity(0.6)),
            (true, true) => (theme.accent, theme.accent_foreground),
            (true, false) => (theme.transparent, theme.foreground),
        };
        let hover = theme.muted;
        let on_press = self.on_press.filter(|_| self.enabled);

        div()
            .id(self.id)
            .h(px(28.))
            .min_w(px(28.))
            .px(px(6.))
            .flex()
            .items_center()
            .justify_center()
            .rounded(theme.radius)
            .text_size(px(12.))
            .bg(background)
            .text_color(foreground)
            .when(self.enabled && !self.active, |this| {
                this.cursor_pointer().hover(move |this| this.bg(hover))
            })
            .refine_style(&self.style)
            .on_mouse_down(MouseButton::Left, move |_, window, cx| {
                window.prevent_default();
                cx.stop_propagation();
                if let Some((view, handler)) = &on_press {
                    view.update(cx, |this, cx| handler(this, window, cx));
                }
            })
            .when_some(self.tooltip, |this, tooltip| {
                this.tooltip(move |window, cx| Tooltip::new(tooltip.clone()).build(window, cx))
            })
            .child(self.label)
    }
}

/// Thin vertical rule between button groups.
#[derive(IntoElement)]
pub struct ToolbarSeparator;

impl RenderOnce for ToolbarSeparator {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        div()
            .flex_none()
            .w(px(1.))
            .h(px(18.))
            .mx(px(6.))
            .bg(cx.theme().border)
    }
}

fn id(prefix: &str, name: &str) -> ElementId {
    SharedString::from(format!("{prefix}-{name}")).into()
}

fn next_after<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let ix = all.iter().position(|item| *item == current).unwrap_or(0);
    all[(ix + 1) % all.len()]
}

fn step_font_size(current: &str, delta: isize) -> &'static str {
    let ix = FONT_SIZES
        .iter()
        .position(|size| *size == current)
        .unwrap_or_else(|| {
            let value: u32 = current.parse().unwrap_or(16);
            FONT_SIZES
                .iter()
                .position(|size| size.parse::<u32>().is_ok_and(|size| size >= value))
                .unwrap_or(FONT_SIZES.len() - 1)
        });
    let next = (ix as isize + delta).clamp(0, FONT_SIZES.len() as isize - 1);
    FONT_SIZES[next as usize]
}

/// B/I/U, alignment, list and indent buttons, shared by both toolbars.
pub(crate) fn formatting_buttons(
    prefix: &str,
    format: &FormattingState,
    view: &Entity<EditorView>,
) -> Vec<AnyElement> {
    let mut buttons = vec![
        ToolbarButton::store_op(id(prefix, "bold"), "B", view, EditorStore::toggle_bold)
            .tooltip("Bold")
            .active(format.bold)
            .font_weight(gpui::FontWeight::BOLD)
            .into_any_element(),
        ToolbarButton::store_op(id(prefix, "italic"), "I", view, EditorStore::toggle_italic)
            .tooltip("Italic")
            .active(format.italic)
            .italic()
            .into_any_element(),
        ToolbarButton::store_op(
            id(prefix, "underline"),
            "U",
            view,
            EditorStore::toggle_underline,
        )
        .tooltip("Underline")
        .active(format.underline)
        .into_any_element(),
        ToolbarSeparator.into_any_element(),
    ];

    buttons.extend(Alignment::ALL.into_iter().map(|alignment| {
        let (label, tooltip) = match alignment {
            Alignment::Left => ("Left", "Align left"),
            Alignment::Center => ("Center", "Align center"),
            Alignment::Right => ("Right", "Align right"),
            Alignment::Justify => ("Justify", "Justify"),
        };
        ToolbarButton::new(id(prefix, alignment.as_str()), label)
            .tooltip(tooltip)
            .active(format.alignment == alignment)
            .on_press(view, move |this, window, cx| {
                this.update_format(|store| store.set_alignment(alignment), window, cx);
            })
            .into_any_element()
    }));

    buttons.extend([
        ToolbarSeparator.into_any_element(),
        ToolbarButton::store_op(
            id(prefix, "bullet-list"),
            "•",
            view,
            EditorStore::toggle_bullet_list,
        )
        .tooltip("Bulleted list")
        .active(format.bullet_list)
        .into_any_element(),
        ToolbarButton::store_op(
            id(prefix, "numbered-list"),
            "1.",
            view,
            EditorStore::toggle_numbered_list,
        )
        .tooltip("Numbered list")
        .active(format.numbered_list)
        .into_any_element(),
        ToolbarButton::store_op(id(prefix, "outdent"), "⇤", view, EditorStore::outdent)
            .tooltip("Decrease indent")
            .into_any_element(),
        ToolbarButton::store_op(id(prefix, "indent"), "⇥", view, EditorStore::indent)
            .tooltip("Increase indent")
            .into_any_element(),
    ]);

    buttons
}

pub(crate) fn main_toolbar(editor: &EditorView, cx: &mut Context<EditorView>) -> impl IntoElement {
    let view = cx.entity();
    let store = editor.editor.store();
    let format = store.format().clone();

    let heading = format.heading_level;
    let block = format.block_type;
    let family = format.font_family.clone();
    let size = format.font_size.clone();
    let text_color = format.text_color.clone();
    let highlight = format.highlight_color.clone();

    let history = div()
        .flex()
        .items_center()
        .child(
            ToolbarButton::new("undo", "Undo")
                .tooltip("Undo")
                .enabled(store.can_undo())
                .on_press(&view, |this, window, cx| this.undo(window, cx)),
        )
        .child(
            ToolbarButton::new("redo", "Redo")
                .tooltip("Redo")
                .enabled(store.can_redo())
                .on_press(&view, |this, window, cx| this.redo(window, cx)),
        );

    let blocks = div()
        .flex()
        .items_center()
        .child(
            ToolbarButton::new("heading", heading.label())
                .tooltip("Heading level")
                .min_w(px(72.))
                .on_press(&view, move |this, window, cx| {
                    let next = next_after(&HeadingLevel::ALL, heading);
                    this.update_format(|store| store.set_heading_level(next), window, cx);
                }),
        )
        .child(
            ToolbarButton::new("block-type", block.label())
                .tooltip("Block type")
                .min_w(px(72.))
                .on_press(&view, move |this, window, cx| {
                    let next = next_after(&BlockType::ALL, block);
                    this.update_format(|store| store.set_block_type(next), window, cx);
                }),
        );

    let smaller = step_font_size(&size, -1);
    let larger = step_font_size(&size, 1);
    let fonts = div()
        .flex()
        .items_center()
        .child(
            ToolbarButton::new("font-family", family.clone())
                .tooltip("Font family")
                .min_w(px(96.))
                .on_press(&view, move |this, window, cx| {
                    let next = next_after(&FONT_FAMILIES, family.as_str());
                    this.update_format(|store| store.set_font_family(next), window, cx);
                }),
        )
        .child(
            ToolbarButton::new("font-size-down", "A-")
                .tooltip("Smaller text")
                .on_press(&view, move |this, window, cx| {
                    this.update_format(|store| store.set_font_size(smaller), window, cx);
                }),
        )
        .child(div().min_w(px(24.)).text_center().text_size(px(12.)).child(size))
        .child(
            ToolbarButton::new("font-size-up", "A+")
                .tooltip("Larger text")
                .on_press(&view, move |this, window, cx| {
                    this.update_format(|store| store.set_font_size(larger), window, cx);
                }),
        );

    let colors = div()
        .flex()
        .items_center()
        .child(
            ToolbarButton::new("text-color", "Color")
                .tooltip("Text color")
                .on_press(&view, move |this, window, cx| {
                    let next = next_after(&TEXT_COLORS, text_color.as_str());
                    this.update_format(|store| store.set_text_color(next), window, cx);
                }),
        )
        .child(
            ToolbarButton::new("highlight-color", "Highlight")
                .tooltip("Highlight color")
                .on_press(&view, move |this, window, cx| {
                    let next = next_after(&HIGHLIGHT_COLORS, highlight.as_str());
                    this.update_format(|store| store.set_highlight_color(next), window, cx);
                }),
        );

    let theme = cx.theme();

    div()
        .id("scribe-toolbar")
        .w_full()
        .flex()
        .flex_row()
        .flex_wrap()
        .items_center()
        .p(px(4.))
        .bg(theme.background)
        .border_b_1()
        .border_color(theme.border)
        .child(history)
        .child(ToolbarSeparator)
        .child(blocks)
        .child(ToolbarSeparator)
        .child(fonts)
        .child(ToolbarSeparator)
        .child(colors)
        .child(ToolbarSeparator)
        .children(formatting_buttons("main", &format, &view))
}

/// Compact toolbar shown above a non-empty selection.
pub(crate) fn floating_toolbar(
    format: &FormattingState,
    cx: &mut Context<EditorView>,
) -> impl IntoElement {
    let buttons = formatting_buttons("floating", format, &cx.entity());
    let theme = cx.theme();

    div()
        .id("scribe-floating-toolbar")
        .flex_none()
        .flex()
        .flex_row()
        .items_center()
        .p(px(2.))
        .bg(theme.popover)
        .border_1()
        .border_color(theme.border)
        .rounded(theme.radius)
        .shadow_lg()
        .on_mouse_down(MouseButton::Left, |_, window, cx| {
            window.prevent_default();
            cx.stop_propagation();
        })
        .children(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_steps_stay_in_range() {
        assert_eq!(step_font_size("16", 1), "18");
        assert_eq!(step_font_size("16", -1), "14");
        assert_eq!(step_font_size("8", -1), "8");
        assert_eq!(step_font_size("96", 1), "96");
        assert_eq!(step_font_size("17", 0), "18");
    }

    #[test]
    fn buttons_start_enabled_and_inactive() {
        let button = ToolbarButton::new("undo", "Undo");
        assert!(button.enabled && !button.active && button.on_press.is_none());

        let button = button.active(true).enabled(false).tooltip("Nothing to undo");
        assert!(button.active && !button.enabled);
        assert_eq!(button.label.as_ref(), "Undo");
        assert_eq!(
            button.tooltip.as_ref().map(|tooltip| tooltip.as_ref()),
            Some("Nothing to undo")
        );
    }

    #[test]
    fn cycling_wraps_to_the_first_entry() {
        assert_eq!(
            next_after(&HeadingLevel::ALL, HeadingLevel::H6),
            HeadingLevel::P
        );
        assert_eq!(next_after(&FONT_FAMILIES, "Courier New"), "Arial");
        assert_eq!(next_after(&TEXT_COLORS, "#123456"), TEXT_COLORS[1]);
    }
}
