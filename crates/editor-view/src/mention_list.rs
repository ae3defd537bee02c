use gpui::InteractiveElement as _;
use gpui::StatefulInteractiveElement as _;
use gpui::prelude::FluentBuilder as _;
use gpui::{
    Context, IntoElement, MouseButton, ParentElement as _, SharedString, Styled as _, div, px,
};
use gpui_component::ActiveTheme as _;
use scribe_editor_core::Candidate;

use crate::state::EditorView;

fn initials(name: &str) -> SharedString {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect::<String>()
        .into()
}

/// The ranked candidates for the active `@query`.
pub(crate) fn mention_list(
    results: &[Candidate],
    highlighted: usize,
    cx: &mut Context<EditorView>,
) -> impl IntoElement {
    let view = cx.entity();
    let theme = cx.theme();

    let rows = results.iter().enumerate().map(|(index, candidate)| {
        let is_highlighted = index == highlighted;
        let view = view.clone();
        div()
            .id(("mention-item", index))
            .flex()
            .flex_row()
            .items_center()
            .gap(px(8.))
            .h(px(40.))
            .px(px(8.))
            .rounded(px(6.))
            .cursor_pointer()
            .when(is_highlighted, |this| {
                this.bg(theme.accent).text_color(theme.accent_foreground)
            })
            .when(!is_highlighted, |this| {
                this.text_color(theme.popover_foreground)
                    .hover(|this| this.bg(theme.accent.alpha(0.4)))
            })
            .on_mouse_down(MouseButton::Left, move |_, window, cx| {
                window.prevent_default();
                cx.stop_propagation();
                view.update(cx, |this, cx| this.select_candidate(index, window, cx));
            })
            .child(
                div()
                    .flex_none()
                    .size(px(28.))
                    .rounded_full()
                    .flex()
                    .items_center()
                    .justify_center()
                    .bg(theme.muted)
                    .text_color(theme.muted_foreground)
                    .text_xs()
                    .child(initials(&candidate.display_name)),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .min_w(px(0.))
                    .child(
                        div()
                            .text_sm()
                            .truncate()
                            .child(candidate.display_name.clone()),
                    )
                    .child(
                        div()
                            .text_xs()
                            .truncate()
                            .text_color(theme.muted_foreground)
                            .child(candidate.contact_address.clone()),
                    ),
            )
    });

    div()
        .id("scribe-mention-list")
        .w(px(240.))
        .max_h(px(240.))
        .overflow_y_scroll()
        .flex()
        .flex_col()
        .gap(px(2.))
        .p(px(4.))
        .bg(theme.popover)
        .border_1()
        .border_color(theme.border)
        .rounded(theme.radius)
        .shadow_lg()
        .on_mouse_down(MouseButton::Left, |_, window, cx| {
            window.prevent_default();
            cx.stop_propagation();
        })
        .children(rows)
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("John Doe").as_ref(), "JD");
        assert_eq!(initials("bob").as_ref(), "B");
        assert_eq!(initials("Mary Ann Evans").as_ref(), "MA");
    }
}
