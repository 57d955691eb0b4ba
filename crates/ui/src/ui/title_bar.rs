use gpui::{
    div, prelude::*, px, rgb, App, ClickEvent, FontWeight, IntoElement, MouseButton,
    SharedString, Window,
};

use super::theme;

/// Draggable title bar for windows without system decorations.
pub fn title_bar(
    title: impl Into<SharedString>,
    on_close: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
) -> impl IntoElement {
    div()
        .id("title-bar")
        .flex()
        .items_center()
        .justify_between()
        .w_full()
        .pl(px(10.))
        .pr(px(5.))
        .py(px(5.))
        .bg(rgb(theme::BACKGROUND))
        .on_mouse_down(MouseButton::Left, |_event, window, _cx| {
            window.start_window_move()
        })
        .child(
            div()
                .text_base()
                .font_weight(FontWeight::BOLD)
                .text_color(rgb(theme::FOREGROUND))
                .child(title.into()),
        )
        .child(
            div()
                .id("close-window")
                .size(px(24.))
                .flex()
                .items_center()
                .justify_center()
                .rounded(px(4.))
                .text_color(rgb(theme::FOREGROUND))
                .cursor_pointer()
                .hover(|style| style.bg(rgb(theme::CLOSE_HOVER)))
                .on_mouse_down(MouseButton::Left, |_event, _window, cx| {
                    cx.stop_propagation()
                })
                .on_click(on_close)
                .child("✕"),
        )
}
