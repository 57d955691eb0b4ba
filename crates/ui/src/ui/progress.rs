use gpui::{div, prelude::*, px, relative, rgb, IntoElement, SharedString};

use super::theme;

pub fn progress_bar(progress: f32) -> impl IntoElement {
    let progress = progress.clamp(0.0, 1.0);

    div()
        .h(px(4.))
        .w(px(300.))
        .bg(rgb(theme::SURFACE))
        .rounded(px(2.))
        .child(
            div()
                .h_full()
                .w(relative(progress))
                .bg(rgb(theme::ACCENT))
                .rounded(px(2.)),
        )
}

/// Progress bar followed by the `M:SS / M:SS` counter.
pub fn progress_row(progress: f32, time_label: impl Into<SharedString>) -> impl IntoElement {
    div()
        .flex()
        .items_center()
        .justify_center()
        .gap(px(12.))
        .child(progress_bar(progress))
        .child(
            div()
                .text_sm()
                .text_color(rgb(theme::FOREGROUND))
                .child(time_label.into()),
        )
}

pub fn artwork_placeholder() -> impl IntoElement {
    div()
        .w(px(300.))
        .h(px(225.))
        .rounded(px(10.))
        .bg(rgb(theme::SURFACE))
        .flex()
        .items_center()
        .justify_center()
        .text_color(rgb(theme::FOREGROUND_MUTED))
        .text_3xl()
        .child("♪")
}
