use std::rc::Rc;

use gpui::{div, prelude::*, px, rgb, App, Div, ElementId, SharedString, Stateful, Window};

use super::theme;

pub const VOLUME_STEPS: usize = 10;

/// Round 40px button; `active` marks toggles that are switched on.
pub fn control_button(
    id: impl Into<ElementId>,
    glyph: impl Into<SharedString>,
    active: bool,
) -> Stateful<Div> {
    let background = if active {
        theme::SURFACE_ACTIVE
    } else {
        theme::SURFACE
    };

    div()
        .id(id)
        .size(px(40.))
        .flex()
        .items_center()
        .justify_center()
        .rounded(px(20.))
        .bg(rgb(background))
        .text_color(rgb(theme::FOREGROUND))
        .cursor_pointer()
        .hover(|style| style.bg(rgb(theme::SURFACE_HOVER)))
        .child(glyph.into())
}

/// Rectangular labelled button.
pub fn text_button(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Stateful<Div> {
    div()
        .id(id)
        .px(px(16.))
        .py(px(8.))
        .rounded(px(6.))
        .bg(rgb(theme::SURFACE))
        .text_sm()
        .text_color(rgb(theme::FOREGROUND))
        .cursor_pointer()
        .hover(|style| style.bg(rgb(theme::SURFACE_HOVER)))
        .child(label.into())
}

/// Volume set by clicking bar `step`; bar 0 silences.
pub fn step_level(step: usize) -> u8 {
    (step.min(VOLUME_STEPS) * 100 / VOLUME_STEPS) as u8
}

/// Number of bars lit for `volume`, rounded to the nearest step.
pub fn lit_steps(volume: u8) -> usize {
    ((usize::from(volume.min(100)) + 5) / 10).min(VOLUME_STEPS)
}

/// A silence notch followed by ten clickable bars; clicking bar `n` sets the
/// volume to `n * 10`.
pub fn volume_bar(
    volume: u8,
    on_change: impl Fn(u8, &mut Window, &mut App) + 'static,
) -> impl IntoElement {
    let on_change = Rc::new(on_change);
    let lit = lit_steps(volume);

    div()
        .flex()
        .items_end()
        .gap(px(2.))
        .h(px(20.))
        .children((0..=VOLUME_STEPS).map(move |step| {
            let on_change = Rc::clone(&on_change);
            let level = step_level(step);
            let color = if (step == 0 && lit == 0) || (step > 0 && step <= lit) {
                theme::FOREGROUND
            } else {
                theme::SURFACE
            };

            div()
                .id(("volume-step", step))
                .w(px(6.))
                .h(px(4. + step as f32 * 1.6))
                .rounded(px(1.))
                .bg(rgb(color))
                .cursor_pointer()
                .on_click(move |_event, window, cx| on_change(level, window, cx))
        }))
}
