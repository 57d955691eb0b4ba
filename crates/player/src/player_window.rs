use std::time::Duration;

use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use gpui::prelude::*;
use gpui::*;
use player_core::{
    AudioBackend, BackendEvent, MediaControlsHandler, MediaKeyEvent, PlayPause, PlayerConfig,
    PlayerController, PollStatus, PollToken,
};
use tracing::{debug, warn};
use ui::{
    artwork_placeholder, control_button, progress_row, text_button, theme, title_bar, volume_bar,
};

use crate::WINDOW_TITLE;

/// The single player window. Owns the controller and is the only place
/// background events are applied to it.
pub struct PlayerWindow {
    controller: PlayerController<Box<dyn AudioBackend>>,
    media_controls: Option<MediaControlsHandler>,
    custom_title_bar: bool,
    poll_interval: Duration,
    poll_task: Option<(PollToken, Task<()>)>,
    _tasks: Vec<Task<()>>,
}

impl PlayerWindow {
    pub fn new(
        config: &PlayerConfig,
        backend: Box<dyn AudioBackend>,
        events: UnboundedReceiver<BackendEvent>,
        cx: &mut Context<Self>,
    ) -> Self {
        let controller = PlayerController::new(backend, config.playback_settings());
        let mut tasks = vec![Self::drain_backend_events(events, cx)];

        let media_controls = if config.media_controls {
            match MediaControlsHandler::new() {
                Ok((handler, keys)) => {
                    tasks.push(Self::drain_media_keys(keys, cx));
                    Some(handler)
                }
                Err(e) => {
                    warn!(error = %e, "media keys unavailable");
                    None
                }
            }
        } else {
            None
        };

        Self {
            controller,
            media_controls,
            custom_title_bar: config.window.custom_title_bar,
            poll_interval: config.poll_interval(),
            poll_task: None,
            _tasks: tasks,
        }
    }

    fn drain_backend_events(
        mut events: UnboundedReceiver<BackendEvent>,
        cx: &mut Context<Self>,
    ) -> Task<()> {
        cx.spawn(async move |this, cx| {
            while let Some(event) = events.next().await {
                let applied = this.update(cx, |this, cx| {
                    this.controller.handle_backend_event(event);
                    this.after_command(cx);
                });
                if applied.is_err() {
                    break;
                }
            }
        })
    }

    fn drain_media_keys(
        mut keys: UnboundedReceiver<MediaKeyEvent>,
        cx: &mut Context<Self>,
    ) -> Task<()> {
        cx.spawn(async move |this, cx| {
            while let Some(key) = keys.next().await {
                if this
                    .update(cx, |this, cx| this.handle_media_key(key, cx))
                    .is_err()
                {
                    break;
                }
            }
        })
    }

    fn handle_media_key(&mut self, key: MediaKeyEvent, cx: &mut Context<Self>) {
        debug!(?key, "media key");
        let playing = self.controller.is_playing();
        match key {
            MediaKeyEvent::Play if !playing => self.play_pause(cx),
            MediaKeyEvent::Pause if playing => self.play_pause(cx),
            MediaKeyEvent::Toggle => self.play_pause(cx),
            MediaKeyEvent::Next => self.command(cx, |controller| controller.next_track()),
            MediaKeyEvent::Previous => self.command(cx, |controller| controller.prev_track()),
            MediaKeyEvent::Stop => self.command(cx, |controller| controller.stop()),
            MediaKeyEvent::Play | MediaKeyEvent::Pause => {}
        }
    }

    fn command(
        &mut self,
        cx: &mut Context<Self>,
        f: impl FnOnce(&mut PlayerController<Box<dyn AudioBackend>>),
    ) {
        f(&mut self.controller);
        self.after_command(cx);
    }

    fn play_pause(&mut self, cx: &mut Context<Self>) {
        if self.controller.play_pause() == PlayPause::NeedsTrack {
            self.pick_files(true, cx);
        }
        self.after_command(cx);
    }

    fn pick_files(&mut self, then_play: bool, cx: &mut Context<Self>) {
        let paths = cx.prompt_for_paths(PathPromptOptions {
            files: true,
            directories: false,
            multiple: true,
            prompt: None,
        });

        cx.spawn(async move |this, cx| {
            let paths = match paths.await {
                Ok(Ok(Some(paths))) => paths,
                Ok(Ok(None)) | Err(_) => return,
                Ok(Err(e)) => {
                    warn!(error = %e, "file dialog failed");
                    return;
                }
            };

            let _ = this.update(cx, |this, cx| {
                if this.controller.select_files(paths) && then_play {
                    this.controller.play_current_track();
                }
                this.after_command(cx);
            });
        })
        .detach();
    }

    fn after_command(&mut self, cx: &mut Context<Self>) {
        self.sync_progress_poll(cx);
        self.publish_media_state();
        cx.notify();
    }

    /// Keeps exactly one poll task alive, bound to the controller's current
    /// token. Replacing the task drops, and so cancels, the previous chain.
    fn sync_progress_poll(&mut self, cx: &mut Context<Self>) {
        let token = self.controller.poll_token();
        if self.poll_task.as_ref().map(|(current, _)| *current) == token {
            return;
        }

        let interval = self.poll_interval;
        self.poll_task = token.map(|token| {
            let task = cx.spawn(async move |this, cx| {
                loop {
                    cx.background_executor().timer(interval).await;
                    let status = this.update(cx, |this, cx| {
                        let status = this.controller.poll_progress(token);
                        cx.notify();
                        status
                    });
                    if !matches!(status, Ok(PollStatus::Reschedule)) {
                        break;
                    }
                }
            });
            (token, task)
        });
    }

    fn publish_media_state(&mut self) {
        let Some(controls) = self.media_controls.as_mut() else {
            return;
        };

        let title = self.controller.current_track().map(|track| track.file_name());
        if let Err(e) = controls.publish(
            title.as_deref(),
            self.controller.track_duration(),
            self.controller.state(),
            self.controller.position(),
        ) {
            debug!(error = %e, "failed to publish media state");
        }
    }

    fn controls_row(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let playing = self.controller.is_playing();
        let muted = self.controller.is_muted();
        let this = cx.entity().downgrade();

        div()
            .flex()
            .items_center()
            .justify_center()
            .gap(px(8.))
            .child(control_button("prev", "⏮", false).on_click(cx.listener(
                |this, _event, _window, cx| this.command(cx, |controller| controller.prev_track()),
            )))
            .child(
                control_button("play-pause", if playing { "⏸" } else { "▶" }, false).on_click(
                    cx.listener(|this, _event, _window, cx| this.play_pause(cx)),
                ),
            )
            .child(control_button("next", "⏭", false).on_click(cx.listener(
                |this, _event, _window, cx| this.command(cx, |controller| controller.next_track()),
            )))
            .child(control_button("stop", "⏹", false).on_click(cx.listener(
                |this, _event, _window, cx| this.command(cx, |controller| controller.stop()),
            )))
            .child(
                control_button("loop", "🔁", self.controller.is_looping()).on_click(cx.listener(
                    |this, _event, _window, cx| {
                        this.command(cx, |controller| controller.toggle_loop())
                    },
                )),
            )
            .child(
                control_button("shuffle", "🔀", self.controller.is_shuffled()).on_click(
                    cx.listener(|this, _event, _window, cx| {
                        this.command(cx, |controller| controller.toggle_shuffle())
                    }),
                ),
            )
            .child(volume_bar(
                self.controller.volume(),
                move |level, _window, cx| {
                    let _ = this.update(cx, |this, cx| {
                        this.command(cx, |controller| controller.set_volume(level))
                    });
                },
            ))
            .child(
                control_button("mute", if muted { "🔇" } else { "🔊" }, false).on_click(
                    cx.listener(|this, _event, _window, cx| {
                        this.command(cx, |controller| controller.toggle_mute())
                    }),
                ),
            )
    }
}

impl Render for PlayerWindow {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let display = self.controller.display().clone();

        div()
            .size_full()
            .flex()
            .flex_col()
            .items_center()
            .gap(px(20.))
            .pb(px(20.))
            .bg(rgb(theme::BACKGROUND))
            .rounded(px(10.))
            .when(self.custom_title_bar, |this| {
                this.child(title_bar(
                    WINDOW_TITLE,
                    cx.listener(|_this, _event, _window, cx| cx.quit()),
                ))
            })
            .child(
                div()
                    .text_xs()
                    .font_weight(FontWeight::BOLD)
                    .text_color(rgb(theme::FOREGROUND))
                    .child(display.header),
            )
            .child(
                text_button("pick-files", "Select tracks").on_click(cx.listener(
                    |this, _event, _window, cx| this.pick_files(false, cx),
                )),
            )
            .child(artwork_placeholder())
            .child(progress_row(display.progress, display.time_label))
            .child(self.controls_row(cx))
    }
}
