mod logging;
mod player_window;

use gpui::*;
use player_core::{
    event_channel, AudioBackend, BackendKind, BlockingBackend, EventSender, MixerBackend,
    PlayerConfig,
};
use tracing::{error, info, warn};

use crate::player_window::PlayerWindow;

const WINDOW_TITLE: &str = "Music Player";

fn create_backend(kind: BackendKind, events: EventSender) -> Box<dyn AudioBackend> {
    match kind {
        BackendKind::Mixer => match MixerBackend::new(events.clone()) {
            Ok(backend) => Box::new(backend),
            Err(e) => {
                warn!(error = %e, "mixer unavailable, falling back to blocking playback");
                Box::new(BlockingBackend::new(events))
            }
        },
        BackendKind::Blocking => Box::new(BlockingBackend::new(events)),
    }
}

fn main() {
    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = PlayerConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default config");
        PlayerConfig::default()
    });
    info!(backend = ?config.backend, "starting music player");

    Application::new().run(move |cx: &mut App| {
        let (events, receiver) = event_channel();
        let backend = create_backend(config.backend, events);

        let custom_title_bar = config.window.custom_title_bar;
        let bounds = Bounds::centered(
            None,
            size(px(config.window.width), px(config.window.height)),
            cx,
        );
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: (!custom_title_bar).then(|| TitlebarOptions {
                title: Some(WINDOW_TITLE.into()),
                ..Default::default()
            }),
            window_decorations: custom_title_bar.then_some(WindowDecorations::Client),
            is_resizable: false,
            ..Default::default()
        };

        let opened = cx.open_window(options, |_window, cx| {
            cx.new(|cx| PlayerWindow::new(&config, backend, receiver, cx))
        });
        if let Err(e) = opened {
            error!(error = %e, "failed to open player window");
            cx.quit();
            return;
        }

        cx.activate(true);
    });
}
