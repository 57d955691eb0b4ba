mod support;

use std::path::PathBuf;

use player_core::{PlaybackSettings, PlayerController, Playlist};
use proptest::prelude::*;
use support::{FakeBackend, ManualClock};

fn numbered(len: usize) -> Vec<PathBuf> {
    (0..len).map(|n| PathBuf::from(format!("/m/{n}.mp3"))).collect()
}

proptest! {
    #[test]
    fn advance_visits_indices_in_order(len in 1usize..40, steps in 1usize..120) {
        let mut playlist = Playlist::from_paths(numbered(len));

        for step in 1..=steps {
            playlist.advance();
            prop_assert_eq!(playlist.current_index(), Some(step % len));
        }
    }

    #[test]
    fn retreat_undoes_advance(len in 1usize..40, steps in 0usize..120) {
        let mut playlist = Playlist::from_paths(numbered(len));
        for _ in 0..steps {
            playlist.advance();
        }
        for _ in 0..steps {
            playlist.retreat();
        }

        prop_assert_eq!(playlist.current_index(), Some(0));
    }

    #[test]
    fn controller_next_track_is_a_modulo_cycle(len in 1usize..20, steps in 1usize..60) {
        let mut player = PlayerController::with_clock(
            FakeBackend::mixer(),
            ManualClock::new(),
            PlaybackSettings::default(),
        );
        player.select_files(numbered(len));

        for step in 1..=steps {
            player.next_track();
            prop_assert_eq!(player.playlist().current_index(), Some(step % len));
        }
        for step in (0..steps).rev() {
            player.prev_track();
            prop_assert_eq!(player.playlist().current_index(), Some(step % len));
        }
    }

    #[test]
    fn mute_twice_restores_any_volume(volume in 0u8..=100) {
        let mut player = PlayerController::with_clock(
            FakeBackend::blocking(),
            ManualClock::new(),
            PlaybackSettings::default(),
        );
        player.set_volume(volume);

        player.toggle_mute();
        player.toggle_mute();

        prop_assert_eq!(player.volume(), volume);
    }
}
