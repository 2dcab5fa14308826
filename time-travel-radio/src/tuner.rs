//! Dial-driven playback
//!
//! The dial positions come from the player's playlist table, lowest label
//! first, so every position the dial can report has a playlist.

use anyhow::{Context, Result};
use decades_player::{DecadesPlayer, PlaybackService};
use radio_controls::{AnalogReader, DecadesDial};
use tracing::info;

/// Plays the decade under the dial whenever the dial moves to a new one
#[derive(Debug)]
pub struct DialTuner<R: AnalogReader> {
    dial: DecadesDial<R>,
    current: Option<String>,
}

impl<R: AnalogReader> DialTuner<R> {
    /// Build a dial on `reader` whose labels are the player's playlist labels
    pub fn new<S: PlaybackService>(reader: R, player: &DecadesPlayer<S>) -> Result<Self> {
        let dial = DecadesDial::new(reader, player.playlists().labels())
            .context("Failed to set up the decade dial")?;
        Ok(Self {
            dial,
            current: None,
        })
    }

    /// Read the dial once and start its decade if it changed
    ///
    /// Returns the decade that was started, or `None` when the dial has not
    /// moved to a different decade since the last successful start.
    pub fn tune<S: PlaybackService>(&mut self, player: &DecadesPlayer<S>) -> Result<Option<&str>> {
        let decade = self
            .dial
            .read_decade()
            .context("Failed to read the dial")?
            .to_string();
        if self.current.as_deref() == Some(decade.as_str()) {
            return Ok(None);
        }

        player
            .play_music(&decade)
            .with_context(|| format!("Failed to play the {}", decade))?;
        info!("Dial moved to the {}", decade);
        self.current = Some(decade);
        Ok(self.current.as_deref())
    }

    /// Decade most recently started by the dial
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn dial(&self) -> &DecadesDial<R> {
        &self.dial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::testing::MockService;
    use decades_player::{PlayerError, PlaylistTable, SpotifyError};
    use radio_controls::ControlError;
    use rstest::rstest;

    /// Potentiometer whose position the test turns
    struct Knob(Rc<Cell<u8>>);

    impl AnalogReader for Knob {
        fn read_channel(&mut self, _channel: u8) -> radio_controls::Result<u8> {
            Ok(self.0.get())
        }

        fn value_range(&self) -> u8 {
            u8::MAX
        }
    }

    struct DeadBus;

    impl AnalogReader for DeadBus {
        fn read_channel(&mut self, _channel: u8) -> radio_controls::Result<u8> {
            Err(ControlError::Bus("Remote I/O error (os error 121)".to_string()))
        }

        fn value_range(&self) -> u8 {
            u8::MAX
        }
    }

    fn player(service: MockService, playlists: PlaylistTable) -> DecadesPlayer<MockService> {
        DecadesPlayer::new(service, playlists, "Radio").unwrap()
    }

    fn knob(position: u8) -> (Knob, Rc<Cell<u8>>) {
        let position = Rc::new(Cell::new(position));
        (Knob(Rc::clone(&position)), position)
    }

    #[rstest]
    #[case(0, "1920s", "spotify:playlist:7olpTqGzGrYuI76ZBlCLgs")]
    #[case(130, "1970s", "spotify:playlist:37i9dQZF1DWTJ7xPn4vNaz")]
    #[case(255, "2010s", "spotify:playlist:3FeewjLi5LMzIpV4h35QEz")]
    fn test_dial_position_plays_its_decade(
        #[case] raw: u8,
        #[case] decade: &str,
        #[case] uri: &str,
    ) {
        let player = player(MockService::default(), PlaylistTable::decades());
        let (reader, _position) = knob(raw);
        let mut tuner = DialTuner::new(reader, &player).unwrap();

        assert_eq!(tuner.tune(&player).unwrap(), Some(decade));
        assert_eq!(*player.service().played.borrow(), vec![uri.to_string()]);
    }

    #[test]
    fn test_dial_labels_follow_custom_table() {
        let playlists = PlaylistTable::new([
            ("swing", "spotify:playlist:swing"),
            ("bebop", "spotify:playlist:bebop"),
        ])
        .unwrap();
        let player = player(MockService::default(), playlists);
        let (reader, position) = knob(0);
        let mut tuner = DialTuner::new(reader, &player).unwrap();

        assert_eq!(tuner.dial().bins().labels(), ["swing", "bebop"]);
        assert_eq!(tuner.tune(&player).unwrap(), Some("swing"));
        position.set(200);
        assert_eq!(tuner.tune(&player).unwrap(), Some("bebop"));
        assert_eq!(
            *player.service().played.borrow(),
            vec![
                "spotify:playlist:swing".to_string(),
                "spotify:playlist:bebop".to_string()
            ]
        );
    }

    #[test]
    fn test_unmoved_dial_does_not_restart_playback() {
        let player = player(MockService::default(), PlaylistTable::decades());
        let (reader, position) = knob(130);
        let mut tuner = DialTuner::new(reader, &player).unwrap();

        tuner.tune(&player).unwrap();
        position.set(140);
        assert_eq!(tuner.tune(&player).unwrap(), None);
        assert_eq!(tuner.current(), Some("1970s"));
        assert_eq!(player.service().played.borrow().len(), 1);
    }

    #[test]
    fn test_failed_start_is_retried_on_next_read() {
        let player = player(
            MockService::failing_on("spotify:playlist:37i9dQZF1DWTJ7xPn4vNaz"),
            PlaylistTable::decades(),
        );
        let (reader, _position) = knob(130);
        let mut tuner = DialTuner::new(reader, &player).unwrap();

        let error = tuner.tune(&player).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<PlayerError>(),
            Some(PlayerError::Service(SpotifyError::Api { status: 404, .. }))
        ));
        assert_eq!(tuner.current(), None);
        assert!(tuner.tune(&player).is_err());
        assert_eq!(player.service().played.borrow().len(), 2);
    }

    #[test]
    fn test_bus_failure_plays_nothing() {
        let player = player(MockService::default(), PlaylistTable::decades());
        let mut tuner = DialTuner::new(DeadBus, &player).unwrap();

        let error = tuner.tune(&player).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ControlError>(),
            Some(ControlError::Bus(_))
        ));
        assert!(player.service().played.borrow().is_empty());
    }
}
