//! Shared test doubles

use std::cell::RefCell;

use decades_player::{Device, PlaybackService, SpotifyError};

/// Records every playback and volume call
///
/// Volumes above 100 are rejected with a 400, and starting `fail_uri`
/// fails with a 404, the way the Web API answers for a vanished device.
#[derive(Debug, Default)]
pub struct MockService {
    pub played: RefCell<Vec<String>>,
    pub volumes: RefCell<Vec<i64>>,
    pub fail_uri: Option<&'static str>,
}

impl MockService {
    pub fn failing_on(uri: &'static str) -> Self {
        Self {
            fail_uri: Some(uri),
            ..Self::default()
        }
    }
}

impl PlaybackService for MockService {
    fn devices(&self) -> Result<Vec<Device>, SpotifyError> {
        Ok(vec![Device {
            id: Some("pi-id".to_string()),
            name: "Radio".to_string(),
            is_active: true,
            device_type: "Computer".to_string(),
            volume_percent: Some(50),
        }])
    }

    fn start_playback(&self, _device_id: &str, context_uri: &str) -> Result<(), SpotifyError> {
        self.played.borrow_mut().push(context_uri.to_string());
        if self.fail_uri == Some(context_uri) {
            return Err(SpotifyError::Api {
                status: 404,
                message: "Device not found".to_string(),
            });
        }
        Ok(())
    }

    fn set_volume(&self, _device_id: &str, level: i64) -> Result<(), SpotifyError> {
        self.volumes.borrow_mut().push(level);
        if level > 100 {
            return Err(SpotifyError::Api {
                status: 400,
                message: "Invalid volume_percent".to_string(),
            });
        }
        Ok(())
    }
}
