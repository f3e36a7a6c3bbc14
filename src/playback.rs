//! Only one sample plays at a time: starting a sample pauses the previous one.

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    Started { sample_id: String, paused: Option<String> },
    Stopped { sample_id: String },
    /// Stop request for a sample that was not playing.
    Ignored,
}

#[derive(Debug, Default)]
pub struct PlaybackCoordinator {
    playing: Option<String>,
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    pub fn play(&mut self, sample_id: impl Into<String>) -> PlaybackEvent {
        let sample_id = sample_id.into();
        let paused = self
            .playing
            .replace(sample_id.clone())
            .filter(|previous| *previous != sample_id);
        debug!(sample_id = %sample_id, paused = ?paused, "Playback started");
        PlaybackEvent::Started { sample_id, paused }
    }

    /// Pause or natural end of `sample_id`.
    pub fn stop(&mut self, sample_id: &str) -> PlaybackEvent {
        if self.playing.as_deref() == Some(sample_id) {
            self.playing = None;
            PlaybackEvent::Stopped { sample_id: sample_id.to_string() }
        } else {
            PlaybackEvent::Ignored
        }
    }
}
