use crate::streaming::{SessionError, StreamingSession};

/// Level index meaning that the streaming engine chooses the rendition by itself.
pub const AUTO_LEVEL: i32 = -1;

/// One rendition of the content, as announced by the Multivariant Playlist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QualityLevel {
    index: usize,
    vertical_resolution: u32,
    bitrate: u32,
}

impl QualityLevel {
    pub fn new(index: usize, vertical_resolution: u32, bitrate: u32) -> Self {
        Self {
            index,
            vertical_resolution,
            bitrate,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Height of the video, in pixels.
    pub fn vertical_resolution(&self) -> u32 {
        self.vertical_resolution
    }

    /// Bitrate in bits per second.
    pub fn bitrate(&self) -> u32 {
        self.bitrate
    }

    /// Label to display for that level, e.g. `"720p"`.
    pub fn label(&self) -> String {
        format!("{}p", self.vertical_resolution)
    }
}

/// Read and select quality levels of the current `StreamingSession`.
///
/// This keeps no state of its own: everything is read from and written to the session.
pub struct QualityManager<'a> {
    session: Option<&'a mut StreamingSession>,
}

impl<'a> QualityManager<'a> {
    pub(crate) fn new(session: Option<&'a mut StreamingSession>) -> Self {
        Self { session }
    }

    /// Levels available for the current session, in Multivariant Playlist order.
    ///
    /// Empty before the playlist is parsed or when playing natively.
    pub fn available_levels(&self) -> &[QualityLevel] {
        self.session.as_deref().map(|s| s.levels()).unwrap_or(&[])
    }

    /// Currently selected level: `AUTO_LEVEL` or the pinned level index.
    pub fn active_level(&self) -> i32 {
        self.session
            .as_deref()
            .map(|s| s.selected_level())
            .unwrap_or(AUTO_LEVEL)
    }

    /// Pin the level whose index is given, or go back to adaptive selection with `AUTO_LEVEL`.
    pub fn select(&mut self, index: i32) -> Result<(), QualityError> {
        match self.session.as_deref_mut() {
            Some(session) => session.set_level(index),
            None => Err(QualityError::NoSession),
        }
    }
}

use thiserror::Error;

/// Error returned when a quality level could not be selected.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum QualityError {
    #[error("No level with the index {0}")]
    UnknownLevel(i32),
    #[error("No content is currently loaded")]
    NoSession,
    #[error("The current session failed: {0}")]
    SessionFailed(SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::PlayerConfiguration,
        media_element::MediaElementReference,
        streaming::VideoSession,
        testing::{levels, FakeEngine, FakeSink},
    };

    fn open_session() -> StreamingSession {
        let (mut engine, _) = FakeEngine::new(true);
        let (sink, _) = FakeSink::new();
        let mut media = MediaElementReference::new(Box::new(sink));
        let video = VideoSession::new("42", &PlayerConfiguration::default());
        StreamingSession::open(1, video, &mut engine, &mut media).unwrap()
    }

    #[test]
    fn test_levels_in_manifest_order_with_auto_initially() {
        let mut session = open_session();
        session.on_levels_available(levels(&[360, 720, 1080]));
        let manager = QualityManager::new(Some(&mut session));
        let heights: Vec<u32> = manager
            .available_levels()
            .iter()
            .map(|l| l.vertical_resolution())
            .collect();
        assert_eq!(heights, vec![360, 720, 1080]);
        assert_eq!(manager.active_level(), AUTO_LEVEL);
        assert_eq!(manager.available_levels()[1].label(), "720p");
    }

    #[test]
    fn test_select_pins_then_unpins() {
        let mut session = open_session();
        session.on_levels_available(levels(&[360, 720]));
        let mut manager = QualityManager::new(Some(&mut session));
        manager.select(0).unwrap();
        assert_eq!(manager.active_level(), 0);
        assert_eq!(manager.select(5), Err(QualityError::UnknownLevel(5)));
        assert_eq!(manager.active_level(), 0);
        manager.select(AUTO_LEVEL).unwrap();
        assert_eq!(manager.active_level(), AUTO_LEVEL);
    }

    #[test]
    fn test_without_session() {
        let mut manager = QualityManager::new(None);
        assert!(manager.available_levels().is_empty());
        assert_eq!(manager.active_level(), AUTO_LEVEL);
        assert_eq!(manager.select(0), Err(QualityError::NoSession));
    }
}
