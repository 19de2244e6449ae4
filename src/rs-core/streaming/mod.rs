use crate::{
    bindings::SessionId,
    media_element::MediaElementReference,
    quality::{QualityError, QualityLevel, AUTO_LEVEL},
    utils::url::Url,
    Logger,
};

pub use video_session::{CaptionSource, VideoSession};

mod video_session;

/// Mime-type a media element has to support to play an HLS stream without a streaming engine.
const NATIVE_HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";

/// An adaptive streaming engine, able to load a Multivariant Playlist and push its segments to
/// the media element.
pub trait StreamingEngine {
    /// Returns `true` if the engine can run in the current environment.
    fn is_supported(&self) -> bool;

    /// Create an engine instance for the given session, loading the Multivariant Playlist at
    /// `manifest_url` and attaching it to the media element.
    ///
    /// Level list, level switches and fatal errors for that instance are then announced
    /// asynchronously, tagged with `session_id`.
    fn attach(
        &mut self,
        session_id: SessionId,
        manifest_url: &Url,
    ) -> Result<Box<dyn EngineAttachment>, SessionError>;
}

/// Handle on an engine instance attached to the media element.
pub trait EngineAttachment {
    /// Pin the given rendition, or let the engine adapt if `level` is `-1`.
    ///
    /// Takes effect at the next segment boundary.
    fn set_level(&mut self, level: i32);

    /// Release the engine instance with all its buffers, workers and network connections.
    ///
    /// No event linked to that instance is sent after this call returns.
    fn destroy(self: Box<Self>);
}

/// How a `StreamingSession` ended up playing its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    /// Through the adaptive streaming engine.
    Engine,
    /// Directly through the media element, without any level list.
    Native,
}

/// The single adaptive streaming attachment of a `PlaybackController`, bound to one video.
///
/// A session is opened with `open` and must be released with `close` before another one is
/// opened on the same media element.
pub struct StreamingSession {
    /// Identifier tagging every event linked to this session.
    id: SessionId,

    video: VideoSession,

    mode: SessionMode,

    /// The engine instance. `None` in `Native` mode.
    attachment: Option<Box<dyn EngineAttachment>>,

    /// Renditions announced once the Multivariant Playlist has been parsed.
    levels: Vec<QualityLevel>,

    /// `true` once `levels` has been set. Level lists are only accepted once.
    levels_announced: bool,

    /// Level explicitly wanted: `AUTO_LEVEL` or a pinned index.
    selected_level: i32,

    /// Level the engine last announced it switched to.
    current_level: Option<usize>,

    /// Set once a fatal error happened. No event is considered afterwards.
    failure: Option<SessionError>,
}

impl StreamingSession {
    /// Open a new session playing `video` on the media element.
    ///
    /// The streaming engine is preferred. When it is not supported but the media element can
    /// play HLS natively, the stream URL is directly given to it instead.
    pub(crate) fn open(
        id: SessionId,
        video: VideoSession,
        engine: &mut dyn StreamingEngine,
        media: &mut MediaElementReference,
    ) -> Result<Self, SessionError> {
        let url = video.stream_url().clone();
        let (mode, attachment) = if engine.is_supported() {
            Logger::info(&format!("SS: Opening session {id} through the engine: {url}"));
            (SessionMode::Engine, Some(engine.attach(id, &url)?))
        } else if media.sink().can_play_type(NATIVE_HLS_MIME_TYPE) {
            Logger::info(&format!("SS: Opening session {id} natively: {url}"));
            media.sink_mut().set_source(id, &url);
            (SessionMode::Native, None)
        } else {
            Logger::error("SS: No way to play the content in the current environment");
            return Err(SessionError::NoPlaybackCapability);
        };
        Ok(Self {
            id,
            video,
            mode,
            attachment,
            levels: vec![],
            levels_announced: false,
            selected_level: AUTO_LEVEL,
            current_level: None,
            failure: None,
        })
    }

    /// Release the engine instance if one. Consumes the session so it cannot be used anymore.
    pub(crate) fn close(mut self) {
        Logger::info(&format!(
            "SS: Closing session {} of video {}",
            self.id,
            self.video.video_id()
        ));
        if let Some(attachment) = self.attachment.take() {
            attachment.destroy();
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn levels(&self) -> &[QualityLevel] {
        &self.levels
    }

    /// Level explicitly wanted, `-1` meaning that the engine chooses.
    pub fn selected_level(&self) -> i32 {
        self.selected_level
    }

    /// Level the engine is currently playing, if announced.
    pub fn current_level(&self) -> Option<usize> {
        self.current_level
    }

    /// Returns `true` if that session can still receive events.
    pub fn is_active(&self) -> bool {
        self.failure.is_none()
    }

    /// Method to call once the engine parsed the Multivariant Playlist.
    ///
    /// Returns `false` if the list was ignored, because levels were already announced, the
    /// session failed or is playing natively.
    pub(crate) fn on_levels_available(&mut self, levels: Vec<QualityLevel>) -> bool {
        if !self.is_active() || self.mode == SessionMode::Native {
            return false;
        }
        if self.levels_announced {
            Logger::warn("SS: Ignoring level list announced a second time");
            return false;
        }
        Logger::lazy_info(&|| {
            let heights: Vec<String> = levels
                .iter()
                .map(|l| format!("{}p", l.vertical_resolution()))
                .collect();
            format!("SS: Levels available: [{}]", heights.join(", "))
        });
        self.levels = levels;
        self.levels_announced = true;
        true
    }

    /// Method to call once the engine switched to another rendition.
    ///
    /// Returns the new level, or `None` if that index is unknown.
    pub(crate) fn on_level_switched(&mut self, level: i32) -> Option<usize> {
        if !self.is_active() {
            return None;
        }
        let idx = usize::try_from(level).ok().filter(|i| *i < self.levels.len());
        match idx {
            Some(idx) => {
                Logger::debug(&format!("SS: Switched to level {idx}"));
                self.current_level = Some(idx);
            }
            None => Logger::warn(&format!("SS: Switched to unknown level {level}")),
        }
        idx
    }

    /// Pin the rendition whose index is given or, with `-1`, re-enable adaptive selection.
    pub(crate) fn set_level(&mut self, level: i32) -> Result<(), QualityError> {
        if let Some(err) = &self.failure {
            return Err(QualityError::SessionFailed(err.clone()));
        }
        if level != AUTO_LEVEL
            && !usize::try_from(level).is_ok_and(|idx| idx < self.levels.len())
        {
            return Err(QualityError::UnknownLevel(level));
        }
        self.selected_level = level;
        if let Some(attachment) = self.attachment.as_mut() {
            attachment.set_level(level);
        }
        Ok(())
    }

    /// Mark this session as failed. Later events are ignored.
    pub(crate) fn fail(&mut self, err: SessionError) {
        Logger::error(&format!("SS: Session {} failed: {err}", self.id));
        self.failure = Some(err);
    }
}

use thiserror::Error;

/// Fatal error for a `StreamingSession`. Playback of that session is not possible anymore.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Could not load the Multivariant Playlist: {message}")]
    Manifest { message: String },
    #[error("Neither the streaming engine nor the media element can play the content")]
    NoPlaybackCapability,
    #[error("Could not attach the streaming engine: {message}")]
    Attach { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::PlayerConfiguration,
        testing::{levels, EngineCall, FakeEngine, FakeSink, SinkCall},
    };

    fn video(id: &str) -> VideoSession {
        VideoSession::new(id, &PlayerConfiguration::default())
    }

    #[test]
    fn test_open_through_engine() {
        let (mut engine, engine_calls) = FakeEngine::new(true);
        let (sink, sink_calls) = FakeSink::new();
        let mut media = MediaElementReference::new(Box::new(sink));
        let session = StreamingSession::open(1, video("42"), &mut engine, &mut media).unwrap();
        assert_eq!(session.mode(), SessionMode::Engine);
        assert_eq!(session.selected_level(), AUTO_LEVEL);
        assert!(session.levels().is_empty());
        assert_eq!(
            *engine_calls.borrow(),
            vec![EngineCall::Attach(
                1,
                "http://localhost:8080/hls/42/master.m3u8".to_owned()
            )]
        );
        assert!(sink_calls.borrow().is_empty());

        session.close();
        assert_eq!(engine_calls.borrow().last(), Some(&EngineCall::Destroy(1)));
    }

    #[test]
    fn test_open_falls_back_to_native_playback() {
        let (mut engine, engine_calls) = FakeEngine::new(false);
        let (sink, sink_calls) = FakeSink::with_native_hls(true);
        let mut media = MediaElementReference::new(Box::new(sink));
        let mut session = StreamingSession::open(3, video("7"), &mut engine, &mut media).unwrap();
        assert_eq!(session.mode(), SessionMode::Native);
        assert!(engine_calls.borrow().is_empty());
        assert_eq!(
            *sink_calls.borrow(),
            vec![SinkCall::SetSource(
                3,
                "http://localhost:8080/hls/7/master.m3u8".to_owned()
            )]
        );
        assert!(!session.on_levels_available(levels(&[360, 720])));
        assert!(session.levels().is_empty());
        assert!(session.set_level(AUTO_LEVEL).is_ok());
        assert_eq!(session.set_level(0), Err(QualityError::UnknownLevel(0)));
    }

    #[test]
    fn test_open_without_any_capability() {
        let (mut engine, _) = FakeEngine::new(false);
        let (sink, _) = FakeSink::with_native_hls(false);
        let mut media = MediaElementReference::new(Box::new(sink));
        let res = StreamingSession::open(1, video("1"), &mut engine, &mut media);
        assert_eq!(res.err(), Some(SessionError::NoPlaybackCapability));
    }

    #[test]
    fn test_attach_failure_is_reported() {
        let (mut engine, _) = FakeEngine::failing_attach("boom");
        let (sink, _) = FakeSink::new();
        let mut media = MediaElementReference::new(Box::new(sink));
        let res = StreamingSession::open(1, video("1"), &mut engine, &mut media);
        assert_eq!(
            res.err(),
            Some(SessionError::Attach {
                message: "boom".to_owned()
            })
        );
    }

    #[test]
    fn test_levels_are_only_accepted_once() {
        let (mut engine, _) = FakeEngine::new(true);
        let (sink, _) = FakeSink::new();
        let mut media = MediaElementReference::new(Box::new(sink));
        let mut session = StreamingSession::open(1, video("1"), &mut engine, &mut media).unwrap();
        assert!(session.on_levels_available(levels(&[360, 720, 1080])));
        assert!(!session.on_levels_available(levels(&[240])));
        assert_eq!(session.levels().len(), 3);
        assert_eq!(session.levels()[2].vertical_resolution(), 1080);
    }

    #[test]
    fn test_set_level_forwards_to_engine() {
        let (mut engine, engine_calls) = FakeEngine::new(true);
        let (sink, _) = FakeSink::new();
        let mut media = MediaElementReference::new(Box::new(sink));
        let mut session = StreamingSession::open(5, video("1"), &mut engine, &mut media).unwrap();
        session.on_levels_available(levels(&[360, 720]));

        assert!(session.set_level(1).is_ok());
        assert_eq!(session.selected_level(), 1);
        // not effective until the engine announces it
        assert_eq!(session.current_level(), None);
        assert_eq!(session.on_level_switched(1), Some(1));
        assert_eq!(session.current_level(), Some(1));

        assert_eq!(session.set_level(2), Err(QualityError::UnknownLevel(2)));
        assert_eq!(session.set_level(-4), Err(QualityError::UnknownLevel(-4)));
        assert!(session.set_level(AUTO_LEVEL).is_ok());
        assert_eq!(
            engine_calls.borrow()[1..],
            [EngineCall::SetLevel(5, 1), EngineCall::SetLevel(5, -1)]
        );
        assert_eq!(session.on_level_switched(9), None);
        assert_eq!(session.current_level(), Some(1));
    }

    #[test]
    fn test_failed_session_ignores_events() {
        let (mut engine, _) = FakeEngine::new(true);
        let (sink, _) = FakeSink::new();
        let mut media = MediaElementReference::new(Box::new(sink));
        let mut session = StreamingSession::open(1, video("1"), &mut engine, &mut media).unwrap();
        let err = SessionError::Manifest {
            message: "404".to_owned(),
        };
        session.fail(err.clone());
        assert!(!session.is_active());
        assert!(!session.on_levels_available(levels(&[360])));
        assert_eq!(session.on_level_switched(0), None);
        assert_eq!(session.set_level(AUTO_LEVEL), Err(QualityError::SessionFailed(err)));
    }
}
