//! In-memory doubles of the JavaScript-side, recording every call made to them.

use std::{cell::RefCell, rc::Rc};

use crate::{
    bindings::{SessionId, TextTrackMode},
    controller::PlaybackObserver,
    media_element::MediaSink,
    quality::QualityLevel,
    streaming::{CaptionSource, EngineAttachment, SessionError, StreamingEngine},
    utils::url::Url,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SinkCall {
    SetSource(SessionId, String),
    RemoveSource,
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    SetMuted(bool),
    RequestFullscreen,
    ExitFullscreen,
    AddTextTrack(String, bool),
    RemoveTextTracks,
    SetTextTrackMode(usize, TextTrackMode),
}

pub(crate) struct FakeSink {
    native_hls: bool,
    calls: Rc<RefCell<Vec<SinkCall>>>,
}

impl FakeSink {
    pub(crate) fn new() -> (Self, Rc<RefCell<Vec<SinkCall>>>) {
        Self::with_native_hls(false)
    }

    pub(crate) fn with_native_hls(native_hls: bool) -> (Self, Rc<RefCell<Vec<SinkCall>>>) {
        let calls = Rc::new(RefCell::new(vec![]));
        let sink = Self {
            native_hls,
            calls: Rc::clone(&calls),
        };
        (sink, calls)
    }

    fn record(&self, call: SinkCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl MediaSink for FakeSink {
    fn can_play_type(&self, mime_type: &str) -> bool {
        self.native_hls && mime_type == "application/vnd.apple.mpegurl"
    }

    fn set_source(&mut self, session_id: SessionId, url: &Url) {
        self.record(SinkCall::SetSource(session_id, url.get_ref().to_owned()));
    }

    fn remove_source(&mut self) {
        self.record(SinkCall::RemoveSource);
    }

    fn play(&mut self) {
        self.record(SinkCall::Play);
    }

    fn pause(&mut self) {
        self.record(SinkCall::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.record(SinkCall::Seek(position));
    }

    fn set_volume(&mut self, volume: f64) {
        self.record(SinkCall::SetVolume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.record(SinkCall::SetMuted(muted));
    }

    fn request_fullscreen(&mut self) {
        self.record(SinkCall::RequestFullscreen);
    }

    fn exit_fullscreen(&mut self) {
        self.record(SinkCall::ExitFullscreen);
    }

    fn add_text_track(&mut self, source: &CaptionSource, is_default: bool) {
        self.record(SinkCall::AddTextTrack(
            source.language_code.clone(),
            is_default,
        ));
    }

    fn remove_text_tracks(&mut self) {
        self.record(SinkCall::RemoveTextTracks);
    }

    fn set_text_track_mode(&mut self, track_index: usize, mode: TextTrackMode) {
        self.record(SinkCall::SetTextTrackMode(track_index, mode));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EngineCall {
    Attach(SessionId, String),
    SetLevel(SessionId, i32),
    Destroy(SessionId),
}

pub(crate) struct FakeEngine {
    supported: bool,
    attach_error: Option<String>,
    calls: Rc<RefCell<Vec<EngineCall>>>,
}

impl FakeEngine {
    pub(crate) fn new(supported: bool) -> (Self, Rc<RefCell<Vec<EngineCall>>>) {
        let calls = Rc::new(RefCell::new(vec![]));
        let engine = Self {
            supported,
            attach_error: None,
            calls: Rc::clone(&calls),
        };
        (engine, calls)
    }

    /// Supported engine whose `attach` always fails with the given message.
    pub(crate) fn failing_attach(message: &str) -> (Self, Rc<RefCell<Vec<EngineCall>>>) {
        let (mut engine, calls) = Self::new(true);
        engine.attach_error = Some(message.to_owned());
        (engine, calls)
    }
}

impl StreamingEngine for FakeEngine {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn attach(
        &mut self,
        session_id: SessionId,
        manifest_url: &Url,
    ) -> Result<Box<dyn EngineAttachment>, SessionError> {
        self.calls.borrow_mut().push(EngineCall::Attach(
            session_id,
            manifest_url.get_ref().to_owned(),
        ));
        if let Some(message) = &self.attach_error {
            return Err(SessionError::Attach {
                message: message.clone(),
            });
        }
        Ok(Box::new(FakeAttachment {
            session_id,
            calls: Rc::clone(&self.calls),
        }))
    }
}

struct FakeAttachment {
    session_id: SessionId,
    calls: Rc<RefCell<Vec<EngineCall>>>,
}

impl EngineAttachment for FakeAttachment {
    fn set_level(&mut self, level: i32) {
        self.calls
            .borrow_mut()
            .push(EngineCall::SetLevel(self.session_id, level));
    }

    fn destroy(self: Box<Self>) {
        self.calls
            .borrow_mut()
            .push(EngineCall::Destroy(self.session_id));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Notification {
    TimeUpdate(f64),
    LevelsAvailable(Vec<u32>),
    SessionError(SessionError),
}

/// `PlaybackObserver` recording everything it is notified of.
pub(crate) struct RecordingObserver {
    notifications: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingObserver {
    pub(crate) fn new() -> (Self, Rc<RefCell<Vec<Notification>>>) {
        let notifications = Rc::new(RefCell::new(vec![]));
        let observer = Self {
            notifications: Rc::clone(&notifications),
        };
        (observer, notifications)
    }
}

impl PlaybackObserver for RecordingObserver {
    fn on_time_update(&mut self, current_time: f64) {
        self.notifications
            .borrow_mut()
            .push(Notification::TimeUpdate(current_time));
    }

    fn on_levels_available(&mut self, levels: &[QualityLevel]) {
        self.notifications.borrow_mut().push(Notification::LevelsAvailable(
            levels.iter().map(|l| l.vertical_resolution()).collect(),
        ));
    }

    fn on_session_error(&mut self, error: &SessionError) {
        self.notifications
            .borrow_mut()
            .push(Notification::SessionError(error.clone()));
    }
}

/// Quality levels with the given heights, in that order.
pub(crate) fn levels(heights: &[u32]) -> Vec<QualityLevel> {
    heights
        .iter()
        .enumerate()
        .map(|(idx, height)| QualityLevel::new(idx, *height, height * 2_000))
        .collect()
}
