use crate::{
    bindings::SessionId,
    captions::CaptionTrackManager,
    config::PlayerConfiguration,
    media_element::{MediaElementReference, MediaSink},
    quality::{QualityError, QualityLevel, QualityManager},
    streaming::{SessionError, StreamingEngine, StreamingSession, VideoSession},
    Logger,
};

pub use reducer::{reduce, PlaybackEvent, PlaybackState};
pub use seek_handle::SeekHandle;

mod reducer;
mod seek_handle;

use reducer::{clamp_position, clamp_volume};

/// Lifecycle of the content loaded in a `PlaybackController`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// No content is loaded.
    Idle,
    /// A session is open but the media element has not loaded the content's metadata yet.
    Loading,
    /// The content's metadata is loaded.
    Ready,
    /// The current session failed. A new `load_video` call is needed to play again.
    Unavailable(SessionError),
}

/// Receives the information the `PlaybackController` communicates to the outside.
pub trait PlaybackObserver {
    /// Called on each playhead position update of the current content.
    fn on_time_update(&mut self, _current_time: f64) {}

    /// Called once the quality levels of the current content are known.
    fn on_levels_available(&mut self, _levels: &[QualityLevel]) {}

    /// Called when the current content cannot be played anymore.
    fn on_session_error(&mut self, _error: &SessionError) {}
}

/// `PlaybackObserver` only interested in time updates, calling the wrapped closure with the
/// new position.
pub struct TimeUpdateCallback<F: FnMut(f64)>(pub F);

impl<F: FnMut(f64)> PlaybackObserver for TimeUpdateCallback<F> {
    fn on_time_update(&mut self, current_time: f64) {
        (self.0)(current_time)
    }
}

/// The single authoritative source of playback state.
///
/// It owns the media element, the streaming engine and the current `StreamingSession`, and
/// reconciles user commands, external seeks and media element events into one
/// `PlaybackState`.
pub struct PlaybackController {
    config: PlayerConfiguration,

    /// Allows to perform actions on the media element, like seeking or pausing.
    media: MediaElementReference,

    engine: Box<dyn StreamingEngine>,

    /// The session of the currently-loaded video. `None` if no video is loaded.
    session: Option<StreamingSession>,

    /// Identifier the next opened session will have.
    next_session_id: SessionId,

    captions: CaptionTrackManager,

    state: PlaybackState,

    status: PlaybackStatus,

    /// Last non-zero volume, restored when unmuting.
    last_audible_volume: Option<f64>,

    observer: Box<dyn PlaybackObserver>,
}

impl PlaybackController {
    pub fn new(
        config: PlayerConfiguration,
        sink: Box<dyn MediaSink>,
        engine: Box<dyn StreamingEngine>,
        observer: Box<dyn PlaybackObserver>,
    ) -> Self {
        let state = PlaybackState::new(config.initial_volume);
        let last_audible_volume = Some(state.volume).filter(|v| *v > 0.);
        Self {
            config,
            media: MediaElementReference::new(sink),
            engine,
            session: None,
            next_session_id: 1,
            captions: CaptionTrackManager::new(),
            state,
            status: PlaybackStatus::Idle,
            last_audible_volume,
            observer,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> &PlaybackStatus {
        &self.status
    }

    pub fn session(&self) -> Option<&StreamingSession> {
        self.session.as_ref()
    }

    pub fn captions(&self) -> &CaptionTrackManager {
        &self.captions
    }

    pub fn config(&self) -> &PlayerConfiguration {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PlayerConfiguration {
        &mut self.config
    }

    /// Identifier of the current session, if one.
    pub fn current_session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id())
    }

    /// Stop the current video if one and start loading the one whose id is given.
    ///
    /// Returns the id of the new session, which tags every event linked to it.
    pub fn load_video(&mut self, video_id: &str) -> Result<SessionId, SessionError> {
        Logger::info(&format!("PC: Loading video {video_id}"));
        self.close_session();
        self.state = self.state.for_new_content();

        let video = VideoSession::new(video_id, &self.config);
        self.captions
            .install(video.caption_sources(), self.media.sink_mut());

        let id = self.next_session_id;
        self.next_session_id = self.next_session_id.wrapping_add(1);
        match StreamingSession::open(id, video, self.engine.as_mut(), &mut self.media) {
            Ok(session) => {
                Logger::info(&format!("PC: Session {id} opened in {:?} mode", session.mode()));
                self.session = Some(session);
                self.status = PlaybackStatus::Loading;
                Ok(id)
            }
            Err(err) => {
                self.close_session();
                self.status = PlaybackStatus::Unavailable(err.clone());
                self.observer.on_session_error(&err);
                Err(err)
            }
        }
    }

    /// Stop the current video if one, releasing all its resources.
    pub fn stop(&mut self) {
        self.close_session();
        self.state = self.state.for_new_content();
        self.status = PlaybackStatus::Idle;
    }

    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            session.close();
        }
        self.media.reset();
        self.captions.clear();
    }

    /// Returns `true` if events tagged with `session_id` should be considered.
    fn accepts_events_from(&self, session_id: SessionId) -> bool {
        match &self.session {
            Some(session) if session.id() == session_id => session.is_active(),
            _ => {
                Logger::debug(&format!("PC: Ignoring event from stale session {session_id}"));
                false
            }
        }
    }

    /// Returns `true` if a session is open and did not fail.
    fn has_playable_session(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_active())
    }

    fn apply(&mut self, event: &PlaybackEvent) {
        self.state = reduce(&self.state, event);
    }

    /// Method to call once the streaming engine parsed the Multivariant Playlist.
    pub fn on_levels_available(&mut self, session_id: SessionId, levels: Vec<QualityLevel>) {
        if !self.accepts_events_from(session_id) {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            if session.on_levels_available(levels) {
                self.observer.on_levels_available(session.levels());
            }
        }
    }

    /// Method to call once the streaming engine switched to another rendition.
    pub fn on_level_switched(&mut self, session_id: SessionId, level: i32) {
        if !self.accepts_events_from(session_id) {
            return;
        }
        let switched = self
            .session
            .as_mut()
            .and_then(|s| s.on_level_switched(level));
        if switched.is_some() {
            self.apply(&PlaybackEvent::LevelSwitched(level));
        }
    }

    /// Method to call when the streaming engine encountered a fatal error.
    pub fn on_session_error(&mut self, session_id: SessionId, err: SessionError) {
        if !self.accepts_events_from(session_id) {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.fail(err.clone());
        }
        self.apply(&PlaybackEvent::Paused);
        self.status = PlaybackStatus::Unavailable(err.clone());
        self.observer.on_session_error(&err);
    }

    /// Method to call on each event sent by the media element for the given session.
    pub fn on_media_event(&mut self, session_id: SessionId, event: PlaybackEvent) {
        if !self.accepts_events_from(session_id) {
            return;
        }
        self.apply(&event);
        match event {
            PlaybackEvent::MetadataLoaded { .. } => {
                if let Some(position) = self.media.on_metadata_loaded(self.state.duration) {
                    self.apply(&PlaybackEvent::SeekRequested(position));
                }
                if self.status == PlaybackStatus::Loading {
                    self.status = PlaybackStatus::Ready;
                }
            }
            PlaybackEvent::TimeUpdate(_) => {
                self.observer.on_time_update(self.state.current_time);
            }
            PlaybackEvent::VolumeChanged { .. } => {
                if self.state.volume > 0. {
                    self.last_audible_volume = Some(self.state.volume);
                }
            }
            _ => {}
        }
    }

    /// Method to call when the player's container entered or exited fullscreen, for whatever
    /// reason.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        self.apply(&PlaybackEvent::FullscreenChanged(is_fullscreen));
    }

    /// Pause if playing, play otherwise.
    pub fn toggle_play(&mut self) {
        if !self.has_playable_session() {
            Logger::debug("PC: Ignoring play toggle: nothing playable is loaded");
            return;
        }
        if self.state.is_playing {
            self.media.sink_mut().pause();
            self.apply(&PlaybackEvent::PauseRequested);
        } else {
            self.media.sink_mut().play();
            self.apply(&PlaybackEvent::PlayRequested);
        }
    }

    /// Seek to the given fraction (from `0` to `1`) of the content's duration.
    ///
    /// Does nothing while the duration is not known.
    pub fn seek_by(&mut self, fraction: f64) {
        if !self.has_playable_session() || fraction.is_nan() {
            return;
        }
        if !self.state.has_duration() {
            Logger::debug("PC: Ignoring relative seek: duration not known yet");
            return;
        }
        let position = fraction.clamp(0., 1.) * self.state.duration;
        self.media.seek(position);
        self.apply(&PlaybackEvent::SeekRequested(position));
    }

    /// Seek to the given position in seconds and resume playback.
    ///
    /// When the duration is not known yet, the seek is performed once the content's metadata
    /// is loaded.
    pub fn seek_to(&mut self, seconds: f64) {
        if !self.has_playable_session() {
            Logger::debug("PC: Ignoring seek: nothing playable is loaded");
            return;
        }
        if !seconds.is_finite() {
            Logger::warn(&format!("PC: Ignoring seek to invalid position {seconds}"));
            return;
        }
        let position = clamp_position(seconds, self.state.duration);
        self.media.seek(position);
        self.apply(&PlaybackEvent::SeekRequested(position));
        self.media.sink_mut().play();
        self.apply(&PlaybackEvent::PlayRequested);
    }

    /// Set the volume, from `0` to `1`. A volume of `0` means muted, any other volume
    /// unmutes.
    pub fn set_volume(&mut self, fraction: f64) {
        let volume = clamp_volume(fraction);
        if volume > 0. {
            self.last_audible_volume = Some(volume);
        }
        self.media.sink_mut().set_volume(volume);
        if volume > 0. && self.state.is_muted {
            self.media.sink_mut().set_muted(false);
        }
        self.apply(&PlaybackEvent::VolumeChanged {
            volume,
            muted: volume == 0.,
        });
    }

    /// Mute, or unmute.
    ///
    /// Muting silences the media element while keeping its volume, which is restored as is
    /// when unmuting. If that volume is `0`, the last non-zero volume (or the configured
    /// default) is restored instead.
    pub fn toggle_mute(&mut self) {
        let volume = self.state.volume;
        if !self.state.is_muted {
            if volume > 0. {
                self.last_audible_volume = Some(volume);
            }
            self.media.sink_mut().set_muted(true);
            self.apply(&PlaybackEvent::VolumeChanged {
                volume,
                muted: true,
            });
            return;
        }
        let volume = if volume > 0. {
            volume
        } else {
            let restored = clamp_volume(
                self.last_audible_volume
                    .unwrap_or(self.config.default_unmute_volume),
            );
            self.media.sink_mut().set_volume(restored);
            restored
        };
        self.media.sink_mut().set_muted(false);
        self.apply(&PlaybackEvent::VolumeChanged {
            volume,
            muted: false,
        });
    }

    /// Enter fullscreen mode, or exit it if enabled.
    pub fn toggle_fullscreen(&mut self) {
        let is_fullscreen = !self.state.is_fullscreen;
        if is_fullscreen {
            self.media.sink_mut().request_fullscreen();
        } else {
            self.media.sink_mut().exit_fullscreen();
        }
        self.apply(&PlaybackEvent::FullscreenChanged(is_fullscreen));
    }

    /// Access the quality levels of the current content.
    pub fn quality(&mut self) -> QualityManager<'_> {
        QualityManager::new(self.session.as_mut())
    }

    /// Pin the quality level whose index is given, or `-1` for automatic selection.
    pub fn select_quality(&mut self, index: i32) -> Result<(), QualityError> {
        self.quality().select(index)
    }

    /// Show the captions in the given language, or hide them all with `"off"`.
    pub fn select_language(&mut self, code: &str) {
        self.captions.select_language(code, self.media.sink_mut());
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        if self.session.is_some() {
            self.close_session();
        }
    }
}
