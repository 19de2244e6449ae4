use std::{cell::RefCell, rc::Rc};

use crate::{
    bindings::{
        formatters::format_levels_for_js, JsMediaSink, JsPlaybackObserver, JsStreamingEngine,
        SessionId,
    },
    config::{parse_caption_languages, PlayerConfiguration},
    controller::{PlaybackController, SeekHandle},
    utils::logger::LoggerLevel,
    view::PlaybackViewModel,
    wasm_bindgen, Logger,
};

use super::Dispatcher;

/// Methods exposed to the JavaScript-side.
///
/// Note that these are not the only methods callable by JavaScript. There's
/// also "event_listeners" which as its name point at, should be called when particular
/// events happen. Such "event_listeners" are defined in its own file.
#[wasm_bindgen]
impl Dispatcher {
    /// Create a new `Dispatcher` allowing to load a video on the HTMLMediaElement that should be
    /// linked to it on the JavaScript-side.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let controller = PlaybackController::new(
            PlayerConfiguration::default(),
            Box::new(JsMediaSink),
            Box::new(JsStreamingEngine),
            Box::new(JsPlaybackObserver),
        );
        Dispatcher {
            controller: Rc::new(RefCell::new(controller)),
        }
    }

    /// Set the root URL of the streaming backend, considered for the next loaded video.
    pub fn set_streaming_base_url(&mut self, base_url: String) {
        self.with_controller(|c| c.config_mut().streaming_base_url = base_url);
    }

    /// Set the caption languages offered for the next loaded videos, as a JSON array of
    /// `{"code", "label"}` objects.
    ///
    /// Returns `false` and keeps the current languages if the JSON is invalid.
    pub fn set_caption_languages(&mut self, languages_json: &str) -> bool {
        match parse_caption_languages(languages_json) {
            Ok(languages) => self
                .with_controller(|c| c.config_mut().caption_languages = languages)
                .is_some(),
            Err(err) => {
                Logger::warn(&format!("Invalid caption languages: {err}"));
                false
            }
        }
    }

    pub fn set_default_unmute_volume(&mut self, volume: f64) {
        self.with_controller(|c| c.config_mut().default_unmute_volume = volume.clamp(0., 1.));
    }

    pub fn set_log_level(&mut self, level: LoggerLevel) {
        Logger::set_logger_level(level);
    }

    /// Stop the current video if one and start loading the one whose id is given.
    ///
    /// Returns the `SessionId` tagging every event linked to that video, or nothing if it
    /// cannot be played, in which case the error is announced through `jsSendSessionError`.
    pub fn load_video(&mut self, video_id: &str) -> Option<SessionId> {
        Logger::info("load_video called");
        self.with_controller(|c| c.load_video(video_id).ok())
            .flatten()
    }

    /// Stop the currently loaded video.
    pub fn stop(&mut self) {
        self.with_controller(|c| c.stop());
    }

    pub fn toggle_play(&mut self) {
        self.with_controller(|c| c.toggle_play());
    }

    /// Seek to the given fraction (from `0` to `1`) of the video, e.g. on a progress bar click.
    pub fn seek_by(&mut self, fraction: f64) {
        self.with_controller(|c| c.seek_by(fraction));
    }

    /// Seek to the given position in seconds and resume playback.
    pub fn seek_to(&mut self, seconds: f64) {
        self.with_controller(|c| c.seek_to(seconds));
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.with_controller(|c| c.set_volume(volume));
    }

    pub fn toggle_mute(&mut self) {
        self.with_controller(|c| c.toggle_mute());
    }

    pub fn toggle_fullscreen(&mut self) {
        self.with_controller(|c| c.toggle_fullscreen());
    }

    /// Pin the quality level whose index is given, or `-1` for automatic selection.
    ///
    /// Returns `false` if that level could not be selected.
    pub fn select_quality(&mut self, index: i32) -> bool {
        match self.with_controller(|c| c.select_quality(index)) {
            Some(Ok(())) => true,
            Some(Err(err)) => {
                Logger::warn(&format!("Could not select quality {index}: {err}"));
                false
            }
            None => false,
        }
    }

    /// Returns the quality levels of the current video in the same flat format as the one
    /// given to `jsAnnounceLevels`, or `None` if the player is busy.
    pub fn quality_levels(&self) -> Option<Vec<u32>> {
        let mut controller = self.controller.try_borrow_mut().ok()?;
        let levels = format_levels_for_js(controller.quality().available_levels());
        Some(levels)
    }

    /// Returns the selected quality level: `-1` for automatic selection, or the index of the
    /// pinned level.
    pub fn selected_quality(&self) -> Option<i32> {
        let mut controller = self.controller.try_borrow_mut().ok()?;
        let level = controller.quality().active_level();
        Some(level)
    }

    /// Show the captions in the given language, or hide them all with `"off"`.
    pub fn select_language(&mut self, code: &str) {
        self.with_controller(|c| c.select_language(code));
    }

    /// Obtain a handle allowing a collaborator to seek in the current video, and nothing else.
    pub fn seek_handle(&self) -> SeekHandle {
        SeekHandle::with_announcer(&self.controller, super::announce_view_model)
    }

    /// Identifier of the current session, if one. Events sent to the "event listeners" should
    /// be tagged with it.
    pub fn current_session_id(&self) -> Option<SessionId> {
        self.controller.try_borrow().ok()?.current_session_id()
    }

    /// Returns the current `PlaybackViewModel`, serialized as JSON.
    pub fn view_model(&self) -> Option<String> {
        let controller = self.controller.try_borrow().ok()?;
        PlaybackViewModel::project(&controller).to_json().ok()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
