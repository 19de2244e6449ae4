use crate::{
    bindings::{
        formatters::{parse_levels_from_js, parse_session_error_from_js},
        SessionErrorCode, SessionId,
    },
    controller::PlaybackEvent,
    dispatcher::Dispatcher,
    utils::time_ranges::TimeRanges,
    wasm_bindgen,
};

/// Methods triggered on JavaScript events by the JavaScript code.
///
/// Every method linked to a video receives the `SessionId` of the session the event comes
/// from. Events coming from a session which is not the current one are ignored.
#[wasm_bindgen]
impl Dispatcher {
    /// The JS code should call this method once the streaming engine parsed the
    /// Multivariant Playlist.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The identifier given to `jsCreateEngineSession`.
    ///
    /// * `heights` - Vertical resolution of each rendition, in Multivariant Playlist order.
    ///
    /// * `bitrates` - Bitrate of each rendition, in bits per second, in the same order.
    pub fn on_levels_available(
        &mut self,
        session_id: SessionId,
        heights: Vec<u32>,
        bitrates: Vec<u32>,
    ) {
        let levels = parse_levels_from_js(&heights, &bitrates);
        self.with_controller(|c| c.on_levels_available(session_id, levels));
    }

    /// The JS code should call this method each time the streaming engine switched to
    /// another rendition.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The identifier given to `jsCreateEngineSession`.
    ///
    /// * `level` - Index of the new rendition, as announced in `on_levels_available`.
    pub fn on_level_switched(&mut self, session_id: SessionId, level: i32) {
        self.with_controller(|c| c.on_level_switched(session_id, level));
    }

    /// The JS code should call this method when the streaming engine or the media element
    /// encountered an error preventing playback.
    pub fn on_session_error(
        &mut self,
        session_id: SessionId,
        code: SessionErrorCode,
        message: Option<String>,
    ) {
        let err = parse_session_error_from_js(code, message);
        self.with_controller(|c| c.on_session_error(session_id, err));
    }

    /// The JS code should call this method on each "timeupdate" event of the media element.
    pub fn on_time_update(&mut self, session_id: SessionId, current_time: f64) {
        self.on_media_event(session_id, PlaybackEvent::TimeUpdate(current_time));
    }

    /// The JS code should call this method on each "progress" event of the media element.
    ///
    /// # Arguments
    ///
    /// * `buffered` - The media element's buffered ranges, flattened as
    ///   `[start1, end1, start2, end2, ...]`.
    pub fn on_progress(&mut self, session_id: SessionId, buffered: &[f64]) {
        let ranges = TimeRanges::from_flat(buffered);
        self.on_media_event(session_id, PlaybackEvent::Progress(ranges));
    }

    /// The JS code should call this method on the "loadedmetadata" event of the media element.
    pub fn on_loaded_metadata(&mut self, session_id: SessionId, duration: f64) {
        self.on_media_event(session_id, PlaybackEvent::MetadataLoaded { duration });
    }

    /// The JS code should call this method on each "durationchange" event of the media
    /// element.
    pub fn on_duration_change(&mut self, session_id: SessionId, duration: f64) {
        self.on_media_event(session_id, PlaybackEvent::DurationChanged(duration));
    }

    pub fn on_playing(&mut self, session_id: SessionId) {
        self.on_media_event(session_id, PlaybackEvent::Playing);
    }

    /// The JS code should call this method on the "pause" event of the media element, as well
    /// as when a `jsPlay` call was rejected.
    pub fn on_pause(&mut self, session_id: SessionId) {
        self.on_media_event(session_id, PlaybackEvent::Paused);
    }

    pub fn on_ended(&mut self, session_id: SessionId) {
        self.on_media_event(session_id, PlaybackEvent::Ended);
    }

    /// The JS code should call this method on each "volumechange" event of the media element.
    pub fn on_volume_change(&mut self, session_id: SessionId, volume: f64, muted: bool) {
        self.on_media_event(session_id, PlaybackEvent::VolumeChanged { volume, muted });
    }

    /// The JS code should call this method on each "fullscreenchange" event of the document,
    /// whatever triggered it.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        self.with_controller(|c| c.on_fullscreen_change(is_fullscreen));
    }
}

impl Dispatcher {
    fn on_media_event(&mut self, session_id: SessionId, event: PlaybackEvent) {
        self.with_controller(|c| c.on_media_event(session_id, event));
    }
}
