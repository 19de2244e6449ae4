//! Implementations of the player's seams relying on the JavaScript functions imported in
//! `js_functions`.

use crate::{
    controller::PlaybackObserver,
    media_element::MediaSink,
    quality::QualityLevel,
    streaming::{CaptionSource, EngineAttachment, SessionError, StreamingEngine},
    utils::url::Url,
};

use super::{
    formatters::{format_levels_for_js, format_session_error_for_js, parse_attach_error_from_js},
    jsAddTextTrack, jsAnnounceLevels, jsAnnounceTimeUpdate, jsCanPlayType, jsCreateEngineSession,
    jsDestroyEngineSession, jsExitFullscreen, jsIsEngineSupported, jsPause, jsPlay,
    jsRemoveMediaSource, jsRemoveTextTracks, jsRequestFullscreen, jsSeek, jsSendSessionError,
    jsSetEngineLevel, jsSetMediaSource, jsSetMuted, jsSetTextTrackMode, jsSetVolume, JsResult,
    SessionId, TextTrackMode,
};

/// `MediaSink` driving the media element linked to the `Dispatcher` on the JavaScript-side.
pub(crate) struct JsMediaSink;

impl MediaSink for JsMediaSink {
    fn can_play_type(&self, mime_type: &str) -> bool {
        jsCanPlayType(mime_type)
    }

    fn set_source(&mut self, session_id: SessionId, url: &Url) {
        jsSetMediaSource(session_id, url.get_ref());
    }

    fn remove_source(&mut self) {
        jsRemoveMediaSource();
    }

    fn play(&mut self) {
        jsPlay();
    }

    fn pause(&mut self) {
        jsPause();
    }

    fn seek(&mut self, position: f64) {
        jsSeek(position);
    }

    fn set_volume(&mut self, volume: f64) {
        jsSetVolume(volume);
    }

    fn set_muted(&mut self, muted: bool) {
        jsSetMuted(muted);
    }

    fn request_fullscreen(&mut self) {
        jsRequestFullscreen();
    }

    fn exit_fullscreen(&mut self) {
        jsExitFullscreen();
    }

    fn add_text_track(&mut self, source: &CaptionSource, is_default: bool) {
        jsAddTextTrack(
            &source.language_code,
            &source.display_name,
            source.url.get_ref(),
            is_default,
        );
    }

    fn remove_text_tracks(&mut self) {
        jsRemoveTextTracks();
    }

    fn set_text_track_mode(&mut self, track_index: usize, mode: TextTrackMode) {
        jsSetTextTrackMode(track_index as u32, mode);
    }
}

/// `StreamingEngine` creating engine instances on the JavaScript-side.
pub(crate) struct JsStreamingEngine;

impl StreamingEngine for JsStreamingEngine {
    fn is_supported(&self) -> bool {
        jsIsEngineSupported()
    }

    fn attach(
        &mut self,
        session_id: SessionId,
        manifest_url: &Url,
    ) -> Result<Box<dyn EngineAttachment>, SessionError> {
        jsCreateEngineSession(session_id, manifest_url.get_ref())
            .result()
            .map_err(|(code, desc)| parse_attach_error_from_js(code, desc))?;
        Ok(Box::new(JsEngineAttachment { session_id }))
    }
}

struct JsEngineAttachment {
    session_id: SessionId,
}

impl EngineAttachment for JsEngineAttachment {
    fn set_level(&mut self, level: i32) {
        jsSetEngineLevel(self.session_id, level);
    }

    fn destroy(self: Box<Self>) {
        jsDestroyEngineSession(self.session_id);
    }
}

/// `PlaybackObserver` announcing everything to the JavaScript-side.
pub(crate) struct JsPlaybackObserver;

impl PlaybackObserver for JsPlaybackObserver {
    fn on_time_update(&mut self, current_time: f64) {
        jsAnnounceTimeUpdate(current_time);
    }

    fn on_levels_available(&mut self, levels: &[QualityLevel]) {
        jsAnnounceLevels(format_levels_for_js(levels));
    }

    fn on_session_error(&mut self, error: &SessionError) {
        let (code, message) = format_session_error_for_js(error);
        jsSendSessionError(code, Some(&message));
    }
}
