use crate::{
    bindings::TextTrackMode, media_element::MediaSink, streaming::CaptionSource, Logger,
};

/// Language code used to disable every caption track.
pub const CAPTIONS_OFF: &str = "off";

/// A subtitle track of the current video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionTrack {
    language_code: String,
    display_name: String,
    mode: TextTrackMode,
}

impl CaptionTrack {
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_showing(&self) -> bool {
        self.mode == TextTrackMode::Showing
    }
}

/// Keeps track of the subtitle tracks of the media element and of which one is shown.
///
/// At most one track is `Showing` at any time.
#[derive(Debug, Default)]
pub struct CaptionTrackManager {
    tracks: Vec<CaptionTrack>,
}

impl CaptionTrackManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current tracks by the ones of a new video, adding them to the media element.
    ///
    /// The first source is shown by default.
    pub(crate) fn install(&mut self, sources: &[CaptionSource], sink: &mut dyn MediaSink) {
        self.tracks = sources
            .iter()
            .enumerate()
            .map(|(idx, source)| {
                let is_default = idx == 0;
                sink.add_text_track(source, is_default);
                CaptionTrack {
                    language_code: source.language_code.clone(),
                    display_name: source.display_name.clone(),
                    mode: if is_default {
                        TextTrackMode::Showing
                    } else {
                        TextTrackMode::Hidden
                    },
                }
            })
            .collect();
    }

    /// Forget every track. The media element's tracks should be removed separately.
    pub(crate) fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn tracks(&self) -> &[CaptionTrack] {
        &self.tracks
    }

    /// Language code of the track currently shown, `None` if captions are off.
    pub fn active_language(&self) -> Option<&str> {
        self.tracks
            .iter()
            .find(|t| t.is_showing())
            .map(|t| t.language_code())
    }

    /// Show the track in the `code` language and hide all others.
    ///
    /// `"off"`, as well as any language without a track, hides every track.
    pub fn select_language(&mut self, code: &str, sink: &mut dyn MediaSink) {
        if code != CAPTIONS_OFF && !self.tracks.iter().any(|t| t.language_code == code) {
            Logger::debug(&format!("CT: No caption track for \"{code}\", hiding all"));
        }
        for (idx, track) in self.tracks.iter_mut().enumerate() {
            let mode = if code != CAPTIONS_OFF && track.language_code == code {
                TextTrackMode::Showing
            } else {
                TextTrackMode::Hidden
            };
            track.mode = mode;
            sink.set_text_track_mode(idx, mode);
        }
    }
}
