use serde::Deserialize;

const DEFAULT_STREAMING_BASE_URL: &str = "http://localhost:8080";

/// Volume restored when unmuting if no non-zero volume was ever set.
const DEFAULT_UNMUTE_VOLUME: f64 = 0.5;

/// Volume of the media element when a `PlaybackController` is created.
const DEFAULT_INITIAL_VOLUME: f64 = 1.;

/// A subtitle language offered for every video.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CaptionLanguage {
    /// Language code as used in subtitle file names, e.g. `"en"`.
    pub code: String,
    /// Name displayed to the user, e.g. `"English"`.
    pub label: String,
}

impl CaptionLanguage {
    pub fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_owned(),
            label: label.to_owned(),
        }
    }
}

/// Configuration on which the `PlaybackController` relies.
///
/// Updates are only considered for the next loaded video, except for volume-related ones
/// which are considered for the next volume command.
#[derive(Clone, Debug)]
pub struct PlayerConfiguration {
    /// Root URL of the streaming backend, under which Multivariant Playlists are served at
    /// `/hls/{video_id}/master.m3u8` and subtitles at
    /// `/subtitles/{video_id}/subtitles_{lang}.vtt`.
    pub streaming_base_url: String,

    /// Subtitle languages offered for every video, in display order. The first one is shown
    /// by default.
    pub caption_languages: Vec<CaptionLanguage>,

    /// Volume, from `0` to `1`, set back when unmuting if no other non-zero volume was set.
    pub default_unmute_volume: f64,

    /// Volume, from `0` to `1`, the media element is considered to start with.
    pub initial_volume: f64,
}

impl Default for PlayerConfiguration {
    fn default() -> Self {
        Self {
            streaming_base_url: DEFAULT_STREAMING_BASE_URL.to_owned(),
            caption_languages: vec![
                CaptionLanguage::new("en", "English"),
                CaptionLanguage::new("es", "Español"),
                CaptionLanguage::new("ru", "Русский"),
            ],
            default_unmute_volume: DEFAULT_UNMUTE_VOLUME,
            initial_volume: DEFAULT_INITIAL_VOLUME,
        }
    }
}

/// Parse a JSON list of caption languages, formatted as `[{"code": "en", "label": "English"}]`.
pub fn parse_caption_languages(json: &str) -> Result<Vec<CaptionLanguage>, serde_json::Error> {
    serde_json::from_str(json)
}
