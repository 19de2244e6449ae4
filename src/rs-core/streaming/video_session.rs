use crate::{config::PlayerConfiguration, utils::url::Url};

/// A subtitle file offered for a video, in a single language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionSource {
    pub language_code: String,
    pub display_name: String,
    pub url: Url,
}

/// Everything needed to play one video, derived from its identifier.
///
/// Immutable once created: loading another video means creating another `VideoSession`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoSession {
    video_id: String,
    stream_url: Url,
    caption_sources: Vec<CaptionSource>,
}

impl VideoSession {
    /// Create the `VideoSession` of the video whose id is given, constructing its stream and
    /// subtitle URLs from the configuration.
    pub fn new(video_id: &str, config: &PlayerConfiguration) -> Self {
        let base = config.streaming_base_url.as_str();
        let caption_sources = config
            .caption_languages
            .iter()
            .map(|lang| CaptionSource {
                language_code: lang.code.clone(),
                display_name: lang.label.clone(),
                url: Url::for_subtitles(base, video_id, &lang.code),
            })
            .collect();
        Self {
            video_id: video_id.to_owned(),
            stream_url: Url::for_manifest(base, video_id),
            caption_sources,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn stream_url(&self) -> &Url {
        &self.stream_url
    }

    pub fn caption_sources(&self) -> &[CaptionSource] {
        &self.caption_sources
    }
}
