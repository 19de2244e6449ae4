use serde::Serialize;

use crate::{
    captions::CAPTIONS_OFF,
    controller::{PlaybackController, PlaybackStatus},
    quality::AUTO_LEVEL,
};

/// Everything a view needs to render the player's controls, derived from a
/// `PlaybackController`.
///
/// Serialized with camelCase keys when sent to the JavaScript-side.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackViewModel {
    pub status: ViewStatus,
    /// Message to display when playback is unavailable.
    pub error_message: Option<String>,
    pub is_playing: bool,
    pub current_time_label: String,
    pub duration_label: String,
    /// Playhead position, from `0` to `100`.
    pub progress_percent: f64,
    /// Buffered part of the content, from `0` to `100`.
    pub buffered_percent: f64,
    /// Volume shown on the volume slider, from `0` to `100`.
    pub volume_percent: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,
    /// "Auto" followed by each level. Empty when no level list is known, in which case no
    /// quality selector should be shown.
    pub quality_options: Vec<QualityOption>,
    pub selected_quality: i32,
    /// Label of the rendition being played, once known.
    pub playing_quality_label: Option<String>,
    /// "Off" followed by each caption track.
    pub caption_options: Vec<CaptionOption>,
    /// Language code of the caption track shown, or `"off"`.
    pub selected_caption: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready,
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QualityOption {
    pub value: i32,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaptionOption {
    pub code: String,
    pub label: String,
}

impl PlaybackViewModel {
    pub fn project(controller: &PlaybackController) -> Self {
        let state = controller.state();
        let (status, error_message) = match controller.status() {
            PlaybackStatus::Idle => (ViewStatus::Idle, None),
            PlaybackStatus::Loading => (ViewStatus::Loading, None),
            PlaybackStatus::Ready => (ViewStatus::Ready, None),
            PlaybackStatus::Unavailable(err) => (
                ViewStatus::Unavailable,
                Some(format!("Playback unavailable: {err}")),
            ),
        };

        let session = controller.session();
        let levels = session.map(|s| s.levels()).unwrap_or(&[]);
        let quality_options = if levels.is_empty() {
            vec![]
        } else {
            std::iter::once(QualityOption {
                value: AUTO_LEVEL,
                label: "Auto".to_owned(),
            })
            .chain(levels.iter().map(|l| QualityOption {
                value: l.index() as i32,
                label: l.label(),
            }))
            .collect()
        };
        let playing_quality_label = session
            .and_then(|s| s.current_level())
            .and_then(|idx| levels.get(idx))
            .map(|l| l.label());

        let captions = controller.captions();
        let caption_options = std::iter::once(CaptionOption {
            code: CAPTIONS_OFF.to_owned(),
            label: "Off".to_owned(),
        })
        .chain(captions.tracks().iter().map(|t| CaptionOption {
            code: t.language_code().to_owned(),
            label: t.display_name().to_owned(),
        }))
        .collect();

        Self {
            status,
            error_message,
            is_playing: state.is_playing,
            current_time_label: format_time(state.current_time),
            duration_label: format_time(state.duration),
            progress_percent: percent(state.current_time, state.duration),
            buffered_percent: state.buffered_fraction * 100.,
            volume_percent: if state.is_muted {
                0.
            } else {
                state.volume * 100.
            },
            is_muted: state.is_muted,
            is_fullscreen: state.is_fullscreen,
            quality_options,
            selected_quality: session.map(|s| s.selected_level()).unwrap_or(AUTO_LEVEL),
            playing_quality_label,
            caption_options,
            selected_caption: captions
                .active_language()
                .unwrap_or(CAPTIONS_OFF)
                .to_owned(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn percent(value: f64, total: f64) -> f64 {
    if total > 0. {
        (value / total * 100.).clamp(0., 100.)
    } else {
        0.
    }
}

/// Format a duration in seconds as `m:ss`, or `h:mm:ss` from one hour.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0. {
        seconds.floor() as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::PlayerConfiguration,
        controller::{PlaybackEvent, TimeUpdateCallback},
        streaming::SessionError,
        testing::{levels, FakeEngine, FakeSink},
        utils::time_ranges::TimeRanges,
    };

    fn controller() -> PlaybackController {
        let (sink, _) = FakeSink::new();
        let (engine, _) = FakeEngine::new(true);
        PlaybackController::new(
            PlayerConfiguration::default(),
            Box::new(sink),
            Box::new(engine),
            Box::new(TimeUpdateCallback(|_: f64| {})),
        )
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.), "0:00");
        assert_eq!(format_time(65.7), "1:05");
        assert_eq!(format_time(3599.), "59:59");
        assert_eq!(format_time(3600.), "1:00:00");
        assert_eq!(format_time(7384.), "2:03:04");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn test_idle_projection() {
        let view = PlaybackViewModel::project(&controller());
        assert_eq!(view.status, ViewStatus::Idle);
        assert!(view.quality_options.is_empty());
        assert_eq!(view.selected_quality, AUTO_LEVEL);
        assert_eq!(view.caption_options.len(), 1);
        assert_eq!(view.selected_caption, "off");
        assert_eq!(view.volume_percent, 100.);
    }

    #[test]
    fn test_ready_projection() {
        let mut controller = controller();
        let id = controller.load_video("42").unwrap();
        controller.on_levels_available(id, levels(&[360, 720, 1080]));
        controller.on_level_switched(id, 2);
        controller.on_media_event(id, PlaybackEvent::MetadataLoaded { duration: 200. });
        controller.on_media_event(id, PlaybackEvent::TimeUpdate(50.));
        controller.on_media_event(
            id,
            PlaybackEvent::Progress(TimeRanges::from_flat(&[0., 100.])),
        );
        controller.select_language("es");
        controller.set_volume(0.4);

        let view = PlaybackViewModel::project(&controller);
        assert_eq!(view.status, ViewStatus::Ready);
        assert_eq!(view.current_time_label, "0:50");
        assert_eq!(view.duration_label, "3:20");
        assert_eq!(view.progress_percent, 25.);
        assert_eq!(view.buffered_percent, 50.);
        assert_eq!(view.volume_percent, 40.);
        let labels: Vec<&str> = view.quality_options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Auto", "360p", "720p", "1080p"]);
        assert_eq!(view.quality_options[0].value, -1);
        assert_eq!(view.selected_quality, AUTO_LEVEL);
        assert_eq!(view.playing_quality_label.as_deref(), Some("1080p"));
        let codes: Vec<&str> = view.caption_options.iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, vec!["off", "en", "es", "ru"]);
        assert_eq!(view.selected_caption, "es");

        controller.toggle_mute();
        let view = PlaybackViewModel::project(&controller);
        assert!(view.is_muted);
        assert_eq!(view.volume_percent, 0.);

        controller.toggle_mute();
        assert_eq!(PlaybackViewModel::project(&controller).volume_percent, 40.);
    }

    #[test]
    fn test_unavailable_projection_and_json() {
        let mut controller = controller();
        let id = controller.load_video("42").unwrap();
        controller.on_session_error(
            id,
            SessionError::Manifest {
                message: "HTTP 404".to_owned(),
            },
        );
        let view = PlaybackViewModel::project(&controller);
        assert_eq!(view.status, ViewStatus::Unavailable);
        assert_eq!(
            view.error_message.as_deref(),
            Some("Playback unavailable: Could not load the Multivariant Playlist: HTTP 404")
        );
        let json = view.to_json().unwrap();
        assert!(json.contains("\"status\":\"unavailable\""));
        assert!(json.contains("\"isPlaying\":false"));
        assert!(json.contains("\"selectedCaption\":\"en\""));
    }
}
