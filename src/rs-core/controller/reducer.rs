use crate::{quality::AUTO_LEVEL, utils::time_ranges::TimeRanges};

/// Transport state of the player, as derived from media element events and user commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,

    /// Playhead position in seconds.
    pub current_time: f64,

    /// Duration of the content in seconds, `0` until known.
    pub duration: f64,

    /// Proportion of the content which is buffered, from `0` to `1`.
    pub buffered_fraction: f64,

    /// Volume of the media element, from `0` to `1`.
    pub volume: f64,

    pub is_muted: bool,

    pub is_fullscreen: bool,

    /// Rendition the streaming engine last switched to, `-1` before any switch.
    pub active_quality_index: i32,
}

impl PlaybackState {
    pub fn new(initial_volume: f64) -> Self {
        let volume = clamp_volume(initial_volume);
        Self {
            is_playing: false,
            current_time: 0.,
            duration: 0.,
            buffered_fraction: 0.,
            volume,
            is_muted: volume == 0.,
            is_fullscreen: false,
            active_quality_index: AUTO_LEVEL,
        }
    }

    /// Returns `true` once the duration of the content is known.
    pub fn has_duration(&self) -> bool {
        self.duration > 0.
    }

    /// State for a newly loaded content: only volume and fullscreen, which are linked to the
    /// media element and its container, are kept.
    pub(crate) fn for_new_content(&self) -> Self {
        Self {
            volume: self.volume,
            is_muted: self.is_muted,
            is_fullscreen: self.is_fullscreen,
            ..Self::new(self.volume)
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(1.)
    }
}

/// Every event which may change the `PlaybackState`.
///
/// The first variants are notifications from the media element, the `*Requested` ones are
/// the optimistic consequences of user commands, corrected by later notifications.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    /// The media element's "timeupdate" event.
    TimeUpdate(f64),
    /// The media element's "progress" event, with its buffered ranges.
    Progress(TimeRanges),
    /// The media element's "loadedmetadata" event, with its duration.
    MetadataLoaded { duration: f64 },
    /// The media element's "durationchange" event.
    DurationChanged(f64),
    /// The media element's "playing" event.
    Playing,
    /// The media element's "pause" event, also sent when a play attempt was rejected.
    Paused,
    /// The media element's "ended" event.
    Ended,
    /// The media element's "volumechange" event.
    VolumeChanged { volume: f64, muted: bool },
    /// The document's "fullscreenchange" event.
    FullscreenChanged(bool),
    /// The streaming engine switched to another rendition.
    LevelSwitched(i32),
    PlayRequested,
    PauseRequested,
    SeekRequested(f64),
}

/// Produce the `PlaybackState` following `state` once `event` happened.
pub fn reduce(state: &PlaybackState, event: &PlaybackEvent) -> PlaybackState {
    let mut next = *state;
    match event {
        PlaybackEvent::TimeUpdate(position) | PlaybackEvent::SeekRequested(position) => {
            next.current_time = clamp_position(*position, next.duration);
        }
        PlaybackEvent::Progress(buffered) => {
            next.buffered_fraction = buffered.buffered_fraction(next.duration);
        }
        PlaybackEvent::MetadataLoaded { duration } => {
            if duration.is_finite() && *duration > 0. {
                next.duration = *duration;
                next.current_time = clamp_position(next.current_time, next.duration);
            }
        }
        // Only fills a still unknown duration. Corrections come with the metadata.
        PlaybackEvent::DurationChanged(duration) => {
            if !next.has_duration() && duration.is_finite() && *duration > 0. {
                next.duration = *duration;
                next.current_time = clamp_position(next.current_time, next.duration);
            }
        }
        PlaybackEvent::Playing | PlaybackEvent::PlayRequested => next.is_playing = true,
        PlaybackEvent::Paused | PlaybackEvent::PauseRequested => next.is_playing = false,
        PlaybackEvent::Ended => {
            next.is_playing = false;
            if next.has_duration() {
                next.current_time = next.duration;
            }
        }
        PlaybackEvent::VolumeChanged { volume, muted } => {
            next.volume = clamp_volume(*volume);
            next.is_muted = *muted || next.volume == 0.;
        }
        PlaybackEvent::FullscreenChanged(is_fullscreen) => next.is_fullscreen = *is_fullscreen,
        PlaybackEvent::LevelSwitched(level) => next.active_quality_index = *level,
    }
    next
}

/// Clamp a position to `[0, duration]`, or only to positive values if the duration is not
/// known yet.
pub(crate) fn clamp_position(position: f64, duration: f64) -> f64 {
    let position = if position.is_finite() {
        position.max(0.)
    } else {
        0.
    };
    if duration > 0. {
        position.min(duration)
    } else {
        position
    }
}

pub(crate) fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        0.
    } else {
        volume.clamp(0., 1.)
    }
}
