use crate::{
    bindings::{SessionId, TextTrackMode},
    streaming::CaptionSource,
    utils::url::Url,
    Logger,
};

/// Operations the player needs to perform on the media element (the "media sink") it drives.
///
/// On the web, this is implemented by `JsMediaSink`, which forwards every call to the
/// corresponding JavaScript function. Calls are fire-and-forget: their consequences are only
/// known once the media element sends the corresponding events back.
pub trait MediaSink {
    /// Returns `true` if the media element can directly play content of that mime-type.
    fn can_play_type(&self, mime_type: &str) -> bool;

    /// Directly set the source of the media element, without a streaming engine.
    fn set_source(&mut self, session_id: SessionId, url: &Url);

    /// Remove the current source (if one) from the media element.
    fn remove_source(&mut self);

    fn play(&mut self);

    fn pause(&mut self);

    /// Move the playhead to `position`, in seconds.
    fn seek(&mut self, position: f64);

    /// Set the volume of the media element, from `0.` to `1.`.
    fn set_volume(&mut self, volume: f64);

    /// Set the `muted` attribute of the media element. Its volume is left untouched.
    fn set_muted(&mut self, muted: bool);

    fn request_fullscreen(&mut self);

    fn exit_fullscreen(&mut self);

    /// Add a subtitle track to the media element. Tracks are then identified by their
    /// insertion index.
    fn add_text_track(&mut self, source: &CaptionSource, is_default: bool);

    /// Remove every subtitle track previously added.
    fn remove_text_tracks(&mut self);

    fn set_text_track_mode(&mut self, track_index: usize, mode: TextTrackMode);
}

/// Structure linked to the media element which allows to perform media-related actions on it
/// while keeping track of whether it is ready to receive them.
///
/// Seeks asked for before the content's metadata is loaded cannot be performed reliably: they
/// are queued and performed once `on_metadata_loaded` is called.
pub(crate) struct MediaElementReference {
    sink: Box<dyn MediaSink>,

    /// Set when a seek operation will need to be performed once possible on the linked
    /// media element.
    queued_seek: Option<f64>,

    /// `true` once the media element announced the metadata of the current source.
    metadata_loaded: bool,
}

impl MediaElementReference {
    /// Create a new `MediaElementReference` driving the given `MediaSink`.
    pub(crate) fn new(sink: Box<dyn MediaSink>) -> Self {
        Self {
            sink,
            queued_seek: None,
            metadata_loaded: false,
        }
    }

    /// Remove the current source and every text track from the media element and reset this
    /// `MediaElementReference` to its initial state.
    pub(crate) fn reset(&mut self) {
        self.sink.remove_source();
        self.sink.remove_text_tracks();
        self.queued_seek = None;
        self.metadata_loaded = false;
    }

    /// Returns `true` if the metadata of the current source has been loaded, meaning that seek
    /// operations can be performed right away.
    pub(crate) fn is_ready(&self) -> bool {
        self.metadata_loaded
    }

    /// Perform a seek, that is, move the current position to another one.
    ///
    /// If the media element is not ready yet, the seek is postponed until metadata is loaded.
    /// A later seek replaces a queued one.
    ///
    /// The boolean returned indicates if the seek was able to be performed synchronously.
    pub(crate) fn seek(&mut self, position: f64) -> bool {
        if self.is_ready() {
            self.queued_seek = None;
            self.sink.seek(position);
            true
        } else {
            Logger::debug(&format!("ME: Queuing seek to {position} until metadata is loaded"));
            self.queued_seek = Some(position);
            false
        }
    }

    /// Method to call once the media element announced that its metadata is loaded.
    ///
    /// Performs the queued seek if one, clamped to `duration` when it is known, and returns
    /// the position actually sought to.
    pub(crate) fn on_metadata_loaded(&mut self, duration: f64) -> Option<f64> {
        self.metadata_loaded = true;
        let position = self.queued_seek.take()?;
        let position = if duration > 0. {
            position.min(duration)
        } else {
            position
        };
        Logger::info(&format!("ME: Performing queued seek to {position}"));
        self.sink.seek(position);
        Some(position)
    }

    pub(crate) fn sink(&self) -> &dyn MediaSink {
        self.sink.as_ref()
    }

    pub(crate) fn sink_mut(&mut self) -> &mut dyn MediaSink {
        self.sink.as_mut()
    }
}
