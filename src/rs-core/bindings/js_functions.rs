use crate::wasm_bindgen;

/// # js_functions
///
/// This file lists all JavaScript functions that are callable from Rust as well as
/// struct and enumeration used by those functions.
///
/// Every function linked to a streaming session receives the `SessionId` of that session so
/// the JavaScript-side can tag the events it sends back with it. Events tagged with an id
/// which is not the current one are ignored by the `Dispatcher`.

#[wasm_bindgen]
extern "C" {
    // Log the given text in the JavaScript console, with the log level given.
    pub fn jsLog(log_level: LogLevel, log: &str);

    // Returns `true` if the adaptive streaming engine (e.g. MediaSource-based) can run in the
    // current environment.
    pub fn jsIsEngineSupported() -> bool;

    // Create a streaming engine instance for the given session, make it load the Multivariant
    // Playlist at `url` and attach it to the media element linked to this `Dispatcher`.
    //
    // Once the playlist is parsed, `on_levels_available` will be called with the same
    // `session_id`. Level changes are then reported through `on_level_switched` and fatal
    // errors through `on_session_error`.
    pub fn jsCreateEngineSession(session_id: SessionId, url: &str) -> AttachStreamResult;

    // Pin the rendition whose index is given (`-1` to let the engine choose).
    pub fn jsSetEngineLevel(session_id: SessionId, level: i32);

    // Destroy the engine instance created for `session_id` and synchronously remove every
    // event listener it registered, freeing its buffers, workers and pending requests.
    pub fn jsDestroyEngineSession(session_id: SessionId);

    // Returns `true` if the media element can directly play content of the given mime-type.
    pub fn jsCanPlayType(mime_type: &str) -> bool;

    // Directly set the `src` attribute of the media element. Media events sent afterwards
    // should be tagged with `session_id`.
    pub fn jsSetMediaSource(session_id: SessionId, url: &str);

    // Remove the `src` of the media element (if one), stop loading and remove media event
    // listeners registered for the previous source.
    pub fn jsRemoveMediaSource();

    // Call `HTMLMediaElement.prototype.play`. A rejected play promise is reported through a
    // later `on_pause` call.
    pub fn jsPlay();

    // Call `HTMLMediaElement.prototype.pause`.
    pub fn jsPause();

    // Set the `currentTime` of the media element.
    pub fn jsSeek(position: f64);

    // Set the `volume` of the media element, from `0` to `1`.
    pub fn jsSetVolume(volume: f64);

    // Set the `muted` attribute of the media element, without changing its volume.
    pub fn jsSetMuted(muted: bool);

    // Request fullscreen mode on the element containing the media element.
    pub fn jsRequestFullscreen();

    // Exit fullscreen mode if enabled.
    pub fn jsExitFullscreen();

    // Add a `<track kind="subtitles">` to the media element.
    pub fn jsAddTextTrack(language: &str, label: &str, url: &str, is_default: bool);

    // Remove all text tracks previously added through `jsAddTextTrack`.
    pub fn jsRemoveTextTracks();

    // Set the mode of the text track at the given index (in `jsAddTextTrack` call order).
    pub fn jsSetTextTrackMode(track_index: u32, mode: TextTrackMode);

    // Communicate the current playback position to the time-tracking collaborator.
    pub fn jsAnnounceTimeUpdate(current_time: f64);

    // Communicate the list of available quality levels, formatted through
    // `format_levels_for_js`.
    pub fn jsAnnounceLevels(levels_info: Vec<u32>);

    // Communicate a new view model, serialized as JSON.
    pub fn jsAnnouncePlaybackState(view_model: &str);

    // Announce that playback is unavailable for the current session.
    pub fn jsSendSessionError(code: SessionErrorCode, message: Option<&str>);
}

/// Identifier of a streaming session, unique for the lifetime of the `Dispatcher`.
pub type SessionId = u32;

/// Levels with which a log can be emitted.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum LogLevel {
    /// Log level reserved for very important errors and highly unexpected events.
    Error = 0,

    /// Log level reserved for less important errors and unexpected events.
    Warn = 1,

    /// Log level reserved for important events
    Info = 2,

    /// Log level used when debugging. Small-ish yet impactful events should be logged with it.
    Debug = 3,
}

/// Mode a text track can be set to.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTrackMode {
    Hidden = 0,
    Showing = 1,
}

/// Code identifying a fatal session error, both when sent to and received from JavaScript.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionErrorCode {
    /// The Multivariant Playlist could not be fetched or parsed.
    ManifestError = 0,
    /// Neither the streaming engine nor the media element can play the content.
    NoPlaybackCapability = 1,
    /// The streaming engine could not be attached to the media element.
    AttachError = 2,
}

/// Errors that can arise when attempting to attach a streaming engine to the media element.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachStreamErrorCode {
    /// The engine is not supported in this environment.
    EngineUnavailable,

    /// Could not attach the engine because of an unknown error.
    UnknownError,
}

/// Result of calling the `jsCreateEngineSession` JavaScript function.
///
/// Creation of an `AttachStreamResult` should only be performed by the JavaScript side
/// through the exposed static constructors.
#[wasm_bindgen]
pub struct AttachStreamResult {
    error: Option<(AttachStreamErrorCode, Option<String>)>,
}

#[wasm_bindgen]
impl AttachStreamResult {
    /// Creates an `AttachStreamResult` indicating success.
    ///
    /// This function should only be called by the JavaScript-side.
    pub fn success() -> Self {
        Self { error: None }
    }

    /// Creates an `AttachStreamResult` indicating failure, with the corresponding error.
    ///
    /// This function should only be called by the JavaScript-side.
    pub fn error(err: AttachStreamErrorCode, desc: Option<String>) -> Self {
        Self {
            error: Some((err, desc)),
        }
    }
}

impl JsResult<(), AttachStreamErrorCode> for AttachStreamResult {
    /// Basically unwrap and consume the `AttachStreamResult`, converting it into a
    /// Result enum.
    fn result(self) -> Result<(), (AttachStreamErrorCode, Option<String>)> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Trait allowing to convert "JavaScript Results" as exposed by the JavaScript functions into
/// `Result` structs more idiomatic to Rust.
pub(crate) trait JsResult<T, E> {
    fn result(self) -> Result<T, (E, Option<String>)>;
}
