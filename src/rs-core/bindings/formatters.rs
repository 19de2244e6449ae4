use crate::{quality::QualityLevel, streaming::SessionError};

use super::{AttachStreamErrorCode, SessionErrorCode};

/// Format quality levels into the flat array given to `jsAnnounceLevels`:
/// the number of levels followed, for each level, by its height then its bitrate.
pub(crate) fn format_levels_for_js(levels: &[QualityLevel]) -> Vec<u32> {
    let mut ret: Vec<u32> = Vec::with_capacity(1 + levels.len() * 2);
    ret.push(levels.len() as u32);
    levels.iter().for_each(|l| {
        ret.push(l.vertical_resolution());
        ret.push(l.bitrate());
    });
    ret
}

/// Build quality levels from the heights and bitrates announced by the streaming engine, in
/// Multivariant Playlist order.
///
/// A missing bitrate is considered to be `0`.
pub(crate) fn parse_levels_from_js(heights: &[u32], bitrates: &[u32]) -> Vec<QualityLevel> {
    heights
        .iter()
        .enumerate()
        .map(|(idx, height)| {
            let bitrate = bitrates.get(idx).copied().unwrap_or(0);
            QualityLevel::new(idx, *height, bitrate)
        })
        .collect()
}

pub(crate) fn format_session_error_for_js(err: &SessionError) -> (SessionErrorCode, String) {
    let code = match err {
        SessionError::Manifest { .. } => SessionErrorCode::ManifestError,
        SessionError::NoPlaybackCapability => SessionErrorCode::NoPlaybackCapability,
        SessionError::Attach { .. } => SessionErrorCode::AttachError,
    };
    (code, err.to_string())
}

pub(crate) fn parse_session_error_from_js(
    code: SessionErrorCode,
    message: Option<String>,
) -> SessionError {
    let message = message.unwrap_or_else(|| "Unknown error".to_owned());
    match code {
        SessionErrorCode::ManifestError => SessionError::Manifest { message },
        SessionErrorCode::NoPlaybackCapability => SessionError::NoPlaybackCapability,
        SessionErrorCode::AttachError => SessionError::Attach { message },
    }
}

pub(crate) fn parse_attach_error_from_js(
    code: AttachStreamErrorCode,
    desc: Option<String>,
) -> SessionError {
    match code {
        AttachStreamErrorCode::EngineUnavailable => SessionError::NoPlaybackCapability,
        AttachStreamErrorCode::UnknownError => SessionError::Attach {
            message: desc.unwrap_or_else(|| "Unknown error".to_owned()),
        },
    }
}
