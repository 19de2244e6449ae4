use std::fmt::Display;

/// Path, relative to the streaming base URL, at which a video's Multivariant Playlist lives.
const MANIFEST_PATH_TEMPLATE: &str = "/hls/{video_id}/master.m3u8";

/// Path, relative to the streaming base URL, at which a video's WebVTT subtitles live.
const SUBTITLE_PATH_TEMPLATE: &str = "/subtitles/{video_id}/subtitles_{lang}.vtt";

/// Abstraction allowing to help with the handling of URLs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    inner: String,
}

impl Url {
    pub fn new(url: String) -> Self {
        Self { inner: url }
    }

    /// Build the URL of the Multivariant Playlist for the video whose id is given.
    pub fn for_manifest(streaming_base: &str, video_id: &str) -> Self {
        let path = MANIFEST_PATH_TEMPLATE.replace("{video_id}", video_id);
        Url::from_relative(streaming_base, Url::new(path))
    }

    /// Build the URL of the WebVTT subtitle file in the `lang` language for the video whose id
    /// is given.
    pub fn for_subtitles(streaming_base: &str, video_id: &str, lang: &str) -> Self {
        let path = SUBTITLE_PATH_TEMPLATE
            .replace("{video_id}", video_id)
            .replace("{lang}", lang);
        Url::from_relative(streaming_base, Url::new(path))
    }

    /// Resolve `relative_url` against `base_url`.
    ///
    /// A relative URL beginning with `/` is resolved against the domain of `base_url` when it
    /// is absolute, and simply appended to it otherwise.
    pub fn from_relative(base_url: &str, relative_url: Url) -> Self {
        if base_url.is_empty() || relative_url.is_absolute() {
            return relative_url;
        }
        let base_ends_with_slash = base_url.ends_with('/');
        if let Some(stripped) = relative_url.inner.strip_prefix('/') {
            let complete_url = match url_domain_name(base_url) {
                Some(base_domain) if base_domain.len() < base_url.trim_end_matches('/').len() => {
                    // base URL with its own path component
                    if base_ends_with_slash {
                        format!("{}{}", base_url, stripped)
                    } else {
                        format!("{}/{}", base_url, stripped)
                    }
                }
                Some(base_domain) => format!("{}/{}", base_domain.trim_end_matches('/'), stripped),
                None if base_ends_with_slash => format!("{}{}", base_url, stripped),
                None => format!("{}/{}", base_url, stripped),
            };
            Url {
                inner: complete_url,
            }
        } else if base_ends_with_slash {
            Url {
                inner: format!("{}{}", base_url, relative_url),
            }
        } else {
            Url {
                inner: format!("{}/{}", base_url, relative_url),
            }
        }
    }

    pub fn get_ref(&self) -> &str {
        self.inner.as_str()
    }

    pub fn is_absolute(&self) -> bool {
        is_absolute_url(self.inner.as_bytes())
    }
}

impl Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_ref())
    }
}

fn is_absolute_url(bytes: &[u8]) -> bool {
    let mut offset = 0;
    loop {
        match bytes.get(offset) {
            Some(b) if b.is_ascii_alphabetic() => offset += 1,
            Some(b':') if offset > 0 => {
                offset += 1;
                break;
            }
            _ => return false,
        }
    }
    bytes.len() >= offset + 2 && &bytes[offset..offset + 2] == b"//"
}

/// Returns the scheme and authority part of an absolute URL (e.g. `http://localhost:8080`).
fn url_domain_name(url: &str) -> Option<&str> {
    if !is_absolute_url(url.as_bytes()) {
        return None;
    }
    let authority_start = url.find("//")? + 2;
    match url[authority_start..].find('/') {
        Some(slash_idx) => Some(&url[0..authority_start + slash_idx]),
        None => Some(url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_url() {
        assert_eq!(
            Url::for_manifest("http://localhost:8080", "42").get_ref(),
            "http://localhost:8080/hls/42/master.m3u8"
        );
        assert_eq!(
            Url::for_manifest("http://localhost:8080/", "42").get_ref(),
            "http://localhost:8080/hls/42/master.m3u8"
        );
        assert_eq!(
            Url::for_manifest("https://cdn.example.com/media", "abc").get_ref(),
            "https://cdn.example.com/media/hls/abc/master.m3u8"
        );
    }

    #[test]
    fn test_subtitle_url() {
        assert_eq!(
            Url::for_subtitles("http://localhost:8080", "7", "es").get_ref(),
            "http://localhost:8080/subtitles/7/subtitles_es.vtt"
        );
    }

    #[test]
    fn test_from_relative() {
        assert_eq!(
            Url::from_relative("", Url::new("/a.m3u8".to_owned())).get_ref(),
            "/a.m3u8"
        );
        assert_eq!(
            Url::from_relative("http://a.com", Url::new("http://b.com/x".to_owned())).get_ref(),
            "http://b.com/x"
        );
        assert_eq!(
            Url::from_relative("/streams", Url::new("/x.vtt".to_owned())).get_ref(),
            "/streams/x.vtt"
        );
        assert_eq!(
            Url::from_relative("http://a.com/dir/", Url::new("x.vtt".to_owned())).get_ref(),
            "http://a.com/dir/x.vtt"
        );
    }

    #[test]
    fn test_is_absolute() {
        assert!(Url::new("http://localhost:8080".to_owned()).is_absolute());
        assert!(Url::new("https://a.b/c".to_owned()).is_absolute());
        assert!(!Url::new("/hls/1/master.m3u8".to_owned()).is_absolute());
        assert!(!Url::new(":://nope".to_owned()).is_absolute());
    }
}
