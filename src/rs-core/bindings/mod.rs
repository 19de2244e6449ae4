pub mod formatters;
mod js_functions;
mod js_media;

pub use js_functions::*;
pub(crate) use js_media::{JsMediaSink, JsPlaybackObserver, JsStreamingEngine};
