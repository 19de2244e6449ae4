use wasm_bindgen::prelude::*;

mod bindings;
pub mod captions;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod media_element;
pub mod quality;
pub mod references;
pub mod streaming;
mod utils;
pub mod view;

#[cfg(test)]
mod testing;

pub use bindings::{SessionId, TextTrackMode};
pub use utils::{
    logger::{Logger, LoggerLevel},
    time_ranges::TimeRanges,
    url::Url,
};
