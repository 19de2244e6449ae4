use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use super::PlaybackController;
use crate::{
    references::{parse_reference_segments, ReferenceSegment},
    wasm_bindgen, Logger,
};

/// Capability handed to collaborators (such as the question-answering panel) allowing them to
/// seek in the current content, and to do nothing else.
///
/// It does not keep the `PlaybackController` alive: once the latter is dropped, seeking
/// through the handle does nothing.
#[wasm_bindgen]
#[derive(Clone)]
pub struct SeekHandle {
    controller: Weak<RefCell<PlaybackController>>,
    /// Called with the controller after each transmitted seek.
    on_seeked: Option<Rc<dyn Fn(&PlaybackController)>>,
}

impl SeekHandle {
    pub fn new(controller: &Rc<RefCell<PlaybackController>>) -> Self {
        Self {
            controller: Rc::downgrade(controller),
            on_seeked: None,
        }
    }

    /// Same as `new`, with `on_seeked` being called with the updated controller each time a
    /// seek went through.
    pub fn with_announcer(
        controller: &Rc<RefCell<PlaybackController>>,
        on_seeked: impl Fn(&PlaybackController) + 'static,
    ) -> Self {
        let on_seeked: Rc<dyn Fn(&PlaybackController)> = Rc::new(on_seeked);
        Self {
            controller: Rc::downgrade(controller),
            on_seeked: Some(on_seeked),
        }
    }

    /// Seek to the start of the given reference segment and resume playback.
    pub fn seek_to_reference(&self, segment: &ReferenceSegment) -> bool {
        Logger::debug(&format!("SH: Seeking to reference {}", segment.label()));
        self.seek_to(segment.start_time)
    }
}

#[wasm_bindgen]
impl SeekHandle {
    /// Seek to the given position in seconds and resume playback.
    ///
    /// Returns `false` if the seek could not be transmitted: the player is gone or currently
    /// processing another call.
    pub fn seek_to(&self, seconds: f64) -> bool {
        let shared = match self.controller.upgrade() {
            Some(shared) => shared,
            None => {
                Logger::debug("SH: Player disposed, ignoring seek");
                return false;
            }
        };
        let mut controller = match shared.try_borrow_mut() {
            Ok(controller) => controller,
            Err(_) => {
                Logger::warn("SH: Seek requested while the player is busy, ignoring it");
                return false;
            }
        };
        controller.seek_to(seconds);
        if let Some(on_seeked) = &self.on_seeked {
            on_seeked(&controller);
        }
        true
    }

    /// Seek to the start of the `index`-th segment referred to by the given JSON answer of the
    /// question-answering service, and resume playback.
    pub fn seek_to_answer_segment(&self, answer_json: &str, index: usize) -> bool {
        match parse_reference_segments(answer_json) {
            Ok(segments) => match segments.get(index) {
                Some(segment) => self.seek_to_reference(segment),
                None => {
                    Logger::warn(&format!("SH: No reference segment at index {index}"));
                    false
                }
            },
            Err(err) => {
                Logger::warn(&format!("SH: Invalid answer payload: {err}"));
                false
            }
        }
    }
}
