use std::{cell::RefCell, rc::Rc};

use crate::{
    bindings::jsAnnouncePlaybackState, controller::PlaybackController,
    view::PlaybackViewModel, wasm_bindgen, Logger,
};

mod api;
mod event_listeners;

/// The `Dispatcher` is the player Interface exported to the JavaScript-side,
/// providing an API to load videos and control their playback.
///
/// It also receives, through its "event listeners", the events of the media element and of
/// the streaming engine, each tagged with the `SessionId` they relate to.
///
/// After each call changing the playback state, the new `PlaybackViewModel` is announced
/// through `jsAnnouncePlaybackState`.
#[wasm_bindgen]
pub struct Dispatcher {
    /// Shared so `SeekHandle`s can be given to collaborators. The `Dispatcher` is its only
    /// strong owner.
    controller: Rc<RefCell<PlaybackController>>,
}

impl Dispatcher {
    /// Run `func` on the `PlaybackController`, then announce the resulting state.
    ///
    /// Returns `None` without calling `func` if the controller is already borrowed, which
    /// happens when JavaScript calls back into the `Dispatcher` synchronously from one of the
    /// functions it imports.
    fn with_controller<T>(&self, func: impl FnOnce(&mut PlaybackController) -> T) -> Option<T> {
        let ret = match self.controller.try_borrow_mut() {
            Ok(mut controller) => func(&mut controller),
            Err(_) => {
                Logger::warn("Dispatcher: re-entrant call ignored");
                return None;
            }
        };
        self.announce_state();
        Some(ret)
    }

    fn announce_state(&self) {
        if let Ok(controller) = self.controller.try_borrow() {
            announce_view_model(&controller);
        }
    }
}

/// Send the `PlaybackViewModel` of `controller` to the JavaScript-side.
fn announce_view_model(controller: &PlaybackController) {
    match PlaybackViewModel::project(controller).to_json() {
        Ok(json) => jsAnnouncePlaybackState(&json),
        Err(err) => Logger::error(&format!("Dispatcher: could not serialize state: {err}")),
    }
}
