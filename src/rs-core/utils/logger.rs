use std::sync::atomic::{AtomicU8, Ordering};

use crate::{bindings::LogLevel, wasm_bindgen};

static MAX_LOG_LEVEL: AtomicU8 = AtomicU8::new(LoggerLevel::Warn as u8);

/// Maximum level of logs which will be emitted.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum LoggerLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

/// Logging facade of the player.
///
/// On WebAssembly targets, logs are forwarded to the JavaScript console through `jsLog`. On
/// every other target (tests, native embedders) they are emitted as `tracing` events with the
/// `vqa_player` target.
pub struct Logger {}

impl Logger {
    pub fn set_logger_level(new_level: LoggerLevel) {
        MAX_LOG_LEVEL.store(new_level as u8, Ordering::Relaxed);
    }

    pub fn info(text: &str) {
        if Self::enabled(LoggerLevel::Info) {
            emit(LogLevel::Info, text);
        }
    }

    pub fn error(text: &str) {
        if Self::enabled(LoggerLevel::Error) {
            emit(LogLevel::Error, text);
        }
    }

    pub fn warn(text: &str) {
        if Self::enabled(LoggerLevel::Warn) {
            emit(LogLevel::Warn, text);
        }
    }

    pub fn debug(text: &str) {
        if Self::enabled(LoggerLevel::Debug) {
            emit(LogLevel::Debug, text);
        }
    }

    pub fn lazy_info(func: &dyn Fn() -> String) {
        if Self::enabled(LoggerLevel::Info) {
            emit(LogLevel::Info, &func());
        }
    }

    #[inline(always)]
    fn enabled(level: LoggerLevel) -> bool {
        MAX_LOG_LEVEL.load(Ordering::Relaxed) >= level as u8
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, text: &str) {
    crate::bindings::jsLog(level, text);
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: LogLevel, text: &str) {
    match level {
        LogLevel::Error => tracing::error!(target: "vqa_player", "{text}"),
        LogLevel::Warn => tracing::warn!(target: "vqa_player", "{text}"),
        LogLevel::Info => tracing::info!(target: "vqa_player", "{text}"),
        LogLevel::Debug => tracing::debug!(target: "vqa_player", "{text}"),
    }
}
