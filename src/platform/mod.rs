//! Platform abstraction layer
//!
//! Handles browser/native differences for the wall clock. Storage lives
//! with the types that own their LocalStorage keys ([`Settings`] and
//! [`Progress`]).
//!
//! [`Settings`]: crate::Settings
//! [`Progress`]: crate::Progress

/// Wall-clock time in milliseconds since the Unix epoch (WASM)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Wall-clock time in milliseconds since the Unix epoch (native)
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
