//! Request cancellation tied to the current file selection.
//!
//! One [`AbortScope`] exists per selected file. Every effect request
//! started for that file carries the scope's signal; replacing or
//! dropping the scope aborts all of them at once.

use wasm_bindgen::JsValue;

/// Errors that can occur when creating an abort scope.
#[derive(Debug, thiserror::Error)]
pub enum CancelError {
    /// `new AbortController()` threw.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for CancelError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Owns an `AbortController`; aborts it on drop.
pub struct AbortScope {
    controller: web_sys::AbortController,
}

impl AbortScope {
    /// Create a fresh, un-aborted scope.
    ///
    /// # Errors
    ///
    /// Returns [`CancelError::JsError`] if the controller cannot be created.
    pub fn new() -> Result<Self, CancelError> {
        let controller = web_sys::AbortController::new()?;
        Ok(Self { controller })
    }

    /// Signal to attach to requests belonging to this scope.
    #[must_use]
    pub fn signal(&self) -> web_sys::AbortSignal {
        self.controller.signal()
    }

    /// Abort every request carrying this scope's signal.
    ///
    /// Idempotent.
    pub fn abort(&self) {
        self.controller.abort();
    }
}

impl Drop for AbortScope {
    fn drop(&mut self) {
        self.abort();
    }
}
