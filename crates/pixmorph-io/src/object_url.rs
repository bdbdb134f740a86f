//! Blob-backed object URLs that revoke themselves on drop.
//!
//! Previews and results are displayed through `blob:` URLs. Holding
//! them in an [`ObjectUrl`] ties the URL's lifetime to the Rust value:
//! when the session replaces or drops a handle, the browser memory
//! behind it is released.

use std::fmt;

use pixmorph_effects::SelectedFile;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur while creating an object URL.
#[derive(Debug, thiserror::Error)]
pub enum ObjectUrlError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ObjectUrlError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// An owned `blob:` URL. Revoked when dropped.
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    /// Create an object URL for an existing `Blob`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectUrlError::JsError`] if `URL.createObjectURL` fails.
    pub fn from_blob(blob: &web_sys::Blob) -> Result<Self, ObjectUrlError> {
        let url = web_sys::Url::create_object_url_with_blob(blob)?;
        Ok(Self { url })
    }

    /// Wrap `bytes` in a `Blob` of type `mime_type` and create an object
    /// URL for it.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectUrlError::JsError`] if Blob or URL creation fails.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, ObjectUrlError> {
        let blob = bytes_to_blob(bytes, mime_type)?;
        Self::from_blob(&blob)
    }

    /// Object URL for the selected file, used as the original preview.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectUrlError::JsError`] if Blob or URL creation fails.
    pub fn for_file(file: &SelectedFile) -> Result<Self, ObjectUrlError> {
        Self::from_bytes(file.bytes(), file.mime().as_str())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        // Best-effort: the URL may already be gone with its document.
        let _ = web_sys::Url::revoke_object_url(&self.url);
    }
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectUrl").field(&self.url).finish()
    }
}

/// Copy `bytes` into a new `Blob` with the given MIME type.
///
/// # Errors
///
/// Returns [`ObjectUrlError::JsError`] if the `Blob` constructor fails.
pub fn bytes_to_blob(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, ObjectUrlError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    Ok(blob)
}
