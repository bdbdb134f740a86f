//! pixmorph-io: Browser I/O and Dioxus component library.
//!
//! Handles file selection, multipart effect requests over `fetch`,
//! object-URL lifetimes, request cancellation, and result downloads,
//! and provides the UI components of the pixmorph web application.

pub mod api;
pub mod cancel;
pub mod components;
pub mod download;
pub mod object_url;
pub mod viewport;

pub use cancel::AbortScope;
pub use components::{EffectTrigger, FileSelector, ImagePreview, ResultPanel};
pub use object_url::ObjectUrl;
