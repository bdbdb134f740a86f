//! pixmorph-effects: effect catalogue and client session state (sans-IO).
//!
//! Describes the backend contract (which effects exist, which styles
//! they take, which endpoint each request posts to) and the state a
//! client keeps while the user picks a file and applies effects to it.
//!
//! This crate has **no I/O dependencies**. The browser front end lives
//! in `pixmorph-io`; the native client in `pixmorph-cli`.

pub mod config;
pub mod effect;
pub mod error;
pub mod file;
pub mod session;

pub use config::{ClientConfig, DEFAULT_BASE_URL, HealthStatus};
pub use effect::{
    Effect, EffectRequest, EffectSummary, HEALTH_PATH, PixelStyle, Style, TransferStyle,
    UPLOAD_FIELD,
};
pub use error::{EffectError, FileError};
pub use file::{DOWNLOAD_FILENAME, ImageMime, SelectedFile};
pub use session::{Completion, Session, Staleness, Ticket, TriggerPhase};
