//! Error types shared by every pixmorph front end.

use crate::effect::{Effect, EffectRequest};

/// A file was rejected before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    /// The declared MIME type (or, natively, the extension) is not on
    /// the allow-list.
    #[error("Unsupported image type for {name:?}: {mime:?} (expected JPEG, PNG or WebP)")]
    UnsupportedType {
        /// Filename as provided by the user.
        name: String,
        /// Declared MIME type, or the extension when no type was declared.
        mime: String,
    },
}

/// Errors building or executing an effect request.
///
/// The `Status` and `Transport` variants always name the request (and
/// thus the effect and style) so they can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    /// The identifier does not name any effect.
    #[error("unknown effect: {0:?}")]
    UnknownEffect(String),

    /// A parameterized effect was requested without a style.
    #[error("{0} requires a style")]
    MissingStyle(Effect),

    /// A plain effect was requested with a style.
    #[error("{0} does not take a style")]
    UnexpectedStyle(Effect),

    /// The style is not in the effect's closed set.
    #[error("unknown {effect} style: {style:?}")]
    UnknownStyle {
        /// The effect being parameterized.
        effect: Effect,
        /// The rejected style identifier.
        style: String,
    },

    /// The backend answered with a non-success status.
    #[error("Failed to apply {request}: server returned HTTP {status}")]
    Status {
        /// The request that failed.
        request: EffectRequest,
        /// HTTP status code.
        status: u16,
    },

    /// The request never produced a usable response.
    #[error("Failed to apply {request}: {message}")]
    Transport {
        /// The request that failed.
        request: EffectRequest,
        /// Description of the underlying failure.
        message: String,
    },
}

impl EffectError {
    /// The request this error belongs to, for request-level failures.
    #[must_use]
    pub const fn request(&self) -> Option<EffectRequest> {
        match self {
            Self::Status { request, .. } | Self::Transport { request, .. } => Some(*request),
            _ => None,
        }
    }
}
