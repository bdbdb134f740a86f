//! pixmorph-cli: native client for the image effect server.
//!
//! Sends the same multipart requests as the web application, so an
//! effect can be applied from a shell or a script.

pub mod client;

pub use client::{ClientError, EffectClient};
