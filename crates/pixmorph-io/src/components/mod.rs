//! Dioxus UI components for pixmorph.
//!
//! Provides the file selector, the parameterized effect trigger, the
//! image preview, and the result panel with its download button.

mod effect_trigger;
mod preview;
mod result;
mod upload;

pub use effect_trigger::EffectTrigger;
pub use preview::ImagePreview;
pub use result::ResultPanel;
pub use upload::FileSelector;
