//! Effect catalogue and endpoint templating.
//!
//! Every server-side transformation is an [`Effect`]. Two of them
//! (style transfer and pixel art) take a [`Style`] from a closed set;
//! the rest are plain. An [`EffectRequest`] pairs an effect with its
//! style and knows the backend path it posts to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EffectError;

/// Path of the backend liveness probe.
pub const HEALTH_PATH: &str = "/health";

/// Name of the multipart field carrying the uploaded image.
pub const UPLOAD_FIELD: &str = "file";

/// A named server-side image transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    /// Pencil sketch in grayscale.
    GraySketch,
    /// Pencil sketch keeping the source colors.
    ColorSketch,
    /// Cut-out sticker with a white border.
    Sticker,
    /// Cartoon rendering.
    Cartoon,
    /// Glowing neon edges on a dark background.
    NeonGlow,
    /// Comic-book inks and halftone.
    ComicArt,
    /// Black-and-white manga screentone.
    Manga,
    /// Posterized pop-art palette.
    PopArt,
    /// Neural style transfer; takes a [`TransferStyle`].
    StyleTransfer,
    /// Retro pixelation; takes a [`PixelStyle`].
    PixelArt,
}

const TRANSFER_STYLES: [Style; 4] = [
    Style::Transfer(TransferStyle::Candy),
    Style::Transfer(TransferStyle::Mosaic),
    Style::Transfer(TransferStyle::RainPrincess),
    Style::Transfer(TransferStyle::Udnie),
];

const PIXEL_STYLES: [Style; 4] = [
    Style::Pixel(PixelStyle::EightBit),
    Style::Pixel(PixelStyle::SixteenBit),
    Style::Pixel(PixelStyle::Modern),
    Style::Pixel(PixelStyle::Mosaic),
];

impl Effect {
    /// All effects in display order.
    pub const ALL: [Self; 10] = [
        Self::GraySketch,
        Self::ColorSketch,
        Self::Sticker,
        Self::Cartoon,
        Self::NeonGlow,
        Self::ComicArt,
        Self::Manga,
        Self::PopArt,
        Self::StyleTransfer,
        Self::PixelArt,
    ];

    /// Human-readable name, used on buttons and in failure notices.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GraySketch => "Gray Sketch",
            Self::ColorSketch => "Color Sketch",
            Self::Sticker => "Sticker",
            Self::Cartoon => "Cartoon",
            Self::NeonGlow => "Neon Glow",
            Self::ComicArt => "Comic Art",
            Self::Manga => "Manga",
            Self::PopArt => "Pop Art",
            Self::StyleTransfer => "Style Transfer",
            Self::PixelArt => "Pixel Art",
        }
    }

    /// First path segment of the effect's endpoint.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::GraySketch => "gray-sketch",
            Self::ColorSketch => "color-sketch",
            Self::Sticker => "sticker",
            Self::Cartoon => "cartoon",
            Self::NeonGlow => "neon-glow",
            Self::ComicArt => "comic-art",
            Self::Manga => "manga",
            Self::PopArt => "pop-art",
            Self::StyleTransfer => "style-transfer",
            Self::PixelArt => "pixel-art",
        }
    }

    /// The closed style set of a parameterized effect; empty otherwise.
    #[must_use]
    pub const fn styles(self) -> &'static [Style] {
        match self {
            Self::StyleTransfer => &TRANSFER_STYLES,
            Self::PixelArt => &PIXEL_STYLES,
            _ => &[],
        }
    }

    /// Whether requests for this effect must name a style.
    #[must_use]
    pub const fn is_parameterized(self) -> bool {
        !self.styles().is_empty()
    }

    /// Endpoint path with a `{style}` placeholder for parameterized effects.
    #[must_use]
    pub fn path_template(self) -> String {
        if self.is_parameterized() {
            format!("/{}/{{style}}/", self.slug())
        } else {
            format!("/{}/", self.slug())
        }
    }

    /// Every request this effect can issue: one for a plain effect,
    /// one per style for a parameterized effect.
    ///
    /// Each returned request identifies one independent trigger in the UI.
    #[must_use]
    pub fn requests(self) -> Vec<EffectRequest> {
        if self.is_parameterized() {
            self.styles()
                .iter()
                .map(|&style| EffectRequest {
                    effect: self,
                    style: Some(style),
                })
                .collect()
        } else {
            vec![EffectRequest {
                effect: self,
                style: None,
            }]
        }
    }

    /// Serializable description for listings.
    #[must_use]
    pub fn summary(self) -> EffectSummary {
        EffectSummary {
            effect: self,
            label: self.label(),
            path: self.path_template(),
            styles: self.styles().iter().map(|s| s.id()).collect(),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Effect {
    type Err = EffectError;

    /// Accepts the slug or the label, ignoring ASCII case and treating
    /// `_` and spaces as `-` (so `gray_sketch` and `Gray Sketch` both work).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|e| e.slug() == normalized)
            .ok_or_else(|| EffectError::UnknownEffect(s.to_owned()))
    }
}

/// Neural style-transfer presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStyle {
    Candy,
    Mosaic,
    RainPrincess,
    Udnie,
}

impl TransferStyle {
    /// Identifier used in the endpoint path.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Candy => "candy",
            Self::Mosaic => "mosaic",
            Self::RainPrincess => "rain_princess",
            Self::Udnie => "udnie",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Candy => "Candy",
            Self::Mosaic => "Mosaic",
            Self::RainPrincess => "Rain Princess",
            Self::Udnie => "Udnie",
        }
    }
}

/// Pixel-art resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelStyle {
    #[serde(rename = "8bit")]
    EightBit,
    #[serde(rename = "16bit")]
    SixteenBit,
    #[serde(rename = "modern")]
    Modern,
    #[serde(rename = "mosaic")]
    Mosaic,
}

impl PixelStyle {
    /// Identifier used in the endpoint path.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::EightBit => "8bit",
            Self::SixteenBit => "16bit",
            Self::Modern => "modern",
            Self::Mosaic => "mosaic",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EightBit => "8-bit",
            Self::SixteenBit => "16-bit",
            Self::Modern => "Modern",
            Self::Mosaic => "Mosaic",
        }
    }
}

/// A style belonging to one parameterized effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Transfer(TransferStyle),
    Pixel(PixelStyle),
}

impl Style {
    /// Identifier used in the endpoint path.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Transfer(s) => s.id(),
            Self::Pixel(s) => s.id(),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transfer(s) => s.label(),
            Self::Pixel(s) => s.label(),
        }
    }

    /// The effect this style parameterizes.
    #[must_use]
    pub const fn effect(self) -> Effect {
        match self {
            Self::Transfer(_) => Effect::StyleTransfer,
            Self::Pixel(_) => Effect::PixelArt,
        }
    }

    /// Parse a style identifier for `effect`, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::UnexpectedStyle`] if `effect` takes no
    /// style, or [`EffectError::UnknownStyle`] if `s` is not one of its
    /// identifiers.
    pub fn parse_for(effect: Effect, s: &str) -> Result<Self, EffectError> {
        if !effect.is_parameterized() {
            return Err(EffectError::UnexpectedStyle(effect));
        }
        let wanted = s.trim();
        effect
            .styles()
            .iter()
            .copied()
            .find(|style| style.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EffectError::UnknownStyle {
                effect,
                style: wanted.to_owned(),
            })
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One effect invocation: the effect plus its style, if it takes one.
///
/// Construction validates the pairing, so every `EffectRequest` maps to
/// exactly one backend endpoint. Requests are also the identity of a
/// trigger: two invocations with equal requests share one in-flight slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectRequest {
    effect: Effect,
    style: Option<Style>,
}

impl EffectRequest {
    /// Pair `effect` with `style`.
    ///
    /// # Errors
    ///
    /// - [`EffectError::MissingStyle`] if `effect` is parameterized and
    ///   `style` is `None`.
    /// - [`EffectError::UnexpectedStyle`] if `effect` is plain and a
    ///   style was given.
    /// - [`EffectError::UnknownStyle`] if `style` belongs to another effect.
    pub fn new(effect: Effect, style: Option<Style>) -> Result<Self, EffectError> {
        match style {
            None if effect.is_parameterized() => Err(EffectError::MissingStyle(effect)),
            Some(_) if !effect.is_parameterized() => Err(EffectError::UnexpectedStyle(effect)),
            Some(s) if s.effect() != effect => Err(EffectError::UnknownStyle {
                effect,
                style: s.id().to_owned(),
            }),
            _ => Ok(Self { effect, style }),
        }
    }

    #[must_use]
    pub const fn effect(self) -> Effect {
        self.effect
    }

    #[must_use]
    pub const fn style(self) -> Option<Style> {
        self.style
    }

    /// Endpoint path, e.g. `/cartoon/` or `/pixel-art/8bit/`.
    #[must_use]
    pub fn path(self) -> String {
        match self.style {
            Some(style) => format!("/{}/{}/", self.effect.slug(), style.id()),
            None => format!("/{}/", self.effect.slug()),
        }
    }

    /// Full endpoint URL under `base_url`.
    ///
    /// A trailing `/` on `base_url` is ignored.
    #[must_use]
    pub fn endpoint(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }

    /// Map an HTTP status code to the request outcome.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::Status`] naming this request for any
    /// status outside `200..=299`.
    pub fn check_status(self, status: u16) -> Result<(), EffectError> {
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(EffectError::Status {
                request: self,
                status,
            })
        }
    }

    /// Wrap a transport-level failure (network error, aborted fetch,
    /// unreadable body) into an error naming this request.
    #[must_use]
    pub fn transport_error(self, cause: impl fmt::Display) -> EffectError {
        EffectError::Transport {
            request: self,
            message: cause.to_string(),
        }
    }
}

impl fmt::Display for EffectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            Some(style) => write!(f, "{} ({})", self.effect.label(), style.id()),
            None => f.write_str(self.effect.label()),
        }
    }
}

/// Serializable catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectSummary {
    pub effect: Effect,
    pub label: &'static str,
    /// Endpoint path template (`{style}` marks the style segment).
    pub path: String,
    pub styles: Vec<&'static str>,
}
