//! Image preview for an object URL.

use dioxus::prelude::*;

/// Props for the [`ImagePreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImagePreviewProps {
    /// Section heading.
    #[props(into)]
    title: String,
    /// `blob:` URL of the image. Owned elsewhere; not revoked here.
    #[props(into)]
    src: String,
    /// Alternative text for the image.
    #[props(into)]
    alt: String,
}

/// A titled image, scaled to fit its container while keeping aspect ratio.
#[component]
pub fn ImagePreview(props: ImagePreviewProps) -> Element {
    rsx! {
        section { class: "preview",
            h3 { class: "preview__title", "{props.title}" }
            img {
                class: "preview__image",
                src: "{props.src}",
                alt: "{props.alt}",
            }
        }
    }
}
