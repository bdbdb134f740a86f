//! Result panel with the transformed image and a download button.

use dioxus::logger::tracing::warn;
use dioxus::prelude::*;
use pixmorph_effects::DOWNLOAD_FILENAME;

use crate::components::ImagePreview;
use crate::download;

/// Props for the [`ResultPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultPanelProps {
    /// `blob:` URL of the current result, owned by the session.
    #[props(into)]
    src: String,
}

/// Shows the current result and offers it as `transformed.png`.
///
/// Callers key this component by `src` so a new result starts with no
/// stale download error.
#[component]
pub fn ResultPanel(props: ResultPanelProps) -> Element {
    let mut download_error = use_signal(|| Option::<String>::None);

    let on_download = {
        let src = props.src.clone();
        move |_| match download::trigger_download(&src, DOWNLOAD_FILENAME) {
            Ok(()) => download_error.set(None),
            Err(e) => {
                warn!("download failed: {e}");
                download_error.set(Some(format!("Download failed: {e}")));
            }
        }
    };

    rsx! {
        div { class: "result",
            ImagePreview {
                title: "Transformed Result",
                src: props.src.clone(),
                alt: "Transformed result",
            }

            if let Some(ref err) = download_error() {
                p { class: "text-error text-small", role: "alert", "{err}" }
            }

            button {
                class: "btn btn-primary",
                title: "Save as {DOWNLOAD_FILENAME}",
                onclick: on_download,
                "Download Image"
            }
        }
    }
}
