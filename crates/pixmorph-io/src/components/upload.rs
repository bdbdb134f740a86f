//! File selector with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use pixmorph_effects::{ImageMime, SelectedFile};

/// Props for the [`FileSelector`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileSelectorProps {
    /// Called with the accepted file. Never called for rejected files.
    on_select: EventHandler<SelectedFile>,
}

/// A drag-and-drop zone with a file picker button.
///
/// Accepts JPEG, PNG and WebP by declared MIME type. A file of any
/// other type is rejected with an inline notice and not forwarded, so
/// the caller's state is untouched.
#[component]
pub fn FileSelector(props: FileSelectorProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut filename = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);

    // Shared by the picker and drop paths.
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            return;
        };
        let name = file.name();
        let declared = file.content_type().unwrap_or_default();
        if ImageMime::from_mime(&declared).is_none() {
            warn!(%name, %declared, "rejected file with unsupported type");
            error.set(Some(format!("Unsupported image type: {name}")));
            return;
        }
        let bytes = match file.read_bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error.set(Some(format!("Failed to read file: {e}")));
                return;
            }
        };
        match SelectedFile::new(name.clone(), &declared, bytes.to_vec()) {
            Ok(selected) => {
                info!(%name, %declared, len = selected.len(), "file selected");
                filename.set(Some(name));
                error.set(None);
                props.on_select.call(selected);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let zone_class = if dragging() {
        "drop-zone drop-zone--active"
    } else {
        "drop-zone"
    };

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref name) = filename() {
                p { class: "text-success", "Loaded: {name}" }
            }

            if let Some(ref err) = error() {
                p { class: "text-error", role: "alert", "{err}" }
            }

            label { class: "btn btn-primary",
                input {
                    r#type: "file",
                    accept: ImageMime::ACCEPT,
                    class: "hidden",
                    onchange: handle_files,
                }
                "Choose File"
            }

            p { class: "text-muted text-small", "or drop an image here (JPEG, PNG, WebP)" }
        }
    }
}
