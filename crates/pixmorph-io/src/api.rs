//! Effect requests over the browser `fetch` API.
//!
//! Each call is one multipart `POST` carrying the selected file in the
//! `file` field. The response body is taken as an opaque image `Blob`
//! and handed back as an [`ObjectUrl`]; nothing is decoded or checked.
//! No timeout, retry or streaming.

use pixmorph_effects::{ClientConfig, EffectError, EffectRequest, SelectedFile, UPLOAD_FIELD};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

use crate::object_url::{ObjectUrl, bytes_to_blob};

/// Post `file` to the endpoint of `request` and return the result image.
///
/// `signal` ties the request to an [`AbortScope`](crate::AbortScope);
/// aborting it rejects the fetch, which surfaces here as a transport
/// error.
///
/// # Errors
///
/// Returns [`EffectError::Status`] for a non-2xx response and
/// [`EffectError::Transport`] when the request cannot be built or sent,
/// is aborted, or the body cannot be read. Both name the request.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JS handles are !Send
pub async fn apply_effect(
    config: &ClientConfig,
    file: &SelectedFile,
    request: EffectRequest,
    signal: Option<&web_sys::AbortSignal>,
) -> Result<ObjectUrl, EffectError> {
    let fail = |e: JsValue| request.transport_error(describe_js_error(&e));

    let window = web_sys::window().ok_or_else(|| request.transport_error("no global window"))?;

    let form = FormData::new().map_err(fail)?;
    let blob = bytes_to_blob(file.bytes(), file.mime().as_str())
        .map_err(|e| request.transport_error(e))?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, file.name())
        .map_err(fail)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_body(&form);
    if let Some(signal) = signal {
        init.set_signal(Some(signal));
    }

    let url = config.endpoint(request);
    let http_request = Request::new_with_str_and_init(&url, &init).map_err(fail)?;

    let response: Response = JsFuture::from(window.fetch_with_request(&http_request))
        .await
        .map_err(fail)?
        .dyn_into()
        .map_err(fail)?;

    request.check_status(response.status())?;

    let body: web_sys::Blob = JsFuture::from(response.blob().map_err(fail)?)
        .await
        .map_err(fail)?
        .dyn_into()
        .map_err(fail)?;

    ObjectUrl::from_blob(&body).map_err(|e| request.transport_error(e))
}

/// Human-readable message for a rejected promise or thrown JS value.
///
/// `fetch` rejects with a `TypeError` for network failures and a
/// `DOMException` named `AbortError` when aborted; both carry a message.
fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
