use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use pixmorph_effects::{
    ClientConfig, Completion, Effect, EffectRequest, SelectedFile, Session, TriggerPhase,
};
use pixmorph_io::{
    AbortScope, EffectTrigger, FileSelector, ImagePreview, ObjectUrl, ResultPanel, api, viewport,
};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the session (selected file, preview, current result, trigger
/// phases) and the abort scope of the current file, and wires them to
/// the file selector, the effect triggers and the result panel.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let config = use_hook(|| ClientConfig::from_override(option_env!("PIXMORPH_BASE_URL")));
    let mut session = use_signal(Session::<ObjectUrl>::new);
    // Aborting this cancels every request made for the current file.
    let mut scope = use_signal(|| Option::<AbortScope>::None);
    let mut selection_error = use_signal(|| Option::<String>::None);

    // --- File selection handler ---
    let on_select = move |file: SelectedFile| {
        let preview = match ObjectUrl::for_file(&file) {
            Ok(url) => url,
            Err(e) => {
                warn!("failed to create preview for {:?}: {e}", file.name());
                selection_error.set(Some(format!("Could not preview {}: {e}", file.name())));
                return;
            }
        };
        info!(
            name = file.name(),
            generation = session.peek().generation() + 1,
            "new selection"
        );
        selection_error.set(None);
        let file_name = file.name().to_owned();
        session.write().select_file(file, preview);
        // Replacing the scope drops the old one, aborting its requests.
        match AbortScope::new() {
            Ok(new_scope) => scope.set(Some(new_scope)),
            Err(e) => {
                warn!("requests for {:?} cannot be cancelled: {e}", file_name);
                scope.set(None);
            }
        }
        viewport::scroll_to_top();
    };

    // --- Effect invocation handler ---
    let on_invoke = use_callback(move |request: EffectRequest| {
        let (ticket, file) = {
            let mut state = session.write();
            let Some(ticket) = state.begin(request) else {
                return;
            };
            let Some(file) = state.file().cloned() else {
                return;
            };
            (ticket, file)
        };
        let signal = scope.peek().as_ref().map(AbortScope::signal);
        let config = config.clone();
        info!(%request, sequence = ticket.sequence(), "request started");

        spawn(async move {
            let outcome = api::apply_effect(&config, &file, request, signal.as_ref()).await;
            let completion = session.write().complete(ticket, outcome);
            match completion {
                Completion::Committed => info!(%request, "result committed"),
                Completion::Failed(e) => warn!("{e}"),
                Completion::Discarded(reason) => {
                    info!(%request, ?reason, "discarded stale response");
                }
            }
        });
    });

    // --- Derived view state ---
    let (has_file, preview_url, result_url, notice, triggers) = {
        let state = session.read();
        let triggers: Vec<(Effect, Vec<(EffectRequest, TriggerPhase)>)> = Effect::ALL
            .into_iter()
            .map(|effect| {
                let phases = effect
                    .requests()
                    .into_iter()
                    .map(|request| (request, state.phase(request)))
                    .collect();
                (effect, phases)
            })
            .collect();
        (
            state.file().is_some(),
            state.preview().map(|url| url.as_str().to_owned()),
            state.result().map(|url| url.as_str().to_owned()),
            state.notice().map(ToString::to_string),
            triggers,
        )
    };

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app",
            header { class: "app__header",
                h1 { "pixmorph" }
                p { class: "text-muted text-small",
                    "Upload an image and apply an effect"
                }
            }

            main { class: "app__main",
                FileSelector { on_select: on_select }

                if let Some(ref err) = selection_error() {
                    div { class: "notice", role: "alert", "{err}" }
                }

                if let Some(src) = preview_url {
                    ImagePreview {
                        title: "Original Image",
                        src: src,
                        alt: "Original image",
                    }
                } else {
                    p { class: "placeholder", "Upload an image to get started" }
                }

                if has_file {
                    div { class: "effects",
                        for (effect, phases) in triggers {
                            EffectTrigger {
                                key: "{effect.slug()}",
                                effect: effect,
                                triggers: phases,
                                has_file: has_file,
                                on_invoke: on_invoke,
                            }
                        }
                    }
                }

                if let Some(ref msg) = notice {
                    div { class: "notice", role: "alert", "{msg}" }
                }

                if let Some(url) = result_url {
                    ResultPanel { key: "{url}", src: url.clone() }
                }
            }
        }
    }
}
