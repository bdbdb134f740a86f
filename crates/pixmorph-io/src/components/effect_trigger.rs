//! One trigger component for every effect.
//!
//! A plain effect renders a single button. A parameterized effect
//! renders a labelled group with one button per style; each button is
//! an independent trigger with its own phase, but all of them feed the
//! same `on_invoke` handler and thus the same result slot.

use dioxus::prelude::*;
use pixmorph_effects::{Effect, EffectRequest, TriggerPhase};

/// Props for the [`EffectTrigger`] component.
#[derive(Props, Clone, PartialEq)]
pub struct EffectTriggerProps {
    /// The effect this trigger applies.
    effect: Effect,
    /// Every request the effect exposes, with its current phase.
    /// Order follows [`Effect::requests`].
    triggers: Vec<(EffectRequest, TriggerPhase)>,
    /// Whether a file is selected. Without one the trigger renders nothing.
    has_file: bool,
    /// Called when the user invokes an idle trigger.
    on_invoke: EventHandler<EffectRequest>,
}

/// Button (or button group) applying one effect to the selected file.
///
/// A trigger is disabled while its own request is in flight; other
/// triggers stay interactive.
#[component]
pub fn EffectTrigger(props: EffectTriggerProps) -> Element {
    if !props.has_file {
        return rsx! {};
    }

    let effect = props.effect;
    let on_invoke = props.on_invoke;

    if !effect.is_parameterized() {
        return rsx! {
            for (request, phase) in props.triggers.iter().copied() {
                {render_button(request, phase, effect.label(), on_invoke)}
            }
        };
    }

    let busy = props.triggers.iter().any(|(_, phase)| phase.is_requesting());
    let heading = if busy {
        format!("Applying {}...", effect.label())
    } else {
        effect.label().to_owned()
    };

    rsx! {
        div {
            class: "effect-group",
            role: "group",
            aria_label: "{effect.label()} styles",

            span { class: "effect-group__label", "{heading}" }

            div { class: "effect-group__styles",
                for (request, phase) in props.triggers.iter().copied() {
                    {render_button(request, phase, request.style().map_or(effect.label(), |s| s.label()), on_invoke)}
                }
            }
        }
    }
}

/// Render a single trigger button.
fn render_button(
    request: EffectRequest,
    phase: TriggerPhase,
    label: &str,
    on_invoke: EventHandler<EffectRequest>,
) -> Element {
    let requesting = phase.is_requesting();
    let state_class = match phase {
        TriggerPhase::Idle => "",
        TriggerPhase::Requesting => "btn-effect--busy",
        TriggerPhase::Succeeded => "btn-effect--active",
        TriggerPhase::Failed => "btn-effect--failed",
    };
    let text = if requesting {
        format!("Processing {label}...")
    } else {
        label.to_owned()
    };

    rsx! {
        button {
            key: "{request}",
            class: "btn btn-effect {state_class}",
            disabled: requesting,
            "aria-busy": "{requesting}",
            title: "{request}",
            onclick: move |_| {
                if !requesting {
                    on_invoke.call(request);
                }
            },
            "{text}"
        }
    }
}
