use dioxus::prelude::*;

use crate::config::DappConfig;
use crate::reconcile;
use crate::state::DappState;
use crate::{spawn_refresh, SharedController};

#[component]
pub fn ClaimPanel() -> Element {
    let state = use_context::<Signal<DappState>>();
    let controller = use_context::<SharedController>();
    let config = use_context::<DappConfig>();

    let view = reconcile::reconcile(&state.read()).claim;
    let amount = state.read().claim_input.clone();

    let on_input = {
        let controller = controller.clone();
        move |e: FormEvent| controller.set_claim_input(e.value())
    };

    let on_claim = move |_| {
        let controller = controller.clone();
        spawn(async move {
            let outcome = controller.claim().await;
            if outcome.followup().needs_refresh() {
                spawn_refresh(&controller);
            }
        });
    };

    rsx! {
        section { class: "card",
            h2 { "Claim" }
            div { class: "form-group",
                label { "Amount ({config.vesting_symbol})" }
                input {
                    class: "input",
                    r#type: "number",
                    min: "0",
                    step: "1",
                    value: "{amount}",
                    oninput: on_input,
                }
            }
            button {
                class: "btn btn-primary",
                disabled: view.disabled,
                onclick: on_claim,
                "{view.label}"
            }
        }
    }
}
