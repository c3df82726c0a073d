use dioxus::prelude::*;

use crate::config::DappConfig;
use crate::state::DappState;

/// Covers the page while the wallet is on the wrong network.
#[component]
pub fn NetworkWarning() -> Element {
    let state = use_context::<Signal<DappState>>();
    let config = use_context::<DappConfig>();

    let mismatch = state.read().network_mismatch;
    let reported = state.read().session.network_id.clone().unwrap_or_default();

    rsx! {
        if mismatch {
            div { class: "modal-backdrop", "role": "alertdialog",
                div { class: "modal",
                    h2 { "Wrong network" }
                    p { "{config.network_mismatch_message}" }
                    p { class: "hint",
                        "Your wallet reports network {reported}. Switch networks in the wallet to continue."
                    }
                }
            }
        }
    }
}
