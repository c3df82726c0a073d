use dioxus::prelude::*;

use crate::state::DappState;

#[component]
pub fn StatusPanel() -> Element {
    let state = use_context::<Signal<DappState>>();
    let session = state.read().session.clone();

    let chain_id = session.chain_id.unwrap_or_else(|| "-".to_string());
    let network_id = session.network_id.unwrap_or_else(|| "-".to_string());
    let accounts = if session.accounts.is_empty() {
        "-".to_string()
    } else {
        session.accounts.join(", ")
    };

    rsx! {
        section { class: "card",
            h2 { "Status" }
            StatusRow { label: "Chain ID", value: chain_id }
            StatusRow { label: "Network ID", value: network_id }
            StatusRow { label: "Accounts", value: accounts }
        }
    }
}

#[component]
fn StatusRow(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "status-row",
            span { class: "label", "{label}" }
            span { class: "mono", "{value}" }
        }
    }
}
