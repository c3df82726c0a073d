use dioxus::prelude::*;

use crate::reconcile::{self, ConnectAction};
use crate::state::{ConnectionState, DappState};
use crate::{spawn_refresh, SharedController};

#[component]
pub fn WalletButton() -> Element {
    let state = use_context::<Signal<DappState>>();
    let controller = use_context::<SharedController>();

    let connection = state.read().connection();
    let view = reconcile::reconcile(&state.read()).connect;

    let (dot_class, status_label) = match connection {
        ConnectionState::NoWallet => ("dot error", "No wallet"),
        ConnectionState::Disconnected => ("dot disconnected", "Disconnected"),
        ConnectionState::Connected => ("dot connected", "Connected"),
    };

    let on_click = move |_| match view.action {
        Some(ConnectAction::Install) => controller.install(),
        Some(ConnectAction::Connect) => {
            let controller = controller.clone();
            spawn(async move {
                if controller.connect().await.needs_refresh() {
                    spawn_refresh(&controller);
                }
            });
        }
        None => {}
    };

    rsx! {
        div { class: "conn-indicator",
            span { class: dot_class }
            span { class: "conn-label", "{status_label}" }
            button {
                class: "conn-btn conn-btn-connect",
                disabled: view.disabled,
                onclick: on_click,
                "{view.label}"
            }
        }
    }
}
