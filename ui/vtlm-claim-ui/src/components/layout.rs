use dioxus::prelude::*;

use super::balance::BalancePanel;
use super::claim::ClaimPanel;
use super::network_warning::NetworkWarning;
use super::status::StatusPanel;
use super::wallet_button::WalletButton;

#[component]
pub fn Page() -> Element {
    rsx! {
        div { class: "app-container",
            TopBar {}
            main { class: "main-content",
                div { class: "page",
                    h1 { "Claim vested TLM" }
                    p { class: "subtitle", "Connect your wallet to view and claim your vested tokens." }
                    StatusPanel {}
                    BalancePanel {}
                    ClaimPanel {}
                }
            }
            NetworkWarning {}
        }
    }
}

#[component]
fn TopBar() -> Element {
    rsx! {
        header { class: "topbar",
            div { class: "topbar-left",
                span { class: "brand-icon", "◈" }
                span { class: "brand-text", "VTLM Vesting" }
            }
            div { class: "topbar-right",
                WalletButton {}
            }
        }
    }
}
