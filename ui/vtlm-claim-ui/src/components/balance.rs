use dioxus::prelude::*;

use crate::config::DappConfig;
use crate::state::{BalanceField, DappState};

#[component]
pub fn BalancePanel() -> Element {
    let state = use_context::<Signal<DappState>>();
    let config = use_context::<DappConfig>();

    let connected = state.read().session.is_connected();
    let balances = state.read().balances.clone();

    let rows = [
        (BalanceField::Spendable, "Spendable", &config.spendable_symbol),
        (BalanceField::TotalRemaining, "Total remaining", &config.vesting_symbol),
        (BalanceField::MaxClaimable, "Claimable now", &config.vesting_symbol),
    ];

    rsx! {
        section { class: "card",
            h2 { "Balances" }
            if connected {
                for (field, label, symbol) in rows {
                    BalanceRow {
                        label: label,
                        amount: balances.get(field).map(str::to_string),
                        symbol: symbol.clone(),
                    }
                }
            } else {
                p { class: "hint", "Connect your wallet to see balances." }
            }
        }
    }
}

#[component]
fn BalanceRow(label: &'static str, amount: Option<String>, symbol: String) -> Element {
    rsx! {
        div { class: "balance-row",
            span { class: "label", "{label}" }
            match amount {
                Some(amount) => rsx! {
                    span { class: "balance-value", "{format_amount(&amount, &symbol)}" }
                },
                None => rsx! {
                    span { class: "hint", "-" }
                },
            }
        }
    }
}

/// Groups the integer part in thousands: `1234567` → `1,234,567 TLM`.
fn format_amount(digits: &str, symbol: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped} {symbol}")
}
