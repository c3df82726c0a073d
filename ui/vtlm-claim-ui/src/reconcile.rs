//! Derives button labels and enablement from `DappState`.
//!
//! Nothing here is stored: components call [`reconcile`] on every render, so
//! any change to the wallet session, the network check or an in-flight flag
//! is reflected on the next frame.

use crate::state::{ConnectionState, DappState};

pub const INSTALL_LABEL: &str = "Click here to install MetaMask!";
pub const ONBOARDING_LABEL: &str = "Onboarding in progress";
pub const CONNECT_LABEL: &str = "Connect";
pub const CONNECTED_LABEL: &str = "Connected";
pub const CLAIM_LABEL: &str = "Claim";
pub const CLAIM_PENDING_LABEL: &str = "Waiting for blockchain confirmation...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectAction {
    Install,
    Connect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectButton {
    pub label: &'static str,
    pub action: Option<ConnectAction>,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimButton {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiView {
    pub connect: ConnectButton,
    pub claim: ClaimButton,
}

pub fn connect_button(connection: ConnectionState, onboarding_in_progress: bool) -> ConnectButton {
    match connection {
        ConnectionState::NoWallet if onboarding_in_progress => ConnectButton {
            label: ONBOARDING_LABEL,
            action: None,
            disabled: true,
        },
        ConnectionState::NoWallet => ConnectButton {
            label: INSTALL_LABEL,
            action: Some(ConnectAction::Install),
            disabled: false,
        },
        ConnectionState::Disconnected => ConnectButton {
            label: CONNECT_LABEL,
            action: Some(ConnectAction::Connect),
            disabled: false,
        },
        ConnectionState::Connected => ConnectButton {
            label: CONNECTED_LABEL,
            action: None,
            disabled: true,
        },
    }
}

/// A network mismatch overrides the connection state instead of combining
/// with it.
pub fn claim_disabled(connection: ConnectionState, network_ok: bool, claim_in_flight: bool) -> bool {
    connection != ConnectionState::Connected || !network_ok || claim_in_flight
}

pub fn claim_button(connection: ConnectionState, network_ok: bool, claim_in_flight: bool) -> ClaimButton {
    ClaimButton {
        label: if claim_in_flight {
            CLAIM_PENDING_LABEL
        } else {
            CLAIM_LABEL
        },
        disabled: claim_disabled(connection, network_ok, claim_in_flight),
    }
}

pub fn reconcile(state: &DappState) -> UiView {
    let connection = state.connection();
    UiView {
        connect: connect_button(connection, state.onboarding_in_progress),
        claim: claim_button(connection, state.network_ok(), state.claim_in_flight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [ConnectionState; 3] = [
        ConnectionState::NoWallet,
        ConnectionState::Disconnected,
        ConnectionState::Connected,
    ];

    #[test]
    fn claim_enabled_iff_connected_on_network_and_idle() {
        for connection in STATES {
            for network_ok in [false, true] {
                for in_flight in [false, true] {
                    let enabled = connection == ConnectionState::Connected && network_ok && !in_flight;
                    assert_eq!(
                        !claim_disabled(connection, network_ok, in_flight),
                        enabled,
                        "{connection:?} network_ok={network_ok} in_flight={in_flight}"
                    );
                }
            }
        }
    }

    #[test]
    fn missing_wallet_routes_to_install() {
        let mut state = DappState::default();
        let view = reconcile(&state);
        assert_eq!(view.connect.label, INSTALL_LABEL);
        assert_eq!(view.connect.action, Some(ConnectAction::Install));
        assert!(!view.connect.disabled);
        assert!(view.claim.disabled);

        state.onboarding_in_progress = true;
        let view = reconcile(&state);
        assert_eq!(view.connect.label, ONBOARDING_LABEL);
        assert!(view.connect.disabled);
    }

    #[test]
    fn installed_wallet_without_accounts_offers_connect() {
        let state = DappState {
            installed: true,
            ..DappState::default()
        };
        let view = reconcile(&state);
        assert_eq!(view.connect.label, CONNECT_LABEL);
        assert_eq!(view.connect.action, Some(ConnectAction::Connect));
        assert!(view.claim.disabled);
    }

    #[test]
    fn connected_wallet_enables_claim_until_mismatch() {
        let mut state = DappState {
            installed: true,
            ..DappState::default()
        };
        state.session.apply_accounts(vec!["0xABC".into()]);

        let view = reconcile(&state);
        assert_eq!(view.connect.label, CONNECTED_LABEL);
        assert!(view.connect.disabled);
        assert_eq!(view.connect.action, None);
        assert!(!view.claim.disabled);
        assert_eq!(view.claim.label, CLAIM_LABEL);

        state.network_mismatch = true;
        assert!(reconcile(&state).claim.disabled);

        state.network_mismatch = false;
        state.claim_in_flight = true;
        let view = reconcile(&state);
        assert!(view.claim.disabled);
        assert_eq!(view.claim.label, CLAIM_PENDING_LABEL);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut state = DappState {
            installed: true,
            network_mismatch: true,
            ..DappState::default()
        };
        state.session.apply_accounts(vec!["0xABC".into()]);
        let before = state.clone();

        let first = reconcile(&state);
        let second = reconcile(&state);
        assert_eq!(first, second);
        assert_eq!(state, before);
    }
}
