//! Wallet connection controller: start-up, wallet events and the
//! connect/install actions.
//!
//! Balance refreshes are never run from inside a handler. Handlers return a
//! [`Followup`] and the caller spawns [`Controller::refresh_balances`] as its
//! own task, so a slow fetch never holds up the next wallet event.

use futures::channel::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::config::DappConfig;
use crate::provider::{ContractBindings, Onboarding, WalletEvent, WalletProvider};
use crate::state::{AccountsTransition, ConnectionState, StateStore};

#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Followup {
    Nothing,
    RefreshBalances,
}

impl Followup {
    pub fn needs_refresh(self) -> bool {
        self == Self::RefreshBalances
    }

    pub fn and(self, other: Self) -> Self {
        if self.needs_refresh() || other.needs_refresh() {
            Self::RefreshBalances
        } else {
            Self::Nothing
        }
    }
}

pub struct Controller<W, C, O, S> {
    pub(crate) wallet: W,
    pub(crate) contracts: C,
    pub(crate) onboarding: O,
    pub(crate) store: S,
    pub(crate) config: DappConfig,
}

impl<W, C, O, S> Controller<W, C, O, S>
where
    W: WalletProvider,
    C: ContractBindings,
    O: Onboarding,
    S: StateStore,
{
    pub fn new(wallet: W, contracts: C, onboarding: O, store: S, config: DappConfig) -> Self {
        Self {
            wallet,
            contracts,
            onboarding,
            store,
            config,
        }
    }

    /// Probes for the wallet and, when present, takes over network-change
    /// handling, subscribes `events` to the wallet and runs the silent
    /// chain, network and account queries.
    pub async fn initialize(&self, events: UnboundedSender<WalletEvent>) -> Followup {
        let installed = self.wallet.is_installed();
        self.store.update_state(|s| s.installed = installed);
        if !installed {
            info!("no wallet extension detected, offering install");
            return Followup::Nothing;
        }

        self.wallet.disable_auto_refresh();
        self.wallet.subscribe(events);

        let network = self.sync_network().await;
        let accounts = match self.wallet.accounts().await {
            Ok(accounts) => self.handle_accounts(accounts),
            Err(e) => {
                error!(error = %e, "initial account query failed");
                Followup::Nothing
            }
        };
        network.and(accounts)
    }

    async fn sync_network(&self) -> Followup {
        let chain_id = match self.wallet.chain_id().await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "chain id query failed");
                return Followup::Nothing;
            }
        };
        let chain = self.handle_chain(chain_id);

        match self.wallet.network_id().await {
            Ok(id) => chain.and(self.handle_network(id)),
            Err(e) => {
                error!(error = %e, "network id query failed");
                chain
            }
        }
    }

    pub fn handle_event(&self, event: WalletEvent) -> Followup {
        match event {
            WalletEvent::AccountsChanged(accounts) => self.handle_accounts(accounts),
            WalletEvent::ChainChanged(chain_id) => self.handle_chain(chain_id),
            WalletEvent::NetworkChanged(network_id) => self.handle_network(network_id),
        }
    }

    fn handle_accounts(&self, accounts: Vec<String>) -> Followup {
        let (transition, signer) = self.store.update_state(|s| {
            let transition = s.session.apply_accounts(accounts);
            if transition == AccountsTransition::Disconnected {
                s.balances = Default::default();
            }
            (transition, s.session.signer.clone())
        });

        match transition {
            AccountsTransition::Connected => {
                info!(signer = signer.as_deref().unwrap_or_default(), "wallet connected");
                self.onboarding.stop();
                Followup::RefreshBalances
            }
            AccountsTransition::Switched => {
                info!(signer = signer.as_deref().unwrap_or_default(), "wallet account switched");
                Followup::RefreshBalances
            }
            AccountsTransition::Disconnected => {
                info!("wallet disconnected");
                Followup::Nothing
            }
            AccountsTransition::Unchanged => Followup::Nothing,
        }
    }

    fn handle_chain(&self, chain_id: String) -> Followup {
        debug!(chain_id = %chain_id, "chain changed");
        self.store.update_state(|s| s.session.apply_chain(chain_id));
        Followup::Nothing
    }

    /// Every network report invalidates on-chain reads, matching or not.
    fn handle_network(&self, network_id: String) -> Followup {
        let required = &self.config.required_network_id;
        let mismatch = self.store.update_state(|s| {
            s.session.apply_network(network_id);
            s.network_mismatch = !s.session.network_matches(required);
            s.network_mismatch
        });

        if mismatch {
            warn!(required = %required, "{}", self.config.network_mismatch_message);
        } else {
            debug!("network matches required id");
        }
        Followup::RefreshBalances
    }

    /// Asks the wallet for account access. A rejection leaves the page as it
    /// was.
    pub async fn connect(&self) -> Followup {
        if self.store.read_state(|s| s.connection()) != ConnectionState::Disconnected {
            return Followup::Nothing;
        }

        match self.wallet.request_accounts().await {
            Ok(accounts) => self.handle_accounts(accounts),
            Err(e) if e.is_rejection() => {
                info!("connect request rejected");
                Followup::Nothing
            }
            Err(e) => {
                error!(error = %e, "connect request failed");
                Followup::Nothing
            }
        }
    }

    pub fn install(&self) {
        let started = self.store.update_state(|s| {
            if s.connection() != ConnectionState::NoWallet || s.onboarding_in_progress {
                return false;
            }
            s.onboarding_in_progress = true;
            true
        });
        if started {
            info!("starting wallet onboarding");
            self.onboarding.start();
        }
    }

    /// User edits to the claim amount.
    pub fn set_claim_input(&self, value: String) {
        self.store.update_state(|s| s.claim_input = value);
    }
}
