//! Collaborator seams: the injected wallet, the onboarding widget and the
//! token/vesting contract bindings. Browser implementations live in
//! `crate::ethereum`.
//!
//! All futures are `!Send`; the page runs on a single thread.
#![allow(async_fn_in_trait)]

use std::rc::Rc;

use futures::channel::mpsc::UnboundedSender;

use crate::error::DappError;

/// Notifications pushed by the wallet. Each kind arrives in emission order,
/// but nothing orders one kind against another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
    NetworkChanged(String),
}

pub trait WalletProvider {
    /// Availability probe. Synchronous and infallible.
    fn is_installed(&self) -> bool;

    /// Turns off the provider's page reload on network change.
    fn disable_auto_refresh(&self);

    /// Registers handlers for the three wallet events, forwarding them to `sink`.
    fn subscribe(&self, sink: UnboundedSender<WalletEvent>);

    /// Silent account query (`eth_accounts`).
    async fn accounts(&self) -> Result<Vec<String>, DappError>;

    /// Interactive connect (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<String>, DappError>;

    async fn chain_id(&self) -> Result<String, DappError>;

    async fn network_id(&self) -> Result<String, DappError>;
}

pub trait Onboarding {
    fn start(&self);
    fn stop(&self);
}

pub trait ContractBindings {
    /// Spendable TLM balance of the signer, as a numeric string.
    async fn spendable_balance(&self) -> Result<String, DappError>;

    /// Vested VTLM not yet claimed.
    async fn total_balance_remaining(&self) -> Result<String, DappError>;

    /// VTLM currently claimable under the vesting schedule.
    async fn max_claim(&self) -> Result<String, DappError>;

    /// Submits a claim and waits for it to settle. `amount` is a decimal
    /// digit string with no leading zeros. `Ok(None)` is a falsy result:
    /// nothing was submitted.
    async fn claim_tokens(&self, amount: &str) -> Result<Option<String>, DappError>;
}

impl<T: WalletProvider> WalletProvider for Rc<T> {
    fn is_installed(&self) -> bool {
        (**self).is_installed()
    }

    fn disable_auto_refresh(&self) {
        (**self).disable_auto_refresh()
    }

    fn subscribe(&self, sink: UnboundedSender<WalletEvent>) {
        (**self).subscribe(sink)
    }

    async fn accounts(&self) -> Result<Vec<String>, DappError> {
        (**self).accounts().await
    }

    async fn request_accounts(&self) -> Result<Vec<String>, DappError> {
        (**self).request_accounts().await
    }

    async fn chain_id(&self) -> Result<String, DappError> {
        (**self).chain_id().await
    }

    async fn network_id(&self) -> Result<String, DappError> {
        (**self).network_id().await
    }
}

impl<T: Onboarding> Onboarding for Rc<T> {
    fn start(&self) {
        (**self).start()
    }

    fn stop(&self) {
        (**self).stop()
    }
}

impl<T: ContractBindings> ContractBindings for Rc<T> {
    async fn spendable_balance(&self) -> Result<String, DappError> {
        (**self).spendable_balance().await
    }

    async fn total_balance_remaining(&self) -> Result<String, DappError> {
        (**self).total_balance_remaining().await
    }

    async fn max_claim(&self) -> Result<String, DappError> {
        (**self).max_claim().await
    }

    async fn claim_tokens(&self, amount: &str) -> Result<Option<String>, DappError> {
        (**self).claim_tokens(amount).await
    }
}
