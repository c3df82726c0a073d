//! In-memory stand-ins for the wallet, onboarding widget and contract
//! bindings, plus a harness wiring them to a `Controller`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::mpsc::UnboundedSender;
use futures::channel::oneshot;

use crate::config::DappConfig;
use crate::controller::{Controller, Followup};
use crate::error::DappError;
use crate::provider::{ContractBindings, Onboarding, WalletEvent, WalletProvider};
use crate::state::DappState;

/// A scripted async call: returns the configured result, or waits on a gate
/// installed with [`Scripted::gate`] for exactly one call.
pub struct Scripted<T> {
    calls: Cell<usize>,
    result: RefCell<Result<T, DappError>>,
    gate: RefCell<Option<oneshot::Receiver<Result<T, DappError>>>>,
}

impl<T: Clone> Scripted<T> {
    pub fn new(result: Result<T, DappError>) -> Self {
        Self {
            calls: Cell::new(0),
            result: RefCell::new(result),
            gate: RefCell::new(None),
        }
    }

    pub fn set(&self, result: Result<T, DappError>) {
        *self.result.borrow_mut() = result;
    }

    pub fn gate(&self) -> oneshot::Sender<Result<T, DappError>> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub async fn call(&self) -> Result<T, DappError> {
        self.calls.set(self.calls.get() + 1);
        let gate = self.gate.borrow_mut().take();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(DappError::Contract("gate dropped".into()))),
            None => self.result.borrow().clone(),
        }
    }
}

pub struct FakeWallet {
    pub installed: bool,
    pub auto_refresh_disabled: Cell<bool>,
    pub accounts: Scripted<Vec<String>>,
    pub requested: Scripted<Vec<String>>,
    pub chain: Scripted<String>,
    pub network: Scripted<String>,
    sink: RefCell<Option<UnboundedSender<WalletEvent>>>,
}

impl FakeWallet {
    pub fn new(installed: bool) -> Self {
        Self {
            installed,
            auto_refresh_disabled: Cell::new(false),
            accounts: Scripted::new(Ok(Vec::new())),
            requested: Scripted::new(Err(DappError::UserRejected)),
            chain: Scripted::new(Ok("0x1".into())),
            network: Scripted::new(Ok("1".into())),
            sink: RefCell::new(None),
        }
    }

    pub fn subscribed(&self) -> bool {
        self.sink.borrow().is_some()
    }

    /// Delivers an event the way the provider's `on` handlers would.
    pub fn emit(&self, event: WalletEvent) {
        if let Some(sink) = self.sink.borrow().as_ref() {
            let _ = sink.unbounded_send(event);
        }
    }
}

impl WalletProvider for FakeWallet {
    fn is_installed(&self) -> bool {
        self.installed
    }

    fn disable_auto_refresh(&self) {
        self.auto_refresh_disabled.set(true);
    }

    fn subscribe(&self, sink: UnboundedSender<WalletEvent>) {
        *self.sink.borrow_mut() = Some(sink);
    }

    async fn accounts(&self) -> Result<Vec<String>, DappError> {
        self.accounts.call().await
    }

    async fn request_accounts(&self) -> Result<Vec<String>, DappError> {
        self.requested.call().await
    }

    async fn chain_id(&self) -> Result<String, DappError> {
        self.chain.call().await
    }

    async fn network_id(&self) -> Result<String, DappError> {
        self.network.call().await
    }
}

#[derive(Default)]
pub struct FakeOnboarding {
    pub started: Cell<usize>,
    pub stopped: Cell<usize>,
}

impl Onboarding for FakeOnboarding {
    fn start(&self) {
        self.started.set(self.started.get() + 1);
    }

    fn stop(&self) {
        self.stopped.set(self.stopped.get() + 1);
    }
}

pub struct FakeContracts {
    pub spendable: Scripted<String>,
    pub total_remaining: Scripted<String>,
    pub max_claim: Scripted<String>,
    pub claim: Scripted<Option<String>>,
    pub claimed: RefCell<Vec<String>>,
}

impl Default for FakeContracts {
    fn default() -> Self {
        Self {
            spendable: Scripted::new(Ok("1000".into())),
            total_remaining: Scripted::new(Ok("500".into())),
            max_claim: Scripted::new(Ok("50".into())),
            claim: Scripted::new(Ok(Some("0xtx".into()))),
            claimed: RefCell::new(Vec::new()),
        }
    }
}

impl ContractBindings for FakeContracts {
    async fn spendable_balance(&self) -> Result<String, DappError> {
        self.spendable.call().await
    }

    async fn total_balance_remaining(&self) -> Result<String, DappError> {
        self.total_remaining.call().await
    }

    async fn max_claim(&self) -> Result<String, DappError> {
        self.max_claim.call().await
    }

    async fn claim_tokens(&self, amount: &str) -> Result<Option<String>, DappError> {
        self.claimed.borrow_mut().push(amount.to_string());
        self.claim.call().await
    }
}

pub type TestController =
    Controller<Rc<FakeWallet>, Rc<FakeContracts>, Rc<FakeOnboarding>, Rc<RefCell<DappState>>>;

pub struct Harness {
    pub wallet: Rc<FakeWallet>,
    pub contracts: Rc<FakeContracts>,
    pub onboarding: Rc<FakeOnboarding>,
    pub store: Rc<RefCell<DappState>>,
    pub controller: TestController,
}

impl Harness {
    pub fn new(installed: bool) -> Self {
        let wallet = Rc::new(FakeWallet::new(installed));
        let contracts = Rc::new(FakeContracts::default());
        let onboarding = Rc::new(FakeOnboarding::default());
        let store = Rc::new(RefCell::new(DappState::default()));
        let controller = Controller::new(
            wallet.clone(),
            contracts.clone(),
            onboarding.clone(),
            store.clone(),
            DappConfig::default(),
        );
        Self {
            wallet,
            contracts,
            onboarding,
            store,
            controller,
        }
    }

    /// Installed wallet on mainnet that reports `accounts` at start-up, with
    /// the first balance refresh already applied.
    pub async fn connected_on_mainnet(accounts: &[&str]) -> Self {
        let h = Self::new(true);
        h.wallet
            .accounts
            .set(Ok(accounts.iter().map(|a| a.to_string()).collect()));
        let followup = h.initialize().await;
        h.run(followup).await;
        h
    }

    /// Runs start-up with a throwaway event channel.
    pub async fn initialize(&self) -> Followup {
        let (tx, _rx) = futures::channel::mpsc::unbounded();
        self.controller.initialize(tx).await
    }

    pub async fn run(&self, followup: Followup) {
        if followup.needs_refresh() {
            self.controller.refresh_balances().await;
        }
    }

    pub fn state(&self) -> DappState {
        self.store.borrow().clone()
    }
}
