//! Shared reactive state for the claim page.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

/// Connection state machine. `NoWallet` is only entered at start-up; there
/// is no live re-probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    NoWallet,
    Disconnected,
    Connected,
}

/// Outcome of feeding an account sequence into the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountsTransition {
    Connected,
    /// Still connected, but under a different account sequence.
    Switched,
    Disconnected,
    Unchanged,
}

/// What the wallet has told us so far. Lives for the page session only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalletSession {
    pub accounts: Vec<String>,
    pub chain_id: Option<String>,
    pub network_id: Option<String>,
    /// Account the contract bindings sign for. Kept for logging only: the
    /// page's `tlm` and `vesting` bindings resolve the signer from the
    /// provider themselves.
    pub signer: Option<String>,
    /// Bumped whenever the account or network context changes. Balance
    /// fetches issued under an older generation are dropped on arrival.
    pub generation: u64,
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        !self.accounts.is_empty()
    }

    pub fn apply_accounts(&mut self, accounts: Vec<String>) -> AccountsTransition {
        if accounts == self.accounts {
            return AccountsTransition::Unchanged;
        }

        let was_connected = self.is_connected();
        self.accounts = accounts;
        self.signer = self.accounts.first().cloned();
        self.generation += 1;

        match (was_connected, self.is_connected()) {
            (false, true) => AccountsTransition::Connected,
            (true, true) => AccountsTransition::Switched,
            (true, false) => AccountsTransition::Disconnected,
            (false, false) => AccountsTransition::Unchanged,
        }
    }

    pub fn apply_chain(&mut self, chain_id: String) {
        self.chain_id = Some(chain_id);
    }

    pub fn apply_network(&mut self, network_id: String) {
        self.network_id = Some(normalize_network_id(&network_id));
        self.generation += 1;
    }

    /// An unreported network is not a mismatch.
    pub fn network_matches(&self, required: &str) -> bool {
        self.network_id
            .as_deref()
            .map_or(true, |id| id == normalize_network_id(required))
    }
}

/// Decimal ids compare loosely: `" 01"` and `"1"` are the same network.
pub fn normalize_network_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = trimmed.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    } else {
        trimmed.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceField {
    Spendable,
    TotalRemaining,
    MaxClaimable,
}

impl BalanceField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Spendable => "spendable",
            Self::TotalRemaining => "total_remaining",
            Self::MaxClaimable => "max_claimable",
        }
    }
}

/// Last rendered balances, as integer digit strings. A field keeps its
/// previous value when its fetch fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub spendable: Option<String>,
    pub total_remaining: Option<String>,
    pub max_claimable: Option<String>,
}

impl BalanceSnapshot {
    pub fn get(&self, field: BalanceField) -> Option<&str> {
        match field {
            BalanceField::Spendable => self.spendable.as_deref(),
            BalanceField::TotalRemaining => self.total_remaining.as_deref(),
            BalanceField::MaxClaimable => self.max_claimable.as_deref(),
        }
    }

    pub fn set(&mut self, field: BalanceField, amount: String) {
        let slot = match field {
            BalanceField::Spendable => &mut self.spendable,
            BalanceField::TotalRemaining => &mut self.total_remaining,
            BalanceField::MaxClaimable => &mut self.max_claimable,
        };
        *slot = Some(amount);
    }
}

/// Top-level page state, stored in a Dioxus `Signal`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DappState {
    pub installed: bool,
    pub session: WalletSession,
    pub network_mismatch: bool,
    pub onboarding_in_progress: bool,
    /// Written only by the claim controller.
    pub claim_in_flight: bool,
    pub claim_input: String,
    pub balances: BalanceSnapshot,
}

impl DappState {
    pub fn connection(&self) -> ConnectionState {
        if !self.installed {
            ConnectionState::NoWallet
        } else if self.session.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn network_ok(&self) -> bool {
        !self.network_mismatch
    }
}

/// Where the controller keeps `DappState`. The page uses a `Signal` so
/// components re-render on change; tests use a plain `RefCell`.
///
/// Closures must not await or re-enter the store.
pub trait StateStore {
    fn read_state<R>(&self, f: impl FnOnce(&DappState) -> R) -> R;
    fn update_state<R>(&self, f: impl FnOnce(&mut DappState) -> R) -> R;
}

impl StateStore for Signal<DappState> {
    fn read_state<R>(&self, f: impl FnOnce(&DappState) -> R) -> R {
        f(&*self.read())
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut DappState) -> R) -> R {
        let mut signal = *self;
        let mut state = signal.write();
        f(&mut *state)
    }
}

impl StateStore for Rc<RefCell<DappState>> {
    fn read_state<R>(&self, f: impl FnOnce(&DappState) -> R) -> R {
        f(&*self.borrow())
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut DappState) -> R) -> R {
        f(&mut *self.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn connected_tracks_latest_account_sequence() {
        let sequences: [&[&str]; 7] = [
            &["0xABC"],
            &["0xABC"],
            &["0xDEF", "0xABC"],
            &[],
            &[],
            &["0x123"],
            &[],
        ];
        let mut session = WalletSession::default();
        for seq in sequences {
            session.apply_accounts(accounts(seq));
            assert_eq!(session.is_connected(), !seq.is_empty());
            assert_eq!(session.signer.as_deref(), seq.first().copied());
        }
    }

    #[test]
    fn transitions_follow_the_state_machine() {
        let mut session = WalletSession::default();
        assert_eq!(
            session.apply_accounts(Vec::new()),
            AccountsTransition::Unchanged
        );
        assert_eq!(
            session.apply_accounts(accounts(&["0xABC"])),
            AccountsTransition::Connected
        );
        assert_eq!(
            session.apply_accounts(accounts(&["0xABC"])),
            AccountsTransition::Unchanged
        );
        assert_eq!(
            session.apply_accounts(accounts(&["0xDEF"])),
            AccountsTransition::Switched
        );
        assert_eq!(
            session.apply_accounts(Vec::new()),
            AccountsTransition::Disconnected
        );
    }

    #[test]
    fn generation_moves_only_on_context_change() {
        let mut session = WalletSession::default();
        session.apply_accounts(accounts(&["0xABC"]));
        let after_connect = session.generation;

        session.apply_accounts(accounts(&["0xABC"]));
        session.apply_chain("0x1".into());
        assert_eq!(session.generation, after_connect);

        session.apply_network("1".into());
        assert_eq!(session.generation, after_connect + 1);
    }

    #[test]
    fn network_ids_compare_loosely() {
        let mut session = WalletSession::default();
        assert!(session.network_matches("1"));

        session.apply_network(" 01 ".into());
        assert_eq!(session.network_id.as_deref(), Some("1"));
        assert!(session.network_matches("1"));

        session.apply_network("4".into());
        assert!(!session.network_matches("1"));
    }

    #[test]
    fn connection_state_requires_installed_wallet() {
        let mut state = DappState::default();
        state.session.apply_accounts(accounts(&["0xABC"]));
        assert_eq!(state.connection(), ConnectionState::NoWallet);

        state.installed = true;
        assert_eq!(state.connection(), ConnectionState::Connected);

        state.session.apply_accounts(Vec::new());
        assert_eq!(state.connection(), ConnectionState::Disconnected);
    }

    #[test]
    fn snapshot_fields_are_independent() {
        let mut balances = BalanceSnapshot::default();
        balances.set(BalanceField::MaxClaimable, "30".into());
        assert_eq!(balances.get(BalanceField::MaxClaimable), Some("30"));
        assert_eq!(balances.get(BalanceField::Spendable), None);
        assert_eq!(balances.get(BalanceField::TotalRemaining), None);
    }
}
