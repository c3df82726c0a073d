//! Balance refresh pipeline.

use std::future::Future;

use tracing::{debug, warn};

use crate::controller::Controller;
use crate::error::DappError;
use crate::provider::{ContractBindings, Onboarding, WalletProvider};
use crate::state::{BalanceField, StateStore};

impl<W, C, O, S> Controller<W, C, O, S>
where
    W: WalletProvider,
    C: ContractBindings,
    O: Onboarding,
    S: StateStore,
{
    /// Fetches the three balances concurrently. Each result is written as
    /// soon as it lands; a failed fetch leaves its field stale and does not
    /// affect the other two.
    pub async fn refresh_balances(&self) {
        let generation = self.store.read_state(|s| s.session.generation);
        debug!(generation, "refreshing balances");

        futures::join!(
            self.fetch_balance(
                BalanceField::Spendable,
                generation,
                self.contracts.spendable_balance()
            ),
            self.fetch_balance(
                BalanceField::TotalRemaining,
                generation,
                self.contracts.total_balance_remaining()
            ),
            self.fetch_balance(
                BalanceField::MaxClaimable,
                generation,
                self.contracts.max_claim()
            ),
        );
    }

    async fn fetch_balance(
        &self,
        field: BalanceField,
        generation: u64,
        fetch: impl Future<Output = Result<String, DappError>>,
    ) {
        let amount = match fetch.await.and_then(|raw| parse_int_prefix(&raw)) {
            Ok(amount) => amount,
            Err(e) => {
                warn!(field = field.label(), error = %e, "balance fetch failed");
                return;
            }
        };

        let applied = self.store.update_state(|s| {
            if s.session.generation != generation {
                return false;
            }
            if field == BalanceField::MaxClaimable {
                s.claim_input = amount.clone();
            }
            s.balances.set(field, amount);
            true
        });

        if !applied {
            debug!(
                field = field.label(),
                generation, "discarding balance from superseded session"
            );
        }
    }
}

/// Reads a contract amount the way `parseInt` would: optional leading
/// whitespace and `+`, then the leading run of decimal digits. Anything
/// after the digits (decimals, units) is dropped.
pub fn parse_int_prefix(raw: &str) -> Result<String, DappError> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(DappError::InvalidResponse(format!(
            "expected a numeric amount, got {raw:?}"
        )));
    }

    Ok(strip_leading_zeros(&unsigned[..digits_len]))
}

/// `"007"` → `"7"`, `"000"` → `"0"`. Expects ASCII digits only.
pub fn strip_leading_zeros(digits: &str) -> String {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}
