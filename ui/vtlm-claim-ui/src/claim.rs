//! Claim action controller.

use tracing::{debug, info, warn};

use crate::controller::{Controller, Followup};
use crate::error::DappError;
use crate::provider::{ContractBindings, Onboarding, WalletProvider};
use crate::reconcile;
use crate::refresh::strip_leading_zeros;
use crate::state::StateStore;

#[derive(Clone, Debug, PartialEq)]
pub enum ClaimOutcome {
    /// The affordance was disabled when the click landed.
    Skipped,
    Submitted(String),
    /// The binding settled with a falsy result.
    NotSubmitted,
    Failed(DappError),
}

impl ClaimOutcome {
    pub fn followup(&self) -> Followup {
        match self {
            Self::Submitted(_) => Followup::RefreshBalances,
            _ => Followup::Nothing,
        }
    }
}

/// Holds the claim affordance disabled; releasing it on drop means an error,
/// a panic or a dropped task all re-enable the button.
struct InFlight<'a, S: StateStore>(&'a S);

impl<S: StateStore> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        self.0.update_state(|s| s.claim_in_flight = false);
    }
}

impl<W, C, O, S> Controller<W, C, O, S>
where
    W: WalletProvider,
    C: ContractBindings,
    O: Onboarding,
    S: StateStore,
{
    /// Submits a claim for the amount currently in the input field.
    ///
    /// Only one claim runs at a time: the affordance is disabled for the
    /// duration, so there is nothing to queue.
    pub async fn claim(&self) -> ClaimOutcome {
        let input = self.store.update_state(|s| {
            if reconcile::claim_disabled(s.connection(), s.network_ok(), s.claim_in_flight) {
                return None;
            }
            s.claim_in_flight = true;
            Some(s.claim_input.clone())
        });
        let Some(input) = input else {
            debug!("claim ignored while affordance is disabled");
            return ClaimOutcome::Skipped;
        };
        let _in_flight = InFlight(&self.store);

        let outcome = match ClaimRequest::parse(&input) {
            Ok(request) => {
                info!(amount = %request.amount, "submitting claim");
                match self.contracts.claim_tokens(&request.amount).await {
                    Ok(Some(tx)) => ClaimOutcome::Submitted(tx),
                    Ok(None) => ClaimOutcome::NotSubmitted,
                    Err(e) => ClaimOutcome::Failed(e),
                }
            }
            Err(e) => ClaimOutcome::Failed(e),
        };

        match &outcome {
            ClaimOutcome::Submitted(tx) => info!(tx = %tx, "claim confirmed"),
            ClaimOutcome::NotSubmitted => info!("claim not submitted"),
            ClaimOutcome::Failed(e) if e.is_rejection() => info!("claim rejected in wallet"),
            ClaimOutcome::Failed(e) => warn!(error = %e, "claim failed"),
            ClaimOutcome::Skipped => {}
        }
        outcome
    }
}

/// A claim for a whole number of VTLM units, kept as decimal digits so any
/// amount the contract reports can be claimed back. Upper bounds are left to
/// the contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimRequest {
    pub amount: String,
}

impl ClaimRequest {
    pub fn parse(input: &str) -> Result<Self, DappError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DappError::InvalidAmount("amount is empty".into()));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DappError::InvalidAmount(format!(
                "{trimmed:?} is not a whole number"
            )));
        }
        Ok(Self {
            amount: strip_leading_zeros(trimmed),
        })
    }
}
