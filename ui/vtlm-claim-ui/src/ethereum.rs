//! Safe Rust wrappers around the raw vtlm-claim-sys bindings.

use futures::channel::mpsc::UnboundedSender;
use js_sys::{Array, Promise};
use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use vtlm_claim_sys as sys;

use crate::config::DappConfig;
use crate::error::DappError;
use crate::provider::{ContractBindings, Onboarding, WalletEvent, WalletProvider};

// ---------------------------------------------------------------------------
// Wallet provider
// ---------------------------------------------------------------------------

/// The injected MetaMask provider, if the page has one.
pub struct MetaMask {
    provider: Option<sys::EthereumProvider>,
}

impl MetaMask {
    pub fn detect() -> Self {
        Self {
            provider: sys::ethereum(),
        }
    }

    fn provider(&self) -> Result<&sys::EthereumProvider, DappError> {
        self.provider.as_ref().ok_or(DappError::ProviderUnavailable)
    }

    async fn request(&self, method: &str) -> Result<JsValue, DappError> {
        let promise = self
            .provider()?
            .request(&sys::request_arguments(method))
            .map_err(|e| DappError::from_provider(&e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| DappError::from_provider(&e))
    }
}

impl WalletProvider for MetaMask {
    fn is_installed(&self) -> bool {
        self.provider
            .as_ref()
            .and_then(|provider| provider.is_metamask())
            .unwrap_or(false)
    }

    fn disable_auto_refresh(&self) {
        if let Some(provider) = &self.provider {
            provider.set_auto_refresh_on_network_change(false);
        }
    }

    fn subscribe(&self, sink: UnboundedSender<WalletEvent>) {
        let Some(provider) = &self.provider else {
            return;
        };
        listen(provider, sys::EVENT_ACCOUNTS_CHANGED, sink.clone(), |value| {
            accounts_from_js(&value).map(WalletEvent::AccountsChanged)
        });
        listen(provider, sys::EVENT_CHAIN_CHANGED, sink.clone(), |value| {
            id_from_js(&value).map(WalletEvent::ChainChanged)
        });
        listen(provider, sys::EVENT_NETWORK_CHANGED, sink, |value| {
            id_from_js(&value).map(WalletEvent::NetworkChanged)
        });
    }

    async fn accounts(&self) -> Result<Vec<String>, DappError> {
        accounts_from_js(&self.request(sys::METHOD_ACCOUNTS).await?)
    }

    async fn request_accounts(&self) -> Result<Vec<String>, DappError> {
        accounts_from_js(&self.request(sys::METHOD_REQUEST_ACCOUNTS).await?)
    }

    async fn chain_id(&self) -> Result<String, DappError> {
        id_from_js(&self.request(sys::METHOD_CHAIN_ID).await?)
    }

    async fn network_id(&self) -> Result<String, DappError> {
        id_from_js(&self.request(sys::METHOD_NET_VERSION).await?)
    }
}

/// Handlers stay registered for the life of the page; the closure is
/// leaked.
fn listen(
    provider: &sys::EthereumProvider,
    event: &'static str,
    sink: UnboundedSender<WalletEvent>,
    decode: fn(JsValue) -> Result<WalletEvent, DappError>,
) {
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| match decode(value) {
        Ok(wallet_event) => {
            if sink.unbounded_send(wallet_event).is_err() {
                warn!(event, "wallet event dropped, controller is gone");
            }
        }
        Err(e) => warn!(event, error = %e, "ignoring malformed wallet event"),
    });
    provider.on(event, handler.as_ref().unchecked_ref());
    handler.forget();
}

// ---------------------------------------------------------------------------
// Onboarding widget
// ---------------------------------------------------------------------------

pub struct OnboardingWidget {
    widget: Option<sys::MetaMaskOnboarding>,
}

impl OnboardingWidget {
    pub fn new(config: &DappConfig) -> Self {
        let options = sys::onboarding_options(config.forwarder_origin.as_deref());
        let widget = match sys::MetaMaskOnboarding::new(&options) {
            Ok(widget) => Some(widget),
            Err(e) => {
                error!(error = ?e, "onboarding widget unavailable");
                None
            }
        };
        Self { widget }
    }
}

impl Onboarding for OnboardingWidget {
    fn start(&self) {
        match &self.widget {
            Some(widget) => widget.start_onboarding(),
            None => warn!("cannot start onboarding without the widget"),
        }
    }

    fn stop(&self) {
        if let Some(widget) = &self.widget {
            widget.stop_onboarding();
        }
    }
}

// ---------------------------------------------------------------------------
// Contract bindings
// ---------------------------------------------------------------------------

/// The page's `tlm` and `vesting` binding modules.
pub struct VestingContracts;

impl ContractBindings for VestingContracts {
    async fn spendable_balance(&self) -> Result<String, DappError> {
        amount_from_js(&settle(sys::tlm_get_balance()).await?)
    }

    async fn total_balance_remaining(&self) -> Result<String, DappError> {
        amount_from_js(&settle(sys::vesting_get_total_balance_remaining()).await?)
    }

    async fn max_claim(&self) -> Result<String, DappError> {
        amount_from_js(&settle(sys::vesting_get_max_claim()).await?)
    }

    async fn claim_tokens(&self, amount: &str) -> Result<Option<String>, DappError> {
        let result = settle(sys::vesting_claim_tokens(amount)).await?;
        Ok(result.is_truthy().then(|| describe_transaction(&result)))
    }
}

async fn settle(call: Result<Promise, JsValue>) -> Result<JsValue, DappError> {
    let promise = call.map_err(|e| DappError::from_contract(&e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| DappError::from_contract(&e))
}

fn describe_transaction(result: &JsValue) -> String {
    sys::field(result, "transactionHash")
        .or_else(|| sys::field(result, "hash"))
        .and_then(|hash| hash.as_string())
        .or_else(|| result.as_string())
        .unwrap_or_else(|| "confirmed".to_string())
}

// ---------------------------------------------------------------------------
// JS value decoding
// ---------------------------------------------------------------------------

fn accounts_from_js(value: &JsValue) -> Result<Vec<String>, DappError> {
    if !Array::is_array(value) {
        return Err(DappError::InvalidResponse("accounts is not an array".into()));
    }
    collect_accounts(Array::from(value).iter().map(|account| account.as_string()))
}

fn collect_accounts(
    accounts: impl IntoIterator<Item = Option<String>>,
) -> Result<Vec<String>, DappError> {
    accounts
        .into_iter()
        .map(|account| {
            account.ok_or_else(|| DappError::InvalidResponse("account is not a string".into()))
        })
        .collect()
}

fn id_from_js(value: &JsValue) -> Result<String, DappError> {
    id_from_parts(value.as_string(), value.as_f64())
}

/// Chain and network ids arrive as strings or plain numbers. A number must
/// be a non-negative integer and is rendered in decimal.
fn id_from_parts(text: Option<String>, number: Option<f64>) -> Result<String, DappError> {
    if let Some(text) = text {
        return Ok(text);
    }
    match number {
        Some(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 => Ok(format!("{n}")),
        _ => Err(DappError::InvalidResponse("id is neither string nor integer".into())),
    }
}

/// Contract amounts may come back as strings, numbers or BigNumber-like
/// objects; all are rendered through their string form.
fn amount_from_js(value: &JsValue) -> Result<String, DappError> {
    if let Some(text) = value.as_string() {
        return Ok(text);
    }
    if let Some(n) = value.as_f64() {
        return Ok(amount_from_number(n));
    }
    if value.is_object() {
        let text: String = value.unchecked_ref::<js_sys::Object>().to_string().into();
        return Ok(text);
    }
    Err(DappError::InvalidResponse("amount is not numeric".into()))
}

/// Plain decimal, never exponent notation, so large amounts keep every digit.
fn amount_from_number(n: f64) -> String {
    format!("{n}")
}
