//! Raw wasm-bindgen bindings for the vesting claim page.
//!
//! Everything here is a thin declaration of what the page environment
//! provides: the EIP-1193 provider injected as `window.ethereum`, the
//! `MetaMaskOnboarding` widget, and the `tlm` / `vesting` contract-binding
//! globals. Safe wrappers live in the UI crate.

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

// Provider RPC methods
pub const METHOD_ACCOUNTS: &str = "eth_accounts";
pub const METHOD_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const METHOD_CHAIN_ID: &str = "eth_chainId";
pub const METHOD_NET_VERSION: &str = "net_version";

// Provider events
pub const EVENT_ACCOUNTS_CHANGED: &str = "accountsChanged";
pub const EVENT_CHAIN_CHANGED: &str = "chainChanged";
pub const EVENT_NETWORK_CHANGED: &str = "networkChanged";

// EIP-1193 provider error codes
pub const ERR_USER_REJECTED: i64 = 4001;
pub const ERR_DISCONNECTED: i64 = 4900;

/// `net_version` of Ethereum mainnet.
pub const MAINNET_NETWORK_ID: &str = "1";

/// Onboarding forwarder used when the page is served from localhost.
pub const LOCAL_FORWARDER_ORIGIN: &str = "http://localhost:9010";

// ---------------------------------------------------------------------------
// Extern declarations
// ---------------------------------------------------------------------------

#[wasm_bindgen]
extern "C" {
    /// The injected provider (`window.ethereum`).
    #[wasm_bindgen(extends = Object)]
    #[derive(Clone, Debug)]
    pub type EthereumProvider;

    #[wasm_bindgen(method, getter, js_name = isMetaMask)]
    pub fn is_metamask(this: &EthereumProvider) -> Option<bool>;

    #[wasm_bindgen(method, setter, js_name = autoRefreshOnNetworkChange)]
    pub fn set_auto_refresh_on_network_change(this: &EthereumProvider, value: bool);

    /// `request({ method })`. Synchronous throws are caught as `Err`.
    #[wasm_bindgen(method, catch)]
    pub fn request(this: &EthereumProvider, args: &Object) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method)]
    pub fn on(this: &EthereumProvider, event: &str, handler: &Function);

    /// `@metamask/onboarding` default export, exposed as a global class.
    #[derive(Clone, Debug)]
    pub type MetaMaskOnboarding;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(options: &Object) -> Result<MetaMaskOnboarding, JsValue>;

    #[wasm_bindgen(method, js_name = startOnboarding)]
    pub fn start_onboarding(this: &MetaMaskOnboarding);

    #[wasm_bindgen(method, js_name = stopOnboarding)]
    pub fn stop_onboarding(this: &MetaMaskOnboarding);

    // Token contract binding (`window.tlm`)

    #[wasm_bindgen(catch, js_namespace = tlm, js_name = getBalance)]
    pub fn tlm_get_balance() -> Result<Promise, JsValue>;

    // Vesting contract binding (`window.vesting`)

    #[wasm_bindgen(catch, js_namespace = vesting, js_name = getMaxClaim)]
    pub fn vesting_get_max_claim() -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = vesting, js_name = getTotalBalanceRemaining)]
    pub fn vesting_get_total_balance_remaining() -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = vesting, js_name = claimTokens)]
    pub fn vesting_claim_tokens(amount: &str) -> Result<Promise, JsValue>;
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

/// Looks up `window.ethereum` without throwing when it is absent.
pub fn ethereum() -> Option<EthereumProvider> {
    let value = Reflect::get(&js_sys::global(), &JsValue::from_str("ethereum")).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(value.unchecked_into())
}

/// Builds the `{ method }` argument object for [`EthereumProvider::request`].
pub fn request_arguments(method: &str) -> Object {
    let args = Object::new();
    let _ = Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method));
    args
}

/// Builds the `{ forwarderOrigin }` option object for [`MetaMaskOnboarding::new`].
pub fn onboarding_options(forwarder_origin: Option<&str>) -> Object {
    let options = Object::new();
    if let Some(origin) = forwarder_origin {
        let _ = Reflect::set(
            &options,
            &JsValue::from_str("forwarderOrigin"),
            &JsValue::from_str(origin),
        );
    }
    options
}

/// Reads a property from an arbitrary JS value, treating failures and
/// `undefined` as absent.
pub fn field(value: &JsValue, name: &str) -> Option<JsValue> {
    if !value.is_object() {
        return None;
    }
    Reflect::get(value, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}
