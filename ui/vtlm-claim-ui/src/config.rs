//! Page configuration.

use vtlm_claim_sys as sys;

/// Settings that depend on the deployment rather than on wallet state.
#[derive(Clone, Debug, PartialEq)]
pub struct DappConfig {
    /// `net_version` the claim is allowed on.
    pub required_network_id: String,
    pub network_mismatch_message: String,
    /// Forwarder handed to the onboarding widget; only set for local serving.
    pub forwarder_origin: Option<String>,
    pub spendable_symbol: String,
    pub vesting_symbol: String,
}

impl Default for DappConfig {
    fn default() -> Self {
        Self {
            required_network_id: sys::MAINNET_NETWORK_ID.to_string(),
            network_mismatch_message: "Please connect to the Ethereum mainnet".to_string(),
            forwarder_origin: None,
            spendable_symbol: "TLM".to_string(),
            vesting_symbol: "VTLM".to_string(),
        }
    }
}

impl DappConfig {
    pub fn for_hostname(hostname: &str) -> Self {
        Self {
            forwarder_origin: (hostname == "localhost")
                .then(|| sys::LOCAL_FORWARDER_ORIGIN.to_string()),
            ..Self::default()
        }
    }

    /// Reads the hostname of the current page, falling back to defaults
    /// outside a browser.
    pub fn from_location() -> Self {
        web_sys::window()
            .and_then(|window| window.location().hostname().ok())
            .map(|hostname| Self::for_hostname(&hostname))
            .unwrap_or_default()
    }
}
