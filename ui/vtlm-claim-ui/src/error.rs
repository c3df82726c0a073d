//! Errors surfaced by wallet and contract calls.

use std::fmt;

use vtlm_claim_sys as sys;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum DappError {
    ProviderUnavailable,
    UserRejected,
    Rpc { code: Option<i64>, message: String },
    InvalidResponse(String),
    InvalidAmount(String),
    Contract(String),
}

impl fmt::Display for DappError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderUnavailable => write!(f, "No wallet extension detected"),
            Self::UserRejected => write!(f, "Request rejected by user"),
            Self::Rpc {
                code: Some(code),
                message,
            } => write!(f, "Provider error {code}: {message}"),
            Self::Rpc {
                code: None,
                message,
            } => write!(f, "Provider error: {message}"),
            Self::InvalidResponse(msg) => write!(f, "Unexpected response: {msg}"),
            Self::InvalidAmount(msg) => write!(f, "Invalid claim amount: {msg}"),
            Self::Contract(msg) => write!(f, "Contract call failed: {msg}"),
        }
    }
}

impl std::error::Error for DappError {}

impl DappError {
    /// Classifies a rejected provider request by its EIP-1193 `code`.
    pub fn from_provider(value: &JsValue) -> Self {
        match error_code(value) {
            Some(sys::ERR_USER_REJECTED) => Self::UserRejected,
            code => Self::Rpc {
                code,
                message: error_message(value),
            },
        }
    }

    /// Classifies a rejected contract-binding promise. Signing rejections
    /// carry the same code as provider rejections.
    pub fn from_contract(value: &JsValue) -> Self {
        match error_code(value) {
            Some(sys::ERR_USER_REJECTED) => Self::UserRejected,
            _ => Self::Contract(error_message(value)),
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::UserRejected)
    }
}

fn error_code(value: &JsValue) -> Option<i64> {
    sys::field(value, "code")
        .and_then(|code| code.as_f64())
        .filter(|code| code.is_finite())
        .map(|code| code as i64)
}

fn error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    sys::field(value, "message")
        .and_then(|msg| msg.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_when_known() {
        let err = DappError::Rpc {
            code: Some(sys::ERR_DISCONNECTED),
            message: "disconnected".into(),
        };
        assert_eq!(err.to_string(), "Provider error 4900: disconnected");

        let err = DappError::Rpc {
            code: None,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Provider error: boom");
    }

    #[test]
    fn only_user_rejection_is_a_rejection() {
        assert!(DappError::UserRejected.is_rejection());
        assert!(!DappError::Contract("reverted".into()).is_rejection());
        assert!(!DappError::ProviderUnavailable.is_rejection());
    }
}
