pub mod balance;
pub mod claim;
pub mod layout;
pub mod network_warning;
pub mod status;
pub mod wallet_button;
