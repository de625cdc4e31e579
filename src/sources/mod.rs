//! Sources module
//!
//! HTTP transport used for every outgoing call and the account-credentials
//! token request built on top of it.

pub mod account_credentials;
pub mod transport;
