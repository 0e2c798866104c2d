//! Credential acquisition.
//!
//! # Data Flow
//! ```text
//! --token <TOKEN>            → StaticToken
//! --key <KEY_FILE>           → GcloudServiceAccount
//!                                → gcloud auth activate-service-account
//!                                → gcloud auth print-access-token
//! Both                       → TokenProvider::token() → AccessToken
//! ```
//!
//! # Design Decisions
//! - A failed activation is fatal; no API call is attempted without a token
//! - Any other credential source only needs to implement `TokenProvider`

pub mod token;

pub use token::{AccessToken, AuthError, GcloudServiceAccount, StaticToken, TokenProvider};
