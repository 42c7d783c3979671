//! Crypto module.

mod errors;
mod sig;

pub use self::{
    errors::{CryptoError, Result},
    sig::{verify_webhook_signature, Signature, SIGNATURE_PREFIX},
};
