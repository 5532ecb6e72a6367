// src/core/mod.rs
//! Pure cryptographic operations — no I/O, no global state
//!
//! Key derivation, token framing and the AEAD codec all work on in-memory
//! values only and are safe to call from any number of threads.
mod codec;
mod derive;
mod token;

pub use codec::{decrypt, decrypt_with, encrypt, encrypt_with, DecryptOptions};
pub use derive::{derive_key, KeyDeriver, UserId};
pub use token::TokenHeader;

pub type Result<T> = std::result::Result<T, crate::error::CoreError>;
