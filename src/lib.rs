// src/lib.rs
//! apikey-vault — per-user encryption of third-party API keys at rest
//!
//! Features:
//! - SHA-256 per-user key derivation from one master secret
//! - XChaCha20-Poly1305 authenticated tokens, URL-safe text
//! - Versioned token header (format + key version + issue time)
//! - Full secure-gate integration for keys and plaintext

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod error;
pub mod vault;

// Re-export everything users need at the crate root
pub use aliases::{DerivedKey32, MasterSecret, PlainSecret};
pub use config::{load as load_config, Config};
pub use core::{
    decrypt, decrypt_with, derive_key, encrypt, encrypt_with, DecryptOptions, KeyDeriver,
    Result as CoreResult, TokenHeader, UserId,
};
pub use error::CoreError;
pub use vault::ApiKeyVault;
