// src/core/derive.rs
//! Per-user key derivation
//!
//! `key = SHA-256(master_secret || ":" || decimal(user_id))`
//!
//! The digest is the key. Same inputs always give the same key, and one
//! user's key reveals neither the master secret nor any other user's key.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::aliases::{DerivedKey32, MasterSecret};
use crate::consts::{KDF_SEPARATOR, KEY_LEN};
use crate::error::CoreError;

use super::Result;

/// Caller-supplied user identifier.
///
/// Encoded as plain decimal (no padding, `-` only for negatives), so two
/// distinct ids never produce the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(i64::from(id))
    }
}

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(i64::from(id))
    }
}

/// Derive a user's key straight from raw master-secret bytes.
///
/// Rejects an empty secret with `CoreError::Configuration`. The caller owns
/// the returned key and should `zeroize()` it after use.
pub fn derive_key(master_secret: &[u8], user: UserId) -> Result<DerivedKey32> {
    ensure_usable(master_secret)?;
    Ok(digest(master_secret, user))
}

/// Holds the master secret and derives per-user keys on demand.
///
/// The secret is validated once at construction; `derive` cannot fail.
/// Keys handed out by `derive` are not wiped on drop: call `zeroize()` on them.
pub struct KeyDeriver {
    master: MasterSecret,
}

impl KeyDeriver {
    pub fn new(master: MasterSecret) -> Result<Self> {
        ensure_usable(&master)?;
        Ok(Self { master })
    }

    pub fn from_bytes(master: impl Into<Vec<u8>>) -> Result<Self> {
        Self::new(MasterSecret::new(master.into()))
    }

    pub fn derive(&self, user: UserId) -> DerivedKey32 {
        #[cfg(feature = "logging")]
        tracing::trace!(user_id = %user, "deriving per-user key");

        digest(&self.master, user)
    }
}

impl fmt::Debug for KeyDeriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyDeriver")
            .field("master", &"[REDACTED]")
            .finish()
    }
}

fn ensure_usable(master_secret: &[u8]) -> Result<()> {
    if master_secret.is_empty() {
        return Err(CoreError::Configuration(
            "master secret is empty".to_string(),
        ));
    }
    Ok(())
}

fn digest(master_secret: &[u8], user: UserId) -> DerivedKey32 {
    let mut hasher = Sha256::new();
    hasher.update(master_secret);
    hasher.update(KDF_SEPARATOR);
    hasher.update(user.to_string().as_bytes());
    let mut bytes: [u8; KEY_LEN] = hasher.finalize().into();
    let key = DerivedKey32::new(bytes);
    bytes.zeroize();
    key
}
