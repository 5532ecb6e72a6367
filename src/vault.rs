// src/vault.rs
//! The surface the rest of the application talks to
//!
//! Storage flow: `vault.encrypt(api_key, user_id)` → persist the token.
//! Retrieval flow: `vault.decrypt(token, user_id)` → use the API key.
//!
//! The per-user key is derived on every call and zeroized before the call
//! returns.

use std::time::Duration;

use zeroize::Zeroize;

use crate::aliases::{DerivedKey32, MasterSecret, PlainSecret};
use crate::config::Config;
use crate::consts::DEFAULT_KEY_VERSION;
use crate::core::{self, DecryptOptions, KeyDeriver, Result, UserId};

#[derive(Debug)]
pub struct ApiKeyVault {
    deriver: KeyDeriver,
    key_version: u8,
    max_age: Option<Duration>,
}

impl ApiKeyVault {
    pub fn new(deriver: KeyDeriver) -> Self {
        Self {
            deriver,
            key_version: DEFAULT_KEY_VERSION,
            max_age: None,
        }
    }

    pub fn with_key_version(mut self, key_version: u8) -> Self {
        self.key_version = key_version;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let deriver = KeyDeriver::new(MasterSecret::new(config.keys.master_secret.to_vec()))?;
        let vault = Self::new(deriver).with_key_version(config.keys.key_version);
        Ok(match config.max_age() {
            Some(max_age) => vault.with_max_age(max_age),
            None => vault,
        })
    }

    /// Build from the process-wide config (see [`crate::config::load`])
    pub fn from_env() -> Result<Self> {
        Self::from_config(crate::config::load()?)
    }

    pub fn key_version(&self) -> u8 {
        self.key_version
    }

    /// Encrypt an API key for `user`; the returned token is safe to store as text.
    pub fn encrypt(&self, plaintext: &str, user: impl Into<UserId>) -> Result<String> {
        self.with_key(user.into(), |key| core::encrypt_with(plaintext, key, self.key_version))
    }

    /// Decrypt a stored token for `user`.
    ///
    /// A token written for another user, under another key version, past the
    /// configured TTL, or altered in any way yields `CoreError::Authentication`.
    pub fn decrypt(&self, token: &str, user: impl Into<UserId>) -> Result<PlainSecret> {
        let user = user.into();
        let result = self.with_key(user, |key| core::decrypt_with(token, key, &self.options()));

        #[cfg(feature = "logging")]
        if let Err(err) = &result {
            tracing::warn!(user_id = %user, kind = err.kind(), "stored API key rejected");
        }

        result
    }

    fn with_key<T>(&self, user: UserId, op: impl FnOnce(&DerivedKey32) -> T) -> T {
        let mut key = self.deriver.derive(user);
        let out = op(&key);
        key.zeroize();
        out
    }

    fn options(&self) -> DecryptOptions {
        let options = DecryptOptions::new().key_version(self.key_version);
        match self.max_age {
            Some(max_age) => options.max_age(max_age),
            None => options,
        }
    }
}
