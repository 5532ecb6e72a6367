// src/core/codec.rs
//! Authenticated encryption of short secrets into text tokens
//!
//! XChaCha20-Poly1305 with a random 192-bit nonce per call. The token header
//! is bound as associated data, so every byte of the token is covered by the
//! tag. Plaintext is released only after the tag verifies.

use std::time::Duration;

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    Key, XChaCha20Poly1305, XNonce,
};
use chrono::Utc;
use zeroize::Zeroize;

use crate::aliases::{DerivedKey32, PlainSecret};
use crate::consts::{DEFAULT_KEY_VERSION, HEADER_LEN, MAX_CLOCK_SKEW_SECS};
use crate::error::CoreError;

use super::token::{decode_token, encode_token, TokenHeader};
use super::Result;

/// Extra checks applied to an authenticated token before its plaintext is released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecryptOptions {
    /// Reject tokens stamped with any other key version
    pub key_version: Option<u8>,
    /// Reject tokens older than this, or stamped too far in the future
    pub max_age: Option<Duration>,
}

impl DecryptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_version(mut self, key_version: u8) -> Self {
        self.key_version = Some(key_version);
        self
    }

    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    fn check(&self, header: &TokenHeader) -> Result<()> {
        if let Some(expected) = self.key_version {
            if header.key_version != expected {
                return Err(CoreError::Authentication);
            }
        }

        if let Some(max_age) = self.max_age {
            let now = Utc::now().timestamp();
            let max_age = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
            if header.issued_at > now.saturating_add(MAX_CLOCK_SKEW_SECS)
                || now.saturating_sub(header.issued_at) > max_age
            {
                return Err(CoreError::Authentication);
            }
        }

        Ok(())
    }
}

/// Encrypt `plaintext` under `key`, stamping the default key version.
pub fn encrypt(plaintext: &str, key: &DerivedKey32) -> Result<String> {
    encrypt_with(plaintext, key, DEFAULT_KEY_VERSION)
}

/// Encrypt `plaintext` under `key`, stamping `key_version` into the header.
pub fn encrypt_with(plaintext: &str, key: &DerivedKey32, key_version: u8) -> Result<String> {
    let header = TokenHeader::fresh(key_version);
    let aad = header.to_bytes();

    let sealed = cipher(key)
        .encrypt(
            XNonce::from_slice(&header.nonce),
            Payload {
                msg: plaintext.as_bytes(),
                aad: &aad,
            },
        )
        .map_err(|_| CoreError::Encoding("plaintext cannot be sealed".to_string()))?;

    let mut raw = Vec::with_capacity(HEADER_LEN + sealed.len());
    raw.extend_from_slice(&aad);
    raw.extend_from_slice(&sealed);
    Ok(encode_token(&raw))
}

/// Decrypt a token with no key-version or age restriction.
pub fn decrypt(token: &str, key: &DerivedKey32) -> Result<PlainSecret> {
    decrypt_with(token, key, &DecryptOptions::default())
}

/// Decrypt a token, then enforce `options` on its (now authenticated) header.
///
/// Every cryptographic rejection is the same `CoreError::Authentication`.
pub fn decrypt_with(
    token: &str,
    key: &DerivedKey32,
    options: &DecryptOptions,
) -> Result<PlainSecret> {
    let raw = decode_token(token)?;
    let (header, body) = TokenHeader::parse(&raw)?;

    let mut plaintext = cipher(key)
        .decrypt(
            XNonce::from_slice(&header.nonce),
            Payload {
                msg: body,
                aad: &raw[..HEADER_LEN],
            },
        )
        .map_err(|_| CoreError::Authentication)?;

    if let Err(err) = options.check(&header) {
        plaintext.zeroize();
        return Err(err);
    }

    match String::from_utf8(plaintext) {
        Ok(text) => Ok(PlainSecret::new(text)),
        Err(err) => {
            err.into_bytes().zeroize();
            Err(CoreError::Encoding(
                "decrypted secret is not valid UTF-8".to_string(),
            ))
        }
    }
}

fn cipher(key: &DerivedKey32) -> XChaCha20Poly1305 {
    XChaCha20Poly1305::new(Key::from_slice(key.expose_secret()))
}
