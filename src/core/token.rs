// src/core/token.rs
//! Token framing
//!
//! Decoded layout (URL-safe base64, no padding, on the wire):
//!
//! ```text
//! [0]      format version (0x01)
//! [1]      key version
//! [2..10]  issued-at, Unix seconds, big-endian
//! [10..34] XChaCha20 nonce
//! [34..]   ciphertext || Poly1305 tag
//! ```
//!
//! Bytes `[0..34]` are the associated data of the AEAD.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use rand::RngCore;

use crate::consts::{HEADER_LEN, MIN_TOKEN_LEN, NONCE_LEN, TOKEN_FORMAT_V1};
use crate::error::CoreError;

use super::Result;

/// Parsed token header.
///
/// Values returned by [`TokenHeader::inspect`] are *not* authenticated; only
/// a successful decrypt proves they were not altered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenHeader {
    pub version: u8,
    pub key_version: u8,
    pub issued_at: i64,
    pub nonce: [u8; NONCE_LEN],
}

impl TokenHeader {
    /// New v1 header with a fresh random nonce, stamped now
    pub(crate) fn fresh(key_version: u8) -> Self {
        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce);
        Self {
            version: TOKEN_FORMAT_V1,
            key_version,
            issued_at: Utc::now().timestamp(),
            nonce,
        }
    }

    pub(crate) fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0] = self.version;
        out[1] = self.key_version;
        // Pre-epoch clocks are clamped rather than wrapped
        let issued_at = u64::try_from(self.issued_at).unwrap_or(0);
        out[2..10].copy_from_slice(&issued_at.to_be_bytes());
        out[10..].copy_from_slice(&self.nonce);
        out
    }

    /// Split decoded token bytes into header and sealed body.
    pub(crate) fn parse(raw: &[u8]) -> Result<(Self, &[u8])> {
        if raw.len() < MIN_TOKEN_LEN || raw[0] != TOKEN_FORMAT_V1 {
            return Err(CoreError::Authentication);
        }

        let (head, body) = raw.split_at(HEADER_LEN);

        let mut issued_at = [0u8; 8];
        issued_at.copy_from_slice(&head[2..10]);
        let issued_at =
            i64::try_from(u64::from_be_bytes(issued_at)).map_err(|_| CoreError::Authentication)?;

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&head[10..]);

        Ok((
            Self {
                version: head[0],
                key_version: head[1],
                issued_at,
                nonce,
            },
            body,
        ))
    }

    /// Read the header of a token without any key.
    pub fn inspect(token: &str) -> Result<Self> {
        let raw = decode_token(token)?;
        Self::parse(&raw).map(|(header, _)| header)
    }
}

pub(crate) fn encode_token(raw: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(raw)
}

pub(crate) fn decode_token(token: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| CoreError::Encoding(format!("token is not URL-safe base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TAG_LEN;

    fn sample() -> TokenHeader {
        TokenHeader {
            version: TOKEN_FORMAT_V1,
            key_version: 7,
            issued_at: 1_700_000_000,
            nonce: [0xAB; NONCE_LEN],
        }
    }

    #[test]
    fn header_layout_is_fixed() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), 34);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[1], 7);
        assert_eq!(&bytes[2..10], &1_700_000_000u64.to_be_bytes());
        assert!(bytes[10..].iter().all(|b| *b == 0xAB));
    }

    #[test]
    fn parse_splits_header_and_body() {
        let mut raw = sample().to_bytes().to_vec();
        raw.extend_from_slice(&[0x11; TAG_LEN + 3]);

        let (header, body) = TokenHeader::parse(&raw).unwrap();
        assert_eq!(header, sample());
        assert_eq!(body.len(), TAG_LEN + 3);
    }

    #[test]
    fn parse_rejects_short_input() {
        let raw = vec![TOKEN_FORMAT_V1; MIN_TOKEN_LEN - 1];
        assert_eq!(TokenHeader::parse(&raw), Err(CoreError::Authentication));
        assert_eq!(TokenHeader::parse(&[]), Err(CoreError::Authentication));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let mut raw = sample().to_bytes().to_vec();
        raw.extend_from_slice(&[0u8; TAG_LEN]);
        raw[0] = 0x80;
        assert_eq!(TokenHeader::parse(&raw), Err(CoreError::Authentication));
    }

    #[test]
    fn fresh_headers_never_share_a_nonce() {
        let a = TokenHeader::fresh(1);
        let b = TokenHeader::fresh(1);
        assert_ne!(a.nonce, b.nonce);
        assert_eq!(a.version, TOKEN_FORMAT_V1);
    }

    #[test]
    fn inspect_reports_encoding_errors() {
        assert!(matches!(
            TokenHeader::inspect("not base64!"),
            Err(CoreError::Encoding(_))
        ));
    }
}
