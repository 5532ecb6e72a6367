// src/consts.rs
//! Shared constants — token layout and configuration names

/// Current token format version (first byte of every decoded token)
pub const TOKEN_FORMAT_V1: u8 = 0x01;

/// Key version stamped into tokens when the config does not name one
pub const DEFAULT_KEY_VERSION: u8 = 1;

/// Separator between the master secret and the decimal user id.
/// Never appears in a decimal integer, so the split point is unambiguous.
pub const KDF_SEPARATOR: &[u8] = b":";

/// Derived key length in bytes (256-bit)
pub const KEY_LEN: usize = 32;

/// XChaCha20 nonce length
pub const NONCE_LEN: usize = 24;

/// Poly1305 tag length
pub const TAG_LEN: usize = 16;

/// version (1) + key version (1) + issued-at (8) + nonce (24)
pub const HEADER_LEN: usize = 1 + 1 + 8 + NONCE_LEN;

/// Shortest decodable token: header + tag over an empty plaintext
pub const MIN_TOKEN_LEN: usize = HEADER_LEN + TAG_LEN;

/// Tokens stamped further than this into the future are rejected when a TTL applies
pub const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Environment variable holding the master secret
pub const ENV_MASTER_SECRET: &str = "APIKEY_VAULT_MASTER_SECRET";

/// Environment variable pointing at a TOML config file
pub const ENV_CONFIG_PATH: &str = "APIKEY_VAULT_CONFIG";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "apikey-vault.toml";
