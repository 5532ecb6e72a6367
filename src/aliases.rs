// src/aliases.rs
//! Secret types used throughout apikey-vault
//!
//! `DerivedKey32` is a secure-gate fixed secret. It has no `Drop` of its own,
//! so holders call `zeroize()` once they are done with it. The variable-length
//! secrets are `zeroize::Zeroizing` buffers, wiped when dropped.

pub use secure_gate::fixed_alias;
use zeroize::Zeroizing;

// Fixed-size secrets
fixed_alias!(DerivedKey32, 32); // 256-bit per-user XChaCha20-Poly1305 key

// Dynamic secrets
pub type MasterSecret = Zeroizing<Vec<u8>>; // Process-wide root of every derived key
pub type PlainSecret = Zeroizing<String>; // A decrypted API key
