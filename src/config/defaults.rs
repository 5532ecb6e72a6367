// src/config/defaults.rs
use crate::config::app::Tokens;
use crate::consts::DEFAULT_KEY_VERSION;

pub fn default_key_version() -> u8 {
    DEFAULT_KEY_VERSION
}

pub fn default_tokens() -> Tokens {
    Tokens { max_age_secs: None }
}
