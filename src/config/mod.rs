// src/config/mod.rs
//! Configuration system for apikey-vault
//!
//! Central, publish-once global config with TOML + env overrides.
//! There is no built-in master secret: a missing one fails startup.

pub use app::{load, Config, ConfigSource, Keys, Tokens};

mod app;
mod defaults;
