//! Forge Core - Foundational types for Asset Forge
//!
//! This crate provides the types every other forge crate depends on:
//! - `ForgeError` and the `Result` alias
//! - `ContentHash` - SHA-256 based content hashing

mod error;
mod hash;

pub use error::{ForgeError, Result};
pub use hash::ContentHash;
