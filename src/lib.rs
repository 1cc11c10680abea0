//! Skein256 - Skein-256 hashing on the Threefish-256 block cipher
//!
//! Skein turns the Threefish tweakable block cipher into a hash through
//! Unique Block Iteration (UBI): each 32-byte block is encrypted under the
//! running chaining value with a tweak carrying its position and chain type,
//! and the plaintext is fed forward into the result.
//!
//! ## Chain Order
//!
//! ```text
//! [Key] → Config → [Personal] → [PublicKey] → [KeyId] → [Nonce] → Message → Output
//! ```
//!
//! - **Key**: MAC key, only when configured
//! - **Config**: schema id and output length, always present
//! - **Personal / PublicKey / KeyId / Nonce**: optional domain separation
//! - **Message**: the streamed input
//! - **Output**: counter-keyed expansion to any digest length
//!
//! ## Example
//!
//! ```
//! use skein256::{Config, Skein256};
//!
//! let mut hasher = Skein256::new(32).unwrap();
//! hasher.write(b"hello ");
//! hasher.write(b"world");
//! let digest = hasher.finalize();
//! assert_eq!(digest, skein256::hash(32, b"hello world").unwrap());
//!
//! // Keyed hashing with a nonce
//! let config = Config::new().with_key(b"secret".to_vec()).with_nonce(b"n-1".to_vec());
//! let mac = skein256::hash_with_config(16, &config, b"message").unwrap();
//! assert_eq!(mac.len(), 16);
//! ```

pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod skein;
pub mod threefish;
pub mod ubi;

pub use config::Config;
pub use error::{Result, SkeinError};
pub use skein::{hash, hash_with_config, Skein256};
pub use threefish::Threefish256;
