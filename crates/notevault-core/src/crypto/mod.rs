//! Cryptographic operations for notevault.
//!
//! - **key**: generation, storage, and loading of the installation key
//! - **cipher**: authenticated encryption of whole-store payloads using age
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the encrypted store or backup files on their own
//! - Silent acceptance of tampered or truncated files
//!
//! We do NOT defend against:
//! - An attacker who can also read the key file or process memory
//! - Compromised OS / keylogger

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt};
pub use key::{KeyManager, StoreKey, KEY_LENGTH};
