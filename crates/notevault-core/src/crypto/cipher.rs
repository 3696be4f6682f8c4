//! Authenticated encryption of store payloads.
//!
//! Payloads are sealed in the age format (https://age-encryption.org/v1)
//! with a scrypt stanza keyed by the base64 form of the [`StoreKey`]. age
//! draws a fresh file key and nonce for every call, so sealing the same
//! plaintext twice yields different ciphertext under the same store key.
//! The body is ChaCha20-Poly1305 in STREAM mode: any modification, a
//! truncation, or the wrong key is rejected instead of producing garbage.

use std::io::{Read, Write};
use std::iter;

use age::secrecy::SecretString;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::crypto::key::StoreKey;
use crate::error::{NoteError, Result};

/// scrypt work factor (N = 2^10).
///
/// The secret is 256 uniformly random bits, so the KDF only has to bind it
/// to the stanza salt.
const SCRYPT_LOG_N: u8 = 10;

fn key_secret(key: &StoreKey) -> SecretString {
    SecretString::from(STANDARD.encode(key.as_bytes()))
}

/// Encrypt `plaintext` under `key`.
///
/// # Examples
///
/// ```
/// use notevault_core::crypto::{decrypt, encrypt, StoreKey};
///
/// let key = StoreKey::generate().unwrap();
/// let sealed = encrypt(b"secret data", &key).unwrap();
/// assert_ne!(sealed.as_slice(), b"secret data");
/// assert_eq!(decrypt(&sealed, &key).unwrap(), b"secret data");
/// ```
pub fn encrypt(plaintext: &[u8], key: &StoreKey) -> Result<Vec<u8>> {
    let mut recipient = age::scrypt::Recipient::new(key_secret(key));
    recipient.set_work_factor(SCRYPT_LOG_N);

    let recipients = iter::once(&recipient as &dyn age::Recipient);
    let encryptor = age::Encryptor::with_recipients(recipients)
        .map_err(|e| NoteError::Encode(format!("Failed to create encryptor: {}", e)))?;

    let mut encrypted = Vec::with_capacity(plaintext.len() + 256);
    let mut writer = encryptor
        .wrap_output(&mut encrypted)
        .map_err(|e| NoteError::Encode(format!("Failed to create encryptor: {}", e)))?;
    writer
        .write_all(plaintext)
        .map_err(|e| NoteError::Encode(format!("Encryption write failed: {}", e)))?;
    writer
        .finish()
        .map_err(|e| NoteError::Encode(format!("Encryption finish failed: {}", e)))?;

    Ok(encrypted)
}

/// Decrypt `ciphertext` produced by [`encrypt`] with the same `key`.
///
/// # Errors
///
/// Returns `NoteError::Authentication` if the key is wrong, the data was
/// modified or truncated, or it is not an age file at all.
pub fn decrypt(ciphertext: &[u8], key: &StoreKey) -> Result<Vec<u8>> {
    let decryptor = age::Decryptor::new(ciphertext)
        .map_err(|e| NoteError::Authentication(format!("Unreadable ciphertext header: {}", e)))?;

    let mut identity = age::scrypt::Identity::new(key_secret(key));
    identity.set_max_work_factor(SCRYPT_LOG_N);

    let mut reader = decryptor
        .decrypt(iter::once(&identity as &dyn age::Identity))
        .map_err(|e| match e {
            age::DecryptError::NoMatchingKeys
            | age::DecryptError::DecryptionFailed
            | age::DecryptError::KeyDecryptionFailed => {
                NoteError::Authentication("Wrong key for this ciphertext".to_string())
            }
            other => NoteError::Authentication(format!("Decryption failed: {}", other)),
        })?;

    let mut decrypted = Vec::new();
    reader
        .read_to_end(&mut decrypted)
        .map_err(|e| {
            NoteError::Authentication(format!("Ciphertext integrity check failed: {}", e))
        })?;

    Ok(decrypted)
}
