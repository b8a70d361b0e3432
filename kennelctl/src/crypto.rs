//! AES-256-GCM encryption for stored third-party credentials.
//!
//! Encrypted payloads are stored as `base64(iv):base64(ciphertext)` with a
//! fresh random 96-bit IV per encryption. The key is 32 bytes, passed in as
//! a base64 string so callers can source it from configuration.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Encryption key must be valid base64: {0}")]
    InvalidKeyEncoding(#[from] base64::DecodeError),

    #[error("Encryption key must be 32 bytes (256 bits), got {0} bytes")]
    InvalidKeyLength(usize),

    #[error("Encrypted payload must be in iv:ciphertext format")]
    MalformedPayload,

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Failed to serialize plaintext: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

fn decode_key(key_b64: &str) -> Result<[u8; 32]> {
    let key_bytes = general_purpose::STANDARD.decode(key_b64)?;
    let len = key_bytes.len();
    key_bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength(len))
}

/// Serializes `value` as JSON and encrypts it with AES-256-GCM.
///
/// Returns the payload as `base64(iv):base64(ciphertext)`. Each call uses a
/// fresh random IV, so encrypting the same value twice produces different
/// output.
pub fn encrypt_json<T: Serialize>(value: &T, key_b64: &str) -> Result<String> {
    let key = decode_key(key_b64)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::EncryptionFailed)?;

    let mut iv = [0u8; 12];
    rand::rng().fill(&mut iv);
    let nonce = Nonce::from_slice(&iv);

    let plaintext = serde_json::to_vec(value)?;
    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_slice())
        .map_err(|_| CryptoError::EncryptionFailed)?;

    Ok(format!(
        "{}:{}",
        general_purpose::STANDARD.encode(iv),
        general_purpose::STANDARD.encode(ciphertext)
    ))
}

/// Decrypts a payload produced by [`encrypt_json`] and parses it as JSON.
pub fn decrypt_json(payload: &str, key_b64: &str) -> Result<serde_json::Value> {
    let key = decode_key(key_b64)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::DecryptionFailed)?;

    let (iv_b64, ct_b64) = payload
        .split_once(':')
        .ok_or(CryptoError::MalformedPayload)?;

    let iv = general_purpose::STANDARD
        .decode(iv_b64)
        .map_err(|_| CryptoError::MalformedPayload)?;
    if iv.len() != 12 {
        return Err(CryptoError::MalformedPayload);
    }
    let ciphertext = general_purpose::STANDARD
        .decode(ct_b64)
        .map_err(|_| CryptoError::MalformedPayload)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&iv), ciphertext.as_slice())
        .map_err(|_| CryptoError::DecryptionFailed)?;

    Ok(serde_json::from_slice(&plaintext)?)
}

/// Generates a random 256-bit encryption key, base64 encoded.
///
/// Intended for operators bootstrapping a new deployment.
pub fn generate_key() -> String {
    let mut key = [0u8; 32];
    rand::rng().fill(&mut key);
    general_purpose::STANDARD.encode(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_key() -> String {
        general_purpose::STANDARD.encode([7u8; 32])
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = test_key();
        let value = json!({
            "access_token": "EAAAl1234",
            "application_id": "sq0idp-abc",
            "is_active": true,
        });

        let encrypted = encrypt_json(&value, &key).expect("encryption should succeed");
        let decrypted = decrypt_json(&encrypted, &key).expect("decryption should succeed");

        assert_eq!(decrypted, value);
    }

    #[test]
    fn test_payload_format() {
        let key = test_key();
        let encrypted = encrypt_json(&json!({"a": 1}), &key).unwrap();

        let parts: Vec<&str> = encrypted.split(':').collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(
            general_purpose::STANDARD.decode(parts[0]).unwrap().len(),
            12
        );
        assert!(general_purpose::STANDARD.decode(parts[1]).is_ok());
    }

    #[test]
    fn test_distinct_ivs_per_encryption() {
        let key = test_key();
        let value = json!({"same": "plaintext"});

        let first = encrypt_json(&value, &key).unwrap();
        let second = encrypt_json(&value, &key).unwrap();

        assert_ne!(first, second);
        assert_eq!(decrypt_json(&first, &key).unwrap(), value);
        assert_eq!(decrypt_json(&second, &key).unwrap(), value);
    }

    #[test]
    fn test_invalid_key_length() {
        let short_key = general_purpose::STANDARD.encode([0u8; 16]);
        let result = encrypt_json(&json!({}), &short_key);

        assert!(matches!(result, Err(CryptoError::InvalidKeyLength(16))));
    }

    #[test]
    fn test_invalid_key_encoding() {
        let result = encrypt_json(&json!({}), "not base64!!!");
        assert!(matches!(result, Err(CryptoError::InvalidKeyEncoding(_))));
    }

    #[test]
    fn test_malformed_payload() {
        let key = test_key();

        assert!(matches!(
            decrypt_json("no-separator", &key),
            Err(CryptoError::MalformedPayload)
        ));
        assert!(matches!(
            decrypt_json("!!!:!!!", &key),
            Err(CryptoError::MalformedPayload)
        ));
        // IV of the wrong length
        let bad_iv = general_purpose::STANDARD.encode([0u8; 4]);
        let ct = general_purpose::STANDARD.encode([0u8; 32]);
        assert!(matches!(
            decrypt_json(&format!("{bad_iv}:{ct}"), &key),
            Err(CryptoError::MalformedPayload)
        ));
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let key = test_key();
        let other_key = general_purpose::STANDARD.encode([9u8; 32]);

        let encrypted = encrypt_json(&json!({"secret": true}), &key).unwrap();
        let result = decrypt_json(&encrypted, &other_key);

        assert!(matches!(result, Err(CryptoError::DecryptionFailed)));
    }

    #[test]
    fn test_generate_key_is_valid() {
        let key = generate_key();
        assert!(decode_key(&key).is_ok());
        assert_ne!(generate_key(), key);
    }
}
