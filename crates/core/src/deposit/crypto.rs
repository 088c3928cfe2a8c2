//! Encryption-at-rest for account numbers (spec §9, supplemented from
//! `session/userauth/crypto.py` in the original source). Account numbers are
//! stored as `(ciphertext, fingerprint)`: the ciphertext is recoverable only
//! with the process encryption key, the fingerprint is a keyed hash that
//! lets the storage layer enforce global uniqueness and do equality lookups
//! without ever decrypting.

use chacha20poly1305::aead::{Aead, KeyInit, OsRng};
use chacha20poly1305::{AeadCore, ChaCha20Poly1305, Key, Nonce};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Holds the two process-wide secrets needed to encrypt and fingerprint
/// account numbers. Constructed once at startup from configuration (spec §9
/// "global state limited to process configuration").
pub struct AccountNumberCrypto {
    cipher: ChaCha20Poly1305,
    hmac_key: Vec<u8>,
}

impl AccountNumberCrypto {
    pub fn new(encryption_key: &[u8; 32], hmac_key: Vec<u8>) -> Self {
        let cipher = ChaCha20Poly1305::new(Key::from_slice(encryption_key));
        Self { cipher, hmac_key }
    }

    /// Encrypts `account_number`, returning `nonce || ciphertext` as a single
    /// byte vector ready for storage.
    pub fn encrypt(&self, account_number: &str) -> Result<Vec<u8>> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, account_number.as_bytes())
            .map_err(|e| Error::Fatal(format!("account number encryption failed: {e}")))?;
        let mut out = Vec::with_capacity(nonce.len() + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    pub fn decrypt(&self, stored: &[u8]) -> Result<String> {
        if stored.len() < 12 {
            return Err(Error::Fatal("stored account number is truncated".into()));
        }
        let (nonce_bytes, ciphertext) = stored.split_at(12);
        let nonce = Nonce::from_slice(nonce_bytes);
        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| Error::Fatal(format!("account number decryption failed: {e}")))?;
        String::from_utf8(plaintext)
            .map_err(|e| Error::Fatal(format!("decrypted account number is not utf8: {e}")))
    }

    /// Deterministic keyed hash over the account number, hex-encoded.
    /// Same input always yields the same fingerprint, enabling the storage
    /// layer to enforce `deposit_accounts.account_number_fingerprint` as a
    /// unique constraint and to look accounts up by number without ever
    /// decrypting stored ciphertext.
    pub fn fingerprint(&self, account_number: &str) -> String {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.hmac_key)
            .expect("HMAC accepts keys of any length");
        mac.update(account_number.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crypto() -> AccountNumberCrypto {
        AccountNumberCrypto::new(&[7u8; 32], b"test-hmac-key".to_vec())
    }

    #[test]
    fn round_trips_account_number() {
        let c = crypto();
        let stored = c.encrypt("PL61109010140000071219812874").unwrap();
        assert_eq!(c.decrypt(&stored).unwrap(), "PL61109010140000071219812874");
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let c = crypto();
        let a = c.fingerprint("PL61109010140000071219812874");
        let b = c.fingerprint("PL61109010140000071219812874");
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_differs_for_different_numbers() {
        let c = crypto();
        assert_ne!(
            c.fingerprint("PL61109010140000071219812874"),
            c.fingerprint("PL61109010140000071219812875")
        );
    }
}
