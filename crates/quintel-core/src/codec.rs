//! Authenticated symmetric codec for opaque payloads.
//!
//! XChaCha20-Poly1305 with a fresh 192-bit nonce per message. The nonce is
//! drawn from an OS-entropy-keyed [`EntropyStream`], never from the
//! deterministic seeded path — a nonce large enough that random generation
//! cannot collide within a process lifetime.
//!
//! Ciphertexts are self-describing: the binary layout embeds a version tag
//! and the nonce, so decryption needs only the key. The core defines this
//! binary layout; any text-safe transport encoding (base64 at the API
//! boundary) is the caller's concern.

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::entropy::EntropyStream;
use crate::error::CoreError;

/// Ciphertext format version.
const FORMAT_VERSION: u8 = 1;
/// XChaCha20 nonce length.
const NONCE_LEN: usize = 24;
/// Poly1305 tag length.
const TAG_LEN: usize = 16;
/// Shortest well-formed ciphertext: version + nonce + tag (empty plaintext).
const MIN_CIPHERTEXT_LEN: usize = 1 + NONCE_LEN + TAG_LEN;

/// Secret key (256-bit). Zeroized on drop.
///
/// Established once per process or deployment and held only in memory;
/// treated as immutable after construction, so any number of concurrent
/// codec calls may read it without synchronization.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Generate a random key from OS entropy.
    pub fn generate() -> Self {
        let mut stream = EntropyStream::from_os_entropy();
        let mut bytes = [0u8; 32];
        stream.fill(&mut bytes);
        Self(bytes)
    }

    /// Derive a key from caller-supplied material (passphrase, API secret).
    ///
    /// A domain-tagged SHA-256 stretch: deterministic, so the same material
    /// always yields the same key. Fails with
    /// [`CoreError::EmptyKeyMaterial`] when `material` is empty.
    pub fn derive(material: &[u8]) -> Result<Self, CoreError> {
        if material.is_empty() {
            return Err(CoreError::EmptyKeyMaterial);
        }
        let mut state: [u8; 32] = {
            let mut h = Sha256::new();
            h.update(b"quintel.key.v1");
            h.update(material);
            h.finalize().into()
        };
        // Fixed 4096-round stretch to slow brute force on weak material.
        for round in 0u32..4096 {
            let mut h = Sha256::new();
            h.update(state);
            h.update(material);
            h.update(round.to_le_bytes());
            state = h.finalize().into();
        }
        Ok(Self(state))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    // Key material must never reach logs or panic messages.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// An encrypted, self-describing payload.
///
/// Binary layout: `[version: u8][nonce: 24 bytes][body: ciphertext || tag]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext(Vec<u8>);

impl Ciphertext {
    /// Parse from the binary representation, validating the framing.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() < MIN_CIPHERTEXT_LEN {
            return Err(CoreError::InvalidCiphertext(format!(
                "too short: {} bytes, need at least {MIN_CIPHERTEXT_LEN}",
                bytes.len()
            )));
        }
        if bytes[0] != FORMAT_VERSION {
            return Err(CoreError::InvalidCiphertext(format!(
                "unknown format version {}",
                bytes[0]
            )));
        }
        Ok(Self(bytes.to_vec()))
    }

    /// The binary representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the binary representation.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    fn nonce(&self) -> &[u8] {
        &self.0[1..1 + NONCE_LEN]
    }

    fn body(&self) -> &[u8] {
        &self.0[1 + NONCE_LEN..]
    }
}

/// Process-lifetime codec handle wrapping an immutable [`SecretKey`].
///
/// Construct once at initialization and share by reference; all methods
/// take `&self` and are safe for unbounded concurrent use.
pub struct Codec {
    key: SecretKey,
}

impl Codec {
    /// Wrap a key in a codec handle.
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Encrypt `plaintext` under this codec's key.
    ///
    /// Non-deterministic: every call draws a fresh nonce, so repeated
    /// encryption of identical plaintext yields different ciphertexts.
    /// Zero-length plaintext is valid and round-trips.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Ciphertext, CoreError> {
        let mut nonce = [0u8; NONCE_LEN];
        EntropyStream::from_os_entropy().fill(&mut nonce);

        let cipher = XChaCha20Poly1305::new(self.key.as_bytes().into());
        let body = cipher
            .encrypt(XNonce::from_slice(&nonce), plaintext)
            .map_err(|_| CoreError::InvalidInput("plaintext too large for AEAD".into()))?;

        let mut out = Vec::with_capacity(1 + NONCE_LEN + body.len());
        out.push(FORMAT_VERSION);
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&body);
        Ok(Ciphertext(out))
    }

    /// Decrypt a ciphertext produced by [`Codec::encrypt`].
    ///
    /// Fails with [`CoreError::DecryptionFailed`] when authentication fails,
    /// whether from a tampered body or a mismatched key. Structural damage
    /// is caught earlier by [`Ciphertext::from_bytes`] as
    /// [`CoreError::InvalidCiphertext`].
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>, CoreError> {
        let cipher = XChaCha20Poly1305::new(self.key.as_bytes().into());
        cipher
            .decrypt(XNonce::from_slice(ciphertext.nonce()), ciphertext.body())
            .map_err(|_| CoreError::DecryptionFailed)
    }
}
