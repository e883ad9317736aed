//! Core error types.

use thiserror::Error;

/// Failure kinds reported by core operations.
///
/// The core never panics on bad input and never returns a partial result:
/// every operation either fully succeeds or fails with one of these kinds.
/// The transport layer owns the mapping to user-visible statuses.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Seed cannot be normalized to the generator's integer domain.
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// Ciphertext is structurally malformed (wrong length, unknown version).
    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    /// Authentication failed during decryption. A tampered body and a
    /// mismatched key are indistinguishable at this layer.
    #[error("Decryption failed: authentication error")]
    DecryptionFailed,

    /// Malformed or out-of-domain numeric/sequence input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Key material was empty or never initialized.
    #[error("Empty key material")]
    EmptyKeyMaterial,
}
