//! # quintel-core
//!
//! Quantum-inspired numeric compute core: deterministic entropy streams,
//! authenticated encryption, streaming signal analysis, and an aggregate
//! intelligence score.
//!
//! The crate is pure computation over explicit inputs — no I/O, no network,
//! no logging, no ambient state. A transport layer (HTTP, CLI) decodes a
//! request into one of these input types, calls one operation, and
//! serializes the result. Every operation either fully succeeds or fails
//! with one [`CoreError`] kind; a bad request can never affect a
//! concurrent one.
//!
//! ## Quick Start
//!
//! ```
//! use quintel_core::{Codec, SecretKey, Seed, ValueKind, generate};
//!
//! // Reproducible entropy: same seed, same stream, any platform.
//! let stream = generate(Seed::new(42), 32, ValueKind::Bytes).unwrap();
//! assert_eq!(stream.len(), 32);
//!
//! // Authenticated encryption under a process-lifetime key.
//! let codec = Codec::new(SecretKey::generate());
//! let ct = codec.encrypt(b"payload").unwrap();
//! assert_eq!(codec.decrypt(&ct).unwrap(), b"payload");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Seed ──▶ EntropyStream ──▶ generate / aggregate perturbation
//! OS entropy ──▶ EntropyStream ──▶ nonces, key generation
//! SignalWindow ──▶ analyze / process / features / aggregate
//! ```
//!
//! Concurrency model: all operations are synchronous pure functions.
//! [`Codec`] is the only shared value; its key is immutable after
//! construction, so `&Codec` supports unbounded concurrent use with no
//! locking.

pub mod codec;
pub mod entropy;
pub mod error;
pub mod intelligence;
pub mod predict;
pub mod signal;

pub use codec::{Ciphertext, Codec, SecretKey};
pub use entropy::{
    DEFAULT_SEED, EntropyStream, Generated, MAX_GENERATE, Seed, ValueKind, generate,
};
pub use error::CoreError;
pub use intelligence::{IntelligenceSummary, aggregate};
pub use predict::predict;
pub use signal::{
    AnomalyReport, DEFAULT_THRESHOLD, SignalFeatures, SignalWindow, WindowStats, analyze,
    features, process,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
