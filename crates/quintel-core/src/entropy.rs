//! Deterministic seedable entropy streams.
//!
//! The generator is a chained SHA-256 counter expansion: the seed is hashed
//! once into a 32-byte state, and each output block is
//! `SHA-256(state || counter)`. SHA-256 is endian-fixed, so identical seeds
//! produce bit-identical streams across runs and platforms. There is no
//! hidden dependence on wall-clock time, environment, or prior calls.
//!
//! Two seeding paths exist:
//! - [`EntropyStream::from_seed`] — deterministic, for the reproducible
//!   `generate` surface and the seeded intelligence aggregate.
//! - [`EntropyStream::from_os_entropy`] — keyed from the OS CSPRNG, for
//!   nonce and key derivation where reproducibility would be a defect.

use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Default seed for the unauthenticated entropy path.
///
/// A fixed constant rather than wall-clock time: the default path is
/// low-trust and exists to be reproducible and testable.
pub const DEFAULT_SEED: u64 = 42;

/// Upper bound on values produced by a single [`generate`] call.
pub const MAX_GENERATE: usize = 65_536;

/// Normalized generator seed.
///
/// The generator's internal domain is `u64`. Integers of either sign map
/// losslessly (two's complement); floats and strings are accepted only when
/// they denote an exact integer in `i64` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(u64);

impl Seed {
    /// Wrap a raw seed value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Seed from a signed integer. Negative values are reinterpreted as
    /// their two's-complement bit pattern, so every `i64` is a valid seed.
    pub fn from_i64(value: i64) -> Self {
        Self(value as u64)
    }

    /// Seed from a float, failing with [`CoreError::InvalidSeed`] unless the
    /// value is finite, integral, and within `i64` range.
    pub fn from_f64(value: f64) -> Result<Self, CoreError> {
        if !value.is_finite() {
            return Err(CoreError::InvalidSeed(format!("non-finite value {value}")));
        }
        if value.fract() != 0.0 {
            return Err(CoreError::InvalidSeed(format!("non-integral value {value}")));
        }
        if value < i64::MIN as f64 || value >= i64::MAX as f64 {
            return Err(CoreError::InvalidSeed(format!("value {value} out of range")));
        }
        Ok(Self::from_i64(value as i64))
    }

    /// Parse a seed from text: a decimal integer, or a float that denotes
    /// an exact integer (`"7.0"` is accepted, `"7.5"` is not).
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let trimmed = text.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Ok(Self::from_i64(v));
        }
        if let Ok(v) = trimmed.parse::<u64>() {
            return Ok(Self::new(v));
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Self::from_f64(v),
            Err(_) => Err(CoreError::InvalidSeed(format!("unparseable seed {trimmed:?}"))),
        }
    }

    /// Raw seed value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self(DEFAULT_SEED)
    }
}

/// Output kind for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Raw bytes.
    Bytes,
    /// f64 values uniform in [0, 1).
    Floats,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes => write!(f, "bytes"),
            Self::Floats => write!(f, "floats"),
        }
    }
}

/// Values produced by one [`generate`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    Bytes(Vec<u8>),
    Floats(Vec<f64>),
}

impl Generated {
    /// Number of values in the sequence.
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes(b) => b.len(),
            Self::Floats(f) => f.len(),
        }
    }

    /// True when the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A finite-on-demand pseudo-random stream.
///
/// Constructed per call; the only internal state is the 32-byte hash state,
/// a block counter, and the unread tail of the current block. Instances are
/// cheap and never shared across requests.
pub struct EntropyStream {
    state: [u8; 32],
    counter: u64,
    block: [u8; 32],
    block_used: usize,
}

impl EntropyStream {
    /// Deterministic stream keyed by `seed`.
    pub fn from_seed(seed: Seed) -> Self {
        let mut h = Sha256::new();
        h.update(b"quintel.entropy.v1");
        h.update(seed.value().to_le_bytes());
        Self::from_state(h.finalize().into())
    }

    /// Non-reproducible stream keyed from the OS CSPRNG. Used for nonces
    /// and key generation; never for the reproducible `generate` surface.
    pub fn from_os_entropy() -> Self {
        let mut os_random = [0u8; 32];
        os_fill(&mut os_random);
        let mut h = Sha256::new();
        h.update(b"quintel.entropy.os.v1");
        h.update(os_random);
        Self::from_state(h.finalize().into())
    }

    fn from_state(state: [u8; 32]) -> Self {
        Self {
            state,
            counter: 0,
            block: [0u8; 32],
            block_used: 32,
        }
    }

    fn refill(&mut self) {
        let mut h = Sha256::new();
        h.update(self.state);
        h.update(self.counter.to_le_bytes());
        self.block = h.finalize().into();
        self.counter += 1;
        self.block_used = 0;
    }

    /// Fill `buf` with the next bytes of the stream.
    pub fn fill(&mut self, buf: &mut [u8]) {
        let mut filled = 0;
        while filled < buf.len() {
            if self.block_used == 32 {
                self.refill();
            }
            let take = (buf.len() - filled).min(32 - self.block_used);
            buf[filled..filled + take]
                .copy_from_slice(&self.block[self.block_used..self.block_used + take]);
            self.block_used += take;
            filled += take;
        }
    }

    /// Next `n` bytes of the stream.
    pub fn bytes(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.fill(&mut out);
        out
    }

    /// Next u64 of the stream.
    pub fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill(&mut buf);
        u64::from_le_bytes(buf)
    }

    /// Next f64 uniform in [0, 1), from the top 53 bits of a u64 draw.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Next `n` floats uniform in [0, 1).
    pub fn floats(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.next_f64()).collect()
    }
}

/// Generate `count` pseudo-random values of the requested kind.
///
/// Deterministic: identical `(seed, count, kind)` always yields the
/// identical sequence. `count == 0` yields an empty sequence. Counts above
/// [`MAX_GENERATE`] fail with [`CoreError::InvalidInput`] rather than being
/// silently clamped.
pub fn generate(seed: Seed, count: usize, kind: ValueKind) -> Result<Generated, CoreError> {
    if count > MAX_GENERATE {
        return Err(CoreError::InvalidInput(format!(
            "count {count} exceeds maximum {MAX_GENERATE}"
        )));
    }
    let mut stream = EntropyStream::from_seed(seed);
    Ok(match kind {
        ValueKind::Bytes => Generated::Bytes(stream.bytes(count)),
        ValueKind::Floats => Generated::Floats(stream.floats(count)),
    })
}

/// Fill buffer with OS random bytes via the `getrandom` crate.
///
/// # Panics
/// Panics if the OS CSPRNG fails — this indicates a fatal platform issue.
pub(crate) fn os_fill(buf: &mut [u8]) {
    getrandom::fill(buf).expect("OS CSPRNG failed");
}
