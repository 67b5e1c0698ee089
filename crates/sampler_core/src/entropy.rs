//! One-time seed providers for the sampling engine.
//!
//! An [`EntropySource`] is consulted exactly once, when a
//! [`Sampler`](crate::Sampler) is constructed. The sampler takes the source
//! by value, so a source cannot be reused for a second engine.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Result, SamplerError};

/// Seed size in bytes for the sampling engine.
pub const SEED_LEN: usize = 32;

/// A provider of the initial engine seed.
///
/// Failures are fatal for the sampler being constructed: there is no
/// fallback to a weaker seed.
pub trait EntropySource {
    /// Fills `seed` with entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::EntropyUnavailable`] when the source is
    /// exhausted or cannot be reached.
    fn fill_seed(&mut self, seed: &mut [u8; SEED_LEN]) -> Result<()>;
}

/// Operating-system entropy (`getrandom` on Unix, `BCryptGenRandom` on Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_seed(&mut self, seed: &mut [u8; SEED_LEN]) -> Result<()> {
        OsRng
            .try_fill_bytes(seed)
            .map_err(|e| SamplerError::EntropyUnavailable(e.to_string()))
    }
}
