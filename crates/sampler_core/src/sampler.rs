//! Owned-instance uniform sampler.
//!
//! This module provides [`Sampler`], a handle that owns its engine and its
//! distribution cache. Distinct samplers share nothing and can live on
//! different threads; a single sampler is driven through `&mut self`.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::entropy::{EntropySource, OsEntropy, SEED_LEN};
use crate::error::Result;
use crate::uniform::{DistributionCache, UniformSample};

/// Uniform random sampler with a per-type distribution cache.
///
/// The engine is seeded once at construction from an [`EntropySource`].
/// Each call names its own bounds; the cached distribution for the type is
/// rebuilt only when those bounds differ from the previous call's.
///
/// # Examples
///
/// ```rust
/// use sampler_core::Sampler;
///
/// let mut sampler = Sampler::new()?;
///
/// // Integers: closed interval [1, 6]
/// let die: i32 = sampler.sample(1, 6)?;
/// assert!((1..=6).contains(&die));
///
/// // Floats: half-open interval [0, 1)
/// let u = sampler.double(0.0, 1.0)?;
/// assert!((0.0..1.0).contains(&u));
///
/// // Inverted bounds are rejected, never swapped
/// assert!(sampler.int(10, 1).is_err());
/// # Ok::<(), sampler_core::SamplerError>(())
/// ```
pub struct Sampler {
    engine: StdRng,
    cache: DistributionCache,
}

impl Sampler {
    /// Creates a sampler seeded from operating-system entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::EntropyUnavailable`](crate::SamplerError::EntropyUnavailable)
    /// if the operating system cannot provide a seed.
    pub fn new() -> Result<Self> {
        Self::from_entropy(OsEntropy)
    }

    /// Creates a sampler seeded from `source`.
    ///
    /// The source is consumed: it is consulted once and then dropped.
    pub fn from_entropy<E: EntropySource>(mut source: E) -> Result<Self> {
        let mut seed = [0u8; SEED_LEN];
        source.fill_seed(&mut seed)?;
        debug!("Seeded sampling engine from entropy source");

        Ok(Self {
            engine: StdRng::from_seed(seed),
            cache: DistributionCache::new(),
        })
    }

    /// Draws a value of type `T` between `min` and `max`.
    ///
    /// The result lies in `[min, max]` for integers and in `[min, max)` for
    /// floats. A float range with `min == max` yields `min`.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` if `min > max`
    /// - `NonFiniteBound` if a float bound is NaN or infinite
    /// - `RangeOverflow` if `max - min` overflows the float type
    #[inline]
    pub fn sample<T: UniformSample>(&mut self, min: T, max: T) -> Result<T> {
        self.cache
            .slot_mut::<T>()
            .sample(&mut self.engine, min, max)
    }

    /// Draws an `i32` in `[min, max]`.
    #[inline]
    pub fn int(&mut self, min: i32, max: i32) -> Result<i32> {
        self.sample(min, max)
    }

    /// Draws a `u32` in `[min, max]`.
    #[inline]
    pub fn uint(&mut self, min: u32, max: u32) -> Result<u32> {
        self.sample(min, max)
    }

    /// Draws an `f32` in `[min, max)`.
    #[inline]
    pub fn float(&mut self, min: f32, max: f32) -> Result<f32> {
        self.sample(min, max)
    }

    /// Draws an `f64` in `[min, max)`.
    #[inline]
    pub fn double(&mut self, min: f64, max: f64) -> Result<f64> {
        self.sample(min, max)
    }

    /// Fills `buffer` with draws between `min` and `max`.
    ///
    /// Bounds are validated once, before any element is written. Empty
    /// buffers are accepted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_core::Sampler;
    ///
    /// let mut sampler = Sampler::new()?;
    /// let mut buffer = vec![0u32; 64];
    /// sampler.fill(&mut buffer, 10, 20)?;
    /// assert!(buffer.iter().all(|v| (10..=20).contains(v)));
    /// # Ok::<(), sampler_core::SamplerError>(())
    /// ```
    pub fn fill<T: UniformSample>(&mut self, buffer: &mut [T], min: T, max: T) -> Result<()> {
        self.cache
            .slot_mut::<T>()
            .fill(&mut self.engine, buffer, min, max)
    }

    /// Bounds currently cached for `T`, if `T` has been sampled.
    #[inline]
    pub fn cached_bounds<T: UniformSample>(&self) -> Option<(T, T)> {
        self.cache.slot::<T>().bounds()
    }

    /// How many times the distribution for `T` has been built.
    #[inline]
    pub fn rebuilds<T: UniformSample>(&self) -> u64 {
        self.cache.slot::<T>().rebuilds()
    }

    /// Read access to the whole distribution cache.
    #[inline]
    pub fn cache(&self) -> &DistributionCache {
        &self.cache
    }
}

impl fmt::Debug for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
