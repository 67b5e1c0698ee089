//! # Uniform Random Sampler
//!
//! Ergonomic uniform sampling of `i32`, `u32`, `f32` and `f64` values within
//! caller-specified bounds, without managing engines or distribution objects.
//!
//! ## Variants
//!
//! - [`Sampler`]: an owned handle with its own engine and distribution cache.
//!   This is the recommended entry point.
//! - [`Random`]: a process-wide sampler behind a mutex, seeded on first use.
//!
//! ## Interval Semantics
//!
//! | Type | Result |
//! |------|--------|
//! | `i32`, `u32` | `[min, max]` |
//! | `f32`, `f64` | `[min, max)` |
//!
//! `min > max` is rejected with [`SamplerError::InvalidRange`]; bounds are
//! never clamped or swapped.
//!
//! ## Distribution Cache
//!
//! Each numeric type has one cached distribution per sampler. It is rebuilt
//! only when a call arrives with bounds different from the previous call's,
//! so repeated calls with the same bounds reuse it.
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_core::{Random, Sampler};
//!
//! let mut sampler = Sampler::new()?;
//! let index: u32 = sampler.sample(0, 9)?;
//! let weight = sampler.float(0.5, 1.5)?;
//! assert!(index <= 9);
//! assert!((0.5..1.5).contains(&weight));
//!
//! let coin = Random::int(0, 1)?;
//! assert!(coin == 0 || coin == 1);
//! # Ok::<(), sampler_core::SamplerError>(())
//! ```
//!
//! ## Non-goals
//!
//! Not suitable for cryptography, and seeds are not exposed for replay.

pub mod entropy;
pub mod error;
pub mod sampler;
pub mod shared;
pub mod uniform;

// Public re-exports
pub use entropy::{EntropySource, OsEntropy, SEED_LEN};
pub use error::{Result, SamplerError};
pub use sampler::Sampler;
pub use shared::Random;
pub use uniform::{DistributionCache, Interval, UniformSample};
