//! Process-wide sampler.
//!
//! [`Random`] is an uninhabited type: it cannot be constructed, only called.
//! All callers in the process share one [`Sampler`] behind a mutex, created
//! on the first call. Cache granularity is one slot per numeric type, shared
//! by every call site.

use std::cell::Cell;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{Result, SamplerError};
use crate::sampler::Sampler;
use crate::uniform::UniformSample;

static SHARED: Mutex<Option<Sampler>> = Mutex::new(None);

thread_local! {
    // Set while this thread runs a `Random::with` closure.
    static BORROWED: Cell<bool> = const { Cell::new(false) };
}

/// Global access point to a lazily seeded, shared [`Sampler`].
///
/// Every call holds the global lock for its duration, so `Random` is safe to
/// call from any thread. Callers that draw heavily from many threads should
/// prefer one [`Sampler`] per thread.
///
/// # Examples
///
/// ```rust
/// use sampler_core::Random;
///
/// let roll = Random::int(1, 6)?;
/// assert!((1..=6).contains(&roll));
///
/// let x: f32 = Random::sample(-1.0, 1.0)?;
/// assert!((-1.0..1.0).contains(&x));
/// # Ok::<(), sampler_core::SamplerError>(())
/// ```
pub enum Random {}

impl Random {
    /// Draws a value of type `T` between `min` and `max` from the shared sampler.
    ///
    /// See [`Sampler::sample`] for interval semantics and errors. If the
    /// shared sampler has not been seeded yet and seeding fails, the entropy
    /// error is returned and seeding is attempted again on the next call.
    #[inline]
    pub fn sample<T: UniformSample>(min: T, max: T) -> Result<T> {
        Self::with(|sampler| sampler.sample(min, max))?
    }

    /// Draws an `i32` in `[min, max]`.
    #[inline]
    pub fn int(min: i32, max: i32) -> Result<i32> {
        Self::sample(min, max)
    }

    /// Draws a `u32` in `[min, max]`.
    #[inline]
    pub fn uint(min: u32, max: u32) -> Result<u32> {
        Self::sample(min, max)
    }

    /// Draws an `f32` in `[min, max)`.
    #[inline]
    pub fn float(min: f32, max: f32) -> Result<f32> {
        Self::sample(min, max)
    }

    /// Draws an `f64` in `[min, max)`.
    #[inline]
    pub fn double(min: f64, max: f64) -> Result<f64> {
        Self::sample(min, max)
    }

    /// Fills `buffer` from the shared sampler under a single lock acquisition.
    pub fn fill<T: UniformSample>(buffer: &mut [T], min: T, max: T) -> Result<()> {
        Self::with(|sampler| sampler.fill(buffer, min, max))?
    }

    /// Runs `f` with exclusive access to the shared sampler.
    ///
    /// No other caller can draw while `f` runs, which makes a sequence of
    /// calls observe a consistent cache. Inside `f`, draw through the
    /// `&mut Sampler` it receives: the global lock is held for the whole
    /// closure, so nested `Random` calls are rejected rather than blocking.
    ///
    /// # Errors
    ///
    /// - [`SamplerError::SharedReentry`] when called from inside another
    ///   `with` closure on the same thread.
    /// - The entropy error if the shared sampler has to be seeded and seeding
    ///   fails. The sampler stays unseeded and the next call tries again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_core::{Random, SamplerError};
    ///
    /// let nested = Random::with(|_| Random::int(0, 1))?;
    /// assert_eq!(nested, Err(SamplerError::SharedReentry));
    /// # Ok::<(), SamplerError>(())
    /// ```
    pub fn with<R>(f: impl FnOnce(&mut Sampler) -> R) -> Result<R> {
        with_in(&SHARED, || OsEntropy, f)
    }

    /// Bounds cached for `T` by the shared sampler; `None` before first use.
    ///
    /// Also `None` inside a [`Random::with`] closure, where the sampler is
    /// only reachable through the closure argument.
    pub fn cached_bounds<T: UniformSample>() -> Option<(T, T)> {
        if is_borrowed() {
            return None;
        }
        lock(&SHARED).as_ref().and_then(Sampler::cached_bounds::<T>)
    }

    /// Rebuild count for `T` in the shared sampler; `0` before first use.
    ///
    /// Also `0` inside a [`Random::with`] closure.
    pub fn rebuilds<T: UniformSample>() -> u64 {
        if is_borrowed() {
            return 0;
        }
        lock(&SHARED).as_ref().map_or(0, Sampler::rebuilds::<T>)
    }

    /// Whether the shared sampler has been seeded.
    pub fn is_initialised() -> bool {
        // A running `with` closure implies a seeded sampler.
        is_borrowed() || lock(&SHARED).is_some()
    }
}

/// Marks the current thread as inside `with` until dropped, including on unwind.
struct Borrow;

impl Borrow {
    fn enter() -> Result<Self> {
        if BORROWED.with(|flag| flag.replace(true)) {
            return Err(SamplerError::SharedReentry);
        }
        Ok(Borrow)
    }
}

impl Drop for Borrow {
    fn drop(&mut self) {
        BORROWED.with(|flag| flag.set(false));
    }
}

fn is_borrowed() -> bool {
    BORROWED.with(Cell::get)
}

/// Lazily seeds the sampler in `cell` from `source` and runs `f` on it.
///
/// `source` is only called when `cell` is empty.
fn with_in<E, R>(
    cell: &Mutex<Option<Sampler>>,
    source: impl FnOnce() -> E,
    f: impl FnOnce(&mut Sampler) -> R,
) -> Result<R>
where
    E: EntropySource,
{
    let _borrow = Borrow::enter()?;
    let mut guard = lock(cell);
    let sampler = match &mut *guard {
        Some(sampler) => sampler,
        slot => {
            let sampler = Sampler::from_entropy(source())?;
            debug!("Initialised process-wide sampler");
            slot.insert(sampler)
        }
    };
    Ok(f(sampler))
}

// Sampling cannot leave the sampler half-updated, so a poisoned lock is
// still safe to reuse.
fn lock(cell: &Mutex<Option<Sampler>>) -> MutexGuard<'_, Option<Sampler>> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}
