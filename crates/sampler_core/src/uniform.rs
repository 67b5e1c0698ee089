//! Per-type uniform distribution cache.
//!
//! Each supported numeric type owns one [`CacheSlot`] inside a
//! [`DistributionCache`]. A slot remembers the bounds of the most recent
//! successful call together with the distribution built for them, and only
//! rebuilds the distribution when a call arrives with different bounds.
//!
//! Interval semantics follow the numeric family:
//!
//! | Type | Interval |
//! |------|----------|
//! | `i32`, `u32` | closed `[min, max]` |
//! | `f32`, `f64` | half-open `[min, max)` |

use std::fmt;

use rand::Rng;
use rand_distr::uniform::SampleUniform;
use rand_distr::{Distribution, Uniform};
use tracing::trace;

use crate::error::{Result, SamplerError};

/// Which end points a draw may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// Both bounds are attainable: `[min, max]`.
    Closed,
    /// The upper bound is excluded: `[min, max)`.
    HalfOpen,
}

impl Interval {
    /// Returns `true` if `value` lies inside the interval spanned by `min` and `max`.
    ///
    /// A degenerate half-open interval (`min == max`) is treated as the single
    /// point `min`, matching what the sampler returns for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sampler_core::Interval;
    ///
    /// assert!(Interval::Closed.contains(1, 6, 6));
    /// assert!(!Interval::HalfOpen.contains(0.0, 1.0, 1.0));
    /// assert!(Interval::HalfOpen.contains(2.5, 2.5, 2.5));
    /// ```
    pub fn contains<T: PartialOrd>(self, min: T, max: T, value: T) -> bool {
        match self {
            Interval::Closed => min <= value && value <= max,
            Interval::HalfOpen if min == max => value == min,
            Interval::HalfOpen => min <= value && value < max,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Closed => write!(f, "[min, max]"),
            Interval::HalfOpen => write!(f, "[min, max)"),
        }
    }
}

mod sealed {
    use rand_distr::uniform::SampleUniform;
    use rand_distr::Uniform;

    use super::{CacheSlot, DistributionCache};
    use crate::error::Result;

    pub trait Sealed: SampleUniform + Copy + PartialOrd + std::fmt::Display + Sized {
        fn check_bounds(min: Self, max: Self) -> Result<()>;

        /// `None` marks a degenerate range that always yields `min`.
        fn distribution(min: Self, max: Self) -> Option<Uniform<Self>>;

        fn slot(cache: &DistributionCache) -> &CacheSlot<Self>;

        fn slot_mut(cache: &mut DistributionCache) -> &mut CacheSlot<Self>;
    }
}

/// Numeric types the sampler can draw: `i32`, `u32`, `f32` and `f64`.
///
/// The trait is sealed; the set of types is closed.
pub trait UniformSample:
    sealed::Sealed + Copy + PartialOrd + fmt::Debug + fmt::Display + Send + 'static
{
    /// Interval semantics for this type.
    const INTERVAL: Interval;

    /// Short type name used in logs and CLI output.
    const TYPE_NAME: &'static str;
}

macro_rules! impl_uniform_int {
    ($($ty:ty => $field:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {
            #[inline]
            fn check_bounds(min: Self, max: Self) -> Result<()> {
                if min > max {
                    return Err(SamplerError::invalid_range(min, max));
                }
                Ok(())
            }

            #[inline]
            fn distribution(min: Self, max: Self) -> Option<Uniform<Self>> {
                Some(Uniform::new_inclusive(min, max))
            }

            #[inline]
            fn slot(cache: &DistributionCache) -> &CacheSlot<Self> {
                &cache.$field
            }

            #[inline]
            fn slot_mut(cache: &mut DistributionCache) -> &mut CacheSlot<Self> {
                &mut cache.$field
            }
        }

        impl UniformSample for $ty {
            const INTERVAL: Interval = Interval::Closed;
            const TYPE_NAME: &'static str = stringify!($ty);
        }
    )*};
}

macro_rules! impl_uniform_float {
    ($($ty:ty => $field:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {
            #[inline]
            fn check_bounds(min: Self, max: Self) -> Result<()> {
                if !min.is_finite() || !max.is_finite() {
                    return Err(SamplerError::non_finite(min, max));
                }
                if min > max {
                    return Err(SamplerError::invalid_range(min, max));
                }
                if !(max - min).is_finite() {
                    return Err(SamplerError::overflow(min, max));
                }
                Ok(())
            }

            #[inline]
            fn distribution(min: Self, max: Self) -> Option<Uniform<Self>> {
                // Uniform::new rejects an empty half-open range
                if min == max {
                    None
                } else {
                    Some(Uniform::new(min, max))
                }
            }

            #[inline]
            fn slot(cache: &DistributionCache) -> &CacheSlot<Self> {
                &cache.$field
            }

            #[inline]
            fn slot_mut(cache: &mut DistributionCache) -> &mut CacheSlot<Self> {
                &mut cache.$field
            }
        }

        impl UniformSample for $ty {
            const INTERVAL: Interval = Interval::HalfOpen;
            const TYPE_NAME: &'static str = stringify!($ty);
        }
    )*};
}

impl_uniform_int!(i32 => int, u32 => uint);
impl_uniform_float!(f32 => float, f64 => double);

enum Shape<T: SampleUniform> {
    Point,
    Spread(Uniform<T>),
}

struct Entry<T: SampleUniform> {
    min: T,
    max: T,
    shape: Shape<T>,
}

/// Cached distribution for one numeric type.
pub struct CacheSlot<T: SampleUniform> {
    entry: Option<Entry<T>>,
    rebuilds: u64,
}

impl<T: SampleUniform> CacheSlot<T> {
    const fn new() -> Self {
        Self {
            entry: None,
            rebuilds: 0,
        }
    }

    /// Number of times the distribution has been (re)built.
    #[inline]
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

impl<T: UniformSample> CacheSlot<T> {
    /// Bounds of the most recent successful call, if any.
    #[inline]
    pub fn bounds(&self) -> Option<(T, T)> {
        self.entry.as_ref().map(|entry| (entry.min, entry.max))
    }

    /// Validates the bounds and swaps in a fresh distribution when they
    /// differ from the cached ones. A rejected call leaves the slot as it was.
    fn prepare(&mut self, min: T, max: T) -> Result<&Entry<T>> {
        T::check_bounds(min, max)?;

        let entry = match self.entry.take() {
            Some(entry) if entry.min == min && entry.max == max => entry,
            _ => {
                self.rebuilds += 1;
                trace!(
                    ty = T::TYPE_NAME,
                    %min,
                    %max,
                    rebuilds = self.rebuilds,
                    "Rebuilding uniform distribution"
                );
                let shape = match T::distribution(min, max) {
                    Some(distribution) => Shape::Spread(distribution),
                    None => Shape::Point,
                };
                Entry { min, max, shape }
            }
        };

        Ok(self.entry.insert(entry))
    }

    /// Draws one value in the interval described by `min` and `max`.
    pub(crate) fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R, min: T, max: T) -> Result<T> {
        let entry = self.prepare(min, max)?;
        Ok(draw(&entry.shape, rng, min))
    }

    /// Fills `buffer` with draws over one set of bounds.
    pub(crate) fn fill<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        buffer: &mut [T],
        min: T,
        max: T,
    ) -> Result<()> {
        let entry = self.prepare(min, max)?;
        for value in buffer.iter_mut() {
            *value = draw(&entry.shape, rng, min);
        }
        Ok(())
    }
}

#[inline]
fn draw<T: SampleUniform + Copy, R: Rng + ?Sized>(shape: &Shape<T>, rng: &mut R, min: T) -> T {
    match shape {
        Shape::Spread(distribution) => distribution.sample(rng),
        Shape::Point => {
            // Consume a draw so engine progress is independent of the bounds
            let _ = rng.next_u64();
            min
        }
    }
}

impl<T: UniformSample> fmt::Debug for CacheSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSlot")
            .field("bounds", &self.bounds())
            .field("rebuilds", &self.rebuilds)
            .finish()
    }
}

/// One distribution slot per supported numeric type.
pub struct DistributionCache {
    int: CacheSlot<i32>,
    uint: CacheSlot<u32>,
    float: CacheSlot<f32>,
    double: CacheSlot<f64>,
}

impl DistributionCache {
    /// Creates an empty cache; every slot is built on first use.
    pub const fn new() -> Self {
        Self {
            int: CacheSlot::new(),
            uint: CacheSlot::new(),
            float: CacheSlot::new(),
            double: CacheSlot::new(),
        }
    }

    /// Slot holding the cached distribution for `T`.
    #[inline]
    pub fn slot<T: UniformSample>(&self) -> &CacheSlot<T> {
        T::slot(self)
    }

    #[inline]
    pub(crate) fn slot_mut<T: UniformSample>(&mut self) -> &mut CacheSlot<T> {
        T::slot_mut(self)
    }
}

impl Default for DistributionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DistributionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributionCache")
            .field("i32", &self.int)
            .field("u32", &self.uint)
            .field("f32", &self.float)
            .field("f64", &self.double)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_interval_semantics() {
        assert_eq!(i32::INTERVAL, Interval::Closed);
        assert_eq!(u32::INTERVAL, Interval::Closed);
        assert_eq!(f32::INTERVAL, Interval::HalfOpen);
        assert_eq!(f64::INTERVAL, Interval::HalfOpen);
    }

    #[test]
    fn test_interval_contains() {
        assert!(Interval::Closed.contains(0, 10, 0));
        assert!(Interval::Closed.contains(0, 10, 10));
        assert!(!Interval::Closed.contains(0, 10, 11));
        assert!(Interval::HalfOpen.contains(0.0, 1.0, 0.0));
        assert!(!Interval::HalfOpen.contains(0.0, 1.0, 1.0));
        assert!(!Interval::HalfOpen.contains(0.0, 1.0, -0.1));
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(Interval::Closed.to_string(), "[min, max]");
        assert_eq!(Interval::HalfOpen.to_string(), "[min, max)");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(i32::TYPE_NAME, "i32");
        assert_eq!(u32::TYPE_NAME, "u32");
        assert_eq!(f32::TYPE_NAME, "f32");
        assert_eq!(f64::TYPE_NAME, "f64");
    }

    #[test]
    fn test_empty_cache() {
        let cache = DistributionCache::new();
        assert_eq!(cache.slot::<i32>().bounds(), None);
        assert_eq!(cache.slot::<u32>().bounds(), None);
        assert_eq!(cache.slot::<f32>().bounds(), None);
        assert_eq!(cache.slot::<f64>().bounds(), None);
        assert_eq!(cache.slot::<f64>().rebuilds(), 0);
    }

    #[test]
    fn test_slot_rebuilds_only_on_bound_change() {
        let mut rng = rng();
        let mut slot = CacheSlot::<i32>::new();

        slot.sample(&mut rng, 0, 10).unwrap();
        slot.sample(&mut rng, 0, 10).unwrap();
        assert_eq!(slot.rebuilds(), 1);

        slot.sample(&mut rng, 0, 100).unwrap();
        assert_eq!(slot.rebuilds(), 2);
        assert_eq!(slot.bounds(), Some((0, 100)));

        slot.sample(&mut rng, 0, 10).unwrap();
        assert_eq!(slot.rebuilds(), 3);
        assert_eq!(slot.bounds(), Some((0, 10)));
    }

    #[test]
    fn test_rejected_call_leaves_slot_untouched() {
        let mut rng = rng();
        let mut slot = CacheSlot::<f64>::new();
        slot.sample(&mut rng, 1.0, 2.0).unwrap();

        assert!(slot.sample(&mut rng, 2.0, 1.0).is_err());
        assert!(slot.sample(&mut rng, f64::NAN, 1.0).is_err());

        assert_eq!(slot.bounds(), Some((1.0, 2.0)));
        assert_eq!(slot.rebuilds(), 1);
    }

    #[test]
    fn test_float_validation() {
        let mut rng = rng();
        let mut slot = CacheSlot::<f64>::new();

        assert!(matches!(
            slot.sample(&mut rng, f64::NAN, 1.0),
            Err(SamplerError::NonFiniteBound { .. })
        ));
        assert!(matches!(
            slot.sample(&mut rng, 0.0, f64::INFINITY),
            Err(SamplerError::NonFiniteBound { .. })
        ));
        assert!(matches!(
            slot.sample(&mut rng, f64::MIN, f64::MAX),
            Err(SamplerError::RangeOverflow { .. })
        ));
        assert!(matches!(
            slot.sample(&mut rng, 3.0, -3.0),
            Err(SamplerError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_degenerate_float_range() {
        let mut rng = rng();
        let mut slot = CacheSlot::<f32>::new();
        for _ in 0..100 {
            assert_eq!(slot.sample(&mut rng, 2.5, 2.5).unwrap(), 2.5);
        }
    }

    #[test]
    fn test_degenerate_range_consumes_engine() {
        let mut advanced = rng();
        let mut untouched = rng();
        let mut slot = CacheSlot::<f64>::new();

        slot.sample(&mut advanced, 1.0, 1.0).unwrap();
        assert_ne!(advanced.next_u64(), untouched.next_u64());
    }

    #[test]
    fn test_fill_uses_single_rebuild() {
        let mut rng = rng();
        let mut slot = CacheSlot::<u32>::new();
        let mut buffer = [0u32; 256];

        slot.fill(&mut rng, &mut buffer, 3, 9).unwrap();

        assert_eq!(slot.rebuilds(), 1);
        assert!(buffer.iter().all(|&v| (3..=9).contains(&v)));
    }

    #[test]
    fn test_full_integer_ranges() {
        let mut rng = rng();
        let mut int = CacheSlot::<i32>::new();
        let mut uint = CacheSlot::<u32>::new();

        for _ in 0..1000 {
            int.sample(&mut rng, i32::MIN, i32::MAX).unwrap();
            uint.sample(&mut rng, 0, u32::MAX).unwrap();
        }
        assert_eq!(int.rebuilds(), 1);
        assert_eq!(uint.rebuilds(), 1);
    }

    #[test]
    fn test_debug_output() {
        let mut rng = rng();
        let mut cache = DistributionCache::default();
        cache.slot_mut::<i32>().sample(&mut rng, 1, 6).unwrap();

        let rendered = format!("{:?}", cache);
        assert!(rendered.contains("Some((1, 6))"));
        assert!(rendered.contains("rebuilds: 1"));
    }
}
