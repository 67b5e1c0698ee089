//! Tests for the process-wide sampler.
//!
//! All tests in this binary share one `Random` instance, so assertions about
//! its cache run inside `Random::with` where no other caller can interleave.

use std::thread;

use sampler_core::{Random, SamplerError};

#[test]
fn test_lazy_initialisation() {
    Random::int(0, 1).unwrap();
    assert!(Random::is_initialised());
}

#[test]
fn test_shared_ranges() {
    for _ in 0..10_000 {
        let i = Random::int(-3, 3).unwrap();
        assert!((-3..=3).contains(&i));

        let u = Random::uint(10, 12).unwrap();
        assert!((10..=12).contains(&u));

        let f = Random::float(0.0, 0.5).unwrap();
        assert!((0.0..0.5).contains(&f));

        let d = Random::double(-10.0, 10.0).unwrap();
        assert!((-10.0..10.0).contains(&d));
    }
}

#[test]
fn test_shared_boundary() {
    assert_eq!(Random::sample(5, 5).unwrap(), 5);
    assert_eq!(Random::sample(5u32, 5).unwrap(), 5);
}

#[test]
fn test_shared_invalid_range() {
    assert_eq!(
        Random::int(10, 1).unwrap_err(),
        SamplerError::invalid_range(10, 1)
    );
}

#[test]
fn test_shared_cache_tracks_latest_bounds() {
    Random::with(|sampler| {
        let before = sampler.rebuilds::<i32>();

        sampler.int(0, 10).unwrap();
        sampler.int(0, 10).unwrap();
        assert_eq!(sampler.cached_bounds::<i32>(), Some((0, 10)));

        sampler.int(0, 100).unwrap();
        assert_eq!(sampler.cached_bounds::<i32>(), Some((0, 100)));

        sampler.int(0, 10).unwrap();
        assert_eq!(sampler.cached_bounds::<i32>(), Some((0, 10)));

        // At most one rebuild per bound change; zero if the slot already held [0, 10]
        let rebuilt = sampler.rebuilds::<i32>() - before;
        assert!((2..=3).contains(&rebuilt), "unexpected rebuild count {}", rebuilt);
    })
    .unwrap();
}

#[test]
fn test_shared_fill() {
    let mut buffer = [0.0f32; 512];
    Random::fill(&mut buffer, 1.0, 2.0).unwrap();
    assert!(buffer.iter().all(|v| (1.0..2.0).contains(v)));
}

#[test]
fn test_shared_introspection_after_use() {
    Random::double(0.0, 1.0).unwrap();
    assert!(Random::rebuilds::<f64>() >= 1);
    assert!(Random::cached_bounds::<f64>().is_some());
}

#[test]
fn test_concurrent_shared_calls() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                for _ in 0..5_000 {
                    let v = Random::uint(i, i + 10).unwrap();
                    assert!((i..=i + 10).contains(&v));
                    let d = Random::double(0.0, 1.0).unwrap();
                    assert!((0.0..1.0).contains(&d));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("shared sampling thread panicked");
    }
}

#[test]
fn test_recovers_after_panicking_caller() {
    let result = thread::spawn(|| {
        Random::with(|_| panic!("caller panicked while holding the shared sampler")).ok();
    })
    .join();
    assert!(result.is_err());

    let v = Random::int(1, 2).unwrap();
    assert!((1..=2).contains(&v));
}

#[test]
fn test_nested_shared_call_fails_fast() {
    let nested = Random::with(|sampler| {
        let inner = Random::int(0, 1);
        let outer = sampler.int(0, 1);
        (inner, outer)
    })
    .unwrap();
    assert_eq!(nested.0, Err(SamplerError::SharedReentry));
    assert!(nested.1.is_ok());

    assert_eq!(
        Random::with(|_| Random::with(|s| s.double(0.0, 1.0))).unwrap(),
        Err(SamplerError::SharedReentry)
    );

    // Normal access resumes once the outer closure returns.
    assert!(Random::int(0, 1).is_ok());
}

#[test]
fn test_introspection_inside_with_does_not_block() {
    let seen = Random::with(|sampler| {
        sampler.uint(5, 9).unwrap();
        (Random::is_initialised(), Random::cached_bounds::<u32>(), Random::rebuilds::<u32>())
    })
    .unwrap();
    assert_eq!(seen, (true, None, 0));
}
