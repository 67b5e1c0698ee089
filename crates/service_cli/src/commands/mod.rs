//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

use std::str::FromStr;

use clap::ValueEnum;
use sampler_core::{Random, Sampler, UniformSample};
use serde::Serialize;

use crate::{CliError, Result};

/// Runs a generic function for the numeric type named by a [`Kind`].
macro_rules! dispatch_kind {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            $crate::commands::Kind::I32 => $func::<i32>($($arg),*),
            $crate::commands::Kind::U32 => $func::<u32>($($arg),*),
            $crate::commands::Kind::F32 => $func::<f32>($($arg),*),
            $crate::commands::Kind::F64 => $func::<f64>($($arg),*),
        }
    };
}

pub mod check;
pub mod draw;
pub mod stats;

/// Numeric type to sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    I32,
    U32,
    F32,
    F64,
}

/// Where draws come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A fresh owned sampler for this command
    Owned,
    /// The process-wide sampler
    Shared,
}

impl Source {
    pub fn from_flag(shared: bool) -> Self {
        if shared {
            Source::Shared
        } else {
            Source::Owned
        }
    }
}

/// Parses a bound given on the command line as `T`.
pub(crate) fn parse_bound<T>(name: &str, raw: &str) -> Result<T>
where
    T: UniformSample + FromStr,
{
    raw.trim().parse::<T>().map_err(|_| {
        CliError::InvalidArgument(format!(
            "cannot parse {} bound '{}' as {}",
            name,
            raw,
            T::TYPE_NAME
        ))
    })
}

/// Draws `count` values between `min` and `max` from `source`.
pub(crate) fn draw_values<T: UniformSample>(
    source: Source,
    count: usize,
    min: T,
    max: T,
) -> Result<Vec<T>> {
    let mut values = vec![min; count];
    match source {
        Source::Owned => Sampler::new()?.fill(&mut values, min, max)?,
        Source::Shared => Random::fill(&mut values, min, max)?,
    }
    Ok(values)
}
