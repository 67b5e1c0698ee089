//! Stats command implementation
//!
//! Draws a batch of values and reports empirical moments together with a
//! chi-square uniformity statistic.

use std::io::Write;
use std::str::FromStr;

use sampler_core::{Interval, UniformSample};
use serde::Serialize;
use tracing::{info, warn};

use super::{draw_values, parse_bound, Kind, Source};
use crate::config::OutputFormat;
use crate::Result;

/// Arguments of the stats command after configuration is resolved
#[derive(Debug, Clone)]
pub struct StatsArgs {
    pub kind: Kind,
    pub min: String,
    pub max: String,
    pub count: usize,
    pub bins: usize,
    pub source: Source,
    pub format: OutputFormat,
}

/// Empirical summary of a batch of draws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub observed_min: f64,
    pub observed_max: f64,
    pub mean: f64,
    pub expected_mean: f64,
    pub bins: usize,
    pub chi_square: f64,
    pub degrees_of_freedom: usize,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    kind: &'static str,
    interval: String,
    min: String,
    max: String,
    source: Source,
    #[serde(flatten)]
    summary: Summary,
}

/// Run the stats command
pub fn run(args: &StatsArgs, out: &mut dyn Write) -> Result<()> {
    info!(
        kind = ?args.kind,
        min = %args.min,
        max = %args.max,
        count = args.count,
        bins = args.bins,
        "Computing sample statistics"
    );
    dispatch_kind!(args.kind, stats_typed(args, out))
}

fn stats_typed<T>(args: &StatsArgs, out: &mut dyn Write) -> Result<()>
where
    T: UniformSample + FromStr + Into<f64>,
{
    let min: T = parse_bound("min", &args.min)?;
    let max: T = parse_bound("max", &args.max)?;
    let values = draw_values(args.source, args.count, min, max)?;
    let summary = summarise(&values, min, max, args.bins);

    if summary.bins < args.bins {
        warn!(
            requested = args.bins,
            used = summary.bins,
            "Fewer distinct values than bins; bin count reduced"
        );
    }

    let report = StatsReport {
        kind: T::TYPE_NAME,
        interval: T::INTERVAL.to_string(),
        min: min.to_string(),
        max: max.to_string(),
        source: args.source,
        summary,
    };

    match args.format {
        OutputFormat::Table => write_table(&report, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.serialize(&report.summary)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_table(report: &StatsReport, out: &mut dyn Write) -> Result<()> {
    let s = &report.summary;
    writeln!(
        out,
        "{} draws of {} in {} with min = {}, max = {}",
        s.count, report.kind, report.interval, report.min, report.max
    )?;
    writeln!(out, "  observed min   {}", s.observed_min)?;
    writeln!(out, "  observed max   {}", s.observed_max)?;
    writeln!(out, "  mean           {:.6}", s.mean)?;
    writeln!(out, "  expected mean  {:.6}", s.expected_mean)?;
    writeln!(
        out,
        "  chi-square     {:.4} ({} bins, {} dof)",
        s.chi_square, s.bins, s.degrees_of_freedom
    )?;
    Ok(())
}

/// Summarises `values` drawn between `min` and `max`.
///
/// Integer ranges are binned over their distinct values, so the bin count is
/// capped by the number of integers in the range and each bin's expected
/// share is proportional to the integers it covers. Float ranges use equal
/// width bins.
pub fn summarise<T>(values: &[T], min: T, max: T, bins: usize) -> Summary
where
    T: UniformSample + Into<f64>,
{
    let lo: f64 = min.into();
    let hi: f64 = max.into();

    let span = match T::INTERVAL {
        Interval::Closed => hi - lo + 1.0,
        Interval::HalfOpen => hi - lo,
    };
    let bins = match T::INTERVAL {
        Interval::Closed => bins.min(span as usize).max(1),
        Interval::HalfOpen if span == 0.0 => 1,
        Interval::HalfOpen => bins.max(1),
    };

    let mut counts = vec![0usize; bins];
    let mut sum = 0.0;
    let mut observed_min = f64::INFINITY;
    let mut observed_max = f64::NEG_INFINITY;
    for &value in values {
        let x: f64 = value.into();
        sum += x;
        observed_min = observed_min.min(x);
        observed_max = observed_max.max(x);

        let index = if span > 0.0 {
            ((x - lo) * bins as f64 / span).floor() as usize
        } else {
            0
        };
        counts[index.min(bins - 1)] += 1;
    }

    let count = values.len();
    let chi_square = if count == 0 {
        0.0
    } else {
        counts
            .iter()
            .zip(bin_weights(T::INTERVAL, span, bins))
            .map(|(&observed, weight)| {
                let expected = weight * count as f64;
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum()
    };

    Summary {
        count,
        observed_min,
        observed_max,
        mean: if count == 0 { f64::NAN } else { sum / count as f64 },
        expected_mean: match T::INTERVAL {
            Interval::Closed => (lo + hi) / 2.0,
            Interval::HalfOpen => lo + (hi - lo) / 2.0,
        },
        bins,
        chi_square,
        degrees_of_freedom: bins - 1,
    }
}

/// Probability mass of each bin under a uniform draw.
fn bin_weights(interval: Interval, span: f64, bins: usize) -> Vec<f64> {
    match interval {
        // Bin b holds the integers k with floor(k * bins / span) == b
        Interval::Closed => (0..bins)
            .map(|b| {
                let start = (b as f64 * span / bins as f64).ceil();
                let end = ((b + 1) as f64 * span / bins as f64).ceil();
                (end - start) / span
            })
            .collect(),
        Interval::HalfOpen => vec![1.0 / bins as f64; bins],
    }
}
