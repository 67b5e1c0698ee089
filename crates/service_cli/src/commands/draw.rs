//! Draw command implementation
//!
//! Prints uniformly distributed values of one numeric type.

use std::io::Write;
use std::str::FromStr;

use sampler_core::UniformSample;
use serde::Serialize;
use tracing::info;

use super::{draw_values, parse_bound, Kind, Source};
use crate::config::OutputFormat;
use crate::Result;

/// Arguments of the draw command after configuration is resolved
#[derive(Debug, Clone)]
pub struct DrawArgs {
    pub kind: Kind,
    pub min: String,
    pub max: String,
    pub count: usize,
    pub source: Source,
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct DrawReport<T> {
    kind: Kind,
    interval: String,
    min: T,
    max: T,
    source: Source,
    values: Vec<T>,
}

#[derive(Serialize)]
struct DrawRow<T> {
    index: usize,
    value: T,
}

/// Run the draw command
pub fn run(args: &DrawArgs, out: &mut dyn Write) -> Result<()> {
    info!(
        kind = ?args.kind,
        min = %args.min,
        max = %args.max,
        count = args.count,
        source = ?args.source,
        "Drawing values"
    );
    dispatch_kind!(args.kind, draw_typed(args, out))
}

fn draw_typed<T>(args: &DrawArgs, out: &mut dyn Write) -> Result<()>
where
    T: UniformSample + FromStr + Serialize,
{
    let min: T = parse_bound("min", &args.min)?;
    let max: T = parse_bound("max", &args.max)?;
    let values = draw_values(args.source, args.count, min, max)?;

    match args.format {
        OutputFormat::Table => {
            writeln!(
                out,
                "{} x {} in {} with min = {}, max = {}",
                args.count,
                T::TYPE_NAME,
                T::INTERVAL,
                min,
                max
            )?;
            writeln!(out, "{:>8}  value", "#")?;
            for (index, value) in values.iter().enumerate() {
                writeln!(out, "{:>8}  {}", index, value)?;
            }
        }
        OutputFormat::Json => {
            let report = DrawReport {
                kind: args.kind,
                interval: T::INTERVAL.to_string(),
                min,
                max,
                source: args.source,
                values,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for (index, value) in values.into_iter().enumerate() {
                writer.serialize(DrawRow { index, value })?;
            }
            writer.flush()?;
        }
    }

    info!("Draw complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    fn args(kind: Kind, min: &str, max: &str, format: OutputFormat) -> DrawArgs {
        DrawArgs {
            kind,
            min: min.to_string(),
            max: max.to_string(),
            count: 50,
            source: Source::Owned,
            format,
        }
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        run(&args(Kind::I32, "-2", "2", OutputFormat::Json), &mut out).unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["kind"], "i32");
        assert_eq!(report["interval"], "[min, max]");
        assert_eq!(report["source"], "owned");

        let values = report["values"].as_array().unwrap();
        assert_eq!(values.len(), 50);
        for value in values {
            let v = value.as_i64().unwrap();
            assert!((-2..=2).contains(&v));
        }
    }

    #[test]
    fn test_csv_output() {
        let mut out = Vec::new();
        run(&args(Kind::F64, "0", "1", OutputFormat::Csv), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("index,value"));

        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 50);
        for row in rows {
            let (_, value) = row.split_once(',').unwrap();
            let v: f64 = value.parse().unwrap();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_table_output() {
        let mut out = Vec::new();
        let mut draw = args(Kind::U32, "5", "5", OutputFormat::Table);
        draw.source = Source::Shared;
        run(&draw, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("50 x u32 in [min, max] with min = 5, max = 5"));
        assert_eq!(text.lines().count(), 52);
        assert!(text.lines().skip(2).all(|line| line.ends_with("  5")));
    }

    #[test]
    fn test_invalid_range_is_reported() {
        let mut out = Vec::new();
        let err = run(&args(Kind::I32, "10", "1", OutputFormat::Table), &mut out).unwrap_err();
        assert!(matches!(err, CliError::Sampler(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unparseable_bound() {
        let mut out = Vec::new();
        let err = run(&args(Kind::U32, "-1", "3", OutputFormat::Table), &mut out).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
