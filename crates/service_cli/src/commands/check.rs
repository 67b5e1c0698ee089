//! Check command implementation
//!
//! Verifies that the entropy source can seed both sampler variants and that
//! every supported type can be drawn.

use std::io::Write;

use sampler_core::{Random, Sampler};
use serde::Serialize;
use tracing::info;

use crate::config::OutputFormat;
use crate::Result;

#[derive(Debug, Serialize)]
struct CheckReport {
    owned_sampler: &'static str,
    shared_sampler: &'static str,
    types: [&'static str; 4],
}

/// Run the check command
pub fn run(format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    info!("Checking entropy source and sampler variants");

    let mut sampler = Sampler::new()?;
    sampler.int(i32::MIN, i32::MAX)?;
    sampler.uint(0, u32::MAX)?;
    sampler.float(0.0, 1.0)?;
    sampler.double(0.0, 1.0)?;

    Random::int(0, 1)?;

    let report = CheckReport {
        owned_sampler: "ok",
        shared_sampler: "ok",
        types: ["i32", "u32", "f32", "f64"],
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Table | OutputFormat::Csv => {
            writeln!(out, "Owned sampler:  {}", report.owned_sampler)?;
            writeln!(out, "Shared sampler: {}", report.shared_sampler)?;
            writeln!(out, "Types:          {}", report.types.join(", "))?;
        }
    }

    info!("Check complete");
    Ok(())
}
