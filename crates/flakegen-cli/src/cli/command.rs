use std::{io::Write, time::Instant};

use anyhow::Context;
use flakegen::{GeneratorConfig, SnowflakeGenerator, SnowflakeId, SystemClock, resolve_epoch};

use super::config::{Action, CliConfig};

/// Executes the configured action, writing results to `out`.
pub fn run(config: &CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.action {
        Action::Generate { generator, count } => generate(generator, *count, out),
        Action::Decode { id, start_time } => decode(*id, start_time.as_deref(), out),
    }
}

fn generate(config: &GeneratorConfig, count: usize, out: &mut impl Write) -> anyhow::Result<()> {
    let generator = SnowflakeGenerator::new(config, SystemClock)
        .context("invalid generator configuration")?;

    let start = Instant::now();
    for _ in 0..count {
        writeln!(out, "{}", generator.next_id())?;
    }
    out.flush()?;

    tracing::info!(
        count,
        machine_id = generator.machine_id(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "generated ids"
    );
    Ok(())
}

fn decode(raw: i64, start_time: Option<&str>, out: &mut impl Write) -> anyhow::Result<()> {
    let epoch = resolve_epoch(start_time).context("invalid start time")?;
    let id = SnowflakeId::from_raw(raw);
    let created_at = id
        .created_at(epoch)
        .map_or_else(|| String::from("out of range"), |at| at.to_rfc3339());

    writeln!(out, "id:         {id}")?;
    writeln!(out, "timestamp:  {}", id.timestamp())?;
    writeln!(out, "created_at: {created_at}")?;
    writeln!(out, "machine_id: {}", id.machine_id())?;
    writeln!(out, "sequence:   {}", id.sequence())?;
    Ok(())
}
