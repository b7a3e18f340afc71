//! Prime Grid - command-line entry point
//!
//! Reads the grid configuration (defaults from grid_properties.json,
//! `PRIME_GRID_*` environment variables, then `--<property> <value>`
//! arguments), generates the classified grid and prints its statistics as
//! JSON. When `output.path` is set the full point list is written there too.

use anyhow::{Context, Result};
use prime_grid::config::GridConfig;
use prime_grid::pipeline;
use std::fs::File;
use std::io::BufWriter;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Prime Grid v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args).await {
        error!("✗ Generation failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<()> {
    let config = GridConfig::from_env(parse_args(args));

    let result = pipeline::generate_grid(&config)
        .await
        .context("generating prime grid")?;

    let stats_json =
        serde_json::to_string_pretty(&result.statistics).context("serializing statistics")?;
    println!("{}", stats_json);

    if let Some(path) = &config.output_path {
        let file = File::create(path)
            .with_context(|| format!("creating output file {}", path.display()))?;
        serde_json::to_writer(BufWriter::new(file), &result)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(
            "✓ Wrote {} points to {}",
            result.points.len(),
            path.display()
        );
    }

    Ok(())
}

/// Collect `--<property> <value>` pairs (e.g. `--grid.columns 200`)
fn parse_args(args: &[String]) -> Vec<(String, String)> {
    let mut overrides = Vec::new();
    let mut i = 1;
    while i < args.len() {
        match args[i].strip_prefix("--") {
            Some(name) if i + 1 < args.len() => {
                overrides.push((name.to_string(), args[i + 1].clone()));
                i += 2;
            }
            _ => i += 1,
        }
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args: Vec<String> = ["prime_grid", "--grid.columns", "200", "stray", "--workers", "2", "--dangling"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            parse_args(&args),
            vec![
                ("grid.columns".to_string(), "200".to_string()),
                ("workers".to_string(), "2".to_string()),
            ]
        );
    }
}
