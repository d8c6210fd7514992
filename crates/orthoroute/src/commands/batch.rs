use anyhow::{Context, Result};
use colored::Colorize;
use serde::Deserialize;
use std::path::Path;

use super::report::{self, RouteReport};
use crate::cli::{EngineArgs, Format};
use orthoroute::config::Config;
use orthoroute::{Connector, RouteResult, route_connectors};

/// Batch file layout.
#[derive(Debug, Deserialize)]
pub struct BatchFile {
    pub connectors: Vec<Connector>,
}

pub fn parse(contents: &str) -> Result<BatchFile> {
    let batch: BatchFile = serde_yaml::from_str(contents)?;
    Ok(batch)
}

/// Run the batch command.
pub fn run(file: &Path, format: Format, engine: &EngineArgs, quiet: bool) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let batch = parse(&contents).with_context(|| format!("Invalid batch file {}", file.display()))?;
    let config = engine.apply(Config::load_or_default().routing_config())?;

    let output = route_connectors(&batch.connectors, &config);
    let failed = output
        .results
        .iter()
        .filter(|(_, r)| matches!(r, RouteResult::Failure { .. }))
        .count();

    match format {
        Format::Json => {
            let reports: Vec<_> = output
                .results
                .iter()
                .map(|(connector, result)| match result {
                    RouteResult::Success(route) => serde_json::to_value(RouteReport::new(
                        route,
                        Some(&connector.name),
                        false,
                        false,
                    )),
                    RouteResult::Failure { warning } => Ok(serde_json::json!({
                        "name": connector.name,
                        "warning": warning,
                    })),
                })
                .collect::<Result<_, _>>()?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Format::Text => {
            for (connector, result) in &output.results {
                println!("{}", connector.name.bold());
                match result {
                    RouteResult::Success(route) => report::print_route(route, false, false),
                    RouteResult::Failure { warning } => println!("  {}", warning.yellow()),
                }
                println!();
            }
            if !quiet {
                let routed = output.results.len() - failed;
                let summary = format!("Routed {routed}/{} connector(s)", output.results.len());
                if failed == 0 {
                    eprintln!("{}", summary.green());
                } else {
                    eprintln!("{}", summary.yellow());
                }
            }
        }
    }

    if failed > 0 && output.results.len() == failed {
        anyhow::bail!("No connector could be routed");
    }
    Ok(())
}
