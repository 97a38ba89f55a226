use std::fs;

use anyhow::{Context, Result};
use jpcrosswalk::{CrosswalkConfig, RunReport};
use tracing::info;

use crate::cli::CrosswalkArgs;

/// Merge the optional JSON config file with command-line overrides.
pub fn config(args: &CrosswalkArgs) -> Result<CrosswalkConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("[crosswalk] Failed to read config file: {}", path.display()))?;
            serde_json::from_str::<CrosswalkConfig>(&text)
                .with_context(|| format!("[crosswalk] Invalid config file: {}", path.display()))?
        }
        None => CrosswalkConfig::default(),
    };

    if let Some(year) = args.source_year { config.source_year = year }
    if let Some(year) = args.target_year { config.target_year = year }
    if let Some(path) = &args.source_path { config.source_path = Some(path.clone()) }
    if let Some(path) = &args.target_path { config.target_path = Some(path.clone()) }
    if let Some(path) = &args.output_path { config.output_path = Some(path.clone()) }
    if let Some(threshold) = args.weight_threshold { config.weight_threshold = threshold }
    if let Some(root) = &args.root { config.root = root.clone() }

    Ok(config)
}

pub fn run(args: &CrosswalkArgs, config: &CrosswalkConfig) -> Result<RunReport> {
    info!("Creating crosswalk between {} and {}...", config.source_year, config.target_year);

    let report = jpcrosswalk::run(config)?;
    info!("Created crosswalk with {} rows", report.filter.rows_out);

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("[crosswalk] Failed to write run report: {}", path.display()))?;
    }

    Ok(report)
}
