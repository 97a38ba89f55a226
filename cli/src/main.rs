mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use jpcrosswalk::{default_layer_path, CrosswalkConfig, CrosswalkError};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use commands::crosswalk;

/// Exit code for a missing input layer.
const EXIT_NOT_FOUND: u8 = 2;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

/// Exit code for a failed run: [`EXIT_NOT_FOUND`] for a missing input layer, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CrosswalkError>() {
        Some(CrosswalkError::NotFound { .. }) => EXIT_NOT_FOUND,
        _ => 1,
    }
}

/// Names both default layer locations for the configured years.
fn not_found_hint(config: &CrosswalkConfig) -> String {
    format!(
        "Expected boundary layers at {} and {}",
        default_layer_path(&config.root, config.source_year).display(),
        default_layer_path(&config.root, config.target_year).display(),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match crosswalk::config(&cli.crosswalk) {
        Ok(config) => config,
        Err(err) => {
            error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let Err(err) = crosswalk::run(&cli.crosswalk, &config) else { return ExitCode::SUCCESS };
    error!("{err:#}");
    let code = exit_code(&err);
    if code == EXIT_NOT_FOUND {
        error!("{}", not_found_hint(&config));
    }
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_input_exits_with_two() {
        let err = anyhow::Error::from(CrosswalkError::NotFound { path: PathBuf::from("Data/jpn2000/jpn2000geo.shp") });
        assert_eq!(exit_code(&err), EXIT_NOT_FOUND);
        assert_eq!(EXIT_NOT_FOUND, 2);
    }

    #[test]
    fn other_failures_exit_with_one() {
        let invalid = anyhow::Error::from(CrosswalkError::Invalid("bad threshold".into()));
        let overlay = anyhow::Error::from(CrosswalkError::Overlay {
            context: "source region 0 x target region 3".into(),
            cause: "geometry engine panicked".into(),
        });
        let io = anyhow::anyhow!("failed to write run report");
        assert_eq!(exit_code(&invalid), 1);
        assert_eq!(exit_code(&overlay), 1);
        assert_eq!(exit_code(&io), 1);
    }

    #[test]
    fn hint_names_both_default_layers() {
        let config = CrosswalkConfig { root: PathBuf::from("/data"), ..CrosswalkConfig::new(2015, 1995) };
        let hint = not_found_hint(&config);
        assert!(hint.contains(&PathBuf::from("/data/Data/jpn2015/jpn2015geo.shp").display().to_string()));
        assert!(hint.contains(&PathBuf::from("/data/Data/jpn1995/jpn1995geo.shp").display().to_string()));
    }
}
