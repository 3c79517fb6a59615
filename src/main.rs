use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing::{debug, error, info, warn};

use dinkur_bind::cli::{Cli, LICENSE_CONDITIONS, LICENSE_WARRANTY};
use dinkur_bind::config::{self, Config, ConfigError};
use dinkur_bind::rehydrate::Payload;
use dinkur_bind::{listing, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.license_warranty {
        println!("{LICENSE_WARRANTY}");
        return ExitCode::SUCCESS;
    }
    if cli.license_conditions {
        println!("{LICENSE_CONDITIONS}");
        return ExitCode::SUCCESS;
    }

    let loaded = match &cli.config {
        Some(path) => config::read_file(path),
        None => config::read_auto(),
    };
    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    cli.apply(&mut config);

    if let Err(err) = logging::init(&config.log, cli.verbose) {
        eprintln!("Failed to set up logging: {err}");
        return ExitCode::FAILURE;
    }
    if let Some(err) = load_error {
        warn!(error = %err, "Failed loading config. Continuing with default config.");
    }
    debug!(file = %config.file_used(), "Loaded configuration.");

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<(), Box<dyn Error>> {
    if cli.write_config {
        let path = config::config_path().ok_or(ConfigError::NoConfigDir)?;
        config.save(&path)?;
        info!(path = %path.display(), "Saved configuration.");
        return Ok(());
    }

    let payload = Payload::from(read_payload(cli.payload.as_deref())?).into_value()?;
    let decoded = listing::decode(payload, cli.selection())?;

    let output = if cli.json {
        decoded.to_json()?
    } else {
        decoded.to_text(Utc::now())
    };
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn read_payload(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
