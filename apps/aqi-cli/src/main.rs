//! aqi - PM2.5 prediction from the command line
//!
//! Thin front-end over `aqi-core`: parses readings, loads the model once,
//! prints the assessment.

mod cli;
mod render;

use std::error::Error;
use std::process::ExitCode;

use aqi_core::{
    compute_pm25_assessment, AqiConfig, AqiError, Assessment, ConfigError, LinearModel, Location,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{AssessArgs, Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Commands that never touch the model skip config files
    let config = if cli.command.uses_model() {
        match load_config(&cli) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(exit_code(&AqiError::from(e)));
            }
        }
    } else {
        AqiConfig::default()
    };

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Some(path) = &config.source {
        tracing::debug!(path = %path.display(), "Using config file");
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let code = e.downcast_ref::<AqiError>().map(exit_code).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn load_config(cli: &Cli) -> Result<AqiConfig, ConfigError> {
    let mut config = AqiConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.model.clone(), None);
    config.validate()?;
    Ok(config)
}

fn exit_code(err: &AqiError) -> u8 {
    match err {
        AqiError::InvalidInput(_) => 2,
        AqiError::ModelUnavailable(_) => 3,
        AqiError::Prediction(_) => 4,
        AqiError::Config(_) => 5,
    }
}

fn run(command: Command, config: &AqiConfig) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Assess(args) => {
            let (reading, assessment, location) = assess(&args, config)?;
            if args.json {
                let report = render::Report::new(&reading, &assessment, location.as_ref());
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::assessment_text(&assessment, location.as_ref()));
            }
        }
        Command::Classify { pm25 } => {
            let assessment = Assessment::from_estimate(pm25)?;
            print!("{}", render::assessment_text(&assessment, None));
        }
        Command::Scale { mark } => {
            if let Some(pm25) = mark {
                let assessment = Assessment::from_estimate(pm25)?;
                println!("{pm25} µg/m³ is {}", assessment.category);
            }
            println!("{}", render::scale_table());
            print!("{}", render::scale_bar(mark));
        }
        Command::Pollutants => {
            println!("{}", render::pollutant_table());
        }
        Command::Model => {
            let model = LinearModel::load(&config.model.path).map_err(AqiError::from)?;
            println!("Model: {}", config.model.path.display());
            println!("Target: {}", model.target());
            println!("{}", render::model_table(&model));
        }
    }
    Ok(())
}

fn assess(
    args: &AssessArgs,
    config: &AqiConfig,
) -> aqi_core::Result<(aqi_core::PollutantReading, Assessment, Option<Location>)> {
    // Reject bad input before loading the model
    let location = args.city.as_deref().map(Location::new).transpose()?;
    let reading = args.reading()?;
    aqi_core::build(&reading)?;

    tracing::debug!(path = %config.model.path.display(), "Loading model");
    let predictor = aqi_core::load(&config.model.path)?;
    let assessment = compute_pm25_assessment(predictor.as_ref(), &reading)?;
    Ok((reading, assessment, location))
}
