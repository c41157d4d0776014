//! Command line definition.

use std::path::PathBuf;

use aqi_core::{InputResult, Pollutant, PollutantReading};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aqi", version, about = "Predict PM2.5 and its AQI category")]
pub struct Cli {
    /// Config file (default: ./aqi.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model artifact, overriding the configured path
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict PM2.5 from pollutant readings and classify it
    Assess(AssessArgs),
    /// Classify a PM2.5 value without running the model
    Classify {
        /// PM2.5 concentration in µg/m³
        #[arg(allow_negative_numbers = true)]
        pm25: f64,
    },
    /// Print the AQI reference scale
    Scale {
        /// Mark a PM2.5 value on the scale
        #[arg(long, allow_negative_numbers = true)]
        mark: Option<f64>,
    },
    /// List model inputs, units and defaults
    Pollutants,
    /// Show the loaded model's coefficients
    Model,
}

impl Command {
    /// Whether the command loads the model, and so needs configuration.
    pub fn uses_model(&self) -> bool {
        matches!(self, Command::Assess(_) | Command::Model)
    }
}

#[derive(Debug, Args)]
pub struct AssessArgs {
    /// City the readings were taken in
    #[arg(long)]
    pub city: Option<String>,

    /// Read all eleven readings from a JSON file instead of flags
    #[arg(long, conflicts_with_all = READING_FLAGS)]
    pub from_json: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub readings: ReadingArgs,
}

const READING_FLAGS: [&str; 11] = [
    "pm10", "no", "no2", "nox", "nh3", "co", "so2", "o3", "benzene", "toluene", "xylene",
];

/// One flag per pollutant, pre-filled with the form defaults.
#[derive(Debug, Args)]
pub struct ReadingArgs {
    /// PM10, coarse particles (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::Pm10.default_value())]
    pub pm10: f64,
    /// NO, nitric oxide (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::No.default_value())]
    pub no: f64,
    /// NO2, nitrogen dioxide (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::No2.default_value())]
    pub no2: f64,
    /// NOx, nitrogen oxides (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::Nox.default_value())]
    pub nox: f64,
    /// NH3, ammonia (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::Nh3.default_value())]
    pub nh3: f64,
    /// CO, carbon monoxide (mg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::Co.default_value())]
    pub co: f64,
    /// SO2, sulfur dioxide (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::So2.default_value())]
    pub so2: f64,
    /// O3, ozone (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::O3.default_value())]
    pub o3: f64,
    /// Benzene (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::Benzene.default_value())]
    pub benzene: f64,
    /// Toluene (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::Toluene.default_value())]
    pub toluene: f64,
    /// Xylene (µg/m³)
    #[arg(long, allow_negative_numbers = true, default_value_t = Pollutant::Xylene.default_value())]
    pub xylene: f64,
}

impl ReadingArgs {
    pub fn to_reading(&self) -> PollutantReading {
        PollutantReading {
            pm10: self.pm10,
            no: self.no,
            no2: self.no2,
            nox: self.nox,
            nh3: self.nh3,
            co: self.co,
            so2: self.so2,
            o3: self.o3,
            benzene: self.benzene,
            toluene: self.toluene,
            xylene: self.xylene,
        }
    }
}

impl AssessArgs {
    /// Readings from `--from-json` if given, otherwise from the flags.
    pub fn reading(&self) -> InputResult<PollutantReading> {
        match &self.from_json {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    aqi_core::InputError::Malformed(format!("{}: {}", path.display(), e))
                })?;
                PollutantReading::from_json(&content)
            }
            None => Ok(self.readings.to_reading()),
        }
    }
}
