use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode, Select, Text};
use tempcompare_core::{Config, TemperatureUnit, compare, parse_date, provider_from_config};
use tracing::info;

use crate::output::ReportTable;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "tempcompare",
    version,
    about = "Compare a week of daily maximum temperatures across years"
)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG wins if set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and comparison defaults.
    Configure,

    /// Compare 7 days starting at a date with the same days one, ten years
    /// earlier and in the baseline year.
    Compare {
        /// "City, Country" or "City, State"; prompted for when absent.
        place: Option<String>,

        /// First day of the window, YYYY-MM-DD; prompted for when absent.
        #[arg(long)]
        date: Option<String>,

        /// Historical comparison year (default from config, else 1981).
        #[arg(long)]
        baseline_year: Option<i32>,

        /// fahrenheit (f) or celsius (c).
        #[arg(long, value_parser = parse_unit)]
        unit: Option<TemperatureUnit>,

        /// Print the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Compare {
                place,
                date,
                baseline_year,
                unit,
                json,
            } => {
                let config = Config::load()?;

                let place = match place {
                    Some(place) => place,
                    None => prompt_place()?,
                };
                let start = match date {
                    Some(date) => parse_date(&date)?,
                    None => prompt_date()?,
                };
                let (baseline_year, unit) = comparison_settings(baseline_year, unit, &config);
                info!(%place, %start, "Starting comparison");

                let provider = provider_from_config(&config)?;
                let comparison =
                    compare(provider.as_ref(), &place, start, baseline_year).await?;
                let report = comparison.report(unit);

                if json {
                    let out = serde_json::to_string_pretty(&report)
                        .context("Failed to serialize report to JSON")?;
                    println!("{out}");
                } else {
                    print!("{}", ReportTable(&report));
                }
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

/// Command-line flags win over the config file.
fn comparison_settings(
    baseline_year: Option<i32>,
    unit: Option<TemperatureUnit>,
    config: &Config,
) -> (i32, TemperatureUnit) {
    let baseline_year = baseline_year.unwrap_or_else(|| config.baseline_year());
    let unit = unit.unwrap_or(config.unit);
    info!(baseline_year, %unit, "Resolved comparison settings");
    (baseline_year, unit)
}

fn parse_unit(value: &str) -> Result<TemperatureUnit, String> {
    value.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let mut key_prompt = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation();
    if config.api_key().is_some() {
        key_prompt = key_prompt.with_help_message("Leave empty to keep the current key");
    }
    let api_key = key_prompt.prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let baseline_year = CustomType::<i32>::new("Baseline year:")
        .with_default(config.baseline_year())
        .with_error_message("Please type a year, e.g. 1979 or 1981")
        .prompt()?;
    config.baseline_year = Some(baseline_year);

    let units = vec![TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius];
    let cursor = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    config.unit = Select::new("Temperature unit:", units)
        .with_starting_cursor(cursor)
        .prompt()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn prompt_place() -> anyhow::Result<String> {
    let place = Text::new("Enter the city and country or US state you want weather for:")
        .with_help_message("examples: 'Paris, France' or 'Peoria, Illinois'")
        .prompt()?;
    Ok(place)
}

fn prompt_date() -> anyhow::Result<NaiveDate> {
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let input = Text::new("Enter the date in YYYY-MM-DD format:")
        .with_default(&today)
        .prompt()?;
    Ok(parse_date(&input)?)
}
