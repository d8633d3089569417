use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use skycast_core::{
    Config, Coordinates, ResolutionController, ResolutionState, TemperatureUnit, WeekdayLocale,
    providers_from_config,
};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather for a place name")]
pub struct Cli {
    /// OpenWeather API key; overrides the configured one.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Display unit; overrides the configured one.
    #[arg(long, short, global = true, value_parser = parse_unit)]
    pub unit: Option<TemperatureUnit>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and display preferences.
    Configure,

    /// Show weather for a place name.
    Show {
        /// Place name, e.g. "Kraków" or "London,GB".
        query: String,
    },

    /// Show weather for explicit coordinates, skipping geocoding.
    At {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Search repeatedly. `:u` switches the unit, `:q` quits.
    Interactive,
}

fn parse_unit(value: &str) -> Result<TemperatureUnit, String> {
    TemperatureUnit::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(key) = self.api_key {
            config.set_api_key(key);
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }

        match self.command {
            Command::Configure => configure(config),
            Command::Show { query } => {
                let controller = controller(&config)?;
                controller.search(&query).await;
                finish(&controller).await
            }
            Command::At { lat, lon } => {
                let controller = controller(&config)?;
                controller.set_coordinates(Coordinates::new(lat, lon));
                finish(&controller).await
            }
            Command::Interactive => interactive(&config).await,
        }
    }
}

fn controller(config: &Config) -> anyhow::Result<ResolutionController> {
    let providers = providers_from_config(config)?;
    Ok(ResolutionController::new(providers.geocoder, providers.weather, config.unit))
}

/// Wait for the cycle, print it, and turn a failure into a non-zero exit.
async fn finish(controller: &ResolutionController) -> anyhow::Result<()> {
    match controller.settled().await {
        ResolutionState::Failed(reason) => bail!("{}", reason.user_message()),
        _ => {
            println!("{}", render(&controller.screen()));
            Ok(())
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;
    if key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(key.trim().to_string());

    let units = vec![TemperatureUnit::C, TemperatureUnit::F];
    let start = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    config.unit = Select::new("Default unit:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read unit")?;

    let locales = vec![LocaleChoice(WeekdayLocale::Pl), LocaleChoice(WeekdayLocale::En)];
    let start = locales.iter().position(|l| l.0 == config.locale).unwrap_or(0);
    config.locale = Select::new("Forecast weekday labels:", locales)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read locale")?
        .0;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

struct LocaleChoice(WeekdayLocale);

impl std::fmt::Display for LocaleChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            WeekdayLocale::Pl => f.write_str("Polish (pon., wt., ...)"),
            WeekdayLocale::En => f.write_str("English (Mon, Tue, ...)"),
        }
    }
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let controller = controller(config)?;
    println!("{}", render(&controller.screen()));

    loop {
        let line = tokio::task::spawn_blocking(|| {
            Text::new("Location:")
                .with_help_message(":u switch °C/°F, :q quit")
                .prompt()
        })
        .await
        .context("Input task failed")?;

        let line = match line {
            Ok(line) => line,
            Err(
                inquire::InquireError::OperationCanceled
                | inquire::InquireError::OperationInterrupted,
            ) => break,
            Err(e) => return Err(e).context("Failed to read location"),
        };

        match line.trim() {
            "" => continue,
            ":q" => break,
            ":u" => {
                let unit = controller.toggle_unit();
                println!("Switched to °{unit}");
            }
            query => {
                controller.search(query).await;
                if controller.state().is_loading() {
                    println!("{}", render(&controller.screen()));
                }
                controller.settled().await;
            }
        }

        println!("{}", render(&controller.screen()));
    }

    Ok(())
}
