use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, Credential, CredentialStore, LocationWeatherResolver, OpenWeatherClient,
    credential::API_KEY_ENV,
};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city or one of its areas")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an OpenWeatherMap API key, replacing any existing one.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London".
        city: String,

        /// Optional area inside the city; must share its state and country.
        #[arg(long)]
        area: Option<String>,
    },

    /// Prompt for city and area repeatedly until cancelled.
    Interactive,

    /// Print where the config file and API key are stored.
    ConfigPath,
}

type Resolver = LocationWeatherResolver<OpenWeatherClient>;

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => {
                let store = CredentialStore::default_location()?;
                let credential = prompt_api_key()?
                    .ok_or_else(|| anyhow!("No API key entered; nothing was changed."))?;
                store.save(&credential)?;
                println!("API key saved to {}", store.path().display());

                let config_path = Config::config_file_path()?;
                if !config_path.exists() {
                    Config::default().save()?;
                    println!("Default config written to {}", config_path.display());
                }
            }
            Command::Show { city, area } => {
                let resolver = build_resolver()?;
                match resolver.resolve(&city, area.as_deref()).await {
                    Ok(payload) => print!("{}", render(&payload)),
                    Err(err) => bail!(err.user_message()),
                }
            }
            Command::Interactive => {
                let resolver = build_resolver()?;
                interactive(&resolver).await?;
            }
            Command::ConfigPath => {
                println!("config:  {}", Config::config_file_path()?.display());
                println!("api key: {}", CredentialStore::default_location()?.path().display());
            }
        }

        Ok(())
    }
}

/// Load config and API key once; everything after this only reads them.
fn build_resolver() -> anyhow::Result<Resolver> {
    let config = Config::load()?;
    let store = CredentialStore::default_location()?;
    let credential = load_or_prompt_credential(&store, store.resolve()?)?;
    let client = OpenWeatherClient::from_config(&config)
        .context("Failed to build HTTP client for OpenWeather")?;

    Ok(LocationWeatherResolver::new(client, credential, config.policy))
}

/// Use `found` if present, otherwise prompt once and persist the answer.
fn load_or_prompt_credential(
    store: &CredentialStore,
    found: Option<Credential>,
) -> anyhow::Result<Credential> {
    if let Some(credential) = found {
        return Ok(credential);
    }

    match prompt_api_key()? {
        Some(credential) => {
            store.save(&credential)?;
            Ok(credential)
        }
        None => Err(anyhow!(
            "API key is required to run the application.\n\
             Hint: run `weather configure` or set {API_KEY_ENV}."
        )),
    }
}

/// `None` when the user declines or enters nothing.
fn prompt_api_key() -> anyhow::Result<Option<Credential>> {
    let answer = Password::new("Please enter your OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt();

    match answer {
        Ok(raw) => Ok(Credential::new(raw)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Failed to read API key"),
    }
}

async fn interactive(resolver: &Resolver) -> anyhow::Result<()> {
    println!("Press Esc or Ctrl-C to quit.");

    loop {
        let Some(city) = prompt_line("City name:")? else {
            return Ok(());
        };
        if city.trim().is_empty() {
            eprintln!("Please enter a city name.");
            continue;
        }

        let Some(area) = prompt_line("Area name (optional):")? else {
            return Ok(());
        };

        match resolver.resolve(&city, Some(area.as_str())).await {
            Ok(payload) => println!("{}", render(&payload)),
            Err(err) => {
                tracing::debug!(error = %err, "lookup failed");
                eprintln!("{}\n", err.user_message());
            }
        }
    }
}

/// `None` once the user cancels the prompt.
fn prompt_line(message: &str) -> anyhow::Result<Option<String>> {
    match Text::new(message).prompt() {
        Ok(line) => Ok(Some(line)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Failed to read input"),
    }
}
