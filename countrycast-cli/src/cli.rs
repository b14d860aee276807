use anyhow::Result;
use clap::{Parser, Subcommand};
use countrycast_core::{
    Config, Resolution, View, WeatherScreen,
    provider::{WeatherProvider, provider_from_config},
};
use inquire::{Password, PasswordDisplayMode, Select};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "countrycast", version, about = "Current weather by country")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive viewer: pick a country, get its current weather. The default.
    Run,

    /// Fetch and print current weather for one query, then exit.
    Show {
        /// Country or region name.
        country: String,
    },

    /// Store your WeatherAPI.com key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Run) {
            Command::Run => run_viewer().await,
            Command::Show { country } => show_once(&country).await,
            Command::Configure => configure(),
        }
    }
}

/// The interactive single-screen loop: fetch for the current selection,
/// render, prompt for the next country. Esc quits.
async fn run_viewer() -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let mut screen = WeatherScreen::new(config.default_country.clone());

    println!("Weather App");
    println!("Select a country to get the current weather.\n");

    let mut request = screen.request_fetch();

    loop {
        render(&screen);

        let result = provider.current(&request.query).await;
        if let Resolution::Loaded(ticket) = screen.resolve(&request, result) {
            tokio::time::sleep(ticket.delay).await;
            screen.reveal(ticket);
        }

        render(&screen);

        let cursor = cursor_for(&config.countries, screen.selection());
        let choice = Select::new("Country", config.countries.clone())
            .with_starting_cursor(cursor)
            .prompt_skippable()?;

        match choice {
            Some(country) => match screen.set_selection(&country) {
                Some(next) => request = next,
                None => break,
            },
            // Esc
            None => break,
        }

        println!();
    }

    Ok(())
}

/// One fetch cycle driven to completion, then a single panel print.
async fn show_once(country: &str) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let mut screen = WeatherScreen::new(country);

    let request = screen.request_fetch();
    let result = provider.current(&request.query).await;

    match screen.resolve(&request, result) {
        Resolution::Loaded(ticket) => {
            tokio::time::sleep(ticket.delay).await;
            screen.reveal(ticket);
            render(&screen);
            Ok(())
        }
        _ => Err(anyhow::anyhow!("Could not fetch weather for '{country}'")),
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

fn render(screen: &WeatherScreen) {
    match screen.view() {
        View::Loading => println!("Loading..."),
        // An invisible panel is rendered as nothing at all, like a card held
        // at opacity zero before its entrance transition.
        View::Screen { snapshot, visible: true, .. } => {
            println!("{}", view::render_panel(snapshot));
        }
        View::Screen { .. } => {}
    }
}

fn cursor_for(countries: &[String], selection: &str) -> usize {
    countries.iter().position(|c| c == selection).unwrap_or(0)
}
