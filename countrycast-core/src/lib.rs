//! Core library for the `countrycast` weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client behind a provider abstraction
//! - The screen view-model driving the fetch/reveal lifecycle
//!
//! It is used by `countrycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod provider;
pub mod screen;

pub use config::Config;
pub use model::WeatherSnapshot;
pub use provider::{FetchError, WeatherProvider, weatherapi::WeatherApiProvider};
pub use screen::{FetchRequest, Resolution, RevealTicket, View, WeatherScreen};
