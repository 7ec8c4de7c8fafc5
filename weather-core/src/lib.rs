//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The OpenWeatherMap lookup client and its HTTP transport seam
//! - Client configuration and the on-disk config file
//! - The error taxonomy shared with the binary
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod transport;

pub use client::{UNITS, WeatherClient};
pub use config::{ClientConfig, Config};
pub use error::WeatherError;
pub use model::{RawResponse, WeatherPayload};
pub use transport::{HttpTransport, ReqwestTransport};
