pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{CollectingSink, OutputFormat, WriterSink};
pub use config::{toml_config::TomlConfig, EnumerationSettings, SettingsOverrides};
pub use self::core::{engine::EnumerationEngine, enumerator::PrimeEnumerator};
pub use domain::model::{Discovery, EnumerationSummary, Milestone, PrimeList};
pub use utils::error::{PrimeError, Result};
