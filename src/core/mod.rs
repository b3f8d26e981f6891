pub mod engine;
pub mod enumerator;

pub use crate::domain::model::{Discovery, EnumerationSummary, Milestone, PrimeList};
pub use crate::domain::ports::{ConfigProvider, MilestoneSink};
pub use crate::utils::error::Result;
