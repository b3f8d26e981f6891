// Adapters layer: concrete destinations for milestone notifications.

pub mod sink;

pub use sink::{CollectingSink, OutputFormat, WriterSink};
