pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod reference;
pub mod rng;
pub mod schema;
pub mod writer;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::{DefectPolicy, GeneratorConfig, DEFAULT_SEED};
pub use error::{SynthError, SynthResult};
pub use generator::{run, DatasetSink, MemorySink, RunSummary, SiteDataset};
