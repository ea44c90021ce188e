pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod locate;
pub mod pipeline;
pub mod process;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{PipelineError, Result};
pub use pipeline::{PipelineRunner, RunReport};
pub use types::{DatasetKind, Pipeline, RawSnapshot, TradeSide};
