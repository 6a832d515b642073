pub mod config;
pub mod core;
pub mod domain;
pub mod notify;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, PLACEHOLDER_CREDENTIAL};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use crate::core::{engine::ProvisionEngine, pipeline::GroupPipeline};
pub use domain::model::{
    BatchReport, GroupRecord, ProvisionOutcome, RowResult, Visibility,
};
pub use utils::error::{ProvisionError, Result};
