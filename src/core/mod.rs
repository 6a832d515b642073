pub mod client;
pub mod engine;
pub mod parse;
pub mod pipeline;

pub use crate::domain::model::{BatchReport, GroupRow, ProvisionOutcome, RowResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
