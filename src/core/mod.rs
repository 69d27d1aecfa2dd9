pub mod engine;
pub mod pipeline;
pub mod render;
pub mod source;

pub use crate::domain::model::{Dataset, Report};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
