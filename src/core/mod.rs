pub mod aggregate;
pub mod etl;
pub mod parser;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{ClassStatistics, RawLine, Student, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
