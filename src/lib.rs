pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{toml_config::TomlConfig, ResolvedConfig};

pub use core::{
    etl::{EtlEngine, RunSummary},
    pipeline::GradePipeline,
};
pub use domain::model::{ClassStatistics, LetterGrade, Student};
pub use utils::error::{GradeError, RecordError, Result};
