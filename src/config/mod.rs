pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct_paths, validate_path, Validate};

#[cfg(feature = "cli")]
use crate::utils::error::GradeError;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "grade-report")]
#[command(about = "Grade a file of student scores and write a class report")]
pub struct CliConfig {
    /// Student file, one `id,name,s1,s2,s3,s4` record per line
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Report file to write
    #[arg(value_name = "OUTPUT")]
    pub output: Option<String>,

    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input_path: Option<String>,

    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Parse and grade without writing the report")]
    pub dry_run: bool,
}

/// Final settings for one run, after flags, config file and prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub input_path: String,
    pub output_path: String,
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl ResolvedConfig {
    /// Picks each path from the `--input`/`--output` flag, then the positional
    /// argument, then the config file, and finally `prompt`.
    pub fn resolve<F>(cli: &CliConfig, file: Option<&TomlConfig>, mut prompt: F) -> Result<Self>
    where
        F: FnMut(&str) -> std::io::Result<String>,
    {
        let file_input = file.and_then(|f| f.input_path());
        let input_path = match first_of(&cli.input_path, &cli.input, file_input) {
            Some(path) => path,
            None => prompt("Enter input filename: ").map_err(|e| GradeError::io("stdin", e))?,
        };

        let file_output = file.and_then(|f| f.output_path());
        let output_path = match first_of(&cli.output_path, &cli.output, file_output) {
            Some(path) => path,
            None => prompt("Enter output filename: ").map_err(|e| GradeError::io("stdin", e))?,
        };

        Ok(Self {
            input_path,
            output_path,
            dry_run: cli.dry_run,
        })
    }
}

#[cfg(feature = "cli")]
fn first_of(
    flag: &Option<String>,
    positional: &Option<String>,
    file: Option<&str>,
) -> Option<String> {
    flag.clone()
        .or_else(|| positional.clone())
        .or_else(|| file.map(str::to_string))
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input.path", &self.input_path)?;
        validate_path("output.path", &self.output_path)?;
        if !self.dry_run {
            validate_distinct_paths(&self.input_path, &self.output_path)?;
        }
        Ok(())
    }
}

impl ConfigProvider for ResolvedConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}
