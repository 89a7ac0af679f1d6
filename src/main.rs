use anyhow::Context;
use clap::Parser;
use grade_report::utils::{logger, validation::Validate};
use grade_report::{
    config::cli::prompt_line, CliConfig, EtlEngine, GradePipeline, LocalStorage, ResolvedConfig,
    TomlConfig,
};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(e.exit_code());
            }
        },
        None => None,
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose());
    let log_json = cli.log_json || file_config.as_ref().is_some_and(|c| c.log_json());
    logger::init_cli_logger(verbose, log_json);

    tracing::info!("Starting grade-report");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut stdout = io::stdout();
    let resolved = ResolvedConfig::resolve(&cli, file_config.as_ref(), |message| {
        prompt_line(&mut reader, &mut stdout, message)
    })
    .context("failed to read file names")?;

    let validation = file_config
        .as_ref()
        .map_or(Ok(()), |c| c.validate())
        .and_then(|_| resolved.validate());
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let dry_run = resolved.dry_run;
    let pipeline = GradePipeline::new(LocalStorage::default(), resolved);
    let engine = EtlEngine::new_with_dry_run(pipeline, dry_run);

    match engine.run_guarded() {
        Ok(summary) => {
            let stats = &summary.statistics;
            tracing::info!(
                "Class average {:.2} across {} students",
                stats.class_average,
                stats.total_students
            );

            match summary.output_path {
                Some(path) => {
                    tracing::info!("✅ Report written to: {}", path);
                    println!(
                        "✅ Report written to {} ({} students, {} lines skipped)",
                        path, summary.students, summary.skipped
                    );
                }
                None => println!(
                    "🔍 Dry run: {} students graded, {} lines skipped, nothing written",
                    summary.students, summary.skipped
                ),
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
