//! Refund triage CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use refund_cli::logging::{LogConfig, LogFormat, init_logging};
use refund_cli::pipeline::{PipelineConfig, run_pipeline};
use refund_cli::summary::{print_summary, write_summary_json};
use refund_forest::ForestConfig;
use refund_output::OutputPaths;

mod cli;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let config = pipeline_config_from_cli(&cli);
    let exit_code = match run_pipeline(&config, &mut io::stdout()) {
        Ok(summary) => {
            print_summary(&summary);
            let written = match &cli.summary_json {
                Some(path) => write_summary_json(&summary, path),
                None => Ok(()),
            };
            match written {
                Ok(()) => 0,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn pipeline_config_from_cli(cli: &Cli) -> PipelineConfig {
    PipelineConfig {
        historical: cli.historical.clone(),
        requests: cli.requests.clone(),
        outputs: OutputPaths {
            approved: cli.approved_out.clone(),
            flagged: cli.flagged_out.clone(),
        },
        test_fraction: cli.test_fraction,
        forest: ForestConfig::default()
            .with_trees(cli.trees)
            .with_max_depth(cli.max_depth)
            .with_seed(cli.seed),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
