use anyhow::{Context, Result};
use clap::Parser;
use rubymetrics::cli::{Cli, Commands};
use rubymetrics::config::{self, RubymetricsConfig};
use rubymetrics::io::output::{create_writer, write_report_to_file, OutputFormat};
use rubymetrics::io::walker::FileWalker;
use rubymetrics::report::{analyze, AnalyzeOptions};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            config,
            top,
            no_parallel,
        } => handle_analyze(path, format.into(), output, config, top, no_parallel),
        Commands::Init { force } => {
            config::init_config(force)?;
            println!("wrote {}", config::CONFIG_FILE_NAME);
            Ok(())
        }
    }
}

fn handle_analyze(
    path: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    top: Option<usize>,
    no_parallel: bool,
) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("cannot resolve {}", path.display()))?;
    let config = RubymetricsConfig::load(config_path.as_deref(), &root)?;

    let discovered = FileWalker::new(root.clone())
        .with_ignore_patterns(config.ignore_patterns.clone())
        .with_extra_extensions(config.extra_extensions.clone())
        .walk()?;
    log::info!(
        "discovered {} source file(s) and {} manifest(s) under {}",
        discovered.sources.len(),
        discovered.manifests.len(),
        root.display()
    );

    let options = AnalyzeOptions {
        largest_files: top.unwrap_or(config.largest_files),
        parallel: !no_parallel,
    };
    let report = analyze(&root, &discovered.sources, &discovered.manifests, &options);

    match output {
        Some(path) => write_report_to_file(&path, format, &report),
        None => create_writer(format).write_report(&report),
    }
}
