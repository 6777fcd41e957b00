use anyhow::{Context, Result};
use clap::Parser;
use mortimer::config::Config;
use mortimer::outline::load_outline;
use mortimer::report;
use mortimer::ui::App;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mortimer", version)]
#[command(about = "Walk through the timed sections of an outline file")]
struct Cli {
    /// Outline file: a title line followed by indented `Section (1h2m3s)` lines
    file: PathBuf,
    /// Config file (default: ~/.config/mortimer/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Do not print the report when the session ends
    #[arg(long)]
    no_report: bool,
    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            eprintln!("usage: mortimer <file>");
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load().unwrap_or_else(|err| {
            tracing::warn!("{:#}, using defaults", err);
            Config::default()
        })),
    }
}

fn main() -> Result<()> {
    let cli = parse_args();
    init_tracing(cli.log_file.as_deref())?;

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded configuration");

    let outline = load_outline(&cli.file)?;
    let title = outline.title.clone();

    let mut sections = App::new(outline, &config).run()?;

    if config.show_report() && !cli.no_report {
        report::annotate(&mut sections);
        print!("{}", report::render(&title, &sections));
    }

    Ok(())
}
