use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use relaunch::config::{self, Config, Workflow};
use relaunch::docker::{self, DockerCli};
use relaunch::lifecycle::Orchestrator;

/// Stop, rebuild (or pull), and restart a single named container.
#[derive(Parser, Debug)]
#[command(name = "relaunch", version, about)]
struct Cli {
    /// Working directory holding the build definition and env file.
    #[arg(short = 'C', long, default_value = ".")]
    dir: PathBuf,

    /// Config file, relative to the current directory rather than `--dir`.
    /// Defaults to `.relaunch.yaml` in the working directory.
    #[arg(short, long, env = "RELAUNCH_CONFIG")]
    config: Option<PathBuf>,

    /// Image source for this run.
    #[arg(short, long, value_enum)]
    workflow: Option<WorkflowArg>,

    /// Print the run report as JSON on stdout once the workflow finishes.
    /// Logs move to stderr.
    #[arg(long)]
    json: bool,

    /// Log debug output, including every runtime command line.
    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    image: Option<String>,

    #[arg(long)]
    tag: Option<String>,

    /// host:container port mapping.
    #[arg(long)]
    port: Option<String>,

    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Runtime CLI binary (anything with docker-compatible flags).
    #[arg(long, env = "RELAUNCH_RUNTIME")]
    runtime: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WorkflowArg {
    Build,
    Pull,
}

impl From<WorkflowArg> for Workflow {
    fn from(arg: WorkflowArg) -> Self {
        match arg {
            WorkflowArg::Build => Workflow::Build,
            WorkflowArg::Pull => Workflow::Pull,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let dir = std::path::absolute(&cli.dir)
        .with_context(|| format!("invalid working directory {}", cli.dir.display()))?;
    let cfg = load_config(&cli, &dir)?.resolve(&dir);

    if let Err(e) = docker::ensure_available(&cfg.runtime) {
        tracing::warn!("{e:#}");
    }

    let runtime = DockerCli::new(cfg.runtime.clone(), Duration::from_secs(cfg.command_timeout));
    let report = Orchestrator::new(&runtime, &cfg).run(cfg.workflow);

    let failed = report.failed();
    if failed > 0 {
        tracing::warn!("{failed} of {} steps failed", report.steps.len());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "info" };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false);

    // Keep stdout for the report alone.
    if json {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.init();
    }
}

/// Config file first, then CLI overrides on top.
fn load_config(cli: &Cli, dir: &std::path::Path) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => config::load(path)?,
        None => config::load_from_dir(dir)?,
    };

    if let Some(w) = cli.workflow {
        cfg.workflow = w.into();
    }
    if let Some(name) = &cli.name {
        cfg.container_name = name.clone();
    }
    if let Some(image) = &cli.image {
        cfg.image = image.clone();
    }
    if let Some(tag) = &cli.tag {
        cfg.tag = tag.clone();
    }
    if let Some(port) = &cli.port {
        cfg.port = port.clone();
    }
    if let Some(env_file) = &cli.env_file {
        cfg.env_file = env_file.clone();
    }
    if let Some(runtime) = &cli.runtime {
        cfg.runtime = runtime.clone();
    }
    Ok(cfg)
}
