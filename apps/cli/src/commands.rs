//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use victory_core::{
    BuildContext, DEFAULT_TASK, PipelineRunner, ProgressReporter, RunReport, Step, StepOutcome,
    StepReport, TaskKind, TaskRegistry,
};
use victory_shared::{VictoryError, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Victory.css build tool.
#[derive(Parser)]
#[command(
    name = "victory",
    version,
    about = "Build the Victory.css stylesheets, scripts, examples index and README page.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Project root; all configured paths resolve against it.
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Fail the build on Sass compile errors instead of logging them.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `run default`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run one or more tasks in order.
    Run {
        /// Task names (see `victory tasks`). Defaults to `default`.
        tasks: Vec<String>,
    },

    /// List available tasks.
    Tasks,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a victory.toml with defaults into the project root.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "warn,victory=info",
        1 => "warn,victory=debug",
        _ => "victory=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => cmd_run(&cli.root, cli.strict, Vec::new()),
        Some(Command::Run { tasks }) => cmd_run(&cli.root, cli.strict, tasks),
        Some(Command::Tasks) => cmd_tasks(),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(&cli.root),
            ConfigAction::Show => cmd_config_show(&cli.root),
        },
    }
}

fn cmd_run(root: &Path, strict: bool, mut tasks: Vec<String>) -> Result<()> {
    if !root.is_dir() {
        return Err(eyre!("project root '{}' is not a directory", root.display()));
    }

    let mut config = load_config(root)?;
    if strict {
        config.strict_styles = true;
    }

    if tasks.is_empty() {
        tasks.push(DEFAULT_TASK.to_string());
    }

    info!(root = %root.display(), ?tasks, strict = config.strict_styles, "running tasks");

    let ctx = BuildContext::new(root, config);
    let runner = PipelineRunner::new(&ctx);
    let reporter = CliProgress::new();

    let report = runner.run(tasks.as_slice(), &reporter)?;

    // Print summary
    println!();
    for step in &report.steps {
        match &step.outcome {
            StepOutcome::Written(artifacts) => {
                for artifact in artifacts {
                    println!(
                        "  {:<28} {:>8} B  {}",
                        artifact.filename,
                        artifact.size_bytes,
                        &artifact.sha256[..12]
                    );
                }
            }
            StepOutcome::Skipped { reason } => {
                println!("  skipped {}: {reason}", step.step);
            }
        }
    }
    println!();
    println!(
        "  {} step(s) in {:.1}s",
        report.steps.len(),
        report.elapsed.as_secs_f64()
    );
    println!();

    Ok(())
}

fn cmd_tasks() -> Result<()> {
    let registry = TaskRegistry::builtin();
    for task in registry.tasks() {
        match &task.kind {
            TaskKind::Leaf(_) => println!("  {:<16} {}", task.name, task.description),
            TaskKind::Series(children) => println!(
                "  {:<16} {} [{}]",
                task.name,
                task.description,
                children.join(", ")
            ),
        }
    }
    Ok(())
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(root: &Path) -> Result<()> {
    let config = load_config(root)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn step_started(&self, step: Step, index: usize, total: usize) {
        self.spinner.set_message(format!("[{index}/{total}] {step}"));
    }

    fn step_finished(&self, _report: &StepReport) {}

    fn step_failed(&self, step: Step, _error: &VictoryError) {
        self.spinner.abandon_with_message(format!("failed: {step}"));
    }

    fn done(&self, _report: &RunReport) {
        self.spinner.finish_and_clear();
    }
}
