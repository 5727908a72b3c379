mod config;
mod render;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use config::{CliOverrides, ConfigMerger};
use f77tool_core::pipeline::{default_detector, run_exists, run_generate, run_suffixes};
use f77tool_core::settings::{CaseMode, GenerateSettings};
use f77tool_types::ConflictPolicy;
use render::{render_report_text, render_suffixes_text};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "f77tool",
    version,
    about = "Configures a build environment for compiling Fortran 77 sources."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Configure a fresh environment and print the result.
    Generate(GenerateArgs),
    /// Exit 0 if a Fortran 77 compiler can be found, 1 otherwise.
    Exists(ExistsArgs),
    /// Print how source suffixes are classified on this filesystem.
    Suffixes(SuffixesArgs),
}

#[derive(Debug, Args)]
struct CaseArgs {
    /// Treat `.f` and `.F` as different suffixes.
    #[arg(long, conflicts_with_all = ["case_insensitive", "probe_case"])]
    case_sensitive: bool,

    /// Treat `.f` and `.F` as the same suffix.
    #[arg(long, conflicts_with = "probe_case")]
    case_insensitive: bool,

    /// Decide by creating a scratch file under the project root.
    #[arg(long)]
    probe_case: bool,
}

impl CaseArgs {
    fn mode(&self) -> Option<CaseMode> {
        if self.case_sensitive {
            Some(CaseMode::Sensitive)
        } else if self.case_insensitive {
            Some(CaseMode::Insensitive)
        } else if self.probe_case {
            Some(CaseMode::Probe)
        } else {
            None
        }
    }
}

#[derive(Debug, Args)]
struct CompilerArgs {
    /// Compiler name to probe for; repeat to probe several in order.
    #[arg(long = "compiler", value_name = "NAME")]
    compilers: Vec<String>,

    /// Directory to search instead of PATH; repeatable.
    #[arg(long, value_name = "DIR")]
    search_path: Vec<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Project root holding f77tool.toml (default: current directory).
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    #[command(flatten)]
    case: CaseArgs,

    #[command(flatten)]
    compiler: CompilerArgs,

    /// Pre-set a construction variable (NAME=VALUE); repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// What to do when a suffix is already bound to another action.
    #[arg(long, value_enum)]
    on_conflict: Option<ConflictArg>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also print fully substituted command lines.
    #[arg(long, default_value_t = false)]
    expand: bool,
}

#[derive(Debug, Parser)]
struct ExistsArgs {
    /// Project root holding f77tool.toml (default: current directory).
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    #[command(flatten)]
    compiler: CompilerArgs,
}

#[derive(Debug, Parser)]
struct SuffixesArgs {
    /// Project root holding f77tool.toml (default: current directory).
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    #[command(flatten)]
    case: CaseArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ConflictArg {
    Reject,
    Overwrite,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Reject => ConflictPolicy::Reject,
            ConflictArg::Overwrite => ConflictPolicy::Overwrite,
        }
    }
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Exists(args) => cmd_exists(args),
        Command::Suffixes(args) => cmd_suffixes(args),
    }
}

fn load_settings(project_root: Utf8PathBuf, cli: CliOverrides) -> anyhow::Result<GenerateSettings> {
    let file_config =
        config::load_or_default(&project_root).context("load f77tool.toml config")?;
    let settings = ConfigMerger::new(file_config).merge(project_root, cli);
    debug!(
        "merged config: compilers={:?}, fallback={}, case_mode={:?}, on_conflict={:?}, preset={:?}",
        settings.compilers, settings.fallback, settings.case_mode, settings.on_conflict,
        settings.preset.keys().collect::<Vec<_>>()
    );
    Ok(settings)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<ExitCode> {
    let vars = config::parse_cli_params(&args.set).context("parse --set")?;
    let settings = load_settings(
        args.project_root,
        CliOverrides {
            compilers: args.compiler.compilers,
            search_path: args.compiler.search_path,
            case_mode: args.case.mode(),
            on_conflict: args.on_conflict.map(Into::into),
            vars,
            expand: args.expand,
        },
    )?;

    let detector = default_detector(&settings)?;
    let run = run_generate(&settings, Box::new(detector))?;

    match args.format {
        OutputFormat::Text => print!("{}", render_report_text(&run.report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&run.report).context("serialize report")?
        ),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_exists(args: ExistsArgs) -> anyhow::Result<ExitCode> {
    let settings = load_settings(
        args.project_root,
        CliOverrides {
            compilers: args.compiler.compilers,
            search_path: args.compiler.search_path,
            ..Default::default()
        },
    )?;

    let detector = default_detector(&settings)?;
    if run_exists(&settings, &detector) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn cmd_suffixes(args: SuffixesArgs) -> anyhow::Result<ExitCode> {
    let settings = load_settings(
        args.project_root,
        CliOverrides {
            case_mode: args.case.mode(),
            ..Default::default()
        },
    )?;

    let (case_sensitive, partition) = run_suffixes(&settings)?;
    match args.format {
        OutputFormat::Text => print!("{}", render_suffixes_text(&partition)),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "case_sensitive": case_sensitive,
                "suffixes": partition,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}
