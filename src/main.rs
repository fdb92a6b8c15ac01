use anyhow::{Context, Result};
use basediff::presentation::cli_summary::print_summary;
use basediff::{AppConfig, FileSource, GitSource, LogLevel, OutputFormat, SchemaSource};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "basediff",
    version,
    about = "Basediff: compare two base schema snapshots and see which tables and fields changed."
)]
struct Cli {
    /// Config file [default: <config dir>/basediff/config.toml, then ./basediff.toml]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two schema files and show structural changes
    Diff(DiffArgs),
    /// Check a schema file against the base contract
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct DiffArgs {
    /// Older schema file; older revision with --git
    #[arg(short, long)]
    old: String,

    /// Newer schema file; newer revision with --git
    #[arg(short, long)]
    new: String,

    /// Read both schemas from git revisions instead of files
    #[arg(short, long)]
    git: bool,

    /// Schema path inside the repository [default: git.schema_path from config]
    #[arg(long, requires = "git")]
    file: Option<String>,

    /// Repository to read revisions from [default: .]
    #[arg(long, requires = "git")]
    repo: Option<PathBuf>,

    /// Output format [default: output.format from config, i.e. text]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Colorize text output [default: output.color from config, i.e. true]
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    color: Option<bool>,

    /// Print change counts instead of the full report
    #[arg(long, conflicts_with = "format")]
    summary: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Schema file to validate
    #[arg(short, long)]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LogLevel::Error
    } else if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    basediff::init_tracing(level);

    let cfg = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Diff(args) => run_diff(args, cfg).await,
        Command::Validate(args) => run_validate(args).await,
    }
}

async fn run_diff(args: DiffArgs, mut cfg: AppConfig) -> Result<()> {
    if let Some(format) = args.format {
        cfg.output.format = format;
    }
    if let Some(color) = args.color {
        cfg.output.color = color;
    }
    let palette = cfg.theme.palette()?;
    colored::control::set_override(cfg.output.color);

    let source: Box<dyn SchemaSource> = if args.git {
        let repo = args.repo.unwrap_or_else(|| PathBuf::from("."));
        let schema_path = args.file.unwrap_or_else(|| cfg.git.schema_path.clone());
        Box::new(GitSource::new(repo, schema_path))
    } else {
        Box::new(FileSource)
    };

    let (old, new, diff) = basediff::diff_sources(source.as_ref(), &args.old, &args.new)
        .await
        .context("Error comparing schemas")?;
    info!(
        source = source.kind(),
        changes = diff.summary().total_changes(),
        "schemas compared"
    );

    if args.summary {
        print_summary(
            &diff,
            &basediff::fingerprint(&old),
            &basediff::fingerprint(&new),
        );
        return Ok(());
    }

    let output = basediff::render(&diff, &cfg.output, palette)?;
    println!("{output}");
    Ok(())
}

async fn run_validate(args: ValidateArgs) -> Result<()> {
    let path = args.file.to_string_lossy().into_owned();
    let text = FileSource.load(&path).await?;
    basediff::parse_base("provided", &text)?;

    println!("{}", "✓ The provided schema file is valid!".green());
    Ok(())
}
