#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error};
use std::env;
use ticketdesk_core::{ErrorCode, config};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = cmd::completions::BIN_NAME,
    author,
    version,
    about = "ticketdesk: a small local ticket tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Overrides --json, FORMAT and user config.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Initialize a ticket project in the current directory",
        after_help = "EXAMPLES:\n    td init"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        about = "Create a new ticket",
        after_help = "EXAMPLES:\n    td create -t \"Login button broken\" -p high\n    td create -t \"Docs\" -d \"Write the README\" -s in_progress"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        about = "List tickets",
        after_help = "EXAMPLES:\n    td list\n    td list --status open --priority high\n    td --json list"
    )]
    List(cmd::list::ListArgs),

    #[command(about = "Show a single ticket", after_help = "EXAMPLES:\n    td show a7x")]
    Show(cmd::show::ShowArgs),

    #[command(
        about = "Update a ticket",
        after_help = "EXAMPLES:\n    td update a7x --status closed\n    td update a7x -t \"New title\" -p low"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        about = "Delete a ticket",
        after_help = "EXAMPLES:\n    td delete a7x\n    td delete a7x --force"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(about = "Show ticket counts by status")]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    td completions bash > ~/.local/share/bash-completion/completions/td"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TICKETDESK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "ticketdesk=debug,info"
        } else {
            "ticketdesk=warn,warn"
        })
    });

    let format = env::var("TICKETDESK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let cwd = env::current_dir()?;
    let project_root = config::find_project_root(&cwd);
    let cli_format = cli.format.map(OutputMode::as_str);

    let effective = match config::resolve_config(
        project_root.as_deref().unwrap_or(&cwd),
        cli_format,
        cli.json,
    ) {
        Ok(effective) => effective,
        Err(e) => {
            let code = ErrorCode::ConfigParseError;
            let output = cli.format.unwrap_or(if cli.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            });
            render_error(
                output,
                &CliError::with_details(format!("{e:#}"), code.hint().unwrap_or_default(), code.code()),
            )?;
            return Err(e);
        }
    };
    let output = OutputMode::from_name(&effective.resolved_output);
    tracing::debug!(output = output.as_str(), root = ?project_root, "resolved config");

    let ctx = cmd::Context {
        project_root: project_root.as_deref(),
        project: &effective.project,
        output,
    };

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &cwd),
        Commands::Create(ref args) => cmd::create::run_create(args, &ctx),
        Commands::List(ref args) => cmd::list::run_list(args, &ctx),
        Commands::Show(ref args) => cmd::show::run_show(args, &ctx),
        Commands::Update(ref args) => cmd::update::run_update(args, &ctx),
        Commands::Delete(ref args) => cmd::delete::run_delete(args, &ctx),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, &ctx),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    }
}
