//! `td completions`: print a shell completion script.

use std::io::{self, Write};

use clap::Args;
use clap_complete::{Shell, generate};

pub const BIN_NAME: &str = "td";

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

fn write_completions(shell: Shell, command: &mut clap::Command, w: &mut dyn Write) {
    generate(shell, command, BIN_NAME, w);
}

pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions(args.shell, command, &mut out);
    out.flush()?;
    Ok(())
}
