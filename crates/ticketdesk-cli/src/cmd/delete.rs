//! `td delete`: remove a ticket.
//!
//! Asks for confirmation on an interactive terminal unless `--force` is given.
//! Deleting an unknown id succeeds and reports `deleted: false`.

use std::io::{self, BufRead, IsTerminal, Write};

use clap::Args;
use serde::Serialize;

use crate::cmd::{Context, ambiguous_id, render_store_error, resolve_id};
use crate::output::{render_mode, render_notices};

#[derive(Args, Debug, Default)]
pub struct DeleteArgs {
    /// Ticket ID to delete. Supports partial IDs.
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct DeleteResult {
    id: String,
    deleted: bool,
}

fn confirm(id: &str, title: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "Delete {id} \"{title}\"? [y/N] ")?;
    stderr.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn run_delete(args: &DeleteArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;

    // An unresolved id falls through to the literal input; removing it is a no-op.
    let id = match resolve_id(&session, &args.id) {
        Ok(Some(id)) => id,
        Ok(None) => args.id.clone(),
        Err(candidates) => return ambiguous_id(ctx.output, &args.id, &candidates),
    };

    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    if !args.force && interactive {
        if let Some(ticket) = session.get(&id) {
            if !confirm(&id, &ticket.title)? {
                eprintln!("Aborted.");
                return Ok(());
            }
        }
    }

    let result = session.remove(&id);
    render_notices(ctx.output, &session.notifier().drain())?;
    let deleted = match result {
        Ok(deleted) => deleted,
        Err(e) => {
            render_store_error(ctx.output, &e)?;
            return Err(e.into());
        }
    };

    render_mode(
        ctx.output,
        &DeleteResult { id, deleted },
        |r, w| writeln!(w, "{}  {}", r.id, if r.deleted { "deleted" } else { "absent" }),
        |r, w| {
            if r.deleted {
                writeln!(w, "Deleted {}", r.id)
            } else {
                writeln!(w, "No ticket {} (nothing to delete)", r.id)
            }
        },
    )
}
