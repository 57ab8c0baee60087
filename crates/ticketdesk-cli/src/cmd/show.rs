//! `td show`: display a single ticket.
//!
//! Accepts partial ids: "a7x" resolves to "tk-a7x..." when unique.

use clap::Args;

use crate::cmd::{Context, require_id};
use crate::output::render_item;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Ticket ID to display. Supports partial IDs.
    pub id: String,
}

pub fn run_show(args: &ShowArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let id = require_id(&session, &args.id, ctx.output)?;
    let Some(ticket) = session.get(&id) else {
        anyhow::bail!("ticket not found: {id}");
    };
    render_item(ticket, ctx.output)?;
    Ok(())
}
