//! `td update`: edit a ticket's title, description, status or priority.
//!
//! Flags that are not given keep the ticket's current value.

use clap::Args;
use ticketdesk_core::{Ticket, TicketInput};

use crate::cmd::{Context, render_store_error, require_id};
use crate::output::{render_item, render_notices};

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Ticket ID to update. Supports partial IDs.
    pub id: String,

    /// New title.
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description. Pass an empty string to clear it.
    #[arg(short, long)]
    pub description: Option<String>,

    /// New status: open, in_progress, or closed.
    #[arg(short, long)]
    pub status: Option<String>,

    /// New priority: low, medium, or high.
    #[arg(short, long)]
    pub priority: Option<String>,
}

impl UpdateArgs {
    /// Overlay the given flags on the ticket's current fields.
    fn overlay(&self, current: &Ticket) -> TicketInput {
        TicketInput {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            description: Some(
                self.description
                    .clone()
                    .unwrap_or_else(|| current.description.clone()),
            ),
            status: Some(
                self.status
                    .clone()
                    .unwrap_or_else(|| current.status.as_str().to_string()),
            ),
            priority: self.priority.clone(),
        }
    }
}

pub fn run_update(args: &UpdateArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let id = require_id(&session, &args.id, ctx.output)?;
    let Some(current) = session.get(&id) else {
        anyhow::bail!("ticket not found: {id}");
    };
    let input = args.overlay(current);

    let result = session.update(&id, &input);
    render_notices(ctx.output, &session.notifier().drain())?;
    match result {
        Ok(ticket) => {
            render_item(&ticket, ctx.output)?;
            Ok(())
        }
        Err(e) => {
            render_store_error(ctx.output, &e)?;
            Err(e.into())
        }
    }
}
