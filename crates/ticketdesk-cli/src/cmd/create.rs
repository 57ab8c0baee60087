//! `td create`: create a new ticket.

use clap::Args;
use ticketdesk_core::TicketInput;

use crate::cmd::{Context, render_store_error};
use crate::output::{render_item, render_notices};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Title of the new ticket (1-100 characters).
    #[arg(short, long)]
    pub title: String,

    /// Description text (up to 500 characters).
    #[arg(short, long)]
    pub description: Option<String>,

    /// Status: open, in_progress, or closed.
    #[arg(short, long, default_value = "open")]
    pub status: String,

    /// Priority: low, medium, or high. Defaults to medium.
    #[arg(short, long)]
    pub priority: Option<String>,
}

impl CreateArgs {
    fn to_input(&self) -> TicketInput {
        TicketInput {
            title: self.title.clone(),
            description: self.description.clone(),
            status: Some(self.status.clone()),
            priority: self.priority.clone(),
        }
    }
}

pub fn run_create(args: &CreateArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;

    let result = session.create(&args.to_input());
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
