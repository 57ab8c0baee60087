//! `td stats`: dashboard counts by status.

use std::io::{self, Write};

use clap::Args;
use ticketdesk_core::{Status, TicketStats};

use crate::cmd::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

fn write_text(stats: &TicketStats, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "total  {}", stats.total)?;
    for status in Status::ALL {
        writeln!(w, "{}  {}", status.as_str(), stats.count(status))?;
    }
    Ok(())
}

fn write_pretty(stats: &TicketStats, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Dashboard")?;
    pretty_kv(w, "Total", stats.total.to_string())?;
    for status in Status::ALL {
        pretty_kv(w, status.label(), stats.count(status).to_string())?;
    }
    Ok(())
}

pub fn run_stats(_args: &StatsArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let stats = session.stats();
    render_mode(ctx.output, &stats, write_text, write_pretty)
}
