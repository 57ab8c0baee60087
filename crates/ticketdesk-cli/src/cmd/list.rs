//! `td list`: list tickets, optionally filtered by status and priority.

use std::str::FromStr;

use clap::Args;
use ticketdesk_core::{ErrorCode, Priority, Status, Ticket};

use crate::cmd::Context;
use crate::output::{CliError, OutputMode, render_error, render_list};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only show tickets in this status (open, in_progress, closed).
    #[arg(long, short)]
    pub status: Option<String>,

    /// Only show tickets with this priority (low, medium, high).
    #[arg(long, short)]
    pub priority: Option<String>,
}

/// Parse an optional enum flag, rendering an `E2003` error on failure.
pub fn parse_flag<T>(raw: Option<&str>, output: OutputMode) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            let code = ErrorCode::InvalidEnumValue;
            render_error(
                output,
                &CliError::with_details(e.to_string(), code.hint().unwrap_or_default(), code.code()),
            )?;
            anyhow::bail!("{e}");
        }
    }
}

pub fn run_list(args: &ListArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let status: Option<Status> = parse_flag(args.status.as_deref(), ctx.output)?;
    let priority: Option<Priority> = parse_flag(args.priority.as_deref(), ctx.output)?;

    let session = ctx.open_session()?;
    let tickets: Vec<Ticket> = session.filter(status, priority).cloned().collect();
    tracing::debug!(
        total = session.tickets().len(),
        shown = tickets.len(),
        "listing tickets"
    );

    if tickets.is_empty() && ctx.output.is_pretty() {
        println!("No tickets found");
        return Ok(());
    }
    render_list(&tickets, ctx.output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_aliases() {
        let status: Option<Status> =
            parse_flag(Some("in-progress"), OutputMode::Json).expect("parse");
        assert_eq!(status, Some(Status::InProgress));

        let none: Option<Priority> = parse_flag(None, OutputMode::Json).expect("parse");
        assert!(none.is_none());
    }

    #[test]
    fn parse_flag_rejects_unknown() {
        let result: anyhow::Result<Option<Priority>> = parse_flag(Some("urgent"), OutputMode::Json);
        assert!(result.is_err());
    }
}
