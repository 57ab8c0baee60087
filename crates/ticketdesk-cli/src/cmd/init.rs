//! `td init`: create the `.tickets/` project directory.

use std::path::Path;

use clap::Args;
use serde::Serialize;
use ticketdesk_core::config;

use crate::output::{OutputMode, render_mode};

#[derive(Args, Debug, Default)]
pub struct InitArgs {}

#[derive(Debug, Serialize)]
struct InitResult {
    root: String,
    created: bool,
}

pub fn run_init(_args: &InitArgs, output: OutputMode, cwd: &Path) -> anyhow::Result<()> {
    let created = config::init_project(cwd)?;
    tracing::info!(root = %cwd.display(), created, "initialized project");

    let result = InitResult {
        root: cwd.join(config::PROJECT_DIR).display().to_string(),
        created,
    };
    render_mode(
        output,
        &result,
        |r, w| writeln!(w, "{}", r.root),
        |r, w| {
            if r.created {
                writeln!(w, "✓ Initialized ticketdesk in {}", r.root)
            } else {
                writeln!(w, "✓ Already initialized at {}", r.root)
            }
        },
    )
}
