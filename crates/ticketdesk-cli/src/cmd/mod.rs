//! Command handlers for `td`.

pub mod completions;
pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod show;
pub mod stats;
pub mod update;

use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use ticketdesk_core::config::{self, ProjectConfig};
use ticketdesk_core::notify::NoticeLog;
use ticketdesk_core::storage::{self, FileStore};
use ticketdesk_core::store::TicketStore;
use ticketdesk_core::{ErrorCode, StoreError, Ticket};

use crate::output::{CliError, OutputMode, Renderable, pretty_kv, pretty_rule, render_error};

/// A store session backed by the project's file store.
pub type Session = TicketStore<FileStore, NoticeLog>;

/// Shared context every project-scoped command receives.
pub struct Context<'a> {
    pub project_root: Option<&'a Path>,
    pub project: &'a ProjectConfig,
    pub output: OutputMode,
}

impl Context<'_> {
    /// Open the file store for this project, or render a "not initialized" error.
    pub fn open_session(&self) -> anyhow::Result<Session> {
        let Some(root) = self.project_root else {
            let code = ErrorCode::NotInitialized;
            render_error(
                self.output,
                &CliError::with_details(
                    format!("no {} directory found", config::PROJECT_DIR),
                    code.hint().unwrap_or_default(),
                    code.code(),
                ),
            )?;
            anyhow::bail!("{}", code.message());
        };

        let key = &self.project.storage.key;
        if let Err(e) = storage::validate_key(key) {
            let code = e.code();
            render_error(
                self.output,
                &CliError::with_details(e.to_string(), code.hint().unwrap_or_default(), code.code()),
            )?;
            anyhow::bail!("{e}");
        }

        let storage = FileStore::open(config::store_dir(root))?
            .with_lock_timeout(self.project.storage.lock_timeout());
        tracing::debug!(root = %root.display(), key, "opening ticket store");
        match TicketStore::open(storage, NoticeLog::new(), key.clone()) {
            Ok(session) => Ok(session),
            Err(e) => {
                render_store_error(self.output, &e)?;
                Err(e.into())
            }
        }
    }
}

/// Resolve user input to a ticket id.
///
/// Tries an exact match, then the input with the `tk-` prefix added, then a
/// unique prefix match. Returns `Ok(None)` if nothing matches.
pub fn resolve_id(session: &Session, input: &str) -> Result<Option<String>, Vec<String>> {
    let input = input.trim();
    if session.get(input).is_some() {
        return Ok(Some(input.to_string()));
    }

    let prefixed = if input.starts_with(ticketdesk_core::model::id::ID_PREFIX) {
        input.to_string()
    } else {
        format!("{}{input}", ticketdesk_core::model::id::ID_PREFIX)
    };
    if session.get(&prefixed).is_some() {
        return Ok(Some(prefixed));
    }

    let matches: Vec<String> = session
        .tickets()
        .iter()
        .filter(|t| t.id.starts_with(&prefixed))
        .map(|t| t.id.clone())
        .collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.into_iter().next()),
        _ => Err(matches),
    }
}

/// Resolve an id that must exist, rendering not-found / ambiguous errors.
pub fn require_id(session: &Session, input: &str, output: OutputMode) -> anyhow::Result<String> {
    match resolve_id(session, input) {
        Ok(Some(id)) => Ok(id),
        Ok(None) => {
            render_store_error(output, &StoreError::NotFound { id: input.to_string() })?;
            anyhow::bail!("ticket not found: {input}");
        }
        Err(candidates) => ambiguous_id(output, input, &candidates),
    }
}

/// Render an `E2004` error listing the ids a prefix matched, then fail.
pub fn ambiguous_id<T>(output: OutputMode, input: &str, candidates: &[String]) -> anyhow::Result<T> {
    render_error(
        output,
        &CliError::with_details(
            format!("ambiguous ticket id '{input}'"),
            format!("matches: {}", candidates.join(", ")),
            ErrorCode::AmbiguousId.code(),
        ),
    )?;
    anyhow::bail!("ambiguous ticket id: {input}");
}

/// Render a [`StoreError`] to stderr, including field errors when present.
pub fn render_store_error(output: OutputMode, err: &StoreError) -> anyhow::Result<()> {
    let code = err.code();
    let hint = code.hint().unwrap_or_default();
    let cli_error = match err.field_errors() {
        Some(fields) => CliError::with_details(code.message(), hint, code.code())
            .with_fields(fields.clone()),
        None => CliError::with_details(err.to_string(), hint, code.code()),
    };
    render_error(output, &cli_error)
}

/// Local-time rendering of a ticket timestamp.
fn local_time(ticket: &Ticket) -> String {
    ticket
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

impl Renderable for Ticket {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  {}", self.id, self.title)?;
        pretty_rule(w)?;
        pretty_kv(w, "Status", self.status.label())?;
        pretty_kv(w, "Priority", self.priority.as_str())?;
        pretty_kv(w, "Created", local_time(self))?;
        if !self.description.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", self.description)?;
        }
        writeln!(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.id, self.status, self.priority, self.title
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "STATUS", "PRIORITY", "TITLE"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketdesk_core::{Status, TicketInput};

    fn session_with(titles: &[&str]) -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStore::open(dir.path()).expect("open");
        let mut session =
            TicketStore::open(storage, NoticeLog::new(), "tickets").expect("open session");
        for title in titles {
            session
                .create(&TicketInput::new(*title, Status::Open))
                .expect("create");
        }
        (dir, session)
    }

    #[test]
    fn resolve_exact_and_prefixless() {
        let (_dir, session) = session_with(&["a"]);
        let id = session.tickets()[0].id.clone();
        assert_eq!(resolve_id(&session, &id), Ok(Some(id.clone())));

        let bare = id.trim_start_matches("tk-");
        assert_eq!(resolve_id(&session, bare), Ok(Some(id.clone())));
        assert_eq!(resolve_id(&session, &bare[..3]), Ok(Some(id)));
    }

    #[test]
    fn resolve_unknown_is_none() {
        let (_dir, session) = session_with(&["a"]);
        assert_eq!(resolve_id(&session, "tk-zzzzzzzzzz"), Ok(None));
    }

    #[test]
    fn resolve_empty_prefix_is_ambiguous_with_many() {
        let (_dir, session) = session_with(&["a", "b"]);
        assert!(matches!(resolve_id(&session, "tk-"), Err(ids) if ids.len() == 2));
    }

    #[test]
    fn ticket_text_row_matches_headers() {
        let (_dir, session) = session_with(&["Row title"]);
        let ticket = &session.tickets()[0];
        let mut buf = Vec::new();
        ticket.render_table(&mut buf).expect("render");
        let row = String::from_utf8(buf).expect("utf8");
        assert_eq!(row, format!("{}  open  medium  Row title\n", ticket.id));
        assert_eq!(Ticket::table_headers().len(), 4);
    }

    #[test]
    fn ticket_human_shows_description_only_when_set() {
        let (_dir, mut session) = session_with(&[]);
        let ticket = session
            .create(&TicketInput::new("t", Status::InProgress).description("details here"))
            .expect("create");
        let mut buf = Vec::new();
        ticket.render_human(&mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("In Progress"));
        assert!(out.contains("details here"));
    }
}
