//! The ticket store: an explicit session object owning the in-memory ticket
//! collection and the storage handle it is mirrored to.
//!
//! # Invariants
//!
//! - Ticket ids are unique within the collection and never reassigned.
//! - `created_at` is set by [`TicketStore::create`] and never touched again.
//! - After every successful mutation the stored snapshot equals the in-memory
//!   collection. A failed write rolls the in-memory collection back.
//! - A rejected candidate never mutates anything.

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::model::{Priority, Status, Ticket, id};
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::snapshot;
use crate::stats::{self, TicketStats};
use crate::storage::KeyValueStore;
use crate::validate::{self, FieldErrors, TicketInput, ValidatedFields};

/// Storage key used when none is configured.
pub const DEFAULT_KEY: &str = "tickets";

pub const MSG_CREATED: &str = "Ticket created successfully";
pub const MSG_UPDATED: &str = "Ticket updated successfully";
pub const MSG_DELETED: &str = "Ticket deleted successfully";
pub const MSG_INVALID: &str = "Please fix the validation errors";
pub const MSG_NOT_FOUND: &str = "Ticket not found";
pub const MSG_SAVE_FAILED: &str = "Failed to save tickets";

#[derive(Debug)]
pub struct TicketStore<S, N = TracingNotifier> {
    storage: S,
    notifier: N,
    key: String,
    tickets: Vec<Ticket>,
}

impl<S: KeyValueStore> TicketStore<S> {
    /// Open a store under [`DEFAULT_KEY`] that reports through `tracing`.
    pub fn with_defaults(storage: S) -> Result<Self, StoreError> {
        Self::open(storage, TracingNotifier, DEFAULT_KEY)
    }
}

impl<S: KeyValueStore, N: Notifier> TicketStore<S, N> {
    /// Open a session: load the snapshot under `key` (empty if missing or
    /// unparseable) and take ownership of the storage handle.
    ///
    /// Fails with [`StoreError::Storage`] if the snapshot is locked by another
    /// writer.
    pub fn open(storage: S, notifier: N, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let tickets = snapshot::read(&storage, &key)?;
        Ok(Self {
            storage,
            notifier,
            key,
            tickets,
        })
    }

    /// Read the persisted snapshot, independent of the in-memory collection.
    #[must_use]
    pub fn load(&self) -> Vec<Ticket> {
        snapshot::load(&self.storage, &self.key)
    }

    /// Discard the in-memory collection and re-read the snapshot.
    ///
    /// On lock contention the in-memory collection is kept.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.tickets = snapshot::read(&self.storage, &self.key)?;
        Ok(())
    }

    /// Validate a candidate without touching the collection.
    pub fn validate(candidate: &TicketInput) -> Result<ValidatedFields, FieldErrors> {
        validate::validate(candidate)
    }

    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Tickets matching every given filter, in collection order.
    pub fn filter(
        &self,
        status: Option<Status>,
        priority: Option<Priority>,
    ) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(move |t| {
            status.is_none_or(|s| t.status == s) && priority.is_none_or(|p| t.priority == p)
        })
    }

    #[must_use]
    pub fn stats(&self) -> TicketStats {
        stats::summarize(&self.tickets)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Validate and append a new ticket with a fresh id and the current time.
    pub fn create(&mut self, candidate: &TicketInput) -> Result<Ticket, StoreError> {
        self.create_at(candidate, Utc::now())
    }

    fn create_at(
        &mut self,
        candidate: &TicketInput,
        created_at: DateTime<Utc>,
    ) -> Result<Ticket, StoreError> {
        let fields = self.checked(candidate)?;

        let id = id::generate(created_at, &fields.title, |id| {
            self.tickets.iter().any(|t| t.id == id)
        });
        let ticket = Ticket {
            id,
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority.unwrap_or_default(),
            created_at,
        };

        self.tickets.push(ticket.clone());
        if let Err(e) = self.persist() {
            self.tickets.pop();
            return Err(e);
        }

        tracing::info!(id = %ticket.id, status = %ticket.status, "created ticket");
        self.notifier.notify(Notice::success(MSG_CREATED));
        Ok(ticket)
    }

    /// Validate and replace the mutable fields of ticket `id`.
    ///
    /// `id` and `created_at` are preserved. An absent priority keeps the
    /// ticket's current priority.
    pub fn update(&mut self, id: &str, candidate: &TicketInput) -> Result<Ticket, StoreError> {
        let fields = self.checked(candidate)?;

        let Some(index) = self.tickets.iter().position(|t| t.id == id) else {
            self.notifier.notify(Notice::error(MSG_NOT_FOUND));
            return Err(StoreError::NotFound { id: id.to_string() });
        };

        let previous = self.tickets[index].clone();
        let updated = Ticket {
            id: previous.id.clone(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority.unwrap_or(previous.priority),
            created_at: previous.created_at,
        };

        self.tickets[index] = updated.clone();
        if let Err(e) = self.persist() {
            self.tickets[index] = previous;
            return Err(e);
        }

        tracing::info!(id = %updated.id, status = %updated.status, "updated ticket");
        self.notifier.notify(Notice::success(MSG_UPDATED));
        Ok(updated)
    }

    /// Remove ticket `id` if present and persist the result.
    ///
    /// Idempotent: removing an absent id is not an error. Returns whether a
    /// ticket was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self
            .tickets
            .iter()
            .position(|t| t.id == id)
            .map(|index| (index, self.tickets.remove(index)));

        if let Err(e) = self.persist() {
            if let Some((index, ticket)) = removed {
                self.tickets.insert(index, ticket);
            }
            return Err(e);
        }

        if removed.is_some() {
            tracing::info!(id, "deleted ticket");
            self.notifier.notify(Notice::success(MSG_DELETED));
        } else {
            tracing::debug!(id, "delete of absent ticket is a no-op");
        }
        Ok(removed.is_some())
    }

    fn checked(&self, candidate: &TicketInput) -> Result<ValidatedFields, StoreError> {
        validate::validate(candidate).map_err(|errors| {
            tracing::debug!(%errors, "rejected ticket candidate");
            self.notifier.notify(Notice::error(MSG_INVALID));
            StoreError::Validation(errors)
        })
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let encoded = snapshot::encode(&self.tickets)?;
        if let Err(e) = self.storage.set(&self.key, &encoded) {
            tracing::warn!(key = %self.key, error = %e, "snapshot write failed");
            self.notifier.notify(Notice::error(MSG_SAVE_FAILED));
            return Err(e.into());
        }
        tracing::debug!(key = %self.key, count = self.tickets.len(), "persisted snapshot");
        Ok(())
    }
}
