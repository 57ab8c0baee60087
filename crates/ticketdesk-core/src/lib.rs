//! ticketdesk-core library.
//!
//! A ticket collection is loaded from a [`storage::KeyValueStore`], mutated
//! through a [`store::TicketStore`] and written back as one JSON snapshot
//! after every change. [`stats::summarize`] derives dashboard counts.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums at library seams, `anyhow::Result`
//!   for config loading.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod error;
pub mod lock;
pub mod model;
pub mod notify;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod store;
pub mod validate;

pub use error::{ErrorCode, StoreError};
pub use model::{Priority, Status, Ticket};
pub use stats::{TicketStats, summarize};
pub use store::TicketStore;
pub use validate::{Field, FieldErrors, TicketInput, ValidatedFields};
