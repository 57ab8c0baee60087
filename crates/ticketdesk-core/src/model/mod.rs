pub mod id;
pub mod ticket;

pub use ticket::{ParseEnumError, Priority, Status, Ticket};
