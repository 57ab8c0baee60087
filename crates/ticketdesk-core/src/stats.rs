//! Dashboard summary counts.

use serde::Serialize;

use crate::model::{Status, Ticket};

/// Counts derived from a ticket collection. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl TicketStats {
    /// Count for a single status.
    #[must_use]
    pub const fn count(&self, status: Status) -> usize {
        match status {
            Status::Open => self.open,
            Status::InProgress => self.in_progress,
            Status::Closed => self.closed,
        }
    }
}

/// Single pass over `tickets`. Empty input yields all zeros.
#[must_use]
pub fn summarize(tickets: &[Ticket]) -> TicketStats {
    tickets
        .iter()
        .fold(TicketStats::default(), |mut stats, ticket| {
            stats.total += 1;
            match ticket.status {
                Status::Open => stats.open += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Closed => stats.closed += 1,
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::Utc;

    fn with_status(status: Status) -> Ticket {
        Ticket {
            id: format!("tk-{status}"),
            title: "t".into(),
            description: String::new(),
            status,
            priority: Priority::Medium,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_is_all_zero() {
        assert_eq!(summarize(&[]), TicketStats::default());
    }

    #[test]
    fn counts_per_status() {
        let tickets = [
            with_status(Status::Open),
            with_status(Status::Open),
            with_status(Status::InProgress),
            with_status(Status::Closed),
        ];
        let stats = summarize(&tickets);
        assert_eq!(
            stats,
            TicketStats {
                total: 4,
                open: 2,
                in_progress: 1,
                closed: 1,
            }
        );
        assert_eq!(stats.count(Status::Open), 2);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(TicketStats::default()).expect("serialize");
        assert_eq!(json["inProgress"], 0);
    }
}
