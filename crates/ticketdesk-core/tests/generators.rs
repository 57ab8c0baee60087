#![allow(dead_code)]

use proptest::prelude::*;
use ticketdesk_core::{Priority, Status, TicketInput};

pub fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Open),
        Just(Status::InProgress),
        Just(Status::Closed),
    ]
}

pub fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
    ]
}

/// Titles of 1..=100 chars with no surrounding whitespace.
pub fn arb_title() -> impl Strategy<Value = String> {
    "[a-zA-Z]([a-zA-Z0-9 _-]{0,98}[a-zA-Z0-9])?"
}

pub fn arb_description() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z0-9 .,]{0,120}")
}

/// Candidates that always pass validation.
pub fn arb_valid_input() -> impl Strategy<Value = TicketInput> {
    (
        arb_title(),
        arb_description(),
        arb_status(),
        proptest::option::of(arb_priority()),
    )
        .prop_map(|(title, description, status, priority)| TicketInput {
            title,
            description,
            status: Some(status.as_str().to_string()),
            priority: priority.map(|p| p.as_str().to_string()),
        })
}

/// A store operation against ids drawn from a small pool.
#[derive(Debug, Clone)]
pub enum Op {
    Create(TicketInput),
    Update(usize, TicketInput),
    Remove(usize),
}

pub fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_valid_input().prop_map(Op::Create),
        (0..8_usize, arb_valid_input()).prop_map(|(i, input)| Op::Update(i, input)),
        (0..8_usize).prop_map(Op::Remove),
    ]
}
