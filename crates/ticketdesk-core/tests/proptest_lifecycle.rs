use proptest::prelude::*;
use ticketdesk_core::notify::NoticeLog;
use ticketdesk_core::snapshot;
use ticketdesk_core::storage::MemoryStore;
use ticketdesk_core::store::DEFAULT_KEY;
use ticketdesk_core::{Priority, Status, Ticket, TicketStore, summarize};

#[path = "generators.rs"]
mod generators;
use generators::*;

fn fresh() -> TicketStore<MemoryStore, NoticeLog> {
    TicketStore::open(MemoryStore::new(), NoticeLog::new(), DEFAULT_KEY).expect("open")
}

fn pick_id(store: &TicketStore<MemoryStore, NoticeLog>, i: usize) -> String {
    let tickets = store.tickets();
    if tickets.is_empty() {
        format!("tk-absent{i}")
    } else {
        tickets[i % tickets.len()].id.clone()
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn create_then_load_adds_exactly_one(
        seed in proptest::collection::vec(arb_valid_input(), 0..5),
        input in arb_valid_input(),
    ) {
        let mut store = fresh();
        for s in &seed {
            store.create(s).expect("seed create");
        }
        let before = store.load().len();

        let created = store.create(&input).expect("valid create");
        let loaded = store.load();
        prop_assert_eq!(loaded.len(), before + 1);

        let stored = loaded.iter().find(|t| t.id == created.id).expect("stored");
        prop_assert_eq!(&stored.title, &input.title);
        prop_assert_eq!(
            stored.description.as_str(),
            input.description.as_deref().map(str::trim).unwrap_or_default()
        );
        prop_assert_eq!(Some(stored.status.as_str()), input.status.as_deref());
        let expected_priority = input
            .priority
            .as_deref()
            .map(|p| p.parse::<Priority>().expect("generated priority"))
            .unwrap_or(Priority::Medium);
        prop_assert_eq!(stored.priority, expected_priority);
    }

    #[test]
    fn update_never_changes_id_or_created_at(
        original in arb_valid_input(),
        edits in proptest::collection::vec(arb_valid_input(), 1..6),
    ) {
        let mut store = fresh();
        let created = store.create(&original).expect("create");
        for edit in &edits {
            let updated = store.update(&created.id, edit).expect("update");
            prop_assert_eq!(&updated.id, &created.id);
            prop_assert_eq!(updated.created_at, created.created_at);
        }
        let loaded = store.load();
        prop_assert_eq!(loaded.len(), 1);
        prop_assert_eq!(&loaded[0].id, &created.id);
        prop_assert_eq!(loaded[0].created_at, created.created_at);
    }

    #[test]
    fn remove_twice_equals_remove_once(
        seed in proptest::collection::vec(arb_valid_input(), 1..6),
        pick in 0..6_usize,
    ) {
        let mut store = fresh();
        for s in &seed {
            store.create(s).expect("seed create");
        }
        let id = pick_id(&store, pick);

        store.remove(&id).expect("first");
        let once = store.load();
        store.remove(&id).expect("second");
        prop_assert_eq!(store.load(), once);
    }

    #[test]
    fn snapshot_always_mirrors_memory(ops in proptest::collection::vec(arb_op(), 0..30)) {
        let mut store = fresh();
        for op in ops {
            match op {
                Op::Create(input) => {
                    store.create(&input).expect("create");
                }
                Op::Update(i, input) => {
                    let id = pick_id(&store, i);
                    let _ = store.update(&id, &input);
                }
                Op::Remove(i) => {
                    let id = pick_id(&store, i);
                    store.remove(&id).expect("remove");
                }
            }
            prop_assert_eq!(store.load(), store.tickets().to_vec());
        }

        let mut ids: Vec<_> = store.tickets().iter().map(|t| t.id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total, "ids stay unique");

        let stats = summarize(store.tickets());
        prop_assert_eq!(stats.total, stats.open + stats.in_progress + stats.closed);
    }

    #[test]
    fn snapshot_round_trip(inputs in proptest::collection::vec(arb_valid_input(), 0..10)) {
        let mut store = fresh();
        for input in &inputs {
            store.create(input).expect("create");
        }
        let tickets: Vec<Ticket> = store.tickets().to_vec();
        let decoded = snapshot::decode(&snapshot::encode(&tickets).expect("encode")).expect("decode");
        prop_assert_eq!(decoded, tickets);
    }

    #[test]
    fn summarize_counts_match_filters(statuses in proptest::collection::vec(arb_status(), 0..40)) {
        let mut store = fresh();
        for (i, status) in statuses.iter().enumerate() {
            store
                .create(&ticketdesk_core::TicketInput::new(format!("t{i}"), *status))
                .expect("create");
        }
        let stats = store.stats();
        prop_assert_eq!(stats.total, statuses.len());
        for status in Status::ALL {
            prop_assert_eq!(stats.count(status), store.filter(Some(status), None).count());
        }
    }
}
