//! Ticket id generation.
//!
//! Ids look like `tk-3k9x0q2m`: a fixed prefix followed by base36 digits taken
//! from a blake3 hash of the creation timestamp, the title and a nonce. The
//! caller supplies an existence check; on collision the nonce is bumped until
//! the id is free.

use chrono::{DateTime, Utc};

/// Prefix shared by every generated ticket id.
pub const ID_PREFIX: &str = "tk-";

/// Number of base36 digits after the prefix.
pub const ID_DIGITS: usize = 8;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate an id that `taken` reports as unused.
pub fn generate(created_at: DateTime<Utc>, title: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut nonce: u64 = 0;
    loop {
        let candidate = candidate(created_at, title, nonce);
        if !taken(&candidate) {
            return candidate;
        }
        tracing::debug!(%candidate, nonce, "ticket id collision, retrying");
        nonce = nonce.wrapping_add(1);
    }
}

fn candidate(created_at: DateTime<Utc>, title: &str, nonce: u64) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&created_at.timestamp_micros().to_le_bytes());
    hasher.update(title.as_bytes());
    hasher.update(&nonce.to_le_bytes());
    let hash = hasher.finalize();

    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    let mut value = u64::from_le_bytes(prefix);

    let mut digits = [b'0'; ID_DIGITS];
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(value % 36) as usize];
        value /= 36;
    }

    let mut id = String::with_capacity(ID_PREFIX.len() + ID_DIGITS);
    id.push_str(ID_PREFIX);
    id.extend(digits.iter().map(|&b| char::from(b)));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single().expect("valid date")
    }

    #[test]
    fn id_has_prefix_and_base36_digits() {
        let id = generate(at(), "Fix login", |_| false);
        assert!(id.starts_with(ID_PREFIX));
        let digits = &id[ID_PREFIX.len()..];
        assert_eq!(digits.len(), ID_DIGITS);
        assert!(digits.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn same_inputs_are_deterministic() {
        assert_eq!(generate(at(), "a", |_| false), generate(at(), "a", |_| false));
    }

    #[test]
    fn collision_bumps_nonce() {
        let first = generate(at(), "a", |_| false);
        let second = generate(at(), "a", |id| id == first);
        assert_ne!(first, second);
    }

    #[test]
    fn repeated_generation_against_growing_set_stays_unique() {
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let id = generate(at(), "same title", |id| seen.contains(id));
            assert!(seen.insert(id));
        }
    }
}
