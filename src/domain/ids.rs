//! Identifier allocation for folders and notes.
//!
//! Identifiers combine three components so they stay unique for the lifetime of a
//! store even when many are allocated within the same millisecond:
//!
//! ```text
//! <epoch millis, base 36><sequence, base 36>-<8 random hex digits>
//! ```
//!
//! The generator remembers every identifier it handed out, and the store checks
//! candidates against live and retired identifiers before accepting one.

use crate::domain::entity::EntityId;
use std::collections::HashSet;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix taken from a v4 UUID.
const RANDOM_SUFFIX_LEN: usize = 8;

/// Allocates fresh identifiers and tracks which ones must never be reused.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    sequence: u64,
    issued: HashSet<EntityId>,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces an identifier not accepted by `is_taken` and not issued before.
    pub fn next_id(&mut self, is_taken: impl Fn(&EntityId) -> bool) -> EntityId {
        loop {
            let candidate = self.candidate();
            if self.issued.contains(&candidate) || is_taken(&candidate) {
                tracing::trace!(id = %candidate, "identifier collision, retrying");
                continue;
            }
            self.issued.insert(candidate.clone());
            return candidate;
        }
    }

    /// Marks an identifier as used so it is never produced again.
    ///
    /// Called for identifiers that arrive from a snapshot and for entities that
    /// get deleted.
    pub fn retire(&mut self, id: &EntityId) {
        self.issued.insert(id.clone());
    }

    fn candidate(&mut self) -> EntityId {
        self.sequence = self.sequence.wrapping_add(1);

        let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        let random = uuid::Uuid::new_v4().simple().to_string();

        EntityId::new(format!(
            "{}{}-{}",
            to_base36(millis),
            to_base36(self.sequence),
            &random[..RANDOM_SUFFIX_LEN]
        ))
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
