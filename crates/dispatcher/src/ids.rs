use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ticket_desk_proto::TicketId;

use crate::errors::DispatchError;

/// First identifier handed out by a sequential source; keeps ids four digits wide
/// for the first nine thousand tickets.
pub const FIRST_SEQUENTIAL_ID: u32 = 1000;
/// Inclusive range random ids are drawn from.
pub const RANDOM_ID_RANGE: std::ops::RangeInclusive<u32> = 1000..=9999;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Monotonic counter per dispatcher. Never collides.
    #[default]
    Sequential,
    /// Uniform draw from 1000..=9999, collisions are not checked.
    Random,
}

impl FromStr for IdPolicy {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(IdPolicy::Sequential),
            "random" => Ok(IdPolicy::Random),
            _ => Err(DispatchError::UnknownLabel {
                kind: "id policy",
                value: s.to_string(),
            }),
        }
    }
}

/// Hands out ticket ids for a single dispatcher.
#[derive(Debug, Clone)]
pub struct IdSource {
    policy: IdPolicy,
    next: u32,
}

impl IdSource {
    pub fn new(policy: IdPolicy) -> Self {
        Self { policy, next: FIRST_SEQUENTIAL_ID }
    }

    pub fn next_id(&mut self) -> TicketId {
        match self.policy {
            IdPolicy::Sequential => {
                let id = self.next;
                self.next = self.next.saturating_add(1);
                TicketId::new(id)
            }
            IdPolicy::Random => TicketId::new(rand::random_range(RANDOM_ID_RANGE)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_increase_from_1000() {
        let mut ids = IdSource::new(IdPolicy::Sequential);
        let got: Vec<u32> = (0..3).map(|_| ids.next_id().value()).collect();
        assert_eq!(got, vec![1000, 1001, 1002]);
    }

    #[test]
    fn random_ids_stay_in_range() {
        let mut ids = IdSource::new(IdPolicy::Random);
        for _ in 0..500 {
            let id = ids.next_id().value();
            assert!(RANDOM_ID_RANGE.contains(&id), "id {} out of range", id);
        }
    }

    #[test]
    fn independent_sources_do_not_share_state() {
        let mut a = IdSource::new(IdPolicy::Sequential);
        let mut b = IdSource::new(IdPolicy::Sequential);
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id().value(), 1000);
    }
}
