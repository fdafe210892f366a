use std::{num::NonZeroUsize, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{errors::DispatchError, ids::IdPolicy};

pub const DEFAULT_VIP_CAPACITY: usize = 5;
pub(crate) const DEFAULT_RING_CAPACITY: NonZeroUsize =
    NonZeroUsize::new(DEFAULT_VIP_CAPACITY).unwrap();

/// What undo does with a VIP ticket when the VIP lane has no room for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndoOverflow {
    /// The ticket leaves history and is dropped.
    #[default]
    Discard,
    /// The ticket goes to the front of the standard queue instead.
    Fallback,
}

impl FromStr for UndoOverflow {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(UndoOverflow::Discard),
            "fallback" => Ok(UndoOverflow::Fallback),
            _ => Err(DispatchError::UnknownLabel {
                kind: "undo overflow policy",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig {
    pub vip_capacity: usize,
    pub id_policy: IdPolicy,
    pub undo_overflow: UndoOverflow,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            vip_capacity: DEFAULT_VIP_CAPACITY,
            id_policy: IdPolicy::default(),
            undo_overflow: UndoOverflow::default(),
        }
    }
}

impl DispatcherConfig {
    pub fn vip_capacity(&self) -> Result<NonZeroUsize, DispatchError> {
        NonZeroUsize::new(self.vip_capacity)
            .ok_or_else(|| DispatchError::InvalidConfig("vip_capacity must be at least 1".into()))
    }
}
