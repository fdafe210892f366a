use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest and highest accepted ticket priority.
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 3;

/// Errors raised while building a ticket from raw caller input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    #[error("ticket name must not be empty")]
    EmptyName,

    #[error("invalid priority {0:?}, expected an integer between 1 and 3")]
    InvalidPriority(String),

    #[error("unknown ticket kind {0:?}, expected `normal` or `vip`")]
    UnknownKind(String),
}

/// Opaque numeric ticket identifier, displayed as `#1234`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(u32);

impl TicketId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which lane a ticket belongs to. Fixed for the ticket's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketKind {
    Normal,
    #[serde(rename = "VIP")]
    Vip,
}

impl TicketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketKind::Normal => "Normal",
            TicketKind::Vip => "VIP",
        }
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TicketKind {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(TicketKind::Normal),
            "vip" => Ok(TicketKind::Vip),
            _ => Err(TicketError::UnknownKind(s.to_string())),
        }
    }
}

/// Ticket urgency, 1 (low) to 3 (high). Only used as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub fn new(value: u8) -> Result<Self, TicketError> {
        if (MIN_PRIORITY..=MAX_PRIORITY).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TicketError::InvalidPriority(value.to_string()))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = TicketError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Priority::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.0
    }
}

impl FromStr for Priority {
    type Err = TicketError;

    /// Accepts any numeric-looking input; fractional values are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || TicketError::InvalidPriority(s.to_string());

        let n = match raw.parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                let f = raw.parse::<f64>().map_err(|_| invalid())?;
                if !f.is_finite() {
                    return Err(invalid());
                }
                f.trunc() as i64
            }
        };

        u8::try_from(n)
            .ok()
            .and_then(|n| Priority::new(n).ok())
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Pending,
    Resolved,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Pending => f.pad("Pending"),
            TicketStatus::Resolved => f.pad("Resolved"),
        }
    }
}

/// A single service request. Kind, priority and creation time never change;
/// only the status moves between pending and resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    name: String,
    kind: TicketKind,
    priority: Priority,
    status: TicketStatus,
    created_at: DateTime<Utc>,
}

impl Ticket {
    /// Build a pending ticket. The name is trimmed and must not be empty afterwards.
    pub fn new(
        id: TicketId,
        name: &str,
        kind: TicketKind,
        priority: Priority,
    ) -> Result<Self, TicketError> {
        let name = validate_name(name)?;
        Ok(Self {
            id,
            name: name.to_string(),
            kind,
            priority,
            status: TicketStatus::Pending,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TicketKind {
        self.kind
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn mark_resolved(&mut self) {
        self.status = TicketStatus::Resolved;
    }

    pub fn mark_pending(&mut self) {
        self.status = TicketStatus::Pending;
    }
}

/// Trim a raw display name, rejecting names that are blank.
pub fn validate_name(name: &str) -> Result<&str, TicketError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(TicketError::EmptyName)
    } else {
        Ok(trimmed)
    }
}

/// Read-only view of all three containers, handed back after every operation.
/// `vip` and `standard` are front-to-back, `resolved` is bottom-to-top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub vip: Vec<Ticket>,
    pub standard: Vec<Ticket>,
    pub resolved: Vec<Ticket>,
}

impl Snapshot {
    /// Number of tickets across every container.
    pub fn total(&self) -> usize {
        self.vip.len() + self.standard.len() + self.resolved.len()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u8) -> Priority {
        Priority::new(n).unwrap()
    }

    #[test]
    fn new_ticket_is_pending_with_trimmed_name() {
        let t = Ticket::new(TicketId::new(1000), "  Alice \n", TicketKind::Normal, p(2)).unwrap();
        assert_eq!(t.name(), "Alice");
        assert_eq!(t.status(), TicketStatus::Pending);
        assert_eq!(t.kind(), TicketKind::Normal);
        assert_eq!(t.priority().value(), 2);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Ticket::new(TicketId::new(1), "   ", TicketKind::Vip, p(1)).unwrap_err();
        assert_eq!(err, TicketError::EmptyName);
    }

    #[test]
    fn priority_parsing_coerces_numeric_input() {
        assert_eq!("3".parse::<Priority>().unwrap(), p(3));
        assert_eq!(" 2 ".parse::<Priority>().unwrap(), p(2));
        assert_eq!("1.9".parse::<Priority>().unwrap(), p(1));
        assert!("0".parse::<Priority>().is_err());
        assert!("4".parse::<Priority>().is_err());
        assert!("-1".parse::<Priority>().is_err());
        assert!("high".parse::<Priority>().is_err());
        assert!("NaN".parse::<Priority>().is_err());
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!("VIP".parse::<TicketKind>().unwrap(), TicketKind::Vip);
        assert_eq!("normal".parse::<TicketKind>().unwrap(), TicketKind::Normal);
        assert!(matches!("gold".parse::<TicketKind>(), Err(TicketError::UnknownKind(_))));
    }

    #[test]
    fn status_transitions_keep_identity() {
        let mut t = Ticket::new(TicketId::new(4242), "Bob", TicketKind::Vip, p(3)).unwrap();
        let created = t.created_at();
        t.mark_resolved();
        assert_eq!(t.status(), TicketStatus::Resolved);
        t.mark_pending();
        assert_eq!(t.status(), TicketStatus::Pending);
        assert_eq!(t.id(), TicketId::new(4242));
        assert_eq!(t.created_at(), created);
    }

    #[test]
    fn snapshot_serializes_with_wire_names() {
        let t = Ticket::new(TicketId::new(1001), "Cara", TicketKind::Vip, p(3)).unwrap();
        let snap = Snapshot { vip: vec![t], ..Default::default() };
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["vip"][0]["id"], 1001);
        assert_eq!(json["vip"][0]["kind"], "VIP");
        assert_eq!(json["vip"][0]["priority"], 3);
        assert_eq!(json["vip"][0]["status"], "Pending");
        assert_eq!(snap.total(), 1);

        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn out_of_range_priority_fails_to_deserialize() {
        let res: Result<Priority, _> = serde_json::from_str("7");
        assert!(res.is_err());
    }
}
