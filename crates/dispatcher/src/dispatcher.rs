use std::num::NonZeroUsize;

use ticket_desk_proto::{validate_name, Priority, Snapshot, Ticket, TicketId, TicketKind};
use tracing::{debug, warn};

use crate::{
    config::{DispatcherConfig, UndoOverflow, DEFAULT_RING_CAPACITY},
    errors::DispatchError,
    ids::IdSource,
    queue::FifoQueue,
    ring::BoundedRing,
    sorter::{sort_tickets, SortAlgorithm, SortCriteria},
    stack::LifoStack,
    Lane,
};

/// Where an undone ticket ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restored {
    Vip,
    Standard,
    /// VIP ticket placed at the front of the standard queue because the VIP lane was full.
    FellBackToStandard,
    /// VIP ticket dropped because the VIP lane was full.
    Lost,
}

#[derive(Debug, Clone)]
pub struct UndoOutcome {
    pub ticket_id: TicketId,
    pub restored: Restored,
    pub snapshot: Snapshot,
    capacity: usize,
}

impl UndoOutcome {
    /// Non-fatal capacity warning when the ticket could not return to the VIP lane.
    pub fn warning(&self) -> Option<DispatchError> {
        match self.restored {
            Restored::Lost | Restored::FellBackToStandard => {
                Some(DispatchError::CapacityExceeded { capacity: self.capacity })
            }
            Restored::Vip | Restored::Standard => None,
        }
    }
}

/// One dispatch session: a VIP ring, a standard queue and a resolved stack.
///
/// Every operation mutates at most the containers it names and hands back a
/// fresh [`Snapshot`]. A failed operation leaves all state untouched, with the
/// single exception of an undo whose VIP ticket cannot re-enter a full lane.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    vip: BoundedRing<Ticket>,
    standard: FifoQueue<Ticket>,
    resolved: LifoStack<Ticket>,
    ids: IdSource,
    undo_overflow: UndoOverflow,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Result<Self, DispatchError> {
        Ok(Self::with_capacity(config.vip_capacity()?, &config))
    }

    fn with_capacity(capacity: NonZeroUsize, config: &DispatcherConfig) -> Self {
        Self {
            vip: BoundedRing::new(capacity),
            standard: FifoQueue::new(),
            resolved: LifoStack::new(),
            ids: IdSource::new(config.id_policy),
            undo_overflow: config.undo_overflow,
        }
    }

    /// Create a pending ticket and route it to its lane.
    pub fn create_ticket(
        &mut self,
        name: &str,
        kind: TicketKind,
        priority: Priority,
    ) -> Result<Snapshot, DispatchError> {
        let name = validate_name(name)?;

        let capacity = self.vip.capacity();

        // reject before drawing an id so a refused VIP leaves no trace
        if kind == TicketKind::Vip && self.vip.is_full() {
            return Err(DispatchError::CapacityExceeded { capacity });
        }

        let ticket = Ticket::new(self.ids.next_id(), name, kind, priority)?;
        let id = ticket.id();
        match kind {
            TicketKind::Vip => {
                self.vip
                    .enqueue(ticket)
                    .map_err(|_| DispatchError::CapacityExceeded { capacity })?;
            }
            TicketKind::Normal => self.standard.enqueue(ticket),
        }

        debug!(ticket = %id, %kind, %priority, "ticket created");
        Ok(self.snapshot())
    }

    /// Serve the next ticket: VIP lane head first, otherwise standard queue head.
    pub fn serve_ticket(&mut self) -> Result<Snapshot, DispatchError> {
        let mut ticket = self
            .vip
            .dequeue()
            .or_else(|| self.standard.dequeue())
            .ok_or(DispatchError::EmptyQueue)?;

        ticket.mark_resolved();
        debug!(ticket = %ticket.id(), kind = %ticket.kind(), "ticket served");
        self.resolved.push(ticket);
        Ok(self.snapshot())
    }

    /// Reopen the most recently resolved ticket.
    ///
    /// Normal tickets return to the front of the standard queue. VIP tickets
    /// return to the tail of the VIP lane; if it is full the configured
    /// [`UndoOverflow`] policy applies and the ticket stays out of history
    /// either way.
    pub fn undo_resolve(&mut self) -> Result<UndoOutcome, DispatchError> {
        let mut ticket = self.resolved.pop().ok_or(DispatchError::StackUnderflow)?;
        ticket.mark_pending();
        let ticket_id = ticket.id();

        let restored = match ticket.kind() {
            TicketKind::Normal => {
                self.standard.enqueue_front(ticket);
                Restored::Standard
            }
            TicketKind::Vip => match self.vip.enqueue(ticket) {
                Ok(()) => Restored::Vip,
                Err(ticket) => match self.undo_overflow {
                    UndoOverflow::Discard => {
                        warn!(ticket = %ticket_id, "VIP lane full, undone ticket lost");
                        Restored::Lost
                    }
                    UndoOverflow::Fallback => {
                        warn!(
                            ticket = %ticket_id,
                            "VIP lane full, undone ticket moved to standard queue"
                        );
                        self.standard.enqueue_front(ticket);
                        Restored::FellBackToStandard
                    }
                },
            },
        };

        debug!(ticket = %ticket_id, ?restored, "resolve undone");
        Ok(UndoOutcome {
            ticket_id,
            restored,
            snapshot: self.snapshot(),
            capacity: self.vip.capacity(),
        })
    }

    /// Reorder the standard queue in place. Serve order follows the new order.
    pub fn optimize_standard_queue(
        &mut self,
        criteria: SortCriteria,
        algorithm: SortAlgorithm,
    ) -> Result<Snapshot, DispatchError> {
        if self.standard.is_empty() {
            return Err(DispatchError::EmptyContainer(Lane::Standard));
        }
        sort_tickets(self.standard.as_mut_slice(), criteria, algorithm)?;
        debug!(%criteria, %algorithm, len = self.standard.len(), "standard queue sorted");
        Ok(self.snapshot())
    }

    /// Reorder resolved history in place, bottom first. Undo pops the new top.
    pub fn organize_resolved_history(
        &mut self,
        criteria: SortCriteria,
        algorithm: SortAlgorithm,
    ) -> Result<Snapshot, DispatchError> {
        if self.resolved.is_empty() {
            return Err(DispatchError::EmptyContainer(Lane::Resolved));
        }
        sort_tickets(self.resolved.as_mut_slice(), criteria, algorithm)?;
        debug!(%criteria, %algorithm, len = self.resolved.len(), "resolved history sorted");
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            vip: self.vip.iter().cloned().collect(),
            standard: self.standard.iter().cloned().collect(),
            resolved: self.resolved.iter().cloned().collect(),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_RING_CAPACITY, &DispatcherConfig::default())
    }
}
