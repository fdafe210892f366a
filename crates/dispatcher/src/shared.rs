use std::sync::Arc;

use ticket_desk_proto::{Priority, Snapshot, TicketKind};
use tokio::sync::Mutex;

use crate::{
    config::DispatcherConfig,
    dispatcher::{Dispatcher, UndoOutcome},
    errors::DispatchError,
    sorter::{SortAlgorithm, SortCriteria},
};

/// Cloneable handle that serializes access to one [`Dispatcher`].
/// Each operation runs to completion inside a single lock scope.
#[derive(Clone, Debug, Default)]
pub struct SharedDispatcher {
    inner: Arc<Mutex<Dispatcher>>,
}

impl SharedDispatcher {
    pub fn new(config: DispatcherConfig) -> Result<Self, DispatchError> {
        Ok(Self::from_dispatcher(Dispatcher::new(config)?))
    }

    pub fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { inner: Arc::new(Mutex::new(dispatcher)) }
    }

    pub async fn create_ticket(
        &self,
        name: &str,
        kind: TicketKind,
        priority: Priority,
    ) -> Result<Snapshot, DispatchError> {
        self.inner.lock().await.create_ticket(name, kind, priority)
    }

    pub async fn serve_ticket(&self) -> Result<Snapshot, DispatchError> {
        self.inner.lock().await.serve_ticket()
    }

    pub async fn undo_resolve(&self) -> Result<UndoOutcome, DispatchError> {
        self.inner.lock().await.undo_resolve()
    }

    pub async fn optimize_standard_queue(
        &self,
        criteria: SortCriteria,
        algorithm: SortAlgorithm,
    ) -> Result<Snapshot, DispatchError> {
        self.inner.lock().await.optimize_standard_queue(criteria, algorithm)
    }

    pub async fn organize_resolved_history(
        &self,
        criteria: SortCriteria,
        algorithm: SortAlgorithm,
    ) -> Result<Snapshot, DispatchError> {
        self.inner.lock().await.organize_resolved_history(criteria, algorithm)
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.inner.lock().await.snapshot()
    }
}
