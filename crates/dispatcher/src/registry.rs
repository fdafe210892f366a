use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{config::DispatcherConfig, errors::DispatchError, shared::SharedDispatcher};

/// Independent dispatch sessions keyed by branch name.
#[derive(Clone, Debug, Default)]
pub struct BranchRegistry {
    inner: Arc<Mutex<HashMap<String, SharedDispatcher>>>,
    config: Arc<DispatcherConfig>,
}

impl BranchRegistry {
    pub fn new(config: DispatcherConfig) -> Result<Self, DispatchError> {
        // fail early instead of on the first open
        config.vip_capacity()?;
        Ok(Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(config),
        })
    }

    /// Return the session for `branch`, creating an empty one on first use.
    pub async fn open(&self, branch: &str) -> Result<SharedDispatcher, DispatchError> {
        let mut m = self.inner.lock().await;
        if let Some(existing) = m.get(branch) {
            return Ok(existing.clone());
        }
        let session = SharedDispatcher::new((*self.config).clone())?;
        m.insert(branch.to_string(), session.clone());
        Ok(session)
    }

    /// Drop a branch and all of its tickets. Handles already given out keep
    /// working but are no longer reachable by name.
    pub async fn close(&self, branch: &str) -> Result<(), DispatchError> {
        self.inner
            .lock()
            .await
            .remove(branch)
            .map(|_| ())
            .ok_or_else(|| DispatchError::BranchNotFound(branch.to_string()))
    }

    /// Open branch names, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.lock().await.keys().cloned().collect();
        names.sort();
        names
    }
}
