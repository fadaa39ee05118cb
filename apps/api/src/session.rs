use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::chains::memory::ConversationMemory;
use crate::errors::AppError;

/// Per-user transcripts. Lives until the process exits; never evicted.
#[derive(Debug, Default)]
pub struct Session {
    pub suggestions_memory: ConversationMemory,
    pub script_memory: ConversationMemory,
}

/// In-memory session registry.
///
/// Each session sits behind its own mutex so one user's pipeline runs are
/// serialised without blocking other sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session whose first run has already completed.
    pub async fn insert(&self, id: Uuid, session: Session) -> Arc<Mutex<Session>> {
        let session = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&session));
        info!("Created session {id}");
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn require(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, AppError> {
        self.get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
