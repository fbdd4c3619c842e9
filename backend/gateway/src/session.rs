//! SSE session registry: one outbound message channel per connected client.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

/// Live SSE sessions keyed by session id. Sessions whose client has gone
/// away are pruned on the next delivery attempt.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, mpsc::Sender<String>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session and hand back its id plus the receive side of
    /// its outbound channel.
    pub async fn open(&self) -> (Uuid, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(32);
        let id = Uuid::new_v4();
        self.sessions.lock().await.insert(id, tx);
        (id, rx)
    }

    /// Deliver a message to a session. Returns false when the session is
    /// unknown or its client disconnected.
    pub async fn push(&self, id: Uuid, message: String) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(&id) {
            Some(tx) => {
                if tx.send(message).await.is_err() {
                    sessions.remove(&id);
                    false
                } else {
                    true
                }
            }
            None => false,
        }
    }

    pub async fn close(&self, id: Uuid) {
        self.sessions.lock().await.remove(&id);
    }

    pub async fn active(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
