//! In-memory session store.
//!
//! Sessions are request-scoped records owned by the caller's session id; the
//! store is the only shared state in the service and lives in `AppState`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::documents::GeneratedDocuments;
use crate::models::session::Session;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and stores an empty session.
    pub async fn create(&self) -> Session {
        let session = Session::new();
        self.inner.write().await.insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Drops any previous output ahead of a new generation.
    pub async fn clear(&self, id: Uuid) -> Result<Session, AppError> {
        self.update(id, Session::clear).await
    }

    pub async fn populate(
        &self,
        id: Uuid,
        documents: GeneratedDocuments,
    ) -> Result<Session, AppError> {
        self.update(id, |session| session.populate(documents)).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn update(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut Session),
    ) -> Result<Session, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        apply(session);
        Ok(session.clone())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
