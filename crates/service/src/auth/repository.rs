use async_trait::async_trait;

use super::domain::Session;
use super::errors::AuthError;

/// Repository abstraction for session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_session_by_token(&self, token: &str) -> Result<Option<Session>, AuthError>;
    async fn create_session(&self, user_id: i32, token: &str) -> Result<Session, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct MockSessionRepository {
        sessions: Mutex<HashMap<String, Session>>, // key: token
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn find_session_by_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
            let sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(sessions.get(token).cloned())
        }

        async fn create_session(&self, user_id: i32, token: &str) -> Result<Session, AuthError> {
            let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
            let id = i32::try_from(sessions.len()).unwrap_or(i32::MAX - 1) + 1;
            let session = Session { id, user_id, token: token.to_string() };
            sessions.insert(token.to_string(), session.clone());
            Ok(session)
        }
    }
}
