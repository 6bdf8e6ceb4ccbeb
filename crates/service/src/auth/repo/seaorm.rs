use sea_orm::DatabaseConnection;

use crate::auth::domain::Session;
use crate::auth::errors::AuthError;
use crate::auth::repository::SessionRepository;

pub struct SeaOrmSessionRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

impl From<models::session::Model> for Session {
    fn from(s: models::session::Model) -> Self { Session { id: s.id, user_id: s.user_id, token: s.token } }
}

#[async_trait::async_trait]
impl SessionRepository for SeaOrmSessionRepository {
    async fn find_session_by_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
        let res = models::session::find_by_token(&self.db, token).await?;
        Ok(res.map(Session::from))
    }

    async fn create_session(&self, user_id: i32, token: &str) -> Result<Session, AuthError> {
        let created = models::session::create(&self.db, user_id, token).await?;
        Ok(created.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::service::{AuthConfig, AuthService};
    use crate::test_support::{get_db, seed_user};

    #[tokio::test]
    async fn issued_session_authenticates_against_db() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let user = seed_user(&db).await?;
        let repo = Arc::new(SeaOrmSessionRepository::new(db));
        let svc = AuthService::new(repo.clone(), AuthConfig { jwt_secret: "db-secret".into(), token_ttl_hours: 1 });

        let issued = svc.issue_session(user.id).await?;
        let stored = repo.find_session_by_token(&issued.token).await?.expect("session row");
        assert_eq!(stored.user_id, user.id);

        let identity = svc.authenticate(&issued.token).await?;
        assert_eq!(identity.user_id, user.id);
        assert!(repo.find_session_by_token("no-such-token").await?.is_none());
        Ok(())
    }
}
