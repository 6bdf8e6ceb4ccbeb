use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, info, instrument};

use super::domain::{Claims, Identity, IssuedSession};
use super::errors::AuthError;
use super::repository::SessionRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Auth business service independent of web framework
pub struct AuthService<R: SessionRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: SessionRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is checked when present but not required
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation
    }

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockSessionRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockSessionRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 12 });
    /// let issued = tokio_test::block_on(svc.issue_session(3)).unwrap();
    /// let identity = tokio_test::block_on(svc.authenticate(&issued.token)).unwrap();
    /// assert_eq!(identity.user_id, 3);
    /// assert!(tokio_test::block_on(svc.authenticate("garbage")).is_err());
    /// ```
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let key = DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes());
        let claims = decode::<Claims>(token, &key, &Self::validation())
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::Unauthorized
            })?
            .claims;

        let session = self.repo.find_session_by_token(token).await?.ok_or_else(|| {
            debug!(user_id = claims.user_id, "no session for token");
            AuthError::Unauthorized
        })?;
        if session.user_id != claims.user_id {
            debug!(claimed = claims.user_id, owner = session.user_id, "session belongs to another user");
            return Err(AuthError::Unauthorized);
        }
        Ok(Identity { user_id: session.user_id })
    }

    /// Sign a token for `user_id` and persist it as a session.
    #[instrument(skip(self))]
    pub async fn issue_session(&self, user_id: i32) -> Result<IssuedSession, AuthError> {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp();
        let claims = Claims { user_id, exp: usize::try_from(exp).ok() };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        let session = self.repo.create_session(user_id, &token).await?;
        info!(user_id, session_id = session.id, "session_issued");
        Ok(IssuedSession { user_id, token })
    }
}
