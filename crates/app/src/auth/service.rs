//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion, AuthServiceError, Caller, IssuedApiToken, NewApiToken,
        format_api_token, generate_api_token_secret, parse_api_token,
        repository::{AuthRepository, PgAuthRepository},
        token_verifier,
    },
    database::Db,
    domain::users::records::UserUuid,
};

#[derive(Clone)]
pub struct PgAuthService {
    repository: Arc<dyn AuthRepository>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: Arc::new(PgAuthRepository::new(db)),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_repository(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or insertion fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);
        let token_hash = token_verifier(&token_uuid, version, &user_uuid, &secret);

        let metadata = self
            .repository
            .create_api_token(NewApiToken {
                uuid: token_uuid,
                user_uuid,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        info!(token = %token_uuid, user = %user_uuid, "issued api token");

        Ok(IssuedApiToken { token, metadata })
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        let revoked = self.repository.revoke_api_token(token_uuid).await?;

        Ok(revoked.is_some())
    }
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService").finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let expected = token_verifier(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.user_uuid,
            &parsed_token.secret,
        );

        if expected != token.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort; authentication does not depend on this write.
        if let Err(error) = self
            .repository
            .touch_api_token(parsed_token.token_uuid)
            .await
        {
            debug!("failed to touch api token: {error}");
        }

        Ok(Caller {
            user: token.user_uuid,
            is_admin: token.is_admin,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the calling user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError>;
}
