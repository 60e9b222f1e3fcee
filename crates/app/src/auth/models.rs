//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::{ApiTokenVersion, AuthorizationDenied},
    domain::users::records::UserUuid,
};

/// Identity of an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// User making the request.
    pub user: UserUuid,

    /// Whether the user holds administrator rights.
    pub is_admin: bool,
}

impl Caller {
    /// The single authorization gate for back-office actions.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationDenied`] unless the caller is an administrator.
    pub fn require_admin(self) -> Result<AdminCaller, AuthorizationDenied> {
        if self.is_admin {
            Ok(AdminCaller { user: self.user })
        } else {
            Err(AuthorizationDenied)
        }
    }
}

/// Proof that the caller passed [`Caller::require_admin`]. Back-office
/// operations take this instead of a [`Caller`], so a missing check does not
/// compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminCaller {
    user: UserUuid,
}

impl AdminCaller {
    /// The administrator's user UUID.
    #[must_use]
    pub fn user(&self) -> UserUuid {
        self.user
    }
}

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    /// User that owns this API token.
    pub user_uuid: UserUuid,

    /// Whether the owning user is an administrator.
    pub is_admin: bool,

    /// Token format/hash version.
    pub version: ApiTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
