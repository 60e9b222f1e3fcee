//! User request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::{data::UserUpdate, records::UserRecord};

/// Profile fields an administrator may replace.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<UserRequest> for UserUpdate {
    fn from(request: UserRequest) -> Self {
        UserUpdate {
            name: request.name,
            email: request.email,
            is_admin: request.is_admin,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,

    /// The date and time the user was created
    pub created_at: String,

    /// The date and time the user was last updated
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
}
