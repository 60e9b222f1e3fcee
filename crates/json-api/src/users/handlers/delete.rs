//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Delete User Handler
///
/// Soft-deletes a non-admin user. Their tokens stop authenticating and their
/// orders are kept.
#[endpoint(
    tags("admin"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Admin users cannot be deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Administrator access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "users.delete", skip(user, depot), err)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;
    let user = user.into_inner();

    state
        .app
        .users
        .delete_user(user.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user, admin = %admin.user(), "deleted user");

    Ok(StatusCode::OK)
}
