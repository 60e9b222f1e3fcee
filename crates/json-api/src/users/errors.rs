//! User Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("A user with this email already exists")
        }
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Name and a valid email are required")
        }
        UsersServiceError::AdminProtected => {
            StatusError::bad_request().brief("Cannot delete an admin user")
        }
        UsersServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
