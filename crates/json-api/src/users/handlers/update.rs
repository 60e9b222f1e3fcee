//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::{
        errors::into_status_error,
        models::{UserRequest, UserResponse},
    },
};

/// Update User Handler
///
/// Replaces the user's name and email, and grants or revokes administrator
/// access. Tokens pick up the new admin flag on their next request.
#[endpoint(
    tags("admin"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Administrator access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "users.update",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty, is_admin = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;
    let request = json.into_inner();
    let user = user.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("is_admin", request.is_admin);

    let updated = state
        .app
        .users
        .update_user(user.into(), request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user, admin = %admin.user(), "updated user");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::users::{UsersServiceError, records::UserUuid};

    use crate::test_helpers::{Mocks, admin, buyer, make_user, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/users/{user}").put(handler)
    }

    #[tokio::test]
    async fn promotes_a_user_to_admin() -> TestResult {
        let uuid = UserUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_update_user()
            .once()
            .withf(move |u, update| {
                *u == uuid && update.is_admin && update.email == "mary@nasa.gov"
            })
            .return_once(move |_, update| {
                let mut user = make_user(uuid);

                user.email = update.email;
                user.is_admin = update.is_admin;

                Ok(user)
            });

        let mut res = TestClient::put(format!("http://example.com/admin/users/{uuid}"))
            .json(&json!({ "name": "Mary Jackson", "email": "mary@nasa.gov", "is_admin": true }))
            .send(&service_as(admin(), mocks, route()))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_admin);
        assert_eq!(body.email, "mary@nasa.gov");

        Ok(())
    }

    #[tokio::test]
    async fn admin_flag_defaults_to_false() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_update_user()
            .once()
            .withf(|_, update| !update.is_admin)
            .return_once(|u, _| Ok(make_user(u)));

        let res = TestClient::put(format!("http://example.com/admin/users/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Mary Jackson", "email": "mary@example.com" }))
            .send(&service_as(admin(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn taken_emails_return_409() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_update_user()
            .once()
            .return_once(|_, _| Err(UsersServiceError::AlreadyExists));

        let res = TestClient::put(format!("http://example.com/admin/users/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Mary Jackson", "email": "ada@example.com" }))
            .send(&service_as(admin(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_profiles_return_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_update_user()
            .once()
            .return_once(|_, _| Err(UsersServiceError::InvalidData));

        let res = TestClient::put(format!("http://example.com/admin/users/{}", Uuid::now_v7()))
            .json(&json!({ "name": " ", "email": "mary" }))
            .send(&service_as(admin(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn buyers_cannot_update_users() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.users.expect_update_user().never();

        let res = TestClient::put(format!("http://example.com/admin/users/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Mallory", "email": "mallory@example.com", "is_admin": true }))
            .send(&service_as(buyer(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
