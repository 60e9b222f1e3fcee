//! User Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UsersResponse},
};

/// User Index Handler
///
/// Lists active users, newest first.
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Users"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Administrator access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_or_401()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::users::records::UserUuid;

    use crate::test_helpers::{Mocks, admin, buyer, make_user, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/users").get(handler)
    }

    #[tokio::test]
    async fn lists_every_user() -> TestResult {
        let first = UserUuid::new();
        let second = UserUuid::new();
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_list_users()
            .once()
            .return_once(move || Ok(vec![make_user(second), make_user(first)]));

        let mut res = TestClient::get("http://example.com/admin/users")
            .send(&service_as(admin(), mocks, route()))
            .await;

        let body: UsersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.users.iter().map(|user| user.uuid).collect::<Vec<_>>(),
            vec![second.into_uuid(), first.into_uuid()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn buyers_cannot_list_users() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.users.expect_list_users().never();

        let res = TestClient::get("http://example.com/admin/users")
            .send(&service_as(buyer(), mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
