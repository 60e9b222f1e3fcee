//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::auth::{AdminCaller, Caller};

/// Helpers for request-scoped values and mapping their absence to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_caller(&mut self, caller: Caller);

    /// The authenticated caller, or 401 when the auth hoop did not run.
    fn caller_or_401(&self) -> Result<Caller, StatusError>;

    /// The authenticated caller as an administrator, or 401.
    fn admin_or_401(&self) -> Result<AdminCaller, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_caller(&mut self, caller: Caller) {
        self.inject(caller);
    }

    fn caller_or_401(&self) -> Result<Caller, StatusError> {
        self.obtain::<Caller>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }

    fn admin_or_401(&self) -> Result<AdminCaller, StatusError> {
        self.caller_or_401()?
            .require_admin()
            .map_err(|_denied| StatusError::unauthorized().brief("Administrator access required"))
    }
}
