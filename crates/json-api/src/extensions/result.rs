//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{debug, error};

/// Map errors that have no dedicated mapping to HTTP errors.
pub(crate) trait ResultExt<T> {
    /// Log and map to 500.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Map to 400 with the error message as the brief.
    fn or_400(self) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self) -> Result<T, StatusError> {
        self.map_err(|error| {
            debug!("rejected request: {error}");

            StatusError::bad_request().brief(error.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn or_400_keeps_the_message() {
        let result: Result<(), String> = Err("unknown payment method: Cash".to_string());

        let error = result.or_400().err();

        assert_eq!(
            error.as_ref().map(|e| e.code),
            Some(StatusCode::BAD_REQUEST)
        );
        assert_eq!(
            error.map(|e| e.brief),
            Some("unknown payment method: Cash".to_string())
        );
    }

    #[test]
    fn or_500_hides_the_message() {
        let result: Result<(), &str> = Err("connection reset");

        let error = result.or_500("failed to load").err();

        assert_eq!(
            error.map(|e| e.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}
