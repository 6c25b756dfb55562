//! Token verification error to HTTP error conversion.

use super::http_error::{Error, ErrorKind};
use crate::service::security::TokenError;

impl From<TokenError> for Error<'static> {
    fn from(error: TokenError) -> Self {
        let kind = match error {
            TokenError::Malformed => ErrorKind::MalformedAuthToken,
            TokenError::InvalidSignature
            | TokenError::Expired
            | TokenError::NotYetValid
            | TokenError::MissingSubject => ErrorKind::Unauthorized,
        };

        kind.with_message(format!("invalid token: {error}"))
            .with_resource("authentication")
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn token_errors_are_unauthorized() {
        let errors = [
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::NotYetValid,
            TokenError::Malformed,
            TokenError::MissingSubject,
        ];

        for token_error in errors {
            let error: Error<'static> = token_error.into();
            assert_eq!(error.kind().status_code(), StatusCode::UNAUTHORIZED);
            assert!(
                error
                    .message()
                    .is_some_and(|m| m.starts_with("invalid token: "))
            );
        }
    }

    #[test]
    fn expired_message() {
        let error: Error<'static> = TokenError::Expired.into();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        assert_eq!(error.message(), Some("invalid token: token is expired"));
    }
}
