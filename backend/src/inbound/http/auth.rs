//! Bearer token extraction for session-gated handlers.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::session::SessionToken;
use crate::domain::Error;

/// Extracts the session token from the `Authorization: Bearer <token>`
/// header.
///
/// Extraction only checks the token's shape; whether it names a live session
/// is the identity service's call.
#[derive(Debug, Clone)]
pub struct BearerToken(pub SessionToken);

fn token_from_request(req: &HttpRequest) -> Result<BearerToken, Error> {
    let unauthenticated = || Error::unauthenticated("Missing or invalid authorization header");
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or_else(unauthenticated)?;
    let value = header.to_str().map_err(|_| unauthenticated())?;
    let raw = value.strip_prefix("Bearer ").ok_or_else(unauthenticated)?;
    let token = SessionToken::parse(raw).map_err(|_| unauthenticated())?;
    Ok(BearerToken(token))
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(token_from_request(req))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[test]
    fn extracts_well_formed_bearer_token() {
        let token = SessionToken::generate();
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_http_request();
        let extracted = token_from_request(&req).expect("extracts");
        assert_eq!(extracted.0, token);
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let req = TestRequest::default().to_http_request();
        let err = token_from_request(&req).expect_err("must fail");
        assert_eq!(err.code, crate::domain::ErrorCode::Unauthenticated);
    }

    #[rstest]
    #[case("Basic dXNlcjpwdw==")]
    #[case("Bearer")]
    #[case("Bearer short")]
    #[case("bearer 0000000000000000000000000000000000000000000000000000000000000000")]
    fn malformed_headers_are_unauthenticated(#[case] value: &str) {
        let req = TestRequest::default()
            .insert_header(("Authorization", value))
            .to_http_request();
        let err = token_from_request(&req).expect_err("must fail");
        assert_eq!(err.code, crate::domain::ErrorCode::Unauthenticated);
    }
}
