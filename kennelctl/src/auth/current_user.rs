use crate::{
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{instrument, trace};

/// Extract user from JWT session cookie if present and valid
/// Returns:
/// - None: No JWT cookie present
/// - Some(Ok(user)): Valid JWT found and verified
/// - Some(Err(error)): JWT cookie present but invalid/malformed
#[instrument(skip(parts, config))]
fn try_jwt_session_auth(parts: &Parts, config: &crate::config::Config) -> Option<Result<CurrentUser>> {
    let cookie_header = parts.headers.get(axum::http::header::COOKIE)?;

    let cookie_str = match cookie_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid cookie header: {e}"),
            }))
        }
    };
    let cookie_name = &config.auth.native.session.cookie_name;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=') {
            if name == cookie_name {
                // Try to verify the JWT session token
                match session::verify_session_token(value, config) {
                    Ok(user) => return Some(Ok(user)),
                    Err(_) => {
                        // Invalid/expired token, continue checking other cookies
                        // We don't propagate JWT verification errors as they're expected for expired tokens
                        continue;
                    }
                }
            }
        }
    }
    None
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        if !state.config.auth.native.enabled {
            trace!("Native authentication is disabled");
            return Err(Error::Unauthenticated { message: None });
        }

        match try_jwt_session_auth(parts, &state.config) {
            Some(Ok(user)) => Ok(user),
            Some(Err(e)) => {
                trace!("JWT session authentication failed: {:?}", e);
                Err(Error::Unauthenticated { message: None })
            }
            None => {
                trace!("No authentication credentials found in request");
                Err(Error::Unauthenticated { message: None })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::Role;
    use crate::auth::session::create_session_token;
    use crate::config::Config;
    use uuid::Uuid;

    fn test_config() -> Config {
        Config {
            secret_key: Some("test-secret".to_string()),
            ..Default::default()
        }
    }

    fn parts_with_cookie(cookie: &str) -> Parts {
        let request = axum::http::Request::builder()
            .uri("http://localhost/test")
            .header(axum::http::header::COOKIE, cookie)
            .body(())
            .unwrap();

        let (parts, _body) = request.into_parts();
        parts
    }

    #[test]
    fn test_valid_session_cookie_extraction() {
        let config = test_config();
        let user = CurrentUser {
            id: Uuid::new_v4(),
            email: "customer@example.com".to_string(),
            role: Role::Customer,
            display_name: None,
        };
        let token = create_session_token(&user, &config).unwrap();

        let cookie_name = &config.auth.native.session.cookie_name;
        let parts = parts_with_cookie(&format!("{cookie_name}={token}; other=value"));

        let result = try_jwt_session_auth(&parts, &config).unwrap().unwrap();
        assert_eq!(result.id, user.id);
        assert_eq!(result.email, user.email);
    }

    #[test]
    fn test_missing_cookie_returns_none() {
        let config = test_config();
        let parts = parts_with_cookie("unrelated=value");

        assert!(try_jwt_session_auth(&parts, &config).is_none());
    }

    #[test]
    fn test_garbage_token_returns_none() {
        let config = test_config();
        let cookie_name = &config.auth.native.session.cookie_name;
        let parts = parts_with_cookie(&format!("{cookie_name}=garbage.token.value"));

        // Invalid tokens are skipped, not propagated as errors
        assert!(try_jwt_session_auth(&parts, &config).is_none());
    }
}
