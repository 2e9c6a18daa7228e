//! Authentication middleware that validates cookies, extends sessions, and rejects anonymous requests.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{
    AppState, Error,
    auth::{
        SESSION_EXTENSION,
        cookie::{extend_auth_cookie_duration_if_needed, get_token_from_cookies},
        redirect::build_log_in_redirect_url,
    },
    clock::Clock,
    endpoints,
};

/// The state needed for the auth middleware
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// Decides whether a session has expired.
    pub clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            clock: state.clock.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Checks for a valid auth cookie, runs the request with the user ID as an
/// extension, and extends the session on the way out. Requests without a
/// valid cookie get the response from `reject`.
async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    reject: impl FnOnce(Error) -> Response,
) -> Response {
    let now = state.clock.now_utc();

    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}. Rejecting request.");
            return reject(Error::CookieMissing);
        }
    };
    let user_id = match get_token_from_cookies(&jar, now) {
        Ok(token) => token.user_id,
        Err(error) => {
            tracing::debug!("Rejecting request to {}: {error}", parts.uri.path());
            return reject(error);
        }
    };

    parts.extensions.insert(user_id);
    let request = Request::from_parts(parts, body);
    let response = next.run(request).await;

    let (mut parts, body) = response.into_parts();
    let jar = match extend_auth_cookie_duration_if_needed(jar.clone(), SESSION_EXTENSION, now) {
        Ok(updated_jar) => updated_jar,
        Err(err) => {
            tracing::error!("Error extending cookie duration: {err:?}. Rolling back cookie jar.");
            jar
        }
    };
    for (key, val) in jar.into_response().headers().iter() {
        if key != SET_COOKIE {
            continue;
        }

        parts.headers.append(key, val.to_owned());
    }

    Response::from_parts(parts, body)
}

/// Middleware function for pages that checks for a valid auth cookie.
/// The user ID is placed into the request if the cookie is valid, otherwise a redirect to the log-in page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let log_in_redirect_url = build_log_in_redirect_url(&request).unwrap_or_else(|| {
        tracing::warn!("Invalid redirect URL from request URI. Falling back to log-in page.");
        endpoints::LOG_IN_VIEW.to_owned()
    });

    auth_guard_internal(state, request, next, move |_| {
        Redirect::to(&log_in_redirect_url).into_response()
    })
    .await
}

/// Middleware function for the JSON API that checks for a valid auth cookie.
/// The user ID is placed into the request if the cookie is valid, otherwise `401 Unauthorized` is returned with a JSON error.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard_api(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |error| error.into_response()).await
}

#[cfg(test)]
mod auth_guard_tests {
    use std::sync::Arc;

    use axum::{
        Extension, Router,
        extract::State,
        http::{HeaderMap, StatusCode, header::COOKIE},
        middleware,
        response::Html,
        routing::{get, post},
    };
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use axum_test::TestServer;
    use sha2::Digest;
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::{
        Error,
        auth::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, get_token_from_cookies, set_auth_cookie},
        clock::FixedClock,
        test_utils::without_expiry,
        user::UserID,
    };

    use super::{AuthState, auth_guard, auth_guard_api};

    const NOW: OffsetDateTime = datetime!(2024-03-05 12:00 UTC);

    async fn test_handler(Extension(user_id): Extension<UserID>) -> Html<String> {
        Html(format!("<h1>Hello, user {user_id}!</h1>"))
    }

    async fn stub_log_in_route(
        State(state): State<AuthState>,
        jar: PrivateCookieJar,
    ) -> Result<PrivateCookieJar, Error> {
        set_auth_cookie(jar, UserID::new(1), DEFAULT_COOKIE_DURATION, state.clock.now_utc())
    }

    const TEST_LOG_IN_ROUTE: &str = "/log_in/stub";
    const TEST_PROTECTED_ROUTE: &str = "/protected";
    const TEST_API_ROUTE: &str = "/api/protected";

    fn get_test_state(now: OffsetDateTime) -> AuthState {
        let hash = sha2::Sha512::digest("nafstenoas");

        AuthState {
            cookie_key: Key::from(&hash),
            clock: Arc::new(FixedClock(now)),
        }
    }

    fn get_test_server(state: AuthState) -> TestServer {
        let pages = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));
        let api = Router::new()
            .route(TEST_API_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard_api));
        let app = pages
            .merge(api)
            .route(TEST_LOG_IN_ROUTE, post(stub_log_in_route))
            .with_state(state);

        TestServer::new(app)
    }

    async fn log_in(server: &TestServer) -> Cookie<'static> {
        let cookie = server.post(TEST_LOG_IN_ROUTE).await.cookie(COOKIE_TOKEN);
        assert_eq!(cookie.expires_datetime(), Some(NOW + DEFAULT_COOKIE_DURATION));

        without_expiry(cookie)
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_cookie() {
        let server = get_test_server(get_test_state(NOW));
        let token_cookie = log_in(&server).await;

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(token_cookie)
            .await;

        response.assert_status_ok();
        response.assert_text("<h1>Hello, user 1!</h1>");
    }

    #[tokio::test]
    async fn page_without_cookie_redirects_to_log_in() {
        let server = get_test_server(get_test_state(NOW));

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location"),
            "/log_in?redirect_url=%2Fprotected"
        );
    }

    #[tokio::test]
    async fn api_without_cookie_is_unauthorized() {
        let server = get_test_server(get_test_state(NOW));

        let response = server.get(TEST_API_ROUTE).await;

        response.assert_status_unauthorized();
        response.assert_json(&serde_json::json!({ "error": "you are not logged in" }));
    }

    #[tokio::test]
    async fn expired_session_is_rejected() {
        let log_in_server = get_test_server(get_test_state(NOW));
        let token_cookie = log_in(&log_in_server).await;
        let later_server = get_test_server(get_test_state(NOW + Duration::minutes(6)));

        let response = later_server
            .get(TEST_API_ROUTE)
            .add_cookie(token_cookie)
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn auth_guard_extends_session() {
        let log_in_server = get_test_server(get_test_state(NOW));
        let token_cookie = log_in(&log_in_server).await;
        let later = NOW + Duration::minutes(3);
        let state = get_test_state(later);
        let later_server = get_test_server(state.clone());

        let response = later_server
            .get(TEST_API_ROUTE)
            .add_cookie(token_cookie)
            .await;

        response.assert_status_ok();
        let cookie = response.cookie(COOKIE_TOKEN);
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            format!("{}={}", cookie.name(), cookie.value()).parse().unwrap(),
        );
        let jar = PrivateCookieJar::from_headers(&headers, state.cookie_key);
        let token = get_token_from_cookies(&jar, later).unwrap();
        assert_eq!(token.expires_at, later + Duration::minutes(5));
    }
}
