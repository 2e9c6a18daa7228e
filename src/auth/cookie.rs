//! Defines functions for handling user authentication with cookies.
//!
//! The auth cookie holds a serialized [Token] and is encrypted by the
//! [PrivateCookieJar], so clients can neither read nor forge it.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::Token, user::UserID};

pub(crate) const COOKIE_TOKEN: &str = "token";
/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);
/// How long the auth cookie should last if the user selects "remember me" at log-in.
pub const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);
/// How far each authenticated request pushes out the expiry of the session.
pub const SESSION_EXTENSION: Duration = Duration::minutes(5);

/// Add an auth cookie to the cookie jar, indicating that a user is logged in and authenticated.
///
/// The cookie expires `duration` after `now`.
///
/// # Errors
///
/// Returns [Error::InvalidDateFormat] if the expiry overflows, or
/// [Error::JSONSerializationError] if the token cannot be serialized.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
    now: OffsetDateTime,
) -> Result<PrivateCookieJar, Error> {
    let expires_at = now.checked_add(duration).ok_or_else(|| {
        Error::InvalidDateFormat(format!("{now} plus {duration} is out of range"))
    })?;

    set_token_cookie(
        jar,
        Token {
            user_id,
            expires_at,
        },
    )
}

fn set_token_cookie(jar: PrivateCookieJar, token: Token) -> Result<PrivateCookieJar, Error> {
    let token_string = serde_json::to_string(&token)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_TOKEN, token_string))
            .expires(token.expires_at)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Read the token from the auth cookie and check it is still valid at `now`.
///
/// # Errors
///
/// Returns an:
/// - [Error::CookieMissing] if there is no auth cookie,
/// - [Error::InvalidToken] if the cookie does not hold a token,
/// - [Error::ExpiredSession] if the token expired at or before `now`.
pub fn get_token_from_cookies(jar: &PrivateCookieJar, now: OffsetDateTime) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;
    let token: Token =
        serde_json::from_str(cookie.value_trimmed()).map_err(|_| Error::InvalidToken)?;

    if token.is_expired(now) {
        return Err(Error::ExpiredSession);
    }

    Ok(token)
}

/// Set the expiry of the auth cookie in `jar` to the latest of `now` plus
/// `duration` and the token's current expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned. Returns the same
/// errors as [get_token_from_cookies], or [Error::InvalidDateFormat] if the
/// new expiry overflows.
pub fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
    now: OffsetDateTime,
) -> Result<PrivateCookieJar, Error> {
    let token = get_token_from_cookies(&jar, now)?;
    let new_expiry = now.checked_add(duration).ok_or_else(|| {
        Error::InvalidDateFormat(format!("{now} plus {duration} is out of range"))
    })?;

    if new_expiry <= token.expires_at {
        return Ok(jar);
    }

    set_token_cookie(
        jar,
        Token {
            user_id: token.user_id,
            expires_at: new_expiry,
        },
    )
}
