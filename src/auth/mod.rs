//! User authentication: session cookies, the auth guards, and the log-in,
//! log-out and registration pages.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod register_user;
mod token;

pub use cookie::{
    DEFAULT_COOKIE_DURATION, REMEMBER_ME_COOKIE_DURATION, SESSION_EXTENSION,
    get_token_from_cookies, invalidate_auth_cookie, set_auth_cookie,
};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_api};
pub use redirect::normalize_redirect_url;
pub use register_user::{get_register_page, register_user};
pub(crate) use token::Token;

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;
