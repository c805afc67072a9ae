//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: token, stored token record, session state machine, login form
//! - `route`: dashboard routes and the protected-route decision
//! - `repository`: ports for token storage, authentication and navigation

mod model;
mod repository;
mod route;

pub use model::{
    Credentials, DEFAULT_COOKIE_NAME, DEFAULT_COOKIE_PATH, DEFAULT_TOKEN_TTL_DAYS, LoginForm,
    MAX_TOKEN_TTL_DAYS, Session, SessionState, SessionToken, StoredToken, check_token_ttl_days,
};
pub use repository::{AuthApi, Navigator, TokenStore};
pub use route::{Route, RouteDecision};
