mod auth;
mod error_handler;
mod rate_limit;

pub use auth::cron_auth;
pub use error_handler::log_errors;
pub use rate_limit::{RateLimitGuard, client_identifier, rate_limit};
