//! Request pipeline stages.
//!
//! - [`stack`]: the ordered composer and the [`Middleware`](stack::Middleware) trait
//! - [`flag`]: [`ClassifySession`](flag::ClassifySession), marks signed-in callers on
//!   every request
//! - [`auth`]: [`RequireSession`](auth::RequireSession), rejects protected paths
//!   without a valid session
//!
//! The logging stage lives in [`crate::logging`].

pub mod auth;
pub mod flag;
pub mod stack;
