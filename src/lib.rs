//! # Tasknest
//!
//! A server-rendered to-do list built with Axum and SQLite, with cookie-based JWT
//! sessions and one-shot flash messages.
//!
//! ## Request pipeline
//!
//! ```text
//! LogRequests -> ClassifySession -> RequireSession -> Router -> adapt(label, handler)
//! ```
//!
//! - [`logging::LogRequests`] times the request and writes one line per request,
//!   using the handler label and error message the adapter left on the response
//! - [`middleware::flag::ClassifySession`] marks whether the caller is signed in
//! - [`middleware::auth::RequireSession`] redirects protected paths to `/login`
//!   unless the session cookie is valid, and attaches the caller's identity
//! - [`handler::adapt`] logs each handler outcome and turns failures into the
//!   400/404/500 pages or the JSON fallback
//!
//! The stages are composed by [`middleware::stack::Stack`].
//!
//! ## Layout
//!
//! ```text
//! src/
//! ├── context.rs       # Per-request identity and protected-origin flag
//! ├── flash.rs         # One-shot flash cookies
//! ├── session.rs       # The `jwt` session cookie
//! ├── handler.rs       # Handler adapter and error dispatch
//! ├── middleware/      # Composer, session guard, session classifier
//! ├── logging.rs       # Logging stage and tracing setup
//! ├── views.rs         # Page rendering
//! ├── modules/
//! │   ├── auth/        # Home, register, login, logout
//! │   ├── todos/       # Task list and CRUD
//! │   └── users/       # Account storage
//! ├── router.rs        # Route table and pipeline assembly
//! └── state.rs         # Shared dependencies
//! ```
//!
//! Each feature module keeps the `controller.rs` / `service.rs` / `model.rs` /
//! `router.rs` split.
//!
//! ## Environment Variables
//!
//! ```bash
//! DATABASE_URL=sqlite://app_data.db
//! JWT_SECRET=your-secure-secret-key
//! JWT_SESSION_EXPIRY=3600
//! BIND_ADDR=0.0.0.0:3000
//! ASSETS_DIR=./assets
//! LOG_DIR=storage/logs
//! ```

pub mod cli;
pub mod context;
pub mod flash;
pub mod handler;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod session;
pub mod state;
pub mod validator;
pub mod views;

// Re-export workspace crates for convenience
pub use tasknest_auth;
pub use tasknest_config;
pub use tasknest_core;
pub use tasknest_db;
