/// Thin HTTP request layer over [`crate::service::TokenBoard`]
///
/// All routes live under `/api` and speak JSON. Failures are reported as
/// `{ "error": "<message>", "code": "<CODE>" }` with a status derived from the
/// error kind.
mod server;

pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

// Public API for starting the webserver
pub use server::{build_app, start_server};
pub use state::AppState;
