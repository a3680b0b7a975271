pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod gate;
pub mod observability;
pub mod render;
pub mod routes;
pub mod session;
pub mod template;

pub use config::Config;
pub use routes::AppState;

/// Create app router
///
/// Used by the `serve` command and by integration tests, which point
/// `backend.base_url` at a stub server.
pub fn create_app(config: Config) -> axum::Router {
    routes::router(AppState::new(config))
}
