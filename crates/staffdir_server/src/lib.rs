//! HTTP/JSON surface for the staff directory.
//!
//! Handlers translate requests into one service call each and map
//! repository errors onto status codes; they hold no other logic.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
