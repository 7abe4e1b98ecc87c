//! Route handlers.
//!
//! Store access is blocking, so every service call runs on the blocking
//! thread pool; a dropped request does not interrupt a running transaction.

pub mod department;
pub mod employee;
pub mod health;

use crate::error::ApiError;
use staffdir_core::RepoResult;

async fn run_blocking<T, F>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> RepoResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(call)
        .await
        .map_err(|err| ApiError::Internal(format!("store task failed: {err}")))?;
    Ok(result?)
}
