//! Tokio runtime helpers for async-to-sync bridges.
//!
//! The storage layer is async (libsql) while the dictionary API is
//! synchronous. A dictionary handle owns a current-thread runtime and drives
//! every storage call through `run_async`.

use std::future::Future;
use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

/// Build the current-thread runtime owned by a dictionary handle.
pub fn build_runtime() -> std::io::Result<Runtime> {
    Builder::new_current_thread().enable_all().build()
}

/// Run an async future to completion from synchronous code.
///
/// Handles three scenarios:
/// 1. Inside a multi-thread Tokio runtime, uses `block_in_place` to block
///    on the future with that runtime.
/// 2. Inside any other runtime flavor, where `block_in_place` is not
///    allowed, blocks on the given runtime from a scoped helper thread.
/// 3. Otherwise blocks on the given runtime directly.
///
/// # Arguments
/// * `runtime` - Runtime used when the ambient runtime cannot be blocked on
/// * `future` - The async future to execute
///
/// # Example
/// ```ignore
/// use crate::util::{build_runtime, run_async};
///
/// let rt = build_runtime()?;
/// let entries = run_async(&rt, backend.list_entries());
/// ```
pub fn run_async<F, T>(runtime: &Runtime, future: F) -> T
where
    F: Future<Output = T> + Send,
    T: Send,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(future))
        }
        Ok(_) => std::thread::scope(|scope| {
            match scope.spawn(|| runtime.block_on(future)).join() {
                Ok(value) => value,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }),
        Err(_) => runtime.block_on(future),
    }
}

#[cfg(test)]
#[path = "runtime_test.rs"]
mod tests;
