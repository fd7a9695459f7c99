//! Use-case stores called by the UI boundary.
//!
//! # Responsibility
//! - Expose the category and item operations as plain synchronous calls.
//! - Log every failure with the operation and the entity it touched.
//!
//! # Invariants
//! - Stores never terminate the process; every failure is returned.
//! - Stores stay storage-agnostic and go through repository traits only.

use crate::repo::{PersistenceError, RepoResult};
use log::error;
use uuid::Uuid;

pub mod category_store;
pub mod item_store;

/// Logs a failed store call and hands the result back unchanged.
pub(crate) fn logged<T>(
    event: &'static str,
    entity: &'static str,
    id: Uuid,
    result: RepoResult<T>,
) -> RepoResult<T> {
    if let Err(err) = &result {
        log_failure(event, entity, id, err);
    }
    result
}

fn log_failure(event: &str, entity: &str, id: Uuid, err: &PersistenceError) {
    error!(
        "event={event} module=store status=error {entity}_id={id} error_code={} error={err}",
        err.code()
    );
}
