//! One-call-one-transaction helper shared by the SQLite repositories.

use super::RepoResult;
use log::debug;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// Current time as Unix epoch milliseconds, evaluated by SQLite.
pub(crate) const NOW_EPOCH_MS_SQL: &str =
    "CAST((julianday('now') - 2440587.5) * 86400000.0 AS INTEGER)";

/// Runs `work` inside one `BEGIN IMMEDIATE` transaction.
///
/// Commits only when `work` succeeds. On error the transaction is dropped,
/// which rolls back every statement `work` issued.
pub(crate) fn write_unit<T>(
    conn: &Connection,
    event: &'static str,
    work: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
) -> RepoResult<T> {
    let started_at = Instant::now();
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let value = work(&tx)?;
    tx.commit()?;
    debug!(
        "event={event} module=repo status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::write_unit;
    use crate::db::open_db_in_memory;
    use crate::repo::PersistenceError;
    use uuid::Uuid;

    #[test]
    fn failed_unit_rolls_back_earlier_statements() {
        let conn = open_db_in_memory().unwrap();
        let missing = Uuid::new_v4();

        let result: Result<(), _> = write_unit(&conn, "test_unit", |tx| {
            tx.execute(
                "INSERT INTO categories (uuid, name, color_code) VALUES ('x', 'n', '');",
                [],
            )?;
            Err(PersistenceError::CategoryNotFound(missing))
        });
        assert!(matches!(result, Err(PersistenceError::CategoryNotFound(id)) if id == missing));

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn now_expression_yields_epoch_millis() {
        let conn = open_db_in_memory().unwrap();
        let now: i64 = conn
            .query_row(&format!("SELECT {};", super::NOW_EPOCH_MS_SQL), [], |row| {
                row.get(0)
            })
            .unwrap();
        // 2020-01-01T00:00:00Z in epoch ms.
        assert!(now > 1_577_836_800_000);
    }
}
