//! Embedded bucketed key-value store.
//!
//! # Responsibility
//! - Provide named buckets of ordered byte keys on top of one SQLite file.
//! - Run read closures against a consistent snapshot and write closures
//!   atomically with one writer at a time.
//!
//! # Invariants
//! - Buckets are created only inside [`Store::update`] and never dropped.
//! - Reading a missing bucket yields `None`, never an error.
//! - A write closure returning `Err` leaves no trace in the store.
//! - Scans visit keys in ascending byte order.

mod bucket;

pub use bucket::{Bucket, BucketMut, ReadTx, WriteTx};

use crate::db::{open_db, open_db_in_memory, open_reader, DbError, DbResult};
use parking_lot::Mutex;
use rusqlite::{Connection, TransactionBehavior};
use std::path::{Path, PathBuf};

const MAX_IDLE_READERS: usize = 8;

/// Process-wide handle to the key-value store.
///
/// File-backed stores keep one writer connection plus a small pool of
/// read-only connections, so readers run concurrently under WAL snapshots.
/// In-memory stores have a single connection shared by readers and writer.
pub struct Store {
    writer: Mutex<Connection>,
    readers: Mutex<Vec<Connection>>,
    path: Option<PathBuf>,
}

impl Store {
    /// Opens or creates the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref().to_path_buf();
        let writer = open_db(&path)?;
        Ok(Self {
            writer: Mutex::new(writer),
            readers: Mutex::new(Vec::new()),
            path: Some(path),
        })
    }

    /// Opens a private in-memory store, mostly useful for tests.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            writer: Mutex::new(open_db_in_memory()?),
            readers: Mutex::new(Vec::new()),
            path: None,
        })
    }

    /// Backing file path, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs a read-only closure against a consistent snapshot of all buckets.
    ///
    /// The transaction is always rolled back; `f` cannot mutate the store.
    pub fn view<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&ReadTx<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        let Some(path) = self.path.as_deref() else {
            let mut conn = self.writer.lock();
            return run_view(&mut conn, f);
        };

        let pooled = self.readers.lock().pop();
        let mut conn = match pooled {
            Some(conn) => conn,
            None => open_reader(path)?,
        };
        let result = run_view(&mut conn, f);

        let mut idle = self.readers.lock();
        if idle.len() < MAX_IDLE_READERS {
            idle.push(conn);
        }
        result
    }

    /// Runs a mutating closure inside one exclusive write transaction.
    ///
    /// Changes are committed only when `f` returns `Ok`; any error rolls the
    /// whole transaction back.
    pub fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&WriteTx<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        let mut conn = self.writer.lock();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(DbError::from)?;

        let value = f(&WriteTx::new(&tx))?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }

    /// Lists every bucket name in byte order.
    pub fn bucket_names(&self) -> DbResult<Vec<String>> {
        self.view(|tx| tx.bucket_names())
    }
}

fn run_view<T, E, F>(conn: &mut Connection, f: F) -> Result<T, E>
where
    F: FnOnce(&ReadTx<'_>) -> Result<T, E>,
    E: From<DbError>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Deferred)
        .map_err(DbError::from)?;
    let result = f(&ReadTx::new(&tx));
    tx.rollback().map_err(DbError::from)?;
    result
}
