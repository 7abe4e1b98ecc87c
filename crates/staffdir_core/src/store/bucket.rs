//! Transaction and bucket handles.
//!
//! Handles borrow the connection of the surrounding transaction, so they
//! cannot outlive the `view`/`update` closure that produced them.

use crate::db::{DbError, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::ops::Deref;

/// Read-only view over all buckets.
pub struct ReadTx<'t> {
    conn: &'t Connection,
}

impl<'t> ReadTx<'t> {
    pub(super) fn new(conn: &'t Connection) -> Self {
        Self { conn }
    }

    /// Returns the bucket, or `None` when it has never been written.
    pub fn bucket(&self, name: &str) -> DbResult<Option<Bucket<'t>>> {
        open_bucket(self.conn, name)
    }

    pub fn bucket_names(&self) -> DbResult<Vec<String>> {
        bucket_names(self.conn)
    }
}

/// Exclusive write transaction.
pub struct WriteTx<'t> {
    conn: &'t Connection,
}

impl<'t> WriteTx<'t> {
    pub(super) fn new(conn: &'t Connection) -> Self {
        Self { conn }
    }

    /// Returns an existing bucket for mutation without creating it.
    pub fn bucket(&self, name: &str) -> DbResult<Option<BucketMut<'t>>> {
        Ok(open_bucket(self.conn, name)?.map(|inner| BucketMut { inner }))
    }

    /// Returns the bucket, registering it first when it does not exist yet.
    pub fn create_bucket_if_not_exists(&self, name: &str) -> DbResult<BucketMut<'t>> {
        self.conn
            .prepare_cached("INSERT OR IGNORE INTO buckets (name) VALUES (?1);")?
            .execute([name])?;
        Ok(BucketMut {
            inner: Bucket::new(self.conn, name),
        })
    }

    pub fn bucket_names(&self) -> DbResult<Vec<String>> {
        bucket_names(self.conn)
    }

    /// Removes `key` from every bucket whose name starts with `prefix`;
    /// returns the number of entries removed.
    pub fn delete_key_in_buckets_with_prefix(
        &self,
        prefix: &str,
        key: &[u8],
    ) -> DbResult<usize> {
        let removed = self
            .conn
            .prepare_cached(
                "DELETE FROM bucket_entries
                 WHERE key = ?2 AND substr(bucket, 1, length(?1)) = ?1;",
            )?
            .execute(params![prefix, key])?;
        Ok(removed)
    }
}

/// Read access to one bucket.
pub struct Bucket<'t> {
    conn: &'t Connection,
    name: String,
}

impl<'t> Bucket<'t> {
    fn new(conn: &'t Connection, name: &str) -> Self {
        Self {
            conn,
            name: name.to_owned(),
        }
    }

    /// Point lookup by key.
    pub fn get(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .prepare_cached("SELECT value FROM bucket_entries WHERE bucket = ?1 AND key = ?2;")?
            .query_row(params![self.name, key], |row| row.get::<_, Vec<u8>>(0))
            .optional()?;
        Ok(value)
    }

    pub fn len(&self) -> DbResult<usize> {
        let count = self
            .conn
            .prepare_cached("SELECT COUNT(*) FROM bucket_entries WHERE bucket = ?1;")?
            .query_row([&self.name], |row| row.get::<_, usize>(0))?;
        Ok(count)
    }

    pub fn is_empty(&self) -> DbResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Visits every key/value pair in ascending key order.
    ///
    /// Stops at the first error returned by `f` and propagates it.
    pub fn for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&[u8], &[u8]) -> Result<(), E>,
        E: From<DbError>,
    {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT key, value FROM bucket_entries WHERE bucket = ?1 ORDER BY key ASC;",
            )
            .map_err(DbError::from)?;
        let mut rows = stmt.query([&self.name]).map_err(DbError::from)?;

        while let Some(row) = rows.next().map_err(DbError::from)? {
            let key: Vec<u8> = row.get(0).map_err(DbError::from)?;
            let value: Vec<u8> = row.get(1).map_err(DbError::from)?;
            f(&key, &value)?;
        }
        Ok(())
    }
}

/// Read/write access to one bucket inside a write transaction.
pub struct BucketMut<'t> {
    inner: Bucket<'t>,
}

impl BucketMut<'_> {
    /// Stores `value` under `key`, replacing any previous value.
    pub fn put(&self, key: &[u8], value: &[u8]) -> DbResult<()> {
        self.inner
            .conn
            .prepare_cached(
                "INSERT INTO bucket_entries (bucket, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT (bucket, key) DO UPDATE SET value = excluded.value;",
            )?
            .execute(params![self.inner.name, key, value])?;
        Ok(())
    }

    /// Removes `key`; returns whether it was present.
    pub fn delete(&self, key: &[u8]) -> DbResult<bool> {
        let removed = self
            .inner
            .conn
            .prepare_cached("DELETE FROM bucket_entries WHERE bucket = ?1 AND key = ?2;")?
            .execute(params![self.inner.name, key])?;
        Ok(removed > 0)
    }
}

impl<'t> Deref for BucketMut<'t> {
    type Target = Bucket<'t>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

fn open_bucket<'t>(conn: &'t Connection, name: &str) -> DbResult<Option<Bucket<'t>>> {
    let exists = conn
        .prepare_cached("SELECT EXISTS(SELECT 1 FROM buckets WHERE name = ?1);")?
        .query_row([name], |row| row.get::<_, bool>(0))?;
    Ok(exists.then(|| Bucket::new(conn, name)))
}

fn bucket_names(conn: &Connection) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare_cached("SELECT name FROM buckets ORDER BY name ASC;")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}
