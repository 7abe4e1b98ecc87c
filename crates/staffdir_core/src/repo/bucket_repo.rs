//! Generic bucket repository contracts and store-backed implementation.
//!
//! # Responsibility
//! - Map entity CRUD onto bucket get/put/delete/scan calls.
//! - Own JSON encode/decode of stored values.
//! - Keep secondary index buckets in step with the primary bucket.
//!
//! # Invariants
//! - Every operation runs inside exactly one store transaction.
//! - Missing bucket and missing key both surface as `NotFound`.
//! - Listing a bucket that was never written returns an empty list.
//! - Create is an upsert; it never reports a conflict.
//! - Update never changes the stored identifier.

use crate::db::{DbError, DbResult};
use crate::model::{validate_id, ValidationError};
use crate::store::{ReadTx, Store, WriteTx};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entity persistence and lookup.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// Bucket or key missing; the two cases are not distinguished.
    NotFound {
        entity: &'static str,
        id: String,
    },
    /// Stored bytes are not a valid entity encoding.
    Decode {
        bucket: String,
        key: String,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Decode { bucket, key, source } => write!(
                f,
                "invalid stored value for key `{key}` in bucket `{bucket}`: {source}"
            ),
            Self::Encode(err) => write!(f, "failed to encode entity: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Decode { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Entity that lives in its own bucket, keyed by its identifier.
pub trait BucketEntity: Serialize + DeserializeOwned + Clone {
    /// Primary bucket holding every record of this type.
    const BUCKET: &'static str;
    /// Human-readable entity name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Copies the updatable fields of `patch` into `self`.
    ///
    /// Implementations decide between partial and full overwrite, but must
    /// never touch the identifier.
    fn apply_patch(&mut self, patch: &Self);

    /// Name prefix shared by every secondary bucket of this type.
    ///
    /// Lets a record whose stored value no longer decodes be purged from its
    /// index without knowing which index bucket holds it.
    const INDEX_PREFIX: Option<&'static str> = None;

    /// Secondary bucket that mirrors this record, if any. Must start with
    /// [`BucketEntity::INDEX_PREFIX`].
    fn index_bucket(&self) -> Option<String> {
        None
    }
}

/// CRUD capability shared by every entity repository.
pub trait EntityRepository<E> {
    /// Inserts or silently replaces the record stored under the entity id.
    fn create(&self, entity: &E) -> RepoResult<()>;
    /// Returns all records in key order.
    fn list(&self) -> RepoResult<Vec<E>>;
    fn get_by_id(&self, id: &str) -> RepoResult<E>;
    /// Applies `patch` to the stored record and returns the new value.
    fn update_by_id(&self, id: &str, patch: &E) -> RepoResult<E>;
    fn delete_by_id(&self, id: &str) -> RepoResult<()>;
}

/// Store-backed repository for one [`BucketEntity`] type.
pub struct BucketRepository<E> {
    store: Arc<Store>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for BucketRepository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<E: BucketEntity> BucketRepository<E> {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }
}

impl<E: BucketEntity> EntityRepository<E> for BucketRepository<E> {
    fn create(&self, entity: &E) -> RepoResult<()> {
        let id = entity.id();
        validate_id(id)?;
        let encoded = encode(entity)?;

        let replaced = self.store.update(|tx| -> RepoResult<bool> {
            let bucket = tx.create_bucket_if_not_exists(E::BUCKET)?;
            let previous = bucket.get(id.as_bytes())?;
            bucket.put(id.as_bytes(), &encoded)?;

            let previous_entity = match previous.as_deref() {
                Some(bytes) => decode_previous::<E>(tx, id, bytes, "repo_create")?,
                None => None,
            };
            reindex(
                tx,
                id,
                previous_entity.as_ref(),
                Some((entity, encoded.as_slice())),
            )?;
            Ok(previous.is_some())
        })?;

        debug!(
            "event=repo_create module=repo status=ok entity={} id={} replaced={}",
            E::KIND,
            id,
            replaced
        );
        Ok(())
    }

    fn list(&self) -> RepoResult<Vec<E>> {
        let items = self.store.view(|tx| scan_bucket::<E>(tx, E::BUCKET))?;
        debug!(
            "event=repo_list module=repo status=ok entity={} count={}",
            E::KIND,
            items.len()
        );
        Ok(items)
    }

    fn get_by_id(&self, id: &str) -> RepoResult<E> {
        self.store.view(|tx| -> RepoResult<E> {
            let bucket = tx.bucket(E::BUCKET)?.ok_or_else(|| not_found::<E>(id))?;
            let bytes = bucket
                .get(id.as_bytes())?
                .ok_or_else(|| not_found::<E>(id))?;
            decode(E::BUCKET, id.as_bytes(), &bytes)
        })
    }

    fn update_by_id(&self, id: &str, patch: &E) -> RepoResult<E> {
        let updated = self.store.update(|tx| -> RepoResult<E> {
            let bucket = tx.bucket(E::BUCKET)?.ok_or_else(|| not_found::<E>(id))?;
            let current = bucket
                .get(id.as_bytes())?
                .ok_or_else(|| not_found::<E>(id))?;

            let previous: E = decode(E::BUCKET, id.as_bytes(), &current)?;
            let mut updated = previous.clone();
            updated.apply_patch(patch);

            let encoded = encode(&updated)?;
            bucket.put(id.as_bytes(), &encoded)?;
            reindex(tx, id, Some(&previous), Some((&updated, encoded.as_slice())))?;
            Ok(updated)
        })?;

        debug!(
            "event=repo_update module=repo status=ok entity={} id={}",
            E::KIND,
            id
        );
        Ok(updated)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.store.update(|tx| -> RepoResult<()> {
            let bucket = tx.bucket(E::BUCKET)?.ok_or_else(|| not_found::<E>(id))?;
            let current = bucket
                .get(id.as_bytes())?
                .ok_or_else(|| not_found::<E>(id))?;
            bucket.delete(id.as_bytes())?;

            let previous = decode_previous::<E>(tx, id, &current, "repo_delete")?;
            reindex(tx, id, previous.as_ref(), None)?;
            Ok(())
        })?;

        debug!(
            "event=repo_delete module=repo status=ok entity={} id={}",
            E::KIND,
            id
        );
        Ok(())
    }
}

/// Decodes every value of `bucket_name`, or returns an empty list when the
/// bucket does not exist.
pub(crate) fn scan_bucket<E: DeserializeOwned>(
    tx: &ReadTx<'_>,
    bucket_name: &str,
) -> RepoResult<Vec<E>> {
    let Some(bucket) = tx.bucket(bucket_name)? else {
        return Ok(Vec::new());
    };

    let mut items = Vec::new();
    bucket.for_each(|key, value| -> RepoResult<()> {
        items.push(decode(bucket_name, key, value)?);
        Ok(())
    })?;
    Ok(items)
}

/// Decodes a value about to be replaced or removed.
///
/// An undecodable value is not an error here: its index entries are purged
/// by key under [`BucketEntity::INDEX_PREFIX`] and `None` is returned.
fn decode_previous<E: BucketEntity>(
    tx: &WriteTx<'_>,
    key: &str,
    bytes: &[u8],
    event: &str,
) -> DbResult<Option<E>> {
    if let Ok(entity) = serde_json::from_slice::<E>(bytes) {
        return Ok(Some(entity));
    }

    let purged = match E::INDEX_PREFIX {
        Some(prefix) => tx.delete_key_in_buckets_with_prefix(prefix, key.as_bytes())?,
        None => 0,
    };
    warn!(
        "event={} module=repo status=warn entity={} id={} reason=undecodable_previous purged_index_entries={}",
        event,
        E::KIND,
        key,
        purged
    );
    Ok(None)
}

/// Moves the index entry for `key` from the previous record's index bucket to
/// the current one. `current = None` only removes.
fn reindex<E: BucketEntity>(
    tx: &WriteTx<'_>,
    key: &str,
    previous: Option<&E>,
    current: Option<(&E, &[u8])>,
) -> DbResult<()> {
    if let Some(name) = previous.and_then(|entity| entity.index_bucket()) {
        if let Some(index) = tx.bucket(&name)? {
            index.delete(key.as_bytes())?;
        }
    }

    if let Some((entity, encoded)) = current {
        if let Some(name) = entity.index_bucket() {
            tx.create_bucket_if_not_exists(&name)?
                .put(key.as_bytes(), encoded)?;
        }
    }
    Ok(())
}

fn encode<E: Serialize>(entity: &E) -> RepoResult<Vec<u8>> {
    serde_json::to_vec(entity).map_err(RepoError::Encode)
}

fn decode<E: DeserializeOwned>(bucket: &str, key: &[u8], bytes: &[u8]) -> RepoResult<E> {
    serde_json::from_slice(bytes).map_err(|source| RepoError::Decode {
        bucket: bucket.to_owned(),
        key: String::from_utf8_lossy(key).into_owned(),
        source,
    })
}

fn not_found<E: BucketEntity>(id: &str) -> RepoError {
    RepoError::NotFound {
        entity: E::KIND,
        id: id.to_owned(),
    }
}
