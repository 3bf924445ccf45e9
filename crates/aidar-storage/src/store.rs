use std::collections::HashSet;
use std::future::Future;

use aidar_core::record::{Record, RecordKind};
use aidar_core::store_keys;
use uuid::Uuid;

use crate::backend::{Backend, MemoryBackend};
use crate::error::StorageError;
use crate::filter::Filter;
use crate::s3::S3Backend;

/// Generic record persistence contract shared by every record kind.
///
/// The store assigns ids, enforces per-kind unique fields, and performs no
/// other cross-field validation.
pub trait Store: Send + Sync {
    /// Persist a new record under a fresh id and return it.
    fn create<R: Record>(&self, record: R) -> impl Future<Output = Result<R, StorageError>> + Send;

    fn create_bulk<R: Record>(
        &self,
        records: Vec<R>,
    ) -> impl Future<Output = Result<Vec<R>, StorageError>> + Send;

    fn list<R: Record>(
        &self,
        filter: Filter,
    ) -> impl Future<Output = Result<Vec<R>, StorageError>> + Send;

    fn get<R: Record>(&self, id: Uuid) -> impl Future<Output = Result<R, StorageError>> + Send;

    /// Merge the top-level fields of `patch` into the stored record.
    fn update<R: Record>(
        &self,
        id: Uuid,
        patch: serde_json::Value,
    ) -> impl Future<Output = Result<R, StorageError>> + Send;

    /// Delete one record. Missing ids are `StorageError::NotFound`.
    fn remove<R: Record>(&self, id: Uuid) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete many records. Missing ids are skipped.
    fn remove_bulk<R: Record>(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// [`Store`] over any JSON document [`Backend`].
#[derive(Debug, Default)]
pub struct RecordStore<B> {
    backend: B,
}

pub type MemoryStore = RecordStore<MemoryBackend>;
pub type S3Store = RecordStore<S3Backend>;

impl MemoryStore {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: Backend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Every stored document of a kind, paired with its id.
    async fn documents(
        &self,
        kind: RecordKind,
    ) -> Result<Vec<(Uuid, serde_json::Value)>, StorageError> {
        let keys = self.backend.list_keys(&store_keys::prefix(kind)).await?;

        let mut docs = Vec::with_capacity(keys.len());
        for key in &keys {
            let id = match store_keys::parse(key) {
                Ok((parsed, id)) if parsed == kind => id,
                Ok(_) | Err(_) => {
                    tracing::warn!(key = %key, "skipping unrecognized object");
                    continue;
                }
            };
            match self.backend.get_json(key).await {
                Ok(doc) => docs.push((id, doc)),
                // Removed between listing and fetching.
                Err(StorageError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(docs)
    }

    async fn ensure_unique<R: Record>(
        &self,
        incoming: &[serde_json::Value],
        exclude: Option<Uuid>,
    ) -> Result<(), StorageError> {
        let Some(field) = R::unique_field() else {
            return Ok(());
        };

        let mut seen: HashSet<String> = self
            .documents(R::KIND)
            .await?
            .into_iter()
            .filter(|(id, _)| Some(*id) != exclude)
            .filter_map(|(_, doc)| doc.get(field)?.as_str().map(str::to_string))
            .collect();

        for doc in incoming {
            if let Some(value) = doc.get(field).and_then(|v| v.as_str())
                && !seen.insert(value.to_string())
            {
                return Err(StorageError::Duplicate {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    fn prepare<R: Record>(
        mut record: R,
        now: jiff::Timestamp,
    ) -> Result<(Uuid, R, serde_json::Value), StorageError> {
        let id = Uuid::new_v4();
        record.set_id(id);
        record.on_create(now);
        let doc = serde_json::to_value(&record)?;
        Ok((id, record, doc))
    }
}

impl<B: Backend> Store for RecordStore<B> {
    async fn create<R: Record>(&self, record: R) -> Result<R, StorageError> {
        let (id, record, doc) = Self::prepare(record, jiff::Timestamp::now())?;
        self.ensure_unique::<R>(std::slice::from_ref(&doc), None).await?;
        self.backend
            .put_json(&store_keys::record(R::KIND, id), &doc)
            .await?;

        tracing::debug!(kind = %R::KIND, %id, "record created");
        Ok(record)
    }

    async fn create_bulk<R: Record>(&self, records: Vec<R>) -> Result<Vec<R>, StorageError> {
        let now = jiff::Timestamp::now();
        let prepared = records
            .into_iter()
            .map(|r| Self::prepare(r, now))
            .collect::<Result<Vec<_>, _>>()?;

        let docs: Vec<_> = prepared.iter().map(|(_, _, doc)| doc.clone()).collect();
        self.ensure_unique::<R>(&docs, None).await?;

        let mut created = Vec::with_capacity(prepared.len());
        for (id, record, doc) in prepared {
            self.backend
                .put_json(&store_keys::record(R::KIND, id), &doc)
                .await?;
            created.push(record);
        }

        tracing::debug!(kind = %R::KIND, count = created.len(), "records created");
        Ok(created)
    }

    async fn list<R: Record>(&self, filter: Filter) -> Result<Vec<R>, StorageError> {
        self.documents(R::KIND)
            .await?
            .into_iter()
            .filter(|(_, doc)| filter.matches(doc))
            .map(|(_, doc)| serde_json::from_value(doc).map_err(StorageError::from))
            .collect()
    }

    async fn get<R: Record>(&self, id: Uuid) -> Result<R, StorageError> {
        let doc = self
            .backend
            .get_json(&store_keys::record(R::KIND, id))
            .await?;
        Ok(serde_json::from_value(doc)?)
    }

    async fn update<R: Record>(&self, id: Uuid, patch: serde_json::Value) -> Result<R, StorageError> {
        let key = store_keys::record(R::KIND, id);
        let mut doc = self.backend.get_json(&key).await?;

        let serde_json::Value::Object(fields) = patch else {
            return Err(StorageError::InvalidPatch(
                "update body must be a JSON object".to_string(),
            ));
        };
        let target = doc.as_object_mut().ok_or_else(|| {
            StorageError::InvalidPatch(format!("stored record {key} is not an object"))
        })?;
        for (field, value) in fields {
            if field != "id" {
                target.insert(field, value);
            }
        }

        let mut record: R = serde_json::from_value(doc)?;
        record.set_id(id);
        let doc = serde_json::to_value(&record)?;
        self.ensure_unique::<R>(std::slice::from_ref(&doc), Some(id))
            .await?;
        self.backend.put_json(&key, &doc).await?;

        tracing::debug!(kind = %R::KIND, %id, "record updated");
        Ok(record)
    }

    async fn remove<R: Record>(&self, id: Uuid) -> Result<(), StorageError> {
        let key = store_keys::record(R::KIND, id);
        self.backend.get_json(&key).await?;
        self.backend.delete(&key).await?;

        tracing::debug!(kind = %R::KIND, %id, "record removed");
        Ok(())
    }

    async fn remove_bulk<R: Record>(&self, ids: &[Uuid]) -> Result<(), StorageError> {
        for id in ids {
            self.backend
                .delete(&store_keys::record(R::KIND, *id))
                .await?;
        }

        tracing::debug!(kind = %R::KIND, count = ids.len(), "records removed");
        Ok(())
    }
}
