use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{is_valid_segment, BlobBackend, StorageError};

/// A JSON record addressed by an id inside a collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    fn doc_id(&self) -> String;
}

impl Document for models::blog::BlogPost {
    fn doc_id(&self) -> String {
        self.id.clone()
    }
}

impl Document for models::stats::PlayerStat {
    fn doc_id(&self) -> String {
        self.uuid.clone()
    }
}

impl Document for models::blog::BlogConfig {
    fn doc_id(&self) -> String {
        "blog".to_string()
    }
}

/// JSON documents on top of a [`BlobBackend`].
///
/// Two layouts are supported:
/// - item collections: one object per document at `{collection}/{id}.json`
/// - wholesale collections: a single object at `{collection}.json` that is
///   always replaced as a whole
///
/// Reads that enumerate a collection degrade to empty results when the
/// backend fails; writes and single-document reads propagate errors.
/// Replacement is last-writer-wins: each write is one `put`, and two
/// concurrent writers leave whichever landed last.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn BlobBackend>,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn BlobBackend>) -> Self {
        Self { backend }
    }

    fn item_key(collection: &str, id: &str) -> Result<String, StorageError> {
        if !is_valid_segment(collection) || !is_valid_segment(id) {
            return Err(StorageError::InvalidKey(format!("{collection}/{id}")));
        }
        Ok(format!("{collection}/{id}.json"))
    }

    fn collection_key(collection: &str) -> Result<String, StorageError> {
        if !is_valid_segment(collection) {
            return Err(StorageError::InvalidKey(collection.to_string()));
        }
        Ok(format!("{collection}.json"))
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| StorageError::Malformed { key: key.to_string(), source }),
            None => Ok(None),
        }
    }

    /// Every document in an item collection, in no particular order.
    pub async fn load_all<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let prefix = format!("{collection}/");
        let keys = match self.backend.list(&prefix).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(%collection, backend = self.backend.name(), error = %e, "listing failed; serving empty collection");
                return Vec::new();
            }
        };

        let mut docs = Vec::with_capacity(keys.len());
        for key in keys.iter().filter(|k| k.ends_with(".json")) {
            match self.read_json::<T>(key).await {
                Ok(Some(doc)) => docs.push(doc),
                // deleted between list and get
                Ok(None) => {}
                Err(e) => warn!(%key, error = %e, "skipping unreadable document"),
            }
        }
        debug!(%collection, count = docs.len(), "collection loaded");
        docs
    }

    /// A single document, or `None` if it does not exist.
    pub async fn load_one<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>, StorageError> {
        let key = Self::item_key(collection, id)?;
        self.read_json(&key).await
    }

    /// Write (or overwrite) a document at the location derived from its id.
    pub async fn save<T: Document>(&self, collection: &str, doc: &T) -> Result<(), StorageError> {
        let key = Self::item_key(collection, &doc.doc_id())?;
        let bytes = serde_json::to_vec_pretty(doc)?;
        self.backend.put(&key, bytes).await?;
        debug!(%key, "document saved");
        Ok(())
    }

    /// Remove a document; returns whether it existed.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool, StorageError> {
        let key = Self::item_key(collection, id)?;
        self.backend.delete(&key).await
    }

    /// The whole-collection document, or `T::default()` when it is missing or
    /// cannot be read.
    pub async fn load_collection<T: DeserializeOwned + Default>(&self, collection: &str) -> T {
        let key = match Self::collection_key(collection) {
            Ok(key) => key,
            Err(e) => {
                warn!(%collection, error = %e, "invalid collection name");
                return T::default();
            }
        };
        match self.read_json(&key).await {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                warn!(%key, backend = self.backend.name(), error = %e, "collection unreadable; serving empty");
                T::default()
            }
        }
    }

    /// Overwrite the whole-collection document in a single write.
    pub async fn replace_collection<T: Serialize + ?Sized>(&self, collection: &str, value: &T) -> Result<(), StorageError> {
        let key = Self::collection_key(collection)?;
        let bytes = serde_json::to_vec_pretty(value)?;
        self.backend.put(&key, bytes).await?;
        debug!(%key, "collection replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryBackend;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    impl Document for Note {
        fn doc_id(&self) -> String {
            self.id.clone()
        }
    }

    fn note(id: &str, text: &str) -> Note {
        Note { id: id.into(), text: text.into() }
    }

    /// Backend that fails every call.
    struct Unavailable;

    #[async_trait]
    impl BlobBackend for Unavailable {
        fn name(&self) -> &'static str {
            "unavailable"
        }

        async fn get(&self, _: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Err(StorageError::Http("down".into()))
        }

        async fn put(&self, _: &str, _: Vec<u8>) -> Result<(), StorageError> {
            Err(StorageError::Http("down".into()))
        }

        async fn delete(&self, _: &str) -> Result<bool, StorageError> {
            Err(StorageError::Http("down".into()))
        }

        async fn list(&self, _: &str) -> Result<Vec<String>, StorageError> {
            Err(StorageError::Http("down".into()))
        }
    }

    #[tokio::test]
    async fn save_then_load_all_includes_document_and_delete_excludes_it() -> Result<(), StorageError> {
        let store = DocumentStore::new(MemoryBackend::new());
        store.save("notes", &note("1", "a")).await?;
        store.save("notes", &note("2", "b")).await?;

        let mut all: Vec<Note> = store.load_all("notes").await;
        all.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(all, vec![note("1", "a"), note("2", "b")]);

        assert!(store.delete("notes", "1").await?);
        let all: Vec<Note> = store.load_all("notes").await;
        assert_eq!(all, vec![note("2", "b")]);
        assert!(!store.delete("notes", "1").await?);
        Ok(())
    }

    #[tokio::test]
    async fn save_is_idempotent_per_id() -> Result<(), StorageError> {
        let store = DocumentStore::new(MemoryBackend::new());
        store.save("notes", &note("1", "first")).await?;
        store.save("notes", &note("1", "second")).await?;
        let all: Vec<Note> = store.load_all("notes").await;
        assert_eq!(all, vec![note("1", "second")]);
        assert_eq!(store.load_one::<Note>("notes", "1").await?, Some(note("1", "second")));
        assert_eq!(store.load_one::<Note>("notes", "404").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn collections_do_not_bleed_into_each_other() -> Result<(), StorageError> {
        let store = DocumentStore::new(MemoryBackend::new());
        store.save("notes", &note("1", "a")).await?;
        store.save("notesarchive", &note("9", "z")).await?;
        store.replace_collection("notes", &vec![1, 2, 3]).await?;
        let all: Vec<Note> = store.load_all("notes").await;
        assert_eq!(all, vec![note("1", "a")]);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_documents_are_skipped_when_listing() -> Result<(), StorageError> {
        let backend = MemoryBackend::new();
        backend.put("notes/bad.json", b"{not json".to_vec()).await?;
        let store = DocumentStore::new(backend);
        store.save("notes", &note("ok", "fine")).await?;
        let all: Vec<Note> = store.load_all("notes").await;
        assert_eq!(all, vec![note("ok", "fine")]);
        assert!(matches!(
            store.load_one::<Note>("notes", "bad").await,
            Err(StorageError::Malformed { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_backend_degrades_reads_and_fails_writes() {
        let store = DocumentStore::new(Arc::new(Unavailable));
        let all: Vec<Note> = store.load_all("notes").await;
        assert!(all.is_empty());
        let teams: BTreeMap<String, String> = store.load_collection("teams").await;
        assert!(teams.is_empty());
        assert!(store.save("notes", &note("1", "a")).await.is_err());
        assert!(store.replace_collection("teams", &teams).await.is_err());
    }

    #[tokio::test]
    async fn missing_collection_is_distinct_from_empty_one() -> Result<(), StorageError> {
        let backend = MemoryBackend::new();
        let store = DocumentStore::new(backend.clone());
        assert!(backend.get("events.json").await?.is_none());
        store.replace_collection("events", &Vec::<u8>::new()).await?;
        assert_eq!(backend.get("events.json").await?.as_deref(), Some(&b"[]"[..]));
        Ok(())
    }

    #[tokio::test]
    async fn replace_collection_is_last_writer_wins() -> Result<(), StorageError> {
        let store = DocumentStore::new(MemoryBackend::new());
        let first: BTreeMap<String, u32> = [("a".to_string(), 1)].into();
        let second: BTreeMap<String, u32> = [("b".to_string(), 2)].into();
        store.replace_collection("teams", &first).await?;
        store.replace_collection("teams", &second).await?;
        let loaded: BTreeMap<String, u32> = store.load_collection("teams").await;
        assert_eq!(loaded, second);
        Ok(())
    }

    #[tokio::test]
    async fn ids_that_would_escape_the_collection_are_rejected() {
        let store = DocumentStore::new(MemoryBackend::new());
        assert!(matches!(store.save("notes", &note("../x", "a")).await, Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.delete("notes", "").await, Err(StorageError::InvalidKey(_))));
    }
}
