//! Vector store gateway.
//!
//! Owns the LanceDB connection and the observations table lifecycle.
//! Validation that protects the one-table-one-dimension invariant happens
//! here, before anything reaches the engine.

use std::path::Path;
use std::time::Duration;

use arrow_array::RecordBatchIterator;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{Connection, Table};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use recall_types::{Observation, SearchFilter};

use crate::error::StoreError;
use crate::predicate::render_predicate;
use crate::schema::{batch_to_observations, observations_schema, observations_to_batch};

/// Name of the observations table.
pub const OBSERVATIONS_TABLE: &str = "observations";

/// Row count and dimension of the observations table.
#[derive(Debug, Clone)]
pub struct StoreStats {
    /// Number of stored observations
    pub observation_count: usize,
    /// Embedding dimension the table is bound to
    pub dimension: usize,
}

/// Gateway to the LanceDB observations table.
///
/// One instance is created at startup and shared behind an `Arc`. The
/// engine connection is internally synchronized, so no locking is added
/// here; the table handle is created lazily on first use and cached for
/// the life of the store.
pub struct VectorStore {
    connection: Connection,
    table: OnceCell<Table>,
    dimension: usize,
    timeout: Duration,
}

impl VectorStore {
    /// Connect to the database at `path`, creating it if absent.
    ///
    /// `dimension` becomes the fixed vector length of the observations
    /// table; `timeout` bounds every engine round-trip made through this
    /// store.
    pub async fn connect(
        path: &Path,
        dimension: usize,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let uri = path.to_string_lossy().to_string();
        let connection = tokio::time::timeout(timeout, lancedb::connect(&uri).execute())
            .await
            .map_err(|_| StoreError::Timeout(timeout.as_secs()))?
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        info!(path = %uri, dimension, "connected to vector store");

        Ok(Self {
            connection,
            table: OnceCell::new(),
            dimension,
            timeout,
        })
    }

    /// The vector dimension this store was opened with
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Insert a batch of observations.
    ///
    /// The whole batch is rejected if any vector has the wrong length or a
    /// non-finite value. Accepted batches are committed as one record
    /// batch, so the insert is all-or-nothing from the caller's view.
    pub async fn insert(&self, observations: &[Observation]) -> Result<(), StoreError> {
        if observations.is_empty() {
            return Err(StoreError::EmptyBatch);
        }
        for obs in observations {
            if obs.vector.len() != self.dimension {
                return Err(StoreError::DimensionMismatch {
                    expected: self.dimension,
                    actual: obs.vector.len(),
                });
            }
            if obs.vector.iter().any(|v| !v.is_finite()) {
                return Err(StoreError::InvalidVector(obs.id.clone()));
            }
        }

        let table = self.table().await?;
        let schema = observations_schema(self.dimension);
        let batch = observations_to_batch(observations, &schema, self.dimension)?;
        let batches = RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema);

        self.bounded(table.add(Box::new(batches)).execute())
            .await?
            .map_err(|e| StoreError::Insert(e.to_string()))?;

        debug!(count = observations.len(), "inserted observations");
        Ok(())
    }

    /// Search for the observations nearest to `query_vector`.
    ///
    /// Results are ordered most-similar first. An optional filter is
    /// rendered into an engine predicate; the engine's distance column is
    /// not surfaced.
    pub async fn search(
        &self,
        query_vector: &[f32],
        limit: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<Observation>, StoreError> {
        if query_vector.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: query_vector.len(),
            });
        }

        let table = self.table().await?;
        // Pick up writes committed through other connections
        self.bounded(table.checkout_latest())
            .await?
            .map_err(|e| StoreError::Search(e.to_string()))?;

        let query = table
            .query()
            .nearest_to(query_vector)
            .map_err(|e| StoreError::Search(e.to_string()))?
            .limit(limit);
        let query = match filter {
            Some(f) if !f.is_empty() => query.only_if(render_predicate(f)),
            _ => query,
        };

        let batches = self
            .bounded(async {
                let stream = query
                    .execute()
                    .await
                    .map_err(|e| StoreError::Search(e.to_string()))?;
                stream
                    .try_collect::<Vec<_>>()
                    .await
                    .map_err(|e| StoreError::Search(e.to_string()))
            })
            .await??;

        let mut observations = Vec::new();
        for batch in &batches {
            observations.extend(batch_to_observations(batch)?);
        }

        debug!(count = observations.len(), "search returned observations");
        Ok(observations)
    }

    /// Row count and dimension of the observations table.
    pub async fn stats(&self) -> Result<StoreStats, StoreError> {
        let table = self.table().await?;
        self.bounded(table.checkout_latest())
            .await?
            .map_err(|e| StoreError::Table(e.to_string()))?;

        let count = self
            .bounded(table.count_rows(None))
            .await?
            .map_err(|e| StoreError::Table(e.to_string()))?;

        Ok(StoreStats {
            observation_count: count,
            dimension: self.dimension,
        })
    }

    /// Cached table handle, created on first use.
    async fn table(&self) -> Result<&Table, StoreError> {
        self.table.get_or_try_init(|| self.ensure_table()).await
    }

    /// Open the observations table, creating it empty with an explicit
    /// schema when it does not exist yet. Creation losing a race to
    /// another process is treated as success.
    async fn ensure_table(&self) -> Result<Table, StoreError> {
        let names = self
            .bounded(self.connection.table_names().execute())
            .await?
            .map_err(|e| StoreError::Table(e.to_string()))?;

        if names.iter().any(|n| n == OBSERVATIONS_TABLE) {
            return self.open_table().await;
        }

        let schema = observations_schema(self.dimension);
        let batches = RecordBatchIterator::new(vec![].into_iter().map(Ok), schema.clone());

        match self
            .bounded(
                self.connection
                    .create_table(OBSERVATIONS_TABLE, Box::new(batches))
                    .execute(),
            )
            .await?
        {
            Ok(table) => {
                info!(
                    table = OBSERVATIONS_TABLE,
                    dimension = self.dimension,
                    "created observations table"
                );
                Ok(table)
            }
            Err(lancedb::Error::TableAlreadyExists { .. }) => self.open_table().await,
            Err(e) => Err(StoreError::Table(e.to_string())),
        }
    }

    async fn open_table(&self) -> Result<Table, StoreError> {
        self.bounded(self.connection.open_table(OBSERVATIONS_TABLE).execute())
            .await?
            .map_err(|e| StoreError::Table(e.to_string()))
    }

    /// Apply the store timeout to an engine future.
    async fn bounded<T>(&self, fut: impl std::future::Future<Output = T>) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout.as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store(dir: &tempfile::TempDir, dimension: usize) -> VectorStore {
        VectorStore::connect(&dir.path().join("lance"), dimension, Duration::from_secs(30))
            .await
            .unwrap()
    }

    fn obs(id: &str, text: &str, vector: Vec<f32>) -> Observation {
        Observation::new(id.to_string(), text.to_string(), vector)
    }

    #[tokio::test]
    async fn test_bootstrap_creates_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.observation_count, 0);
        assert_eq!(stats.dimension, 3);
    }

    #[tokio::test]
    async fn test_insert_and_search_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        store
            .insert(&[
                obs("a", "first observation", vec![1.0, 0.0, 0.0]),
                obs("b", "second observation", vec![0.0, 1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0, 0.0], 1, None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
        assert_eq!(results[0].text, "first observation");
        assert_eq!(results[0].vector, vec![1.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_search_orders_most_similar_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        store
            .insert(&[
                obs("far", "far away", vec![0.0, 0.0, 1.0]),
                obs("near", "nearby", vec![0.9, 0.1, 0.0]),
                obs("exact", "exact match", vec![1.0, 0.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0, 0.0], 3, None).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "near", "far"]);
    }

    #[tokio::test]
    async fn test_search_filters_by_project() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        store
            .insert(&[
                obs("a", "alpha work", vec![1.0, 0.0, 0.0])
                    .with_project("alpha".to_string()),
                obs("b", "beta work", vec![1.0, 0.0, 0.0]).with_project("beta".to_string()),
            ])
            .await
            .unwrap();

        let filter = SearchFilter::new().equals("project", "beta");
        let results = store
            .search(&[1.0, 0.0, 0.0], 10, Some(&filter))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "b");
    }

    #[tokio::test]
    async fn test_search_filters_conjunctively() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        store
            .insert(&[
                obs("a", "prompt in alpha", vec![1.0, 0.0, 0.0])
                    .with_project("alpha".to_string())
                    .with_kind("prompt".to_string()),
                obs("b", "summary in alpha", vec![1.0, 0.0, 0.0])
                    .with_project("alpha".to_string())
                    .with_kind("summary".to_string()),
                obs("c", "prompt in beta", vec![1.0, 0.0, 0.0])
                    .with_project("beta".to_string())
                    .with_kind("prompt".to_string()),
            ])
            .await
            .unwrap();

        let filter = SearchFilter::new()
            .equals("project", "alpha")
            .equals("type", "prompt");
        let results = store
            .search(&[1.0, 0.0, 0.0], 10, Some(&filter))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
    }

    #[tokio::test]
    async fn test_filter_value_containing_quote() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        store
            .insert(&[obs("a", "quoted project", vec![1.0, 0.0, 0.0])
                .with_project("o'brien".to_string())])
            .await
            .unwrap();

        let filter = SearchFilter::new().equals("project", "o'brien");
        let results = store
            .search(&[1.0, 0.0, 0.0], 10, Some(&filter))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);

        let miss = SearchFilter::new().equals("project", "x' OR '1'='1");
        let results = store
            .search(&[1.0, 0.0, 0.0], 10, Some(&miss))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_insert_rejects_dimension_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        let err = store
            .insert(&[obs("a", "short vector", vec![1.0, 0.0])])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));

        // Nothing was stored
        assert_eq!(store.stats().await.unwrap().observation_count, 0);
    }

    #[tokio::test]
    async fn test_search_rejects_dimension_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        let err = store.search(&[1.0, 0.0], 10, None).await.unwrap_err();
        assert!(matches!(err, StoreError::DimensionMismatch { .. }));
    }

    #[tokio::test]
    async fn test_insert_rejects_non_finite_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        let err = store
            .insert(&[obs("bad", "nan vector", vec![1.0, f32::NAN, 0.0])])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidVector(id) if id == "bad"));
    }

    #[tokio::test]
    async fn test_insert_rejects_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        let err = store.insert(&[]).await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyBatch));
    }

    #[tokio::test]
    async fn test_whole_batch_rejected_on_one_bad_vector() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        let err = store
            .insert(&[
                obs("good", "fine", vec![1.0, 0.0, 0.0]),
                obs("bad", "wrong length", vec![1.0]),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DimensionMismatch { .. }));
        assert_eq!(store.stats().await.unwrap().observation_count, 0);
    }

    #[tokio::test]
    async fn test_second_connection_sees_committed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let first = test_store(&dir, 3).await;
        first
            .insert(&[obs("a", "written by first", vec![1.0, 0.0, 0.0])])
            .await
            .unwrap();

        let second = test_store(&dir, 3).await;
        let results = second.search(&[1.0, 0.0, 0.0], 10, None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
    }

    #[tokio::test]
    async fn test_duplicate_ids_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir, 3).await;

        store
            .insert(&[obs("dup", "first copy", vec![1.0, 0.0, 0.0])])
            .await
            .unwrap();
        store
            .insert(&[obs("dup", "second copy", vec![1.0, 0.0, 0.0])])
            .await
            .unwrap();

        assert_eq!(store.stats().await.unwrap().observation_count, 2);
    }
}
