//! Arrow schema and record batch conversion for the observations table.

use std::sync::Arc;

use arrow_array::{
    types::Float32Type, Array, ArrayRef, FixedSizeListArray, Float32Array, RecordBatch,
    StringArray,
};
use arrow_schema::{DataType, Field, Schema};

use recall_types::Observation;

use crate::error::StoreError;

/// Schema of the observations table.
///
/// The vector column is a fixed-size float list, which binds the table to
/// one dimension for its whole lifetime. Metadata columns are nullable
/// strings; the engine stores absent metadata as null.
pub fn observations_schema(dimension: usize) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("text", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                dimension as i32,
            ),
            false,
        ),
        Field::new("project", DataType::Utf8, true),
        Field::new("session_id", DataType::Utf8, true),
        Field::new("timestamp", DataType::Utf8, true),
        Field::new("type", DataType::Utf8, true),
    ]))
}

/// Build one record batch holding every observation in the slice.
///
/// A single batch keeps the engine commit all-or-nothing from the caller's
/// perspective. Vector lengths must already be validated against the
/// schema dimension.
pub fn observations_to_batch(
    observations: &[Observation],
    schema: &Arc<Schema>,
    dimension: usize,
) -> Result<RecordBatch, StoreError> {
    let ids: Vec<String> = observations.iter().map(|o| o.id.clone()).collect();
    let texts: Vec<String> = observations.iter().map(|o| o.text.clone()).collect();
    let projects: Vec<Option<String>> =
        observations.iter().map(|o| o.project.clone()).collect();
    let session_ids: Vec<Option<String>> =
        observations.iter().map(|o| o.session_id.clone()).collect();
    let timestamps: Vec<Option<String>> =
        observations.iter().map(|o| o.timestamp.clone()).collect();
    let kinds: Vec<Option<String>> = observations.iter().map(|o| o.kind.clone()).collect();

    let vector_iter = observations
        .iter()
        .map(|o| Some(o.vector.iter().copied().map(Some).collect::<Vec<_>>()));
    let vectors =
        FixedSizeListArray::from_iter_primitive::<Float32Type, _, _>(vector_iter, dimension as i32);

    RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(ids)) as ArrayRef,
            Arc::new(StringArray::from(texts)) as ArrayRef,
            Arc::new(vectors) as ArrayRef,
            Arc::new(StringArray::from(projects)) as ArrayRef,
            Arc::new(StringArray::from(session_ids)) as ArrayRef,
            Arc::new(StringArray::from(timestamps)) as ArrayRef,
            Arc::new(StringArray::from(kinds)) as ArrayRef,
        ],
    )
    .map_err(|e| StoreError::Schema(e.to_string()))
}

/// Convert a result batch back into observations.
///
/// Reads columns by name so extra engine columns (such as the search
/// distance) are ignored.
pub fn batch_to_observations(batch: &RecordBatch) -> Result<Vec<Observation>, StoreError> {
    let ids = string_column(batch, "id")?;
    let texts = string_column(batch, "text")?;
    let projects = string_column(batch, "project")?;
    let session_ids = string_column(batch, "session_id")?;
    let timestamps = string_column(batch, "timestamp")?;
    let kinds = string_column(batch, "type")?;

    let vectors = batch
        .column_by_name("vector")
        .ok_or_else(|| StoreError::Schema("missing column vector".to_string()))?
        .as_any()
        .downcast_ref::<FixedSizeListArray>()
        .ok_or_else(|| StoreError::Schema("column vector is not a fixed-size list".to_string()))?;

    let mut observations = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        let value = vectors.value(i);
        let floats = value
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(|| StoreError::Schema("vector items are not float32".to_string()))?;
        let vector: Vec<f32> = floats.iter().flatten().collect();

        observations.push(Observation {
            id: ids.value(i).to_string(),
            text: texts.value(i).to_string(),
            vector,
            project: optional_value(projects, i),
            session_id: optional_value(session_ids, i),
            timestamp: optional_value(timestamps, i),
            kind: optional_value(kinds, i),
        });
    }

    Ok(observations)
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray, StoreError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| StoreError::Schema(format!("missing column {name}")))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| StoreError::Schema(format!("column {name} is not a string array")))
}

fn optional_value(array: &StringArray, i: usize) -> Option<String> {
    if array.is_null(i) {
        None
    } else {
        Some(array.value(i).to_string())
    }
}
