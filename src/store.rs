//! Text-to-feature-vector store built on the crate's containers
//!
//! Records live in a [`GrowableArray`]; each record's features are a
//! [`SequentialList<f32>`]. Conversion from text is pluggable; without a
//! converter the store projects characters to their code points.

use std::fmt;
use std::io::{self, Write};

use crate::array::GrowableArray;
use crate::config::StoreConfig;
use crate::debug;
use crate::error::Result;
use crate::list::SequentialList;

/// Text-to-features conversion supplied by the caller
pub type Converter = Box<dyn Fn(&str) -> SequentialList<f32>>;

/// A stored text and its feature vector
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: usize,
    text: String,
    vector: SequentialList<f32>,
}

impl Record {
    /// Insertion ordinal assigned by the store
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn vector(&self) -> &SequentialList<f32> {
        &self.vector
    }
}

/// Default projection: code point of each of the first `dimension`
/// characters, zero-padded to exactly `dimension` components
pub fn project(text: &str, dimension: usize) -> SequentialList<f32> {
    text.chars()
        .map(|c| u32::from(c) as f32)
        .chain(std::iter::repeat(0.0))
        .take(dimension)
        .collect()
}

/// Cosine similarity; the shorter vector is treated as zero-padded.
/// Returns 0 when either vector has zero norm.
pub fn cosine_similarity(a: &SequentialList<f32>, b: &SequentialList<f32>) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

pub struct FeatureStore {
    dimension: usize,
    converter: Option<Converter>,
    records: GrowableArray<Record>,
    next_id: usize,
    debug: bool,
}

impl FeatureStore {
    /// Store with the default projection; a zero dimension means 512
    pub fn new(dimension: usize) -> Self {
        Self::from_config(&StoreConfig::default().with_dimension(dimension))
    }

    pub fn with_converter<F>(dimension: usize, converter: F) -> Self
    where
        F: Fn(&str) -> SequentialList<f32> + 'static,
    {
        Self::new(dimension).converter(converter)
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            dimension: config.effective_dimension(),
            converter: None,
            records: GrowableArray::with_capacity(config.initial_capacity),
            next_id: 0,
            debug: config.debug,
        }
    }

    /// Replace the conversion used by `add_text` and `find_nearest`
    pub fn converter<F>(mut self, converter: F) -> Self
    where
        F: Fn(&str) -> SequentialList<f32> + 'static,
    {
        self.converter = Some(Box::new(converter));
        self
    }

    /// Length of vectors produced by the default projection
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Slots allocated in the record array
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    fn vectorize(&self, text: &str) -> SequentialList<f32> {
        match &self.converter {
            Some(convert) => convert(text),
            None => project(text, self.dimension),
        }
    }

    /// Convert `text` and append it as a new record, returning its id
    pub fn add_text(&mut self, text: &str) -> Result<usize> {
        let vector = self.vectorize(text);
        let id = self.next_id;
        self.records.push(Record {
            id,
            text: text.to_owned(),
            vector,
        })?;
        self.next_id += 1;
        tracing::debug!(id, len = self.records.len(), "added record");
        Ok(id)
    }

    /// Borrow the record at `index`
    pub fn get_record(&self, index: usize) -> Result<&Record> {
        self.records.get(index)
    }

    /// Feature vector of the record at `index`
    pub fn get_vector(&self, index: usize) -> Result<&SequentialList<f32>> {
        self.get_record(index).map(Record::vector)
    }

    /// Iterate over records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Index and score of the stored record most similar to `text`.
    ///
    /// Ties go to the earliest record. `None` when the store is empty.
    pub fn find_nearest(&self, text: &str) -> Option<(usize, f32)> {
        let query = self.vectorize(text);
        let mut best: Option<(usize, f32)> = None;
        for (index, record) in self.records.iter().enumerate() {
            let score = cosine_similarity(&query, &record.vector);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }
        best
    }

    /// Drop every record; ids keep counting from where they were
    pub fn clear(&mut self) {
        tracing::debug!(len = self.records.len(), "clearing store");
        self.records.clear();
    }

    /// Write the annotated dump when the store was configured with `debug`
    pub fn debug_dump<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.debug {
            debug::debug_store(writer, self)?;
        }
        Ok(())
    }
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}

impl fmt::Debug for FeatureStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureStore")
            .field("dimension", &self.dimension)
            .field("custom_converter", &self.converter.is_some())
            .field("records", &self.records.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DIMENSION;
    use crate::error::ContainerError;

    fn values(list: &SequentialList<f32>) -> Vec<f32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_projection_pads() {
        assert_eq!(values(&project("AB", 4)), vec![65.0, 66.0, 0.0, 0.0]);
    }

    #[test]
    fn test_projection_truncates() {
        assert_eq!(values(&project("abcdef", 3)), vec![97.0, 98.0, 99.0]);
    }

    #[test]
    fn test_projection_uses_code_points() {
        assert_eq!(values(&project("é", 2)), vec![233.0, 0.0]);
    }

    #[test]
    fn test_zero_dimension_uses_default() {
        let mut store = FeatureStore::new(0);
        assert_eq!(store.dimension(), DEFAULT_DIMENSION);
        store.add_text("hi").unwrap();
        assert_eq!(store.get_vector(0).unwrap().len(), DEFAULT_DIMENSION);
    }

    #[test]
    fn test_add_assigns_ordinals() {
        let mut store = FeatureStore::new(4);
        assert_eq!(store.add_text("a").unwrap(), 0);
        assert_eq!(store.add_text("b").unwrap(), 1);
        assert_eq!(store.get_record(1).unwrap().text(), "b");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_ids_survive_clear() {
        let mut store = FeatureStore::new(4);
        store.add_text("a").unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.add_text("b").unwrap(), 1);
        assert_eq!(store.get_record(0).unwrap().id(), 1);
    }

    #[test]
    fn test_get_vector_out_of_range() {
        let store = FeatureStore::new(4);
        assert_eq!(
            store.get_vector(0).unwrap_err(),
            ContainerError::IndexOutOfRange { index: 0, len: 0 }
        );
    }

    #[test]
    fn test_custom_converter() {
        let mut store = FeatureStore::with_converter(4, |text| {
            [text.len() as f32].into_iter().collect()
        });
        store.add_text("hello").unwrap();
        assert_eq!(values(store.get_vector(0).unwrap()), vec![5.0]);
    }

    #[test]
    fn test_cosine_similarity() {
        let a: SequentialList<f32> = [1.0, 0.0].into_iter().collect();
        let b: SequentialList<f32> = [0.0, 1.0].into_iter().collect();
        let zero: SequentialList<f32> = [0.0, 0.0].into_iter().collect();
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
        assert_eq!(cosine_similarity(&a, &zero), 0.0);
    }

    #[test]
    fn test_find_nearest() {
        let mut store = FeatureStore::new(8);
        assert_eq!(store.find_nearest("x"), None);
        store.add_text("zzzz").unwrap();
        store.add_text("Az").unwrap();
        let (index, score) = store.find_nearest("Az").unwrap();
        assert_eq!(index, 1);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_find_nearest_uses_converter() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut store = FeatureStore::with_converter(8, move |text| {
            counter.set(counter.get() + 1);
            [text.len() as f32, 1.0].into_iter().collect()
        });
        store.add_text("zz").unwrap();
        store.add_text("abcdefgh").unwrap();

        // Same length as the second record, so only the converter makes it an exact match
        let (index, score) = store.find_nearest("zyxwvuts").unwrap();
        assert_eq!(index, 1);
        assert!((score - 1.0).abs() < 1e-6);
        assert_eq!(calls.get(), 3);
        assert_eq!(store.get_vector(1).unwrap().len(), 2);
    }
}
