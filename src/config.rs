use crate::array::DEFAULT_CAPACITY;

/// Feature length used when a dimension of zero is supplied
pub const DEFAULT_DIMENSION: usize = 512;

/// Runtime settings for a [`FeatureStore`](crate::store::FeatureStore)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub dimension: usize,
    pub initial_capacity: usize,
    pub debug: bool,
}

impl StoreConfig {
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Dimension actually used by the store
    pub fn effective_dimension(&self) -> usize {
        if self.dimension > 0 {
            self.dimension
        } else {
            DEFAULT_DIMENSION
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            initial_capacity: DEFAULT_CAPACITY,
            debug: false,
        }
    }
}
