//! Generic containers and a small text-to-vector store built on them
//!
//! - [`GrowableArray`]: contiguous array with 1.5x amortized growth,
//!   bounds-checked access and a bidirectional [`ArrayCursor`]
//! - [`SequentialList`]: singly linked list with O(1) append
//! - [`FeatureStore`]: maps text to fixed-length `f32` feature vectors
//!
//! Faults are reported as [`ContainerError`] and never leave a container
//! half-modified.
//!
//! ```
//! use vector_store::{FeatureStore, GrowableArray};
//!
//! let mut array = GrowableArray::new();
//! array.push(1).unwrap();
//! array.push(2).unwrap();
//! array.push(3).unwrap();
//! assert_eq!(array.remove(1).unwrap(), 2);
//! assert_eq!(array.to_string(), "[1, 3]");
//!
//! let mut store = FeatureStore::new(4);
//! store.add_text("AB").unwrap();
//! assert_eq!(store.get_vector(0).unwrap().to_string(), "[65, 66, 0, 0]");
//! ```

pub mod array;
pub mod config;
pub mod cursor;
pub mod debug;
pub mod error;
pub mod list;
pub mod store;

pub use array::GrowableArray;
pub use config::StoreConfig;
pub use cursor::ArrayCursor;
pub use error::{ContainerError, Result};
pub use list::SequentialList;
pub use store::{FeatureStore, Record};
