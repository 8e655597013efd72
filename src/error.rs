use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("iterator out of bounds: {0}")]
    IteratorBounds(&'static str),

    #[error("capacity overflow: cannot hold {required} elements")]
    CapacityOverflow { required: usize },
}

pub type Result<T> = std::result::Result<T, ContainerError>;
