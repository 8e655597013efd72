//! Position-based cursor over a [`GrowableArray`]
//!
//! A cursor borrows its array and stores only a position in `[0, len]`,
//! where `len` is the end sentinel. Every step and dereference re-checks
//! the position against the array's current length.

use std::fmt;
use std::ptr;

use crate::array::GrowableArray;
use crate::error::{ContainerError, Result};

pub struct ArrayCursor<'a, T> {
    array: &'a GrowableArray<T>,
    position: usize,
}

impl<'a, T> ArrayCursor<'a, T> {
    /// Bind a cursor to `array` at `position`, which may be the end sentinel
    pub fn new(array: &'a GrowableArray<T>, position: usize) -> Result<Self> {
        if position > array.len() {
            return Err(ContainerError::IndexOutOfRange {
                index: position,
                len: array.len(),
            });
        }
        Ok(Self::at(array, position))
    }

    pub(crate) fn at(array: &'a GrowableArray<T>, position: usize) -> Self {
        Self { array, position }
    }

    /// Current position; `len` means the end sentinel
    pub fn index(&self) -> usize {
        self.position
    }

    /// Whether the cursor sits on the end sentinel (or past a shrunk end)
    pub fn is_end(&self) -> bool {
        self.position >= self.array.len()
    }

    /// Element under the cursor
    pub fn value(&self) -> Result<&'a T> {
        self.array.get(self.position)
    }

    /// Step forward one position (pre-increment)
    pub fn advance(&mut self) -> Result<&mut Self> {
        if self.is_end() {
            return Err(ContainerError::IteratorBounds("cannot advance past end"));
        }
        self.position += 1;
        Ok(self)
    }

    /// Step forward, returning the cursor as it was before the step
    pub fn post_advance(&mut self) -> Result<Self> {
        let prior = *self;
        self.advance()?;
        Ok(prior)
    }

    /// Step back one position (pre-decrement)
    pub fn retreat(&mut self) -> Result<&mut Self> {
        if self.position == 0 {
            return Err(ContainerError::IteratorBounds("cannot move before begin"));
        }
        self.position -= 1;
        Ok(self)
    }

    /// Step back, returning the cursor as it was before the step
    pub fn post_retreat(&mut self) -> Result<Self> {
        let prior = *self;
        self.retreat()?;
        Ok(prior)
    }
}

impl<T> Clone for ArrayCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayCursor<'_, T> {}

/// Cursors are equal when they borrow the same array instance at the same position
impl<T> PartialEq for ArrayCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.array, other.array) && self.position == other.position
    }
}

impl<T> Eq for ArrayCursor<'_, T> {}

impl<T> fmt::Debug for ArrayCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayCursor")
            .field("position", &self.position)
            .field("len", &self.array.len())
            .finish()
    }
}

impl<'a, T> Iterator for ArrayCursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.value().ok()?;
        self.position += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for ArrayCursor<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GrowableArray<i32> {
        [10, 20, 30].into_iter().collect()
    }

    #[test]
    fn test_new_validates_position() {
        let array = sample();
        assert!(ArrayCursor::new(&array, 3).is_ok());
        assert_eq!(
            ArrayCursor::new(&array, 4).unwrap_err(),
            ContainerError::IndexOutOfRange { index: 4, len: 3 }
        );
    }

    #[test]
    fn test_deref_end_faults() {
        let array = sample();
        assert!(matches!(
            array.end().value(),
            Err(ContainerError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_pre_and_post_increment() {
        let array = sample();
        let mut cursor = array.begin();
        assert_eq!(*cursor.advance().unwrap().value().unwrap(), 20);
        let prior = cursor.post_advance().unwrap();
        assert_eq!(*prior.value().unwrap(), 20);
        assert_eq!(*cursor.value().unwrap(), 30);
    }

    #[test]
    fn test_pre_and_post_decrement() {
        let array = sample();
        let mut cursor = array.end();
        assert_eq!(*cursor.retreat().unwrap().value().unwrap(), 30);
        let prior = cursor.post_retreat().unwrap();
        assert_eq!(prior.index(), 2);
        assert_eq!(*cursor.value().unwrap(), 20);
    }

    #[test]
    fn test_boundary_faults() {
        let array = sample();
        let mut end = array.end();
        assert_eq!(
            end.advance().unwrap_err(),
            ContainerError::IteratorBounds("cannot advance past end")
        );
        assert!(end.post_advance().is_err());
        assert_eq!(end.index(), 3);

        let mut begin = array.begin();
        assert_eq!(
            begin.retreat().unwrap_err(),
            ContainerError::IteratorBounds("cannot move before begin")
        );
        assert!(begin.post_retreat().is_err());
        assert_eq!(begin.index(), 0);
    }

    #[test]
    fn test_equality_is_by_instance() {
        let a = sample();
        let b = sample();
        assert_eq!(a.begin(), a.begin());
        assert_ne!(a.begin(), a.end());
        assert_ne!(a.begin(), b.begin());
    }

    #[test]
    fn test_assignment_rebinds() {
        let a = sample();
        let b: GrowableArray<i32> = [1].into_iter().collect();
        let mut cursor = a.end();
        assert_ne!(cursor, b.begin());
        cursor = b.begin();
        assert_eq!(cursor, b.begin());
        assert_eq!(*cursor.value().unwrap(), 1);
    }

    #[test]
    fn test_empty_array_begin_is_end() {
        let array: GrowableArray<i32> = GrowableArray::new();
        assert_eq!(array.begin(), array.end());
        assert!(array.begin().value().is_err());
    }

    #[test]
    fn test_iterates_from_position() {
        let array = sample();
        let rest: Vec<i32> = ArrayCursor::new(&array, 1).unwrap().copied().collect();
        assert_eq!(rest, vec![20, 30]);
        assert_eq!(array.iter().len(), 3);
    }

    #[test]
    fn test_iterator_adapters_reach_cursor() {
        let array = sample();
        assert_eq!(array.begin().position(|&v| v == 30), Some(2));
        assert_eq!(array.begin().position(|&v| v == 31), None);
    }
}
