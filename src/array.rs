//! Growable random-access array with explicit capacity management
//!
//! Storage is a boxed slice of slots. The first `len` slots are occupied and
//! the remainder are empty. Growth builds a complete new slice, moves the
//! elements across, and only then releases the old one.

use std::fmt;
use std::mem;

use crate::cursor::ArrayCursor;
use crate::error::{ContainerError, Result};

/// Capacity used when zero is requested, and after `clear`
pub const DEFAULT_CAPACITY: usize = 10;

/// Contiguous owned array with amortized 1.5x growth
pub struct GrowableArray<T> {
    /// Backing buffer; `slots.len()` is the capacity
    slots: Box<[Option<T>]>,
    /// Number of occupied leading slots
    len: usize,
}

fn alloc_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Render items as `[a, b, c]`
pub(crate) fn bracketed<I: IntoIterator<Item = String>>(items: I) -> String {
    let parts: Vec<String> = items.into_iter().collect();
    format!("[{}]", parts.join(", "))
}

impl<T> GrowableArray<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty array; a zero capacity falls back to the default
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity > 0 {
            capacity
        } else {
            DEFAULT_CAPACITY
        };
        Self {
            slots: alloc_slots(capacity),
            len: 0,
        }
    }

    /// Largest slot count whose buffer size still fits in `isize::MAX` bytes
    pub fn max_capacity() -> usize {
        isize::MAX as usize / mem::size_of::<Option<T>>()
    }

    /// Get number of stored elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get number of allocated slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn out_of_range(&self, index: usize) -> ContainerError {
        ContainerError::IndexOutOfRange {
            index,
            len: self.len,
        }
    }

    /// Grow the buffer so it can hold at least `required` elements.
    ///
    /// The new capacity is `max(capacity * 1.5, required)`. Fails with
    /// `CapacityOverflow` before allocating if that exceeds
    /// [`max_capacity`](Self::max_capacity); the array is then untouched.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<()> {
        let capacity = self.capacity();
        if required <= capacity {
            return Ok(());
        }

        let grown = capacity.saturating_add(capacity / 2).max(required);
        if grown > Self::max_capacity() {
            return Err(ContainerError::CapacityOverflow { required: grown });
        }

        let mut slots = alloc_slots(grown);
        for (dst, src) in slots.iter_mut().zip(self.slots[..self.len].iter_mut()) {
            *dst = src.take();
        }
        tracing::trace!(
            old_capacity = capacity,
            new_capacity = grown,
            len = self.len,
            "grew array buffer"
        );
        self.slots = slots;
        Ok(())
    }

    /// Append a value, growing the buffer if it is full
    pub fn push(&mut self, value: T) -> Result<()> {
        self.ensure_capacity(self.len + 1)?;
        self.slots[self.len] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Insert a value at `index`, shifting the suffix right.
    ///
    /// `index == len` appends. The index is checked before anything moves.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        self.ensure_capacity(self.len + 1)?;
        self.slots[self.len] = Some(value);
        self.slots[index..=self.len].rotate_right(1);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the value at `index`, shifting the suffix left
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        self.slots[index..self.len].rotate_left(1);
        let removed = self.slots[self.len - 1]
            .take()
            .ok_or_else(|| self.out_of_range(index))?;
        self.len -= 1;
        Ok(removed)
    }

    /// Borrow the element at `index`
    pub fn get(&self, index: usize) -> Result<&T> {
        self.slots[..self.len]
            .get(index)
            .and_then(Option::as_ref)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Mutably borrow the element at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let err = self.out_of_range(index);
        self.slots[..self.len]
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(err)
    }

    /// Overwrite the value at `index`, returning the previous one
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, value))
    }

    /// Position of the first element equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|item| item == value)
    }

    /// Check if any element equals `value`
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Drop every element and reset to a fresh buffer of the default capacity
    pub fn clear(&mut self) {
        tracing::trace!(len = self.len, capacity = self.capacity(), "clearing array");
        self.slots = alloc_slots(DEFAULT_CAPACITY);
        self.len = 0;
    }

    /// Cursor at the first element
    pub fn begin(&self) -> ArrayCursor<'_, T> {
        ArrayCursor::at(self, 0)
    }

    /// Cursor at the one-past-last sentinel
    pub fn end(&self) -> ArrayCursor<'_, T> {
        ArrayCursor::at(self, self.len)
    }

    /// Iterate over the elements in order
    pub fn iter(&self) -> ArrayCursor<'_, T> {
        self.begin()
    }

    /// Render as `[a, b, c]` using `formatter` for each element
    pub fn to_string_with<F>(&self, formatter: F) -> String
    where
        F: Fn(&T) -> String,
    {
        bracketed(self.iter().map(|item| formatter(item)))
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning copies into a buffer of exactly the source's capacity.
///
/// `clone_from` builds the complete copy before replacing `self`, so a
/// panicking element clone leaves the destination as it was.
impl<T: Clone> Clone for GrowableArray<T> {
    fn clone(&self) -> Self {
        let mut slots = alloc_slots(self.capacity());
        for (dst, src) in slots.iter_mut().zip(self.iter()) {
            *dst = Some(src.clone());
        }
        Self {
            slots,
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let copy = source.clone();
        *self = copy;
    }
}

impl<T: PartialEq> PartialEq for GrowableArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for GrowableArray<T> {}

impl<T: fmt::Debug> fmt::Debug for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(|item| item.to_string()))
    }
}

impl<T> Extend<T> for GrowableArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            // Same contract as `Vec`: running out of address space panics.
            if let Err(err) = self.push(item) {
                panic!("{err}");
            }
        }
    }
}

impl<T> FromIterator<T> for GrowableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = GrowableArray::new();
        array.extend(iter);
        array
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = ArrayCursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}
