//! Singly linked list with O(1) append
//!
//! Nodes are allocated as boxes and leaked into `NonNull` links, so the
//! head chain and the tail pointer never hold competing unique borrows.
//! Each node is reclaimed exactly once, by `clear`.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::array::bracketed;
use crate::error::{ContainerError, Result};

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,
    /// Successor owned by this node
    next: Link<T>,
}

pub struct SequentialList<T> {
    head: Link<T>,
    /// Last node of the chain; `None` iff the list is empty
    tail: Link<T>,
    len: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

// The list owns every node reachable from `head`; nothing else aliases them.
unsafe impl<T: Send> Send for SequentialList<T> {}
unsafe impl<T: Sync> Sync for SequentialList<T> {}

impl<T> SequentialList<T> {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Number of nodes in the chain
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list has no nodes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Link a new node after the current tail
    pub fn push(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node { value, next: None })));
        match self.tail {
            // SAFETY: `tail` is a live node leaked by an earlier `push` and
            // not yet reclaimed; `&mut self` excludes any outstanding borrow.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    fn out_of_range(&self, index: usize) -> ContainerError {
        ContainerError::IndexOutOfRange {
            index,
            len: self.len,
        }
    }

    /// Walk to the node at `index`, which must be below `len`
    fn node_at(&self, index: usize) -> Link<T> {
        let mut link = self.head;
        for _ in 0..index {
            // SAFETY: every link reachable from `head` is a live node.
            link = link.and_then(|node| unsafe { (*node.as_ptr()).next });
        }
        link
    }

    /// Borrow the value at `index`
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        match self.node_at(index) {
            // SAFETY: the node is live and `&self` keeps the list from mutating.
            Some(node) => Ok(unsafe { &(*node.as_ptr()).value }),
            None => Err(self.out_of_range(index)),
        }
    }

    /// Mutably borrow the value at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        match self.node_at(index) {
            // SAFETY: the node is live and `&mut self` makes this the only borrow.
            Some(node) => Ok(unsafe { &mut (*node.as_ptr()).value }),
            None => Err(self.out_of_range(index)),
        }
    }

    /// Release every node, one at a time
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(node) = link {
            // SAFETY: each node was leaked from a box by `push` and is
            // unlinked here before being reclaimed, so it is freed once.
            let boxed = unsafe { Box::from_raw(node.as_ptr()) };
            link = boxed.next;
        }
        self.tail = None;
        self.len = 0;
    }

    /// Iterate from head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head,
            remaining: self.len,
            _list: PhantomData,
        }
    }
}

impl<T> Drop for SequentialList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for SequentialList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SequentialList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SequentialList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for SequentialList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for SequentialList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bracketed(self.iter().map(|item| item.to_string())))
    }
}

impl<T> Extend<T> for SequentialList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for SequentialList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SequentialList::new();
        list.extend(iter);
        list
    }
}

/// Forward iterator over a [`SequentialList`]
pub struct Iter<'a, T> {
    next: Link<T>,
    remaining: usize,
    _list: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|node| {
            // SAFETY: the iterator borrows the list, so the node stays live for 'a.
            let node = unsafe { &*node.as_ptr() };
            self.next = node.next;
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a SequentialList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
