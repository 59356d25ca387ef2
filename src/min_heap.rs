//! Binary min-heap ordered by a caller supplied comparator, used as the open list of the search.
//!
//! Unlike [std::collections::BinaryHeap] this does not require [Ord] on the elements, which
//! lets the search order tiles by their floating point `f` value. Elements comparing equal
//! keep whatever position the sift operations leave them in, so ties are resolved by
//! insertion history and the resulting order is deterministic.
use crate::error::{PathfindingError, Result};
use core::fmt;
use std::cmp::Ordering;

pub struct MinHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    data: Vec<T>,
    compare: F,
}

impl<T, F> MinHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(compare: F) -> MinHeap<T, F> {
        MinHeap {
            data: Vec::new(),
            compare,
        }
    }
    pub fn with_capacity(capacity: usize, compare: F) -> MinHeap<T, F> {
        MinHeap {
            data: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Appends the element and sifts it up. O(log n).
    pub fn insert(&mut self, element: T) {
        self.data.push(element);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes the smallest element. The last element takes its place and is sifted down. O(log n).
    pub fn extract_min(&mut self) -> Result<T> {
        if self.data.is_empty() {
            return Err(PathfindingError::EmptyHeap);
        }
        let root = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(root)
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }
    pub fn size(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Iterates the elements in storage order, not in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if (self.compare)(&self.data[parent], &self.data[index]) == Ordering::Greater {
                self.data.swap(parent, index);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            // Left child wins ties
            let smallest = if right < len
                && (self.compare)(&self.data[left], &self.data[right]) == Ordering::Greater
            {
                right
            } else {
                left
            };
            if (self.compare)(&self.data[index], &self.data[smallest]) == Ordering::Greater {
                self.data.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for MinHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
