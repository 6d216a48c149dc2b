//! Id-keyed table preserving first-seen order.

use rayon::prelude::*;
use std::collections::HashMap;

/// One row of a [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    /// Row identifier.
    pub id: String,
    /// Row payload (raw text before transform, a window tensor after).
    pub content: T,
}

/// Table of unique ids in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<T> {
    entries: Vec<Entry<T>>,
    lookup: HashMap<String, usize>,
}

impl<T> Default for Frame<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<T> Frame<T> {
    /// Creates an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id` unless present. Returns true if a row was added.
    pub fn insert<F: FnOnce() -> T>(&mut self, id: &str, content: F) -> bool {
        if self.lookup.contains_key(id) {
            return false;
        }
        self.lookup.insert(id.to_string(), self.entries.len());
        self.entries.push(Entry {
            id: id.to_string(),
            content: content(),
        });
        true
    }

    /// Payload for `id`.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.lookup.get(id).map(|&i| &self.entries[i].content)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the frame has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<T>> {
        self.entries.iter()
    }

    /// Maps every payload in parallel, keeping row order and ids.
    ///
    /// Stops at the first error.
    pub fn try_par_map<U, E, F>(&self, f: F) -> Result<Frame<U>, E>
    where
        T: Sync,
        U: Send,
        E: Send,
        F: Fn(&T) -> Result<U, E> + Sync + Send,
    {
        let entries = self
            .entries
            .par_iter()
            .map(|entry| {
                Ok(Entry {
                    id: entry.id.clone(),
                    content: f(&entry.content)?,
                })
            })
            .collect::<Result<Vec<_>, E>>()?;

        Ok(Frame {
            entries,
            lookup: self.lookup.clone(),
        })
    }
}

impl<'a, T> IntoIterator for &'a Frame<T> {
    type Item = &'a Entry<T>;
    type IntoIter = std::slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
