//! Ordered, key-indexed registries.

use super::{Guideline, Rule};
use std::collections::HashMap;

/// Anything stored in a registry under a unique key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Rule {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Keyed for Guideline {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Insertion-ordered registry holding at most one item per key.
///
/// Inserting an existing key drops the old item and appends the new one, so
/// the survivor sits at the position of the latest registration.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

pub type RuleRegistry = Registry<Rule>;
pub type GuidelineRegistry = Registry<Guideline>;

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item and return a mutable reference to it, plus whether an
    /// item with the same key was replaced.
    pub fn insert(&mut self, item: T) -> (&mut T, bool) {
        let key = item.key().to_string();
        let replaced = match self.index.remove(&key) {
            Some(pos) => {
                self.items.remove(pos);
                for slot in self.index.values_mut() {
                    if *slot > pos {
                        *slot -= 1;
                    }
                }
                true
            }
            None => false,
        };

        let pos = self.items.len();
        self.items.push(item);
        self.index.insert(key, pos);
        (&mut self.items[pos], replaced)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Keyed::key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
