//! Frequency counting with first-seen key order.

use std::collections::HashMap;
use std::hash::Hash;
use serde::Serialize;

use super::serde_utils::serialize_counts_as_map;

/// `(key, count)` pairs, highest count first.
pub type Ranking<K> = Vec<(K, u64)>;

/// Counts keys while remembering the order they first appeared in.
#[derive(Debug, Clone)]
pub struct FrequencyCounter<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K> FrequencyCounter<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, key: &K) -> u64 {
        self.index.get(key).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent keys. Ties keep first-seen order (stable sort).
    pub fn top(&self, n: usize) -> Ranking<K> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Every key with its count, in first-seen order.
    pub fn into_map(self) -> FrequencyMap<K> {
        FrequencyMap(self.entries)
    }
}

impl<K> Default for FrequencyCounter<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FromIterator<K> for FrequencyCounter<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        for key in iter {
            counter.add(key);
        }
        counter
    }
}

/// Untruncated frequency table. Serializes as a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "K: Serialize"))]
pub struct FrequencyMap<K>(
    #[serde(serialize_with = "serialize_counts_as_map")] Vec<(K, u64)>,
);

impl<K: PartialEq> FrequencyMap<K> {
    pub fn get(&self, key: &K) -> Option<u64> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[(K, u64)] {
        &self.0
    }
}
