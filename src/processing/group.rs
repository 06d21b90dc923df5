//! Generic single-pass grouping.
//!
//! [`group_by`] buckets items by a key function; [`group_by_reduce`] additionally folds each
//! bucket into a summary. Both keep groups in the order their keys were first seen.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::types::Value;

/// Groups keyed by `K`, in first-seen key order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouped<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Grouped<K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Value for `key`. Linear scan; use [`Grouped::iter`] for bulk access.
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: PartialEq,
    {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Apply `f` to every group's value, keeping keys and order.
    pub fn map_values<R, F>(self, mut f: F) -> Grouped<K, R>
    where
        F: FnMut(&K, V) -> R,
    {
        Grouped {
            entries: self
                .entries
                .into_iter()
                .map(|(k, v)| {
                    let r = f(&k, v);
                    (k, r)
                })
                .collect(),
        }
    }
}

impl<K, V> IntoIterator for Grouped<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Bucket `items` by `key`, keeping member order within each bucket.
pub fn group_by<T, K, I, F>(items: I, mut key: F) -> Grouped<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut entries: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let k = key(&item);
        match index.get(&k) {
            Some(&slot) => entries[slot].1.push(item),
            None => {
                index.insert(k.clone(), entries.len());
                entries.push((k, vec![item]));
            }
        }
    }

    Grouped { entries }
}

/// Bucket `items` by `key`, then fold each bucket with `reducer`.
pub fn group_by_reduce<T, K, R, I, F, G>(items: I, key: F, mut reducer: G) -> Grouped<K, R>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
    G: FnMut(&[T]) -> R,
{
    group_by(items, key).map_values(|_, members| reducer(members.as_slice()))
}

/// A [`Value`] usable as a hash key.
///
/// Numbers compare by value with `-0.0 == 0.0` and every NaN equal to every other NaN; text
/// compares exactly (case-sensitive).
#[derive(Debug, Clone)]
pub struct GroupKey(pub Value);

impl GroupKey {
    pub fn into_value(self) -> Value {
        self.0
    }

    fn number_bits(n: f64) -> u64 {
        if n == 0.0 {
            0f64.to_bits()
        } else if n.is_nan() {
            f64::NAN.to_bits()
        } else {
            n.to_bits()
        }
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => Self::number_bits(*a) == Self::number_bits(*b),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for GroupKey {}

impl Hash for GroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Value::Null => state.write_u8(0),
            Value::Number(n) => {
                state.write_u8(1);
                state.write_u64(Self::number_bits(*n));
            }
            Value::Text(s) => {
                state.write_u8(2);
                s.hash(state);
            }
        }
    }
}
