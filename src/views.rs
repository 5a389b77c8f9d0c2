//! Live views over the keys, values and entries of a [`HashMap`].
//!
//! A view borrows its map instead of copying it, so it always reflects the
//! current contents. The shared views (`KeySet`, `ValueCollection`,
//! `EntrySet`) are `Copy`; the mutable ones can remove entries, and the
//! value and entry views can also modify values in place.

use core::borrow::Borrow;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_map::HashMap;
use crate::hash_map::Iter;
use crate::hash_map::IterMut;
use crate::hash_map::Keys;
use crate::hash_map::Values;
use crate::hash_map::ValuesMut;

/// A read-only view of the keys of a map.
///
/// Created by [`HashMap::key_set`].
pub struct KeySet<'a, K, V, S> {
    map: &'a HashMap<K, V, S>,
}

impl<'a, K, V, S> KeySet<'a, K, V, S> {
    pub(crate) fn new(map: &'a HashMap<K, V, S>) -> Self {
        Self { map }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the keys in slot order.
    pub fn iter(&self) -> Keys<'a, K, V> {
        self.map.keys()
    }
}

impl<K, V, S> KeySet<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if `key` is in the map. Uses the hash probe.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }
}

impl<K, V, S> Clone for KeySet<'_, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S> Copy for KeySet<'_, K, V, S> {}

impl<'a, K, V, S> IntoIterator for KeySet<'a, K, V, S> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view of the keys of a map through which entries can be removed.
///
/// Created by [`HashMap::key_set_mut`].
pub struct KeySetMut<'a, K, V, S> {
    map: &'a mut HashMap<K, V, S>,
}

impl<'a, K, V, S> KeySetMut<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut HashMap<K, V, S>) -> Self {
        Self { map }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the keys in slot order.
    pub fn iter(&self) -> Keys<'_, K, V> {
        self.map.keys()
    }

    /// Removes every entry whose key fails `keep`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.map.retain(|k, _| keep(k));
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V, S> KeySetMut<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if `key` is in the map.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Removes the entry for `key`. Returns `true` if there was one.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove_entry(key).is_some()
    }
}

/// A read-only view of the values of a map.
///
/// Created by [`HashMap::value_collection`].
pub struct ValueCollection<'a, K, V, S> {
    map: &'a HashMap<K, V, S>,
}

impl<'a, K, V, S> ValueCollection<'a, K, V, S> {
    pub(crate) fn new(map: &'a HashMap<K, V, S>) -> Self {
        Self { map }
    }

    /// Number of values, counting duplicates.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the values in slot order.
    pub fn iter(&self) -> Values<'a, K, V> {
        self.map.values()
    }

    /// Returns `true` if any entry holds a value equal to `value`. Scans
    /// every slot.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }
}

impl<K, V, S> Clone for ValueCollection<'_, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S> Copy for ValueCollection<'_, K, V, S> {}

impl<'a, K, V, S> IntoIterator for ValueCollection<'a, K, V, S> {
    type Item = &'a V;
    type IntoIter = Values<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view of the values of a map that can modify or remove entries.
///
/// Created by [`HashMap::value_collection_mut`].
///
/// # Examples
///
/// ```rust
/// # use dhash_map::HashMap;
/// #
/// let mut map: HashMap<&str, i32> = [("a", 1), ("b", 2), ("c", 1)].into_iter().collect();
///
/// let mut values = map.value_collection_mut();
/// values.retain(|&v| v == 1);
/// assert_eq!(values.len(), 2);
///
/// // Removes only one of the two entries holding 1.
/// assert!(values.remove(&1));
/// assert_eq!(values.len(), 1);
/// assert!(!values.remove(&2));
/// ```
pub struct ValueCollectionMut<'a, K, V, S> {
    map: &'a mut HashMap<K, V, S>,
}

impl<'a, K, V, S> ValueCollectionMut<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut HashMap<K, V, S>) -> Self {
        Self { map }
    }

    /// Number of values, counting duplicates.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the values in slot order.
    pub fn iter(&self) -> Values<'_, K, V> {
        self.map.values()
    }

    /// Iterates over mutable references to the values.
    pub fn iter_mut(&mut self) -> ValuesMut<'_, K, V> {
        self.map.values_mut()
    }

    /// Returns `true` if any entry holds a value equal to `value`.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }

    /// Removes the first entry, in slot order, whose value equals `value`.
    pub fn remove(&mut self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let table = self.map.table_mut();
        match table.position(|(_, v)| v == value) {
            Some(index) => table.take_at(index).is_some(),
            None => false,
        }
    }

    /// Removes every entry whose value fails `keep`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&V) -> bool,
    {
        self.map.retain(|_, v| keep(v));
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// A read-only view of the key-value pairs of a map.
///
/// Created by [`HashMap::entry_set`].
pub struct EntrySet<'a, K, V, S> {
    map: &'a HashMap<K, V, S>,
}

impl<'a, K, V, S> EntrySet<'a, K, V, S> {
    pub(crate) fn new(map: &'a HashMap<K, V, S>) -> Self {
        Self { map }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the pairs in slot order.
    pub fn iter(&self) -> Iter<'a, K, V> {
        self.map.iter()
    }
}

impl<K, V, S> EntrySet<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if `key` maps to a value equal to `value`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        self.map.get(key).is_some_and(|v| v == value)
    }
}

impl<K, V, S> Clone for EntrySet<'_, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S> Copy for EntrySet<'_, K, V, S> {}

impl<'a, K, V, S> IntoIterator for EntrySet<'a, K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view of the key-value pairs of a map that can modify or remove
/// entries.
///
/// Created by [`HashMap::entry_set_mut`].
pub struct EntrySetMut<'a, K, V, S> {
    map: &'a mut HashMap<K, V, S>,
}

impl<'a, K, V, S> EntrySetMut<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut HashMap<K, V, S>) -> Self {
        Self { map }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }

    /// Iterates over the pairs with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.map.iter_mut()
    }

    /// Removes every entry for which `keep` returns `false`.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.map.retain(keep);
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V, S> EntrySetMut<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if `key` maps to a value equal to `value`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        self.map.get(key).is_some_and(|v| v == value)
    }

    /// Removes the pair if `key` currently maps to `value`.
    pub fn remove<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        self.map.remove_if_equals(key, value)
    }
}
