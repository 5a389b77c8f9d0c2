//! The mutable-map capability set as a trait.
//!
//! [`MutableMap`] gathers the operations of a classic mutable map (lookup,
//! insertion, removal, conditional updates and the functional update
//! operators) behind one interface, so code can be written once against any
//! map that provides them. It is implemented for this crate's [`HashMap`]
//! and, with the `std` feature, for [`std::collections::HashMap`].
//!
//! Keys are passed as `&K` rather than through `Borrow` so that the trait
//! stays simple to implement.

use core::hash::BuildHasher;
use core::hash::Hash;
use core::mem;

use crate::error::MapError;
use crate::hash_map::HashMap;

/// A mutable key-value map with functional update operators.
///
/// Provided methods are written in terms of the required ones and may be
/// overridden with faster versions.
///
/// # Examples
///
/// ```rust
/// use dhash_map::HashMap;
/// use dhash_map::MutableMap;
///
/// fn tally<M: MutableMap<char, u32>>(map: &mut M, text: &str) {
///     for c in text.chars() {
///         map.merge(c, 1, |old, new| Some(old + new));
///     }
/// }
///
/// let mut ours: HashMap<char, u32> = HashMap::new();
/// let mut theirs = std::collections::HashMap::new();
/// tally(&mut ours, "hello");
/// tally(&mut theirs, "hello");
///
/// assert_eq!(MutableMap::get(&ours, &'l'), Some(&2));
/// assert_eq!(MutableMap::get(&theirs, &'l'), Some(&2));
/// ```
pub trait MutableMap<K, V> {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value for `key`, if present.
    fn get(&self, key: &K) -> Option<&V>;

    /// Mutable access to the value for `key`, if present.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Returns `true` if `key` has a value.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if some entry holds a value equal to `value`.
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq;

    /// Associates `value` with `key`, returning the previous value.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Removes `key`, returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes `key` only if its value equals `expected`.
    fn remove_if_equals(&mut self, key: &K, expected: &V) -> bool
    where
        V: PartialEq,
    {
        if self.get(key) == Some(expected) {
            self.remove(key);
            true
        } else {
            false
        }
    }

    /// Inserts every pair of `entries`; later pairs win.
    fn put_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        Self: Sized,
    {
        for (k, v) in entries {
            self.insert(k, v);
        }
    }

    /// Removes every entry.
    fn clear(&mut self);

    /// Inserts `value` unless `key` is present; returns the current value.
    fn put_if_absent(&mut self, key: K, value: V) -> &mut V;

    /// Replaces the value of a present key, returning the old one.
    fn replace(&mut self, key: &K, value: V) -> Option<V> {
        self.get_mut(key).map(|slot| mem::replace(slot, value))
    }

    /// Replaces the value of `key` only if it equals `old`.
    fn replace_if_equals(&mut self, key: &K, old: &V, new: V) -> bool
    where
        V: PartialEq,
    {
        match self.get_mut(key) {
            Some(slot) if *slot == *old => {
                *slot = new;
                true
            }
            _ => false,
        }
    }

    /// Returns the value of `key`, inserting `f(&key)` first when absent.
    ///
    /// Fails with [`MapError::AbsentValue`] if `f` yields `None`; the map is
    /// then unchanged.
    fn compute_if_absent<F>(&mut self, key: K, f: F) -> Result<&mut V, MapError>
    where
        F: FnOnce(&K) -> Option<V>;

    /// Replaces the value of a present key with `f(key, old)`, removing the
    /// entry on `None`. Absent keys are left alone.
    fn compute_if_present<F>(&mut self, key: &K, f: F) -> Option<&mut V>
    where
        F: FnOnce(&K, &V) -> Option<V>;

    /// Same as [`compute_if_present`](MutableMap::compute_if_present): an
    /// absent key is a no-op and `f` is not called.
    fn compute<F>(&mut self, key: &K, f: F) -> Option<&mut V>
    where
        F: FnOnce(&K, &V) -> Option<V>,
    {
        self.compute_if_present(key, f)
    }

    /// Inserts `value` for an absent key, otherwise replaces the value with
    /// `f(old, value)` and removes the entry on `None`.
    fn merge<F>(&mut self, key: K, value: V, f: F) -> Option<&mut V>
    where
        F: FnOnce(&V, V) -> Option<V>;

    /// Visits every entry.
    fn for_each<F>(&self, action: F)
    where
        F: FnMut(&K, &V);

    /// Replaces every value with `f(key, old)`.
    ///
    /// A `None` stops with [`MapError::AbsentValue`]; earlier replacements
    /// are kept.
    fn replace_all<F>(&mut self, f: F) -> Result<(), MapError>
    where
        F: FnMut(&K, &V) -> Option<V>;
}

impl<K, V, S> MutableMap<K, V> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        HashMap::get_mut(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        HashMap::contains_value(self, value)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn remove_if_equals(&mut self, key: &K, expected: &V) -> bool
    where
        V: PartialEq,
    {
        HashMap::remove_if_equals(self, key, expected)
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn put_if_absent(&mut self, key: K, value: V) -> &mut V {
        HashMap::put_if_absent(self, key, value)
    }

    fn compute_if_absent<F>(&mut self, key: K, f: F) -> Result<&mut V, MapError>
    where
        F: FnOnce(&K) -> Option<V>,
    {
        HashMap::compute_if_absent(self, key, f)
    }

    fn compute_if_present<F>(&mut self, key: &K, f: F) -> Option<&mut V>
    where
        F: FnOnce(&K, &V) -> Option<V>,
    {
        HashMap::compute_if_present(self, key, f)
    }

    fn merge<F>(&mut self, key: K, value: V, f: F) -> Option<&mut V>
    where
        F: FnOnce(&V, V) -> Option<V>,
    {
        HashMap::merge(self, key, value, f)
    }

    fn for_each<F>(&self, action: F)
    where
        F: FnMut(&K, &V),
    {
        HashMap::for_each(self, action);
    }

    fn replace_all<F>(&mut self, f: F) -> Result<(), MapError>
    where
        F: FnMut(&K, &V) -> Option<V>,
    {
        HashMap::replace_all(self, f)
    }
}

#[cfg(feature = "std")]
impl<K, V, S> MutableMap<K, V> for std::collections::HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        std::collections::HashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        std::collections::HashMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        std::collections::HashMap::get_mut(self, key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        std::collections::HashMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        std::collections::HashMap::remove(self, key)
    }

    fn clear(&mut self) {
        std::collections::HashMap::clear(self);
    }

    fn put_if_absent(&mut self, key: K, value: V) -> &mut V {
        self.entry(key).or_insert(value)
    }

    fn compute_if_absent<F>(&mut self, key: K, f: F) -> Result<&mut V, MapError>
    where
        F: FnOnce(&K) -> Option<V>,
    {
        use std::collections::hash_map::Entry;

        match self.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let value = f(entry.key()).ok_or(MapError::AbsentValue)?;
                Ok(entry.insert(value))
            }
        }
    }

    fn compute_if_present<F>(&mut self, key: &K, f: F) -> Option<&mut V>
    where
        F: FnOnce(&K, &V) -> Option<V>,
    {
        let (k, v) = self.get_key_value(key)?;
        match f(k, v) {
            Some(value) => {
                let slot = std::collections::HashMap::get_mut(self, key)?;
                *slot = value;
                Some(slot)
            }
            None => {
                std::collections::HashMap::remove(self, key);
                None
            }
        }
    }

    fn merge<F>(&mut self, key: K, value: V, f: F) -> Option<&mut V>
    where
        F: FnOnce(&V, V) -> Option<V>,
    {
        use std::collections::hash_map::Entry;

        match self.entry(key) {
            Entry::Vacant(entry) => Some(entry.insert(value)),
            Entry::Occupied(mut entry) => match f(entry.get(), value) {
                Some(merged) => {
                    entry.insert(merged);
                    Some(entry.into_mut())
                }
                None => {
                    entry.remove();
                    None
                }
            },
        }
    }

    fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self {
            action(k, v);
        }
    }

    fn replace_all<F>(&mut self, mut f: F) -> Result<(), MapError>
    where
        F: FnMut(&K, &V) -> Option<V>,
    {
        for (k, v) in self.iter_mut() {
            *v = f(k, v).ok_or(MapError::AbsentValue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::hash::BuildHasherDefault;

    use siphasher::sip::SipHasher;

    use super::*;

    type Map<K, V> = HashMap<K, V, BuildHasherDefault<SipHasher>>;

    /// Runs the same script against any implementation and returns the
    /// sorted final contents.
    fn script<M: MutableMap<&'static str, i32>>(map: &mut M) -> Vec<(&'static str, i32)> {
        assert!(map.is_empty());
        map.put_all([("a", 1), ("b", 2), ("c", 3), ("a", 4)]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&"a"), Some(&4));
        assert!(map.contains_value(&3));

        assert_eq!(*map.put_if_absent("a", 100), 4);
        assert_eq!(*map.put_if_absent("d", 5), 5);

        assert!(!map.remove_if_equals(&"d", &6));
        assert!(map.remove_if_equals(&"d", &5));

        assert_eq!(map.replace(&"missing", 1), None);
        assert_eq!(map.replace(&"b", 20), Some(2));
        assert!(map.replace_if_equals(&"b", &20, 21));
        assert!(!map.replace_if_equals(&"b", &20, 22));

        assert_eq!(map.compute_if_absent("e", |k| Some(k.len() as i32)), Ok(&mut 1));
        assert_eq!(map.compute_if_absent("f", |_| None), Err(MapError::AbsentValue));
        assert!(!map.contains_key(&"f"));

        assert_eq!(map.compute(&"zzz", |_, _| Some(0)), None);
        assert!(!map.contains_key(&"zzz"));
        assert_eq!(map.compute(&"e", |_, v| Some(v * 7)), Some(&mut 7));
        assert_eq!(map.compute_if_present(&"e", |_, _| None), None);

        assert_eq!(map.merge("c", 10, |old, new| Some(old + new)), Some(&mut 13));
        assert_eq!(map.merge("c", 0, |_, _| None), None);
        assert_eq!(map.merge("g", 9, |_, _| None), Some(&mut 9));

        map.replace_all(|_, v| Some(v + 1000)).unwrap();
        assert_eq!(map.replace_all(|_, _| None), Err(MapError::AbsentValue));

        let mut contents = Vec::new();
        map.for_each(|k, v| contents.push((*k, *v)));
        contents.sort_unstable();
        contents
    }

    #[test]
    fn implementations_agree() {
        let mut ours: Map<&'static str, i32> = Map::default();
        let mut theirs = std::collections::HashMap::new();

        let expected = script(&mut theirs);
        assert_eq!(script(&mut ours), expected);
        assert_eq!(expected, [("a", 1004), ("b", 1021), ("g", 1009)]);

        ours.clear();
        theirs.clear();
        assert!(MutableMap::is_empty(&ours));
        assert!(MutableMap::is_empty(&theirs));
    }

    #[test]
    fn default_methods() {
        struct Pairs(Vec<(u8, u8)>);

        impl MutableMap<u8, u8> for Pairs {
            fn len(&self) -> usize {
                self.0.len()
            }
            fn get(&self, key: &u8) -> Option<&u8> {
                self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            fn get_mut(&mut self, key: &u8) -> Option<&mut u8> {
                self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            fn contains_value(&self, value: &u8) -> bool {
                self.0.iter().any(|(_, v)| v == value)
            }
            fn insert(&mut self, key: u8, value: u8) -> Option<u8> {
                match self.get_mut(&key) {
                    Some(slot) => Some(mem::replace(slot, value)),
                    None => {
                        self.0.push((key, value));
                        None
                    }
                }
            }
            fn remove(&mut self, key: &u8) -> Option<u8> {
                let index = self.0.iter().position(|(k, _)| k == key)?;
                Some(self.0.swap_remove(index).1)
            }
            fn clear(&mut self) {
                self.0.clear();
            }
            fn put_if_absent(&mut self, key: u8, value: u8) -> &mut u8 {
                if !self.contains_key(&key) {
                    self.0.push((key, value));
                }
                self.get_mut(&key).unwrap()
            }
            fn compute_if_absent<F>(&mut self, key: u8, f: F) -> Result<&mut u8, MapError>
            where
                F: FnOnce(&u8) -> Option<u8>,
            {
                if !self.contains_key(&key) {
                    let value = f(&key).ok_or(MapError::AbsentValue)?;
                    self.0.push((key, value));
                }
                Ok(self.get_mut(&key).unwrap())
            }
            fn compute_if_present<F>(&mut self, key: &u8, f: F) -> Option<&mut u8>
            where
                F: FnOnce(&u8, &u8) -> Option<u8>,
            {
                match f(key, self.get(key)?) {
                    Some(value) => {
                        let slot = self.get_mut(key)?;
                        *slot = value;
                        Some(slot)
                    }
                    None => {
                        self.remove(key);
                        None
                    }
                }
            }
            fn merge<F>(&mut self, key: u8, value: u8, f: F) -> Option<&mut u8>
            where
                F: FnOnce(&u8, u8) -> Option<u8>,
            {
                match self.get(&key) {
                    None => Some(self.put_if_absent(key, value)),
                    Some(old) => match f(old, value) {
                        Some(merged) => {
                            self.insert(key, merged);
                            self.get_mut(&key)
                        }
                        None => {
                            self.remove(&key);
                            None
                        }
                    },
                }
            }
            fn for_each<F>(&self, mut action: F)
            where
                F: FnMut(&u8, &u8),
            {
                self.0.iter().for_each(|(k, v)| action(k, v));
            }
            fn replace_all<F>(&mut self, mut f: F) -> Result<(), MapError>
            where
                F: FnMut(&u8, &u8) -> Option<u8>,
            {
                for (k, v) in self.0.iter_mut() {
                    *v = f(k, v).ok_or(MapError::AbsentValue)?;
                }
                Ok(())
            }
        }

        let mut pairs = Pairs(Vec::new());
        pairs.put_all([(1, 10), (2, 20)]);
        assert!(pairs.contains_key(&1));
        assert!(!pairs.is_empty());
        assert_eq!(pairs.replace(&1, 11), Some(10));
        assert!(pairs.replace_if_equals(&1, &11, 12));
        assert!(pairs.remove_if_equals(&2, &20));
        assert_eq!(pairs.compute(&1, |_, v| Some(v + 1)), Some(&mut 13));
        assert_eq!(pairs.compute(&9, |_, _| Some(1)), None);
        assert_eq!(pairs.len(), 1);
    }
}
