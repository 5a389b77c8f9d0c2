use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FusedIterator;

use crate::DefaultHashBuilder;
use crate::config::MapConfig;
use crate::cursor::Cursor;
use crate::entry_hash_builder;
use crate::error::MapError;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::views::EntrySet;
use crate::views::EntrySetMut;
use crate::views::KeySet;
use crate::views::KeySetMut;
use crate::views::ValueCollection;
use crate::views::ValueCollectionMut;

/// A hash map implemented on top of the double-hashing [`HashTable`].
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq`, hashing them with a configurable hasher builder `S`. Slots
/// are probed at `(h1 + i * h2) mod capacity`; removed entries leave
/// tombstones; the table grows to `2 * capacity + 1` slots as soon as the
/// configured load factor is reached.
///
/// Besides the usual Rust map surface the type offers the functional update
/// operators of a classic mutable-map contract (`put_if_absent`,
/// `compute_if_absent`, `compute_if_present`, `compute`, `merge`,
/// `replace_all`, ...) and live key/value/entry views.
///
/// # Examples
///
/// ```rust
/// use dhash_map::HashMap;
///
/// let mut scores: HashMap<&str, u32> = HashMap::new();
/// scores.insert("alice", 10);
/// scores.merge("alice", 5, |old, new| Some(old + new));
/// scores.merge("bob", 1, |old, new| Some(old + new));
///
/// assert_eq!(scores.get("alice"), Some(&15));
/// assert_eq!(scores.get("bob"), Some(&1));
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

/// Matches a stored pair against a borrowed form of its key.
fn equivalent_key<K, V, Q>(key: &Q) -> impl Fn(&(K, V)) -> bool + '_
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    move |(k, _)| Q::eq(k.borrow(), key)
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the backing array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let map: HashMap<i32, i32> = HashMap::new();
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the fill ratio at which the map grows.
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all elements from the map, keeping its capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.get(&1), None);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the key-value pairs of the map, in slot
    /// order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the key-value pairs with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Returns an iterator that removes and yields all key-value pairs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let pairs: Vec<_> = map.drain().collect();
    /// assert!(map.is_empty());
    /// assert_eq!(pairs.len(), 2);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Retains only the entries for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.table.retain(|(k, v)| keep(k, v));
    }

    /// Returns `true` if some entry holds a value equal to `value`.
    ///
    /// This scans every slot.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Live, read-only view of the keys.
    pub fn key_set(&self) -> KeySet<'_, K, V, S> {
        KeySet::new(self)
    }

    /// Live view of the keys that can remove entries from the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    ///
    /// let mut keys = map.key_set_mut();
    /// assert!(keys.remove("a"));
    /// assert_eq!(keys.len(), 1);
    ///
    /// assert!(!map.contains_key("a"));
    /// ```
    pub fn key_set_mut(&mut self) -> KeySetMut<'_, K, V, S> {
        KeySetMut::new(self)
    }

    /// Live, read-only view of the values.
    pub fn value_collection(&self) -> ValueCollection<'_, K, V, S> {
        ValueCollection::new(self)
    }

    /// Live view of the values that can modify or remove entries.
    pub fn value_collection_mut(&mut self) -> ValueCollectionMut<'_, K, V, S> {
        ValueCollectionMut::new(self)
    }

    /// Live, read-only view of the key-value pairs.
    pub fn entry_set(&self) -> EntrySet<'_, K, V, S> {
        EntrySet::new(self)
    }

    /// Live view of the key-value pairs that can modify or remove entries.
    pub fn entry_set_mut(&mut self) -> EntrySetMut<'_, K, V, S> {
        EntrySetMut::new(self)
    }

    /// Starts a [`Cursor`] at the first slot, capturing the current size.
    ///
    /// Unlike [`iter`](HashMap::iter) the cursor does not borrow the map
    /// between steps, so the map may be changed while walking it. Each step
    /// reports [`MapError::ConcurrentModification`] once the size no longer
    /// matches.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.len())
    }

    /// Visits every entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let map: HashMap<u32, u32> = (1..=4).map(|k| (k, k * k)).collect();
    ///
    /// let mut total = 0;
    /// map.for_each(|_, v| total += v);
    /// assert_eq!(total, 1 + 4 + 9 + 16);
    /// ```
    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter() {
            action(k, v);
        }
    }

    /// Replaces every value with `f(key, old_value)`.
    ///
    /// A `None` from `f` stops the walk with [`MapError::AbsentValue`];
    /// values replaced before that point keep their new value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// # use dhash_map::MapError;
    /// #
    /// let mut map: HashMap<u32, u32> = (1..=3).map(|k| (k, k)).collect();
    /// map.replace_all(|_, v| Some(v * 10)).unwrap();
    /// assert_eq!(map.get(&3), Some(&30));
    ///
    /// assert_eq!(map.replace_all(|_, _| None), Err(MapError::AbsentValue));
    /// ```
    pub fn replace_all<F>(&mut self, mut f: F) -> Result<(), MapError>
    where
        F: FnMut(&K, &V) -> Option<V>,
    {
        for (k, v) in self.iter_mut() {
            *v = f(k, v).ok_or(MapError::AbsentValue)?;
        }
        Ok(())
    }

    /// Visits every entry while allowing `action` to change the map.
    ///
    /// `action` receives the map plus clones of the current key and value.
    /// If the map's size differs from the size seen at the previous step,
    /// the walk stops with [`MapError::ConcurrentModification`]; changes made
    /// so far are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// # use dhash_map::MapError;
    /// #
    /// let mut map: HashMap<u32, u32> = (0..4).map(|k| (k, k)).collect();
    ///
    /// // Updating values in place is fine.
    /// map.for_each_reentrant(|m, k, v| {
    ///     m.insert(k, v + 1);
    /// })
    /// .unwrap();
    /// assert_eq!(map.get(&0), Some(&1));
    ///
    /// // Growing the map is detected.
    /// let result = map.for_each_reentrant(|m, k, _| {
    ///     m.insert(k + 100, 0);
    /// });
    /// assert!(matches!(result, Err(MapError::ConcurrentModification { .. })));
    /// ```
    pub fn for_each_reentrant<F>(&mut self, mut action: F) -> Result<(), MapError>
    where
        K: Clone,
        V: Clone,
        F: FnMut(&mut Self, K, V),
    {
        let mut cursor = self.cursor();
        while let Some((k, v)) = cursor
            .next_entry(self)?
            .map(|(k, v)| (k.clone(), v.clone()))
        {
            action(self, k, v);
        }
        Ok(())
    }

    /// Returns utilization statistics of the backing table.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }

    /// Histogram of probe lengths; see [`HashTable::probe_histogram`].
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> alloc::vec::Vec<usize> {
        self.table.probe_histogram()
    }

    pub(crate) fn table(&self) -> &HashTable<(K, V)> {
        &self.table
    }

    pub(crate) fn table_mut(&mut self) -> &mut HashTable<(K, V)> {
        &mut self.table
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map with the default configuration and the given
    /// hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(MapConfig::default(), hash_builder)
    }

    /// Creates an empty map from validated parameters and a hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::hash::RandomState;
    /// # use dhash_map::HashMap;
    /// # use dhash_map::MapConfig;
    /// #
    /// let config = MapConfig::new(7, 0.5).unwrap();
    /// let map: HashMap<i32, i32, _> = HashMap::with_config_and_hasher(config, RandomState::new());
    /// assert_eq!(map.capacity(), 7);
    /// assert_eq!(map.load_factor(), 0.5);
    /// ```
    pub fn with_config_and_hasher(config: MapConfig, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_config(config),
            hash_builder,
        }
    }

    #[inline]
    fn make_hash<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        self.hash_builder.hash_one(key)
    }

    /// Grows the map so that `additional` more entries fit without another
    /// resize.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Returns the previous value if the key was present; the size is then
    /// unchanged and no resize happens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => {
                Some(core::mem::replace(&mut entry.get_mut().1, value))
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Inserts every pair produced by `entries`.
    ///
    /// Later pairs win over earlier ones with the same key.
    pub fn put_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in entries {
            self.insert(k, v);
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value corresponding to the key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.make_hash(key);
        self.table
            .find(hash, equivalent_key(key))
            .map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.make_hash(key);
        self.table
            .find_mut(hash, equivalent_key(key))
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<i32, &str> = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.make_hash(key);
        self.table.remove(hash, equivalent_key(key))
    }

    /// Removes the entry only if its value equals `expected`.
    ///
    /// Equality is value equality through `PartialEq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// map.insert("k", 1);
    /// assert!(!map.remove_if_equals("k", &2));
    /// assert!(map.remove_if_equals("k", &1));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_if_equals<Q>(&mut self, key: &Q, expected: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        let hash = self.make_hash(key);
        match self.table.entry(hash, equivalent_key(key)) {
            TableEntry::Occupied(entry) if entry.get().1 == *expected => {
                entry.remove();
                true
            }
            _ => false,
        }
    }

    /// Gets the given key's entry for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// *map.entry("hits").or_insert(0) += 1;
    /// *map.entry("hits").or_insert(0) += 1;
    /// assert_eq!(map.get("hits"), Some(&2));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.make_hash(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Returns the current value for `key`, inserting `value` first if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// assert_eq!(*map.put_if_absent("k", 1), 1);
    /// assert_eq!(*map.put_if_absent("k", 2), 1);
    /// ```
    pub fn put_if_absent(&mut self, key: K, value: V) -> &mut V {
        self.entry(key).or_insert(value)
    }

    /// Replaces the value of a present key, returning the old value.
    ///
    /// Does nothing and returns `None` when the key is absent.
    pub fn replace<Q>(&mut self, key: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_mut(key).map(|slot| core::mem::replace(slot, value))
    }

    /// Replaces the value of `key` only if it currently equals `old`.
    pub fn replace_if_equals<Q>(&mut self, key: &Q, old: &V, new: V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
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

    /// Returns the value for `key`, computing and inserting it with `f` if
    /// the key is absent.
    ///
    /// A `None` from `f` is rejected with [`MapError::AbsentValue`] and
    /// leaves the map unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// # use dhash_map::MapError;
    /// #
    /// let mut map: HashMap<String, usize> = HashMap::new();
    /// let len = map.compute_if_absent("four".to_string(), |k| Some(k.len())).unwrap();
    /// assert_eq!(*len, 4);
    ///
    /// let err = map.compute_if_absent("none".to_string(), |_| None);
    /// assert_eq!(err, Err(MapError::AbsentValue));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn compute_if_absent<F>(&mut self, key: K, f: F) -> Result<&mut V, MapError>
    where
        F: FnOnce(&K) -> Option<V>,
    {
        match self.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let value = f(entry.key()).ok_or(MapError::AbsentValue)?;
                Ok(entry.insert(value))
            }
        }
    }

    /// Recomputes the value of a present key with `f(key, old_value)`.
    ///
    /// A `None` from `f` removes the entry. Absent keys are left alone and
    /// `f` is not called.
    pub fn compute_if_present<Q, F>(&mut self, key: &Q, f: F) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&K, &V) -> Option<V>,
    {
        let hash = self.make_hash(key);
        match self.table.entry(hash, equivalent_key(key)) {
            TableEntry::Vacant(_) => None,
            TableEntry::Occupied(mut entry) => {
                let (k, v) = entry.get();
                match f(k, v) {
                    Some(value) => {
                        entry.get_mut().1 = value;
                        Some(&mut entry.into_mut().1)
                    }
                    None => {
                        entry.remove();
                        None
                    }
                }
            }
        }
    }

    /// Recomputes the value of `key` with `f(key, old_value)`.
    ///
    /// Only keys that are already present are affected: for an absent key
    /// this returns `None`, does not call `f` and does not insert anything.
    /// A `None` from `f` removes the entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// map.insert("a", 1);
    ///
    /// assert_eq!(map.compute("a", |_, v| Some(v + 1)), Some(&mut 2));
    /// assert_eq!(map.compute("missing", |_, _| Some(7)), None);
    /// assert!(!map.contains_key("missing"));
    /// ```
    pub fn compute<Q, F>(&mut self, key: &Q, f: F) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&K, &V) -> Option<V>,
    {
        self.compute_if_present(key, f)
    }

    /// Combines `value` with the current value of `key`.
    ///
    /// If the key is absent, `value` is inserted as-is. Otherwise the entry
    /// becomes `f(old_value, value)`, or is removed when that is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// map.insert("test2", 20);
    /// assert_eq!(map.merge("test2", 20, |_, _| None), None);
    /// assert!(!map.contains_key("test2"));
    /// ```
    pub fn merge<F>(&mut self, key: K, value: V, f: F) -> Option<&mut V>
    where
        F: FnOnce(&V, V) -> Option<V>,
    {
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
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map with 16 slots and a 0.75 load factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// #
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map from validated parameters.
    pub fn with_config(config: MapConfig) -> Self {
        Self::with_config_and_hasher(config, S::default())
    }

    /// Creates an empty map with `capacity` slots and a 0.75 load factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::HashMap;
    /// # use dhash_map::MapError;
    /// #
    /// let map: HashMap<i32, i32> = HashMap::try_with_capacity(100).unwrap();
    /// assert_eq!(map.capacity(), 100);
    ///
    /// let err = HashMap::<i32, i32>::try_with_capacity(0).unwrap_err();
    /// assert_eq!(err, MapError::InvalidCapacity(0));
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, MapError> {
        Ok(Self::with_config(MapConfig::default().with_capacity(capacity)?))
    }

    /// Creates an empty map with `capacity` slots that grows once
    /// `load_factor` of them are filled.
    pub fn try_with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f32,
    ) -> Result<Self, MapError> {
        Ok(Self::with_config(MapConfig::new(capacity, load_factor)?))
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|theirs| v == theirs))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

/// Order-independent: the wrapping sum of `hash(key) ^ hash(value)` over
/// all entries, hashed with a fixed-seed hasher so that equal maps agree
/// regardless of capacity, insertion history or their own hasher builder.
impl<K, V, S> Hash for HashMap<K, V, S>
where
    K: Hash,
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let builder = entry_hash_builder();
        let sum = self.iter().fold(0u64, |acc, (k, v)| {
            acc.wrapping_add(builder.hash_one(k) ^ builder.hash_one(v))
        });
        state.write_usize(self.len());
        state.write_u64(sum);
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.put_all(iter);
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.put_all(iter);
        map
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    ///
    /// May grow the map first.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Inserts a value into the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}

/// An iterator over the key-value pairs of a `HashMap`.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the key-value pairs of a `HashMap` with mutable values.
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An iterator over mutable references to the values of a `HashMap`.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// A draining iterator over the key-value pairs of a `HashMap`.
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Drain<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}
impl<K, V> FusedIterator for Drain<'_, K, V> {}

/// An owning iterator over the key-value pairs of a `HashMap`.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
