use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::mem;

use crate::config::MapConfig;

/// Odd multiplier applied to the raw hash before both probe functions.
const PROBE_MULTIPLIER: u64 = 17;

/// Growth rule: `2 * capacity + 1` keeps the slot count odd.
#[inline(always)]
fn grown_capacity(capacity: usize) -> usize {
    capacity
        .checked_mul(2)
        .and_then(|c| c.checked_add(1))
        .expect("capacity overflow")
}

#[derive(Clone)]
enum Slot<V> {
    Empty,
    /// A removed entry. Lookups continue past it, insertions may reuse it.
    Tombstone,
    Occupied {
        hash: u64,
        value: V,
    },
}

impl<V> Slot<V> {
    #[inline(always)]
    fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    #[inline(always)]
    fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline(always)]
    fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Overwrites the slot and hands back the stored value.
    fn occupy(&mut self, hash: u64, value: V) -> &mut V {
        *self = Slot::Occupied { hash, value };
        match self {
            Slot::Occupied { value, .. } => value,
            // Written on the line above.
            _ => unreachable!(),
        }
    }
}

fn empty_slots<V>(capacity: usize) -> Box<[Slot<V>]> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

/// Moves every live `(hash, value)` out of `slots`, leaving them all empty.
fn take_entries<V>(slots: &mut [Slot<V>]) -> impl Iterator<Item = (u64, V)> + '_ {
    slots
        .iter_mut()
        .filter_map(|slot| match mem::replace(slot, Slot::Empty) {
            Slot::Occupied { hash, value } => Some((hash, value)),
            _ => None,
        })
}

/// First non-occupied slot on the probe sequence of `hash`.
fn first_free<V>(slots: &[Slot<V>], hash: u64) -> Option<usize> {
    ProbeSeq::new(hash, slots.len()).find(|&index| !slots[index].is_occupied())
}

/// The double-hashing probe sequence of a hash for a given capacity.
///
/// Attempt `i` visits `(h1 + i * h2) mod capacity` where
/// `h1 = (hash * 17) mod capacity` and `h2 = (hash * 17 + 1) mod capacity`.
/// The sequence is cut off after `capacity` attempts. When `h2` is zero or
/// shares a factor with the capacity it revisits slots before that.
#[derive(Clone, Copy, Debug)]
struct ProbeSeq {
    position: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    #[inline(always)]
    fn new(hash: u64, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        let mixed = hash.wrapping_mul(PROBE_MULTIPLIER);
        let modulus = capacity as u64;
        Self {
            position: (mixed % modulus) as usize,
            step: (mixed.wrapping_add(1) % modulus) as usize,
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.position;
        // Both terms are below `capacity`, so the sum cannot overflow.
        self.position = (self.position + self.step) % self.capacity;
        Some(current)
    }
}

enum Probe {
    Found(usize),
    Vacant(usize),
    /// Every attempt hit a foreign entry.
    Exhausted,
}

/// Debug statistics for hash table analysis.
///
/// Available in tests or with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries
    pub populated: usize,
    /// Total number of slots allocated
    pub capacity: usize,
    /// Number of removed-entry markers
    pub tombstones: usize,
    /// Number of never-used (or cleared) slots
    pub empty_slots: usize,
    /// Configured maximum fill ratio
    pub load_factor: f32,
    /// populated / capacity
    pub fill_ratio: f64,
    /// Bytes used by the slot array
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% filled, limit {:.2}%)",
            self.populated,
            self.capacity,
            self.fill_ratio * 100.0,
            self.load_factor * 100.0
        );
        println!(
            "Tombstones: {}, empty slots: {}",
            self.tombstones, self.empty_slots
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// An open-addressing hash table using double hashing.
///
/// `HashTable<V>` stores values of type `V`. Like the raw tables of other
/// hashing crates it does not hash anything itself: every operation takes the
/// precomputed 64-bit hash plus an equality predicate. The hash is cached
/// next to each value so that growing the table never rehashes keys.
///
/// Removal leaves a tombstone so that entries further along a collision
/// chain stay reachable. Tombstones are purged whenever the table is
/// rebuilt.
///
/// ## Example
///
/// ```rust
/// # use core::hash::BuildHasher;
/// # use dhash_map::hash_table::Entry;
/// # use dhash_map::hash_table::HashTable;
/// # use dhash_map::DefaultHashBuilder;
/// #
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     id: u64,
///     name: String,
/// }
///
/// let state = DefaultHashBuilder::default();
/// let mut table = HashTable::new();
/// let hash = state.hash_one(123u64);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => unreachable!(),
/// }
///
/// assert_eq!(table.find(hash, |p| p.id == 123).unwrap().name, "Alice");
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    slots: Box<[Slot<V>]>,
    populated: usize,
    tombstones: usize,
    load_factor: f32,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::string::String;

        let layout: String = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Empty => '.',
                Slot::Tombstone => 'x',
                Slot::Occupied { .. } => '#',
            })
            .collect();

        f.debug_struct("HashTable")
            .field("layout", &layout)
            .field("populated", &self.populated)
            .field("tombstones", &self.tombstones)
            .field("capacity", &self.slots.len())
            .field("load_factor", &self.load_factor)
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates a table with 16 slots and a 0.75 load factor.
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    /// Creates a table from validated construction parameters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::hash_table::HashTable;
    /// # use dhash_map::MapConfig;
    /// #
    /// let table: HashTable<u64> = HashTable::with_config(MapConfig::new(5, 0.5).unwrap());
    /// assert_eq!(table.capacity(), 5);
    /// assert!(table.is_empty());
    /// ```
    pub fn with_config(config: MapConfig) -> Self {
        Self {
            slots: empty_slots(config.capacity()),
            populated: 0,
            tombstones: 0,
            load_factor: config.load_factor(),
        }
    }

    /// Returns the number of values in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no values.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots.
    ///
    /// Unlike `std`, this is the raw slot count, not the number of values
    /// that fit before growth; that is `capacity * load_factor`.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the configured load factor.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    #[inline(always)]
    fn exceeds_load(&self, count: usize) -> bool {
        reaches_threshold(count, self.slots.len(), self.load_factor)
    }

    /// Returns an iterator over the values in slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.populated,
        }
    }

    /// Removes every value, yielding them in slot order.
    ///
    /// The capacity is kept. Values not consumed before the iterator is
    /// dropped are dropped with it.
    pub fn drain(&mut self) -> Drain<'_, V> {
        let remaining = mem::replace(&mut self.populated, 0);
        self.tombstones = 0;
        Drain {
            slots: self.slots.iter_mut(),
            remaining,
        }
    }

    /// Resets every slot to empty. The capacity is kept.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.populated = 0;
        self.tombstones = 0;
    }

    /// Grows the table so that `additional` more values fit without another
    /// resize.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.populated.saturating_add(additional);
        if self.exceeds_load(required) {
            let capacity = self.capacity_for(required);
            self.rehash(capacity);
        }
    }

    /// Keeps only the values for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut V) -> bool) {
        for slot in self.slots.iter_mut() {
            if let Some(value) = slot.value_mut() {
                if !keep(value) {
                    *slot = Slot::Tombstone;
                    self.populated -= 1;
                    self.tombstones += 1;
                }
            }
        }
    }

    /// Finds the value matching `eq` on the probe sequence of `hash`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(7, |&v: &u32| v == 70).or_insert(70);
    ///
    /// assert_eq!(table.find(7, |&v| v == 70), Some(&70));
    /// assert_eq!(table.find(7, |&v| v == 71), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let index = self.find_index(hash, eq)?;
        self.slots[index].value()
    }

    /// Mutable variant of [`find`](HashTable::find).
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.find_index(hash, eq)?;
        self.slots[index].value_mut()
    }

    /// Removes and returns the value matching `eq`.
    ///
    /// The slot becomes a tombstone so later entries on the same chain are
    /// still found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(1, |&v: &u32| v == 10).or_insert(10);
    /// table.entry(1, |&v: &u32| v == 11).or_insert(11);
    ///
    /// assert_eq!(table.remove(1, |&v| v == 10), Some(10));
    /// assert_eq!(table.find(1, |&v| v == 11), Some(&11));
    /// assert_eq!(table.remove(1, |&v| v == 10), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let index = self.find_index(hash, eq)?;
        self.take_at(index)
    }

    /// Gets the entry for the value matching `eq`, for in-place
    /// manipulation.
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.probe(hash, &eq) {
            Probe::Found(index) => Entry::Occupied(OccupiedEntry { table: self, index }),
            Probe::Vacant(index) => Entry::Vacant(VacantEntry {
                table: self,
                hash,
                index: Some(index),
            }),
            Probe::Exhausted => Entry::Vacant(VacantEntry {
                table: self,
                hash,
                index: None,
            }),
        }
    }

    fn find_index(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<usize> {
        for index in ProbeSeq::new(hash, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied { hash: h, value } => {
                    if *h == hash && eq(value) {
                        return Some(index);
                    }
                }
            }
        }
        None
    }

    /// Walks the whole chain: the first free slot is only usable once an
    /// empty slot (or the end of the sequence) proves `eq` matches nothing.
    fn probe(&self, hash: u64, eq: &impl Fn(&V) -> bool) -> Probe {
        let mut first_tombstone = None;
        for index in ProbeSeq::new(hash, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied { hash: h, value } => {
                    if *h == hash && eq(value) {
                        return Probe::Found(index);
                    }
                }
            }
        }

        match first_tombstone {
            Some(index) => Probe::Vacant(index),
            None => Probe::Exhausted,
        }
    }

    /// Smallest grown capacity that keeps `count` values under the load
    /// factor.
    fn capacity_for(&self, count: usize) -> usize {
        let mut capacity = grown_capacity(self.slots.len());
        while reaches_threshold(count, capacity, self.load_factor) {
            capacity = grown_capacity(capacity);
        }
        capacity
    }

    /// Picks the slot a new value with `hash` goes into, resizing first when
    /// one more value would reach the load factor.
    fn prepare_insert(&mut self, hash: u64, candidate: Option<usize>) -> usize {
        let required = self.populated + 1;
        if self.exceeds_load(required) {
            let capacity = self.capacity_for(required);
            self.rehash(capacity);
        } else if let Some(index) = candidate {
            let reuses_tombstone = matches!(self.slots[index], Slot::Tombstone);
            let markers = required + self.tombstones - usize::from(reuses_tombstone);
            if !self.exceeds_load(markers) {
                return index;
            }
            // Too many tombstones: rebuild at the same size to get rid of them.
            self.rehash(self.slots.len());
        } else {
            self.rehash(grown_capacity(self.slots.len()));
        }

        loop {
            if let Some(index) = first_free(&self.slots, hash) {
                return index;
            }
            self.rehash(grown_capacity(self.slots.len()));
        }
    }

    /// Rebuilds the table with `capacity` slots, reinserting every value at
    /// probe positions computed for the new size.
    ///
    /// A value whose probe cycle finds no free slot restarts the rebuild at
    /// the next capacity.
    fn rehash(&mut self, capacity: usize) {
        let mut pending: Vec<(u64, V)> = Vec::with_capacity(self.populated);
        pending.extend(take_entries(&mut self.slots));

        let mut capacity = capacity;
        'rebuild: loop {
            let mut slots = empty_slots(capacity);
            while let Some((hash, value)) = pending.pop() {
                match first_free(&slots, hash) {
                    Some(index) => {
                        slots[index] = Slot::Occupied { hash, value };
                    }
                    None => {
                        pending.push((hash, value));
                        pending.extend(take_entries(&mut slots));
                        capacity = grown_capacity(capacity);
                        continue 'rebuild;
                    }
                }
            }

            self.slots = slots;
            self.tombstones = 0;
            return;
        }
    }

    pub(crate) fn take_at(&mut self, index: usize) -> Option<V> {
        let slot = self.slots.get_mut(index)?;
        if !slot.is_occupied() {
            return None;
        }
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.populated -= 1;
                self.tombstones += 1;
                Some(value)
            }
            _ => None,
        }
    }

    /// The first occupied slot at or after `from`.
    pub(crate) fn next_occupied(&self, from: usize) -> Option<(usize, &V)> {
        self.slots
            .get(from..)?
            .iter()
            .enumerate()
            .find_map(|(offset, slot)| slot.value().map(|value| (from + offset, value)))
    }

    pub(crate) fn get_at_mut(&mut self, index: usize) -> Option<&mut V> {
        self.slots.get_mut(index)?.value_mut()
    }

    /// Slot index of the first value matching `pred`, by linear scan.
    pub(crate) fn position(&self, pred: impl Fn(&V) -> bool) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.value().is_some_and(&pred))
    }

    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// Bin `i` counts the values found on attempt `i` of their own probe
    /// sequence (bin 0 holds values sitting at their home slot). The
    /// returned vector is as long as the longest probe plus one.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let mut hist = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let attempt = ProbeSeq::new(*hash, self.slots.len())
                    .position(|probe| probe == index)
                    .unwrap_or(self.slots.len());
                if hist.len() <= attempt {
                    hist.resize(attempt + 1, 0);
                }
                hist[attempt] += 1;
            }
        }
        hist
    }

    /// Returns utilization statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let empty_slots = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Empty))
            .count();

        DebugStats {
            populated: self.populated,
            capacity: self.slots.len(),
            tombstones: self.tombstones,
            empty_slots,
            load_factor: self.load_factor,
            fill_ratio: self.populated as f64 / self.slots.len() as f64,
            total_bytes: self.slots.len() * mem::size_of::<Slot<V>>(),
        }
    }

    /// Pretty-prints the probe-length histogram horizontally using stdout.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("probe histogram ({} entries):", self.populated);
        for (attempt, &count) in hist.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", attempt, "█".repeat(width), count);
        }
    }
}

#[inline(always)]
fn reaches_threshold(count: usize, capacity: usize, load_factor: f32) -> bool {
    count as f64 >= f64::from(load_factor) * capacity as f64
}

impl<V> IntoIterator for HashTable<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.populated,
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

/// A view into a single slot of the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// The probe sequence holds no matching value.
    Vacant(VacantEntry<'a, V>),
    /// A matching value was found.
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Modifies an occupied entry in place. Returns `None` for a vacant one.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `V::default()` if the entry is vacant.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }
}

/// A vacant entry in the hash table.
///
/// Holds the insertion point found while probing, if any. Inserting may
/// still resize the table first.
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
    index: Option<usize>,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts `value` and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use dhash_map::hash_table::Entry;
    /// # use dhash_map::hash_table::HashTable;
    /// # use dhash_map::MapConfig;
    /// #
    /// let mut table = HashTable::with_config(MapConfig::new(1, 0.75).unwrap());
    /// match table.entry(42, |&v: &u64| v == 42) {
    ///     Entry::Vacant(entry) => {
    ///         *entry.insert(42) += 0;
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// // One value in one slot would exceed the load factor, so the table grew.
    /// assert_eq!(table.capacity(), 3);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        let index = table.prepare_insert(self.hash, self.index);
        if matches!(table.slots[index], Slot::Tombstone) {
            table.tombstones -= 1;
        }
        table.populated += 1;
        table.slots[index].occupy(self.hash, value)
    }
}

/// An occupied entry in the hash table.
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        match &self.table.slots[self.index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("occupied entry points at a live slot"),
        }
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        match &mut self.table.slots[self.index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("occupied entry points at a live slot"),
        }
    }

    /// Converts the entry into a mutable reference with the lifetime of the
    /// table borrow.
    pub fn into_mut(self) -> &'a mut V {
        match &mut self.table.slots[self.index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("occupied entry points at a live slot"),
        }
    }

    /// Removes the value, leaving a tombstone.
    pub fn remove(self) -> V {
        self.table.populated -= 1;
        self.table.tombstones += 1;
        match mem::replace(&mut self.table.slots[self.index], Slot::Tombstone) {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("occupied entry points at a live slot"),
        }
    }
}

/// An iterator over the values in a [`HashTable`], in slot order.
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.slots.by_ref().find_map(Slot::value)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// A mutable iterator over the values in a [`HashTable`].
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.slots.by_ref().find_map(Slot::value_mut)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}
impl<V> FusedIterator for IterMut<'_, V> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// Every slot it passes, tombstones included, is reset to empty.
pub struct Drain<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
    remaining: usize,
}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        for _ in self {}
    }
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { value, .. } = mem::replace(slot, Slot::Empty) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}
impl<V> FusedIterator for Drain<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    slots: alloc::vec::IntoIter<Slot<V>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { value, .. } = slot {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}
