use crate::error::MapError;
use crate::hash_map::HashMap;

/// An index-based iterator over a [`HashMap`] that holds no borrow between
/// steps.
///
/// The cursor remembers the next slot to look at and the map size it expects.
/// Every step first compares that size with the live one and fails with
/// [`MapError::ConcurrentModification`] on a mismatch. Only size changes are
/// detected: a removal followed by an insertion made behind the cursor's back
/// leaves the size unchanged and may rehash the table, after which the cursor
/// can skip or repeat entries without an error. Removal through
/// [`remove_current`](Cursor::remove_current) keeps the cursor valid.
///
/// A cursor must only be used with the map that created it.
///
/// # Examples
///
/// ```rust
/// # use dhash_map::HashMap;
/// # use dhash_map::MapError;
/// #
/// let mut map: HashMap<u32, u32> = (0..6).map(|k| (k, k)).collect();
///
/// // Drop the odd values while walking the map.
/// let mut cursor = map.cursor();
/// while let Some((_, v)) = cursor.next_entry(&map)? {
///     if v % 2 == 1 {
///         cursor.remove_current(&mut map)?;
///     }
/// }
/// assert_eq!(map.len(), 3);
///
/// // An insert the cursor did not make is detected on the next step.
/// let mut cursor = map.cursor();
/// cursor.next_entry(&map)?;
/// map.insert(100, 100);
/// assert!(matches!(
///     cursor.next_entry(&map),
///     Err(MapError::ConcurrentModification { expected: 3, found: 4 })
/// ));
/// # Ok::<(), MapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    next_index: usize,
    last: Option<usize>,
    expected_len: usize,
}

impl Cursor {
    pub(crate) fn new(expected_len: usize) -> Self {
        Self {
            next_index: 0,
            last: None,
            expected_len,
        }
    }

    /// The map size this cursor expects to see.
    pub fn expected_len(&self) -> usize {
        self.expected_len
    }

    fn check<K, V, S>(&self, map: &HashMap<K, V, S>) -> Result<(), MapError> {
        if map.len() != self.expected_len {
            return Err(MapError::ConcurrentModification {
                expected: self.expected_len,
                found: map.len(),
            });
        }
        Ok(())
    }

    /// Advances to the next occupied slot and returns its entry, or
    /// `Ok(None)` once every slot has been visited.
    pub fn next_entry<'m, K, V, S>(
        &mut self,
        map: &'m HashMap<K, V, S>,
    ) -> Result<Option<(&'m K, &'m V)>, MapError> {
        self.check(map)?;
        match map.table().next_occupied(self.next_index) {
            Some((index, (k, v))) => {
                self.last = Some(index);
                self.next_index = index + 1;
                Ok(Some((k, v)))
            }
            None => {
                self.last = None;
                self.next_index = map.capacity();
                Ok(None)
            }
        }
    }

    /// Mutable access to the value of the entry last returned by
    /// [`next_entry`](Cursor::next_entry).
    ///
    /// Returns `Ok(None)` if there is no such entry or it was removed.
    pub fn value_mut<'m, K, V, S>(
        &self,
        map: &'m mut HashMap<K, V, S>,
    ) -> Result<Option<&'m mut V>, MapError> {
        self.check(map)?;
        Ok(self
            .last
            .and_then(|index| map.table_mut().get_at_mut(index))
            .map(|(_, v)| v))
    }

    /// Removes the entry last returned by [`next_entry`](Cursor::next_entry)
    /// and accounts for it in the expected size.
    ///
    /// Returns `Ok(None)` if there is nothing to remove, for example when
    /// called twice in a row.
    pub fn remove_current<K, V, S>(
        &mut self,
        map: &mut HashMap<K, V, S>,
    ) -> Result<Option<(K, V)>, MapError> {
        self.check(map)?;
        let Some(index) = self.last.take() else {
            return Ok(None);
        };
        let removed = map.table_mut().take_at(index);
        if removed.is_some() {
            self.expected_len -= 1;
        }
        Ok(removed)
    }
}
