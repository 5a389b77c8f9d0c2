use crate::error::MapError;

/// Slot count used by [`MapConfig::default`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor used by [`MapConfig::default`].
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Validated construction parameters for a [`HashTable`](crate::HashTable)
/// or [`HashMap`](crate::HashMap).
///
/// `capacity` is the initial number of slots. `load_factor` is the fraction
/// of slots that may be filled before the table grows to `2 * capacity + 1`
/// slots.
///
/// # Examples
///
/// ```rust
/// use dhash_map::MapConfig;
///
/// let config = MapConfig::new(32, 0.5).unwrap();
/// assert_eq!(config.capacity(), 32);
///
/// assert!(MapConfig::new(0, 0.5).is_err());
/// assert!(MapConfig::new(8, f32::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    capacity: usize,
    load_factor: f32,
}

impl MapConfig {
    /// Creates a configuration, rejecting a zero capacity and any load factor
    /// outside `(0, 1]`.
    ///
    /// Load factors so small that no table of at most `isize::MAX` slots
    /// could hold one entry are rejected as well.
    pub fn new(capacity: usize, load_factor: f32) -> Result<Self, MapError> {
        Ok(Self {
            capacity: validate_capacity(capacity)?,
            load_factor: validate_load_factor(load_factor)?,
        })
    }

    /// Returns a copy with a different initial capacity.
    pub fn with_capacity(self, capacity: usize) -> Result<Self, MapError> {
        Self::new(capacity, self.load_factor)
    }

    /// Returns a copy with a different load factor.
    pub fn with_load_factor(self, load_factor: f32) -> Result<Self, MapError> {
        Self::new(self.capacity, load_factor)
    }

    /// Initial number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum fill ratio before growth.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, MapError> {
    if capacity == 0 {
        return Err(MapError::InvalidCapacity(capacity));
    }
    Ok(capacity)
}

// Above 1.0 the table could fill every slot and insertion would never find a
// free one. Below the minimum no addressable slot count holds a single entry.
fn validate_load_factor(load_factor: f32) -> Result<f32, MapError> {
    if !load_factor.is_finite() || load_factor <= 0.0 || load_factor > 1.0 {
        return Err(MapError::InvalidLoadFactor(load_factor));
    }
    if f64::from(load_factor) * isize::MAX as f64 <= 1.0 {
        return Err(MapError::InvalidLoadFactor(load_factor));
    }
    Ok(load_factor)
}
