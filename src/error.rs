use thiserror::Error;

/// Errors reported by [`HashMap`](crate::HashMap) and [`MapConfig`](crate::MapConfig).
///
/// Missing keys and failed preconditions of conditional operations are not
/// errors; those return `None` or `false`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MapError {
    /// The requested slot count was zero.
    #[error("invalid capacity {0}: a map needs at least one slot")]
    InvalidCapacity(usize),
    /// The load factor was NaN, infinite, not positive or above one.
    #[error("invalid load factor {0}: expected a fraction in (0, 1]")]
    InvalidLoadFactor(f32),
    /// A mapping function produced no value where one was required.
    #[error("mapping function produced no value")]
    AbsentValue,
    /// The map changed size while it was being iterated.
    #[error("map was modified during iteration: expected {expected} entries, found {found}")]
    ConcurrentModification {
        /// Size captured when the iteration started.
        expected: usize,
        /// Size observed at the failing step.
        found: usize,
    },
}

/// Coarse classification of a [`MapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied argument or computed value was rejected. The
    /// operation had no effect.
    InvalidArgument,
    /// A structural change was detected mid-iteration. Effects applied
    /// before detection are kept.
    ConcurrentModification,
}

impl MapError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapError::InvalidCapacity(_)
            | MapError::InvalidLoadFactor(_)
            | MapError::AbsentValue => ErrorKind::InvalidArgument,
            MapError::ConcurrentModification { .. } => ErrorKind::ConcurrentModification,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(MapError::InvalidCapacity(0).kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            MapError::InvalidLoadFactor(f32::NAN).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(MapError::AbsentValue.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            MapError::ConcurrentModification {
                expected: 2,
                found: 3
            }
            .kind(),
            ErrorKind::ConcurrentModification
        );
    }

    #[test]
    fn messages() {
        assert_eq!(
            MapError::InvalidCapacity(0).to_string(),
            "invalid capacity 0: a map needs at least one slot"
        );
        assert_eq!(
            MapError::ConcurrentModification {
                expected: 2,
                found: 3
            }
            .to_string(),
            "map was modified during iteration: expected 2 entries, found 3"
        );
    }
}
