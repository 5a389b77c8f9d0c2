#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Borrow-free iteration with concurrent-modification detection.
pub mod cursor;

/// Construction parameters and their validation.
pub mod config;

pub mod contract;

/// Error types.
pub mod error;

/// A HashMap implementation using double hashing.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers, plus the
/// functional update operators of [`MutableMap`](crate::contract::MutableMap).
pub mod hash_map;

/// The open-addressing table underneath [`HashMap`].
///
/// Operates on precomputed hashes and caller-supplied equality, so it can be
/// used directly to build other keyed collections.
pub mod hash_table;

pub mod views;

pub use config::MapConfig;
pub use contract::MutableMap;
pub use cursor::Cursor;
pub use error::ErrorKind;
pub use error::MapError;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;

        /// Fixed-seed builder for hashing whole maps, so that equal maps hash
        /// equally no matter which hasher each of them uses.
        pub(crate) fn entry_hash_builder() -> foldhash::fast::FixedState {
            foldhash::fast::FixedState::with_seed(0)
        }
    } else if #[cfg(feature = "std")] {
        /// Hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::hash::RandomState;

        /// Fixed-seed builder for hashing whole maps, so that equal maps hash
        /// equally no matter which hasher each of them uses.
        pub(crate) fn entry_hash_builder() -> core::hash::BuildHasherDefault<std::hash::DefaultHasher> {
            core::hash::BuildHasherDefault::default()
        }
    } else {
        compile_error!("dhash-map needs either the `foldhash` or the `std` feature for a default hasher");
    }
}
