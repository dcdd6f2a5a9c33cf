// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::{
    fmt::Debug,
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::NonZeroU32,
};

use crate::ecmascript::{
    execution::RealmRecord,
    scripts_and_modules::{ModuleRecord, ScriptRecord},
    types::{ObjectHeapData, StringHeapData, SymbolHeapData},
};

/// A struct containing a non-zero index into an array or
/// vector of `T`s. Due to the non-zero value, the offset
/// in the vector is offset by one.
pub struct BaseIndex<T>(NonZeroU32, PhantomData<fn() -> T>);

const _INDEX_SIZE_IS_U32: () = assert!(size_of::<BaseIndex<()>>() == size_of::<u32>());
const _OPTION_INDEX_SIZE_IS_U32: () =
    assert!(size_of::<Option<BaseIndex<()>>>() == size_of::<u32>());

impl<T> Debug for BaseIndex<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.into_u32_index().fmt(f)
    }
}

impl<T> Clone for BaseIndex<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BaseIndex<T> {}

impl<T> PartialEq for BaseIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for BaseIndex<T> {}

impl<T> PartialOrd for BaseIndex<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for BaseIndex<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for BaseIndex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> BaseIndex<T> {
    pub(crate) const fn into_index(self) -> usize {
        self.0.get() as usize - 1
    }

    pub(crate) const fn into_u32_index(self) -> u32 {
        self.0.get() - 1
    }

    /// Creates an index pointing at the given vector offset.
    ///
    /// ## Panics
    /// - If the offset does not fit in a u32.
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index < u32::MAX as usize);
        match NonZeroU32::new(index as u32 + 1) {
            Some(value) => Self(value, PhantomData),
            None => panic!("index overflowed"),
        }
    }

    /// Index of the last element of the vector.
    pub(crate) fn last(vec: &[T]) -> Self {
        assert!(!vec.is_empty());
        Self::from_index(vec.len() - 1)
    }
}

pub type ObjectIndex = BaseIndex<ObjectHeapData>;
pub type StringIndex = BaseIndex<StringHeapData>;
pub type SymbolIndex = BaseIndex<SymbolHeapData>;
pub type RealmIndex = BaseIndex<RealmRecord>;
pub type ScriptIndex = BaseIndex<ScriptRecord>;
pub type ModuleIndex = BaseIndex<ModuleRecord>;
