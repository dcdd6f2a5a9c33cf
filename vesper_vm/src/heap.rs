// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-agent storage. Every heap-allocated ECMAScript value and every
//! environment record lives in one of the vectors below and is addressed by
//! an index newtype. Entries are never freed while the owning [`Agent`]
//! lives; dropping the agent releases everything at once.
//!
//! [`Agent`]: crate::ecmascript::execution::Agent

mod indexes;

use ahash::AHashMap;

pub use indexes::{
    BaseIndex, ModuleIndex, ObjectIndex, RealmIndex, ScriptIndex, StringIndex, SymbolIndex,
};

use crate::ecmascript::{
    execution::{Environments, RealmRecord},
    scripts_and_modules::{ModuleRecord, ScriptRecord},
    types::{
        Object, ObjectHeapData, PropertyKey, String, StringHeapData, Symbol, SymbolHeapData,
    },
};

#[derive(Debug)]
pub struct Heap {
    pub(crate) environments: Environments,
    pub(crate) objects: Vec<ObjectHeapData>,
    pub(crate) strings: Vec<StringHeapData>,
    /// Interned string contents. Two equal strings always share an index.
    string_table: AHashMap<Box<str>, String>,
    pub(crate) symbols: Vec<SymbolHeapData>,
    pub(crate) realms: Vec<RealmRecord>,
    pub(crate) scripts: Vec<ScriptRecord>,
    pub(crate) modules: Vec<ModuleRecord>,
}

/// Well-known symbols are allocated first, in this order, so their indexes
/// are constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum WellKnownSymbolIndexes {
    ToPrimitive,
    ToStringTag,
    Unscopables,
}

impl WellKnownSymbolIndexes {
    const ALL: [Self; 3] = [Self::ToPrimitive, Self::ToStringTag, Self::Unscopables];

    const fn description(self) -> &'static str {
        match self {
            Self::ToPrimitive => "Symbol.toPrimitive",
            Self::ToStringTag => "Symbol.toStringTag",
            Self::Unscopables => "Symbol.unscopables",
        }
    }
}

impl From<WellKnownSymbolIndexes> for Symbol {
    fn from(value: WellKnownSymbolIndexes) -> Self {
        Symbol(SymbolIndex::from_index(value as usize))
    }
}

impl From<WellKnownSymbolIndexes> for PropertyKey {
    fn from(value: WellKnownSymbolIndexes) -> Self {
        PropertyKey::Symbol(value.into())
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    pub fn new() -> Self {
        let mut heap = Self {
            environments: Environments::default(),
            objects: Vec::with_capacity(256),
            strings: Vec::with_capacity(256),
            string_table: AHashMap::with_capacity(256),
            symbols: Vec::with_capacity(16),
            realms: Vec::with_capacity(1),
            scripts: Vec::new(),
            modules: Vec::new(),
        };
        for symbol in WellKnownSymbolIndexes::ALL {
            let descriptor = heap.intern_string(symbol.description());
            heap.symbols.push(SymbolHeapData {
                descriptor: Some(descriptor),
            });
        }
        heap
    }

    /// Returns the interned string for `data`, allocating it on first use.
    pub(crate) fn intern_string(&mut self, data: &str) -> String {
        if let Some(string) = self.string_table.get(data) {
            return *string;
        }
        self.strings.push(StringHeapData {
            data: data.into(),
        });
        let string = String(StringIndex::last(&self.strings));
        self.string_table.insert(data.into(), string);
        string
    }

    pub(crate) fn create_object(&mut self, data: ObjectHeapData) -> Object {
        self.objects.push(data);
        Object(ObjectIndex::last(&self.objects))
    }

    pub(crate) fn create_symbol(&mut self, descriptor: Option<String>) -> Symbol {
        self.symbols.push(SymbolHeapData { descriptor });
        Symbol(SymbolIndex::last(&self.symbols))
    }
}
