// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::ops::Index;

use super::{String, Value};
use crate::{ecmascript::execution::Agent, heap::SymbolIndex};

/// ### [6.1.5 The Symbol Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-symbol-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) SymbolIndex);

#[derive(Debug, Clone)]
pub struct SymbolHeapData {
    /// ### \[\[Description]]
    pub(crate) descriptor: Option<String>,
}

impl Symbol {
    pub fn new(agent: &mut Agent, descriptor: Option<String>) -> Self {
        agent.heap.create_symbol(descriptor)
    }

    pub fn description(self, agent: &Agent) -> Option<String> {
        agent[self].descriptor
    }

    /// ### [20.4.3.3.1 SymbolDescriptiveString ( sym )](https://tc39.es/ecma262/#sec-symboldescriptivestring)
    pub fn descriptive_string(self, agent: &mut Agent) -> String {
        // 1. Let desc be sym's [[Description]] value.
        // 2. If desc is undefined, set desc to the empty String.
        let description = self
            .description(agent)
            .map_or("", |description| description.as_str(agent));
        // 3. Assert: desc is a String.
        // 4. Return the string-concatenation of "Symbol(", desc, and ")".
        let data = format!("Symbol({description})");
        String::from_string(agent, data)
    }

    pub fn into_value(self) -> Value {
        Value::Symbol(self)
    }
}

impl Index<Symbol> for Agent {
    type Output = SymbolHeapData;

    fn index(&self, index: Symbol) -> &Self::Output {
        &self.heap.symbols[index.0.into_index()]
    }
}
