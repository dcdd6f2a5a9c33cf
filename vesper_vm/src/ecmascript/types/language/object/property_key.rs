// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    execution::Agent,
    types::{String, Symbol, Value},
};

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
///
/// A property key is either a String value or a Symbol value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(String),
    Symbol(Symbol),
}

impl PropertyKey {
    pub fn from_str(agent: &mut Agent, data: &str) -> Self {
        PropertyKey::String(String::from_str(agent, data))
    }

    pub fn into_value(self) -> Value {
        match self {
            PropertyKey::String(string) => Value::String(string),
            PropertyKey::Symbol(symbol) => Value::Symbol(symbol),
        }
    }

    pub fn as_string(self) -> Option<String> {
        match self {
            PropertyKey::String(string) => Some(string),
            PropertyKey::Symbol(_) => None,
        }
    }

    /// The key as it appears in messages: strings as-is, symbols through
    /// SymbolDescriptiveString.
    pub fn descriptive_string(self, agent: &mut Agent) -> String {
        match self {
            PropertyKey::String(string) => string,
            PropertyKey::Symbol(symbol) => symbol.descriptive_string(agent),
        }
    }

    /// An array index is a String whose numeric value is a canonical
    /// integer in the inclusive interval from +0 to 2**32 - 2.
    pub fn as_array_index(self, agent: &Agent) -> Option<u32> {
        let PropertyKey::String(string) = self else {
            return None;
        };
        let data = string.as_str(agent);
        if data.is_empty() || (data.len() > 1 && data.starts_with('0')) {
            return None;
        }
        if !data.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        data.parse::<u32>().ok().filter(|index| *index != u32::MAX)
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        PropertyKey::String(value)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(value: Symbol) -> Self {
        PropertyKey::Symbol(value)
    }
}
