// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::ops::Index;

use super::Value;
use crate::{ecmascript::execution::Agent, heap::StringIndex};

/// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
///
/// Strings are interned in the agent's heap: two strings with the same
/// contents always have the same index, so equality is index equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct String(pub(crate) StringIndex);

#[derive(Debug, Clone)]
pub struct StringHeapData {
    pub(crate) data: Box<str>,
}

impl String {
    pub fn from_str(agent: &mut Agent, data: &str) -> Self {
        agent.heap.intern_string(data)
    }

    pub fn from_string(agent: &mut Agent, data: std::string::String) -> Self {
        agent.heap.intern_string(&data)
    }

    pub fn as_str(self, agent: &Agent) -> &str {
        &agent[self]
    }

    pub fn is_empty(self, agent: &Agent) -> bool {
        agent[self].is_empty()
    }

    /// Length in UTF-16 code units, which is what `length` reports.
    pub fn utf16_len(self, agent: &Agent) -> usize {
        agent[self].encode_utf16().count()
    }

    /// The code unit at `index` as a one-unit string. Lone surrogate halves
    /// are replaced with U+FFFD.
    pub fn code_unit_at(self, agent: &mut Agent, index: usize) -> Option<String> {
        let unit = agent[self].encode_utf16().nth(index)?;
        let data = std::string::String::from_utf16_lossy(&[unit]);
        Some(String::from_string(agent, data))
    }

    pub fn concat(agent: &mut Agent, strings: &[String]) -> String {
        let mut data = std::string::String::new();
        for string in strings {
            data.push_str(&agent[*string]);
        }
        String::from_string(agent, data)
    }

    pub fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl Index<String> for Agent {
    type Output = str;

    fn index(&self, index: String) -> &Self::Output {
        &self.heap.strings[index.0.into_index()].data
    }
}
