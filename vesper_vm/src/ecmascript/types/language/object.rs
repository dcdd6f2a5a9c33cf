// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod data;
mod internal_methods;
mod property_key;

use core::ops::{Index, IndexMut};

pub use data::{ObjectHeapData, ObjectKind, PropertyEntry, PropertySlot};
pub use property_key::PropertyKey;

use super::Value;
use crate::{ecmascript::execution::Agent, heap::ObjectIndex};

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Object(pub(crate) ObjectIndex);

impl Object {
    pub fn into_value(self) -> Value {
        Value::Object(self)
    }

    /// True if the object has a \[\[Call]] internal method.
    pub fn is_callable(self, agent: &Agent) -> bool {
        matches!(
            agent[self].kind,
            ObjectKind::BuiltinFunction(_) | ObjectKind::ECMAScriptFunction(_)
        )
    }

    /// True if the object has a \[\[Construct]] internal method.
    pub fn is_constructor(self, agent: &Agent) -> bool {
        match &agent[self].kind {
            ObjectKind::BuiltinFunction(data) => data.is_constructor(),
            ObjectKind::ECMAScriptFunction(data) => data.is_constructor(),
            _ => false,
        }
    }
}

impl Index<Object> for Agent {
    type Output = ObjectHeapData;

    fn index(&self, index: Object) -> &Self::Output {
        &self.heap.objects[index.0.into_index()]
    }
}

impl IndexMut<Object> for Agent {
    fn index_mut(&mut self, index: Object) -> &mut Self::Output {
        &mut self.heap.objects[index.0.into_index()]
    }
}
