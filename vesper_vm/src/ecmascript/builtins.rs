// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [10 Ordinary and Exotic Objects Behaviours](https://tc39.es/ecma262/#sec-ordinary-and-exotic-objects-behaviours)
//!
//! Also the small set of standard built-in objects every realm carries.

pub(crate) mod builders;
mod builtin_function;
pub mod ecmascript_function;
pub mod error;
pub mod fundamental_objects;
pub mod ordinary;
pub mod primitive_objects;

pub use builtin_function::{
    ArgumentsList, Behaviour, BuiltinFunctionArgs, BuiltinFunctionHeapData, ConstructorFn,
    NativeClosure, RegularFn, builtin_call_or_construct, create_builtin_function,
};
pub use ecmascript_function::{ECMAScriptFunctionHeapData, FunctionBody, ThisMode};
