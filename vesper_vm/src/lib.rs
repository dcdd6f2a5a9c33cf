// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Execution core of the Vesper ECMAScript runtime: agents, execution
//! contexts, environment records, references, realms, job queues and the
//! abstract type conversions. Parsing and evaluation live outside of this
//! crate; an evaluator drives the core through the public operations.

pub mod ecmascript;
pub mod heap;
