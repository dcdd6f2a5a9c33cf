// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod property_descriptor;
mod reference;

pub use property_descriptor::PropertyDescriptor;
pub use reference::{
    Base, Reference, get_this_value, get_value, initialize_referenced_binding,
    make_super_property_reference, put_value,
};
