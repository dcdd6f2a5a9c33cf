// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.1 Environment Records](https://tc39.es/ecma262/#sec-environment-records)
//!
//! Environment Record is a specification type used to define the association of
//! Identifiers to specific variables and functions, based upon the lexical
//! nesting structure of ECMAScript code. Usually an Environment Record is
//! associated with some specific syntactic structure of ECMAScript code such as
//! a FunctionDeclaration, a BlockStatement, or a Catch clause of a
//! TryStatement. Each time such code is evaluated, a new Environment Record is
//! created to record the identifier bindings that are created by that code.
//!
//! Every Environment Record has an \[\[OuterEnv\]\] field, which is either null or
//! a reference to an outer Environment Record. This is used to model the
//! logical nesting of Environment Record values. The outer reference of an
//! (inner) Environment Record is a reference to the Environment Record that
//! logically surrounds the inner Environment Record. An outer Environment
//! Record may, of course, have its own outer Environment Record. An Environment
//! Record may serve as the outer environment for multiple inner Environment
//! Records. For example, if a FunctionDeclaration contains two nested
//! FunctionDeclarations then the Environment Records of each of the nested
//! functions will have as their outer Environment Record the Environment Record
//! of the current evaluation of the surrounding function.
//!
//! Records live in arenas on the agent's heap and are shared by index, so any
//! number of closures and execution contexts can alias the same record.

use core::{
    marker::PhantomData,
    num::NonZeroU32,
    ops::{Index, IndexMut},
};

mod declarative_environment;
mod function_environment;
mod global_environment;
mod module_environment;
mod object_environment;

pub use declarative_environment::{DeclarativeEnvironmentRecord, new_declarative_environment};
pub use function_environment::{
    FunctionEnvironmentRecord, ThisBindingStatus, new_function_environment,
};
pub use global_environment::{GlobalEnvironmentRecord, new_global_environment};
pub use module_environment::{ModuleEnvironmentRecord, new_module_environment};
pub use object_environment::{ObjectEnvironmentRecord, new_object_environment};

use super::{Agent, JsError, JsResult, agent::ExceptionType};
use crate::ecmascript::types::{Object, Reference, String, Value};

/// ### [\[\[OuterEnv\]\]](https://tc39.es/ecma262/#sec-environment-records)
///
/// Every Environment Record has an \[\[OuterEnv\]\] field, which is either
/// null or a reference to an outer Environment Record.
pub(crate) type OuterEnv = Option<EnvironmentIndex>;

macro_rules! create_environment_index {
    ($name: ident, $index: ident, $entry: ident, $variant: ident) => {
        /// An index used to access an environment from [`Environments`].
        /// Internally, we store the index in a [`NonZeroU32`] with the index
        /// plus one. This allows us to not use an empty value in storage for
        /// the zero index while still saving room for a [`None`] value when
        /// stored in an [`Option`].
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $index(NonZeroU32, PhantomData<fn() -> $name>);

        impl core::fmt::Debug for $index {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}({:?})", stringify!($index), self.into_index())
            }
        }

        impl $index {
            /// Creates a new index from a u32.
            ///
            /// ## Panics
            /// - If the value is equal to 0.
            pub(crate) const fn from_u32(value: u32) -> Self {
                match NonZeroU32::new(value) {
                    Some(value) => Self(value, PhantomData),
                    None => panic!("environment index cannot be zero"),
                }
            }

            pub(crate) const fn into_index(self) -> usize {
                self.0.get() as usize - 1
            }

            pub(crate) fn last(vec: &[$name]) -> Self {
                Self::from_u32(vec.len() as u32)
            }
        }

        impl Index<$index> for Agent {
            type Output = $name;

            fn index(&self, index: $index) -> &Self::Output {
                &self.heap.environments.$entry[index.into_index()]
            }
        }

        impl IndexMut<$index> for Agent {
            fn index_mut(&mut self, index: $index) -> &mut Self::Output {
                &mut self.heap.environments.$entry[index.into_index()]
            }
        }

        impl From<$index> for EnvironmentIndex {
            fn from(value: $index) -> Self {
                EnvironmentIndex::$variant(value)
            }
        }
    };
}

create_environment_index!(
    DeclarativeEnvironmentRecord,
    DeclarativeEnvironmentIndex,
    declarative,
    Declarative
);
create_environment_index!(
    FunctionEnvironmentRecord,
    FunctionEnvironmentIndex,
    function,
    Function
);
create_environment_index!(
    GlobalEnvironmentRecord,
    GlobalEnvironmentIndex,
    global,
    Global
);
create_environment_index!(
    ObjectEnvironmentRecord,
    ObjectEnvironmentIndex,
    object,
    Object
);
create_environment_index!(
    ModuleEnvironmentRecord,
    ModuleEnvironmentIndex,
    module,
    Module
);

/// ### [9.1.1 The Environment Record Type Hierarchy](https://tc39.es/ecma262/#sec-the-environment-record-type-hierarchy)
///
/// Environment Records can be thought of as existing in a simple
/// object-oriented hierarchy where Environment Record is an abstract class
/// with three concrete subclasses: Declarative Environment Record, Object
/// Environment Record, and Global Environment Record. Function Environment
/// Records and Module Environment Records are subclasses of Declarative
/// Environment Record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EnvironmentIndex {
    // Leave 0 for None option
    Declarative(DeclarativeEnvironmentIndex) = 1,
    Function(FunctionEnvironmentIndex),
    Global(GlobalEnvironmentIndex),
    Object(ObjectEnvironmentIndex),
    Module(ModuleEnvironmentIndex),
}

impl EnvironmentIndex {
    pub fn get_outer_env(self, agent: &Agent) -> OuterEnv {
        match self {
            EnvironmentIndex::Declarative(index) => agent[index].outer_env(),
            EnvironmentIndex::Function(index) => index.get_outer_env(agent),
            EnvironmentIndex::Global(_) => None,
            EnvironmentIndex::Object(index) => agent[index].outer_env(),
            EnvironmentIndex::Module(index) => index.get_outer_env(agent),
        }
    }

    /// ### HasBinding(N)
    ///
    /// Determine if an Environment Record has a binding for the String value
    /// N. Return true if it does and false if it does not.
    pub fn has_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        match self {
            EnvironmentIndex::Declarative(index) => Ok(index.has_binding(agent, name)),
            EnvironmentIndex::Function(index) => Ok(index.has_binding(agent, name)),
            EnvironmentIndex::Global(index) => index.has_binding(agent, name),
            EnvironmentIndex::Object(index) => index.has_binding(agent, name),
            EnvironmentIndex::Module(index) => Ok(index.has_binding(agent, name)),
        }
    }

    /// ### CreateMutableBinding(N, D)
    ///
    /// Create a new but uninitialized mutable binding in an Environment
    /// Record. The String value N is the text of the bound name. If the
    /// Boolean argument D is true the binding may be subsequently deleted.
    /// Creating a binding that already exists is a TypeError.
    pub fn create_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        match self {
            EnvironmentIndex::Declarative(index) => {
                index.create_mutable_binding(agent, name, is_deletable)
            }
            EnvironmentIndex::Function(index) => {
                index.create_mutable_binding(agent, name, is_deletable)
            }
            EnvironmentIndex::Global(index) => {
                index.create_mutable_binding(agent, name, is_deletable)
            }
            EnvironmentIndex::Object(index) => {
                index.create_mutable_binding(agent, name, is_deletable)
            }
            EnvironmentIndex::Module(index) => {
                index.create_mutable_binding(agent, name, is_deletable)
            }
        }
    }

    /// ### CreateImmutableBinding(N, S)
    ///
    /// Create a new but uninitialized immutable binding in an Environment
    /// Record. The String value N is the text of the bound name. If S is true
    /// then attempts to set it after it has been initialized will always throw
    /// an exception, regardless of the strict mode setting of operations that
    /// reference that binding.
    pub fn create_immutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<()> {
        match self {
            EnvironmentIndex::Declarative(index) => {
                index.create_immutable_binding(agent, name, is_strict)
            }
            EnvironmentIndex::Function(index) => {
                index.create_immutable_binding(agent, name, is_strict)
            }
            EnvironmentIndex::Global(index) => {
                index.create_immutable_binding(agent, name, is_strict)
            }
            EnvironmentIndex::Object(index) => {
                index.create_immutable_binding(agent, name, is_strict)
            }
            EnvironmentIndex::Module(index) => {
                index.create_immutable_binding(agent, name, is_strict)
            }
        }
    }

    /// ### InitializeBinding(N, V)
    ///
    /// Set the value of an already existing but uninitialized binding in an
    /// Environment Record. The String value N is the text of the bound name.
    /// V is the value for the binding and is a value of any ECMAScript
    /// language type.
    pub fn initialize_binding(self, agent: &mut Agent, name: String, value: Value) -> JsResult<()> {
        match self {
            EnvironmentIndex::Declarative(index) => {
                index.initialize_binding(agent, name, value);
                Ok(())
            }
            EnvironmentIndex::Function(index) => {
                index.initialize_binding(agent, name, value);
                Ok(())
            }
            EnvironmentIndex::Global(index) => index.initialize_binding(agent, name, value),
            EnvironmentIndex::Object(index) => index.initialize_binding(agent, name, value),
            EnvironmentIndex::Module(index) => {
                index.initialize_binding(agent, name, value);
                Ok(())
            }
        }
    }

    /// ### SetMutableBinding(N, V, S)
    ///
    /// Set the value of an already existing mutable binding in an Environment
    /// Record. The String value N is the text of the bound name. V is the
    /// value for the binding and may be a value of any ECMAScript language
    /// type. S is a Boolean flag. If S is true and the binding cannot be set
    /// throw a TypeError exception.
    pub fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_strict: bool,
    ) -> JsResult<()> {
        match self {
            EnvironmentIndex::Declarative(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
            EnvironmentIndex::Function(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
            EnvironmentIndex::Global(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
            EnvironmentIndex::Object(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
            EnvironmentIndex::Module(index) => {
                index.set_mutable_binding(agent, name, value, is_strict)
            }
        }
    }

    /// ### GetBindingValue(N, S)
    ///
    /// Returns the value of an already existing binding from an Environment
    /// Record. The String value N is the text of the bound name. S is used to
    /// identify references originating in strict mode code or that otherwise
    /// require strict mode reference semantics. If S is true and the binding
    /// does not exist throw a ReferenceError exception. If the binding exists
    /// but is uninitialized a ReferenceError is thrown, regardless of the
    /// value of S.
    pub fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        match self {
            EnvironmentIndex::Declarative(index) => index.get_binding_value(agent, name, is_strict),
            EnvironmentIndex::Function(index) => index.get_binding_value(agent, name, is_strict),
            EnvironmentIndex::Global(index) => index.get_binding_value(agent, name, is_strict),
            EnvironmentIndex::Object(index) => index.get_binding_value(agent, name, is_strict),
            EnvironmentIndex::Module(index) => index.get_binding_value(agent, name, is_strict),
        }
    }

    /// ### DeleteBinding(N)
    ///
    /// Delete a binding from an Environment Record. The String value N is the
    /// text of the bound name. If a binding for N exists, remove the binding
    /// and return true. If the binding exists but cannot be removed return
    /// false. If the binding does not exist return true.
    pub fn delete_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        match self {
            EnvironmentIndex::Declarative(index) => Ok(index.delete_binding(agent, name)),
            EnvironmentIndex::Function(index) => Ok(index.delete_binding(agent, name)),
            EnvironmentIndex::Global(index) => index.delete_binding(agent, name),
            EnvironmentIndex::Object(index) => index.delete_binding(agent, name),
            EnvironmentIndex::Module(index) => Ok(index.delete_binding(agent, name)),
        }
    }

    /// ### HasThisBinding()
    ///
    /// Determine if an Environment Record establishes a this binding. Return
    /// true if it does and false if it does not.
    pub fn has_this_binding(self, agent: &Agent) -> bool {
        match self {
            EnvironmentIndex::Declarative(_) | EnvironmentIndex::Object(_) => false,
            EnvironmentIndex::Function(index) => index.has_this_binding(agent),
            EnvironmentIndex::Global(_) | EnvironmentIndex::Module(_) => true,
        }
    }

    /// ### HasSuperBinding()
    ///
    /// Determine if an Environment Record establishes a super method binding.
    /// Return true if it does and false if it does not.
    pub fn has_super_binding(self, agent: &Agent) -> bool {
        match self {
            EnvironmentIndex::Function(index) => index.has_super_binding(agent),
            _ => false,
        }
    }

    /// ### WithBaseObject()
    ///
    /// If this Environment Record is associated with a with statement, return
    /// the with object. Otherwise, return undefined.
    pub fn with_base_object(self, agent: &Agent) -> Option<Object> {
        match self {
            EnvironmentIndex::Object(index) => agent[index].with_base_object(),
            _ => None,
        }
    }

    /// ### GetThisBinding()
    ///
    /// Only valid on records whose HasThisBinding() is true.
    pub fn get_this_binding(self, agent: &mut Agent) -> JsResult<Value> {
        match self {
            EnvironmentIndex::Function(index) => index.get_this_binding(agent),
            EnvironmentIndex::Global(index) => Ok(agent[index].get_this_binding().into_value()),
            EnvironmentIndex::Module(_) => Ok(Value::Undefined),
            EnvironmentIndex::Declarative(_) | EnvironmentIndex::Object(_) => {
                panic!("GetThisBinding on an environment without a this binding")
            }
        }
    }
}

/// Storage for every environment record of an agent.
#[derive(Debug, Default)]
pub struct Environments {
    pub(crate) declarative: Vec<DeclarativeEnvironmentRecord>,
    pub(crate) function: Vec<FunctionEnvironmentRecord>,
    pub(crate) global: Vec<GlobalEnvironmentRecord>,
    pub(crate) object: Vec<ObjectEnvironmentRecord>,
    pub(crate) module: Vec<ModuleEnvironmentRecord>,
}

impl Environments {
    pub(crate) fn push_declarative_environment(
        &mut self,
        env: DeclarativeEnvironmentRecord,
    ) -> DeclarativeEnvironmentIndex {
        self.declarative.push(env);
        DeclarativeEnvironmentIndex::last(&self.declarative)
    }

    pub(crate) fn push_function_environment(
        &mut self,
        env: FunctionEnvironmentRecord,
    ) -> FunctionEnvironmentIndex {
        self.function.push(env);
        FunctionEnvironmentIndex::last(&self.function)
    }

    pub(crate) fn push_global_environment(
        &mut self,
        env: GlobalEnvironmentRecord,
    ) -> GlobalEnvironmentIndex {
        self.global.push(env);
        GlobalEnvironmentIndex::last(&self.global)
    }

    pub(crate) fn push_object_environment(
        &mut self,
        env: ObjectEnvironmentRecord,
    ) -> ObjectEnvironmentIndex {
        self.object.push(env);
        ObjectEnvironmentIndex::last(&self.object)
    }

    pub(crate) fn push_module_environment(
        &mut self,
        env: ModuleEnvironmentRecord,
    ) -> ModuleEnvironmentIndex {
        self.module.push(env);
        ModuleEnvironmentIndex::last(&self.module)
    }
}

pub(crate) fn throw_already_declared(agent: &mut Agent, name: String) -> JsError {
    let message = format!("Identifier '{}' has already been declared", name.as_str(agent));
    agent.throw_exception(ExceptionType::TypeError, message)
}

pub(crate) fn throw_not_defined(agent: &mut Agent, name: String) -> JsError {
    let message = format!("{} is not defined", name.as_str(agent));
    agent.throw_exception(ExceptionType::ReferenceError, message)
}

/// ### [9.1.2.1 GetIdentifierReference ( env, name, strict )](https://tc39.es/ecma262/#sec-getidentifierreference)
///
/// The abstract operation GetIdentifierReference takes arguments env (an
/// Environment Record or null), name (a String), and strict (a Boolean) and
/// returns either a normal completion containing a Reference Record or a
/// throw completion.
pub fn get_identifier_reference(
    agent: &mut Agent,
    env: Option<EnvironmentIndex>,
    name: String,
    strict: bool,
) -> JsResult<Reference> {
    let mut env = env;
    loop {
        // 1. If env is null, then
        let Some(current) = env else {
            // a. Return the Reference Record {
            //      [[Base]]: UNRESOLVABLE, [[ReferencedName]]: name,
            //      [[Strict]]: strict, [[ThisValue]]: EMPTY
            //    }.
            return Ok(Reference::new_unresolvable(name, strict));
        };

        // 2. Let exists be ? env.HasBinding(name).
        // 3. If exists is true, then
        if current.has_binding(agent, name)? {
            // a. Return the Reference Record {
            //      [[Base]]: env, [[ReferencedName]]: name,
            //      [[Strict]]: strict, [[ThisValue]]: EMPTY
            //    }.
            return Ok(Reference::new_environment(current, name, strict));
        }

        // 4. Else,
        // a. Let outer be env.[[OuterEnv]].
        // b. Return ? GetIdentifierReference(outer, name, strict).
        env = current.get_outer_env(agent);
    }
}
