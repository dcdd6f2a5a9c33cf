// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{
    DeclarativeEnvironmentIndex, FunctionEnvironmentIndex, OuterEnv, new_declarative_environment,
};
use crate::ecmascript::{
    builtins::ecmascript_function::{ThisMode, ecmascript_function_data},
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{Object, String, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThisBindingStatus {
    /// Function is an ArrowFunction and does not have a local `this` value.
    Lexical,
    /// Function is a normal function and has a bound `this` value.
    Initialized,
    /// Function is a normal function and does not have a bound `this` value.
    Uninitialized,
}

/// ### [9.1.1.3 Function Environment Records](https://tc39.es/ecma262/#sec-function-environment-records)
///
/// A Function Environment Record is a Declarative Environment Record that is
/// used to represent the top-level scope of a function and, if the function is
/// not an ArrowFunction, provides a this binding. If a function is not an
/// ArrowFunction function and references super, its Function Environment
/// Record also contains the state that is used to perform super method
/// invocations from within the function.
#[derive(Debug, Clone)]
pub struct FunctionEnvironmentRecord {
    /// ### \[\[ThisValue\]\]
    ///
    /// This is the this value used for this invocation of the function.
    pub(crate) this_value: Option<Value>,

    /// ### \[\[ThisBindingStatus\]\]
    ///
    /// If the value is LEXICAL, this is an ArrowFunction and does not have a
    /// local this value.
    pub(crate) this_binding_status: ThisBindingStatus,

    /// ### \[\[FunctionObject\]\]
    ///
    /// The function object whose invocation caused this Environment Record to
    /// be created.
    pub(crate) function_object: Object,

    /// ### \[\[NewTarget\]\]
    ///
    /// If this Environment Record was created by the \[\[Construct\]\]
    /// internal method, \[\[NewTarget\]\] is the value of the
    /// \[\[Construct\]\] newTarget parameter. Otherwise, its value is
    /// undefined.
    pub(crate) new_target: Option<Object>,

    /// Function Environment Records support all of the Declarative
    /// Environment Record methods and share the same specifications for all
    /// of those methods except for HasThisBinding and HasSuperBinding. The
    /// bindings themselves live in this embedded record.
    pub(crate) declarative_environment: DeclarativeEnvironmentIndex,
}

/// ### [9.1.2.4 NewFunctionEnvironment ( F, newTarget )](https://tc39.es/ecma262/#sec-newfunctionenvironment)
///
/// The abstract operation NewFunctionEnvironment takes arguments F (an
/// ECMAScript function object) and newTarget (an Object or undefined) and
/// returns a Function Environment Record.
pub fn new_function_environment(
    agent: &mut Agent,
    f: Object,
    new_target: Option<Object>,
) -> FunctionEnvironmentIndex {
    let data = ecmascript_function_data(agent, f);
    let outer_env = data.environment;
    let this_mode = data.this_mode;
    // 1. Let env be a new Function Environment Record containing no bindings.
    // 6. Set env.[[OuterEnv]] to F.[[Environment]].
    let declarative_environment = new_declarative_environment(agent, Some(outer_env));
    // 3. If F.[[ThisMode]] is LEXICAL, set env.[[ThisBindingStatus]] to LEXICAL.
    // 4. Else, set env.[[ThisBindingStatus]] to UNINITIALIZED.
    let this_binding_status = if this_mode == ThisMode::Lexical {
        ThisBindingStatus::Lexical
    } else {
        ThisBindingStatus::Uninitialized
    };
    let env = FunctionEnvironmentRecord {
        this_value: None,
        this_binding_status,
        // 2. Set env.[[FunctionObject]] to F.
        function_object: f,
        // 5. Set env.[[NewTarget]] to newTarget.
        new_target,
        declarative_environment,
    };
    // 7. Return env.
    agent.heap.environments.push_function_environment(env)
}

impl FunctionEnvironmentIndex {
    pub(crate) fn get_outer_env(self, agent: &Agent) -> OuterEnv {
        agent[agent[self].declarative_environment].outer_env()
    }

    pub fn function_object(self, agent: &Agent) -> Object {
        agent[self].function_object
    }

    pub fn this_binding_status(self, agent: &Agent) -> ThisBindingStatus {
        agent[self].this_binding_status
    }

    /// ### \[\[NewTarget\]\]
    pub fn new_target(self, agent: &Agent) -> Option<Object> {
        agent[self].new_target
    }

    pub fn has_binding(self, agent: &Agent, name: String) -> bool {
        agent[self].declarative_environment.has_binding(agent, name)
    }

    pub fn create_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        let dcl_env = agent[self].declarative_environment;
        dcl_env.create_mutable_binding(agent, name, is_deletable)
    }

    pub fn create_immutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<()> {
        let dcl_env = agent[self].declarative_environment;
        dcl_env.create_immutable_binding(agent, name, is_strict)
    }

    pub fn initialize_binding(self, agent: &mut Agent, name: String, value: Value) {
        let dcl_env = agent[self].declarative_environment;
        dcl_env.initialize_binding(agent, name, value)
    }

    pub fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_strict: bool,
    ) -> JsResult<()> {
        let dcl_env = agent[self].declarative_environment;
        dcl_env.set_mutable_binding(agent, name, value, is_strict)
    }

    pub fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        let dcl_env = agent[self].declarative_environment;
        dcl_env.get_binding_value(agent, name, is_strict)
    }

    pub fn delete_binding(self, agent: &mut Agent, name: String) -> bool {
        let dcl_env = agent[self].declarative_environment;
        dcl_env.delete_binding(agent, name)
    }

    /// ### [9.1.1.3.1 BindThisValue ( V )](https://tc39.es/ecma262/#sec-bindthisvalue)
    ///
    /// The BindThisValue concrete method of a Function Environment Record
    /// envRec takes argument V (an ECMAScript language value) and returns
    /// either a normal completion containing UNUSED or a throw completion.
    pub fn bind_this_value(self, agent: &mut Agent, value: Value) -> JsResult<()> {
        let env_rec = &mut agent[self];
        // 1. Assert: envRec.[[ThisBindingStatus]] is not LEXICAL.
        assert_ne!(
            env_rec.this_binding_status,
            ThisBindingStatus::Lexical,
            "BindThisValue on an arrow function environment"
        );

        // 2. If envRec.[[ThisBindingStatus]] is INITIALIZED, throw a ReferenceError exception.
        if env_rec.this_binding_status == ThisBindingStatus::Initialized {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::ReferenceError,
                "Super constructor may only be called once",
            ));
        }

        // 3. Set envRec.[[ThisValue]] to V.
        env_rec.this_value = Some(value);

        // 4. Set envRec.[[ThisBindingStatus]] to INITIALIZED.
        env_rec.this_binding_status = ThisBindingStatus::Initialized;

        // 5. Return UNUSED.
        Ok(())
    }

    /// ### [9.1.1.3.2 HasThisBinding ( )](https://tc39.es/ecma262/#sec-function-environment-records-hasthisbinding)
    pub fn has_this_binding(self, agent: &Agent) -> bool {
        // 1. If envRec.[[ThisBindingStatus]] is LEXICAL, return false;
        //    otherwise, return true.
        agent[self].this_binding_status != ThisBindingStatus::Lexical
    }

    /// ### [9.1.1.3.3 HasSuperBinding ( )](https://tc39.es/ecma262/#sec-function-environment-records-hassuperbinding)
    pub fn has_super_binding(self, agent: &Agent) -> bool {
        let env_rec = &agent[self];
        // 1. If envRec.[[ThisBindingStatus]] is LEXICAL, return false.
        if env_rec.this_binding_status == ThisBindingStatus::Lexical {
            return false;
        }

        // 2. If envRec.[[FunctionObject]].[[HomeObject]] is undefined,
        //    return false; otherwise, return true.
        ecmascript_function_data(agent, env_rec.function_object)
            .home_object
            .is_some()
    }

    /// ### [9.1.1.3.4 GetThisBinding ( )](https://tc39.es/ecma262/#sec-function-environment-records-getthisbinding)
    ///
    /// The GetThisBinding concrete method of a Function Environment Record
    /// envRec takes no arguments and returns either a normal completion
    /// containing an ECMAScript language value or a throw completion.
    pub fn get_this_binding(self, agent: &mut Agent) -> JsResult<Value> {
        let env_rec = &agent[self];
        // 1. Assert: envRec.[[ThisBindingStatus]] is not LEXICAL.
        debug_assert_ne!(env_rec.this_binding_status, ThisBindingStatus::Lexical);

        // 2. If envRec.[[ThisBindingStatus]] is UNINITIALIZED, throw a ReferenceError exception.
        // 3. Return envRec.[[ThisValue]].
        let status = env_rec.this_binding_status;
        match env_rec.this_value {
            Some(value) if status == ThisBindingStatus::Initialized => Ok(value),
            _ => Err(agent.throw_exception_with_static_message(
                ExceptionType::ReferenceError,
                "Must call super constructor in derived class before accessing 'this'",
            )),
        }
    }

    /// ### [9.1.1.3.5 GetSuperBase ( )](https://tc39.es/ecma262/#sec-getsuperbase)
    ///
    /// The GetSuperBase concrete method of a Function Environment Record
    /// envRec takes no arguments and returns either a normal completion
    /// containing either an Object, null, or undefined, or a throw completion.
    pub fn get_super_base(self, agent: &mut Agent) -> JsResult<Value> {
        let env_rec = &agent[self];

        // 1. Let home be envRec.[[FunctionObject]].[[HomeObject]].
        let home = ecmascript_function_data(agent, env_rec.function_object).home_object;

        // 2. If home is undefined, return undefined.
        let Some(home) = home else {
            return Ok(Value::Undefined);
        };

        // 3. Assert: home is an ordinary object.
        // 4. Return ? home.[[GetPrototypeOf]]().
        Ok(home.internal_get_prototype_of(agent)?.into())
    }
}
