// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drives function objects the way an evaluator would: bodies are native
//! closures that only talk to the agent through the public operations.

use std::rc::Rc;

use vesper_vm::ecmascript::{
    abstract_operations::{
        operations_on_objects::{call, construct, create_data_property_or_throw, get},
        type_conversion::to_number,
    },
    builtins::{
        ArgumentsList, ThisMode,
        ecmascript_function::{
            ConstructorKind, OrdinaryFunctionCreateParams, make_class_constructor,
            make_constructor, ordinary_function_create,
        },
        ordinary::ordinary_object_create,
    },
    execution::{
        Agent, DefaultHostHooks, EnvironmentIndex, JsResult, agent::Options, get_new_target,
        initialize_default_realm, resolve_this_binding,
    },
    types::{Object, PropertyKey, String, Value, get_value, put_value},
};

fn new_agent() -> Agent {
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    initialize_default_realm(&mut agent).unwrap();
    agent
}

/// Creates a function closed over the running context's lexical
/// environment.
fn create_function(
    agent: &mut Agent,
    this_mode: ThisMode,
    strict: bool,
    body: impl Fn(&mut Agent, ArgumentsList<'_>) -> JsResult<Value> + 'static,
) -> Object {
    let environment = agent.current_lexical_environment();
    let realm = agent.current_realm();
    ordinary_function_create(
        agent,
        OrdinaryFunctionCreateParams {
            function_prototype: None,
            environment,
            this_mode,
            strict,
            length: 0,
            realm,
            body: Rc::new(body),
        },
    )
}

fn error_name(agent: &mut Agent, value: Value) -> std::string::String {
    let Value::Object(error) = value else {
        panic!("expected an error object, got {value:?}");
    };
    let key = PropertyKey::from_str(agent, "name");
    let name = get(agent, error, key).unwrap();
    name.to_string(agent).unwrap().as_str(agent).to_owned()
}

#[test]
fn closures_keep_their_own_environment() {
    let mut agent = new_agent();
    // function makeCounter() { let count = 0; return () => ++count; }
    let make_counter = create_function(&mut agent, ThisMode::Global, true, |agent, _| {
        let env = agent.current_lexical_environment();
        let count = String::from_str(agent, "count");
        env.create_mutable_binding(agent, count, false)?;
        env.initialize_binding(agent, count, Value::from(0))?;
        let increment = create_function(agent, ThisMode::Lexical, true, |agent, _| {
            let count = String::from_str(agent, "count");
            let reference = agent.resolve_binding(count, true, None)?;
            let current = get_value(agent, &reference)?;
            let next = Value::from(to_number(agent, current)? + 1.0);
            put_value(agent, &reference, next)?;
            Ok(next)
        });
        Ok(increment.into_value())
    });

    let first = call(&mut agent, make_counter.into_value(), Value::Undefined, None).unwrap();
    let second = call(&mut agent, make_counter.into_value(), Value::Undefined, None).unwrap();
    for expected in 1..=3 {
        let result = call(&mut agent, first, Value::Undefined, None).unwrap();
        assert_eq!(result, Value::from(expected));
    }
    let result = call(&mut agent, second, Value::Undefined, None).unwrap();
    assert_eq!(result, Value::from(1));

    // The bindings never leak into the global scope.
    let count = String::from_str(&mut agent, "count");
    let reference = agent.resolve_binding(count, true, None).unwrap();
    assert!(reference.is_unresolvable_reference());
    assert_eq!(agent.execution_context_stack().len(), 1);
}

#[test]
fn arrow_functions_see_the_enclosing_this() {
    let mut agent = new_agent();
    // function method() { return () => this; }
    let method = create_function(&mut agent, ThisMode::Strict, true, |agent, _| {
        let arrow = create_function(agent, ThisMode::Lexical, true, |agent, _| {
            resolve_this_binding(agent)
        });
        Ok(arrow.into_value())
    });
    let receiver = ordinary_object_create(&mut agent, None);
    let arrow = call(&mut agent, method.into_value(), receiver.into_value(), None).unwrap();
    // The this argument of the arrow call itself is ignored.
    let this = call(&mut agent, arrow, Value::from(99), None).unwrap();
    assert_eq!(this, receiver.into_value());

    // A strict method called bare keeps undefined.
    let arrow = call(&mut agent, method.into_value(), Value::Undefined, None).unwrap();
    assert_eq!(call(&mut agent, arrow, Value::Null, None).unwrap(), Value::Undefined);
}

#[test]
fn sloppy_functions_coerce_this() {
    let mut agent = new_agent();
    let sloppy = create_function(&mut agent, ThisMode::Global, false, |agent, _| {
        resolve_this_binding(agent)
    });
    let global = agent.get_global_object();
    let this = call(&mut agent, sloppy.into_value(), Value::Undefined, None).unwrap();
    assert_eq!(this, global.into_value());

    let this = call(&mut agent, sloppy.into_value(), Value::from(5), None).unwrap();
    let Value::Object(wrapper) = this else {
        panic!("primitive this was not wrapped");
    };
    assert_eq!(to_number(&mut agent, wrapper.into_value()).unwrap(), 5.0);
}

#[test]
fn constructors_receive_new_target() {
    let mut agent = new_agent();
    let constructor = create_function(&mut agent, ThisMode::Strict, true, |agent, _| {
        let new_target = get_new_target(agent);
        if let Value::Object(this) = resolve_this_binding(agent)? {
            let key = PropertyKey::from_str(agent, "newTarget");
            create_data_property_or_throw(agent, this, key, Value::from(new_target))?;
        }
        Ok(Value::Boolean(new_target.is_some()))
    });
    make_constructor(&mut agent, constructor, None, None);

    let called = call(&mut agent, constructor.into_value(), Value::Undefined, None).unwrap();
    assert_eq!(called, Value::Boolean(false));

    let instance = construct(&mut agent, constructor, None, None).unwrap();
    let key = PropertyKey::from_str(&mut agent, "newTarget");
    assert_eq!(
        get(&mut agent, instance, key).unwrap(),
        constructor.into_value()
    );
    let key = PropertyKey::from_str(&mut agent, "prototype");
    let prototype = get(&mut agent, constructor, key).unwrap();
    let instance_prototype = instance.internal_get_prototype_of(&mut agent).unwrap();
    assert_eq!(Value::from(instance_prototype), prototype);
}

#[test]
fn derived_constructors_bind_this_late() {
    let mut agent = new_agent();
    // class Derived extends Base { constructor() { this; super(); } }
    let reads_this_first = create_function(&mut agent, ThisMode::Strict, true, |agent, _| {
        resolve_this_binding(agent)
    });
    make_constructor(&mut agent, reads_this_first, None, None);
    make_class_constructor(&mut agent, reads_this_first, ConstructorKind::Derived);
    let error = construct(&mut agent, reads_this_first, None, None).unwrap_err();
    assert_eq!(error_name(&mut agent, error.value()), "ReferenceError");
    assert_eq!(agent.execution_context_stack().len(), 1);

    // class Derived extends Base { constructor() { super(); } }
    let binds_this = create_function(&mut agent, ThisMode::Strict, true, |agent, _| {
        let EnvironmentIndex::Function(env) = agent.current_lexical_environment() else {
            panic!("constructor body runs in a function environment");
        };
        let this = ordinary_object_create(agent, None);
        env.bind_this_value(agent, this.into_value())?;
        // A second super() call is a ReferenceError.
        assert!(env.bind_this_value(agent, this.into_value()).is_err());
        Ok(Value::Undefined)
    });
    make_constructor(&mut agent, binds_this, None, None);
    make_class_constructor(&mut agent, binds_this, ConstructorKind::Derived);
    let instance = construct(&mut agent, binds_this, None, None).unwrap();
    assert_eq!(instance.internal_get_prototype_of(&mut agent).unwrap(), None);

    // Class constructors cannot be called.
    let error = call(&mut agent, binds_this.into_value(), Value::Undefined, None).unwrap_err();
    assert_eq!(error_name(&mut agent, error.value()), "TypeError");

    let returns_number = create_function(&mut agent, ThisMode::Strict, true, |_, _| {
        Ok(Value::from(1))
    });
    make_constructor(&mut agent, returns_number, None, None);
    make_class_constructor(&mut agent, returns_number, ConstructorKind::Derived);
    let error = construct(&mut agent, returns_number, None, None).unwrap_err();
    assert_eq!(error_name(&mut agent, error.value()), "TypeError");
    assert_eq!(agent.execution_context_stack().len(), 1);
}

#[test]
fn errors_unwind_nested_calls() {
    let mut agent = new_agent();
    let thrower = create_function(&mut agent, ThisMode::Strict, true, |agent, _| {
        let missing = String::from_str(agent, "missing");
        let reference = agent.resolve_binding(missing, true, None)?;
        get_value(agent, &reference)
    });
    let caller = create_function(&mut agent, ThisMode::Strict, true, move |agent, _| {
        assert_eq!(agent.execution_context_stack().len(), 2);
        call(agent, thrower.into_value(), Value::Undefined, None)
    });
    let error = call(&mut agent, caller.into_value(), Value::Undefined, None).unwrap_err();
    assert_eq!(error_name(&mut agent, error.value()), "ReferenceError");
    assert_eq!(agent.execution_context_stack().len(), 1);
}
