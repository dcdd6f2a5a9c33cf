// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use vesper_vm::{
    ecmascript::{
        abstract_operations::operations_on_objects::{
            create_data_property_or_throw, get, has_own_property,
        },
        builtins::ordinary::ordinary_object_create,
        execution::{
            Agent, DefaultHostHooks, EnvironmentIndex, GlobalEnvironmentIndex, JsError,
            agent::Options, initialize_default_realm, new_declarative_environment,
            new_object_environment,
        },
        types::{Base, Object, PropertyKey, String, Value, get_value, put_value},
    },
    heap::WellKnownSymbolIndexes,
};

fn new_agent() -> (Agent, GlobalEnvironmentIndex) {
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    initialize_default_realm(&mut agent).unwrap();
    let global_env = agent.current_realm().global_env(&agent).unwrap();
    (agent, global_env)
}

fn error_name(agent: &mut Agent, error: JsError) -> std::string::String {
    let Value::Object(error) = error.value() else {
        panic!("expected an error object");
    };
    let key = PropertyKey::from_str(agent, "name");
    let name = get(agent, error, key).unwrap();
    name.to_string(agent).unwrap().as_str(agent).to_owned()
}

fn lookup(agent: &mut Agent, env: EnvironmentIndex, name: &str) -> Value {
    let name = String::from_str(agent, name);
    let reference = agent.resolve_binding(name, true, Some(env)).unwrap();
    get_value(agent, &reference).unwrap()
}

#[test]
fn global_var_declarations() {
    let (mut agent, global_env) = new_agent();
    let global = agent.get_global_object();
    let x = String::from_str(&mut agent, "x");

    assert!(global_env.can_declare_global_var(&mut agent, x).unwrap());
    global_env.create_global_var_binding(&mut agent, x, true).unwrap();
    // Declaring twice records the name once.
    global_env.create_global_var_binding(&mut agent, x, true).unwrap();
    assert_eq!(global_env.var_names(&agent), [x]);
    assert!(global_env.has_var_declaration(&agent, x));
    assert!(!global_env.has_lexical_declaration(&agent, x));
    assert!(has_own_property(&mut agent, global, x.into()).unwrap());
    assert_eq!(lookup(&mut agent, global_env.into(), "x"), Value::Undefined);

    // Deletable vars stay configurable; the value properties are not.
    assert!(!global_env.has_restricted_global_property(&mut agent, x).unwrap());
    let nan = String::from_str(&mut agent, "NaN");
    assert!(global_env.has_restricted_global_property(&mut agent, nan).unwrap());
    let object = String::from_str(&mut agent, "Object");
    assert!(!global_env.has_restricted_global_property(&mut agent, object).unwrap());

    // A let declaration lives in the declarative part only.
    let y = String::from_str(&mut agent, "y");
    EnvironmentIndex::from(global_env)
        .create_mutable_binding(&mut agent, y, false)
        .unwrap();
    assert!(global_env.has_lexical_declaration(&agent, y));
    assert!(!has_own_property(&mut agent, global, y.into()).unwrap());
    let error = EnvironmentIndex::from(global_env)
        .create_mutable_binding(&mut agent, y, false)
        .unwrap_err();
    assert_eq!(error_name(&mut agent, error), "TypeError");

    // A frozen global accepts no new vars but keeps the existing ones.
    assert!(global.internal_prevent_extensions(&mut agent).unwrap());
    let z = String::from_str(&mut agent, "z");
    assert!(!global_env.can_declare_global_var(&mut agent, z).unwrap());
    assert!(global_env.can_declare_global_var(&mut agent, x).unwrap());
}

#[test]
fn inner_scopes_shadow_outer_ones() {
    let (mut agent, global_env) = new_agent();
    let x = String::from_str(&mut agent, "x");
    let global_env = EnvironmentIndex::from(global_env);
    global_env.create_mutable_binding(&mut agent, x, false).unwrap();
    global_env.initialize_binding(&mut agent, x, Value::from(1)).unwrap();

    let outer = EnvironmentIndex::from(new_declarative_environment(&mut agent, Some(global_env)));
    let inner = EnvironmentIndex::from(new_declarative_environment(&mut agent, Some(outer)));
    inner.create_mutable_binding(&mut agent, x, false).unwrap();
    inner.initialize_binding(&mut agent, x, Value::from(2)).unwrap();

    assert_eq!(lookup(&mut agent, inner, "x"), Value::from(2));
    assert_eq!(lookup(&mut agent, outer, "x"), Value::from(1));

    let reference = agent.resolve_binding(x, true, Some(inner)).unwrap();
    assert!(matches!(reference.base(), Base::Environment(env) if env == inner));
    put_value(&mut agent, &reference, Value::from(3)).unwrap();
    assert_eq!(lookup(&mut agent, inner, "x"), Value::from(3));
    assert_eq!(lookup(&mut agent, global_env, "x"), Value::from(1));
}

#[test]
fn uninitialized_and_immutable_bindings() {
    let (mut agent, global_env) = new_agent();
    let scope = EnvironmentIndex::from(new_declarative_environment(
        &mut agent,
        Some(global_env.into()),
    ));
    let tdz = String::from_str(&mut agent, "tdz");
    scope.create_mutable_binding(&mut agent, tdz, false).unwrap();
    let reference = agent.resolve_binding(tdz, true, Some(scope)).unwrap();
    let error = get_value(&mut agent, &reference).unwrap_err();
    assert_eq!(error_name(&mut agent, error), "ReferenceError");

    let constant = String::from_str(&mut agent, "constant");
    scope.create_immutable_binding(&mut agent, constant, true).unwrap();
    scope.initialize_binding(&mut agent, constant, Value::from(7)).unwrap();
    let error = scope
        .set_mutable_binding(&mut agent, constant, Value::from(8), true)
        .unwrap_err();
    assert_eq!(error_name(&mut agent, error), "TypeError");
    assert_eq!(lookup(&mut agent, scope, "constant"), Value::from(7));

    // Declarative bindings created without D cannot be deleted.
    assert!(!scope.delete_binding(&mut agent, constant).unwrap());
}

#[test]
fn unresolvable_assignments() {
    let (mut agent, global_env) = new_agent();
    let global = agent.get_global_object();
    let name = String::from_str(&mut agent, "implicitGlobal");

    let strict = agent.resolve_binding(name, true, None).unwrap();
    assert!(strict.is_unresolvable_reference());
    let error = put_value(&mut agent, &strict, Value::from(1)).unwrap_err();
    assert_eq!(error_name(&mut agent, error), "ReferenceError");
    assert!(!has_own_property(&mut agent, global, name.into()).unwrap());

    let sloppy = agent.resolve_binding(name, false, None).unwrap();
    put_value(&mut agent, &sloppy, Value::from(1)).unwrap();
    assert_eq!(get(&mut agent, global, name.into()).unwrap(), Value::from(1));
    // The property is not a var declaration.
    assert!(!global_env.has_var_declaration(&agent, name));
    assert_eq!(lookup(&mut agent, global_env.into(), "implicitGlobal"), Value::from(1));
}

fn object_with(agent: &mut Agent, properties: &[(&str, Value)]) -> Object {
    let object = ordinary_object_create(agent, None);
    for &(key, value) in properties {
        let key = PropertyKey::from_str(agent, key);
        create_data_property_or_throw(agent, object, key, value).unwrap();
    }
    object
}

#[test]
fn with_environments_respect_unscopables() {
    let (mut agent, global_env) = new_agent();
    let b = String::from_str(&mut agent, "b");
    global_env.create_global_var_binding(&mut agent, b, true).unwrap();
    EnvironmentIndex::from(global_env)
        .set_mutable_binding(&mut agent, b, Value::from(3), true)
        .unwrap();

    let unscopables = object_with(&mut agent, &[("b", Value::Boolean(true))]);
    let target = object_with(&mut agent, &[("a", Value::from(1)), ("b", Value::from(2))]);
    create_data_property_or_throw(
        &mut agent,
        target,
        WellKnownSymbolIndexes::Unscopables.into(),
        unscopables.into_value(),
    )
    .unwrap();

    // with (target) { a; b; }
    let with_env = EnvironmentIndex::from(new_object_environment(
        &mut agent,
        target,
        true,
        Some(global_env.into()),
    ));
    assert_eq!(with_env.with_base_object(&agent), Some(target));
    assert_eq!(lookup(&mut agent, with_env, "a"), Value::from(1));
    assert_eq!(lookup(&mut agent, with_env, "b"), Value::from(3));

    // Assignments through the with scope land on the object.
    let a = String::from_str(&mut agent, "a");
    let reference = agent.resolve_binding(a, true, Some(with_env)).unwrap();
    put_value(&mut agent, &reference, Value::from(10)).unwrap();
    assert_eq!(get(&mut agent, target, a.into()).unwrap(), Value::from(10));

    // Without the with flag unscopables are ignored.
    let plain_env = EnvironmentIndex::from(new_object_environment(
        &mut agent,
        target,
        false,
        Some(global_env.into()),
    ));
    assert_eq!(plain_env.with_base_object(&agent), None);
    assert_eq!(lookup(&mut agent, plain_env, "b"), Value::from(2));
}
