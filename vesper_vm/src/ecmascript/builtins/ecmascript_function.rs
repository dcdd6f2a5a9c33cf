// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.2 ECMAScript Function Objects](https://tc39.es/ecma262/#sec-ecmascript-function-objects)
//!
//! Function objects whose code is supplied by an evaluator as a native
//! body closure. The body runs inside the callee context prepared here, with
//! the function environment as both its lexical and variable environment.

use core::fmt;
use std::rc::Rc;

use super::{
    ArgumentsList,
    ordinary::{ordinary_create_from_constructor, ordinary_object_create_with_kind},
};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::define_property_or_throw, type_conversion::to_object,
    },
    execution::{
        Agent, ECMAScriptCodeEvaluationState, EnvironmentIndex, ExecutionContext,
        FunctionEnvironmentIndex, JsResult, ProtoIntrinsics, Realm, agent::ExceptionType,
        get_active_script_or_module, new_function_environment,
    },
    scripts_and_modules::ScriptOrModule,
    types::{Object, ObjectKind, PropertyDescriptor, PropertyKey, String, Value},
};

/// Evaluator-supplied function code. The result is the completion value of
/// the body; `Ok(Value::Undefined)` stands for falling off the end.
pub type FunctionBody = Rc<dyn Fn(&mut Agent, ArgumentsList<'_>) -> JsResult<Value>>;

/// ### \[\[ThisMode]]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThisMode {
    /// `this` refers to the this value of a lexically enclosing function.
    Lexical,
    /// `this` is used exactly as provided by an invocation.
    Strict,
    /// undefined or null `this` is replaced by the global object.
    Global,
}

/// ### \[\[ConstructorKind]]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorKind {
    Base,
    Derived,
}

#[derive(Clone)]
pub struct ECMAScriptFunctionHeapData {
    /// ### \[\[Environment]]
    ///
    /// The Environment Record that the function was closed over.
    pub(crate) environment: EnvironmentIndex,
    /// ### \[\[ThisMode]]
    pub(crate) this_mode: ThisMode,
    /// ### \[\[Strict]]
    pub(crate) strict: bool,
    /// ### \[\[HomeObject]]
    ///
    /// If the function uses `super`, this is the object whose
    /// \[\[GetPrototypeOf]] provides the object where super property lookups
    /// begin.
    pub(crate) home_object: Option<Object>,
    /// ### \[\[ConstructorKind]]
    ///
    /// `None` when the function has no \[\[Construct]] internal method.
    pub(crate) constructor_kind: Option<ConstructorKind>,
    /// ### \[\[IsClassConstructor]]
    pub(crate) is_class_constructor: bool,
    /// ### \[\[Realm]]
    pub(crate) realm: Realm,
    /// ### \[\[ScriptOrModule]]
    pub(crate) script_or_module: Option<ScriptOrModule>,
    pub(crate) body: FunctionBody,
}

impl ECMAScriptFunctionHeapData {
    pub(crate) fn is_constructor(&self) -> bool {
        self.constructor_kind.is_some()
    }
}

impl fmt::Debug for ECMAScriptFunctionHeapData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ECMAScriptFunctionHeapData")
            .field("environment", &self.environment)
            .field("this_mode", &self.this_mode)
            .field("strict", &self.strict)
            .field("home_object", &self.home_object)
            .field("constructor_kind", &self.constructor_kind)
            .field("is_class_constructor", &self.is_class_constructor)
            .field("realm", &self.realm)
            .field("script_or_module", &self.script_or_module)
            .finish_non_exhaustive()
    }
}

pub(crate) fn ecmascript_function_data(agent: &Agent, f: Object) -> &ECMAScriptFunctionHeapData {
    let ObjectKind::ECMAScriptFunction(data) = &agent[f].kind else {
        panic!("{f:?} is not an ECMAScript function object");
    };
    data
}

fn ecmascript_function_data_mut(agent: &mut Agent, f: Object) -> &mut ECMAScriptFunctionHeapData {
    let ObjectKind::ECMAScriptFunction(data) = &mut agent[f].kind else {
        panic!("{f:?} is not an ECMAScript function object");
    };
    data
}

pub struct OrdinaryFunctionCreateParams {
    /// Defaults to the realm's %Function.prototype%.
    pub function_prototype: Option<Object>,
    pub environment: EnvironmentIndex,
    pub this_mode: ThisMode,
    pub strict: bool,
    /// The ExpectedArgumentCount of the formal parameters.
    pub length: u32,
    pub realm: Realm,
    pub body: FunctionBody,
}

/// ### [10.2.3 OrdinaryFunctionCreate ( functionPrototype, sourceText, ParameterList, Body, thisMode, env, privateEnv )](https://tc39.es/ecma262/#sec-ordinaryfunctioncreate)
///
/// The abstract operation OrdinaryFunctionCreate takes arguments
/// functionPrototype (an Object), sourceText (a sequence of Unicode code
/// points), ParameterList (a Parse Node), Body (a Parse Node), thisMode
/// (LEXICAL-THIS or NON-LEXICAL-THIS), env (an Environment Record), and
/// privateEnv (a PrivateEnvironment Record or null) and returns an
/// ECMAScript function object. It is used to specify the runtime creation
/// of a new function with a default \[\[Call]] internal method and no
/// \[\[Construct]] internal method (although one may be subsequently added
/// by an operation such as MakeConstructor).
pub fn ordinary_function_create(agent: &mut Agent, params: OrdinaryFunctionCreateParams) -> Object {
    let prototype = params.function_prototype.unwrap_or_else(|| {
        agent[params.realm]
            .intrinsics()
            .get_intrinsic_default_proto(ProtoIntrinsics::Function)
    });
    // 7. If thisMode is LEXICAL-THIS, set F.[[ThisMode]] to LEXICAL.
    // 8. Else if Strict is true, set F.[[ThisMode]] to STRICT.
    // 9. Else, set F.[[ThisMode]] to GLOBAL.
    let this_mode = match params.this_mode {
        ThisMode::Global if params.strict => ThisMode::Strict,
        this_mode => this_mode,
    };
    let data = ECMAScriptFunctionHeapData {
        // 11. Set F.[[Environment]] to env.
        environment: params.environment,
        this_mode,
        // 6. Set F.[[Strict]] to Strict.
        strict: params.strict,
        // 17. Set F.[[HomeObject]] to undefined.
        home_object: None,
        constructor_kind: None,
        // 10. Set F.[[IsClassConstructor]] to false.
        is_class_constructor: false,
        // 15. Set F.[[Realm]] to the current Realm Record.
        realm: params.realm,
        // 14. Set F.[[ScriptOrModule]] to GetActiveScriptOrModule().
        script_or_module: get_active_script_or_module(agent),
        body: params.body,
    };
    // 1. Let internalSlotsList be the internal slots listed in Table 30.
    // 2. Let F be OrdinaryObjectCreate(functionPrototype, internalSlotsList).
    // 3. Set F.[[Call]] to the definition specified in 10.2.1.
    let f = ordinary_object_create_with_kind(
        agent,
        Some(prototype),
        ObjectKind::ECMAScriptFunction(data),
    );
    // 22. Perform SetFunctionLength(F, len).
    set_function_length(agent, f, params.length);
    // 23. Return F.
    f
}

/// ### [10.2.5 MakeConstructor ( F \[ , writablePrototype \[ , prototype \] \] )](https://tc39.es/ecma262/#sec-makeconstructor)
pub fn make_constructor(
    agent: &mut Agent,
    f: Object,
    writable_prototype: Option<bool>,
    prototype: Option<Object>,
) {
    // 1. If F is an ECMAScript function object, then
    //    a. Assert: IsConstructor(F) is false.
    //    c. Set F.[[Construct]] to the definition specified in 10.2.2.
    // 3. Set F.[[ConstructorKind]] to BASE.
    let data = ecmascript_function_data_mut(agent, f);
    debug_assert!(data.constructor_kind.is_none());
    data.constructor_kind = Some(ConstructorKind::Base);
    // 4. If writablePrototype is not present, set writablePrototype to true.
    let writable_prototype = writable_prototype.unwrap_or(true);
    // 5. If prototype is not present, then
    let prototype = prototype.unwrap_or_else(|| {
        // a. Set prototype to OrdinaryObjectCreate(%Object.prototype%).
        let object_prototype = agent
            .current_realm_record()
            .intrinsics()
            .object_prototype();
        let prototype =
            ordinary_object_create_with_kind(agent, Some(object_prototype), ObjectKind::Ordinary);
        // b. Perform ! DefinePropertyOrThrow(prototype, "constructor",
        //    PropertyDescriptor { [[Value]]: F, [[Writable]]: writablePrototype,
        //    [[Enumerable]]: false, [[Configurable]]: true }).
        let key = PropertyKey::from_str(agent, "constructor");
        agent[prototype].push_data_property(key, f.into_value(), writable_prototype, false, true);
        prototype
    });
    // 6. Perform ! DefinePropertyOrThrow(F, "prototype", PropertyDescriptor {
    //    [[Value]]: prototype, [[Writable]]: writablePrototype,
    //    [[Enumerable]]: false, [[Configurable]]: false }).
    let key = PropertyKey::from_str(agent, "prototype");
    let descriptor = PropertyDescriptor::new_data_descriptor(
        prototype.into_value(),
        writable_prototype,
        false,
        false,
    );
    let Ok(()) = define_property_or_throw(agent, f, key, descriptor) else {
        panic!("MakeConstructor: could not define prototype");
    };
    // 7. Return unused.
}

/// ### [10.2.6 MakeClassConstructor ( F )](https://tc39.es/ecma262/#sec-makeclassconstructor)
///
/// Also records the \[\[ConstructorKind]] decided by
/// ClassDefinitionEvaluation, which is DERIVED for classes with a heritage.
pub fn make_class_constructor(agent: &mut Agent, f: Object, kind: ConstructorKind) {
    let data = ecmascript_function_data_mut(agent, f);
    // 1. Assert: F.[[IsClassConstructor]] is false.
    debug_assert!(!data.is_class_constructor);
    debug_assert!(data.constructor_kind.is_some());
    // 2. Set F.[[IsClassConstructor]] to true.
    data.is_class_constructor = true;
    data.constructor_kind = Some(kind);
    // 3. Return unused.
}

/// ### [10.2.7 MakeMethod ( F, homeObject )](https://tc39.es/ecma262/#sec-makemethod)
pub fn make_method(agent: &mut Agent, f: Object, home_object: Object) {
    // 1. Assert: homeObject is an ordinary object.
    // 2. Set F.[[HomeObject]] to homeObject.
    ecmascript_function_data_mut(agent, f).home_object = Some(home_object);
    // 3. Return unused.
}

/// ### [10.2.9 SetFunctionName ( F, name \[ , prefix \] )](https://tc39.es/ecma262/#sec-setfunctionname)
pub fn set_function_name(agent: &mut Agent, f: Object, name: PropertyKey, prefix: Option<&str>) {
    // 2. If name is a Symbol, then
    let name = match name {
        PropertyKey::Symbol(symbol) => match symbol.description(agent) {
            // a. Let description be name's [[Description]] value.
            // b. If description is undefined, set name to the empty String.
            None => String::from_str(agent, ""),
            // c. Else, set name to the string-concatenation of "[",
            //    description, and "]".
            Some(description) => {
                let name = format!("[{}]", description.as_str(agent));
                String::from_string(agent, name)
            }
        },
        PropertyKey::String(name) => name,
    };
    // 5. If prefix is present, then
    let name = match prefix {
        // a. Set name to the string-concatenation of prefix, the code unit
        //    0x0020 (SPACE), and name.
        Some(prefix) => {
            let name = format!("{prefix} {}", name.as_str(agent));
            String::from_string(agent, name)
        }
        None => name,
    };
    // 6. Perform ! DefinePropertyOrThrow(F, "name", PropertyDescriptor {
    //    [[Value]]: name, [[Writable]]: false, [[Enumerable]]: false,
    //    [[Configurable]]: true }).
    let key = PropertyKey::from_str(agent, "name");
    let descriptor = PropertyDescriptor::new_data_descriptor(name.into_value(), false, false, true);
    let Ok(()) = define_property_or_throw(agent, f, key, descriptor) else {
        panic!("SetFunctionName: name is not configurable");
    };
    // 7. Return unused.
}

/// ### [10.2.10 SetFunctionLength ( F, length )](https://tc39.es/ecma262/#sec-setfunctionlength)
pub fn set_function_length(agent: &mut Agent, f: Object, length: u32) {
    // 1. Assert: F is an extensible object that does not have a "length" own property.
    // 2. Perform ! DefinePropertyOrThrow(F, "length", PropertyDescriptor {
    //    [[Value]]: 𝔽(length), [[Writable]]: false, [[Enumerable]]: false,
    //    [[Configurable]]: true }).
    let key = PropertyKey::from_str(agent, "length");
    agent[f].push_data_property(key, Value::from(length), false, false, true);
    // 3. Return unused.
}

/// ### [10.2.1.1 PrepareForOrdinaryCall ( F, newTarget )](https://tc39.es/ecma262/#sec-prepareforordinarycall)
///
/// Pushes the callee context and returns its function environment.
fn prepare_for_ordinary_call(
    agent: &mut Agent,
    f: Object,
    new_target: Option<Object>,
) -> FunctionEnvironmentIndex {
    let data = ecmascript_function_data(agent, f);
    // 4. Let calleeRealm be F.[[Realm]].
    let callee_realm = data.realm;
    let script_or_module = data.script_or_module;
    let is_strict_mode = data.strict;
    // 7. Let localEnv be NewFunctionEnvironment(F, newTarget).
    let local_env = new_function_environment(agent, f, new_target);
    // 1. Let callerContext be the running execution context.
    // 2. Let calleeContext be a new ECMAScript code execution context.
    let callee_context = ExecutionContext {
        // 8. Set the LexicalEnvironment of calleeContext to localEnv.
        // 9. Set the VariableEnvironment of calleeContext to localEnv.
        ecmascript_code: Some(ECMAScriptCodeEvaluationState {
            lexical_environment: local_env.into(),
            variable_environment: local_env.into(),
            is_strict_mode,
        }),
        // 3. Set the Function of calleeContext to F.
        function: Some(f),
        // 5. Set the Realm of calleeContext to calleeRealm.
        realm: callee_realm,
        // 6. Set the ScriptOrModule of calleeContext to F.[[ScriptOrModule]].
        script_or_module,
        generator: None,
    };
    // 11. If callerContext is not already suspended, suspend callerContext.
    // 12. Push calleeContext onto the execution context stack; calleeContext
    //     is now the running execution context.
    agent.push_execution_context(callee_context);
    // 14. Return calleeContext.
    local_env
}

/// ### [10.2.1.2 OrdinaryCallBindThis ( F, calleeContext, thisArgument )](https://tc39.es/ecma262/#sec-ordinarycallbindthis)
fn ordinary_call_bind_this(
    agent: &mut Agent,
    f: Object,
    local_env: FunctionEnvironmentIndex,
    this_argument: Value,
) -> JsResult<()> {
    let data = ecmascript_function_data(agent, f);
    // 1. Let thisMode be F.[[ThisMode]].
    let this_mode = data.this_mode;
    // 3. Let calleeRealm be F.[[Realm]].
    let callee_realm = data.realm;
    // 2. If thisMode is LEXICAL, return unused.
    if this_mode == ThisMode::Lexical {
        return Ok(());
    }
    // 5. If thisMode is STRICT, then
    let this_value = if this_mode == ThisMode::Strict {
        // a. Let thisValue be thisArgument.
        this_argument
    }
    // 6. Else,
    else if this_argument.is_nullish() {
        // a. If thisArgument is either undefined or null, then
        //    i. Let globalEnv be calleeRealm.[[GlobalEnv]].
        //    ii. Assert: globalEnv is a Global Environment Record.
        let Some(global_env) = callee_realm.global_env(agent) else {
            panic!("OrdinaryCallBindThis: callee realm has no global environment");
        };
        //    iii. Let thisValue be globalEnv.[[GlobalThisValue]].
        global_env.get_this_binding(agent).into_value()
    } else {
        // b. Else,
        //    i. Let thisValue be ! ToObject(thisArgument).
        //    ii. NOTE: ToObject produces wrapper objects using calleeRealm.
        to_object(agent, this_argument)?.into_value()
    };
    // 7. Assert: localEnv is a Function Environment Record.
    // 8. Assert: The next step never returns an abrupt completion because
    //    localEnv.[[ThisBindingStatus]] is not INITIALIZED.
    // 9. Perform ! localEnv.BindThisValue(thisValue).
    local_env.bind_this_value(agent, this_value)
    // 10. Return unused.
}

/// ### [10.2.1 \[\[Call\]\] ( thisArgument, argumentsList )](https://tc39.es/ecma262/#sec-ecmascript-function-objects-call-thisargument-argumentslist)
pub(crate) fn ecmascript_function_call(
    agent: &mut Agent,
    f: Object,
    this_argument: Value,
    arguments_list: ArgumentsList,
) -> JsResult<Value> {
    let depth = agent.execution_context_stack().len();
    // 1. Let callerContext be the running execution context.
    // 2. Let calleeContext be PrepareForOrdinaryCall(F, undefined).
    let local_env = prepare_for_ordinary_call(agent, f, None);
    // 3. Assert: calleeContext is now the running execution context.
    let result = (|| {
        // 4. If F.[[IsClassConstructor]] is true, then
        if ecmascript_function_data(agent, f).is_class_constructor {
            // a. Let error be a newly created TypeError object.
            // b. NOTE: error is created in calleeContext with F's associated
            //    Realm Record.
            // c. Remove calleeContext from the execution context stack and
            //    restore callerContext as the running execution context.
            // d. Return ThrowCompletion(error).
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "class constructors must be invoked with 'new'",
            ));
        }
        // 5. Perform OrdinaryCallBindThis(F, calleeContext, thisArgument).
        ordinary_call_bind_this(agent, f, local_env, this_argument)?;
        // 6. Let result be Completion(OrdinaryCallEvaluateBody(F, argumentsList)).
        let body = ecmascript_function_data(agent, f).body.clone();
        body(agent, arguments_list)
    })();
    // 7. Remove calleeContext from the execution context stack and restore
    //    callerContext as the running execution context.
    agent.execution_context_stack.truncate(depth);
    // 8. If result is a return completion, return result.[[Value]].
    // 9. ReturnIfAbrupt(result).
    // 10. Return undefined.
    result
}

/// ### [10.2.2 \[\[Construct\]\] ( argumentsList, newTarget )](https://tc39.es/ecma262/#sec-ecmascript-function-objects-construct-argumentslist-newtarget)
pub(crate) fn ecmascript_function_construct(
    agent: &mut Agent,
    f: Object,
    arguments_list: ArgumentsList,
    new_target: Object,
) -> JsResult<Object> {
    // 1. Let callerContext be the running execution context.
    // 2. Let kind be F.[[ConstructorKind]].
    let Some(kind) = ecmascript_function_data(agent, f).constructor_kind else {
        panic!("[[Construct]] called on a non-constructor");
    };
    // 3. If kind is BASE, then
    let this_argument = if kind == ConstructorKind::Base {
        // a. Let thisArgument be ? OrdinaryCreateFromConstructor(newTarget,
        //    "%Object.prototype%").
        Some(ordinary_create_from_constructor(
            agent,
            new_target,
            ProtoIntrinsics::Object,
        )?)
    } else {
        None
    };
    let depth = agent.execution_context_stack().len();
    // 4. Let calleeContext be PrepareForOrdinaryCall(F, newTarget).
    let constructor_env = prepare_for_ordinary_call(agent, f, Some(new_target));
    // 5. Assert: calleeContext is now the running execution context.
    let result = (|| {
        // 6. If kind is BASE, then
        if let Some(this_argument) = this_argument {
            // a. Perform OrdinaryCallBindThis(F, calleeContext, thisArgument).
            ordinary_call_bind_this(agent, f, constructor_env, this_argument.into_value())?;
        }
        // 7. Let constructorEnv be the LexicalEnvironment of calleeContext.
        // 8. Let result be Completion(OrdinaryCallEvaluateBody(F, argumentsList)).
        let body = ecmascript_function_data(agent, f).body.clone();
        body(agent, arguments_list)
    })();
    // 9. Remove calleeContext from the execution context stack and restore
    //    callerContext as the running execution context.
    agent.execution_context_stack.truncate(depth);
    // 11. Else, ReturnIfAbrupt(result).
    let result = result?;
    // 10. If result is a return completion, then
    //     a. If result.[[Value]] is an Object, return result.[[Value]].
    if let Value::Object(object) = result {
        return Ok(object);
    }
    //     b. If kind is BASE, return thisArgument.
    if let Some(this_argument) = this_argument {
        return Ok(this_argument);
    }
    //     c. If result.[[Value]] is not undefined, throw a TypeError exception.
    if !result.is_undefined() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "derived constructors may only return an object or undefined",
        ));
    }
    // 12. Let thisBinding be ? constructorEnv.GetThisBinding().
    let this_binding = constructor_env.get_this_binding(agent)?;
    // 13. Assert: thisBinding is an Object.
    let Value::Object(this_binding) = this_binding else {
        panic!("[[Construct]]: derived this binding is not an object");
    };
    // 14. Return thisBinding.
    Ok(this_binding)
}
