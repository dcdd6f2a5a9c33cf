// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{operations_on_objects::set, type_conversion::to_object},
    execution::{
        Agent, EnvironmentIndex, JsError, JsResult, agent::ExceptionType, get_global_object,
        get_this_environment,
    },
    types::{PropertyKey, String, Value},
};

/// ### \[\[Base]]
///
/// The value or Environment Record which holds the binding. A value of
/// undefined marks the Reference as unresolvable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Base {
    Value(Value),
    Environment(EnvironmentIndex),
}

/// ### [6.2.5 The Reference Record Specification Type](https://tc39.es/ecma262/#sec-reference-record-specification-type)
///
/// The Reference Record type is used to explain the behaviour of such
/// operators as delete, typeof, the assignment operators, the super keyword
/// and other language features. For example, the left-hand operand of an
/// assignment is expected to produce a Reference Record.
///
/// References are produced by name resolution and consumed immediately; they
/// are never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reference {
    /// ### \[\[Base]]
    pub(crate) base: Base,

    /// ### \[\[ReferencedName]]
    ///
    /// The name of the binding. Always a String if \[\[Base]] is an
    /// Environment Record.
    pub(crate) referenced_name: PropertyKey,

    /// ### \[\[Strict]]
    ///
    /// True if the Reference Record originated in strict mode code, false
    /// otherwise.
    pub(crate) strict: bool,

    /// ### \[\[ThisValue]]
    ///
    /// If not empty, the Reference Record represents a property binding that
    /// was expressed using the super keyword; it is called a Super Reference
    /// Record and its \[\[Base]] value will never be an Environment Record.
    /// In that case, the \[\[ThisValue]] field holds the this value at the
    /// time the Reference Record was created.
    pub(crate) this_value: Option<Value>,
}

impl Reference {
    pub fn new_unresolvable(referenced_name: String, strict: bool) -> Self {
        Self {
            base: Base::Value(Value::Undefined),
            referenced_name: referenced_name.into(),
            strict,
            this_value: None,
        }
    }

    pub fn new_environment(base: EnvironmentIndex, referenced_name: String, strict: bool) -> Self {
        Self {
            base: Base::Environment(base),
            referenced_name: referenced_name.into(),
            strict,
            this_value: None,
        }
    }

    pub fn new_property(base: Value, referenced_name: PropertyKey, strict: bool) -> Self {
        Self {
            base: Base::Value(base),
            referenced_name,
            strict,
            this_value: None,
        }
    }

    pub fn new_super(
        base: Value,
        referenced_name: PropertyKey,
        strict: bool,
        this_value: Value,
    ) -> Self {
        Self {
            base: Base::Value(base),
            referenced_name,
            strict,
            this_value: Some(this_value),
        }
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn referenced_name(&self) -> PropertyKey {
        self.referenced_name
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn this_value(&self) -> Option<Value> {
        self.this_value
    }

    /// ### [6.2.5.1 IsPropertyReference ( V )](https://tc39.es/ecma262/#sec-ispropertyreference)
    pub fn is_property_reference(&self) -> bool {
        // 1. If V.[[Base]] is UNRESOLVABLE, return false.
        // 2. If V.[[Base]] is an Environment Record, return false; otherwise return true.
        matches!(self.base, Base::Value(value) if !value.is_undefined())
    }

    /// ### [6.2.5.2 IsUnresolvableReference ( V )](https://tc39.es/ecma262/#sec-isunresolvablereference)
    pub fn is_unresolvable_reference(&self) -> bool {
        // 1. If V.[[Base]] is UNRESOLVABLE, return true; otherwise return false.
        matches!(self.base, Base::Value(Value::Undefined))
    }

    /// ### [6.2.5.3 IsSuperReference ( V )](https://tc39.es/ecma262/#sec-issuperreference)
    pub fn is_super_reference(&self) -> bool {
        // 1. If V.[[ThisValue]] is not EMPTY, return true; otherwise return false.
        self.this_value.is_some()
    }

    /// HasPrimitiveBase ( V ): true when the base is a Boolean, String,
    /// Symbol or Number.
    pub fn has_primitive_base(&self) -> bool {
        matches!(
            self.base,
            Base::Value(Value::Boolean(_) | Value::String(_) | Value::Symbol(_) | Value::Number(_))
        )
    }

    /// The binding name of an Environment Reference.
    fn binding_name(&self) -> String {
        match self.referenced_name {
            PropertyKey::String(name) => name,
            PropertyKey::Symbol(_) => {
                unreachable!("Environment references are built from String names")
            }
        }
    }
}

fn throw_unresolvable(agent: &mut Agent, reference: &Reference) -> JsError {
    let name = reference.referenced_name.descriptive_string(agent);
    let message = format!("{} is not defined", name.as_str(agent));
    agent.throw_exception(ExceptionType::ReferenceError, message)
}

/// ### [6.2.5.5 GetValue ( V )](https://tc39.es/ecma262/#sec-getvalue)
///
/// The abstract operation GetValue takes argument V (a Reference Record or an
/// ECMAScript language value) and returns either a normal completion
/// containing an ECMAScript language value or an abrupt completion.
pub fn get_value(agent: &mut Agent, reference: &Reference) -> JsResult<Value> {
    // 2. If IsUnresolvableReference(V) is true, throw a ReferenceError exception.
    if reference.is_unresolvable_reference() {
        return Err(throw_unresolvable(agent, reference));
    }
    match reference.base {
        // 3. If IsPropertyReference(V) is true, then
        Base::Value(base) => {
            // a. Let baseObj be ? ToObject(V.[[Base]]).
            let base_obj = to_object(agent, base)?;
            // d. Return ? baseObj.[[Get]](V.[[ReferencedName]], GetThisValue(V)).
            base_obj.internal_get(agent, reference.referenced_name, get_this_value(reference))
        }
        // 4. Else,
        Base::Environment(env) => {
            // a. Let base be V.[[Base]].
            // b. Assert: base is an Environment Record.
            // c. Return ? base.GetBindingValue(V.[[ReferencedName]], V.[[Strict]]).
            env.get_binding_value(agent, reference.binding_name(), reference.strict)
        }
    }
}

/// ### [6.2.5.6 PutValue ( V, W )](https://tc39.es/ecma262/#sec-putvalue)
///
/// The abstract operation PutValue takes arguments V (a Reference Record or
/// an ECMAScript language value) and W (an ECMAScript language value) and
/// returns either a normal completion containing UNUSED or an abrupt
/// completion.
pub fn put_value(agent: &mut Agent, reference: &Reference, w: Value) -> JsResult<()> {
    // 2. If IsUnresolvableReference(V) is true, then
    if reference.is_unresolvable_reference() {
        // a. If V.[[Strict]] is true, throw a ReferenceError exception.
        if reference.strict {
            return Err(throw_unresolvable(agent, reference));
        }
        // b. Let globalObj be GetGlobalObject().
        let global_obj = get_global_object(agent);
        // c. Perform ? Set(globalObj, V.[[ReferencedName]], W, false).
        set(agent, global_obj, reference.referenced_name, w, false)?;
        // d. Return UNUSED.
        return Ok(());
    }
    match reference.base {
        // 3. If IsPropertyReference(V) is true, then
        Base::Value(base) => {
            // a. Let baseObj be ? ToObject(V.[[Base]]).
            let base_obj = to_object(agent, base)?;
            // c. Let succeeded be ? baseObj.[[Set]](V.[[ReferencedName]], W, GetThisValue(V)).
            let succeeded = base_obj.internal_set(
                agent,
                reference.referenced_name,
                w,
                get_this_value(reference),
            )?;
            // d. If succeeded is false and V.[[Strict]] is true, throw a TypeError exception.
            if !succeeded && reference.strict {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Cannot assign to read-only property",
                ));
            }
            // e. Return UNUSED.
            Ok(())
        }
        // 4. Else,
        Base::Environment(env) => {
            // a. Let base be V.[[Base]].
            // b. Assert: base is an Environment Record.
            // c. Return ? base.SetMutableBinding(V.[[ReferencedName]], W, V.[[Strict]]).
            env.set_mutable_binding(agent, reference.binding_name(), w, reference.strict)
        }
    }
}

/// ### [6.2.5.7 GetThisValue ( V )](https://tc39.es/ecma262/#sec-getthisvalue)
///
/// The abstract operation GetThisValue takes argument V (a Reference Record)
/// and returns an ECMAScript language value.
pub fn get_this_value(reference: &Reference) -> Value {
    // 1. Assert: IsPropertyReference(V) is true.
    let Base::Value(base) = reference.base else {
        panic!("GetThisValue on an Environment reference");
    };
    // 2. If IsSuperReference(V) is true, return V.[[ThisValue]]; otherwise return V.[[Base]].
    reference.this_value.unwrap_or(base)
}

/// ### [6.2.5.8 InitializeReferencedBinding ( V, W )](https://tc39.es/ecma262/#sec-initializereferencedbinding)
///
/// The abstract operation InitializeReferencedBinding takes arguments V (a
/// Reference Record) and W (an ECMAScript language value) and returns either
/// a normal completion containing UNUSED or an abrupt completion.
pub fn initialize_referenced_binding(
    agent: &mut Agent,
    reference: &Reference,
    w: Value,
) -> JsResult<()> {
    // 1. Assert: IsUnresolvableReference(V) is false.
    // 2. Let base be V.[[Base]].
    // 3. Assert: base is an Environment Record.
    let Base::Environment(base) = reference.base else {
        panic!("InitializeReferencedBinding on a non-Environment reference");
    };
    // 4. Return ? base.InitializeBinding(V.[[ReferencedName]], W).
    base.initialize_binding(agent, reference.binding_name(), w)
}

/// ### [13.3.7.3 MakeSuperPropertyReference ( actualThis, propertyKey, strict )](https://tc39.es/ecma262/#sec-makesuperpropertyreference)
///
/// The abstract operation MakeSuperPropertyReference takes arguments
/// actualThis (an ECMAScript language value), propertyKey (a property key),
/// and strict (a Boolean) and returns either a normal completion containing a
/// Super Reference Record or a throw completion.
pub fn make_super_property_reference(
    agent: &mut Agent,
    actual_this: Value,
    property_key: PropertyKey,
    strict: bool,
) -> JsResult<Reference> {
    // 1. Let env be GetThisEnvironment().
    let env = get_this_environment(agent);
    // 2. Assert: env.HasSuperBinding() is true.
    let EnvironmentIndex::Function(env) = env else {
        panic!("MakeSuperPropertyReference outside of a method");
    };
    debug_assert!(env.has_super_binding(agent));
    // 3. Let baseValue be ? env.GetSuperBase().
    let base_value = env.get_super_base(agent)?;
    // 4. Return the Reference Record { [[Base]]: baseValue, [[ReferencedName]]: propertyKey, [[Strict]]: strict, [[ThisValue]]: actualThis }.
    Ok(Reference::new_super(
        base_value,
        property_key,
        strict,
        actual_this,
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        builtins::ordinary::ordinary_object_create,
        execution::{Agent, DefaultHostHooks, agent::Options, initialize_default_realm},
        types::Symbol,
    };

    fn agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    #[test]
    fn classification() {
        let mut agent = agent();
        let object = ordinary_object_create(&mut agent, None);
        let name = String::from_str(&mut agent, "x");

        let property = Reference::new_property(object.into_value(), name.into(), false);
        assert!(property.is_property_reference());
        assert!(!property.is_unresolvable_reference());
        assert!(!property.has_primitive_base());

        let unresolvable = Reference::new_unresolvable(name, true);
        assert!(unresolvable.is_unresolvable_reference());
        assert!(!unresolvable.is_property_reference());

        let primitive = Reference::new_property(Value::Boolean(true), name.into(), false);
        assert!(primitive.has_primitive_base());
        assert!(primitive.is_property_reference());

        let super_ref =
            Reference::new_super(object.into_value(), name.into(), true, Value::from(1));
        assert!(super_ref.is_super_reference());
        assert_eq!(get_this_value(&super_ref), Value::from(1));
        assert_eq!(get_this_value(&property), object.into_value());
    }

    #[test]
    fn unresolvable_reads_throw_reference_error() {
        let mut agent = agent();
        let name = String::from_str(&mut agent, "missing");
        let reference = Reference::new_unresolvable(name, false);
        let err = get_value(&mut agent, &reference).unwrap_err();
        assert_eq!(
            err.to_string(&mut agent),
            "ReferenceError: missing is not defined"
        );
    }

    #[test]
    fn sloppy_unresolvable_write_creates_global_property() {
        let mut agent = agent();
        let name = String::from_str(&mut agent, "implicitGlobal");
        let reference = Reference::new_unresolvable(name, false);
        put_value(&mut agent, &reference, Value::from(7)).unwrap();
        let global = get_global_object(&agent);
        let value = global
            .internal_get(&mut agent, name.into(), global.into_value())
            .unwrap();
        assert_eq!(value, Value::from(7));

        let strict = Reference::new_unresolvable(String::from_str(&mut agent, "other"), true);
        assert!(put_value(&mut agent, &strict, Value::from(1)).is_err());
    }

    #[test]
    fn symbol_keyed_unresolvable_references_throw() {
        let mut agent = agent();
        let description = String::from_str(&mut agent, "key");
        let key = PropertyKey::Symbol(Symbol::new(&mut agent, Some(description)));
        let reference = Reference::new_property(Value::Undefined, key, true);
        assert!(reference.is_unresolvable_reference());
        let err = get_value(&mut agent, &reference).unwrap_err();
        assert_eq!(
            err.to_string(&mut agent),
            "ReferenceError: Symbol(key) is not defined"
        );
        let err = put_value(&mut agent, &reference, Value::from(1)).unwrap_err();
        assert_eq!(
            err.to_string(&mut agent),
            "ReferenceError: Symbol(key) is not defined"
        );

        let anonymous = PropertyKey::Symbol(Symbol::new(&mut agent, None));
        let reference = Reference::new_property(Value::Undefined, anonymous, false);
        let err = get_value(&mut agent, &reference).unwrap_err();
        assert_eq!(
            err.to_string(&mut agent),
            "ReferenceError: Symbol() is not defined"
        );
    }

    #[test]
    fn primitive_base_reads_through_wrapper() {
        let mut agent = agent();
        let base = Value::from_str(&mut agent, "abc");
        let length = PropertyKey::from_str(&mut agent, "length");
        let reference = Reference::new_property(base, length, true);
        assert_eq!(get_value(&mut agent, &reference).unwrap(), Value::from(3));
        // Writes to a primitive wrapper fail; strict references throw.
        assert!(put_value(&mut agent, &reference, Value::from(1)).is_err());
    }
}
