// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [20.4 Symbol Objects](https://tc39.es/ecma262/#sec-symbol-objects)

use super::this_primitive_value;
use crate::ecmascript::{
    abstract_operations::type_conversion::to_string,
    builtins::{
        ArgumentsList, builders::IntrinsicsBuilder, primitive_objects::PrimitiveObjectData,
    },
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{Object, ObjectKind, PropertyKey, Symbol, Value},
};
use crate::heap::WellKnownSymbolIndexes;

/// %Symbol% and %Symbol.prototype%. The prototype is an ordinary object, not
/// a Symbol instance.
pub(crate) fn create_intrinsics(
    agent: &mut Agent,
    builder: &IntrinsicsBuilder,
) -> (Object, Object) {
    let prototype = builder.object(agent, ObjectKind::Ordinary);
    let constructor = builder.constructor(agent, "Symbol", 0, symbol_constructor, prototype);

    let well_known = [
        ("toPrimitive", WellKnownSymbolIndexes::ToPrimitive),
        ("toStringTag", WellKnownSymbolIndexes::ToStringTag),
        ("unscopables", WellKnownSymbolIndexes::Unscopables),
    ];
    for (name, symbol) in well_known {
        let key = PropertyKey::from_str(agent, name);
        IntrinsicsBuilder::constant(agent, constructor, key, Symbol::from(symbol).into_value());
    }

    builder.getter(agent, prototype, "description", description);
    builder.method(agent, prototype, "toString", 0, to_string_method);
    builder.method(agent, prototype, "valueOf", 0, value_of);
    // ### [20.4.3.6 Symbol.prototype \[ %Symbol.toStringTag% \]](https://tc39.es/ecma262/#sec-symbol.prototype-%symbol.tostringtag%)
    let tag = Value::from_str(agent, "Symbol");
    agent[prototype].push_data_property(
        WellKnownSymbolIndexes::ToStringTag.into(),
        tag,
        false,
        false,
        true,
    );
    (constructor, prototype)
}

/// ### [20.4.1.1 Symbol ( \[ description \] )](https://tc39.es/ecma262/#sec-symbol-description)
fn symbol_constructor(
    agent: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    // 1. If NewTarget is not undefined, throw a TypeError exception.
    if new_target.is_some() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Symbol is not a constructor",
        ));
    }
    // 2. If description is undefined, let descString be undefined.
    // 3. Else, let descString be ? ToString(description).
    let description = match arguments.get(0) {
        Value::Undefined => None,
        description => Some(to_string(agent, description)?),
    };
    // 4. Return a new Symbol whose [[Description]] is descString.
    Ok(Symbol::new(agent, description).into_value())
}

/// ### [20.4.3.4.1 ThisSymbolValue ( value )](https://tc39.es/ecma262/#sec-thissymbolvalue)
fn this_symbol_value(agent: &mut Agent, value: Value) -> JsResult<Symbol> {
    this_primitive_value(
        agent,
        value,
        |data| match data {
            PrimitiveObjectData::Symbol(symbol) => Some(symbol),
            _ => None,
        },
        "this is not a Symbol",
    )
}

/// ### [20.4.3.2 get Symbol.prototype.description](https://tc39.es/ecma262/#sec-symbol.prototype.description)
fn description(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Let s be the this value.
    // 2. Let sym be ? ThisSymbolValue(s).
    let symbol = this_symbol_value(agent, this_value)?;
    // 3. Return sym.[[Description]].
    Ok(symbol
        .description(agent)
        .map_or(Value::Undefined, |description| description.into_value()))
}

/// ### [20.4.3.3 Symbol.prototype.toString ( )](https://tc39.es/ecma262/#sec-symbol.prototype.tostring)
fn to_string_method(
    agent: &mut Agent,
    this_value: Value,
    _arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. Let sym be ? ThisSymbolValue(this value).
    let symbol = this_symbol_value(agent, this_value)?;
    // 2. Return SymbolDescriptiveString(sym).
    Ok(symbol.descriptive_string(agent).into_value())
}

/// ### [20.4.3.4 Symbol.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-symbol.prototype.valueof)
fn value_of(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Return ? ThisSymbolValue(this value).
    this_symbol_value(agent, this_value).map(Symbol::into_value)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::{
            operations_on_objects::{call_function, construct, get},
            type_conversion::to_object,
        },
        execution::{DefaultHostHooks, agent::Options, initialize_default_realm},
    };

    fn agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    #[test]
    fn symbol_is_callable_but_not_newable() {
        let mut agent = agent();
        let symbol = agent.current_realm_record().intrinsics().symbol();
        let text = Value::from_str(&mut agent, "x");
        let Value::Symbol(created) =
            call_function(&mut agent, symbol, Value::Undefined, Some(&[text])).unwrap()
        else {
            panic!("expected a symbol");
        };
        assert_eq!(
            created.description(&agent).map(|d| d.as_str(&agent).to_owned()),
            Some("x".to_owned())
        );
        let error = construct(&mut agent, symbol, None, None).unwrap_err();
        assert!(error.to_string(&mut agent).starts_with("TypeError"));
    }

    #[test]
    fn well_known_symbols_are_exposed() {
        let mut agent = agent();
        let symbol = agent.current_realm_record().intrinsics().symbol();
        let key = PropertyKey::from_str(&mut agent, "toStringTag");
        assert_eq!(
            get(&mut agent, symbol, key).unwrap(),
            Symbol::from(WellKnownSymbolIndexes::ToStringTag).into_value()
        );
    }

    #[test]
    fn prototype_methods_unwrap_symbol_objects() {
        let mut agent = agent();
        let symbol = Symbol::new(&mut agent, None);
        let wrapper = to_object(&mut agent, symbol.into_value()).unwrap();
        assert_eq!(
            value_of(&mut agent, wrapper.into_value(), ArgumentsList::default()).unwrap(),
            symbol.into_value()
        );
        let Value::String(text) =
            to_string_method(&mut agent, wrapper.into_value(), ArgumentsList::default()).unwrap()
        else {
            panic!("expected a string");
        };
        assert_eq!(text.as_str(&agent), "Symbol()");
        let key = PropertyKey::from_str(&mut agent, "description");
        assert_eq!(get(&mut agent, wrapper, key).unwrap(), Value::Undefined);
        assert!(value_of(&mut agent, Value::Null, ArgumentsList::default()).is_err());
    }
}
