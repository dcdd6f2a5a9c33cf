// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [19.2 Function Properties of the Global Object](https://tc39.es/ecma262/#sec-function-properties-of-the-global-object)

use crate::ecmascript::{
    abstract_operations::type_conversion::to_number,
    builtins::{ArgumentsList, Behaviour, builders::IntrinsicsBuilder},
    execution::{Agent, JsResult},
    types::{Object, Value},
};

pub(crate) fn create_is_finite(agent: &mut Agent, builder: &IntrinsicsBuilder) -> Object {
    builder.function(agent, "isFinite", 1, Behaviour::Regular(is_finite))
}

pub(crate) fn create_is_nan(agent: &mut Agent, builder: &IntrinsicsBuilder) -> Object {
    builder.function(agent, "isNaN", 1, Behaviour::Regular(is_nan))
}

/// ### [19.2.2 isFinite ( number )](https://tc39.es/ecma262/#sec-isfinite-number)
fn is_finite(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Let num be ? ToNumber(number).
    let num = to_number(agent, arguments.get(0))?;
    // 2. If num is not finite, return false.
    // 3. Otherwise, return true.
    Ok(Value::Boolean(num.is_finite()))
}

/// ### [19.2.3 isNaN ( number )](https://tc39.es/ecma262/#sec-isnan-number)
fn is_nan(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Let num be ? ToNumber(number).
    let num = to_number(agent, arguments.get(0))?;
    // 2. If num is NaN, return true.
    // 3. Otherwise, return false.
    Ok(Value::Boolean(num.is_nan()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        execution::{DefaultHostHooks, agent::Options, initialize_default_realm},
        types::Symbol,
    };

    #[test]
    fn numeric_predicates_coerce_their_argument() {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        let text = Value::from_str(&mut agent, " 12 ");
        let junk = Value::from_str(&mut agent, "12px");
        fn check(
            agent: &mut Agent,
            f: fn(&mut Agent, Value, ArgumentsList) -> JsResult<Value>,
            argument: Value,
        ) -> Value {
            f(agent, Value::Undefined, ArgumentsList::new(&[argument])).unwrap()
        }
        assert_eq!(check(&mut agent, is_finite, text), Value::Boolean(true));
        assert_eq!(check(&mut agent, is_nan, junk), Value::Boolean(true));
        assert_eq!(check(&mut agent, is_finite, Value::pos_inf()), Value::Boolean(false));
        assert_eq!(check(&mut agent, is_nan, Value::Null), Value::Boolean(false));

        let symbol = Symbol::new(&mut agent, None).into_value();
        assert!(is_nan(&mut agent, Value::Undefined, ArgumentsList::new(&[symbol])).is_err());
    }
}
