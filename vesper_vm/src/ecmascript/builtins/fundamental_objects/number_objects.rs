// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [21.1 Number Objects](https://tc39.es/ecma262/#sec-number-objects)

use super::this_primitive_value;
use crate::ecmascript::{
    abstract_operations::{
        testing_and_comparison::is_integral_number,
        type_conversion::{number_to_string, to_integer_or_infinity, to_number},
    },
    builtins::{
        ArgumentsList,
        builders::IntrinsicsBuilder,
        ordinary::ordinary_create_from_constructor_with_kind,
        primitive_objects::{PrimitiveObjectData, create_primitive_object_with_prototype},
    },
    execution::{Agent, JsResult, ProtoIntrinsics, agent::ExceptionType},
    types::{Object, ObjectKind, PropertyKey, String, Value},
};

/// 2^53 - 1, the largest integer n such that n and n + 1 are both exactly
/// representable as a Number value.
const MAX_SAFE_INTEGER: f64 = 9007199254740991.0;

/// %Number% and %Number.prototype%, which is itself a Number object whose
/// \[\[NumberData]] is +0.
pub(crate) fn create_intrinsics(
    agent: &mut Agent,
    builder: &IntrinsicsBuilder,
) -> (Object, Object) {
    let prototype = create_primitive_object_with_prototype(
        agent,
        Some(builder.object_prototype()),
        PrimitiveObjectData::Number(0.0),
    );
    let constructor = builder.constructor(agent, "Number", 1, number_constructor, prototype);

    let constants = [
        ("EPSILON", f64::EPSILON),
        ("MAX_SAFE_INTEGER", MAX_SAFE_INTEGER),
        ("MAX_VALUE", f64::MAX),
        ("MIN_SAFE_INTEGER", -MAX_SAFE_INTEGER),
        // The smallest positive subnormal.
        ("MIN_VALUE", f64::from_bits(1)),
        ("NaN", f64::NAN),
        ("NEGATIVE_INFINITY", f64::NEG_INFINITY),
        ("POSITIVE_INFINITY", f64::INFINITY),
    ];
    for (name, value) in constants {
        let key = PropertyKey::from_str(agent, name);
        IntrinsicsBuilder::constant(agent, constructor, key, Value::Number(value));
    }
    builder.method(agent, constructor, "isFinite", 1, number_is_finite);
    builder.method(agent, constructor, "isInteger", 1, number_is_integer);
    builder.method(agent, constructor, "isNaN", 1, number_is_nan);
    builder.method(agent, constructor, "isSafeInteger", 1, number_is_safe_integer);

    builder.method(agent, prototype, "toString", 1, to_string);
    builder.method(agent, prototype, "valueOf", 0, value_of);
    (constructor, prototype)
}

/// ### [21.1.1.1 Number ( value )](https://tc39.es/ecma262/#sec-number-constructor-number-value)
fn number_constructor(
    agent: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    // 1. If value is present, then
    let n = if !arguments.is_empty() {
        // a. Let prim be ? ToNumeric(value).
        // b. If prim is a BigInt, let n be 𝔽(ℝ(prim)).
        // c. Otherwise, let n be prim.
        to_number(agent, arguments.get(0))?
    } else {
        // 2. Else,
        // a. Let n be +0𝔽.
        0.0
    };
    // 3. If NewTarget is undefined, return n.
    let Some(new_target) = new_target else {
        return Ok(Value::Number(n));
    };
    // 4. Let O be ? OrdinaryCreateFromConstructor(NewTarget,
    //    "%Number.prototype%", « [[NumberData]] »).
    // 5. Set O.[[NumberData]] to n.
    // 6. Return O.
    ordinary_create_from_constructor_with_kind(
        agent,
        new_target,
        ProtoIntrinsics::Number,
        ObjectKind::Primitive(PrimitiveObjectData::Number(n)),
    )
    .map(Object::into_value)
}

/// ### [21.1.2.2 Number.isFinite ( number )](https://tc39.es/ecma262/#sec-number.isfinite)
fn number_is_finite(
    _: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. If number is not a Number, return false.
    // 2. If number is not finite, return false.
    // 3. Otherwise, return true.
    Ok(Value::Boolean(matches!(
        arguments.get(0),
        Value::Number(number) if number.is_finite()
    )))
}

/// ### [21.1.2.3 Number.isInteger ( number )](https://tc39.es/ecma262/#sec-number.isinteger)
fn number_is_integer(
    _: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. Return IsIntegralNumber(number).
    Ok(Value::Boolean(is_integral_number(arguments.get(0))))
}

/// ### [21.1.2.4 Number.isNaN ( number )](https://tc39.es/ecma262/#sec-number.isnan)
fn number_is_nan(_: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
    // 1. If number is not a Number, return false.
    // 2. If number is NaN, return true.
    // 3. Otherwise, return false.
    Ok(Value::Boolean(arguments.get(0).is_nan()))
}

/// ### [21.1.2.5 Number.isSafeInteger ( number )](https://tc39.es/ecma262/#sec-number.issafeinteger)
fn number_is_safe_integer(
    _: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    let number = arguments.get(0);
    // 1. If IsIntegralNumber(number) is true, then
    //    a. If abs(ℝ(number)) ≤ 2**53 - 1, return true.
    // 2. Return false.
    Ok(Value::Boolean(matches!(
        number,
        Value::Number(n) if is_integral_number(number) && n.abs() <= MAX_SAFE_INTEGER
    )))
}

/// ### [21.1.3.7.1 ThisNumberValue ( value )](https://tc39.es/ecma262/#sec-thisnumbervalue)
fn this_number_value(agent: &mut Agent, value: Value) -> JsResult<f64> {
    this_primitive_value(
        agent,
        value,
        |data| match data {
            PrimitiveObjectData::Number(n) => Some(n),
            _ => None,
        },
        "this is not a Number",
    )
}

/// ### [21.1.3.6 Number.prototype.toString ( \[ radix \] )](https://tc39.es/ecma262/#sec-number.prototype.tostring)
fn to_string(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Let x be ? ThisNumberValue(this value).
    let x = this_number_value(agent, this_value)?;
    let radix = arguments.get(0);
    // 2. If radix is undefined, let radixMV be 10.
    // 3. Else, let radixMV be ? ToIntegerOrInfinity(radix).
    let radix = if radix.is_undefined() {
        10.0
    } else {
        to_integer_or_infinity(agent, radix)?
    };
    // 4. If radixMV is not in the inclusive interval from 2 to 36, throw a
    //    RangeError exception.
    if !(2.0..=36.0).contains(&radix) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "radix must be an integer at least 2 and no greater than 36",
        ));
    }
    // 5. Return Number::toString(x, radixMV).
    if radix == 10.0 {
        return Ok(number_to_string(agent, x).into_value());
    }
    let string = number_to_string_radix(x, radix as u32);
    Ok(String::from_string(agent, string).into_value())
}

/// ### [21.1.3.7 Number.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-number.prototype.valueof)
fn value_of(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Return ? ThisNumberValue(this value).
    this_number_value(agent, this_value).map(Value::Number)
}

/// ### [6.1.6.1.20 Number::toString ( x, radix )](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// For radixes other than 10. Fraction digits are emitted until the
/// remaining fraction is below half the distance to the next Number, which
/// is the shortest output that identifies `x`.
fn number_to_string_radix(x: f64, radix: u32) -> std::string::String {
    if x.is_nan() {
        return "NaN".into();
    }
    if x == 0.0 {
        return "0".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    let value = x.abs();
    let radix_f64 = f64::from(radix);
    let mut integer = value.trunc();
    let mut fraction = value - integer;

    let mut integer_digits = Vec::new();
    loop {
        let digit = (integer % radix_f64) as u32;
        integer_digits.push(digit);
        integer = ((integer - f64::from(digit)) / radix_f64).trunc();
        if integer < 1.0 {
            break;
        }
    }

    let mut fraction_digits = Vec::new();
    let next_up = f64::from_bits(value.to_bits() + 1);
    let mut delta = (0.5 * (next_up - value)).max(f64::from_bits(1));
    while fraction >= delta && fraction > 0.0 {
        fraction *= radix_f64;
        delta *= radix_f64;
        let digit = fraction.trunc() as u32;
        fraction_digits.push(digit);
        fraction -= f64::from(digit);
    }

    let to_char = |digit: u32| char::from_digit(digit, radix).unwrap_or('0');
    let mut result = std::string::String::new();
    if x < 0.0 {
        result.push('-');
    }
    result.extend(integer_digits.into_iter().rev().map(to_char));
    if !fraction_digits.is_empty() {
        result.push('.');
        result.extend(fraction_digits.into_iter().map(to_char));
    }
    result
}
