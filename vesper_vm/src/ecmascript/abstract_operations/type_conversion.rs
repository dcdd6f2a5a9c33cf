// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.1 Type Conversion](https://tc39.es/ecma262/#sec-type-conversion)
//!
//! The ECMAScript language implicitly performs automatic type conversion as
//! needed. To clarify the semantics of certain constructs it is useful to
//! define a set of conversion abstract operations. The conversion abstract
//! operations are polymorphic; they can accept a value of any ECMAScript
//! language type. But no other specification types are used with these
//! operations.
//!
//! The pure numeric steps are exposed separately (`*_number` helpers) so
//! that callers already holding an `f64` skip the agent entirely.

use num_traits::ToPrimitive;

use super::{
    operations_on_objects::{call_function, get, get_method},
    testing_and_comparison::is_callable,
};
use crate::{
    ecmascript::{
        builtins::primitive_objects::{PrimitiveObjectData, create_primitive_object},
        execution::{Agent, JsResult, agent::ExceptionType},
        types::{Object, PropertyKey, String, Value},
    },
    heap::WellKnownSymbolIndexes,
};

/// 2^53 - 1, the largest integer every f64 below it represents exactly.
pub const MAX_SAFE_INTEGER: f64 = 9007199254740991.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    String,
    Number,
}

impl PreferredType {
    const fn hint(preferred_type: Option<Self>) -> &'static str {
        match preferred_type {
            None => "default",
            Some(PreferredType::String) => "string",
            Some(PreferredType::Number) => "number",
        }
    }
}

/// ### [7.1.1 ToPrimitive ( input \[ , preferredType \] )](https://tc39.es/ecma262/#sec-toprimitive)
///
/// The abstract operation ToPrimitive takes argument input (an ECMAScript
/// language value) and optional argument preferredType (STRING or NUMBER) and
/// returns either a normal completion containing an ECMAScript language value
/// or a throw completion. It converts its input argument to a non-Object
/// type. If an object is capable of converting to more than one primitive
/// type, it may use the optional hint preferredType to favour that type.
pub fn to_primitive(
    agent: &mut Agent,
    input: Value,
    preferred_type: Option<PreferredType>,
) -> JsResult<Value> {
    // 1. If input is an Object, then
    let Value::Object(object) = input else {
        // 2. Return input.
        return Ok(input);
    };
    // a. Let exoticToPrim be ? GetMethod(input, @@toPrimitive).
    let exotic_to_prim = get_method(
        agent,
        input,
        PropertyKey::from(WellKnownSymbolIndexes::ToPrimitive),
    )?;
    // b. If exoticToPrim is not undefined, then
    if let Some(exotic_to_prim) = exotic_to_prim {
        // i. If preferredType is not present, let hint be "default".
        // ii. Else if preferredType is STRING, let hint be "string".
        // iii. Else, let hint be "number".
        let hint = Value::from_str(agent, PreferredType::hint(preferred_type));
        // iv. Let result be ? Call(exoticToPrim, input, « hint »).
        let result = call_function(agent, exotic_to_prim, input, Some(&[hint]))?;
        // v. If result is not an Object, return result.
        if !result.is_object() {
            return Ok(result);
        }
        // vi. Throw a TypeError exception.
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert object to primitive value",
        ));
    }
    // c. If preferredType is not present, let preferredType be NUMBER.
    // d. Return ? OrdinaryToPrimitive(input, preferredType).
    ordinary_to_primitive(
        agent,
        object,
        preferred_type.unwrap_or(PreferredType::Number),
    )
}

/// ### [7.1.1.1 OrdinaryToPrimitive ( O, hint )](https://tc39.es/ecma262/#sec-ordinarytoprimitive)
///
/// The abstract operation OrdinaryToPrimitive takes arguments O (an Object)
/// and hint (STRING or NUMBER) and returns either a normal completion
/// containing an ECMAScript language value or a throw completion.
pub fn ordinary_to_primitive(
    agent: &mut Agent,
    o: Object,
    hint: PreferredType,
) -> JsResult<Value> {
    // 1. If hint is STRING, then
    //   a. Let methodNames be « "toString", "valueOf" ».
    // 2. Else,
    //   a. Let methodNames be « "valueOf", "toString" ».
    let method_names = match hint {
        PreferredType::String => ["toString", "valueOf"],
        PreferredType::Number => ["valueOf", "toString"],
    };
    // 3. For each element name of methodNames, do
    for name in method_names {
        // a. Let method be ? Get(O, name).
        let key = PropertyKey::from_str(agent, name);
        let method = get(agent, o, key)?;
        // b. If IsCallable(method) is true, then
        if let Value::Object(method) = method
            && is_callable(agent, method.into_value())
        {
            // i. Let result be ? Call(method, O).
            let result = call_function(agent, method, o.into_value(), None)?;
            // ii. If result is not an Object, return result.
            if !result.is_object() {
                return Ok(result);
            }
        }
    }
    // 4. Throw a TypeError exception.
    Err(agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "Cannot convert object to primitive value",
    ))
}

/// ### [7.1.2 ToBoolean ( argument )](https://tc39.es/ecma262/#sec-toboolean)
pub fn to_boolean(agent: &Agent, argument: Value) -> bool {
    match argument {
        // 1. If argument is a Boolean, return argument.
        Value::Boolean(boolean) => boolean,
        // 2. If argument is one of undefined, null, +0𝔽, -0𝔽, NaN, 0ℤ, or the
        //    empty String, return false.
        Value::Undefined | Value::Null => false,
        Value::Number(number) => to_boolean_number(number),
        Value::String(string) => !string.is_empty(agent),
        // 3. NOTE: This step is replaced in section B.3.6.1.
        // 4. Return true.
        Value::Symbol(_) | Value::Object(_) => true,
    }
}

/// ToBoolean of a Number: false only for either zero and NaN.
pub fn to_boolean_number(number: f64) -> bool {
    !(number == 0.0 || number.is_nan())
}

/// ### [7.1.4 ToNumber ( argument )](https://tc39.es/ecma262/#sec-tonumber)
///
/// The abstract operation ToNumber takes argument argument (an ECMAScript
/// language value) and returns either a normal completion containing a
/// Number or a throw completion. It converts argument to a value of type
/// Number.
pub fn to_number(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    match argument {
        // 1. If argument is a Number, return argument.
        Value::Number(number) => Ok(number),
        // 2. If argument is either a Symbol or a BigInt, throw a TypeError exception.
        Value::Symbol(_) => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert a Symbol value to a number",
        )),
        // 3. If argument is undefined, return NaN.
        Value::Undefined => Ok(f64::NAN),
        // 4. If argument is either null or false, return +0𝔽.
        // 5. If argument is true, return 1𝔽.
        Value::Null => Ok(0.0),
        Value::Boolean(boolean) => Ok(if boolean { 1.0 } else { 0.0 }),
        // 6. If argument is a String, return StringToNumber(argument).
        Value::String(string) => Ok(string_to_number(string.as_str(agent))),
        // 7. Assert: argument is an Object.
        Value::Object(_) => {
            // 8. Let primValue be ? ToPrimitive(argument, NUMBER).
            let prim_value = to_primitive(agent, argument, Some(PreferredType::Number))?;
            // 9. Assert: primValue is not an Object.
            debug_assert!(!prim_value.is_object());
            // 10. Return ? ToNumber(primValue).
            to_number(agent, prim_value)
        }
    }
}

/// WhiteSpace and LineTerminator code points, which StringToNumber trims.
/// U+0085 is Unicode white space but not ECMAScript white space.
fn is_trimmable_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{FEFF}'
            | '\u{000A}'
            | '\u{000D}'
            | '\u{2028}'
            | '\u{2029}'
    ) || (c != '\u{0085}' && c.is_whitespace())
}

/// ### [7.1.4.1.1 StringToNumber ( str )](https://tc39.es/ecma262/#sec-stringtonumber)
///
/// Parses a StringNumericLiteral. Anything that does not match the grammar
/// yields NaN.
pub fn string_to_number(str: &str) -> f64 {
    let literal = str.trim_matches(is_trimmable_whitespace);
    // StrWhiteSpace only: the mathematical value is 0.
    if literal.is_empty() {
        return 0.0;
    }
    // NonDecimalIntegerLiteral, which takes no sign.
    let bytes = literal.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return parse_non_decimal_integer(&literal[2..], radix);
        }
    }
    // StrDecimalLiteral with an optional sign.
    let (negative, unsigned) = match bytes[0] {
        b'-' => (true, &literal[1..]),
        b'+' => (false, &literal[1..]),
        _ => (false, literal),
    };
    let magnitude = if unsigned == "Infinity" {
        f64::INFINITY
    } else if is_str_unsigned_decimal_literal(unsigned) {
        fast_float::parse::<f64, _>(unsigned).unwrap_or(f64::NAN)
    } else {
        return f64::NAN;
    };
    if negative { -magnitude } else { magnitude }
}

/// Parses the digits of a `0x`, `0o` or `0b` literal. The leading 64
/// significant bits are kept exactly and every later bit only feeds a sticky
/// flag, so the result is rounded to nearest-even exactly once.
fn parse_non_decimal_integer(digits: &str, radix: u32) -> f64 {
    debug_assert!(matches!(radix, 2 | 8 | 16));
    if digits.is_empty() {
        return f64::NAN;
    }
    let bits_per_digit = radix.trailing_zeros();
    let mut mantissa = 0u64;
    let mut dropped_bits = 0i32;
    let mut sticky = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            return f64::NAN;
        };
        for shift in (0..bits_per_digit).rev() {
            let bit = (digit >> shift) & 1;
            if mantissa >> 63 == 0 {
                mantissa = (mantissa << 1) | u64::from(bit);
            } else {
                dropped_bits = dropped_bits.saturating_add(1);
                sticky |= bit == 1;
            }
        }
    }
    let significant_bits = 64 - mantissa.leading_zeros();
    if significant_bits <= f64::MANTISSA_DIGITS {
        return mantissa as f64;
    }
    let excess = significant_bits - f64::MANTISSA_DIGITS;
    let mut kept = mantissa >> excess;
    let remainder = mantissa & ((1u64 << excess) - 1);
    let half = 1u64 << (excess - 1);
    if remainder > half || (remainder == half && (sticky || kept & 1 == 1)) {
        kept += 1;
    }
    let exponent = dropped_bits.saturating_add(excess as i32);
    // Both factors are exact; only an overflow to infinity can round.
    kept as f64 * 2f64.powi(exponent)
}

/// StrUnsignedDecimalLiteral without the `Infinity` alternative.
fn is_str_unsigned_decimal_literal(literal: &str) -> bool {
    fn skip_digits(bytes: &[u8], mut index: usize) -> usize {
        while index < bytes.len() && bytes[index].is_ascii_digit() {
            index += 1;
        }
        index
    }

    let bytes = literal.as_bytes();
    let integer_end = skip_digits(bytes, 0);
    let mut index = integer_end;
    let mut fraction_digits = 0;
    if bytes.get(index) == Some(&b'.') {
        let fraction_end = skip_digits(bytes, index + 1);
        fraction_digits = fraction_end - index - 1;
        index = fraction_end;
    }
    if integer_end == 0 && fraction_digits == 0 {
        return false;
    }
    if matches!(bytes.get(index), Some(b'e' | b'E')) {
        index += 1;
        if matches!(bytes.get(index), Some(b'+' | b'-')) {
            index += 1;
        }
        let exponent_end = skip_digits(bytes, index);
        if exponent_end == index {
            return false;
        }
        index = exponent_end;
    }
    index == bytes.len()
}

/// ### [7.1.5 ToIntegerOrInfinity ( argument )](https://tc39.es/ecma262/#sec-tointegerorinfinity)
///
/// The abstract operation ToIntegerOrInfinity takes argument argument (an
/// ECMAScript language value) and returns either a normal completion
/// containing either an integer, +∞, or -∞, or a throw completion. It
/// converts argument to an integer representing its Number value with
/// fractional part truncated, or to +∞ or -∞ when that Number value is
/// infinite.
pub fn to_integer_or_infinity(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    Ok(to_integer_or_infinity_number(number))
}

pub fn to_integer_or_infinity_number(number: f64) -> f64 {
    // 2. If number is one of NaN, +0𝔽, or -0𝔽, return 0.
    if number.is_nan() || number == 0.0 {
        return 0.0;
    }
    // 3. If number is +∞𝔽, return +∞.
    // 4. If number is -∞𝔽, return -∞.
    if number.is_infinite() {
        return number;
    }
    // 5. Return truncate(ℝ(number)).
    let integer = number.trunc();
    // Truncating a small negative fraction gives -0, which is not an integer.
    if integer == 0.0 { 0.0 } else { integer }
}

/// The modulo step shared by every fixed-width integer conversion:
/// `truncate(number) modulo 2^bits`, with NaN and the infinities mapping to
/// 0. Works on the exact binary decomposition of `number`, so every width up
/// to 64 bits is exact.
pub fn to_uint_n_number(number: f64, bits: u32) -> u64 {
    debug_assert!((1..=64).contains(&bits));
    // 2. If number is not finite or number is either +0𝔽 or -0𝔽, return +0𝔽.
    if !number.is_finite() || number == 0.0 {
        return 0;
    }
    // 3. Let int be truncate(ℝ(number)).
    // number = sign * mantissa * 2^exponent
    let (mantissa, exponent, sign) = num_traits::Float::integer_decode(number);
    let exponent = i32::from(exponent);
    let magnitude = if exponent >= 0 {
        // Bits shifted past the top are multiples of 2^64.
        mantissa.checked_shl(exponent as u32).unwrap_or(0)
    } else {
        mantissa.checked_shr(exponent.unsigned_abs()).unwrap_or(0)
    };
    let int = if sign < 0 {
        magnitude.wrapping_neg()
    } else {
        magnitude
    };
    // 4. Let intNbit be int modulo 2^N.
    if bits == 64 {
        int
    } else {
        int & ((1u64 << bits) - 1)
    }
}

/// The signed counterpart of [`to_uint_n_number`]: maps the unsigned result
/// into the signed range by subtracting `2^bits` once it is at or above
/// `2^(bits - 1)`.
pub fn to_int_n_number(number: f64, bits: u32) -> i64 {
    let unsigned = to_uint_n_number(number, bits);
    let half = 1u128 << (bits - 1);
    if u128::from(unsigned) >= half {
        (i128::from(unsigned) - (1i128 << bits)) as i64
    } else {
        unsigned as i64
    }
}

/// ToUintN for `bits` between 1 and 64.
pub fn to_uint_n(agent: &mut Agent, argument: Value, bits: u32) -> JsResult<u64> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    Ok(to_uint_n_number(number, bits))
}

/// ToIntN for `bits` between 1 and 64.
pub fn to_int_n(agent: &mut Agent, argument: Value, bits: u32) -> JsResult<i64> {
    let number = to_number(agent, argument)?;
    Ok(to_int_n_number(number, bits))
}

/// ### [7.1.6 ToInt32 ( argument )](https://tc39.es/ecma262/#sec-toint32)
///
/// The abstract operation ToInt32 takes argument argument (an ECMAScript
/// language value) and returns either a normal completion containing an
/// integral Number or a throw completion. It converts argument to one of 2^32
/// integral Number values in the inclusive interval from 𝔽(-2^31) to
/// 𝔽(2^31 - 1).
pub fn to_int32(agent: &mut Agent, argument: Value) -> JsResult<i32> {
    to_int_n(agent, argument, 32).map(|value| value as i32)
}

pub fn to_int32_number(number: f64) -> i32 {
    to_int_n_number(number, 32) as i32
}

/// ### [7.1.7 ToUint32 ( argument )](https://tc39.es/ecma262/#sec-touint32)
pub fn to_uint32(agent: &mut Agent, argument: Value) -> JsResult<u32> {
    to_uint_n(agent, argument, 32).map(|value| value as u32)
}

pub fn to_uint32_number(number: f64) -> u32 {
    to_uint_n_number(number, 32) as u32
}

/// ### [7.1.8 ToInt16 ( argument )](https://tc39.es/ecma262/#sec-toint16)
pub fn to_int16(agent: &mut Agent, argument: Value) -> JsResult<i16> {
    to_int_n(agent, argument, 16).map(|value| value as i16)
}

/// ### [7.1.9 ToUint16 ( argument )](https://tc39.es/ecma262/#sec-touint16)
pub fn to_uint16(agent: &mut Agent, argument: Value) -> JsResult<u16> {
    to_uint_n(agent, argument, 16).map(|value| value as u16)
}

/// ### [7.1.10 ToInt8 ( argument )](https://tc39.es/ecma262/#sec-toint8)
pub fn to_int8(agent: &mut Agent, argument: Value) -> JsResult<i8> {
    to_int_n(agent, argument, 8).map(|value| value as i8)
}

/// ### [7.1.11 ToUint8 ( argument )](https://tc39.es/ecma262/#sec-touint8)
pub fn to_uint8(agent: &mut Agent, argument: Value) -> JsResult<u8> {
    to_uint_n(agent, argument, 8).map(|value| value as u8)
}

/// ### [7.1.12 ToUint8Clamp ( argument )](https://tc39.es/ecma262/#sec-touint8clamp)
///
/// The abstract operation ToUint8Clamp takes argument argument (an ECMAScript
/// language value) and returns either a normal completion containing an
/// integral Number or a throw completion. It converts argument to one of 2^8
/// integral Number values in the inclusive interval from +0𝔽 to 255𝔽.
pub fn to_uint8_clamp(agent: &mut Agent, argument: Value) -> JsResult<u8> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    Ok(to_uint8_clamp_number(number))
}

pub fn to_uint8_clamp_number(number: f64) -> u8 {
    // 2. If number is NaN, return +0𝔽.
    if number.is_nan() {
        return 0;
    }
    // 3. Let mv be the extended mathematical value of number.
    // 4. Let clamped be the result of clamping mv between 0 and 255.
    let clamped = number.clamp(0.0, 255.0);
    // 5. Let f be floor(clamped).
    let f = clamped.floor();
    // 6. If clamped < f + 0.5, return 𝔽(f).
    // 7. If clamped > f + 0.5, return 𝔽(f + 1).
    // 8. If f is even, return 𝔽(f). Otherwise, return 𝔽(f + 1).
    let rounded = if clamped < f + 0.5 {
        f
    } else if clamped > f + 0.5 || f % 2.0 != 0.0 {
        f + 1.0
    } else {
        f
    };
    rounded as u8
}

/// ### [7.1.17 ToString ( argument )](https://tc39.es/ecma262/#sec-tostring)
///
/// The abstract operation ToString takes argument argument (an ECMAScript
/// language value) and returns either a normal completion containing a String
/// or a throw completion. It converts argument to a value of type String.
pub fn to_string(agent: &mut Agent, argument: Value) -> JsResult<String> {
    match argument {
        // 1. If argument is a String, return argument.
        Value::String(string) => Ok(string),
        // 2. If argument is a Symbol, throw a TypeError exception.
        Value::Symbol(_) => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert a Symbol value to a string",
        )),
        // 3. If argument is undefined, return "undefined".
        Value::Undefined => Ok(String::from_str(agent, "undefined")),
        // 4. If argument is null, return "null".
        Value::Null => Ok(String::from_str(agent, "null")),
        // 5. If argument is true, return "true".
        // 6. If argument is false, return "false".
        Value::Boolean(boolean) => Ok(String::from_str(
            agent,
            if boolean { "true" } else { "false" },
        )),
        // 7. If argument is a Number, return Number::toString(argument, 10).
        Value::Number(number) => Ok(number_to_string(agent, number)),
        // 9. Assert: argument is an Object.
        Value::Object(_) => {
            // 10. Let primValue be ? ToPrimitive(argument, STRING).
            let prim_value = to_primitive(agent, argument, Some(PreferredType::String))?;
            // 11. Assert: primValue is not an Object.
            debug_assert!(!prim_value.is_object());
            // 12. Return ? ToString(primValue).
            to_string(agent, prim_value)
        }
    }
}

/// ### [6.1.6.1.20 Number::toString ( x, radix )](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// Radix 10 only. Produces the shortest digit string that round-trips, laid
/// out with the ECMAScript exponent rules.
pub fn number_to_string(agent: &mut Agent, x: f64) -> String {
    String::from_string(agent, number_to_string_radix_10(x))
}

pub fn number_to_string_radix_10(x: f64) -> std::string::String {
    // 1. If x is NaN, return "NaN".
    if x.is_nan() {
        return "NaN".to_owned();
    }
    // 2. If x is either +0𝔽 or -0𝔽, return "0".
    if x == 0.0 {
        return "0".to_owned();
    }
    // 4. If x is +∞𝔽, return "Infinity".
    // 3. If x < -0𝔽, return the string-concatenation of "-" and Number::toString(-x, radix).
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let mut buffer = ryu_js::Buffer::new();
    buffer.format_finite(x).to_owned()
}

/// ### [7.1.18 ToObject ( argument )](https://tc39.es/ecma262/#sec-toobject)
///
/// The abstract operation ToObject takes argument argument (an ECMAScript
/// language value) and returns either a normal completion containing an
/// Object or a throw completion. It converts argument to a value of type
/// Object.
pub fn to_object(agent: &mut Agent, argument: Value) -> JsResult<Object> {
    let data = match argument {
        Value::Undefined | Value::Null => {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Cannot convert undefined or null to object",
            ));
        }
        Value::Object(object) => return Ok(object),
        Value::Boolean(boolean) => PrimitiveObjectData::Boolean(boolean),
        Value::Number(number) => PrimitiveObjectData::Number(number),
        Value::String(string) => PrimitiveObjectData::String(string),
        Value::Symbol(symbol) => PrimitiveObjectData::Symbol(symbol),
    };
    Ok(create_primitive_object(agent, data))
}

/// ### [7.1.19 ToPropertyKey ( argument )](https://tc39.es/ecma262/#sec-topropertykey)
pub fn to_property_key(agent: &mut Agent, argument: Value) -> JsResult<PropertyKey> {
    // 1. Let key be ? ToPrimitive(argument, STRING).
    let key = to_primitive(agent, argument, Some(PreferredType::String))?;
    // 2. If key is a Symbol, then
    if let Value::Symbol(symbol) = key {
        // a. Return key.
        return Ok(PropertyKey::Symbol(symbol));
    }
    // 3. Return ! ToString(key).
    Ok(PropertyKey::String(to_string(agent, key)?))
}

/// ### [7.1.20 ToLength ( argument )](https://tc39.es/ecma262/#sec-tolength)
pub fn to_length(agent: &mut Agent, argument: Value) -> JsResult<u64> {
    // 1. Let len be ? ToIntegerOrInfinity(argument).
    let len = to_integer_or_infinity(agent, argument)?;
    // 2. If len ≤ 0, return +0𝔽.
    if len <= 0.0 {
        return Ok(0);
    }
    // 3. Return 𝔽(min(len, 2^53 - 1)).
    Ok(len.min(MAX_SAFE_INTEGER).to_u64().unwrap_or(0))
}

/// ### [7.1.21 CanonicalNumericIndexString ( argument )](https://tc39.es/ecma262/#sec-canonicalnumericindexstring)
///
/// Returns the Number that `argument` is the canonical rendering of, or
/// None when it is not one.
pub fn canonical_numeric_index_string(agent: &Agent, argument: String) -> Option<f64> {
    let argument = argument.as_str(agent);
    // 1. If argument is "-0", return -0𝔽.
    if argument == "-0" {
        return Some(-0.0);
    }
    // 2. Let n be ! ToNumber(argument).
    let n = string_to_number(argument);
    // 3. If ! ToString(n) is argument, return n.
    // 4. Return undefined.
    (number_to_string_radix_10(n) == argument).then_some(n)
}

/// ### [7.1.22 ToIndex ( value )](https://tc39.es/ecma262/#sec-toindex)
pub fn to_index(agent: &mut Agent, value: Value) -> JsResult<u64> {
    // 1. Let integer be ? ToIntegerOrInfinity(value).
    let integer = to_integer_or_infinity(agent, value)?;
    // 2. If integer is not in the inclusive interval from 0 to 2^53 - 1, throw a RangeError exception.
    // 3. Return integer.
    match integer.to_u64() {
        Some(index) if integer <= MAX_SAFE_INTEGER => Ok(index),
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "Index is out of range",
        )),
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::create_data_property_or_throw,
        builtins::{
            ArgumentsList, Behaviour, BuiltinFunctionArgs, create_builtin_function,
            error::error_kind, ordinary::ordinary_object_create,
        },
        execution::{DefaultHostHooks, JsError, agent::Options, initialize_default_realm},
        types::Symbol,
    };

    fn new_agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    fn thrown_kind(agent: &Agent, error: JsError) -> ExceptionType {
        let Value::Object(object) = error.value() else {
            panic!("thrown value is not an object");
        };
        error_kind(agent, object).unwrap()
    }

    #[test]
    fn string_to_number_literals() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number(" \n\t\u{FEFF}\u{2028} "), 0.0);
        assert_eq!(string_to_number("  42  "), 42.0);
        assert_eq!(string_to_number("-1.5e3"), -1500.0);
        assert_eq!(string_to_number("+.5"), 0.5);
        assert_eq!(string_to_number("5."), 5.0);
        assert_eq!(string_to_number("0x1F"), 31.0);
        assert_eq!(string_to_number("0o17"), 15.0);
        assert_eq!(string_to_number("0B101"), 5.0);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(string_to_number("Infinity"), f64::INFINITY);
        assert!(string_to_number("-0").is_sign_negative());
        assert_eq!(string_to_number("0xFFFFFFFFFFFFFFFF"), 18446744073709551616.0);
        for rejected in [
            "-0x10", "0x", "infinity", "inf", "NaN", "1_000", "1e", ".", "e5", "12px", "\u{85}1",
        ] {
            assert!(string_to_number(rejected).is_nan(), "{rejected:?}");
        }
    }

    #[test]
    fn non_decimal_literals_round_once() {
        assert_eq!(string_to_number("0x46d1fb6dfbdb0ae07552"), 3.3443914072607466e23);
        // 2^53 + 1 is a tie and rounds to even; 2^53 + 3 rounds up.
        assert_eq!(string_to_number("0x20000000000001"), 9007199254740992.0);
        assert_eq!(string_to_number("0x20000000000003"), 9007199254740996.0);
        // A tie broken by a set bit past the first 64 rounds up.
        let literal = format!("0b1{}1{}1", "0".repeat(52), "0".repeat(20));
        assert_eq!(string_to_number(&literal), 2f64.powi(74) + 2f64.powi(22));
        let literal = format!("0b1{}1{}", "0".repeat(52), "0".repeat(21));
        assert_eq!(string_to_number(&literal), 2f64.powi(74));
        assert_eq!(string_to_number("0x0000000000000000000000000001"), 1.0);
        let huge = format!("0x1{}", "0".repeat(300));
        assert_eq!(string_to_number(&huge), f64::INFINITY);
        assert!(string_to_number("0x1g").is_nan());
    }

    #[test]
    fn number_to_string_layout() {
        assert_eq!(number_to_string_radix_10(-0.0), "0");
        assert_eq!(number_to_string_radix_10(1.0), "1");
        assert_eq!(number_to_string_radix_10(0.1), "0.1");
        assert_eq!(number_to_string_radix_10(-1.5), "-1.5");
        assert_eq!(number_to_string_radix_10(1e21), "1e+21");
        assert_eq!(number_to_string_radix_10(1e-7), "1e-7");
        assert_eq!(number_to_string_radix_10(123456789012345680000.0), "123456789012345680000");
        assert_eq!(number_to_string_radix_10(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn integer_conversions() {
        assert_eq!(to_integer_or_infinity_number(-0.5), 0.0);
        assert!(to_integer_or_infinity_number(-0.5).is_sign_positive());
        assert_eq!(to_integer_or_infinity_number(f64::NAN), 0.0);
        assert_eq!(to_integer_or_infinity_number(-2.7), -2.0);
        assert_eq!(to_integer_or_infinity_number(f64::INFINITY), f64::INFINITY);

        assert_eq!(to_int32_number(2147483648.0), -2147483648);
        assert_eq!(to_int32_number(4294967295.0), -1);
        assert_eq!(to_int32_number(-1.9), -1);
        assert_eq!(to_uint32_number(-1.0), 4294967295);
        assert_eq!(to_int_n_number(128.0, 8), -128);
        assert_eq!(to_int_n_number(65535.0, 16), -1);
        assert_eq!(to_uint_n_number(300.0, 8), 44);
        assert_eq!(to_uint_n_number(f64::INFINITY, 32), 0);
    }

    #[test]
    fn wide_integer_conversions() {
        assert_eq!(to_int_n_number(-1.0, 64), -1);
        assert_eq!(to_uint_n_number(-1.0, 64), u64::MAX);
        assert_eq!(to_uint_n_number(-1.0, 60), (1 << 60) - 1);
        assert_eq!(to_int_n_number(-1.5, 54), -1);
        assert_eq!(to_uint_n_number(-0.5, 64), 0);
        assert_eq!(to_int_n_number(-9007199254740993.0, 64), -9007199254740992);
        // 2^63 wraps to the most negative value; 2^64 and beyond vanish.
        assert_eq!(to_int_n_number(9223372036854775808.0, 64), i64::MIN);
        assert_eq!(to_uint_n_number(18446744073709551616.0, 64), 0);
        assert_eq!(to_uint_n_number(-18446744073709551616.0 - 4096.0, 64), 0u64.wrapping_sub(4096));
        assert_eq!(to_uint_n_number(f64::MAX, 64), 0);
        assert_eq!(to_uint_n_number(f64::MIN_POSITIVE, 64), 0);
    }

    #[test]
    fn uint8_clamp_rounds_half_to_even() {
        assert_eq!(to_uint8_clamp_number(-5.0), 0);
        assert_eq!(to_uint8_clamp_number(300.0), 255);
        assert_eq!(to_uint8_clamp_number(127.5), 128);
        assert_eq!(to_uint8_clamp_number(0.5), 0);
        assert_eq!(to_uint8_clamp_number(1.5), 2);
        assert_eq!(to_uint8_clamp_number(2.5), 2);
        assert_eq!(to_uint8_clamp_number(2.6), 3);
        assert_eq!(to_uint8_clamp_number(f64::NAN), 0);
    }

    #[test]
    fn to_boolean_table() {
        let mut agent = new_agent();
        let empty = Value::from_str(&mut agent, "");
        let zero = Value::from_str(&mut agent, "0");
        assert!(!to_boolean(&agent, Value::Undefined));
        assert!(!to_boolean(&agent, Value::Null));
        assert!(!to_boolean(&agent, Value::from(-0.0)));
        assert!(!to_boolean(&agent, Value::nan()));
        assert!(!to_boolean(&agent, empty));
        assert!(to_boolean(&agent, zero));
        let object = ordinary_object_create(&mut agent, None);
        assert!(to_boolean(&agent, object.into_value()));
        let symbol = Symbol::new(&mut agent, None);
        assert!(to_boolean(&agent, symbol.into()));
    }

    #[test]
    fn symbols_do_not_convert() {
        let mut agent = new_agent();
        let description = String::from_str(&mut agent, "key");
        let key = Symbol::new(&mut agent, Some(description));
        let symbol = key.into();
        let error = to_number(&mut agent, symbol).unwrap_err();
        assert_eq!(thrown_kind(&agent, error), ExceptionType::TypeError);
        let error = to_string(&mut agent, symbol).unwrap_err();
        assert_eq!(thrown_kind(&agent, error), ExceptionType::TypeError);
        assert_eq!(
            to_property_key(&mut agent, symbol).unwrap(),
            PropertyKey::Symbol(key)
        );
    }

    #[test]
    fn objects_convert_through_methods() {
        let mut agent = new_agent();
        let object_prototype = agent.current_realm_record().intrinsics().object_prototype();
        let object = ordinary_object_create(&mut agent, Some(object_prototype));
        // Object.prototype.toString gives "[object Object]", which is NaN.
        assert!(to_number(&mut agent, object.into_value()).unwrap().is_nan());
        let string = to_string(&mut agent, object.into_value()).unwrap();
        assert_eq!(string.as_str(&agent), "[object Object]");

        fn value_of(_: &mut Agent, _: Value, _: ArgumentsList<'_>) -> JsResult<Value> {
            Ok(Value::from(7))
        }
        let value_of = create_builtin_function(
            &mut agent,
            Behaviour::Regular(value_of),
            BuiltinFunctionArgs::new(0, "valueOf"),
        );
        let key = PropertyKey::from_str(&mut agent, "valueOf");
        create_data_property_or_throw(&mut agent, object, key, value_of.into_value()).unwrap();
        assert_eq!(to_number(&mut agent, object.into_value()).unwrap(), 7.0);
        // The string hint still prefers toString.
        let string = to_string(&mut agent, object.into_value()).unwrap();
        assert_eq!(string.as_str(&agent), "[object Object]");
    }

    #[test]
    fn exotic_to_primitive_receives_hint() {
        let mut agent = new_agent();
        fn echo_hint(_: &mut Agent, _: Value, arguments: ArgumentsList<'_>) -> JsResult<Value> {
            Ok(arguments.get(0))
        }
        fn returns_object(
            agent: &mut Agent,
            _: Value,
            _: ArgumentsList<'_>,
        ) -> JsResult<Value> {
            Ok(ordinary_object_create(agent, None).into_value())
        }
        let object = ordinary_object_create(&mut agent, None);
        let to_prim = create_builtin_function(
            &mut agent,
            Behaviour::Regular(echo_hint),
            BuiltinFunctionArgs::new(1, "[Symbol.toPrimitive]"),
        );
        let key = PropertyKey::from(WellKnownSymbolIndexes::ToPrimitive);
        create_data_property_or_throw(&mut agent, object, key, to_prim.into_value()).unwrap();
        let hint = to_primitive(&mut agent, object.into_value(), None).unwrap();
        assert_eq!(hint.to_string(&mut agent).unwrap().as_str(&agent), "default");
        let hint = to_string(&mut agent, object.into_value()).unwrap();
        assert_eq!(hint.as_str(&agent), "string");

        let bad = create_builtin_function(
            &mut agent,
            Behaviour::Regular(returns_object),
            BuiltinFunctionArgs::new(1, "[Symbol.toPrimitive]"),
        );
        let other = ordinary_object_create(&mut agent, None);
        create_data_property_or_throw(&mut agent, other, key, bad.into_value()).unwrap();
        let error = to_primitive(&mut agent, other.into_value(), None).unwrap_err();
        assert_eq!(thrown_kind(&agent, error), ExceptionType::TypeError);
    }

    #[test]
    fn to_object_wraps_primitives() {
        let mut agent = new_agent();
        let error = to_object(&mut agent, Value::Null).unwrap_err();
        assert_eq!(thrown_kind(&agent, error), ExceptionType::TypeError);
        let wrapper = to_object(&mut agent, Value::from(3)).unwrap();
        let number_prototype = agent.current_realm_record().intrinsics().number_prototype();
        assert_eq!(agent[wrapper].prototype, Some(number_prototype));
        assert_eq!(to_number(&mut agent, wrapper.into_value()).unwrap(), 3.0);
    }

    #[test]
    fn length_and_index() {
        let mut agent = new_agent();
        assert_eq!(to_length(&mut agent, Value::from(-3)).unwrap(), 0);
        assert_eq!(to_length(&mut agent, Value::pos_inf()).unwrap(), 9007199254740991);
        assert_eq!(to_length(&mut agent, Value::from(3.9)).unwrap(), 3);
        assert_eq!(to_index(&mut agent, Value::Undefined).unwrap(), 0);
        let error = to_index(&mut agent, Value::from(-1)).unwrap_err();
        assert_eq!(thrown_kind(&agent, error), ExceptionType::RangeError);
        let error = to_index(&mut agent, Value::pos_inf()).unwrap_err();
        assert_eq!(thrown_kind(&agent, error), ExceptionType::RangeError);
    }

    #[test]
    fn canonical_numeric_strings() {
        let mut agent = new_agent();
        let cases = [("-0", Some(-0.0)), ("1", Some(1.0)), ("1.5", Some(1.5)), ("01", None)];
        for (source, expected) in cases {
            let string = String::from_str(&mut agent, source);
            assert_eq!(canonical_numeric_index_string(&agent, string), expected);
        }
        let string = String::from_str(&mut agent, "NaN");
        assert!(canonical_numeric_index_string(&agent, string).unwrap().is_nan());
    }

    proptest! {
        #[test]
        fn int32_matches_wrapping_cast(value in -(1i64 << 53)..(1i64 << 53)) {
            prop_assert_eq!(to_int32_number(value as f64), value as i32);
            prop_assert_eq!(to_uint32_number(value as f64), value as u32);
        }

        #[test]
        fn int32_wraps_modulo_two_to_the_32(
            integer in -(1i64 << 50)..(1i64 << 50),
            fraction in 0.0f64..1.0,
        ) {
            // Keep the fraction on the side of zero that truncation drops.
            let value = integer as f64 + if integer < 0 { -fraction } else { fraction };
            prop_assume!(value.trunc() == integer as f64);
            let shifted = integer as f64 + 4294967296.0;
            prop_assert_eq!(to_int32_number(value), to_int32_number(shifted));
            prop_assert_eq!(to_uint32_number(value) as i32, to_int32_number(value));
        }

        #[test]
        fn wide_conversions_are_exact_for_negative_inputs(
            mantissa in 1u64..(1u64 << 53),
            exponent in 0i32..60,
            bits in 54u32..=64,
        ) {
            let value = -(mantissa as f64) * 2f64.powi(exponent);
            let exact = -(i128::from(mantissa) << exponent);
            let modulus = 1i128 << bits;
            let unsigned = exact.rem_euclid(modulus);
            prop_assert_eq!(i128::from(to_uint_n_number(value, bits)), unsigned);
            let signed = if unsigned >= modulus / 2 { unsigned - modulus } else { unsigned };
            prop_assert_eq!(i128::from(to_int_n_number(value, bits)), signed);
        }

        #[test]
        fn uint8_clamp_stays_in_range(value in any::<f64>()) {
            let clamped = to_uint8_clamp_number(value);
            if value <= 0.0 || value.is_nan() {
                prop_assert_eq!(clamped, 0);
            } else if value >= 255.0 {
                prop_assert_eq!(clamped, 255);
            } else {
                prop_assert!((f64::from(clamped) - value).abs() <= 0.5);
            }
        }

        #[test]
        fn boolean_of_number(value in any::<f64>()) {
            prop_assert_eq!(to_boolean_number(value), !(value == 0.0 || value.is_nan()));
        }

        #[test]
        fn number_string_round_trip(value in any::<f64>()) {
            prop_assume!(value.is_finite());
            let rendered = number_to_string_radix_10(value);
            let parsed = string_to_number(&rendered);
            // -0 renders as "0".
            prop_assert_eq!(parsed, if value == 0.0 { 0.0 } else { value });
        }
    }
}
