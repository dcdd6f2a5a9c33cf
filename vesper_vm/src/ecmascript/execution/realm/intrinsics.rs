// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [6.1.7.4 Well-Known Intrinsic Objects](https://tc39.es/ecma262/#sec-well-known-intrinsic-objects)

use super::Realm;
use crate::ecmascript::{
    builtins::{
        builders::IntrinsicsBuilder,
        error,
        fundamental_objects::{
            boolean_objects, function_objects, global_functions, number_objects, object_objects,
            string_objects, symbol_objects,
        },
    },
    execution::{Agent, agent::ExceptionType},
    types::{Object, ObjectHeapData, ObjectKind},
};

#[derive(Debug, Clone)]
pub struct Intrinsics {
    /// %Boolean%
    boolean: Object,
    /// %Boolean.prototype%
    boolean_prototype: Object,
    /// %Error%
    error: Object,
    /// %Error.prototype%
    error_prototype: Object,
    /// %EvalError%
    eval_error: Object,
    /// %EvalError.prototype%
    eval_error_prototype: Object,
    /// %Function.prototype%
    function_prototype: Object,
    /// %isFinite%
    is_finite: Object,
    /// %isNaN%
    is_nan: Object,
    /// %Number%
    number: Object,
    /// %Number.prototype%
    number_prototype: Object,
    /// %Object%
    object: Object,
    /// %Object.prototype%
    object_prototype: Object,
    /// %RangeError%
    range_error: Object,
    /// %RangeError.prototype%
    range_error_prototype: Object,
    /// %ReferenceError%
    reference_error: Object,
    /// %ReferenceError.prototype%
    reference_error_prototype: Object,
    /// %String%
    string: Object,
    /// %String.prototype%
    string_prototype: Object,
    /// %Symbol%
    symbol: Object,
    /// %Symbol.prototype%
    symbol_prototype: Object,
    /// %SyntaxError%
    syntax_error: Object,
    /// %SyntaxError.prototype%
    syntax_error_prototype: Object,
    /// %ThrowTypeError%
    throw_type_error: Object,
    /// %TypeError%
    type_error: Object,
    /// %TypeError.prototype%
    type_error_prototype: Object,
    /// %URIError%
    uri_error: Object,
    /// %URIError.prototype%
    uri_error_prototype: Object,
}

/// Enumeration of intrinsics intended to be used as the \[\[Prototype]] value
/// of an object. Used in GetPrototypeFromConstructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoIntrinsics {
    Boolean,
    Error,
    EvalError,
    Function,
    Number,
    Object,
    RangeError,
    ReferenceError,
    String,
    Symbol,
    SyntaxError,
    TypeError,
    UriError,
}

impl From<ExceptionType> for ProtoIntrinsics {
    fn from(value: ExceptionType) -> Self {
        match value {
            ExceptionType::Error => ProtoIntrinsics::Error,
            ExceptionType::EvalError => ProtoIntrinsics::EvalError,
            ExceptionType::RangeError => ProtoIntrinsics::RangeError,
            ExceptionType::ReferenceError => ProtoIntrinsics::ReferenceError,
            ExceptionType::SyntaxError => ProtoIntrinsics::SyntaxError,
            ExceptionType::TypeError => ProtoIntrinsics::TypeError,
            ExceptionType::UriError => ProtoIntrinsics::UriError,
        }
    }
}

impl Intrinsics {
    /// ### [9.3.2 CreateIntrinsics ( realmRec )](https://tc39.es/ecma262/#sec-createintrinsics)
    ///
    /// Creation is ordered so that every object exists before anything
    /// refers to it: %Object.prototype% first, then %Function.prototype%,
    /// then everything that is a function.
    pub(crate) fn create(agent: &mut Agent, realm: Realm) -> Self {
        let object_prototype = agent
            .heap
            .create_object(ObjectHeapData::new(None, ObjectKind::Ordinary));
        let function_prototype =
            function_objects::create_function_prototype(agent, realm, object_prototype);
        let builder = IntrinsicsBuilder::new(realm, object_prototype, function_prototype);

        let object = object_objects::create_intrinsics(agent, &builder);
        function_objects::create_prototype_methods(agent, &builder);
        let throw_type_error = function_objects::create_throw_type_error(agent, &builder);

        let (error, error_prototype) = error::create_error_intrinsics(agent, &builder);
        let mut native_error = |kind| {
            error::create_native_error_intrinsics(agent, &builder, kind, error, error_prototype)
        };
        let (eval_error, eval_error_prototype) = native_error(ExceptionType::EvalError);
        let (range_error, range_error_prototype) = native_error(ExceptionType::RangeError);
        let (reference_error, reference_error_prototype) =
            native_error(ExceptionType::ReferenceError);
        let (syntax_error, syntax_error_prototype) = native_error(ExceptionType::SyntaxError);
        let (type_error, type_error_prototype) = native_error(ExceptionType::TypeError);
        let (uri_error, uri_error_prototype) = native_error(ExceptionType::UriError);

        let (boolean, boolean_prototype) = boolean_objects::create_intrinsics(agent, &builder);
        let (number, number_prototype) = number_objects::create_intrinsics(agent, &builder);
        let (string, string_prototype) = string_objects::create_intrinsics(agent, &builder);
        let (symbol, symbol_prototype) = symbol_objects::create_intrinsics(agent, &builder);

        let is_finite = global_functions::create_is_finite(agent, &builder);
        let is_nan = global_functions::create_is_nan(agent, &builder);

        Self {
            boolean,
            boolean_prototype,
            error,
            error_prototype,
            eval_error,
            eval_error_prototype,
            function_prototype,
            is_finite,
            is_nan,
            number,
            number_prototype,
            object,
            object_prototype,
            range_error,
            range_error_prototype,
            reference_error,
            reference_error_prototype,
            string,
            string_prototype,
            symbol,
            symbol_prototype,
            syntax_error,
            syntax_error_prototype,
            throw_type_error,
            type_error,
            type_error_prototype,
            uri_error,
            uri_error_prototype,
        }
    }

    pub fn get_intrinsic_default_proto(&self, intrinsic_default_proto: ProtoIntrinsics) -> Object {
        match intrinsic_default_proto {
            ProtoIntrinsics::Boolean => self.boolean_prototype,
            ProtoIntrinsics::Error => self.error_prototype,
            ProtoIntrinsics::EvalError => self.eval_error_prototype,
            ProtoIntrinsics::Function => self.function_prototype,
            ProtoIntrinsics::Number => self.number_prototype,
            ProtoIntrinsics::Object => self.object_prototype,
            ProtoIntrinsics::RangeError => self.range_error_prototype,
            ProtoIntrinsics::ReferenceError => self.reference_error_prototype,
            ProtoIntrinsics::String => self.string_prototype,
            ProtoIntrinsics::Symbol => self.symbol_prototype,
            ProtoIntrinsics::SyntaxError => self.syntax_error_prototype,
            ProtoIntrinsics::TypeError => self.type_error_prototype,
            ProtoIntrinsics::UriError => self.uri_error_prototype,
        }
    }

    /// The constructor of the given error kind.
    pub fn error_constructor(&self, kind: ExceptionType) -> Object {
        match kind {
            ExceptionType::Error => self.error,
            ExceptionType::EvalError => self.eval_error,
            ExceptionType::RangeError => self.range_error,
            ExceptionType::ReferenceError => self.reference_error,
            ExceptionType::SyntaxError => self.syntax_error,
            ExceptionType::TypeError => self.type_error,
            ExceptionType::UriError => self.uri_error,
        }
    }

    /// %Boolean%
    pub const fn boolean(&self) -> Object {
        self.boolean
    }

    /// %Boolean.prototype%
    pub const fn boolean_prototype(&self) -> Object {
        self.boolean_prototype
    }

    /// %Error%
    pub const fn error(&self) -> Object {
        self.error
    }

    /// %Error.prototype%
    pub const fn error_prototype(&self) -> Object {
        self.error_prototype
    }

    /// %EvalError%
    pub const fn eval_error(&self) -> Object {
        self.eval_error
    }

    /// %EvalError.prototype%
    pub const fn eval_error_prototype(&self) -> Object {
        self.eval_error_prototype
    }

    /// %Function.prototype%
    pub const fn function_prototype(&self) -> Object {
        self.function_prototype
    }

    /// %isFinite%
    pub const fn is_finite(&self) -> Object {
        self.is_finite
    }

    /// %isNaN%
    pub const fn is_nan(&self) -> Object {
        self.is_nan
    }

    /// %Number%
    pub const fn number(&self) -> Object {
        self.number
    }

    /// %Number.prototype%
    pub const fn number_prototype(&self) -> Object {
        self.number_prototype
    }

    /// %Object%
    pub const fn object(&self) -> Object {
        self.object
    }

    /// %Object.prototype%
    pub const fn object_prototype(&self) -> Object {
        self.object_prototype
    }

    /// %RangeError%
    pub const fn range_error(&self) -> Object {
        self.range_error
    }

    /// %RangeError.prototype%
    pub const fn range_error_prototype(&self) -> Object {
        self.range_error_prototype
    }

    /// %ReferenceError%
    pub const fn reference_error(&self) -> Object {
        self.reference_error
    }

    /// %ReferenceError.prototype%
    pub const fn reference_error_prototype(&self) -> Object {
        self.reference_error_prototype
    }

    /// %String%
    pub const fn string(&self) -> Object {
        self.string
    }

    /// %String.prototype%
    pub const fn string_prototype(&self) -> Object {
        self.string_prototype
    }

    /// %Symbol%
    pub const fn symbol(&self) -> Object {
        self.symbol
    }

    /// %Symbol.prototype%
    pub const fn symbol_prototype(&self) -> Object {
        self.symbol_prototype
    }

    /// %SyntaxError%
    pub const fn syntax_error(&self) -> Object {
        self.syntax_error
    }

    /// %SyntaxError.prototype%
    pub const fn syntax_error_prototype(&self) -> Object {
        self.syntax_error_prototype
    }

    /// %ThrowTypeError%
    pub const fn throw_type_error(&self) -> Object {
        self.throw_type_error
    }

    /// %TypeError%
    pub const fn type_error(&self) -> Object {
        self.type_error
    }

    /// %TypeError.prototype%
    pub const fn type_error_prototype(&self) -> Object {
        self.type_error_prototype
    }

    /// %URIError%
    pub const fn uri_error(&self) -> Object {
        self.uri_error
    }

    /// %URIError.prototype%
    pub const fn uri_error_prototype(&self) -> Object {
        self.uri_error_prototype
    }
}
