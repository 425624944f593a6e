//! Declared and inferred value types.
//!
//! Variables may carry one of the primitive type annotations below. The checker
//! also infers a `Type` for expressions and compares it against the declaration.

use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Int,
    Float,
    String,
    Bool,
    Array,
    Object,
    Any,
    /// Never produced by inference or annotations; nil literals infer as `Any`.
    Nil,
}

impl Type {
    /// Maps a type keyword (`int`, `float`, ...) to its type.
    pub fn from_annotation(name: &str) -> Option<Type> {
        match name {
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "string" => Some(Type::String),
            "bool" => Some(Type::Bool),
            "array" => Some(Type::Array),
            "object" => Some(Type::Object),
            "any" => Some(Type::Any),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
            Type::Bool => "bool",
            Type::Array => "array",
            Type::Object => "object",
            Type::Any => "any",
            Type::Nil => "nil",
        }
    }

    /// Whether a value of type `actual` may be stored in a slot declared as `self`.
    ///
    /// `any` on either side is compatible, and `int` widens to `float`. A `nil` value is
    /// accepted everywhere, although inference currently never yields `nil`.
    pub fn is_compatible_with(&self, actual: &Type) -> bool {
        if self == actual {
            return true;
        }

        match (self, actual) {
            (Type::Any, _) | (_, Type::Any) => true,
            (Type::Float, Type::Int) => true,
            (_, Type::Nil) => true,
            _ => false,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
