//! Signatures of the reserved built-in functions.
//!
//! Built-ins accept argument shapes that ordinary parameter lists cannot
//! express (e.g. `length` takes a string or any array), so each one
//! carries its own argument predicate instead of a parameter list.

use crate::ast::types::DataType;

use super::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltIn {
    Print,
    Input,
    ToString,
    ToInt,
    ToDouble,
    Length,
    Get,
    Concat,
}

impl BuiltIn {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "print" => Some(BuiltIn::Print),
            "input" => Some(BuiltIn::Input),
            "to_string" => Some(BuiltIn::ToString),
            "to_int" => Some(BuiltIn::ToInt),
            "to_double" => Some(BuiltIn::ToDouble),
            "length" => Some(BuiltIn::Length),
            "get" => Some(BuiltIn::Get),
            "concat" => Some(BuiltIn::Concat),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltIn::Print => "print",
            BuiltIn::Input => "input",
            BuiltIn::ToString => "to_string",
            BuiltIn::ToInt => "to_int",
            BuiltIn::ToDouble => "to_double",
            BuiltIn::Length => "length",
            BuiltIn::Get => "get",
            BuiltIn::Concat => "concat",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            BuiltIn::Input => 0,
            BuiltIn::Get | BuiltIn::Concat => 2,
            _ => 1,
        }
    }

    pub fn return_type(self) -> DataType {
        match self {
            BuiltIn::Print => DataType::void(),
            BuiltIn::Input | BuiltIn::ToString | BuiltIn::Concat => DataType::scalar("string"),
            BuiltIn::ToInt | BuiltIn::Length => DataType::scalar("int"),
            BuiltIn::ToDouble => DataType::scalar("double"),
            BuiltIn::Get => DataType::scalar("char"),
        }
    }

    /// Human description of what argument `index` accepts.
    pub fn expected_argument(self, index: usize) -> &'static str {
        match (self, index) {
            (BuiltIn::Print, _) => "non-array, non-struct value",
            (BuiltIn::Get, 0) => "int",
            (BuiltIn::Get, _) | (BuiltIn::Concat, _) => "string",
            (BuiltIn::ToString, _) => "non-array value other than bool or void",
            (BuiltIn::ToInt, _) => "non-array value other than int, bool or void",
            (BuiltIn::ToDouble, _) => "non-array value other than double, bool or void",
            (BuiltIn::Length, _) => "string or array",
            (BuiltIn::Input, _) => "no arguments",
        }
    }

    pub fn accepts_argument(self, index: usize, argument: &DataType, registry: &Registry) -> bool {
        match (self, index) {
            (BuiltIn::Print, _) => !argument.is_array && !registry.is_struct(&argument.type_name),
            (BuiltIn::Get, 0) => argument.is_scalar("int"),
            (BuiltIn::Get, _) | (BuiltIn::Concat, _) => argument.is_scalar("string"),
            (BuiltIn::ToString, _) => is_convertible(argument, None),
            (BuiltIn::ToInt, _) => is_convertible(argument, Some("int")),
            (BuiltIn::ToDouble, _) => is_convertible(argument, Some("double")),
            (BuiltIn::Length, _) => argument.is_array || argument.type_name == "string",
            (BuiltIn::Input, _) => false,
        }
    }
}

/// Scalar, not `void` or `bool`, and not already the conversion target.
fn is_convertible(argument: &DataType, target: Option<&str>) -> bool {
    !argument.is_array
        && !argument.is_void()
        && argument.type_name != "bool"
        && target.map_or(true, |target| argument.type_name != target)
}
