//! Type representations for the AST.
//!
//! This module defines the static types of the language:
//!
//! - Primitive types (`int`, `double`, `char`, `string`, `bool`)
//! - `void`, used for return types and as the type of `null`
//! - User-declared struct types, referenced by name
//! - Arrays of any of the above, marked by `is_array`
//!
//! It also holds the fixed name sets the checker consults (primitive
//! type names and reserved built-in function names).

use std::{collections::HashSet, fmt::Display};

use lazy_static::lazy_static;

use crate::lexer::tokens::Token;

pub const VOID: &str = "void";

lazy_static! {
    pub static ref BASE_TYPES: HashSet<&'static str> =
        HashSet::from(["int", "double", "char", "string", "bool"]);
    pub static ref BUILT_INS: HashSet<&'static str> = HashSet::from([
        "print",
        "input",
        "to_string",
        "to_int",
        "to_double",
        "length",
        "get",
        "concat",
    ]);
}

/// The static type of a value: a type name plus array-ness.
///
/// Array-ness is never coerced, `int[]` and `int` are unrelated types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataType {
    pub is_array: bool,
    pub type_name: String,
}

impl DataType {
    pub fn scalar(type_name: impl Into<String>) -> Self {
        DataType {
            is_array: false,
            type_name: type_name.into(),
        }
    }

    pub fn array(type_name: impl Into<String>) -> Self {
        DataType {
            is_array: true,
            type_name: type_name.into(),
        }
    }

    pub fn void() -> Self {
        DataType::scalar(VOID)
    }

    pub fn is_void(&self) -> bool {
        self.type_name == VOID
    }

    pub fn is_primitive(&self) -> bool {
        BASE_TYPES.contains(self.type_name.as_str())
    }

    /// True for the non-array type named `type_name`.
    pub fn is_scalar(&self, type_name: &str) -> bool {
        !self.is_array && self.type_name == type_name
    }

    /// The type of one element of this array type.
    pub fn element_type(&self) -> DataType {
        DataType::scalar(self.type_name.clone())
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.type_name)
        } else {
            write!(f, "{}", self.type_name)
        }
    }
}

/// A named, typed binding: a parameter, a struct field or a local variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub var_name: Token,
    pub data_type: DataType,
}

impl VarDef {
    pub fn new(var_name: Token, data_type: DataType) -> Self {
        VarDef { var_name, data_type }
    }

    pub fn name(&self) -> &str {
        &self.var_name.lexeme
    }
}
