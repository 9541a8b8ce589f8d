use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

/// A static-check diagnostic. The first one raised ends the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Option<Position>) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Builds a diagnostic pointing at `token`.
    pub fn at(error_impl: ErrorImpl, token: &Token) -> Self {
        Error::new(error_impl, Some(token.position()))
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::MultipleDefinitions { .. } => "MultipleDefinitions",
            ErrorImpl::RedefiningBuiltIn { .. } => "RedefiningBuiltIn",
            ErrorImpl::MissingMain => "MissingMain",
            ErrorImpl::MainNotVoid => "MainNotVoid",
            ErrorImpl::MainHasParameters => "MainHasParameters",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::InvalidReturnType { .. } => "InvalidReturnType",
            ErrorImpl::FieldAlreadyDeclared { .. } => "FieldAlreadyDeclared",
            ErrorImpl::ParameterAlreadyDeclared { .. } => "ParameterAlreadyDeclared",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::OperandTypeMatchError { .. } => "OperandTypeMatchError",
            ErrorImpl::InvalidOperandType { .. } => "InvalidOperandType",
            ErrorImpl::ConditionNotBool { .. } => "ConditionNotBool",
            ErrorImpl::UnknownField { .. } => "UnknownField",
            ErrorImpl::NotAStruct { .. } => "NotAStruct",
            ErrorImpl::NotAnArray { .. } => "NotAnArray",
            ErrorImpl::ReturnTypeMatchError { .. } => "ReturnTypeMatchError",
            ErrorImpl::ReturnFromVoidFunction { .. } => "ReturnFromVoidFunction",
            ErrorImpl::UnrecognisedLiteral { .. } => "UnrecognisedLiteral",
            ErrorImpl::UnrecognisedOperator { .. } => "UnrecognisedOperator",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::MultipleDefinitions { name } => {
                ErrorTip::Suggestion(format!("`{}` is already defined, pick another name", name))
            }
            ErrorImpl::RedefiningBuiltIn { name } => ErrorTip::Suggestion(format!(
                "`{}` is a built-in function and cannot be redefined",
                name
            )),
            ErrorImpl::MissingMain => {
                ErrorTip::Suggestion(String::from("Add a `void main()` function"))
            }
            ErrorImpl::MainNotVoid | ErrorImpl::MainHasParameters => ErrorTip::Suggestion(
                String::from("`main` must be declared as `void main()`"),
            ),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::InvalidReturnType { .. } => ErrorTip::Suggestion(String::from(
                "Functions may only return primitive values or void",
            )),
            ErrorImpl::FieldAlreadyDeclared { .. } | ErrorImpl::ParameterAlreadyDeclared { .. } => {
                ErrorTip::None
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` already declared in this block",
                variable
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::UnexpectedArguments {
                expected, received, ..
            }
            | ErrorImpl::MissingArguments {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected argument type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::OperandTypeMatchError { .. } => ErrorTip::Suggestion(String::from(
                "Both operands must have the same type",
            )),
            ErrorImpl::InvalidOperandType { .. } => ErrorTip::None,
            ErrorImpl::ConditionNotBool { .. } => {
                ErrorTip::Suggestion(String::from("Conditions must be of type `bool`"))
            }
            ErrorImpl::UnknownField { struct_name, field } => ErrorTip::Suggestion(format!(
                "Struct `{}` has no field `{}`",
                struct_name, field
            )),
            ErrorImpl::NotAStruct { .. } => ErrorTip::Suggestion(String::from(
                "Fields can only be accessed on struct values",
            )),
            ErrorImpl::NotAnArray { .. } => ErrorTip::Suggestion(String::from(
                "Only array values can be indexed",
            )),
            ErrorImpl::ReturnTypeMatchError { expected, received } => ErrorTip::Suggestion(
                format!("Expected return type `{}`, received `{}`", expected, received),
            ),
            ErrorImpl::ReturnFromVoidFunction { .. } => ErrorTip::Suggestion(String::from(
                "Void functions cannot return a value",
            )),
            ErrorImpl::UnrecognisedLiteral { .. } | ErrorImpl::UnrecognisedOperator { .. } => {
                ErrorTip::None
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(position) => write!(
                f,
                "{} near line {}, column {}",
                self.internal_error, position.line, position.column
            ),
            None => write!(f, "{}", self.internal_error),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("multiple definitions of '{name}'")]
    MultipleDefinitions { name: String },
    #[error("redefining built-in function '{name}'")]
    RedefiningBuiltIn { name: String },
    #[error("program missing main function")]
    MissingMain,
    #[error("main function must have void type")]
    MainNotVoid,
    #[error("main function cannot have parameters")]
    MainHasParameters,
    #[error("unknown type '{type_}'")]
    UnknownType { type_: String },
    #[error("invalid return type '{type_}'")]
    InvalidReturnType { type_: String },
    #[error("multiple fields named '{field}' in struct '{struct_name}'")]
    FieldAlreadyDeclared { struct_name: String, field: String },
    #[error("multiple parameters named '{parameter}' in function '{function}'")]
    ParameterAlreadyDeclared { function: String, parameter: String },
    #[error("variable '{variable}' already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable '{variable}' not declared")]
    VariableNotDeclared { variable: String },
    #[error("function '{function}' not declared")]
    FunctionNotDeclared { function: String },
    #[error("too many arguments to '{function}': expected {expected}, received {received}")]
    UnexpectedArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("too few arguments to '{function}': expected {expected}, received {received}")]
    MissingArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {index} of '{function}' has type '{received}', expected '{expected}'")]
    ArgumentTypeMatchError {
        function: String,
        index: usize,
        expected: String,
        received: String,
    },
    #[error("type mismatch: expected '{expected}', received '{received}'")]
    TypeMatchError { expected: String, received: String },
    #[error("type mismatch for '{operator}': '{left}' and '{right}'")]
    OperandTypeMatchError {
        operator: String,
        left: String,
        right: String,
    },
    #[error("cannot use '{type_}' with '{operator}'")]
    InvalidOperandType { operator: String, type_: String },
    #[error("condition must be 'bool', received '{received}'")]
    ConditionNotBool { received: String },
    #[error("unknown field '{field}' in struct '{struct_name}'")]
    UnknownField { struct_name: String, field: String },
    #[error("cannot access field '{field}' on non-struct type '{type_}'")]
    NotAStruct { field: String, type_: String },
    #[error("cannot index '{name}' of non-array type '{type_}'")]
    NotAnArray { name: String, type_: String },
    #[error("type mismatch returning '{received}' when expected '{expected}'")]
    ReturnTypeMatchError { expected: String, received: String },
    #[error("cannot return '{received}' from a void function")]
    ReturnFromVoidFunction { received: String },
    #[error("unrecognised literal '{token}'")]
    UnrecognisedLiteral { token: String },
    #[error("unrecognised operator '{token}'")]
    UnrecognisedOperator { token: String },
}
