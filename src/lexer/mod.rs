//! Token definitions shared with the lexer.
//!
//! Tokenization itself happens upstream. This module only defines the
//! token shape that the syntax tree carries at its leaves:
//!
//! - The token kind (identifiers, literal values, operators, keywords)
//! - The source lexeme
//! - The 1-based line and column used when reporting diagnostics

pub mod tokens;
