//! Static semantic analysis module.
//!
//! This module validates a parsed program against the language's type
//! rules without producing a new tree:
//!
//! - Registering every struct and function before any body is checked
//! - Synthesizing the type of every expression bottom-up
//! - Checking statements against declared and expected types
//! - Managing nested lexical scopes for blocks and loops
//! - Validating calls to user functions and built-ins
//!
//! Checking is fail-fast: the first violation is returned as an `Error`.

pub mod builtins;
pub mod registry;
pub mod symbol_table;
pub mod type_checker;
