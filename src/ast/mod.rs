/// AST (Abstract Syntax Tree) module
/// Contains the tree handed over by the parser
///
/// Submodules:
/// - ast: Program, definitions and the statement enum
/// - expressions: Expression chains and value nodes
/// - statements: Payloads of the statement kinds
/// - types: Static types and typed bindings
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
