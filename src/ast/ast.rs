use crate::lexer::tokens::Token;

use super::{
    expressions::CallExpr,
    statements::{AssignStmt, ForStmt, IfStmt, ReturnStmt, VarDeclStmt, WhileStmt},
    types::{DataType, VarDef},
};

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assign(AssignStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    /// A call evaluated for its side effects; the result is discarded.
    Call(CallExpr),
}

impl From<VarDeclStmt> for Stmt {
    fn from(stmt: VarDeclStmt) -> Self {
        Stmt::VarDecl(stmt)
    }
}

impl From<AssignStmt> for Stmt {
    fn from(stmt: AssignStmt) -> Self {
        Stmt::Assign(stmt)
    }
}

impl From<IfStmt> for Stmt {
    fn from(stmt: IfStmt) -> Self {
        Stmt::If(stmt)
    }
}

impl From<WhileStmt> for Stmt {
    fn from(stmt: WhileStmt) -> Self {
        Stmt::While(stmt)
    }
}

impl From<ForStmt> for Stmt {
    fn from(stmt: ForStmt) -> Self {
        Stmt::For(stmt)
    }
}

impl From<ReturnStmt> for Stmt {
    fn from(stmt: ReturnStmt) -> Self {
        Stmt::Return(stmt)
    }
}

impl From<CallExpr> for Stmt {
    fn from(call: CallExpr) -> Self {
        Stmt::Call(call)
    }
}

/// Struct Definition
///
/// Field order is the declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub struct_name: Token,
    pub fields: Vec<VarDef>,
}

impl StructDef {
    pub fn name(&self) -> &str {
        &self.struct_name.lexeme
    }

    pub fn get_field(&self, field_name: &str) -> Option<&VarDef> {
        self.fields.iter().find(|field| field.name() == field_name)
    }
}

/// Function Definition
#[derive(Debug, Clone, PartialEq)]
pub struct FunDef {
    pub return_type: DataType,
    pub fun_name: Token,
    pub params: Vec<VarDef>,
    pub stmts: Vec<Stmt>,
}

impl FunDef {
    pub fn name(&self) -> &str {
        &self.fun_name.lexeme
    }
}

/// Whole program as produced by the parser.
///
/// Definitions may reference each other in any order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub struct_defs: Vec<StructDef>,
    pub fun_defs: Vec<FunDef>,
}
