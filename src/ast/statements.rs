use super::{
    expressions::{Expr, VarRef},
    types::VarDef,
    ast::Stmt,
};

/// `T name = expr`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub var_def: VarDef,
    pub expr: Expr,
}

/// `path = expr`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub lvalue: Vec<VarRef>,
    pub expr: Expr,
}

/// A condition with the statements it guards.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicIf {
    pub condition: Expr,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub if_part: BasicIf,
    pub else_ifs: Vec<BasicIf>,
    pub else_stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub stmts: Vec<Stmt>,
}

/// `for (var_decl; condition; assign_stmt) { stmts }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub var_decl: VarDeclStmt,
    pub condition: Expr,
    pub assign_stmt: AssignStmt,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub expr: Expr,
}
