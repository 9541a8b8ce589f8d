use crate::lexer::tokens::Token;

/// Binary expression chain: `first (op rest)?`, folded to the right.
///
/// `1 + 2 * 3` is `first = 1, op = +, rest = (2 * 3)`. A `negated`
/// expression is prefixed with `not` and applies to the whole chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub negated: bool,
    pub first: Box<ExprTerm>,
    pub op: Option<Token>,
    pub rest: Option<Box<Expr>>,
}

impl Expr {
    /// A single value with no operator.
    pub fn value(rvalue: RValue) -> Self {
        Expr {
            negated: false,
            first: Box::new(ExprTerm::Simple(rvalue)),
            op: None,
            rest: None,
        }
    }

    /// A parenthesized sub-expression.
    pub fn group(expr: Expr) -> Self {
        Expr {
            negated: false,
            first: Box::new(ExprTerm::Complex(expr)),
            op: None,
            rest: None,
        }
    }

    pub fn binary(first: impl Into<ExprTerm>, op: Token, rest: Expr) -> Self {
        Expr {
            negated: false,
            first: Box::new(first.into()),
            op: Some(op),
            rest: Some(Box::new(rest)),
        }
    }

    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }

    pub fn first_token(&self) -> &Token {
        self.first.first_token()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprTerm {
    Simple(RValue),
    Complex(Expr),
}

impl ExprTerm {
    pub fn first_token(&self) -> &Token {
        match self {
            ExprTerm::Simple(rvalue) => rvalue.first_token(),
            ExprTerm::Complex(expr) => expr.first_token(),
        }
    }
}

impl From<RValue> for ExprTerm {
    fn from(rvalue: RValue) -> Self {
        ExprTerm::Simple(rvalue)
    }
}

impl From<Expr> for ExprTerm {
    fn from(expr: Expr) -> Self {
        ExprTerm::Complex(expr)
    }
}

// VALUES

#[derive(Debug, Clone, PartialEq)]
pub enum RValue {
    Simple(SimpleRValue),
    New(NewRValue),
    Call(CallExpr),
    Var(VarRValue),
}

impl RValue {
    pub fn literal(value: Token) -> Self {
        RValue::Simple(SimpleRValue { value })
    }

    /// `new T`
    pub fn new_object(type_name: Token) -> Self {
        RValue::New(NewRValue {
            type_name,
            array_expr: None,
        })
    }

    /// `new T[size]`
    pub fn new_array(type_name: Token, size: Expr) -> Self {
        RValue::New(NewRValue {
            type_name,
            array_expr: Some(size),
        })
    }

    pub fn call(fun_name: Token, args: Vec<Expr>) -> Self {
        RValue::Call(CallExpr { fun_name, args })
    }

    pub fn var(path: Vec<VarRef>) -> Self {
        RValue::Var(VarRValue { path })
    }

    pub fn first_token(&self) -> &Token {
        match self {
            RValue::Simple(simple) => &simple.value,
            RValue::New(new) => &new.type_name,
            RValue::Call(call) => &call.fun_name,
            RValue::Var(var) => var.first_token(),
        }
    }
}

/// Literal value; its static type follows from the token kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleRValue {
    pub value: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRValue {
    pub type_name: Token,
    pub array_expr: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub fun_name: Token,
    pub args: Vec<Expr>,
}

impl CallExpr {
    pub fn name(&self) -> &str {
        &self.fun_name.lexeme
    }
}

/// One segment of a path: `name` or `name[index]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarRef {
    pub var_name: Token,
    pub array_expr: Option<Expr>,
}

impl VarRef {
    pub fn name(var_name: Token) -> Self {
        VarRef {
            var_name,
            array_expr: None,
        }
    }

    pub fn indexed(var_name: Token, index: Expr) -> Self {
        VarRef {
            var_name,
            array_expr: Some(index),
        }
    }
}

/// Variable, field and array-element access chain such as `a.b[i].c`.
/// Always holds at least one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct VarRValue {
    pub path: Vec<VarRef>,
}

impl VarRValue {
    pub fn first_token(&self) -> &Token {
        &self.path[0].var_name
    }
}
