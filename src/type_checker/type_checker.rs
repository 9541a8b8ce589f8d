use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{FunDef, Program, Stmt, StructDef},
        expressions::{CallExpr, Expr, ExprTerm, NewRValue, RValue, VarRef},
        statements::{AssignStmt, BasicIf, ForStmt, IfStmt, ReturnStmt, VarDeclStmt, WhileStmt},
        types::{DataType, VarDef},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{builtins::BuiltIn, registry::Registry, symbol_table::SymbolTable};

/// Name under which the enclosing function's return type is bound.
/// `return` is a keyword, so no user binding can collide with it.
const RETURN_BINDING: &str = "return";

#[derive(Debug)]
pub struct TypeChecker<'a> {
    pub registry: Registry<'a>,
    pub symbol_table: SymbolTable,
}

impl<'a> TypeChecker<'a> {
    pub fn new(registry: Registry<'a>) -> Self {
        TypeChecker {
            registry,
            symbol_table: SymbolTable::new(),
        }
    }

    /// Runs `check` inside a fresh scope. The scope is popped on every path.
    fn in_scope<T>(
        &mut self,
        check: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.symbol_table.push_scope();
        let result = check(self);
        self.symbol_table.pop_scope();
        result
    }

    fn check_value_type(&self, data_type: &DataType, token: &Token) -> Result<(), Error> {
        if self.registry.is_value_type(&data_type.type_name) {
            Ok(())
        } else {
            Err(Error::at(
                ErrorImpl::UnknownType {
                    type_: data_type.type_name.clone(),
                },
                token,
            ))
        }
    }

    // DEFINITIONS

    pub fn check_struct_def(&mut self, struct_def: &StructDef) -> Result<(), Error> {
        trace!(name = struct_def.name(), "checking struct");

        for (i, field) in struct_def.fields.iter().enumerate() {
            self.check_value_type(&field.data_type, &field.var_name)?;
            if let Some(duplicate) = find_duplicate(field, &struct_def.fields[i + 1..]) {
                return Err(Error::at(
                    ErrorImpl::FieldAlreadyDeclared {
                        struct_name: struct_def.name().to_string(),
                        field: field.name().to_string(),
                    },
                    &duplicate.var_name,
                ));
            }
        }

        Ok(())
    }

    pub fn check_fun_def(&mut self, fun_def: &FunDef) -> Result<(), Error> {
        trace!(name = fun_def.name(), "checking function");

        let return_type = &fun_def.return_type;
        let valid_return = if return_type.is_void() {
            !return_type.is_array
        } else {
            return_type.is_primitive()
        };
        if !valid_return {
            return Err(Error::at(
                ErrorImpl::InvalidReturnType {
                    type_: return_type.to_string(),
                },
                &fun_def.fun_name,
            ));
        }

        for (i, param) in fun_def.params.iter().enumerate() {
            self.check_value_type(&param.data_type, &param.var_name)?;
            if let Some(duplicate) = find_duplicate(param, &fun_def.params[i + 1..]) {
                return Err(Error::at(
                    ErrorImpl::ParameterAlreadyDeclared {
                        function: fun_def.name().to_string(),
                        parameter: param.name().to_string(),
                    },
                    &duplicate.var_name,
                ));
            }
        }

        self.in_scope(|type_checker| {
            type_checker
                .symbol_table
                .declare(RETURN_BINDING, return_type.clone());
            for param in fun_def.params.iter() {
                type_checker
                    .symbol_table
                    .declare(param.name(), param.data_type.clone());
            }
            type_checker.check_stmts(&fun_def.stmts)
        })
    }

    // STATEMENTS

    pub fn check_stmts(&mut self, stmts: &[Stmt]) -> Result<(), Error> {
        for stmt in stmts.iter() {
            self.check_stmt(stmt)?;
        }
        Ok(())
    }

    pub fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::VarDecl(var_decl) => self.check_var_decl(var_decl),
            Stmt::Assign(assign) => self.check_assign(assign),
            Stmt::If(if_stmt) => self.check_if(if_stmt),
            Stmt::While(while_stmt) => self.check_while(while_stmt),
            Stmt::For(for_stmt) => self.check_for(for_stmt),
            Stmt::Return(return_stmt) => self.check_return(return_stmt),
            Stmt::Call(call) => self.check_call(call).map(|_| ()),
        }
    }

    fn check_var_decl(&mut self, var_decl: &VarDeclStmt) -> Result<(), Error> {
        let var_def = &var_decl.var_def;
        let declared = &var_def.data_type;

        self.check_value_type(declared, &var_def.var_name)?;
        if self.symbol_table.exists_in_innermost(var_def.name()) {
            return Err(Error::at(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: var_def.name().to_string(),
                },
                &var_def.var_name,
            ));
        }
        self.symbol_table.declare(var_def.name(), declared.clone());

        let actual = self.check_expr(&var_decl.expr)?;
        let null_struct =
            actual.is_void() && !declared.is_array && self.registry.is_struct(&declared.type_name);
        if actual != *declared && !null_struct {
            return Err(Error::at(
                ErrorImpl::TypeMatchError {
                    expected: declared.to_string(),
                    received: actual.to_string(),
                },
                &var_def.var_name,
            ));
        }

        Ok(())
    }

    fn check_assign(&mut self, assign: &AssignStmt) -> Result<(), Error> {
        let actual = self.check_expr(&assign.expr)?;
        let expected = self.resolve_path(&assign.lvalue)?;

        if actual != expected {
            let target = assign
                .lvalue
                .last()
                .map(|segment| segment.var_name.position());
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: expected.to_string(),
                    received: actual.to_string(),
                },
                target,
            ));
        }

        Ok(())
    }

    fn check_condition(&self, condition: &Expr) -> Result<(), Error> {
        let condition_type = self.check_expr(condition)?;
        if !condition_type.is_scalar("bool") {
            return Err(Error::at(
                ErrorImpl::ConditionNotBool {
                    received: condition_type.to_string(),
                },
                condition.first_token(),
            ));
        }
        Ok(())
    }

    fn check_basic_if(&mut self, branch: &BasicIf) -> Result<(), Error> {
        self.in_scope(|type_checker| {
            type_checker.check_condition(&branch.condition)?;
            type_checker.check_stmts(&branch.stmts)
        })
    }

    fn check_if(&mut self, if_stmt: &IfStmt) -> Result<(), Error> {
        self.check_basic_if(&if_stmt.if_part)?;
        for else_if in if_stmt.else_ifs.iter() {
            self.check_basic_if(else_if)?;
        }
        self.in_scope(|type_checker| type_checker.check_stmts(&if_stmt.else_stmts))
    }

    fn check_while(&mut self, while_stmt: &WhileStmt) -> Result<(), Error> {
        self.check_condition(&while_stmt.condition)?;
        self.in_scope(|type_checker| type_checker.check_stmts(&while_stmt.stmts))
    }

    fn check_for(&mut self, for_stmt: &ForStmt) -> Result<(), Error> {
        // The loop variable lives in the loop's scope, visible to the condition and update.
        self.in_scope(|type_checker| {
            type_checker.check_var_decl(&for_stmt.var_decl)?;
            type_checker.check_condition(&for_stmt.condition)?;
            type_checker.check_assign(&for_stmt.assign_stmt)?;
            type_checker.check_stmts(&for_stmt.stmts)
        })
    }

    fn check_return(&mut self, return_stmt: &ReturnStmt) -> Result<(), Error> {
        let actual = self.check_expr(&return_stmt.expr)?;
        let expected = self
            .symbol_table
            .lookup(RETURN_BINDING)
            .cloned()
            .unwrap_or_else(DataType::void);

        if expected.is_void() {
            if !actual.is_void() {
                return Err(Error::at(
                    ErrorImpl::ReturnFromVoidFunction {
                        received: actual.to_string(),
                    },
                    return_stmt.expr.first_token(),
                ));
            }
        } else if actual != expected {
            return Err(Error::at(
                ErrorImpl::ReturnTypeMatchError {
                    expected: expected.to_string(),
                    received: actual.to_string(),
                },
                return_stmt.expr.first_token(),
            ));
        }

        Ok(())
    }

    // EXPRESSIONS

    pub fn check_expr(&self, expr: &Expr) -> Result<DataType, Error> {
        let lhs = self.check_term(&expr.first)?;

        let result = if let (Some(op), Some(rest)) = (&expr.op, &expr.rest) {
            let rhs = self.check_expr(rest)?;
            check_binary(op, lhs, rhs)?
        } else {
            lhs
        };

        if expr.negated && !result.is_scalar("bool") {
            return Err(Error::at(
                ErrorImpl::InvalidOperandType {
                    operator: String::from("not"),
                    type_: result.to_string(),
                },
                expr.first_token(),
            ));
        }

        Ok(result)
    }

    fn check_term(&self, term: &ExprTerm) -> Result<DataType, Error> {
        match term {
            ExprTerm::Simple(rvalue) => self.check_rvalue(rvalue),
            ExprTerm::Complex(expr) => self.check_expr(expr),
        }
    }

    pub fn check_rvalue(&self, rvalue: &RValue) -> Result<DataType, Error> {
        match rvalue {
            RValue::Simple(simple) => literal_type(&simple.value),
            RValue::New(new) => self.check_new(new),
            RValue::Call(call) => self.check_call(call),
            RValue::Var(var) => self.resolve_path(&var.path),
        }
    }

    fn check_new(&self, new: &NewRValue) -> Result<DataType, Error> {
        let type_name = &new.type_name.lexeme;
        if !self.registry.is_value_type(type_name) {
            return Err(Error::at(
                ErrorImpl::UnknownType {
                    type_: type_name.clone(),
                },
                &new.type_name,
            ));
        }

        match &new.array_expr {
            Some(size) => {
                let size_type = self.check_expr(size)?;
                if !size_type.is_scalar("int") {
                    return Err(Error::at(
                        ErrorImpl::TypeMatchError {
                            expected: String::from("int"),
                            received: size_type.to_string(),
                        },
                        size.first_token(),
                    ));
                }
                Ok(DataType::array(type_name.clone()))
            }
            None => Ok(DataType::scalar(type_name.clone())),
        }
    }

    pub fn check_call(&self, call: &CallExpr) -> Result<DataType, Error> {
        if let Some(builtin) = BuiltIn::from_name(call.name()) {
            return self.check_builtin_call(builtin, call);
        }

        let Some(fun_def) = self.registry.get_function(call.name()) else {
            return Err(Error::at(
                ErrorImpl::FunctionNotDeclared {
                    function: call.name().to_string(),
                },
                &call.fun_name,
            ));
        };

        check_arity(call, fun_def.params.len())?;
        for (index, (arg, param)) in call.args.iter().zip(fun_def.params.iter()).enumerate() {
            let arg_type = self.check_expr(arg)?;
            if arg_type != param.data_type {
                return Err(Error::at(
                    ErrorImpl::ArgumentTypeMatchError {
                        function: call.name().to_string(),
                        index,
                        expected: param.data_type.to_string(),
                        received: arg_type.to_string(),
                    },
                    &call.fun_name,
                ));
            }
        }

        Ok(fun_def.return_type.clone())
    }

    fn check_builtin_call(&self, builtin: BuiltIn, call: &CallExpr) -> Result<DataType, Error> {
        check_arity(call, builtin.arity())?;

        for (index, arg) in call.args.iter().enumerate() {
            let arg_type = self.check_expr(arg)?;
            if !builtin.accepts_argument(index, &arg_type, &self.registry) {
                return Err(Error::at(
                    ErrorImpl::ArgumentTypeMatchError {
                        function: builtin.name().to_string(),
                        index,
                        expected: builtin.expected_argument(index).to_string(),
                        received: arg_type.to_string(),
                    },
                    &call.fun_name,
                ));
            }
        }

        Ok(builtin.return_type())
    }

    /// Resolves `a`, `a[i]`, `a.b`, `a.b[i].c`, ... left to right.
    pub fn resolve_path(&self, path: &[VarRef]) -> Result<DataType, Error> {
        let Some((head, tail)) = path.split_first() else {
            return Err(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: String::new(),
                },
                None,
            ));
        };

        let variable = &head.var_name.lexeme;
        let Some(head_type) = self.symbol_table.lookup(variable) else {
            return Err(Error::at(
                ErrorImpl::VariableNotDeclared {
                    variable: variable.clone(),
                },
                &head.var_name,
            ));
        };
        let mut current = self.index_segment(head, head_type.clone())?;

        for segment in tail.iter() {
            let field_name = &segment.var_name.lexeme;
            let struct_def = match self.registry.get_struct(&current.type_name) {
                Some(struct_def) if !current.is_array => struct_def,
                _ => {
                    return Err(Error::at(
                        ErrorImpl::NotAStruct {
                            field: field_name.clone(),
                            type_: current.to_string(),
                        },
                        &segment.var_name,
                    ))
                }
            };
            let Some(field) = struct_def.get_field(field_name) else {
                return Err(Error::at(
                    ErrorImpl::UnknownField {
                        struct_name: struct_def.name().to_string(),
                        field: field_name.clone(),
                    },
                    &segment.var_name,
                ));
            };
            current = self.index_segment(segment, field.data_type.clone())?;
        }

        Ok(current)
    }

    /// Applies the segment's `[index]`, if any, to `data_type`.
    fn index_segment(&self, segment: &VarRef, data_type: DataType) -> Result<DataType, Error> {
        let Some(index) = &segment.array_expr else {
            return Ok(data_type);
        };

        if !data_type.is_array {
            return Err(Error::at(
                ErrorImpl::NotAnArray {
                    name: segment.var_name.lexeme.clone(),
                    type_: data_type.to_string(),
                },
                &segment.var_name,
            ));
        }

        let index_type = self.check_expr(index)?;
        if !index_type.is_scalar("int") {
            return Err(Error::at(
                ErrorImpl::TypeMatchError {
                    expected: String::from("int"),
                    received: index_type.to_string(),
                },
                index.first_token(),
            ));
        }

        Ok(data_type.element_type())
    }
}

fn find_duplicate<'d>(var_def: &VarDef, rest: &'d [VarDef]) -> Option<&'d VarDef> {
    rest.iter().find(|other| other.name() == var_def.name())
}

fn literal_type(value: &Token) -> Result<DataType, Error> {
    let type_name = match value.kind {
        TokenKind::IntVal => "int",
        TokenKind::DoubleVal => "double",
        TokenKind::CharVal => "char",
        TokenKind::StringVal => "string",
        TokenKind::BoolVal => "bool",
        TokenKind::NullVal => "void",
        _ => {
            return Err(Error::at(
                ErrorImpl::UnrecognisedLiteral {
                    token: value.lexeme.clone(),
                },
                value,
            ))
        }
    };
    Ok(DataType::scalar(type_name))
}

fn check_arity(call: &CallExpr, expected: usize) -> Result<(), Error> {
    let received = call.args.len();
    let error = if received > expected {
        ErrorImpl::UnexpectedArguments {
            function: call.name().to_string(),
            expected,
            received,
        }
    } else if received < expected {
        ErrorImpl::MissingArguments {
            function: call.name().to_string(),
            expected,
            received,
        }
    } else {
        return Ok(());
    };
    Err(Error::at(error, &call.fun_name))
}

fn check_binary(op: &Token, lhs: DataType, rhs: DataType) -> Result<DataType, Error> {
    let allowed: &[&str] = match op.kind {
        TokenKind::Plus | TokenKind::Minus | TokenKind::Times | TokenKind::Divide => {
            &["int", "double"][..]
        }
        TokenKind::Less | TokenKind::LessEqual | TokenKind::Greater | TokenKind::GreaterEqual => {
            &["int", "double", "char", "string"][..]
        }
        TokenKind::And | TokenKind::Or => &["bool"][..],
        TokenKind::Equal | TokenKind::NotEqual => {
            // null compares against anything
            if lhs != rhs && !lhs.is_void() && !rhs.is_void() {
                return Err(operand_mismatch(op, &lhs, &rhs));
            }
            return Ok(DataType::scalar("bool"));
        }
        _ => {
            return Err(Error::at(
                ErrorImpl::UnrecognisedOperator {
                    token: op.lexeme.clone(),
                },
                op,
            ))
        }
    };

    if lhs != rhs {
        return Err(operand_mismatch(op, &lhs, &rhs));
    }
    if lhs.is_array || !allowed.contains(&lhs.type_name.as_str()) {
        return Err(Error::at(
            ErrorImpl::InvalidOperandType {
                operator: op.lexeme.clone(),
                type_: lhs.to_string(),
            },
            op,
        ));
    }

    if op.is_one_of_many(&[TokenKind::Plus, TokenKind::Minus, TokenKind::Times, TokenKind::Divide]) {
        Ok(lhs)
    } else {
        Ok(DataType::scalar("bool"))
    }
}

fn operand_mismatch(op: &Token, lhs: &DataType, rhs: &DataType) -> Error {
    Error::at(
        ErrorImpl::OperandTypeMatchError {
            operator: op.lexeme.clone(),
            left: lhs.to_string(),
            right: rhs.to_string(),
        },
        op,
    )
}

/// Checks a whole program, stopping at the first violation.
///
/// Every struct and function is registered before any body is checked.
pub fn type_check(program: &Program) -> Result<(), Error> {
    debug!(
        structs = program.struct_defs.len(),
        functions = program.fun_defs.len(),
        "starting static check"
    );

    let result = check_program(program);
    if let Err(error) = &result {
        debug!(%error, "static check failed");
    }
    result
}

fn check_program(program: &Program) -> Result<(), Error> {
    let registry = Registry::from_program(program)?;
    let mut type_checker = TypeChecker::new(registry);

    for struct_def in program.struct_defs.iter() {
        type_checker.check_struct_def(struct_def)?;
    }
    for fun_def in program.fun_defs.iter() {
        type_checker.check_fun_def(fun_def)?;
    }

    Ok(())
}
